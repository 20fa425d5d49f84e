use crate::ast::Domain;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while reading an expression script.
pub enum InputError {
    /// No line of the script holds an expression.
    MissingExpression,
    /// The type cannot be used where it appears.
    UnsupportedType {
        /// The type keyword as written.
        keyword: String,
        /// The script line where the error occurred.
        line:    usize,
    },
    /// A variable id is zero, negative, or larger than the reader accepts.
    InvalidVariableId {
        /// The id as written.
        token: String,
        /// The script line where the error occurred.
        line:  usize,
    },
    /// A variable value cannot be read as its declared type.
    InvalidValue {
        /// The type keyword as written.
        keyword: String,
        /// The value as written, empty if it is missing.
        token:   String,
        /// The script line where the error occurred.
        line:    usize,
    },
    /// A real-valued variable was given to an integer expression.
    TypeMismatch {
        /// The type keyword as written.
        keyword: String,
        /// Domain of the expression.
        domain:  Domain,
        /// The script line where the error occurred.
        line:    usize,
    },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingExpression => write!(f, "Error: the script holds no expression."),

            Self::UnsupportedType { keyword, line } => {
                write!(f, "Error on line {line}: Type {keyword} is not supported here.")
            },

            Self::InvalidVariableId { token, line } => write!(f,
                                                              "Error on line {line}: Invalid variable id '{token}'. Ids start at 1."),

            Self::InvalidValue { keyword, token, line } => {
                write!(f, "Error on line {line}: Unrecognised {keyword} value '{token}'.")
            },

            Self::TypeMismatch { keyword, domain, line } => write!(f,
                                                                   "Error on line {line}: A {keyword} variable cannot be used in the {domain} domain."),
        }
    }
}

impl std::error::Error for InputError {}
