use std::io::{self, Write};

/// The reason a syntax error was raised.
///
/// All syntax errors share the status code of [`BuildError::Syntax`]; this
/// enum carries the human-readable distinction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SyntaxError {
    /// No token starts at this position.
    UnrecognisedToken,
    /// A literal started but the numeric conversion consumed nothing.
    InvalidNumber,
    /// An integer literal does not fit in 64 bits.
    NumberOutOfRange,
    /// The digits of a `${...}` reference overflow the index width.
    IndexTooLarge,
    /// A value, unary operator or bracket follows a complete operand.
    MissingOperator,
    /// A binary operator or `)` appears where an operand is required.
    MissingValue,
    /// `()` with nothing inside.
    EmptyParenthesis,
    /// `)` without a matching `(` or function.
    UnbalancedParenthesis,
    /// The input ended while an operator still waits for an operand.
    IncompleteExpression,
    /// The input ended inside a bracket or function scope.
    UnclosedParenthesis,
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::UnrecognisedToken => "unrecognised token",
            Self::InvalidNumber => "failed to recognise the number",
            Self::NumberOutOfRange => "the number is out of range",
            Self::IndexTooLarge => "the variable index is too large",
            Self::MissingOperator => "missing operator",
            Self::MissingValue => "missing value",
            Self::EmptyParenthesis => "empty parenthesis",
            Self::UnbalancedParenthesis => "unbalanced parenthesis",
            Self::IncompleteExpression => "incomplete expression",
            Self::UnclosedParenthesis => "unclosed parenthesis",
        };
        write!(f, "{message}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while building a syntax tree.
pub enum BuildError {
    /// Storage for the tree or the variable registry could not be grown.
    Memory,
    /// The expression is empty or contains only whitespace.
    InvalidExpression,
    /// The expression is malformed.
    Syntax {
        /// What went wrong.
        kind:   SyntaxError,
        /// Byte offset of the offending character in the original text.
        offset: usize,
    },
    /// `build` was already called on this handle.
    AlreadyBuilt,
    /// The expression references more distinct variables than allowed.
    TooManyVariables {
        /// The configured ceiling.
        limit: usize,
    },
}

impl BuildError {
    /// Numeric status code of this error. Success is `0`; every error is
    /// negative.
    ///
    /// ## Example
    /// ```
    /// use varexpr::error::{BuildError, SyntaxError};
    ///
    /// let err = BuildError::Syntax { kind:   SyntaxError::MissingValue,
    ///                                offset: 2, };
    /// assert_eq!(err.code(), -4);
    /// assert_eq!(BuildError::AlreadyBuilt.code(), -5);
    /// ```
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Memory => -1,
            Self::InvalidExpression => -3,
            Self::Syntax { .. } => -4,
            Self::AlreadyBuilt => -5,
            Self::TooManyVariables { .. } => -11,
        }
    }

    /// Writes a diagnostic for this error.
    ///
    /// The first line is `prefix`, a space when `prefix` is not empty, the
    /// message, and a full stop. Syntax errors add the original `source` and a
    /// caret under the offending character.
    ///
    /// ## Example
    /// ```
    /// use varexpr::error::{BuildError, SyntaxError};
    ///
    /// let err = BuildError::Syntax { kind:   SyntaxError::IncompleteExpression,
    ///                                offset: 2, };
    /// let mut out = Vec::new();
    /// err.report(&mut out, "Error:", "1+").unwrap();
    ///
    /// assert_eq!(String::from_utf8(out).unwrap(),
    ///            "Error: incomplete expression.\n1+\n  ^\n");
    /// ```
    pub fn report<W: Write>(&self, out: &mut W, prefix: &str, source: &str) -> io::Result<()> {
        let sep = if prefix.is_empty() { "" } else { " " };

        match self {
            Self::Syntax { kind, offset } => {
                writeln!(out, "{prefix}{sep}{kind}.")?;
                let column = source.get(..*offset)
                                   .map_or(*offset, |head| head.chars().count());
                writeln!(out, "{source}")?;
                writeln!(out, "{:column$}^", "")
            },
            _ => writeln!(out, "{prefix}{sep}{self}."),
        }
    }
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "failed to allocate memory"),
            Self::InvalidExpression => write!(f, "invalid expression string"),
            Self::Syntax { kind, offset } => write!(f, "{kind} at offset {offset}"),
            Self::AlreadyBuilt => write!(f, "the abstract syntax tree has already been built"),
            Self::TooManyVariables { limit } => {
                write!(f, "too many variables (at most {limit} are allowed)")
            },
        }
    }
}

impl std::error::Error for BuildError {}
