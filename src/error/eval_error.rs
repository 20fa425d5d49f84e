use crate::{ast::Domain, error::BuildError};

/// The arithmetic fault behind an [`EvalError::Evaluation`].
///
/// Only integer arithmetic can fault; floating-point arithmetic follows
/// IEEE-754 and yields infinities or NaN instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EvalFault {
    /// Integer division by zero.
    DivisionByZero,
    /// The integer result does not fit in 64 bits.
    Overflow,
    /// A function result has no integer value, e.g. `sqrt(-1)` or `ln(0)`.
    NotRepresentable,
    /// A tree node that the evaluator cannot dispatch on.
    UnexpectedNode,
}

impl std::fmt::Display for EvalFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::Overflow => write!(f, "integer overflow"),
            Self::NotRepresentable => write!(f, "result is not representable as an integer"),
            Self::UnexpectedNode => write!(f, "unexpected node in the syntax tree"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while evaluating a built tree.
pub enum EvalError {
    /// `build` was never called on this handle.
    NotBuilt,
    /// The handle failed to build; the stored error is repeated.
    Build(BuildError),
    /// The variable slice belongs to the other numeric domain.
    DomainMismatch {
        /// Domain the expression was built for.
        expected: Domain,
        /// Domain of the supplied variables.
        found:    Domain,
    },
    /// The variable slice does not reach the largest referenced index.
    ArrayTooSmall {
        /// The minimum length the slice must have.
        required: usize,
        /// The length that was supplied.
        found:    usize,
    },
    /// Arithmetic failed while walking the tree.
    Evaluation(EvalFault),
}

impl EvalError {
    /// Numeric status code of this error. A repeated build error keeps its
    /// own code.
    ///
    /// ## Example
    /// ```
    /// use varexpr::error::{EvalError, EvalFault};
    ///
    /// assert_eq!(EvalError::NotBuilt.code(), -6);
    /// assert_eq!(EvalError::Evaluation(EvalFault::DivisionByZero).code(), -10);
    /// ```
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::NotBuilt => -6,
            Self::Build(err) => err.code(),
            Self::ArrayTooSmall { .. } => -9,
            Self::Evaluation(_) => -10,
            Self::DomainMismatch { .. } => -12,
        }
    }
}

impl From<EvalFault> for EvalError {
    fn from(fault: EvalFault) -> Self {
        Self::Evaluation(fault)
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotBuilt => write!(f, "the abstract syntax tree has not been built"),
            Self::Build(err) => write!(f, "{err}"),
            Self::DomainMismatch { expected, found } => write!(f,
                                                               "the variable array holds {found} values but the expression was built for {expected} values"),
            Self::ArrayTooSmall { required, found } => write!(f,
                                                              "not enough elements in the variable array: {required} required, {found} given"),
            Self::Evaluation(fault) => write!(f, "evaluation failed: {fault}"),
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Build(err) => Some(err),
            _ => None,
        }
    }
}
