use crate::{
    ast::Expr,
    error::{EvalError, EvalFault},
    interpreter::evaluator::scalar::Scalar,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Walks a built tree against one variable slice.
///
/// The evaluator borrows both the tree and the slice and owns no state, so
/// any number of evaluations can run on the same tree at once.
///
/// ## Example
/// ```
/// use varexpr::{
///     ast::{BinaryOperator, Expr, Value},
///     interpreter::evaluator::core::Evaluator,
/// };
///
/// let expr = Expr::BinaryOp { left:  Box::new(Expr::Variable { index: 0 }),
///                             op:    BinaryOperator::Mul,
///                             right: Box::new(Expr::Literal { value: Value::Integer(3) }), };
///
/// let vars = [7i64];
/// assert_eq!(Evaluator::new(&vars).eval(&expr), Ok(21));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a, T: Scalar> {
    vars: &'a [T],
}

impl<'a, T: Scalar> Evaluator<'a, T> {
    #[must_use]
    pub const fn new(vars: &'a [T]) -> Self {
        Self { vars }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// Children are evaluated before their parent. The first failure stops
    /// the walk and is returned as is.
    ///
    /// # Errors
    /// - `EvalError::Evaluation` with `EvalFault::UnexpectedNode` if a literal
    ///   belongs to the other domain.
    /// - `EvalError::ArrayTooSmall` if a variable index lies outside the
    ///   slice.
    /// - `EvalError::Evaluation` for integer arithmetic faults.
    pub fn eval(&self, expr: &Expr) -> EvalResult<T> {
        match expr {
            Expr::Literal { value } => {
                T::from_value(*value).ok_or(EvalError::Evaluation(EvalFault::UnexpectedNode))
            },
            Expr::Variable { index } => self.eval_variable(*index),
            Expr::UnaryOp { op, expr } => {
                let value = self.eval(expr)?;
                Ok(Self::eval_unary(*op, value)?)
            },
            Expr::BinaryOp { left, op, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Ok(Self::eval_binary(*op, left, right)?)
            },
        }
    }

    /// Looks up a variable by its zero-based index.
    fn eval_variable(&self, index: usize) -> EvalResult<T> {
        self.vars
            .get(index)
            .copied()
            .ok_or(EvalError::ArrayTooSmall { required: index.saturating_add(1),
                                              found:    self.vars.len(), })
    }
}
