use crate::{
    ast::UnaryOperator,
    error::EvalFault,
    interpreter::evaluator::{core::Evaluator, scalar::Scalar},
};

impl<T: Scalar> Evaluator<'_, T> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: arithmetic negation.
    /// - `Not`: `1` if the operand is zero, `0` otherwise.
    /// - `Sqrt`, `Ln`, `Log`: square root, natural and base-10 logarithm. In
    ///   the integer domain these are computed in `f64` and truncated toward
    ///   zero.
    ///
    /// # Example
    /// ```
    /// use varexpr::{ast::UnaryOperator, interpreter::evaluator::core::Evaluator};
    ///
    /// assert_eq!(Evaluator::<i64>::eval_unary(UnaryOperator::Not, 0), Ok(1));
    /// assert_eq!(Evaluator::<f64>::eval_unary(UnaryOperator::Log, 1000.0), Ok(3.0));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: T) -> Result<T, EvalFault> {
        match op {
            UnaryOperator::Negate => value.negated(),
            UnaryOperator::Not => Ok(T::from_bool(!value.is_truthy())),
            UnaryOperator::Sqrt => value.square_root(),
            UnaryOperator::Ln => value.natural_log(),
            UnaryOperator::Log => value.common_log(),
        }
    }
}
