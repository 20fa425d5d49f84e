use crate::{
    ast::BinaryOperator,
    error::EvalFault,
    interpreter::evaluator::{core::Evaluator, scalar::Scalar},
};

impl<T: Scalar> Evaluator<'_, T> {
    /// Evaluates `+`, `-`, `*`, `/` or `^`.
    ///
    /// Real operands follow IEEE-754. Integer division truncates toward zero,
    /// and integer faults (division by zero, overflow) are returned instead of
    /// wrapping.
    ///
    /// # Errors
    /// - `EvalFault::UnexpectedNode` if `op` is not arithmetic.
    pub fn eval_arithmetic(op: BinaryOperator, left: T, right: T) -> Result<T, EvalFault> {
        match op {
            BinaryOperator::Add => left.sum(right),
            BinaryOperator::Sub => left.difference(right),
            BinaryOperator::Mul => left.product(right),
            BinaryOperator::Div => left.quotient(right),
            BinaryOperator::Pow => left.power(right),
            _ => Err(EvalFault::UnexpectedNode),
        }
    }
}
