use crate::{
    ast::BinaryOperator,
    error::EvalFault,
    interpreter::evaluator::{core::Evaluator, scalar::Scalar},
};

impl<T: Scalar> Evaluator<'_, T> {
    /// Evaluates `&&` or `||` on two already evaluated operands.
    ///
    /// There is no short-circuit: a fault in either operand has already been
    /// reported by the time this runs.
    ///
    /// # Errors
    /// - `EvalFault::UnexpectedNode` if `op` is not logical.
    pub fn eval_logic(op: BinaryOperator, left: T, right: T) -> Result<T, EvalFault> {
        let holds = match op {
            BinaryOperator::And => left.is_truthy() && right.is_truthy(),
            BinaryOperator::Or => left.is_truthy() || right.is_truthy(),
            _ => return Err(EvalFault::UnexpectedNode),
        };
        Ok(T::from_bool(holds))
    }
}
