use crate::{
    ast::BinaryOperator,
    error::EvalFault,
    interpreter::evaluator::{core::Evaluator, scalar::Scalar},
};

impl<T: Scalar> Evaluator<'_, T> {
    /// Evaluates a comparison of the form `value <operator> value`.
    ///
    /// Comparisons use the domain's native ordering, so any comparison with a
    /// NaN operand is false except `!=`.
    ///
    /// # Errors
    /// - `EvalFault::UnexpectedNode` if `op` is not a comparison.
    pub fn eval_comparison(op: BinaryOperator, left: T, right: T) -> Result<T, EvalFault> {
        let holds = match op {
            BinaryOperator::Equal => left == right,
            BinaryOperator::NotEqual => left != right,
            BinaryOperator::Greater => left > right,
            BinaryOperator::GreaterEqual => left >= right,
            BinaryOperator::Less => left < right,
            BinaryOperator::LessEqual => left <= right,
            _ => return Err(EvalFault::UnexpectedNode),
        };
        Ok(T::from_bool(holds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Real = Evaluator<'static, f64>;

    #[test]
    fn nan_compares_unequal() {
        let nan = f64::NAN;
        assert_eq!(Real::eval_comparison(BinaryOperator::Equal, nan, nan), Ok(0.0));
        assert_eq!(Real::eval_comparison(BinaryOperator::NotEqual, nan, nan), Ok(1.0));
        assert_eq!(Real::eval_comparison(BinaryOperator::LessEqual, nan, 1.0), Ok(0.0));
    }

    #[test]
    fn integer_ordering() {
        type Int = Evaluator<'static, i64>;
        assert_eq!(Int::eval_comparison(BinaryOperator::Less, -3, 2), Ok(1));
        assert_eq!(Int::eval_comparison(BinaryOperator::Greater, -3, 2), Ok(0));
    }
}
