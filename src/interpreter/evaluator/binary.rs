use crate::{
    ast::BinaryOperator,
    error::EvalFault,
    interpreter::evaluator::{core::Evaluator, scalar::Scalar},
};

/// `+`, `-`, `*`, `/` and `^`.
pub mod arithmetic;
/// Equality and ordering comparisons.
pub mod comparison;
/// `&&` and `||`.
pub mod logic;

impl<T: Scalar> Evaluator<'_, T> {
    /// Evaluates a binary operation between two values.
    ///
    /// Routes arithmetic to `eval_arithmetic`, comparisons to
    /// `eval_comparison`, and the logical operators to `eval_logic`.
    /// Comparison and logical results are `1` or `0` in the operand's
    /// domain.
    ///
    /// # Example
    /// ```
    /// use varexpr::{ast::BinaryOperator, interpreter::evaluator::core::Evaluator};
    ///
    /// let result = Evaluator::<i64>::eval_binary(BinaryOperator::Sub, 3, 4);
    /// assert_eq!(result, Ok(-1));
    ///
    /// let result = Evaluator::<f64>::eval_binary(BinaryOperator::GreaterEqual, 2.0, 2.0);
    /// assert_eq!(result, Ok(1.0));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: T, right: T) -> Result<T, EvalFault> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Pow,
            Sub,
        };

        match op {
            Add | Sub | Mul | Div | Pow => Self::eval_arithmetic(op, left, right),
            Equal | NotEqual | Greater | GreaterEqual | Less | LessEqual => {
                Self::eval_comparison(op, left, right)
            },
            And | Or => Self::eval_logic(op, left, right),
        }
    }
}
