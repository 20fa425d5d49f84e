/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparisons, and the logical operators. Both operands
/// are always evaluated before the operator is applied.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements negation, logical NOT, and the `sqrt`, `ln` and `log`
/// functions.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the recursive tree walker and variable lookup.
pub mod core;

/// The numeric domains an expression can be evaluated in.
pub mod scalar;
