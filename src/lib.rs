//! # varexpr
//!
//! varexpr compiles arithmetic and logical expressions over positional
//! variables (`$1`, `${12}`) into a syntax tree once, then evaluates that tree
//! any number of times against arrays of values, in either 64-bit integer or
//! double precision arithmetic.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of a built expression.
///
/// This module declares the `Expr` tree, the operator enums, the numeric
/// `Domain` and the tagged `Value` stored in literals. The tree is produced by
/// the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines literal, variable, unary and binary nodes.
/// - Renders trees as parenthesized infix text or as an indented diagram.
pub mod ast;
/// Provides the error types for building and evaluating.
///
/// This module defines every error that can be raised while compiling or
/// evaluating an expression. Each error carries a numeric status code and a
/// human-readable message; syntax errors also carry the offset of the
/// offending character for caret diagnostics.
///
/// # Responsibilities
/// - Defines error enums for both phases.
/// - Formats diagnostics with a caret under the offending character.
/// - Supports integration with standard error handling traits.
pub mod error;
/// The build-once, evaluate-many expression handle.
pub mod expression;
/// Reads expression scripts: an expression line followed by typed variable
/// assignments.
pub mod input;
/// Orchestrates lexing, tree building and evaluation.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, variable registry and evaluator.
/// - Holds the build-time options.
pub mod interpreter;
/// General utilities for numeric scanning and safe conversion.
///
/// # Responsibilities
/// - Read numeric prefixes without consuming more than the C conversions do.
/// - Convert `f64` results to `i64` without silent data loss.
pub mod util;

pub use crate::{
    ast::Domain,
    expression::Expression,
    interpreter::{
        evaluator::scalar::Scalar,
        options::{EqualityMode, Options},
    },
};

/// Builds `source` in the domain of `T` and evaluates it once.
///
/// This is a shortcut for an [`Expression`] that is used a single time. Use
/// the handle directly to evaluate the same expression repeatedly.
///
/// # Errors
/// Returns an error if the expression does not build or fails to evaluate.
///
/// # Examples
/// ```
/// use varexpr::evaluate;
///
/// // The scalar type picks the domain.
/// assert_eq!(evaluate::<i64>("7 / 2", &[]).unwrap(), 3);
/// assert_eq!(evaluate::<f64>("7 / 2", &[]).unwrap(), 3.5);
///
/// // Variables are read from the slice, `$1` first.
/// assert_eq!(evaluate("$1 * $1 - $2", &[3i64, 1]).unwrap(), 8);
///
/// // An intentional error: `${2}` is not in the array.
/// assert!(evaluate("${2}", &[1.0]).is_err());
/// ```
pub fn evaluate<T: Scalar>(source: &str, vars: &[T]) -> Result<T, Box<dyn std::error::Error>> {
    let mut expression = Expression::new();
    expression.build(source, T::DOMAIN)?;
    Ok(expression.eval(vars)?)
}
