/// The evaluator module computes the value of a built tree.
///
/// The evaluator walks the tree generically over the [`evaluator::scalar::Scalar`]
/// trait, so the same code serves the integer and the real domain.
///
/// # Responsibilities
/// - Evaluates literals, variables, unary and binary nodes.
/// - Reports integer faults such as division by zero or overflow.
pub mod evaluator;
/// The lexer module tokenizes expression text.
///
/// The lexer reads the raw source text and produces a stream of tokens for
/// numbers, variable references, operators, brackets and the fused function
/// openers `sqrt(`, `ln(` and `log(`.
///
/// # Responsibilities
/// - Reads numeric literals with the conversion of the selected domain.
/// - Parses `$n` and `${n}` variable references into zero-based indices.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// Build-time options.
pub mod options;
/// The parser module builds the syntax tree from tokens.
///
/// Precedence is resolved by splicing nodes into a parent-linked tree as
/// tokens arrive, with brackets and functions bounding each splice.
///
/// # Responsibilities
/// - Classifies tokens against the tree under construction.
/// - Validates the token sequence, reporting errors with their offset.
/// - Produces an owned [`crate::ast::Expr`] tree.
pub mod parser;
/// The sorted set of variable indices an expression references.
pub mod registry;
