/// Build errors.
///
/// Defines every error that can occur while turning an expression string into
/// a syntax tree: empty input, syntax mistakes with their source offset,
/// repeated builds, exhausted storage, and too many distinct variables.
pub mod build_error;
/// Evaluation errors.
///
/// Contains the errors raised when a tree is evaluated: missing or failed
/// builds, a variable array of the wrong domain or length, and integer
/// arithmetic faults.
pub mod eval_error;
/// Script reading errors.
///
/// Raised by the script reader for missing expressions, unsupported types,
/// and variable lines that cannot be read. Every message names the line.
pub mod input_error;

pub use build_error::{BuildError, SyntaxError};
pub use eval_error::{EvalError, EvalFault};
pub use input_error::InputError;

/// Result type used while building a tree.
pub type BuildResult<T> = Result<T, BuildError>;
