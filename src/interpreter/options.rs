/// Default ceiling on the number of distinct variables one expression may
/// reference.
pub const MAX_VARIABLES: usize = i32::MAX as usize;

/// How the `==` spelling is read.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum EqualityMode {
    /// `==` is the equal-to comparison.
    #[default]
    Standard,
    /// `==` is logical OR, as in the first releases of this grammar.
    /// Expressions written against that behavior keep their meaning.
    LegacyOr,
}

/// Build-time configuration of an [`crate::Expression`].
///
/// ## Example
/// ```
/// use varexpr::{EqualityMode, Expression, Options, ast::Domain};
///
/// let options = Options { equality: EqualityMode::LegacyOr,
///                         ..Options::default() };
/// let mut expression = Expression::with_options(options);
/// expression.build("0 == 1", Domain::Integer).unwrap();
///
/// // Read as `0 || 1`.
/// assert_eq!(expression.eval::<i64>(&[]), Ok(1));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Options {
    /// Meaning of `==`.
    pub equality:      EqualityMode,
    /// Largest number of distinct variable indices an expression may use.
    pub max_variables: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { equality:      EqualityMode::default(),
               max_variables: MAX_VARIABLES, }
    }
}
