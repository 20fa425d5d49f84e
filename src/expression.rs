use std::io::{self, Write};

use log::{debug, trace};

use crate::{
    ast::{Domain, Expr},
    error::{BuildError, BuildResult, EvalError},
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator},
            scalar::Scalar,
        },
        options::Options,
        parser::core::parse,
        registry::VarRegistry,
    },
};

/// A compiled expression: build it once, evaluate it any number of times.
///
/// A handle starts out empty. The first call to [`Expression::build`]
/// decides its fate for good: it either holds a tree, or it holds the error
/// that stopped the build. Later calls to `build` are rejected either way.
///
/// Evaluation only borrows the handle, so a built expression can be shared
/// between threads and evaluated concurrently.
///
/// ## Example
/// ```
/// use varexpr::{Expression, ast::Domain};
///
/// let mut expression = Expression::new();
/// expression.build("${1} * (1 + $2)", Domain::Real).unwrap();
///
/// assert_eq!(expression.variables(), &[0, 1]);
/// assert_eq!(expression.eval(&[2.0, 0.5]), Ok(3.0));
/// assert_eq!(expression.eval(&[-1.0, 1.0]), Ok(-2.0));
/// ```
#[derive(Debug, Default)]
pub struct Expression {
    options: Options,
    state:   State,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Empty,
    Built(Built),
    Failed {
        source: String,
        error:  BuildError,
    },
}

#[derive(Debug)]
struct Built {
    source:   String,
    domain:   Domain,
    root:     Expr,
    registry: VarRegistry,
}

impl Expression {
    /// Creates an empty handle with the default [`Options`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty handle with the given options.
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self { options,
               state: State::Empty }
    }

    /// Compiles `source` for the given domain.
    ///
    /// On failure the error is both returned and kept on the handle, where
    /// [`Expression::error`] and [`Expression::write_error`] can read it.
    ///
    /// # Errors
    /// - `BuildError::AlreadyBuilt` if `build` was called before, whatever its
    ///   outcome. The handle is left untouched.
    /// - `BuildError::InvalidExpression` if `source` is empty or only holds
    ///   whitespace.
    /// - `BuildError::Syntax`, `BuildError::TooManyVariables` or
    ///   `BuildError::Memory` from the parser.
    pub fn build(&mut self, source: &str, domain: Domain) -> BuildResult<()> {
        if !matches!(self.state, State::Empty) {
            debug!("rejected second build of {source:?}");
            return Err(BuildError::AlreadyBuilt);
        }

        let parsed = if source.chars().all(is_space) {
            Err(BuildError::InvalidExpression)
        } else {
            parse(source, domain, &self.options)
        };

        match parsed {
            Ok((root, registry)) => {
                self.state = State::Built(Built { source: source.to_string(),
                                                  domain,
                                                  root,
                                                  registry });
                Ok(())
            },
            Err(error) => {
                debug!("failed to build {source:?}: {error}");
                self.state = State::Failed { source: source.to_string(),
                                             error:  error.clone(), };
                Err(error)
            },
        }
    }

    /// Evaluates the built expression with `vars` as the variable array.
    ///
    /// `${n}` reads `vars[n - 1]`. The scalar type selects the domain and must
    /// match the one the expression was built for.
    ///
    /// # Errors
    /// - `EvalError::NotBuilt` if `build` was never called.
    /// - `EvalError::Build` holding the stored error if the build failed.
    /// - `EvalError::DomainMismatch` if `T` belongs to the other domain.
    /// - `EvalError::ArrayTooSmall` if `vars` does not reach the largest
    ///   referenced index.
    /// - `EvalError::Evaluation` for integer arithmetic faults.
    ///
    /// None of these change the handle.
    pub fn eval<T: Scalar>(&self, vars: &[T]) -> EvalResult<T> {
        self.eval_built(vars)
            .inspect(|result| trace!("evaluated to {result} with {} values", vars.len()))
            .inspect_err(|err| debug!("evaluation failed: {err}"))
    }

    fn eval_built<T: Scalar>(&self, vars: &[T]) -> EvalResult<T> {
        let built = match &self.state {
            State::Empty => return Err(EvalError::NotBuilt),
            State::Failed { error, .. } => return Err(EvalError::Build(error.clone())),
            State::Built(built) => built,
        };

        if T::DOMAIN != built.domain {
            return Err(EvalError::DomainMismatch { expected: built.domain,
                                                   found:    T::DOMAIN, });
        }
        if let Some(max) = built.registry.max()
           && vars.len() <= max
        {
            return Err(EvalError::ArrayTooSmall { required: max + 1,
                                                  found:    vars.len(), });
        }

        Evaluator::new(vars).eval(&built.root)
    }

    /// The error that stopped the build, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&BuildError> {
        match &self.state {
            State::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Writes a diagnostic for the stored build error; writes nothing if there
    /// is none.
    ///
    /// See [`BuildError::report`] for the format.
    ///
    /// ## Example
    /// ```
    /// use varexpr::{Expression, ast::Domain};
    ///
    /// let mut expression = Expression::new();
    /// assert!(expression.build("2 * (1 +", Domain::Integer).is_err());
    ///
    /// let mut out = Vec::new();
    /// expression.write_error(&mut out, "Error:").unwrap();
    /// assert_eq!(String::from_utf8(out).unwrap(),
    ///            "Error: unclosed parenthesis.\n2 * (1 +\n        ^\n");
    /// ```
    pub fn write_error<W: Write>(&self, out: &mut W, prefix: &str) -> io::Result<()> {
        match &self.state {
            State::Failed { source, error } => error.report(out, prefix, source),
            _ => Ok(()),
        }
    }

    /// The domain of a successfully built expression.
    #[must_use]
    pub const fn domain(&self) -> Option<Domain> {
        match &self.state {
            State::Built(built) => Some(built.domain),
            _ => None,
        }
    }

    /// The root of the built tree.
    #[must_use]
    pub const fn root(&self) -> Option<&Expr> {
        match &self.state {
            State::Built(built) => Some(&built.root),
            _ => None,
        }
    }

    /// Zero-based indices of every variable the expression references, in
    /// ascending order. Empty unless the build succeeded.
    #[must_use]
    pub fn variables(&self) -> &[usize] {
        match &self.state {
            State::Built(built) => built.registry.indices(),
            _ => &[],
        }
    }

    /// The largest referenced zero-based variable index.
    #[must_use]
    pub fn max_variable(&self) -> Option<usize> {
        match &self.state {
            State::Built(built) => built.registry.max(),
            _ => None,
        }
    }

    /// The text passed to the first `build`, successful or not.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        match &self.state {
            State::Empty => None,
            State::Built(built) => Some(&built.source),
            State::Failed { source, .. } => Some(source),
        }
    }

    #[must_use]
    pub const fn is_built(&self) -> bool {
        matches!(self.state, State::Built(_))
    }
}

/// Whitespace as classified by C's `isspace` in the default locale.
const fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EvalFault, SyntaxError};

    fn built(source: &str, domain: Domain) -> Expression {
        let mut expression = Expression::new();
        expression.build(source, domain).unwrap();
        expression
    }

    #[test]
    fn handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Expression>();
    }

    #[test]
    fn dropping_unbuilt_and_failed_handles() {
        drop(Expression::new());

        let mut failed = Expression::new();
        assert!(failed.build("1 +", Domain::Real).is_err());
        drop(failed);
    }

    #[test]
    fn eval_before_build() {
        assert_eq!(Expression::new().eval::<f64>(&[]), Err(EvalError::NotBuilt));
    }

    #[test]
    fn whitespace_only_is_invalid() {
        let mut expression = Expression::new();
        assert_eq!(expression.build(" \t\x0B\x0C\r\n", Domain::Real),
                   Err(BuildError::InvalidExpression));
        assert_eq!(expression.error(), Some(&BuildError::InvalidExpression));
        assert_eq!(expression.eval::<f64>(&[]),
                   Err(EvalError::Build(BuildError::InvalidExpression)));
    }

    #[test]
    fn second_build_is_rejected() {
        let mut expression = built("1", Domain::Integer);
        assert_eq!(expression.build("2", Domain::Integer), Err(BuildError::AlreadyBuilt));
        assert_eq!(expression.eval::<i64>(&[]), Ok(1));
        assert_eq!(expression.error(), None);
    }

    #[test]
    fn failed_build_is_terminal() {
        let mut expression = Expression::new();
        assert!(expression.build("", Domain::Integer).is_err());
        assert_eq!(expression.build("1", Domain::Integer), Err(BuildError::AlreadyBuilt));
        assert_eq!(expression.error(), Some(&BuildError::InvalidExpression));
        assert!(!expression.is_built());
    }

    #[test]
    fn domain_must_match() {
        let expression = built("$1", Domain::Integer);
        assert_eq!(expression.eval(&[1.0]),
                   Err(EvalError::DomainMismatch { expected: Domain::Integer,
                                                   found:    Domain::Real, }));
        assert_eq!(expression.eval(&[1i64]), Ok(1));
    }

    #[test]
    fn array_must_reach_largest_index() {
        let expression = built("${3} - $1", Domain::Integer);
        assert_eq!(expression.max_variable(), Some(2));
        assert_eq!(expression.eval(&[5i64, 0]),
                   Err(EvalError::ArrayTooSmall { required: 3,
                                                  found:    2, }));
        assert_eq!(expression.eval(&[5i64, 0, 9]), Ok(4));
    }

    #[test]
    fn evaluation_errors_do_not_poison() {
        let expression = built("1 / $1", Domain::Integer);
        assert_eq!(expression.eval(&[0i64]),
                   Err(EvalError::Evaluation(EvalFault::DivisionByZero)));
        assert_eq!(expression.eval(&[1i64]), Ok(1));
        assert!(expression.error().is_none());
    }

    #[test]
    fn syntax_error_is_stored_with_source() {
        let mut expression = Expression::new();
        let err = expression.build("  (1 + )", Domain::Real).unwrap_err();
        assert_eq!(err,
                   BuildError::Syntax { kind:   SyntaxError::MissingValue,
                                        offset: 7, });
        assert_eq!(expression.source(), Some("  (1 + )"));

        let mut out = Vec::new();
        expression.write_error(&mut out, "").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "missing value.\n  (1 + )\n       ^\n");
    }

    #[test]
    fn write_error_is_silent_without_error() {
        let expression = built("1", Domain::Real);
        let mut out = Vec::new();
        expression.write_error(&mut out, "Error:").unwrap();
        assert!(out.is_empty());
    }
}
