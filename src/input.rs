use std::collections::BTreeMap;

use log::{debug, trace};

use crate::{
    ast::{Domain, Value},
    error::InputError,
    interpreter::evaluator::scalar::Scalar,
};

/// Largest variable id a script may assign.
pub const MAX_VARIABLE_ID: usize = 1 << 24;

/// Type keyword at the start of a script line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValueType {
    Bool,
    Int,
    Long,
    Float,
    Double,
    String,
}

impl ValueType {
    /// Matches a whole word against the type keywords.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "BOOL" => Some(Self::Bool),
            "INT" => Some(Self::Int),
            "LONG" => Some(Self::Long),
            "FLOAT" => Some(Self::Float),
            "DOUBLE" => Some(Self::Double),
            "STRING" => Some(Self::String),
            _ => None,
        }
    }

    /// The domain an expression of this type is built in.
    #[must_use]
    pub const fn domain(self) -> Option<Domain> {
        match self {
            Self::Int | Self::Long => Some(Domain::Integer),
            Self::Float | Self::Double => Some(Domain::Real),
            Self::Bool | Self::String => None,
        }
    }

    const fn keyword(self) -> &'static str {
        match self {
            Self::Bool => "BOOL",
            Self::Int => "INT",
            Self::Long => "LONG",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::String => "STRING",
        }
    }
}

/// An expression together with the variable values it should be evaluated
/// with.
///
/// The script format is line oriented:
///
/// ```text
/// DOUBLE ${1} * 2 + $2
/// DOUBLE 1 0.25
/// INT    2 3
/// ```
///
/// The first line that starts with a type keyword holds the expression; its
/// type selects the domain (`INT` and `LONG` for integers, `FLOAT` and
/// `DOUBLE` for reals). Every later typed line reads `TYPE id value` and
/// assigns `${id}`. `BOOL` values are written `0` or `1`. Lines without a type
/// keyword, and typed lines without an id, are skipped. A later assignment to
/// the same id replaces the earlier one.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    /// Domain of the expression.
    pub domain:     Domain,
    /// The expression text.
    pub expression: String,
    /// Line of the expression, starting at 1.
    pub line:       usize,
    /// Assigned values by one-based id, already in the expression's domain.
    pub variables:  BTreeMap<usize, Value>,
}

impl Script {
    /// Reads a script.
    ///
    /// # Errors
    /// - `InputError::MissingExpression` if no typed line holds an expression.
    /// - `InputError::UnsupportedType` for a `BOOL` expression, or a `STRING`
    ///   variable.
    /// - `InputError::InvalidVariableId`, `InputError::InvalidValue` and
    ///   `InputError::TypeMismatch` for variable lines that cannot be used.
    ///
    /// ## Example
    /// ```
    /// use varexpr::{ast::Domain, input::Script};
    ///
    /// let script = Script::parse("LONG $1 - $2\nLONG 2 5\nBOOL 1 1\n").unwrap();
    /// assert_eq!(script.domain, Domain::Integer);
    /// assert_eq!(script.expression, "$1 - $2");
    /// assert_eq!(script.values::<i64>(), Some(vec![1, 5]));
    /// ```
    pub fn parse(text: &str) -> Result<Self, InputError> {
        let mut script: Option<Self> = None;

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let content = raw.trim_start();
            let (word, rest) = content.split_once(char::is_whitespace)
                                      .unwrap_or((content, ""));
            let Some(kind) = ValueType::from_keyword(word) else {
                trace!("skipping line {line}");
                continue;
            };

            match script.as_mut() {
                None => {
                    if kind == ValueType::String {
                        continue;
                    }
                    let Some(domain) = kind.domain() else {
                        return Err(InputError::UnsupportedType { keyword: word.to_string(),
                                                                 line });
                    };
                    script = Some(Self { domain,
                                         expression: rest.trim().to_string(),
                                         line,
                                         variables: BTreeMap::new() });
                },
                Some(script) => {
                    let Some((id, value)) = read_assignment(kind, rest, script.domain, line)?
                    else {
                        trace!("line {line} has no variable id");
                        continue;
                    };
                    script.variables.insert(id, value);
                },
            }
        }

        let script = script.ok_or(InputError::MissingExpression)?;
        debug!("read {} script with {} variables",
               script.domain,
               script.variables.len());
        Ok(script)
    }

    /// The assigned values as a dense variable array, `${1}` first.
    ///
    /// Ids that were never assigned read as zero. Returns `None` if `T`
    /// belongs to the other domain.
    #[must_use]
    pub fn values<T: Scalar>(&self) -> Option<Vec<T>> {
        if T::DOMAIN != self.domain {
            return None;
        }
        let len = self.variables.keys().next_back().copied().unwrap_or(0);
        let mut values = vec![T::ZERO; len];
        for (&id, &value) in &self.variables {
            values[id - 1] = T::from_value(value)?;
        }
        Some(values)
    }
}

/// Reads `id value` after a type keyword.
///
/// Returns `Ok(None)` when the line does not start with an integer id.
fn read_assignment(kind: ValueType,
                   rest: &str,
                   domain: Domain,
                   line: usize)
                   -> Result<Option<(usize, Value)>, InputError> {
    let rest = rest.trim_start();
    let (id_token, value_token) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let Ok(id) = id_token.parse::<i64>() else {
        return Ok(None);
    };
    let Some(id) = usize::try_from(id).ok()
                                      .filter(|id| (1..=MAX_VARIABLE_ID).contains(id))
    else {
        return Err(InputError::InvalidVariableId { token: id_token.to_string(),
                                                   line });
    };

    let token = value_token.split_whitespace().next().unwrap_or("");
    let keyword = kind.keyword();
    let invalid = || InputError::InvalidValue { keyword: keyword.to_string(),
                                                token: token.to_string(),
                                                line };

    let value = match kind {
        ValueType::Bool => match token {
            "0" => Value::Integer(0),
            "1" => Value::Integer(1),
            _ => return Err(invalid()),
        },
        ValueType::Int => Value::Integer(token.parse::<i32>().map_err(|_| invalid())?.into()),
        ValueType::Long => Value::Integer(token.parse::<i64>().map_err(|_| invalid())?),
        ValueType::Float => Value::Real(token.parse::<f32>().map_err(|_| invalid())?.into()),
        ValueType::Double => Value::Real(token.parse::<f64>().map_err(|_| invalid())?),
        ValueType::String => {
            return Err(InputError::UnsupportedType { keyword: keyword.to_string(),
                                                     line });
        },
    };

    Ok(Some((id, into_domain(value, domain, keyword, line)?)))
}

/// Converts an integer value to a real one for real expressions; a real
/// value cannot enter an integer expression.
#[allow(clippy::cast_precision_loss)]
fn into_domain(value: Value,
               domain: Domain,
               keyword: &str,
               line: usize)
               -> Result<Value, InputError> {
    match (value, domain) {
        (Value::Integer(n), Domain::Real) => Ok(Value::Real(n as f64)),
        (Value::Real(_), Domain::Integer) => {
            Err(InputError::TypeMismatch { keyword: keyword.to_string(),
                                           domain,
                                           line })
        },
        (value, _) => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_untyped_lines_and_missing_ids() {
        let text = "# comment\n\n  DOUBLE  ${2} / $1  \nnote\nDOUBLE x 3\nFLOAT 1 0.5\nINT 2 4\n";
        let script = Script::parse(text).unwrap();
        assert_eq!(script.line, 3);
        assert_eq!(script.expression, "${2} / $1");
        assert_eq!(script.values::<f64>(), Some(vec![0.5, 4.0]));
        assert_eq!(script.values::<i64>(), None);
    }

    #[test]
    fn unassigned_ids_read_as_zero() {
        let script = Script::parse("INT ${3}\nLONG 3 -7\n").unwrap();
        assert_eq!(script.values::<i64>(), Some(vec![0, 0, -7]));
    }

    #[test]
    fn later_assignment_wins() {
        let script = Script::parse("LONG $1\nLONG 1 1\nLONG 1 2\n").unwrap();
        assert_eq!(script.values::<i64>(), Some(vec![2]));
    }

    #[test]
    fn leading_string_lines_are_skipped() {
        let script = Script::parse("STRING nothing\nINT 1 + 1\n").unwrap();
        assert_eq!(script.domain, Domain::Integer);
        assert_eq!(script.line, 2);
    }

    #[test]
    fn errors_name_the_line() {
        assert_eq!(Script::parse("no expression here"), Err(InputError::MissingExpression));
        assert_eq!(Script::parse("BOOL $1"),
                   Err(InputError::UnsupportedType { keyword: "BOOL".to_string(),
                                                     line:    1, }));
        assert_eq!(Script::parse("INT $1\nBOOL 1 2"),
                   Err(InputError::InvalidValue { keyword: "BOOL".to_string(),
                                                  token:   "2".to_string(),
                                                  line:    2, }));
        assert_eq!(Script::parse("INT $1\nDOUBLE 1 2.5"),
                   Err(InputError::TypeMismatch { keyword: "DOUBLE".to_string(),
                                                  domain:  Domain::Integer,
                                                  line:    2, }));
        assert_eq!(Script::parse("INT $1\nINT 0 2"),
                   Err(InputError::InvalidVariableId { token: "0".to_string(),
                                                       line:  2, }));
        assert_eq!(Script::parse("INT $1\nSTRING 1 abc"),
                   Err(InputError::UnsupportedType { keyword: "STRING".to_string(),
                                                     line:    2, }));
    }

    #[test]
    fn int_values_are_32_bit() {
        assert!(Script::parse("INT $1\nINT 1 3000000000").is_err());
        assert!(Script::parse("INT $1\nLONG 1 3000000000").is_ok());
    }

    #[test]
    fn messages() {
        let err = InputError::InvalidValue { keyword: "LONG".to_string(),
                                             token:   "x".to_string(),
                                             line:    4, };
        assert_eq!(err.to_string(), "Error on line 4: Unrecognised LONG value 'x'.");
    }
}
