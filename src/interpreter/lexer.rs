use logos::Logos;

use crate::{
    ast::{Domain, Value},
    error::SyntaxError,
    util::num::{accumulate_digits, float_prefix, integer_prefix},
};

/// Represents a lexical token in the source input.
///
/// The lexer only recognises spellings. Whether `-` is a subtraction or a
/// negation, and what `==` means, is decided by the tree builder, which knows
/// how many operands the current node already holds.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(extras = LexerExtras)]
#[logos(error = LexError)]
pub enum Token {
    /// Numeric literal tokens. The digits (and in the real domain, `.`,
    /// `inf` and `nan` spellings) are read by the domain's conversion.
    #[regex(r"[0-9]", lex_number)]
    #[regex(r"[.iInN]", lex_number)]
    Number(Value),
    /// `$1` to `$9`, or `${n}` with `n >= 1`. Holds the zero-based index.
    #[regex(r"\$[1-9]", lex_short_variable)]
    #[regex(r"\$\{[0-9]*\}?", lex_braced_variable)]
    Variable(usize),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^` or `**`
    #[token("^")]
    #[token("**")]
    Power,
    /// `&&`
    #[token("&&")]
    DoubleAmpersand,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `!`
    #[token("!")]
    Bang,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `sqrt(`
    #[token("sqrt(")]
    Sqrt,
    /// `ln(`
    #[token("ln(")]
    Ln,
    /// `log(`
    #[token("log(")]
    Log,
    /// Whitespace, as classified by C's `isspace`.
    #[regex(r"[ \t\n\r\f\x0B]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
#[derive(Default)]
pub struct LexerExtras {
    /// Domain deciding how numeric literals are read.
    pub domain: Domain,
}

/// Errors produced while lexing a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexError {
    /// Nothing matches at this position.
    #[default]
    UnrecognisedToken,
    /// A literal started but no number could be read.
    InvalidNumber,
    /// An integer literal does not fit in an `i64`.
    NumberOutOfRange,
    /// The index of a `${...}` reference overflows.
    IndexTooLarge,
}

impl From<LexError> for SyntaxError {
    fn from(err: LexError) -> Self {
        match err {
            LexError::UnrecognisedToken => Self::UnrecognisedToken,
            LexError::InvalidNumber => Self::InvalidNumber,
            LexError::NumberOutOfRange => Self::NumberOutOfRange,
            LexError::IndexTooLarge => Self::IndexTooLarge,
        }
    }
}

/// Reads a numeric literal starting at the first matched character.
///
/// The regex only matches the first character; the domain's conversion
/// decides how far the literal extends and the lexer is bumped past it.
///
/// # Returns
/// - `Ok(Value::Integer)` in the integer domain, which accepts digits only.
/// - `Ok(Value::Real)` in the real domain.
/// - `Err(LexError::UnrecognisedToken)` for `.`, `i` or `n` in the integer
///   domain.
/// - `Err(LexError::InvalidNumber)` if the real conversion reads nothing.
/// - `Err(LexError::NumberOutOfRange)` if an integer overflows.
fn lex_number(lex: &mut logos::Lexer<Token>) -> Result<Value, LexError> {
    let text = &lex.source()[lex.span().start..];

    match lex.extras.domain {
        Domain::Integer => {
            let (len, value) = integer_prefix(text);
            if len == 0 {
                return Err(LexError::UnrecognisedToken);
            }
            lex.bump(len - 1);
            value.map(Value::Integer).ok_or(LexError::NumberOutOfRange)
        },
        Domain::Real => {
            let (len, value) = float_prefix(text).ok_or(LexError::InvalidNumber)?;
            lex.bump(len - 1);
            Ok(Value::Real(value))
        },
    }
}

/// Parses `$1` to `$9` into indices `0` to `8`.
fn lex_short_variable(lex: &logos::Lexer<Token>) -> usize {
    usize::from(lex.slice().as_bytes()[1] - b'1')
}

/// Parses `${n}` into index `n - 1`.
///
/// Overflow is reported before the closing brace is checked, so an overlong
/// index is flagged even when the `}` is missing.
fn lex_braced_variable(lex: &logos::Lexer<Token>) -> Result<usize, LexError> {
    let slice = lex.slice();
    let digits = slice[2..].trim_end_matches('}');

    let value = accumulate_digits(digits.as_bytes()).ok_or(LexError::IndexTooLarge)?;
    if value < 1 || !slice.ends_with('}') {
        return Err(LexError::UnrecognisedToken);
    }
    usize::try_from(value - 1).map_err(|_| LexError::IndexTooLarge)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str, domain: Domain) -> Vec<Result<Token, LexError>> {
        Token::lexer_with_extras(source, LexerExtras { domain }).collect()
    }

    #[test]
    fn integer_literal_stops_at_point() {
        let tokens = lex_all("3.5", Domain::Integer);
        assert_eq!(tokens,
                   vec![Ok(Token::Number(Value::Integer(3))), Err(LexError::UnrecognisedToken),
                        Ok(Token::Number(Value::Integer(5)))]);
    }

    #[test]
    fn real_literals_use_strtod_prefix() {
        let tokens = lex_all(" 1.5e2 + .25", Domain::Real);
        assert_eq!(tokens,
                   vec![Ok(Token::Number(Value::Real(150.0))),
                        Ok(Token::Plus),
                        Ok(Token::Number(Value::Real(0.25)))]);
    }

    #[test]
    fn infinity_only_in_real_domain() {
        assert_eq!(lex_all("inf", Domain::Real),
                   vec![Ok(Token::Number(Value::Real(f64::INFINITY)))]);
        assert_eq!(lex_all("i", Domain::Real), vec![Err(LexError::InvalidNumber)]);
        assert_eq!(lex_all("i", Domain::Integer)[0], Err(LexError::UnrecognisedToken));
    }

    #[test]
    fn integer_overflow() {
        assert_eq!(lex_all("99999999999999999999", Domain::Integer),
                   vec![Err(LexError::NumberOutOfRange)]);
    }

    #[test]
    fn variables() {
        assert_eq!(lex_all("$1 ${12}", Domain::Real),
                   vec![Ok(Token::Variable(0)), Ok(Token::Variable(11))]);
        assert_eq!(lex_all("${0}", Domain::Real), vec![Err(LexError::UnrecognisedToken)]);
        assert_eq!(lex_all("${}", Domain::Real), vec![Err(LexError::UnrecognisedToken)]);
        assert_eq!(lex_all("${3", Domain::Real), vec![Err(LexError::UnrecognisedToken)]);
        assert_eq!(lex_all("${99999999999999999999}", Domain::Real),
                   vec![Err(LexError::IndexTooLarge)]);
    }

    #[test]
    fn operators_prefer_longest_spelling() {
        assert_eq!(lex_all("**!=<=>=&&||==", Domain::Real),
                   vec![Ok(Token::Power),
                        Ok(Token::BangEqual),
                        Ok(Token::LessEqual),
                        Ok(Token::GreaterEqual),
                        Ok(Token::DoubleAmpersand),
                        Ok(Token::DoublePipe),
                        Ok(Token::EqualEqual)]);
    }

    #[test]
    fn functions_require_open_paren() {
        assert_eq!(lex_all("sqrt(", Domain::Real), vec![Ok(Token::Sqrt)]);
        assert_eq!(lex_all("log(ln(", Domain::Real), vec![Ok(Token::Log), Ok(Token::Ln)]);
        assert!(lex_all("sqrt (", Domain::Real)[0].is_err());
    }

    #[test]
    fn lone_halves_are_unrecognised() {
        assert_eq!(lex_all("&", Domain::Real), vec![Err(LexError::UnrecognisedToken)]);
        assert_eq!(lex_all("=", Domain::Real), vec![Err(LexError::UnrecognisedToken)]);
    }
}
