use log::{debug, trace};
use logos::Logos;

use crate::{
    ast::{Domain, Expr},
    error::{BuildError, BuildResult, SyntaxError},
    interpreter::{
        lexer::{LexError, LexerExtras, Token},
        options::{EqualityMode, Options},
        parser::{token::TokenKind, tree::Tree},
        registry::VarRegistry,
    },
};

/// Builds the syntax tree of `source` for the given numeric domain.
///
/// Tokens are fed one at a time into a [`Tree`]. Each token is classified
/// against the cursor first: `-` is a negation while the cursor still needs
/// operands, and `==` follows `options.equality`. Variable references are
/// recorded as they are inserted.
///
/// # Parameters
/// - `source`: The expression text. Must contain at least one token.
/// - `domain`: Decides how numeric literals are read.
/// - `options`: Meaning of `==` and the variable limit.
///
/// # Returns
/// The finished tree together with the set of referenced variable indices.
///
/// # Errors
/// - `BuildError::Syntax` with the byte offset of the offending token, or of
///   the end of the last token when the input ends too early.
/// - `BuildError::TooManyVariables` and `BuildError::Memory` from the
///   registry and the tree arena.
pub fn parse(source: &str,
             domain: Domain,
             options: &Options)
             -> BuildResult<(Expr, VarRegistry)> {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { domain });
    let mut tree = Tree::new()?;
    let mut registry = VarRegistry::with_limit(options.max_variables);
    let mut scan_start = 0;

    while let Some(result) = lexer.next() {
        let offset = lexer.span().start;
        let syntax = |kind: SyntaxError| BuildError::Syntax { kind, offset };

        let token = match result {
            Ok(token) => token,
            Err(LexError::InvalidNumber | LexError::NumberOutOfRange)
                if tree.cursor_is_complete() =>
            {
                return Err(syntax(SyntaxError::MissingOperator));
            },
            Err(err) => return Err(syntax(err.into())),
        };

        let kind = classify(token, tree.cursor_is_complete(), options.equality);
        trace!("token {kind:?} at {offset}");

        if kind == TokenKind::RightParen {
            tree.close_bracket().map_err(syntax)?;
        } else {
            if tree.cursor_is_complete() && kind.is_leaf_like() {
                return Err(syntax(SyntaxError::MissingOperator));
            }
            if !tree.cursor_is_complete() && !kind.is_leaf_like() {
                return Err(syntax(SyntaxError::MissingValue));
            }
            tree.insert(kind)?;
        }

        if let TokenKind::Variable(index) = kind {
            registry.record(index)?;
        }
        scan_start = lexer.span().end;
    }

    let end = BuildError::Syntax { kind:   SyntaxError::IncompleteExpression,
                                   offset: scan_start, };
    if tree.has_open_scope() {
        return Err(BuildError::Syntax { kind:   SyntaxError::UnclosedParenthesis,
                                        offset: scan_start, });
    }
    if !tree.cursor_is_complete() {
        return Err(end);
    }

    let root = tree.freeze().ok_or(end)?;
    debug!("built {domain} tree with {} nodes and {} variables",
           root.node_count(),
           registry.len());
    Ok((root, registry))
}

/// Maps a lexed token onto the kind stored in the tree.
///
/// `complete` tells whether the cursor already has all of its operands; it
/// decides between subtraction and negation.
const fn classify(token: Token, complete: bool, equality: EqualityMode) -> TokenKind {
    match token {
        Token::Number(value) => TokenKind::Number(value),
        Token::Variable(index) => TokenKind::Variable(index),
        Token::Plus => TokenKind::Plus,
        Token::Minus if complete => TokenKind::Minus,
        Token::Minus => TokenKind::Negate,
        Token::Star => TokenKind::Mul,
        Token::Slash => TokenKind::Div,
        Token::Power => TokenKind::Pow,
        Token::DoubleAmpersand => TokenKind::And,
        Token::DoublePipe => TokenKind::Or,
        Token::EqualEqual => match equality {
            EqualityMode::Standard => TokenKind::Equal,
            EqualityMode::LegacyOr => TokenKind::Or,
        },
        Token::BangEqual => TokenKind::NotEqual,
        Token::Bang => TokenKind::Not,
        Token::Greater => TokenKind::Greater,
        Token::GreaterEqual => TokenKind::GreaterEqual,
        Token::Less => TokenKind::Less,
        Token::LessEqual => TokenKind::LessEqual,
        Token::LParen => TokenKind::LeftParen,
        Token::RParen => TokenKind::RightParen,
        Token::Sqrt => TokenKind::Sqrt,
        Token::Ln => TokenKind::Ln,
        Token::Log => TokenKind::Log,
        Token::Ignored => TokenKind::Undefined,
    }
}
