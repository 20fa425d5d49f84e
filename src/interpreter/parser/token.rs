use crate::ast::{BinaryOperator, UnaryOperator, Value};

/// Category of a classified token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenClass {
    /// The placeholder of an empty tree.
    Undefined,
    /// `-` (negation) and `!`.
    UnaryOperator,
    /// Every two-operand operator.
    BinaryOperator,
    /// `(` and `)`.
    Bracket,
    /// `sqrt(`, `ln(`, `log(`.
    Function,
    /// Numbers and variables.
    Value,
}

/// Precedence and arity of a token kind. Every operator is
/// left-associative.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Attributes {
    pub class:      TokenClass,
    /// `-1` for brackets and the placeholder, `0` to `9` for operators and
    /// functions, `i8::MAX` for values.
    pub precedence: i8,
    /// Number of child nodes the token needs to be complete.
    pub arity:      u8,
}

/// A token after classification against the tree being built.
///
/// This is what a tree node holds while the builder runs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TokenKind {
    Undefined,
    Plus,
    Minus,
    Mul,
    Div,
    Pow,
    Negate,
    And,
    Or,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Not,
    LeftParen,
    RightParen,
    Sqrt,
    Ln,
    Log,
    Number(Value),
    Variable(usize),
}

const fn attr(class: TokenClass, precedence: i8, arity: u8) -> Attributes {
    Attributes { class,
                 precedence,
                 arity }
}

impl TokenKind {
    /// The attribute table, keyed by token kind.
    ///
    /// An open bracket requires two operands so that it never counts as
    /// complete: only a matching `)` can close it.
    #[must_use]
    pub const fn attributes(self) -> Attributes {
        use TokenClass::{Bracket, BinaryOperator, Function, UnaryOperator, Undefined, Value};

        match self {
            Self::Undefined => attr(Undefined, -1, 1),
            Self::Plus | Self::Minus => attr(BinaryOperator, 4, 2),
            Self::Mul | Self::Div => attr(BinaryOperator, 5, 2),
            Self::Pow => attr(BinaryOperator, 6, 2),
            Self::Negate => attr(UnaryOperator, 8, 1),
            Self::And => attr(BinaryOperator, 1, 2),
            Self::Or => attr(BinaryOperator, 0, 2),
            Self::Equal | Self::NotEqual => attr(BinaryOperator, 2, 2),
            Self::Greater | Self::GreaterEqual | Self::Less | Self::LessEqual => {
                attr(BinaryOperator, 3, 2)
            },
            Self::Not => attr(UnaryOperator, 7, 1),
            Self::LeftParen | Self::RightParen => attr(Bracket, -1, 2),
            Self::Sqrt | Self::Ln | Self::Log => attr(Function, 9, 1),
            Self::Number(_) | Self::Variable(_) => attr(Value, i8::MAX, 0),
        }
    }

    #[must_use]
    pub const fn class(self) -> TokenClass {
        self.attributes().class
    }

    #[must_use]
    pub const fn precedence(self) -> i8 {
        self.attributes().precedence
    }

    #[must_use]
    pub const fn arity(self) -> u8 {
        self.attributes().arity
    }

    /// Whether the token opens a scope that bounds precedence walks: a plain
    /// `(` or a function.
    #[must_use]
    pub const fn is_boundary(self) -> bool {
        matches!(self, Self::LeftParen) || matches!(self.class(), TokenClass::Function)
    }

    /// Whether the token can only be attached below the cursor, as opposed to
    /// spliced above it.
    #[must_use]
    pub const fn is_leaf_like(self) -> bool {
        matches!(self.class(),
                 TokenClass::Value | TokenClass::UnaryOperator | TokenClass::Function)
        || matches!(self, Self::LeftParen)
    }

    /// The tree operator for a unary or function token.
    #[must_use]
    pub const fn unary_operator(self) -> Option<UnaryOperator> {
        match self {
            Self::Negate => Some(UnaryOperator::Negate),
            Self::Not => Some(UnaryOperator::Not),
            Self::Sqrt => Some(UnaryOperator::Sqrt),
            Self::Ln => Some(UnaryOperator::Ln),
            Self::Log => Some(UnaryOperator::Log),
            _ => None,
        }
    }

    /// The tree operator for a binary token.
    #[must_use]
    pub const fn binary_operator(self) -> Option<BinaryOperator> {
        match self {
            Self::Plus => Some(BinaryOperator::Add),
            Self::Minus => Some(BinaryOperator::Sub),
            Self::Mul => Some(BinaryOperator::Mul),
            Self::Div => Some(BinaryOperator::Div),
            Self::Pow => Some(BinaryOperator::Pow),
            Self::And => Some(BinaryOperator::And),
            Self::Or => Some(BinaryOperator::Or),
            Self::Equal => Some(BinaryOperator::Equal),
            Self::NotEqual => Some(BinaryOperator::NotEqual),
            Self::Greater => Some(BinaryOperator::Greater),
            Self::GreaterEqual => Some(BinaryOperator::GreaterEqual),
            Self::Less => Some(BinaryOperator::Less),
            Self::LessEqual => Some(BinaryOperator::LessEqual),
            _ => None,
        }
    }
}
