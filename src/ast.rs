use std::hash::{Hash, Hasher};

use ordered_float::OrderedFloat;

/// The numeric representation an expression is compiled for.
///
/// The domain is chosen once per expression at build time. It decides how
/// numeric literals are read (`strtol`-like versus `strtod`-like) and which
/// arithmetic the evaluator applies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Domain {
    /// Signed 64-bit integer arithmetic.
    Integer,
    /// IEEE-754 double precision arithmetic.
    #[default]
    Real,
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Real => write!(f, "real"),
        }
    }
}

/// A scalar literal stored in the tree.
///
/// Equality and hashing are total: two `Real` values compare by their
/// [`OrderedFloat`] representation, so a `nan` literal equals another `nan`
/// literal and trees containing one can still be compared structurally.
#[derive(Debug, Copy, Clone)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit floating-point number.
    Real(f64),
}

impl Value {
    /// Returns the domain this value belongs to.
    ///
    /// ## Example
    /// ```
    /// use varexpr::ast::{Domain, Value};
    ///
    /// assert_eq!(Value::Integer(3).domain(), Domain::Integer);
    /// assert_eq!(Value::Real(0.5).domain(), Domain::Real);
    /// ```
    #[must_use]
    pub const fn domain(&self) -> Domain {
        match self {
            Self::Integer(_) => Domain::Integer,
            Self::Real(_) => Domain::Real,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => OrderedFloat(*a) == OrderedFloat(*b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Integer(i) => {
                0u8.hash(state);
                i.hash(state);
            },
            Self::Real(r) => {
                1u8.hash(state);
                OrderedFloat(*r).hash(state);
            },
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
        }
    }
}

/// Operators taking a single operand: unary `-`, `!` and the built-in
/// functions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical NOT (`!x`), `1` if the operand is zero and `0` otherwise.
    Not,
    /// Square root (`sqrt(x)`).
    Sqrt,
    /// Natural logarithm (`ln(x)`).
    Ln,
    /// Base-10 logarithm (`log(x)`).
    Log,
}

impl UnaryOperator {
    /// Whether this operator is written as a function call, `name(x)`.
    #[must_use]
    pub const fn is_function(self) -> bool {
        matches!(self, Self::Sqrt | Self::Ln | Self::Log)
    }
}

/// Operators taking two operands.
///
/// Comparisons and logical operators produce the domain's `1` or `0`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^` or `**`)
    Pow,
    /// Logical and (`&&`), both operands are always evaluated
    And,
    /// Logical or (`||`), both operands are always evaluated
    Or,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
}

/// A node of a finished syntax tree.
///
/// Trees are produced by [`crate::Expression::build`] and never change
/// afterwards. Variable indices are zero-based: `$1` and `${1}` both become
/// `Variable { index: 0 }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// A numeric literal.
    Literal {
        /// The constant value, tagged with the build domain.
        value: Value,
    },
    /// A positional variable reference.
    Variable {
        /// Zero-based position in the caller's variable array.
        index: usize,
    },
    /// A unary operation or built-in function.
    UnaryOp {
        /// The operator to apply.
        op:   UnaryOperator,
        /// The operand.
        expr: Box<Self>,
    },
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
    },
}

impl Expr {
    /// Counts every node of the tree, leaves included.
    ///
    /// ## Example
    /// ```
    /// use varexpr::{Expression, ast::Domain};
    ///
    /// let mut expression = Expression::new();
    /// expression.build("(1 + 2) * sqrt(4)", Domain::Real).unwrap();
    ///
    /// // `*`, `+`, `1`, `2`, `sqrt`, `4`; the parentheses leave no node behind.
    /// assert_eq!(expression.root().unwrap().node_count(), 6);
    /// ```
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Literal { .. } | Self::Variable { .. } => 1,
            Self::UnaryOp { expr, .. } => 1 + expr.node_count(),
            Self::BinaryOp { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Length of the longest root-to-leaf path, counted in nodes.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Literal { .. } | Self::Variable { .. } => 1,
            Self::UnaryOp { expr, .. } => 1 + expr.depth(),
            Self::BinaryOp { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Renders the tree one node per line, children indented under their
    /// parent with box-drawing guides.
    ///
    /// ## Example
    /// ```
    /// use varexpr::{Expression, ast::Domain};
    ///
    /// let mut expression = Expression::new();
    /// expression.build("1 + $2 * 3", Domain::Integer).unwrap();
    ///
    /// let expected = "+\n├── 1\n└── *\n    ├── $2\n    └── 3\n";
    /// assert_eq!(expression.root().unwrap().render_tree(), expected);
    /// ```
    #[must_use]
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.label());
        out.push('\n');
        self.render_children(&mut out, "");
        out
    }

    fn render_children(&self, out: &mut String, prefix: &str) {
        let children: Vec<&Self> = match self {
            Self::Literal { .. } | Self::Variable { .. } => Vec::new(),
            Self::UnaryOp { expr, .. } => vec![&**expr],
            Self::BinaryOp { left, right, .. } => vec![&**left, &**right],
        };

        let last = children.len().saturating_sub(1);
        for (i, child) in children.into_iter().enumerate() {
            let (branch, indent) = if i == last { ("└── ", "    ") } else { ("├── ", "│   ") };
            out.push_str(prefix);
            out.push_str(branch);
            out.push_str(&child.label());
            out.push('\n');
            child.render_children(out, &format!("{prefix}{indent}"));
        }
    }

    fn label(&self) -> String {
        match self {
            Self::Literal { value } => value.to_string(),
            Self::Variable { index } if *index < 9 => format!("${}", index + 1),
            Self::Variable { index } => format!("${{{}}}", index + 1),
            Self::UnaryOp { op, .. } => op.to_string(),
            Self::BinaryOp { op, .. } => op.to_string(),
        }
    }
}

/// Fully parenthesized infix form. The output parses back to the same tree
/// in the domain it was built for.
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal { value } => write!(f, "{value}"),
            Self::Variable { index } => write!(f, "${{{}}}", index + 1),
            Self::UnaryOp { op, expr } if op.is_function() => write!(f, "{op}({expr})"),
            Self::UnaryOp { op, expr } => match **expr {
                Self::BinaryOp { .. } | Self::Literal { .. } | Self::Variable { .. } => {
                    write!(f, "{op}{expr}")
                },
                Self::UnaryOp { .. } => write!(f, "{op}({expr})"),
            },
            Self::BinaryOp { left, op, right } => write!(f, "({left} {op} {right})"),
        }
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Not => "!",
            Self::Sqrt => "sqrt",
            Self::Ln => "ln",
            Self::Log => "log",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Pow,
            Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Pow => "^",
            And => "&&",
            Or => "||",
            Equal => "==",
            NotEqual => "!=",
            Greater => ">",
            GreaterEqual => ">=",
            Less => "<",
            LessEqual => "<=",
        };
        write!(f, "{operator}")
    }
}
