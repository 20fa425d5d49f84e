use log::trace;

use crate::{
    ast::Expr,
    error::{BuildError, BuildResult, SyntaxError},
    interpreter::parser::token::TokenKind,
};

/// Index of a node in the builder's arena.
pub type NodeId = usize;

#[derive(Debug, Clone)]
struct Node {
    kind:   TokenKind,
    parent: Option<NodeId>,
    left:   Option<NodeId>,
    right:  Option<NodeId>,
}

impl Node {
    const fn new(kind: TokenKind, parent: Option<NodeId>) -> Self {
        Self { kind,
               parent,
               left: None,
               right: None }
    }

    fn operand_count(&self) -> u8 {
        u8::from(self.left.is_some()) + u8::from(self.right.is_some())
    }
}

/// A parent-linked binary tree grown one token at a time.
///
/// Operator precedence is resolved by splicing: a binary operator climbs
/// from the cursor towards the root past every ancestor that binds at least as
/// tightly, and takes over the slot of the last node it passed. Brackets and
/// functions stop the climb, so they scope precedence without an operator
/// stack.
///
/// Nodes live in an arena and link to each other by index. A bracket that
/// is closed absorbs its only child, leaving the child's slot unreachable;
/// [`Tree::freeze`] copies out only the nodes reachable from the root.
#[derive(Debug)]
pub struct Tree {
    nodes:  Vec<Node>,
    cursor: NodeId,
}

impl Tree {
    /// Creates a tree holding a single placeholder root, which is also the
    /// cursor.
    pub fn new() -> BuildResult<Self> {
        let mut tree = Self { nodes:  Vec::new(),
                              cursor: 0, };
        tree.cursor = tree.alloc(Node::new(TokenKind::Undefined, None))?;
        Ok(tree)
    }

    /// Kind of the node at the cursor.
    #[must_use]
    pub fn cursor_kind(&self) -> TokenKind {
        self.nodes[self.cursor].kind
    }

    /// Whether the cursor already holds as many operands as its kind needs.
    #[must_use]
    pub fn cursor_is_complete(&self) -> bool {
        let node = &self.nodes[self.cursor];
        node.operand_count() >= node.kind.arity()
    }

    /// Inserts a classified token and moves the cursor onto it.
    ///
    /// The caller has already checked that the token fits the cursor's
    /// remaining capacity. `)` is not inserted; see [`Tree::close_bracket`].
    pub fn insert(&mut self, kind: TokenKind) -> BuildResult<()> {
        if self.cursor_kind() == TokenKind::Undefined {
            self.nodes[self.cursor].kind = kind;
            return Ok(());
        }

        if kind.is_leaf_like() {
            self.attach_below(kind)
        } else {
            self.splice_above(kind)
        }
    }

    /// Attaches `kind` as the cursor's first free child.
    fn attach_below(&mut self, kind: TokenKind) -> BuildResult<()> {
        let parent = self.cursor;
        let id = self.alloc(Node::new(kind, Some(parent)))?;

        let node = &mut self.nodes[parent];
        if node.left.is_none() {
            node.left = Some(id);
        } else {
            node.right = Some(id);
        }
        self.cursor = id;
        Ok(())
    }

    /// Splices a binary operator above the cursor, after climbing past every
    /// ancestor with higher or equal precedence.
    fn splice_above(&mut self, kind: TokenKind) -> BuildResult<()> {
        let precedence = kind.precedence();

        let mut node = self.cursor;
        while let Some(parent) = self.nodes[node].parent {
            let parent_kind = self.nodes[parent].kind;
            if parent_kind.is_boundary() || parent_kind.precedence() < precedence {
                break;
            }
            node = parent;
        }

        let grandparent = self.nodes[node].parent;
        let mut spliced = Node::new(kind, grandparent);
        spliced.left = Some(node);
        let id = self.alloc(spliced)?;

        if let Some(grandparent) = grandparent {
            let slot = &mut self.nodes[grandparent];
            if slot.left == Some(node) {
                slot.left = Some(id);
            } else {
                slot.right = Some(id);
            }
        }
        self.nodes[node].parent = Some(id);

        trace!("spliced {kind:?} above node {node}");
        self.cursor = id;
        Ok(())
    }

    /// Handles `)`: finds the scope it closes and moves the cursor there.
    ///
    /// A plain bracket is removed by pulling its child up into its slot; a
    /// function node stays as the finished unary node.
    ///
    /// # Errors
    /// - `EmptyParenthesis` if the cursor is a bracket with nothing inside.
    /// - `MissingValue` if the cursor is a function without an argument.
    /// - `UnbalancedParenthesis` if no bracket or function is open.
    /// - `MissingValue` if the cursor still needs operands.
    pub fn close_bracket(&mut self) -> Result<(), SyntaxError> {
        let kind = self.cursor_kind();
        if kind == TokenKind::LeftParen {
            return Err(SyntaxError::EmptyParenthesis);
        }
        let complete = self.cursor_is_complete();
        if !complete && kind.is_boundary() {
            return Err(SyntaxError::MissingValue);
        }

        let scope = self.enclosing_scope(self.cursor)
                        .ok_or(SyntaxError::UnbalancedParenthesis)?;
        if !complete {
            return Err(SyntaxError::MissingValue);
        }
        if self.nodes[scope].kind == TokenKind::LeftParen {
            self.absorb_child(scope);
        }
        self.cursor = scope;
        Ok(())
    }

    /// Whether a bracket or function opened above the cursor is still
    /// unclosed.
    #[must_use]
    pub fn has_open_scope(&self) -> bool {
        self.enclosing_scope(self.cursor).is_some()
    }

    /// Nearest proper ancestor of `id` that is a scope boundary.
    fn enclosing_scope(&self, id: NodeId) -> Option<NodeId> {
        let mut node = self.nodes[id].parent;
        while let Some(current) = node {
            if self.nodes[current].kind.is_boundary() {
                return Some(current);
            }
            node = self.nodes[current].parent;
        }
        None
    }

    /// Replaces the bracket at `id` by its only child, keeping the bracket's
    /// slot and parent link.
    fn absorb_child(&mut self, id: NodeId) {
        let Some(child) = self.nodes[id].left else {
            return;
        };
        let Node { kind, left, right, .. } = self.nodes[child].clone();

        let node = &mut self.nodes[id];
        node.kind = kind;
        node.left = left;
        node.right = right;

        for grandchild in [left, right].into_iter().flatten() {
            self.nodes[grandchild].parent = Some(id);
        }
        self.nodes[child].parent = None;
        trace!("removed bracket {id}, absorbed node {child}");
    }

    /// Converts the finished tree into an owned [`Expr`], starting from the
    /// root above the cursor.
    ///
    /// Returns `None` if a reachable node is not a complete operator or value,
    /// which a tree that passed every check never contains.
    #[must_use]
    pub fn freeze(&self) -> Option<Expr> {
        let mut root = self.cursor;
        while let Some(parent) = self.nodes[root].parent {
            root = parent;
        }
        self.freeze_node(root)
    }

    fn freeze_node(&self, id: NodeId) -> Option<Expr> {
        let node = &self.nodes[id];

        match node.kind {
            TokenKind::Number(value) => Some(Expr::Literal { value }),
            TokenKind::Variable(index) => Some(Expr::Variable { index }),
            kind => {
                if let Some(op) = kind.unary_operator() {
                    let expr = self.freeze_node(node.left?)?;
                    Some(Expr::UnaryOp { op,
                                         expr: Box::new(expr) })
                } else {
                    let op = kind.binary_operator()?;
                    let left = self.freeze_node(node.left?)?;
                    let right = self.freeze_node(node.right?)?;
                    Some(Expr::BinaryOp { left: Box::new(left),
                                          op,
                                          right: Box::new(right) })
                }
            },
        }
    }

    fn alloc(&mut self, node: Node) -> BuildResult<NodeId> {
        self.nodes.try_reserve(1).map_err(|_| BuildError::Memory)?;
        self.nodes.push(node);
        Ok(self.nodes.len() - 1)
    }
}
