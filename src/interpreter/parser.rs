/// Entry point of tree building.
///
/// Drives the lexer, classifies each token against the tree under
/// construction, and reports syntax errors with the offset of the token that
/// caused them.
pub mod core;

/// Token kinds and their precedence and arity table.
pub mod token;

/// The arena tree that resolves precedence by splicing nodes.
pub mod tree;
