//! Lossless, error-tolerant syntax tree for JSON-like documents.
//!
//! The green layer is immutable, shareable, and position-independent. The red
//! layer sits on top of it, adding parent links and absolute positions. Red
//! nodes are created lazily and safely from any number of threads.

/// Typed views over red nodes.
pub mod ast;
mod cursor;
/// Green node types.
pub mod green;
mod red;
mod symbol_type;
mod syntax;
mod syntax_kind;

/// Preorder traversal over a subtree.
pub use cursor::{Preorder, WalkEvent};
/// Tokenizer symbol classification.
pub use symbol_type::SymbolType;
/// Primary syntax tree API types.
pub use syntax::{Children, SyntaxNode, SyntaxTree, TerminalsInRange};
/// Node kinds used throughout the red tree.
pub use syntax_kind::SyntaxKind;
pub use verdant_span::{HasTextLen, TextRange, TextSize};
