//! gn_ast: Syntax tree definitions for the GN build language.
//!
//! This crate defines the `SyntaxKind` enum, node flags, the typed tree
//! produced by `gn_parser`, a visitor, and the uniform `NodeRef` view used
//! by tree-walking tools.

pub mod generated;
pub mod node;
pub mod syntax_kind;
pub mod tree;
pub mod types;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use tree::{Child, NodeRef};
pub use types::NodeFlags;
pub use visitor::AstVisitor;
