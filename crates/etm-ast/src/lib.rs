//! Syntax tree facility for the etm migration engine.
//!
//! The tree is an arena of thin node headers plus typed data pools, addressed
//! by stable `NodeIndex` handles. Handles stay valid across mutation, so a
//! descriptor holding a handle observes every change made through any other
//! handle to the same node.
//!
//! - `NodeArena` / `Node`: storage and the 16-byte node header
//! - `add_*` constructors (node_arena.rs) and `get_*` accessors (node_access.rs)
//! - In-place mutation primitives that keep parent links and change marks (node_mut.rs)
//! - `AstBuilder`: a convenience constructor for hosts and tests
//! - `SourcePrinter`: the seam through which an external printer serializes a tree

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod syntax_kind;
pub use syntax_kind::SyntaxKind;

pub mod node;
pub use node::{Node, NodeArena, node_flags};

mod node_access;
pub use node_access::NodeView;

mod node_arena;
mod node_mut;

pub mod builder;
pub use builder::AstBuilder;

pub mod printer;
pub use printer::SourcePrinter;

#[cfg(test)]
#[path = "../tests/arena_tests.rs"]
mod arena_tests;

#[cfg(test)]
#[path = "../tests/mutation_tests.rs"]
mod mutation_tests;
