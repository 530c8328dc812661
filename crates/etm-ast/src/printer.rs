//! The seam between the tree and whatever serializes it back to text.

use super::base::NodeIndex;
use super::node::NodeArena;
use etm_common::PrinterOptions;

/// Serializes a (possibly mutated) tree back to source text.
///
/// Implementations are expected to reproduce untouched regions of
/// `arena.source_text` verbatim and to apply `options` only to the parts they
/// have to regenerate.
pub trait SourcePrinter {
    fn print(&self, arena: &NodeArena, root: NodeIndex, options: &PrinterOptions) -> String;
}
