//! Reference printer for the etm migration engine.
//!
//! `JsEmitter` implements `etm_ast::SourcePrinter`. Nodes that still map onto
//! the attached source text and were never touched by a rewrite are copied
//! verbatim; everything else is regenerated with 2-space indentation, the
//! configured quote style and list wrapping at the configured column.

// SourceWriter - output buffer with indentation and column tracking
pub mod source_writer;

pub mod emitter;
pub use emitter::{JsEmitter, Printer};
