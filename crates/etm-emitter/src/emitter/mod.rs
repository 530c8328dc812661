//! JavaScript printer for migrated trees.
//!
//! `Printer` walks the tree once. For every node it first tries to reuse the
//! node's original text (see `verbatim_text`) and only falls back to the
//! kind-specific `emit_*` methods when the node was synthesized or changed.
//!
//! The emit methods are split by concern:
//! - statements.rs: source files, blocks, statement lists and their trivia
//! - expressions.rs: calls, member access, await, object/array literals, list
//!   wrapping, `Other` nodes
//! - functions.rs: function expressions/declarations, arrows, parameters
//! - literals.rs: identifiers, string/numeric/template literals
//! - module_emission.rs: import declarations

use etm_ast::{Node, NodeArena, NodeIndex, SourcePrinter, SyntaxKind, node_flags};
use etm_common::PrinterOptions;
use tracing::{debug, warn};

use crate::source_writer::SourceWriter;

mod expressions;
mod functions;
mod literals;
mod module_emission;
mod statements;

/// Stateful printer over one arena.
pub struct Printer<'a> {
    arena: &'a NodeArena,
    options: &'a PrinterOptions,
    /// Text the node spans refer to. Defaults to `arena.source_text`.
    source_text: Option<&'a str>,
    writer: SourceWriter,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena, options: &'a PrinterOptions) -> Printer<'a> {
        let capacity = arena.source_text.as_ref().map_or(1024, |text| text.len() + 256);
        Printer {
            arena,
            options,
            source_text: arena.source_text.as_deref(),
            writer: SourceWriter::with_capacity(capacity),
        }
    }

    /// Use `text` instead of the arena's own source text for verbatim reuse.
    pub fn set_source_text(&mut self, text: &'a str) {
        self.source_text = Some(text);
    }

    /// Print the tree rooted at `root` into the internal buffer.
    pub fn print(&mut self, root: NodeIndex) {
        debug!(
            root = root.0,
            nodes = self.arena.len(),
            has_source = self.source_text.is_some(),
            "printing tree"
        );
        self.emit(root);
    }

    /// Take the printed text. Non-empty output always ends with a newline.
    pub fn finish(self) -> String {
        let mut output = self.writer.into_string();
        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }
        output
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    pub(super) fn emit(&mut self, idx: NodeIndex) {
        let Some(node) = self.arena.get(idx) else {
            return;
        };

        if let Some(text) = self.verbatim_text(node) {
            self.writer.write(text);
            return;
        }

        self.emit_node(node, idx);
    }

    /// Original text of `node` when it can be reused as-is: the node maps
    /// onto a real range of the source and nothing at or below it changed.
    fn verbatim_text(&self, node: &Node) -> Option<&'a str> {
        if !node.has_source_span() || node.has_flag(node_flags::MODIFIED) {
            return None;
        }
        self.source_text?.get(node.pos as usize..node.end as usize)
    }

    fn emit_node(&mut self, node: &Node, idx: NodeIndex) {
        let Some(kind) = SyntaxKind::from_u16(node.kind) else {
            warn!(idx = idx.0, kind = node.kind, "cannot print node of unknown kind");
            return;
        };

        match kind {
            SyntaxKind::Identifier => self.emit_identifier(node),
            SyntaxKind::StringLiteral => self.emit_string_literal(node),
            SyntaxKind::NumericLiteral => self.emit_numeric_literal(node),
            SyntaxKind::NoSubstitutionTemplateLiteral => self.emit_template_literal(node),
            SyntaxKind::ThisKeyword => self.write("this"),
            SyntaxKind::TrueKeyword => self.write("true"),
            SyntaxKind::FalseKeyword => self.write("false"),
            SyntaxKind::NullKeyword => self.write("null"),
            SyntaxKind::CallExpression => self.emit_call_expression(node),
            SyntaxKind::PropertyAccessExpression => self.emit_property_access(node),
            SyntaxKind::AwaitExpression => self.emit_await_expression(node),
            SyntaxKind::TaggedTemplateExpression => self.emit_tagged_template(node),
            SyntaxKind::FunctionExpression | SyntaxKind::FunctionDeclaration => {
                self.emit_function(node)
            }
            SyntaxKind::ArrowFunction => self.emit_arrow_function(node),
            SyntaxKind::Parameter => self.emit_parameter(node),
            SyntaxKind::ObjectLiteralExpression => self.emit_object_literal(node),
            SyntaxKind::ArrayLiteralExpression => self.emit_array_literal(node),
            SyntaxKind::PropertyAssignment | SyntaxKind::ShorthandPropertyAssignment => {
                self.emit_property_assignment(node)
            }
            SyntaxKind::Block => self.emit_block(node),
            SyntaxKind::ExpressionStatement => self.emit_expression_statement(node),
            SyntaxKind::VariableStatement => self.emit_variable_statement(node),
            SyntaxKind::VariableDeclaration => self.emit_variable_declaration(node),
            SyntaxKind::ReturnStatement => self.emit_return_statement(node),
            SyntaxKind::IfStatement => self.emit_if_statement(node),
            SyntaxKind::Other => self.emit_other(node),
            SyntaxKind::ImportDeclaration => self.emit_import_declaration(node),
            SyntaxKind::ImportSpecifier
            | SyntaxKind::ImportDefaultSpecifier
            | SyntaxKind::NamespaceImport => self.emit_import_binding(node, kind),
            SyntaxKind::SourceFile => self.emit_source_file(node),
            SyntaxKind::Unknown => {}
        }
    }

    // =========================================================================
    // Output Helpers (delegate to SourceWriter)
    // =========================================================================

    pub(super) fn write(&mut self, text: &str) {
        self.writer.write(text);
    }

    pub(super) fn write_char(&mut self, ch: char) {
        self.writer.write_char(ch);
    }

    pub(super) fn write_line(&mut self) {
        self.writer.write_line();
    }

    pub(super) fn increase_indent(&mut self) {
        self.writer.increase_indent();
    }

    pub(super) fn decrease_indent(&mut self) {
        self.writer.decrease_indent();
    }

    pub(super) fn kind_of(&self, idx: NodeIndex) -> Option<SyntaxKind> {
        self.arena.kind_of(idx)
    }

    /// Source offset where a node starts, if it maps onto the source text.
    pub(super) fn span_start(&self, node: &Node) -> Option<u32> {
        node.has_source_span().then_some(node.pos)
    }

    pub(super) fn span_end(&self, node: &Node) -> Option<u32> {
        node.has_source_span().then_some(node.end)
    }
}

// =============================================================================
// SourcePrinter
// =============================================================================

/// The reference `SourcePrinter`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsEmitter;

impl SourcePrinter for JsEmitter {
    fn print(&self, arena: &NodeArena, root: NodeIndex, options: &PrinterOptions) -> String {
        let mut printer = Printer::new(arena, options);
        printer.print(root);
        printer.finish()
    }
}
