use etm_ast::{Node, NodeIndex, SyntaxKind};
use tracing::trace;

use super::Printer;

/// Delimiters and layout of a comma-separated list.
#[derive(Debug, Clone, Copy)]
pub(super) struct ListFormat {
    pub open: &'static str,
    pub close: &'static str,
    /// Space inside the delimiters on a single line: `{ a, b }`
    pub padded: bool,
    /// Comma after the last item when broken one item per line
    pub trailing_comma: bool,
}

impl ListFormat {
    pub const ARGUMENTS: ListFormat = ListFormat {
        open: "(",
        close: ")",
        padded: false,
        trailing_comma: false,
    };
    pub const ARRAY: ListFormat = ListFormat {
        open: "[",
        close: "]",
        padded: false,
        trailing_comma: true,
    };
    pub const OBJECT: ListFormat = ListFormat {
        open: "{",
        close: "}",
        padded: true,
        trailing_comma: true,
    };
}

impl<'a> Printer<'a> {
    // =========================================================================
    // Lists
    // =========================================================================

    /// Emit `items` on one line, or one item per line when the single-line
    /// form pushes its line past `wrap_column`. `suffix_width` accounts for
    /// text the caller writes after the list on the same line.
    pub(super) fn emit_list(
        &mut self,
        items: &[NodeIndex],
        format: ListFormat,
        force_multi_line: bool,
        suffix_width: usize,
    ) {
        if items.is_empty() {
            self.write(format.open);
            self.write(format.close);
            return;
        }

        if !force_multi_line {
            let checkpoint = self.writer.len();
            self.emit_list_single_line(items, format);
            if !self.exceeds_wrap_column(checkpoint, suffix_width) {
                return;
            }
            trace!(
                items = items.len(),
                wrap_column = self.options.wrap_column,
                "list too wide, breaking one item per line"
            );
            self.writer.truncate(checkpoint);
        }

        self.emit_list_multi_line(items, format);
    }

    fn emit_list_single_line(&mut self, items: &[NodeIndex], format: ListFormat) {
        self.write(format.open);
        if format.padded {
            self.write(" ");
        }
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit(item);
        }
        if format.padded {
            self.write(" ");
        }
        self.write(format.close);
    }

    fn emit_list_multi_line(&mut self, items: &[NodeIndex], format: ListFormat) {
        self.write(format.open);
        self.increase_indent();
        for (i, &item) in items.iter().enumerate() {
            self.write_line();
            self.emit(item);
            if i + 1 < items.len() || format.trailing_comma {
                self.write(",");
            }
        }
        self.decrease_indent();
        self.write_line();
        self.write(format.close);
    }

    /// Does the line on which output at `checkpoint` starts run past the
    /// wrap column? A column of 0 disables wrapping.
    fn exceeds_wrap_column(&self, checkpoint: usize, suffix_width: usize) -> bool {
        let wrap_column = self.options.wrap_column;
        if wrap_column == 0 {
            return false;
        }
        let mut width = self.writer.line_width_at(checkpoint);
        if !self.writer.has_line_break_after(checkpoint) {
            width += suffix_width;
        }
        width > wrap_column
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub(super) fn emit_call_expression(&mut self, node: &Node) {
        let Some(call) = self.arena.get_call_expr(node) else {
            return;
        };
        self.emit_operand(call.expression);
        self.emit_list(&call.arguments.nodes, ListFormat::ARGUMENTS, false, 0);
    }

    pub(super) fn emit_property_access(&mut self, node: &Node) {
        let Some(access) = self.arena.get_access_expr(node) else {
            return;
        };
        self.emit_operand(access.expression);
        self.write(if access.question_dot_token { "?." } else { "." });
        self.emit(access.name_or_argument);
    }

    pub(super) fn emit_await_expression(&mut self, node: &Node) {
        let Some(unary) = self.arena.get_await_expr(node) else {
            return;
        };
        self.write("await ");
        self.emit_operand(unary.expression);
    }

    pub(super) fn emit_tagged_template(&mut self, node: &Node) {
        let Some(tagged) = self.arena.get_tagged_template(node) else {
            return;
        };
        self.emit_operand(tagged.tag);
        self.emit(tagged.template);
    }

    /// Emit an expression in operand position, parenthesizing function
    /// expressions and arrows (`(function() {})()`, `await (() => x)`).
    fn emit_operand(&mut self, idx: NodeIndex) {
        let needs_parens = matches!(
            self.kind_of(idx),
            Some(SyntaxKind::FunctionExpression | SyntaxKind::ArrowFunction)
        );
        if needs_parens {
            self.write("(");
        }
        self.emit(idx);
        if needs_parens {
            self.write(")");
        }
    }

    pub(super) fn emit_object_literal(&mut self, node: &Node) {
        let Some(literal) = self.arena.get_literal_expr(node) else {
            return;
        };
        self.emit_list(
            &literal.elements.nodes,
            ListFormat::OBJECT,
            literal.multi_line,
            0,
        );
    }

    pub(super) fn emit_array_literal(&mut self, node: &Node) {
        let Some(literal) = self.arena.get_literal_expr(node) else {
            return;
        };
        self.emit_list(
            &literal.elements.nodes,
            ListFormat::ARRAY,
            literal.multi_line,
            0,
        );
    }

    pub(super) fn emit_property_assignment(&mut self, node: &Node) {
        let Some(prop) = self.arena.get_property_assignment(node) else {
            return;
        };
        self.emit(prop.name);
        if node.kind == SyntaxKind::PropertyAssignment as u16 && prop.initializer.is_some() {
            self.write(": ");
            self.emit(prop.initializer);
        }
    }

    // =========================================================================
    // Other
    // =========================================================================

    /// Reprint a construct without a dedicated kind. A node that maps onto
    /// the source keeps its original text and only re-emits its children in
    /// place; a synthesized node interleaves its fragments with the children.
    pub(super) fn emit_other(&mut self, node: &Node) {
        let Some(other) = self.arena.get_other(node) else {
            return;
        };

        if let Some(source) = self.splice_source(node, &other.children.nodes) {
            let mut cursor = node.pos as usize;
            for &child in &other.children.nodes {
                let Some(child_node) = self.arena.get(child) else {
                    continue;
                };
                self.write(source.get(cursor..child_node.pos as usize).unwrap_or_default());
                self.emit(child);
                cursor = child_node.end as usize;
            }
            self.write(source.get(cursor..node.end as usize).unwrap_or_default());
            return;
        }

        trace!(children = other.children.len(), "printing other node from fragments");
        for (i, &child) in other.children.nodes.iter().enumerate() {
            self.write(other.fragments.get(i).map_or("", String::as_str));
            self.emit(child);
        }
        let tail = other.fragments.get(other.children.len());
        self.write(tail.map_or("", String::as_str));
    }

    /// Source text to splice into when `node` and every child map onto it,
    /// with the children in order inside the node's span.
    fn splice_source(&self, node: &Node, children: &[NodeIndex]) -> Option<&'a str> {
        let source = self.source_text?;
        let start = self.span_start(node)?;
        let end = self.span_end(node)?;
        source.get(start as usize..end as usize)?;

        let mut cursor = start;
        for &child in children {
            let child = self.arena.get(child)?;
            let (child_start, child_end) = (self.span_start(child)?, self.span_end(child)?);
            if child_start < cursor || child_end > end {
                return None;
            }
            cursor = child_end;
        }
        Some(source)
    }
}
