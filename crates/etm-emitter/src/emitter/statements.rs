use etm_ast::{Node, NodeIndex, node_flags};
use memchr::{memchr, memmem};
use tracing::trace;

use super::Printer;

/// Comments and blank lines found in the source between two statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TriviaItem<'s> {
    /// A comment on the same line as the end of the preceding statement
    TrailingComment(&'s str),
    Comment(&'s str),
    BlankLine,
}

/// Split `gap` into comments and blank lines.
///
/// Returns `None` when the gap holds anything besides whitespace and
/// comments, e.g. the text of a statement that was removed in between.
pub(super) fn scan_trivia(gap: &str) -> Option<Vec<TriviaItem<'_>>> {
    let bytes = gap.as_bytes();
    let mut items = Vec::new();
    let mut newlines = 0usize;
    let mut seen_line_break = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                newlines += 1;
                seen_line_break = true;
                i += 1;
            }
            b' ' | b'\t' | b'\r' => i += 1,
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let end = memchr(b'\n', &bytes[i..]).map_or(bytes.len(), |n| i + n);
                push_comment(&mut items, gap[i..end].trim_end(), newlines, seen_line_break);
                newlines = 0;
                i = end;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let close = memmem::find(&bytes[i + 2..], b"*/")?;
                let end = i + 2 + close + 2;
                push_comment(&mut items, &gap[i..end], newlines, seen_line_break);
                newlines = 0;
                i = end;
            }
            _ => return None,
        }
    }

    if newlines >= 2 {
        items.push(TriviaItem::BlankLine);
    }
    Some(items)
}

fn push_comment<'s>(
    items: &mut Vec<TriviaItem<'s>>,
    text: &'s str,
    newlines: usize,
    seen_line_break: bool,
) {
    if !seen_line_break {
        items.push(TriviaItem::TrailingComment(text));
        return;
    }
    if newlines >= 2 {
        items.push(TriviaItem::BlankLine);
    }
    items.push(TriviaItem::Comment(text));
}

impl<'a> Printer<'a> {
    // =========================================================================
    // Statement lists
    // =========================================================================

    pub(super) fn emit_source_file(&mut self, node: &Node) {
        let Some(file) = self.arena.get_source_file(node) else {
            return;
        };
        let open = self.span_start(node);
        let close = self.span_end(node);
        self.emit_statement_list(&file.statements.nodes, open, close);
    }

    pub(super) fn emit_block(&mut self, node: &Node) {
        let Some(block) = self.arena.get_block(node) else {
            return;
        };

        if block.statements.is_empty() {
            self.write("{}");
            return;
        }

        // Trivia scanning starts after `{` and stops before `}`.
        let open = self.span_start(node).map(|pos| pos + 1);
        let close = self.span_end(node).map(|end| end.saturating_sub(1));

        self.write("{");
        self.increase_indent();
        self.write_line();
        self.emit_statement_list(&block.statements.nodes, open, close);
        self.decrease_indent();
        self.write_line();
        self.write("}");
    }

    /// Emit statements one per line. Comments and blank lines between
    /// statements that still map onto the source are carried over.
    fn emit_statement_list(&mut self, statements: &[NodeIndex], open: Option<u32>, close: Option<u32>) {
        let mut prev_end = open;
        let mut first = true;

        for &stmt in statements {
            let Some(node) = self.arena.get(stmt) else {
                continue;
            };
            let trivia = self.trivia_between(prev_end, self.span_start(node));

            if first {
                self.emit_leading_trivia(trivia.as_deref().unwrap_or_default());
            } else {
                self.emit_separator_trivia(trivia.as_deref().unwrap_or_default());
            }

            self.emit(stmt);
            prev_end = self.span_end(node);
            first = false;
        }

        if !first {
            let trivia = self.trivia_between(prev_end, close);
            self.emit_closing_trivia(trivia.as_deref().unwrap_or_default());
        }
    }

    fn trivia_between(&self, from: Option<u32>, to: Option<u32>) -> Option<Vec<TriviaItem<'a>>> {
        let text = self.source_text?;
        let (from, to) = (from? as usize, to? as usize);
        if from > to {
            return None;
        }
        let gap = text.get(from..to)?;
        let items = scan_trivia(gap);
        if items.is_none() {
            trace!(from, to, "gap is not pure trivia, dropping it");
        }
        items
    }

    /// Comments before the first statement of a list, each on its own line.
    fn emit_leading_trivia(&mut self, items: &[TriviaItem<'a>]) {
        for (i, item) in items.iter().enumerate() {
            match *item {
                TriviaItem::TrailingComment(text) | TriviaItem::Comment(text) => {
                    self.write(text);
                    self.write_line();
                }
                TriviaItem::BlankLine if i > 0 => self.write_line(),
                TriviaItem::BlankLine => {}
            }
        }
    }

    /// Line break between two statements plus whatever trivia sat there.
    fn emit_separator_trivia(&mut self, items: &[TriviaItem<'a>]) {
        let mut rest = items;
        if let Some((TriviaItem::TrailingComment(text), tail)) = items.split_first() {
            self.write(" ");
            self.write(text);
            rest = tail;
        }
        self.write_line();

        for item in rest {
            match *item {
                TriviaItem::TrailingComment(text) | TriviaItem::Comment(text) => {
                    self.write(text);
                    self.write_line();
                }
                TriviaItem::BlankLine => self.write_line(),
            }
        }
    }

    /// Comments after the last statement of a list.
    fn emit_closing_trivia(&mut self, items: &[TriviaItem<'a>]) {
        for (i, item) in items.iter().enumerate() {
            match *item {
                TriviaItem::TrailingComment(text) => {
                    self.write(" ");
                    self.write(text);
                }
                TriviaItem::Comment(text) => {
                    self.write_line();
                    self.write(text);
                }
                TriviaItem::BlankLine if i + 1 < items.len() => self.write_line(),
                TriviaItem::BlankLine => {}
            }
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(super) fn emit_expression_statement(&mut self, node: &Node) {
        let Some(stmt) = self.arena.get_expression_statement(node) else {
            return;
        };
        self.emit(stmt.expression);
        self.write(";");
    }

    pub(super) fn emit_variable_statement(&mut self, node: &Node) {
        let Some(var_stmt) = self.arena.get_variable(node) else {
            return;
        };

        let keyword = if node.has_flag(node_flags::CONST) {
            "const "
        } else if node.has_flag(node_flags::LET) {
            "let "
        } else {
            "var "
        };
        self.write(keyword);

        for (i, &decl) in var_stmt.declarations.nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit(decl);
        }
        self.write(";");
    }

    pub(super) fn emit_variable_declaration(&mut self, node: &Node) {
        let Some(decl) = self.arena.get_variable_declaration(node) else {
            return;
        };
        self.emit(decl.name);
        if decl.initializer.is_some() {
            self.write(" = ");
            self.emit(decl.initializer);
        }
    }

    pub(super) fn emit_return_statement(&mut self, node: &Node) {
        let Some(ret) = self.arena.get_return_statement(node) else {
            return;
        };
        self.write("return");
        if ret.expression.is_some() {
            self.write(" ");
            self.emit(ret.expression);
        }
        self.write(";");
    }

    pub(super) fn emit_if_statement(&mut self, node: &Node) {
        let Some(if_stmt) = self.arena.get_if_statement(node) else {
            return;
        };
        self.write("if (");
        self.emit(if_stmt.expression);
        self.write(") ");
        self.emit(if_stmt.then_statement);
        if if_stmt.else_statement.is_some() {
            self.write(" else ");
            self.emit(if_stmt.else_statement);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_trivia_splits_comments_and_blank_lines() {
        let items = scan_trivia(" // trailing\n\n  // own line\n  /* block */\n\n  ").unwrap();
        assert_eq!(
            items,
            vec![
                TriviaItem::TrailingComment("// trailing"),
                TriviaItem::BlankLine,
                TriviaItem::Comment("// own line"),
                TriviaItem::Comment("/* block */"),
                TriviaItem::BlankLine,
            ]
        );
    }

    #[test]
    fn scan_trivia_rejects_code() {
        assert_eq!(scan_trivia("\nfoo();\n"), None);
        assert_eq!(scan_trivia("/* unterminated"), None);
    }

    #[test]
    fn scan_trivia_single_newline_is_no_item() {
        assert_eq!(scan_trivia("\n    "), Some(Vec::new()));
    }
}
