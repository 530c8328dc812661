use std::fmt::Write;

use etm_ast::Node;

use super::Printer;

impl<'a> Printer<'a> {
    // =========================================================================
    // Literals
    // =========================================================================

    pub(super) fn emit_identifier(&mut self, node: &Node) {
        if let Some(ident) = self.arena.get_identifier(node) {
            self.write(&ident.escaped_text);
        }
    }

    pub(super) fn emit_numeric_literal(&mut self, node: &Node) {
        if let Some(lit) = self.arena.get_literal(node) {
            self.write(&lit.text);
        }
    }

    /// String literals keep their raw source form when the host recorded
    /// one; otherwise they are regenerated in the configured quote style.
    pub(super) fn emit_string_literal(&mut self, node: &Node) {
        let Some(lit) = self.arena.get_literal(node) else {
            return;
        };
        if let Some(raw) = &lit.raw_text {
            self.write(raw);
            return;
        }
        let quote = self.options.quote.as_char();
        self.write_char(quote);
        let escaped = escape_string(&lit.text, quote);
        self.write(&escaped);
        self.write_char(quote);
    }

    /// Template text is stored as written between the backticks.
    pub(super) fn emit_template_literal(&mut self, node: &Node) {
        let Some(lit) = self.arena.get_literal(node) else {
            return;
        };
        self.write("`");
        self.write(lit.raw_text.as_deref().unwrap_or(&lit.text));
        self.write("`");
    }
}

/// Escape `s` for a string literal delimited by `quote_char`.
pub(super) fn escape_string(s: &str, quote_char: char) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            c if c == quote_char => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c == '\x7F' => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_string;

    #[test]
    fn escapes_only_the_active_quote() {
        assert_eq!(escape_string("it's \"x\"", '\''), "it\\'s \"x\"");
        assert_eq!(escape_string("it's \"x\"", '"'), "it's \\\"x\\\"");
    }

    #[test]
    fn escapes_control_characters() {
        assert_eq!(escape_string("a\nb\u{1}", '\''), "a\\nb\\u0001");
    }
}
