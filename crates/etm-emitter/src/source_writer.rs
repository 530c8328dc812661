//! Output buffer used by the printer.
//!
//! Indentation is applied lazily: `write_line` only records that the next
//! write starts a new line, so a blank line never carries trailing spaces and
//! a `decrease_indent` before a closing brace takes effect on that brace.

use memchr::{memchr, memrchr};

const INDENT: &str = "  ";

#[derive(Debug, Default)]
pub struct SourceWriter {
    output: String,
    indent: u32,
    at_line_start: bool,
}

impl SourceWriter {
    pub fn new() -> SourceWriter {
        SourceWriter::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> SourceWriter {
        SourceWriter {
            output: String::with_capacity(capacity),
            indent: 0,
            at_line_start: true,
        }
    }

    /// Write `text`. Newlines inside `text` are copied as-is without
    /// re-indenting the lines that follow them.
    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indent {
                self.output.push_str(INDENT);
            }
            self.at_line_start = false;
        }
        self.output.push_str(text);
    }

    pub fn write_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.write(ch.encode_utf8(&mut buf));
    }

    pub fn write_space(&mut self) {
        self.write(" ");
    }

    pub fn write_line(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    pub fn increase_indent(&mut self) {
        self.indent += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn indent_level(&self) -> u32 {
        self.indent
    }

    /// Length of the output in bytes. Usable as a checkpoint for `truncate`.
    #[inline]
    pub fn len(&self) -> usize {
        self.output.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Roll the output back to a checkpoint taken with `len`.
    pub fn truncate(&mut self, checkpoint: usize) {
        if checkpoint >= self.output.len() {
            return;
        }
        self.output.truncate(checkpoint);
        self.at_line_start = self.output.is_empty() || self.output.ends_with('\n');
    }

    /// Width in characters of the line containing byte offset `from`,
    /// measured from the start of that line to its end (or to the end of the
    /// output when the line is still open).
    pub fn line_width_at(&self, from: usize) -> usize {
        let bytes = self.output.as_bytes();
        let from = from.min(bytes.len());
        let line_start = memrchr(b'\n', &bytes[..from]).map_or(0, |i| i + 1);
        let line_end = memchr(b'\n', &bytes[from..]).map_or(bytes.len(), |i| from + i);
        self.output
            .get(line_start..line_end)
            .map_or(0, |line| line.chars().count())
    }

    /// Does the output contain a newline after byte offset `from`?
    pub fn has_line_break_after(&self, from: usize) -> bool {
        self.output
            .as_bytes()
            .get(from..)
            .is_some_and(|tail| memchr(b'\n', tail).is_some())
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn into_string(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indentation_is_applied_on_first_write_of_a_line() {
        let mut writer = SourceWriter::new();
        writer.write("{");
        writer.increase_indent();
        writer.write_line();
        writer.write_line();
        writer.write("a;");
        writer.decrease_indent();
        writer.write_line();
        writer.write("}");
        assert_eq!(writer.as_str(), "{\n\n  a;\n}");
    }

    #[test]
    fn truncate_restores_line_start_state() {
        let mut writer = SourceWriter::new();
        writer.increase_indent();
        writer.write("x");
        writer.write_line();
        let checkpoint = writer.len();
        writer.write("y");
        writer.truncate(checkpoint);
        writer.write("z");
        assert_eq!(writer.as_str(), "  x\n  z");
    }

    #[test]
    fn line_width_measures_the_whole_line() {
        let mut writer = SourceWriter::new();
        writer.write("ab");
        writer.write_line();
        writer.write("cdé");
        let checkpoint = writer.len();
        writer.write("fg");
        writer.write_line();
        writer.write("h");
        assert_eq!(writer.line_width_at(checkpoint), 5);
        assert_eq!(writer.line_width_at(0), 2);
        assert!(writer.has_line_break_after(checkpoint));
        assert!(!writer.has_line_break_after(writer.len()));
    }
}
