//! Indentation-aware text buffer

use crate::config::EmitterConfig;

/// Accumulates generated source one fragment at a time.
///
/// Indentation is written lazily by the first non-empty [`print`](Self::print)
/// on a line, so blank lines never carry trailing whitespace.
#[derive(Debug, Clone)]
pub struct SourceWriter {
    buf: String,
    indent_unit: String,
    end_of_line: String,
    level: usize,
    at_line_start: bool,
}

impl SourceWriter {
    pub fn new(indent_unit: impl Into<String>, end_of_line: impl Into<String>) -> Self {
        Self {
            buf: String::new(),
            indent_unit: indent_unit.into(),
            end_of_line: end_of_line.into(),
            level: 0,
            at_line_start: true,
        }
    }

    pub fn from_config(config: &EmitterConfig) -> Self {
        Self::new(config.indent(), config.end_of_line())
    }

    pub fn print(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            return self;
        }
        if self.at_line_start {
            for _ in 0..self.level {
                self.buf.push_str(&self.indent_unit);
            }
            self.at_line_start = false;
        }
        self.buf.push_str(text);
        self
    }

    /// Terminate the current line
    pub fn println(&mut self) -> &mut Self {
        self.buf.push_str(&self.end_of_line);
        self.at_line_start = true;
        self
    }

    pub fn print_line(&mut self, text: &str) -> &mut Self {
        self.print(text).println()
    }

    pub fn indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn unindent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn source(&self) -> &str {
        &self.buf
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_indent_is_written_once_per_line() {
        let mut w = SourceWriter::new("  ", "\n");
        w.print_line("class A {");
        w.indent();
        w.print("x").print(": ").print_line("number;");
        w.unindent();
        w.print("}");
        assert_eq!(w.finish(), "class A {\n  x: number;\n}");
    }

    #[test]
    fn test_blank_lines_have_no_indent() {
        let mut w = SourceWriter::new("    ", "\r\n");
        w.indent().print_line("{").println().print_line("}");
        assert_eq!(w.source(), "    {\r\n\r\n    }\r\n");
    }

    #[test]
    fn test_unindent_saturates() {
        let mut w = SourceWriter::new("\t", "\n");
        w.unindent().unindent();
        assert_eq!(w.level(), 0);
        w.print("x");
        assert_eq!(w.finish(), "x");
    }
}
