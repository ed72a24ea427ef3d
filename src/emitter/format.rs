//! Rust formatting utilities for source emission.
//!
//! Provides string escaping and indentation management.

/// Escape a string for use in a Rust string literal.
///
/// Handles backslashes, quotes, and control characters. Newlines are kept as
/// `\n` escapes so generated SQL stays on one source line.
#[must_use]
pub fn escape_rust_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\0' => result.push_str("\\0"),
            c => result.push(c),
        }
    }
    result
}

/// Quote a string literal with double quotes.
#[must_use]
pub fn quote_string(s: &str) -> String {
    format!("\"{}\"", escape_rust_string(s))
}

/// Indentation style for emitted Rust.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indent {
    /// Use tabs for indentation.
    Tabs,
    /// Use spaces for indentation.
    Spaces(usize),
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(4)
    }
}

impl Indent {
    /// Get the indent string for one level.
    #[must_use]
    pub fn to_string_owned(&self) -> String {
        match self {
            Indent::Tabs => "\t".to_string(),
            Indent::Spaces(n) => " ".repeat(*n),
        }
    }
}

/// A writer that manages indentation for Rust output.
pub struct IndentWriter {
    buffer: String,
    indent_str: String,
    current_indent: usize,
    at_line_start: bool,
}

impl IndentWriter {
    /// Create a new indent writer with the specified indentation style.
    #[must_use]
    pub fn new(indent: Indent) -> Self {
        Self {
            buffer: String::new(),
            indent_str: indent.to_string_owned(),
            current_indent: 0,
            at_line_start: true,
        }
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.current_indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        self.current_indent = self.current_indent.saturating_sub(1);
    }

    /// Write the current indentation if at line start.
    fn write_indent_if_needed(&mut self) {
        if self.at_line_start && self.current_indent > 0 {
            for _ in 0..self.current_indent {
                self.buffer.push_str(&self.indent_str);
            }
            self.at_line_start = false;
        }
    }

    /// Write a complete line (with newline at end).
    pub fn write_line(&mut self, s: &str) {
        self.write_indent_if_needed();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self.at_line_start = true;
    }

    /// Write inline content (no automatic newline).
    pub fn write_inline(&mut self, s: &str) {
        self.write_indent_if_needed();
        self.buffer.push_str(s);
        self.at_line_start = false;
    }

    /// Write a blank line.
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
        self.at_line_start = true;
    }

    /// Write `open`, then indent until the matching [`close_block`](Self::close_block).
    pub fn open_block(&mut self, open: &str) {
        self.write_line(open);
        self.indent();
    }

    pub fn close_block(&mut self, close: &str) {
        self.dedent();
        self.write_line(close);
    }

    /// Write `///` doc lines.
    pub fn write_docs(&mut self, docs: &[String]) {
        for line in docs {
            if line.is_empty() {
                self.write_line("///");
            } else {
                self.write_line(&format!("/// {}", line));
            }
        }
    }

    /// Consume the writer and return the final string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl Default for IndentWriter {
    fn default() -> Self {
        Self::new(Indent::default())
    }
}
