//! Code builder utility for generating properly indented sources.

use super::Indent;

/// Fluent API for building generated text with proper indentation.
///
/// # Example
///
/// ```
/// use tessera_core::CodeBuilder;
///
/// let mut builder = CodeBuilder::new(Default::default());
/// builder
///     .push_line(":root {")
///     .push_indent()
///     .push_line("--one: red;")
///     .push_dedent()
///     .push_line("}");
///
/// assert_eq!(builder.build(), ":root {\n  --one: red;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    unit: String,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            unit: indent.unit(),
            buffer: String::new(),
        }
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a line comment using the given marker (e.g. `//`).
    pub fn push_comment(&mut self, marker: &str, text: &str) -> &mut Self {
        for line in text.lines() {
            self.write_indent();
            self.buffer.push_str(marker);
            self.buffer.push(' ');
            self.buffer.push_str(line);
            self.buffer.push('\n');
        }
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Consume the builder and return the generated text.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(&self.unit);
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::new(Indent::default())
    }
}
