//! Source positions for diagnostics.

use syn::spanned::Spanned;

/// A 1-based line and column in a DSL source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SourcePos {
    pub line: usize,
    pub column: usize,
}

impl SourcePos {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Start position of a syntax node.
    pub fn of<T: Spanned + ?Sized>(node: &T) -> Self {
        Self::from_span(node.span())
    }

    pub fn from_span(span: proc_macro2::Span) -> Self {
        let start = span.start();
        // LineColumn columns are 0-based
        Self {
            line: start.line,
            column: start.column + 1,
        }
    }
}

impl std::fmt::Display for SourcePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
