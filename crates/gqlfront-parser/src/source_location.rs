use std::fmt;
use std::sync::Arc;

/// A span of source text attached to AST nodes, tokens, and
/// [`Issue`](crate::Issue)s.
///
/// `start`/`end` are byte offsets into the source text (end exclusive).
/// `line` and `column` describe the start of the span and are 1-based, with
/// the column counted in characters rather than bytes so that it lines up
/// with what an editor shows.
///
/// The optional file path is shared (`Arc`) because every node parsed from
/// one file points at the same path.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub struct SourceLocation {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    pub file_path: Option<Arc<str>>,
}

impl SourceLocation {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
            file_path: None,
        }
    }

    pub fn with_file_path(
        start: usize,
        end: usize,
        line: usize,
        column: usize,
        file_path: Arc<str>,
    ) -> Self {
        Self {
            start,
            end,
            line,
            column,
            file_path: Some(file_path),
        }
    }

    /// Returns the file path, if this location came from a named file.
    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    /// Returns `file:line:column`, using `<input>` when no file path is
    /// known.
    pub fn pretty(&self) -> String {
        format!(
            "{}:{}:{}",
            self.file_path().unwrap_or("<input>"),
            self.line,
            self.column,
        )
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}
