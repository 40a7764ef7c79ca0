use crate::Issue;
use crate::IssueKind;
use crate::IssueNote;
use crate::IssueNotes;
use crate::GraphQLParseErrorKind;
use crate::SourceLocation;

/// A lexical or grammar error.
///
/// Scanner and parser functions return `Result<T, GraphQLParseError>` and
/// short-circuit with `?` on the first failure. The public entry points on
/// [`GraphQLParser`](crate::GraphQLParser) turn the error into a single
/// [`Issue`] via [`into_issue`](Self::into_issue); it never escapes the
/// public API as an error value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}: {message}", self.location.pretty())]
pub struct GraphQLParseError {
    message: String,
    location: SourceLocation,
    kind: GraphQLParseErrorKind,
    notes: IssueNotes,
}

impl GraphQLParseError {
    pub fn new(
        message: impl Into<String>,
        location: SourceLocation,
        kind: GraphQLParseErrorKind,
    ) -> Self {
        Self {
            message: message.into(),
            location,
            kind,
            notes: IssueNotes::new(),
        }
    }

    pub fn with_notes(
        message: impl Into<String>,
        location: SourceLocation,
        kind: GraphQLParseErrorKind,
        notes: IssueNotes,
    ) -> Self {
        Self {
            message: message.into(),
            location,
            kind,
            notes,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn kind(&self) -> &GraphQLParseErrorKind {
        &self.kind
    }

    pub fn notes(&self) -> &IssueNotes {
        &self.notes
    }

    pub fn add_help(&mut self, message: impl Into<String>) {
        self.notes.push(IssueNote::help(message));
    }

    pub fn add_spec(&mut self, url: impl Into<String>) {
        self.notes.push(IssueNote::spec(url));
    }

    /// Converts this error into the parse-stage [`Issue`] reported by the
    /// public API.
    pub fn into_issue(self) -> Issue {
        let kind = match self.kind {
            GraphQLParseErrorKind::Lexical => IssueKind::LexicalError,
            _ => IssueKind::GrammarError,
        };
        Issue::with_notes(kind, self.message, Some(self.location), self.notes)
    }
}

impl From<GraphQLParseError> for Issue {
    fn from(error: GraphQLParseError) -> Self {
        error.into_issue()
    }
}
