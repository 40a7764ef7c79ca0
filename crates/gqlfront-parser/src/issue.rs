use crate::SmallVec;
use crate::SourceLocation;

/// How much an [`Issue`] matters to the caller.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub enum Severity {
    Warning,
    Error,
}

/// The stage (or kind of rule) that produced an [`Issue`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub enum IssueCategory {
    /// Lexical or grammar errors. A document with one of these has no AST.
    Parsing,

    /// Violations of a GraphQL validation rule.
    Validation,

    /// Tool-specific advice. Never blocks a schema or a document.
    Advisory,
}

/// The closed set of diagnostics produced by the parser, the schema builder,
/// and the executable validator.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub enum IssueKind {
    // Parsing
    LexicalError,
    GrammarError,

    // Validation
    AnonymousOperation,
    DuplicateArgument,
    DuplicateDefinition,
    DuplicateDeferLabel,
    FieldsCannotMerge,
    InvalidConnectionFields,
    InvalidDefer,
    InvalidDirectiveLocation,
    InvalidExtension,
    InvalidFragmentSpread,
    InvalidImplementation,
    InvalidKeyFields,
    InvalidLink,
    InvalidRootType,
    InvalidSelection,
    InvalidTypeDefinition,
    InvalidValue,
    InvalidVariableUsage,
    MissingArgument,
    NoQueryType,
    NonRepeatableDirective,
    ReservedName,
    UndefinedVariable,
    UnknownArgument,
    UnknownDirective,
    UnknownField,
    UnknownFragment,
    UnknownType,

    // Advisory
    DeprecatedUsage,
    DirectiveRedefinition,
    UnusedVariable,
}

impl IssueKind {
    pub fn category(&self) -> IssueCategory {
        match self {
            Self::LexicalError | Self::GrammarError => IssueCategory::Parsing,
            Self::DeprecatedUsage | Self::DirectiveRedefinition | Self::UnusedVariable => {
                IssueCategory::Advisory
            },
            _ => IssueCategory::Validation,
        }
    }

    pub fn severity(&self) -> Severity {
        match self.category() {
            IssueCategory::Advisory => Severity::Warning,
            IssueCategory::Parsing | IssueCategory::Validation => Severity::Error,
        }
    }
}

/// Determines how an [`IssueNote`] is rendered.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub enum IssueNoteKind {
    General,
    Help,
    Spec,
}

/// Additional context attached to an [`Issue`], optionally pointing at a
/// related location (e.g. the first of two duplicate definitions).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct IssueNote {
    pub kind: IssueNoteKind,
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl IssueNote {
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            kind: IssueNoteKind::General,
            message: message.into(),
            location: None,
        }
    }

    pub fn general_at(message: impl Into<String>, location: Option<SourceLocation>) -> Self {
        Self {
            kind: IssueNoteKind::General,
            message: message.into(),
            location,
        }
    }

    pub fn help(message: impl Into<String>) -> Self {
        Self {
            kind: IssueNoteKind::Help,
            message: message.into(),
            location: None,
        }
    }

    pub fn spec(url: impl Into<String>) -> Self {
        Self {
            kind: IssueNoteKind::Spec,
            message: url.into(),
            location: None,
        }
    }
}

/// Most issues carry zero to two notes.
pub type IssueNotes = SmallVec<[IssueNote; 2]>;

/// A single diagnostic: a kind, a human-readable message, and the location
/// it applies to.
#[derive(Clone, Debug, PartialEq, serde::Serialize, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct Issue {
    kind: IssueKind,
    message: String,
    location: Option<SourceLocation>,
    notes: IssueNotes,
}

impl Issue {
    pub fn new(
        kind: IssueKind,
        message: impl Into<String>,
        location: Option<SourceLocation>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            location,
            notes: IssueNotes::new(),
        }
    }

    pub fn with_notes(
        kind: IssueKind,
        message: impl Into<String>,
        location: Option<SourceLocation>,
        notes: IssueNotes,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            location,
            notes,
        }
    }

    pub fn kind(&self) -> IssueKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    pub fn notes(&self) -> &IssueNotes {
        &self.notes
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn add_note(&mut self, note: IssueNote) {
        self.notes.push(note);
    }

    /// Formats this issue as a single line:
    ///
    /// ```text
    /// schema.graphqls:5:12: error: Unknown type `Foo`
    /// ```
    pub fn format_oneline(&self) -> String {
        let prefix = severity_label(self.severity());
        match &self.location {
            Some(location) => format!("{}: {prefix}: {}", location.pretty(), self.message),
            None => format!("{prefix}: {}", self.message),
        }
    }

    /// Formats this issue as a multi-line diagnostic:
    ///
    /// ```text
    /// error: Unknown type `Foo`
    ///   --> schema.graphqls:5:12
    ///    |
    ///  5 |     user: Foo
    ///    |           ^^^
    ///    = note: ...
    /// ```
    ///
    /// When `source` is `None`, snippets are omitted but the location line is
    /// still shown.
    pub fn format_detailed(&self, source: Option<&str>) -> String {
        let mut output = String::new();

        output.push_str(severity_label(self.severity()));
        output.push_str(": ");
        output.push_str(&self.message);
        output.push('\n');

        if let Some(location) = &self.location {
            output.push_str(&format!("  --> {}\n", location.pretty()));
            if let Some(src) = source
                && let Some(snippet) = format_source_snippet(src, location)
            {
                output.push_str(&snippet);
            }
        }

        for note in &self.notes {
            let prefix = match note.kind {
                IssueNoteKind::General => "note",
                IssueNoteKind::Help => "help",
                IssueNoteKind::Spec => "spec",
            };
            output.push_str(&format!("   = {prefix}: {}\n", note.message));

            if let (Some(note_location), Some(src)) = (&note.location, source)
                && let Some(snippet) = format_note_snippet(src, note_location)
            {
                output.push_str(&snippet);
            }
        }

        output
    }

    /// Like [`format_detailed`](Self::format_detailed), but reads the source
    /// snippet back from the issue's file path. Falls back to a snippet-less
    /// report when the file can't be read.
    pub fn format_with_file_preview(&self) -> String {
        let source = self
            .location
            .as_ref()
            .and_then(|location| location.file_path())
            .and_then(|path| std::fs::read_to_string(path).ok());
        self.format_detailed(source.as_deref())
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

fn format_source_snippet(source: &str, location: &SourceLocation) -> Option<String> {
    let line_content = source.lines().nth(location.line.checked_sub(1)?)?;
    let line_num_width = location.line.to_string().len().max(2);
    let padding = location.column.saturating_sub(1);
    let underline_len = source
        .get(location.start..location.end)
        .map(|text| text.lines().next().unwrap_or("").chars().count())
        .unwrap_or(0)
        .max(1);

    let mut output = String::new();
    output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
    output.push_str(&format!(
        "{:>line_num_width$} | {line_content}\n",
        location.line,
    ));
    output.push_str(&format!(
        "{:>width$} | {:>padding$}{}\n",
        "",
        "",
        "^".repeat(underline_len),
        width = line_num_width,
    ));
    Some(output)
}

fn format_note_snippet(source: &str, location: &SourceLocation) -> Option<String> {
    let line_content = source.lines().nth(location.line.checked_sub(1)?)?;
    let line_num_width = location.line.to_string().len().max(2);
    let padding = location.column.saturating_sub(1);

    let mut output = String::new();
    output.push_str(&format!(
        "     {:>line_num_width$} | {line_content}\n",
        location.line,
    ));
    output.push_str(&format!(
        "     {:>width$} | {:>padding$}-\n",
        "",
        "",
        width = line_num_width,
    ));
    Some(output)
}

/// Returns `true` if any issue in `issues` has error severity.
pub fn has_errors(issues: &[Issue]) -> bool {
    issues.iter().any(Issue::is_error)
}

/// Returned by [`check_valid_graphql`] when parsing or validation errors are
/// present.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{}", format_failure(&self.issues))]
pub struct GraphQLValidationFailure {
    pub issues: Vec<Issue>,
}

fn format_failure(issues: &[Issue]) -> String {
    let mut output = format!("{} GraphQL error(s):", issues.len());
    for issue in issues {
        output.push_str("\n  ");
        output.push_str(&issue.format_oneline());
    }
    output
}

/// Fails if `issues` contains any parsing or validation issue. Advisory
/// issues (deprecations, unused variables, redefined builtin directives)
/// are ignored.
pub fn check_valid_graphql(issues: &[Issue]) -> Result<(), GraphQLValidationFailure> {
    let errors: Vec<Issue> = issues
        .iter()
        .filter(|issue| issue.kind().category() != IssueCategory::Advisory)
        .cloned()
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(GraphQLValidationFailure { issues: errors })
    }
}
