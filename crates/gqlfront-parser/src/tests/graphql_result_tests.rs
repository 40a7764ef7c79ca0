//! Tests for `GraphQLResult` and issue formatting.

use crate::check_valid_graphql;
use crate::has_errors;
use crate::GraphQLParser;
use crate::GraphQLResult;
use crate::Issue;
use crate::IssueCategory;
use crate::IssueKind;
use crate::IssueNote;
use crate::Severity;
use crate::SourceLocation;
use crate::smallvec;

fn location(line: usize, column: usize, start: usize, end: usize) -> SourceLocation {
    SourceLocation {
        start,
        end,
        line,
        column,
        file_path: None,
    }
}

fn warning() -> Issue {
    Issue::new(IssueKind::UnusedVariable, "Variable `$x` is never used", None)
}

fn error() -> Issue {
    Issue::new(IssueKind::UnknownType, "Unknown type `Foo`", Some(location(1, 13, 12, 15)))
}

// =============================================================================
// Result states
// =============================================================================

#[test]
fn ok_result() {
    let result = GraphQLResult::ok(7);
    assert!(result.is_ok());
    assert!(!result.has_errors());
    assert_eq!(result.valid_value(), Some(&7));
    assert_eq!(result.value_or_error().unwrap(), 7);
}

/// Warnings leave the value valid.
#[test]
fn value_with_warning_is_ok() {
    let result = GraphQLResult::with_issues("schema", vec![warning()]);
    assert!(result.is_ok());
    assert_eq!(result.valid_value(), Some(&"schema"));
    assert_eq!(result.issues().len(), 1);
    assert_eq!(result.value_or_error().unwrap(), "schema");
}

/// Errors hide the value from `valid_value` but not from `value`.
#[test]
fn value_with_error_is_not_ok() {
    let result = GraphQLResult::with_issues("schema", vec![error(), warning()]);
    assert!(!result.is_ok());
    assert!(result.has_errors());
    assert_eq!(result.valid_value(), None);
    assert_eq!(result.value(), Some(&"schema"));

    let failure = result.value_or_error().unwrap_err();
    assert_eq!(failure.issues.len(), 1, "advisory issues are not failures");
    assert_eq!(failure.issues[0].kind(), IssueKind::UnknownType);
}

#[test]
fn failure_has_no_value() {
    let result: GraphQLResult<u32> = GraphQLResult::failure(vec![error()]);
    assert_eq!(result.value(), None);
    let (value, issues) = result.into_parts();
    assert!(value.is_none());
    assert_eq!(issues.len(), 1);
}

#[test]
fn map_keeps_issues() {
    let result = GraphQLResult::with_issues(2, vec![warning()]).map(|n| n * 10);
    assert_eq!(result.value(), Some(&20));
    assert_eq!(result.issues().len(), 1);
}

#[test]
fn converts_into_std_result() {
    let ok: Result<i32, Vec<Issue>> = GraphQLResult::with_issues(1, vec![warning()]).into();
    assert_eq!(ok, Ok(1));
    let err: Result<i32, Vec<Issue>> = GraphQLResult::with_issues(1, vec![error()]).into();
    assert_eq!(err.unwrap_err().len(), 1);
}

// =============================================================================
// Issue kinds
// =============================================================================

#[test]
fn categories_and_severities() {
    assert_eq!(IssueKind::LexicalError.category(), IssueCategory::Parsing);
    assert_eq!(IssueKind::GrammarError.severity(), Severity::Error);
    assert_eq!(IssueKind::FieldsCannotMerge.category(), IssueCategory::Validation);
    assert_eq!(IssueKind::DeprecatedUsage.category(), IssueCategory::Advisory);
    assert_eq!(IssueKind::DirectiveRedefinition.severity(), Severity::Warning);

    assert!(has_errors(&[warning(), error()]));
    assert!(!has_errors(&[warning()]));
    assert!(check_valid_graphql(&[warning()]).is_ok());
    assert!(check_valid_graphql(&[error()]).is_err());
}

// =============================================================================
// Formatting
// =============================================================================

#[test]
fn formats_oneline() {
    assert_eq!(error().format_oneline(), "<input>:1:13: error: Unknown type `Foo`");
    assert_eq!(warning().format_oneline(), "warning: Variable `$x` is never used");
}

#[test]
fn formats_detailed_with_snippet_and_notes() {
    let source = "type Q { f: Foo }";
    let mut issue = error();
    issue.add_note(IssueNote::help("define `Foo` or fix the spelling"));
    let report = issue.format_detailed(Some(source));
    assert!(report.starts_with("error: Unknown type `Foo`\n  --> <input>:1:13\n"), "{report}");
    assert!(report.contains(" 1 | type Q { f: Foo }"), "{report}");
    assert!(report.contains("^^^"), "{report}");
    assert!(report.ends_with("   = help: define `Foo` or fix the spelling\n"), "{report}");

    let without_source = issue.format_detailed(None);
    assert!(!without_source.contains("type Q"));
}

#[test]
fn validation_failure_display_lists_issues() {
    let failure = check_valid_graphql(&[error(), error()]).unwrap_err();
    let text = failure.to_string();
    assert!(text.starts_with("2 GraphQL error(s):"));
    assert_eq!(text.matches("Unknown type `Foo`").count(), 2);
}

/// A parse failure formats with a caret under the offending token.
#[test]
fn parse_failure_report_points_at_token() {
    let source = "type Query {\n  hero: [String\n}";
    let result = GraphQLParser::new(source).parse_document();
    let report = result.format_issues(Some(source));
    assert!(report.contains("expected `]`, found `}`"), "{report}");
    assert!(report.contains("<input>:3:1"), "{report}");
}

#[test]
fn location_display_matches_pretty() {
    let issue = error();
    let location = issue.location().unwrap();
    assert_eq!(location.pretty(), "<input>:1:13");
    assert_eq!(location.to_string(), "<input>:1:13");
}

/// Notes are part of the serialized form, so tools reading issues as JSON
/// still see where the other half of a conflict is.
#[test]
fn serialized_issues_keep_their_notes() {
    let issue = Issue::with_notes(
        IssueKind::DuplicateDefinition,
        "type `Foo` is defined more than once",
        Some(location(3, 1, 40, 48)),
        smallvec![IssueNote::general_at("first defined here", Some(location(1, 1, 0, 8)))],
    );
    let json = serde_json::to_value(&issue).unwrap();
    assert_eq!(json["kind"], "DuplicateDefinition");
    assert_eq!(json["notes"][0]["message"], "first defined here");
    assert_eq!(json["notes"][0]["kind"], "General");
    assert_eq!(json["notes"][0]["location"]["line"], 1);
}
