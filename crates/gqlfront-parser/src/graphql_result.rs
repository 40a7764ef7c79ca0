//! Result type for parsing and validation passes that may produce a value,
//! issues, or both.

use crate::Issue;
use crate::check_valid_graphql;
use crate::has_errors;
use crate::GraphQLValidationFailure;

/// The tri-state outcome of a parse or a validation pass.
///
/// Unlike `Result<T, E>`, a `GraphQLResult` can carry a value *and* issues.
/// A document that parses but fails validation, or a schema that builds with
/// warnings, are both represented this way. A result never carries neither:
/// a missing value always comes with at least one issue.
///
/// # Accessing the value
///
/// - [`valid_value()`](Self::valid_value) returns the value only when no
///   error-severity issue is present.
/// - [`value()`](Self::value) returns the value regardless of issues.
///
/// # Example
///
/// ```
/// # use gqlfront_parser::GraphQLParser;
/// let source = "type Query { hero: String }";
/// let result = GraphQLParser::new(source).parse_document();
///
/// if let Some(document) = result.valid_value() {
///     assert_eq!(document.definitions.len(), 1);
/// }
/// if result.has_errors() {
///     eprintln!("{}", result.format_issues(Some(source)));
/// }
/// ```
#[derive(Clone, Debug)]
pub struct GraphQLResult<V> {
    value: Option<V>,
    issues: Vec<Issue>,
}

impl<V> GraphQLResult<V> {
    /// A successful result with no issues.
    pub fn ok(value: V) -> Self {
        Self {
            value: Some(value),
            issues: Vec::new(),
        }
    }

    /// A result carrying both a value and the issues found while producing
    /// it.
    pub fn with_issues(value: V, issues: Vec<Issue>) -> Self {
        Self {
            value: Some(value),
            issues,
        }
    }

    /// A result with no value.
    pub fn failure(issues: Vec<Issue>) -> Self {
        debug_assert!(
            !issues.is_empty(),
            "a GraphQLResult without a value must carry at least one issue",
        );
        Self {
            value: None,
            issues,
        }
    }

    /// Returns the value only if no error-severity issue is present.
    pub fn valid_value(&self) -> Option<&V> {
        if self.has_errors() {
            None
        } else {
            self.value.as_ref()
        }
    }

    /// Returns the value if present, regardless of issues.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Consuming version of [`value()`](Self::value).
    pub fn into_value(self) -> Option<V> {
        self.value
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_parts(self) -> (Option<V>, Vec<Issue>) {
        (self.value, self.issues)
    }

    /// Returns `true` if a value is present and no issue has error severity.
    pub fn is_ok(&self) -> bool {
        self.value.is_some() && !self.has_errors()
    }

    /// Returns `true` if any issue has error severity.
    pub fn has_errors(&self) -> bool {
        has_errors(&self.issues)
    }

    /// Returns the value, or an error listing every parsing and validation
    /// issue. Advisory issues never cause a failure.
    pub fn value_or_error(self) -> Result<V, GraphQLValidationFailure> {
        check_valid_graphql(&self.issues)?;
        match self.value {
            Some(value) => Ok(value),
            None => Err(GraphQLValidationFailure { issues: self.issues }),
        }
    }

    /// Maps the value (if any), keeping the issues.
    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> GraphQLResult<U> {
        GraphQLResult {
            value: self.value.map(f),
            issues: self.issues,
        }
    }

    /// Formats all issues for display, one detailed report per issue.
    pub fn format_issues(&self, source: Option<&str>) -> String {
        self.issues
            .iter()
            .map(|issue| issue.format_detailed(source))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<V> From<GraphQLResult<V>> for Result<V, Vec<Issue>> {
    /// Converts to a standard `Result`, treating any error-severity issue as
    /// a failure even when a value is present.
    fn from(result: GraphQLResult<V>) -> Self {
        if result.has_errors() {
            return Err(result.issues);
        }
        match result.value {
            Some(value) => Ok(value),
            None => Err(result.issues),
        }
    }
}
