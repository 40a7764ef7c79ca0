//! `@defer` rules that span a whole document.
//!
//! Labels must be unique across the document; an unlabeled `@defer` only
//! needs a distinct path within its own operation.
//!
//! A fragment spread from several places visits the same `@defer` node more
//! than once; nodes are identified by address so that revisiting one is not
//! mistaken for a second use.

use gqlfront_parser::ast;
use gqlfront_parser::ast::OperationKind;
use gqlfront_parser::Issue;
use gqlfront_parser::IssueKind;
use gqlfront_parser::IssueNote;
use gqlfront_parser::SourceLocation;
use gqlfront_parser::smallvec;
use std::collections::HashMap;

fn node_id(directive: &ast::Directive) -> usize {
    directive as *const ast::Directive as usize
}

struct FirstUse {
    node: usize,
    location: Option<SourceLocation>,
}

#[derive(Default)]
pub(super) struct DeferTracker {
    labels: HashMap<String, FirstUse>,
    unlabeled_paths: HashMap<String, FirstUse>,
}

impl DeferTracker {
    /// Forgets the unlabeled paths seen so far. Called before each operation.
    pub fn start_operation(&mut self) {
        self.unlabeled_paths.clear();
    }

    /// Checks a `@defer` application at `path` (response keys joined with
    /// `.`, empty at an operation's root).
    pub fn visit(
        &mut self,
        directive: &ast::Directive,
        path: &str,
        operation_kind: OperationKind,
        issues: &mut Vec<Issue>,
    ) {
        let location = directive.source_location.clone();

        if path.is_empty() && operation_kind != OperationKind::Query && !is_disabled(directive) {
            issues.push(Issue::new(
                IssueKind::InvalidDefer,
                format!("`@defer` cannot be used on the root selection set of a {operation_kind}"),
                location.clone(),
            ));
        }

        let label = match directive.argument("label").map(|argument| &argument.value) {
            None | Some(ast::Value::Null(_)) => None,
            Some(ast::Value::String(label)) => Some(label.value.as_str()),
            Some(ast::Value::Variable(variable)) => {
                issues.push(Issue::new(
                    IssueKind::InvalidDefer,
                    format!("`@defer(label:)` must be a string literal, not the variable `${}`", variable.name),
                    location,
                ));
                return;
            },
            // Wrong literal kinds are reported by argument coercion.
            Some(_) => return,
        };

        let node = node_id(directive);
        let Some(label) = label else {
            match self.unlabeled_paths.get(path) {
                Some(first) if first.node != node => issues.push(Issue::with_notes(
                    IssueKind::InvalidDefer,
                    format!("`@defer` without a label is used more than once at `{}`", display_path(path)),
                    location,
                    smallvec![IssueNote::general_at("first used here", first.location.clone())],
                )),
                Some(_) => (),
                None => {
                    self.unlabeled_paths.insert(path.to_string(), FirstUse { node, location });
                },
            }
            return;
        };

        if !is_valid_label(label) {
            issues.push(Issue::new(
                IssueKind::InvalidDefer,
                format!("`@defer` label `{label}` may only contain letters, digits, and underscores"),
                location.clone(),
            ));
        }
        match self.labels.get(label) {
            Some(first) if first.node != node => issues.push(Issue::with_notes(
                IssueKind::DuplicateDeferLabel,
                format!("`@defer` label `{label}` is used more than once"),
                location,
                smallvec![IssueNote::general_at("first used here", first.location.clone())],
            )),
            Some(_) => (),
            None => {
                self.labels.insert(label.to_string(), FirstUse { node, location });
            },
        }
    }
}

/// `@defer(if: false)` defers nothing.
fn is_disabled(directive: &ast::Directive) -> bool {
    matches!(
        directive.argument("if").map(|argument| &argument.value),
        Some(ast::Value::Boolean(condition)) if !condition.value,
    )
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty() && label.chars().all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "the root" } else { path }
}
