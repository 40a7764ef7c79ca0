//! Shared helpers for parser-crate tests.

use crate::ast;
use crate::scanner::Scanner;
use crate::token::GraphQLTokenKind;
use crate::GraphQLParser;
use crate::Issue;
use crate::ParserOptions;

/// Parses `source`, panicking with the formatted issues if it fails.
pub fn parse_doc(source: &str) -> ast::Document {
    let result = GraphQLParser::new(source).parse_document();
    let report = result.format_issues(Some(source));
    match result.into_value() {
        Some(document) => document,
        None => panic!("expected `{source}` to parse:\n{report}"),
    }
}

/// Parses `source` without source locations, so documents can be compared
/// structurally.
pub fn parse_doc_without_locations(source: &str) -> ast::Document {
    let options = ParserOptions::new().with_source_locations(false);
    let result = GraphQLParser::with_options(source, options).parse_document();
    let report = result.format_issues(Some(source));
    match result.into_value() {
        Some(document) => document,
        None => panic!("expected `{source}` to parse:\n{report}"),
    }
}

/// Parses `source` and returns the single issue it must produce.
pub fn parse_error(source: &str) -> Issue {
    let result = GraphQLParser::new(source).parse_document();
    assert!(result.value().is_none(), "expected `{source}` to fail to parse");
    let mut issues = result.into_parts().1;
    assert_eq!(issues.len(), 1, "expected exactly one issue: {issues:?}");
    issues.remove(0)
}

/// Scans every token of `source` up to (not including) `Eof`.
pub fn scan_kinds(source: &str) -> Vec<GraphQLTokenKind> {
    let mut scanner = Scanner::new(source);
    let mut kinds = Vec::new();
    loop {
        let token = scanner.scan().expect("scan failed");
        if token.kind == GraphQLTokenKind::Eof {
            return kinds;
        }
        kinds.push(token.kind);
    }
}

pub fn name(text: &str) -> GraphQLTokenKind {
    GraphQLTokenKind::Name(text.to_string())
}

/// The only definition of `document`, which must be an object type.
pub fn single_object(document: &ast::Document) -> &ast::ObjectTypeDefinition {
    match document.definitions.as_slice() {
        [ast::Definition::Type(ast::TypeDefinition::Object(object))] => object,
        other => panic!("expected a single object type, got {other:?}"),
    }
}

/// The only definition of `document`, which must be an operation.
pub fn single_operation(document: &ast::Document) -> &ast::OperationDefinition {
    match document.definitions.as_slice() {
        [ast::Definition::Operation(op)] => op,
        other => panic!("expected a single operation, got {other:?}"),
    }
}
