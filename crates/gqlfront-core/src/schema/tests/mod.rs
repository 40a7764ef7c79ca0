mod coordinate_tests;
mod key_fields_tests;

use crate::Schema;
use crate::SchemaBuilder;
use gqlfront_parser::Issue;
use gqlfront_parser::IssueKind;

/// Builds `sdl` and panics with the formatted issues if the build fails.
pub(super) fn build(sdl: &str) -> Schema {
    let (schema, issues) = SchemaBuilder::new().load_str(None, sdl).build().into_parts();
    match schema {
        Some(schema) => schema,
        None => panic!("schema build failed:\n{issues:#?}"),
    }
}

/// Builds `sdl`, expecting the build to fail, and returns its issues.
pub(super) fn build_errors(sdl: &str) -> Vec<Issue> {
    let result = SchemaBuilder::new().load_str(None, sdl).build();
    assert!(result.value().is_none(), "expected the build to fail");
    result.into_parts().1
}

pub(super) fn kinds(issues: &[Issue]) -> Vec<IssueKind> {
    issues.iter().map(Issue::kind).collect()
}
