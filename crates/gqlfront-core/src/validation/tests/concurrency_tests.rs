//! One `Schema` shared by validators on many threads.

use crate::validation::tests::error_kinds;
use crate::validation::tests::parse;
use crate::validation::tests::schema;
use crate::ExecutableValidator;
use gqlfront_parser::IssueKind;
use rayon::prelude::*;

/// Every eighth operation selects a field that doesn't exist.
fn operation(index: usize) -> String {
    let field = if index % 8 == 0 { "height" } else { "name" };
    format!(
        r#"
        query Op{index}($id: ID!) {{
          user(id: $id) {{ id friends(first: {index}) {{ name }} }}
          hero {{ {field} ... on Human {{ height }} }}
        }}
        "#,
    )
}

#[test]
fn validates_against_a_shared_schema_in_parallel() {
    let schema = schema();
    let results: Vec<(usize, Vec<IssueKind>)> = (0..256)
        .into_par_iter()
        .map(|index| {
            let document = parse(&operation(index));
            let result = ExecutableValidator::new(schema).validate(&document);
            (index, error_kinds(&result.issues))
        })
        .collect();

    assert_eq!(results.len(), 256);
    for (index, kinds) in results {
        if index % 8 == 0 {
            assert_eq!(kinds, vec![IssueKind::UnknownField], "operation {index}");
        } else {
            assert!(kinds.is_empty(), "operation {index}: {kinds:?}");
        }
    }
}

#[test]
fn parallel_results_match_sequential_results() {
    let schema = schema();
    let documents: Vec<_> = (0..64).map(|index| parse(&operation(index))).collect();
    let validator = ExecutableValidator::new(schema).strict_response_shapes(true);

    let sequential: Vec<_> = documents
        .iter()
        .map(|document| validator.validate(document).issues)
        .collect();
    let parallel: Vec<_> = documents
        .par_iter()
        .map(|document| validator.validate(document).issues)
        .collect();
    assert_eq!(sequential, parallel);
}
