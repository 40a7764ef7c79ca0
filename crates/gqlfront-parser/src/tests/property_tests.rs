//! Property tests for the scanner, parser, and SDL writer.

use crate::ast;
use crate::ast::Node;
use crate::scanner::normalize_block_string;
use crate::GraphQLParser;
use crate::ParserOptions;
use proptest::prelude::*;

fn parse_without_locations(source: &str) -> Option<ast::Document> {
    let options = ParserOptions::new().with_source_locations(false);
    GraphQLParser::with_options(source, options).parse_document().into_value()
}

/// Writes a scalar described by `description` and reads the description back.
fn description_round_trip(description: &str) -> Option<String> {
    let document = ast::Document {
        definitions: vec![ast::Definition::Type(ast::TypeDefinition::Scalar(
            ast::ScalarTypeDefinition {
                description: Some(description.to_string()),
                name: "Date".to_string(),
                directives: Vec::new(),
                source_location: None,
            },
        ))],
        source_location: None,
    };
    let reparsed = parse_without_locations(&document.to_sdl())?;
    match reparsed.definitions.first()? {
        ast::Definition::Type(definition) => definition.description().map(str::to_string),
        _ => None,
    }
}

fn type_ref() -> impl Strategy<Value = String> {
    let named = prop::sample::select(vec!["Int", "String", "User", "ID"]).prop_map(String::from);
    named.prop_recursive(3, 8, 1, |inner| {
        prop_oneof![
            inner.clone().prop_map(|ty| format!("[{ty}]")),
            inner.prop_map(|ty| if ty.ends_with('!') { ty } else { format!("{ty}!") }),
        ]
    })
}

fn field_name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,6}"
}

/// A small object type with generated field names and types.
fn object_type() -> impl Strategy<Value = String> {
    prop::collection::vec((field_name(), type_ref()), 1..5).prop_map(|fields| {
        let body: Vec<String> = fields
            .into_iter()
            .map(|(name, ty)| format!("{name}: {ty}"))
            .collect();
        format!("type Generated {{ {} }}", body.join(" "))
    })
}

proptest! {
    /// Any input yields either a document or exactly one issue; the parser
    /// never panics.
    #[test]
    fn parser_never_panics(source in any::<String>()) {
        let result = GraphQLParser::new(&source).parse_document();
        if result.value().is_none() {
            prop_assert_eq!(result.issues().len(), 1);
        }
    }

    /// Input built from GraphQL punctuation and keywords stresses the grammar
    /// paths more than arbitrary text does.
    #[test]
    fn parser_never_panics_on_token_soup(
        tokens in prop::collection::vec(
            prop::sample::select(vec![
                "{", "}", "(", ")", "[", "]", ":", "!", "$", "@", "...", "=", "|", "&",
                "type", "query", "fragment", "on", "extend", "schema", "enum", "input",
                "a", "1", "2.5", "\"s\"", "\"\"\"b\"\"\"", "true", "null",
            ]),
            0..40,
        ),
    ) {
        let source = tokens.join(" ");
        let result = GraphQLParser::new(&source).parse_document();
        prop_assert!(result.value().is_some() || result.issues().len() == 1);
    }

    #[test]
    fn normalized_block_strings_are_trimmed(raw in "[ \ta-c\r\n]{0,40}") {
        let normalized = normalize_block_string(&raw);
        prop_assert!(!normalized.contains('\r'));
        let lines: Vec<&str> = normalized.split('\n').collect();
        if !normalized.is_empty() {
            prop_assert!(!lines[0].trim_matches([' ', '\t']).is_empty());
            prop_assert!(!lines[lines.len() - 1].trim_matches([' ', '\t']).is_empty());
        }
    }

    /// Normalizing twice is a no-op whenever the first line survives the
    /// first pass. (When leading blank lines are dropped, a line that was
    /// indented relative to the new first line loses that indent on a second
    /// pass, so the claim doesn't hold there.)
    #[test]
    fn block_string_normalization_is_idempotent(
        first in "[a-c][ \ta-c]{0,5}",
        rest in "[ \ta-c\r\n]{0,40}",
    ) {
        let once = normalize_block_string(&format!("{first}\n{rest}"));
        prop_assert_eq!(normalize_block_string(&once), once);
    }

    /// A normalized value written as a description reads back unchanged.
    #[test]
    fn normalized_block_strings_survive_sdl(raw in "[ \ta-c\n\"\\\\]{0,40}") {
        let value = normalize_block_string(&raw);
        prop_assert_eq!(description_round_trip(&value), Some(value));
    }

    /// Writing a generated type definition and parsing it back reproduces the
    /// same tree.
    #[test]
    fn sdl_round_trips_object_types(source in object_type()) {
        let document = parse_without_locations(&source).expect("generated source parses");
        let reparsed = parse_without_locations(&document.to_sdl());
        prop_assert_eq!(reparsed, Some(document));
    }

    /// Any printable description survives a trip through the writer, whether
    /// it's written as a block string or an escaped string.
    #[test]
    fn sdl_round_trips_descriptions(description in "[ -~\t\n]{0,40}") {
        prop_assert_eq!(description_round_trip(&description), Some(description));
    }

    #[test]
    fn numbers_round_trip(int in any::<i32>(), float in -1e300f64..1e300f64) {
        for value in [
            ast::Value::Int(ast::IntValue { value: int, source_location: None }),
            ast::Value::Float(ast::FloatValue { value: float, source_location: None }),
        ] {
            let text = Node::Value(value.clone()).to_sdl();
            let reparsed = GraphQLParser::new(&text).parse_value().into_value();
            prop_assert!(reparsed.is_some_and(|parsed| parsed.same_value(&value)), "{}", text);
        }
    }
}
