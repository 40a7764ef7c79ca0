use crate::builtins::parse_embedded;
use gqlfront_parser::ast;
use gqlfront_parser::GraphQLParser;
use gqlfront_parser::GraphQLResult;
use gqlfront_parser::ParserOptions;
use std::sync::OnceLock;

const CACHE_POLICY_SDL: &str = r#"
directive @typePolicy(
  keyFields: String! = ""
  connectionFields: String! = ""
) on OBJECT | INTERFACE | UNION

directive @fieldPolicy(forField: String!, keyArgs: String! = "") repeatable on OBJECT | INTERFACE

directive @nonnull(fields: String! = "") on OBJECT | INTERFACE | FIELD
"#;

/// A versioned set of definitions that a schema can pull in with
/// `@link(url: ".../<name>/<version>")`.
///
/// Linked definitions are renamed under a prefix unless imported by name, so
/// several foreign schemas can coexist with the user's own names.
#[derive(Clone, Debug, PartialEq)]
pub struct ForeignSchema {
    pub name: String,
    pub version: String,
    pub definitions: Vec<ast::Definition>,

    /// Directives (named without `@`) that only make sense to this tooling
    /// and must be removed from documents before they go over the wire.
    pub directives_to_strip: Vec<String>,
}

impl ForeignSchema {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        definitions: Vec<ast::Definition>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            definitions,
            directives_to_strip: Vec::new(),
        }
    }

    /// Parses `sdl` into a foreign schema. Executable definitions are
    /// dropped.
    pub fn from_sdl(
        name: impl Into<String>,
        version: impl Into<String>,
        sdl: &str,
    ) -> GraphQLResult<Self> {
        let name = name.into();
        let version = version.into();
        let options = ParserOptions::new().file_path(format!("<{name}/{version}>"));
        GraphQLParser::with_options(sdl, options)
            .parse_document()
            .map(|document| {
                let definitions = document
                    .definitions
                    .into_iter()
                    .filter(|definition| !definition.is_executable())
                    .collect();
                Self::new(name, version, definitions)
            })
    }

    pub fn strip_directive(mut self, name: impl Into<String>) -> Self {
        self.directives_to_strip.push(name.into());
        self
    }

    /// The `cache/v0.1` schema: `@typePolicy`, `@fieldPolicy`, and
    /// `@nonnull`.
    pub fn cache_policy() -> Self {
        static DEFINITIONS: OnceLock<Vec<ast::Definition>> = OnceLock::new();
        let definitions = DEFINITIONS.get_or_init(|| parse_embedded(CACHE_POLICY_SDL, "<cache/v0.1>"));
        Self::new("cache", "v0.1", definitions.clone()).strip_directive("nonnull")
    }

    /// Whether this schema defines `name`. Directive names carry their
    /// leading `@`.
    pub(crate) fn defines(&self, name: &str) -> bool {
        self.definitions
            .iter()
            .any(|definition| qualified_name(definition).is_some_and(|defined| defined == name))
    }
}

/// A definition's name as it appears in `@link` imports: `@name` for
/// directives, the bare name for types.
pub(crate) fn qualified_name(definition: &ast::Definition) -> Option<String> {
    match definition {
        ast::Definition::Directive(directive) => Some(format!("@{}", directive.name)),
        ast::Definition::Type(type_definition) => Some(type_definition.name().to_string()),
        _ => None,
    }
}
