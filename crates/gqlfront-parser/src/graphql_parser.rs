//! Recursive descent parser for GraphQL documents.
//!
//! [`GraphQLParser`] reads tokens from a [`Scanner`] through a buffered
//! token stream with one token of lookahead past the current one. Every
//! grammar rule has a `parse_*`-style method returning
//! `Result<T, GraphQLParseError>`; the first lexical or grammar error
//! short-circuits with `?` all the way to the public entry point, which
//! turns it into a single [`Issue`](crate::Issue).

use crate::ast;
use crate::ast::DirectiveLocation;
use crate::ast::OperationKind;
use crate::graphql_token_stream::GraphQLTokenStream;
use crate::scanner::Scanner;
use crate::smallvec;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use crate::GraphQLParseError;
use crate::GraphQLParseErrorKind;
use crate::GraphQLResult;
use crate::IssueNote;
use crate::SourceLocation;
use std::sync::Arc;

type ParseResult<T> = Result<T, GraphQLParseError>;

// =============================================================================
// Options
// =============================================================================

/// Configuration for a [`GraphQLParser`].
#[derive(Clone, Debug)]
pub struct ParserOptions {
    /// Accept a document with no definitions. Off by default.
    pub allow_empty_documents: bool,

    /// Attach a [`SourceLocation`] to every node. On by default; turning it
    /// off makes every node's `source_location` `None`, which is cheaper for
    /// repeated parses of generated text.
    pub with_source_locations: bool,

    /// Logical file path, used only in diagnostics.
    pub file_path: Option<Arc<str>>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            allow_empty_documents: false,
            with_source_locations: true,
            file_path: None,
        }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_empty_documents(mut self, allow: bool) -> Self {
        self.allow_empty_documents = allow;
        self
    }

    pub fn with_source_locations(mut self, keep: bool) -> Self {
        self.with_source_locations = keep;
        self
    }

    pub fn file_path(mut self, file_path: impl Into<Arc<str>>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }
}

/// Context for parsing values, determining whether variables are allowed.
#[derive(Clone, Copy, Debug)]
enum ConstContext {
    /// Variables are allowed (e.g., field arguments in operations).
    AllowVariables,
    /// Parsing a default value for a variable definition.
    VariableDefaultValue,
    /// Parsing a directive argument in a const context.
    DirectiveArgument,
    /// Parsing a default value for an input field or argument definition.
    InputDefaultValue,
}

impl ConstContext {
    fn allows_variables(&self) -> bool {
        matches!(self, Self::AllowVariables)
    }

    fn description(&self) -> &'static str {
        match self {
            Self::AllowVariables => "this position",
            Self::VariableDefaultValue => "variable default values",
            Self::DirectiveArgument => "type-system directive arguments",
            Self::InputDefaultValue => "input value default values",
        }
    }
}

/// Where a node starts; closed into a [`SourceLocation`] once the node's last
/// token has been consumed.
#[derive(Clone, Copy, Debug)]
struct NodeStart {
    offset: usize,
    line: usize,
    column: usize,
}

// =============================================================================
// Parser
// =============================================================================

/// A recursive descent parser for GraphQL documents.
///
/// A parser is constructed over one source text and consumed by exactly one
/// of the `parse_*` entry points.
///
/// ```
/// use gqlfront_parser::ast;
/// use gqlfront_parser::GraphQLParser;
///
/// let result = GraphQLParser::new("type Query { hero: String }").parse_document();
/// let document = result.valid_value().unwrap();
/// assert!(matches!(
///     &document.definitions[0],
///     ast::Definition::Type(ast::TypeDefinition::Object(object)) if object.name == "Query",
/// ));
/// ```
pub struct GraphQLParser<'src> {
    token_stream: GraphQLTokenStream<'src>,
    options: ParserOptions,

    /// Shared nesting depth of values, selection sets, and type references.
    recursion_depth: usize,
}

impl<'src> GraphQLParser<'src> {
    /// Maximum nesting depth for recursive parsing (values, selection sets,
    /// and type references). Guards against stack overflow on inputs like
    /// `[[[[[...`.
    const MAX_RECURSION_DEPTH: usize = 64;

    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, ParserOptions::default())
    }

    pub fn with_options(source: &'src str, options: ParserOptions) -> Self {
        let scanner = Scanner::with_file_path(source, options.file_path.clone());
        Self {
            token_stream: GraphQLTokenStream::new(scanner),
            options,
            recursion_depth: 0,
        }
    }

    // =========================================================================
    // Public entry points
    // =========================================================================

    /// Parses a complete document of executable and/or type-system
    /// definitions.
    pub fn parse_document(mut self) -> GraphQLResult<ast::Document> {
        Self::into_result(self.document())
    }

    /// Parses a single value, e.g. `{ id: 1, tags: ["a"] }`. Variables are
    /// accepted.
    pub fn parse_value(mut self) -> GraphQLResult<ast::Value> {
        let result = self.value(ConstContext::AllowVariables);
        Self::into_result(result.and_then(|value| {
            self.expect_eof()?;
            Ok(value)
        }))
    }

    /// Parses a type reference, e.g. `[User!]!`.
    pub fn parse_type(mut self) -> GraphQLResult<ast::Type> {
        let result = self.type_ref();
        Self::into_result(result.and_then(|ty| {
            self.expect_eof()?;
            Ok(ty)
        }))
    }

    /// Parses a selection set, with or without the surrounding braces.
    ///
    /// `"id name"` and `"{ id name }"` both produce two field selections;
    /// empty input produces none.
    pub fn parse_selections(mut self) -> GraphQLResult<Vec<ast::Selection>> {
        Self::into_result(self.selections_entry())
    }

    fn into_result<T>(result: ParseResult<T>) -> GraphQLResult<T> {
        match result {
            Ok(value) => GraphQLResult::ok(value),
            Err(error) => GraphQLResult::failure(vec![error.into_issue()]),
        }
    }

    fn selections_entry(&mut self) -> ParseResult<Vec<ast::Selection>> {
        let selections = if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen)? {
            self.selection_set()?
        } else {
            let mut selections = Vec::new();
            while !self.peek_is(&GraphQLTokenKind::Eof)? {
                selections.push(self.selection()?);
            }
            selections
        };
        self.expect_eof()?;
        Ok(selections)
    }

    // =========================================================================
    // Locations and errors
    // =========================================================================

    fn node_start(&mut self) -> ParseResult<NodeStart> {
        let token = self.token_stream.peek()?;
        Ok(NodeStart {
            offset: token.start,
            line: token.line,
            column: token.column,
        })
    }

    /// The span from `start` to the end of the last consumed token.
    fn span_from(&self, start: NodeStart) -> SourceLocation {
        SourceLocation {
            start: start.offset,
            end: self.token_stream.last_end().max(start.offset),
            line: start.line,
            column: start.column,
            file_path: self.options.file_path.clone(),
        }
    }

    /// Like [`span_from`](Self::span_from) but honors
    /// `with_source_locations`.
    fn location(&self, start: NodeStart) -> Option<SourceLocation> {
        self.options
            .with_source_locations
            .then(|| self.span_from(start))
    }

    fn token_location(&self, token: &GraphQLToken) -> SourceLocation {
        SourceLocation {
            start: token.start,
            end: token.end,
            line: token.line,
            column: token.column,
            file_path: self.options.file_path.clone(),
        }
    }

    /// Fails with an "expected ..., found ..." error at the current token.
    fn unexpected<T>(&mut self, expected: &[&str]) -> ParseResult<T> {
        let token = self.token_stream.peek()?.clone();
        let location = self.token_location(&token);
        let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
        let found = token.kind.describe();
        let message = format!("expected {}, found {found}", expected.join(" or "));
        let kind = if matches!(token.kind, GraphQLTokenKind::Eof) {
            GraphQLParseErrorKind::UnexpectedEof { expected }
        } else {
            GraphQLParseErrorKind::UnexpectedToken { expected, found }
        };
        Err(GraphQLParseError::new(message, location, kind))
    }

    fn descend(&mut self) -> ParseResult<()> {
        self.recursion_depth += 1;
        if self.recursion_depth > Self::MAX_RECURSION_DEPTH {
            let token = self.token_stream.peek()?.clone();
            let mut error = GraphQLParseError::new(
                format!(
                    "nesting exceeds the maximum depth of {}",
                    Self::MAX_RECURSION_DEPTH,
                ),
                self.token_location(&token),
                GraphQLParseErrorKind::NestingTooDeep,
            );
            error.add_help("flatten deeply nested values, selections, or list types");
            return Err(error);
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.recursion_depth -= 1;
    }

    // =========================================================================
    // Token expectation helpers
    // =========================================================================

    fn peek_is(&mut self, kind: &GraphQLTokenKind) -> ParseResult<bool> {
        Ok(self.token_stream.peek()?.kind == *kind)
    }

    fn peek_is_name(&mut self, name: &str) -> ParseResult<bool> {
        Ok(self.token_stream.peek()?.is_name(name))
    }

    /// Consumes the current token if it is `kind`.
    fn skip(&mut self, kind: &GraphQLTokenKind) -> ParseResult<bool> {
        if self.peek_is(kind)? {
            self.token_stream.consume()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: &GraphQLTokenKind) -> ParseResult<GraphQLToken> {
        if self.peek_is(kind)? {
            self.token_stream.consume()
        } else {
            self.unexpected(&[kind.describe().as_str()])
        }
    }

    fn expect_name(&mut self) -> ParseResult<String> {
        let is_name = matches!(self.token_stream.peek()?.kind, GraphQLTokenKind::Name(_));
        if is_name && let GraphQLTokenKind::Name(name) = self.token_stream.consume()?.kind {
            return Ok(name);
        }
        self.unexpected(&["name"])
    }

    fn expect_keyword(&mut self, keyword: &str) -> ParseResult<()> {
        if self.peek_is_name(keyword)? {
            self.token_stream.consume()?;
            Ok(())
        } else {
            self.unexpected(&[format!("`{keyword}`").as_str()])
        }
    }

    fn expect_eof(&mut self) -> ParseResult<()> {
        if self.peek_is(&GraphQLTokenKind::Eof)? {
            Ok(())
        } else {
            self.unexpected(&["end of input"])
        }
    }

    // =========================================================================
    // List helpers
    // =========================================================================

    /// `open item+ close`. An empty list is an error naming `construct`.
    fn delimited_list<T>(
        &mut self,
        open: GraphQLTokenKind,
        close: GraphQLTokenKind,
        construct: &str,
        mut item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let open_token = self.expect(&open)?;
        if self.peek_is(&close)? {
            let close_token = self.token_stream.consume()?;
            let location = SourceLocation {
                end: close_token.end,
                ..self.token_location(&open_token)
            };
            let mut error = GraphQLParseError::new(
                format!("{construct} must not be empty"),
                location,
                GraphQLParseErrorKind::InvalidEmptyConstruct {
                    construct: format!("{open}{close}"),
                },
            );
            error.add_help(format!("remove the empty `{open}{close}`"));
            return Err(error);
        }
        let mut items = Vec::new();
        while !self.skip(&close)? {
            if self.peek_is(&GraphQLTokenKind::Eof)? {
                return self.unexpected(&[close.describe().as_str()]);
            }
            items.push(item(self)?);
        }
        Ok(items)
    }

    /// [`delimited_list`](Self::delimited_list) when the current token is
    /// `open`, otherwise an empty list.
    fn optional_delimited_list<T>(
        &mut self,
        open: GraphQLTokenKind,
        close: GraphQLTokenKind,
        construct: &str,
        item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        if self.peek_is(&open)? {
            self.delimited_list(open, close, construct, item)
        } else {
            Ok(Vec::new())
        }
    }

    /// `separator? item (separator item)*`, e.g. union members or directive
    /// locations.
    fn separated_list<T>(
        &mut self,
        separator: GraphQLTokenKind,
        mut item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        self.skip(&separator)?;
        let mut items = vec![item(self)?];
        while self.skip(&separator)? {
            items.push(item(self)?);
        }
        Ok(items)
    }

    // =========================================================================
    // Documents and definitions
    // =========================================================================

    fn document(&mut self) -> ParseResult<ast::Document> {
        let start = self.node_start()?;
        let mut definitions = Vec::new();
        while !self.peek_is(&GraphQLTokenKind::Eof)? {
            definitions.push(self.definition()?);
        }
        if definitions.is_empty() && !self.options.allow_empty_documents {
            let mut error = GraphQLParseError::new(
                "a document must contain at least one definition",
                self.span_from(start),
                GraphQLParseErrorKind::UnexpectedEof {
                    expected: vec!["definition".to_string()],
                },
            );
            error.add_spec("https://spec.graphql.org/September2025/#Document");
            return Err(error);
        }
        Ok(ast::Document {
            definitions,
            source_location: self.location(start),
        })
    }

    fn definition(&mut self) -> ParseResult<ast::Definition> {
        let start = self.node_start()?;
        let description = if matches!(self.token_stream.peek()?.kind, GraphQLTokenKind::String(_)) {
            if self.token_stream.peek_nth(1)?.is_name("extend") {
                let token = self.token_stream.peek()?.clone();
                let mut error = GraphQLParseError::new(
                    "type-system extensions cannot have a description",
                    self.token_location(&token),
                    GraphQLParseErrorKind::InvalidSyntax,
                );
                error.add_help("remove the description or move it to the extended definition");
                return Err(error);
            }
            self.description()?
        } else {
            None
        };

        let keyword = match &self.token_stream.peek()?.kind {
            GraphQLTokenKind::CurlyBraceOpen if description.is_none() => {
                return Ok(ast::Definition::Operation(self.operation(start, None)?));
            },
            GraphQLTokenKind::Name(name) => name.clone(),
            _ => return self.unexpected(&["definition"]),
        };

        match keyword.as_str() {
            "query" | "mutation" | "subscription" => {
                Ok(ast::Definition::Operation(self.operation(start, description)?))
            },
            "fragment" => Ok(ast::Definition::Fragment(self.fragment(start, description)?)),
            "schema" => Ok(ast::Definition::Schema(self.schema_definition(start, description)?)),
            "directive" => Ok(ast::Definition::Directive(
                self.directive_definition(start, description)?,
            )),
            "scalar" | "type" | "interface" | "union" | "enum" | "input" => Ok(
                ast::Definition::Type(self.type_definition(&keyword, start, description)?),
            ),
            "extend" => self.extension(start),
            _ => self.unexpected(&["definition"]),
        }
    }

    fn description(&mut self) -> ParseResult<Option<String>> {
        let is_string = matches!(self.token_stream.peek()?.kind, GraphQLTokenKind::String(_));
        if is_string && let GraphQLTokenKind::String(value) = self.token_stream.consume()?.kind {
            return Ok(Some(value));
        }
        Ok(None)
    }

    // =========================================================================
    // Executable definitions
    // =========================================================================

    fn operation(
        &mut self,
        start: NodeStart,
        description: Option<String>,
    ) -> ParseResult<ast::OperationDefinition> {
        if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen)? {
            let selections = self.selection_set()?;
            return Ok(ast::OperationDefinition {
                description: None,
                operation_kind: OperationKind::Query,
                name: None,
                variable_definitions: Vec::new(),
                directives: Vec::new(),
                selections,
                source_location: self.location(start),
            });
        }

        let keyword = self.expect_name()?;
        let Some(operation_kind) = OperationKind::from_keyword(&keyword) else {
            return self.unexpected(&["`query`", "`mutation`", "`subscription`"]);
        };
        let name = if matches!(self.token_stream.peek()?.kind, GraphQLTokenKind::Name(_)) {
            Some(self.expect_name()?)
        } else {
            None
        };
        let variable_definitions = self.optional_delimited_list(
            GraphQLTokenKind::ParenOpen,
            GraphQLTokenKind::ParenClose,
            "a variable definition list",
            Self::variable_definition,
        )?;
        let directives = self.directives(ConstContext::AllowVariables)?;
        let selections = self.selection_set()?;
        Ok(ast::OperationDefinition {
            description,
            operation_kind,
            name,
            variable_definitions,
            directives,
            selections,
            source_location: self.location(start),
        })
    }

    fn variable_definition(&mut self) -> ParseResult<ast::VariableDefinition> {
        let start = self.node_start()?;
        self.expect(&GraphQLTokenKind::Dollar)?;
        let name = self.expect_name()?;
        self.expect(&GraphQLTokenKind::Colon)?;
        let var_type = self.type_ref()?;
        let default_value = if self.skip(&GraphQLTokenKind::Equals)? {
            Some(self.value(ConstContext::VariableDefaultValue)?)
        } else {
            None
        };
        let directives = self.directives(ConstContext::DirectiveArgument)?;
        Ok(ast::VariableDefinition {
            name,
            var_type,
            default_value,
            directives,
            source_location: self.location(start),
        })
    }

    fn fragment(
        &mut self,
        start: NodeStart,
        description: Option<String>,
    ) -> ParseResult<ast::FragmentDefinition> {
        self.expect_keyword("fragment")?;
        if self.peek_is_name("on")? {
            let token = self.token_stream.peek()?.clone();
            let mut error = GraphQLParseError::new(
                "a fragment cannot be named `on`",
                self.token_location(&token),
                GraphQLParseErrorKind::ReservedName {
                    name: "on".to_string(),
                },
            );
            error.add_spec("https://spec.graphql.org/September2025/#FragmentName");
            return Err(error);
        }
        let name = self.expect_name()?;
        self.expect_keyword("on")?;
        let type_condition = self.named_type()?;
        let directives = self.directives(ConstContext::AllowVariables)?;
        let selections = self.selection_set()?;
        Ok(ast::FragmentDefinition {
            description,
            name,
            type_condition,
            directives,
            selections,
            source_location: self.location(start),
        })
    }

    fn selection_set(&mut self) -> ParseResult<Vec<ast::Selection>> {
        self.descend()?;
        let selections = self.delimited_list(
            GraphQLTokenKind::CurlyBraceOpen,
            GraphQLTokenKind::CurlyBraceClose,
            "a selection set",
            Self::selection,
        )?;
        self.ascend();
        Ok(selections)
    }

    fn selection(&mut self) -> ParseResult<ast::Selection> {
        let start = self.node_start()?;
        if !self.skip(&GraphQLTokenKind::Ellipsis)? {
            return Ok(ast::Selection::Field(self.field(start)?));
        }

        let spread_name = match &self.token_stream.peek()?.kind {
            GraphQLTokenKind::Name(name) if name != "on" => Some(name.clone()),
            _ => None,
        };
        if let Some(name) = spread_name {
            self.token_stream.consume()?;
            let directives = self.directives(ConstContext::AllowVariables)?;
            return Ok(ast::Selection::FragmentSpread(ast::FragmentSpread {
                name,
                directives,
                source_location: self.location(start),
            }));
        }

        let type_condition = if self.peek_is_name("on")? {
            self.token_stream.consume()?;
            Some(self.named_type()?)
        } else {
            None
        };
        let directives = self.directives(ConstContext::AllowVariables)?;
        let selections = self.selection_set()?;
        Ok(ast::Selection::InlineFragment(ast::InlineFragment {
            type_condition,
            directives,
            selections,
            source_location: self.location(start),
        }))
    }

    fn field(&mut self, start: NodeStart) -> ParseResult<ast::Field> {
        let first_name = self.expect_name()?;
        let (alias, name) = if self.skip(&GraphQLTokenKind::Colon)? {
            (Some(first_name), self.expect_name()?)
        } else {
            (None, first_name)
        };
        let arguments = self.arguments(ConstContext::AllowVariables)?;
        let directives = self.directives(ConstContext::AllowVariables)?;
        let selections = if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen)? {
            self.selection_set()?
        } else {
            Vec::new()
        };
        Ok(ast::Field {
            alias,
            name,
            arguments,
            directives,
            selections,
            source_location: self.location(start),
        })
    }

    fn arguments(&mut self, context: ConstContext) -> ParseResult<Vec<ast::Argument>> {
        self.optional_delimited_list(
            GraphQLTokenKind::ParenOpen,
            GraphQLTokenKind::ParenClose,
            "an argument list",
            |parser| {
                let start = parser.node_start()?;
                let name = parser.expect_name()?;
                parser.expect(&GraphQLTokenKind::Colon)?;
                let value = parser.value(context)?;
                Ok(ast::Argument {
                    name,
                    value,
                    source_location: parser.location(start),
                })
            },
        )
    }

    fn directives(&mut self, context: ConstContext) -> ParseResult<Vec<ast::Directive>> {
        let mut directives = Vec::new();
        while self.peek_is(&GraphQLTokenKind::At)? {
            let start = self.node_start()?;
            self.token_stream.consume()?;
            let name = self.expect_name()?;
            let arguments = self.arguments(context)?;
            directives.push(ast::Directive {
                name,
                arguments,
                source_location: self.location(start),
            });
        }
        Ok(directives)
    }

    // =========================================================================
    // Values
    // =========================================================================

    fn value(&mut self, context: ConstContext) -> ParseResult<ast::Value> {
        self.descend()?;
        let start = self.node_start()?;
        let value = match self.token_stream.peek()?.kind.clone() {
            GraphQLTokenKind::Dollar => {
                if !context.allows_variables() {
                    let token = self.token_stream.peek()?.clone();
                    let mut error = GraphQLParseError::new(
                        format!("variables are not allowed in {}", context.description()),
                        self.token_location(&token),
                        GraphQLParseErrorKind::InvalidSyntax,
                    );
                    error.add_help("use a literal value here");
                    return Err(error);
                }
                self.token_stream.consume()?;
                let name = self.expect_name()?;
                ast::Value::Variable(ast::VariableValue {
                    name,
                    source_location: self.location(start),
                })
            },
            GraphQLTokenKind::Int(value) => {
                self.token_stream.consume()?;
                ast::Value::Int(ast::IntValue {
                    value,
                    source_location: self.location(start),
                })
            },
            GraphQLTokenKind::Float(value) => {
                self.token_stream.consume()?;
                ast::Value::Float(ast::FloatValue {
                    value,
                    source_location: self.location(start),
                })
            },
            GraphQLTokenKind::String(value) => {
                self.token_stream.consume()?;
                ast::Value::String(ast::StringValue {
                    value,
                    source_location: self.location(start),
                })
            },
            GraphQLTokenKind::Name(name) => {
                self.token_stream.consume()?;
                let source_location = self.location(start);
                match name.as_str() {
                    "true" => ast::Value::Boolean(ast::BooleanValue {
                        value: true,
                        source_location,
                    }),
                    "false" => ast::Value::Boolean(ast::BooleanValue {
                        value: false,
                        source_location,
                    }),
                    "null" => ast::Value::Null(ast::NullValue { source_location }),
                    _ => ast::Value::Enum(ast::EnumValue {
                        value: name,
                        source_location,
                    }),
                }
            },
            GraphQLTokenKind::SquareBracketOpen => {
                self.token_stream.consume()?;
                let mut values = Vec::new();
                while !self.skip(&GraphQLTokenKind::SquareBracketClose)? {
                    if self.peek_is(&GraphQLTokenKind::Eof)? {
                        return self.unexpected(&["`]`"]);
                    }
                    values.push(self.value(context)?);
                }
                ast::Value::List(ast::ListValue {
                    values,
                    source_location: self.location(start),
                })
            },
            GraphQLTokenKind::CurlyBraceOpen => {
                self.token_stream.consume()?;
                let mut fields = Vec::new();
                while !self.skip(&GraphQLTokenKind::CurlyBraceClose)? {
                    let field_start = self.node_start()?;
                    let name = self.expect_name()?;
                    self.expect(&GraphQLTokenKind::Colon)?;
                    let value = self.value(context)?;
                    fields.push(ast::ObjectField {
                        name,
                        value,
                        source_location: self.location(field_start),
                    });
                }
                ast::Value::Object(ast::ObjectValue {
                    fields,
                    source_location: self.location(start),
                })
            },
            _ => return self.unexpected(&["value"]),
        };
        self.ascend();
        Ok(value)
    }

    // =========================================================================
    // Type references
    // =========================================================================

    fn type_ref(&mut self) -> ParseResult<ast::Type> {
        self.descend()?;
        let start = self.node_start()?;
        let base = if self.skip(&GraphQLTokenKind::SquareBracketOpen)? {
            let element_type = self.type_ref()?;
            self.expect(&GraphQLTokenKind::SquareBracketClose)?;
            ast::Type::List(ast::ListType {
                element_type: Box::new(element_type),
                source_location: self.location(start),
            })
        } else {
            ast::Type::Named(self.named_type()?)
        };
        let ty = if self.skip(&GraphQLTokenKind::Bang)? {
            ast::Type::NonNull(ast::NonNullType {
                inner_type: Box::new(base),
                source_location: self.location(start),
            })
        } else {
            base
        };
        self.ascend();
        Ok(ty)
    }

    fn named_type(&mut self) -> ParseResult<ast::NamedType> {
        let start = self.node_start()?;
        let name = self.expect_name()?;
        Ok(ast::NamedType {
            name,
            source_location: self.location(start),
        })
    }

    // =========================================================================
    // Type-system definitions
    // =========================================================================

    fn schema_definition(
        &mut self,
        start: NodeStart,
        description: Option<String>,
    ) -> ParseResult<ast::SchemaDefinition> {
        self.expect_keyword("schema")?;
        let directives = self.directives(ConstContext::DirectiveArgument)?;
        let root_operation_types = self.delimited_list(
            GraphQLTokenKind::CurlyBraceOpen,
            GraphQLTokenKind::CurlyBraceClose,
            "a schema definition",
            Self::operation_type_definition,
        )?;
        Ok(ast::SchemaDefinition {
            description,
            directives,
            root_operation_types,
            source_location: self.location(start),
        })
    }

    fn operation_type_definition(&mut self) -> ParseResult<ast::OperationTypeDefinition> {
        let start = self.node_start()?;
        let keyword = match &self.token_stream.peek()?.kind {
            GraphQLTokenKind::Name(name) => OperationKind::from_keyword(name),
            _ => None,
        };
        let Some(operation_kind) = keyword else {
            return self.unexpected(&["`query`", "`mutation`", "`subscription`"]);
        };
        self.token_stream.consume()?;
        self.expect(&GraphQLTokenKind::Colon)?;
        let named_type = self.expect_name()?;
        Ok(ast::OperationTypeDefinition {
            operation_kind,
            named_type,
            source_location: self.location(start),
        })
    }

    fn directive_definition(
        &mut self,
        start: NodeStart,
        description: Option<String>,
    ) -> ParseResult<ast::DirectiveDefinition> {
        self.expect_keyword("directive")?;
        self.expect(&GraphQLTokenKind::At)?;
        let name = self.expect_name()?;
        let arguments = self.argument_definitions()?;
        let repeatable = if self.peek_is_name("repeatable")? {
            self.token_stream.consume()?;
            true
        } else {
            false
        };
        self.expect_keyword("on")?;
        let locations = self.separated_list(GraphQLTokenKind::Pipe, Self::directive_location)?;
        Ok(ast::DirectiveDefinition {
            description,
            name,
            arguments,
            repeatable,
            locations,
            source_location: self.location(start),
        })
    }

    fn directive_location(&mut self) -> ParseResult<DirectiveLocation> {
        let token = self.token_stream.peek()?.clone();
        let GraphQLTokenKind::Name(name) = &token.kind else {
            return self.unexpected(&["directive location"]);
        };
        if let Some(location) = DirectiveLocation::from_name(name) {
            self.token_stream.consume()?;
            return Ok(location);
        }
        let mut notes = smallvec![];
        if let Some(suggestion) = DirectiveLocation::suggest(name) {
            notes.push(IssueNote::help(format!("did you mean `{suggestion}`?")));
        }
        notes.push(IssueNote::spec(
            "https://spec.graphql.org/September2025/#DirectiveLocations",
        ));
        Err(GraphQLParseError::with_notes(
            format!("unknown directive location `{name}`"),
            self.token_location(&token),
            GraphQLParseErrorKind::InvalidSyntax,
            notes,
        ))
    }

    fn type_definition(
        &mut self,
        keyword: &str,
        start: NodeStart,
        description: Option<String>,
    ) -> ParseResult<ast::TypeDefinition> {
        self.token_stream.consume()?;
        let name = self.expect_name()?;
        let definition = match keyword {
            "scalar" => {
                let directives = self.directives(ConstContext::DirectiveArgument)?;
                ast::TypeDefinition::Scalar(ast::ScalarTypeDefinition {
                    description,
                    name,
                    directives,
                    source_location: self.location(start),
                })
            },
            "type" => {
                let implements_interfaces = self.implements_interfaces()?;
                let directives = self.directives(ConstContext::DirectiveArgument)?;
                let fields = self.field_definitions()?;
                ast::TypeDefinition::Object(ast::ObjectTypeDefinition {
                    description,
                    name,
                    implements_interfaces,
                    directives,
                    fields,
                    source_location: self.location(start),
                })
            },
            "interface" => {
                let implements_interfaces = self.implements_interfaces()?;
                let directives = self.directives(ConstContext::DirectiveArgument)?;
                let fields = self.field_definitions()?;
                ast::TypeDefinition::Interface(ast::InterfaceTypeDefinition {
                    description,
                    name,
                    implements_interfaces,
                    directives,
                    fields,
                    source_location: self.location(start),
                })
            },
            "union" => {
                let directives = self.directives(ConstContext::DirectiveArgument)?;
                let member_types = self.union_members()?;
                ast::TypeDefinition::Union(ast::UnionTypeDefinition {
                    description,
                    name,
                    directives,
                    member_types,
                    source_location: self.location(start),
                })
            },
            "enum" => {
                let directives = self.directives(ConstContext::DirectiveArgument)?;
                let values = self.enum_value_definitions()?;
                ast::TypeDefinition::Enum(ast::EnumTypeDefinition {
                    description,
                    name,
                    directives,
                    values,
                    source_location: self.location(start),
                })
            },
            _ => {
                let directives = self.directives(ConstContext::DirectiveArgument)?;
                let fields = self.input_field_definitions()?;
                ast::TypeDefinition::InputObject(ast::InputObjectTypeDefinition {
                    description,
                    name,
                    directives,
                    fields,
                    source_location: self.location(start),
                })
            },
        };
        Ok(definition)
    }

    fn implements_interfaces(&mut self) -> ParseResult<Vec<String>> {
        if !self.peek_is_name("implements")? {
            return Ok(Vec::new());
        }
        self.token_stream.consume()?;
        self.separated_list(GraphQLTokenKind::Ampersand, Self::expect_name)
    }

    fn union_members(&mut self) -> ParseResult<Vec<ast::NamedType>> {
        if self.skip(&GraphQLTokenKind::Equals)? {
            self.separated_list(GraphQLTokenKind::Pipe, Self::named_type)
        } else {
            Ok(Vec::new())
        }
    }

    fn field_definitions(&mut self) -> ParseResult<Vec<ast::FieldDefinition>> {
        self.optional_delimited_list(
            GraphQLTokenKind::CurlyBraceOpen,
            GraphQLTokenKind::CurlyBraceClose,
            "a field list",
            Self::field_definition,
        )
    }

    fn field_definition(&mut self) -> ParseResult<ast::FieldDefinition> {
        let start = self.node_start()?;
        let description = self.description()?;
        let name = self.expect_name()?;
        let arguments = self.argument_definitions()?;
        self.expect(&GraphQLTokenKind::Colon)?;
        let field_type = self.type_ref()?;
        let directives = self.directives(ConstContext::DirectiveArgument)?;
        Ok(ast::FieldDefinition {
            description,
            name,
            arguments,
            field_type,
            directives,
            source_location: self.location(start),
        })
    }

    fn argument_definitions(&mut self) -> ParseResult<Vec<ast::InputValueDefinition>> {
        self.optional_delimited_list(
            GraphQLTokenKind::ParenOpen,
            GraphQLTokenKind::ParenClose,
            "an argument definition list",
            Self::input_value_definition,
        )
    }

    fn input_field_definitions(&mut self) -> ParseResult<Vec<ast::InputValueDefinition>> {
        self.optional_delimited_list(
            GraphQLTokenKind::CurlyBraceOpen,
            GraphQLTokenKind::CurlyBraceClose,
            "an input field list",
            Self::input_value_definition,
        )
    }

    fn input_value_definition(&mut self) -> ParseResult<ast::InputValueDefinition> {
        let start = self.node_start()?;
        let description = self.description()?;
        let name = self.expect_name()?;
        self.expect(&GraphQLTokenKind::Colon)?;
        let value_type = self.type_ref()?;
        let default_value = if self.skip(&GraphQLTokenKind::Equals)? {
            Some(self.value(ConstContext::InputDefaultValue)?)
        } else {
            None
        };
        let directives = self.directives(ConstContext::DirectiveArgument)?;
        Ok(ast::InputValueDefinition {
            description,
            name,
            value_type,
            default_value,
            directives,
            source_location: self.location(start),
        })
    }

    fn enum_value_definitions(&mut self) -> ParseResult<Vec<ast::EnumValueDefinition>> {
        self.optional_delimited_list(
            GraphQLTokenKind::CurlyBraceOpen,
            GraphQLTokenKind::CurlyBraceClose,
            "an enum value list",
            Self::enum_value_definition,
        )
    }

    fn enum_value_definition(&mut self) -> ParseResult<ast::EnumValueDefinition> {
        let start = self.node_start()?;
        let description = self.description()?;
        let token = self.token_stream.peek()?.clone();
        let name = self.expect_name()?;
        if matches!(name.as_str(), "true" | "false" | "null") {
            let mut error = GraphQLParseError::new(
                format!("`{name}` cannot be used as an enum value"),
                self.token_location(&token),
                GraphQLParseErrorKind::ReservedName { name },
            );
            error.add_spec("https://spec.graphql.org/September2025/#EnumValue");
            return Err(error);
        }
        let directives = self.directives(ConstContext::DirectiveArgument)?;
        Ok(ast::EnumValueDefinition {
            description,
            name,
            directives,
            source_location: self.location(start),
        })
    }

    // =========================================================================
    // Type-system extensions
    // =========================================================================

    fn extension(&mut self, start: NodeStart) -> ParseResult<ast::Definition> {
        self.expect_keyword("extend")?;
        let keyword = match &self.token_stream.peek()?.kind {
            GraphQLTokenKind::Name(name) => name.clone(),
            _ => String::new(),
        };
        if keyword == "schema" {
            self.token_stream.consume()?;
            let directives = self.directives(ConstContext::DirectiveArgument)?;
            let root_operation_types = self.optional_delimited_list(
                GraphQLTokenKind::CurlyBraceOpen,
                GraphQLTokenKind::CurlyBraceClose,
                "a schema extension",
                Self::operation_type_definition,
            )?;
            if directives.is_empty() && root_operation_types.is_empty() {
                return Err(self.empty_extension("extend schema", start));
            }
            return Ok(ast::Definition::SchemaExtension(ast::SchemaExtension {
                directives,
                root_operation_types,
                source_location: self.location(start),
            }));
        }
        if !matches!(
            keyword.as_str(),
            "scalar" | "type" | "interface" | "union" | "enum" | "input",
        ) {
            return self.unexpected(&[
                "`schema`",
                "`scalar`",
                "`type`",
                "`interface`",
                "`union`",
                "`enum`",
                "`input`",
            ]);
        }
        self.token_stream.consume()?;
        let name = self.expect_name()?;
        let construct = format!("extend {keyword} {name}");

        let extension = match keyword.as_str() {
            "scalar" => ast::TypeExtension::Scalar(ast::ScalarTypeExtension {
                name,
                directives: self.directives(ConstContext::DirectiveArgument)?,
                source_location: None,
            }),
            "type" | "interface" => {
                let implements_interfaces = self.implements_interfaces()?;
                let directives = self.directives(ConstContext::DirectiveArgument)?;
                let fields = self.field_definitions()?;
                if keyword == "type" {
                    ast::TypeExtension::Object(ast::ObjectTypeExtension {
                        name,
                        implements_interfaces,
                        directives,
                        fields,
                        source_location: None,
                    })
                } else {
                    ast::TypeExtension::Interface(ast::InterfaceTypeExtension {
                        name,
                        implements_interfaces,
                        directives,
                        fields,
                        source_location: None,
                    })
                }
            },
            "union" => ast::TypeExtension::Union(ast::UnionTypeExtension {
                name,
                directives: self.directives(ConstContext::DirectiveArgument)?,
                member_types: self.union_members()?,
                source_location: None,
            }),
            "enum" => ast::TypeExtension::Enum(ast::EnumTypeExtension {
                name,
                directives: self.directives(ConstContext::DirectiveArgument)?,
                values: self.enum_value_definitions()?,
                source_location: None,
            }),
            _ => ast::TypeExtension::InputObject(ast::InputObjectTypeExtension {
                name,
                directives: self.directives(ConstContext::DirectiveArgument)?,
                fields: self.input_field_definitions()?,
                source_location: None,
            }),
        };
        if extension.adds_nothing() {
            return Err(self.empty_extension(&construct, start));
        }
        Ok(ast::Definition::TypeExtension(self.with_extension_location(extension, start)))
    }

    fn with_extension_location(&self, mut extension: ast::TypeExtension, start: NodeStart) -> ast::TypeExtension {
        let location = self.location(start);
        match &mut extension {
            ast::TypeExtension::Enum(ext) => ext.source_location = location,
            ast::TypeExtension::InputObject(ext) => ext.source_location = location,
            ast::TypeExtension::Interface(ext) => ext.source_location = location,
            ast::TypeExtension::Object(ext) => ext.source_location = location,
            ast::TypeExtension::Scalar(ext) => ext.source_location = location,
            ast::TypeExtension::Union(ext) => ext.source_location = location,
        }
        extension
    }

    fn empty_extension(&self, construct: &str, start: NodeStart) -> GraphQLParseError {
        let mut error = GraphQLParseError::new(
            format!("`{construct}` does not add anything"),
            self.span_from(start),
            GraphQLParseErrorKind::InvalidEmptyConstruct {
                construct: construct.to_string(),
            },
        );
        error.add_help("an extension must add at least one directive, member, or field");
        error
    }
}
