//! Renders AST nodes back to GraphQL source text.
//!
//! Output is canonical rather than faithful: comments and commas are not
//! preserved, and each definition is separated by a blank line. Builtin
//! scalar definitions (`Int`, `Float`, `String`, `Boolean`, `ID`) are skipped
//! when they appear as definitions since every schema has them implicitly.
//!
//! ```
//! use gqlfront_parser::GraphQLParser;
//!
//! let document = GraphQLParser::new("type Query{hero:String}")
//!     .parse_document()
//!     .into_value()
//!     .unwrap();
//! assert_eq!(document.to_sdl(), "type Query {\n  hero: String\n}\n");
//! ```

use crate::ast;
use crate::ast::Node;
use crate::scanner::normalize_block_string;

/// Names of the scalars every schema defines implicitly.
pub const BUILTIN_SCALAR_NAMES: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Writes AST nodes as GraphQL text with a configurable indent string.
#[derive(Clone, Debug)]
pub struct SdlWriter {
    indent: String,
}

impl Default for SdlWriter {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
        }
    }
}

impl SdlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `indent` once per nesting level (two spaces by default).
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }

    pub fn write_document(&self, document: &ast::Document) -> String {
        let mut state = State::new(&self.indent);
        state.definitions(&document.definitions);
        state.output
    }

    /// Renders any node. A document or definition ends with a newline; other
    /// nodes are rendered inline.
    pub fn write_node(&self, node: &Node) -> String {
        let mut state = State::new(&self.indent);
        match node {
            Node::Argument(argument) => state.argument(argument),
            Node::Definition(definition) => state.definitions(std::slice::from_ref(definition)),
            Node::Directive(directive) => state.directive(directive),
            Node::Document(document) => state.definitions(&document.definitions),
            Node::EnumValueDefinition(value) => state.enum_value_definition(value),
            Node::FieldDefinition(field) => state.field_definition(field),
            Node::InputValueDefinition(input) => state.input_value_definition(input),
            Node::ObjectField(field) => state.object_field(field),
            Node::OperationTypeDefinition(root) => state.operation_type_definition(root),
            Node::Selection(selection) => state.selection(selection),
            Node::Type(ty) => state.write(&ty.to_string()),
            Node::Value(value) => state.value(value),
            Node::VariableDefinition(variable) => state.variable_definition(variable),
        }
        state.output
    }
}

impl ast::Document {
    /// Renders this document with two-space indentation.
    pub fn to_sdl(&self) -> String {
        SdlWriter::new().write_document(self)
    }

    pub fn to_sdl_with_indent(&self, indent: &str) -> String {
        SdlWriter::with_indent(indent).write_document(self)
    }
}

impl Node {
    pub fn to_sdl(&self) -> String {
        SdlWriter::new().write_node(self)
    }

    pub fn to_sdl_with_indent(&self, indent: &str) -> String {
        SdlWriter::with_indent(indent).write_node(self)
    }
}

/// Whether `definition` is one of the implicit builtin scalars.
pub fn is_builtin_scalar_definition(definition: &ast::Definition) -> bool {
    matches!(
        definition,
        ast::Definition::Type(ast::TypeDefinition::Scalar(scalar))
            if BUILTIN_SCALAR_NAMES.contains(&scalar.name.as_str())
    )
}

// =============================================================================
// Writer state
// =============================================================================

struct State<'a> {
    indent: &'a str,
    level: usize,
    output: String,
}

impl<'a> State<'a> {
    fn new(indent: &'a str) -> Self {
        Self {
            indent,
            level: 0,
            output: String::new(),
        }
    }

    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn new_line(&mut self) {
        self.output.push('\n');
        for _ in 0..self.level {
            self.output.push_str(self.indent);
        }
    }

    /// `{`, one item per line at the next level, `}`.
    fn block<T>(&mut self, items: &[T], mut item: impl FnMut(&mut Self, &T)) {
        self.write(" {");
        self.level += 1;
        for entry in items {
            self.new_line();
            item(self, entry);
        }
        self.level -= 1;
        self.new_line();
        self.write("}");
    }

    fn definitions(&mut self, definitions: &[ast::Definition]) {
        let mut first = true;
        for definition in definitions {
            if is_builtin_scalar_definition(definition) {
                continue;
            }
            if !first {
                self.write("\n");
            }
            first = false;
            self.definition(definition);
            self.write("\n");
        }
    }

    fn definition(&mut self, definition: &ast::Definition) {
        match definition {
            ast::Definition::Directive(def) => self.directive_definition(def),
            ast::Definition::Fragment(def) => self.fragment_definition(def),
            ast::Definition::Operation(def) => self.operation_definition(def),
            ast::Definition::Schema(def) => {
                self.description(def.description.as_deref());
                self.write("schema");
                self.directives(&def.directives);
                self.block(&def.root_operation_types, Self::operation_type_definition);
            },
            ast::Definition::SchemaExtension(ext) => {
                self.write("extend schema");
                self.directives(&ext.directives);
                if !ext.root_operation_types.is_empty() {
                    self.block(&ext.root_operation_types, Self::operation_type_definition);
                }
            },
            ast::Definition::Type(def) => self.type_definition(def),
            ast::Definition::TypeExtension(ext) => self.type_extension(ext),
        }
    }

    // =========================================================================
    // Type system
    // =========================================================================

    fn operation_type_definition(&mut self, root: &ast::OperationTypeDefinition) {
        self.write(root.operation_kind.as_str());
        self.write(": ");
        self.write(&root.named_type);
    }

    fn directive_definition(&mut self, def: &ast::DirectiveDefinition) {
        self.description(def.description.as_deref());
        self.write("directive @");
        self.write(&def.name);
        self.argument_definitions(&def.arguments);
        if def.repeatable {
            self.write(" repeatable");
        }
        self.write(" on ");
        let locations: Vec<&str> = def.locations.iter().map(|loc| loc.as_str()).collect();
        self.write(&locations.join(" | "));
    }

    fn type_definition(&mut self, def: &ast::TypeDefinition) {
        self.description(def.description());
        match def {
            ast::TypeDefinition::Enum(def) => {
                self.type_header("enum", &def.name, &[], &def.directives);
                self.enum_values(&def.values);
            },
            ast::TypeDefinition::InputObject(def) => {
                self.type_header("input", &def.name, &[], &def.directives);
                self.input_fields(&def.fields);
            },
            ast::TypeDefinition::Interface(def) => {
                self.type_header("interface", &def.name, &def.implements_interfaces, &def.directives);
                self.fields(&def.fields);
            },
            ast::TypeDefinition::Object(def) => {
                self.type_header("type", &def.name, &def.implements_interfaces, &def.directives);
                self.fields(&def.fields);
            },
            ast::TypeDefinition::Scalar(def) => {
                self.type_header("scalar", &def.name, &[], &def.directives);
            },
            ast::TypeDefinition::Union(def) => {
                self.type_header("union", &def.name, &[], &def.directives);
                self.union_members(&def.member_types);
            },
        }
    }

    fn type_extension(&mut self, ext: &ast::TypeExtension) {
        self.write("extend ");
        match ext {
            ast::TypeExtension::Enum(ext) => {
                self.type_header("enum", &ext.name, &[], &ext.directives);
                self.enum_values(&ext.values);
            },
            ast::TypeExtension::InputObject(ext) => {
                self.type_header("input", &ext.name, &[], &ext.directives);
                self.input_fields(&ext.fields);
            },
            ast::TypeExtension::Interface(ext) => {
                self.type_header("interface", &ext.name, &ext.implements_interfaces, &ext.directives);
                self.fields(&ext.fields);
            },
            ast::TypeExtension::Object(ext) => {
                self.type_header("type", &ext.name, &ext.implements_interfaces, &ext.directives);
                self.fields(&ext.fields);
            },
            ast::TypeExtension::Scalar(ext) => {
                self.type_header("scalar", &ext.name, &[], &ext.directives);
            },
            ast::TypeExtension::Union(ext) => {
                self.type_header("union", &ext.name, &[], &ext.directives);
                self.union_members(&ext.member_types);
            },
        }
    }

    fn type_header(
        &mut self,
        keyword: &str,
        name: &str,
        implements_interfaces: &[String],
        directives: &[ast::Directive],
    ) {
        self.write(keyword);
        self.write(" ");
        self.write(name);
        if !implements_interfaces.is_empty() {
            self.write(" implements ");
            self.write(&implements_interfaces.join(" & "));
        }
        self.directives(directives);
    }

    fn fields(&mut self, fields: &[ast::FieldDefinition]) {
        if !fields.is_empty() {
            self.block(fields, Self::field_definition);
        }
    }

    fn input_fields(&mut self, fields: &[ast::InputValueDefinition]) {
        if !fields.is_empty() {
            self.block(fields, Self::input_value_definition);
        }
    }

    fn enum_values(&mut self, values: &[ast::EnumValueDefinition]) {
        if !values.is_empty() {
            self.block(values, Self::enum_value_definition);
        }
    }

    fn union_members(&mut self, members: &[ast::NamedType]) {
        if !members.is_empty() {
            let names: Vec<&str> = members.iter().map(|member| member.name.as_str()).collect();
            self.write(" = ");
            self.write(&names.join(" | "));
        }
    }

    fn field_definition(&mut self, field: &ast::FieldDefinition) {
        self.description(field.description.as_deref());
        self.write(&field.name);
        self.argument_definitions(&field.arguments);
        self.write(": ");
        self.write(&field.field_type.to_string());
        self.directives(&field.directives);
    }

    /// Inline unless some argument has a description, in which case each
    /// argument goes on its own line.
    fn argument_definitions(&mut self, arguments: &[ast::InputValueDefinition]) {
        if arguments.is_empty() {
            return;
        }
        self.write("(");
        if arguments.iter().any(|argument| argument.description.is_some()) {
            self.level += 1;
            for argument in arguments {
                self.new_line();
                self.input_value_definition(argument);
            }
            self.level -= 1;
            self.new_line();
        } else {
            for (i, argument) in arguments.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                self.input_value_definition(argument);
            }
        }
        self.write(")");
    }

    fn input_value_definition(&mut self, input: &ast::InputValueDefinition) {
        self.description(input.description.as_deref());
        self.write(&input.name);
        self.write(": ");
        self.write(&input.value_type.to_string());
        if let Some(default_value) = &input.default_value {
            self.write(" = ");
            self.value(default_value);
        }
        self.directives(&input.directives);
    }

    fn enum_value_definition(&mut self, value: &ast::EnumValueDefinition) {
        self.description(value.description.as_deref());
        self.write(&value.name);
        self.directives(&value.directives);
    }

    /// Writes `description` followed by a line break at the current level.
    fn description(&mut self, description: Option<&str>) {
        let Some(description) = description else {
            return;
        };
        match self.block_string(description) {
            Some(lines) => {
                self.write("\"\"\"");
                for line in lines {
                    if line.is_empty() {
                        self.output.push('\n');
                    } else {
                        self.new_line();
                        self.write(&line);
                    }
                }
                self.new_line();
                self.write("\"\"\"");
            },
            None => self.string(description),
        }
        self.new_line();
    }

    /// The escaped lines of a block string for `value`, or `None` when a
    /// block string would not read back as the same value.
    fn block_string(&self, value: &str) -> Option<Vec<String>> {
        if !value.contains('\n') {
            return None;
        }
        let lines: Vec<String> = value
            .split('\n')
            .map(|line| line.replace("\"\"\"", "\\\"\"\""))
            .collect();

        let prefix: String = self.indent.repeat(self.level);
        let mut raw = String::from("\n");
        for line in value.split('\n') {
            if !line.is_empty() {
                raw.push_str(&prefix);
                raw.push_str(line);
            }
            raw.push('\n');
        }
        raw.push_str(&prefix);
        (normalize_block_string(&raw) == value).then_some(lines)
    }

    // =========================================================================
    // Executable definitions
    // =========================================================================

    fn operation_definition(&mut self, op: &ast::OperationDefinition) {
        let is_shorthand = op.name.is_none()
            && op.operation_kind == ast::OperationKind::Query
            && op.variable_definitions.is_empty()
            && op.directives.is_empty()
            && op.description.is_none();
        if is_shorthand {
            self.write("{");
            self.selection_lines(&op.selections);
            return;
        }
        self.description(op.description.as_deref());
        self.write(op.operation_kind.as_str());
        if let Some(name) = &op.name {
            self.write(" ");
            self.write(name);
        }
        if !op.variable_definitions.is_empty() {
            self.write("(");
            for (i, variable) in op.variable_definitions.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                self.variable_definition(variable);
            }
            self.write(")");
        }
        self.directives(&op.directives);
        self.selection_set(&op.selections);
    }

    fn variable_definition(&mut self, variable: &ast::VariableDefinition) {
        self.write("$");
        self.write(&variable.name);
        self.write(": ");
        self.write(&variable.var_type.to_string());
        if let Some(default_value) = &variable.default_value {
            self.write(" = ");
            self.value(default_value);
        }
        self.directives(&variable.directives);
    }

    fn fragment_definition(&mut self, fragment: &ast::FragmentDefinition) {
        self.description(fragment.description.as_deref());
        self.write("fragment ");
        self.write(&fragment.name);
        self.write(" on ");
        self.write(&fragment.type_condition.name);
        self.directives(&fragment.directives);
        self.selection_set(&fragment.selections);
    }

    fn selection_set(&mut self, selections: &[ast::Selection]) {
        if selections.is_empty() {
            return;
        }
        self.write(" {");
        self.selection_lines(selections);
    }

    /// The body of a selection set after its `{`.
    fn selection_lines(&mut self, selections: &[ast::Selection]) {
        self.level += 1;
        for selection in selections {
            self.new_line();
            self.selection(selection);
        }
        self.level -= 1;
        self.new_line();
        self.write("}");
    }

    fn selection(&mut self, selection: &ast::Selection) {
        match selection {
            ast::Selection::Field(field) => {
                if let Some(alias) = &field.alias {
                    self.write(alias);
                    self.write(": ");
                }
                self.write(&field.name);
                self.arguments(&field.arguments);
                self.directives(&field.directives);
                self.selection_set(&field.selections);
            },
            ast::Selection::FragmentSpread(spread) => {
                self.write("...");
                self.write(&spread.name);
                self.directives(&spread.directives);
            },
            ast::Selection::InlineFragment(inline) => {
                self.write("...");
                if let Some(type_condition) = &inline.type_condition {
                    self.write(" on ");
                    self.write(&type_condition.name);
                }
                self.directives(&inline.directives);
                self.selection_set(&inline.selections);
            },
        }
    }

    // =========================================================================
    // Shared
    // =========================================================================

    fn directives(&mut self, directives: &[ast::Directive]) {
        for directive in directives {
            self.write(" ");
            self.directive(directive);
        }
    }

    fn directive(&mut self, directive: &ast::Directive) {
        self.write("@");
        self.write(&directive.name);
        self.arguments(&directive.arguments);
    }

    fn arguments(&mut self, arguments: &[ast::Argument]) {
        if arguments.is_empty() {
            return;
        }
        self.write("(");
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.argument(argument);
        }
        self.write(")");
    }

    fn argument(&mut self, argument: &ast::Argument) {
        self.write(&argument.name);
        self.write(": ");
        self.value(&argument.value);
    }

    fn object_field(&mut self, field: &ast::ObjectField) {
        self.write(&field.name);
        self.write(": ");
        self.value(&field.value);
    }

    fn value(&mut self, value: &ast::Value) {
        match value {
            ast::Value::Boolean(v) => self.write(if v.value { "true" } else { "false" }),
            ast::Value::Enum(v) => self.write(&v.value),
            ast::Value::Float(v) => self.write(&format_float(v.value)),
            ast::Value::Int(v) => self.write(&v.value.to_string()),
            ast::Value::List(list) => {
                self.write("[");
                for (i, item) in list.values.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.value(item);
                }
                self.write("]");
            },
            ast::Value::Null(_) => self.write("null"),
            ast::Value::Object(object) => {
                self.write("{");
                for (i, field) in object.fields.iter().enumerate() {
                    self.write(if i > 0 { ", " } else { " " });
                    self.object_field(field);
                }
                self.write(if object.fields.is_empty() { "}" } else { " }" });
            },
            ast::Value::String(v) => self.string(&v.value),
            ast::Value::Variable(v) => {
                self.write("$");
                self.write(&v.name);
            },
        }
    }

    fn string(&mut self, value: &str) {
        self.output.push('"');
        for ch in value.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{8}' => self.output.push_str("\\b"),
                '\u{c}' => self.output.push_str("\\f"),
                ch if ch.is_control() => {
                    self.output.push_str(&format!("\\u{:04X}", ch as u32));
                },
                ch => self.output.push(ch),
            }
        }
        self.output.push('"');
    }
}

/// Formats a float so that it scans back as a float token: `1.0`, not `1`.
fn format_float(value: f64) -> String {
    let text = format!("{value:?}");
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{text}.0")
    }
}
