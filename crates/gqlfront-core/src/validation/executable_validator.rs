use crate::builtins::meta_field;
use crate::validation::defer::DeferTracker;
use crate::validation::fields_can_merge::FieldsCanMerge;
use crate::validation::validate_arguments;
use crate::validation::validate_directives;
use crate::validation::variables::validate_variable_usages;
use crate::validation::CoercionContext;
use crate::validation::ValueCoercer;
use crate::validation::VariableUsage;
use crate::Schema;
use gqlfront_parser::ast;
use gqlfront_parser::ast::DirectiveLocation;
use gqlfront_parser::ast::OperationKind;
use gqlfront_parser::has_errors;
use gqlfront_parser::Issue;
use gqlfront_parser::IssueKind;
use gqlfront_parser::IssueNote;
use gqlfront_parser::SourceLocation;
use gqlfront_parser::smallvec;
use indexmap::IndexMap;
use std::collections::HashSet;

/// The outcome of [`ExecutableValidator::validate()`].
#[derive(Clone, Debug, Default)]
pub struct ExecutableValidationResult {
    pub issues: Vec<Issue>,

    /// Variables referenced by each fragment the document defines, with the
    /// type expected where each one appears. Lets a caller work out which
    /// variables an operation needs without re-walking its fragments.
    pub fragment_variable_usages: IndexMap<String, Vec<VariableUsage>>,
}

impl ExecutableValidationResult {
    pub fn has_errors(&self) -> bool {
        has_errors(&self.issues)
    }
}

/// Validates operations and fragments against a [`Schema`].
///
/// Fragments defined elsewhere (a shared fragment library, say) can be made
/// available with [`with_fragments()`](Self::with_fragments). A fragment the
/// document defines itself takes precedence over one with the same name.
///
/// The validator only borrows the schema, so one schema can be shared by
/// many validators running on different threads.
#[derive(Clone, Debug)]
pub struct ExecutableValidator<'a> {
    schema: &'a Schema,
    fragments: Vec<ast::FragmentDefinition>,
    strict_response_shapes: bool,
}

impl<'a> ExecutableValidator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            fragments: Vec::new(),
            strict_response_shapes: false,
        }
    }

    pub fn with_fragments(mut self, fragments: impl IntoIterator<Item = ast::FragmentDefinition>) -> Self {
        self.fragments.extend(fragments);
        self
    }

    /// Whether fields on disjoint object types that share a response key
    /// must also agree on their response shape. Off by default.
    pub fn strict_response_shapes(mut self, strict: bool) -> Self {
        self.strict_response_shapes = strict;
        self
    }

    pub fn validate(&self, document: &ast::Document) -> ExecutableValidationResult {
        let mut issues = Vec::new();
        let fragments = self.collect_fragments(document, &mut issues);
        check_operation_names(document, &mut issues);
        check_fragment_cycles(&fragments, &mut issues);

        let mut fragment_variable_usages = IndexMap::new();
        for fragment in document.fragments() {
            let usages = self.validate_fragment(fragment, &fragments, &mut issues);
            fragment_variable_usages
                .entry(fragment.name.clone())
                .or_insert(usages);
        }

        let mut defer = DeferTracker::default();
        for operation in document.operations() {
            defer.start_operation();
            self.validate_operation(operation, &fragments, &mut defer, &mut issues);
        }

        let issues = dedupe(issues);
        log::debug!(
            "validated {} definitions with {} issue(s)",
            document.definitions.len(),
            issues.len(),
        );
        ExecutableValidationResult {
            issues,
            fragment_variable_usages,
        }
    }

    /// Document fragments first, then any extra fragments not shadowed by
    /// one of them.
    fn collect_fragments<'d>(
        &'d self,
        document: &'d ast::Document,
        issues: &mut Vec<Issue>,
    ) -> IndexMap<&'d str, &'d ast::FragmentDefinition> {
        let mut fragments: IndexMap<&str, &ast::FragmentDefinition> = IndexMap::new();
        for fragment in document.fragments() {
            match fragments.get(fragment.name.as_str()) {
                Some(first) => issues.push(Issue::with_notes(
                    IssueKind::DuplicateDefinition,
                    format!("fragment `{}` is defined more than once", fragment.name),
                    fragment.source_location.clone(),
                    smallvec![IssueNote::general_at("first defined here", first.source_location.clone())],
                )),
                None => {
                    fragments.insert(&fragment.name, fragment);
                },
            }
        }
        for fragment in &self.fragments {
            fragments.entry(&fragment.name).or_insert(fragment);
        }
        fragments
    }

    fn validate_fragment<'d>(
        &'d self,
        fragment: &'d ast::FragmentDefinition,
        fragments: &IndexMap<&'d str, &'d ast::FragmentDefinition>,
        issues: &mut Vec<Issue>,
    ) -> Vec<VariableUsage> {
        let mut walker = SelectionWalker::new(self.schema, fragments, None);
        validate_directives(&mut walker.coercer, &fragment.directives, DirectiveLocation::FragmentDefinition);
        let fragment_type = walker.type_condition(&fragment.type_condition);
        if let Some(fragment_type) = fragment_type {
            walker.walk_selections(&fragment.selections, fragment_type);
        }
        let (walker_issues, usages) = walker.coercer.into_parts();
        issues.extend(walker_issues);

        if fragment_type.is_some() {
            FieldsCanMerge::new(self.schema, fragments, self.strict_response_shapes, issues)
                .check(&fragment.selections, fragment_type);
        }
        usages
    }

    fn validate_operation<'d>(
        &'d self,
        operation: &'d ast::OperationDefinition,
        fragments: &IndexMap<&'d str, &'d ast::FragmentDefinition>,
        defer: &mut DeferTracker,
        issues: &mut Vec<Issue>,
    ) {
        let kind = operation.operation_kind;
        let Some(root_type) = self.schema.root_type(kind) else {
            issues.push(Issue::new(
                IssueKind::InvalidRootType,
                format!("the schema does not support {kind} operations"),
                operation.source_location.clone(),
            ));
            return;
        };

        self.validate_variable_definitions(operation, issues);

        let mut walker = SelectionWalker::new(self.schema, fragments, Some((defer, kind)));
        let location = match kind {
            OperationKind::Query => DirectiveLocation::Query,
            OperationKind::Mutation => DirectiveLocation::Mutation,
            OperationKind::Subscription => DirectiveLocation::Subscription,
        };
        validate_directives(&mut walker.coercer, &operation.directives, location);
        walker.walk_selections(&operation.selections, root_type);
        let (walker_issues, usages) = walker.coercer.into_parts();
        issues.extend(walker_issues);
        issues.extend(walker.issues);

        validate_variable_usages(operation, &usages, issues);
        FieldsCanMerge::new(self.schema, fragments, self.strict_response_shapes, issues)
            .check(&operation.selections, Some(root_type));
    }

    // https://spec.graphql.org/September2025/#sec-Validation.Variables
    fn validate_variable_definitions(&self, operation: &ast::OperationDefinition, issues: &mut Vec<Issue>) {
        let mut coercer = ValueCoercer::new(self.schema, CoercionContext::Schema);
        let mut seen: IndexMap<&str, Option<&SourceLocation>> = IndexMap::new();
        for definition in &operation.variable_definitions {
            if let Some(first) = seen.get(definition.name.as_str()) {
                coercer.push_issue(Issue::with_notes(
                    IssueKind::DuplicateDefinition,
                    format!("variable `${}` is defined more than once", definition.name),
                    definition.source_location.clone(),
                    smallvec![IssueNote::general_at("first defined here", first.cloned())],
                ));
                continue;
            }
            seen.insert(&definition.name, definition.source_location.as_ref());

            match self.schema.type_definition(definition.var_type.innermost_name()) {
                None => coercer.push_issue(Issue::new(
                    IssueKind::UnknownType,
                    format!("unknown type `{}`", definition.var_type.innermost_name()),
                    definition.var_type.source_location().or(definition.source_location.as_ref()).cloned(),
                )),
                Some(variable_type) if !variable_type.is_input_type() => coercer.push_issue(Issue::new(
                    IssueKind::InvalidVariableUsage,
                    format!(
                        "variable `${}` must have an input type, but `{}` is an output type",
                        definition.name,
                        variable_type.name(),
                    ),
                    definition.source_location.clone(),
                )),
                Some(_) => {
                    if let Some(default_value) = &definition.default_value {
                        coercer.coerce(default_value, &definition.var_type, false);
                    }
                },
            }
            validate_directives(&mut coercer, &definition.directives, DirectiveLocation::VariableDefinition);
        }
        issues.extend(coercer.into_parts().0);
    }
}

/// The definition of `field_name` on `parent_type`, including the implicit
/// meta fields.
pub(super) fn lookup_field<'d>(
    schema: &'d Schema,
    parent_type: &'d ast::TypeDefinition,
    field_name: &str,
) -> Option<&'d ast::FieldDefinition> {
    match field_name {
        "__typename" => meta_field(field_name),
        "__schema" | "__type" => {
            if schema.root_type_name(OperationKind::Query) == Some(parent_type.name()) {
                meta_field(field_name)
            } else {
                None
            }
        },
        _ => parent_type.field(field_name),
    }
}

// =============================================================================
// Document-wide checks
// =============================================================================

// https://spec.graphql.org/September2025/#sec-Operation-Name-Uniqueness
fn check_operation_names(document: &ast::Document, issues: &mut Vec<Issue>) {
    let mut seen: IndexMap<&str, &ast::OperationDefinition> = IndexMap::new();
    for operation in document.operations() {
        let Some(name) = operation.name.as_deref() else {
            issues.push(Issue::new(
                IssueKind::AnonymousOperation,
                format!("{} operations must be named", operation.operation_kind),
                operation.source_location.clone(),
            ));
            continue;
        };
        match seen.get(name) {
            Some(first) => issues.push(Issue::with_notes(
                IssueKind::DuplicateDefinition,
                format!("operation `{name}` is defined more than once"),
                operation.source_location.clone(),
                smallvec![IssueNote::general_at("first defined here", first.source_location.clone())],
            )),
            None => {
                seen.insert(name, operation);
            },
        }
    }
}

// https://spec.graphql.org/September2025/#sec-Fragment-spreads-must-not-form-cycles
fn check_fragment_cycles(fragments: &IndexMap<&str, &ast::FragmentDefinition>, issues: &mut Vec<Issue>) {
    fn spreads<'d>(selections: &'d [ast::Selection], out: &mut Vec<&'d ast::FragmentSpread>) {
        for selection in selections {
            match selection {
                ast::Selection::Field(field) => spreads(&field.selections, out),
                ast::Selection::InlineFragment(inline) => spreads(&inline.selections, out),
                ast::Selection::FragmentSpread(spread) => out.push(spread),
            }
        }
    }

    fn visit<'d>(
        name: &'d str,
        fragments: &IndexMap<&'d str, &'d ast::FragmentDefinition>,
        stack: &mut Vec<&'d str>,
        done: &mut HashSet<&'d str>,
        issues: &mut Vec<Issue>,
    ) {
        if done.contains(name) {
            return;
        }
        let Some(fragment) = fragments.get(name).copied() else {
            return;
        };
        stack.push(name);
        let mut fragment_spreads = Vec::new();
        spreads(&fragment.selections, &mut fragment_spreads);
        for spread in fragment_spreads {
            if let Some(start) = stack.iter().position(|entry| *entry == spread.name) {
                let mut cycle = stack[start..].to_vec();
                cycle.push(&spread.name);
                issues.push(Issue::new(
                    IssueKind::InvalidFragmentSpread,
                    format!(
                        "fragment `{}` spreads itself through `{}`",
                        spread.name,
                        cycle.join(" -> "),
                    ),
                    spread.source_location.clone(),
                ));
            } else {
                visit(&spread.name, fragments, stack, done, issues);
            }
        }
        stack.pop();
        done.insert(name);
    }

    let mut done = HashSet::new();
    for &name in fragments.keys() {
        visit(name, fragments, &mut Vec::new(), &mut done, issues);
    }
}

/// Drops repeats of an issue reported at the same location, which happen
/// when a fragment is checked both on its own and inside each operation
/// that spreads it.
fn dedupe(issues: Vec<Issue>) -> Vec<Issue> {
    let mut seen = HashSet::new();
    issues
        .into_iter()
        .filter(|issue| match issue.location() {
            Some(location) => seen.insert((issue.kind(), issue.message().to_string(), location.clone())),
            None => true,
        })
        .collect()
}

// =============================================================================
// Selection walking
// =============================================================================

struct SelectionWalker<'d, 'w> {
    schema: &'d Schema,
    fragments: &'w IndexMap<&'d str, &'d ast::FragmentDefinition>,
    coercer: ValueCoercer<'d>,

    /// Set when walking an operation: fragment spreads are expanded in place
    /// and `@defer` is tracked. Standalone fragments leave both off.
    operation: Option<(&'w mut DeferTracker, OperationKind)>,
    fragment_stack: Vec<&'d str>,
    path: Vec<&'d str>,
    issues: Vec<Issue>,
}

impl<'d, 'w> SelectionWalker<'d, 'w> {
    fn new(
        schema: &'d Schema,
        fragments: &'w IndexMap<&'d str, &'d ast::FragmentDefinition>,
        operation: Option<(&'w mut DeferTracker, OperationKind)>,
    ) -> Self {
        Self {
            schema,
            fragments,
            coercer: ValueCoercer::new(schema, CoercionContext::Executable),
            operation,
            fragment_stack: Vec::new(),
            path: Vec::new(),
            issues: Vec::new(),
        }
    }

    fn push(&mut self, issue: Issue) {
        self.coercer.push_issue(issue);
    }

    fn walk_selections(&mut self, selections: &'d [ast::Selection], parent_type: &'d ast::TypeDefinition) {
        for selection in selections {
            match selection {
                ast::Selection::Field(field) => self.walk_field(field, parent_type),
                ast::Selection::InlineFragment(inline) => {
                    validate_directives(&mut self.coercer, &inline.directives, DirectiveLocation::InlineFragment);
                    let fragment_type = match &inline.type_condition {
                        Some(condition) => match self.type_condition(condition) {
                            Some(fragment_type) => fragment_type,
                            None => continue,
                        },
                        None => parent_type,
                    };
                    self.check_applicable(parent_type, fragment_type, "an inline fragment", inline.source_location.as_ref());
                    self.visit_defer(&inline.directives);
                    self.walk_selections(&inline.selections, fragment_type);
                },
                ast::Selection::FragmentSpread(spread) => self.walk_fragment_spread(spread, parent_type),
            }
        }
    }

    fn walk_fragment_spread(&mut self, spread: &'d ast::FragmentSpread, parent_type: &'d ast::TypeDefinition) {
        validate_directives(&mut self.coercer, &spread.directives, DirectiveLocation::FragmentSpread);
        let Some(fragment) = self.fragments.get(spread.name.as_str()).copied() else {
            self.push(Issue::new(
                IssueKind::UnknownFragment,
                format!("unknown fragment `{}`", spread.name),
                spread.source_location.clone(),
            ));
            return;
        };
        // Bad type conditions are reported with the fragment itself.
        let Some(fragment_type) = self
            .schema
            .type_definition(&fragment.type_condition.name)
            .filter(|fragment_type| fragment_type.is_composite())
        else {
            return;
        };
        self.check_applicable(
            parent_type,
            fragment_type,
            &format!("fragment `{}`", spread.name),
            spread.source_location.as_ref(),
        );
        self.visit_defer(&spread.directives);

        let name = fragment.name.as_str();
        if self.operation.is_some() && !self.fragment_stack.contains(&name) {
            self.fragment_stack.push(name);
            self.walk_selections(&fragment.selections, fragment_type);
            self.fragment_stack.pop();
        }
    }

    // https://spec.graphql.org/September2025/#sec-Field-Selections
    // https://spec.graphql.org/September2025/#sec-Leaf-Field-Selections
    fn walk_field(&mut self, field: &'d ast::Field, parent_type: &'d ast::TypeDefinition) {
        let parent_name = parent_type.name();
        validate_directives(&mut self.coercer, &field.directives, DirectiveLocation::Field);
        self.visit_defer(&field.directives);

        let Some(definition) = lookup_field(self.schema, parent_type, &field.name) else {
            let message = if field.name.starts_with("__") && meta_field(&field.name).is_some() {
                format!("`{}` can only be selected on the query root type", field.name)
            } else {
                format!("`{parent_name}` has no field `{}`", field.name)
            };
            self.push(Issue::new(IssueKind::UnknownField, message, field.source_location.clone()));
            return;
        };

        let location = field.source_location.as_ref();
        self.coercer.check_deprecated(
            &definition.directives,
            || format!("field `{parent_name}.{}`", field.name),
            location,
        );
        validate_arguments(
            &mut self.coercer,
            &field.arguments,
            &definition.arguments,
            &format!("field `{parent_name}.{}`", field.name),
            location,
        );

        let type_name = definition.field_type.innermost_name();
        let Some(field_type) = self.schema.type_definition(type_name) else {
            return;
        };
        if field_type.is_leaf() {
            if !field.selections.is_empty() {
                self.push(Issue::new(
                    IssueKind::InvalidSelection,
                    format!(
                        "field `{parent_name}.{}` returns the leaf type `{type_name}` and cannot have a selection set",
                        field.name,
                    ),
                    location.cloned(),
                ));
            }
        } else if field.selections.is_empty() {
            self.push(Issue::new(
                IssueKind::InvalidSelection,
                format!(
                    "field `{parent_name}.{}` returns `{type_name}` and must have a selection set",
                    field.name,
                ),
                location.cloned(),
            ));
        } else {
            self.path.push(field.response_key());
            self.walk_selections(&field.selections, field_type);
            self.path.pop();
        }
    }

    /// Resolves a fragment's type condition, reporting it if it isn't a
    /// composite type.
    fn type_condition(&mut self, condition: &'d ast::NamedType) -> Option<&'d ast::TypeDefinition> {
        match self.schema.type_definition(&condition.name) {
            None => {
                self.push(Issue::new(
                    IssueKind::UnknownType,
                    format!("unknown type `{}`", condition.name),
                    condition.source_location.clone(),
                ));
                None
            },
            Some(condition_type) if !condition_type.is_composite() => {
                self.push(Issue::new(
                    IssueKind::InvalidFragmentSpread,
                    format!(
                        "fragments cannot be conditioned on `{}` because it is a {}",
                        condition.name,
                        condition_type.kind_name(),
                    ),
                    condition.source_location.clone(),
                ));
                None
            },
            Some(condition_type) => Some(condition_type),
        }
    }

    // https://spec.graphql.org/September2025/#sec-Fragment-spread-is-possible
    fn check_applicable(
        &mut self,
        parent_type: &ast::TypeDefinition,
        fragment_type: &ast::TypeDefinition,
        what: &str,
        location: Option<&SourceLocation>,
    ) {
        let parent_possible = self.schema.possible_types(parent_type.name());
        let fragment_possible = self.schema.possible_types(fragment_type.name());
        if parent_possible.is_disjoint(&fragment_possible) {
            self.push(Issue::new(
                IssueKind::InvalidFragmentSpread,
                format!(
                    "{what} on `{}` can never apply within `{}`",
                    fragment_type.name(),
                    parent_type.name(),
                ),
                location.cloned(),
            ));
        }
    }

    fn visit_defer(&mut self, directives: &[ast::Directive]) {
        let Some((tracker, kind)) = &mut self.operation else {
            return;
        };
        let path = self.path.join(".");
        for directive in directives.iter().filter(|directive| directive.name == "defer") {
            tracker.visit(directive, &path, *kind, &mut self.issues);
        }
    }
}
