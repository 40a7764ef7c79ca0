use crate::ast::Node;

/// What a [`NodeTransformer`] wants done with the node it was shown.
#[derive(Clone, Debug, PartialEq)]
pub enum TransformResult {
    /// Keep the node, transforming its children.
    Continue,
    /// Substitute this node. Its children are not visited.
    Replace(Node),
    /// Remove the node from its parent's children.
    Delete,
}

/// A visitor that rewrites an AST.
///
/// Any `FnMut(&Node) -> TransformResult` closure is a transformer.
pub trait NodeTransformer {
    fn transform(&mut self, node: &Node) -> TransformResult;
}

impl<F> NodeTransformer for F
where
    F: FnMut(&Node) -> TransformResult,
{
    fn transform(&mut self, node: &Node) -> TransformResult {
        self(node)
    }
}

/// Rewrites `node` top-down.
///
/// The transformer sees each node before its children. Returns `None` when
/// the root itself is deleted. The input tree is never modified.
///
/// ```
/// # use gqlfront_parser::GraphQLParser;
/// # use gqlfront_parser::ast::{self, Node, Selection, TransformResult};
/// let document = GraphQLParser::new("{ a b }")
///     .parse_document()
///     .into_value()
///     .unwrap();
/// let without_b = ast::transform(&Node::Document(document), &mut |node: &Node| {
///     match node {
///         Node::Selection(Selection::Field(field)) if field.name == "b" => {
///             TransformResult::Delete
///         },
///         _ => TransformResult::Continue,
///     }
/// });
/// assert!(without_b.is_some());
/// ```
pub fn transform(node: &Node, transformer: &mut impl NodeTransformer) -> Option<Node> {
    match transformer.transform(node) {
        TransformResult::Continue => {
            let children = node
                .children()
                .iter()
                .filter_map(|child| transform(child, transformer))
                .collect();
            Some(node.copy_with_new_children(children))
        },
        TransformResult::Replace(replacement) => Some(replacement),
        TransformResult::Delete => None,
    }
}

/// Rewrites `node` bottom-up: children are rebuilt first and the transformer
/// then sees the rebuilt node, so a replacement can be derived from already
/// rewritten children.
#[doc(hidden)]
pub fn transform_children_first(
    node: &Node,
    transformer: &mut impl NodeTransformer,
) -> Option<Node> {
    let children = node
        .children()
        .iter()
        .filter_map(|child| transform_children_first(child, transformer))
        .collect();
    let rebuilt = node.copy_with_new_children(children);
    match transformer.transform(&rebuilt) {
        TransformResult::Continue => Some(rebuilt),
        TransformResult::Replace(replacement) => Some(replacement),
        TransformResult::Delete => None,
    }
}
