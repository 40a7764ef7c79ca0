use crate::ast::Node;
use crate::SourceLocation;

/// Trait implemented by every AST node type (and by the category enums and
/// [`Node`] itself).
///
/// All node types implement this trait via `#[inherent] impl AstNode`, so the
/// methods are callable without importing the trait while still giving
/// generic code (the [`transform`](crate::ast::transform()) driver, the SDL
/// writer) a common bound.
///
/// # The children contract
///
/// [`children`](AstNode::children) returns the node's structurally-owned
/// sub-nodes, grouped by kind in a fixed order (e.g. a field returns its
/// arguments, then its directives, then its selections). Payload data that
/// isn't a node (names, descriptions, scalars) is not a child.
///
/// [`rebuild`](AstNode::rebuild) is the inverse: it takes children of each
/// kind back out of a [`NodeContainer`] and returns a copy of `self` with
/// those children in place. [`copy_with_new_children`] wraps it and asserts
/// that every child was consumed, which is what lets the transform driver
/// rewrite any node without per-kind code.
///
/// [`copy_with_new_children`]: AstNode::copy_with_new_children
pub trait AstNode: Sized {
    /// The location this node was parsed from, or `None` when source
    /// locations were discarded.
    fn source_location(&self) -> Option<&SourceLocation>;

    /// The node's structurally-owned sub-nodes, in serialization order.
    fn children(&self) -> Vec<Node>;

    /// Returns a copy of `self` whose children are taken from `container`.
    ///
    /// A required child that's missing from the container (because a
    /// transform deleted it) keeps its previous value.
    fn rebuild(&self, container: &mut NodeContainer) -> Self;

    /// Returns a copy of `self` with `children` in place of its current
    /// children.
    ///
    /// # Panics
    ///
    /// Panics if any of `children` is of a kind this node doesn't own.
    fn copy_with_new_children(&self, children: Vec<Node>) -> Self {
        let mut container = NodeContainer::new(children);
        let rebuilt = self.rebuild(&mut container);
        container.assert_consumed();
        rebuilt
    }
}

/// Conversion from the [`Node`] enum back into a concrete node (or category)
/// type. Used by [`NodeContainer`] to filter children by kind.
pub trait FromNode: Sized {
    /// Returns `Err(node)` unchanged when `node` isn't a `Self`.
    fn from_node(node: Node) -> Result<Self, Node>;
}

/// A bag of children handed to [`AstNode::rebuild`].
pub struct NodeContainer {
    remaining: Vec<Node>,
}

impl NodeContainer {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            remaining: children,
        }
    }

    /// Takes every remaining child of kind `T`, preserving order.
    pub fn take<T: FromNode>(&mut self) -> Vec<T> {
        let mut taken = Vec::new();
        let mut rest = Vec::with_capacity(self.remaining.len());
        for node in std::mem::take(&mut self.remaining) {
            match T::from_node(node) {
                Ok(child) => taken.push(child),
                Err(node) => rest.push(node),
            }
        }
        self.remaining = rest;
        taken
    }

    /// Takes the first remaining child of kind `T`, if any.
    pub fn take_single<T: FromNode>(&mut self) -> Option<T> {
        let mut found = None;
        let mut rest = Vec::with_capacity(self.remaining.len());
        for node in std::mem::take(&mut self.remaining) {
            if found.is_some() {
                rest.push(node);
                continue;
            }
            match T::from_node(node) {
                Ok(child) => found = Some(child),
                Err(node) => rest.push(node),
            }
        }
        self.remaining = rest;
        found
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Panics if any child was left unconsumed.
    pub fn assert_consumed(self) {
        assert!(
            self.remaining.is_empty(),
            "copy_with_new_children: {} child node(s) left unconsumed: {:?}",
            self.remaining.len(),
            self.remaining,
        );
    }
}
