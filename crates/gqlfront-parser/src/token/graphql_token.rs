use crate::token::GraphQLTokenKind;

/// A token together with the position it was scanned from.
///
/// Tokens are transient: the parser turns them into AST nodes and drops them.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphQLToken {
    pub kind: GraphQLTokenKind,

    /// Byte offset of the first character of the token.
    pub start: usize,

    /// Byte offset one past the last character of the token.
    pub end: usize,

    /// 1-based line of the first character.
    pub line: usize,

    /// 1-based character column of the first character.
    pub column: usize,
}

impl GraphQLToken {
    /// Returns `true` if this is a [`GraphQLTokenKind::Name`] with the given
    /// text.
    pub fn is_name(&self, name: &str) -> bool {
        matches!(&self.kind, GraphQLTokenKind::Name(n) if n == name)
    }
}
