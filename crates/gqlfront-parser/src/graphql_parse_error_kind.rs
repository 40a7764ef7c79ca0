/// Categorizes a [`GraphQLParseError`](crate::GraphQLParseError) for
/// programmatic handling.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphQLParseErrorKind {
    /// The scanner rejected the input (bad character, unterminated string,
    /// malformed or out-of-range number, invalid escape, ...).
    #[error("lexical error")]
    Lexical,

    /// A token other than the expected one was found.
    #[error("unexpected token: `{found}`")]
    UnexpectedToken {
        expected: Vec<String>,
        found: String,
    },

    /// Input ended while more tokens were required.
    #[error("unexpected end of input")]
    UnexpectedEof {
        expected: Vec<String>,
    },

    /// A construct that must contain something was empty, e.g. `()` or an
    /// `extend type Foo` that adds nothing.
    #[error("invalid empty construct: `{construct}`")]
    InvalidEmptyConstruct {
        construct: String,
    },

    /// A name that the grammar reserves in this position, e.g. an enum value
    /// named `true`, or a fragment named `on`.
    #[error("reserved name: `{name}`")]
    ReservedName {
        name: String,
    },

    /// Nesting deeper than the parser allows.
    #[error("nesting too deep")]
    NestingTooDeep,

    /// Any other grammar violation.
    #[error("invalid syntax")]
    InvalidSyntax,
}
