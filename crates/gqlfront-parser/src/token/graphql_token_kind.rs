use std::fmt;

/// The kind of a [`GraphQLToken`](crate::token::GraphQLToken), carrying the
/// decoded payload for names, numbers, and strings.
///
/// `true`, `false`, and `null` are scanned as [`Name`](Self::Name)s; the
/// parser decides whether they're keywords in context.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphQLTokenKind {
    Ampersand,
    At,
    Bang,
    Colon,
    CurlyBraceClose,
    CurlyBraceOpen,
    Dollar,
    Ellipsis,
    Equals,
    ParenClose,
    ParenOpen,
    Pipe,
    SquareBracketClose,
    SquareBracketOpen,

    Name(String),

    /// A 32-bit integer literal.
    Int(i32),

    Float(f64),

    /// A string literal with escapes decoded. For block strings this is the
    /// normalized block-string value.
    String(String),

    Eof,
}

impl GraphQLTokenKind {
    /// Describes this token in error messages, e.g. `` `{` `` or
    /// `` name `foo` ``.
    pub fn describe(&self) -> String {
        match self {
            Self::Name(name) => format!("name `{name}`"),
            Self::Int(value) => format!("integer `{value}`"),
            Self::Float(value) => format!("float `{value}`"),
            Self::String(_) => "string".to_string(),
            Self::Eof => "end of input".to_string(),
            punctuator => format!("`{punctuator}`"),
        }
    }
}

impl fmt::Display for GraphQLTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Ampersand => "&",
            Self::At => "@",
            Self::Bang => "!",
            Self::Colon => ":",
            Self::CurlyBraceClose => "}",
            Self::CurlyBraceOpen => "{",
            Self::Dollar => "$",
            Self::Ellipsis => "...",
            Self::Equals => "=",
            Self::ParenClose => ")",
            Self::ParenOpen => "(",
            Self::Pipe => "|",
            Self::SquareBracketClose => "]",
            Self::SquareBracketOpen => "[",
            Self::Name(name) => return f.write_str(name),
            Self::Int(value) => return write!(f, "{value}"),
            Self::Float(value) => return write!(f, "{value}"),
            Self::String(value) => return write!(f, "{value:?}"),
            Self::Eof => "<EOF>",
        };
        f.write_str(text)
    }
}
