//! The scanner (lexer): turns source text into [`GraphQLToken`]s.
//!
//! Whitespace, commas, byte-order marks, and `#` comments are skipped
//! between tokens. String tokens carry their decoded value; block strings are
//! normalized with [`normalize_block_string`].
//!
//! ```rust
//! use gqlfront_parser::scanner::Scanner;
//! use gqlfront_parser::token::GraphQLTokenKind;
//!
//! let mut scanner = Scanner::new("{ name }");
//! assert_eq!(scanner.scan().unwrap().kind, GraphQLTokenKind::CurlyBraceOpen);
//! assert_eq!(
//!     scanner.scan().unwrap().kind,
//!     GraphQLTokenKind::Name("name".to_string()),
//! );
//! ```

use crate::smallvec;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use crate::GraphQLParseError;
use crate::GraphQLParseErrorKind;
use crate::IssueNote;
use crate::SourceLocation;
use std::sync::Arc;

/// Scans tokens from a `&str` one at a time via [`scan`](Self::scan).
///
/// After the end of input has been reached, every further call returns another
/// [`GraphQLTokenKind::Eof`] token.
pub struct Scanner<'src> {
    /// The full source text being scanned.
    source: &'src str,

    /// Current byte offset from the start of `source`.
    curr_byte_offset: usize,

    /// Current 1-based line number.
    curr_line: usize,

    /// Current 1-based character column.
    curr_column: usize,

    /// Whether the previous character was `\r`, so that `\r\n` counts as a
    /// single line break.
    last_char_was_cr: bool,

    /// Optional file path for error locations.
    file_path: Option<Arc<str>>,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
            curr_line: 1,
            curr_column: 1,
            last_char_was_cr: false,
            file_path: None,
        }
    }

    /// Creates a scanner whose error locations name `file_path`.
    pub fn with_file_path(source: &'src str, file_path: Option<Arc<str>>) -> Self {
        Self {
            file_path,
            ..Self::new(source)
        }
    }

    // =========================================================================
    // Position and scanning helpers
    // =========================================================================

    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn peek_char_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Consumes the next character, updating line/column tracking.
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;

        if ch == '\n' {
            if self.last_char_was_cr {
                // Second half of `\r\n`: the line was already counted.
                self.last_char_was_cr = false;
            } else {
                self.curr_line += 1;
                self.curr_column = 1;
            }
        } else if ch == '\r' {
            self.curr_line += 1;
            self.curr_column = 1;
            self.last_char_was_cr = true;
        } else {
            self.curr_column += 1;
            self.last_char_was_cr = false;
        }

        self.curr_byte_offset += ch.len_utf8();
        Some(ch)
    }

    fn make_token(&self, kind: GraphQLTokenKind, start: TokenStart) -> GraphQLToken {
        GraphQLToken {
            kind,
            start: start.byte_offset,
            end: self.curr_byte_offset,
            line: start.line,
            column: start.column,
        }
    }

    fn token_start(&self) -> TokenStart {
        TokenStart {
            byte_offset: self.curr_byte_offset,
            line: self.curr_line,
            column: self.curr_column,
        }
    }

    fn location_from(&self, start: TokenStart) -> SourceLocation {
        SourceLocation {
            start: start.byte_offset,
            end: self.curr_byte_offset.max(start.byte_offset),
            line: start.line,
            column: start.column,
            file_path: self.file_path.clone(),
        }
    }

    fn error(&self, message: impl Into<String>, start: TokenStart) -> GraphQLParseError {
        GraphQLParseError::new(message, self.location_from(start), GraphQLParseErrorKind::Lexical)
    }

    // =========================================================================
    // Scanner main loop
    // =========================================================================

    /// Scans the next token, skipping ignored characters first.
    pub fn scan(&mut self) -> Result<GraphQLToken, GraphQLParseError> {
        self.skip_ignored();
        let start = self.token_start();

        let punctuator = match self.peek_char() {
            None => return Ok(self.make_token(GraphQLTokenKind::Eof, start)),
            Some('!') => GraphQLTokenKind::Bang,
            Some('$') => GraphQLTokenKind::Dollar,
            Some('&') => GraphQLTokenKind::Ampersand,
            Some('(') => GraphQLTokenKind::ParenOpen,
            Some(')') => GraphQLTokenKind::ParenClose,
            Some(':') => GraphQLTokenKind::Colon,
            Some('=') => GraphQLTokenKind::Equals,
            Some('@') => GraphQLTokenKind::At,
            Some('[') => GraphQLTokenKind::SquareBracketOpen,
            Some(']') => GraphQLTokenKind::SquareBracketClose,
            Some('{') => GraphQLTokenKind::CurlyBraceOpen,
            Some('}') => GraphQLTokenKind::CurlyBraceClose,
            Some('|') => GraphQLTokenKind::Pipe,
            Some('.') => return self.scan_ellipsis(start),
            Some('"') => return self.scan_string(start),
            Some(c) if is_name_start(c) => return Ok(self.scan_name(start)),
            Some(c) if c == '-' || c.is_ascii_digit() => return self.scan_number(start),
            Some(c) => {
                self.consume();
                return Err(self.error(format!("Unexpected character {}", describe_char(c)), start));
            },
        };

        self.consume();
        Ok(self.make_token(punctuator, start))
    }

    // =========================================================================
    // Ignored characters
    // =========================================================================

    /// Skips whitespace, line terminators, commas, BOMs, and comments.
    fn skip_ignored(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                ' ' | '\t' | '\n' | '\r' | ',' | '\u{FEFF}' => {
                    self.consume();
                },
                '#' => self.skip_comment(),
                _ => break,
            }
        }
    }

    /// Skips a `#` comment up to (not including) the line terminator.
    fn skip_comment(&mut self) {
        let rest = self.remaining();
        let len = memchr::memchr2(b'\n', b'\r', rest.as_bytes()).unwrap_or(rest.len());
        // Comments never span lines, so only the column moves.
        self.curr_column += rest[..len].chars().count();
        self.curr_byte_offset += len;
        self.last_char_was_cr = false;
    }

    // =========================================================================
    // Ellipsis
    // =========================================================================

    fn scan_ellipsis(&mut self, start: TokenStart) -> Result<GraphQLToken, GraphQLParseError> {
        if self.remaining().starts_with("...") {
            self.consume();
            self.consume();
            self.consume();
            return Ok(self.make_token(GraphQLTokenKind::Ellipsis, start));
        }

        let dots = if self.peek_char_nth(1) == Some('.') { 2 } else { 1 };
        for _ in 0..dots {
            self.consume();
        }
        let (message, help) = if dots == 2 {
            ("Unexpected `..`", "Add one more `.` to form the spread operator `...`")
        } else {
            ("Unexpected `.`", "Use `...` for fragment spreads and inline fragments")
        };
        Err(GraphQLParseError::with_notes(
            message,
            self.location_from(start),
            GraphQLParseErrorKind::Lexical,
            smallvec![IssueNote::help(help)],
        ))
    }

    // =========================================================================
    // Names
    // =========================================================================

    fn scan_name(&mut self, start: TokenStart) -> GraphQLToken {
        let name_start = self.curr_byte_offset;
        self.consume();
        while let Some(ch) = self.peek_char() {
            if !is_name_continue(ch) {
                break;
            }
            self.consume();
        }
        let name = &self.source[name_start..self.curr_byte_offset];
        self.make_token(GraphQLTokenKind::Name(name.to_string()), start)
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    fn consume_digits(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !ch.is_ascii_digit() {
                break;
            }
            self.consume();
        }
    }

    fn scan_number(&mut self, start: TokenStart) -> Result<GraphQLToken, GraphQLParseError> {
        let num_start = self.curr_byte_offset;
        let mut is_float = false;

        if self.peek_char() == Some('-') {
            self.consume();
        }

        match self.peek_char() {
            Some('0') => {
                self.consume();
                if matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
                    self.consume_digits();
                    let mut error = self.error(
                        format!(
                            "Invalid number `{}`: leading zeros are not allowed",
                            &self.source[num_start..self.curr_byte_offset],
                        ),
                        start,
                    );
                    error.add_spec("https://spec.graphql.org/September2025/#sec-Int-Value");
                    return Err(error);
                }
            },
            Some(ch) if ch.is_ascii_digit() => self.consume_digits(),
            _ => return Err(self.error("Unexpected `-`", start)),
        }

        if self.peek_char() == Some('.') {
            self.consume();
            if !matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
                return Err(self.error(
                    "Invalid number: expected a digit after `.`",
                    start,
                ));
            }
            is_float = true;
            self.consume_digits();
        }

        if matches!(self.peek_char(), Some('e') | Some('E')) {
            self.consume();
            if matches!(self.peek_char(), Some('+') | Some('-')) {
                self.consume();
            }
            if !matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
                let mut error = self.error(
                    "Invalid number: exponent must have at least one digit",
                    start,
                );
                error.add_spec("https://spec.graphql.org/September2025/#sec-Float-Value");
                return Err(error);
            }
            is_float = true;
            self.consume_digits();
        }

        let num_text = &self.source[num_start..self.curr_byte_offset];

        // A number must not run straight into a name or another `.`.
        if let Some(ch) = self.peek_char()
            && (is_name_start(ch) || ch == '.')
        {
            self.consume();
            return Err(self.error(
                format!("Invalid number: unexpected {} after `{num_text}`", describe_char(ch)),
                start,
            ));
        }

        let kind = if is_float {
            match num_text.parse::<f64>() {
                Ok(value) if value.is_finite() => GraphQLTokenKind::Float(value),
                Ok(_) => {
                    return Err(self.error(
                        format!("Float `{num_text}` does not fit in a 64-bit float"),
                        start,
                    ));
                },
                Err(_) => {
                    return Err(self.error(format!("Invalid float `{num_text}`"), start));
                },
            }
        } else {
            match num_text.parse::<i32>() {
                Ok(value) => GraphQLTokenKind::Int(value),
                Err(_) => {
                    return Err(self.error(
                        format!("Integer `{num_text}` does not fit in a 32-bit signed integer"),
                        start,
                    ));
                },
            }
        };

        Ok(self.make_token(kind, start))
    }

    // =========================================================================
    // Strings
    // =========================================================================

    fn scan_string(&mut self, start: TokenStart) -> Result<GraphQLToken, GraphQLParseError> {
        if self.remaining().starts_with("\"\"\"") {
            return self.scan_block_string(start);
        }

        self.consume();
        let mut value = String::new();

        loop {
            match self.peek_char() {
                None => {
                    return Err(GraphQLParseError::with_notes(
                        "Unterminated string literal",
                        self.location_from(start),
                        GraphQLParseErrorKind::Lexical,
                        smallvec![IssueNote::help("Add closing `\"`")],
                    ));
                },
                Some('\n') | Some('\r') => {
                    return Err(GraphQLParseError::with_notes(
                        "Unterminated string literal",
                        self.location_from(start),
                        GraphQLParseErrorKind::Lexical,
                        smallvec![IssueNote::help(
                            "Use a block string (triple quotes) for multi-line strings, or \
                             escape the newline with `\\n`"
                        )],
                    ));
                },
                Some('"') => {
                    self.consume();
                    break;
                },
                Some('\\') => {
                    let escape_start = self.token_start();
                    self.consume();
                    let decoded = self.scan_escape(escape_start)?;
                    value.push(decoded);
                },
                Some(ch) => {
                    self.consume();
                    value.push(ch);
                },
            }
        }

        Ok(self.make_token(GraphQLTokenKind::String(value), start))
    }

    /// Decodes the escape sequence following a `\` (already consumed).
    fn scan_escape(&mut self, escape_start: TokenStart) -> Result<char, GraphQLParseError> {
        let decoded = match self.consume() {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{0008}',
            Some('f') => '\u{000C}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => return self.scan_unicode_escape(escape_start),
            Some(other) => {
                return Err(self.error(
                    format!("Invalid escape sequence `\\{other}`"),
                    escape_start,
                ));
            },
            None => return Err(self.error("Unterminated escape sequence", escape_start)),
        };
        Ok(decoded)
    }

    /// Decodes `\uXXXX` (including surrogate pairs) and `\u{...}`.
    fn scan_unicode_escape(&mut self, escape_start: TokenStart) -> Result<char, GraphQLParseError> {
        if self.peek_char() == Some('{') {
            self.consume();
            let mut code_point: u32 = 0;
            let mut digit_count = 0;
            loop {
                match self.consume() {
                    Some('}') if digit_count > 0 => break,
                    Some(ch) if ch.is_ascii_hexdigit() && digit_count < 8 => {
                        code_point = code_point * 16 + ch.to_digit(16).unwrap_or(0);
                        digit_count += 1;
                    },
                    _ => {
                        return Err(self.error("Invalid Unicode escape sequence", escape_start));
                    },
                }
            }
            return char::from_u32(code_point).ok_or_else(|| {
                self.error(
                    format!("Invalid Unicode code point U+{code_point:X}"),
                    escape_start,
                )
            });
        }

        let high = self.scan_four_hex_digits(escape_start)?;
        if (0xD800..=0xDBFF).contains(&high) {
            if self.remaining().starts_with("\\u") {
                self.consume();
                self.consume();
                let low = self.scan_four_hex_digits(escape_start)?;
                if (0xDC00..=0xDFFF).contains(&low) {
                    let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    if let Some(ch) = char::from_u32(combined) {
                        return Ok(ch);
                    }
                }
            }
            return Err(self.error(
                format!("Invalid Unicode escape: unpaired surrogate U+{high:04X}"),
                escape_start,
            ));
        }

        char::from_u32(high).ok_or_else(|| {
            self.error(format!("Invalid Unicode code point U+{high:04X}"), escape_start)
        })
    }

    fn scan_four_hex_digits(&mut self, escape_start: TokenStart) -> Result<u32, GraphQLParseError> {
        let mut value: u32 = 0;
        for _ in 0..4 {
            match self.consume() {
                Some(ch) if ch.is_ascii_hexdigit() => {
                    value = value * 16 + ch.to_digit(16).unwrap_or(0);
                },
                _ => {
                    return Err(self.error(
                        "Invalid Unicode escape: expected four hex digits",
                        escape_start,
                    ));
                },
            }
        }
        Ok(value)
    }

    fn scan_block_string(&mut self, start: TokenStart) -> Result<GraphQLToken, GraphQLParseError> {
        self.consume();
        self.consume();
        self.consume();

        let mut raw = String::new();
        loop {
            if self.remaining().starts_with("\"\"\"") {
                self.consume();
                self.consume();
                self.consume();
                break;
            }
            if self.remaining().starts_with("\\\"\"\"") {
                for _ in 0..4 {
                    self.consume();
                }
                raw.push_str("\"\"\"");
                continue;
            }
            match self.consume() {
                Some(ch) => raw.push(ch),
                None => {
                    return Err(GraphQLParseError::with_notes(
                        "Unterminated block string",
                        self.location_from(start),
                        GraphQLParseErrorKind::Lexical,
                        smallvec![IssueNote::help("Add closing `\"\"\"`")],
                    ));
                },
            }
        }

        let value = normalize_block_string(&raw);
        Ok(self.make_token(GraphQLTokenKind::String(value), start))
    }
}

/// Position captured at the start of a token.
#[derive(Clone, Copy)]
struct TokenStart {
    byte_offset: usize,
    line: usize,
    column: usize,
}

// =============================================================================
// Block strings
// =============================================================================

/// Applies the GraphQL block-string algorithm to the raw text between `"""`
/// delimiters.
///
/// The common indentation of every line except the first is removed, blank
/// leading and trailing lines are dropped, and lines are rejoined with `\n`.
///
/// See <https://spec.graphql.org/September2025/#BlockStringValue()>.
pub fn normalize_block_string(raw: &str) -> String {
    let lines = split_lines(raw);

    let common_indent = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let indent = leading_whitespace(line);
            (indent < line.len()).then_some(indent)
        })
        .min();

    let mut stripped: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(index, line)| match common_indent {
            Some(indent) if index > 0 => line.get(indent..).unwrap_or(""),
            _ => line,
        })
        .collect();

    while stripped.first().is_some_and(|line| is_blank(line)) {
        stripped.remove(0);
    }
    while stripped.last().is_some_and(|line| is_blank(line)) {
        stripped.pop();
    }

    stripped.join("\n")
}

fn split_lines(raw: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut line_start = 0;
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&raw[line_start..i]);
                line_start = i + 1;
            },
            b'\r' => {
                lines.push(&raw[line_start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                line_start = i + 1;
            },
            _ => {},
        }
        i += 1;
    }
    lines.push(&raw[line_start..]);
    lines
}

/// Number of leading space/tab bytes.
fn leading_whitespace(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ' || *b == b'\t').count()
}

fn is_blank(line: &str) -> bool {
    leading_whitespace(line) == line.len()
}

// =============================================================================
// Helper functions
// =============================================================================

fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

fn is_name_continue(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

fn describe_char(ch: char) -> String {
    if ch.is_control() || (ch.is_whitespace() && ch != ' ') {
        format!("`{}` (U+{:04X})", ch.escape_debug(), ch as u32)
    } else {
        format!("`{ch}`")
    }
}
