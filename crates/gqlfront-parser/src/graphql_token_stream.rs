//! Buffered token stream over a [`Scanner`] with bounded lookahead.

use crate::scanner::Scanner;
use crate::token::GraphQLToken;
use crate::GraphQLParseError;
use std::collections::VecDeque;

/// Wraps a [`Scanner`] and buffers tokens so the parser can peek past the
/// current token.
///
/// Tokens are stored in a [`VecDeque`]. Unconsumed tokens are buffered at the
/// back; `consume()` pops from the front. The parser only ever looks one
/// token past the current one, so the buffer never holds more than two.
pub(crate) struct GraphQLTokenStream<'src> {
    scanner: Scanner<'src>,
    buffer: VecDeque<GraphQLToken>,

    /// Byte offset one past the most recently consumed token, used to close
    /// the source location of the node being parsed.
    last_end: usize,
}

impl<'src> GraphQLTokenStream<'src> {
    pub(crate) fn new(scanner: Scanner<'src>) -> Self {
        Self {
            scanner,
            buffer: VecDeque::with_capacity(2),
            last_end: 0,
        }
    }

    /// Advances past the current token and returns it.
    pub(crate) fn consume(&mut self) -> Result<GraphQLToken, GraphQLParseError> {
        self.ensure_buffer_has(1)?;
        let token = match self.buffer.pop_front() {
            Some(token) => token,
            None => self.scanner.scan()?,
        };
        self.last_end = token.end;
        Ok(token)
    }

    /// Fills the buffer to at least `count` tokens. The scanner yields `Eof`
    /// forever once input runs out, so this always succeeds unless the
    /// scanner reports a lexical error.
    fn ensure_buffer_has(&mut self, count: usize) -> Result<(), GraphQLParseError> {
        while self.buffer.len() < count {
            let token = self.scanner.scan()?;
            self.buffer.push_back(token);
        }
        Ok(())
    }

    pub(crate) fn last_end(&self) -> usize {
        self.last_end
    }

    /// The current (next unconsumed) token.
    #[inline]
    pub(crate) fn peek(&mut self) -> Result<&GraphQLToken, GraphQLParseError> {
        self.peek_nth(0)
    }

    /// The token `n` positions past the current one; `peek_nth(0)` is
    /// `peek()`.
    pub(crate) fn peek_nth(&mut self, n: usize) -> Result<&GraphQLToken, GraphQLParseError> {
        self.ensure_buffer_has(n + 1)?;
        Ok(&self.buffer[n])
    }
}
