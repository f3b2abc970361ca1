//! The delimiter-aware tokenizer.
//!
//! A buffer is split into an ordered, gapless sequence of tokens: every
//! delimiter byte is its own one-byte `Delimiter` token, and every maximal run
//! of non-delimiter bytes is one `Word` token. Runs of delimiters therefore stay
//! as adjacent single-byte tokens, which keeps spacing exact on reconstruction.

use crate::kernels::escape::ByteSet;

/// The delimiters of the standard (minimal container) format.
pub const STANDARD_DELIMITERS: &[u8] = b" \t\n\r,.?!\0";

//==================================================================================
// 1. Delimiter Sets
//==================================================================================

/// Membership predicate deciding which bytes separate words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelimiterSet {
    bytes: ByteSet,
}

impl DelimiterSet {
    pub fn from_bytes(delimiters: &[u8]) -> Self {
        Self {
            bytes: ByteSet::from_bytes(delimiters),
        }
    }

    /// Space, tab, newline, carriage-return, comma, period, question mark,
    /// exclamation mark and NUL.
    pub fn standard() -> Self {
        Self::from_bytes(STANDARD_DELIMITERS)
    }

    /// Plain space only.
    pub fn spaces_only() -> Self {
        Self::from_bytes(b" ")
    }

    #[inline]
    pub fn contains(&self, byte: u8) -> bool {
        self.bytes.contains(byte)
    }

    /// True if any byte of `bytes` is a delimiter.
    pub fn any_in(&self, bytes: &[u8]) -> bool {
        bytes.iter().any(|&b| self.contains(b))
    }

    pub fn as_byte_set(&self) -> &ByteSet {
        &self.bytes
    }
}

//==================================================================================
// 2. Tokens
//==================================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Delimiter,
}

/// A span of the tokenized buffer. Tokens never own bytes; they index into the
/// buffer they were produced from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub len: usize,
    pub kind: TokenKind,
}

impl Token {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub fn bytes<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        &buffer[self.start..self.end()]
    }
}

//==================================================================================
// 3. Tokenizer
//==================================================================================

/// Lazy, restartable token sequence over a byte buffer.
///
/// Cloning a `Tokenizer` snapshots its position, so a consumer can restart a
/// scan from any point without re-reading what came before.
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    buffer: &'a [u8],
    pos: usize,
    delimiters: DelimiterSet,
}

impl<'a> Tokenizer<'a> {
    pub fn new(buffer: &'a [u8], delimiters: DelimiterSet) -> Self {
        Self {
            buffer,
            pos: 0,
            delimiters,
        }
    }

    /// Byte offset of the next token to be produced.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let start = self.pos;
        let first = *self.buffer.get(start)?;

        if self.delimiters.contains(first) {
            self.pos += 1;
            return Some(Token {
                start,
                len: 1,
                kind: TokenKind::Delimiter,
            });
        }

        let len = self.buffer[start..]
            .iter()
            .position(|&b| self.delimiters.contains(b))
            .unwrap_or(self.buffer.len() - start);
        self.pos += len;
        Some(Token {
            start,
            len,
            kind: TokenKind::Word,
        })
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}

/// Materializes the full token sequence of `buffer`.
pub fn tokenize(buffer: &[u8], delimiters: DelimiterSet) -> Vec<Token> {
    Tokenizer::new(buffer, delimiters).collect()
}
