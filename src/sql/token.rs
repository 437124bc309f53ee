//! Token model tying a `TokenKind` to its source text and span.
//!
//! A `Token` is its classification (`kind`), the exact source text (`value`)
//! and byte offsets (`start`, `end`) into the original SQL string. Block
//! tokens additionally own the tokens found between their parentheses.
//!
//! Offsets let higher-level logic (statement ranges, cursor lookup, editor
//! highlighting) map back to the source without a reconstructed string.
use crate::sql::{keyword::StatementType, token_kind::TokenKind};

/// A lexical token with its inclusive start and exclusive end byte offsets.
///
/// Invariants:
/// - `end >= start`
/// - for leaf tokens `value == source[start..end]`
/// - `block` is `Some` exactly when `kind == TokenKind::Block`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub start: usize,
    pub end: usize,
    pub block: Option<Vec<Token>>,
}

impl Token {
    /// Construct a new leaf token.
    pub fn new(kind: TokenKind, value: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            start,
            end,
            block: None,
        }
    }

    /// Construct a block token spanning `start..end` (parentheses included).
    pub fn new_block(interior: Vec<Token>, start: usize, end: usize) -> Self {
        Self {
            kind: TokenKind::Block,
            value: String::new(),
            start,
            end,
            block: Some(interior),
        }
    }

    /// Byte length of this token (`end - start`).
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Interior tokens of a block.
    pub fn interior(&self) -> Option<&[Token]> {
        self.block.as_deref()
    }

    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }

    pub fn statement_type(&self) -> Option<StatementType> {
        self.kind.statement_type()
    }

    /// True if this is a word-like token (word or keyword) spelled `word`,
    /// compared case-insensitively.
    pub fn is_word(&self, word: &str) -> bool {
        matches!(
            self.kind,
            TokenKind::Word | TokenKind::StatementType(_) | TokenKind::Clause(_)
        ) && self.value.eq_ignore_ascii_case(word)
    }

    /// Comments carry no meaning for classification or reference extraction.
    pub fn is_significant(&self) -> bool {
        self.kind != TokenKind::Comment
    }

    pub fn is_line_comment(&self) -> bool {
        self.kind == TokenKind::Comment && self.value.starts_with("--")
    }

    /// Returns true if the byte offset lies within this token's span.
    ///
    /// NOTE: End is exclusive, so `offset == end` returns false.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    pub const fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}
