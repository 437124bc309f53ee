//! Token kind definitions for the SQL tokenizer.
//!
//! Each `TokenKind` variant represents a syntactic atom discovered during the
//! lenient scanning phase. Anything unrecognized becomes `Unknown` so later
//! stages degrade instead of aborting.
//!
//! `Block` never comes out of the tokenizer itself; it is produced by
//! [`create_blocks`](crate::sql::blocks::create_blocks) when a parenthesized
//! span is collapsed.

use crate::sql::keyword::{Clause, StatementType};

/// Classification for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Word found in the statement-type keyword table.
    StatementType(StatementType),
    /// Word found in the clause keyword table.
    Clause(Clause),
    /// Bare identifier or any other unclassified word.
    Word,
    /// Double-quoted identifier, case preserved, quotes included.
    SqlName,
    Comma,
    Dot,
    Equal,
    Colon,
    Semicolon,
    ParenOpen,
    ParenClose,
    /// Collapsed parenthesized span carrying its interior tokens.
    Block,
    StringLiteral,
    NumericLiteral,
    /// `-- ...` or `/* ... */`.
    Comment,
    Operator,
    Unknown,
}

impl TokenKind {
    /// True for statement-type and clause keywords.
    pub fn is_keyword(&self) -> bool {
        matches!(self, TokenKind::StatementType(_) | TokenKind::Clause(_))
    }

    pub fn statement_type(&self) -> Option<StatementType> {
        match self {
            TokenKind::StatementType(ty) => Some(*ty),
            _ => None,
        }
    }

    /// True for anything that can name an object: bare words and quoted names.
    pub fn is_name(&self) -> bool {
        matches!(self, TokenKind::Word | TokenKind::SqlName)
    }
}
