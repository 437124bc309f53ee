//! Lenient SQL tokenization and statement segmentation.
//!
//! This module turns raw SQL text into the structures the formatter and the
//! outline work on, without requiring a full parser:
//!
//! Modules:
//! - `keyword`    : Statement-type and clause keyword tables.
//! - `token_kind` : Classification of lexical atoms (words, names, punctuation, keywords).
//! - `token`      : Token struct pairing a `TokenKind` with source span offsets.
//! - `tokenizer`  : Single pass tokenizer producing a `Vec<Token>` from raw SQL.
//! - `blocks`     : Collapses parenthesized spans into nested block tokens.
//! - `statement`  : One segmented statement and its block-structure predicates.
//! - `reference`  : Objects a DDL or DECLARE statement names.
//! - `document`   : Segmentation of a whole buffer into statements and groups.
//!
//! Design Principles:
//! 1. Accept incomplete / syntactically invalid SQL (robust for live editing).
//! 2. Preserve the original text of every token for display and lookup.
//! 3. Keep positions as byte offsets into the source buffer.
//!
//! Public Re-exports:
//! You can `use sqlpl::{tokenize, Token, TokenKind, Document};` directly,
//! or pull everything via the `prelude` submodule.
//!
//! Example:
//! ```rust
//! use sqlpl::prelude::*;
//!
//! let tokens = tokenize("SELECT a, b FROM my_table");
//! assert_eq!(tokens[0].statement_type(), Some(StatementType::Select));
//!
//! let doc = Document::new("CREATE TABLE lib.t (a INT);");
//! let refs = doc.statements()[0].object_references();
//! assert_eq!(refs[0].object.name.as_deref(), Some("t"));
//! ```
//!
//! NOTE: This is **not** a full SQL parser. Statements are classified by
//! their first significant word and nothing is checked against a grammar.

pub mod blocks;
pub mod document;
pub mod keyword;
pub mod reference;
pub mod statement;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use blocks::create_blocks;
pub use document::{Document, StatementGroup, segment};
pub use keyword::{Clause, StatementType};
pub use reference::{ObjectName, ObjectRef};
pub use statement::{Statement, Terminator, classify};
pub use token::Token;
pub use token_kind::TokenKind;
pub use tokenizer::tokenize;

/// Convenience prelude re-exporting the most commonly used items.
///
/// Import with:
/// `use sqlpl::prelude::*;`
pub mod prelude {
    pub use super::{
        Clause, Document, ObjectRef, Statement, StatementType, Token, TokenKind, create_blocks,
        tokenize,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_and_segment() {
        let sql = "SELECT col FROM tbl; DROP TABLE tbl;";
        let tokens = tokenize(sql);
        assert_eq!(tokens[0].statement_type(), Some(StatementType::Select));
        assert_eq!(tokens[2].kind, TokenKind::Clause(Clause::From));

        let doc = Document::new(sql);
        let types: Vec<_> = doc.statements().iter().map(|s| s.statement_type).collect();
        assert_eq!(types, vec![StatementType::Select, StatementType::Drop]);
    }

    #[test]
    fn prelude_import_works() {
        use super::prelude::*;
        let toks = tokenize("FROM X");
        assert!(toks.iter().any(|t| t.kind == TokenKind::Clause(Clause::From)));
        assert!(toks.iter().any(|t| t.is_word("x")));
    }
}
