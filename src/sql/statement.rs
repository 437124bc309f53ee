use std::sync::OnceLock;

use crate::sql::{
    blocks::create_blocks,
    keyword::StatementType,
    reference::{ObjectRef, extract_references},
    token::Token,
    token_kind::TokenKind,
};
use crate::*;

/// How a statement was closed by the segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// A top-level `;`.
    Semicolon,
    /// `BEGIN` (optionally `ATOMIC`): the statement opens a compound body.
    Compound,
    /// `THEN`, `DO`, `LOOP`, `ELSE` or `REPEAT`: the statement opens a
    /// conditional or loop body.
    Condition,
    /// End of input without a terminator.
    Eof,
}

impl Terminator {
    /// True when the statement text stops where a body begins.
    pub fn opens_body(self) -> bool {
        matches!(self, Terminator::Compound | Terminator::Condition)
    }
}

/// Words that turn `END` into the end of a conditional or loop body.
const CONDITION_END_WORDS: [&str; 6] = ["IF", "LOOP", "WHILE", "FOR", "REPEAT", "CASE"];

/// Position of an optional `label:` prefix and of the governing keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Head {
    /// Index of the colon ending a `label:` prefix.
    pub label_colon: Option<usize>,
    /// Index of the token that classifies the statement.
    pub governing: Option<usize>,
}

/// Locate the governing token of a token list, skipping comments and a
/// leading `label:` prefix. Works on both flat and block-built lists.
pub(crate) fn head(tokens: &[Token]) -> Head {
    let mut significant = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_significant())
        .map(|(i, _)| i);

    let Some(first) = significant.next() else {
        return Head::default();
    };
    let second = significant.next();

    match second {
        Some(colon)
            if tokens[first].kind == TokenKind::Word && tokens[colon].kind == TokenKind::Colon =>
        {
            Head {
                label_colon: Some(colon),
                governing: significant.next(),
            }
        }
        _ => Head {
            label_colon: None,
            governing: Some(first),
        },
    }
}

/// Classify a token list by its governing keyword.
pub fn classify(tokens: &[Token]) -> StatementType {
    head(tokens)
        .governing
        .and_then(|i| tokens[i].statement_type())
        .unwrap_or_default()
}

/// One statement of a document: its flat tokens (terminator excluded) and
/// its source range (terminating `;` included).
#[derive(Debug, Clone)]
pub struct Statement {
    pub statement_type: StatementType,
    pub tokens: Vec<Token>,
    pub start: usize,
    pub end: usize,
    pub terminator: Terminator,
    blocks: OnceLock<Vec<Token>>,
    references: OnceLock<Vec<ObjectRef>>,
}

impl Statement {
    /// Build a statement from its tokens. `end` is the end offset of the
    /// statement including its terminator.
    pub fn new(tokens: Vec<Token>, terminator: Terminator, end: usize) -> Self {
        let start = tokens.first().map_or(end, |t| t.start);
        Self {
            statement_type: classify(&tokens),
            tokens,
            start,
            end,
            terminator,
            blocks: OnceLock::new(),
            references: OnceLock::new(),
        }
    }

    /// Tokens that are not comments.
    pub fn significant(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_significant())
    }

    /// True if the statement consists of comments only.
    pub fn is_comment_only(&self) -> bool {
        self.significant().next().is_none()
    }

    /// The `label` of a `label: ...` statement.
    pub fn label(&self) -> Option<&Token> {
        let colon = head(&self.tokens).label_colon?;
        self.tokens[..colon].iter().rev().find(|t| t.is_significant())
    }

    /// First significant token after the governing keyword.
    fn after_governing(&self) -> Option<&Token> {
        let governing = head(&self.tokens).governing?;
        self.tokens[governing + 1..]
            .iter()
            .find(|t| t.is_significant())
    }

    fn ends_with_condition_word(&self) -> bool {
        self.after_governing()
            .is_some_and(|t| CONDITION_END_WORDS.iter().any(|w| t.is_word(w)))
    }

    /// Opens a `BEGIN ... END` body.
    pub fn is_compound_start(&self) -> bool {
        self.terminator == Terminator::Compound
    }

    /// `END` or `END label`.
    pub fn is_compound_end(&self) -> bool {
        self.statement_type == StatementType::End && !self.ends_with_condition_word()
    }

    /// Opens the body of an `IF`, `ELSEIF`, `ELSE`, `WHILE`, `FOR`, `LOOP`
    /// or `REPEAT`.
    pub fn is_condition_start(&self) -> bool {
        self.terminator == Terminator::Condition
    }

    /// Closes a conditional or loop body. `ELSE` and `ELSEIF` close the
    /// previous branch before opening their own.
    pub fn is_condition_end(&self) -> bool {
        match self.statement_type {
            StatementType::End => self.ends_with_condition_word(),
            StatementType::Else | StatementType::Elseif => true,
            _ => self.significant().next().is_some_and(|t| t.is_word("UNTIL")),
        }
    }

    pub fn is_block_start(&self) -> bool {
        self.is_compound_start() || self.is_condition_start()
    }

    pub fn is_block_end(&self) -> bool {
        self.is_compound_end() || self.is_condition_end()
    }

    /// The statement's tokens with parenthesized spans collapsed into blocks.
    /// Computed on first use and cached; unbalanced parentheses are reported
    /// on every call.
    pub fn blocks(&self) -> Result<&[Token]> {
        if let Some(blocks) = self.blocks.get() {
            return Ok(blocks.as_slice());
        }
        let built = create_blocks(&self.tokens)?;
        Ok(self.blocks.get_or_init(|| built).as_slice())
    }

    /// Objects created, declared, altered or dropped by this statement.
    pub fn object_references(&self) -> &[ObjectRef] {
        self.references.get_or_init(|| {
            let Some(governing) = head(&self.tokens).governing else {
                return Vec::new();
            };
            let rest: Vec<&Token> = self.tokens[governing + 1..]
                .iter()
                .filter(|t| t.is_significant())
                .collect();
            extract_references(self.statement_type, &rest)
        })
    }

    /// True if `offset` lies in `[start, end)`.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}
