use std::ops::Range;

use crate::sql::{
    keyword::StatementType,
    statement::{Statement, Terminator, head},
    token::Token,
    token_kind::TokenKind,
    tokenizer::tokenize,
};
use crate::*;

/// A run of contiguous statements treated as one logical unit, e.g. a
/// procedure definition together with its body.
#[derive(Debug, Clone, Copy)]
pub struct StatementGroup<'a> {
    pub statements: &'a [Statement],
    pub start: usize,
    pub end: usize,
}

impl StatementGroup<'_> {
    /// True if `offset` lies in `[start, end)`.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// The statement that opens the group.
    pub fn first(&self) -> Option<&Statement> {
        self.statements.first()
    }
}

/// Tokenization and segmentation of one source buffer.
///
/// A `Document` is built from a snapshot of the text and never changes
/// afterwards; build a new one when the text changes.
#[derive(Debug, Clone)]
pub struct Document {
    content: String,
    tokens: Vec<Token>,
    statements: Vec<Statement>,
    groups: Vec<Range<usize>>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let tokens = tokenize(&content);
        let statements = segment(&tokens);
        let groups = group_statements(&statements);
        debug!(
            "Segmented {} tokens into {} statements and {} groups",
            tokens.len(),
            statements.len(),
            groups.len()
        );
        Self {
            content,
            tokens,
            statements,
            groups,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// All statement groups in source order.
    pub fn statement_groups(&self) -> Vec<StatementGroup<'_>> {
        self.groups.iter().map(|range| self.group(range)).collect()
    }

    /// The group whose `[start, end)` range contains `offset`.
    pub fn group_by_offset(&self, offset: usize) -> Option<StatementGroup<'_>> {
        let idx = self
            .groups
            .partition_point(|range| self.statements[range.end - 1].end <= offset);
        self.groups
            .get(idx)
            .map(|range| self.group(range))
            .filter(|group| group.contains(offset))
    }

    /// The statement whose `[start, end)` range contains `offset`.
    pub fn statement_by_offset(&self, offset: usize) -> Option<&Statement> {
        let idx = self.statements.partition_point(|s| s.end <= offset);
        self.statements.get(idx).filter(|s| s.contains(offset))
    }

    fn group(&self, range: &Range<usize>) -> StatementGroup<'_> {
        let statements = &self.statements[range.clone()];
        StatementGroup {
            statements,
            start: statements.first().map_or(0, |s| s.start),
            end: statements.last().map_or(0, |s| s.end),
        }
    }
}

/// Split a flat token stream into statements.
///
/// A statement ends at a `;` outside parentheses, or right after a keyword
/// that opens a body (the keyword stays in the statement):
/// - `BEGIN`, together with a following `ATOMIC` / `NOT ATOMIC`;
/// - `THEN` in `IF` / `ELSEIF`, `DO` in `WHILE` / `FOR`;
/// - `LOOP`, `ELSE` and `REPEAT` when they govern the statement.
///
/// Empty statements are dropped. Trailing tokens without a terminator form a
/// final statement.
pub fn segment(tokens: &[Token]) -> Vec<Statement> {
    let mut statements = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;

    let mut close = |current: &mut Vec<Token>, terminator: Terminator, end: usize| {
        if !current.is_empty() {
            statements.push(Statement::new(std::mem::take(current), terminator, end));
        }
    };

    while i < tokens.len() {
        let token = &tokens[i];
        i += 1;

        match token.kind {
            TokenKind::ParenOpen => depth += 1,
            TokenKind::ParenClose => depth = depth.saturating_sub(1),
            TokenKind::Semicolon if depth == 0 => {
                close(&mut current, Terminator::Semicolon, token.end);
                continue;
            }
            _ => {}
        }

        current.push(token.clone());
        if depth > 0 {
            continue;
        }

        let Some(terminator) = body_opener(&current) else {
            continue;
        };
        if terminator == Terminator::Compound {
            let absorb = match (tokens.get(i), tokens.get(i + 1)) {
                (Some(a), _) if a.is_word("ATOMIC") => 1,
                (Some(n), Some(a)) if n.is_word("NOT") && a.is_word("ATOMIC") => 2,
                _ => 0,
            };
            current.extend(tokens[i..i + absorb].iter().cloned());
            i += absorb;
        }
        let end = current.last().map_or(0, |t| t.end);
        trace!("Body opened by {:?} at offset {end}", terminator);
        close(&mut current, terminator, end);
    }

    let end = current.last().map_or(0, |t| t.end);
    close(&mut current, Terminator::Eof, end);
    statements
}

const CONDITION_OPENERS: [&str; 5] = ["THEN", "DO", "LOOP", "ELSE", "REPEAT"];

/// Whether the last token of `current` opens a body, and which kind.
fn body_opener(current: &[Token]) -> Option<Terminator> {
    let last = current.last()?;
    if last.is_word("BEGIN") {
        return Some(Terminator::Compound);
    }
    if !CONDITION_OPENERS.iter().any(|w| last.is_word(w)) {
        return None;
    }

    let governing = head(current).governing;
    let statement_type = governing
        .and_then(|i| current[i].statement_type())
        .unwrap_or_default();
    if !statement_type.is_conditional() {
        return None;
    }
    let governs = governing == Some(current.len() - 1);
    let opens = match statement_type {
        StatementType::If | StatementType::Elseif => last.is_word("THEN"),
        StatementType::While | StatementType::For => last.is_word("DO"),
        StatementType::Loop => governs && last.is_word("LOOP"),
        StatementType::Else => governs && last.is_word("ELSE"),
        StatementType::Repeat => governs && last.is_word("REPEAT"),
        _ => false,
    };
    opens.then_some(Terminator::Condition)
}

/// Group statements with a depth counter: block ends decrement it, block
/// starts increment it, and a group closes whenever it is back at zero.
///
/// An end without a matching start drives the counter below zero; that
/// statement closes a group on its own and the counter restarts at zero.
fn group_statements(statements: &[Statement]) -> Vec<Range<usize>> {
    let mut groups = Vec::new();
    let mut depth: isize = 0;
    let mut group_start = 0;

    for (i, statement) in statements.iter().enumerate() {
        if statement.is_block_end() {
            depth -= 1;
        }
        if statement.is_block_start() {
            depth += 1;
        }
        if depth <= 0 {
            if depth < 0 {
                debug!(
                    "Unmatched block end at offset {}, continuing at top level",
                    statement.start
                );
            }
            groups.push(group_start..i + 1);
            group_start = i + 1;
            depth = 0;
        }
    }

    if group_start < statements.len() {
        debug!("Document ends inside an open block (depth {depth})");
        groups.push(group_start..statements.len());
    }
    groups
}
