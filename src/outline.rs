//! Outline symbols built from the object references of a document.

use crate::sql::{
    document::{Document, StatementGroup},
    keyword::StatementType,
    reference::ObjectRef,
    statement::Statement,
};
use crate::*;

/// Kind of an outline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SymbolKind {
    /// An object created by a `CREATE` statement.
    File,
    /// A variable, cursor, condition or temporary table from a `DECLARE`.
    Variable,
}

/// One entry of a document outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSymbol {
    pub name: String,
    /// Lower-cased object kind, e.g. `table` or `cursor`.
    pub detail: String,
    pub kind: SymbolKind,
    pub start: usize,
    pub end: usize,
    pub children: Vec<DocumentSymbol>,
}

/// Outline of a document.
///
/// Single-statement groups contribute at most one symbol. A group with
/// several statements becomes one symbol for its first statement, spanning
/// the whole group, with the symbols of the remaining statements as
/// children. When the first statement names no object the children are
/// listed at the top level instead.
pub fn document_symbols(document: &Document) -> Vec<DocumentSymbol> {
    let mut symbols = Vec::new();

    for group in document.statement_groups() {
        match group.statements {
            [] => {}
            [only] => symbols.extend(statement_symbol(only, only.start, only.end)),
            [first, rest @ ..] => {
                let children = rest
                    .iter()
                    .filter_map(|s| statement_symbol(s, s.start, s.end))
                    .collect::<Vec<_>>();
                match group_symbol(first, &group) {
                    Some(mut parent) => {
                        parent.children = children;
                        symbols.push(parent);
                    }
                    None => symbols.extend(children),
                }
            }
        }
    }

    debug!("Built {} top-level outline symbols", symbols.len());
    symbols
}

fn group_symbol(first: &Statement, group: &StatementGroup<'_>) -> Option<DocumentSymbol> {
    statement_symbol(first, group.start, group.end)
}

fn statement_symbol(statement: &Statement, start: usize, end: usize) -> Option<DocumentSymbol> {
    let kind = match statement.statement_type {
        StatementType::Create => SymbolKind::File,
        StatementType::Declare => SymbolKind::Variable,
        _ => return None,
    };
    let reference = statement.object_references().first()?;

    Some(DocumentSymbol {
        name: label(statement, reference),
        detail: reference.object_type.clone(),
        kind,
        start,
        end,
        children: Vec::new(),
    })
}

fn label(statement: &Statement, reference: &ObjectRef) -> String {
    reference
        .object
        .name
        .clone()
        .or_else(|| reference.object.schema.clone())
        .unwrap_or_else(|| statement.statement_type.to_string())
}
