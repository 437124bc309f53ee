//! Re-emits SQL as indented, consistently cased text.
//!
//! Every statement is block-built and rendered to a list of lines on its
//! own; the statements of a group are then stitched together with a running
//! indent so bodies of `BEGIN ... END`, `IF ... END IF` and loops nest.
//!
//! Layout rules inside a statement:
//! - keywords start a new line unless the statement type is one of
//!   [`StatementType::SINGLE_LINE`];
//! - a parenthesized block stays inline when it renders to a single line,
//!   and is expanded onto indented lines when it holds a sub-query, a nested
//!   block, a list of three or more items, a line comment, or the column
//!   list of a `CREATE`;
//! - a line comment always ends its line.
//!
//! Formatting is a pure function of the text and the options: formatting
//! already formatted text with the same options gives the same text back.
crate::reexport!(options);
#[cfg(test)]
mod format_tests;

use itertools::Itertools;

use crate::sql::{
    document::Document,
    keyword::StatementType,
    statement::{Statement, head},
    token::Token,
    token_kind::TokenKind,
};
use crate::*;

/// Words after which an inline block keeps its leading space, e.g. `IN (1, 2)`.
const SPACED_BEFORE_BLOCK: [&str; 8] = ["AND", "AS", "EXISTS", "IN", "NOT", "ON", "OR", "USING"];

/// Format a whole SQL buffer.
///
/// The line ending of the output follows the input: `\r\n` if it appears
/// anywhere in `sql`, `\n` otherwise. Fails with
/// [`Error::UnbalancedParens`] before producing any output when a statement
/// has unmatched parentheses.
pub fn format_sql(sql: &str, options: &FormatOptions) -> Result<String> {
    let document = Document::new(sql);
    let eol = if sql.contains("\r\n") { "\r\n" } else { "\n" };
    let width = options.indent_width;

    let mut result: Vec<String> = Vec::new();
    let mut previous: Option<StatementType> = None;

    for group in document.statement_groups() {
        let mut indent = 0usize;
        for statement in group.statements {
            if statement.is_block_end() {
                indent = indent.saturating_sub(width);
            }
            if options.space_between_statements
                && previous.is_some_and(|ty| ty != statement.statement_type)
            {
                result.push(String::new());
            }

            trace!(
                "Formatting {} statement at offset {} with indent {indent}",
                statement.statement_type, statement.start
            );
            result.extend(
                format_statement(statement, options)?
                    .into_iter()
                    .map(|line| indented(indent, line)),
            );

            if statement.is_block_start() {
                indent += width;
            }
            previous = Some(statement.statement_type);
        }
    }

    debug!(
        "Formatted {} statements into {} lines",
        document.statements().len(),
        result.len()
    );
    Ok(result
        .iter()
        .map(|line| line.strip_prefix(eol).unwrap_or(line))
        .join(eol))
}

/// Render one token list, typically a statement's block-built tokens, to
/// output lines without a trailing semicolon.
///
/// Fails with [`Error::MalformedBlockToken`] when a `Block` token carries no
/// interior.
pub fn format_tokens(tokens: &[Token], options: &FormatOptions) -> Result<Vec<String>> {
    render(tokens, options, options.new_line_lists)
}

/// Lines of one statement with its `;`. Statements stopping at a body opener
/// (`BEGIN`, `THEN`, `DO`, `LOOP`, `ELSE`, `REPEAT`) take none.
fn format_statement(statement: &Statement, options: &FormatOptions) -> Result<Vec<String>> {
    let mut lines = format_tokens(statement.blocks()?, options)?;
    if statement.is_comment_only() || statement.terminator.opens_body() {
        return Ok(lines);
    }

    if statement.tokens.last().is_some_and(Token::is_line_comment) {
        lines.push(";".to_string());
    } else if let Some(last) = lines.last_mut() {
        last.push(';');
    }
    Ok(lines)
}

fn indented(indent: usize, line: String) -> String {
    if line.is_empty() {
        line
    } else {
        format!("{:indent$}{line}", "")
    }
}

/// Output lines of one token list under construction.
struct Lines {
    lines: Vec<String>,
    indent: usize,
    width: usize,
}

impl Lines {
    fn new(width: usize) -> Self {
        Self {
            lines: vec![String::new()],
            indent: 0,
            width,
        }
    }

    fn append(&mut self, text: &str) {
        if let Some(line) = self.lines.last_mut() {
            line.push_str(text);
        }
    }

    /// The current line has content and does not already end in a space.
    fn wants_space(&self) -> bool {
        self.lines
            .last()
            .is_some_and(|line| !line.trim().is_empty() && !line.ends_with(' '))
    }

    /// Start a new line, moving the indent by `change` levels first. A blank
    /// current line is reused.
    fn new_line(&mut self, change: isize) {
        self.indent = self
            .indent
            .saturating_add_signed(change * self.width as isize);
        let padding = " ".repeat(self.indent);
        match self.lines.last_mut() {
            Some(line) if line.trim().is_empty() => *line = padding,
            _ => self.lines.push(padding),
        }
    }

    /// Push the lines of an expanded block one level deeper, then continue
    /// on a fresh line at the current level.
    fn add_sublines(&mut self, sublines: Vec<String>) {
        let indent = self.indent + self.width;
        self.lines
            .extend(sublines.into_iter().map(|line| indented(indent, line)));
        self.new_line(0);
    }

    fn finish(mut self) -> Vec<String> {
        while self.lines.last().is_some_and(|line| line.trim().is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

enum BlockLayout {
    Inline(String),
    Expanded(Vec<String>),
}

fn render(tokens: &[Token], options: &FormatOptions, list_mode: bool) -> Result<Vec<String>> {
    let head = head(tokens);
    let governing = head.governing.unwrap_or(0);
    let statement_type = head
        .governing
        .and_then(|i| tokens[i].statement_type())
        .unwrap_or_default();
    let single_line = statement_type.is_single_line();

    let mut out = Lines::new(options.indent_width);

    for (i, token) in tokens.iter().enumerate() {
        let previous = i.checked_sub(1).map(|p| &tokens[p]);
        let glued = previous.is_some_and(|p| {
            p.kind == TokenKind::Dot
                || (p.kind == TokenKind::Colon && head.label_colon != Some(i - 1))
        });
        let needs_space = i > 0 && !glued && out.wants_space();

        match token.kind {
            TokenKind::Block => {
                let interior = token
                    .interior()
                    .ok_or(Error::MalformedBlockToken {
                        offset: token.start,
                    })?;
                match block_layout(interior, statement_type, options)? {
                    BlockLayout::Inline(text) => {
                        let after_name = previous.is_some_and(|p| {
                            p.kind.is_name() && !SPACED_BEFORE_BLOCK.iter().any(|w| p.is_word(w))
                        });
                        if needs_space && !after_name {
                            out.append(" ");
                        }
                        out.append(&format!("({text})"));
                    }
                    BlockLayout::Expanded(sublines) => {
                        out.append(if needs_space { " (" } else { "(" });
                        out.add_sublines(sublines);
                        out.append(")");
                    }
                }
            }
            TokenKind::Dot | TokenKind::Semicolon => out.append(&token.value),
            TokenKind::Comma => {
                out.append(&token.value);
                if list_mode {
                    out.new_line(0);
                }
            }
            TokenKind::Colon if head.label_colon == Some(i) => out.append(&token.value),
            TokenKind::Comment => {
                if needs_space {
                    out.append(" ");
                }
                out.append(&token.value);
                if token.is_line_comment() {
                    out.new_line(0);
                }
            }
            _ => {
                let breaks = token.is_keyword() && !single_line;
                if breaks && i > governing {
                    out.new_line(if list_mode { -1 } else { 0 });
                } else if needs_space {
                    out.append(" ");
                }
                out.append(&display(token, options));
                if breaks && list_mode {
                    out.new_line(1);
                }
            }
        }
    }

    Ok(out.finish())
}

fn block_layout(
    interior: &[Token],
    statement_type: StatementType,
    options: &FormatOptions,
) -> Result<BlockLayout> {
    if interior.is_empty() {
        return Ok(BlockLayout::Inline(String::new()));
    }
    // A line comment would swallow the closing paren of an inline block.
    let commented = interior.iter().any(Token::is_line_comment);
    if interior.len() == 1 && interior[0].kind != TokenKind::Block && !commented {
        let line = render(interior, options, options.new_line_lists)?.concat();
        return Ok(BlockLayout::Inline(line));
    }

    let sub_query = interior
        .iter()
        .find(|t| t.is_significant())
        .is_some_and(Token::is_keyword);
    let nested = interior.iter().any(|t| t.kind == TokenKind::Block);
    let commas = interior.iter().filter(|t| t.kind == TokenKind::Comma).count();
    let creating = statement_type == StatementType::Create;
    let list_style = commas >= 2 || (creating && commas >= 1);

    if sub_query || nested || list_style || commented {
        let sublines = render(interior, options, options.new_line_lists || list_style)?;
        return Ok(BlockLayout::Expanded(sublines));
    }

    let sublines = render(interior, options, options.new_line_lists)?;
    if sublines.len() == 1 && !creating {
        return Ok(BlockLayout::Inline(sublines.concat()));
    }
    Ok(BlockLayout::Expanded(sublines))
}

/// Display text of a leaf token with the configured case applied.
fn display(token: &Token, options: &FormatOptions) -> String {
    match token.kind {
        TokenKind::StatementType(_) | TokenKind::Clause(_) => {
            options.keyword_case.apply(&token.value)
        }
        TokenKind::Word => options.identifier_case.apply(&token.value),
        _ => token.value.clone(),
    }
}
