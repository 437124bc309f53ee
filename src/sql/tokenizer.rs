use crate::sql::{
    keyword::{Clause, StatementType},
    token::Token,
    token_kind::TokenKind,
};

/// Lenient SQL tokenizer producing a flat stream of `Token`s.
///
/// Behavior:
/// - Skips whitespace; whitespace only separates tokens.
/// - `--` comments run to the end of the line, `/* */` comments to the closing
///   marker. Both are emitted as `Comment` tokens.
/// - `'...'` strings and `"..."` names treat a doubled quote as an escaped
///   quote. An unterminated one runs to the end of the input.
/// - Word runs are lower-cased once and looked up in the statement-type and
///   clause tables; everything else is a `Word` with its original casing.
/// - `( ) , . : = ;` become dedicated tokens, operator characters are grouped
///   into `Operator` tokens and anything else is `Unknown`.
///
/// Guarantees:
/// - Never fails and never panics; malformed input still yields tokens.
/// - Every token's `value` is exactly `sql[start..end]` and the only text
///   between consecutive tokens is whitespace.
pub fn tokenize(sql: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut i = 0;

    while let Some(c) = sql[i..].chars().next() {
        if c.is_whitespace() {
            i += c.len_utf8();
            continue;
        }

        let start = i;
        let rest = &sql[i..];
        let kind = match c {
            '-' if rest.starts_with("--") => {
                i = rest.find('\n').map_or(sql.len(), |nl| i + nl);
                // Keep a trailing `\r` out of the comment text.
                if sql[start..i].ends_with('\r') {
                    i -= 1;
                }
                TokenKind::Comment
            }
            '/' if rest.starts_with("/*") => {
                i = rest[2..].find("*/").map_or(sql.len(), |close| i + 2 + close + 2);
                TokenKind::Comment
            }
            '\'' => {
                i = quoted_end(sql, i, '\'');
                TokenKind::StringLiteral
            }
            '"' => {
                i = quoted_end(sql, i, '"');
                TokenKind::SqlName
            }
            c if c.is_ascii_digit() => {
                i = number_end(sql, i);
                TokenKind::NumericLiteral
            }
            c if is_word_start(c) => {
                i += rest
                    .find(|cc: char| !is_word_char(cc))
                    .unwrap_or(rest.len());
                classify_word(&sql[start..i])
            }
            c if is_operator_char(c) => {
                let two = rest.get(..2).unwrap_or("");
                i += if TWO_CHAR_OPERATORS.contains(&two) { 2 } else { 1 };
                TokenKind::Operator
            }
            other => {
                i += other.len_utf8();
                match other {
                    ',' => TokenKind::Comma,
                    '.' => TokenKind::Dot,
                    ':' => TokenKind::Colon,
                    '=' => TokenKind::Equal,
                    ';' => TokenKind::Semicolon,
                    '(' => TokenKind::ParenOpen,
                    ')' => TokenKind::ParenClose,
                    _ => TokenKind::Unknown,
                }
            }
        };
        out.push(Token::new(kind, &sql[start..i], start, i));
    }

    out
}

const TWO_CHAR_OPERATORS: [&str; 6] = ["<=", ">=", "<>", "!=", "||", "->"];

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '_' | '$' | '#' | '@')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '#' | '@')
}

fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | '<' | '>' | '!' | '|' | '&' | '%' | '^' | '~' | '?'
    )
}

fn classify_word(text: &str) -> TokenKind {
    let lower = text.to_lowercase();
    StatementType::from_lower(&lower)
        .map(TokenKind::StatementType)
        .or_else(|| Clause::from_lower(&lower).map(TokenKind::Clause))
        .unwrap_or(TokenKind::Word)
}

/// Offset just past the closing `quote` of the span opened at `open`.
/// A doubled quote is an escaped quote, not a terminator.
fn quoted_end(sql: &str, open: usize, quote: char) -> usize {
    let bytes = sql.as_bytes();
    let q = quote as u8;
    let mut i = open + 1;
    while i < bytes.len() {
        if bytes[i] == q {
            if bytes.get(i + 1) == Some(&q) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    sql.len()
}

/// Digits, an optional fraction and an optional exponent.
fn number_end(sql: &str, start: usize) -> usize {
    let bytes = sql.as_bytes();
    let digits = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut i = digits(start);
    if bytes.get(i) == Some(&b'.') && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
        i = digits(i + 1);
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(i + 1), Some(b'+' | b'-')));
        if bytes.get(i + 1 + sign).is_some_and(u8::is_ascii_digit) {
            i = digits(i + 1 + sign);
        }
    }
    i
}
