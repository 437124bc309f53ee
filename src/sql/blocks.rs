use crate::sql::{token::Token, token_kind::TokenKind};
use crate::*;

/// Collapse every parenthesized span into a single `Block` token.
///
/// Single left-to-right scan with a stack of pending `(`. When a `)` closes
/// the most recent open paren, the tokens collected since then become the
/// interior of one block token whose range covers both parentheses. Nested
/// parentheses therefore produce nested blocks.
///
/// An unmatched `)` or a `(` left open at the end is reported as
/// [`Error::UnbalancedParens`] pointing at the offending paren.
pub fn create_blocks(tokens: &[Token]) -> Result<Vec<Token>> {
    let mut pending: Vec<(usize, Vec<Token>)> = Vec::new();
    let mut current: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token.kind {
            TokenKind::ParenOpen => {
                pending.push((token.start, std::mem::take(&mut current)));
            }
            TokenKind::ParenClose => {
                let (open, outer) = pending.pop().ok_or(Error::UnbalancedParens {
                    paren: ')',
                    offset: token.start,
                })?;
                let interior = std::mem::replace(&mut current, outer);
                current.push(Token::new_block(interior, open, token.end));
            }
            _ => current.push(token.clone()),
        }
    }

    if let Some((open, _)) = pending.first() {
        return Err(Error::UnbalancedParens {
            paren: '(',
            offset: *open,
        });
    }

    Ok(current)
}
