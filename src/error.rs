#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unbalanced parentheses: unmatched '{paren}' at offset {offset}")]
    UnbalancedParens { paren: char, offset: usize },

    #[error("Malformed block token at offset {offset}: no interior tokens attached")]
    MalformedBlockToken { offset: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T = ()> = std::result::Result<T, Error>;

impl From<confique::Error> for Error {
    fn from(value: confique::Error) -> Self {
        Error::Config(value.to_string())
    }
}
