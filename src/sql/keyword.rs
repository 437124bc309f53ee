//! Keyword tables used by the tokenizer to classify bare words.
//!
//! Two closed tables exist:
//! - [`StatementType`]: words that can govern a statement (`SELECT`, `CREATE`,
//!   `BEGIN`, `END`, ...). A statement is classified by its first significant
//!   word, so every variant here is also a possible statement classification.
//! - [`Clause`]: words that introduce a clause inside a statement (`FROM`,
//!   `WHERE`, ...). The formatter breaks lines at both kinds.
//!
//! Words are matched case-insensitively via `from_lower`, which expects an
//! already lower-cased slice. Everything outside the tables is a plain word.

/// Classification of a statement by its governing keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum StatementType {
    #[default]
    Unknown,
    Create,
    Insert,
    Select,
    With,
    Update,
    Delete,
    Declare,
    Begin,
    Drop,
    End,
    Else,
    Elseif,
    Call,
    Alter,
    Fetch,
    For,
    Get,
    Goto,
    If,
    Include,
    Iterate,
    Leave,
    Loop,
    Merge,
    Open,
    Pipe,
    Repeat,
    Resignal,
    Return,
    Signal,
    Set,
    While,
}

impl StatementType {
    /// Statement types the formatter always renders as one continuous line.
    pub const SINGLE_LINE: [Self; 7] = [
        StatementType::Create,
        StatementType::Declare,
        StatementType::Set,
        StatementType::Delete,
        StatementType::Call,
        StatementType::If,
        StatementType::End,
    ];

    /// Attempt to classify a *lower-cased* word.
    pub fn from_lower(word: &str) -> Option<Self> {
        use StatementType::*;
        let ty = match word {
            "create" => Create,
            "insert" => Insert,
            "select" => Select,
            "with" => With,
            "update" => Update,
            "delete" => Delete,
            "declare" => Declare,
            "begin" => Begin,
            "drop" => Drop,
            "end" => End,
            "else" => Else,
            "elseif" => Elseif,
            "call" => Call,
            "alter" => Alter,
            "fetch" => Fetch,
            "for" => For,
            "get" => Get,
            "goto" => Goto,
            "if" => If,
            "include" => Include,
            "iterate" => Iterate,
            "leave" => Leave,
            "loop" => Loop,
            "merge" => Merge,
            "open" => Open,
            "pipe" => Pipe,
            "repeat" => Repeat,
            "resignal" => Resignal,
            "return" => Return,
            "signal" => Signal,
            "set" => Set,
            "while" => While,
            _ => return None,
        };
        Some(ty)
    }

    /// Classify any word, falling back to `Unknown`.
    pub fn classify(word: &str) -> Self {
        Self::from_lower(&word.to_lowercase()).unwrap_or_default()
    }

    pub fn is_single_line(self) -> bool {
        Self::SINGLE_LINE.contains(&self)
    }

    /// Statement types whose body is opened by `THEN`, `DO`, `LOOP`, `ELSE`
    /// or `REPEAT` rather than `BEGIN`.
    pub fn is_conditional(self) -> bool {
        matches!(
            self,
            StatementType::If
                | StatementType::Elseif
                | StatementType::Else
                | StatementType::While
                | StatementType::For
                | StatementType::Loop
                | StatementType::Repeat
        )
    }
}

/// Clause keywords recognized inside statements. Displays as the
/// lower-case keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Clause {
    #[display("from")]
    From,
    #[display("into")]
    Into,
    #[display("where")]
    Where,
    #[display("having")]
    Having,
    #[display("group")]
    Group,
    #[display("order")]
    Order,
    #[display("limit")]
    Limit,
    #[display("offset")]
    Offset,
    #[display("union")]
    Union,
    #[display("except")]
    Except,
    #[display("intersect")]
    Intersect,
    #[display("values")]
    Values,
}

impl Clause {
    pub fn from_lower(word: &str) -> Option<Self> {
        use Clause::*;
        let clause = match word {
            "from" => From,
            "into" => Into,
            "where" => Where,
            "having" => Having,
            "group" => Group,
            "order" => Order,
            "limit" => Limit,
            "offset" => Offset,
            "union" => Union,
            "except" => Except,
            "intersect" => Intersect,
            "values" => Values,
            _ => return None,
        };
        Some(clause)
    }
}
