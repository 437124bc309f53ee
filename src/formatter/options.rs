use std::str::FromStr;

use crate::*;

/// Case transform applied to a token's display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
pub enum CaseOption {
    #[default]
    #[display("preserve")]
    Preserve,
    #[display("upper")]
    Upper,
    #[display("lower")]
    Lower,
}

impl CaseOption {
    pub fn apply(self, text: &str) -> String {
        match self {
            CaseOption::Preserve => text.to_string(),
            CaseOption::Upper => text.to_uppercase(),
            CaseOption::Lower => text.to_lowercase(),
        }
    }
}

impl FromStr for CaseOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "preserve" => Ok(CaseOption::Preserve),
            "upper" => Ok(CaseOption::Upper),
            "lower" => Ok(CaseOption::Lower),
            other => Err(Error::Config(format!(
                "unknown case option '{other}', expected preserve, upper or lower"
            ))),
        }
    }
}

/// Layout settings for [`format_sql`](crate::format_sql).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
    /// Applied to statement-type and clause keywords.
    pub keyword_case: CaseOption,
    /// Applied to bare words. Quoted names are never re-cased.
    pub identifier_case: CaseOption,
    /// Break after every top-level comma and indent list items under their keyword.
    pub new_line_lists: bool,
    /// Blank line between consecutive statements of different types.
    pub space_between_statements: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            keyword_case: CaseOption::default(),
            identifier_case: CaseOption::default(),
            new_line_lists: false,
            space_between_statements: false,
        }
    }
}
