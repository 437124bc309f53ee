use confique::Config as _;

use crate::*;

/// Settings read from `SQLPL_*` environment variables.
#[derive(Debug, confique::Config)]
pub struct Config {
    #[config(env = "SQLPL_INDENT_WIDTH", default = 4)]
    pub indent_width: usize,
    /// `preserve`, `upper` or `lower`.
    #[config(env = "SQLPL_KEYWORD_CASE", default = "preserve")]
    pub keyword_case: String,
    #[config(env = "SQLPL_IDENTIFIER_CASE", default = "preserve")]
    pub identifier_case: String,
    #[config(env = "SQLPL_NEW_LINE_LISTS", default = false)]
    pub new_line_lists: bool,
    #[config(env = "SQLPL_SPACE_BETWEEN_STATEMENTS", default = false)]
    pub space_between_statements: bool,
    /// Maximum number of entries in an [`ObjectCache`].
    #[config(env = "SQLPL_CACHE_CAPACITY", default = 1024)]
    pub cache_capacity: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self::builder().env().load()?)
    }

    /// Formatter settings, failing on an unknown case option.
    pub fn format_options(&self) -> Result<FormatOptions> {
        Ok(FormatOptions {
            indent_width: self.indent_width,
            keyword_case: self.keyword_case.parse()?,
            identifier_case: self.identifier_case.parse()?,
            new_line_lists: self.new_line_lists,
            space_between_statements: self.space_between_statements,
        })
    }
}
