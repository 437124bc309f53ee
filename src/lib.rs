//! SQL language front end for Db2-style SQL and SQL PL scripts.
//!
//! The crate turns a raw text buffer into tokens, statements and statement
//! groups, and from there into formatted SQL, outline symbols and object
//! references. Everything here is synchronous and free of I/O; the only
//! shared structure is the [`ObjectCache`], which is internally synchronized.
//!
//! ```rust
//! use sqlpl::{Document, FormatOptions, format_sql};
//!
//! let doc = Document::new("SELECT 1; SELECT 2;");
//! assert_eq!(doc.statement_groups().len(), 2);
//!
//! let formatted = format_sql("select a from t", &FormatOptions::default()).unwrap();
//! assert_eq!(formatted, "select a\nfrom t;");
//! ```

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}

reexport!(testing, test);
reexport!(error);
reexport!(config);
reexport!(sql);
reexport!(formatter);
reexport!(outline);
reexport!(cache);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};
