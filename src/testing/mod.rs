#![cfg(test)]
pub use rstest::*;

/// Install a tracing subscriber that writes through the test harness.
/// `RUST_LOG` selects the level.
pub(crate) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Only initialize once for all tests
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
            .with_test_writer() // ensures it integrates with `cargo test` output
            .init();
    });
}

mod fixtures {
    use super::*;
    use crate::*;

    /// A small script touching every statement shape the segmenter knows.
    #[fixture]
    pub(crate) fn script() -> &'static str {
        "CREATE TABLE app.orders (id INT, total DECIMAL(9, 2));\n\
         CREATE OR REPLACE PROCEDURE app.close_order(IN p_id INT)\n\
         BEGIN\n\
         DECLARE v_total DECIMAL(9, 2);\n\
         IF p_id > 0 THEN\n\
         SET v_total = 0;\n\
         END IF;\n\
         END;\n\
         DROP VIEW app.open_orders;"
    }

    #[rstest]
    fn script_segments(script: &str) {
        common_init();
        let doc = Document::new(script);
        assert_eq!(doc.statements().len(), 8);
        let sizes: Vec<_> = doc
            .statement_groups()
            .iter()
            .map(|g| g.statements.len())
            .collect();
        assert_eq!(sizes, vec![1, 6, 1]);
    }

    #[rstest]
    fn script_formats_twice_the_same(script: &str) {
        common_init();
        let once = format_sql(script, &FormatOptions::default()).expect("formats");
        let twice = format_sql(&once, &FormatOptions::default()).expect("formats again");
        assert_eq!(once, twice);
    }
}
