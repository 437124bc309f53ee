#![cfg(test)]
use crate::testing::common_init;
use crate::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use sqlparser::{dialect::GenericDialect, parser::Parser};

fn format(sql: &str) -> String {
    common_init();
    format_sql(sql, &FormatOptions::default()).expect("formatting should succeed")
}

fn upper() -> FormatOptions {
    FormatOptions {
        keyword_case: CaseOption::Upper,
        identifier_case: CaseOption::Upper,
        ..FormatOptions::default()
    }
}

mod layout {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keywords_break_lines() {
        assert_eq!(
            format_sql("select a,b from t", &upper()).expect("formats"),
            "SELECT A, B\nFROM T;"
        );
    }

    #[test]
    fn single_line_statements_stay_on_one_line() {
        assert_eq!(
            format("delete from t where a = 1"),
            "delete from t where a = 1;"
        );
        assert_eq!(format("SET x = (SELECT 1)"), "SET x = (\n    SELECT 1\n);");
    }

    #[test]
    fn procedure_body_is_indented() {
        assert_eq!(
            format("CREATE PROCEDURE P() BEGIN DECLARE X INT; SET X = 1; END"),
            "CREATE PROCEDURE P() BEGIN\n    DECLARE X INT;\n    SET X = 1;\nEND;"
        );
    }

    #[test]
    fn labeled_block() {
        assert_eq!(format("lbl: BEGIN END lbl;"), "lbl: BEGIN\nEND lbl;");
    }

    #[test]
    fn if_else_branches() {
        assert_eq!(
            format("IF x = 1 THEN SET y = 1; ELSE SET y = 2; END IF;"),
            "IF x = 1 THEN\n    SET y = 1;\nELSE\n    SET y = 2;\nEND IF;"
        );
    }

    #[test]
    fn loops_nest_inside_compound() {
        let sql = "CREATE PROCEDURE P() BEGIN DECLARE I INT; \
                   WHILE I < 3 DO SET I = I + 1; END WHILE; END";
        assert_eq!(
            format(sql),
            "CREATE PROCEDURE P() BEGIN\n    DECLARE I INT;\n    WHILE I < 3 DO\n        \
             SET I = I + 1;\n    END WHILE;\nEND;"
        );
    }

    /// `IF x THEN;` is not valid SQL PL, so only statements closed by a
    /// top-level `;` or end of input get one.
    #[rstest]
    #[case("IF a THEN SET b = 1; END IF;", "IF a THEN\n    SET b = 1;\nEND IF;")]
    #[case("WHILE a DO CALL p(); END WHILE;", "WHILE a DO\n    CALL p();\nEND WHILE;")]
    #[case("LOOP CALL p(); END LOOP;", "LOOP\n    CALL p();\nEND LOOP;")]
    #[case("lbl: LOOP LEAVE lbl; END LOOP lbl;", "lbl: LOOP\n    LEAVE lbl;\nEND LOOP lbl;")]
    #[case("BEGIN ATOMIC CALL p(); END", "BEGIN ATOMIC\n    CALL p();\nEND;")]
    fn body_openers_take_no_semicolon(#[case] sql: &str, #[case] expected: &str) {
        assert_eq!(format(sql), expected);
    }

    #[test]
    fn create_columns_one_per_line() {
        assert_eq!(
            format("CREATE TABLE T (A INT, B VARCHAR(10))"),
            "CREATE TABLE T (\n    A INT,\n    B VARCHAR(10)\n);"
        );
    }

    #[test]
    fn sub_query_block_expands() {
        assert_eq!(
            format("SELECT * FROM t WHERE a IN (SELECT b FROM u)"),
            "SELECT *\nFROM t\nWHERE a IN (\n    SELECT b\n    FROM u\n);"
        );
    }

    #[rstest]
    #[case("SELECT COUNT(*) FROM t", "SELECT COUNT(*)\nFROM t;")]
    #[case("CALL p()", "CALL p();")]
    #[case("SELECT a FROM t WHERE b IN (1, 2)", "SELECT a\nFROM t\nWHERE b IN (1, 2);")]
    #[case("SELECT x.a FROM s.t x", "SELECT x.a\nFROM s.t x;")]
    fn inline_blocks(#[case] sql: &str, #[case] expected: &str) {
        assert_eq!(format(sql), expected);
    }

    #[test]
    fn three_items_expand_as_list() {
        assert_eq!(
            format("CALL p(1, 2, 3)"),
            "CALL p (\n    1,\n    2,\n    3\n);"
        );
    }

    #[test]
    fn new_line_lists() {
        let options = FormatOptions {
            new_line_lists: true,
            ..FormatOptions::default()
        };
        assert_eq!(
            format_sql("SELECT a, b FROM t", &options).expect("formats"),
            "SELECT\n    a,\n    b\nFROM\n    t;"
        );
    }

    #[test]
    fn indent_width_is_configurable() {
        let options = FormatOptions {
            indent_width: 2,
            ..FormatOptions::default()
        };
        assert_eq!(
            format_sql("BEGIN CALL p(); END", &options).expect("formats"),
            "BEGIN\n  CALL p();\nEND;"
        );
    }

    #[test]
    fn space_between_statements() {
        let options = FormatOptions {
            space_between_statements: true,
            ..FormatOptions::default()
        };
        assert_eq!(
            format_sql("SELECT 1; SELECT 2; UPDATE t SET a = 1;", &options).expect("formats"),
            "SELECT 1;\nSELECT 2;\n\nUPDATE t\nSET a = 1;"
        );
    }

    #[test]
    fn crlf_is_preserved() {
        assert_eq!(
            format("SELECT a FROM t;\r\nSELECT b FROM u;"),
            "SELECT a\r\nFROM t;\r\nSELECT b\r\nFROM u;"
        );
    }

    #[test]
    fn case_applies_to_keywords_and_words_only() {
        let options = FormatOptions {
            keyword_case: CaseOption::Lower,
            identifier_case: CaseOption::Upper,
            ..FormatOptions::default()
        };
        assert_eq!(
            format_sql("SELECT name, \"Mixed\" FROM t WHERE c = 'Abc'", &options)
                .expect("formats"),
            "select NAME, \"Mixed\"\nfrom T\nwhere C = 'Abc';"
        );
    }
}

mod comments {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_comments_end_their_line() {
        let sql = "-- header\nSELECT a -- trailing\nFROM t;";
        assert_eq!(format(sql), sql);
    }

    #[test]
    fn semicolon_after_trailing_line_comment() {
        assert_eq!(format("SELECT 1 -- one"), "SELECT 1 -- one\n;");
    }

    #[test]
    fn comment_only_statement_has_no_semicolon() {
        assert_eq!(format("SELECT 1; -- done"), "SELECT 1;\n-- done");
    }

    #[rstest]
    #[case("SELECT (a -- note\n) FROM t", "SELECT (\n    a -- note\n)\nFROM t;")]
    #[case("CALL p(a -- note\n)", "CALL p (\n    a -- note\n);")]
    #[case("CALL p(-- only\n)", "CALL p (\n    -- only\n);")]
    fn line_comment_in_block_expands(#[case] sql: &str, #[case] expected: &str) {
        let formatted = format(sql);
        assert_eq!(formatted, expected);
        assert_eq!(format(&formatted), formatted);
    }

    #[test]
    fn block_comment_stays_inline() {
        assert_eq!(format("SELECT /* all */ * FROM t"), "SELECT /* all */ *\nFROM t;");
    }
}

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unbalanced_parens_fail() {
        match format_sql("SELECT (a FROM t", &FormatOptions::default()) {
            Err(Error::UnbalancedParens { paren, offset }) => {
                assert_eq!((paren, offset), ('(', 7));
            }
            other => panic!("expected UnbalancedParens, got {other:?}"),
        }
    }

    #[test]
    fn unmatched_close_paren_fails() {
        assert!(matches!(
            format_sql("SELECT a) FROM t", &FormatOptions::default()),
            Err(Error::UnbalancedParens { paren: ')', .. })
        ));
    }

    #[test]
    fn block_without_interior_is_malformed() {
        let tokens = vec![
            Token::new(TokenKind::StatementType(StatementType::Call), "CALL", 0, 4),
            Token::new(TokenKind::Word, "p", 5, 6),
            Token {
                kind: TokenKind::Block,
                value: String::new(),
                start: 6,
                end: 8,
                block: None,
            },
        ];
        assert!(matches!(
            format_tokens(&tokens, &FormatOptions::default()),
            Err(Error::MalformedBlockToken { offset: 6 })
        ));
    }

    #[test]
    fn unmatched_end_still_formats() {
        assert_eq!(format("END; SELECT 1;"), "END;\nSELECT 1;");
    }
}

const SAMPLES: [&str; 13] = [
    "select a,b from t",
    "SELECT * FROM t WHERE a IN (SELECT b FROM u WHERE c = 'x''y') ORDER BY a",
    "CREATE TABLE lib.t (id INT NOT NULL, name VARCHAR(20), PRIMARY KEY (id))",
    "CREATE PROCEDURE P(IN a INT, OUT b INT) BEGIN DECLARE X INT DEFAULT 0; SET b = a; END",
    "lbl: BEGIN ATOMIC LEAVE lbl; END lbl;",
    "IF a > 1 THEN CALL p(1, 2, 3); ELSEIF a = 0 THEN SET b = 0; ELSE SET b = 1; END IF;",
    "WHILE i < 10 DO SET i = i + 1; END WHILE;",
    "INSERT INTO t (a, b) VALUES (1, 2), (3, 4)",
    "SELECT (a -- note\n) FROM t WHERE b IN (1 /* x */, 2 -- two\n)",
    "-- header\nSELECT a -- trailing\nFROM t;\n/* block */ DELETE FROM t",
    "UPDATE t SET a = (SELECT MAX(b) FROM u) WHERE c = :host",
    "SELECT 1; SELECT 2; END; SELECT 3 -- tail",
    "WITH x AS (SELECT a FROM t GROUP BY a HAVING COUNT(*) > 1) SELECT * FROM x",
];

#[rstest]
fn formatting_is_idempotent(
    #[values(
        FormatOptions::default(),
        upper(),
        FormatOptions { new_line_lists: true, ..FormatOptions::default() },
        FormatOptions { space_between_statements: true, indent_width: 2, ..FormatOptions::default() }
    )]
    options: FormatOptions,
) {
    common_init();
    for sql in SAMPLES {
        let once = format_sql(sql, &options).expect("first pass");
        let twice = format_sql(&once, &options).expect("second pass");
        assert_eq!(once, twice, "not idempotent for {sql:?} with {options:?}");
    }
}

#[rstest]
#[case("select a, b from t where a = 1 order by b")]
#[case("SELECT x.a FROM t x WHERE x.b IN (SELECT c FROM u) ORDER BY x.a")]
#[case("UPDATE t SET a = 1 WHERE b = 2")]
#[case("DELETE FROM t WHERE a > 1")]
#[case("INSERT INTO t (a, b) VALUES (1, 2)")]
#[case("SELECT a, COUNT(*) FROM t GROUP BY a HAVING COUNT(*) > 1")]
#[case("SELECT a FROM t UNION SELECT b FROM u")]
#[case("SELECT COALESCE(a, b, c) FROM t WHERE d <> 'x'")]
fn formatting_keeps_meaning(#[case] sql: &str) {
    let dialect = GenericDialect {};
    let formatted = format(sql);
    let before = Parser::parse_sql(&dialect, sql).expect("input parses");
    let after = Parser::parse_sql(&dialect, &formatted)
        .unwrap_or_else(|e| panic!("formatted output {formatted:?} does not parse: {e}"));
    assert_eq!(
        before.iter().map(ToString::to_string).collect::<Vec<_>>(),
        after.iter().map(ToString::to_string).collect::<Vec<_>>()
    );
}
