use ctu_ast::span::Loc;
use ctu_parse::{parse_str, ErrorKind, ParseError};

fn parse_err(src: &str) -> ParseError {
    parse_str("<mem>", src).unwrap_err()
}

#[test]
fn lex_errors_surface_as_lex_kind() {
    let err = parse_err("def f() = 01;");
    assert_eq!(err.kind(), ErrorKind::Lex);
    assert_eq!(
        err,
        ParseError::Lex {
            message: "integer literals may not begin with 0".into(),
            loc: Loc { line: 1, col: 11 },
        }
    );
}

#[test]
fn lex_error_wins_over_expected_token() {
    // the parser wants `;` but the lexer fails first
    let err = parse_err("def f() = 1 $");
    assert_eq!(err.kind(), ErrorKind::Lex);
    let msg = err.to_string();
    assert!(msg.contains("unexpected character `$`"), "{msg}");
}

#[test]
fn lex_error_while_peeking() {
    let err = parse_err("import a(*); \"open");
    assert_eq!(err.kind(), ErrorKind::Lex);
    let msg = err.to_string();
    assert!(msg.contains("unterminated string literal"), "{msg}");
}

#[test]
fn unterminated_comment_is_a_lex_error() {
    let err = parse_err("def f() {} /* never closed");
    assert_eq!(err.kind(), ErrorKind::Lex);
    assert_eq!(err.loc(), Loc { line: 1, col: 12 });
}

#[test]
fn out_of_range_float_does_not_reach_the_ast() {
    let src = format!("def f() = 1{}.0;", "0".repeat(400));
    let err = parse_err(&src);
    assert_eq!(
        err,
        ParseError::Lex {
            message: "float literal out of range".into(),
            loc: Loc { line: 1, col: 11 },
        }
    );
}

#[test]
fn expected_and_found_are_reported() {
    let err = parse_err("def f(i32 x: i32 = x;");
    assert_eq!(
        err,
        ParseError::Unexpected {
            expected: "`)`".into(),
            found: "`:`".into(),
            loc: Loc { line: 1, col: 12 },
        }
    );
    assert_eq!(
        err.to_string(),
        "syntax error at 1:12: expected `)`, found `:`"
    );
}

#[test]
fn unexpected_token_top_level() {
    let msg = parse_err("x = 1;").to_string();
    assert!(
        msg.contains("expected `type`, `struct`, `def` or `@`, found identifier `x`"),
        "{msg}"
    );
}

#[test]
fn error_locations_follow_lines() {
    let err = parse_err("def f() {\n  return\n}");
    assert_eq!(err.loc(), Loc { line: 3, col: 1 });
}

#[test]
fn builtin_cannot_be_a_name() {
    let msg = parse_err("def i32() {}").to_string();
    assert!(msg.contains("expected identifier, found `i32`"), "{msg}");
}

#[test]
fn reserved_keywords_are_not_identifiers() {
    for kw in ["union", "enum", "var"] {
        let msg = parse_err(&format!("struct {kw}()")).to_string();
        assert!(msg.contains(&format!("found `{kw}`")), "{msg}");
    }
}
