use ctu_ast::ast::{Base, Builtin};
use ctu_parse::token::{Key, TokKind};
use ctu_parse::{tokenize, Lexer};

fn kinds(src: &str) -> Vec<TokKind> {
    tokenize(src).into_iter().map(|t| t.kind).collect()
}

fn single(src: &str) -> TokKind {
    let toks = tokenize(src);
    assert_eq!(
        toks.len(),
        2,
        "expected one token then Eof for {src:?}: {toks:?}"
    );
    toks[0].kind.clone()
}

fn single_err(src: &str) -> String {
    match tokenize(src).remove(0).kind {
        TokKind::Error(m) => m,
        other => panic!("expected error for {src:?}, got {other:?}"),
    }
}

fn int(value: u64, base: Base) -> TokKind {
    TokKind::Int { value, base }
}

fn string(s: &str) -> TokKind {
    TokKind::Str(s.into())
}

#[test]
fn keywords_builtins_and_identifiers() {
    assert_eq!(
        kinds("def type struct cast u8 bool void foo _bar9"),
        vec![
            TokKind::Key(Key::Def),
            TokKind::Key(Key::Type),
            TokKind::Key(Key::Struct),
            TokKind::Key(Key::Cast),
            TokKind::Key(Key::Builtin(Builtin::U8)),
            TokKind::Key(Key::Builtin(Builtin::Bool)),
            TokKind::Key(Key::Builtin(Builtin::Void)),
            TokKind::Ident("foo".into()),
            TokKind::Ident("_bar9".into()),
            TokKind::Eof,
        ]
    );
}

#[test]
fn keyword_prefix_is_still_an_identifier() {
    assert_eq!(single("imports"), TokKind::Ident("imports".into()));
    assert_eq!(single("i32x"), TokKind::Ident("i32x".into()));
}

#[test]
fn punctuation() {
    assert_eq!(
        kinds("()[]{},.;@"),
        vec![
            TokKind::Key(Key::LParen),
            TokKind::Key(Key::RParen),
            TokKind::Key(Key::LSquare),
            TokKind::Key(Key::RSquare),
            TokKind::Key(Key::LBrace),
            TokKind::Key(Key::RBrace),
            TokKind::Key(Key::Comma),
            TokKind::Key(Key::Dot),
            TokKind::Key(Key::Semi),
            TokKind::Key(Key::At),
            TokKind::Eof,
        ]
    );
}

#[test]
fn assignment_operators() {
    assert_eq!(
        kinds("-= *= %= - * %"),
        vec![
            TokKind::Key(Key::MinusEq),
            TokKind::Key(Key::StarEq),
            TokKind::Key(Key::PercentEq),
            TokKind::Key(Key::Minus),
            TokKind::Key(Key::Star),
            TokKind::Key(Key::Percent),
            TokKind::Eof,
        ]
    );
}

#[test]
fn integer_bases() {
    assert_eq!(single("42"), int(42, Base::Dec));
    assert_eq!(single("0xFf"), int(255, Base::Hex));
    assert_eq!(single("0X10"), int(16, Base::Hex));
    assert_eq!(single("0b101"), int(5, Base::Bin));
    assert_eq!(single("0B1"), int(1, Base::Bin));
}

#[test]
fn floats() {
    assert_eq!(single("3.25"), TokKind::Float(3.25));
    assert_eq!(single("0.5"), TokKind::Float(0.5));
    assert_eq!(single("7."), TokKind::Float(7.0));
}

#[test]
fn float_takes_at_most_one_dot() {
    assert_eq!(
        kinds("1.2.3"),
        vec![
            TokKind::Float(1.2),
            TokKind::Key(Key::Dot),
            int(3, Base::Dec),
            TokKind::Eof,
        ]
    );
}

#[test]
fn leading_zero_is_rejected() {
    for src in ["0", "01", "0z", "0 "] {
        assert_eq!(
            single_err(src),
            "integer literals may not begin with 0",
            "{src:?}"
        );
    }
}

#[test]
fn radix_prefix_without_digits_is_an_error() {
    assert_eq!(single_err("0x"), "expected digits after `0x`");
    assert_eq!(single_err("0bz"), "expected digits after `0b`");
}

#[test]
fn integer_overflow_is_an_error() {
    assert_eq!(
        single_err("18446744073709551616"),
        "integer literal out of range"
    );
    assert_eq!(single("18446744073709551615"), int(u64::MAX, Base::Dec));
}

#[test]
fn float_overflow_is_an_error() {
    let huge = format!("1{}.0", "0".repeat(400));
    assert_eq!(single_err(&huge), "float literal out of range");

    let big = format!("1{}.5", "0".repeat(300));
    assert!(matches!(single(&big), TokKind::Float(v) if v.is_finite()));
}

#[test]
fn strings_and_escapes() {
    assert_eq!(single(r#""hello world""#), string("hello world"));
    assert_eq!(single(r#""a\n\t\"b\\""#), string("a\n\t\"b\\"));
    assert_eq!(single("\"two\nlines\""), string("two\nlines"));
    assert_eq!(single("\"héllo\""), string("héllo"));
}

#[test]
fn string_errors() {
    assert_eq!(single_err("\"open"), "unterminated string literal");
    assert_eq!(single_err("\"bad \\q\""), "invalid escape sequence `\\q`");
}

#[test]
fn comments_are_skipped() {
    assert_eq!(
        kinds("a // line\n b /* block */ c"),
        vec![
            TokKind::Ident("a".into()),
            TokKind::Ident("b".into()),
            TokKind::Ident("c".into()),
            TokKind::Eof,
        ]
    );
}

#[test]
fn nested_block_comments_lex_to_nothing() {
    assert_eq!(kinds("/* a /* b */ c */"), vec![TokKind::Eof]);
    assert_eq!(
        kinds("/* /* /* */ */ */ x"),
        vec![TokKind::Ident("x".into()), TokKind::Eof]
    );
}

#[test]
fn unterminated_block_comment_is_an_error() {
    assert_eq!(single_err("/* a"), "unterminated block comment");
    assert_eq!(single_err("/* a /* b */"), "unterminated block comment");
}

#[test]
fn unknown_characters_are_errors() {
    assert_eq!(single_err("$"), "unexpected character `$`");
    assert_eq!(single_err("|"), "unexpected character `|`");
    assert!(single_err("é").starts_with("unexpected byte"));
}

#[test]
fn eof_repeats() {
    let mut lex = Lexer::new("x");
    assert_eq!(lex.next_tok().kind, TokKind::Ident("x".into()));
    for _ in 0..3 {
        assert_eq!(lex.next_tok().kind, TokKind::Eof);
    }
}

#[test]
fn lexer_reads_any_byte_iterator() {
    let bytes = b"def f".to_vec();
    let mut lex = Lexer::from_bytes(bytes.into_iter());
    assert_eq!(lex.next_tok().kind, TokKind::Key(Key::Def));
    assert_eq!(lex.next_tok().kind, TokKind::Ident("f".into()));
    assert_eq!(lex.next_tok().kind, TokKind::Eof);
}

#[test]
fn spans_cover_token_text() {
    let src = "var  x = 0x1F;";
    for tok in tokenize(src) {
        let text = &src[tok.span.start as usize..tok.span.end as usize];
        match &tok.kind {
            TokKind::Key(Key::Var) => assert_eq!(text, "var"),
            TokKind::Ident(name) => assert_eq!(text, name),
            TokKind::Int { .. } => assert_eq!(text, "0x1F"),
            TokKind::Eof => assert_eq!(text, ""),
            _ => assert_eq!(text.len(), 1),
        }
    }
}
