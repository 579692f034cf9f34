use ctu_ast::ast::Base;
use ctu_parse::token::{Key, TokKind};
use ctu_parse::{tokenize, Lexer};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn never_panics_and_terminates(s in ".*") {
        let toks = tokenize(&s);
        let last = toks.last().expect("at least one token");
        prop_assert!(matches!(last.kind, TokKind::Eof | TokKind::Error(_)));

        // real tokens are in bounds and move forward
        let mut prev_end = 0u32;
        for tok in &toks {
            prop_assert!(
                tok.span.start >= prev_end,
                "token moved backwards: {tok:?} in {s:?}"
            );
            prop_assert!(tok.span.start <= tok.span.end);
            prop_assert!(tok.span.end as usize <= s.len());
            prev_end = tok.span.end;
        }
    }

    #[test]
    fn only_trivia_separates_tokens(
        words in prop::collection::vec("[a-z_][a-z0-9_]{0,6}", 1..12)
    ) {
        let src = words.join(" /* c */ ");
        let toks = tokenize(&src);
        prop_assert_eq!(toks.len(), words.len() + 1);
        for (tok, word) in toks.iter().zip(&words) {
            let text = &src[tok.span.start as usize..tok.span.end as usize];
            prop_assert_eq!(text, word.as_str());
        }
    }

    #[test]
    fn decimal_round_trip(n in 1u64..) {
        let toks = tokenize(&n.to_string());
        prop_assert_eq!(&toks[0].kind, &TokKind::Int { value: n, base: Base::Dec });
    }

    #[test]
    fn hex_round_trip(n in any::<u64>()) {
        let toks = tokenize(&format!("0x{n:x}"));
        prop_assert_eq!(&toks[0].kind, &TokKind::Int { value: n, base: Base::Hex });
    }

    #[test]
    fn binary_round_trip(n in any::<u64>()) {
        let toks = tokenize(&format!("0b{n:b}"));
        prop_assert_eq!(&toks[0].kind, &TokKind::Int { value: n, base: Base::Bin });
    }

    #[test]
    fn zero_needs_a_prefix(
        c in any::<char>().prop_filter("prefix chars", |c| !"xXbB.".contains(*c))
    ) {
        let toks = tokenize(&format!("0{c}"));
        prop_assert_eq!(
            &toks[0].kind,
            &TokKind::Error("integer literals may not begin with 0".into())
        );
    }

    #[test]
    fn finite_floats_lex_to_their_value(x in 0.0f64..1e15) {
        let text = format!("{x:?}");
        prop_assume!(!text.contains('e'));
        let toks = tokenize(&text);
        prop_assert_eq!(&toks[0].kind, &TokKind::Float(x));
    }

    #[test]
    fn eof_is_sticky(s in "[a-z ]{0,16}", extra in 1usize..8) {
        let mut lex = Lexer::new(&s);
        while lex.next_tok().kind != TokKind::Eof {}
        for _ in 0..extra {
            prop_assert_eq!(lex.next_tok().kind, TokKind::Eof);
        }
    }
}

#[test]
fn keyword_table_round_trips_through_text() {
    for word in [
        "import", "var", "let", "def", "type", "mut", "struct", "union", "enum", "if", "else", "do",
        "while", "for", "switch", "case", "break", "continue", "default", "match", "return", "cast",
        "true", "false", "u8", "u16", "u32", "u64", "i8", "i16", "i32", "i64", "f32", "f64", "int",
        "uint", "bool", "void",
    ] {
        let key = Key::keyword(word).unwrap_or_else(|| panic!("{word} is not a keyword"));
        assert_eq!(key.text(), word);
    }
}
