use crate::token::{Key, Tok, TokKind};
use ctu_ast::ast::Base;
use ctu_ast::span::{Loc, Span};
use std::iter::Fuse;

/// Byte-at-a-time lexer with a single byte of lookahead.
///
/// Offsets, lines and columns are `u32` and saturate past 4 GiB of input.
pub struct Lexer<I: Iterator<Item = u8>> {
    src: Fuse<I>,
    peeked: Option<u8>,
    pos: u32,
    line: u32,
    col: u32,
}

impl<'a> Lexer<std::str::Bytes<'a>> {
    pub fn new(src: &'a str) -> Self {
        Self::from_bytes(src.bytes())
    }
}

impl<I: Iterator<Item = u8>> Lexer<I> {
    pub fn from_bytes(src: I) -> Self {
        let mut src = src.fuse();
        let peeked = src.next();
        Self {
            src,
            peeked,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.peeked
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peeked?;
        self.peeked = self.src.next();
        self.pos = self.pos.saturating_add(1);
        if b == b'\n' {
            self.line = self.line.saturating_add(1);
            self.col = 1;
        } else {
            self.col = self.col.saturating_add(1);
        }
        Some(b)
    }

    fn eat(&mut self, want: u8) -> bool {
        if self.peek() == Some(want) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn loc(&self) -> Loc {
        Loc {
            line: self.line,
            col: self.col,
        }
    }

    fn tok(&self, kind: TokKind, start: u32, loc: Loc) -> Tok {
        Tok {
            kind,
            span: Span::new(start, self.pos),
            loc,
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.bump();
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'\n' {
                break;
            }
            self.bump();
        }
    }

    /// Skips the rest of a `/* */` comment whose opener was consumed.
    /// Returns false when input ends before the comment closes.
    fn skip_block_comment(&mut self) -> bool {
        let mut depth = 1u32;
        while let Some(b) = self.bump() {
            if b == b'/' && self.eat(b'*') {
                depth = depth.saturating_add(1);
            } else if b == b'*' && self.eat(b'/') {
                depth -= 1;
                if depth == 0 {
                    return true;
                }
            }
        }
        false
    }

    /// Produces the next token. Returns `Eof` forever once input runs out.
    pub fn next_tok(&mut self) -> Tok {
        loop {
            self.skip_ws();
            let start = self.pos;
            let loc = self.loc();
            let Some(b) = self.bump() else {
                return self.tok(TokKind::Eof, start, loc);
            };

            if b == b'/' {
                if self.eat(b'/') {
                    self.skip_line_comment();
                    continue;
                }
                if self.eat(b'*') {
                    if self.skip_block_comment() {
                        continue;
                    }
                    let kind = TokKind::Error("unterminated block comment".into());
                    return self.tok(kind, start, loc);
                }
            }

            let kind = self.lex_from(b);
            return self.tok(kind, start, loc);
        }
    }

    fn lex_from(&mut self, b: u8) -> TokKind {
        match b {
            b'(' => TokKind::Key(Key::LParen),
            b')' => TokKind::Key(Key::RParen),
            b'[' => TokKind::Key(Key::LSquare),
            b']' => TokKind::Key(Key::RSquare),
            b'{' => TokKind::Key(Key::LBrace),
            b'}' => TokKind::Key(Key::RBrace),
            b',' => TokKind::Key(Key::Comma),
            b'.' => TokKind::Key(Key::Dot),
            b';' => TokKind::Key(Key::Semi),
            b'@' => TokKind::Key(Key::At),
            b'+' => self.compound(b'=', Key::PlusEq, Key::Plus),
            b'-' => self.compound(b'=', Key::MinusEq, Key::Minus),
            b'*' => self.compound(b'=', Key::StarEq, Key::Star),
            b'/' => self.compound(b'=', Key::SlashEq, Key::Slash),
            b'%' => self.compound(b'=', Key::PercentEq, Key::Percent),
            b':' => self.compound(b':', Key::ColonColon, Key::Colon),
            b'!' => self.compound(b'=', Key::BangEq, Key::Bang),
            b'=' => self.compound(b'=', Key::EqEq, Key::Eq),
            b'&' => self.compound(b'&', Key::AndAnd, Key::Amp),
            b'<' => self.compound(b'=', Key::Le, Key::Lt),
            b'>' => self.compound(b'=', Key::Ge, Key::Gt),
            b'|' => {
                if self.eat(b'|') {
                    TokKind::Key(Key::OrOr)
                } else {
                    TokKind::Error("unexpected character `|`".into())
                }
            }
            b'"' => self.string(),
            b'0'..=b'9' => self.number(b),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.word(b),
            b if b.is_ascii() => TokKind::Error(format!("unexpected character `{}`", b as char)),
            b => TokKind::Error(format!("unexpected byte 0x{b:02x}")),
        }
    }

    fn compound(&mut self, second: u8, long: Key, short: Key) -> TokKind {
        if self.eat(second) {
            TokKind::Key(long)
        } else {
            TokKind::Key(short)
        }
    }

    fn word(&mut self, first: u8) -> TokKind {
        let mut s = String::from(first as char);
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                s.push(b as char);
                self.bump();
            } else {
                break;
            }
        }
        match Key::keyword(&s) {
            Some(key) => TokKind::Key(key),
            None => TokKind::Ident(s),
        }
    }

    fn number(&mut self, first: u8) -> TokKind {
        if first == b'0' {
            match self.peek() {
                Some(b'x' | b'X') => {
                    self.bump();
                    return self.radix_int(Base::Hex);
                }
                Some(b'b' | b'B') => {
                    self.bump();
                    return self.radix_int(Base::Bin);
                }
                Some(b'.') => {}
                _ => return TokKind::Error("integer literals may not begin with 0".into()),
            }
        }

        let mut s = String::from(first as char);
        let mut dot = false;
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() {
                s.push(b as char);
                self.bump();
            } else if b == b'.' && !dot {
                dot = true;
                s.push('.');
                self.bump();
            } else {
                break;
            }
        }

        if dot {
            match s.parse::<f64>() {
                Ok(value) if value.is_finite() => TokKind::Float(value),
                Ok(_) => TokKind::Error("float literal out of range".into()),
                Err(_) => TokKind::Error(format!("invalid float literal `{s}`")),
            }
        } else {
            match s.parse() {
                Ok(value) => TokKind::Int {
                    value,
                    base: Base::Dec,
                },
                Err(_) => TokKind::Error("integer literal out of range".into()),
            }
        }
    }

    /// Digits of a `0x`/`0b` literal; the prefix is already consumed.
    fn radix_int(&mut self, base: Base) -> TokKind {
        let radix = base.radix();
        let mut digits = String::new();
        while let Some(b) = self.peek() {
            if (b as char).is_digit(radix) {
                digits.push(b as char);
                self.bump();
            } else {
                break;
            }
        }
        if digits.is_empty() {
            let prefix = if base == Base::Hex { "0x" } else { "0b" };
            return TokKind::Error(format!("expected digits after `{prefix}`"));
        }
        match u64::from_str_radix(&digits, radix) {
            Ok(value) => TokKind::Int { value, base },
            Err(_) => TokKind::Error("integer literal out of range".into()),
        }
    }

    /// Body of a string literal; the opening quote is already consumed.
    fn string(&mut self) -> TokKind {
        let mut bytes = Vec::new();
        loop {
            let Some(b) = self.bump() else {
                return TokKind::Error("unterminated string literal".into());
            };
            match b {
                b'"' => break,
                b'\\' => {
                    let real = match self.bump() {
                        Some(b'n') => b'\n',
                        Some(b'r') => b'\r',
                        Some(b't') => b'\t',
                        Some(b'0') => b'\0',
                        Some(b'\\') => b'\\',
                        Some(b'"') => b'"',
                        Some(b'\'') => b'\'',
                        Some(other) => {
                            return TokKind::Error(format!(
                                "invalid escape sequence `\\{}`",
                                other as char
                            ));
                        }
                        None => return TokKind::Error("unterminated string literal".into()),
                    };
                    bytes.push(real);
                }
                _ => bytes.push(b),
            }
        }
        match String::from_utf8(bytes) {
            Ok(s) => TokKind::Str(s),
            Err(_) => TokKind::Error("invalid UTF-8 in string literal".into()),
        }
    }
}

/// Lexes all of `src`. The last token is either `Eof` or the first `Error`.
pub fn tokenize(src: &str) -> Vec<Tok> {
    let mut lex = Lexer::new(src);
    let mut toks = Vec::new();
    loop {
        let tok = lex.next_tok();
        let last = matches!(tok.kind, TokKind::Eof | TokKind::Error(_));
        toks.push(tok);
        if last {
            return toks;
        }
    }
}
