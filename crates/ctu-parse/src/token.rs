use ctu_ast::ast::{Base, Builtin};
use ctu_ast::span::{Loc, Span};
use std::fmt;

/// Keywords, builtin type names and punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    // keywords
    Import,
    Var,
    Let,
    Def,
    Type,
    Mut,
    Struct,
    Union,
    Enum,
    If,
    Else,
    Do,
    While,
    For,
    Switch,
    Case,
    Break,
    Continue,
    Default,
    Match,
    Return,
    Cast,
    True,
    False,
    // u8, i32, bool, ...
    Builtin(Builtin),
    // punctuation
    LParen,
    RParen,
    LSquare,
    RSquare,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Semi,
    At,
    Colon,
    ColonColon,
    // operators
    Plus,
    PlusEq,
    Minus,
    MinusEq,
    Star,
    StarEq,
    Slash,
    SlashEq,
    Percent,
    PercentEq,
    Bang,
    BangEq,
    Eq,
    EqEq,
    Amp,
    AndAnd,
    OrOr,
    Lt,
    Le,
    Gt,
    Ge,
}

const KEYWORDS: &[(&str, Key)] = &[
    ("import", Key::Import),
    ("var", Key::Var),
    ("let", Key::Let),
    ("def", Key::Def),
    ("type", Key::Type),
    ("mut", Key::Mut),
    ("struct", Key::Struct),
    ("union", Key::Union),
    ("enum", Key::Enum),
    ("if", Key::If),
    ("else", Key::Else),
    ("do", Key::Do),
    ("while", Key::While),
    ("for", Key::For),
    ("switch", Key::Switch),
    ("case", Key::Case),
    ("break", Key::Break),
    ("continue", Key::Continue),
    ("default", Key::Default),
    ("match", Key::Match),
    ("return", Key::Return),
    ("cast", Key::Cast),
    ("true", Key::True),
    ("false", Key::False),
];

impl Key {
    /// Looks `word` up in the keyword and builtin type tables.
    pub fn keyword(word: &str) -> Option<Key> {
        KEYWORDS
            .iter()
            .find(|(text, _)| *text == word)
            .map(|(_, key)| *key)
            .or_else(|| Builtin::from_name(word).map(Key::Builtin))
    }

    pub fn text(self) -> &'static str {
        match self {
            Key::Builtin(b) => b.name(),
            Key::LParen => "(",
            Key::RParen => ")",
            Key::LSquare => "[",
            Key::RSquare => "]",
            Key::LBrace => "{",
            Key::RBrace => "}",
            Key::Comma => ",",
            Key::Dot => ".",
            Key::Semi => ";",
            Key::At => "@",
            Key::Colon => ":",
            Key::ColonColon => "::",
            Key::Plus => "+",
            Key::PlusEq => "+=",
            Key::Minus => "-",
            Key::MinusEq => "-=",
            Key::Star => "*",
            Key::StarEq => "*=",
            Key::Slash => "/",
            Key::SlashEq => "/=",
            Key::Percent => "%",
            Key::PercentEq => "%=",
            Key::Bang => "!",
            Key::BangEq => "!=",
            Key::Eq => "=",
            Key::EqEq => "==",
            Key::Amp => "&",
            Key::AndAnd => "&&",
            Key::OrOr => "||",
            Key::Lt => "<",
            Key::Le => "<=",
            Key::Gt => ">",
            Key::Ge => ">=",
            word => KEYWORDS
                .iter()
                .find(|(_, key)| *key == word)
                .map(|(text, _)| *text)
                .unwrap_or("?"),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokKind {
    Eof,
    /// Malformed input; the message says why.
    Error(String),
    Ident(String),
    Key(Key),
    Int { value: u64, base: Base },
    Float(f64),
    Str(String),
}

impl fmt::Display for TokKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokKind::Eof => f.write_str("end of input"),
            TokKind::Error(msg) => write!(f, "invalid token ({msg})"),
            TokKind::Ident(name) => write!(f, "identifier `{name}`"),
            TokKind::Key(key) => write!(f, "`{key}`"),
            TokKind::Int { value, .. } => write!(f, "integer literal `{value}`"),
            TokKind::Float(value) => write!(f, "float literal `{value}`"),
            TokKind::Str(_) => f.write_str("string literal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tok {
    pub kind: TokKind,
    pub span: Span,
    pub loc: Loc,
}

impl Tok {
    pub fn key(&self) -> Option<Key> {
        match self.kind {
            TokKind::Key(key) => Some(key),
            _ => None,
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokKind::Eof)
    }
}
