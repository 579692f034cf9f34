//! Recursive descent parser.
//!
//! One method per nonterminal, spread over `impl Parser` blocks:
//! - `decl`: imports, attributes, type aliases, structs, functions
//! - `types`: type expressions
//! - `stmt`: statements
//! - `expr`: expressions (precedence climbing)
//!
//! The parser pulls tokens from the lexer on demand and keeps at most one
//! token of pushback. Every optional production reads a token and hands it
//! back with `unread` when it does not match.

mod decl;
mod expr;
mod stmt;
mod types;

use crate::error::{ParseError, Result};
use crate::lexer::Lexer;
use crate::options::ParseOptions;
use crate::token::{Key, Tok, TokKind};
use ctu_ast::ast::{Path, Unit};
use ctu_ast::span::{Loc, Span};
use tracing::debug;

use decl::Decl;

pub fn parse_str(file: &str, src: &str) -> Result<Unit> {
    parse_str_with(file, src, ParseOptions::default())
}

pub fn parse_str_with(file: &str, src: &str, opts: ParseOptions) -> Result<Unit> {
    let _span = tracing::debug_span!("parse", file).entered();
    Parser::new(Lexer::new(src), opts).parse_unit()
}

pub struct Parser<I: Iterator<Item = u8>> {
    lex: Lexer<I>,
    pushed: Option<Tok>,
    /// End offset and location of the last consumed token.
    last_end: u32,
    last_loc: Loc,
    depth: u32,
    opts: ParseOptions,
}

impl<I: Iterator<Item = u8>> Parser<I> {
    pub fn new(lex: Lexer<I>, opts: ParseOptions) -> Self {
        Self {
            lex,
            pushed: None,
            last_end: 0,
            last_loc: Loc::default(),
            depth: 0,
            opts,
        }
    }

    // ======= token stream =======

    fn next(&mut self) -> Result<Tok> {
        let tok = match self.pushed.take() {
            Some(tok) => tok,
            None => self.lex.next_tok(),
        };
        if let TokKind::Error(message) = tok.kind {
            return Err(ParseError::Lex {
                message,
                loc: tok.loc,
            });
        }
        self.last_end = tok.span.end;
        self.last_loc = tok.loc;
        Ok(tok)
    }

    fn unread(&mut self, tok: Tok) {
        debug_assert!(self.pushed.is_none(), "only one token of pushback");
        self.pushed = Some(tok);
    }

    fn peek(&mut self) -> Result<&Tok> {
        let lex = &mut self.lex;
        let tok = self.pushed.get_or_insert_with(|| lex.next_tok());
        if let TokKind::Error(message) = &tok.kind {
            return Err(ParseError::Lex {
                message: message.clone(),
                loc: tok.loc,
            });
        }
        Ok(tok)
    }

    fn at(&mut self, key: Key) -> Result<bool> {
        Ok(self.peek()?.key() == Some(key))
    }

    /// Consumes the next token if it is `key`.
    fn eat(&mut self, key: Key) -> Result<bool> {
        let tok = self.next()?;
        if tok.key() == Some(key) {
            Ok(true)
        } else {
            self.unread(tok);
            Ok(false)
        }
    }

    fn expect(&mut self, key: Key) -> Result<Tok> {
        let tok = self.next()?;
        if tok.key() == Some(key) {
            Ok(tok)
        } else {
            Err(unexpected(&tok, format!("`{key}`")))
        }
    }

    fn ident(&mut self) -> Result<(String, Loc)> {
        let tok = self.next()?;
        match tok.kind {
            TokKind::Ident(name) => Ok((name, tok.loc)),
            _ => Err(unexpected(&tok, "identifier")),
        }
    }

    /// `ident (:: ident)*`
    fn parse_path(&mut self) -> Result<Path> {
        let (first, _) = self.ident()?;
        self.parse_path_from(first)
    }

    fn parse_path_from(&mut self, first: String) -> Result<Path> {
        let mut segs = vec![first];
        while self.eat(Key::ColonColon)? {
            segs.push(self.ident()?.0);
        }
        Ok(Path(segs))
    }

    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.last_end)
    }

    /// Runs `f` one nesting level deeper, failing past `max_depth`.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.opts.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.opts.max_depth,
                loc: self.last_loc,
            });
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    // ======= unit =======

    /// `import* (attribute* declaration)* EOF`
    pub fn parse_unit(mut self) -> Result<Unit> {
        let mut unit = Unit::default();

        while self.at(Key::Import)? {
            unit.imports.push(self.parse_import()?);
        }

        loop {
            let attrs = self.parse_attributes()?;
            let tok = self.next()?;
            if tok.is_eof() {
                if let Some(attr) = attrs.last() {
                    return Err(ParseError::Syntax {
                        message: format!(
                            "attribute `{}` is not followed by a declaration",
                            attr.name
                        ),
                        loc: tok.loc,
                    });
                }
                break;
            }
            let loc = tok.loc;
            match self.parse_decl(tok, attrs)? {
                Decl::Type(decl) => {
                    if unit.types.contains_key(&decl.name) {
                        return Err(ParseError::Duplicate {
                            what: "type",
                            name: decl.name,
                            loc,
                        });
                    }
                    unit.types.insert(decl.name.clone(), decl);
                }
                Decl::Func(func) => {
                    if unit.funcs.contains_key(&func.name) {
                        return Err(ParseError::Duplicate {
                            what: "function",
                            name: func.name,
                            loc,
                        });
                    }
                    unit.funcs.insert(func.name.clone(), func);
                }
            }
        }

        debug!(
            imports = unit.imports.len(),
            types = unit.types.len(),
            funcs = unit.funcs.len(),
            "parsed unit"
        );
        Ok(unit)
    }
}

fn unexpected(tok: &Tok, expected: impl Into<String>) -> ParseError {
    ParseError::Unexpected {
        expected: expected.into(),
        found: tok.kind.to_string(),
        loc: tok.loc,
    }
}
