use super::{unexpected, Parser};
use crate::error::{ParseError, Result};
use crate::token::{Key, Tok, TokKind};
use ctu_ast::ast::{
    Attribute, Field, Func, FuncBody, Import, ImportItems, Param, Type, TypeDecl, TypeDeclKind,
};
use tracing::trace;

/// A top-level declaration before it is filed into the unit.
pub(super) enum Decl {
    Type(TypeDecl),
    Func(Func),
}

impl<I: Iterator<Item = u8>> Parser<I> {
    /// `import path ( * | ident (, ident)* ) ;`
    pub(super) fn parse_import(&mut self) -> Result<Import> {
        let start = self.expect(Key::Import)?.span.start;
        let path = self.parse_path()?;
        self.expect(Key::LParen)?;

        let tok = self.next()?;
        let items = match tok.kind {
            TokKind::Key(Key::Star) => ImportItems::All,
            TokKind::Ident(first) => {
                let mut names = vec![first];
                while self.eat(Key::Comma)? {
                    names.push(self.ident()?.0);
                }
                ImportItems::Names(names)
            }
            _ => return Err(unexpected(&tok, "`*` or identifier")),
        };

        self.expect(Key::RParen)?;
        self.expect(Key::Semi)?;
        trace!(path = %path, "parsed import");
        Ok(Import {
            path,
            items,
            span: self.span_from(start),
        })
    }

    /// Zero or more `@attr` / `@[attr, ...]` groups, in source order.
    pub(super) fn parse_attributes(&mut self) -> Result<Vec<Attribute>> {
        let mut attrs = Vec::new();
        while self.eat(Key::At)? {
            if self.eat(Key::LSquare)? {
                loop {
                    attrs.push(self.parse_attribute()?);
                    if !self.eat(Key::Comma)? {
                        break;
                    }
                }
                self.expect(Key::RSquare)?;
            } else {
                attrs.push(self.parse_attribute()?);
            }
        }
        Ok(attrs)
    }

    /// `path ( ( expr (, expr)* ) )?`
    fn parse_attribute(&mut self) -> Result<Attribute> {
        let start = self.peek()?.span.start;
        let name = self.parse_path()?;
        let args = if self.eat(Key::LParen)? {
            self.parse_args()?
        } else {
            Vec::new()
        };
        Ok(Attribute {
            name,
            args,
            span: self.span_from(start),
        })
    }

    /// Parses the declaration introduced by `tok`, attaching `attrs` to it.
    pub(super) fn parse_decl(&mut self, tok: Tok, attrs: Vec<Attribute>) -> Result<Decl> {
        let start = tok.span.start;
        match tok.key() {
            Some(Key::Type) => Ok(Decl::Type(self.parse_alias(start, attrs)?)),
            Some(Key::Struct) => Ok(Decl::Type(self.parse_struct_decl(start, attrs)?)),
            Some(Key::Def) => Ok(Decl::Func(self.parse_func(start, attrs)?)),
            Some(Key::Import) => Err(ParseError::Syntax {
                message: "imports must precede all declarations".into(),
                loc: tok.loc,
            }),
            _ => Err(unexpected(&tok, "`type`, `struct`, `def` or `@`")),
        }
    }

    /// `type ident = type ;` with `type` consumed.
    fn parse_alias(&mut self, start: u32, attrs: Vec<Attribute>) -> Result<TypeDecl> {
        let (name, _) = self.ident()?;
        self.expect(Key::Eq)?;
        let ty = self.parse_type()?;
        self.expect(Key::Semi)?;
        trace!(%name, "parsed type alias");
        Ok(TypeDecl {
            name,
            kind: TypeDeclKind::Alias,
            ty,
            attrs,
            span: self.span_from(start),
        })
    }

    /// `struct ident ( fields )` with `struct` consumed.
    fn parse_struct_decl(&mut self, start: u32, attrs: Vec<Attribute>) -> Result<TypeDecl> {
        let (name, _) = self.ident()?;
        self.expect(Key::LParen)?;
        let fields = self.parse_fields()?;
        trace!(%name, fields = fields.len(), "parsed struct");
        Ok(TypeDecl {
            name,
            kind: TypeDeclKind::Struct,
            ty: Type::Struct(fields),
            attrs,
            span: self.span_from(start),
        })
    }

    /// `(type ident ;)* )` with the opening paren consumed.
    pub(super) fn parse_fields(&mut self) -> Result<Vec<Field>> {
        let mut fields: Vec<Field> = Vec::new();
        while !self.eat(Key::RParen)? {
            let ty = self.parse_type()?;
            let (name, loc) = self.ident()?;
            self.expect(Key::Semi)?;
            if fields.iter().any(|f| f.name == name) {
                return Err(ParseError::Duplicate {
                    what: "field",
                    name,
                    loc,
                });
            }
            fields.push(Field { ty, name });
        }
        Ok(fields)
    }

    /// `def ident ( params ) (: type)? (= expr ; | { stmt* })` with `def` consumed.
    fn parse_func(&mut self, start: u32, attrs: Vec<Attribute>) -> Result<Func> {
        let (name, _) = self.ident()?;

        self.expect(Key::LParen)?;
        let params = self.parse_params()?;

        let ret = if self.eat(Key::Colon)? {
            Some(self.parse_type()?)
        } else {
            None
        };

        let tok = self.next()?;
        let body = match tok.key() {
            Some(Key::Eq) => {
                let expr = self.parse_expr()?;
                self.expect(Key::Semi)?;
                FuncBody::Expr(expr)
            }
            Some(Key::LBrace) => FuncBody::Block(self.parse_block_rest()?),
            _ => return Err(unexpected(&tok, "`=` or `{`")),
        };

        trace!(%name, params = params.len(), "parsed function");
        Ok(Func {
            name,
            params,
            ret,
            body,
            attrs,
            span: self.span_from(start),
        })
    }

    /// `(type ident (, type ident)*)? )` with the opening paren consumed.
    fn parse_params(&mut self) -> Result<Vec<Param>> {
        let mut params: Vec<Param> = Vec::new();
        if self.eat(Key::RParen)? {
            return Ok(params);
        }
        loop {
            let ty = self.parse_type()?;
            let (name, loc) = self.ident()?;
            if params.iter().any(|p| p.name == name) {
                return Err(ParseError::Duplicate {
                    what: "parameter",
                    name,
                    loc,
                });
            }
            params.push(Param { ty, name });
            if !self.eat(Key::Comma)? {
                break;
            }
        }
        self.expect(Key::RParen)?;
        Ok(params)
    }
}
