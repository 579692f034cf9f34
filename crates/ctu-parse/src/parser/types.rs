use super::{unexpected, Parser};
use crate::error::{ParseError, Result};
use crate::token::{Key, TokKind};
use ctu_ast::ast::{Expr, Type};

impl<I: Iterator<Item = u8>> Parser<I> {
    /// A base type followed by any number of `*` and `[size]` suffixes,
    /// applied left to right: `T*[3]` is an array of three `T*`.
    pub(super) fn parse_type(&mut self) -> Result<Type> {
        self.nested(|p| {
            let mut ty = p.parse_base_type()?;
            loop {
                if p.eat(Key::Star)? {
                    ty = Type::Pointer(Box::new(ty));
                } else if p.eat(Key::LSquare)? {
                    let size = p.parse_array_size()?;
                    p.expect(Key::RSquare)?;
                    ty = Type::Array {
                        elem: Box::new(ty),
                        size: Box::new(size),
                    };
                } else {
                    return Ok(ty);
                }
            }
        })
    }

    fn parse_base_type(&mut self) -> Result<Type> {
        let tok = self.next()?;
        match tok.kind {
            TokKind::Key(Key::Builtin(b)) => Ok(Type::Builtin(b)),
            TokKind::Ident(first) => Ok(Type::Named(self.parse_path_from(first)?)),
            TokKind::Key(Key::Mut) => {
                self.expect(Key::LParen)?;
                let inner = self.parse_type()?;
                self.expect(Key::RParen)?;
                Ok(Type::Mutable(Box::new(inner)))
            }
            TokKind::Key(Key::LParen) => {
                let mut elems = vec![self.parse_type()?];
                while self.eat(Key::Comma)? {
                    elems.push(self.parse_type()?);
                }
                self.expect(Key::RParen)?;
                Ok(Type::Tuple(elems))
            }
            TokKind::Key(Key::Struct) => {
                self.expect(Key::LParen)?;
                Ok(Type::Struct(self.parse_fields()?))
            }
            _ => Err(unexpected(&tok, "type")),
        }
    }

    /// Array sizes must look constant: an integer literal or a name.
    fn parse_array_size(&mut self) -> Result<Expr> {
        let loc = self.peek()?.loc;
        let size = self.parse_expr()?;
        match size {
            Expr::Int { .. } | Expr::Name(_) => Ok(size),
            _ => Err(ParseError::Syntax {
                message: "array size must be an integer literal or a name".into(),
                loc,
            }),
        }
    }
}
