use super::{unexpected, Parser};
use crate::error::Result;
use crate::token::{Key, TokKind};
use ctu_ast::ast::{BinOp, Expr, UnOp};

// Precedence (low -> high):
//   assignment  = += -= *= /= %=   (right assoc, handled in parse_assign)
//   1:  ||
//   3:  &&
//   5:  == !=
//   7:  < <= > >=
//   10: + -
//   20: * / %
// then prefix ! - * & cast, then postfix call/index/field.
fn infix(key: Key) -> Option<(BinOp, u8, u8)> {
    let entry = match key {
        Key::OrOr => (BinOp::Or, 1, 2),
        Key::AndAnd => (BinOp::And, 3, 4),
        Key::EqEq => (BinOp::Eq, 5, 6),
        Key::BangEq => (BinOp::Ne, 5, 6),
        Key::Lt => (BinOp::Lt, 7, 8),
        Key::Le => (BinOp::Le, 7, 8),
        Key::Gt => (BinOp::Gt, 7, 8),
        Key::Ge => (BinOp::Ge, 7, 8),
        Key::Plus => (BinOp::Add, 10, 11),
        Key::Minus => (BinOp::Sub, 10, 11),
        Key::Star => (BinOp::Mul, 20, 21),
        Key::Slash => (BinOp::Div, 20, 21),
        Key::Percent => (BinOp::Mod, 20, 21),
        _ => return None,
    };
    Some(entry)
}

fn assign_op(key: Key) -> Option<BinOp> {
    match key {
        Key::Eq => Some(BinOp::Assign),
        Key::PlusEq => Some(BinOp::AddAssign),
        Key::MinusEq => Some(BinOp::SubAssign),
        Key::StarEq => Some(BinOp::MulAssign),
        Key::SlashEq => Some(BinOp::DivAssign),
        Key::PercentEq => Some(BinOp::ModAssign),
        _ => None,
    }
}

impl<I: Iterator<Item = u8>> Parser<I> {
    pub(super) fn parse_expr(&mut self) -> Result<Expr> {
        self.nested(|p| p.parse_assign())
    }

    /// `( expr )`
    pub(super) fn parse_paren_expr(&mut self) -> Result<Expr> {
        self.expect(Key::LParen)?;
        let expr = self.parse_expr()?;
        self.expect(Key::RParen)?;
        Ok(expr)
    }

    fn parse_assign(&mut self) -> Result<Expr> {
        let lhs = self.parse_expr_bp(0)?;
        let tok = self.next()?;
        let Some(op) = tok.key().and_then(assign_op) else {
            self.unread(tok);
            return Ok(lhs);
        };
        let rhs = self.parse_expr()?;
        Ok(Expr::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        })
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr> {
        let mut lhs = self.parse_unary()?;

        loop {
            let tok = self.next()?;
            let Some((op, lbp, rbp)) = tok.key().and_then(infix) else {
                self.unread(tok);
                break;
            };
            if lbp < min_bp {
                self.unread(tok);
                break;
            }
            let rhs = self.parse_expr_bp(rbp)?;
            lhs = Expr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    /// Prefix operators are right-recursive and bind looser than postfix:
    /// `-a.b` negates `a.b`, `*p[0]` dereferences `p[0]`.
    fn parse_unary(&mut self) -> Result<Expr> {
        self.nested(|p| {
            let tok = p.next()?;
            let op = match tok.key() {
                Some(Key::Bang) => UnOp::Not,
                Some(Key::Minus) => UnOp::Neg,
                Some(Key::Star) => UnOp::Deref,
                Some(Key::Amp) => UnOp::AddrOf,
                Some(Key::Cast) => {
                    p.expect(Key::LParen)?;
                    let ty = p.parse_type()?;
                    p.expect(Key::RParen)?;
                    let expr = p.parse_unary()?;
                    return Ok(Expr::Cast {
                        expr: Box::new(expr),
                        ty,
                    });
                }
                _ => {
                    p.unread(tok);
                    return p.parse_postfix();
                }
            };
            let expr = p.parse_unary()?;
            Ok(Expr::Unary {
                op,
                expr: Box::new(expr),
            })
        })
    }

    fn parse_postfix(&mut self) -> Result<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            let tok = self.next()?;
            expr = match tok.key() {
                Some(Key::LParen) => Expr::Call {
                    callee: Box::new(expr),
                    args: self.parse_args()?,
                },
                Some(Key::LSquare) => {
                    let index = self.parse_expr()?;
                    self.expect(Key::RSquare)?;
                    Expr::Index {
                        base: Box::new(expr),
                        index: Box::new(index),
                    }
                }
                Some(Key::Dot) => Expr::Field {
                    base: Box::new(expr),
                    field: self.ident()?.0,
                },
                _ => {
                    self.unread(tok);
                    return Ok(expr);
                }
            };
        }
    }

    /// `(expr (, expr)*)? )` with the opening paren consumed.
    pub(super) fn parse_args(&mut self) -> Result<Vec<Expr>> {
        let mut args = Vec::new();
        if self.eat(Key::RParen)? {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            if !self.eat(Key::Comma)? {
                break;
            }
        }
        self.expect(Key::RParen)?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let tok = self.next()?;
        match tok.kind {
            TokKind::Int { value, base } => Ok(Expr::Int { value, base }),
            TokKind::Float(value) => Ok(Expr::Float(value)),
            TokKind::Str(s) => Ok(Expr::Str(s)),
            TokKind::Key(Key::True) => Ok(Expr::Bool(true)),
            TokKind::Key(Key::False) => Ok(Expr::Bool(false)),
            TokKind::Ident(first) => Ok(Expr::Name(self.parse_path_from(first)?)),
            TokKind::Key(Key::LParen) => {
                let inner = self.parse_expr()?;
                self.expect(Key::RParen)?;
                Ok(inner)
            }
            _ => Err(unexpected(&tok, "expression")),
        }
    }
}
