use super::{unexpected, Parser};
use crate::error::{ParseError, Result};
use crate::token::Key;
use ctu_ast::ast::{Case, MatchArm, Stmt};

impl<I: Iterator<Item = u8>> Parser<I> {
    /// Statements up to and including `}`; the `{` is already consumed.
    pub(super) fn parse_block_rest(&mut self) -> Result<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !self.eat(Key::RBrace)? {
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    pub(super) fn parse_stmt(&mut self) -> Result<Stmt> {
        self.nested(|p| p.parse_stmt_inner())
    }

    fn parse_stmt_inner(&mut self) -> Result<Stmt> {
        let tok = self.next()?;
        match tok.key() {
            Some(Key::LBrace) => Ok(Stmt::Block(self.parse_block_rest()?)),
            Some(Key::If) => self.parse_if(),
            Some(Key::While) => {
                let cond = self.parse_paren_expr()?;
                let body = Box::new(self.parse_stmt()?);
                Ok(Stmt::While { cond, body })
            }
            Some(Key::Do) => {
                let body = Box::new(self.parse_stmt()?);
                self.expect(Key::While)?;
                let cond = self.parse_paren_expr()?;
                self.expect(Key::Semi)?;
                Ok(Stmt::DoWhile { body, cond })
            }
            Some(Key::For) => self.parse_for(),
            Some(Key::Switch) => self.parse_switch(),
            Some(Key::Match) => self.parse_match(),
            Some(Key::Break) => {
                self.expect(Key::Semi)?;
                Ok(Stmt::Break)
            }
            Some(Key::Continue) => {
                self.expect(Key::Semi)?;
                Ok(Stmt::Continue)
            }
            Some(Key::Return) => {
                if self.eat(Key::Semi)? {
                    return Ok(Stmt::Return(None));
                }
                let value = self.parse_expr()?;
                self.expect(Key::Semi)?;
                Ok(Stmt::Return(Some(value)))
            }
            _ => {
                self.unread(tok);
                let stmt = self.parse_simple_stmt()?;
                self.expect(Key::Semi)?;
                Ok(stmt)
            }
        }
    }

    /// A variable declaration or an expression, without the trailing `;`.
    fn parse_simple_stmt(&mut self) -> Result<Stmt> {
        let tok = self.next()?;
        let mutable = match tok.key() {
            Some(Key::Var) => true,
            Some(Key::Let) => false,
            _ => {
                self.unread(tok);
                return Ok(Stmt::Expr(self.parse_expr()?));
            }
        };

        let (name, _) = self.ident()?;
        let ty = if self.eat(Key::Colon)? {
            Some(self.parse_type()?)
        } else {
            None
        };
        let init = if self.eat(Key::Eq)? {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Stmt::Var {
            mutable,
            name,
            ty,
            init,
        })
    }

    /// `if ( expr ) stmt (else stmt)?` with `if` consumed.
    fn parse_if(&mut self) -> Result<Stmt> {
        let cond = self.parse_paren_expr()?;
        let then_ = Box::new(self.parse_stmt()?);
        let else_ = if self.eat(Key::Else)? {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        Ok(Stmt::If { cond, then_, else_ })
    }

    /// `for ( simple? ; expr? ; simple? ) stmt` with `for` consumed.
    fn parse_for(&mut self) -> Result<Stmt> {
        self.expect(Key::LParen)?;

        let init = if self.eat(Key::Semi)? {
            None
        } else {
            let init = self.parse_simple_stmt()?;
            self.expect(Key::Semi)?;
            Some(Box::new(init))
        };

        let cond = if self.eat(Key::Semi)? {
            None
        } else {
            let cond = self.parse_expr()?;
            self.expect(Key::Semi)?;
            Some(cond)
        };

        let step = if self.eat(Key::RParen)? {
            None
        } else {
            let step = self.parse_simple_stmt()?;
            self.expect(Key::RParen)?;
            Some(Box::new(step))
        };

        let body = Box::new(self.parse_stmt()?);
        Ok(Stmt::For {
            init,
            cond,
            step,
            body,
        })
    }

    /// `switch ( expr ) { (case expr : stmt*)* (default : stmt*)? }`
    fn parse_switch(&mut self) -> Result<Stmt> {
        let scrutinee = self.parse_paren_expr()?;
        self.expect(Key::LBrace)?;

        let mut cases = Vec::new();
        let mut default = None;
        loop {
            let tok = self.next()?;
            match tok.key() {
                Some(Key::RBrace) => break,
                Some(Key::Case) => {
                    if default.is_some() {
                        return Err(ParseError::Syntax {
                            message: "`case` after `default` in switch".into(),
                            loc: tok.loc,
                        });
                    }
                    let value = self.parse_expr()?;
                    self.expect(Key::Colon)?;
                    let body = self.parse_case_body()?;
                    cases.push(Case { value, body });
                }
                Some(Key::Default) => {
                    if default.is_some() {
                        return Err(ParseError::Duplicate {
                            what: "switch arm",
                            name: "default".into(),
                            loc: tok.loc,
                        });
                    }
                    self.expect(Key::Colon)?;
                    default = Some(self.parse_case_body()?);
                }
                _ => return Err(unexpected(&tok, "`case`, `default` or `}`")),
            }
        }

        Ok(Stmt::Switch {
            scrutinee,
            cases,
            default,
        })
    }

    /// Statements until the next `case`, `default` or `}`.
    fn parse_case_body(&mut self) -> Result<Vec<Stmt>> {
        let mut body = Vec::new();
        while !(self.at(Key::Case)? || self.at(Key::Default)? || self.at(Key::RBrace)?) {
            body.push(self.parse_stmt()?);
        }
        Ok(body)
    }

    /// `match ( expr ) { ((default | expr) : stmt)* }`
    fn parse_match(&mut self) -> Result<Stmt> {
        let scrutinee = self.parse_paren_expr()?;
        self.expect(Key::LBrace)?;

        let mut arms = Vec::new();
        loop {
            let tok = self.next()?;
            let pattern = match tok.key() {
                Some(Key::RBrace) => break,
                Some(Key::Default) => None,
                _ => {
                    self.unread(tok);
                    Some(self.parse_expr()?)
                }
            };
            self.expect(Key::Colon)?;
            let body = self.parse_stmt()?;
            arms.push(MatchArm { pattern, body });
        }

        Ok(Stmt::Match { scrutinee, arms })
    }
}
