//! Recursive-descent parser for the script subset
//!
//! Consumes the token stream produced by the lexer. Suites are delimited by
//! `Indent`/`Dedent` markers; a suite may also be a single simple statement
//! on the same line as the colon.

use turtlekit_core::ScriptError;

use crate::ast::{BinOp, CmpOp, Expr, Stmt};
use crate::lexer::{Tok, Token};

/// Parse a token stream into a program
pub fn parse(tokens: &[Token]) -> Result<Vec<Stmt>, ScriptError> {
    let mut parser = Parser { tokens, pos: 0 };
    let program = parser.parse_program()?;
    Ok(program)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &Tok {
        self.tokens
            .get(self.pos)
            .map(|t| &t.tok)
            .unwrap_or(&Tok::Eof)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    fn bump(&mut self) -> &Tok {
        let tok = self
            .tokens
            .get(self.pos)
            .map(|t| &t.tok)
            .unwrap_or(&Tok::Eof);
        self.pos += 1;
        tok
    }

    fn eat(&mut self, expected: &Tok) -> bool {
        if self.peek() == expected {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Tok, what: &str) -> Result<(), ScriptError> {
        if self.eat(&expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected {}", what)))
        }
    }

    fn error(&self, reason: String) -> ScriptError {
        ScriptError::Syntax {
            line: self.line(),
            reason,
        }
    }

    fn parse_program(&mut self) -> Result<Vec<Stmt>, ScriptError> {
        let mut stmts = Vec::new();
        loop {
            match self.peek() {
                Tok::Eof => break,
                Tok::Newline => {
                    self.pos += 1;
                }
                _ => stmts.push(self.parse_statement()?),
            }
        }
        Ok(stmts)
    }

    fn parse_statement(&mut self) -> Result<Stmt, ScriptError> {
        match self.peek() {
            Tok::For => self.parse_for(),
            Tok::While => self.parse_while(),
            Tok::If => self.parse_if(),
            _ => self.parse_simple_statement(),
        }
    }

    /// Assignment, augmented assignment, `pass`, or a bare expression,
    /// terminated by a newline.
    fn parse_simple_statement(&mut self) -> Result<Stmt, ScriptError> {
        if self.eat(&Tok::Pass) {
            self.expect(Tok::Newline, "end of line")?;
            return Ok(Stmt::Pass);
        }

        // Lookahead for `name =` / `name op=`.
        if let Tok::Name(name) = self.peek().clone() {
            let line = self.line();
            let op = match self.tokens.get(self.pos + 1).map(|t| &t.tok) {
                Some(Tok::Assign) => Some(None),
                Some(Tok::PlusAssign) => Some(Some(BinOp::Add)),
                Some(Tok::MinusAssign) => Some(Some(BinOp::Sub)),
                Some(Tok::StarAssign) => Some(Some(BinOp::Mul)),
                Some(Tok::SlashAssign) => Some(Some(BinOp::Div)),
                _ => None,
            };
            if let Some(op) = op {
                self.pos += 2;
                let value = self.parse_expr()?;
                self.expect(Tok::Newline, "end of line")?;
                return Ok(match op {
                    None => Stmt::Assign { name, value },
                    Some(op) => Stmt::AugAssign {
                        name,
                        op,
                        value,
                        line,
                    },
                });
            }
        }

        let expr = self.parse_expr()?;
        self.expect(Tok::Newline, "end of line")?;
        Ok(Stmt::Expr(expr))
    }

    fn parse_for(&mut self) -> Result<Stmt, ScriptError> {
        let line = self.line();
        self.expect(Tok::For, "'for'")?;
        let var = match self.bump().clone() {
            Tok::Name(name) => name,
            _ => return Err(self.error("expected loop variable after 'for'".to_string())),
        };
        self.expect(Tok::In, "'in'")?;
        let iter = self.parse_expr()?;
        self.expect(Tok::Colon, "':'")?;
        let body = self.parse_suite()?;
        Ok(Stmt::For {
            var,
            iter,
            body,
            line,
        })
    }

    fn parse_while(&mut self) -> Result<Stmt, ScriptError> {
        let line = self.line();
        self.expect(Tok::While, "'while'")?;
        let cond = self.parse_expr()?;
        self.expect(Tok::Colon, "':'")?;
        let body = self.parse_suite()?;
        Ok(Stmt::While { cond, body, line })
    }

    fn parse_if(&mut self) -> Result<Stmt, ScriptError> {
        self.expect(Tok::If, "'if'")?;
        let mut branches = Vec::new();
        let cond = self.parse_expr()?;
        self.expect(Tok::Colon, "':'")?;
        branches.push((cond, self.parse_suite()?));

        let mut else_body = Vec::new();
        loop {
            if self.eat(&Tok::Elif) {
                let cond = self.parse_expr()?;
                self.expect(Tok::Colon, "':'")?;
                branches.push((cond, self.parse_suite()?));
            } else if self.eat(&Tok::Else) {
                self.expect(Tok::Colon, "':'")?;
                else_body = self.parse_suite()?;
                break;
            } else {
                break;
            }
        }
        Ok(Stmt::If {
            branches,
            else_body,
        })
    }

    /// An indented block, or a single simple statement on the same line
    fn parse_suite(&mut self) -> Result<Vec<Stmt>, ScriptError> {
        if self.eat(&Tok::Newline) {
            self.expect(Tok::Indent, "an indented block")?;
            let mut body = Vec::new();
            loop {
                match self.peek() {
                    Tok::Dedent => {
                        self.pos += 1;
                        break;
                    }
                    Tok::Newline => {
                        self.pos += 1;
                    }
                    Tok::Eof => return Err(self.error("unexpected end of input".to_string())),
                    _ => body.push(self.parse_statement()?),
                }
            }
            if body.is_empty() {
                return Err(self.error("empty block".to_string()));
            }
            Ok(body)
        } else {
            Ok(vec![self.parse_simple_statement()?])
        }
    }

    // === Expressions ===

    fn parse_expr(&mut self) -> Result<Expr, ScriptError> {
        let left = self.parse_arith()?;
        let op = match self.peek() {
            Tok::EqEq => Some(CmpOp::Eq),
            Tok::NotEq => Some(CmpOp::Ne),
            Tok::Lt => Some(CmpOp::Lt),
            Tok::LtEq => Some(CmpOp::Le),
            Tok::Gt => Some(CmpOp::Gt),
            Tok::GtEq => Some(CmpOp::Ge),
            _ => None,
        };
        match op {
            Some(op) => {
                self.pos += 1;
                let right = self.parse_arith()?;
                Ok(Expr::Compare {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                })
            }
            None => Ok(left),
        }
    }

    fn parse_arith(&mut self) -> Result<Expr, ScriptError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Tok::Plus => BinOp::Add,
                Tok::Minus => BinOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_term()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr, ScriptError> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.peek() {
                Tok::Star => BinOp::Mul,
                Tok::Slash => BinOp::Div,
                Tok::FloorDiv => BinOp::FloorDiv,
                Tok::Percent => BinOp::Mod,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_factor()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, ScriptError> {
        if self.eat(&Tok::Minus) {
            return Ok(Expr::Neg(Box::new(self.parse_factor()?)));
        }
        if self.eat(&Tok::Plus) {
            return self.parse_factor();
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr, ScriptError> {
        let line = self.line();
        match self.bump().clone() {
            Tok::Number(value) => Ok(Expr::Number(value)),
            Tok::Str(value) => Ok(Expr::Str(value)),
            Tok::True => Ok(Expr::Bool(true)),
            Tok::False => Ok(Expr::Bool(false)),
            Tok::LParen => {
                let first = self.parse_expr()?;
                if self.eat(&Tok::Comma) {
                    let second = self.parse_expr()?;
                    self.expect(Tok::RParen, "')'")?;
                    Ok(Expr::Pair(Box::new(first), Box::new(second)))
                } else {
                    self.expect(Tok::RParen, "')'")?;
                    Ok(first)
                }
            }
            Tok::Name(name) => {
                if self.eat(&Tok::Dot) {
                    let method = match self.bump().clone() {
                        Tok::Name(method) => method,
                        _ => return Err(self.error("expected attribute name after '.'".to_string())),
                    };
                    self.expect(Tok::LParen, "'(' after method name")?;
                    let args = self.parse_args()?;
                    Ok(Expr::MethodCall {
                        object: name,
                        method,
                        args,
                        line,
                    })
                } else if self.eat(&Tok::LParen) {
                    let args = self.parse_args()?;
                    Ok(Expr::Call { func: name, args, line })
                } else {
                    Ok(Expr::Name { name, line })
                }
            }
            other => Err(ScriptError::Syntax {
                line,
                reason: format!("unexpected token: {:?}", other),
            }),
        }
    }

    /// Comma-separated arguments up to and including the closing paren
    fn parse_args(&mut self) -> Result<Vec<Expr>, ScriptError> {
        let mut args = Vec::new();
        if self.eat(&Tok::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            if self.eat(&Tok::Comma) {
                continue;
            }
            self.expect(Tok::RParen, "')'")?;
            break;
        }
        Ok(args)
    }
}
