use crate::value::Value;
use crate::vm::error::ExecutionError;
use crate::vm::lexer::{Spanned, Token, tokenize};

/// Parsed script program.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    /// `arguments[n]`
    Argument(usize),
    /// `$NAME(args...)`, name stored uppercase
    Call { name: String, args: Vec<Expr> },
    Unary { op: UnaryOp, expr: Box<Expr> },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Integer division, SQL `DIV`
    IntDiv,
    Mod,
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    NullSafeEq,
}

/// Parse a whole script into a single expression.
pub fn parse(script: &str) -> Result<Expr, ExecutionError> {
    let tokens = tokenize(script)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: script.len(),
    };

    let expr = parser.parse_comparison()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(ExecutionError::syntax(
            parser.position(),
            format!("unexpected trailing token {token:?}"),
        )),
    }
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t)| t)
    }

    fn position(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |(p, _)| *p)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(_, t)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ExecutionError> {
        let position = self.position();
        match self.next() {
            Some(ref token) if token == expected => Ok(()),
            Some(token) => Err(ExecutionError::syntax(
                position,
                format!("expected {expected:?}, found {token:?}"),
            )),
            None => Err(ExecutionError::syntax(
                position,
                format!("expected {expected:?}, found end of script"),
            )),
        }
    }

    fn parse_comparison(&mut self) -> Result<Expr, ExecutionError> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.peek() {
                Some(Token::EqEq) => BinaryOp::Eq,
                Some(Token::NotEq) => BinaryOp::Ne,
                Some(Token::Lt) => BinaryOp::Lt,
                Some(Token::Lte) => BinaryOp::Lte,
                Some(Token::Gt) => BinaryOp::Gt,
                Some(Token::Gte) => BinaryOp::Gte,
                Some(Token::NullSafeEq) => BinaryOp::NullSafeEq,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.parse_additive()?;
            left = binary(op, left, right);
        }
    }

    fn parse_additive(&mut self) -> Result<Expr, ExecutionError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ExecutionError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::Percent) => BinaryOp::Mod,
                Some(Token::Ident(word)) if word.eq_ignore_ascii_case("div") => BinaryOp::IntDiv,
                Some(Token::Ident(word)) if word.eq_ignore_ascii_case("mod") => BinaryOp::Mod,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ExecutionError> {
        let op = match self.peek() {
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Bang) => UnaryOp::Not,
            _ => return self.parse_primary(),
        };
        self.pos += 1;

        let expr = self.parse_unary()?;
        Ok(Expr::Unary {
            op,
            expr: Box::new(expr),
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, ExecutionError> {
        let position = self.position();
        let Some(token) = self.next() else {
            return Err(ExecutionError::syntax(position, "unexpected end of script"));
        };

        match token {
            Token::Int(i) => Ok(Expr::Literal(Value::Int(i))),
            Token::Decimal(d) => Ok(Expr::Literal(Value::Decimal(d))),
            Token::Str(s) => Ok(Expr::Literal(Value::String(s))),
            Token::LParen => {
                let expr = self.parse_comparison()?;
                self.expect(&Token::RParen)?;
                Ok(expr)
            }
            Token::Func(name) => self.parse_call(name),
            Token::Ident(word) => match word.to_ascii_lowercase().as_str() {
                "null" => Ok(Expr::Literal(Value::Null)),
                "true" => Ok(Expr::Literal(Value::Bool(true))),
                "false" => Ok(Expr::Literal(Value::Bool(false))),
                "arguments" => self.parse_argument(),
                _ => Err(ExecutionError::syntax(
                    position,
                    format!("unknown identifier {word}"),
                )),
            },
            other => Err(ExecutionError::syntax(
                position,
                format!("unexpected token {other:?}"),
            )),
        }
    }

    fn parse_argument(&mut self) -> Result<Expr, ExecutionError> {
        self.expect(&Token::LBracket)?;

        let position = self.position();
        let index = match self.next() {
            Some(Token::Int(i)) => usize::try_from(i)
                .map_err(|_| ExecutionError::syntax(position, "negative argument index"))?,
            _ => {
                return Err(ExecutionError::syntax(
                    position,
                    "expected integer argument index",
                ));
            }
        };

        self.expect(&Token::RBracket)?;
        Ok(Expr::Argument(index))
    }

    fn parse_call(&mut self, name: String) -> Result<Expr, ExecutionError> {
        self.expect(&Token::LParen)?;

        let mut args = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            self.pos += 1;
        } else {
            loop {
                args.push(self.parse_comparison()?);

                let position = self.position();
                match self.next() {
                    Some(Token::Comma) => continue,
                    Some(Token::RParen) => break,
                    _ => {
                        return Err(ExecutionError::syntax(
                            position,
                            format!("expected ',' or ')' in call to {name}"),
                        ));
                    }
                }
            }
        }

        Ok(Expr::Call {
            name: name.to_ascii_uppercase(),
            args,
        })
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}
