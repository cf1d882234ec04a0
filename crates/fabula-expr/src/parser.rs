//! Recursive-descent parser producing the expression tree.
//!
//! Precedence, loosest first: `or`, `and`, `not`, comparison (non-chaining),
//! `+ -`, `* / %`, unary `-`/`+`, `^` (right-associative).

use fabula_core::value::Value;

use crate::EvalError;
use crate::lexer::Token;

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

/// Expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Var(String),
    Neg(Box<Expr>),
    Not(Box<Expr>),
    Arith(ArithOp, Box<Expr>, Box<Expr>),
    Compare(CmpOp, Box<Expr>, Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

/// Deepest nesting of parentheses, `not`, signs and exponents.
pub const MAX_DEPTH: usize = 64;

/// Longest token stream accepted. Bounds the depth of left-associative
/// operator chains as well.
pub const MAX_TOKENS: usize = 1024;

/// Parses a full token stream into a single expression.
///
/// # Errors
///
/// Returns `EvalError::Parse` on unexpected or trailing tokens, or when the
/// input exceeds [`MAX_TOKENS`] or nests deeper than [`MAX_DEPTH`].
pub fn parse(tokens: &[Token<'_>]) -> Result<Expr, EvalError> {
    if tokens.len() > MAX_TOKENS {
        return Err(EvalError::Parse("expression too long".into()));
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.or()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(EvalError::Parse(format!("unexpected {token:?}"))),
    }
}

struct Parser<'t, 'src> {
    tokens: &'t [Token<'src>],
    pos: usize,
    depth: usize,
}

impl<'t, 'src> Parser<'t, 'src> {
    fn peek(&self) -> Option<&'t Token<'src>> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'t Token<'src>> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token<'_>) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<Expr, EvalError>,
    ) -> Result<Expr, EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::Parse("expression nested too deeply".into()));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn or(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.and()?;
        while self.eat(&Token::Or) {
            let rhs = self.and()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn and(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.not()?;
        while self.eat(&Token::And) {
            let rhs = self.not()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn not(&mut self) -> Result<Expr, EvalError> {
        if self.eat(&Token::Not) {
            return Ok(Expr::Not(Box::new(self.nested(Self::not)?)));
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Expr, EvalError> {
        let lhs = self.additive()?;
        let Some(op) = self.peek().and_then(cmp_op) else {
            return Ok(lhs);
        };
        self.pos += 1;
        let rhs = self.additive()?;
        if self.peek().and_then(cmp_op).is_some() {
            return Err(EvalError::Parse("chained comparisons are not supported".into()));
        }
        Ok(Expr::Compare(op, Box::new(lhs), Box::new(rhs)))
    }

    fn additive(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => ArithOp::Add,
                Some(Token::Minus) => ArithOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Arith(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn term(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => ArithOp::Mul,
                Some(Token::Slash) => ArithOp::Div,
                Some(Token::Percent) => ArithOp::Rem,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::Arith(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn unary(&mut self) -> Result<Expr, EvalError> {
        if self.eat(&Token::Minus) {
            return Ok(Expr::Neg(Box::new(self.nested(Self::unary)?)));
        }
        if self.eat(&Token::Plus) {
            return self.nested(Self::unary);
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, EvalError> {
        let base = self.atom()?;
        if self.eat(&Token::Caret) {
            // `-2^2` is `-(2^2)`, while `2^-1` takes a signed exponent.
            let exponent = self.nested(Self::unary)?;
            return Ok(Expr::Arith(ArithOp::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, EvalError> {
        match self.advance() {
            Some(Token::Int(i)) => Ok(Expr::Literal(Value::Int(*i))),
            Some(Token::Float(f)) => Ok(Expr::Literal(Value::Float(*f))),
            Some(Token::Str(s)) => Ok(Expr::Literal(Value::Text(s.clone()))),
            Some(Token::True) => Ok(Expr::Literal(Value::Bool(true))),
            Some(Token::False) => Ok(Expr::Literal(Value::Bool(false))),
            Some(Token::Ident(name)) => Ok(Expr::Var((*name).to_owned())),
            Some(Token::LParen) => {
                let inner = self.nested(Self::or)?;
                if self.eat(&Token::RParen) {
                    Ok(inner)
                } else {
                    Err(EvalError::Parse("missing ')'".into()))
                }
            }
            Some(token) => Err(EvalError::Parse(format!("unexpected {token:?}"))),
            None => Err(EvalError::Parse("unexpected end of expression".into())),
        }
    }
}

fn cmp_op(token: &Token<'_>) -> Option<CmpOp> {
    match token {
        Token::Gt => Some(CmpOp::Gt),
        Token::Ge => Some(CmpOp::Ge),
        Token::Lt => Some(CmpOp::Lt),
        Token::Le => Some(CmpOp::Le),
        Token::EqEq => Some(CmpOp::Eq),
        Token::NotEq => Some(CmpOp::Ne),
        _ => None,
    }
}
