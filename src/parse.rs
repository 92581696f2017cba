use std::fmt::Display;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use tracing::trace;

use crate::{
    Lexer,
    error::Fault,
    lex::{Token, TokenKind},
};

#[derive(Error, Debug, Diagnostic)]
#[error("Unexpected token: expected {expected}, found {found}")]
#[diagnostic(code(parse::unexpected_token))]
pub struct UnexpectedToken {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    bad_token: SourceSpan,

    #[help]
    advice: String,

    pub expected: &'static str,
    pub found: &'static str,
}

impl UnexpectedToken {
    pub fn span(&self) -> SourceSpan {
        self.bad_token
    }
}

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid syntax: expected an operand, found {found}")]
#[diagnostic(
    code(parse::invalid_syntax),
    help("an operand starts with a number, a sign or `(`")
)]
pub struct InvalidSyntax {
    #[source_code]
    src: NamedSource<String>,

    #[label("operand expected here")]
    bad_token: SourceSpan,

    pub found: &'static str,
}

/// Parsed form of an expression. Each node owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl Expr {
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOp::Plus => write!(f, "+"),
            UnaryOp::Minus => write!(f, "-"),
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOp::Plus => write!(f, "+"),
            BinaryOp::Minus => write!(f, "-"),
            BinaryOp::Multiply => write!(f, "*"),
            BinaryOp::Divide => write!(f, "/"),
        }
    }
}

/// Prefix notation, e.g. `(+ 2 (* 3 4))`.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::Unary { op, operand } => write!(f, "({op} {operand})"),
            Expr::Binary { op, left, right } => write!(f, "({op} {left} {right})"),
        }
    }
}

// expr   := term ( (PLUS | MINUS) term )*
// term   := factor ( (MULTIPLY | DIVIDE) factor )*
// factor := (PLUS | MINUS) factor | NUMBER | LPAREN expr RPAREN
pub struct Parser<'de> {
    lexer: Lexer<'de>,
    current: Token<'de>,
}

impl<'de> Parser<'de> {
    /// Fails if the very first token cannot be lexed.
    pub fn new(filename: Option<&'de str>, whole: &'de str) -> Result<Self, Fault> {
        let mut lexer = Lexer::new(filename, whole);
        let current = lexer.next_token()?;
        Ok(Parser { lexer, current })
    }

    /// Parses the whole input as one expression; trailing tokens are rejected.
    pub fn parse(mut self) -> Result<Expr, Fault> {
        let expr = self.expr()?;
        if self.current.kind != TokenKind::EndOfInput {
            return Err(self.unexpected(TokenKind::EndOfInput).into());
        }
        Ok(expr)
    }

    fn expr(&mut self) -> Result<Expr, Fault> {
        let mut node = self.term()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Plus,
                TokenKind::Minus => BinaryOp::Minus,
                _ => break,
            };
            self.advance()?;
            node = Expr::binary(op, node, self.term()?);
        }

        Ok(node)
    }

    fn term(&mut self) -> Result<Expr, Fault> {
        let mut node = self.factor()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Multiply => BinaryOp::Multiply,
                TokenKind::Divide => BinaryOp::Divide,
                _ => break,
            };
            self.advance()?;
            node = Expr::binary(op, node, self.factor()?);
        }

        Ok(node)
    }

    fn factor(&mut self) -> Result<Expr, Fault> {
        match self.current.kind {
            TokenKind::Plus => {
                self.eat(TokenKind::Plus)?;
                Ok(Expr::unary(UnaryOp::Plus, self.factor()?))
            }
            TokenKind::Minus => {
                self.eat(TokenKind::Minus)?;
                Ok(Expr::unary(UnaryOp::Minus, self.factor()?))
            }
            TokenKind::Number(n) => {
                self.advance()?;
                Ok(Expr::Number(n))
            }
            TokenKind::LeftParen => {
                self.eat(TokenKind::LeftParen)?;
                let node = self.expr()?;
                self.eat(TokenKind::RightParen)?;
                Ok(node)
            }
            _ => Err(InvalidSyntax {
                src: self.lexer.source(),
                bad_token: self.current_span(),
                found: self.current.kind.describe(),
            }
            .into()),
        }
    }

    /// Consumes the current token only if it is of the `expected` kind.
    fn eat(&mut self, expected: TokenKind) -> Result<Token<'de>, Fault> {
        if !self.current.kind.same_kind(&expected) {
            return Err(self.unexpected(expected).into());
        }
        self.advance()
    }

    fn advance(&mut self) -> Result<Token<'de>, Fault> {
        let next = self.lexer.next_token()?;
        let consumed = std::mem::replace(&mut self.current, next);
        trace!(consumed = %consumed, "advance");
        Ok(consumed)
    }

    fn unexpected(&self, expected: TokenKind) -> UnexpectedToken {
        let advice = match expected {
            TokenKind::EndOfInput => "remove this trailing token".to_string(),
            _ => format!("use {} here instead", expected.describe()),
        };
        UnexpectedToken {
            src: self.lexer.source(),
            bad_token: self.current_span(),
            advice,
            expected: expected.describe(),
            found: self.current.kind.describe(),
        }
    }

    // The lookahead is the last token lexed, so it ends at the lexer offset.
    fn current_span(&self) -> SourceSpan {
        let end = self.lexer.offset();
        SourceSpan::from(end - self.current.literal.len()..end)
    }
}
