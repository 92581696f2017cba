use std::fmt::Display;
use std::mem::discriminant;
use std::num::ParseFloatError;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use tracing::trace;

use crate::error::Fault;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid character: {token}")]
#[diagnostic(
    code(lex::invalid_character),
    help("only digits, `.`, `+`, `-`, `*`, `/` and parentheses are allowed")
)]
pub struct InvalidCharacter {
    #[source_code]
    src: NamedSource<String>,

    #[label("this character")]
    bad_bit: SourceSpan,

    pub token: char,
}

impl InvalidCharacter {
    pub fn offset(&self) -> usize {
        self.bad_bit.offset()
    }
}

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid numeric literal `{literal}`: {reason}")]
#[diagnostic(
    code(lex::numeric_conversion),
    url("https://doc.rust-lang.org/std/num/struct.ParseFloatError.html")
)]
pub struct NumericConversionFailure {
    #[source_code]
    src: NamedSource<String>,

    #[label("this numeric literal")]
    bad_literal: SourceSpan,

    pub literal: String,

    #[source]
    reason: ParseFloatError,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'de> {
    pub kind: TokenKind,
    pub literal: &'de str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Multiply,
    Divide,
    LeftParen,
    RightParen,
    EndOfInput,
}

impl TokenKind {
    /// Compares kinds only, ignoring any numeric payload.
    pub fn same_kind(&self, other: &TokenKind) -> bool {
        discriminant(self) == discriminant(other)
    }

    /// Human readable name used in parser diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "a number",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Multiply => "`*`",
            TokenKind::Divide => "`/`",
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::EndOfInput => "end of input",
        }
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Number(n) => write!(f, "NUMBER({n})"),
            TokenKind::Plus => write!(f, "PLUS"),
            TokenKind::Minus => write!(f, "MINUS"),
            TokenKind::Multiply => write!(f, "MULTIPLY"),
            TokenKind::Divide => write!(f, "DIVIDE"),
            TokenKind::LeftParen => write!(f, "LPAREN"),
            TokenKind::RightParen => write!(f, "RPAREN"),
            TokenKind::EndOfInput => write!(f, "EOF"),
        }
    }
}

pub struct Lexer<'de> {
    filename: Option<&'de str>,
    whole: &'de str,
    rest: &'de str,
    byte: usize,
}

impl<'de> Lexer<'de> {
    pub fn new(filename: Option<&'de str>, input: &'de str) -> Self {
        Lexer {
            filename,
            whole: input,
            rest: input,
            byte: 0,
        }
    }

    /// Byte offset just past the most recently produced token.
    pub fn offset(&self) -> usize {
        self.byte
    }

    pub(crate) fn source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename.unwrap_or("<input>"), self.whole.to_string())
    }

    /// Produces the next token. Once the input is exhausted every further
    /// call yields `EndOfInput`.
    pub fn next_token(&mut self) -> Result<Token<'de>, Fault> {
        loop {
            let rest = self.rest;
            let Some(c) = rest.chars().next() else {
                return Ok(Token {
                    kind: TokenKind::EndOfInput,
                    literal: rest,
                });
            };

            let kind = match c {
                c if c.is_whitespace() => {
                    self.bump(c.len_utf8());
                    continue;
                }
                '0'..='9' | '.' => return self.number(),
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Multiply,
                '/' => TokenKind::Divide,
                '(' => TokenKind::LeftParen,
                ')' => TokenKind::RightParen,
                c => {
                    let start = self.byte;
                    self.bump(c.len_utf8());
                    return Err(InvalidCharacter {
                        src: self.source(),
                        bad_bit: SourceSpan::from(start..self.byte),
                        token: c,
                    }
                    .into());
                }
            };

            let token = Token {
                kind,
                literal: &rest[..1],
            };
            self.bump(1);
            trace!(%token, offset = self.byte, "lexed");
            return Ok(token);
        }
    }

    fn bump(&mut self, len: usize) {
        self.rest = &self.rest[len..];
        self.byte += len;
    }

    // Greedy over digits and dots; the float conversion decides validity.
    fn number(&mut self) -> Result<Token<'de>, Fault> {
        let rest = self.rest;
        let end = rest
            .find(|c: char| !matches!(c, '0'..='9' | '.'))
            .unwrap_or(rest.len());
        let literal = &rest[..end];

        let start = self.byte;
        self.bump(end);

        let n = literal.parse().map_err(|reason| NumericConversionFailure {
            src: self.source(),
            bad_literal: SourceSpan::from(start..self.byte),
            literal: literal.to_string(),
            reason,
        })?;

        let token = Token {
            kind: TokenKind::Number(n),
            literal,
        };
        trace!(%token, offset = self.byte, "lexed");
        Ok(token)
    }
}

/// Iterates until `EndOfInput`, which is not yielded.
impl<'de> Iterator for Lexer<'de> {
    type Item = Result<Token<'de>, Fault>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Token {
                kind: TokenKind::EndOfInput,
                ..
            }) => None,
            other => Some(other),
        }
    }
}
