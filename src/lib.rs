pub mod error;
pub mod eval;
pub mod lex;
pub mod parse;
pub mod shell;

use tracing::{debug, instrument};

pub use error::{CompilationError, Fault};
pub use lex::{Lexer, Token, TokenKind};
pub use parse::{BinaryOp, Expr, Parser, UnaryOp};

/// Parses and evaluates `expression` in one go.
#[instrument(skip_all)]
pub fn evaluate(expression: &str) -> Result<f64, CompilationError> {
    evaluate_source(None, expression).map_err(CompilationError::from)
}

/// Parses `expression` without evaluating it.
#[instrument(skip_all)]
pub fn parse(expression: &str) -> Result<Expr, CompilationError> {
    let ast = Parser::new(None, expression)?.parse()?;
    debug!(%ast, "parsed");
    Ok(ast)
}

/// Lexes `expression` up to, but not including, `EndOfInput`.
pub fn tokenize(expression: &str) -> Result<Vec<Token<'_>>, Fault> {
    Lexer::new(None, expression).collect()
}

/// Same as [`evaluate`] but reports the failing [`Fault`] directly and names
/// the source in diagnostics.
pub fn evaluate_source(filename: Option<&str>, expression: &str) -> Result<f64, Fault> {
    let ast = Parser::new(filename, expression)?.parse()?;
    debug!(%ast, "parsed");
    let value = ast.evaluate()?;
    debug!(value, "evaluated");
    Ok(value)
}
