use miette::Diagnostic;
use thiserror::Error;

use crate::parse::{BinaryOp, Expr, UnaryOp};

#[derive(Error, Debug, Diagnostic)]
#[error("Division by zero")]
#[diagnostic(
    code(eval::division_by_zero),
    help("the right operand of `/` evaluated to exactly 0")
)]
pub struct DivisionByZero {
    pub dividend: f64,
}

impl Expr {
    /// Walks the tree, left operand before right. The tree is left untouched,
    /// so evaluating twice gives the same result.
    pub fn evaluate(&self) -> Result<f64, DivisionByZero> {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::Unary { op, operand } => {
                let value = operand.evaluate()?;
                Ok(match op {
                    UnaryOp::Plus => value,
                    UnaryOp::Minus => -value,
                })
            }
            Expr::Binary { op, left, right } => {
                let lhs = left.evaluate()?;
                let rhs = right.evaluate()?;
                Ok(match op {
                    BinaryOp::Plus => lhs + rhs,
                    BinaryOp::Minus => lhs - rhs,
                    BinaryOp::Multiply => lhs * rhs,
                    BinaryOp::Divide => {
                        if rhs == 0.0 {
                            return Err(DivisionByZero { dividend: lhs });
                        }
                        lhs / rhs
                    }
                })
            }
        }
    }
}
