use std::fmt::Display;

use miette::{Diagnostic, LabeledSpan, Severity, SourceCode};
use thiserror::Error;

use crate::eval::DivisionByZero;
use crate::lex::{InvalidCharacter, NumericConversionFailure};
use crate::parse::{InvalidSyntax, UnexpectedToken};

/// Every way lexing, parsing or evaluating a single expression can fail.
#[derive(Error, Debug, Diagnostic)]
pub enum Fault {
    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidCharacter(#[from] InvalidCharacter),

    #[error(transparent)]
    #[diagnostic(transparent)]
    NumericConversionFailure(#[from] NumericConversionFailure),

    #[error(transparent)]
    #[diagnostic(transparent)]
    UnexpectedToken(#[from] UnexpectedToken),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidSyntax(#[from] InvalidSyntax),

    #[error(transparent)]
    #[diagnostic(transparent)]
    DivisionByZero(#[from] DivisionByZero),
}

/// The error handed back by the public entry points. It wraps whichever
/// [`Fault`] aborted the expression and renders with that fault's labels.
#[derive(Error, Debug)]
#[error("Compilation error: {fault}")]
pub struct CompilationError {
    #[source]
    fault: Fault,
}

impl CompilationError {
    pub fn fault(&self) -> &Fault {
        &self.fault
    }

    pub fn into_fault(self) -> Fault {
        self.fault
    }
}

impl From<Fault> for CompilationError {
    fn from(fault: Fault) -> Self {
        CompilationError { fault }
    }
}

impl Diagnostic for CompilationError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.fault.code()
    }

    fn severity(&self) -> Option<Severity> {
        self.fault.severity()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.fault.help()
    }

    fn url<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.fault.url()
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.fault.source_code()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.fault.labels()
    }
}
