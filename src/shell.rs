use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::{evaluate, tokenize};

const BANNER: &[&str] = &[
    "=== Simple Arithmetic Expression Compiler ===",
    "Supports: +, -, *, /, parentheses, and decimal numbers",
    "Enter 'quit' to exit, 'tokens <expr>' to see tokenization",
    "Examples: 2 + 3 * 4, (10 - 5) / 2.5, -3 + 4",
];

const PROMPT: &str = "Enter expression: ";

#[derive(Debug, PartialEq)]
enum Command<'a> {
    Quit,
    Tokens(Option<&'a str>),
    Evaluate(&'a str),
    Empty,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        if line == "quit" {
            return Command::Quit;
        }
        if line.is_empty() {
            return Command::Empty;
        }
        if line.starts_with("tokens") {
            // The expression starts after "tokens" and one separator character.
            return Command::Tokens(line.get(7..).filter(|expr| !expr.is_empty()));
        }
        Command::Evaluate(line)
    }
}

/// Line oriented read-eval-print loop over any reader/writer pair.
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Shell { input, output }
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        for line in BANNER {
            writeln!(self.output, "{line}")?;
        }
        writeln!(self.output)?;

        let mut buf = String::new();
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            buf.clear();
            if self.input.read_line(&mut buf)? == 0 {
                info!("input closed");
                writeln!(self.output)?;
                break;
            }

            let command = Command::parse(buf.trim_end_matches(['\n', '\r']));
            debug!(?command, "shell");
            match command {
                Command::Quit => break,
                Command::Empty => continue,
                Command::Tokens(None) => writeln!(self.output, "Usage: tokens <expression>")?,
                Command::Tokens(Some(expr)) => self.print_tokens(expr)?,
                Command::Evaluate(expr) => {
                    match evaluate(expr) {
                        Ok(value) => writeln!(self.output, "Result: {value}")?,
                        Err(e) => writeln!(self.output, "Error: {e}")?,
                    }
                    writeln!(self.output)?;
                }
            }
        }

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    fn print_tokens(&mut self, expr: &str) -> io::Result<()> {
        writeln!(self.output, "Tokens for \"{expr}\":")?;
        match tokenize(expr) {
            Ok(tokens) => {
                for token in tokens {
                    write!(self.output, "{token} ")?;
                }
                writeln!(self.output, "EOF")?;
            }
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        writeln!(self.output)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
