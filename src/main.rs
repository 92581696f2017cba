use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use arith_compiler::shell::Shell;
use arith_compiler::{CompilationError, Fault, Lexer};
use clap::Parser;
use clap::Subcommand;
use miette::IntoDiagnostic;
use miette::WrapErr;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Evaluate arithmetic expressions over real numbers")]
struct Args {
    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the tokens of an expression
    Tokenize(Input),
    /// Print the syntax tree of an expression
    Parse(Input),
    /// Print the value of an expression
    Eval(Input),
    /// Start the interactive shell (default)
    Repl,
}

#[derive(Debug, clap::Args)]
struct Input {
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    expression: Option<String>,

    /// Read the expression from a file
    #[arg(short, long)]
    file: Option<PathBuf>,
}

impl Input {
    /// Returns the diagnostic name of the source and its text.
    fn read(self) -> miette::Result<(Option<String>, String)> {
        match (self.expression, self.file) {
            (Some(expression), _) => Ok((None, expression)),
            (None, Some(filename)) => {
                let contents = fs::read_to_string(&filename)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("reading `{}` failed", filename.display()))?;
                Ok((Some(filename.display().to_string()), contents))
            }
            (None, None) => Err(miette::miette!("no expression given")),
        }
    }
}

fn init_logging(args: &Args) -> miette::Result<()> {
    let level = match args.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false);

    match &args.log_file {
        Some(path) => {
            let file = fs::File::create(path)
                .into_diagnostic()
                .wrap_err("unable to create log file")?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    match args.command.unwrap_or(Commands::Repl) {
        Commands::Tokenize(input) => {
            let (filename, contents) = input.read()?;
            for token in Lexer::new(filename.as_deref(), &contents) {
                match token {
                    Ok(token) => println!("{token}"),
                    Err(e @ (Fault::InvalidCharacter(_) | Fault::NumericConversionFailure(_))) => {
                        eprintln!("{:?}", miette::Report::new(e));
                        std::process::exit(65);
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            println!("EOF");
        }
        Commands::Parse(input) => {
            let (filename, contents) = input.read()?;
            let ast = arith_compiler::Parser::new(filename.as_deref(), &contents)
                .and_then(|parser| parser.parse())
                .map_err(CompilationError::from)?;
            println!("{ast}");
        }
        Commands::Eval(input) => {
            let (filename, contents) = input.read()?;
            let value = arith_compiler::evaluate_source(filename.as_deref(), &contents)
                .map_err(CompilationError::from)?;
            println!("{value}");
        }
        Commands::Repl => {
            let stdin = io::stdin();
            Shell::new(stdin.lock(), io::stdout())
                .run()
                .into_diagnostic()
                .wrap_err("shell i/o failed")?;
        }
    }
    Ok(())
}
