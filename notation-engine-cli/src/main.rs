use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use itertools::Itertools;
use log::{debug, info};
use notation_engine::engine::syntax::expression_tree::new_tree;
use notation_engine::engine::{self, tokens_to_string, Notation, NotationError};
use std::process::ExitCode;

/// Exit status when the tokens are not a well-formed expression.
const INVALID_EXPRESSION: u8 = 2;

/// Validates, evaluates and converts prefix and postfix arithmetic expressions.
///
/// Every argument after the options is one token, e.g. `evaluate -n prefix + 3 4`.
/// Negative operands such as `-5` are tokens too. Use `--` before the tokens if one
/// could otherwise be mistaken for an option.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    #[clap(flatten)]
    verbose: Verbosity,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Checks whether the tokens form a well-formed expression
    #[clap(allow_negative_numbers = true)]
    Validate(Expression),
    /// Computes the integer value of the expression
    #[clap(allow_negative_numbers = true)]
    Evaluate(Expression),
    /// Re-renders the expression in another notation
    #[clap(allow_negative_numbers = true)]
    Convert(Conversion),
    /// Prints the expression as a tree
    #[clap(allow_negative_numbers = true)]
    Tree(Expression),
}

#[derive(Args, Debug)]
struct Expression {
    /// The notation the tokens are written in: prefix or postfix
    #[clap(short, long)]
    notation: Notation,

    /// The expression, one token per argument
    #[clap(required = true)]
    tokens: Vec<String>,
}

#[derive(Args, Debug)]
struct Conversion {
    /// The notation the tokens are written in: prefix or postfix
    #[clap(short, long)]
    from: Notation,

    /// The notation to convert to: prefix, postfix or infix
    #[clap(short, long)]
    to: Notation,

    /// The expression, one token per argument
    #[clap(required = true)]
    tokens: Vec<String>,
}

fn main() -> Result<ExitCode> {
    let arguments = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(arguments.verbose.log_level_filter())
        .init();
    debug!("{:?}", arguments.command);

    run(arguments.command)
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Validate(Expression { notation, tokens }) => {
            match engine::check(&tokens, notation) {
                Ok(_) => {
                    println!("valid");
                    Ok(ExitCode::SUCCESS)
                }
                Err(error) => {
                    reject(error, || format!("Could not validate {} expression", notation))
                }
            }
        }
        Command::Evaluate(Expression { notation, tokens }) => {
            match engine::evaluate(&tokens, notation) {
                Ok(value) => {
                    println!("{}", value);
                    Ok(ExitCode::SUCCESS)
                }
                Err(error) => reject(error, || {
                    format!(
                        "Could not evaluate {} expression `{}`",
                        notation,
                        tokens.iter().join(" ")
                    )
                }),
            }
        }
        Command::Convert(Conversion { from, to, tokens }) => {
            match engine::convert(&tokens, from, to) {
                Ok(converted) => {
                    info!("Converted {} tokens into {}", tokens.len(), converted.len());
                    println!("{}", tokens_to_string(&converted)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(error) => reject(error, || {
                    format!(
                        "Could not convert {} expression `{}` to {}",
                        from,
                        tokens.iter().join(" "),
                        to
                    )
                }),
            }
        }
        Command::Tree(Expression { notation, tokens }) => {
            match new_tree(&tokens, notation) {
                Ok(tree) => {
                    print!("{}", tree);
                    Ok(ExitCode::SUCCESS)
                }
                Err(error) => reject(error, || {
                    format!(
                        "Could not build a tree of {} expression `{}`",
                        notation,
                        tokens.iter().join(" ")
                    )
                }),
            }
        }
    }
}

/// Malformed input is answered with `invalid: <reason>` and its own exit status.
/// Every other failure is returned with `context` attached.
fn reject<C>(error: NotationError, context: impl FnOnce() -> C) -> Result<ExitCode>
where
    C: std::fmt::Display + Send + Sync + 'static,
{
    if error.is_structural() {
        println!("invalid: {}", error);
        return Ok(ExitCode::from(INVALID_EXPRESSION));
    }
    Err(error).with_context(context)
}
