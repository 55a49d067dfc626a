mod config;
mod engine;
mod keymap;
mod ui;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::engine::{Calculator, Input, Outcome};

#[derive(Parser)]
#[command(name = "zcalc", version, about = "A keypad calculator for the terminal")]
struct Args {
    /// Evaluate an expression and print the result instead of starting the UI.
    #[arg(short, long, value_name = "EXPR")]
    eval: Option<String>,

    /// Path to an alternative configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zcalc=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    if let Some(expression) = args.eval {
        return eval_once(&expression);
    }

    ui::run(config).await
}

/// Feed an expression through the engine character by character, evaluate,
/// and print the result.
fn eval_once(expression: &str) -> Result<()> {
    let mut calculator = Calculator::new();

    for character in expression.chars() {
        let Some(input) = keymap::map_char(character) else {
            bail!("unsupported character {character:?} in expression");
        };
        if calculator.handle_input(input) == Outcome::Rejected {
            bail!("invalid expression: {expression} (rejected at {character:?})");
        }
    }
    if calculator.handle_input(Input::Evaluate) == Outcome::Rejected {
        bail!("expression could not be evaluated: {expression}");
    }

    println!("{}", calculator.expression());
    Ok(())
}
