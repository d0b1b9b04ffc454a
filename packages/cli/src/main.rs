mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    example, init, sample, schema, variables, ExampleArgs, InitArgs, SampleArgs, SchemaArgs,
    VariablesArgs,
};
use tracing_subscriber::EnvFilter;

/// Prompt CLI - Variable-aware prompt templates and task schemas
#[derive(Parser, Debug)]
#[command(name = "prompt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create prompt.config.json and an example prompt
    Init(InitArgs),

    /// List the variables of a prompt file
    Variables(VariablesArgs),

    /// Derive a task input schema from a prompt file
    Schema(SchemaArgs),

    /// Print an example payload for a JSON schema
    Example(ExampleArgs),

    /// Print a code sample that runs a task
    Sample(SampleArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Variables(args) => variables(args, &cwd),
            Command::Schema(args) => schema(args, &cwd),
            Command::Example(args) => example(args, &cwd),
            Command::Sample(args) => sample(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
