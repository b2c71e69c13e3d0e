mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, inspect, ApplyArgs, InspectArgs};

/// oasedit - apply, undo and inspect edit commands on OpenAPI documents
#[derive(Parser, Debug)]
#[command(name = "oasedit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply marshalled commands to a document
    Apply(ApplyArgs),

    /// Decode marshalled commands and list them
    Inspect(InspectArgs),
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match cli.command {
        Command::Apply(args) => apply(args, &cwd),
        Command::Inspect(args) => inspect(args),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
