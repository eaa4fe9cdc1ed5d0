//! Impulse CLI - Command-line interface
//!
//! Commands:
//! - play: Drive a game session with line commands
//! - log: Inspect a move log written by `play --log`
//! - check: Validate reference tables and a scenario

mod check;
mod config;
mod log_cmd;
mod play;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "impulse")]
#[command(about = "Turn and impulse engine for hex-grid starship combat")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a session from stdin or a script
    Play(play::PlayArgs),
    /// Show recorded moves
    Log(log_cmd::LogArgs),
    /// Validate tables and a scenario
    Check(check::CheckArgs),
}

fn main() -> anyhow::Result<()> {
    // RUST_LOG controls verbosity; logs go to stderr so play output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Log(args) => log_cmd::run(args),
        Commands::Check(args) => check::run(args),
    }
}
