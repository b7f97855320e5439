// src/cli/mod.rs
use clap::Parser;

pub mod commands;
pub mod handlers;

pub use commands::CliCommand;

#[derive(Parser, Debug)]
#[command(name = "pgr", author, version, about = "Password generator with per-user saved passwords", long_about = None)]
pub struct Args {
    /// Database URL (sqlite:<path>, sqlite::memory: or memory:)
    #[arg(long, short, env = "DATABASE_URL")]
    pub db: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: CliCommand,
}
