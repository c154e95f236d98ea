//! CLI module for the gateway

pub mod serve;

use clap::{Parser, Subcommand};

/// Claude Gateway - OpenAI-compatible API server backed by the Claude Code CLI
#[derive(Parser)]
#[command(name = "claude-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve(serve::ServeArgs),
}
