//! CLI module for Careful Admin

pub mod serve;

use clap::{Parser, Subcommand};

/// Careful Admin - cached user and dictionary reads with an audited cache
#[derive(Parser)]
#[command(name = "careful-admin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(serve::ServeArgs),
}
