//! CLI module for the marketplace API
//!
//! Subcommands:
//! - `serve`: run the HTTP server (applies pending migrations first)
//! - `migrate`: apply pending database migrations and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Marketplace backend API
#[derive(Parser)]
#[command(name = "marketplace-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Apply pending database migrations
    Migrate,
}
