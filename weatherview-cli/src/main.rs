//! Binary crate for the `weatherview` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - The interactive terminal view and one-shot output

use clap::Parser;

mod cli;
mod configure;
mod logging;
mod tui;
mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
