//! figmacopy CLI — pull copy out of Figma designs.
//!
//! Extracts visible text from a Figma node, groups it into sections, and
//! drafts an implementation ticket around it.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
