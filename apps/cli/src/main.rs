//! copyforge CLI — multi-agent content pipeline generator.
//!
//! Turns a content brief into a structured blog-post record by running a
//! fixed sequence of role-tagged agents against an external generation
//! collaborator.

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
