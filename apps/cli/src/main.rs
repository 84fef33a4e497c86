//! pagewright CLI — turn extracted document text into finished HTML pages.
//!
//! Converts paragraph streams and markdown to HTML, tags marker pairs, and
//! splices the results into marker-delimited regions of page templates.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
