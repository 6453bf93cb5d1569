//! modmeta CLI entry point
//!
//! Handles command-line parsing, logging setup, command execution and
//! user-friendly error display. The generation pass itself lives in the
//! library crate; see [`modmeta_cli::cli`] for the available subcommands.

use anyhow::Result;
use clap::Parser;
use modmeta_cli::cli::Cli;
use modmeta_cli::core::user_friendly_error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
