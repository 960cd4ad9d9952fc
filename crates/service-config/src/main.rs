//! service-config CLI
//!
//! Resolves `serviceConfig:` and `secretConfig:` references from the shell.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Must run before any TLS connection is opened
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let global = cli.global();
    match cli.command {
        Commands::Config(args) => commands::resolve::config(args, &global).await,
        Commands::Secret(args) => commands::resolve::secret(args, &global).await,
        Commands::Urls(args) => commands::urls::run(args, &global),
        Commands::Parse(args) => commands::parse::run(args),
    }
}

/// Initialize tracing with appropriate verbosity.
///
/// Logs go to stderr so resolved values on stdout stay pipeable.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
