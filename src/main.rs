//! # funny
//!
//! Command line entry point.
//!

use clap::Parser;

/// Run a funny program
#[derive(Parser, Debug)]
#[command(name = "funny", version, about)]
struct Cli {
    /// Path to the program source file
    file: String,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();
    std::process::exit(funny::term::main(&cli.file));
}

/// Diagnostics go to stderr, only when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}
