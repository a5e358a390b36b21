//! laszlo golden-file test runner entry point

mod cli;

use std::io::IsTerminal;

fn main() {
    if let Err(error) = init_logging() {
        eprintln!("warning: {error:#}");
    }
    std::process::exit(cli::run_from_env());
}

// `RUST_LOG` overrides the default, which keeps per-fixture progress visible.
fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialise logging: {error}"))
}
