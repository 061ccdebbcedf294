// src/main.rs
use anyhow::Result;
use bulletin::cli::args::Args;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging based on verbosity
    let filter = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // stderr only: stdout carries views and wire frames
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(format!("bulletin={}", filter).parse()?),
        )
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(bulletin::run(args));
    // A stdin read parked on the blocking pool must not hold the process open.
    runtime.shutdown_background();
    result
}
