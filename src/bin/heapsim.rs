//! heapsim - interactive boundary-tag allocator simulator
//!
//! Reads commands from stdin and prints results to stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use heapsim::{Placement, Shell, SimConfig};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "heapsim")]
#[command(version, about = "Simulate an implicit free-list allocator over a tiny byte arena")]
struct Args {
    /// Placement strategy: `BestFit` selects best-fit, anything else first-fit
    strategy: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not print a prompt before each command
    #[arg(long)]
    no_prompt: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_env("HEAPSIM_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };

    if args.strategy.is_some() {
        config = config.with_strategy(Placement::from_arg(args.strategy.as_deref()));
    }

    info!(
        strategy = %config.strategy,
        arena_size = config.arena_size,
        "starting heapsim"
    );

    let prompt = if args.no_prompt {
        None
    } else {
        Some(config.prompt.clone())
    };
    let mut shell = Shell::new(&config)?.with_prompt(prompt);

    let stdin = io::stdin();
    let mut stdout = BufWriter::new(io::stdout());
    shell
        .run(stdin.lock(), &mut stdout)
        .context("command loop failed")?;

    Ok(())
}
