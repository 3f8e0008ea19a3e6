//! factorlake CLI binary.
//!
//! Lists the factor catalogue and runs annual rebalancing backtests.

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmd::backtest::BacktestArgs;
use std::process;
use tracing::Level;

#[derive(Parser)]
#[command(name = "factorlake")]
#[command(about = "Annual factor rebalancing backtester", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase verbosity (-v yearly summary, -vv per-ticker diagnostics)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available factors
    Factors {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Show column, direction, thesis and aliases
        #[arg(long)]
        details: bool,
    },

    /// List sectors accepted by the sector screen
    Sectors,

    /// Run a backtest
    Backtest(BacktestArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Factors { category, details } => {
            cmd::factors::list_factors(category.as_deref(), details || cli.verbose > 0);
        }
        Commands::Sectors => cmd::sectors::list_sectors(),
        Commands::Backtest(args) => {
            cmd::backtest::run_backtest(&args, cli.verbose).await?;
        }
    }

    Ok(())
}

const fn log_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

fn init_tracing(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_max_level(log_level(verbosity))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), Level::WARN);
        assert_eq!(log_level(1), Level::INFO);
        assert_eq!(log_level(3), Level::DEBUG);
    }

    #[test]
    fn test_parse_backtest() {
        let cli = Cli::try_parse_from([
            "factorlake",
            "-vv",
            "backtest",
            "--factors",
            "roe",
            "--data",
            "data.csv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Backtest(_)));
    }

    #[test]
    fn test_parse_factors() {
        let cli = Cli::try_parse_from(["factorlake", "factors", "--category", "value"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Factors { category: Some(ref c), details: false } if c == "value"
        ));
    }
}
