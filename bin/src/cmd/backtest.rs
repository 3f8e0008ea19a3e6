//! Backtest command implementation.

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use factorlake_data::{CsvLoader, Loader, SupabaseLoader};
use factorlake_eval::{
    BacktestOutput, DelistingPolicy, RebalanceConfig, Rebalancer, ResultSeries, SelectionRule,
};
use factorlake_factors::create_factors;
use factorlake_traits::Dataset;
use std::path::PathBuf;
use tracing::info;

/// Arguments of the `backtest` subcommand.
#[derive(Debug, Args)]
pub(crate) struct BacktestArgs {
    /// Factors to combine (names or aliases, see `factorlake factors`)
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub(crate) factors: Vec<String>,

    /// CSV file holding the dataset
    #[arg(long, conflicts_with = "supabase")]
    pub(crate) data: Option<PathBuf>,

    /// Read the dataset from Supabase (SUPABASE_URL / SUPABASE_KEY)
    #[arg(long)]
    pub(crate) supabase: bool,

    /// Supabase table to read
    #[arg(long, default_value = "All", requires = "supabase")]
    pub(crate) table: String,

    /// First formation year
    #[arg(long, default_value_t = 2002)]
    pub(crate) start: i32,

    /// Terminal pricing year
    #[arg(long, default_value_t = 2023)]
    pub(crate) end: i32,

    /// Starting portfolio value
    #[arg(long, default_value_t = 1.0)]
    pub(crate) aum: f64,

    /// Exclude oil, gas, coal and other fossil-fuel industries
    #[arg(long)]
    pub(crate) restrict_fossil_fuels: bool,

    /// Keep only these sectors (see `factorlake sectors`)
    #[arg(long, value_delimiter = ',')]
    pub(crate) sectors: Vec<String>,

    /// Hold the best fraction of the eligible universe
    #[arg(long, conflicts_with = "top_count")]
    pub(crate) top_fraction: Option<f64>,

    /// Hold a fixed number of stocks
    #[arg(long)]
    pub(crate) top_count: Option<usize>,

    /// Treatment of holdings without an exit price
    #[arg(long, value_enum, default_value_t = Delisting::TotalLoss)]
    pub(crate) delisting: Delisting,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub(crate) format: Format,

    /// Also write the JSON report to this file
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,
}

/// CLI spelling of [`DelistingPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Delisting {
    /// Written off
    TotalLoss,
    /// Weight spread over the priced holdings
    Redistribute,
    /// Sold at the entry price
    LiquidateAtEntry,
}

impl From<Delisting> for DelistingPolicy {
    fn from(value: Delisting) -> Self {
        match value {
            Delisting::TotalLoss => Self::TotalLoss,
            Delisting::Redistribute => Self::Redistribute,
            Delisting::LiquidateAtEntry => Self::LiquidateAtEntry,
        }
    }
}

/// Report format on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Human-readable table
    Text,
    /// The JSON report
    Json,
}

impl BacktestArgs {
    /// Builds the run configuration from the flags.
    pub(crate) fn config(&self, verbosity: u8) -> RebalanceConfig {
        let selection = match (self.top_fraction, self.top_count) {
            (_, Some(count)) => SelectionRule::TopCount(count),
            (Some(fraction), None) => SelectionRule::TopFraction(fraction),
            (None, None) => SelectionRule::default(),
        };
        RebalanceConfig {
            start_year: self.start,
            end_year: self.end,
            initial_aum: self.aum,
            restrict_fossil_fuels: self.restrict_fossil_fuels,
            sectors: self.sectors.clone(),
            selection,
            delisting: self.delisting.into(),
            verbosity,
        }
    }
}

/// Load the dataset, run the backtest and report the result.
pub(crate) async fn run_backtest(args: &BacktestArgs, verbosity: u8) -> Result<()> {
    let config = args.config(verbosity);
    let factors = create_factors(args.factors.as_slice())?;
    let rebalancer = Rebalancer::new(factors, config.clone())?;

    let dataset = load_dataset(args).await?;
    info!(
        "Loaded {} rows spanning {} years",
        dataset.len(),
        dataset.years().len()
    );

    let series = rebalancer.run(&dataset)?;
    let names: Vec<&str> = rebalancer.factor_names();
    let output = BacktestOutput::new(&series, &config, names.as_slice());
    let json = output.to_json()?;

    if let Some(path) = &args.output {
        std::fs::write(path, &json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Wrote report to {}", path.display());
    }

    match args.format {
        Format::Json => println!("{}", json),
        Format::Text => print_report(&series, &output, &config),
    }

    Ok(())
}

async fn load_dataset(args: &BacktestArgs) -> Result<Dataset> {
    if args.supabase {
        let loader = SupabaseLoader::from_env()?.with_table(&args.table);
        info!("Loading dataset from {}", loader.source());
        return Ok(loader.load().await?);
    }
    let Some(path) = &args.data else {
        bail!("no data source: pass --data <csv> or --supabase");
    };
    let loader = CsvLoader::new(path);
    info!("Loading dataset from {}", loader.source());
    Ok(loader.load().await?)
}

fn print_report(series: &ResultSeries, output: &BacktestOutput, config: &RebalanceConfig) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                       Backtesting                            ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Factors:    {}", output.factors.join(", "));
    println!("Period:     {} to {}", config.start_year, config.end_year);
    println!("Selection:  {}", config.selection);
    println!("Delisting:  {}", config.delisting);
    if config.restrict_fossil_fuels {
        println!("Screen:     fossil fuels excluded");
    }
    if !config.sectors.is_empty() {
        println!("Sectors:    {}", config.sectors.join(", "));
    }
    println!();

    println!(
        "{:>6} {:>8} {:>10} {:>14} {:>9}",
        "Year", "Holdings", "Return", "Value", "Delisted"
    );
    println!("{}", "-".repeat(51));
    println!("{:>6} {:>8} {:>10} {:>14.4}", series.start_year(), "", "", series.initial_aum());
    for period in &output.periods {
        println!(
            "{:>6} {:>8} {:>9.2}% {:>14.4} {:>9}",
            period.year,
            period.holdings,
            period.period_return * 100.0,
            period.portfolio_value,
            period.missing.delisted
        );
    }
    println!();

    let metrics = &output.metrics;
    println!("Final value:         {:.4}", output.final_value);
    println!("Overall growth:      {:.2}%", output.overall_growth_pct);
    if let Some(r) = metrics.annualized_return {
        println!("Annualized return:   {:.2}%", r * 100.0);
    }
    if let Some(v) = metrics.annualized_volatility {
        println!("Annualized vol:      {:.2}%", v * 100.0);
    }
    println!("Max drawdown:        {:.2}%", metrics.max_drawdown * 100.0);
    if let Some(a) = metrics.mean_active_return {
        println!("Mean active return:  {:.2}%", a * 100.0);
    }
    if let Some(te) = metrics.tracking_error {
        println!("Tracking error:      {:.2}%", te * 100.0);
    }
    if let Some(ir) = metrics.information_ratio {
        println!("Information ratio:   {:.2}", ir);
    }
    println!();
}
