use std::fs::File;
use std::io::{self, stderr, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use payments_dashboard::config::DashboardConfig;
use payments_dashboard::models::{PaymentMethod, SortKey};
use payments_dashboard::process_dataset;
use payments_dashboard::source::DatasetFormat;
use rust_decimal::Decimal;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "payments-dashboard")]
#[command(version)]
#[command(about = "Summarise a payment transaction dataset as dashboard JSON", long_about = None)]
struct Args {
    /// Transaction dataset (.json array or .csv)
    input: PathBuf,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Case-insensitive match on transaction id or customer name
    #[arg(short, long, default_value = "")]
    search: String,

    #[arg(long, value_enum, default_value_t = SortArg::Date)]
    sort: SortArg,

    /// Only include transactions up to this amount
    #[arg(long)]
    max_amount: Option<Decimal>,

    /// Only include this payment method, e.g. "Bank Transfer"
    #[arg(long)]
    method: Option<PaymentMethod>,

    /// Table page, 1-based
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Verbosity of the diagnostics written to stderr
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Date,
    Amount,
    Payment,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortKey::Date,
            SortArg::Amount => SortKey::Amount,
            SortArg::Payment => SortKey::Payment,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries the snapshot, diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_writer(stderr)
        .with_max_level(LevelFilter::from(args.log_level))
        .with_target(false)
        .init();

    let config = match &args.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("Failed to load configuration '{}'", path.display()))?,
        None => DashboardConfig::default(),
    };

    if let Some(method) = args.method {
        if !config.payment_schema().contains(method) {
            warn!("Payment method '{method}' is not enabled for this dataset, the table will be empty");
        }
    }

    let view = config
        .default_view()
        .with_search(args.search)
        .sorted_by(args.sort.into())
        .with_amount_ceiling(args.max_amount)
        .with_payment_method(args.method)
        .on_page(args.page);

    let format = DatasetFormat::from_path(&args.input)?;
    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open input file '{}'", args.input.display()))?;

    process_dataset(BufReader::new(file), format, &view, &config, io::stdout().lock())
        .context("Failed to build the dashboard snapshot")?;

    info!(input = %args.input.display(), "Dashboard snapshot written");

    Ok(())
}
