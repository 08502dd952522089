//! RsiPulse CLI: one-shot snapshots and a headless watch mode.
//!
//! Commands:
//! - `snapshot`: run a single refresh cycle and print the readings table
//! - `watch`: refresh on a timer, one summary line per cycle, optional CSV log

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use rsipulse_core::config::DashboardConfig;
use rsipulse_core::data::provider::QuoteProvider;
use rsipulse_core::data::synthetic::SyntheticQuotes;
use rsipulse_core::data::watchlist::Watchlist;
use rsipulse_core::data::yahoo::YahooIntraday;
use rsipulse_core::session::{CycleReport, Session};

const CONFIG_FILE: &str = "rsipulse.toml";
const WATCHLIST_FILE: &str = "watchlist.txt";

#[derive(Parser)]
#[command(name = "rsipulse", about = "Two-timeframe RSI momentum dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single refresh cycle and print the readings table.
    Snapshot {
        /// Watchlist file, one symbol per line. Defaults to ./watchlist.txt,
        /// then to the built-in demo set.
        #[arg(long)]
        watchlist: Option<PathBuf>,

        /// Config file. Defaults to ./rsipulse.toml when present.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the RSI period from the config.
        #[arg(long)]
        period: Option<usize>,

        /// Use the deterministic synthetic feed instead of Yahoo Finance.
        #[arg(long, default_value_t = false)]
        synthetic: bool,
    },
    /// Refresh on a timer and print one summary line per cycle.
    Watch {
        /// Watchlist file, one symbol per line. Defaults to ./watchlist.txt,
        /// then to the built-in demo set.
        #[arg(long)]
        watchlist: Option<PathBuf>,

        /// Config file. Defaults to ./rsipulse.toml when present.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the RSI period from the config.
        #[arg(long)]
        period: Option<usize>,

        /// Use the deterministic synthetic feed instead of Yahoo Finance.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Stop after this many cycles. Runs until interrupted otherwise.
        #[arg(long)]
        cycles: Option<u64>,

        /// Append aggregate figures to this CSV file, one row per cycle.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Snapshot {
            watchlist,
            config,
            period,
            synthetic,
        } => run_snapshot(watchlist, config, period, synthetic),
        Commands::Watch {
            watchlist,
            config,
            period,
            synthetic,
            cycles,
            csv,
        } => run_watch(watchlist, config, period, synthetic, cycles, csv),
    }
}

fn run_snapshot(
    watchlist: Option<PathBuf>,
    config: Option<PathBuf>,
    period: Option<usize>,
    synthetic: bool,
) -> Result<()> {
    let config = load_config(config.as_deref(), period)?;
    let watchlist = load_watchlist(watchlist.as_deref())?;
    let provider = make_provider(synthetic);

    let mut session = Session::new(config, watchlist)?;
    let report = session.run_cycle(provider.as_ref());

    print_table(&session, &report);

    for failure in &report.errors {
        eprintln!("Error for {} {}: {}", failure.symbol, failure.interval, failure.error);
    }
    if !report.is_clean() {
        std::process::exit(1);
    }

    Ok(())
}

fn run_watch(
    watchlist: Option<PathBuf>,
    config: Option<PathBuf>,
    period: Option<usize>,
    synthetic: bool,
    cycles: Option<u64>,
    csv: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config.as_deref(), period)?;
    let watchlist = load_watchlist(watchlist.as_deref())?;
    let provider = make_provider(synthetic);

    let refresh = Duration::from_secs(config.refresh_secs);
    let mut session = Session::new(config, watchlist)?;

    let mut csv_out = match &csv {
        Some(path) => Some(open_csv(path)?),
        None => None,
    };

    println!(
        "Watching {} tickers via {} every {}s. Ctrl+C to stop.",
        session.watchlist().len(),
        provider.name(),
        refresh.as_secs()
    );

    let mut count: u64 = 0;
    loop {
        let report = session.run_cycle(provider.as_ref());
        count += 1;

        print_cycle_line(count, &report);
        for failure in &report.errors {
            eprintln!("  {} {}: {}", failure.symbol, failure.interval, failure.error);
        }

        if let Some(wtr) = csv_out.as_mut() {
            append_csv(wtr, count, &report)?;
        }

        if let Some(limit) = cycles {
            if count >= limit {
                break;
            }
        }
        std::thread::sleep(refresh);
    }

    Ok(())
}

fn load_config(path: Option<&Path>, period: Option<usize>) -> Result<DashboardConfig> {
    let mut config = match path {
        Some(p) => DashboardConfig::from_file(p)
            .with_context(|| format!("failed to load {}", p.display()))?,
        None if Path::new(CONFIG_FILE).exists() => DashboardConfig::from_file(Path::new(CONFIG_FILE))
            .with_context(|| format!("failed to load {CONFIG_FILE}"))?,
        None => DashboardConfig::default(),
    };
    if let Some(p) = period {
        config.rsi_period = p;
    }
    Ok(config)
}

fn load_watchlist(path: Option<&Path>) -> Result<Watchlist> {
    match path {
        Some(p) => {
            Watchlist::from_file(p).with_context(|| format!("failed to load {}", p.display()))
        }
        None if Path::new(WATCHLIST_FILE).exists() => Watchlist::from_file(Path::new(WATCHLIST_FILE))
            .with_context(|| format!("failed to load {WATCHLIST_FILE}")),
        None => Ok(Watchlist::default_demo()),
    }
}

fn make_provider(synthetic: bool) -> Box<dyn QuoteProvider> {
    if synthetic {
        Box::new(SyntheticQuotes::default())
    } else {
        Box::new(YahooIntraday::new())
    }
}

fn print_table(session: &Session, report: &CycleReport) {
    let config = session.config();
    let fast_hdr = format!("RSI {}", config.fast_interval.code());
    let slow_hdr = format!("RSI {}", config.slow_interval.code());

    println!(
        "{:>8} {:>12} {:>9} {:>9} {:>13}",
        "Symbol", "Price", fast_hdr, slow_hdr, "Alert"
    );
    println!("{}", "-".repeat(56));
    for reading in &report.readings {
        println!(
            "{:>8} {:>12} {:>9} {:>9} {:>13}",
            reading.symbol,
            fmt_price(reading.last_price),
            fmt_rsi(reading.fast_rsi),
            fmt_rsi(reading.slow_rsi),
            reading.alert().label()
        );
    }

    let snap = &report.snapshot;
    println!("{}", "-".repeat(56));
    println!(
        "{:>8} {:>12} {:>9} {:>9} {:>13}",
        "ALL",
        fmt_price(snap.avg_price),
        fmt_rsi(snap.fast_rsi),
        fmt_rsi(snap.slow_rsi),
        snap.alert.label()
    );
    println!();
    println!("Signal: {}", snap.signal.label());
}

fn print_cycle_line(cycle: u64, report: &CycleReport) {
    let snap = &report.snapshot;
    let local = report.completed_at.with_timezone(&chrono::Local);
    println!(
        "[{}] cycle {:>4} | fast {:>6} slow {:>6} | avg {:>10} | {}",
        local.format("%H:%M:%S"),
        cycle,
        fmt_rsi(snap.fast_rsi),
        fmt_rsi(snap.slow_rsi),
        fmt_price(snap.avg_price),
        snap.signal.label()
    );
}

fn open_csv(path: &Path) -> Result<csv::Writer<File>> {
    let is_new = !path.exists() || std::fs::metadata(path)?.len() == 0;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    if is_new {
        wtr.write_record([
            "cycle",
            "timestamp",
            "fast_rsi",
            "slow_rsi",
            "avg_price",
            "alert",
            "signal",
        ])?;
        wtr.flush()?;
    }
    Ok(wtr)
}

fn append_csv(wtr: &mut csv::Writer<File>, cycle: u64, report: &CycleReport) -> Result<()> {
    let snap = &report.snapshot;
    wtr.write_record([
        cycle.to_string(),
        report.completed_at.to_rfc3339(),
        csv_opt(snap.fast_rsi),
        csv_opt(snap.slow_rsi),
        csv_opt(snap.avg_price),
        snap.alert.label().to_string(),
        snap.signal.label().to_string(),
    ])?;
    wtr.flush()?;
    Ok(())
}

fn csv_opt(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.4}")).unwrap_or_default()
}

fn fmt_rsi(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.1}"),
        None => "--".to_string(),
    }
}

fn fmt_price(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.2}"),
        None => "--".to_string(),
    }
}
