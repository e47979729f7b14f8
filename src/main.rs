mod app;
mod catalog;
mod config;
mod forecast;
mod market;
mod query;
mod rng;
mod training;
mod tui;
mod ui;

use anyhow::{Context, Result, bail};
use app::{App, StockView};
use catalog::{SelectedStock, StockRecord};
use chrono::Local;
use clap::Parser;
use config::AppConfig;
use query::SortKey;
use rng::RandSource;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "SynthStock-TUI: stock dashboard, simulated model training and price forecasts on synthetic data",
    after_help = "EXAMPLES:
    # Open the dashboard with Apple preselected and a training image queued
    cargo run --release -- --symbol AAPL --image charts/aapl_1y.png

    # Reproducible run
    cargo run --release -- --seed 42

    # Dump generated data for one stock as JSON
    cargo run --release -- --export NVDA --seed 7

    # List large-cap technology stocks by change
    cargo run --release -- --list --sector Technology --min-cap 500B --sort change"
)]
struct Args {
    /// Preselect this symbol on startup
    #[arg(long)]
    symbol: Option<String>,

    /// Seed for the synthetic generators (overrides SYNTHSTOCK_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Training tick interval in milliseconds (overrides SYNTHSTOCK_TICK_MS)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Chart image to queue for training. Repeatable.
    #[arg(long = "image")]
    images: Vec<PathBuf>,

    /// Initial sort order of the stock list
    #[arg(long, value_enum, default_value_t = SortKey::Symbol)]
    sort: SortKey,

    /// Print generated history, indicators and forecast for SYMBOL as JSON and exit
    #[arg(long, value_name = "SYMBOL")]
    export: Option<String>,

    /// Print the filtered catalog and exit
    #[arg(long)]
    list: bool,

    /// Free-text search over symbol and name (with --list)
    #[arg(long, default_value = "")]
    query: String,

    /// Exact exchange filter, e.g. NASDAQ (with --list)
    #[arg(long, default_value = "")]
    exchange: String,

    /// Exact sector filter, e.g. Technology (with --list)
    #[arg(long, default_value = "")]
    sector: String,

    /// Minimum market cap such as 500B or 1.5T (with --list)
    #[arg(long)]
    min_cap: Option<String>,
}

impl Args {
    fn is_interactive(&self) -> bool {
        self.export.is_none() && !self.list
    }
}

fn init_logging(interactive: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("synthstock_tui=info"));

    if interactive {
        // The TUI owns stdout, so logs go to a file.
        let log_dir = config::log_dir();
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("creating {}", log_dir.display()))?;
        let file_name = format!("synthstock_{}.log", Local::now().format("%Y%m%d_%H%M%S"));
        let file_path = log_dir.join(file_name);
        let file = std::fs::File::create(&file_path)
            .with_context(|| format!("creating {}", file_path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StockExport {
    stock: SelectedStock,
    seed: Option<u64>,
    #[serde(flatten)]
    view: StockView,
}

fn export_stock(symbol: &str, config: &AppConfig) -> Result<String> {
    let Some(record) = catalog::find_by_symbol(symbol) else {
        bail!("Symbol {} is not in the catalog", symbol);
    };
    let stock = SelectedStock::from(record);
    let mut rng = RandSource::from_seed_option(config.seed);
    let view = StockView::generate(&stock, Local::now().date_naive(), &mut rng);
    info!(
        "Exporting {} ({} bars, {} forecast points)",
        stock.symbol,
        view.history.len(),
        view.forecast.len()
    );

    let export = StockExport {
        stock,
        seed: config.seed,
        view,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

fn list_stocks(args: &Args) -> Result<Vec<&'static StockRecord>> {
    let mut stocks = query::search_and_sort(
        catalog::all(),
        &args.query,
        &args.exchange,
        &args.sector,
        args.sort,
    );
    if let Some(min_cap) = &args.min_cap {
        query::parse_market_cap(min_cap).with_context(|| format!("--min-cap {}", min_cap))?;
        let large = query::filter_by_min_market_cap(catalog::all(), min_cap);
        stocks.retain(|s| large.iter().any(|l| std::ptr::eq(*l, *s)));
    }
    Ok(stocks)
}

fn print_listing(stocks: &[&StockRecord]) {
    println!(
        "{:<6} {:<32} {:<7} {:<24} {:>10} {:>8} {:>12} {:>6}",
        "SYMBOL", "NAME", "EXCH", "SECTOR", "PRICE", "CHG%", "VOLUME", "CAP"
    );
    for s in stocks {
        println!(
            "{:<6} {:<32} {:<7} {:<24} {:>10.2} {:>+8.2} {:>12} {:>6}",
            s.symbol,
            s.name,
            s.exchange,
            s.sector,
            s.price,
            s.change_percent,
            s.volume,
            s.market_cap
        );
    }
    println!("{} stock(s)", stocks.len());

    let all = catalog::all();
    let exchanges: Vec<String> = query::distinct_exchanges(all)
        .into_iter()
        .map(|e| format!("{} {}", e, query::filter_by_exchange(all, e).len()))
        .collect();
    let sectors: Vec<String> = query::distinct_sectors(all)
        .into_iter()
        .map(|s| format!("{} {}", s, query::filter_by_sector(all, s).len()))
        .collect();
    println!();
    println!("Exchanges:   {}", exchanges.join(", "));
    println!("Sectors:     {}", sectors.join(", "));
    println!("Industries:  {}", query::distinct_industries(all).len());

    let join = |list: Vec<&StockRecord>| {
        list.iter()
            .take(config::MOVERS_TOP_N)
            .map(|s| format!("{} {:+.2}%", s.symbol, s.change_percent))
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!();
    println!("Top gainers: {}", join(query::top_gainers(all)));
    println!("Top losers:  {}", join(query::top_losers(all)));
    println!("Most active: {}", join(query::most_active(all)));
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_logging(args.is_interactive())?;

    let config = AppConfig::from_env().with_overrides(args.tick_ms, args.seed);
    config.log_summary();

    if let Some(symbol) = &args.export {
        println!("{}", export_stock(symbol, &config)?);
        return Ok(());
    }

    if args.list {
        let stocks = list_stocks(&args)?;
        print_listing(&stocks);
        return Ok(());
    }

    let mut app = App::new(config);
    app.selector.sort = args.sort;
    if let Some(symbol) = &args.symbol {
        app.select_symbol(symbol);
    }
    if !args.images.is_empty() {
        app.add_images(&args.images);
    }

    let mut terminal = tui::init()?;
    let res = app.run(&mut terminal).await;

    tui::restore()?;

    if let Err(e) = res {
        error!("Error: {:?}", e);
        return Err(e.into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("synthstock-tui").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_flags() {
        let args = parse(&[
            "--symbol", "AAPL", "--image", "a.png", "--image", "b.png", "--sort", "change",
        ]);
        assert_eq!(args.symbol.as_deref(), Some("AAPL"));
        assert_eq!(args.images.len(), 2);
        assert_eq!(args.sort, SortKey::ChangePercent);
        assert!(args.is_interactive());

        assert!(!parse(&["--list"]).is_interactive());
        assert!(!parse(&["--export", "KO"]).is_interactive());
    }

    #[test]
    fn test_export_is_seeded_json() {
        let config = AppConfig {
            seed: Some(11),
            ..AppConfig::default()
        };
        let first = export_stock("nvda", &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&first).unwrap();
        assert_eq!(value["stock"]["symbol"], "NVDA");
        assert_eq!(value["history"].as_array().unwrap().len(), 31);
        assert_eq!(value["forecast"].as_array().unwrap().len(), 30);
        assert!(value["indicators"]["rsi"].is_number());

        assert_eq!(first, export_stock("NVDA", &config).unwrap());
        assert!(export_stock("ZZZZ", &config).is_err());
    }

    #[test]
    fn test_list_filters_by_min_cap() {
        let args = parse(&["--list", "--sector", "Technology", "--min-cap", "1T"]);
        let stocks = list_stocks(&args).unwrap();
        assert!(!stocks.is_empty());
        assert!(stocks.iter().all(|s| s.sector == "Technology" && s.market_cap.ends_with('T')));

        let bad = parse(&["--list", "--min-cap", "lots"]);
        assert!(list_stocks(&bad).is_err());
    }
}
