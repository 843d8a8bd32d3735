use std::path::{Path, PathBuf};

use anyhow::Context;

use market_pulse::analysis::MarketAnalyzer;
use market_pulse::binance::types::into_trades;
use market_pulse::binance::{MarketDataClient, MarketKind};
use market_pulse::report::{self, formatter};

#[derive(Debug, Clone)]
struct CliOptions {
    symbol: String,
    limit: u32,
    market: MarketKind,
    mode: String,
    export_dir: Option<PathBuf>,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            symbol: "BTCUSDT".to_string(),
            limit: 1000,
            market: MarketKind::Spot,
            mode: "market".to_string(),
            export_dir: None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    run(options).await
}

async fn run(options: CliOptions) -> anyhow::Result<()> {
    let client = match options.market {
        MarketKind::Spot => MarketDataClient::spot(),
        MarketKind::Futures => MarketDataClient::futures(),
    };
    let analyzer = MarketAnalyzer::new();

    tracing::info!(
        symbol = %options.symbol,
        mode = %options.mode,
        base_url = client.base_url(),
        "Fetching market data"
    );

    match options.mode.as_str() {
        "book" => run_book(&client, &analyzer, &options).await,
        "trades" => run_trades(&client, &analyzer, &options).await,
        "market" => run_market(&client, &analyzer, &options).await,
        "all" => {
            run_market(&client, &analyzer, &options).await?;
            run_book(&client, &analyzer, &options).await?;
            run_trades(&client, &analyzer, &options).await
        }
        other => anyhow::bail!("Invalid mode: {}", other),
    }
}

/// Order-book-only heuristic report.
async fn run_book(
    client: &MarketDataClient,
    analyzer: &MarketAnalyzer,
    options: &CliOptions,
) -> anyhow::Result<()> {
    let snapshot = client
        .get_depth(&options.symbol, Some(options.limit))
        .await?;
    let book = snapshot.into_order_book()?;
    let report = analyzer.order_book_report(&book)?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    let rationale = report::render_book_rationale(&report, &analyzer.config().book);
    emit_rationale(&rationale, "order_book_rationale.md", options)
}

/// Trade-only heuristic report.
async fn run_trades(
    client: &MarketDataClient,
    analyzer: &MarketAnalyzer,
    options: &CliOptions,
) -> anyhow::Result<()> {
    let raw = client
        .get_recent_trades(&options.symbol, Some(options.limit))
        .await?;
    let trades = into_trades(raw)?;
    let report = analyzer.trade_report(&trades)?;

    tracing::info!(
        trade_count = report.trade_count,
        last_trade = %formatter::format_timestamp(report.last_trade_time),
        trader_type = %report.profile.trader_type,
        "Trade tape analyzed"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);

    let rationale =
        report::render_trade_rationale(&report, &analyzer.config().tape, &options.symbol);
    emit_rationale(&rationale, "trades_rationale.md", options)
}

/// Combined seven-metric market report.
async fn run_market(
    client: &MarketDataClient,
    analyzer: &MarketAnalyzer,
    options: &CliOptions,
) -> anyhow::Result<()> {
    let (depth_result, trades_result) = tokio::join!(
        client.get_depth(&options.symbol, Some(options.limit)),
        client.get_recent_trades(&options.symbol, Some(options.limit)),
    );

    let book = depth_result?.into_order_book()?;
    let trades = into_trades(trades_result?)?;
    let report = analyzer.market_report(&book, &trades)?;

    println!("{}", report::render_market_report(&report, &options.symbol));
    Ok(())
}

/// Print the rationale, or write it into the export directory when one was
/// requested.
fn emit_rationale(rationale: &str, file_name: &str, options: &CliOptions) -> anyhow::Result<()> {
    match &options.export_dir {
        Some(dir) => {
            let path = write_export(dir, file_name, rationale)?;
            tracing::info!(path = %path.display(), "Rationale exported");
        }
        None => println!("\n{}", rationale),
    }
    Ok(())
}

fn write_export(dir: &Path, file_name: &str, content: &str) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    let path = dir.join(file_name);
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Parse command-line arguments
fn parse_args(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--symbol" => {
                if i + 1 < args.len() {
                    options.symbol = args[i + 1].to_uppercase();
                    i += 1;
                }
            }
            "--limit" => {
                if i + 1 < args.len() {
                    options.limit = args[i + 1].parse().unwrap_or(options.limit);
                    i += 1;
                }
            }
            "--mode" => {
                if i + 1 < args.len() {
                    options.mode = args[i + 1].clone();
                    i += 1;
                }
            }
            "--futures" => options.market = MarketKind::Futures,
            "--spot" => options.market = MarketKind::Spot,
            "--export" => {
                if i + 1 < args.len() {
                    options.export_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if !matches!(options.mode.as_str(), "book" | "trades" | "market" | "all") {
        eprintln!("Invalid mode: {}", options.mode);
        print_usage();
        std::process::exit(1);
    }

    options
}

/// Print usage information
fn print_usage() {
    println!("market-pulse - order book and trade tape analyzer");
    println!();
    println!("USAGE:");
    println!("    market-pulse [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --symbol <SYMBOL>   Trading pair (default: BTCUSDT)");
    println!("    --limit <N>         Levels/trades to fetch (default: 1000)");
    println!("    --spot              Use the spot API (default)");
    println!("    --futures           Use the USD-M futures API");
    println!("    --mode <MODE>       book | trades | market | all (default: market)");
    println!("    --export <DIR>      Write rationale markdown into DIR instead of stdout");
    println!("    --help, -h          Show this help");
}
