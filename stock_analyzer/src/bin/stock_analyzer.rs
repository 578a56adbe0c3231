use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use market_data::providers::yahoo_chart::YahooChartProvider;
use stock_analyzer::{
    cache::SeriesCache,
    cli::{Cli, Commands},
    config::AnalyzerConfig,
    pipeline::{self, AnalysisError, AnalysisRequest, DisplayOptions},
};

fn no_data_notice(symbol: &str) {
    eprintln!("Unable to fetch data for '{symbol}'. Please check the ticker symbol and try again.");
    eprintln!("Tip: use the official ticker symbol (e.g. AAPL for Apple, MSFT for Microsoft).");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .or_else(|| shared_utils::env::var("STOCK_ANALYZER_CONFIG").ok().map(PathBuf::from));
    let config = match config_path {
        Some(path) => AnalyzerConfig::load(&path)?,
        None => AnalyzerConfig::default(),
    };

    let provider = YahooChartProvider::new(config.provider_settings())?;
    let cache = SeriesCache::from_config(&config.cache);

    match cli.command {
        Commands::Analyze {
            ticker,
            period,
            no_ma20,
            no_ma50,
            no_ma200,
            no_volume,
            no_returns,
        } => {
            let request = AnalysisRequest {
                symbol: ticker,
                period,
                options: DisplayOptions {
                    ma_20: !no_ma20,
                    ma_50: !no_ma50,
                    ma_200: !no_ma200,
                    volume: !no_volume,
                    returns: !no_returns,
                },
            };

            match pipeline::run_analysis(&provider, cache.as_ref(), &request).await {
                Ok(outcome) => println!("{}", outcome.report),
                Err(AnalysisError::NoData { symbol }) => {
                    no_data_notice(&symbol);
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }

        Commands::Export { ticker, period, out } => {
            match pipeline::run_export(&provider, cache.as_ref(), &ticker, period, &out).await {
                Ok(path) => println!("{}", path.display()),
                Err(AnalysisError::NoData { symbol }) => {
                    no_data_notice(&symbol);
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}
