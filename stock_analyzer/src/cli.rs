use std::path::PathBuf;

use clap::{Parser, Subcommand};

use market_data::models::period::Period;

#[derive(Parser)]
#[command(version, about = "Descriptive stock analysis from daily bars")]
pub struct Cli {
    /// Path to the TOML config file.
    ///
    /// Falls back to $STOCK_ANALYZER_CONFIG, then to built-in defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch history for a ticker and print the metrics report
    Analyze {
        /// Ticker symbol (e.g. AAPL); case-insensitive
        ticker: String,

        /// Historical range: 1mo, 3mo, 6mo, 1y, 2y, 5y, max
        #[arg(long, default_value = "1y")]
        period: Period,

        /// Hide the 20-day moving average overlay
        #[arg(long)]
        no_ma20: bool,

        /// Hide the 50-day moving average overlay
        #[arg(long)]
        no_ma50: bool,

        /// Hide the 200-day moving average overlay
        #[arg(long)]
        no_ma200: bool,

        /// Skip the volume chart inputs
        #[arg(long)]
        no_volume: bool,

        /// Skip returns analysis (statistics block and chart inputs)
        #[arg(long)]
        no_returns: bool,
    },

    /// Export raw history for a ticker as a CSV file
    Export {
        /// Ticker symbol (e.g. AAPL); case-insensitive
        ticker: String,

        /// Historical range: 1mo, 3mo, 6mo, 1y, 2y, 5y, max
        #[arg(long, default_value = "1y")]
        period: Period,

        /// Directory the CSV file is written into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}
