use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub scanner: ScannerConfig,
    pub exchanges: ExchangesConfig,
    pub arbitrage: ArbitrageConfig,
    pub http: HttpConfig,
    pub report: ReportConfig,
}

/// Which configured exchanges play the left and right side of the comparison.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScannerConfig {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangesConfig {
    pub bybit: BybitConfig,
    pub binance: BinanceConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BybitConfig {
    pub name: String,
    pub instruments_url: String,
    pub tickers_url: String,
    pub active_status: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BinanceConfig {
    pub name: String,
    pub book_ticker_url: String,
}

/// Decimal settings stay strings until the detector parses them.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ArbitrageConfig {
    pub min_profit_percentage: String,
    pub transaction_fee: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReportConfig {
    pub format: ReportFormat,
    pub sample_limit: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("SCANNER")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Built-in defaults with `overrides` (TOML) layered on top.
    pub fn from_toml_str(overrides: &str) -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .add_source(config::File::from_str(overrides, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }
}
