pub mod binance;
pub mod bybit;
pub mod errors;
pub mod http;
pub mod traits;

pub use binance::BinanceClient;
pub use bybit::BybitClient;
pub use errors::ExchangeError;
pub use http::HttpClient;
pub use traits::*;

use anyhow::{anyhow, Result};

use crate::config::ExchangesConfig;

/// Builds the quote source registered under `key` ("bybit" or "binance").
pub fn create_quote_source(
    key: &str,
    http: HttpClient,
    configs: &ExchangesConfig,
) -> Result<Box<dyn QuoteSource>> {
    match key {
        "bybit" => Ok(Box::new(BybitClient::new(http, configs.bybit.clone()))),
        "binance" => Ok(Box::new(BinanceClient::new(http, configs.binance.clone()))),
        other => Err(anyhow!("Unknown exchange configuration: {}", other)),
    }
}
