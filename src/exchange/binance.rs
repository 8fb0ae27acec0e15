use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::BinanceConfig,
    exchange::{errors::ExchangeError, http::HttpClient, traits::QuoteSource},
    types::{ExchangeQuoteSet, PriceQuote},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookTicker {
    symbol: String,
    #[serde(default)]
    bid_price: Option<String>,
    #[serde(default)]
    ask_price: Option<String>,
}

/// Spot quotes from Binance's book ticker, a single listing with bid/ask per symbol.
pub struct BinanceClient {
    http: HttpClient,
    config: BinanceConfig,
}

impl BinanceClient {
    pub fn new(http: HttpClient, config: BinanceConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl QuoteSource for BinanceClient {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn fetch_quotes(&self) -> Result<ExchangeQuoteSet, ExchangeError> {
        let tickers: Vec<BookTicker> = self
            .http
            .get_json(&self.config.name, &self.config.book_ticker_url)
            .await?;
        debug!("{}: {} book tickers received", self.config.name, tickers.len());

        let quotes = tickers.iter().filter_map(|ticker| {
            PriceQuote::from_raw(
                &ticker.symbol,
                ticker.bid_price.as_deref().unwrap_or_default(),
                ticker.ask_price.as_deref().unwrap_or_default(),
            )
        });

        Ok(ExchangeQuoteSet::with_quotes(self.config.name.clone(), quotes))
    }
}
