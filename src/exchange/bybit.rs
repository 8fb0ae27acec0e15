use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::{
    config::BybitConfig,
    exchange::{errors::ExchangeError, http::HttpClient, traits::QuoteSource},
    types::{ExchangeQuoteSet, PriceQuote},
};

/// Bybit v5 response envelope. API failures arrive as HTTP 200 with a
/// non-zero `retCode`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: DeserializeOwned"))]
struct Envelope<T> {
    #[serde(default)]
    ret_code: i64,
    #[serde(default)]
    ret_msg: String,
    #[serde(default)]
    result: ListResult<T>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct ListResult<T> {
    #[serde(default)]
    list: Vec<T>,
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self { list: Vec::new() }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Instrument {
    symbol: String,
    #[serde(default)]
    base_coin: String,
    #[serde(default)]
    quote_coin: String,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker {
    symbol: String,
    #[serde(default)]
    bid1_price: Option<String>,
    #[serde(default)]
    ask1_price: Option<String>,
}

/// Spot quotes from Bybit: instruments listing filtered by status, joined
/// with the tickers listing.
pub struct BybitClient {
    http: HttpClient,
    config: BybitConfig,
}

impl BybitClient {
    pub fn new(http: HttpClient, config: BybitConfig) -> Self {
        Self { http, config }
    }

    async fn get_list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, ExchangeError> {
        let envelope: Envelope<T> = self.http.get_json(&self.config.name, url).await?;

        if envelope.ret_code != 0 {
            return Err(ExchangeError::Api {
                exchange: self.config.name.clone(),
                code: envelope.ret_code,
                message: envelope.ret_msg,
            });
        }

        Ok(envelope.result.list)
    }

    fn active_symbols(&self, instruments: Vec<Instrument>) -> HashSet<String> {
        instruments
            .into_iter()
            .filter(|instrument| instrument.status == self.config.active_status)
            .inspect(|instrument| {
                debug!(
                    "Active {} instrument {} ({}/{})",
                    self.config.name, instrument.symbol, instrument.base_coin, instrument.quote_coin
                )
            })
            .map(|instrument| instrument.symbol)
            .collect()
    }

    fn build_quote_set(&self, active: &HashSet<String>, tickers: Vec<Ticker>) -> ExchangeQuoteSet {
        let mut quotes = ExchangeQuoteSet::new(self.config.name.clone());

        for ticker in tickers {
            if !active.contains(&ticker.symbol) {
                continue;
            }
            if let Some(quote) = PriceQuote::from_raw(
                &ticker.symbol,
                ticker.bid1_price.as_deref().unwrap_or_default(),
                ticker.ask1_price.as_deref().unwrap_or_default(),
            ) {
                quotes.insert(quote);
            }
        }

        quotes
    }
}

#[async_trait]
impl QuoteSource for BybitClient {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn fetch_quotes(&self) -> Result<ExchangeQuoteSet, ExchangeError> {
        let instruments: Vec<Instrument> = self.get_list(&self.config.instruments_url).await?;
        let listed = instruments.len();
        let active = self.active_symbols(instruments);
        info!(
            "{}: {} of {} instruments have status {}",
            self.config.name,
            active.len(),
            listed,
            self.config.active_status
        );

        let tickers: Vec<Ticker> = self.get_list(&self.config.tickers_url).await?;
        debug!("{}: {} tickers received", self.config.name, tickers.len());

        Ok(self.build_quote_set(&active, tickers))
    }
}
