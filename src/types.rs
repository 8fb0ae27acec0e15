use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

pub const PRICE_DISPLAY_SCALE: i64 = 8;
pub const PERCENT_DISPLAY_SCALE: i64 = 2;

/// Best bid/ask for one symbol on one exchange. Both prices are strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub symbol: String,
    pub bid_price: BigDecimal,
    pub ask_price: BigDecimal,
}

impl PriceQuote {
    /// Builds a quote from the string-encoded prices an exchange publishes.
    /// Returns `None` when either side is unparsable, zero or negative.
    pub fn from_raw(symbol: &str, bid: &str, ask: &str) -> Option<Self> {
        let bid_price = parse_price(bid)?;
        let ask_price = parse_price(ask)?;

        Some(Self {
            symbol: symbol.to_string(),
            bid_price,
            ask_price,
        })
    }

    pub fn has_positive_prices(&self) -> bool {
        let zero = BigDecimal::from(0);
        self.bid_price > zero && self.ask_price > zero
    }
}

fn parse_price(raw: &str) -> Option<BigDecimal> {
    let price = BigDecimal::from_str(raw).ok()?;
    if price > BigDecimal::from(0) {
        Some(price)
    } else {
        None
    }
}

/// Symbol-keyed quotes retrieved from a single exchange in one run.
#[derive(Debug, Clone)]
pub struct ExchangeQuoteSet {
    pub exchange: String,
    pub fetched_at: DateTime<Utc>,
    quotes: BTreeMap<String, PriceQuote>,
}

impl ExchangeQuoteSet {
    pub fn new(exchange: impl Into<String>) -> Self {
        Self {
            exchange: exchange.into(),
            fetched_at: Utc::now(),
            quotes: BTreeMap::new(),
        }
    }

    pub fn with_quotes<I>(exchange: impl Into<String>, quotes: I) -> Self
    where
        I: IntoIterator<Item = PriceQuote>,
    {
        let mut set = Self::new(exchange);
        for quote in quotes {
            set.insert(quote);
        }
        set
    }

    /// A later quote for the same symbol replaces the earlier one.
    pub fn insert(&mut self, quote: PriceQuote) {
        self.quotes.insert(quote.symbol.clone(), quote);
    }

    pub fn get(&self, symbol: &str) -> Option<&PriceQuote> {
        self.quotes.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.quotes.contains_key(symbol)
    }

    /// Quotes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = &PriceQuote> {
        self.quotes.values()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

/// A profitable trade direction for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    pub symbol: String,
    pub buy_exchange: String,
    pub sell_exchange: String,
    /// Ask on the buy side with the fee added.
    pub buy_price: BigDecimal,
    /// Bid on the sell side with the fee removed.
    pub sell_price: BigDecimal,
    /// Net profit as a fraction of the buy price (0.02 == 2%).
    pub profit_percentage: BigDecimal,
}

impl ArbitrageOpportunity {
    pub fn display_buy_price(&self) -> String {
        format_price(&self.buy_price)
    }

    pub fn display_sell_price(&self) -> String {
        format_price(&self.sell_price)
    }

    pub fn display_profit(&self) -> String {
        format_percentage(&self.profit_percentage)
    }
}

pub fn format_price(price: &BigDecimal) -> String {
    fixed(price, PRICE_DISPLAY_SCALE)
}

/// Renders a fraction as a percentage, e.g. `0.027942` -> `"2.79"`.
pub fn format_percentage(fraction: &BigDecimal) -> String {
    fixed(&(fraction * BigDecimal::from(100)), PERCENT_DISPLAY_SCALE)
}

fn fixed(value: &BigDecimal, scale: i64) -> String {
    value.round(scale).with_scale(scale).to_string()
}
