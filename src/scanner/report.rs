use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    arbitrage::{ArbitrageDetector, JoinedQuotes, QuotePair},
    types::{ArbitrageOpportunity, ExchangeQuoteSet},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSummary {
    pub exchange: String,
    pub quotes_retrieved: usize,
    pub fetched_at: DateTime<Utc>,
}

impl SourceSummary {
    pub fn from_quotes(quotes: &ExchangeQuoteSet) -> Self {
        Self {
            exchange: quotes.exchange.clone(),
            quotes_retrieved: quotes.len(),
            fetched_at: quotes.fetched_at,
        }
    }
}

/// Raw quotes from both sides for one joined symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleComparison {
    pub symbol: String,
    pub left_exchange: String,
    pub left_bid: BigDecimal,
    pub left_ask: BigDecimal,
    pub right_exchange: String,
    pub right_bid: BigDecimal,
    pub right_ask: BigDecimal,
}

impl SampleComparison {
    fn from_pair(pair: &QuotePair<'_>, left_exchange: &str, right_exchange: &str) -> Self {
        Self {
            symbol: pair.symbol.to_string(),
            left_exchange: left_exchange.to_string(),
            left_bid: pair.left.bid_price.clone(),
            left_ask: pair.left.ask_price.clone(),
            right_exchange: right_exchange.to_string(),
            right_bid: pair.right.bid_price.clone(),
            right_ask: pair.right.ask_price.clone(),
        }
    }
}

/// Outcome of one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub generated_at: DateTime<Utc>,
    pub left: SourceSummary,
    pub right: SourceSummary,
    pub pairs_compared: usize,
    pub min_profit_percentage: BigDecimal,
    pub transaction_fee: BigDecimal,
    pub opportunities: Vec<ArbitrageOpportunity>,
    /// Only filled when nothing was found.
    pub samples: Vec<SampleComparison>,
}

impl ScanReport {
    pub fn build(
        left: &ExchangeQuoteSet,
        right: &ExchangeQuoteSet,
        joined: &JoinedQuotes<'_>,
        detector: &ArbitrageDetector,
        opportunities: Vec<ArbitrageOpportunity>,
        sample_limit: usize,
    ) -> Self {
        let samples = if opportunities.is_empty() {
            joined
                .pairs()
                .iter()
                .take(sample_limit)
                .map(|pair| {
                    SampleComparison::from_pair(pair, joined.left_exchange, joined.right_exchange)
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            generated_at: Utc::now(),
            left: SourceSummary::from_quotes(left),
            right: SourceSummary::from_quotes(right),
            pairs_compared: joined.len(),
            min_profit_percentage: detector.min_profit_percentage().clone(),
            transaction_fee: detector.transaction_fee().clone(),
            opportunities,
            samples,
        }
    }

    pub fn opportunities_found(&self) -> usize {
        self.opportunities.len()
    }
}
