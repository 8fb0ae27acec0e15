use anyhow::{anyhow, Result};
use bigdecimal::BigDecimal;
use std::str::FromStr;
use tracing::debug;

use crate::{
    arbitrage::{
        calculator::ProfitCalculator,
        joiner::{JoinedQuotes, QuotePair},
    },
    config::ArbitrageConfig,
    types::{ArbitrageOpportunity, PriceQuote},
};

/// Scans joined quotes in both trade directions for net profit at or above
/// the configured threshold.
#[derive(Debug, Clone)]
pub struct ArbitrageDetector {
    calculator: ProfitCalculator,
    min_profit_percentage: BigDecimal,
}

impl ArbitrageDetector {
    pub fn new(config: &ArbitrageConfig) -> Result<Self> {
        let min_profit_percentage = BigDecimal::from_str(config.min_profit_percentage.trim())
            .map_err(|e| anyhow!("Invalid min_profit_percentage: {}", e))?;

        let transaction_fee = BigDecimal::from_str(config.transaction_fee.trim())
            .map_err(|e| anyhow!("Invalid transaction_fee: {}", e))?;

        Ok(Self::with_parameters(
            min_profit_percentage,
            ProfitCalculator::new(transaction_fee)?,
        ))
    }

    pub fn with_parameters(min_profit_percentage: BigDecimal, calculator: ProfitCalculator) -> Self {
        Self {
            calculator,
            min_profit_percentage,
        }
    }

    pub fn min_profit_percentage(&self) -> &BigDecimal {
        &self.min_profit_percentage
    }

    pub fn transaction_fee(&self) -> &BigDecimal {
        self.calculator.transaction_fee()
    }

    /// Every qualifying direction across the valid joined pairs, in symbol
    /// order with left-to-right before right-to-left.
    pub fn detect_opportunities(&self, joined: &JoinedQuotes<'_>) -> Vec<ArbitrageOpportunity> {
        let opportunities: Vec<ArbitrageOpportunity> = joined
            .valid_pairs()
            .flat_map(|pair| {
                self.evaluate_pair(pair, joined.left_exchange, joined.right_exchange)
            })
            .collect();

        debug!(
            "{} qualifying directions across {} pairs",
            opportunities.len(),
            joined.len()
        );

        opportunities
    }

    pub fn evaluate_pair(
        &self,
        pair: &QuotePair<'_>,
        left_exchange: &str,
        right_exchange: &str,
    ) -> Vec<ArbitrageOpportunity> {
        [
            self.evaluate_direction(pair.symbol, left_exchange, pair.left, right_exchange, pair.right),
            self.evaluate_direction(pair.symbol, right_exchange, pair.right, left_exchange, pair.left),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Buy at `buy_quote`'s ask, sell at `sell_quote`'s bid.
    pub fn evaluate_direction(
        &self,
        symbol: &str,
        buy_exchange: &str,
        buy_quote: &PriceQuote,
        sell_exchange: &str,
        sell_quote: &PriceQuote,
    ) -> Option<ArbitrageOpportunity> {
        let result = self
            .calculator
            .evaluate(&buy_quote.ask_price, &sell_quote.bid_price);

        let profit_percentage = result.profit_percentage?;
        if profit_percentage < self.min_profit_percentage {
            return None;
        }

        debug!(
            "{}: buy on {} at {}, sell on {} at {}, profit {}",
            symbol, buy_exchange, result.buy_price, sell_exchange, result.sell_price, profit_percentage
        );

        Some(ArbitrageOpportunity {
            symbol: symbol.to_string(),
            buy_exchange: buy_exchange.to_string(),
            sell_exchange: sell_exchange.to_string(),
            buy_price: result.buy_price,
            sell_price: result.sell_price,
            profit_percentage,
        })
    }
}
