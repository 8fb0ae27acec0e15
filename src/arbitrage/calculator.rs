use anyhow::{anyhow, Result};
use bigdecimal::BigDecimal;
use tracing::debug;

/// Fee-adjusted prices and net profit for one trade direction.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalProfit {
    pub buy_price: BigDecimal,
    pub sell_price: BigDecimal,
    /// `None` when the effective buy price is not positive.
    pub profit_percentage: Option<BigDecimal>,
}

/// Applies a per-leg transaction fee to both sides of a trade.
#[derive(Debug, Clone)]
pub struct ProfitCalculator {
    transaction_fee: BigDecimal,
}

impl ProfitCalculator {
    pub fn new(transaction_fee: BigDecimal) -> Result<Self> {
        if transaction_fee < BigDecimal::from(0) || transaction_fee >= BigDecimal::from(1) {
            return Err(anyhow!(
                "transaction_fee must be within [0, 1), got {}",
                transaction_fee
            ));
        }

        Ok(Self { transaction_fee })
    }

    pub fn transaction_fee(&self) -> &BigDecimal {
        &self.transaction_fee
    }

    /// What buying at `ask` really costs once the fee is paid.
    pub fn effective_buy_price(&self, ask: &BigDecimal) -> BigDecimal {
        ask * (BigDecimal::from(1) + &self.transaction_fee)
    }

    /// What selling at `bid` really returns once the fee is paid.
    pub fn effective_sell_price(&self, bid: &BigDecimal) -> BigDecimal {
        bid * (BigDecimal::from(1) - &self.transaction_fee)
    }

    /// Net profit as a fraction of the buy price.
    pub fn profit_percentage(
        &self,
        buy_price: &BigDecimal,
        sell_price: &BigDecimal,
    ) -> Option<BigDecimal> {
        if *buy_price <= BigDecimal::from(0) {
            return None;
        }

        Some((sell_price - buy_price) / buy_price)
    }

    /// Buy at `ask` on one exchange, sell at `bid` on the other.
    pub fn evaluate(&self, ask: &BigDecimal, bid: &BigDecimal) -> DirectionalProfit {
        let buy_price = self.effective_buy_price(ask);
        let sell_price = self.effective_sell_price(bid);
        let profit_percentage = self.profit_percentage(&buy_price, &sell_price);

        debug!(
            "ask={} bid={} fee={} -> buy={}, sell={}, profit={:?}",
            ask, bid, self.transaction_fee, buy_price, sell_price, profit_percentage
        );

        DirectionalProfit {
            buy_price,
            sell_price,
            profit_percentage,
        }
    }
}
