use async_trait::async_trait;

use crate::{exchange::errors::ExchangeError, types::ExchangeQuoteSet};

/// Produces a normalized quote set for one exchange.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_quotes(&self) -> Result<ExchangeQuoteSet, ExchangeError>;
}
