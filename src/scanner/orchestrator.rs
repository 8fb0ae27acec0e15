use anyhow::{Context, Result};
use tracing::info;

use crate::{
    arbitrage::{join_quote_sets, ArbitrageDetector},
    config::Config,
    exchange::{create_quote_source, HttpClient, QuoteSource},
    scanner::report::ScanReport,
};

/// Runs one comparison: fetch both sides, join, evaluate, build the report.
pub struct ArbitrageScanner {
    left: Box<dyn QuoteSource>,
    right: Box<dyn QuoteSource>,
    detector: ArbitrageDetector,
    sample_limit: usize,
}

impl ArbitrageScanner {
    pub fn new(config: &Config) -> Result<Self> {
        info!("Initializing arbitrage scanner");

        let http = HttpClient::new(&config.http)?;
        let left = create_quote_source(&config.scanner.left, http.clone(), &config.exchanges)?;
        let right = create_quote_source(&config.scanner.right, http, &config.exchanges)?;
        let detector = ArbitrageDetector::new(&config.arbitrage)?;

        info!(
            "Comparing {} against {} (min profit {}, fee {} per leg)",
            left.name(),
            right.name(),
            detector.min_profit_percentage(),
            detector.transaction_fee()
        );

        Ok(Self::with_sources(
            left,
            right,
            detector,
            config.report.sample_limit,
        ))
    }

    pub fn with_sources(
        left: Box<dyn QuoteSource>,
        right: Box<dyn QuoteSource>,
        detector: ArbitrageDetector,
        sample_limit: usize,
    ) -> Self {
        Self {
            left,
            right,
            detector,
            sample_limit,
        }
    }

    /// Any fetch failure aborts the scan; nothing partial is returned.
    pub async fn run(&self) -> Result<ScanReport> {
        let left_quotes = self
            .left
            .fetch_quotes()
            .await
            .with_context(|| format!("Failed to fetch quotes from {}", self.left.name()))?;
        info!("Retrieved {} pairs from {}", left_quotes.len(), self.left.name());

        let right_quotes = self
            .right
            .fetch_quotes()
            .await
            .with_context(|| format!("Failed to fetch quotes from {}", self.right.name()))?;
        info!("Retrieved {} pairs from {}", right_quotes.len(), self.right.name());

        let joined = join_quote_sets(&left_quotes, &right_quotes);
        let opportunities = self.detector.detect_opportunities(&joined);

        info!("Compared {} pairs", joined.len());
        info!("Found {} arbitrage opportunities", opportunities.len());

        Ok(ScanReport::build(
            &left_quotes,
            &right_quotes,
            &joined,
            &self.detector,
            opportunities,
            self.sample_limit,
        ))
    }
}
