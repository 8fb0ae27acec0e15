pub mod calculator;
pub mod detector;
pub mod joiner;

pub use calculator::{DirectionalProfit, ProfitCalculator};
pub use detector::ArbitrageDetector;
pub use joiner::{join_quote_sets, JoinedQuotes, QuotePair};
