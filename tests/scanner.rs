use async_trait::async_trait;
use spot_arbitrage_scanner::{
    arbitrage::ArbitrageDetector,
    config::{ArbitrageConfig, ReportFormat},
    exchange::{ExchangeError, QuoteSource},
    scanner::{ArbitrageScanner, Reporter, ScanReport},
    types::{ExchangeQuoteSet, PriceQuote},
};

struct StaticSource {
    name: String,
    quotes: Vec<RawQuote>,
}

type RawQuote = (&'static str, &'static str, &'static str);

impl StaticSource {
    fn boxed(name: &str, quotes: Vec<RawQuote>) -> Box<dyn QuoteSource> {
        Box::new(Self {
            name: name.to_string(),
            quotes,
        })
    }
}

#[async_trait]
impl QuoteSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_quotes(&self) -> Result<ExchangeQuoteSet, ExchangeError> {
        let quotes = self
            .quotes
            .iter()
            .filter_map(|(symbol, bid, ask)| PriceQuote::from_raw(symbol, bid, ask));
        Ok(ExchangeQuoteSet::with_quotes(self.name.clone(), quotes))
    }
}

struct DownSource;

#[async_trait]
impl QuoteSource for DownSource {
    fn name(&self) -> &str {
        "Binance"
    }

    async fn fetch_quotes(&self) -> Result<ExchangeQuoteSet, ExchangeError> {
        Err(ExchangeError::Api {
            exchange: "Binance".to_string(),
            code: -1003,
            message: "Too many requests.".to_string(),
        })
    }
}

fn detector(min_profit: &str) -> ArbitrageDetector {
    ArbitrageDetector::new(&ArbitrageConfig {
        min_profit_percentage: min_profit.to_string(),
        transaction_fee: "0.001".to_string(),
    })
    .unwrap()
}

fn render(report: &ScanReport) -> String {
    let mut out = Vec::new();
    Reporter::new(ReportFormat::Text)
        .write(report, &mut out)
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_scan_reports_opportunities_in_both_directions() {
    let bybit = StaticSource::boxed(
        "Bybit",
        vec![
            ("BTCUSDT", "99", "100"),
            ("ETHUSDT", "3200", "3201"),
            ("DOGEUSDT", "0", "0.12"),
            ("MNTUSDT", "0.90", "0.91"),
        ],
    );
    let binance = StaticSource::boxed(
        "Binance",
        vec![
            ("BTCUSDT", "103", "104"),
            ("ETHUSDT", "3100", "3101"),
            ("DOGEUSDT", "0.11", "0.12"),
            ("BNBUSDT", "580", "581"),
        ],
    );

    let scanner = ArbitrageScanner::with_sources(bybit, binance, detector("0.01"), 5);
    let report = scanner.run().await.unwrap();

    assert_eq!(report.left.quotes_retrieved, 3);
    assert_eq!(report.right.quotes_retrieved, 4);
    assert_eq!(report.pairs_compared, 2);
    assert_eq!(report.opportunities_found(), 2);
    assert!(report.samples.is_empty());

    let btc = &report.opportunities[0];
    assert_eq!(btc.symbol, "BTCUSDT");
    assert_eq!(btc.buy_exchange, "Bybit");
    assert_eq!(btc.sell_exchange, "Binance");
    assert_eq!(btc.display_profit(), "2.79");

    let eth = &report.opportunities[1];
    assert_eq!(eth.symbol, "ETHUSDT");
    assert_eq!(eth.buy_exchange, "Binance");
    assert_eq!(eth.sell_exchange, "Bybit");

    let text = render(&report);
    assert!(text.contains("Retrieved 3 pairs from Bybit"));
    assert!(text.contains("  Buy from Bybit at 100.10000000"));
    assert!(text.contains("Compared 2 pairs"));
    assert!(text.contains("Found 2 arbitrage opportunities"));
    assert!(!text.contains("Sample comparison"));
}

#[tokio::test]
async fn test_quiet_market_prints_samples() {
    let symbols = [
        "AAVEUSDT", "ADAUSDT", "BTCUSDT", "DOTUSDT", "ETHUSDT", "LINKUSDT", "SOLUSDT",
    ];
    let quotes: Vec<_> = symbols.iter().map(|s| (*s, "10.00", "10.01")).collect();
    let bybit = StaticSource::boxed("Bybit", quotes.clone());
    let binance = StaticSource::boxed("Binance", quotes);

    let scanner = ArbitrageScanner::with_sources(bybit, binance, detector("0.02"), 5);
    let report = scanner.run().await.unwrap();

    assert_eq!(report.pairs_compared, 7);
    assert_eq!(report.opportunities_found(), 0);
    assert_eq!(report.samples.len(), 5);

    let text = render(&report);
    assert_eq!(text.matches("Sample comparison for").count(), 5);
    assert!(text.contains("Sample comparison for AAVEUSDT:"));
    assert!(!text.contains("Sample comparison for LINKUSDT:"));
    assert!(text.contains("meeting the 2.00% profit threshold."));
}

#[tokio::test]
async fn test_source_failure_aborts_scan() {
    let bybit = StaticSource::boxed("Bybit", vec![("BTCUSDT", "99", "100")]);
    let scanner =
        ArbitrageScanner::with_sources(bybit, Box::new(DownSource), detector("0.01"), 5);

    let err = scanner.run().await.unwrap_err();
    let message = format!("{:#}", err);

    assert!(message.contains("Failed to fetch quotes from Binance"));
    assert!(message.contains("Too many requests."));
    let failure = err.downcast_ref::<ExchangeError>().unwrap();
    assert_eq!(failure.exchange(), "Binance");
}
