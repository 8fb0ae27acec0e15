use tracing::info;

use crate::types::{ExchangeQuoteSet, PriceQuote};

/// Quotes for one symbol listed on both exchanges.
#[derive(Debug, Clone, Copy)]
pub struct QuotePair<'a> {
    pub symbol: &'a str,
    pub left: &'a PriceQuote,
    pub right: &'a PriceQuote,
}

impl QuotePair<'_> {
    /// All four prices must be positive before the pair is evaluated.
    pub fn is_valid(&self) -> bool {
        self.left.has_positive_prices() && self.right.has_positive_prices()
    }
}

/// The symbol intersection of two quote sets, in ascending symbol order.
#[derive(Debug)]
pub struct JoinedQuotes<'a> {
    pub left_exchange: &'a str,
    pub right_exchange: &'a str,
    pairs: Vec<QuotePair<'a>>,
}

impl<'a> JoinedQuotes<'a> {
    pub fn pairs(&self) -> &[QuotePair<'a>] {
        &self.pairs
    }

    /// Pairs that pass the price re-check.
    pub fn valid_pairs(&self) -> impl Iterator<Item = &QuotePair<'a>> {
        self.pairs.iter().filter(|pair| pair.is_valid())
    }

    /// Number of symbols present on both exchanges.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Joins on exact symbol equality. Symbols spelled differently on the two
/// exchanges do not match.
pub fn join_quote_sets<'a>(
    left: &'a ExchangeQuoteSet,
    right: &'a ExchangeQuoteSet,
) -> JoinedQuotes<'a> {
    let pairs: Vec<QuotePair<'a>> = left
        .iter()
        .filter_map(|left_quote| {
            right.get(&left_quote.symbol).map(|right_quote| QuotePair {
                symbol: left_quote.symbol.as_str(),
                left: left_quote,
                right: right_quote,
            })
        })
        .collect();

    info!(
        "Comparing {} {} pairs with {} {} pairs: {} symbols in common",
        left.len(),
        left.exchange,
        right.len(),
        right.exchange,
        pairs.len()
    );

    JoinedQuotes {
        left_exchange: &left.exchange,
        right_exchange: &right.exchange,
        pairs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn quote(symbol: &str, bid: &str, ask: &str) -> PriceQuote {
        PriceQuote::from_raw(symbol, bid, ask).unwrap()
    }

    #[test]
    fn test_join_is_symbol_intersection() {
        let left = ExchangeQuoteSet::with_quotes(
            "Bybit",
            vec![
                quote("BTCUSDT", "64000", "64001"),
                quote("ETHUSDT", "3100", "3101"),
                quote("MNTUSDT", "0.9", "0.91"),
            ],
        );
        let right = ExchangeQuoteSet::with_quotes(
            "Binance",
            vec![
                quote("ETHUSDT", "3102", "3103"),
                quote("BTCUSDT", "64002", "64003"),
                quote("BNBUSDT", "580", "581"),
            ],
        );

        let joined = join_quote_sets(&left, &right);

        let symbols: Vec<&str> = joined.pairs().iter().map(|p| p.symbol).collect();
        assert_eq!(symbols, vec!["BTCUSDT", "ETHUSDT"]);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined.left_exchange, "Bybit");
        assert_eq!(joined.right_exchange, "Binance");

        let eth = joined.pairs()[1];
        assert_eq!(eth.left.bid_price, BigDecimal::from(3100));
        assert_eq!(eth.right.bid_price, BigDecimal::from(3102));
    }

    #[test]
    fn test_join_does_not_normalize_symbols() {
        let left = ExchangeQuoteSet::with_quotes("Bybit", vec![quote("BTC-USDT", "1", "2")]);
        let right = ExchangeQuoteSet::with_quotes("Binance", vec![quote("BTCUSDT", "1", "2")]);

        let joined = join_quote_sets(&left, &right);
        assert!(joined.is_empty());
    }

    #[test]
    fn test_invalid_pairs_are_counted_but_not_valid() {
        let zeroed = PriceQuote {
            symbol: "ETHUSDT".to_string(),
            bid_price: BigDecimal::from(0),
            ask_price: BigDecimal::from(3101),
        };
        let left = ExchangeQuoteSet::with_quotes(
            "Bybit",
            vec![quote("BTCUSDT", "64000", "64001"), zeroed],
        );
        let right = ExchangeQuoteSet::with_quotes(
            "Binance",
            vec![quote("BTCUSDT", "64000", "64001"), quote("ETHUSDT", "3100", "3101")],
        );

        let joined = join_quote_sets(&left, &right);
        assert_eq!(joined.len(), 2);

        let valid: Vec<&str> = joined.valid_pairs().map(|p| p.symbol).collect();
        assert_eq!(valid, vec!["BTCUSDT"]);
    }
}
