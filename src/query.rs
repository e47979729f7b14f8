use crate::catalog::StockRecord;
use clap::ValueEnum;
use std::cmp::Ordering;
use std::collections::HashSet;
use thiserror::Error;

pub const GAINER_THRESHOLD_PCT: f64 = 2.0;
pub const LOSER_THRESHOLD_PCT: f64 = -1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarketCapUnit {
    Trillions,
    Billions,
}

impl MarketCapUnit {
    fn multiplier(self) -> f64 {
        match self {
            Self::Trillions => 1000.0,
            Self::Billions => 1.0,
        }
    }
}

/// A parsed market-cap label such as `2.8T` or `789B`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarketCap {
    pub value: f64,
    pub unit: MarketCapUnit,
}

impl MarketCap {
    pub fn in_billions(&self) -> f64 {
        self.value * self.unit.multiplier()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarketCapParseError {
    #[error("empty market cap label")]
    Empty,
    #[error("invalid market cap number in '{0}'")]
    InvalidNumber(String),
}

/// Parses `<number><T|B>`. A label without a suffix counts as billions.
pub fn parse_market_cap(label: &str) -> Result<MarketCap, MarketCapParseError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(MarketCapParseError::Empty);
    }

    let (number, unit) = if let Some(rest) = trimmed.strip_suffix('T') {
        (rest, MarketCapUnit::Trillions)
    } else if let Some(rest) = trimmed.strip_suffix('B') {
        (rest, MarketCapUnit::Billions)
    } else {
        (trimmed, MarketCapUnit::Billions)
    };

    let value = number
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MarketCapParseError::InvalidNumber(trimmed.to_string()))?;

    Ok(MarketCap { value, unit })
}

pub fn filter_by_exchange<'a>(stocks: &'a [StockRecord], exchange: &str) -> Vec<&'a StockRecord> {
    stocks.iter().filter(|s| s.exchange == exchange).collect()
}

pub fn filter_by_sector<'a>(stocks: &'a [StockRecord], sector: &str) -> Vec<&'a StockRecord> {
    stocks.iter().filter(|s| s.sector == sector).collect()
}

/// Records whose market cap is at least `threshold`. Records with an
/// unparseable label never match, and neither does anything when the
/// threshold itself fails to parse.
pub fn filter_by_min_market_cap<'a>(
    stocks: &'a [StockRecord],
    threshold: &str,
) -> Vec<&'a StockRecord> {
    let Ok(min) = parse_market_cap(threshold) else {
        return Vec::new();
    };
    let min = min.in_billions();

    stocks
        .iter()
        .filter(|s| {
            parse_market_cap(s.market_cap)
                .map(|cap| cap.in_billions() >= min)
                .unwrap_or(false)
        })
        .collect()
}

pub fn top_gainers(stocks: &[StockRecord]) -> Vec<&StockRecord> {
    let mut out: Vec<&StockRecord> = stocks
        .iter()
        .filter(|s| s.change_percent > GAINER_THRESHOLD_PCT)
        .collect();
    out.sort_by(|a, b| b.change_percent.total_cmp(&a.change_percent));
    out
}

pub fn top_losers(stocks: &[StockRecord]) -> Vec<&StockRecord> {
    let mut out: Vec<&StockRecord> = stocks
        .iter()
        .filter(|s| s.change_percent < LOSER_THRESHOLD_PCT)
        .collect();
    out.sort_by(|a, b| a.change_percent.total_cmp(&b.change_percent));
    out
}

pub fn most_active(stocks: &[StockRecord]) -> Vec<&StockRecord> {
    let mut out: Vec<&StockRecord> = stocks.iter().collect();
    out.sort_by(|a, b| b.volume.cmp(&a.volume));
    out
}

fn distinct_by(
    stocks: &[StockRecord],
    field: fn(&StockRecord) -> &'static str,
) -> Vec<&'static str> {
    let mut seen = HashSet::new();
    stocks
        .iter()
        .map(field)
        .filter(|v| seen.insert(*v))
        .collect()
}

pub fn distinct_exchanges(stocks: &[StockRecord]) -> Vec<&'static str> {
    distinct_by(stocks, |s| s.exchange)
}

pub fn distinct_sectors(stocks: &[StockRecord]) -> Vec<&'static str> {
    distinct_by(stocks, |s| s.sector)
}

pub fn distinct_industries(stocks: &[StockRecord]) -> Vec<&'static str> {
    distinct_by(stocks, |s| s.industry)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Symbol, A to Z
    #[default]
    Symbol,
    /// Price, high to low
    Price,
    /// Change percent, high to low
    #[value(name = "change")]
    ChangePercent,
    /// Volume, high to low
    Volume,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            Self::Symbol => "Symbol (A-Z)",
            Self::Price => "Price (High to Low)",
            Self::ChangePercent => "Change % (High to Low)",
            Self::Volume => "Volume (High to Low)",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Symbol => Self::Price,
            Self::Price => Self::ChangePercent,
            Self::ChangePercent => Self::Volume,
            Self::Volume => Self::Symbol,
        }
    }

    fn compare(self, a: &StockRecord, b: &StockRecord) -> Ordering {
        match self {
            Self::Symbol => compare_symbols(a.symbol, b.symbol),
            Self::Price => b.price.total_cmp(&a.price),
            Self::ChangePercent => b.change_percent.total_cmp(&a.change_percent),
            Self::Volume => b.volume.cmp(&a.volume),
        }
    }
}

// Dictionary-style ordering: letters compare case-insensitively first, raw
// bytes only break ties.
fn compare_symbols(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Free-text search over symbol and name, narrowed by optional exact
/// exchange and sector filters (empty string means unconstrained).
pub fn search_and_sort<'a>(
    stocks: &'a [StockRecord],
    query: &str,
    exchange: &str,
    sector: &str,
    sort: SortKey,
) -> Vec<&'a StockRecord> {
    let needle = query.to_lowercase();
    let mut out: Vec<&StockRecord> = stocks
        .iter()
        .filter(|s| {
            s.symbol.to_lowercase().contains(&needle) || s.name.to_lowercase().contains(&needle)
        })
        .filter(|s| exchange.is_empty() || s.exchange == exchange)
        .filter(|s| sector.is_empty() || s.sector == sector)
        .collect();
    out.sort_by(|a, b| sort.compare(a, b));
    out
}

/// Leaders shown in the selector's quick-stats strip.
#[derive(Clone, Debug, Default)]
pub struct MarketMovers<'a> {
    pub top_gainer: Option<&'a StockRecord>,
    pub top_loser: Option<&'a StockRecord>,
    pub most_active: Option<&'a StockRecord>,
}

impl<'a> MarketMovers<'a> {
    pub fn from_catalog(stocks: &'a [StockRecord]) -> Self {
        Self {
            top_gainer: top_gainers(stocks).first().copied(),
            top_loser: top_losers(stocks).first().copied(),
            most_active: most_active(stocks).first().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn record(
        symbol: &'static str,
        cap: &'static str,
        change_percent: f64,
        volume: u64,
    ) -> StockRecord {
        StockRecord {
            symbol,
            name: "Test Corp",
            exchange: "NYSE",
            sector: "Technology",
            industry: "Software",
            market_cap: cap,
            price: 10.0,
            change: 0.0,
            change_percent,
            volume,
        }
    }

    #[test]
    fn test_exchange_filters_partition_catalog() {
        let stocks = catalog::all();
        let mut total = 0;
        for exchange in distinct_exchanges(stocks) {
            let subset = filter_by_exchange(stocks, exchange);
            assert!(subset.iter().all(|s| s.exchange == exchange));
            total += subset.len();
        }
        assert_eq!(total, stocks.len());
    }

    #[test]
    fn test_sector_filter_preserves_catalog_order() {
        let stocks = catalog::all();
        let healthcare = filter_by_sector(stocks, "Healthcare");
        assert!(!healthcare.is_empty());
        let positions: Vec<usize> = healthcare
            .iter()
            .map(|h| stocks.iter().position(|s| std::ptr::eq(s, *h)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_parse_market_cap_units() {
        assert_eq!(
            parse_market_cap("2.8T"),
            Ok(MarketCap { value: 2.8, unit: MarketCapUnit::Trillions })
        );
        assert_eq!(
            parse_market_cap("789B"),
            Ok(MarketCap { value: 789.0, unit: MarketCapUnit::Billions })
        );
        assert_eq!(
            parse_market_cap("45"),
            Ok(MarketCap { value: 45.0, unit: MarketCapUnit::Billions })
        );
        assert!((parse_market_cap("1.1T").unwrap().in_billions() - 1100.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_market_cap_rejects_malformed() {
        assert_eq!(parse_market_cap(""), Err(MarketCapParseError::Empty));
        assert!(matches!(parse_market_cap("T"), Err(MarketCapParseError::InvalidNumber(_))));
        assert!(matches!(parse_market_cap("abcB"), Err(MarketCapParseError::InvalidNumber(_))));
        assert!(matches!(parse_market_cap("1.5M"), Err(MarketCapParseError::InvalidNumber(_))));
    }

    #[test]
    fn test_min_market_cap_threshold() {
        let stocks = catalog::all();
        let big = filter_by_min_market_cap(stocks, "1T");
        assert!(big.iter().any(|s| s.symbol == "AAPL"));
        assert!(big.iter().all(|s| s.market_cap != "789B"));
        assert!(big.iter().all(|s| s.market_cap.ends_with('T')));
    }

    #[test]
    fn test_min_market_cap_skips_bad_labels() {
        let stocks = vec![record("GOOD", "5B", 0.0, 1), record("BAD", "n/a", 0.0, 1)];
        let out = filter_by_min_market_cap(&stocks, "1B");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].symbol, "GOOD");
        assert!(filter_by_min_market_cap(&stocks, "lots").is_empty());
    }

    #[test]
    fn test_top_gainers_sorted_and_above_threshold() {
        let gainers = top_gainers(catalog::all());
        assert!(!gainers.is_empty());
        assert!(gainers.iter().all(|s| s.change_percent > 2.0));
        assert!(gainers.windows(2).all(|w| w[0].change_percent >= w[1].change_percent));
        assert_eq!(gainers[0].symbol, "NIO");
    }

    #[test]
    fn test_top_losers_sorted_ascending() {
        let losers = top_losers(catalog::all());
        assert!(!losers.is_empty());
        assert!(losers.iter().all(|s| s.change_percent < -1.0));
        assert!(losers.windows(2).all(|w| w[0].change_percent <= w[1].change_percent));
        assert_eq!(losers[0].symbol, "SNAP");
    }

    #[test]
    fn test_most_active_leaves_source_untouched() {
        let stocks = vec![
            record("A", "1B", 0.0, 5),
            record("B", "1B", 0.0, 50),
            record("C", "1B", 0.0, 20),
        ];
        let active = most_active(&stocks);
        let order: Vec<&str> = active.iter().map(|s| s.symbol).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
        assert_eq!(stocks[0].symbol, "A");
    }

    #[test]
    fn test_distinct_values_are_unique() {
        let stocks = catalog::all();
        let exchanges = distinct_exchanges(stocks);
        assert_eq!(exchanges.len(), 2);
        let sectors = distinct_sectors(stocks);
        let unique: HashSet<_> = sectors.iter().collect();
        assert_eq!(unique.len(), sectors.len());
        assert!(distinct_industries(stocks).contains(&"Semiconductors"));
    }

    #[test]
    fn test_search_exact_symbol() {
        let out = search_and_sort(catalog::all(), "AAPL", "", "", SortKey::Symbol);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Apple Inc.");
    }

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let out = search_and_sort(catalog::all(), "alphabet", "", "", SortKey::Symbol);
        let symbols: Vec<&str> = out.iter().map(|s| s.symbol).collect();
        assert_eq!(symbols, vec!["GOOG", "GOOGL"]);
    }

    #[test]
    fn test_search_combines_filters() {
        let out = search_and_sort(catalog::all(), "", "NYSE", "Energy", SortKey::Price);
        assert!(!out.is_empty());
        assert!(out.iter().all(|s| s.exchange == "NYSE" && s.sector == "Energy"));
        assert!(out.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[test]
    fn test_sort_keys() {
        let stocks = catalog::all();
        let by_volume = search_and_sort(stocks, "", "", "", SortKey::Volume);
        assert_eq!(by_volume.len(), stocks.len());
        assert!(by_volume.windows(2).all(|w| w[0].volume >= w[1].volume));

        let by_change = search_and_sort(stocks, "", "", "", SortKey::ChangePercent);
        assert!(by_change.windows(2).all(|w| w[0].change_percent >= w[1].change_percent));

        let by_symbol = search_and_sort(stocks, "", "", "", SortKey::Symbol);
        assert_eq!(by_symbol[0].symbol, "AAPL");
    }

    #[test]
    fn test_sort_key_cycles() {
        let mut key = SortKey::default();
        for _ in 0..4 {
            key = key.next();
        }
        assert_eq!(key, SortKey::Symbol);
    }

    #[test]
    fn test_market_movers() {
        let movers = MarketMovers::from_catalog(catalog::all());
        assert_eq!(movers.top_gainer.map(|s| s.symbol), Some("NIO"));
        assert_eq!(movers.most_active.map(|s| s.symbol), Some("TSLA"));
        assert!(MarketMovers::from_catalog(&[]).top_loser.is_none());
    }

    #[test]
    fn test_search_matches_query_as_typed() {
        let all = catalog::all();
        let spaced = search_and_sort(all, " ", "", "", SortKey::Symbol);
        assert!(!spaced.is_empty());
        assert!(spaced.iter().all(|s| s.symbol.contains(' ') || s.name.contains(' ')));
        assert!(!spaced.iter().any(|s| s.symbol == "COP"));

        let trailing = search_and_sort(all, "t ", "", "", SortKey::Symbol);
        assert!(trailing.iter().all(|s| s.name.to_lowercase().contains("t ")));
        assert!(!trailing.iter().any(|s| s.symbol == "TSLA"));
    }
}
