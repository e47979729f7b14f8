use crate::config::{DEFAULT_BASE_PRICE, HISTORY_DAYS};
use crate::rng::UniformSource;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Falls back to the default when the price is missing, non-positive or NaN.
pub fn effective_base_price(base_price: Option<f64>) -> f64 {
    match base_price {
        Some(p) if p > 0.0 && p.is_finite() => p,
        _ => DEFAULT_BASE_PRICE,
    }
}

/// Simulates `HISTORY_DAYS + 1` daily bars ending at `today`, oldest first.
///
/// Each day is drawn independently around `base_price`: a slow sine trend plus
/// bounded random noise. Nothing is chained between days.
pub fn generate_history(
    base_price: Option<f64>,
    today: NaiveDate,
    rng: &mut impl UniformSource,
) -> Vec<DailyBar> {
    let base = effective_base_price(base_price);
    let mut bars = Vec::with_capacity(HISTORY_DAYS + 1);

    for i in (0..=HISTORY_DAYS).rev() {
        let offset = i as f64;
        let volatility = 0.02 + rng.next_f64() * 0.03;
        let trend = (offset * 0.1).sin() * 0.01;
        let random_factor = (rng.next_f64() - 0.5) * volatility;

        let close = base * (1.0 + trend + random_factor);
        let open = close * (1.0 + (rng.next_f64() - 0.5) * 0.01);
        let high = open.max(close) * (1.0 + rng.next_f64() * 0.02);
        let low = open.min(close) * (1.0 - rng.next_f64() * 0.02);
        let volume = (rng.next_f64() * 50_000_000.0).floor() as u64 + 10_000_000;

        bars.push(DailyBar {
            date: today - Duration::days(i as i64),
            open: round_to(open, 2),
            high: round_to(high, 2),
            low: round_to(low, 2),
            close: round_to(close, 2),
            volume,
        });
    }

    bars
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistorySummary {
    pub latest_close: f64,
    pub period_high: f64,
    pub period_low: f64,
    pub average_volume: f64,
}

impl HistorySummary {
    pub fn from_bars(bars: &[DailyBar]) -> Option<Self> {
        let last = bars.last()?;
        let period_high = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let period_low = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let average_volume = bars.iter().map(|b| b.volume as f64).sum::<f64>() / bars.len() as f64;

        Some(Self {
            latest_close: last.close,
            period_high,
            period_low,
            average_volume,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TechnicalIndicators {
    pub rsi: f64,
    pub macd: f64,
    pub bollinger: BollingerBands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RsiSignal {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiSignal {
    pub fn label(self) -> &'static str {
        match self {
            Self::Overbought => "Overbought",
            Self::Oversold => "Oversold",
            Self::Neutral => "Neutral",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MacdSignal {
    Bullish,
    Bearish,
}

impl MacdSignal {
    pub fn label(self) -> &'static str {
        match self {
            Self::Bullish => "Bullish",
            Self::Bearish => "Bearish",
        }
    }
}

impl TechnicalIndicators {
    // The generator only yields RSI in [45, 75), so Oversold never shows up
    // in practice. Kept as-is pending a product decision on the range.
    pub fn rsi_signal(&self) -> RsiSignal {
        if self.rsi > 70.0 {
            RsiSignal::Overbought
        } else if self.rsi < 30.0 {
            RsiSignal::Oversold
        } else {
            RsiSignal::Neutral
        }
    }

    pub fn macd_signal(&self) -> MacdSignal {
        if self.macd > 0.0 {
            MacdSignal::Bullish
        } else {
            MacdSignal::Bearish
        }
    }
}

pub fn generate_indicators(
    current_price: f64,
    rng: &mut impl UniformSource,
) -> TechnicalIndicators {
    let price = effective_base_price(Some(current_price));
    let rsi = 45.0 + rng.next_f64() * 30.0;
    let macd = (rng.next_f64() - 0.5) * 2.0;

    TechnicalIndicators {
        rsi,
        macd,
        bollinger: BollingerBands {
            upper: price * 1.05,
            middle: price,
            lower: price * 0.95,
        },
    }
}

/// A simulated intraday quote move around a reference price.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PriceMovement {
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
}

pub fn simulate_price_movement(base_price: f64, rng: &mut impl UniformSource) -> PriceMovement {
    let base = effective_base_price(Some(base_price));
    let volatility = 0.02 + rng.next_f64() * 0.03;
    let random_factor = (rng.next_f64() - 0.5) * volatility;
    let price = base * (1.0 + random_factor);
    let change = price - base;

    PriceMovement {
        price: round_to(price, 2),
        change: round_to(change, 2),
        change_percent: round_to(change / base * 100.0, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RandSource, ScriptedSource};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_history_shape_and_dates() {
        let mut rng = RandSource::seeded(1);
        let bars = generate_history(Some(178.85), today(), &mut rng);
        assert_eq!(bars.len(), 31);
        assert_eq!(bars.first().unwrap().date, NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
        assert_eq!(bars.last().unwrap().date, today());
        for w in bars.windows(2) {
            assert_eq!(w[1].date - w[0].date, Duration::days(1));
        }
    }

    #[test]
    fn test_history_volume_and_price_bounds() {
        let mut rng = RandSource::seeded(99);
        for _ in 0..50 {
            let bars = generate_history(Some(100.0), today(), &mut rng);
            for bar in &bars {
                assert!((10_000_000..60_000_000).contains(&bar.volume));
                // trend ±1% plus noise ±2.5%
                assert!(bar.close >= 96.4 && bar.close <= 103.6, "close {}", bar.close);
                assert!(bar.high >= bar.low);
            }
        }
    }

    #[test]
    fn test_history_prices_are_rounded() {
        let mut rng = RandSource::seeded(3);
        for bar in generate_history(Some(123.456), today(), &mut rng) {
            for v in [bar.open, bar.high, bar.low, bar.close] {
                assert!((v * 100.0 - (v * 100.0).round()).abs() < 1e-6, "{} not rounded", v);
            }
        }
    }

    #[test]
    fn test_history_exact_values_with_midpoint_draws() {
        // u = 0.5 zeroes every noise term, leaving only the trend.
        let mut rng = ScriptedSource::constant(0.5);
        let bars = generate_history(Some(200.0), today(), &mut rng);
        let last = bars.last().unwrap();
        assert_eq!(last.close, 200.0);
        assert_eq!(last.open, 200.0);
        assert_eq!(last.high, 202.0);
        assert_eq!(last.low, 198.0);
        assert_eq!(last.volume, 35_000_000);

        let first = &bars[0];
        assert_eq!(first.close, round_to(200.0 * (1.0 + 3f64.sin() * 0.01), 2));
    }

    #[test]
    fn test_invalid_base_price_uses_default() {
        assert_eq!(effective_base_price(None), 150.0);
        assert_eq!(effective_base_price(Some(0.0)), 150.0);
        assert_eq!(effective_base_price(Some(-3.0)), 150.0);
        assert_eq!(effective_base_price(Some(f64::NAN)), 150.0);

        let mut rng = ScriptedSource::constant(0.5);
        let bars = generate_history(None, today(), &mut rng);
        assert_eq!(bars.last().unwrap().close, 150.0);
    }

    #[test]
    fn test_indicator_ranges() {
        let mut rng = RandSource::seeded(5);
        for _ in 0..1000 {
            let ind = generate_indicators(250.0, &mut rng);
            assert!(ind.rsi >= 45.0 && ind.rsi < 75.0);
            assert!(ind.macd >= -1.0 && ind.macd < 1.0);
            assert_ne!(ind.rsi_signal(), RsiSignal::Oversold);
            assert!((ind.bollinger.upper - 262.5).abs() < 1e-9);
            assert!((ind.bollinger.lower - 237.5).abs() < 1e-9);
            assert_eq!(ind.bollinger.middle, 250.0);
        }
    }

    #[test]
    fn test_indicator_classification() {
        let mut ind = generate_indicators(10.0, &mut ScriptedSource::new(&[0.9, 0.75]));
        assert!(ind.rsi > 70.0);
        assert_eq!(ind.rsi_signal(), RsiSignal::Overbought);
        assert_eq!(ind.macd_signal(), MacdSignal::Bullish);

        ind.rsi = 25.0;
        ind.macd = 0.0;
        assert_eq!(ind.rsi_signal(), RsiSignal::Oversold);
        assert_eq!(ind.macd_signal(), MacdSignal::Bearish);

        ind.rsi = 50.0;
        assert_eq!(ind.rsi_signal().label(), "Neutral");
    }

    #[test]
    fn test_price_movement_is_consistent() {
        let mut rng = RandSource::seeded(11);
        for _ in 0..200 {
            let mv = simulate_price_movement(80.0, &mut rng);
            assert!((mv.price - 80.0 - mv.change).abs() < 0.011);
            assert!(mv.change_percent.abs() <= 2.5 + 1e-9);
        }
    }

    #[test]
    fn test_history_summary() {
        let mut rng = ScriptedSource::constant(0.5);
        let bars = generate_history(Some(200.0), today(), &mut rng);
        let summary = HistorySummary::from_bars(&bars).unwrap();
        assert_eq!(summary.latest_close, 200.0);
        assert!(summary.period_high >= summary.period_low);
        assert_eq!(summary.average_volume, 35_000_000.0);
        assert!(HistorySummary::from_bars(&[]).is_none());
    }
}
