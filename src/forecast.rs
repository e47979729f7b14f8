use crate::config::FORECAST_DAYS;
use crate::market::{effective_base_price, round_to};
use crate::rng::UniformSource;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

pub const MIN_CONFIDENCE: f64 = 50.0;
pub const MAX_CONFIDENCE: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl Trend {
    /// Labels a step by how far it moved from the previous chained price.
    pub fn classify(predicted: f64, previous: f64) -> Self {
        if predicted > previous * 1.02 {
            Self::Bullish
        } else if predicted < previous * 0.98 {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionPoint {
    pub date: NaiveDate,
    pub predicted_price: f64,
    pub confidence: f64,
    pub trend: Trend,
}

/// Builds a `FORECAST_DAYS` chain starting the day after `today`.
///
/// Every step compounds a sine trend and a ±2.5% shock onto the previous
/// step's price, so the path wanders rather than resampling around the seed.
/// The chain carries full precision; only the stored values are rounded.
pub fn generate_forecast(
    seed_price: f64,
    today: NaiveDate,
    rng: &mut impl UniformSource,
) -> Vec<PredictionPoint> {
    let mut base_price = effective_base_price(Some(seed_price));
    let mut points = Vec::with_capacity(FORECAST_DAYS);

    for i in 1..=FORECAST_DAYS {
        let step = i as f64;
        let trend_factor = 1.0 + (step * 0.1).sin() * 0.02;
        let volatility_factor = 1.0 + (rng.next_f64() - 0.5) * 0.05;
        let predicted = base_price * trend_factor * volatility_factor;
        // The raw score can top 100 for the first few steps; cap it.
        let confidence = (95.0 - step * 1.5 + rng.next_f64() * 10.0)
            .clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);

        points.push(PredictionPoint {
            date: today + Duration::days(i as i64),
            predicted_price: round_to(predicted, 2),
            confidence: round_to(confidence, 1),
            trend: Trend::classify(predicted, base_price),
        });

        base_price = predicted;
    }

    points
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub average_confidence: f64,
    pub bullish: usize,
    pub bearish: usize,
    pub neutral: usize,
    pub final_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
}

impl ForecastSummary {
    /// Aggregates a chain against the seed the chain started from.
    pub fn from_points(points: &[PredictionPoint], seed_price: f64) -> Option<Self> {
        let last = points.last()?;
        let count = |t: Trend| points.iter().filter(|p| p.trend == t).count();
        let average_confidence =
            points.iter().map(|p| p.confidence).sum::<f64>() / points.len() as f64;
        let price_change = last.predicted_price - seed_price;
        let price_change_percent = if seed_price > 0.0 {
            price_change / seed_price * 100.0
        } else {
            0.0
        };

        Some(Self {
            average_confidence,
            bullish: count(Trend::Bullish),
            bearish: count(Trend::Bearish),
            neutral: count(Trend::Neutral),
            final_price: last.predicted_price,
            price_change,
            price_change_percent,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConfidenceBucket {
    pub range: &'static str,
    pub count: usize,
}

pub fn confidence_distribution(points: &[PredictionPoint]) -> [ConfidenceBucket; 5] {
    let mut buckets = [
        ConfidenceBucket { range: "90-100%", count: 0 },
        ConfidenceBucket { range: "80-90%", count: 0 },
        ConfidenceBucket { range: "70-80%", count: 0 },
        ConfidenceBucket { range: "60-70%", count: 0 },
        ConfidenceBucket { range: "<60%", count: 0 },
    ];

    for p in points {
        let idx = match p.confidence {
            c if c >= 90.0 => 0,
            c if c >= 80.0 => 1,
            c if c >= 70.0 => 2,
            c if c >= 60.0 => 3,
            _ => 4,
        };
        buckets[idx].count += 1;
    }

    buckets
}

/// Percent change of each displayed price against the row before it; the
/// first row compares against the seed.
pub fn step_changes(points: &[PredictionPoint], seed_price: f64) -> Vec<f64> {
    let mut prev = seed_price;
    points
        .iter()
        .map(|p| {
            let pct = if prev > 0.0 {
                (p.predicted_price - prev) / prev * 100.0
            } else {
                0.0
            };
            prev = p.predicted_price;
            pct
        })
        .collect()
}
