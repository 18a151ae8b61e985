//! Calendar-month seasonality and recent-trend summarization

use crate::data::{Granularity, PeriodicAggregate};
use chrono::Datelike;
use serde::Serialize;
use statrs::statistics::Statistics;

pub(crate) const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Multiplicative price factor for one calendar month, with the expected
/// traded volume in that month.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonalFactor {
    /// Calendar month, 1..=12
    pub month: u32,
    /// English month name
    pub month_name: &'static str,
    /// Mean price in the month divided by the overall mean price
    pub factor: f64,
    /// (factor - 1) expressed as a percentage
    pub relative_variation_pct: f64,
    /// Mean positive volume observed in the month, zero when none
    pub average_volume: f64,
}

/// Direction of the recent price trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// Short-window linear trend over the most recent observations.
#[derive(Debug, Clone, Serialize)]
pub struct TrendSummary {
    /// Sign of the recent slope
    pub direction: TrendDirection,
    /// OLS slope per period over the last min(6, n) observations
    pub per_period_change: f64,
    /// Slope annualized by granularity, as a percentage of the mean price
    pub annualized_change_pct: f64,
}

/// Collect per-month positive volumes; shared with the forecast assembler,
/// which needs expected volumes for future months.
pub(crate) fn monthly_volumes(series: &[PeriodicAggregate]) -> [Vec<f64>; 12] {
    let mut volumes: [Vec<f64>; 12] = Default::default();
    for aggregate in series {
        let volume = aggregate.volume_or_zero();
        if volume > 0.0 {
            volumes[aggregate.period.month0() as usize].push(volume);
        }
    }
    volumes
}

/// Mean positive volume for a calendar month (1..=12), zero when unobserved.
pub(crate) fn expected_volume_for_month(volumes: &[Vec<f64>; 12], month: u32) -> f64 {
    let vols = &volumes[(month - 1) as usize];
    if vols.is_empty() {
        0.0
    } else {
        vols.iter().sum::<f64>() / vols.len() as f64
    }
}

/// Compute the 12 calendar-month seasonal factors.
///
/// A month with no observations defaults to factor 1.0 and zero expected
/// volume. `mean_price` is the mean over the whole series, computed once by
/// the caller.
pub(crate) fn monthly_factors(
    series: &[PeriodicAggregate],
    mean_price: f64,
) -> Vec<SeasonalFactor> {
    let mut prices: [Vec<f64>; 12] = Default::default();
    for aggregate in series {
        prices[aggregate.period.month0() as usize].push(aggregate.average_price);
    }
    let volumes = monthly_volumes(series);

    (1..=12u32)
        .map(|month| {
            let month_prices = &prices[(month - 1) as usize];
            let month_mean = if month_prices.is_empty() {
                mean_price
            } else {
                month_prices.mean()
            };
            let factor = if mean_price > 0.0 {
                month_mean / mean_price
            } else {
                1.0
            };
            SeasonalFactor {
                month,
                month_name: MONTH_NAMES[(month - 1) as usize],
                factor: round_to(factor, 3),
                relative_variation_pct: round_to((factor - 1.0) * 100.0, 1),
                average_volume: expected_volume_for_month(&volumes, month).round(),
            }
        })
        .collect()
}

/// Summarize the recent trend: OLS slope over the last min(6, n) prices,
/// annualized against the overall mean price.
pub(crate) fn trend_summary(
    prices: &[f64],
    granularity: Granularity,
    mean_price: f64,
) -> TrendSummary {
    let window = prices.len().min(6);
    let recent = &prices[prices.len() - window..];
    let slope = ols_slope(recent);

    let direction = if slope > 0.0 {
        TrendDirection::Up
    } else if slope < 0.0 {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    };

    let annual_change = slope * granularity.periods_per_year();
    let annualized_change_pct = round_to(annual_change / mean_price.max(1.0) * 100.0, 1);

    TrendSummary {
        direction,
        per_period_change: slope,
        annualized_change_pct,
    }
}

/// Ordinary least-squares slope of `y` against x = 0, 1, 2, ...
/// Zero for fewer than two points.
fn ols_slope(y: &[f64]) -> f64 {
    let n = y.len();
    if n < 2 {
        return 0.0;
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = y.mean();

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (i, &value) in y.iter().enumerate() {
        let dx = i as f64 - x_mean;
        covariance += dx * (value - y_mean);
        variance += dx * dx;
    }

    covariance / variance
}

pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
