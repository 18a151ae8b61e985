//! Forecast assembly: model selection, fitting, bands and payload formatting

use crate::data::{Granularity, PeriodicAggregate};
use crate::error::{ForecastError, Result};
use crate::metrics::{residual_stats, FitMetrics};
use crate::models::select_and_fit;
use crate::seasonality::{
    expected_volume_for_month, monthly_factors, monthly_volumes, trend_summary, SeasonalFactor,
    TrendSummary,
};
use crate::validation::rolling_origin_mape;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Half-width multiplier of the confidence band (two-sided 95% under a
/// normal residual assumption; the band is a heuristic, not calibrated).
const BAND_Z: f64 = 1.96;
/// Per-step widening rate of the band spread.
const BAND_WIDENING: f64 = 0.08;
/// Per-step confidence decay in points.
const CONFIDENCE_DECAY: f64 = 1.5;

/// One historical period echoed back with its fitted value.
#[derive(Debug, Clone, Serialize)]
pub struct HistoricalPoint {
    pub period: NaiveDate,
    pub average_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub volume: f64,
    /// One-step-ahead fitted value for the period
    pub fitted: f64,
}

/// One projected future period.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastPoint {
    pub period: NaiveDate,
    /// Point estimate, floored at zero
    pub point_estimate: f64,
    /// Lower band edge, floored at zero
    pub lower_bound: f64,
    /// Upper band edge
    pub upper_bound: f64,
    /// Mean historical volume for the period's calendar month
    pub expected_volume: f64,
    /// Decaying confidence score in [0, 100]
    pub confidence: u8,
}

/// Full forecast payload.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub historical: Vec<HistoricalPoint>,
    pub forecast: Vec<ForecastPoint>,
    /// Twelve calendar-month factors, present regardless of granularity
    pub seasonality: Vec<SeasonalFactor>,
    pub trend: TrendSummary,
    pub metrics: FitMetrics,
    pub granularity: Granularity,
}

/// Advance a date by whole months, landing on the first of the month.
fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let total = date.month0() + months;
    let year = date.year() + (total / 12) as i32;
    let month = total % 12 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of a valid month")
}

fn future_period(last: NaiveDate, step: usize, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Monthly => add_months(last, step as u32),
        Granularity::Weekly => last + Duration::weeks(step as i64),
        Granularity::Daily => last + Duration::days(step as i64),
    }
}

/// Forecast future prices from an ordered series of periodic aggregates.
///
/// Selects a smoothing model from the sample size, fits it, scores it with
/// rolling-origin cross-validation, and assembles the full payload: fitted
/// history, `horizon` forecast points with widening confidence bands,
/// calendar-month seasonality, recent trend and fit metrics.
///
/// A pure function of its inputs: no shared state, no I/O, no randomness.
/// Fails with [`ForecastError::InsufficientData`] below three observations
/// and with [`ForecastError::InvalidParameter`] for a zero horizon.
pub fn forecast(
    series: &[PeriodicAggregate],
    horizon: usize,
    granularity: Granularity,
) -> Result<ForecastReport> {
    if horizon == 0 {
        return Err(ForecastError::InvalidParameter(
            "horizon must be at least 1".to_string(),
        ));
    }

    let n = series.len();
    if n < 3 {
        return Err(ForecastError::InsufficientData {
            observed: n,
            required: granularity.min_samples(),
            unit: granularity.unit(),
        });
    }

    let period = granularity.seasonal_period();
    let prices: Vec<f64> = series.iter().map(|a| a.average_price).collect();

    let selection = select_and_fit(&prices, period, horizon)?;
    let stats = residual_stats(&prices, &selection.fit.fitted, selection.kind, period);
    let cv_mape = rolling_origin_mape(&prices, period, &selection).unwrap_or(stats.mape);

    let volumes = monthly_volumes(series);
    let last_period = series[n - 1].period;

    let forecast_points = selection
        .fit
        .forecasts
        .iter()
        .enumerate()
        .map(|(idx, &estimate)| {
            let step = idx + 1;
            let future = future_period(last_period, step, granularity);
            let spread = stats.std_error * (1.0 + BAND_WIDENING * step as f64);
            let confidence =
                (100.0 - cv_mape - step as f64 * CONFIDENCE_DECAY).round().clamp(0.0, 100.0);

            ForecastPoint {
                period: future,
                point_estimate: estimate,
                lower_bound: (estimate - BAND_Z * spread).max(0.0),
                upper_bound: estimate + BAND_Z * spread,
                expected_volume: expected_volume_for_month(&volumes, future.month()),
                confidence: confidence as u8,
            }
        })
        .collect();

    let historical = series
        .iter()
        .zip(selection.fit.fitted.iter())
        .map(|(aggregate, &fitted)| HistoricalPoint {
            period: aggregate.period,
            average_price: aggregate.average_price,
            min_price: aggregate.min_price.unwrap_or(0.0),
            max_price: aggregate.max_price.unwrap_or(0.0),
            volume: aggregate.volume_or_zero(),
            fitted,
        })
        .collect();

    let metrics = FitMetrics::assemble(
        &stats,
        selection.kind,
        cv_mape,
        n,
        prices[n - 1],
    );

    tracing::info!(
        model = metrics.model_name,
        n,
        horizon,
        r_squared = metrics.r_squared,
        cv_mape = metrics.cross_validated_mape,
        "forecast assembled"
    );

    Ok(ForecastReport {
        historical,
        forecast: forecast_points,
        seasonality: monthly_factors(series, stats.mean_price),
        trend: trend_summary(&prices, granularity, stats.mean_price),
        metrics,
        granularity,
    })
}
