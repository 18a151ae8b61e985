//! Fit-quality metrics over the post-initialization residual window

use crate::models::ModelKind;
use crate::seasonality::round_to;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Quality metrics of the fitted model.
#[derive(Debug, Clone, Serialize)]
pub struct FitMetrics {
    /// Selection tag: "seasonal-optimized", "seasonal-conservative" or
    /// "trend-fallback"
    pub model_name: &'static str,
    /// Coefficient of determination, clamped to [0, 1]
    pub r_squared: f64,
    /// Mean absolute percentage error over the residual window
    pub in_sample_mape: f64,
    /// Rolling-origin cross-validated MAPE
    pub cross_validated_mape: f64,
    /// Standard error of the residuals
    pub residual_std_error: f64,
    /// Number of historical periods used
    pub sample_size: usize,
    /// Mean price over the whole series
    pub mean_price: f64,
    /// Most recent observed price
    pub latest_price: f64,
}

/// Residual-window statistics needed both by the metrics payload and by the
/// confidence-band construction.
pub(crate) struct ResidualStats {
    pub r_squared: f64,
    pub mape: f64,
    pub std_error: f64,
    pub mean_price: f64,
}

/// Compute residual statistics, skipping the non-predictive head of the
/// fitted array.
///
/// For seasonal models the first full cycle is initialization, so
/// `skip = period`; otherwise `skip = max(1, n/6)`. When the skip would
/// consume the whole series it is re-clamped to `max(1, n/4)`. R-squared is
/// computed against the full-series mean for comparability across models and
/// clamped at zero.
pub(crate) fn residual_stats(prices: &[f64], fitted: &[f64], kind: ModelKind, period: usize) -> ResidualStats {
    let n = prices.len();
    let mut skip = if kind.is_seasonal() {
        period
    } else {
        (n / 6).max(1)
    };
    if skip >= n {
        skip = (n / 4).max(1);
    }

    let mean_price = prices.mean();

    let residuals: Vec<f64> = prices[skip..]
        .iter()
        .zip(fitted[skip..].iter())
        .map(|(obs, pred)| obs - pred)
        .collect();

    let ss_res: f64 = residuals.iter().map(|r| r * r).sum();
    let ss_tot: f64 = prices[skip..]
        .iter()
        .map(|&p| (p - mean_price).powi(2))
        .sum();
    let r_squared = (1.0 - ss_res / ss_tot.max(1e-10)).max(0.0);

    let mape = residuals
        .iter()
        .zip(prices[skip..].iter())
        .map(|(r, &p)| r.abs() / p.max(1.0) * 100.0)
        .sum::<f64>()
        / residuals.len().max(1) as f64;

    let std_error = if residuals.len() > 1 {
        residuals.population_std_dev()
    } else {
        prices.population_std_dev() * 0.3
    };

    ResidualStats {
        r_squared,
        mape,
        std_error,
        mean_price,
    }
}

impl FitMetrics {
    pub(crate) fn assemble(
        stats: &ResidualStats,
        kind: ModelKind,
        cv_mape: f64,
        sample_size: usize,
        latest_price: f64,
    ) -> Self {
        FitMetrics {
            model_name: kind.as_str(),
            r_squared: round_to(stats.r_squared.min(1.0), 3),
            in_sample_mape: round_to(stats.mape, 1),
            cross_validated_mape: round_to(cv_mape, 1),
            residual_std_error: stats.std_error,
            sample_size,
            mean_price: stats.mean_price,
            latest_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn perfect_fit_scores_unit_r_squared() {
        let prices = vec![100.0, 110.0, 105.0, 115.0, 108.0, 112.0];
        let fitted = prices.clone();
        let stats = residual_stats(&prices, &fitted, ModelKind::TrendFallback, 12);
        assert_approx_eq!(stats.r_squared, 1.0, 1e-9);
        assert_approx_eq!(stats.mape, 0.0, 1e-9);
    }

    #[test]
    fn r_squared_is_clamped_at_zero() {
        // Fitted values far worse than the mean predictor.
        let prices = vec![100.0, 101.0, 99.0, 100.0, 101.0, 99.0];
        let fitted = vec![500.0; 6];
        let stats = residual_stats(&prices, &fitted, ModelKind::TrendFallback, 12);
        assert_eq!(stats.r_squared, 0.0);
    }

    #[test]
    fn seasonal_skip_is_reclamped_when_it_covers_the_series() {
        // n == period: skip becomes max(1, n/4) = 3 instead of 12.
        let prices: Vec<f64> = (0..12).map(|t| 100.0 + t as f64).collect();
        let fitted = prices.clone();
        let stats = residual_stats(&prices, &fitted, ModelKind::SeasonalConservative, 12);
        assert_approx_eq!(stats.mape, 0.0, 1e-9);
    }

    #[test]
    fn single_residual_falls_back_to_price_spread() {
        let prices = vec![100.0, 140.0];
        let fitted = vec![100.0, 150.0];
        // skip = max(1, 2/6) = 1, leaving one residual.
        let stats = residual_stats(&prices, &fitted, ModelKind::TrendFallback, 12);
        assert_approx_eq!(stats.std_error, 20.0 * 0.3, 1e-9);
    }
}
