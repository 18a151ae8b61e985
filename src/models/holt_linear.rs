//! Holt linear (double exponential) smoothing, the short-history fallback
//!
//! Model equations:
//! - Level:    `l_t = α·y_t + (1-α)(l_{t-1} + b_{t-1})`
//! - Trend:    `b_t = 0.3(l_t - l_{t-1}) + 0.7·b_{t-1}`
//! - Forecast: `ŷ_{t+h} = l_t + h·b_t`
//!
//! The trend smoothing constant is fixed at 0.3 and not optimized; only the
//! level constant α is searched.

use crate::error::{ForecastError, Result};
use crate::models::{ModelFit, SmoothingModel};

/// Ordered α candidates for the level-constant search.
pub const ALPHA_GRID: [f64; 9] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];

/// Fallback α when no candidate scores.
pub const DEFAULT_ALPHA: f64 = 0.3;

/// Fixed trend smoothing constant.
const TREND_CONSTANT: f64 = 0.3;

/// Holt linear exponential smoothing model
#[derive(Debug, Clone)]
pub struct HoltLinear {
    name: String,
    alpha: f64,
}

impl HoltLinear {
    /// Create a new Holt linear model with level constant `alpha` in (0, 1).
    pub fn new(alpha: f64) -> Result<Self> {
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "alpha must be between 0 and 1, got {}",
                alpha
            )));
        }

        Ok(Self {
            name: format!("Holt linear (alpha={})", alpha),
            alpha,
        })
    }
}

impl SmoothingModel for HoltLinear {
    fn fit(&self, y: &[f64], horizon: usize) -> Result<ModelFit> {
        let n = y.len();
        if n == 0 {
            return Err(ForecastError::too_short(0, 1));
        }

        let mut level = y[0];
        let mut trend = if n > 1 { y[1] - y[0] } else { 0.0 };

        let mut fitted = Vec::with_capacity(n);
        fitted.push(level);

        for &value in &y[1..] {
            let new_level = self.alpha * value + (1.0 - self.alpha) * (level + trend);
            let new_trend = TREND_CONSTANT * (new_level - level) + (1.0 - TREND_CONSTANT) * trend;
            level = new_level;
            trend = new_trend;
            fitted.push(level);
        }

        let forecasts = (1..=horizon)
            .map(|i| (level + i as f64 * trend).max(0.0))
            .collect();

        Ok(ModelFit { fitted, forecasts })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Grid-search α minimizing the MSE of one-step residuals, excluding t = 0
/// where the fitted value is the observation itself. First strict minimum
/// wins; defaults to 0.3 when no candidate scores.
pub fn optimize(y: &[f64]) -> f64 {
    let mut best_alpha = DEFAULT_ALPHA;
    let mut best_mse = f64::INFINITY;

    for &alpha in ALPHA_GRID.iter() {
        let model = match HoltLinear::new(alpha) {
            Ok(m) => m,
            Err(_) => continue,
        };
        let fit = match model.fit(y, 1) {
            Ok(f) => f,
            Err(_) => continue,
        };
        if fit.fitted.len() > 1 {
            let mse = y[1..]
                .iter()
                .zip(fit.fitted[1..].iter())
                .map(|(obs, pred)| (obs - pred).powi(2))
                .sum::<f64>()
                / (y.len() - 1) as f64;
            if mse < best_mse {
                best_mse = mse;
                best_alpha = alpha;
            }
        }
    }

    tracing::debug!(alpha = best_alpha, mse = best_mse, "trend grid search complete");

    best_alpha
}
