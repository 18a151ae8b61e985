//! Holt-Winters multiplicative triple exponential smoothing

use crate::error::{ForecastError, Result};
use crate::models::{ModelFit, SmoothingModel};
use statrs::statistics::Statistics;

/// Ordered candidate grids for the parameter search. Iteration order is part
/// of the contract: the first strict minimum wins, so results stay
/// reproducible across runs and platforms.
pub const ALPHA_GRID: [f64; 7] = [0.05, 0.1, 0.2, 0.3, 0.5, 0.7, 0.9];
pub const BETA_GRID: [f64; 5] = [0.001, 0.01, 0.05, 0.1, 0.2];
pub const GAMMA_GRID: [f64; 6] = [0.05, 0.1, 0.2, 0.3, 0.5, 0.7];

/// Conservative parameter triple used when the grid search cannot run or
/// every candidate fails.
pub const DEFAULT_PARAMS: (f64, f64, f64) = (0.3, 0.05, 0.3);

/// Holt-Winters multiplicative model
///
/// Model equations (multiplicative seasonality):
/// - Level:    `l_t = α(y_t / s_{t-p}) + (1-α)(l_{t-1} + b_{t-1})`
/// - Trend:    `b_t = β(l_t - l_{t-1}) + (1-β)b_{t-1}`
/// - Seasonal: `s_t = γ(y_t / l_t) + (1-γ)s_{t-p}`
/// - Forecast: `ŷ_{t+h} = (l_t + h·b_t) s_{t+h-p}`
#[derive(Debug, Clone)]
pub struct HoltWinters {
    name: String,
    period: usize,
    alpha: f64,
    beta: f64,
    gamma: f64,
}

impl HoltWinters {
    /// Create a new Holt-Winters model.
    ///
    /// `period` is the seasonal cycle length and must be at least 2; the
    /// smoothing constants must each lie in (0, 1).
    pub fn new(period: usize, alpha: f64, beta: f64, gamma: f64) -> Result<Self> {
        if period < 2 {
            return Err(ForecastError::InvalidParameter(format!(
                "Seasonal period must be at least 2, got {}",
                period
            )));
        }
        for (label, value) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
            if value <= 0.0 || value >= 1.0 {
                return Err(ForecastError::InvalidParameter(format!(
                    "{} must be between 0 and 1, got {}",
                    label, value
                )));
            }
        }

        Ok(Self {
            name: format!(
                "Holt-Winters (period={}, alpha={}, beta={}, gamma={})",
                period, alpha, beta, gamma
            ),
            period,
            alpha,
            beta,
            gamma,
        })
    }

    /// Seasonal cycle length.
    pub fn period(&self) -> usize {
        self.period
    }
}

impl SmoothingModel for HoltWinters {
    /// Fit the model over the full series and project `horizon` steps.
    ///
    /// Fails with `InsufficientData` when the series is shorter than one
    /// seasonal cycle.
    fn fit(&self, y: &[f64], horizon: usize) -> Result<ModelFit> {
        let n = y.len();
        let period = self.period;
        if n < period {
            return Err(ForecastError::too_short(n, period));
        }

        // Level starts at the mean of the first cycle, floored at 1.0 so the
        // seasonal division below cannot collapse.
        let mut init_level = y[..period].mean();
        if init_level <= 0.0 {
            init_level = 1.0;
        }

        // Trend starts at the mean period-over-period change when a second
        // full cycle exists.
        let init_trend = if n >= 2 * period {
            (0..period)
                .map(|i| (y[i + period] - y[i]) / period as f64)
                .sum::<f64>()
                / period as f64
        } else {
            0.0
        };

        let mut seasonal: Vec<f64> = y[..period].iter().map(|&v| v / init_level).collect();

        let mut level = init_level;
        let mut trend = init_trend;
        let mut fitted = vec![0.0; n];

        for t in 0..n {
            if t < period {
                // Initialization window: no real one-step prediction exists.
                fitted[t] = init_level * seasonal[t];
                continue;
            }

            let mut s_prev = seasonal[t - period];
            if s_prev <= 0.01 {
                s_prev = 0.01;
            }

            let new_level = self.alpha * (y[t] / s_prev) + (1.0 - self.alpha) * (level + trend);
            let new_trend = self.beta * (new_level - level) + (1.0 - self.beta) * trend;
            let new_seasonal =
                self.gamma * (y[t] / new_level.max(1.0)) + (1.0 - self.gamma) * s_prev;

            // One-step-ahead prediction made before seeing y[t].
            fitted[t] = (level + trend) * s_prev;

            level = new_level;
            trend = new_trend;
            seasonal.push(new_seasonal);
        }

        let mut forecasts = Vec::with_capacity(horizon);
        for i in 1..=horizon {
            let s_idx = seasonal.len() - period + ((i - 1) % period);
            let s_factor = seasonal.get(s_idx).copied().unwrap_or(1.0);
            let value = (level + i as f64 * trend) * s_factor;
            forecasts.push(value.max(0.0));
        }

        Ok(ModelFit { fitted, forecasts })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Grid-search the smoothing constants minimizing in-sample MSE.
///
/// The score skips the first `period` fitted values, which are pure
/// initialization rather than predictions. Candidates that fail to fit are
/// skipped; if none scores, the default triple is returned.
pub fn optimize(y: &[f64], period: usize) -> (f64, f64, f64) {
    let mut best_mse = f64::INFINITY;
    let mut best_params = DEFAULT_PARAMS;

    for &alpha in ALPHA_GRID.iter() {
        for &beta in BETA_GRID.iter() {
            for &gamma in GAMMA_GRID.iter() {
                let model = match HoltWinters::new(period, alpha, beta, gamma) {
                    Ok(m) => m,
                    Err(_) => continue,
                };
                let fit = match model.fit(y, 1) {
                    Ok(f) => f,
                    Err(_) => continue,
                };
                if y.len() <= period {
                    continue;
                }
                let mse = y[period..]
                    .iter()
                    .zip(fit.fitted[period..].iter())
                    .map(|(obs, pred)| (obs - pred).powi(2))
                    .sum::<f64>()
                    / (y.len() - period) as f64;
                if mse < best_mse {
                    best_mse = mse;
                    best_params = (alpha, beta, gamma);
                }
            }
        }
    }

    tracing::debug!(
        alpha = best_params.0,
        beta = best_params.1,
        gamma = best_params.2,
        mse = best_mse,
        "seasonal grid search complete"
    );

    best_params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SmoothingModel;

    #[test]
    fn rejects_period_below_two() {
        assert!(HoltWinters::new(1, 0.3, 0.05, 0.3).is_err());
    }

    #[test]
    fn rejects_out_of_range_constants() {
        assert!(HoltWinters::new(12, 0.0, 0.05, 0.3).is_err());
        assert!(HoltWinters::new(12, 0.3, 1.0, 0.3).is_err());
        assert!(HoltWinters::new(12, 0.3, 0.05, -0.1).is_err());
    }

    #[test]
    fn fails_when_series_shorter_than_one_cycle() {
        let model = HoltWinters::new(12, 0.3, 0.05, 0.3).unwrap();
        let y = vec![100.0; 11];
        assert!(model.fit(&y, 3).is_err());
    }

    #[test]
    fn initialization_window_reproduces_input() {
        // For t < period, fitted = level0 * (y[t] / level0) = y[t].
        let model = HoltWinters::new(4, 0.3, 0.05, 0.3).unwrap();
        let y = vec![100.0, 120.0, 90.0, 110.0, 105.0, 125.0, 95.0, 115.0];
        let fit = model.fit(&y, 2).unwrap();
        for t in 0..4 {
            assert!((fit.fitted[t] - y[t]).abs() < 1e-9);
        }
    }

    #[test]
    fn forecasts_are_floored_at_zero() {
        // Steep negative trend drives raw projections below zero.
        let model = HoltWinters::new(2, 0.9, 0.2, 0.05).unwrap();
        let y = vec![100.0, 100.0, 50.0, 50.0, 5.0, 5.0];
        let fit = model.fit(&y, 12).unwrap();
        assert!(fit.forecasts.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn optimizer_returns_grid_members() {
        let y: Vec<f64> = (0..48)
            .map(|t| 100.0 + (t % 12) as f64 * 3.0 + t as f64 * 0.5)
            .collect();
        let (a, b, g) = optimize(&y, 12);
        assert!(ALPHA_GRID.contains(&a));
        assert!(BETA_GRID.contains(&b));
        assert!(GAMMA_GRID.contains(&g));
    }

    #[test]
    fn optimizer_defaults_when_series_too_short() {
        let y = vec![100.0, 101.0, 102.0];
        assert_eq!(optimize(&y, 12), DEFAULT_PARAMS);
    }
}
