//! Smoothing models and the model selection policy

use crate::error::Result;
use std::fmt::Debug;

pub mod holt_linear;
pub mod holt_winters;

pub use holt_linear::HoltLinear;
pub use holt_winters::HoltWinters;

/// Output of a single model fit: one-step fitted values aligned to the input
/// series plus point forecasts for the requested horizon.
///
/// The working level/trend/seasonal arrays live only inside the fit and are
/// discarded once this struct is produced.
#[derive(Debug, Clone)]
pub struct ModelFit {
    /// One fitted value per input observation
    pub fitted: Vec<f64>,
    /// One point forecast per future step, floored at zero
    pub forecasts: Vec<f64>,
}

/// A smoothing model that fits a price series in one pass and projects a
/// horizon. Implementations are pure: identical input always produces
/// identical output.
pub trait SmoothingModel: Debug {
    /// Fit the full series and forecast `horizon` steps ahead.
    fn fit(&self, y: &[f64], horizon: usize) -> Result<ModelFit>;

    /// Human-readable model description.
    fn name(&self) -> &str;
}

/// Which model family the selection policy ended up using.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Holt-Winters with grid-optimized constants (n >= 2 cycles)
    SeasonalOptimized,
    /// Holt-Winters with the fixed conservative triple (1 <= n/p < 2)
    SeasonalConservative,
    /// Holt linear with optimized alpha (under one cycle of history)
    TrendFallback,
}

impl ModelKind {
    /// Stable tag used in the metrics payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::SeasonalOptimized => "seasonal-optimized",
            ModelKind::SeasonalConservative => "seasonal-conservative",
            ModelKind::TrendFallback => "trend-fallback",
        }
    }

    /// Whether the fitted values carry a full seasonal initialization window.
    pub(crate) fn is_seasonal(&self) -> bool {
        matches!(
            self,
            ModelKind::SeasonalOptimized | ModelKind::SeasonalConservative
        )
    }
}

/// The fitted model chosen by the selection policy, with the smoothing
/// constants kept around so the cross-validator can refit truncated series
/// under the same parameters.
#[derive(Debug, Clone)]
pub(crate) struct Selection {
    pub kind: ModelKind,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub fit: ModelFit,
}

/// Select and fit a model for `prices` with seasonal cycle length `period`.
///
/// - two full cycles or more: Holt-Winters with grid-optimized constants;
/// - at least one full cycle: Holt-Winters with the conservative triple,
///   degrading to Holt linear if the seasonal fit fails anyway;
/// - under one cycle: Holt linear with optimized alpha.
///
/// Callers gate out series shorter than three observations before selection.
pub(crate) fn select_and_fit(prices: &[f64], period: usize, horizon: usize) -> Result<Selection> {
    let n = prices.len();

    if n >= 2 * period {
        let (alpha, beta, gamma) = holt_winters::optimize(prices, period);
        let fit = HoltWinters::new(period, alpha, beta, gamma)?.fit(prices, horizon)?;
        tracing::debug!(n, period, alpha, beta, gamma, "selected seasonal-optimized model");
        return Ok(Selection {
            kind: ModelKind::SeasonalOptimized,
            alpha,
            beta,
            gamma,
            fit,
        });
    }

    if n >= period {
        let (alpha, beta, gamma) = holt_winters::DEFAULT_PARAMS;
        match HoltWinters::new(period, alpha, beta, gamma)?.fit(prices, horizon) {
            Ok(fit) => {
                tracing::debug!(n, period, "selected seasonal-conservative model");
                return Ok(Selection {
                    kind: ModelKind::SeasonalConservative,
                    alpha,
                    beta,
                    gamma,
                    fit,
                });
            }
            Err(err) => {
                tracing::debug!(n, period, %err, "seasonal fit failed, degrading to trend model");
            }
        }
    }

    let alpha = holt_linear::optimize(prices);
    let fit = HoltLinear::new(alpha)?.fit(prices, horizon)?;
    tracing::debug!(n, alpha, "selected trend-fallback model");
    Ok(Selection {
        kind: ModelKind::TrendFallback,
        alpha,
        beta: 0.0,
        gamma: 0.0,
        fit,
    })
}
