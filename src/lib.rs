//! # Price Forecast
//!
//! A Rust library for forecasting commodity prices from periodic aggregates.
//!
//! ## Features
//!
//! - Periodic aggregate series handling (daily, weekly, monthly)
//! - Holt-Winters multiplicative seasonal smoothing with automatic grid
//!   optimization of the smoothing constants
//! - Holt linear fallback model for short histories
//! - Rolling-origin cross-validation of forecast accuracy
//! - Calendar-month seasonality and recent-trend summaries
//! - Forecast payloads with widening confidence bands and decaying
//!   confidence scores
//!
//! Model selection is automatic: two full seasonal cycles of history select
//! the optimized seasonal model, one full cycle selects a conservative
//! seasonal fit, and anything shorter falls back to the trend model. The
//! whole computation is deterministic and stateless across calls.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use price_forecast::{forecast, Granularity, PeriodicAggregate};
//!
//! // 24 months of history
//! let series: Vec<PeriodicAggregate> = (0..24)
//!     .map(|i| {
//!         let date = NaiveDate::from_ymd_opt(2023 + i / 12, (i % 12) as u32 + 1, 1).unwrap();
//!         PeriodicAggregate::new(date, 100.0 + (i % 12) as f64 * 5.0)
//!     })
//!     .collect();
//!
//! let report = forecast(&series, 6, Granularity::Monthly).unwrap();
//!
//! assert_eq!(report.forecast.len(), 6);
//! assert_eq!(report.metrics.model_name, "seasonal-optimized");
//! ```

pub mod data;
pub mod error;
pub mod forecast;
pub mod metrics;
pub mod models;
pub mod seasonality;
mod validation;

// Re-export commonly used types
pub use crate::data::{DataLoader, Granularity, PeriodicAggregate};
pub use crate::error::{ForecastError, Result};
pub use crate::forecast::{forecast, ForecastPoint, ForecastReport, HistoricalPoint};
pub use crate::metrics::FitMetrics;
pub use crate::models::{HoltLinear, HoltWinters, ModelFit, ModelKind, SmoothingModel};
pub use crate::seasonality::{SeasonalFactor, TrendDirection, TrendSummary};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
