//! Periodic price aggregates and their ingestion

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One aggregated time bucket: a single representative price per period,
/// optionally with a price range and traded volume.
///
/// Aggregates are produced by an external data source (SQL aggregation in
/// production, CSV files in tests and demos) and are treated as immutable
/// input: ascending by period, one entry per period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodicAggregate {
    /// Period start date, truncated to the day/week/month boundary
    pub period: NaiveDate,
    /// Average price observed in the period (strictly positive)
    pub average_price: f64,
    /// Minimum price observed in the period, if recorded
    pub min_price: Option<f64>,
    /// Maximum price observed in the period, if recorded
    pub max_price: Option<f64>,
    /// Traded volume in the period, if recorded
    pub volume: Option<f64>,
    /// Number of raw records aggregated into this period
    #[serde(default)]
    pub record_count: u32,
}

impl PeriodicAggregate {
    /// Create an aggregate carrying only a period and an average price.
    pub fn new(period: NaiveDate, average_price: f64) -> Self {
        Self {
            period,
            average_price,
            min_price: None,
            max_price: None,
            volume: None,
            record_count: 1,
        }
    }

    /// Volume with missing values read as zero.
    pub fn volume_or_zero(&self) -> f64 {
        self.volume.unwrap_or(0.0)
    }
}

/// Aggregation granularity of the input series.
///
/// Fixes the seasonal period length and the advisory minimum sample size
/// used in insufficient-data messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One aggregate per day
    Daily,
    /// One aggregate per ISO week
    Weekly,
    /// One aggregate per calendar month
    Monthly,
}

impl Granularity {
    /// Number of periods forming one full seasonal cycle.
    pub fn seasonal_period(&self) -> usize {
        match self {
            Granularity::Daily => 7,
            Granularity::Weekly => 52,
            Granularity::Monthly => 12,
        }
    }

    /// Number of periods in a year, used to annualize trend slopes.
    pub fn periods_per_year(&self) -> f64 {
        match self {
            Granularity::Daily => 365.0,
            Granularity::Weekly => 52.0,
            Granularity::Monthly => 12.0,
        }
    }

    /// Advisory minimum sample size surfaced in insufficient-data errors.
    /// The hard gate is three observations regardless of granularity.
    pub fn min_samples(&self) -> usize {
        match self {
            Granularity::Daily => 14,
            Granularity::Weekly => 26,
            Granularity::Monthly => 6,
        }
    }

    /// Period unit label for messages.
    pub fn unit(&self) -> &'static str {
        match self {
            Granularity::Daily => "days",
            Granularity::Weekly => "weeks",
            Granularity::Monthly => "months",
        }
    }
}

/// Loader for periodic aggregate series
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a periodic aggregate series from a CSV file.
    ///
    /// Expected header: `period,average_price,min_price,max_price,volume,record_count`
    /// with `period` as an ISO date. Optional columns may be empty.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<PeriodicAggregate>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut series = Vec::new();
        for record in reader.deserialize() {
            let aggregate: PeriodicAggregate = record?;
            series.push(aggregate);
        }
        Self::validate(&series)?;
        Ok(series)
    }

    /// Validate an aggregate series: non-empty, strictly ascending periods
    /// (which also rules out duplicates) and strictly positive average prices.
    pub fn validate(series: &[PeriodicAggregate]) -> Result<()> {
        if series.is_empty() {
            return Err(ForecastError::DataError(
                "Empty aggregate series".to_string(),
            ));
        }

        for window in series.windows(2) {
            if window[1].period <= window[0].period {
                return Err(ForecastError::DataError(format!(
                    "Periods must be strictly ascending: {} followed by {}",
                    window[0].period, window[1].period
                )));
            }
        }

        if let Some(bad) = series.iter().find(|a| a.average_price <= 0.0) {
            return Err(ForecastError::DataError(format!(
                "Non-positive average price {} at {}",
                bad.average_price, bad.period
            )));
        }

        Ok(())
    }
}
