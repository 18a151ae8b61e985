use chrono::{Datelike, NaiveDate};
use price_forecast::{forecast, DataLoader, Granularity, PeriodicAggregate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use tempfile::NamedTempFile;

// Helper function to create a three-year monthly CSV fixture
fn create_sample_data() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "period,average_price,min_price,max_price,volume,record_count"
    )
    .unwrap();

    for i in 0..36 {
        let year = 2022 + i / 12;
        let month = i % 12 + 1;
        // Seasonal swing plus a slow climb.
        let price = 1000.0 + (month as f64 - 6.5).abs() * 40.0 + i as f64 * 5.0;
        writeln!(
            file,
            "{year}-{month:02}-01,{price},{},{},{volume},30",
            price - 50.0,
            price + 50.0,
            volume = 800 + month * 10,
        )
        .unwrap();
    }

    file
}

#[test]
fn full_forecast_workflow_from_csv() {
    // 1. Load and validate the series
    let data_file = create_sample_data();
    let series = DataLoader::from_csv(data_file.path()).unwrap();
    assert_eq!(series.len(), 36);

    // 2. Forecast a year ahead
    let report = forecast(&series, 12, Granularity::Monthly).unwrap();

    // 3. Three full years select the optimized seasonal model
    assert_eq!(report.metrics.model_name, "seasonal-optimized");
    assert_eq!(report.metrics.sample_size, 36);
    assert_eq!(report.forecast.len(), 12);
    assert_eq!(report.historical.len(), 36);

    // 4. The fitted history is echoed back aligned to input periods
    for (point, aggregate) in report.historical.iter().zip(series.iter()) {
        assert_eq!(point.period, aggregate.period);
        assert_eq!(point.average_price, aggregate.average_price);
    }

    // 5. Forecast periods continue the calendar month by month
    let mut expected = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    for point in &report.forecast {
        assert_eq!(point.period, expected);
        expected = NaiveDate::from_ymd_opt(
            expected.year() + (expected.month() / 12) as i32,
            expected.month() % 12 + 1,
            1,
        )
        .unwrap();
    }

    // 6. The payload serializes to JSON for the service layer
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"seasonal-optimized\""));
}

#[test]
fn noisy_seasonal_series_still_yields_sane_report() {
    // Seeded noise keeps this reproducible run to run.
    let mut rng = StdRng::seed_from_u64(42);
    let series: Vec<PeriodicAggregate> = (0..48)
        .map(|i| {
            let year = 2021 + i / 12;
            let month = (i % 12) as u32 + 1;
            let price = 500.0
                + (month as f64 * 0.5236).sin() * 80.0
                + rng.gen_range(-25.0..25.0);
            PeriodicAggregate::new(
                NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
                price.max(1.0),
            )
        })
        .collect();

    let report = forecast(&series, 6, Granularity::Monthly).unwrap();

    assert_eq!(report.forecast.len(), 6);
    assert!(report.metrics.r_squared >= 0.0 && report.metrics.r_squared <= 1.0);
    assert!(report.metrics.in_sample_mape >= 0.0);
    assert!(report.metrics.cross_validated_mape >= 0.0);
    assert!(report.metrics.residual_std_error >= 0.0);
    for point in &report.forecast {
        assert!(point.point_estimate >= 0.0);
        assert!(point.lower_bound <= point.point_estimate);
        assert!(point.point_estimate <= point.upper_bound);
        assert!(point.confidence <= 100);
    }
}
