use chrono::NaiveDate;
use price_forecast::{forecast, Granularity, PeriodicAggregate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Price Forecast: Basic Forecasting Example");
    println!("=========================================\n");

    // Create sample data: three years of monthly aggregates with a seasonal
    // swing and a slow upward drift.
    println!("Creating sample data...");
    let series = create_sample_monthly_data();
    println!("Sample data created: {} monthly aggregates\n", series.len());

    // Forecast a year ahead
    println!("Forecasting 12 months ahead...");
    let report = forecast(&series, 12, Granularity::Monthly)?;

    println!(
        "Model: {} (r^2 = {:.3}, MAPE = {:.1}%, cv MAPE = {:.1}%)\n",
        report.metrics.model_name,
        report.metrics.r_squared,
        report.metrics.in_sample_mape,
        report.metrics.cross_validated_mape,
    );

    println!("Forecast with 95% bands:");
    for point in &report.forecast {
        println!(
            "  {}: {:8.1}  ({:8.1} .. {:8.1})  confidence {:3}",
            point.period,
            point.point_estimate,
            point.lower_bound,
            point.upper_bound,
            point.confidence
        );
    }

    println!("\nSeasonal factors:");
    for factor in &report.seasonality {
        println!(
            "  {:>9}: {:.3} ({:+.1}%)",
            factor.month_name, factor.factor, factor.relative_variation_pct
        );
    }

    println!(
        "\nRecent trend: {:?}, {:+.1} per month ({:+.1}% annualized)",
        report.trend.direction, report.trend.per_period_change, report.trend.annualized_change_pct
    );

    // The full payload serializes for the service layer
    let json = serde_json::to_string_pretty(&report.metrics)?;
    println!("\nMetrics payload:\n{json}");

    Ok(())
}

fn create_sample_monthly_data() -> Vec<PeriodicAggregate> {
    (0..36)
        .map(|i| {
            let year = 2022 + i / 12;
            let month = (i % 12) as u32 + 1;
            let price = 1000.0 + (month as f64 - 6.5).abs() * 40.0 + i as f64 * 5.0;
            let mut aggregate = PeriodicAggregate::new(
                NaiveDate::from_ymd_opt(year, month, 1).expect("valid date"),
                price,
            );
            aggregate.min_price = Some(price - 50.0);
            aggregate.max_price = Some(price + 50.0);
            aggregate.volume = Some(800.0 + month as f64 * 10.0);
            aggregate
        })
        .collect()
}
