//! Funnel plot for a small set of hospital mortality proportions
//!
//! Run with `RUST_LOG=debug` to see the estimator output.

use funnel_core::Observation;
use funnel_limits::LimitLabel;
use funnel_pipeline::{FunnelConfig, FunnelEngine};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Funnel Plot Demo ===\n");

    let hospitals = vec![
        Observation::new(0, 12.0, 150.0, "Ashby"),
        Observation::new(1, 30.0, 420.0, "Brook Lane"),
        Observation::new(2, 8.0, 60.0, "Castlegate"),
        Observation::new(3, 41.0, 800.0, "Dunmore"),
        Observation::new(4, 19.0, 95.0, "Elmfield"),
        Observation::new(5, 55.0, 1200.0, "Fairview"),
        Observation::new(6, 3.0, 0.0, "Glenholm"), // no admissions recorded
    ];

    let config = FunnelConfig::from_json(
        r#"{
            "chart_type": "PR",
            "multiplier": 100,
            "sig_figs": 1,
            "grid_points": 50
        }"#,
    )?;
    let engine = FunnelEngine::new(config)?;
    let result = engine.compute(&hospitals)?;

    println!("Target:     {:.4}", result.target);
    println!("Dispersion: {:.4}", result.phi);
    println!("Limit records: {}", result.limits.len());

    for warning in &result.warnings {
        println!("Warning: {warning}");
    }

    println!("\n--- Observations ---");
    for point in &result.points {
        let marker = match (point.flags.three_sigma, point.flags.two_sigma) {
            (true, _) => "***",
            (false, true) => "*",
            _ => "",
        };
        println!(
            "{:<12} {:>6.1}% (n = {:>6.0}) {}",
            point.category, point.display_value, point.denominator, marker
        );
    }

    println!("\n--- Tooltip: {} ---", result.points[4].category);
    for item in &result.points[4].tooltip {
        println!("  {}: {}", item.display_name, item.value);
    }

    println!("\n--- Upper 99.8% curve (first five points) ---");
    for (denominator, value) in result.series.renderable(LimitLabel::Ul99).iter().take(5) {
        println!("  n = {denominator:>7.1}: {value:.2}%");
    }

    Ok(())
}
