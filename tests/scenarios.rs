//! End-to-end funnel scenarios

use approx::assert_relative_eq;
use funnel_stats::prelude::*;
use funnel_stats::funnel_limits::PointStatus;
use funnel_stats::funnel_pipeline::DispersionSetting;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn observations(rows: &[(f64, f64)]) -> Vec<Observation> {
    rows.iter()
        .enumerate()
        .map(|(i, &(n, d))| Observation::new(i, n, d, format!("Unit {i}")))
        .collect()
}

#[test]
fn equal_ratios_have_no_overdispersion_and_no_outliers() {
    let engine = FunnelEngine::new(FunnelConfig::default()).unwrap();
    let result = engine
        .compute(&observations(&[(10.0, 100.0), (20.0, 200.0), (5.0, 50.0)]))
        .unwrap();

    assert_relative_eq!(result.target, 35.0 / 350.0, epsilon = 1e-9);
    assert_relative_eq!(result.phi, 1.0, epsilon = 1e-9);
    assert_eq!(result.two_sigma_outliers().count(), 0);
    assert_eq!(result.three_sigma_outliers().count(), 0);
}

#[test]
fn zero_denominator_row_is_reported_and_excluded() {
    init_tracing();
    let rows = [(10.0, 100.0), (7.0, 0.0), (20.0, 200.0), (5.0, 50.0)];
    let engine = FunnelEngine::new(FunnelConfig::default()).unwrap();
    let with_bad = engine.compute(&observations(&rows)).unwrap();

    assert_eq!(with_bad.warnings.len(), 1);
    assert_eq!(with_bad.warnings[0].id, 1);
    assert!(with_bad.points.iter().all(|p| p.id != 1));

    let clean: Vec<Observation> = observations(&rows)
        .into_iter()
        .filter(|o| o.denominator > 0.0)
        .collect();
    let without = engine.compute(&clean).unwrap();
    assert_relative_eq!(with_bad.target, without.target, epsilon = 1e-12);
    assert_relative_eq!(with_bad.phi, without.phi, epsilon = 1e-12);
    assert_eq!(with_bad.limits, without.limits);
}

#[test]
fn manual_phi_of_four_doubles_limit_width() {
    let rows = [(10.0, 100.0), (20.0, 200.0), (5.0, 50.0), (40.0, 400.0)];

    let unadjusted = FunnelEngine::new(FunnelConfig {
        dispersion_mode: DispersionSetting::Manual,
        manual_phi: Some(1.0),
        chart_type: ChartTypeKind::StandardisedRatio,
        ..Default::default()
    })
    .unwrap()
    .compute(&observations(&rows))
    .unwrap();

    let adjusted = FunnelEngine::new(FunnelConfig {
        dispersion_mode: DispersionSetting::Manual,
        manual_phi: Some(4.0),
        chart_type: ChartTypeKind::StandardisedRatio,
        ..Default::default()
    })
    .unwrap()
    .compute(&observations(&rows))
    .unwrap();

    assert_eq!(adjusted.phi, 4.0);
    for (base, wide) in unadjusted.limits.iter().zip(&adjusted.limits) {
        assert_eq!(base.denominator, wide.denominator);
        let base_half = base.ul99.unwrap() - base.target;
        let wide_half = wide.ul99.unwrap() - wide.target;
        assert_relative_eq!(wide_half, 2.0 * base_half, epsilon = 1e-12);
        let base_inner = base.ul95.unwrap() - base.target;
        let wide_inner = wide.ul95.unwrap() - wide.target;
        assert_relative_eq!(wide_inner, 2.0 * base_inner, epsilon = 1e-12);
    }
}

#[test]
fn no_valid_rows_is_nothing_to_display() {
    let engine = FunnelEngine::new(FunnelConfig::default()).unwrap();
    let err = engine
        .compute(&observations(&[(1.0, 0.0), (2.0, -5.0)]))
        .unwrap_err();
    assert!(err.is_insufficient_data());
}

#[test]
fn unknown_chart_type_is_fatal() {
    let err = FunnelEngine::from_json(r#"{ "chart_type": "XR" }"#).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn upper_only_direction_never_flags_low_groups() {
    let mut rows = vec![(100.0, 1000.0); 8];
    rows.push((20.0, 1000.0));
    rows.push((250.0, 1000.0));
    let both = FunnelEngine::new(FunnelConfig::default())
        .unwrap()
        .compute(&observations(&rows))
        .unwrap();
    assert!(both.points[8].flags.three_sigma);
    assert!(both.points[9].flags.three_sigma);
    assert!(!both.points[0].flags.any());

    let upper = FunnelEngine::new(FunnelConfig {
        outlier_direction: OutlierDirection::Upper,
        ..Default::default()
    })
    .unwrap()
    .compute(&observations(&rows))
    .unwrap();
    assert!(!upper.points[8].flags.any());
    assert!(upper.points[9].flags.three_sigma);
}

#[test]
fn percentage_display_and_tooltips() {
    let engine = FunnelEngine::from_json(r#"{ "multiplier": 100, "sig_figs": 1 }"#).unwrap();
    let result = engine
        .compute(&observations(&[(10.0, 100.0), (20.0, 200.0), (5.0, 50.0)]))
        .unwrap();

    let point = &result.points[0];
    assert_relative_eq!(point.display_value, 10.0, epsilon = 1e-9);
    let centerline = point
        .tooltip
        .iter()
        .find(|t| t.display_name == "Centerline")
        .unwrap();
    assert_eq!(centerline.value, "10.0%");

    let target_curve = result.series.renderable(LimitLabel::Target);
    assert!(target_curve.iter().all(|&(_, v)| (v - 10.0).abs() < 1e-9));
}

#[test]
fn small_denominators_leave_gaps_in_lower_limit() {
    let engine = FunnelEngine::new(FunnelConfig::default()).unwrap();
    let result = engine
        .compute(&observations(&[(1.0, 5.0), (100.0, 1000.0), (40.0, 400.0)]))
        .unwrap();

    let ll99 = result.series.get(LimitLabel::Ll99).unwrap();
    assert_eq!(ll99[0].denominator, 5.0);
    assert_eq!(ll99[0].status, PointStatus::Undefined);
    assert_eq!(ll99[0].value, None);
    assert_eq!(ll99[2].status, PointStatus::Valid);
}

#[test]
fn repeated_computation_is_deterministic() {
    let engine = FunnelEngine::from_json(r#"{ "grid_points": 30, "alt_target": 0.12 }"#).unwrap();
    let rows = observations(&[(3.0, 40.0), (30.0, 250.0), (80.0, 900.0), (14.0, 90.0)]);
    assert_eq!(engine.compute(&rows).unwrap(), engine.compute(&rows).unwrap());
}

#[test]
fn result_serializes_to_json() -> anyhow::Result<()> {
    let engine = FunnelEngine::new(FunnelConfig::default())?;
    let result = engine.compute(&observations(&[(10.0, 100.0), (2.0, 0.0)]))?;
    let json: serde_json::Value = serde_json::from_str(&result.to_json()?)?;
    assert!(json["series"]["series"]["ul99"].is_array());
    assert_eq!(json["warnings"][0]["id"], 1);
    Ok(())
}
