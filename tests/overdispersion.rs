//! Dispersion behaviour on simulated binomial data

use funnel_stats::funnel_pipeline::DispersionSetting;
use funnel_stats::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Binomial, Normal};

/// Groups of varying size with event probability `0.1 * exp(N(0, sd))`
fn simulate(seed: u64, groups: usize, between_group_sd: f64) -> Vec<Observation> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let log_effect = Normal::new(0.0, between_group_sd).unwrap();

    (0..groups)
        .map(|i| {
            let n: u64 = rng.gen_range(200..3000);
            let p = (0.1 * log_effect.sample(&mut rng).exp()).clamp(0.001, 0.999);
            let events = Binomial::new(n, p).unwrap().sample(&mut rng);
            Observation::new(i, events as f64, n as f64, format!("Trust {i}"))
        })
        .collect()
}

#[test]
fn binomial_data_is_not_overdispersed() {
    let data = simulate(7, 200, 0.0);
    let result = FunnelEngine::new(FunnelConfig::default())
        .unwrap()
        .compute(&data)
        .unwrap();

    assert!(result.phi >= 1.0);
    assert!(result.phi < 1.5, "phi = {}", result.phi);
    // 0.2% expected beyond the outer band
    assert!(result.three_sigma_outliers().count() <= 4);
}

#[test]
fn between_group_variation_inflates_phi() {
    let data = simulate(42, 200, 0.3);
    let target = PooledTarget.estimate(&data).unwrap();
    let phi = WinsorizedDispersion::default()
        .estimate(&data, target, &ChartTypeKind::Proportion)
        .unwrap();

    assert!(phi > 2.0, "phi = {phi}");
    // Fixed winsorization caps every squared residual at 9
    assert!(phi <= 9.0);
}

#[test]
fn adjustment_reduces_false_alarms() {
    let data = simulate(1234, 200, 0.3);

    let adjusted = FunnelEngine::new(FunnelConfig::default())
        .unwrap()
        .compute(&data)
        .unwrap();
    let unadjusted = FunnelEngine::new(FunnelConfig {
        dispersion_mode: DispersionSetting::Manual,
        manual_phi: Some(1.0),
        ..Default::default()
    })
    .unwrap()
    .compute(&data)
    .unwrap();

    let flagged_adjusted = adjusted.three_sigma_outliers().count();
    let flagged_unadjusted = unadjusted.three_sigma_outliers().count();
    assert!(
        flagged_adjusted < flagged_unadjusted,
        "{flagged_adjusted} vs {flagged_unadjusted}"
    );
}

#[test]
fn quantile_winsorization_is_less_sensitive_to_gross_outliers() {
    let mut data = simulate(99, 100, 0.0);
    for obs in data.iter_mut().take(5) {
        obs.numerator = obs.denominator * 0.6;
    }
    let target = PooledTarget.estimate(&data).unwrap();
    let model = ChartTypeKind::Proportion;

    let raw = WinsorizedDispersion::new(Winsorization::None)
        .raw_ratio(&data, target, &model)
        .unwrap();
    let quantile = WinsorizedDispersion::new(Winsorization::quantile_default())
        .raw_ratio(&data, target, &model)
        .unwrap();
    assert!(quantile < raw);
}
