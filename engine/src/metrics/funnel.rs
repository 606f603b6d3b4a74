use shared::models::{CampaignTotals, FunnelStage, FunnelStep, PerformanceBand};

use super::bands::conversion_band;
use super::ratio::percentage;

/// Six fixed stages from impressions to purchases.
///
/// `percentage_of_first_step` is relative to impressions and
/// `conversion_from_previous` to the stage before. The first stage converts
/// at exactly 100; any stage after a zero stage converts at 0.
pub fn build_funnel(totals: &CampaignTotals) -> Vec<FunnelStep> {
    let values: Vec<u64> = FunnelStage::ALL.iter().map(|stage| stage.value_in(totals)).collect();
    let first = values[0] as f64;

    FunnelStage::ALL
        .iter()
        .zip(&values)
        .enumerate()
        .map(|(idx, (stage, &value))| FunnelStep {
            stage: *stage,
            name: stage.label().to_string(),
            value,
            percentage_of_first_step: percentage(value as f64, first),
            conversion_from_previous: match idx {
                0 => 100.0,
                _ => percentage(value as f64, values[idx - 1] as f64),
            },
        })
        .collect()
}

/// Rate from each step into the next one, for the arrows between stages.
/// The last step has no next stage and reads 0.
pub fn conversion_to_next(steps: &[FunnelStep]) -> Vec<f64> {
    steps
        .iter()
        .enumerate()
        .map(|(idx, step)| {
            steps
                .get(idx + 1)
                .map_or(0.0, |next| percentage(next.value as f64, step.value as f64))
        })
        .collect()
}

/// `conversion_to_next` with its color band, one entry per transition.
pub fn transition_bands(steps: &[FunnelStep]) -> Vec<(f64, PerformanceBand)> {
    let rates = conversion_to_next(steps);
    rates
        .iter()
        .take(steps.len().saturating_sub(1))
        .map(|&rate| (rate, conversion_band(rate)))
        .collect()
}
