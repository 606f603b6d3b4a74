use serde::Serialize;
use shared::models::{CampaignRecord, CampaignTotals, DerivedMetrics};

use super::ratio::{per_thousand, percentage, ratio};

/// CTR, CPC, CPM, ROAS, conversion rate and cost per purchase of `totals`.
/// Each one is 0 when its denominator is 0.
pub fn compute_kpis(totals: &CampaignTotals) -> DerivedMetrics {
    let impressions = totals.impressions as f64;
    let clicks = totals.link_clicks as f64;

    DerivedMetrics {
        ctr: percentage(clicks, impressions),
        cpc: ratio(totals.spend, clicks),
        cpm: per_thousand(totals.spend, impressions),
        roas: ratio(totals.revenue, totals.spend),
        conversion_rate: percentage(totals.purchases as f64, clicks),
        cost_per_purchase: ratio(totals.spend, totals.purchases as f64),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct KpiSummary {
    pub totals: CampaignTotals,
    pub metrics: DerivedMetrics,
}

pub fn summarize(records: &[CampaignRecord]) -> KpiSummary {
    let totals: CampaignTotals = records.iter().collect();
    KpiSummary {
        totals,
        metrics: compute_kpis(&totals),
    }
}
