// Creatives are identified by ad name alone: the same ad name in different
// campaigns or sources is one creative.
use super::{aggregate, AggregatedTotals, Grouping};
use shared::models::CampaignRecord;

pub struct ByCreative;

impl Grouping for ByCreative {
    type Key = String;

    fn name(&self) -> &str {
        "creative"
    }

    fn key(&self, record: &CampaignRecord) -> String {
        record.ad_name.clone()
    }
}

/// One entry per ad name, in first-seen order.
pub fn unique_creatives(records: &[CampaignRecord]) -> Vec<AggregatedTotals<String>> {
    aggregate(records, &ByCreative).into_entries()
}
