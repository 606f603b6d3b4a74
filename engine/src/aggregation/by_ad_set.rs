use super::{aggregate, AggregatedTotals, Grouping};
use shared::models::CampaignRecord;

pub struct ByAdSet;

impl Grouping for ByAdSet {
    type Key = String;

    fn name(&self) -> &str {
        "ad_set"
    }

    fn key(&self, record: &CampaignRecord) -> String {
        record.ad_set_name.clone()
    }
}

pub fn unique_ad_sets(records: &[CampaignRecord]) -> Vec<AggregatedTotals<String>> {
    aggregate(records, &ByAdSet).into_entries()
}
