use serde::Serialize;

use super::{aggregate, AggregatedTotals, Grouping};
use shared::models::CampaignRecord;

/// A campaign is only the same row of the table when both name and source match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CampaignKey {
    pub campaign: String,
    pub source: String,
}

pub struct ByCampaign;

impl Grouping for ByCampaign {
    type Key = CampaignKey;

    fn name(&self) -> &str {
        "campaign"
    }

    fn key(&self, record: &CampaignRecord) -> CampaignKey {
        CampaignKey {
            campaign: record.campaign.clone(),
            source: record.source.clone(),
        }
    }
}

/// Keys by campaign name alone, ignoring the source.
pub struct ByCampaignName;

impl Grouping for ByCampaignName {
    type Key = String;

    fn name(&self) -> &str {
        "campaign_name"
    }

    fn key(&self, record: &CampaignRecord) -> String {
        record.campaign.clone()
    }
}

pub fn unique_campaigns(records: &[CampaignRecord]) -> Vec<AggregatedTotals<CampaignKey>> {
    aggregate(records, &ByCampaign).into_entries()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::test_support::{record, with_metrics};

    #[test]
    fn test_campaign_and_source_form_the_key() {
        let records = vec![
            with_metrics(record("A", "facebook", "ad1", "01/01/2024"), 10.0, 100, 10, 1, 40.0),
            with_metrics(record("A", "google", "ad1", "01/01/2024"), 5.0, 50, 5, 0, 0.0),
            with_metrics(record("A", "facebook", "ad2", "02/01/2024"), 2.0, 20, 2, 1, 8.0),
        ];
        let campaigns = unique_campaigns(&records);

        assert_eq!(campaigns.len(), 2);
        assert_eq!(campaigns[0].key, CampaignKey { campaign: "A".into(), source: "facebook".into() });
        assert_eq!(campaigns[0].totals.spend, 12.0);
        assert_eq!(campaigns[0].totals.revenue, 48.0);
        assert_eq!(campaigns[1].key.source, "google");
    }

    #[test]
    fn test_separator_characters_do_not_collide() {
        // Joined as text these would both read "a-b-c".
        let records = vec![record("a-b", "c", "x", ""), record("a", "b-c", "x", "")];
        assert_eq!(unique_campaigns(&records).len(), 2);
    }

    #[test]
    fn test_by_campaign_name_ignores_source() {
        let records = vec![record("A", "facebook", "ad1", ""), record("A", "google", "ad2", "")];
        assert_eq!(aggregate(&records, &ByCampaignName).len(), 1);
    }
}
