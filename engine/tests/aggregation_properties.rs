use engine::aggregation::by_campaign::ByCampaign;
use engine::aggregation::{aggregate, group_and_sum};
use engine::metrics::kpi::compute_kpis;
use proptest::prelude::*;
use proptest::test_runner::Config;
use shared::models::CampaignRecord;

fn arb_record() -> impl Strategy<Value = CampaignRecord> {
    (
        prop::sample::select(vec!["Promo", "Brand", "Retarget"]),
        prop::sample::select(vec!["facebook", "google"]),
        prop::sample::select(vec!["ad1", "ad2", "ad3", ""]),
        0_u64..1_000_000,
        0_u64..100_000,
        0_u64..5_000,
        0_u64..100,
        0_u64..1_000_000,
    )
        .prop_map(|(campaign, source, ad_name, spend_cents, impressions, clicks, purchases, revenue_cents)| {
            CampaignRecord {
                campaign: campaign.to_string(),
                source: source.to_string(),
                ad_name: ad_name.to_string(),
                spend: spend_cents as f64 / 100.0,
                impressions,
                link_clicks: clicks,
                purchases,
                revenue: revenue_cents as f64 / 100.0,
                ..Default::default()
            }
        })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn grouping_a_split_equals_merging_the_halves(
        records in prop::collection::vec(arb_record(), 0..40),
        split in 0_usize..40,
    ) {
        let split = split.min(records.len());
        let (left, right) = records.split_at(split);

        let whole = group_and_sum(&records, |r| r.ad_name.clone());
        let merged = group_and_sum(left, |r| r.ad_name.clone()).merge(&group_and_sum(right, |r| r.ad_name.clone()));

        prop_assert_eq!(whole.keys().collect::<Vec<_>>(), merged.keys().collect::<Vec<_>>());
        for entry in whole.iter() {
            let other = merged.get(&entry.key).unwrap();
            prop_assert_eq!(entry.totals.impressions, other.totals.impressions);
            prop_assert_eq!(entry.totals.link_clicks, other.totals.link_clicks);
            prop_assert_eq!(entry.totals.purchases, other.totals.purchases);
            prop_assert!(close(entry.totals.spend, other.totals.spend));
            prop_assert!(close(entry.totals.revenue, other.totals.revenue));
            prop_assert_eq!(&entry.first_seen, &other.first_seen);
        }
    }

    #[test]
    fn derived_metrics_are_finite_and_guarded(records in prop::collection::vec(arb_record(), 0..20)) {
        for entry in aggregate(&records, &ByCampaign).iter() {
            let metrics = compute_kpis(&entry.totals);
            prop_assert!(metrics.ctr.is_finite() && metrics.cpc.is_finite() && metrics.cpm.is_finite());
            prop_assert!(metrics.roas.is_finite());
            if entry.totals.impressions == 0 {
                prop_assert_eq!(metrics.ctr, 0.0);
                prop_assert_eq!(metrics.cpm, 0.0);
            }
            if entry.totals.link_clicks == 0 {
                prop_assert_eq!(metrics.cpc, 0.0);
            }
            if entry.totals.spend == 0.0 {
                prop_assert_eq!(metrics.roas, 0.0);
            }
        }
    }
}
