use engine::data::csv_parser::{split_fields, CampaignCsvParser};
use engine::metrics::creatives::{creative_cards, gallery_summary};
use engine::metrics::funnel::build_funnel;
use engine::metrics::kpi::summarize;
use proptest::prelude::*;
use proptest::test_runner::Config;

const HEADER: &str = "campaign,date,source,spend,impressions,actions_link_click,actions_landing_page_view,thumbnail_url,ad_name,actions_add_to_cart,actions_initiate_checkout,actions_offsite_conversion_fb_pixel_purchase,actions_post_engagement,adset_name,action_values_omni_purchase";

fn sheet(rows: &[String]) -> String {
    let mut lines = vec![HEADER.to_string()];
    lines.extend_from_slice(rows);
    lines.join("\r\n")
}

#[test]
fn oversized_counters_saturate_through_the_pipeline() {
    let row = "CampA,05/03/2024,facebook,\"10,00\",99999999999999999999,99999999999999999999,1,,adX,0,0,0,0,setY,\"0,00\"";
    let records = CampaignCsvParser::parse_campaigns(&sheet(&[row.to_string(), row.to_string()]));
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].impressions, u64::MAX);

    let summary = summarize(&records);
    assert_eq!(summary.totals.impressions, u64::MAX);
    assert_eq!(summary.totals.link_clicks, u64::MAX);
    assert_eq!(summary.totals.landing_page_views, 2);
    assert!(summary.metrics.ctr.is_finite());

    let gallery = gallery_summary(&creative_cards(&records));
    assert_eq!(gallery.total_impressions, u64::MAX);
    assert_eq!(build_funnel(&summary.totals)[0].value, u64::MAX);
}

#[test]
fn extreme_date_cells_do_not_stop_the_report() {
    let row = "CampA,-9223372036854775808/01/2024,facebook,\"10,00\",100,5,1,,adX,0,0,0,0,setY,\"0,00\"";
    let records = CampaignCsvParser::parse_campaigns(&sheet(&[row.to_string()]));
    assert_eq!(records[0].parsed_date(), None);
    assert_eq!(engine::aggregation::by_date::performance_series(&records).len(), 1);
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn field_splitting_never_panics(line in "\\PC*") {
        let fields = split_fields(&line);
        prop_assert!(!fields.is_empty());
    }

    #[test]
    fn campaign_parsing_never_panics(text in "\\PC*") {
        let _ = CampaignCsvParser::parse_campaigns(&text);
        let _ = CampaignCsvParser::parse_demographics(&text);
    }

    #[test]
    fn arbitrary_rows_summarize_and_build_a_funnel(
        rows in prop::collection::vec("[^\r\n]*", 0..8),
    ) {
        let records = CampaignCsvParser::parse_campaigns(&sheet(&rows));
        let summary = summarize(&records);
        let metrics = summary.metrics;
        prop_assert!(metrics.ctr.is_finite() && metrics.cpc.is_finite() && metrics.cpm.is_finite());
        prop_assert!(metrics.roas.is_finite());

        let funnel = build_funnel(&summary.totals);
        prop_assert_eq!(funnel.len(), 6);
        prop_assert!(funnel.iter().all(|step| step.conversion_from_previous.is_finite()));
    }
}
