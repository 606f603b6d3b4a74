// Creative gallery: one card per ad name, rankings and the summary row.
use serde::{Deserialize, Serialize};
use shared::models::{CampaignRecord, CampaignTotals, CreativeFormat, DerivedMetrics};

use super::kpi::compute_kpis;
use super::ratio::{count_ratio, per_thousand, percentage, ratio};
use crate::aggregation::by_creative::unique_creatives;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreativeRanking {
    /// First-seen order.
    #[default]
    All,
    BestCtr,
    BestCpm,
    BestRoas,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreativeCard {
    pub ad_name: String,
    pub thumbnail_url: String,
    pub campaign: String,
    pub source: String,
    pub ad_set_name: String,
    pub format: CreativeFormat,
    pub totals: CampaignTotals,
    pub metrics: DerivedMetrics,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GallerySummary {
    pub total_creatives: usize,
    pub total_impressions: u64,
    pub total_clicks: u64,
    pub avg_ctr: f64,
    pub avg_cpm: f64,
    pub best_ctr: f64,
    /// Lowest CPM among creatives with impressions.
    pub best_cpm: Option<f64>,
}

/// Video-like placements are recognized from the ad name.
pub fn creative_format(ad_name: &str) -> CreativeFormat {
    let name = ad_name.to_lowercase();
    if ["video", "reels", "stories"].iter().any(|hint| name.contains(hint)) {
        CreativeFormat::Video
    } else {
        CreativeFormat::Image
    }
}

pub fn creative_cards(records: &[CampaignRecord]) -> Vec<CreativeCard> {
    unique_creatives(records)
        .into_iter()
        .map(|creative| CreativeCard {
            format: creative_format(&creative.key),
            metrics: compute_kpis(&creative.totals),
            totals: creative.totals,
            thumbnail_url: creative.first_seen.thumbnail_url,
            campaign: creative.first_seen.campaign,
            source: creative.first_seen.source,
            ad_set_name: creative.first_seen.ad_set_name,
            ad_name: creative.key,
        })
        .collect()
}

/// CPM used for "lowest wins" ranking. Without impressions it is +infinity so
/// such creatives rank last, while the displayed CPM stays 0.
pub fn cpm_rank_value(totals: &CampaignTotals) -> f64 {
    if totals.impressions > 0 {
        totals.spend / totals.impressions as f64 * 1000.0
    } else {
        f64::INFINITY
    }
}

/// Returns the cards in ranking order. Sorting is stable, so ties keep their
/// first-seen order.
pub fn rank_creatives(cards: &[CreativeCard], ranking: CreativeRanking) -> Vec<CreativeCard> {
    let mut ranked = cards.to_vec();
    match ranking {
        CreativeRanking::All => {}
        CreativeRanking::BestCtr => ranked.sort_by(|a, b| {
            let ctr_a = count_ratio(a.totals.link_clicks, a.totals.impressions);
            let ctr_b = count_ratio(b.totals.link_clicks, b.totals.impressions);
            ctr_b.total_cmp(&ctr_a)
        }),
        CreativeRanking::BestCpm => ranked.sort_by(|a, b| {
            cpm_rank_value(&a.totals).total_cmp(&cpm_rank_value(&b.totals))
        }),
        CreativeRanking::BestRoas => ranked.sort_by(|a, b| {
            let roas_a = ratio(a.totals.revenue, a.totals.spend);
            let roas_b = ratio(b.totals.revenue, b.totals.spend);
            roas_b.total_cmp(&roas_a)
        }),
    }
    ranked
}

pub fn gallery_summary(cards: &[CreativeCard]) -> GallerySummary {
    let total_impressions = cards.iter().fold(0_u64, |sum, c| sum.saturating_add(c.totals.impressions));
    let total_clicks = cards.iter().fold(0_u64, |sum, c| sum.saturating_add(c.totals.link_clicks));
    let total_spend: f64 = cards.iter().map(|c| c.totals.spend).sum();

    let best_ctr = cards.iter().map(|c| c.metrics.ctr).fold(0.0, f64::max);
    let best_cpm = cards
        .iter()
        .filter(|c| c.totals.impressions > 0)
        .map(|c| cpm_rank_value(&c.totals))
        .min_by(f64::total_cmp);

    GallerySummary {
        total_creatives: cards.len(),
        total_impressions,
        total_clicks,
        avg_ctr: percentage(total_clicks as f64, total_impressions as f64),
        avg_cpm: per_thousand(total_spend, total_impressions as f64),
        best_ctr,
        best_cpm,
    }
}
