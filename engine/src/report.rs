// Full dashboard snapshot for one reference day.
use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;
use shared::models::{AgeBreakdown, DemographicsRecord, FunnelStep, PerformanceBand};
use tracing::info;

use crate::aggregation::by_date::{funnel_series, performance_series, FunnelPoint, PerformancePoint};
use crate::aggregation::demographics::demographics_by_age;
use crate::config::settings::DashboardSettings;
use crate::data::dataset::{CampaignDataset, DateWindow};
use crate::error::EngineError;
use crate::metrics::creatives::{creative_cards, gallery_summary, rank_creatives, CreativeCard, GallerySummary};
use crate::metrics::funnel::{build_funnel, transition_bands};
use crate::metrics::insights::{smart_insights, Insight, InsightSeverity};
use crate::metrics::kpi::{summarize, KpiSummary};
use crate::metrics::tables::{
    ad_set_rows, campaign_rows, query_table, AdSetRow, AdSetSortKey, CampaignRow, CampaignSortKey, Page, TableQuery,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightCard {
    pub title: &'static str,
    pub severity: InsightSeverity,
    pub description: String,
    #[serde(flatten)]
    pub insight: Insight,
}

impl From<Insight> for InsightCard {
    fn from(insight: Insight) -> Self {
        InsightCard {
            title: insight.title(),
            severity: insight.severity(),
            description: insight.to_string(),
            insight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelTransition {
    pub rate: f64,
    pub band: PerformanceBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub today: NaiveDate,
    pub window_days: u32,
    pub record_count: usize,
    pub sources: Vec<String>,
    pub campaigns: Vec<String>,
    pub kpis: KpiSummary,
    pub funnel: Vec<FunnelStep>,
    pub funnel_transitions: Vec<FunnelTransition>,
    pub insights: Vec<InsightCard>,
    pub performance: Vec<PerformancePoint>,
    pub funnel_by_day: Vec<FunnelPoint>,
    pub campaign_table: Page<CampaignRow>,
    pub ad_set_table: Page<AdSetRow>,
    pub creatives: Vec<CreativeCard>,
    pub gallery: GallerySummary,
    /// Empty when no demographics sheet was given.
    pub demographics: Vec<AgeBreakdown>,
}

/// Records of `dataset` inside the configured rolling window.
pub fn windowed(dataset: &CampaignDataset, settings: &DashboardSettings, today: NaiveDate) -> CampaignDataset {
    dataset.within(DateWindow::last_days(settings.window_days), today)
}

impl DashboardReport {
    pub fn build(
        dataset: &CampaignDataset,
        demographics: &[DemographicsRecord],
        settings: &DashboardSettings,
        today: NaiveDate,
    ) -> Self {
        let current = windowed(dataset, settings, today);
        let records = current.records();
        info!(
            total = dataset.len(),
            in_window = current.len(),
            window_days = settings.window_days,
            %today,
            "Building dashboard report"
        );

        let kpis = summarize(records);
        let funnel = build_funnel(&kpis.totals);
        let funnel_transitions = transition_bands(&funnel)
            .into_iter()
            .map(|(rate, band)| FunnelTransition { rate, band })
            .collect();
        let insights = smart_insights(&kpis, records, settings.max_insights)
            .into_iter()
            .map(InsightCard::from)
            .collect();

        let cards = creative_cards(records);
        let gallery = gallery_summary(&cards);

        DashboardReport {
            today,
            window_days: settings.window_days,
            record_count: current.len(),
            sources: current.unique_sources(),
            campaigns: current.unique_campaigns(),
            kpis,
            funnel,
            funnel_transitions,
            insights,
            performance: performance_series(records),
            funnel_by_day: funnel_series(records),
            campaign_table: query_table(
                &campaign_rows(records),
                &TableQuery::<CampaignSortKey>::default(),
                settings.campaign_page_size,
            ),
            ad_set_table: query_table(
                &ad_set_rows(records),
                &TableQuery::<AdSetSortKey>::default(),
                settings.ad_set_page_size,
            ),
            creatives: rank_creatives(&cards, settings.creative_ranking),
            gallery,
            demographics: demographics_by_age(demographics, settings.demographics_metric),
        }
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Writes campaign rows as CSV with a header line.
pub fn write_campaign_table_csv<W: Write>(rows: &[CampaignRow], writer: W) -> Result<(), EngineError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
