// Campaign and ad-set tables: rows, search, sort and pagination.
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use shared::models::CampaignRecord;

use super::ratio::{percentage, ratio};
use crate::aggregation::by_ad_set::unique_ad_sets;
use crate::aggregation::by_campaign::unique_campaigns;

/// Shown for rows whose ad set name is empty.
pub const UNKNOWN_AD_SET_LABEL: &str = "Desconhecido";

pub const CAMPAIGN_PAGE_SIZE: usize = 10;
pub const AD_SET_PAGE_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRow {
    pub campaign: String,
    pub source: String,
    pub spend: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub revenue: f64,
    pub roas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdSetRow {
    pub ad_set_name: String,
    pub spend: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub revenue: f64,
    pub roas: f64,
    pub ctr: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignSortKey {
    Campaign,
    Source,
    Spend,
    Impressions,
    Clicks,
    Conversions,
    Roas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdSetSortKey {
    AdSetName,
    Spend,
    Impressions,
    Clicks,
    Conversions,
    Roas,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

pub enum SortValue<'a> {
    Text(&'a str),
    Number(f64),
}

fn compare_values(a: &SortValue<'_>, b: &SortValue<'_>) -> Ordering {
    match (a, b) {
        (SortValue::Text(a), SortValue::Text(b)) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
        (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
        (SortValue::Text(_), SortValue::Number(_)) => Ordering::Less,
        (SortValue::Number(_), SortValue::Text(_)) => Ordering::Greater,
    }
}

pub trait TableRow: Clone {
    type SortKey: Copy;

    /// `needle` is already lowercase.
    fn matches(&self, needle: &str) -> bool;
    fn sort_value(&self, key: Self::SortKey) -> SortValue<'_>;
}

impl TableRow for CampaignRow {
    type SortKey = CampaignSortKey;

    fn matches(&self, needle: &str) -> bool {
        self.campaign.to_lowercase().contains(needle) || self.source.to_lowercase().contains(needle)
    }

    fn sort_value(&self, key: CampaignSortKey) -> SortValue<'_> {
        match key {
            CampaignSortKey::Campaign => SortValue::Text(&self.campaign),
            CampaignSortKey::Source => SortValue::Text(&self.source),
            CampaignSortKey::Spend => SortValue::Number(self.spend),
            CampaignSortKey::Impressions => SortValue::Number(self.impressions as f64),
            CampaignSortKey::Clicks => SortValue::Number(self.clicks as f64),
            CampaignSortKey::Conversions => SortValue::Number(self.conversions as f64),
            CampaignSortKey::Roas => SortValue::Number(self.roas),
        }
    }
}

impl TableRow for AdSetRow {
    type SortKey = AdSetSortKey;

    fn matches(&self, needle: &str) -> bool {
        self.ad_set_name.to_lowercase().contains(needle)
    }

    fn sort_value(&self, key: AdSetSortKey) -> SortValue<'_> {
        match key {
            AdSetSortKey::AdSetName => SortValue::Text(&self.ad_set_name),
            AdSetSortKey::Spend => SortValue::Number(self.spend),
            AdSetSortKey::Impressions => SortValue::Number(self.impressions as f64),
            AdSetSortKey::Clicks => SortValue::Number(self.clicks as f64),
            AdSetSortKey::Conversions => SortValue::Number(self.conversions as f64),
            AdSetSortKey::Roas => SortValue::Number(self.roas),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableQuery<K> {
    pub search: String,
    pub sort_key: K,
    pub order: SortOrder,
    /// 1-based.
    pub page: usize,
}

impl<K: Copy + PartialEq> TableQuery<K> {
    pub fn sorted_by(sort_key: K) -> Self {
        TableQuery {
            search: String::new(),
            sort_key,
            order: SortOrder::Desc,
            page: 1,
        }
    }

    /// Clicking the current column flips the order; a new column starts
    /// descending.
    pub fn click_column(&self, key: K) -> Self {
        let order = if key == self.sort_key { self.order.toggled() } else { SortOrder::Desc };
        TableQuery {
            sort_key: key,
            order,
            ..self.clone()
        }
    }
}

impl Default for TableQuery<CampaignSortKey> {
    fn default() -> Self {
        TableQuery::sorted_by(CampaignSortKey::Spend)
    }
}

impl Default for TableQuery<AdSetSortKey> {
    fn default() -> Self {
        TableQuery::sorted_by(AdSetSortKey::Spend)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

pub fn campaign_rows(records: &[CampaignRecord]) -> Vec<CampaignRow> {
    unique_campaigns(records)
        .into_iter()
        .map(|entry| CampaignRow {
            campaign: entry.key.campaign,
            source: entry.key.source,
            spend: entry.totals.spend,
            impressions: entry.totals.impressions,
            clicks: entry.totals.link_clicks,
            conversions: entry.totals.purchases,
            revenue: entry.totals.revenue,
            roas: ratio(entry.totals.revenue, entry.totals.spend),
        })
        .collect()
}

pub fn ad_set_rows(records: &[CampaignRecord]) -> Vec<AdSetRow> {
    unique_ad_sets(records)
        .into_iter()
        .map(|entry| AdSetRow {
            ad_set_name: if entry.key.is_empty() {
                UNKNOWN_AD_SET_LABEL.to_string()
            } else {
                entry.key
            },
            spend: entry.totals.spend,
            impressions: entry.totals.impressions,
            clicks: entry.totals.link_clicks,
            conversions: entry.totals.purchases,
            revenue: entry.totals.revenue,
            roas: ratio(entry.totals.revenue, entry.totals.spend),
            ctr: percentage(entry.totals.link_clicks as f64, entry.totals.impressions as f64),
        })
        .collect()
}

/// Filters by `query.search`, sorts stably by the chosen column and returns
/// the requested page. Out-of-range pages are clamped.
pub fn query_table<R: TableRow>(rows: &[R], query: &TableQuery<R::SortKey>, page_size: usize) -> Page<R> {
    let needle = query.search.to_lowercase();
    let mut matching: Vec<R> = rows
        .iter()
        .filter(|row| needle.is_empty() || row.matches(&needle))
        .cloned()
        .collect();

    matching.sort_by(|a, b| {
        let ordering = compare_values(&a.sort_value(query.sort_key), &b.sort_value(query.sort_key));
        match query.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    let page_size = page_size.max(1);
    let total_items = matching.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = query.page.clamp(1, total_pages.max(1));

    Page {
        items: matching
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .collect(),
        page,
        total_pages,
        total_items,
    }
}
