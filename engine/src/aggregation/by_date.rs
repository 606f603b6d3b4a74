// Daily aggregation feeding the time-series charts.
use std::cmp::Ordering;

use serde::Serialize;

use super::{aggregate, AggregatedTotals, Grouping};
use crate::metrics::ratio::ratio;
use shared::models::CampaignRecord;
use shared::utils::brazilian_format;

/// Keys by the raw date text, so "5/3/2024" and "05/03/2024" are two days.
pub struct ByDate;

impl Grouping for ByDate {
    type Key = String;

    fn name(&self) -> &str {
        "date"
    }

    fn key(&self, record: &CampaignRecord) -> String {
        record.date.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformancePoint {
    pub date: String,
    pub spend: f64,
    pub conversions: u64,
    pub clicks: u64,
    pub revenue: f64,
    pub roas: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunnelPoint {
    pub date: String,
    pub page_views: u64,
    pub add_to_cart: u64,
    pub checkout: u64,
    pub purchases: u64,
}

/// Per-day spend, purchases, clicks, revenue and ROAS in calendar order.
pub fn performance_series(records: &[CampaignRecord]) -> Vec<PerformancePoint> {
    daily_totals(records)
        .into_iter()
        .map(|day| PerformancePoint {
            roas: ratio(day.totals.revenue, day.totals.spend),
            spend: day.totals.spend,
            conversions: day.totals.purchases,
            clicks: day.totals.link_clicks,
            revenue: day.totals.revenue,
            date: day.key,
        })
        .collect()
}

/// Per-day lower-funnel counts in calendar order.
pub fn funnel_series(records: &[CampaignRecord]) -> Vec<FunnelPoint> {
    daily_totals(records)
        .into_iter()
        .map(|day| FunnelPoint {
            page_views: day.totals.landing_page_views,
            add_to_cart: day.totals.add_to_cart,
            checkout: day.totals.initiate_checkout,
            purchases: day.totals.purchases,
            date: day.key,
        })
        .collect()
}

// Sorted by parsed date; days that do not parse go last in first-seen order.
fn daily_totals(records: &[CampaignRecord]) -> Vec<AggregatedTotals<String>> {
    let mut days = aggregate(records, &ByDate).into_entries();
    days.sort_by(|a, b| {
        match (brazilian_format::parse_date(&a.key), brazilian_format::parse_date(&b.key)) {
            (Some(da), Some(db)) => da.cmp(&db),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    days
}
