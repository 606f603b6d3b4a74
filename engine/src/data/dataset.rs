// Immutable record set with the dashboard's filters.
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::models::CampaignRecord;

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Rolling "last N days" window ending at a reference day. A date `d` is in
/// the window when `today - days < d <= today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub days: u32,
}

impl DateWindow {
    /// Window lengths offered by the period selector.
    pub const PRESETS: [u32; 5] = [7, 14, 30, 60, 90];

    pub fn last_days(days: u32) -> Self {
        DateWindow { days }
    }

    pub fn is_preset(&self) -> bool {
        Self::PRESETS.contains(&self.days)
    }

    pub fn contains(&self, today: NaiveDate, date: NaiveDate) -> bool {
        if date > today {
            return false;
        }
        today
            .checked_sub_days(Days::new(u64::from(self.days)))
            .map_or(true, |start| date > start)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub date_range: Option<DateRange>,
    /// Empty means every source.
    pub sources: Vec<String>,
    /// Empty means every campaign.
    pub campaigns: Vec<String>,
}

impl RecordFilter {
    /// Records with an unparseable date never match an active date range.
    pub fn matches(&self, record: &CampaignRecord) -> bool {
        if let Some(range) = &self.date_range {
            if !record.parsed_date().map_or(false, |d| range.contains(d)) {
                return false;
            }
        }
        if !self.sources.is_empty() && !self.sources.contains(&record.source) {
            return false;
        }
        if !self.campaigns.is_empty() && !self.campaigns.contains(&record.campaign) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignDataset {
    records: Vec<CampaignRecord>,
}

impl CampaignDataset {
    pub fn new(records: Vec<CampaignRecord>) -> Self {
        CampaignDataset { records }
    }

    pub fn records(&self) -> &[CampaignRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn filter(&self, filter: &RecordFilter) -> CampaignDataset {
        self.records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    /// Records dated inside `window`; unparseable dates are dropped.
    pub fn within(&self, window: DateWindow, today: NaiveDate) -> CampaignDataset {
        self.records
            .iter()
            .filter(|r| r.parsed_date().map_or(false, |d| window.contains(today, d)))
            .cloned()
            .collect()
    }

    /// Distinct sources in first-seen order.
    pub fn unique_sources(&self) -> Vec<String> {
        unique_in_order(self.records.iter().map(|r| r.source.as_str()))
    }

    /// Distinct campaigns in first-seen order.
    pub fn unique_campaigns(&self) -> Vec<String> {
        unique_in_order(self.records.iter().map(|r| r.campaign.as_str()))
    }
}

impl From<Vec<CampaignRecord>> for CampaignDataset {
    fn from(records: Vec<CampaignRecord>) -> Self {
        CampaignDataset::new(records)
    }
}

impl FromIterator<CampaignRecord> for CampaignDataset {
    fn from_iter<I: IntoIterator<Item = CampaignRecord>>(iter: I) -> Self {
        CampaignDataset::new(iter.into_iter().collect())
    }
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
