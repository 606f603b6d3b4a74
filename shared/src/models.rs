use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::brazilian_format;

/// One row of the ad-performance export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub campaign: String,
    /// Raw "dd/mm/yyyy" text as exported.
    pub date: String,
    pub source: String,
    pub spend: f64,
    pub impressions: u64,
    pub link_clicks: u64,
    pub landing_page_views: u64,
    pub thumbnail_url: String,
    pub ad_name: String,
    pub add_to_cart: u64,
    pub initiate_checkout: u64,
    pub purchases: u64,
    pub post_engagement: u64,
    pub ad_set_name: String,
    /// Purchase value.
    pub revenue: f64,
}

impl CampaignRecord {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        brazilian_format::parse_date(&self.date)
    }

    pub fn attributes(&self) -> RecordAttributes {
        RecordAttributes {
            campaign: self.campaign.clone(),
            date: self.date.clone(),
            source: self.source.clone(),
            ad_name: self.ad_name.clone(),
            ad_set_name: self.ad_set_name.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
        }
    }
}

/// Non-numeric fields of a record, kept from the first record seen in a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAttributes {
    pub campaign: String,
    pub date: String,
    pub source: String,
    pub ad_name: String,
    pub ad_set_name: String,
    pub thumbnail_url: String,
}

/// Summed numeric fields of any set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignTotals {
    pub spend: f64,
    pub impressions: u64,
    pub link_clicks: u64,
    pub landing_page_views: u64,
    pub add_to_cart: u64,
    pub initiate_checkout: u64,
    pub purchases: u64,
    pub post_engagement: u64,
    pub revenue: f64,
}

impl CampaignTotals {
    /// Counters saturate at `u64::MAX` instead of wrapping.
    pub fn accumulate(&mut self, record: &CampaignRecord) {
        self.spend += record.spend;
        self.impressions = self.impressions.saturating_add(record.impressions);
        self.link_clicks = self.link_clicks.saturating_add(record.link_clicks);
        self.landing_page_views = self.landing_page_views.saturating_add(record.landing_page_views);
        self.add_to_cart = self.add_to_cart.saturating_add(record.add_to_cart);
        self.initiate_checkout = self.initiate_checkout.saturating_add(record.initiate_checkout);
        self.purchases = self.purchases.saturating_add(record.purchases);
        self.post_engagement = self.post_engagement.saturating_add(record.post_engagement);
        self.revenue += record.revenue;
    }

    pub fn merged(&self, other: &CampaignTotals) -> CampaignTotals {
        CampaignTotals {
            spend: self.spend + other.spend,
            impressions: self.impressions.saturating_add(other.impressions),
            link_clicks: self.link_clicks.saturating_add(other.link_clicks),
            landing_page_views: self.landing_page_views.saturating_add(other.landing_page_views),
            add_to_cart: self.add_to_cart.saturating_add(other.add_to_cart),
            initiate_checkout: self.initiate_checkout.saturating_add(other.initiate_checkout),
            purchases: self.purchases.saturating_add(other.purchases),
            post_engagement: self.post_engagement.saturating_add(other.post_engagement),
            revenue: self.revenue + other.revenue,
        }
    }
}

impl<'a> FromIterator<&'a CampaignRecord> for CampaignTotals {
    fn from_iter<I: IntoIterator<Item = &'a CampaignRecord>>(iter: I) -> Self {
        iter.into_iter().fold(CampaignTotals::default(), |mut totals, record| {
            totals.accumulate(record);
            totals
        })
    }
}

/// Ratios derived from totals. Never NaN or infinite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Link clicks per impression, in percent.
    pub ctr: f64,
    pub cpc: f64,
    /// Cost per thousand impressions.
    pub cpm: f64,
    pub roas: f64,
    /// Purchases per link click, in percent.
    pub conversion_rate: f64,
    pub cost_per_purchase: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunnelStage {
    Impressions,
    LinkClicks,
    LandingPageViews,
    AddToCart,
    InitiateCheckout,
    Purchases,
}

impl FunnelStage {
    pub const ALL: [FunnelStage; 6] = [
        FunnelStage::Impressions,
        FunnelStage::LinkClicks,
        FunnelStage::LandingPageViews,
        FunnelStage::AddToCart,
        FunnelStage::InitiateCheckout,
        FunnelStage::Purchases,
    ];

    /// Label shown on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            FunnelStage::Impressions => "Impressões",
            FunnelStage::LinkClicks => "Cliques no Link",
            FunnelStage::LandingPageViews => "Page View",
            FunnelStage::AddToCart => "Add to Cart",
            FunnelStage::InitiateCheckout => "Initiate Checkout",
            FunnelStage::Purchases => "Compra",
        }
    }

    pub fn value_in(&self, totals: &CampaignTotals) -> u64 {
        match self {
            FunnelStage::Impressions => totals.impressions,
            FunnelStage::LinkClicks => totals.link_clicks,
            FunnelStage::LandingPageViews => totals.landing_page_views,
            FunnelStage::AddToCart => totals.add_to_cart,
            FunnelStage::InitiateCheckout => totals.initiate_checkout,
            FunnelStage::Purchases => totals.purchases,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStep {
    pub stage: FunnelStage,
    pub name: String,
    pub value: u64,
    pub percentage_of_first_step: f64,
    pub conversion_from_previous: f64,
}

/// Color band used to categorize conversion rates and ROAS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    Good,
    Neutral,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreativeFormat {
    Video,
    Image,
}

/// One row of the age/gender breakdown sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemographicsRecord {
    pub age: String,
    pub gender: String,
    pub impressions: u64,
    pub clicks: u64,
    pub engagement: u64,
    pub purchases: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBreakdown {
    pub age: String,
    pub male: u64,
    pub female: u64,
}
