use std::fs;
use std::path::Path;

use shared::models::{CampaignRecord, DemographicsRecord};
use shared::utils::brazilian_format;

use crate::error::EngineError;

// The sheet export always uses CRLF; a bare "\n" stays inside the line.
const LINE_SEPARATOR: &str = "\r\n";

/// Column positions of the campaign sheet.
pub mod columns {
    pub const CAMPAIGN: usize = 0;
    pub const DATE: usize = 1;
    pub const SOURCE: usize = 2;
    pub const SPEND: usize = 3;
    pub const IMPRESSIONS: usize = 4;
    pub const LINK_CLICKS: usize = 5;
    pub const LANDING_PAGE_VIEWS: usize = 6;
    pub const THUMBNAIL_URL: usize = 7;
    pub const AD_NAME: usize = 8;
    pub const ADD_TO_CART: usize = 9;
    pub const INITIATE_CHECKOUT: usize = 10;
    pub const PURCHASES: usize = 11;
    pub const POST_ENGAGEMENT: usize = 12;
    pub const AD_SET_NAME: usize = 13;
    pub const REVENUE: usize = 14;

    pub const COUNT: usize = 15;
}

/// Column positions of the age/gender sheet.
pub mod demographics_columns {
    pub const AGE: usize = 0;
    pub const GENDER: usize = 1;
    pub const IMPRESSIONS: usize = 2;
    pub const CLICKS: usize = 3;
    pub const ENGAGEMENT: usize = 4;
    pub const PURCHASES: usize = 5;

    pub const COUNT: usize = 6;
}

pub struct CampaignCsvParser;

impl CampaignCsvParser {
    // Header: campaign,date,source,spend,impressions,actions_link_click,actions_landing_page_view,
    //         thumbnail_url,ad_name,actions_add_to_cart,actions_initiate_checkout,
    //         actions_offsite_conversion_fb_pixel_purchase,actions_post_engagement,adset_name,
    //         action_values_omni_purchase
    // Example Row: CampA,05/03/2024,facebook,"1.234,56",1000,50,40,,adX,5,2,1,10,setY,"300,00"
    pub fn parse_campaigns(text: &str) -> Vec<CampaignRecord> {
        let records: Vec<CampaignRecord> = data_lines(text)
            .enumerate()
            .map(|(idx, line)| Self::decode_campaign(&split_fields(line), idx + 1))
            .collect();
        tracing::debug!(rows = records.len(), "Parsed campaign CSV");
        records
    }

    pub fn parse_demographics(text: &str) -> Vec<DemographicsRecord> {
        let records: Vec<DemographicsRecord> = data_lines(text)
            .enumerate()
            .map(|(idx, line)| Self::decode_demographics(&split_fields(line), idx + 1))
            .collect();
        tracing::debug!(rows = records.len(), "Parsed demographics CSV");
        records
    }

    /// Reads a campaign export from disk. The only failure is I/O.
    pub fn load_campaigns_from_csv(file_path: impl AsRef<Path>) -> Result<Vec<CampaignRecord>, EngineError> {
        let file_path = file_path.as_ref();
        let text = fs::read_to_string(file_path)?;
        let records = Self::parse_campaigns(&text);
        tracing::info!(path = %file_path.display(), rows = records.len(), "Loaded campaign CSV");
        Ok(records)
    }

    pub fn load_demographics_from_csv(file_path: impl AsRef<Path>) -> Result<Vec<DemographicsRecord>, EngineError> {
        let text = fs::read_to_string(file_path.as_ref())?;
        Ok(Self::parse_demographics(&text))
    }

    /// Maps fields to a record by position. Missing trailing columns decode
    /// as "" or 0; extra columns are ignored.
    pub fn decode_campaign(fields: &[String], row: usize) -> CampaignRecord {
        let fields = Row::checked(fields, columns::COUNT, row);
        CampaignRecord {
            campaign: fields.text(columns::CAMPAIGN),
            date: fields.text(columns::DATE),
            source: fields.text(columns::SOURCE),
            spend: fields.number(columns::SPEND),
            impressions: fields.count(columns::IMPRESSIONS),
            link_clicks: fields.count(columns::LINK_CLICKS),
            landing_page_views: fields.count(columns::LANDING_PAGE_VIEWS),
            thumbnail_url: fields.text(columns::THUMBNAIL_URL),
            ad_name: fields.text(columns::AD_NAME),
            add_to_cart: fields.count(columns::ADD_TO_CART),
            initiate_checkout: fields.count(columns::INITIATE_CHECKOUT),
            purchases: fields.count(columns::PURCHASES),
            post_engagement: fields.count(columns::POST_ENGAGEMENT),
            ad_set_name: fields.text(columns::AD_SET_NAME),
            revenue: fields.number(columns::REVENUE),
        }
    }

    pub fn decode_demographics(fields: &[String], row: usize) -> DemographicsRecord {
        let fields = Row::checked(fields, demographics_columns::COUNT, row);
        DemographicsRecord {
            age: fields.text(demographics_columns::AGE),
            gender: fields.text(demographics_columns::GENDER),
            impressions: fields.count(demographics_columns::IMPRESSIONS),
            clicks: fields.count(demographics_columns::CLICKS),
            engagement: fields.count(demographics_columns::ENGAGEMENT),
            purchases: fields.count(demographics_columns::PURCHASES),
        }
    }
}

/// Splits one line on commas outside quotes. A `"` only toggles quoting and is
/// dropped; doubled quotes are not unescaped. Fields are trimmed.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

// Non-blank lines after the header.
fn data_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(LINE_SEPARATOR)
        .filter(|line| !line.trim().is_empty())
        .skip(1)
}

struct Row<'a> {
    fields: &'a [String],
}

impl<'a> Row<'a> {
    fn checked(fields: &'a [String], expected: usize, row: usize) -> Self {
        if fields.len() < expected {
            tracing::debug!(row, found = fields.len(), expected, "Short CSV row, defaulting missing columns");
        }
        Row { fields }
    }

    fn raw(&self, idx: usize) -> &str {
        self.fields.get(idx).map(String::as_str).unwrap_or("")
    }

    fn text(&self, idx: usize) -> String {
        self.raw(idx).to_string()
    }

    fn number(&self, idx: usize) -> f64 {
        brazilian_format::parse_number(self.raw(idx))
    }

    fn count(&self, idx: usize) -> u64 {
        brazilian_format::parse_count(self.raw(idx))
    }
}
