// Dashboard settings, loaded from a JSON file next to the exported sheet.
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::aggregation::demographics::DemographicsMetric;
use crate::data::dataset::DateWindow;
use crate::error::EngineError;
use crate::metrics::creatives::CreativeRanking;
use crate::metrics::insights::MAX_INSIGHTS;
use crate::metrics::tables::{AD_SET_PAGE_SIZE, CAMPAIGN_PAGE_SIZE};

pub const DEFAULT_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    /// Campaign table only.
    Csv,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardSettings {
    pub window_days: u32,
    pub campaign_page_size: usize,
    pub ad_set_page_size: usize,
    pub max_insights: usize,
    pub creative_ranking: CreativeRanking,
    pub output_format: OutputFormat,
    pub demographics_path: Option<PathBuf>,
    pub demographics_metric: DemographicsMetric,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            window_days: DEFAULT_WINDOW_DAYS,
            campaign_page_size: CAMPAIGN_PAGE_SIZE,
            ad_set_page_size: AD_SET_PAGE_SIZE,
            max_insights: MAX_INSIGHTS,
            creative_ranking: CreativeRanking::default(),
            output_format: OutputFormat::default(),
            demographics_path: None,
            demographics_metric: DemographicsMetric::default(),
        }
    }
}

impl DashboardSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Missing fields take their defaults. Zero sizes fall back to the
    /// defaults with a warning.
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        let settings: DashboardSettings = serde_json::from_str(text)?;
        settings.validated()
    }

    fn validated(mut self) -> Result<Self, EngineError> {
        if self.window_days == 0 {
            warn!(default = DEFAULT_WINDOW_DAYS, "window_days is 0, using default");
            self.window_days = DEFAULT_WINDOW_DAYS;
        } else if !DateWindow::last_days(self.window_days).is_preset() {
            warn!(window_days = self.window_days, presets = ?DateWindow::PRESETS, "window_days is not one of the period presets");
        }
        if self.campaign_page_size == 0 {
            warn!(default = CAMPAIGN_PAGE_SIZE, "campaign_page_size is 0, using default");
            self.campaign_page_size = CAMPAIGN_PAGE_SIZE;
        }
        if self.ad_set_page_size == 0 {
            warn!(default = AD_SET_PAGE_SIZE, "ad_set_page_size is 0, using default");
            self.ad_set_page_size = AD_SET_PAGE_SIZE;
        }
        if let Some(path) = &self.demographics_path {
            if path.as_os_str().is_empty() {
                return Err(EngineError::ConfigError("demographics_path is empty".to_string()));
            }
        }
        Ok(self)
    }
}
