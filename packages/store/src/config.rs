//! # Client configuration: `clinic.toml`
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8081/api"
//!
//! [list]
//! search_debounce_ms = 400
//!
//! [calendar]
//! slot_minutes = 30
//! day_start_hour = 8
//! day_end_hour = 18
//! ```
//!
//! Every section and key is optional; a missing or empty file is the default
//! configuration.

use serde::{Deserialize, Serialize};

use crate::calendar::SlotGrid;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root of the REST API; collections live at `{base_url}/{collection}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8081/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListConfig {
    /// Quiet period after the last keystroke before a search is applied.
    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u64,
}

fn default_search_debounce() -> u64 {
    400
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
    #[serde(default = "default_day_start")]
    pub day_start_hour: u32,
    #[serde(default = "default_day_end")]
    pub day_end_hour: u32,
}

fn default_slot_minutes() -> u32 {
    30
}

fn default_day_start() -> u32 {
    8
}

fn default_day_end() -> u32 {
    18
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            slot_minutes: default_slot_minutes(),
            day_start_hour: default_day_start(),
            day_end_hour: default_day_end(),
        }
    }
}

impl CalendarConfig {
    pub fn slot_grid(&self) -> SlotGrid {
        SlotGrid {
            slot_minutes: self.slot_minutes.max(1),
            day_start_hour: self.day_start_hour.min(23),
            day_end_hour: self.day_end_hour.clamp(self.day_start_hour.min(23) + 1, 24),
        }
    }
}

impl ClinicConfig {
    /// Builder method to point the client at another backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    pub fn filename() -> &'static str {
        "clinic.toml"
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}
