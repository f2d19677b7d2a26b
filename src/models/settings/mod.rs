// Settings module
// Grid geometry, week layout and data-source configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 0 = Sunday, 1 = Monday, ... 6 = Saturday
    pub first_day_of_week: u8,
    /// Pixels per hour row on the week grid
    pub row_height: f32,
    /// Smallest rendered block height; display only
    pub min_event_height: f32,
    /// Smallest live preview height while resizing
    pub min_resize_height: f32,
    /// Resizes that would leave an event this short or shorter are rejected
    pub min_event_minutes: i64,
    /// Click/drop quantization step
    pub slot_minutes: u32,
    /// "12h" or "24h"
    pub time_format: String,
    pub api_base_url: String,
    pub api_timeout_secs: u64,
    /// Import goals, tasks and the visible week from the API at startup
    pub load_from_api: bool,
    /// Start with the sample goals, tasks and events
    pub seed_sample_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            first_day_of_week: 0, // Sunday
            row_height: 48.0,
            min_event_height: 16.0,
            min_resize_height: 12.0,
            min_event_minutes: 5,
            slot_minutes: 15,
            time_format: "12h".to_string(),
            api_base_url: "http://localhost:5000/api".to_string(),
            api_timeout_secs: 20,
            load_from_api: false,
            seed_sample_data: true,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if self.first_day_of_week > 6 {
            return Err(format!(
                "first_day_of_week must be 0-6, got {}",
                self.first_day_of_week
            ));
        }
        if !(self.row_height > 0.0) {
            return Err("row_height must be positive".to_string());
        }
        if self.slot_minutes == 0 || 60 % self.slot_minutes != 0 {
            return Err(format!(
                "slot_minutes must divide an hour evenly, got {}",
                self.slot_minutes
            ));
        }
        if self.min_event_minutes <= 0 {
            return Err("min_event_minutes must be positive".to_string());
        }
        if self.time_format != "12h" && self.time_format != "24h" {
            return Err(format!("time_format must be 12h or 24h, got {}", self.time_format));
        }
        Ok(())
    }

    pub fn uses_24h_clock(&self) -> bool {
        self.time_format == "24h"
    }
}
