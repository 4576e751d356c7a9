use crate::error::{CoreError, CoreResult};
use crate::records::generator::id_range_end;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_RECORD_COUNT: usize = 500;
pub const DEFAULT_EXPORT_FILE_NAME: &str = "compliance_violations.csv";

/// Session-level knobs. Every field has a default so a partial JSON file
/// (or `{}`) is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub record_count: usize,
    pub id_base: u64,
    /// Timestamps fall within `now - (window_days - 1) days - (window_hours - 1) hours`.
    pub window_days: u32,
    pub window_hours: u32,
    pub feed_limit: usize,
    pub export_file_name: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            record_count: DEFAULT_RECORD_COUNT,
            id_base: 1000,
            window_days: 30,
            window_hours: 24,
            feed_limit: 10,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(json_str: &str) -> CoreResult<Self> {
        let config: DashboardConfig = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.window_days == 0 {
            return Err(CoreError::InvalidConfig(
                "window_days must be at least 1".to_string(),
            ));
        }
        if self.window_hours == 0 {
            return Err(CoreError::InvalidConfig(
                "window_hours must be at least 1".to_string(),
            ));
        }
        if id_range_end(self.id_base, self.record_count).is_none() {
            return Err(CoreError::InvalidConfig(format!(
                "id_base {} leaves no room for {} records",
                self.id_base, self.record_count
            )));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "export_file_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
