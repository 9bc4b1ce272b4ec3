use serde::Deserialize;
use std::{fs, path::Path};

use crate::shared::errors::ConfigError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorCfg {
    /// Samples kept per target
    pub history_cap: usize,
    pub reset_window_hours: u64,
    /// Samples shown in a notification
    pub recent_history_count: usize,
    /// Character budget for the history block of a chat embed
    pub history_field_limit: usize,
}

impl Default for MonitorCfg {
    fn default() -> Self {
        Self {
            history_cap: 50,
            reset_window_hours: 24,
            recent_history_count: 5,
            history_field_limit: 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpCfg {
    pub timeout_secs: u64,
    pub user_agents_file: String,
}

impl Default for HttpCfg {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agents_file: "user_agents.txt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsCfg {
    pub catalog: String,
    pub state: String,
}

impl Default for PathsCfg {
    fn default() -> Self {
        Self {
            catalog: "products.json".to_string(),
            state: "state.json".to_string(),
        }
    }
}

/// A site read with plain CSS selectors
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteSelectorCfg {
    pub id: String,
    pub price_selector: String,
    /// Matches only when the product can be bought
    pub stock_selector: String,
    /// Must match for the page to be trusted at all
    pub page_selector: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub monitor: MonitorCfg,
    pub http: HttpCfg,
    pub paths: PathsCfg,
    pub sites: Vec<SiteSelectorCfg>,
}

/// Upper bound for `monitor.reset_window_hours`
pub const MAX_RESET_WINDOW_HOURS: u64 = 24 * 365 * 10;

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&s)
    }

    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor.history_cap == 0 {
            return Err(ConfigError::Invalid("monitor.history_cap must be at least 1".to_string()));
        }
        if self.monitor.reset_window_hours == 0 {
            return Err(ConfigError::Invalid("monitor.reset_window_hours must be at least 1".to_string()));
        }
        if self.monitor.reset_window_hours > MAX_RESET_WINDOW_HOURS {
            return Err(ConfigError::Invalid(format!(
                "monitor.reset_window_hours must be at most {} (10 years)",
                MAX_RESET_WINDOW_HOURS
            )));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid("http.timeout_secs must be at least 1".to_string()));
        }
        if let Some(site) = self.sites.iter().find(|s| s.id.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("site with selector {:?} has no id", site.price_selector)));
        }
        Ok(())
    }
}
