//! Add-in configuration handed over by the host as TOML text

use std::time::Duration;

use dvir_addin_api::AddInError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default host of the external inspection tool
pub const DEFAULT_LAUNCH_BASE_URL: &str = "https://dvir_pro.millmountaincapital.com";

/// Browsing context the inspection tool opens in
pub const DEFAULT_LAUNCH_TARGET: &str = "_system";

/// Time the host waits for `shutdown` before completing logout anyway
pub const DEFAULT_SHUTDOWN_BUDGET_SECS: u64 = 15;

/// Final configuration with defaults applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AddInConfig {
    #[serde(default)]
    pub launch: LaunchConfig,

    #[serde(default)]
    pub elements: ElementIds,

    #[serde(default)]
    pub host_chrome: HostChromeConfig,

    #[serde(default)]
    pub lifecycle: LifecycleConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Base URL of the inspection tool; session parameters are appended
    pub base_url: String,

    /// Window target passed to `open_window`
    pub target: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LAUNCH_BASE_URL.to_string(),
            target: DEFAULT_LAUNCH_TARGET.to_string(),
        }
    }
}

/// Element ids inside the mount region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub root: String,
    pub driver: String,
    pub session_id: String,
    pub database: String,
    pub server: String,
    pub vehicle: String,
    pub launch: String,
    /// Class that hides the root region while present
    pub hidden_class: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            root: "app".to_string(),
            driver: "dvirPro-driver".to_string(),
            session_id: "dvirPro-session-id".to_string(),
            database: "dvirPro-database".to_string(),
            server: "dvirPro-server".to_string(),
            vehicle: "dvirPro-vehicle".to_string(),
            launch: "dvirPro-startBtn".to_string(),
            hidden_class: "hidden".to_string(),
        }
    }
}

/// Host UI entries adjusted when the add-in loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostChromeConfig {
    /// Dashboard tile that gets disabled
    pub dashboard_tile: String,
    /// Menu entry that gets removed
    pub menu_item: String,
    pub disabled_class: String,
}

impl Default for HostChromeConfig {
    fn default() -> Self {
        Self {
            dashboard_tile: "dashboard-dvir".to_string(),
            menu_item: "menu-dvir".to_string(),
            disabled_class: "__disabled".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    pub shutdown_budget_secs: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            shutdown_budget_secs: DEFAULT_SHUTDOWN_BUDGET_SECS,
        }
    }
}

impl LifecycleConfig {
    pub fn shutdown_budget(&self) -> Duration {
        Duration::from_secs(self.shutdown_budget_secs)
    }
}

impl AddInConfig {
    /// Parse and validate host-supplied TOML. Missing keys take defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, AddInError> {
        let config: AddInConfig =
            toml::from_str(contents).map_err(|e| AddInError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<(), AddInError> {
        let base = Url::parse(&self.launch.base_url).map_err(|e| {
            AddInError::config(format!("launch.base_url {:?}: {}", self.launch.base_url, e))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AddInError::config(format!(
                "launch.base_url must be http(s), got {}",
                base.scheme()
            )));
        }
        if base.query().is_some() {
            return Err(AddInError::config(
                "launch.base_url must not carry a query string",
            ));
        }
        if self.launch.target.is_empty() {
            return Err(AddInError::config("launch.target is empty"));
        }
        if self.lifecycle.shutdown_budget_secs == 0 {
            return Err(AddInError::config(
                "lifecycle.shutdown_budget_secs must be non-zero",
            ));
        }
        Ok(())
    }
}
