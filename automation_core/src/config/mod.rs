//! Automation config - one persisted on/off flag per automation.
//!
//! The record is a flat `key = bool` document. Missing keys load as `false`
//! and unknown keys are ignored, so records written by older or newer
//! versions still load.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// The fixed set of automations a user can switch on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AutomationOption {
    CloseDoor,
    ManageGroundContainer,
    AutoPaddle,
}

impl AutomationOption {
    /// Every option, in settings-panel order.
    pub const ALL: [AutomationOption; 3] = [
        AutomationOption::CloseDoor,
        AutomationOption::ManageGroundContainer,
        AutomationOption::AutoPaddle,
    ];

    /// The key this option is persisted under.
    pub fn key(self) -> &'static str {
        match self {
            AutomationOption::CloseDoor => "close_door",
            AutomationOption::ManageGroundContainer => "manage_ground_container",
            AutomationOption::AutoPaddle => "auto_paddle",
        }
    }
}

impl std::fmt::Display for AutomationOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Enabled flags for every [`AutomationOption`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    pub close_door: bool,
    pub manage_ground_container: bool,
    pub auto_paddle: bool,
}

impl AutomationConfig {
    /// A config with every automation switched on.
    pub fn all_enabled() -> Self {
        Self {
            close_door: true,
            manage_ground_container: true,
            auto_paddle: true,
        }
    }

    pub fn get(&self, option: AutomationOption) -> bool {
        match option {
            AutomationOption::CloseDoor => self.close_door,
            AutomationOption::ManageGroundContainer => self.manage_ground_container,
            AutomationOption::AutoPaddle => self.auto_paddle,
        }
    }

    pub fn set(&mut self, option: AutomationOption, enabled: bool) {
        let flag = match option {
            AutomationOption::CloseDoor => &mut self.close_door,
            AutomationOption::ManageGroundContainer => &mut self.manage_ground_container,
            AutomationOption::AutoPaddle => &mut self.auto_paddle,
        };
        *flag = enabled;
    }

    /// Flip an option and return its new value.
    pub fn toggle(&mut self, option: AutomationOption) -> bool {
        let enabled = !self.get(option);
        self.set(option, enabled);
        enabled
    }

    pub fn enabled_options(&self) -> Vec<AutomationOption> {
        AutomationOption::ALL
            .into_iter()
            .filter(|option| self.get(*option))
            .collect()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Decode the record from a host save document.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Encode the record for a host save document.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load the config file, or defaults if it doesn't exist.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::warn!(
                "Automation config not found at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded automation config from {}", path.display());
        Ok(config)
    }

    /// Write the config file, creating parent directories as needed.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, self.to_toml_string()?)?;
        tracing::info!("Saved automation config to {}", path.display());
        Ok(())
    }
}
