//! What the overlay contributes to the host's UI: a settings section with
//! one checkbox per automation, and the key binding for the container
//! toggle. Rendering and text lookup stay with the host.

use serde::{Deserialize, Serialize};

use crate::config::{AutomationConfig, AutomationOption};
use crate::events::InputAction;

/// Translation keys for settings text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextKey {
    CloseDoor,
    CloseDoorTooltip,
    ManageGroundContainer,
    ManageGroundContainerTooltip,
    AutoPaddle,
    AutoPaddleTooltip,
}

impl AutomationOption {
    pub fn label(self) -> TextKey {
        match self {
            AutomationOption::CloseDoor => TextKey::CloseDoor,
            AutomationOption::ManageGroundContainer => TextKey::ManageGroundContainer,
            AutomationOption::AutoPaddle => TextKey::AutoPaddle,
        }
    }

    pub fn tooltip(self) -> TextKey {
        match self {
            AutomationOption::CloseDoor => TextKey::CloseDoorTooltip,
            AutomationOption::ManageGroundContainer => TextKey::ManageGroundContainerTooltip,
            AutomationOption::AutoPaddle => TextKey::AutoPaddleTooltip,
        }
    }
}

/// A checkbox bound 1:1 to a config flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkbox {
    pub option: AutomationOption,
    pub label: TextKey,
    pub tooltip: TextKey,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSection {
    pub checkboxes: Vec<Checkbox>,
}

impl SettingsSection {
    pub fn checkbox(&self, option: AutomationOption) -> Option<&Checkbox> {
        self.checkboxes.iter().find(|c| c.option == option)
    }
}

/// Build the settings section from the current config.
pub fn settings_section(config: &AutomationConfig) -> SettingsSection {
    SettingsSection {
        checkboxes: AutomationOption::ALL
            .into_iter()
            .map(|option| Checkbox {
                option,
                label: option.label(),
                tooltip: option.tooltip(),
                checked: config.get(option),
            })
            .collect(),
    }
}

/// A key-bound input the host should register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bindable {
    pub action: InputAction,
    pub name: &'static str,
    /// Default key, as a DOM `KeyboardEvent.code`.
    pub default_key: &'static str,
}

pub const BINDABLES: [Bindable; 1] = [Bindable {
    action: InputAction::ToggleGroundContainer,
    name: "ToggleGroundContainer",
    default_key: "KeyG",
}];

impl InputAction {
    pub fn bindable(self) -> Bindable {
        match self {
            InputAction::ToggleGroundContainer => BINDABLES[0],
        }
    }
}
