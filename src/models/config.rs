use serde::{Deserialize, Serialize};

/// Display theme, persisted as `"light"`/`"dark"` in the user config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    /// The opposite theme.
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }
}

/// User configuration from Quickcalc Config.yaml
///
/// Contains the theme preference and display timing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(rename = "Quickcalc_Settings")]
    pub settings: CalcSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalcSettings {
    #[serde(rename = "Theme", default)]
    pub theme: ThemePreference,

    /// How long the error indicator stays visible before the calculator
    /// resets, in milliseconds.
    #[serde(rename = "Error Reset Delay", default = "default_error_reset_delay")]
    pub error_reset_delay_ms: u64,

    /// How long the keyboard-shortcuts overlay stays visible before it
    /// dismisses itself, in milliseconds.
    #[serde(rename = "Overlay Dismiss Delay", default = "default_overlay_dismiss_delay")]
    pub overlay_dismiss_delay_ms: u64,

    #[serde(rename = "Stat Logging", default = "default_stat_logging")]
    pub stat_logging: bool,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,
}

impl Default for CalcSettings {
    fn default() -> Self {
        Self {
            theme: ThemePreference::Light,
            error_reset_delay_ms: 2000,
            overlay_dismiss_delay_ms: 5000,
            stat_logging: true,
            debug_mode: false,
        }
    }
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            settings: CalcSettings::default(),
        }
    }
}

fn default_error_reset_delay() -> u64 {
    2000
}

fn default_overlay_dismiss_delay() -> u64 {
    5000
}

fn default_stat_logging() -> bool {
    true
}
