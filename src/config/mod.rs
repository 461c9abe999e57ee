// Layout configuration: minimum pane sizes, separator thickness, resize
// increments, and the collapse-focus policy.

use serde::Deserialize;
use std::path::Path;

use crate::pane::FocusPolicy;

const VALID_FOCUS_POLICIES: &[&str] = &["most_recently_used", "first_leaf"];

/// Top-level layout core configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub resize: ResizeConfig,
    pub focus: FocusConfig,
}

/// Pane geometry configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Minimum usable pane width in pixels.
    pub min_pane_width: f32,
    /// Minimum usable pane height in pixels.
    pub min_pane_height: f32,
    /// Thickness of the separator between split children, in pixels.
    pub separator_thickness: f32,
}

/// Separator resize configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeConfig {
    /// Ratio delta applied per resize-separator request.
    pub increment: f32,
    /// Lower bound for any split ratio.
    pub ratio_min: f32,
    /// Upper bound for any split ratio.
    pub ratio_max: f32,
}

/// Focus tracking configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FocusConfig {
    /// Which leaf receives focus when a sibling collapse orphans the
    /// focus token.
    pub policy: FocusPolicy,
}

/// Errors that can occur during config loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("validation error: {0}")]
    Validation(String),
}

// ── Serde intermediate structs ──────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    layout: RawLayoutConfig,
    resize: RawResizeConfig,
    focus: RawFocusConfig,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawLayoutConfig {
    min_pane_width: f32,
    min_pane_height: f32,
    separator_thickness: f32,
}

impl Default for RawLayoutConfig {
    fn default() -> Self {
        Self {
            min_pane_width: 20.0,
            min_pane_height: 20.0,
            separator_thickness: 2.0,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawResizeConfig {
    increment: f32,
    ratio_min: f32,
    ratio_max: f32,
}

impl Default for RawResizeConfig {
    fn default() -> Self {
        Self {
            increment: 0.05,
            ratio_min: 0.1,
            ratio_max: 0.9,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawFocusConfig {
    policy: String,
}

impl Default for RawFocusConfig {
    fn default() -> Self {
        Self {
            policy: "most_recently_used".to_string(),
        }
    }
}

// ── Default impls ───────────────────────────────────────────────────────

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_pane_width: 20.0,
            min_pane_height: 20.0,
            separator_thickness: 2.0,
        }
    }
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            increment: 0.05,
            ratio_min: 0.1,
            ratio_max: 0.9,
        }
    }
}

// ── Config implementation ───────────────────────────────────────────────

impl Config {
    /// Load config from a TOML file path. Returns defaults if file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Parse a TOML string into a Config.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if !VALID_FOCUS_POLICIES.contains(&raw.focus.policy.as_str()) {
            return Err(ConfigError::Validation(format!(
                "unknown focus policy '{}', valid policies: {}",
                raw.focus.policy,
                VALID_FOCUS_POLICIES.join(", ")
            )));
        }
        let policy = match raw.focus.policy.as_str() {
            "first_leaf" => FocusPolicy::FirstLeaf,
            _ => FocusPolicy::MostRecentlyUsed,
        };

        let config = Self {
            layout: LayoutConfig {
                min_pane_width: raw.layout.min_pane_width,
                min_pane_height: raw.layout.min_pane_height,
                separator_thickness: raw.layout.separator_thickness,
            },
            resize: ResizeConfig {
                increment: raw.resize.increment,
                ratio_min: raw.resize.ratio_min,
                ratio_max: raw.resize.ratio_max,
            },
            focus: FocusConfig { policy },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the config, returning an error if any values are out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.min_pane_width <= 0.0 || self.layout.min_pane_height <= 0.0 {
            return Err(ConfigError::Validation(
                "minimum pane sizes must be > 0".to_string(),
            ));
        }

        if self.layout.separator_thickness < 0.0 {
            return Err(ConfigError::Validation(
                "separator thickness must be >= 0".to_string(),
            ));
        }

        if self.resize.increment <= 0.0 || self.resize.increment >= 0.5 {
            return Err(ConfigError::Validation(
                "resize increment must be in (0, 0.5)".to_string(),
            ));
        }

        if self.resize.ratio_min <= 0.0
            || self.resize.ratio_max >= 1.0
            || self.resize.ratio_min >= self.resize.ratio_max
        {
            return Err(ConfigError::Validation(
                "ratio bounds must satisfy 0 < ratio_min < ratio_max < 1".to_string(),
            ));
        }

        Ok(())
    }
}
