//! Demo configuration.
//!
//! Loaded from an optional TOML file; every field has a default, so a missing
//! file or a partial file both work.
//!
//! ```toml
//! [window]
//! width = 1280
//! height = 960
//!
//! [shadow]
//! target_size = 512
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "shadowcast.toml";

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Shadow Mapping".to_string(),
            width: 640,
            height: 480,
        }
    }
}

/// Off-screen depth target and light frustum parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    /// Edge length of the square depth target in texels.
    pub target_size: u32,
    /// Vertical field of view of the light frustum, degrees.
    pub light_fov_degrees: f32,
    pub light_aspect: f32,
    pub light_near: f32,
    pub light_far: f32,
    /// Slope-scaled part of the capture depth offset.
    pub polygon_offset_factor: f32,
    /// Constant part of the capture depth offset, in depth resolution steps.
    pub polygon_offset_units: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            target_size: 1024,
            light_fov_degrees: 75.0,
            light_aspect: 640.0 / 480.0,
            light_near: 0.1,
            light_far: 100.0,
            polygon_offset_factor: 2.0,
            polygon_offset_units: 2.0,
        }
    }
}

/// Bounds applied to the incremental camera and light adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub min_fov_degrees: f32,
    pub max_fov_degrees: f32,
    pub min_dolly: f32,
    pub max_dolly: f32,
    /// Light position is clamped to a cube of this half-extent around the origin.
    pub light_extent: f32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_fov_degrees: 1.0,
            max_fov_degrees: 170.0,
            min_dolly: 1.0,
            max_dolly: 90.0,
            light_extent: 50.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `env_logger` filter string; `RUST_LOG` is used when absent.
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub shadow: ShadowConfig,
    pub limits: LimitsConfig,
    pub logging: LogConfig,
}

impl DemoConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: DemoConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists, else
    /// the defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width < 2 || self.window.height < 2 {
            return Err(ConfigError::Invalid {
                field: "window",
                reason: format!("{}x{} is too small", self.window.width, self.window.height),
            });
        }
        let shadow = &self.shadow;
        if !(shadow.light_near > 0.0 && shadow.light_far > shadow.light_near) {
            return Err(ConfigError::Invalid {
                field: "shadow.light_near",
                reason: "expected 0 < light_near < light_far".to_string(),
            });
        }
        if !(shadow.light_fov_degrees > 0.0 && shadow.light_fov_degrees < 180.0) {
            return Err(ConfigError::Invalid {
                field: "shadow.light_fov_degrees",
                reason: format!("{} is outside (0, 180)", shadow.light_fov_degrees),
            });
        }
        if shadow.light_aspect <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "shadow.light_aspect",
                reason: "must be positive".to_string(),
            });
        }
        let limits = &self.limits;
        if !(limits.min_fov_degrees > 0.0
            && limits.min_fov_degrees <= limits.max_fov_degrees
            && limits.max_fov_degrees < 180.0)
        {
            return Err(ConfigError::Invalid {
                field: "limits.min_fov_degrees",
                reason: format!(
                    "expected 0 < min_fov_degrees <= max_fov_degrees < 180, got {}..{}",
                    limits.min_fov_degrees, limits.max_fov_degrees
                ),
            });
        }
        if !(limits.min_dolly > 0.0 && limits.min_dolly <= limits.max_dolly) {
            return Err(ConfigError::Invalid {
                field: "limits.min_dolly",
                reason: format!(
                    "expected 0 < min_dolly <= max_dolly, got {}..{}",
                    limits.min_dolly, limits.max_dolly
                ),
            });
        }
        if !(limits.light_extent > 0.0) {
            return Err(ConfigError::Invalid {
                field: "limits.light_extent",
                reason: format!("{} is not positive", limits.light_extent),
            });
        }
        Ok(())
    }
}
