//! Configuration for the nightbridge scene.
//!
//! The config lives in `config.toml` inside the platform config directory.
//! Every field has a default, so a missing file or a partial file is fine.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use nightbridge_core::{AnimationSpeed, SceneToggles};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for `car_count`, `heart_count` and `show_bursts`.
pub const MAX_ENTITY_COUNT: usize = 500;

/// Longest accepted delay between show bursts.
pub const MAX_SHOW_INTERVAL_MS: u64 = 60_000;

/// Text shown by the particle field when nothing else is configured.
pub const DEFAULT_TEXT: &str = "I LOVE YOU";

/// Errors raised while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Scene tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Optional layers, enabled at startup.
    #[serde(flatten)]
    pub toggles: SceneToggles,
    /// Radius in pixels within which the pointer pushes particles away.
    pub influence_radius: f32,
    pub car_count: usize,
    pub heart_count: usize,
    pub speed: AnimationSpeed,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            toggles: SceneToggles::default(),
            influence_radius: 100.0,
            car_count: 20,
            heart_count: 15,
            speed: AnimationSpeed::default(),
        }
    }
}

/// Terminal display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Target frames per second.
    pub fps: u32,
    /// Logical pixels per terminal column.
    pub cell_width: u32,
    /// Logical pixels per terminal row.
    pub cell_height: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            fps: 30,
            cell_width: 8,
            cell_height: 16,
        }
    }
}

impl DisplaySettings {
    /// Time budget of one frame in milliseconds.
    pub fn frame_interval_ms(&self) -> u64 {
        1000 / u64::from(self.fps.max(1))
    }
}

/// Firework show settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworkSettings {
    /// Bursts launched by one show.
    pub show_bursts: usize,
    /// Delay between consecutive bursts of a show.
    pub show_interval_ms: u64,
}

impl Default for FireworkSettings {
    fn default() -> Self {
        Self {
            show_bursts: 5,
            show_interval_ms: 400,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text spelled out by the particles.
    pub text: String,
    /// Fixed RNG seed; a clock-derived seed is used when unset.
    pub seed: Option<u64>,
    /// Default tracing filter, overridden by `NIGHTBRIDGE_LOG`.
    pub log_level: String,
    pub scene: SceneSettings,
    pub display: DisplaySettings,
    pub fireworks: FireworkSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            seed: None,
            log_level: "info".to_string(),
            scene: SceneSettings::default(),
            display: DisplaySettings::default(),
            fireworks: FireworkSettings::default(),
        }
    }
}

impl Config {
    /// Platform project directories for nightbridge.
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "nightbridge")
    }

    /// Default location of `config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when the file
    /// or the config directory does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the scene cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=120).contains(&self.display.fps) {
            return Err(ConfigError::Invalid {
                field: "display.fps",
                reason: format!("{} is outside 1..=120", self.display.fps),
            });
        }
        if self.display.cell_width == 0 || self.display.cell_height == 0 {
            return Err(ConfigError::Invalid {
                field: "display.cell_width/cell_height",
                reason: "cell size must be non-zero".to_string(),
            });
        }
        if !(self.scene.influence_radius.is_finite() && self.scene.influence_radius > 0.0) {
            return Err(ConfigError::Invalid {
                field: "scene.influence_radius",
                reason: format!("{} is not a positive radius", self.scene.influence_radius),
            });
        }
        for (field, count) in [
            ("scene.car_count", self.scene.car_count),
            ("scene.heart_count", self.scene.heart_count),
            ("fireworks.show_bursts", self.fireworks.show_bursts),
        ] {
            if count > MAX_ENTITY_COUNT {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{count} is above {MAX_ENTITY_COUNT}"),
                });
            }
        }
        if !(1..=MAX_SHOW_INTERVAL_MS).contains(&self.fireworks.show_interval_ms) {
            return Err(ConfigError::Invalid {
                field: "fireworks.show_interval_ms",
                reason: format!(
                    "{} is outside 1..={MAX_SHOW_INTERVAL_MS}",
                    self.fireworks.show_interval_ms
                ),
            });
        }
        Ok(())
    }
}
