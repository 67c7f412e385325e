//! Configuration for the plexus terminal background.
//!
//! Settings live in a TOML file under the platform config directory
//! (`~/.config/plexus/config.toml` on Linux). Every key is optional and a
//! missing file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use plexus_core::{AnimationSpeed, ColorTheme};
use plexus_field::{ConnectorKind, FieldSettings, SpawnParams};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest particle count accepted from configuration.
pub const MAX_PARTICLES: usize = 10_000;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize configuration")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Logging options. Logs go to a file since the terminal is busy drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Write a log file even when `PLEXUS_LOG` is unset.
    pub enabled: bool,
    /// Filter directive, e.g. `info` or `plexus_field=debug`.
    pub level: String,
    /// Log file path. Defaults to `plexus.log` in the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of particles.
    pub particles: usize,
    /// Maximum distance, in pixels, at which two particles are linked.
    pub link_distance: f64,
    /// Opacity of the shortest links.
    pub link_opacity: f64,
    /// Neighbor search used for links.
    pub connector: ConnectorKind,
    /// Speed range in pixels per frame.
    pub min_speed: f64,
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    /// Fixed seed for a reproducible layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub theme: ColorTheme,
    pub speed: AnimationSpeed,
    /// Pixel width of one terminal cell.
    pub cell_width: f64,
    /// Pixel height of one terminal cell.
    pub cell_height: f64,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        let field = FieldSettings::default();
        let spawn = field.spawn;
        Self {
            particles: field.particle_count,
            link_distance: field.link_distance,
            link_opacity: field.link_opacity,
            connector: field.connector,
            min_speed: spawn.min_speed,
            max_speed: spawn.max_speed,
            min_radius: spawn.min_radius,
            max_radius: spawn.max_radius,
            min_opacity: spawn.min_opacity,
            max_opacity: spawn.max_opacity,
            seed: None,
            theme: ColorTheme::default(),
            speed: AnimationSpeed::default(),
            cell_width: 8.0,
            cell_height: 16.0,
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Platform config file location, if a home directory can be found.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Default log file location.
    pub fn default_log_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_local_dir().join("plexus.log"))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<string>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check ranges and limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particles > MAX_PARTICLES {
            return Err(invalid(format!(
                "particles must be at most {MAX_PARTICLES}, got {}",
                self.particles
            )));
        }
        if !self.link_distance.is_finite() || self.link_distance < 0.0 {
            return Err(invalid(format!(
                "link_distance must be a non-negative number, got {}",
                self.link_distance
            )));
        }
        check_unit("link_opacity", self.link_opacity)?;
        check_unit("min_opacity", self.min_opacity)?;
        check_unit("max_opacity", self.max_opacity)?;
        check_range("speed", self.min_speed, self.max_speed)?;
        check_range("radius", self.min_radius, self.max_radius)?;
        check_range("opacity", self.min_opacity, self.max_opacity)?;
        for (name, value) in [("cell_width", self.cell_width), ("cell_height", self.cell_height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }
        Ok(())
    }

    /// Settings for a [`plexus_field::ParticleField`].
    pub fn field_settings(&self) -> FieldSettings {
        FieldSettings {
            particle_count: self.particles,
            link_distance: self.link_distance,
            link_opacity: self.link_opacity,
            connector: self.connector,
            spawn: SpawnParams {
                min_speed: self.min_speed,
                max_speed: self.max_speed,
                min_radius: self.min_radius,
                max_radius: self.max_radius,
                min_opacity: self.min_opacity,
                max_opacity: self.max_opacity,
            },
            seed: self.seed,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "plexus")
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

fn check_unit(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be within 0..=1, got {value}")))
    }
}

fn check_range(name: &str, min: f64, max: f64) -> Result<(), ConfigError> {
    if !min.is_finite() || !max.is_finite() || min < 0.0 {
        return Err(invalid(format!(
            "{name} range must be non-negative numbers, got {min}..{max}"
        )));
    }
    if min > max {
        return Err(invalid(format!(
            "min_{name} ({min}) is greater than max_{name} ({max})"
        )));
    }
    Ok(())
}
