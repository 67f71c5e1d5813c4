use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    snapshot::GridSize,
};

/// Main configuration for dotmorph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Dot grid resolution
    pub grid: GridConfig,

    /// Capture cadence and per-dot timing
    pub timing: TimingConfig,

    /// Correspondence matching settings
    pub matching: MatchingConfig,

    /// Drawing settings
    pub render: RenderConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.timing.validate()?;
        self.matching.validate()?;
        self.render.validate()?;
        Ok(())
    }
}

/// Dot grid resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of dot columns
    pub width: u32,

    /// Number of dot rows
    pub height: u32,

    /// Base multiplier for fidelity-driven resolution changes
    pub min_dots: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 45,
            min_dots: 3,
        }
    }
}

impl GridConfig {
    pub fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidValue {
                key: "grid.size".to_string(),
                value: format!("{}x{}", self.width, self.height)
            }.into());
        }

        if self.min_dots == 0 {
            return Err(ConfigError::InvalidValue {
                key: "grid.min_dots".to_string(),
                value: self.min_dots.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Capture cadence and per-dot timing, all in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Time between captures in steady state; also the nominal transition length
    pub capture_interval: f64,

    /// Wait between the first and second capture after a (re)start
    pub initial_delay: f64,

    /// Upper bound of each dot's random start delay
    pub duration_jitter: f64,

    /// Every dot must finish this long before the nominal transition end
    pub safe_end_margin: f64,

    /// Shortest time any single dot may take to travel
    pub min_pixel_duration: f64,

    /// Window substituted when a dot's scheduling range collapses
    pub fallback_window: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        let capture_interval = 8000.0;
        Self {
            capture_interval,
            initial_delay: 200.0,
            duration_jitter: 500.0,
            safe_end_margin: 500.0,
            min_pixel_duration: capture_interval - 1000.0,
            fallback_window: 1000.0,
        }
    }
}

impl TimingConfig {
    /// Nominal length of one transition
    pub fn total_duration(&self) -> f64 {
        self.capture_interval
    }

    fn validate(&self) -> Result<()> {
        if self.capture_interval <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "timing.capture_interval".to_string(),
                value: self.capture_interval.to_string()
            }.into());
        }

        if self.min_pixel_duration <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "timing.min_pixel_duration".to_string(),
                value: self.min_pixel_duration.to_string()
            }.into());
        }

        if self.fallback_window <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "timing.fallback_window".to_string(),
                value: self.fallback_window.to_string()
            }.into());
        }

        for (key, value) in [
            ("timing.initial_delay", self.initial_delay),
            ("timing.duration_jitter", self.duration_jitter),
            ("timing.safe_end_margin", self.safe_end_margin),
        ] {
            if value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string()
                }.into());
            }
        }

        Ok(())
    }
}

/// Correspondence matching settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// RGB distance below which a dot keeps its own position
    pub tolerance: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self { tolerance: 30.0 }
    }
}

impl MatchingConfig {
    fn validate(&self) -> Result<()> {
        if self.tolerance < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "matching.tolerance".to_string(),
                value: self.tolerance.to_string()
            }.into());
        }
        Ok(())
    }
}

/// Drawing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Dot diameter as a fraction of the smaller cell side
    pub diameter_adj: f64,

    /// Gray level of the background wash
    pub background: u8,

    /// Alpha of the background wash applied every tick (255 clears fully)
    pub background_fader: u8,

    /// Flip horizontally, like a selfie camera
    pub mirror: bool,

    /// Draw the previous snapshot beneath moving dots
    pub underlay_previous: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            diameter_adj: 0.9,
            background: 0,
            background_fader: 8,
            mirror: true,
            underlay_previous: true,
        }
    }
}

impl RenderConfig {
    fn validate(&self) -> Result<()> {
        if !(self.diameter_adj > 0.0 && self.diameter_adj <= 1.0) {
            return Err(ConfigError::InvalidValue {
                key: "render.diameter_adj".to_string(),
                value: self.diameter_adj.to_string()
            }.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timing.min_pixel_duration, 7000.0);
        assert_eq!(config.timing.total_duration(), 8000.0);
        assert_eq!(config.grid.size(), GridSize::new(60, 45));
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let mut original_config = Config::default();
        original_config.grid.width = 24;
        original_config.grid.height = 18;
        original_config.render.mirror = false;

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = Config::from_file(dir.path().join("nope.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_grid() {
        let mut config = Config::default();
        config.grid.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_min_pixel_duration() {
        let mut config = Config::default();
        config.timing.min_pixel_duration = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_diameter() {
        let mut config = Config::default();
        config.render.diameter_adj = 1.5;
        assert!(config.validate().is_err());
    }
}
