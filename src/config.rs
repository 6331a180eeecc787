//! Pipeline configuration loaded from TOML.

use crate::board::STANDARD_BOARD_SIZE;
use crate::gesture::GestureThresholds;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Tunable settings for a gesture-to-move pipeline.
///
/// Every field has a sensible default, so an empty TOML file is a valid
/// configuration.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Board width in squares.
    #[serde(default = "default_board_side")]
    board_width: i32,

    /// Board height in squares.
    #[serde(default = "default_board_side")]
    board_height: i32,

    /// Per-turn tick budget; unset lets turns run unbounded.
    #[serde(default)]
    tick_budget: Option<u32>,

    /// Classifier thresholds, in metres relative to the calibrated origin.
    #[serde(default)]
    thresholds: GestureThresholds,
}

#[instrument]
fn default_board_side() -> i32 {
    STANDARD_BOARD_SIZE
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            board_width: default_board_side(),
            board_height: default_board_side(),
            tick_budget: None,
            thresholds: GestureThresholds::default(),
        }
    }
}

impl PipelineConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(
            board_width = config.board_width,
            board_height = config.board_height,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width < 1 || self.board_height < 1 {
            return Err(ConfigError::new(format!(
                "Board must be at least 1x1, got {}x{}",
                self.board_width, self.board_height
            )));
        }

        let t = &self.thresholds;
        if t.stand_min >= t.stand_max {
            return Err(ConfigError::new(format!(
                "Standing band is empty: stand_min {} >= stand_max {}",
                t.stand_min, t.stand_max
            )));
        }
        if t.squat_max > t.stand_min {
            return Err(ConfigError::new(format!(
                "Squat band overlaps standing band: squat_max {} > stand_min {}",
                t.squat_max, t.stand_min
            )));
        }
        if t.jump_min < t.stand_max {
            return Err(ConfigError::new(format!(
                "Jump band overlaps standing band: jump_min {} < stand_max {}",
                t.jump_min, t.stand_max
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config = PipelineConfig::from_toml_str("").expect("empty config should parse");
        assert_eq!(*config.board_width(), STANDARD_BOARD_SIZE);
        assert_eq!(*config.board_height(), STANDARD_BOARD_SIZE);
        assert_eq!(*config.tick_budget(), None);
        assert_eq!(*config.thresholds(), GestureThresholds::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = PipelineConfig::from_toml_str(
            r#"
board_width = 10
tick_budget = 600

[thresholds]
jump_min = 0.9
"#,
        )
        .expect("partial config should parse");
        assert_eq!(*config.board_width(), 10);
        assert_eq!(*config.board_height(), STANDARD_BOARD_SIZE);
        assert_eq!(*config.tick_budget(), Some(600));
        assert_eq!(config.thresholds().jump_min, 0.9);
        assert_eq!(config.thresholds().squat_max, 0.2);
    }

    #[test]
    fn test_rejects_degenerate_board() {
        let result = PipelineConfig::from_toml_str("board_width = 0");
        assert!(result.is_err());
        let result = PipelineConfig::from_toml_str("board_height = -3");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_inverted_standing_band() {
        let result = PipelineConfig::from_toml_str(
            r#"
[thresholds]
stand_min = 0.8
stand_max = 0.5
jump_min = 0.9
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_squat_band_above_standing_floor() {
        let result = PipelineConfig::from_toml_str(
            r#"
[thresholds]
squat_max = 0.5
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_jump_at_standing_ceiling_is_allowed() {
        // jump_min == stand_max leaves no dead zone between the bands.
        let config = PipelineConfig::from_toml_str(
            r#"
[thresholds]
stand_max = 0.7
jump_min = 0.7
"#,
        );
        assert!(config.is_ok());
    }

    #[test]
    fn test_malformed_toml_reports_parse_error() {
        let err = PipelineConfig::from_toml_str("board_width = !!!")
            .expect_err("garbage should not parse");
        assert!(err.message.contains("parse"));
    }
}
