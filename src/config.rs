use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunable constants of the tutor. The defaults reproduce the training
/// setup shipped with the simulator hardware.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TutorConfig {
    /// Total number of vessel models, main vessel included.
    pub num_models: usize,
    /// Minimum time between recorded path samples, in seconds.
    pub sample_interval_s: f64,
    /// Minimum time between triggered cut evaluations, in seconds.
    pub cut_debounce_s: f64,
    /// A cut only removes a branch whose origin lies closer than this
    /// (world units).
    pub max_cut_distance: f64,
    /// Lower clamp of the trigger-to-shaft angle, degrees.
    pub trigger_angle_min_deg: f64,
    /// Upper clamp of the trigger-to-shaft angle, degrees.
    pub trigger_angle_max_deg: f64,
    /// Scale mapping the clamped trigger angle to the jaw opening angle.
    pub open_angle_scale: f64,
    /// |open angle| below this counts as a fully closed cutter, degrees.
    pub closed_angle_threshold_deg: f64,
}

impl Default for TutorConfig {
    fn default() -> Self {
        TutorConfig {
            num_models: 9,
            sample_interval_s: 0.25,
            cut_debounce_s: 3.0,
            max_cut_distance: 280.0,
            trigger_angle_min_deg: 90.0,
            trigger_angle_max_deg: 102.0,
            open_angle_scale: -2.2,
            closed_angle_threshold_deg: 0.25,
        }
    }
}

impl TutorConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: TutorConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_models < 1 {
            return Err(ConfigError::Invalid(
                "num_models must include at least the main vessel".into(),
            ));
        }
        if !(self.sample_interval_s > 0.0) {
            return Err(ConfigError::Invalid(
                "sample_interval_s must be positive".into(),
            ));
        }
        if self.cut_debounce_s < 0.0 {
            return Err(ConfigError::Invalid(
                "cut_debounce_s must not be negative".into(),
            ));
        }
        if !(self.max_cut_distance > 0.0) {
            return Err(ConfigError::Invalid(
                "max_cut_distance must be positive".into(),
            ));
        }
        if self.trigger_angle_min_deg >= self.trigger_angle_max_deg {
            return Err(ConfigError::Invalid(
                "trigger_angle_min_deg must be below trigger_angle_max_deg".into(),
            ));
        }
        if !(self.closed_angle_threshold_deg > 0.0) {
            return Err(ConfigError::Invalid(
                "closed_angle_threshold_deg must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TutorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_models, 9);
        assert_eq!(config.sample_interval_s, 0.25);
        assert_eq!(config.cut_debounce_s, 3.0);
        assert_eq!(config.max_cut_distance, 280.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TutorConfig::from_toml_str("num_models = 5\nmax_cut_distance = 120.0\n")
            .expect("valid config");
        assert_eq!(config.num_models, 5);
        assert_eq!(config.max_cut_distance, 120.0);
        assert_eq!(config.sample_interval_s, 0.25);
        assert_eq!(config.open_angle_scale, -2.2);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(TutorConfig::from_toml_str("cut_radius = 1.0\n").is_err());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(TutorConfig::from_toml_str("sample_interval_s = 0.0\n").is_err());
        assert!(TutorConfig::from_toml_str("num_models = 0\n").is_err());
        assert!(TutorConfig::from_toml_str(
            "trigger_angle_min_deg = 102.0\ntrigger_angle_max_deg = 90.0\n"
        )
        .is_err());
    }
}
