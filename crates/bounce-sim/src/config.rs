use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use bounce_core::{BallParameters, ParameterError};

use crate::readout::{OutputFormat, Viewport};

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "bounce.toml";

/// Top-level driver configuration, loaded from `bounce.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Initial ball parameters.
    pub ball: BallParameters,
    /// Readout cadence.
    pub sample_interval_ms: u64,
    /// Stop the session after this much wall time. 0 = no limit.
    pub max_duration_secs: f64,
    /// End the session once the ball has come to rest.
    pub exit_on_rest: bool,
    /// Start the clock immediately instead of waiting for `start`.
    pub autostart: bool,
    pub output: OutputFormat,
    pub viewport: Viewport,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ball: BallParameters::default(),
            sample_interval_ms: 50,
            max_duration_secs: 0.0,
            exit_on_rest: true,
            autostart: true,
            output: OutputFormat::Text,
            viewport: Viewport::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroInterval,
    InvalidDuration(f64),
    InvalidScale(f64),
    Ball(ParameterError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroInterval => write!(f, "sample_interval_ms must be > 0"),
            Self::InvalidDuration(d) => {
                write!(f, "max_duration_secs must be finite, >= 0 and fit a Duration, got {d}")
            },
            Self::InvalidScale(s) => {
                write!(f, "viewport.pixels_per_meter must be finite and > 0, got {s}")
            },
            Self::Ball(e) => write!(f, "ball: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ParameterError> for ConfigError {
    fn from(e: ParameterError) -> Self {
        Self::Ball(e)
    }
}

impl SimConfig {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn max_duration(&self) -> Option<Duration> {
        if self.max_duration_secs > 0.0 {
            Duration::try_from_secs_f64(self.max_duration_secs).ok()
        } else {
            None
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        let duration = self.max_duration_secs;
        if !duration.is_finite()
            || duration < 0.0
            || Duration::try_from_secs_f64(duration).is_err()
        {
            return Err(ConfigError::InvalidDuration(duration));
        }
        let scale = self.viewport.pixels_per_meter;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::InvalidScale(scale));
        }
        self.ball.validate()?;
        Ok(())
    }

    /// Load config from `BOUNCE_CONFIG` or `bounce.toml` if present, then
    /// apply env var overrides.
    pub fn load() -> Self {
        let path = std::env::var("BOUNCE_CONFIG")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<SimConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    cfg
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Failed to parse config: {e}, using defaults");
                    SimConfig::default()
                },
            },
            Err(_) => {
                tracing::info!(path = %path.display(), "No config file found, using defaults");
                SimConfig::default()
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply `BOUNCE_*` overrides read through `lookup`.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("BOUNCE_SAMPLE_INTERVAL_MS")
            && let Ok(n) = val.parse::<u64>()
        {
            self.sample_interval_ms = n;
        }
        if let Some(val) = lookup("BOUNCE_MAX_DURATION_SECS")
            && let Ok(n) = val.parse::<f64>()
        {
            self.max_duration_secs = n;
        }
        if let Some(val) = lookup("BOUNCE_OUTPUT") {
            match val.parse::<OutputFormat>() {
                Ok(format) => self.output = format,
                Err(e) => tracing::warn!("Ignoring BOUNCE_OUTPUT: {e}"),
            }
        }
        if let Some(val) = lookup("BOUNCE_AUTOSTART")
            && let Ok(b) = val.parse::<bool>()
        {
            self.autostart = b;
        }
    }
}
