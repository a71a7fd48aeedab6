#![forbid(unsafe_code)]

//! Interaction tuning as data.
//!
//! [`InteractionConfig`] holds every timing and tolerance constant of the
//! interaction session. Defaults match the hardcoded values the controller
//! has always used, so `InteractionConfig::default()` changes nothing.
//!
//! # Loading
//!
//! With the `policy-config` feature the config can be read from TOML or JSON:
//!
//! ```toml
//! # grabkit.toml
//! double_trigger_window_ms = 250
//! tolerance = 2
//! ```
//!
//! ```rust,ignore
//! let config = InteractionConfig::from_toml_file("grabkit.toml")?;
//! ```
//!
//! Missing keys fall back to their defaults. Loaded configs are validated.

#[cfg(feature = "policy-config")]
use std::path::Path;

#[cfg(feature = "policy-config")]
use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Window in which a second trigger counts as a secondary interaction.
pub const DEFAULT_DOUBLE_TRIGGER_WINDOW_MS: u64 = 200;
/// Default delay of throttled operations (one 60 Hz frame).
pub const DEFAULT_THROTTLE_DELAY_MS: u64 = 16;
/// Time a pointer may stay outside the viewport before the session is ended.
pub const DEFAULT_FAILSAFE_TIMEOUT_MS: u64 = 3000;
/// Multiplier applied to the device pixel ratio for edge precision.
pub const DEFAULT_PRECISION_SCALE: f64 = 2.0;

/// Tunable parameters of an interaction session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct InteractionConfig {
    /// Double-trigger window in milliseconds.
    pub double_trigger_window_ms: u64,
    /// Default throttle delay in milliseconds.
    pub throttle_delay_ms: u64,
    /// Out-of-viewport failsafe in milliseconds.
    pub failsafe_timeout_ms: u64,
    /// Moves are absorbed (they only re-seed the start position) while their
    /// running count stays below this value.
    pub tolerance: u32,
    /// Edge precision is `ceil(device_pixel_ratio * precision_scale)` pixels.
    pub precision_scale: f64,
    /// Passed (negated) to layout update requests after a secondary
    /// interaction.
    pub enable_document_events: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            double_trigger_window_ms: DEFAULT_DOUBLE_TRIGGER_WINDOW_MS,
            throttle_delay_ms: DEFAULT_THROTTLE_DELAY_MS,
            failsafe_timeout_ms: DEFAULT_FAILSAFE_TIMEOUT_MS,
            tolerance: 0,
            precision_scale: DEFAULT_PRECISION_SCALE,
            enable_document_events: false,
        }
    }
}

impl InteractionConfig {
    /// Set the number of absorbed initial updates.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the double-trigger window.
    #[must_use]
    pub fn with_double_trigger_window(mut self, window: Duration) -> Self {
        self.double_trigger_window_ms = duration_ms(window);
        self
    }

    /// Set the default throttle delay.
    #[must_use]
    pub fn with_throttle_delay(mut self, delay: Duration) -> Self {
        self.throttle_delay_ms = duration_ms(delay);
        self
    }

    /// Set the out-of-viewport failsafe timeout.
    #[must_use]
    pub fn with_failsafe_timeout(mut self, timeout: Duration) -> Self {
        self.failsafe_timeout_ms = duration_ms(timeout);
        self
    }

    /// Set the edge precision scale.
    #[must_use]
    pub fn with_precision_scale(mut self, scale: f64) -> Self {
        self.precision_scale = scale;
        self
    }

    /// Set the document-events flag.
    #[must_use]
    pub fn with_document_events(mut self, enabled: bool) -> Self {
        self.enable_document_events = enabled;
        self
    }

    #[must_use]
    pub const fn double_trigger_window(&self) -> Duration {
        Duration::from_millis(self.double_trigger_window_ms)
    }

    #[must_use]
    pub const fn throttle_delay(&self) -> Duration {
        Duration::from_millis(self.throttle_delay_ms)
    }

    #[must_use]
    pub const fn failsafe_timeout(&self) -> Duration {
        Duration::from_millis(self.failsafe_timeout_ms)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.double_trigger_window_ms == 0 {
            errors.push("double_trigger_window_ms must be > 0".into());
        }
        if self.failsafe_timeout_ms == 0 {
            errors.push("failsafe_timeout_ms must be > 0".into());
        }
        if !self.precision_scale.is_finite() || self.precision_scale <= 0.0 {
            errors.push(format!(
                "precision_scale must be finite and > 0, got {}",
                self.precision_scale
            ));
        }

        errors
    }

    /// Return `self` if valid, or the collected validation errors.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Errors from loading or validating an [`InteractionConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "policy-config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "policy-config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
