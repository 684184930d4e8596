//! Engine configuration parsed from defaults or environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{
    CLICK_PROMOTION_MS, FIT_SHRINK_CONSTRAINED, FIT_SHRINK_DESKTOP, HOME_CORRECTION_DELAY_MS, HOME_SCALE_CONSTRAINED,
    HOME_SCALE_DESKTOP, MIN_ELEMENT_SIZE, OFFSET_DEBOUNCE_MS, RELEASE_GAP,
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown BOARD_DEVICE_PROFILE: {0} (expected 'desktop' or 'constrained')")]
    UnknownDeviceProfile(String),
    #[error("{key} must be a non-negative number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
}

/// Class of device the board is shown on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceProfile {
    #[default]
    Desktop,
    /// Small screens and touch devices: lower home scale, more fit padding.
    Constrained,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub device: DeviceProfile,
    pub min_element_size: f64,
    pub click_promotion_ms: f64,
    pub home_correction_delay_ms: f64,
    pub offset_debounce_ms: f64,
    pub release_gap: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            device: DeviceProfile::Desktop,
            min_element_size: MIN_ELEMENT_SIZE,
            click_promotion_ms: CLICK_PROMOTION_MS,
            home_correction_delay_ms: HOME_CORRECTION_DELAY_MS,
            offset_debounce_ms: OFFSET_DEBOUNCE_MS,
            release_gap: RELEASE_GAP,
        }
    }
}

impl EngineConfig {
    /// Build config from environment variables.
    ///
    /// All optional:
    /// - `BOARD_DEVICE_PROFILE`: `desktop` (default) or `constrained`
    /// - `BOARD_MIN_ELEMENT_SIZE`: default 50
    /// - `BOARD_CLICK_PROMOTION_MS`: default 2000
    /// - `BOARD_HOME_CORRECTION_DELAY_MS`: default 100
    /// - `BOARD_OFFSET_DEBOUNCE_MS`: default 100
    /// - `BOARD_RELEASE_GAP`: default 20
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unknown device profile or a value that
    /// is not a non-negative number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring unreadable environment variable");
                None
            }
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            device: parse_device_profile(lookup("BOARD_DEVICE_PROFILE").as_deref())?,
            min_element_size: parse_number(
                "BOARD_MIN_ELEMENT_SIZE",
                lookup("BOARD_MIN_ELEMENT_SIZE").as_deref(),
                defaults.min_element_size,
            )?,
            click_promotion_ms: parse_number(
                "BOARD_CLICK_PROMOTION_MS",
                lookup("BOARD_CLICK_PROMOTION_MS").as_deref(),
                defaults.click_promotion_ms,
            )?,
            home_correction_delay_ms: parse_number(
                "BOARD_HOME_CORRECTION_DELAY_MS",
                lookup("BOARD_HOME_CORRECTION_DELAY_MS").as_deref(),
                defaults.home_correction_delay_ms,
            )?,
            offset_debounce_ms: parse_number(
                "BOARD_OFFSET_DEBOUNCE_MS",
                lookup("BOARD_OFFSET_DEBOUNCE_MS").as_deref(),
                defaults.offset_debounce_ms,
            )?,
            release_gap: parse_number("BOARD_RELEASE_GAP", lookup("BOARD_RELEASE_GAP").as_deref(), defaults.release_gap)?,
        })
    }

    /// Scale used by `go_home`.
    #[must_use]
    pub fn home_scale(&self) -> f64 {
        match self.device {
            DeviceProfile::Desktop => HOME_SCALE_DESKTOP,
            DeviceProfile::Constrained => HOME_SCALE_CONSTRAINED,
        }
    }

    /// Share of the viewport a fitted bounding box may occupy.
    #[must_use]
    pub fn fit_shrink(&self) -> f64 {
        match self.device {
            DeviceProfile::Desktop => FIT_SHRINK_DESKTOP,
            DeviceProfile::Constrained => FIT_SHRINK_CONSTRAINED,
        }
    }
}

fn parse_device_profile(raw: Option<&str>) -> Result<DeviceProfile, ConfigError> {
    match raw.map(str::trim).unwrap_or("desktop") {
        "desktop" | "" => Ok(DeviceProfile::Desktop),
        "constrained" | "mobile" => Ok(DeviceProfile::Constrained),
        other => Err(ConfigError::UnknownDeviceProfile(other.to_string())),
    }
}

fn parse_number(key: &'static str, raw: Option<&str>, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(default);
    };
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(ConfigError::InvalidNumber { key, value: raw.to_string() }),
    }
}
