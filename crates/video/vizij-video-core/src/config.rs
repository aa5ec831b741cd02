//! Construction-time configuration for a playback controller.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Idle interval before the controls hide while playing.
pub const DEFAULT_HIDE_DELAY_MS: u32 = 3000;
/// Volume a freshly mounted player starts with.
pub const DEFAULT_VOLUME: f64 = 0.5;
/// Granularity of the volume slider exposed to hosts.
pub const VOLUME_STEP: f64 = 0.01;

/// Player configuration. Field aliases accept the camelCase names JS hosts use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Media URL. Required.
    pub src: String,
    /// Extra class applied to the host element.
    #[serde(alias = "className")]
    pub class_name: String,
    /// Start playing as soon as the media is attached.
    #[serde(alias = "autoPlay")]
    pub auto_play: bool,
    #[serde(alias = "hideDelayMs")]
    pub hide_delay_ms: u32,
    #[serde(alias = "initialVolume")]
    pub initial_volume: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src: String::new(),
            class_name: String::new(),
            auto_play: false,
            hide_delay_ms: DEFAULT_HIDE_DELAY_MS,
            initial_volume: DEFAULT_VOLUME,
        }
    }
}

impl Config {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = auto_play;
        self
    }

    #[inline]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    #[inline]
    pub fn with_hide_delay_ms(mut self, hide_delay_ms: u32) -> Self {
        self.hide_delay_ms = hide_delay_ms;
        self
    }

    #[inline]
    pub fn with_initial_volume(mut self, volume: f64) -> Self {
        self.initial_volume = volume;
        self
    }

    /// Parse a JSON config object and validate it.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Config = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.src.trim().is_empty() {
            return Err(ConfigError::MissingSource);
        }
        if !(0.0..=1.0).contains(&self.initial_volume) {
            return Err(ConfigError::InvalidVolume {
                volume: self.initial_volume,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.hide_delay_ms))
    }
}
