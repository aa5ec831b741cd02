//! Last-known media state mirrored by the controller.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_VOLUME;

/// Treat NaN, infinite and non-positive durations as unknown (0).
#[inline]
pub fn known_duration(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

/// Percentage of `duration` reached at `time`, clamped to [0, 100].
/// Unknown duration yields 0.
#[inline]
pub fn progress_percent(time: f64, duration: f64) -> f64 {
    let duration = known_duration(duration);
    if duration == 0.0 || !time.is_finite() {
        return 0.0;
    }
    (time / duration * 100.0).clamp(0.0, 100.0)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub is_playing: bool,
    /// Seconds.
    pub current_time: f64,
    /// Seconds; 0 until metadata resolves.
    pub duration: f64,
    pub progress_percent: f64,
}

impl PlaybackState {
    pub fn new(is_playing: bool) -> Self {
        Self {
            is_playing,
            current_time: 0.0,
            duration: 0.0,
            progress_percent: 0.0,
        }
    }

    /// Rewind to the start and stop.
    #[inline]
    pub fn reset(&mut self) {
        self.is_playing = false;
        self.current_time = 0.0;
        self.progress_percent = 0.0;
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(false)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AudioState {
    /// Stored slider level in [0, 1]; survives mute.
    pub volume: f64,
    pub is_muted: bool,
}

impl AudioState {
    pub fn new(volume: f64) -> Self {
        Self {
            volume: clamp_unit(volume),
            is_muted: false,
        }
    }

    /// Level actually sent to the resource.
    #[inline]
    pub fn effective_volume(&self) -> f64 {
        if self.is_muted {
            0.0
        } else {
            self.volume
        }
    }

    /// Store a new level. Zero mutes; any audible level clears an existing mute.
    pub fn set_volume(&mut self, volume: f64) {
        let volume = clamp_unit(volume);
        self.volume = volume;
        if volume == 0.0 {
            self.is_muted = true;
        } else if self.is_muted {
            self.is_muted = false;
        }
    }

    #[inline]
    pub fn toggle_mute(&mut self) {
        self.is_muted = !self.is_muted;
    }
}

impl Default for AudioState {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

#[inline]
fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_guards_unknown_duration() {
        assert_eq!(progress_percent(10.0, 0.0), 0.0);
        assert_eq!(progress_percent(10.0, f64::NAN), 0.0);
        assert_eq!(progress_percent(10.0, f64::INFINITY), 0.0);
        assert_eq!(progress_percent(30.0, 120.0), 25.0);
        assert_eq!(progress_percent(130.0, 120.0), 100.0);
    }

    #[test]
    fn zero_volume_mutes_and_audible_volume_unmutes() {
        let mut audio = AudioState::default();
        audio.set_volume(0.0);
        assert!(audio.is_muted);
        assert_eq!(audio.effective_volume(), 0.0);
        audio.set_volume(0.3);
        assert!(!audio.is_muted);
        assert_eq!(audio.effective_volume(), 0.3);
    }

    #[test]
    fn volume_is_clamped() {
        let mut audio = AudioState::default();
        audio.set_volume(4.0);
        assert_eq!(audio.volume, 1.0);
        audio.set_volume(f64::NAN);
        assert_eq!(audio.volume, 0.0);
        assert!(audio.is_muted);
    }
}
