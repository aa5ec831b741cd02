//! Render model handed to the host UI after each change.

use serde::{Deserialize, Serialize};

/// Everything the control overlay needs to draw itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlsView {
    pub src: String,
    pub class_name: String,
    pub is_playing: bool,
    /// Scrub slider position, 0..=100.
    pub progress_percent: f64,
    /// `M:SS`
    pub elapsed: String,
    /// `M:SS`; `0:00` until metadata loads.
    pub duration: String,
    /// Volume slider position, 0..=1.
    pub volume: f64,
    pub effective_volume: f64,
    pub is_muted: bool,
    pub controls_visible: bool,
}
