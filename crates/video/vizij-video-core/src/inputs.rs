//! User intents accepted by the controller.
//!
//! Adapters may call the dispatcher methods directly or forward plain objects
//! that deserialize into [`Intent`], e.g. `{"SetVolume": {"volume": 0.3}}` or
//! `"TogglePlay"`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    TogglePlay,
    ToggleMute,
    /// Volume slider, 0..=1.
    SetVolume { volume: f64 },
    /// Scrub slider, 0..=100 percent of duration.
    Seek { percent: f64 },
    /// Pointer movement or touch over the player.
    PointerActivity,
}
