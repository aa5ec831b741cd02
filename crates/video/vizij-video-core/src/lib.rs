//! Vizij Video Core (engine-agnostic)
//!
//! State machine behind a custom-controls video player. The host owns the
//! actual media element and the clock; this crate mirrors the element's state,
//! turns user intents into media commands and decides when the control overlay
//! should hide.
//!
//! Adapters (web/native) implement [`MediaResource`] and [`TimerHost`], forward
//! element notifications as [`MediaEvent`]s and render the [`ControlsView`].

pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod ids;
pub mod inputs;
pub mod media;
pub mod outputs;
pub mod state;
pub mod visibility;

// Re-exports for consumers (adapters)
pub use config::{Config, DEFAULT_HIDE_DELAY_MS, DEFAULT_VOLUME, VOLUME_STEP};
pub use controller::PlaybackController;
pub use error::{ConfigError, PlayError};
pub use format::format_time;
pub use ids::{IdAllocator, PlayRequestId, TimerHandle};
pub use inputs::Intent;
pub use media::{MediaEvent, MediaResource, PlayAttempt};
pub use outputs::ControlsView;
pub use state::{AudioState, PlaybackState};
pub use visibility::{ControlsVisibility, ManualTimers, TimerHost, Visibility};
