//! Contract with the host's media element.
//!
//! The controller never decodes or buffers anything itself. It talks to an
//! opaque playable resource through [`MediaResource`] and learns about changes
//! through [`MediaEvent`]s the host forwards to
//! [`PlaybackController::handle_event`](crate::PlaybackController::handle_event).

use serde::{Deserialize, Serialize};

use crate::error::PlayError;
use crate::ids::PlayRequestId;

/// Immediate result of asking the resource to play.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayAttempt {
    /// Playback started synchronously.
    Started,
    /// Outcome arrives later as `PlayStarted` / `PlayFailed` carrying the same request id.
    Pending,
    /// Refused on the spot.
    Rejected(PlayError),
}

/// Host-provided playable resource (a `<video>` element, a native player, ...).
pub trait MediaResource {
    fn play(&mut self, request: PlayRequestId) -> PlayAttempt;
    fn pause(&mut self);
    fn set_current_time(&mut self, seconds: f64);
    /// `level` is already the effective volume in [0, 1].
    fn set_volume(&mut self, level: f64);

    fn current_time(&self) -> f64;
    /// Total duration in seconds. NaN, infinite or non-positive means unknown.
    fn duration(&self) -> f64;
}

/// Notifications from the media resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Playback position advanced.
    TimeUpdate,
    /// Duration became known.
    MetadataLoaded,
    /// Reached end of stream.
    Ended,
    /// A pending play request resolved.
    PlayStarted { request: PlayRequestId },
    /// A pending play request was rejected.
    PlayFailed {
        request: PlayRequestId,
        error: PlayError,
    },
}

impl MediaEvent {
    /// DOM event name for element notifications; `None` for play outcomes.
    #[inline]
    pub fn dom_name(&self) -> Option<&'static str> {
        match self {
            Self::TimeUpdate => Some("timeupdate"),
            Self::MetadataLoaded => Some("loadedmetadata"),
            Self::Ended => Some("ended"),
            Self::PlayStarted { .. } | Self::PlayFailed { .. } => None,
        }
    }
}
