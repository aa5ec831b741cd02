//! Auto-hiding control overlay.
//!
//! Two states, `Visible` and `Hidden`. Any activity shows the controls and,
//! while playing, arms one hide timer; a newer activity cancels and replaces
//! it. When the timer fires the caller passes the *live* playing flag, so a
//! pause that happened during the wait keeps the controls up.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ids::{IdAllocator, TimerHandle};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Host-side single-shot timers.
///
/// When a scheduled timer elapses the host calls
/// [`PlaybackController::on_hide_timer`](crate::PlaybackController::on_hide_timer)
/// with the handle returned here. Cancelled handles must not fire; if one does
/// anyway it is ignored.
pub trait TimerHost {
    fn schedule(&mut self, delay: Duration) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Clone, Debug)]
pub struct ControlsVisibility {
    state: Visibility,
    pending_hide: Option<TimerHandle>,
    delay: Duration,
}

impl ControlsVisibility {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: Visibility::Visible,
            pending_hide: None,
            delay,
        }
    }

    #[inline]
    pub fn state(&self) -> Visibility {
        self.state
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.state == Visibility::Visible
    }

    #[inline]
    pub fn pending_hide(&self) -> Option<TimerHandle> {
        self.pending_hide
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Show now; re-arm the hide timer only while playing.
    pub fn show<T: TimerHost + ?Sized>(&mut self, timers: &mut T, playing: bool) {
        self.state = Visibility::Visible;
        self.cancel(timers);
        if playing {
            let handle = timers.schedule(self.delay);
            log::debug!("controls: hide scheduled in {:?} ({:?})", self.delay, handle);
            self.pending_hide = Some(handle);
        }
    }

    /// Timer fired. Returns true when the controls transitioned to `Hidden`.
    pub fn on_timer(&mut self, handle: TimerHandle, playing: bool) -> bool {
        if self.pending_hide != Some(handle) {
            log::debug!("controls: ignoring stale hide timer {:?}", handle);
            return false;
        }
        self.pending_hide = None;
        if !playing {
            return false;
        }
        self.state = Visibility::Hidden;
        true
    }

    /// Drop the pending hide, if any.
    pub fn cancel<T: TimerHost + ?Sized>(&mut self, timers: &mut T) {
        if let Some(handle) = self.pending_hide.take() {
            timers.cancel(handle);
        }
    }
}

/// Deterministic timer host driven by an explicit clock.
///
/// Native hosts step it from their frame loop; tests use it to control time.
#[derive(Debug, Default)]
pub struct ManualTimers {
    now: Duration,
    ids: IdAllocator,
    pending: Vec<(TimerHandle, Duration)>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Absolute deadline of a pending timer.
    pub fn deadline(&self, handle: TimerHandle) -> Option<Duration> {
        self.pending
            .iter()
            .find_map(|(h, at)| if *h == handle { Some(*at) } else { None })
    }

    /// Move the clock forward and return every timer that came due, earliest first.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerHandle> {
        self.now += dt;
        let now = self.now;
        let mut due: Vec<(TimerHandle, Duration)> = Vec::new();
        self.pending.retain(|entry| {
            if entry.1 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(_, at)| *at);
        due.into_iter().map(|(h, _)| h).collect()
    }
}

impl TimerHost for ManualTimers {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let handle = self.ids.alloc_timer();
        self.pending.push((handle, self.now + delay));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|(h, _)| *h != handle);
    }
}
