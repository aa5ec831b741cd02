//! PlaybackController: state store, event bridge and command dispatcher.
//!
//! Methods:
//! - new, attach / detach (media subscription lifetime)
//! - handle_event (media notifications → state)
//! - toggle_play, set_volume, toggle_mute, seek_to, show_controls, dispatch (intents → commands + state)
//! - on_hide_timer (host timer callback)
//! - view (render model)
//!
//! Play is optimistic: `is_playing` flips first, the resource is told to play,
//! and a failure for the latest request reverts the flag to `false`.

use std::time::Duration;

use crate::config::Config;
use crate::error::{ConfigError, PlayError};
use crate::format::format_time;
use crate::ids::{IdAllocator, PlayRequestId, TimerHandle};
use crate::inputs::Intent;
use crate::media::{MediaEvent, MediaResource, PlayAttempt};
use crate::outputs::ControlsView;
use crate::state::{known_duration, progress_percent, AudioState, PlaybackState};
use crate::visibility::{ControlsVisibility, ManualTimers, TimerHost};

#[derive(Debug)]
pub struct PlaybackController<M: MediaResource, T: TimerHost> {
    cfg: Config,
    media: Option<M>,
    timers: T,
    ids: IdAllocator,

    playback: PlaybackState,
    audio: AudioState,
    controls: ControlsVisibility,
    /// Latest play request still waiting for its outcome.
    pending_play: Option<PlayRequestId>,
}

impl<M: MediaResource, T: TimerHost> PlaybackController<M, T> {
    /// Create a controller. Nothing is sent anywhere until a resource is attached.
    pub fn new(cfg: Config, timers: T) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            playback: PlaybackState::new(cfg.auto_play),
            audio: AudioState::new(cfg.initial_volume),
            controls: ControlsVisibility::new(cfg.hide_delay()),
            cfg,
            media: None,
            timers,
            ids: IdAllocator::new(),
            pending_play: None,
        })
    }

    /// Bind the media resource once it exists. Pushes the current volume,
    /// picks up an already-known duration and starts playback when `auto_play`.
    pub fn attach(&mut self, media: M) {
        if self.media.is_some() {
            log::warn!("playback: replacing an attached media resource");
            self.detach();
        }
        self.playback.duration = known_duration(media.duration());
        self.media = Some(media);
        log::debug!(
            "playback: attached {} (auto_play={})",
            self.cfg.src,
            self.cfg.auto_play
        );
        self.apply_volume();
        self.sync_playback();
    }

    /// Unbind the resource and cancel the hide timer. Safe on every exit path,
    /// including before metadata ever loaded.
    pub fn detach(&mut self) -> Option<M> {
        self.controls.cancel(&mut self.timers);
        self.pending_play = None;
        let media = self.media.take();
        if media.is_some() {
            log::debug!("playback: detached {}", self.cfg.src);
        }
        media
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.media.is_some()
    }

    // ---- event bridge -------------------------------------------------------

    /// Fold a media notification into the state store.
    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate => {
                let Some(media) = self.media.as_ref() else {
                    return;
                };
                let time = media.current_time();
                let duration = media.duration();
                self.playback.current_time = if time.is_finite() { time.max(0.0) } else { 0.0 };
                self.playback.progress_percent =
                    progress_percent(self.playback.current_time, duration);
            }
            MediaEvent::MetadataLoaded => {
                let Some(media) = self.media.as_ref() else {
                    return;
                };
                self.playback.duration = known_duration(media.duration());
                log::debug!("playback: duration {}s", self.playback.duration);
            }
            MediaEvent::Ended => {
                if self.media.is_none() {
                    return;
                }
                log::debug!("playback: ended, rewinding");
                self.playback.reset();
                self.pending_play = None;
                self.controls.cancel(&mut self.timers);
                if let Some(media) = self.media.as_mut() {
                    media.set_current_time(0.0);
                }
                self.sync_playback();
            }
            MediaEvent::PlayStarted { request } => {
                if self.pending_play == Some(request) {
                    self.pending_play = None;
                }
            }
            MediaEvent::PlayFailed { request, error } => {
                if self.pending_play != Some(request) {
                    log::debug!("playback: ignoring outcome of superseded {:?}", request);
                    return;
                }
                self.pending_play = None;
                self.revert_play(&error);
            }
        }
    }

    // ---- command dispatcher -------------------------------------------------

    pub fn toggle_play(&mut self) {
        self.playback.is_playing = !self.playback.is_playing;
        self.sync_playback();
        self.show_controls();
    }

    /// Volume slider moved. Zero mutes; an audible level clears a mute.
    pub fn set_volume(&mut self, volume: f64) {
        self.audio.set_volume(volume);
        self.apply_volume();
        self.show_controls();
    }

    /// Flip mute without touching the stored volume.
    pub fn toggle_mute(&mut self) {
        self.audio.toggle_mute();
        self.apply_volume();
        self.show_controls();
    }

    /// Scrub to `percent` of the duration. Progress updates immediately; with
    /// an unknown duration the resource is sent to 0.
    pub fn seek_to(&mut self, percent: f64) {
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };
        let target = percent / 100.0 * self.playback.duration;
        self.playback.progress_percent = percent;
        self.playback.current_time = target;
        if let Some(media) = self.media.as_mut() {
            media.set_current_time(target);
        }
        self.show_controls();
    }

    /// Pointer/touch activity, or any dispatcher call.
    pub fn show_controls(&mut self) {
        self.controls
            .show(&mut self.timers, self.playback.is_playing);
    }

    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::TogglePlay => self.toggle_play(),
            Intent::ToggleMute => self.toggle_mute(),
            Intent::SetVolume { volume } => self.set_volume(volume),
            Intent::Seek { percent } => self.seek_to(percent),
            Intent::PointerActivity => self.show_controls(),
        }
    }

    /// Host timer callback. Hides only if `handle` is still the pending hide
    /// and playback is live right now.
    pub fn on_hide_timer(&mut self, handle: TimerHandle) {
        if self.controls.on_timer(handle, self.playback.is_playing) {
            log::debug!("controls: hidden after idle");
        }
    }

    // ---- accessors ----------------------------------------------------------

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    #[inline]
    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    #[inline]
    pub fn audio(&self) -> &AudioState {
        &self.audio
    }

    #[inline]
    pub fn controls(&self) -> &ControlsVisibility {
        &self.controls
    }

    #[inline]
    pub fn pending_play(&self) -> Option<PlayRequestId> {
        self.pending_play
    }

    #[inline]
    pub fn media(&self) -> Option<&M> {
        self.media.as_ref()
    }

    #[inline]
    pub fn media_mut(&mut self) -> Option<&mut M> {
        self.media.as_mut()
    }

    #[inline]
    pub fn timers(&self) -> &T {
        &self.timers
    }

    #[inline]
    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    pub fn view(&self) -> ControlsView {
        ControlsView {
            src: self.cfg.src.clone(),
            class_name: self.cfg.class_name.clone(),
            is_playing: self.playback.is_playing,
            progress_percent: self.playback.progress_percent,
            elapsed: format_time(self.playback.current_time),
            duration: format_time(self.playback.duration),
            volume: self.audio.volume,
            effective_volume: self.audio.effective_volume(),
            is_muted: self.audio.is_muted,
            controls_visible: self.controls.is_visible(),
        }
    }

    // ---- internals ----------------------------------------------------------

    /// Make the resource match `is_playing`.
    fn sync_playback(&mut self) {
        let Some(media) = self.media.as_mut() else {
            return;
        };
        if !self.playback.is_playing {
            self.pending_play = None;
            media.pause();
            return;
        }
        let request = self.ids.alloc_play_request();
        match media.play(request) {
            PlayAttempt::Started => self.pending_play = None,
            PlayAttempt::Pending => self.pending_play = Some(request),
            PlayAttempt::Rejected(error) => {
                self.pending_play = None;
                self.revert_play(&error);
            }
        }
    }

    fn revert_play(&mut self, error: &PlayError) {
        log::warn!(
            "playback: play failed [{}]: {}; reverting to paused (recoverable: {})",
            error.category(),
            error,
            error.is_recoverable()
        );
        self.playback.is_playing = false;
        // The hide timer may already have fired on the optimistic state.
        self.controls.show(&mut self.timers, false);
    }

    fn apply_volume(&mut self) {
        let level = self.audio.effective_volume();
        if let Some(media) = self.media.as_mut() {
            media.set_volume(level);
        }
    }
}

impl<M: MediaResource> PlaybackController<M, ManualTimers> {
    /// Step the manual clock by `dt` and deliver every hide timer that came due.
    pub fn advance(&mut self, dt: Duration) {
        for handle in self.timers.advance(dt) {
            self.on_hide_timer(handle);
        }
    }
}

impl<M: MediaResource, T: TimerHost> Drop for PlaybackController<M, T> {
    fn drop(&mut self) {
        self.controls.cancel(&mut self.timers);
    }
}
