use std::rc::{Rc, Weak};

use js_sys::Function;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlVideoElement};

use vizij_video_core::{Config, Intent, MediaEvent, PlaybackController, VOLUME_STEP};

mod bridge;
mod listeners;
mod media;
mod timers;

use bridge::{deliver, Bridge};
use listeners::EventListener;
use media::HtmlMedia;
use timers::DomTimers;

/// Custom-controls video player bound to an existing `<video>` element.
///
/// The element keeps doing all decoding and rendering; this class mirrors its
/// state, applies control intents and reports a render model through
/// `set_on_change`.
#[wasm_bindgen]
pub struct VizijVideo {
    bridge: Rc<Bridge>,
    listeners: Vec<EventListener>,
    disposed: bool,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn wire_listeners(
    video: &HtmlVideoElement,
    owner: &Weak<Bridge>,
) -> Result<Vec<EventListener>, JsValue> {
    let target: &EventTarget = video.as_ref();
    let mut out = Vec::with_capacity(5);

    for event in [
        MediaEvent::TimeUpdate,
        MediaEvent::MetadataLoaded,
        MediaEvent::Ended,
    ] {
        let Some(name) = event.dom_name() else {
            continue;
        };
        let owner = owner.clone();
        out.push(EventListener::new(target, name, move |_: Event| {
            deliver(&owner, event.clone())
        })?);
    }

    // Pointer activity over the player shows the controls.
    for name in ["mousemove", "touchstart"] {
        let owner = owner.clone();
        out.push(EventListener::new(target, name, move |_: Event| {
            if let Some(bridge) = owner.upgrade() {
                bridge.update(|ctl| ctl.show_controls());
            }
        })?);
    }

    Ok(out)
}

impl VizijVideo {
    fn update(&self, f: impl FnOnce(&mut bridge::Controller)) {
        if self.disposed {
            return;
        }
        self.bridge.update(f);
    }
}

#[wasm_bindgen]
impl VizijVideo {
    /// Bind to `video` with a config object:
    ///   new VizijVideo(videoEl, { src: "clip.mp4", className: "hero", autoPlay: false })
    /// `src` is required.
    #[wasm_bindgen(constructor)]
    pub fn new(video: HtmlVideoElement, config: JsValue) -> Result<VizijVideo, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let window = web_sys::window().ok_or_else(|| JsError::new("no window object available"))?;
        let controller = PlaybackController::new(cfg.clone(), DomTimers::new(window))?;

        video.set_src(&cfg.src);
        if !cfg.class_name.is_empty() {
            video.set_class_name(&cfg.class_name);
        }

        let bridge = Bridge::new(controller);
        let owner = Rc::downgrade(&bridge);
        bridge.update(|ctl| ctl.timers_mut().bind(owner.clone()));

        let listeners = wire_listeners(&video, &owner)
            .map_err(|e| JsError::new(&format!("listener error: {e:?}")))?;
        bridge.update(|ctl| ctl.attach(HtmlMedia::new(video, owner.clone())));

        Ok(VizijVideo {
            bridge,
            listeners,
            disposed: false,
        })
    }

    #[wasm_bindgen(js_name = toggle_play)]
    pub fn toggle_play(&self) {
        self.update(|ctl| ctl.toggle_play());
    }

    /// Volume slider, 0..=1.
    #[wasm_bindgen(js_name = set_volume)]
    pub fn set_volume(&self, volume: f64) {
        self.update(|ctl| ctl.set_volume(volume));
    }

    #[wasm_bindgen(js_name = toggle_mute)]
    pub fn toggle_mute(&self) {
        self.update(|ctl| ctl.toggle_mute());
    }

    /// Scrub slider, 0..=100 percent.
    #[wasm_bindgen]
    pub fn seek(&self, percent: f64) {
        self.update(|ctl| ctl.seek_to(percent));
    }

    /// Report pointer/touch activity from a container element.
    #[wasm_bindgen(js_name = show_controls)]
    pub fn show_controls(&self) {
        self.update(|ctl| ctl.show_controls());
    }

    /// Apply an intent object, e.g. `"TogglePlay"` or `{ SetVolume: { volume: 0.3 } }`.
    #[wasm_bindgen]
    pub fn dispatch(&self, intent: JsValue) -> Result<(), JsError> {
        let intent: Intent =
            swb::from_value(intent).map_err(|e| JsError::new(&format!("intent error: {e}")))?;
        self.update(|ctl| ctl.dispatch(intent));
        Ok(())
    }

    /// Current render model (see `ControlsView`).
    #[wasm_bindgen]
    pub fn view(&self) -> Result<JsValue, JsError> {
        let view = self
            .bridge
            .read(|ctl| ctl.view())
            .ok_or_else(|| JsError::new("view unavailable while the player is updating"))?;
        swb::to_value(&view).map_err(|e| JsError::new(&format!("view error: {e}")))
    }

    #[wasm_bindgen(getter, js_name = is_playing)]
    pub fn is_playing(&self) -> bool {
        self.bridge
            .read(|ctl| ctl.playback().is_playing)
            .unwrap_or(false)
    }

    /// Called with the fresh view after every state change. Pass `null` to clear.
    #[wasm_bindgen(js_name = set_on_change)]
    pub fn set_on_change(&self, callback: Option<Function>) {
        self.bridge.set_on_change(callback);
    }

    /// Unsubscribe from the element and cancel the hide timer. Idempotent;
    /// later calls on this instance are no-ops.
    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.listeners.clear();
        self.bridge.set_on_change(None);
        self.bridge.update(|ctl| {
            ctl.detach();
        });
        self.disposed = true;
    }
}

impl Drop for VizijVideo {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Format seconds as `M:SS`.
#[wasm_bindgen(js_name = format_time)]
pub fn format_time(seconds: f64) -> String {
    vizij_video_core::format_time(seconds)
}

/// Step of the volume slider.
#[wasm_bindgen(js_name = volume_step)]
pub fn volume_step() -> f64 {
    VOLUME_STEP
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
