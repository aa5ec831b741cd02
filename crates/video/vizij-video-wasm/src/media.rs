//! `MediaResource` over a DOM `<video>` element.

use std::rc::Weak;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{DomException, HtmlVideoElement};

use vizij_video_core::{MediaEvent, MediaResource, PlayAttempt, PlayError, PlayRequestId};

use crate::bridge::{deliver, Bridge};

pub(crate) struct HtmlMedia {
    element: HtmlVideoElement,
    owner: Weak<Bridge>,
}

impl HtmlMedia {
    pub(crate) fn new(element: HtmlVideoElement, owner: Weak<Bridge>) -> Self {
        Self { element, owner }
    }
}

/// Map a rejected `play()` promise to a `PlayError`.
fn play_error_from_js(err: &JsValue) -> PlayError {
    match err.dyn_ref::<DomException>() {
        Some(ex) => PlayError::from_dom_name(&ex.name(), &ex.message()),
        None => PlayError::Other {
            reason: err.as_string().unwrap_or_else(|| format!("{err:?}")),
        },
    }
}

impl MediaResource for HtmlMedia {
    fn play(&mut self, request: PlayRequestId) -> PlayAttempt {
        let promise = match self.element.play() {
            Ok(promise) => promise,
            Err(err) => return PlayAttempt::Rejected(play_error_from_js(&err)),
        };
        let owner = self.owner.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let event = match JsFuture::from(promise).await {
                Ok(_) => MediaEvent::PlayStarted { request },
                Err(err) => MediaEvent::PlayFailed {
                    request,
                    error: play_error_from_js(&err),
                },
            };
            deliver(&owner, event);
        });
        PlayAttempt::Pending
    }

    fn pause(&mut self) {
        if let Err(err) = self.element.pause() {
            log::warn!("vizij-video: pause failed: {:?}", err);
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn set_volume(&mut self, level: f64) {
        self.element.set_volume(level);
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn duration(&self) -> f64 {
        self.element.duration()
    }
}
