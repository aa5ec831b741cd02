//! Shared controller cell reached from DOM callbacks.
//!
//! Callbacks hold a `Weak<Bridge>`; once the owning `VizijVideo` is gone they
//! upgrade to nothing and return.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use serde_wasm_bindgen as swb;
use wasm_bindgen::JsValue;

use vizij_video_core::{MediaEvent, PlaybackController};

use crate::media::HtmlMedia;
use crate::timers::DomTimers;

pub(crate) type Controller = PlaybackController<HtmlMedia, DomTimers>;

pub(crate) struct Bridge {
    controller: RefCell<Controller>,
    on_change: RefCell<Option<Function>>,
}

impl Bridge {
    pub(crate) fn new(controller: Controller) -> Rc<Self> {
        Rc::new(Self {
            controller: RefCell::new(controller),
            on_change: RefCell::new(None),
        })
    }

    /// Mutate the controller, then hand the fresh view to the change callback.
    /// Re-entrant calls (a callback firing while the controller is borrowed)
    /// are dropped.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut Controller) -> R) -> Option<R> {
        let out = match self.controller.try_borrow_mut() {
            Ok(mut ctl) => f(&mut ctl),
            Err(_) => {
                log::warn!("vizij-video: controller busy, dropping re-entrant call");
                return None;
            }
        };
        self.notify();
        Some(out)
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&Controller) -> R) -> Option<R> {
        self.controller.try_borrow().ok().map(|ctl| f(&ctl))
    }

    pub(crate) fn set_on_change(&self, callback: Option<Function>) {
        *self.on_change.borrow_mut() = callback;
    }

    fn notify(&self) {
        let Some(callback) = self.on_change.borrow().clone() else {
            return;
        };
        let Some(view) = self.read(|ctl| ctl.view()) else {
            return;
        };
        match swb::to_value(&view) {
            Ok(value) => {
                if let Err(err) = callback.call1(&JsValue::UNDEFINED, &value) {
                    log::warn!("vizij-video: on_change callback threw: {:?}", err);
                }
            }
            Err(err) => log::warn!("vizij-video: view serialization failed: {err}"),
        }
    }
}

/// Route a media notification to the controller if it is still alive.
pub(crate) fn deliver(owner: &Weak<Bridge>, event: MediaEvent) {
    if let Some(bridge) = owner.upgrade() {
        bridge.update(|ctl| ctl.handle_event(event));
    }
}
