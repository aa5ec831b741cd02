//! `TimerHost` over `window.setTimeout`.
//!
//! One JS callback is created per player and reused for every timeout; the
//! timer handle travels as the timeout argument.

use std::rc::Weak;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use vizij_video_core::{IdAllocator, TimerHandle, TimerHost};

use crate::bridge::Bridge;

pub(crate) struct DomTimers {
    window: Window,
    ids: IdAllocator,
    /// (handle, DOM timeout id) of the armed timeout.
    pending: Option<(TimerHandle, i32)>,
    callback: Option<Closure<dyn FnMut(JsValue)>>,
}

impl DomTimers {
    pub(crate) fn new(window: Window) -> Self {
        Self {
            window,
            ids: IdAllocator::new(),
            pending: None,
            callback: None,
        }
    }

    /// Route fired timeouts to the controller behind `owner`.
    pub(crate) fn bind(&mut self, owner: Weak<Bridge>) {
        self.callback = Some(Closure::new(move |raw: JsValue| {
            let Some(id) = raw.as_f64() else {
                return;
            };
            if let Some(bridge) = owner.upgrade() {
                bridge.update(|ctl| ctl.on_hide_timer(TimerHandle(id as u32)));
            }
        }));
    }

    fn clear_pending(&mut self) {
        if let Some((_, dom_id)) = self.pending.take() {
            self.window.clear_timeout_with_handle(dom_id);
        }
    }
}

impl TimerHost for DomTimers {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let handle = self.ids.alloc_timer();
        self.clear_pending();
        let Some(callback) = self.callback.as_ref() else {
            log::warn!("vizij-video: timer scheduled before binding, ignoring");
            return handle;
        };
        let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_1(
                callback.as_ref().unchecked_ref(),
                ms,
                &JsValue::from(handle.0),
            ) {
            Ok(dom_id) => self.pending = Some((handle, dom_id)),
            Err(err) => log::warn!("vizij-video: setTimeout failed: {:?}", err),
        }
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if matches!(self.pending, Some((h, _)) if h == handle) {
            self.clear_pending();
        }
    }
}

impl Drop for DomTimers {
    fn drop(&mut self) {
        self.clear_pending();
    }
}
