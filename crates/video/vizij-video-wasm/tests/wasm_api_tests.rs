#![cfg(target_arch = "wasm32")]
use std::cell::Cell;
use std::rc::Rc;

use serde_wasm_bindgen as swb;
use vizij_video_core::{Config, ControlsView, Intent};
use vizij_video_wasm::{abi_version, format_time, volume_step, VizijVideo};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlVideoElement};

wasm_bindgen_test_configure!(run_in_browser);

fn video_element() -> HtmlVideoElement {
    web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .create_element("video")
        .unwrap()
        .dyn_into::<HtmlVideoElement>()
        .unwrap()
}

fn player() -> (VizijVideo, HtmlVideoElement) {
    let video = video_element();
    let cfg = Config::new("clip.mp4").with_class_name("hero");
    let player = VizijVideo::new(video.clone(), swb::to_value(&cfg).unwrap()).unwrap();
    (player, video)
}

fn view_of(player: &VizijVideo) -> ControlsView {
    swb::from_value(player.view().unwrap()).unwrap()
}

fn fire(video: &HtmlVideoElement, name: &str) {
    video.dispatch_event(&Event::new(name).unwrap()).unwrap();
}

/// Counting change callback; keep the closure alive for the test's duration.
fn counter(player: &VizijVideo) -> (Rc<Cell<u32>>, Closure<dyn FnMut(JsValue)>) {
    let calls = Rc::new(Cell::new(0u32));
    let seen = calls.clone();
    let cb = Closure::<dyn FnMut(JsValue)>::new(move |_view: JsValue| {
        seen.set(seen.get() + 1);
    });
    player.set_on_change(Some(cb.as_ref().unchecked_ref::<js_sys::Function>().clone()));
    (calls, cb)
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn free_helpers() {
    assert_eq!(format_time(65.0), "1:05");
    assert_eq!(format_time(f64::NAN), "0:00");
    assert!((volume_step() - 0.01).abs() < 1e-12);
}

#[wasm_bindgen_test]
fn construct_requires_src() {
    assert!(VizijVideo::new(video_element(), JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn construct_applies_src_class_and_volume() {
    let (player, video) = player();
    assert!(video.src().ends_with("clip.mp4"));
    assert_eq!(video.class_name(), "hero");
    assert!((video.volume() - 0.5).abs() < 1e-9);

    let view = view_of(&player);
    assert!(!view.is_playing);
    assert!(view.controls_visible);
    assert_eq!(view.elapsed, "0:00");
    assert_eq!(view.duration, "0:00");
}

#[wasm_bindgen_test]
fn volume_zero_mutes_element() {
    let (player, video) = player();
    player.set_volume(0.0);
    let view = view_of(&player);
    assert!(view.is_muted);
    assert_eq!(view.volume, 0.0);
    assert_eq!(video.volume(), 0.0);
}

#[wasm_bindgen_test]
fn mute_twice_restores_level() {
    let (player, video) = player();
    player.set_volume(0.8);
    player.toggle_mute();
    assert_eq!(video.volume(), 0.0);
    player.toggle_mute();
    assert!((video.volume() - 0.8).abs() < 1e-9);
    assert!(!view_of(&player).is_muted);
}

#[wasm_bindgen_test]
fn seek_before_metadata_moves_slider_only() {
    let (player, _video) = player();
    player.seek(40.0);
    let view = view_of(&player);
    assert_eq!(view.progress_percent, 40.0);
    assert_eq!(view.elapsed, "0:00");
}

#[wasm_bindgen_test]
fn toggle_play_is_optimistic() {
    let (player, _video) = player();
    player.toggle_play();
    assert!(player.is_playing());
    player.toggle_play();
    assert!(!player.is_playing());
}

#[wasm_bindgen_test]
fn dispatch_accepts_intent_objects() {
    let (player, video) = player();
    player
        .dispatch(swb::to_value(&Intent::SetVolume { volume: 0.25 }).unwrap())
        .unwrap();
    assert!((video.volume() - 0.25).abs() < 1e-9);

    player.dispatch(JsValue::from_str("ToggleMute")).unwrap();
    assert!(view_of(&player).is_muted);

    assert!(player.dispatch(JsValue::from_str("Rewind")).is_err());
}

#[wasm_bindgen_test]
fn on_change_fires_per_command() {
    let (player, _video) = player();
    let (calls, _cb) = counter(&player);

    player.set_volume(0.3);
    player.toggle_mute();
    player.show_controls();
    assert_eq!(calls.get(), 3);

    player.set_on_change(None);
    player.toggle_mute();
    assert_eq!(calls.get(), 3);
}

#[wasm_bindgen_test]
fn dispose_is_idempotent_and_silences_commands() {
    let (mut player, video) = player();
    player.dispose();
    player.dispose();
    player.set_volume(0.9);
    assert!((video.volume() - 0.5).abs() < 1e-9);
}

#[wasm_bindgen_test]
fn ended_event_rewinds_and_stops() {
    let (player, video) = player();
    player.toggle_play();
    assert!(player.is_playing());

    fire(&video, "ended");

    let view = view_of(&player);
    assert!(!view.is_playing);
    assert_eq!(view.elapsed, "0:00");
    assert_eq!(view.progress_percent, 0.0);
}

#[wasm_bindgen_test]
fn timeupdate_event_resyncs_progress() {
    let (player, video) = player();
    player.seek(40.0);
    assert_eq!(view_of(&player).progress_percent, 40.0);

    // No metadata yet, so the element reports an unknown duration.
    fire(&video, "timeupdate");
    assert_eq!(view_of(&player).progress_percent, 0.0);
}

#[wasm_bindgen_test]
fn media_and_pointer_events_notify() {
    let (player, video) = player();
    let (calls, _cb) = counter(&player);

    fire(&video, "loadedmetadata");
    fire(&video, "timeupdate");
    fire(&video, "mousemove");
    fire(&video, "touchstart");
    assert_eq!(calls.get(), 4);
    assert!(view_of(&player).controls_visible);
}

#[wasm_bindgen_test]
fn dispose_removes_element_listeners() {
    let (mut player, video) = player();
    player.toggle_play();
    player.dispose();

    let (calls, _cb) = counter(&player);
    for name in ["ended", "timeupdate", "loadedmetadata", "mousemove", "touchstart"] {
        fire(&video, name);
    }
    assert_eq!(calls.get(), 0);
    assert!(player.is_playing());
}
