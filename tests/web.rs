//! Browser-side behavior tests, run with `wasm-pack test --headless`.

#![cfg(target_arch = "wasm32")]

use drift::{CursorFollower, RevealGate};
use wasm_bindgen_test::*;
use web_sys::{Document, Event, HtmlElement, KeyboardEvent, KeyboardEventInit, WheelEvent, WheelEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

fn document() -> Document {
    window().document().unwrap()
}

fn body() -> HtmlElement {
    document().body().unwrap()
}

fn wheel_event(delta_y: f64) -> WheelEvent {
    let init = WheelEventInit::new();
    init.set_delta_y(delta_y);
    init.set_cancelable(true);
    WheelEvent::new_with_event_init_dict("wheel", &init).unwrap()
}

fn key_event(code: &str) -> KeyboardEvent {
    let init = KeyboardEventInit::new();
    init.set_code(code);
    init.set_cancelable(true);
    KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap()
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        window()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn attach_synthesizes_missing_overlay_elements() {
    let document = document();
    while let Some(stale) = document.query_selector(".custom-cursor").unwrap() {
        stale.remove();
    }
    while let Some(stale) = document.query_selector(".cursor-trail").unwrap() {
        stale.remove();
    }

    let _follower = CursorFollower::attach().unwrap();

    let cursor = document.query_selector(".custom-cursor").unwrap().unwrap();
    let trail = document.query_selector(".cursor-trail").unwrap().unwrap();
    assert_eq!(cursor.get_attribute("aria-hidden").as_deref(), Some("true"));
    assert_eq!(trail.get_attribute("aria-hidden").as_deref(), Some("true"));
}

#[wasm_bindgen_test]
async fn inserted_button_triggers_hover_flag() {
    let document = document();
    let follower = CursorFollower::attach().unwrap();
    if !follower.is_active() {
        // Headless environment reports touch or reduced motion; the
        // follower stays inert there and has nothing to assert.
        return;
    }

    let button = document.create_element("button").unwrap();
    body().append_child(&button).unwrap();
    // Give the mutation observer a macrotask to re-bind
    sleep(50).await;

    let cursor = document.query_selector(".custom-cursor").unwrap().unwrap();
    button
        .dispatch_event(&Event::new("mouseenter").unwrap())
        .unwrap();
    assert!(cursor.class_list().contains("hover"));

    button
        .dispatch_event(&Event::new("mouseleave").unwrap())
        .unwrap();
    assert!(!cursor.class_list().contains("hover"));
}

#[wasm_bindgen_test]
fn wheel_below_threshold_keeps_gate_locked() {
    let gate = RevealGate::attach().unwrap();
    assert!(body().class_list().contains("locked"));

    window().dispatch_event(&wheel_event(5.0)).unwrap();

    assert!(!gate.is_revealed());
    assert!(body().class_list().contains("locked"));
}

#[wasm_bindgen_test]
async fn wheel_above_threshold_reveals_exactly_once() {
    let gate = RevealGate::attach().unwrap();
    assert!(body().class_list().contains("locked"));

    window().dispatch_event(&wheel_event(20.0)).unwrap();
    assert!(gate.is_revealed());
    assert!(!body().class_list().contains("locked"));

    // A repeat gesture after reveal is a no-op and must not error
    window().dispatch_event(&wheel_event(20.0)).unwrap();
    assert!(gate.is_revealed());

    // Let the delayed scroll callback run; with or without a target this
    // must complete quietly
    sleep(120).await;
    assert!(!body().class_list().contains("locked"));
}

#[wasm_bindgen_test]
fn reveal_key_unlocks_gate() {
    let gate = RevealGate::attach().unwrap();
    window().dispatch_event(&key_event("ArrowDown")).unwrap();
    assert!(gate.is_revealed());
    assert!(!body().class_list().contains("locked"));
}

#[wasm_bindgen_test]
fn non_reveal_key_keeps_gate_locked() {
    let gate = RevealGate::attach().unwrap();
    window().dispatch_event(&key_event("KeyA")).unwrap();
    assert!(!gate.is_revealed());
}

#[wasm_bindgen_test]
async fn touch_reveals_and_scrolls_to_existing_target() {
    let document = document();
    if document.query_selector("#about").unwrap().is_none() {
        let about = document.create_element("section").unwrap();
        about.set_id("about");
        body().append_child(&about).unwrap();
    }

    let gate = RevealGate::attach().unwrap();
    window()
        .dispatch_event(&Event::new("touchstart").unwrap())
        .unwrap();
    assert!(gate.is_revealed());

    // The post-reveal scroll fires after the configured delay; the target
    // exists, so the callback must run without error
    sleep(120).await;
    assert!(!body().class_list().contains("locked"));
}
