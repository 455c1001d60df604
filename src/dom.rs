//! Thin web-sys helpers shared by both components.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Document, Element, EventTarget, HtmlElement, Window,
};

use crate::error::Error;

pub fn window() -> Result<Window, Error> {
    web_sys::window().ok_or(Error::Dom("no window"))
}

pub fn document() -> Result<Document, Error> {
    window()?.document().ok_or(Error::Dom("no document"))
}

pub fn body(document: &Document) -> Result<HtmlElement, Error> {
    document.body().ok_or(Error::Dom("no body"))
}

/// Find the overlay element matching `selector`, or create a `div` with
/// `class` appended to the body. Created elements are hidden from assistive
/// technology.
pub fn ensure_overlay(
    document: &Document,
    selector: &str,
    class: &str,
) -> Result<HtmlElement, Error> {
    if let Ok(Some(existing)) = document.query_selector(selector) {
        if let Ok(element) = existing.dyn_into::<HtmlElement>() {
            return Ok(element);
        }
    }

    let element: HtmlElement = document
        .create_element("div")?
        .dyn_into()
        .map_err(|_| Error::Dom("created element is not an HtmlElement"))?;
    element.set_class_name(class);
    element.set_attribute("aria-hidden", "true")?;
    body(document)?.append_child(&element)?;
    Ok(element)
}

/// Whether the user asked the platform for reduced motion. An unavailable
/// media-query API reads as false so the cursor stays visible.
pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Whether the primary input is touch.
pub fn is_touch_device(window: &Window) -> bool {
    let has_touch_event =
        js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("ontouchstart"))
            .unwrap_or(false);
    has_touch_event || window.navigator().max_touch_points() > 0
}

/// Viewport center, or the origin if the host reports no dimensions.
pub fn viewport_center(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    (width / 2.0, height / 2.0)
}

/// Write an inline style property, best effort.
pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

pub fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}

pub fn listen(target: &EventTarget, event: &str, callback: &js_sys::Function) {
    let _ = target.add_event_listener_with_callback(event, callback);
}

/// Register a non-passive listener, required when the handler may call
/// `preventDefault()` on scroll-producing events.
pub fn listen_active(target: &EventTarget, event: &str, callback: &js_sys::Function) {
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        event, callback, &options,
    );
}

pub fn unlisten(target: &EventTarget, event: &str, callback: &js_sys::Function) {
    let _ = target.remove_event_listener_with_callback(event, callback);
}
