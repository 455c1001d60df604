//! Scroll-lock gate over the hero section: the first qualifying gesture
//! unlocks scrolling and hands off to a delayed smooth scroll.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions, WheelEvent,
    Window,
};

use crate::dom;
use crate::error::Error;
use crate::reveal::{Gesture, RevealConfig, RevealState};

/// Class on the body that blocks scrolling while the gate is locked
const LOCK_CLASS: &str = "locked";

/// Optional explicit activation control
const REVEAL_CONTROL_SELECTOR: &str = "#reveal-btn";

struct GateInner {
    state: RevealState,
    config: RevealConfig,
    /// Present while locked; taken and detached on reveal.
    listeners: Option<GateListeners>,
}

/// Listener registrations removed when the gate reveals
struct GateListeners {
    window: Window,
    control: Option<Element>,
    on_wheel: Closure<dyn FnMut(WheelEvent)>,
    on_touch: Closure<dyn FnMut(Event)>,
    on_key: Closure<dyn FnMut(KeyboardEvent)>,
    on_activate: Closure<dyn FnMut()>,
}

impl GateListeners {
    fn detach(&self) {
        dom::unlisten(&self.window, "wheel", self.on_wheel.as_ref().unchecked_ref());
        dom::unlisten(
            &self.window,
            "touchstart",
            self.on_touch.as_ref().unchecked_ref(),
        );
        dom::unlisten(&self.window, "keydown", self.on_key.as_ref().unchecked_ref());
        if let Some(control) = &self.control {
            dom::unlisten(control, "click", self.on_activate.as_ref().unchecked_ref());
        }
    }
}

/// One-shot scroll gate attached to the host page.
#[wasm_bindgen]
pub struct RevealGate {
    inner: Rc<RefCell<GateInner>>,
}

#[wasm_bindgen]
impl RevealGate {
    /// Attach a gate with default settings and lock scrolling.
    pub fn attach() -> Result<RevealGate, JsValue> {
        crate::init_runtime();
        Ok(Self::build(RevealConfig::default())?)
    }

    /// Attach a gate with settings overridden from a JSON options object.
    pub fn attach_with_options(options: &str) -> Result<RevealGate, JsValue> {
        crate::init_runtime();
        let config = RevealConfig::from_json(options)?;
        Ok(Self::build(config)?)
    }

    pub fn is_revealed(&self) -> bool {
        self.inner.borrow().state.is_revealed()
    }
}

impl RevealGate {
    /// Attach a gate from an already-built configuration.
    pub fn attach_with_config(config: RevealConfig) -> Result<RevealGate, Error> {
        crate::init_runtime();
        Self::build(config)
    }

    fn build(config: RevealConfig) -> Result<RevealGate, Error> {
        let window = dom::window()?;
        let document = dom::document()?;
        let body = dom::body(&document)?;

        dom::add_class(&body, LOCK_CLASS);

        let inner = Rc::new(RefCell::new(GateInner {
            state: RevealState::new(),
            config,
            listeners: None,
        }));

        let on_wheel: Closure<dyn FnMut(WheelEvent)> = {
            let inner = Rc::clone(&inner);
            let document = document.clone();
            Closure::new(move |event: WheelEvent| {
                let gesture = Gesture::Wheel {
                    delta_y: event.delta_y(),
                };
                handle_gesture(&inner, &document, &gesture, Some(event.as_ref()));
            })
        };
        let on_touch: Closure<dyn FnMut(Event)> = {
            let inner = Rc::clone(&inner);
            let document = document.clone();
            Closure::new(move |event: Event| {
                handle_gesture(&inner, &document, &Gesture::TouchStart, Some(&event));
            })
        };
        let on_key: Closure<dyn FnMut(KeyboardEvent)> = {
            let inner = Rc::clone(&inner);
            let document = document.clone();
            Closure::new(move |event: KeyboardEvent| {
                let gesture = Gesture::Key { code: event.code() };
                handle_gesture(&inner, &document, &gesture, Some(event.as_ref()));
            })
        };
        let on_activate: Closure<dyn FnMut()> = {
            let inner = Rc::clone(&inner);
            let document = document.clone();
            Closure::new(move || {
                handle_gesture(&inner, &document, &Gesture::Activate, None);
            })
        };

        // Wheel and touch need non-passive registration so a qualifying
        // gesture can suppress the scroll it would otherwise cause.
        dom::listen_active(&window, "wheel", on_wheel.as_ref().unchecked_ref());
        dom::listen_active(&window, "touchstart", on_touch.as_ref().unchecked_ref());
        dom::listen(&window, "keydown", on_key.as_ref().unchecked_ref());

        let control = document
            .query_selector(REVEAL_CONTROL_SELECTOR)
            .ok()
            .flatten();
        if let Some(control) = &control {
            dom::listen(control, "click", on_activate.as_ref().unchecked_ref());
        }

        inner.borrow_mut().listeners = Some(GateListeners {
            window,
            control,
            on_wheel,
            on_touch,
            on_key,
            on_activate,
        });

        log::debug!("reveal gate attached, scroll locked");
        Ok(RevealGate { inner })
    }
}

/// Feed one gesture to the gate. While still locked, qualifying
/// scroll-producing gestures suppress the platform default; the first
/// qualifying gesture of any kind runs the reveal actions.
fn handle_gesture(
    inner: &Rc<RefCell<GateInner>>,
    document: &Document,
    gesture: &Gesture,
    event: Option<&Event>,
) {
    let revealed = {
        let mut gate = inner.borrow_mut();
        let gate = &mut *gate;
        if !gate.state.is_revealed() && gesture.suppresses_default(&gate.config) {
            if let Some(event) = event {
                event.prevent_default();
            }
        }
        gate.state.observe(gesture, &gate.config)
    };
    if revealed {
        reveal(inner, document);
    }
}

/// Locked -> Revealed actions: unlock scrolling, detach every gate
/// listener, then scroll to the next section after the configured delay.
fn reveal(inner: &Rc<RefCell<GateInner>>, document: &Document) {
    let (delay_ms, targets) = {
        let mut gate = inner.borrow_mut();
        if let Some(listeners) = gate.listeners.take() {
            listeners.detach();
        }
        (gate.config.scroll_delay_ms, gate.config.scroll_targets.clone())
    };

    if let Ok(body) = dom::body(document) {
        dom::remove_class(&body, LOCK_CLASS);
    }
    log::debug!("hero revealed, scroll unlocked");

    schedule_scroll(document, delay_ms, targets);
}

/// After `delay_ms`, smooth-scroll to the first configured target present
/// in the document. No target is a no-op, not an error.
fn schedule_scroll(document: &Document, delay_ms: i32, targets: Vec<String>) {
    let Ok(window) = dom::window() else {
        return;
    };
    let document = document.clone();
    let callback = Closure::once_into_js(move || {
        match first_existing_target(&document, &targets) {
            Some(next) => {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                next.scroll_into_view_with_scroll_into_view_options(&options);
            }
            None => log::debug!("no post-reveal scroll target present"),
        }
    });
    let _ = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay_ms);
}

/// First element matching any of `targets`, in order.
fn first_existing_target(document: &Document, targets: &[String]) -> Option<Element> {
    targets
        .iter()
        .find_map(|selector| document.query_selector(selector).ok().flatten())
}
