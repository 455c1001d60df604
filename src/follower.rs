//! DOM cursor follower: a pointer dot and a lagging trail eased toward the
//! mouse once per animation frame.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent, MutationObserver, MutationObserverInit, Window};

use crate::dom;
use crate::easing::{CursorConfig, FollowPoint};
use crate::error::Error;
use crate::interact::{InteractionFlags, HOVER_CLASS, PRESS_CLASS};

const CURSOR_SELECTOR: &str = ".custom-cursor";
const CURSOR_CLASS: &str = "custom-cursor";
const TRAIL_SELECTOR: &str = ".cursor-trail";
const TRAIL_CLASS: &str = "cursor-trail";

/// Latest raw pointer position reported by the host. Written only by the
/// move handler, read by the render loop.
#[derive(Debug, Clone, Copy)]
struct PointerState {
    raw_x: f64,
    raw_y: f64,
}

/// Mutable per-instance state shared with the event closures
struct FollowerState {
    pointer: PointerState,
    cursor_point: FollowPoint,
    trail_point: FollowPoint,
    flags: InteractionFlags,
}

/// Enter/leave listener pair shared by every interactive element. Reusing
/// the same function objects makes re-binding after a DOM mutation a no-op
/// for elements that are already bound: the DOM ignores a duplicate
/// registration of an identical listener.
struct HoverBindings {
    on: Closure<dyn FnMut()>,
    off: Closure<dyn FnMut()>,
}

/// Animated cursor follower attached to the host page.
///
/// Listeners and the render loop live for the page; dropping the handle
/// does not detach them. The handle stays useful for inspecting whether the
/// follower is animating at all.
#[wasm_bindgen]
pub struct CursorFollower {
    state: Option<Rc<RefCell<FollowerState>>>,
}

#[wasm_bindgen]
impl CursorFollower {
    /// Attach a follower with default settings.
    pub fn attach() -> Result<CursorFollower, JsValue> {
        crate::init_runtime();
        Ok(Self::build(CursorConfig::default())?)
    }

    /// Attach a follower with settings overridden from a JSON options
    /// object.
    pub fn attach_with_options(options: &str) -> Result<CursorFollower, JsValue> {
        crate::init_runtime();
        let config = CursorConfig::from_json(options)?;
        Ok(Self::build(config)?)
    }

    /// False when the follower hid itself at startup (reduced motion or
    /// touch-primary input).
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }
}

impl CursorFollower {
    /// Attach a follower from an already-built configuration.
    pub fn attach_with_config(config: CursorConfig) -> Result<CursorFollower, Error> {
        crate::init_runtime();
        Self::build(config.clamped())
    }

    fn build(config: CursorConfig) -> Result<CursorFollower, Error> {
        let window = dom::window()?;
        let document = dom::document()?;

        let cursor = dom::ensure_overlay(&document, CURSOR_SELECTOR, CURSOR_CLASS)?;
        let trail = dom::ensure_overlay(&document, TRAIL_SELECTOR, TRAIL_CLASS)?;

        // One-time capability decision, never re-evaluated: pointer
        // animation is pointless on touch-primary devices and unwanted
        // under reduced motion.
        if dom::prefers_reduced_motion(&window) || dom::is_touch_device(&window) {
            dom::set_style(&cursor, "display", "none");
            dom::set_style(&trail, "display", "none");
            log::debug!("cursor follower disabled: reduced motion or touch input");
            return Ok(CursorFollower { state: None });
        }

        let (center_x, center_y) = dom::viewport_center(&window);
        let state = Rc::new(RefCell::new(FollowerState {
            pointer: PointerState {
                raw_x: center_x,
                raw_y: center_y,
            },
            cursor_point: FollowPoint::new(center_x, center_y),
            trail_point: FollowPoint::new(center_x, center_y),
            flags: InteractionFlags::default(),
        }));

        // The centering transform is constant; per-frame writes cover only
        // left/top.
        dom::set_style(&cursor, "transform", "translate(-50%, -50%)");
        dom::set_style(&trail, "transform", "translate(-50%, -50%)");

        Self::attach_pointer_tracking(&window, &state);
        Self::attach_visibility(&document, &cursor, &trail);
        Self::attach_press(&document, &state, &cursor);
        Self::attach_hover(&document, &state, &cursor, &config)?;
        Self::attach_pagehide(&window, &state, &cursor);
        Self::start_render_loop(&window, &state, &cursor, &trail, &config);

        log::debug!("cursor follower attached");
        Ok(CursorFollower { state: Some(state) })
    }

    /// Record raw pointer coordinates on every move. State capture only;
    /// styling happens in the render loop.
    fn attach_pointer_tracking(window: &Window, state: &Rc<RefCell<FollowerState>>) {
        let on_move: Closure<dyn FnMut(MouseEvent)> = {
            let state = Rc::clone(state);
            Closure::new(move |event: MouseEvent| {
                let mut state = state.borrow_mut();
                state.pointer.raw_x = event.client_x() as f64;
                state.pointer.raw_y = event.client_y() as f64;
            })
        };
        dom::listen(window, "mousemove", on_move.as_ref().unchecked_ref());
        on_move.forget();
    }

    /// Show both elements while the pointer is inside the document, hide
    /// them when it leaves. Direct opacity assignment, not animated.
    fn attach_visibility(document: &Document, cursor: &HtmlElement, trail: &HtmlElement) {
        let on_enter: Closure<dyn FnMut()> = {
            let cursor = cursor.clone();
            let trail = trail.clone();
            Closure::new(move || {
                dom::set_style(&cursor, "opacity", "1");
                dom::set_style(&trail, "opacity", "1");
            })
        };
        let on_leave: Closure<dyn FnMut()> = {
            let cursor = cursor.clone();
            let trail = trail.clone();
            Closure::new(move || {
                dom::set_style(&cursor, "opacity", "0");
                dom::set_style(&trail, "opacity", "0");
            })
        };
        dom::listen(document, "mouseenter", on_enter.as_ref().unchecked_ref());
        dom::listen(document, "mouseleave", on_leave.as_ref().unchecked_ref());
        on_enter.forget();
        on_leave.forget();
    }

    fn attach_press(
        document: &Document,
        state: &Rc<RefCell<FollowerState>>,
        cursor: &HtmlElement,
    ) {
        let on_down: Closure<dyn FnMut()> = {
            let state = Rc::clone(state);
            let cursor = cursor.clone();
            Closure::new(move || {
                state.borrow_mut().flags.pressed = true;
                dom::add_class(&cursor, PRESS_CLASS);
            })
        };
        let on_up: Closure<dyn FnMut()> = {
            let state = Rc::clone(state);
            let cursor = cursor.clone();
            Closure::new(move || {
                state.borrow_mut().flags.pressed = false;
                dom::remove_class(&cursor, PRESS_CLASS);
            })
        };
        dom::listen(document, "mousedown", on_down.as_ref().unchecked_ref());
        dom::listen(document, "mouseup", on_up.as_ref().unchecked_ref());
        on_down.forget();
        on_up.forget();
    }

    /// Bind hover listeners to every interactive element, and keep binding
    /// as the document grows: a mutation observer on the body re-runs the
    /// idempotent bind routine whenever nodes are added.
    fn attach_hover(
        document: &Document,
        state: &Rc<RefCell<FollowerState>>,
        cursor: &HtmlElement,
        config: &CursorConfig,
    ) -> Result<(), Error> {
        let hover = Rc::new(HoverBindings {
            on: {
                let state = Rc::clone(state);
                let cursor = cursor.clone();
                Closure::new(move || {
                    state.borrow_mut().flags.hovering = true;
                    dom::add_class(&cursor, HOVER_CLASS);
                })
            },
            off: {
                let state = Rc::clone(state);
                let cursor = cursor.clone();
                Closure::new(move || {
                    state.borrow_mut().flags.hovering = false;
                    dom::remove_class(&cursor, HOVER_CLASS);
                })
            },
        });

        bind_interactive(document, &config.interactive_selector, &hover);

        let on_mutation: Closure<dyn FnMut()> = {
            let document = document.clone();
            let selector = config.interactive_selector.clone();
            let hover = Rc::clone(&hover);
            Closure::new(move || bind_interactive(&document, &selector, &hover))
        };
        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())?;
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer.observe_with_options(dom::body(document)?.as_ref(), &options)?;
        on_mutation.forget();

        Ok(())
    }

    /// Drop stale visual state when the page is hidden, in case it is later
    /// restored from the back/forward cache.
    fn attach_pagehide(
        window: &Window,
        state: &Rc<RefCell<FollowerState>>,
        cursor: &HtmlElement,
    ) {
        let on_pagehide: Closure<dyn FnMut()> = {
            let state = Rc::clone(state);
            let cursor = cursor.clone();
            Closure::new(move || {
                state.borrow_mut().flags.clear();
                dom::remove_class(&cursor, HOVER_CLASS);
                dom::remove_class(&cursor, PRESS_CLASS);
            })
        };
        dom::listen(window, "pagehide", on_pagehide.as_ref().unchecked_ref());
        on_pagehide.forget();
    }

    /// Self-rescheduling render loop: each frame eases the cursor toward
    /// the raw pointer, then the trail toward the already-updated cursor,
    /// and writes both as center-anchored positions. Runs for the life of
    /// the page; the host pauses it with the page's animation clock.
    fn start_render_loop(
        window: &Window,
        state: &Rc<RefCell<FollowerState>>,
        cursor: &HtmlElement,
        trail: &HtmlElement,
        config: &CursorConfig,
    ) {
        let handle: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

        let tick: Closure<dyn FnMut()> = {
            let state = Rc::clone(state);
            let cursor = cursor.clone();
            let trail = trail.clone();
            let window = window.clone();
            let handle = Rc::clone(&handle);
            let follow_factor = config.follow_factor;
            let trail_factor = config.trail_factor;
            Closure::new(move || {
                {
                    let mut state = state.borrow_mut();
                    let PointerState { raw_x, raw_y } = state.pointer;
                    state.cursor_point.step_toward(raw_x, raw_y, follow_factor);
                    let FollowPoint { x, y } = state.cursor_point;
                    state.trail_point.step_toward(x, y, trail_factor);

                    dom::set_style(&cursor, "left", &format!("{}px", state.cursor_point.x));
                    dom::set_style(&cursor, "top", &format!("{}px", state.cursor_point.y));
                    dom::set_style(&trail, "left", &format!("{}px", state.trail_point.x));
                    dom::set_style(&trail, "top", &format!("{}px", state.trail_point.y));
                }
                request_frame(&window, &handle);
            })
        };

        handle.borrow_mut().replace(tick);
        request_frame(window, &handle);
    }
}

/// Schedule the render closure for the next animation frame.
fn request_frame(window: &Window, handle: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let Some(tick) = handle.borrow().as_ref() {
        let _ = window.request_animation_frame(tick.as_ref().unchecked_ref());
    }
}

/// Attach hover listeners to every element matching the interactive
/// selector. Safe to run repeatedly; an empty match set is valid.
fn bind_interactive(document: &Document, selector: &str, hover: &HoverBindings) {
    let matches = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(_) => {
            log::warn!("invalid interactive selector: {selector}");
            return;
        }
    };
    for index in 0..matches.length() {
        let Some(node) = matches.get(index) else {
            continue;
        };
        dom::listen(&node, "mouseenter", hover.on.as_ref().unchecked_ref());
        dom::listen(&node, "mouseleave", hover.off.as_ref().unchecked_ref());
        dom::listen(&node, "focus", hover.on.as_ref().unchecked_ref());
        dom::listen(&node, "blur", hover.off.as_ref().unchecked_ref());
    }
}
