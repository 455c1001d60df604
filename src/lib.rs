//! Cosmetic page enhancements compiled to WebAssembly.
//!
//! Two independent components attach to the host page: an animated cursor
//! follower (a pointer dot plus a lagging trail, eased toward the mouse
//! every animation frame) and a hero reveal gate (scrolling stays locked
//! until the first qualifying gesture, then unlocks once and smooth-scrolls
//! to the next section).
//!
//! Hosts call [`install`] for both components with defaults, or attach
//! [`CursorFollower`] and [`RevealGate`] individually, optionally from a
//! JSON options object.

mod dom;
mod easing;
mod error;
mod follower;
mod gate;
mod interact;
mod reveal;

pub use easing::{lerp, CursorConfig, FollowPoint};
pub use error::Error;
pub use follower::CursorFollower;
pub use gate::RevealGate;
pub use interact::{InteractionFlags, INTERACTIVE_SELECTOR};
pub use reveal::{is_reveal_key, Gesture, RevealConfig, RevealState};

use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Combined options for [`install_with_options`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Options {
    pub cursor: CursorConfig,
    pub reveal: RevealConfig,
}

/// Attach both components with default settings. Listeners live for the
/// page; the returned handles are only needed by hosts that want to inspect
/// the components, so none are returned here.
#[wasm_bindgen]
pub fn install() -> Result<(), JsValue> {
    let _ = CursorFollower::attach()?;
    let _ = RevealGate::attach()?;
    Ok(())
}

/// Attach both components, with settings overridden from a JSON options
/// object of the form `{"cursor": {...}, "reveal": {...}}`.
#[wasm_bindgen]
pub fn install_with_options(options: &str) -> Result<(), JsValue> {
    init_runtime();
    let options: Options = serde_json::from_str(options).map_err(Error::from)?;
    let _ = CursorFollower::attach_with_config(options.cursor)?;
    let _ = RevealGate::attach_with_config(options.reveal)?;
    Ok(())
}

/// One-time logging and panic-hook setup shared by every entry point.
pub(crate) fn init_runtime() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        // A host logger may already be installed; keep it if so.
        let _ = console_log::init_with_level(log::Level::Debug);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default_roundtrip() {
        let options: Options = serde_json::from_str("{}").unwrap();
        assert!((options.cursor.follow_factor - 0.18).abs() < 1e-9);
        assert!((options.reveal.wheel_threshold - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_options_partial_sections() {
        let options: Options = serde_json::from_str(
            r##"{"reveal": {"scroll_targets": ["#content"]}}"##,
        )
        .unwrap();
        assert_eq!(options.reveal.scroll_targets, vec!["#content"]);
        assert!((options.cursor.trail_factor - 0.12).abs() < 1e-9);
    }
}
