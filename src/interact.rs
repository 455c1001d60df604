//! Hover and press state driven by interactive page elements.

/// Elements that switch the cursor into its hover variant: links, buttons,
/// anything opted in via `data-cursor`, and the clickable card/nav classes.
pub const INTERACTIVE_SELECTOR: &str =
    "a, button, [data-cursor], .project, .btn, .logo-noname, .project-card, .nav-link, .card";

/// Class present on the cursor element while the pointer is over an
/// interactive element
pub const HOVER_CLASS: &str = "hover";

/// Class present on the cursor element while a pointer button is held
pub const PRESS_CLASS: &str = "click";

/// Visual state flags for one cursor element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionFlags {
    pub hovering: bool,
    pub pressed: bool,
}

impl InteractionFlags {
    /// Drop both flags, e.g. when the page is hidden and may later be
    /// restored from the back/forward cache.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_start_cleared() {
        let flags = InteractionFlags::default();
        assert!(!flags.hovering);
        assert!(!flags.pressed);
    }

    #[test]
    fn test_clear_resets_both_flags() {
        let mut flags = InteractionFlags {
            hovering: true,
            pressed: true,
        };
        flags.clear();
        assert_eq!(flags, InteractionFlags::default());
    }
}
