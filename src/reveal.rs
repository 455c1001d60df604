//! One-shot reveal gate state machine.
//!
//! The gate starts locked and moves to revealed on the first qualifying
//! gesture. The transition is irreversible; nothing moves it back.

use serde::Deserialize;

use crate::error::Error;

/// Configuration for the reveal gate
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Minimum downward wheel delta that counts as a reveal gesture
    pub wheel_threshold: f64,
    /// Delay before the post-reveal scroll starts (ms), so the scroll
    /// unlock takes visual effect before motion begins
    pub scroll_delay_ms: i32,
    /// Scroll destinations tried in order; the first one present wins
    pub scroll_targets: Vec<String>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            wheel_threshold: 10.0,
            scroll_delay_ms: 80,
            scroll_targets: vec!["#about".to_string(), "#main".to_string()],
        }
    }
}

impl RevealConfig {
    /// Parse settings from a JSON options object; missing fields keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Input gestures the gate observes while locked
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Wheel scroll; only a downward delta above the threshold qualifies
    Wheel { delta_y: f64 },
    /// Any touch contact
    TouchStart,
    /// Key press, identified by its key code
    Key { code: String },
    /// The explicit activation control was used
    Activate,
}

/// Key codes that reveal: space, page-down, down-arrow
pub fn is_reveal_key(code: &str) -> bool {
    matches!(code, "Space" | "PageDown" | "ArrowDown")
}

impl Gesture {
    /// Whether this gesture triggers the reveal.
    pub fn qualifies(&self, config: &RevealConfig) -> bool {
        match self {
            Gesture::Wheel { delta_y } => *delta_y > config.wheel_threshold,
            Gesture::TouchStart | Gesture::Activate => true,
            Gesture::Key { code } => is_reveal_key(code),
        }
    }

    /// Whether the platform default must be suppressed for this gesture
    /// while the gate is still locked. Wheel and key gestures would scroll
    /// the page themselves; only the programmatic post-reveal scroll may
    /// move it.
    pub fn suppresses_default(&self, config: &RevealConfig) -> bool {
        match self {
            Gesture::Wheel { .. } | Gesture::Key { .. } => self.qualifies(config),
            Gesture::TouchStart | Gesture::Activate => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Locked,
    Revealed,
}

/// Gate state: locked until the first qualifying gesture, revealed forever
/// after.
#[derive(Debug)]
pub struct RevealState {
    state: GateState,
}

impl RevealState {
    pub fn new() -> Self {
        Self {
            state: GateState::Locked,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.state == GateState::Revealed
    }

    /// Observe one gesture. Returns true exactly once, on the transition
    /// from locked to revealed; non-qualifying gestures and anything after
    /// the reveal return false.
    pub fn observe(&mut self, gesture: &Gesture, config: &RevealConfig) -> bool {
        if self.state == GateState::Revealed {
            return false;
        }
        if gesture.qualifies(config) {
            self.state = GateState::Revealed;
            return true;
        }
        false
    }
}

impl Default for RevealState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(delta_y: f64) -> Gesture {
        Gesture::Wheel { delta_y }
    }

    fn key(code: &str) -> Gesture {
        Gesture::Key {
            code: code.to_string(),
        }
    }

    #[test]
    fn test_wheel_below_threshold_does_not_reveal() {
        let config = RevealConfig::default();
        let mut state = RevealState::new();

        assert!(!state.observe(&wheel(5.0), &config));
        assert!(!state.is_revealed());
        // Exactly at the threshold is still below the strict comparison
        assert!(!state.observe(&wheel(10.0), &config));
        assert!(!state.is_revealed());
    }

    #[test]
    fn test_wheel_above_threshold_reveals_exactly_once() {
        let config = RevealConfig::default();
        let mut state = RevealState::new();

        assert!(state.observe(&wheel(20.0), &config));
        assert!(state.is_revealed());
        // Identical follow-up gesture is a no-op
        assert!(!state.observe(&wheel(20.0), &config));
        assert!(state.is_revealed());
    }

    #[test]
    fn test_upward_wheel_does_not_reveal() {
        let config = RevealConfig::default();
        let mut state = RevealState::new();

        assert!(!state.observe(&wheel(-50.0), &config));
        assert!(!state.is_revealed());
    }

    #[test]
    fn test_touch_and_activation_reveal() {
        let config = RevealConfig::default();

        let mut state = RevealState::new();
        assert!(state.observe(&Gesture::TouchStart, &config));

        let mut state = RevealState::new();
        assert!(state.observe(&Gesture::Activate, &config));
    }

    #[test]
    fn test_reveal_key_set() {
        let config = RevealConfig::default();

        for code in ["Space", "PageDown", "ArrowDown"] {
            let mut state = RevealState::new();
            assert!(state.observe(&key(code), &config), "{code} must reveal");
        }

        let mut state = RevealState::new();
        assert!(!state.observe(&key("KeyA"), &config));
        assert!(!state.observe(&key("ArrowUp"), &config));
        assert!(!state.is_revealed());
    }

    #[test]
    fn test_default_suppression_rules() {
        let config = RevealConfig::default();

        // Scroll-producing gestures are suppressed only when they qualify
        assert!(wheel(20.0).suppresses_default(&config));
        assert!(!wheel(5.0).suppresses_default(&config));
        assert!(key("Space").suppresses_default(&config));
        assert!(!key("KeyA").suppresses_default(&config));

        // Touch and explicit activation never suppress
        assert!(!Gesture::TouchStart.suppresses_default(&config));
        assert!(!Gesture::Activate.suppresses_default(&config));
    }

    #[test]
    fn test_config_from_json_partial_override() {
        let config = RevealConfig::from_json(r#"{"wheel_threshold": 25.0}"#).unwrap();
        assert!((config.wheel_threshold - 25.0).abs() < 1e-9);
        assert_eq!(config.scroll_delay_ms, 80);
        assert_eq!(config.scroll_targets, vec!["#about", "#main"]);

        let mut state = RevealState::new();
        assert!(!state.observe(&Gesture::Wheel { delta_y: 20.0 }, &config));
        assert!(state.observe(&Gesture::Wheel { delta_y: 30.0 }, &config));
    }
}
