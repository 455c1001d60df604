//! Per-frame easing for the cursor and trail follow points.

use serde::Deserialize;

use crate::error::Error;
use crate::interact::INTERACTIVE_SELECTOR;

/// Configuration for the cursor follower
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Fraction of the remaining distance the cursor covers per frame
    pub follow_factor: f64,
    /// Fraction of the remaining distance the trail covers per frame
    pub trail_factor: f64,
    /// Selector matching elements that put the cursor into its hover state
    pub interactive_selector: String,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            follow_factor: 0.18, // snappy, stays just behind the pointer
            trail_factor: 0.12,  // slower, visibly lags the cursor
            interactive_selector: INTERACTIVE_SELECTOR.to_string(),
        }
    }
}

impl CursorConfig {
    /// Parse settings from a JSON options object; missing fields keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.clamped())
    }

    /// Clamp both factors to (0, 1]. A factor of zero would freeze the
    /// point; anything above one would overshoot the target.
    pub fn clamped(mut self) -> Self {
        self.follow_factor = self.follow_factor.clamp(0.01, 1.0);
        self.trail_factor = self.trail_factor.clamp(0.01, 1.0);
        self
    }
}

/// Linear interpolation step: move a fixed fraction of the remaining
/// distance toward the target.
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor
}

/// A point eased toward a moving target once per animation frame.
/// Convergence is asymptotic: the point approaches but never overshoots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowPoint {
    pub x: f64,
    pub y: f64,
}

impl FollowPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Advance one frame toward `(target_x, target_y)`.
    pub fn step_toward(&mut self, target_x: f64, target_y: f64, factor: f64) {
        self.x = lerp(self.x, target_x, factor);
        self.y = lerp(self.y, target_y, factor);
    }

    /// Straight-line distance to a target.
    pub fn distance_to(&self, target_x: f64, target_y: f64) -> f64 {
        ((target_x - self.x).powi(2) + (target_y - self.y).powi(2)).sqrt()
    }
}
