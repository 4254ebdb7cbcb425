//! Exponential smoothing of the raw cursor target.
//!
//! The smoothing factor is applied once per call regardless of how much real
//! time passed since the previous call, so responsiveness follows the
//! tracker's callback cadence.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Fraction of the remaining distance covered per update.
    pub alpha: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { alpha: 0.2 }
    }
}

/// Map an index-fingertip landmark to a cursor target in normalized device
/// coordinates. X is mirrored for a front-facing camera; Y is flipped so up
/// is positive.
pub fn cursor_target(tip: Vec3) -> Vec2 {
    Vec2::new((1.0 - tip.x) * 2.0 - 1.0, -(tip.y * 2.0 - 1.0))
}

/// Smoothed cursor, starting centred at the origin.
#[derive(Debug, Clone)]
pub struct PositionFilter {
    previous: Vec2,
    alpha: f32,
}

impl PositionFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            previous: Vec2::ZERO,
            alpha: config.alpha,
        }
    }

    /// Move the smoothed value toward `target` and return it.
    pub fn smooth(&mut self, target: Vec2) -> Vec2 {
        self.previous += (target - self.previous) * self.alpha;
        self.previous
    }

    pub fn current(&self) -> Vec2 {
        self.previous
    }
}

impl Default for PositionFilter {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}
