//! Gesture transition detection.
//!
//! Compares each tick's gesture with the previous one and emits exactly one
//! [`GestureEdgeEvent`] per change. Timestamps are measured from the
//! controller's epoch; the initial state is `Gesture::None` entered at the
//! epoch itself.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::gesture::Gesture;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Dwell window (ms) the preceding gesture must have lasted before a
    /// one-shot action bound to the new gesture's edge may fire.
    pub debounce_ms: u64,
}

impl TrackerConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

/// One gesture transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureEdgeEvent {
    /// Gesture just entered.
    pub gesture: Gesture,
    /// Gesture just left.
    pub previous: Gesture,
    /// When `gesture` was entered.
    pub entered_at: Duration,
    /// When `previous` was entered (the prior transition).
    pub previous_entered_at: Duration,
}

impl GestureEdgeEvent {
    /// How long the preceding gesture was held.
    pub fn previous_dwell(&self) -> Duration {
        self.entered_at.saturating_sub(self.previous_entered_at)
    }

    /// Whether this edge is eligible for a debounced one-shot action.
    ///
    /// A gesture re-entered right after a brief flicker away from it stays
    /// suppressed; a steady hold never re-fires because it produces no edge.
    pub fn clears_debounce(&self, window: Duration) -> bool {
        // Inclusive: a dwell of exactly `window` has lasted "at least" the window.
        self.previous_dwell() >= window
    }
}

/// Explicit state machine over [`Gesture`].
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    current: Gesture,
    entered_at: Duration,
    transitions: u64,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this tick's gesture. Returns an edge only if it differs from the
    /// previous tick's.
    pub fn observe(&mut self, gesture: Gesture, now: Duration) -> Option<GestureEdgeEvent> {
        if gesture == self.current {
            return None;
        }
        let edge = GestureEdgeEvent {
            gesture,
            previous: self.current,
            entered_at: now,
            previous_entered_at: self.entered_at,
        };
        debug!(
            from = %self.current,
            to = %gesture,
            dwell_ms = edge.previous_dwell().as_millis() as u64,
            "gesture transition"
        );
        self.current = gesture;
        self.entered_at = now;
        self.transitions += 1;
        Some(edge)
    }

    pub fn current(&self) -> Gesture {
        self.current
    }

    /// When the current gesture was entered.
    pub fn entered_at(&self) -> Duration {
        self.entered_at
    }

    /// How long the current gesture has been held as of `now`.
    pub fn held_for(&self, now: Duration) -> Duration {
        now.saturating_sub(self.entered_at)
    }

    /// Number of edges emitted so far.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }
}
