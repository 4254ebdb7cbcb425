//! Latest-value cell bridging the tracker callback and the render tick.
//!
//! The writer replaces the whole record per update; readers get an
//! `Arc<HandState>` that can never be observed half-written.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use glam::Vec2;

use crate::gesture::Gesture;
use crate::landmark::LandmarkSnapshot;

/// Per-tick hand record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandState {
    /// Smoothed cursor in normalized device coordinates, roughly `[-1, 1]`.
    pub position: Vec2,
    pub gesture: Gesture,
    /// Snapshot delivered with the latest update; `None` while no hand is seen.
    pub landmarks: Option<LandmarkSnapshot>,
    /// Time since the controller epoch at which this record was published.
    pub updated_at: Duration,
    /// Number of updates published before this one.
    pub sequence: u64,
}

impl HandState {
    pub fn hand_visible(&self) -> bool {
        self.landmarks.is_some()
    }
}

/// Single-writer, many-reader cell holding the latest [`HandState`].
#[derive(Debug)]
pub struct HandStateCell {
    inner: ArcSwap<HandState>,
}

impl HandStateCell {
    /// Cell holding a centred cursor and no gesture.
    pub fn new() -> Self {
        Self {
            inner: ArcSwap::from_pointee(HandState::default()),
        }
    }

    /// Latest complete record.
    pub fn load(&self) -> Arc<HandState> {
        self.inner.load_full()
    }

    /// Replace the record. Only the hand pipeline publishes.
    pub(crate) fn publish(&self, state: HandState) {
        self.inner.store(Arc::new(state));
    }
}

impl Default for HandStateCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn starts_centred_with_no_gesture() {
        let cell = HandStateCell::new();
        let s = cell.load();
        assert_eq!(s.position, Vec2::ZERO);
        assert_eq!(s.gesture, Gesture::None);
        assert!(!s.hand_visible());
    }

    #[test]
    fn publish_replaces_whole_record() {
        let cell = HandStateCell::new();
        let before = cell.load();
        cell.publish(HandState {
            position: Vec2::new(0.5, -0.5),
            gesture: Gesture::OpenPalm,
            landmarks: None,
            updated_at: Duration::from_millis(16),
            sequence: 1,
        });
        let after = cell.load();
        assert_eq!(before.gesture, Gesture::None);
        assert_eq!(after.gesture, Gesture::OpenPalm);
        assert_eq!(after.sequence, 1);
    }

    #[test]
    fn readers_never_see_torn_records() {
        let cell = Arc::new(HandStateCell::new());
        let writer = {
            let cell = Arc::clone(&cell);
            thread::spawn(move || {
                for i in 1..=2000u64 {
                    let v = i as f32;
                    cell.publish(HandState {
                        position: Vec2::new(v, -v),
                        gesture: if i % 2 == 0 {
                            Gesture::OpenPalm
                        } else {
                            Gesture::ThumbUp
                        },
                        landmarks: None,
                        updated_at: Duration::from_millis(i),
                        sequence: i,
                    });
                }
            })
        };

        let mut last_seq = 0;
        while last_seq < 2000 {
            let s = cell.load();
            assert_eq!(s.position.x, -s.position.y);
            assert_eq!(s.position.x, s.sequence as f32);
            if s.sequence > 0 {
                let expected = if s.sequence % 2 == 0 {
                    Gesture::OpenPalm
                } else {
                    Gesture::ThumbUp
                };
                assert_eq!(s.gesture, expected);
            }
            assert!(s.sequence >= last_seq);
            last_seq = s.sequence;
        }
        writer.join().unwrap();
    }
}
