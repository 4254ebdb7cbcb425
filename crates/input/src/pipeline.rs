//! The writer side of the hand bridge.
//!
//! [`HandPipeline`] runs inside the landmark source's callback: it
//! classifies, smooths, detects transitions and publishes one complete
//! [`HandState`]. Edge events are queued for the render-tick side, which
//! drains them through [`HandReader`].

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::filter::{FilterConfig, PositionFilter, cursor_target};
use crate::gesture::{Classifier, ClassifierConfig, Gesture};
use crate::hand_state::{HandState, HandStateCell};
use crate::landmark::LandmarkSnapshot;
use crate::tracker::{GestureEdgeEvent, GestureTracker, TrackerConfig};

/// Configuration for the whole input side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub classifier: ClassifierConfig,
    pub filter: FilterConfig,
    pub tracker: TrackerConfig,
}

/// Create the writer/reader pair. The epoch (time zero for edge timestamps)
/// is the moment of creation.
pub fn hand_channel(config: &InputConfig) -> (HandPipeline, HandReader) {
    let cell = Arc::new(HandStateCell::new());
    let (tx, rx) = mpsc::channel();
    let pipeline = HandPipeline {
        classifier: Classifier::new(config.classifier.clone()),
        filter: PositionFilter::new(&config.filter),
        tracker: GestureTracker::new(),
        cell: Arc::clone(&cell),
        edges: tx,
        epoch: Instant::now(),
        sequence: 0,
    };
    let reader = HandReader { cell, edges: rx };
    (pipeline, reader)
}

/// Sole writer of [`HandState`].
pub struct HandPipeline {
    classifier: Classifier,
    filter: PositionFilter,
    tracker: GestureTracker,
    cell: Arc<HandStateCell>,
    edges: Sender<GestureEdgeEvent>,
    epoch: Instant,
    sequence: u64,
}

impl HandPipeline {
    /// Process one tracker result stamped with the time since the epoch.
    pub fn ingest(&mut self, snapshot: Option<LandmarkSnapshot>) -> Option<GestureEdgeEvent> {
        let now = self.epoch.elapsed();
        self.ingest_at(snapshot, now)
    }

    /// Process one tracker result at an explicit time since the epoch.
    pub fn ingest_at(
        &mut self,
        snapshot: Option<LandmarkSnapshot>,
        now: Duration,
    ) -> Option<GestureEdgeEvent> {
        let gesture = self.classifier.classify(snapshot.as_ref());

        // Without a fingertip the cursor holds its last smoothed value.
        let position = match snapshot.as_ref().and_then(LandmarkSnapshot::index_tip) {
            Some(tip) => self.filter.smooth(cursor_target(tip)),
            None => self.filter.current(),
        };

        let edge = self.tracker.observe(gesture, now);

        self.cell.publish(HandState {
            position,
            gesture,
            landmarks: snapshot,
            updated_at: now,
            sequence: self.sequence,
        });
        self.sequence += 1;

        if let Some(edge) = edge {
            if self.edges.send(edge).is_err() {
                trace!("hand reader dropped; edge discarded");
            }
        }
        edge
    }

    /// Gesture as of the last ingest.
    pub fn current_gesture(&self) -> Gesture {
        self.tracker.current()
    }

    pub fn epoch(&self) -> Instant {
        self.epoch
    }
}

/// Reader side: latest hand state plus the queue of pending edges.
pub struct HandReader {
    cell: Arc<HandStateCell>,
    edges: Receiver<GestureEdgeEvent>,
}

impl HandReader {
    pub fn latest(&self) -> Arc<HandState> {
        self.cell.load()
    }

    /// Take every edge published since the last drain, oldest first.
    pub fn drain_edges(&self) -> Vec<GestureEdgeEvent> {
        self.edges.try_iter().collect()
    }

    pub fn cell(&self) -> &Arc<HandStateCell> {
        &self.cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{Finger, FingerMask};
    use crate::pose::HandPose;
    use glam::Vec2;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn palm() -> Option<LandmarkSnapshot> {
        Some(HandPose::new(FingerMask::ALL).snapshot())
    }

    #[test]
    fn ingest_publishes_state() {
        let (mut pipe, reader) = hand_channel(&InputConfig::default());
        pipe.ingest_at(palm(), ms(400));
        let s = reader.latest();
        assert_eq!(s.gesture, Gesture::OpenPalm);
        assert!(s.hand_visible());
        assert_eq!(s.updated_at, ms(400));
        assert_eq!(s.sequence, 0);
    }

    #[test]
    fn edges_are_queued_once() {
        let (mut pipe, reader) = hand_channel(&InputConfig::default());
        pipe.ingest_at(None, ms(0));
        pipe.ingest_at(palm(), ms(16));
        pipe.ingest_at(palm(), ms(32));
        pipe.ingest_at(None, ms(48));
        pipe.ingest_at(palm(), ms(64));

        let edges = reader.drain_edges();
        let gestures: Vec<Gesture> = edges.iter().map(|e| e.gesture).collect();
        assert_eq!(
            gestures,
            vec![Gesture::OpenPalm, Gesture::None, Gesture::OpenPalm]
        );
        assert!(reader.drain_edges().is_empty());
    }

    #[test]
    fn lost_hand_keeps_cursor() {
        let (mut pipe, reader) = hand_channel(&InputConfig::default());
        let pointing = HandPose::new(FingerMask::of(&[Finger::Index]))
            .pointing_at(0.0, 0.0)
            .snapshot();
        pipe.ingest_at(Some(pointing), ms(10));
        let seen = reader.latest().position;
        assert!((seen - Vec2::new(0.2, 0.2)).length() < 1e-4);

        pipe.ingest_at(None, ms(20));
        let s = reader.latest();
        assert_eq!(s.position, seen);
        assert_eq!(s.gesture, Gesture::None);
        assert!(!s.hand_visible());
    }

    #[test]
    fn dropped_reader_does_not_break_writer() {
        let (mut pipe, reader) = hand_channel(&InputConfig::default());
        drop(reader);
        assert!(pipe.ingest_at(palm(), ms(500)).is_some());
        assert_eq!(pipe.current_gesture(), Gesture::OpenPalm);
    }
}
