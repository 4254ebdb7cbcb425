//! Hand input: landmark snapshots mapped to gestures, a smoothed cursor and
//! gesture edge events.
//!
//! # Invariants
//! - A gesture is a pure function of one landmark snapshot.
//! - Exactly one writer (`HandPipeline`) publishes `HandState`; readers only
//!   ever observe complete values.
//! - One edge event per gesture change, no duplicates, no misses.

pub mod filter;
pub mod gesture;
pub mod hand_state;
pub mod landmark;
pub mod pipeline;
pub mod pose;
pub mod source;
pub mod tracker;

pub use filter::{FilterConfig, PositionFilter, cursor_target};
pub use gesture::{Classifier, ClassifierConfig, Finger, FingerMask, Gesture, classify};
pub use hand_state::{HandState, HandStateCell};
pub use landmark::{JOINT_COUNT, LandmarkError, LandmarkSnapshot};
pub use pipeline::{HandPipeline, HandReader, InputConfig, hand_channel};
pub use source::{
    LandmarkCallback, LandmarkSource, ScriptedSource, SourceError, TrackerLease, TrackerStatus,
};
pub use tracker::{GestureEdgeEvent, GestureTracker, TrackerConfig};
