//! 21-joint hand landmark snapshots in normalized image coordinates.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Number of joints in a complete hand snapshot.
pub const JOINT_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Errors from strict snapshot construction.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LandmarkError {
    #[error("expected {expected} joints, got {actual}")]
    JointCount { expected: usize, actual: usize },
    #[error("joint {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// One inference result: joint positions indexed by canonical hand-joint index.
///
/// Producers may deliver fewer than [`JOINT_COUNT`] points; such partial
/// snapshots are carried as-is and classify to no gesture.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSnapshot {
    points: Vec<Vec3>,
}

impl LandmarkSnapshot {
    /// Wrap whatever the producer delivered, complete or not.
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    /// Build a snapshot that must hold exactly [`JOINT_COUNT`] finite points.
    pub fn complete(points: Vec<Vec3>) -> Result<Self, LandmarkError> {
        if points.len() != JOINT_COUNT {
            return Err(LandmarkError::JointCount {
                expected: JOINT_COUNT,
                actual: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(LandmarkError::NonFinite { index });
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether every joint the classifier reads is present.
    pub fn is_complete(&self) -> bool {
        self.points.len() >= JOINT_COUNT
    }

    pub fn joint(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// The index fingertip, which drives the cursor.
    pub fn index_tip(&self) -> Option<Vec3> {
        self.joint(INDEX_TIP)
    }
}
