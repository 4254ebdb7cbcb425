//! Synthetic hand poses.
//!
//! Builds complete 21-joint snapshots from an extended-finger mask, for
//! tests, benches and the CLI demo session. Fingers point toward the top of
//! the image; a folded finger curls its tip back toward the palm.

use glam::{Vec2, Vec3};

use crate::gesture::{Finger, FingerMask};
use crate::landmark::{
    INDEX_MCP, INDEX_TIP, JOINT_COUNT, LandmarkSnapshot, MIDDLE_MCP, PINKY_MCP, RING_MCP,
    THUMB_CMC, THUMB_IP, THUMB_MCP, THUMB_TIP, WRIST,
};

/// Horizontal knuckle offsets for index, middle, ring and pinky.
const KNUCKLE_SPREAD: [(Finger, usize, f32); 4] = [
    (Finger::Index, INDEX_MCP, -0.03),
    (Finger::Middle, MIDDLE_MCP, 0.0),
    (Finger::Ring, RING_MCP, 0.03),
    (Finger::Pinky, PINKY_MCP, 0.055),
];

/// Offsets of (PIP, DIP, TIP) from the knuckle.
const EXTENDED_FINGER: [Vec2; 3] = [
    Vec2::new(0.0, -0.04),
    Vec2::new(0.0, -0.07),
    Vec2::new(0.0, -0.10),
];
const FOLDED_FINGER: [Vec2; 3] = [
    Vec2::new(0.0, -0.03),
    Vec2::new(0.0, -0.01),
    Vec2::new(0.0, 0.02),
];

/// Offsets of (IP, TIP) from the wrist.
const THUMB_UP: [Vec2; 2] = [Vec2::new(-0.07, -0.10), Vec2::new(-0.08, -0.15)];
const THUMB_DOWN: [Vec2; 2] = [Vec2::new(-0.065, 0.05), Vec2::new(-0.07, 0.15)];
const THUMB_FOLDED: [Vec2; 2] = [Vec2::new(-0.05, -0.07), Vec2::new(-0.02, -0.08)];

#[derive(Debug, Clone, Copy)]
pub struct HandPose {
    mask: FingerMask,
    wrist: Vec2,
    scale: f32,
    thumb_up: bool,
}

impl HandPose {
    /// Hand with its wrist in the lower middle of the frame.
    pub fn new(mask: FingerMask) -> Self {
        Self {
            mask,
            wrist: Vec2::new(0.5, 0.7),
            scale: 1.0,
            thumb_up: true,
        }
    }

    /// Place the wrist at `(x, y)` in image coordinates.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.wrist = Vec2::new(x, y);
        self
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Extended thumb points down instead of up.
    pub fn thumb_down(mut self) -> Self {
        self.thumb_up = false;
        self
    }

    /// Shift the hand so its index fingertip lands on `(x, y)`.
    pub fn pointing_at(self, x: f32, y: f32) -> Self {
        let tip = self.snapshot().points()[INDEX_TIP];
        let shift = Vec2::new(x - tip.x, y - tip.y);
        let wrist = self.wrist + shift;
        self.at(wrist.x, wrist.y)
    }

    pub fn snapshot(&self) -> LandmarkSnapshot {
        let mut pts = [Vec3::ZERO; JOINT_COUNT];
        let place = |offset: Vec2| -> Vec3 {
            let p = self.wrist + offset * self.scale;
            Vec3::new(p.x, p.y, 0.0)
        };

        pts[WRIST] = place(Vec2::ZERO);
        pts[THUMB_CMC] = place(Vec2::new(-0.03, -0.02));
        pts[THUMB_MCP] = place(Vec2::new(-0.06, -0.05));
        let thumb = match (self.mask.contains(Finger::Thumb), self.thumb_up) {
            (false, _) => THUMB_FOLDED,
            (true, true) => THUMB_UP,
            (true, false) => THUMB_DOWN,
        };
        pts[THUMB_IP] = place(thumb[0]);
        pts[THUMB_TIP] = place(thumb[1]);

        for (finger, mcp, dx) in KNUCKLE_SPREAD {
            let knuckle = Vec2::new(dx, -0.10);
            let chain = if self.mask.contains(finger) {
                EXTENDED_FINGER
            } else {
                FOLDED_FINGER
            };
            pts[mcp] = place(knuckle);
            for (i, offset) in chain.iter().enumerate() {
                pts[mcp + 1 + i] = place(knuckle + *offset);
            }
        }

        LandmarkSnapshot::new(pts.to_vec())
    }
}
