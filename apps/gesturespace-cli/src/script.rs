//! Scripted hand movements for headless replay.

use gesturespace_control::ControlMode;
use gesturespace_input::pose::HandPose;
use gesturespace_input::{Finger, FingerMask, LandmarkSnapshot};

pub type Frames = Vec<Option<LandmarkSnapshot>>;

fn hold(frames: &mut Frames, frame: Option<LandmarkSnapshot>, count: usize) {
    frames.extend(std::iter::repeat_n(frame, count));
}

fn pose(fingers: &[Finger]) -> HandPose {
    HandPose::new(FingerMask::of(fingers))
}

/// Create two objects, recolor, then move, rotate and scale the selection.
fn creative() -> Frames {
    let mut frames = Frames::new();
    let palm = Some(HandPose::new(FingerMask::ALL).snapshot());
    let thumb = Some(pose(&[Finger::Thumb]).snapshot());

    hold(&mut frames, None, 30);
    hold(&mut frames, palm.clone(), 15);
    hold(&mut frames, None, 25);
    hold(&mut frames, palm, 15);
    hold(&mut frames, None, 25);
    hold(&mut frames, thumb, 10);

    for i in 0..90 {
        let t = i as f32 / 90.0;
        let frame = pose(&[Finger::Index])
            .pointing_at(0.3 + 0.4 * t, 0.4)
            .snapshot();
        frames.push(Some(frame));
    }
    for i in 0..45 {
        let t = i as f32 / 45.0;
        let frame = pose(&[Finger::Index, Finger::Middle])
            .pointing_at(0.5 - 0.2 * t, 0.5)
            .snapshot();
        frames.push(Some(frame));
    }
    for i in 0..45 {
        let t = i as f32 / 45.0;
        let frame = pose(&[Finger::Index, Finger::Middle, Finger::Ring])
            .pointing_at(0.5, 0.6 - 0.3 * t)
            .snapshot();
        frames.push(Some(frame));
    }
    hold(&mut frames, None, 20);
    frames
}

/// Weave across the lanes, raising the hand now and then to jump.
fn runner() -> Frames {
    let mut frames = Frames::new();
    for i in 0..600 {
        let x = 0.5 + 0.3 * (i as f32 * 0.03).sin();
        let y = if i % 150 < 10 { 0.95 } else { 0.5 };
        frames.push(Some(pose(&[Finger::Index]).pointing_at(x, y).snapshot()));
    }
    frames
}

pub fn frames_for(mode: ControlMode) -> Frames {
    match mode {
        ControlMode::Creative => creative(),
        ControlMode::Runner => runner(),
    }
}
