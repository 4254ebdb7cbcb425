//! A landmark source on its own thread feeding a render-tick session.

use std::thread;
use std::time::Duration;

use gesturespace_control::{Action, EngineConfig, Session, SilentAudio};
use gesturespace_input::pose::HandPose;
use gesturespace_input::{
    FingerMask, Gesture, LandmarkSnapshot, ScriptedSource, TrackerLease, TrackerStatus,
};

fn palm() -> Option<LandmarkSnapshot> {
    Some(HandPose::new(FingerMask::ALL).snapshot())
}

fn wait_until_finished(lease: &TrackerLease<ScriptedSource>) {
    for _ in 0..2000 {
        if !lease.source().is_running() {
            return;
        }
        thread::sleep(Duration::from_millis(2));
    }
    panic!("scripted source never finished");
}

#[test]
fn palm_after_idle_creates_one_object() {
    let (pipeline, mut session) =
        Session::from_config(&EngineConfig::default(), 3, Box::new(SilentAudio));

    // Half a second of no hand, then a held palm.
    let mut frames: Vec<Option<LandmarkSnapshot>> = vec![None; 50];
    frames.extend((0..5).map(|_| palm()));
    let source = ScriptedSource::new(frames, Duration::from_millis(10));

    let mut lease = TrackerLease::acquire(source, pipeline);
    session.set_tracker_status(lease.status().clone());
    assert_eq!(session.tracker_status(), &TrackerStatus::Running);

    wait_until_finished(&lease);
    lease.release();
    session.set_tracker_status(lease.status().clone());

    session.tick(0.016);
    session.tick(0.016);

    assert_eq!(session.hand().gesture, Gesture::OpenPalm);
    assert_eq!(session.hand().sequence, 54);
    let out = session.take_outbox();
    let creates = out
        .actions
        .iter()
        .filter(|a| matches!(a, Action::Create { .. }))
        .count();
    assert_eq!(creates, 1);
    assert_eq!(session.tracker_status(), &TrackerStatus::Stopped);
}

#[test]
fn nothing_arrives_after_release() {
    let (pipeline, mut session) =
        Session::from_config(&EngineConfig::default(), 3, Box::new(SilentAudio));
    let frames = vec![palm(), None, palm()];
    let source = ScriptedSource::new(frames, Duration::from_millis(1)).looping();

    let mut lease = TrackerLease::acquire(source, pipeline);
    while lease.source().delivered() < 20 {
        thread::sleep(Duration::from_millis(1));
    }
    lease.release();
    session.tick(0.016);
    let seen = session.hand().sequence;
    let delivered = lease.source().delivered();

    thread::sleep(Duration::from_millis(30));
    session.tick(0.016);
    assert_eq!(session.hand().sequence, seen);
    assert_eq!(lease.source().delivered(), delivered);
    assert_eq!(seen as usize + 1, delivered);
}

#[test]
fn failed_source_leaves_engine_running_idle() {
    let (pipeline, mut session) =
        Session::from_config(&EngineConfig::default(), 3, Box::new(SilentAudio));
    let lease = TrackerLease::acquire(ScriptedSource::new(Vec::new(), Duration::ZERO), pipeline);
    session.set_tracker_status(lease.status().clone());

    for _ in 0..10 {
        session.tick(0.016);
    }
    assert!(matches!(session.tracker_status(), TrackerStatus::Degraded(_)));
    let hand = session.hand();
    assert_eq!(hand.gesture, Gesture::None);
    assert_eq!(hand.position, glam::Vec2::ZERO);
    assert!(session.take_outbox().is_empty());
}
