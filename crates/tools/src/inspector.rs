use gesturespace_author::{ObjectStore, SceneObject};
use gesturespace_common::ObjectId;
use gesturespace_control::{ControlMode, Session};
use gesturespace_input::{Gesture, TrackerStatus};
use gesturespace_kernel::RunnerPhase;
use glam::Vec2;

/// Session inspector for HUDs and developer tooling.
///
/// Provides read-only queries against a session: what the hand is doing,
/// what the scene holds and how the runner stands.
pub struct SessionInspector;

impl SessionInspector {
    /// Produce a summary of the session state.
    pub fn summary<S: ObjectStore>(session: &Session<S>) -> SessionSummary {
        let hand = session.hand();
        let dispatcher = session.dispatcher();
        let store = dispatcher.creative().store();
        let runner = dispatcher.runner().runner();
        SessionSummary {
            tick: session.ticks(),
            gesture: hand.gesture,
            cursor: hand.position,
            hand_visible: hand.hand_visible(),
            mode: dispatcher.mode(),
            object_count: store.objects().len(),
            selected: store.selected(),
            phase: runner.phase(),
            score: runner.score().floor() as u64,
            tracker: session.tracker_status().clone(),
            pending_actions: dispatcher.outbox().actions.len(),
            pending_notices: dispatcher.outbox().notices.len(),
        }
    }

    /// Details of one scene object, if it exists.
    pub fn inspect_object<S: ObjectStore>(
        session: &Session<S>,
        id: ObjectId,
    ) -> Option<ObjectInfo> {
        session
            .dispatcher()
            .creative()
            .store()
            .get(id)
            .map(ObjectInfo::from)
    }

    /// All object ids in creation order.
    pub fn list_objects<S: ObjectStore>(session: &Session<S>) -> Vec<ObjectId> {
        session
            .dispatcher()
            .creative()
            .store()
            .objects()
            .iter()
            .map(|o| o.id)
            .collect()
    }
}

/// Summary of session state for the inspector.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub tick: u64,
    pub gesture: Gesture,
    pub cursor: Vec2,
    pub hand_visible: bool,
    pub mode: ControlMode,
    pub object_count: usize,
    pub selected: Option<ObjectId>,
    pub phase: RunnerPhase,
    /// Whole points, as shown on the HUD.
    pub score: u64,
    pub tracker: TrackerStatus,
    pub pending_actions: usize,
    pub pending_notices: usize,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let selected = self
            .selected
            .map(|id| id.short())
            .unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "Session: tick={} mode={} gesture={} cursor=({:.2}, {:.2}) ",
            self.tick, self.mode, self.gesture, self.cursor.x, self.cursor.y
        )?;
        write!(
            f,
            "objects={} selected={} runner={} score={} tracker={} pending={}/{}",
            self.object_count,
            selected,
            self.phase,
            self.score,
            self.tracker,
            self.pending_actions,
            self.pending_notices
        )
    }
}

/// Detailed info about a single scene object.
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub id: ObjectId,
    pub shape: String,
    pub color: String,
    pub material: String,
    pub position: [f32; 3],
    pub scale: [f32; 3],
}

impl From<&SceneObject> for ObjectInfo {
    fn from(object: &SceneObject) -> Self {
        let p = object.transform.position;
        let s = object.transform.scale;
        Self {
            id: object.id,
            shape: object.shape.to_string(),
            color: object.color.to_hex(),
            material: object.material.to_string(),
            position: [p.x, p.y, p.z],
            scale: [s.x, s.y, s.z],
        }
    }
}

impl std::fmt::Display for ObjectInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Object [{}] {} {} {} pos=({:.2}, {:.2}, {:.2}) scale=({:.2}, {:.2}, {:.2})",
            self.id.short(),
            self.shape,
            self.color,
            self.material,
            self.position[0],
            self.position[1],
            self.position[2],
            self.scale[0],
            self.scale[1],
            self.scale[2]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesturespace_control::{EngineConfig, SilentAudio};
    use gesturespace_input::FingerMask;
    use gesturespace_input::pose::HandPose;
    use std::time::Duration;

    fn session() -> (gesturespace_input::HandPipeline, Session) {
        Session::from_config(&EngineConfig::default(), 7, Box::new(SilentAudio))
    }

    #[test]
    fn summary_of_fresh_session() {
        let (_pipe, session) = session();
        let s = SessionInspector::summary(&session);
        assert_eq!(s.tick, 0);
        assert_eq!(s.gesture, Gesture::None);
        assert!(!s.hand_visible);
        assert_eq!(s.mode, ControlMode::Creative);
        assert_eq!(s.object_count, 0);
        assert_eq!(s.selected, None);
        assert_eq!(s.phase, RunnerPhase::Waiting);
        assert_eq!(s.score, 0);
        assert_eq!(s.tracker, TrackerStatus::Stopped);
    }

    #[test]
    fn summary_display() {
        let (_pipe, session) = session();
        let text = SessionInspector::summary(&session).to_string();
        assert!(text.contains("mode=creative"));
        assert!(text.contains("gesture=NONE"));
        assert!(text.contains("runner=waiting"));
        assert!(text.contains("selected=-"));
    }

    #[test]
    fn created_object_is_listed_and_inspectable() {
        let (mut pipe, mut session) = session();
        pipe.ingest_at(
            Some(HandPose::new(FingerMask::ALL).snapshot()),
            Duration::from_millis(600),
        );
        session.tick(0.016);

        let ids = SessionInspector::list_objects(&session);
        assert_eq!(ids.len(), 1);
        let s = SessionInspector::summary(&session);
        assert_eq!(s.selected, Some(ids[0]));
        assert_eq!(s.pending_actions, 1);

        let info = SessionInspector::inspect_object(&session, ids[0]).unwrap();
        assert_eq!(info.shape, "box");
        assert_eq!(info.color, "#ffffff");
        assert!(info.to_string().starts_with(&format!("Object [{}] box", ids[0].short())));
        assert!(SessionInspector::inspect_object(&session, ObjectId::new()).is_none());
    }
}
