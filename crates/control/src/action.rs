use gesturespace_author::{Color, ShapeKind};
use gesturespace_common::ObjectId;
use glam::{Quat, Vec3};

/// Something a consumer did in response to hand input or a host request.
///
/// Both modes report through the same action list, so the host has one
/// record of everything the engine changed.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Object created from the current creation settings and selected.
    Create { id: ObjectId, shape: ShapeKind },
    Recolor { id: ObjectId, color: Color },
    Move { id: ObjectId, position: Vec3 },
    Rotate { id: ObjectId, rotation: Quat },
    Scale { id: ObjectId, scale: Vec3 },
    /// Runner entered playing from waiting.
    Start,
    /// Runner entered playing from crashed.
    Retry,
    Jump,
    Crash { score: f32 },
}

/// Non-fatal condition the host should show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// An action targeted a selection that no longer exists. The selection
    /// has been cleared.
    SelectionLost(ObjectId),
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelectionLost(id) => write!(f, "selection lost ({id})"),
        }
    }
}

/// Where consumers report what they did during one dispatch.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    pub actions: Vec<Action>,
    pub notices: Vec<Notice>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn act(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.notices.is_empty()
    }

    /// Move everything out, leaving the outbox empty.
    pub fn take(&mut self) -> Outbox {
        std::mem::take(self)
    }
}
