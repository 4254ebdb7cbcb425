//! Creative mode: gestures place, recolor and manipulate scene objects.
//!
//! OPEN_PALM and THUMB_UP act once, on their edge. ONE_FINGER, TWO_FINGERS
//! and THREE_FINGERS act every tick they are held, on the selection, using
//! the smoothed cursor.

use std::f32::consts::PI;
use std::time::Duration;

use gesturespace_author::{Color, CreationSettings, ObjectPatch, ObjectStore, SceneStore};
use gesturespace_common::{ObjectId, RandomSource};
use gesturespace_input::{Gesture, GestureEdgeEvent, HandState};
use glam::{EulerRot, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::action::{Action, Notice, Outbox};
use crate::dispatch::Consumer;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CreativeConfig {
    /// Settings used for objects created before the host supplies any.
    pub settings: CreationSettings,
    /// Colours THUMB_UP picks from.
    pub palette: Vec<Color>,
    /// World-space half-extent reached by the cursor at the screen edge.
    pub move_extent: Vec2,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for CreativeConfig {
    fn default() -> Self {
        Self {
            settings: CreationSettings::default(),
            palette: Color::PALETTE.to_vec(),
            move_extent: Vec2::new(5.0, 3.0),
            min_scale: 0.25,
            max_scale: 3.0,
        }
    }
}

/// Drives an [`ObjectStore`] from hand input.
pub struct CreativeConsumer<S: ObjectStore = SceneStore> {
    config: CreativeConfig,
    settings: CreationSettings,
    debounce: Duration,
    store: S,
    rng: Box<dyn RandomSource>,
}

impl<S: ObjectStore> CreativeConsumer<S> {
    pub fn new(
        config: CreativeConfig,
        debounce: Duration,
        store: S,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let settings = config.settings;
        Self {
            config,
            settings,
            debounce,
            store,
            rng,
        }
    }

    pub fn settings(&self) -> &CreationSettings {
        &self.settings
    }

    /// Replace the settings used for the next created object.
    pub fn set_settings(&mut self, settings: CreationSettings) {
        self.settings = settings;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn create(&mut self, edge: &GestureEdgeEvent, out: &mut Outbox) {
        if !edge.clears_debounce(self.debounce) {
            debug!(
                dwell_ms = edge.previous_dwell().as_millis() as u64,
                "creation suppressed by debounce"
            );
            return;
        }
        let id = self.store.add(&self.settings);
        self.store.set_selected(Some(id));
        debug!(%id, shape = %self.settings.shape, "object created");
        out.act(Action::Create {
            id,
            shape: self.settings.shape,
        });
    }

    fn recolor(&mut self, out: &mut Outbox) {
        let Some(id) = self.store.selected() else {
            return;
        };
        if self.config.palette.is_empty() {
            return;
        }
        let color = self.config.palette[self.rng.index(self.config.palette.len())];
        if self.apply(id, &ObjectPatch::color(color), out) {
            debug!(%id, %color, "object recolored");
            out.act(Action::Recolor { id, color });
        }
    }

    /// Patch the selection. A miss clears the selection and reports it.
    fn apply(&mut self, id: ObjectId, patch: &ObjectPatch, out: &mut Outbox) -> bool {
        match self.store.update(id, patch) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "selection lost");
                self.store.set_selected(None);
                out.notify(Notice::SelectionLost(id));
                false
            }
        }
    }

    fn manipulate(&mut self, gesture: Gesture, cursor: Vec2, out: &mut Outbox) {
        let Some(id) = self.store.selected() else {
            return;
        };
        let Some(object) = self.store.get(id) else {
            warn!(%id, "selection lost");
            self.store.set_selected(None);
            out.notify(Notice::SelectionLost(id));
            return;
        };

        let action = match gesture {
            Gesture::OneFinger => {
                let extent = self.config.move_extent;
                let z = object.transform.position.z;
                let position = Vec3::new(cursor.x * extent.x, cursor.y * extent.y, z);
                Action::Move { id, position }
            }
            Gesture::TwoFingers => {
                let rotation = Quat::from_euler(EulerRot::YXZ, cursor.x * PI, cursor.y * PI, 0.0);
                Action::Rotate { id, rotation }
            }
            Gesture::ThreeFingers => {
                let factor = (1.0 + cursor.y).clamp(self.config.min_scale, self.config.max_scale);
                let scale = object.shape.base_scale() * factor;
                Action::Scale { id, scale }
            }
            _ => return,
        };

        let patch = match action {
            Action::Move { position, .. } => ObjectPatch::position(position),
            Action::Rotate { rotation, .. } => ObjectPatch::rotation(rotation),
            Action::Scale { scale, .. } => ObjectPatch::scale(scale),
            _ => return,
        };
        if self.apply(id, &patch, out) {
            out.act(action);
        }
    }
}

impl<S: ObjectStore> Consumer for CreativeConsumer<S> {
    fn on_edge(&mut self, edge: &GestureEdgeEvent, _hand: &HandState, out: &mut Outbox) {
        match edge.gesture {
            Gesture::OpenPalm => self.create(edge, out),
            Gesture::ThumbUp => self.recolor(out),
            _ => {}
        }
    }

    fn on_tick(&mut self, hand: &HandState, _dt: f32, out: &mut Outbox) {
        self.manipulate(hand.gesture, hand.position, out);
    }
}
