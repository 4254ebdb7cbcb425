use gesturespace_common::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::object::{CreationSettings, ObjectPatch, SceneObject};

/// An event record produced by every mutation to the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    Added { object: SceneObject },
    /// Carries the object as it looked before the first of a run of
    /// consecutive updates to it.
    Updated { id: ObjectId, before: SceneObject },
    Deleted { object: SceneObject },
    SelectionChanged { selected: Option<ObjectId> },
}

/// Errors from object store operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),
}

/// The surface the dispatcher drives in creative mode.
///
/// The dispatcher only calls these; it never owns the collection.
pub trait ObjectStore {
    /// Create an object from the settings. Returns its id.
    fn add(&mut self, settings: &CreationSettings) -> ObjectId;
    fn update(&mut self, id: ObjectId, patch: &ObjectPatch) -> Result<(), StoreError>;
    fn delete(&mut self, id: ObjectId) -> Result<(), StoreError>;
    fn objects(&self) -> &[SceneObject];
    fn get(&self, id: ObjectId) -> Option<&SceneObject>;
    fn selected(&self) -> Option<ObjectId>;
    /// Select an object, or clear the selection with `None`.
    fn set_selected(&mut self, id: Option<ObjectId>);
    /// Take the mutation records accumulated since the last drain.
    fn drain_events(&mut self) -> Vec<SceneEvent>;
}

/// In-memory object store. Objects are kept in creation order.
#[derive(Debug, Clone, Default)]
pub struct SceneStore {
    objects: Vec<SceneObject>,
    selected: Option<ObjectId>,
    /// Append-only log of all mutations.
    event_log: Vec<SceneEvent>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The selected object, if the selection still resolves.
    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    fn position(&self, id: ObjectId) -> Result<usize, StoreError> {
        self.objects
            .iter()
            .position(|o| o.id == id)
            .ok_or(StoreError::ObjectNotFound(id))
    }
}

impl ObjectStore for SceneStore {
    fn add(&mut self, settings: &CreationSettings) -> ObjectId {
        let object = SceneObject::from_settings(settings);
        let id = object.id;
        debug!(%id, shape = %object.shape, color = %object.color, "object added");
        self.event_log.push(SceneEvent::Added {
            object: object.clone(),
        });
        self.objects.push(object);
        id
    }

    fn update(&mut self, id: ObjectId, patch: &ObjectPatch) -> Result<(), StoreError> {
        let idx = self.position(id)?;
        let object = &mut self.objects[idx];
        let before = object.clone();
        object.apply(patch);
        // A held manipulation patches the same object every frame; one record
        // covers the whole run.
        let continues_run = matches!(
            self.event_log.last(),
            Some(SceneEvent::Updated { id: last, .. }) if *last == id
        );
        if !continues_run {
            self.event_log.push(SceneEvent::Updated { id, before });
        }
        Ok(())
    }

    fn delete(&mut self, id: ObjectId) -> Result<(), StoreError> {
        let idx = self.position(id)?;
        let object = self.objects.remove(idx);
        debug!(%id, "object deleted");
        self.event_log.push(SceneEvent::Deleted { object });
        if self.selected == Some(id) {
            self.set_selected(None);
        }
        Ok(())
    }

    fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    fn set_selected(&mut self, id: Option<ObjectId>) {
        if self.selected != id {
            self.selected = id;
            self.event_log.push(SceneEvent::SelectionChanged { selected: id });
        }
    }

    fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Color, ShapeKind};
    use glam::Vec3;

    #[test]
    fn add_keeps_creation_order() {
        let mut store = SceneStore::new();
        let a = store.add(&CreationSettings::default());
        let b = store.add(&CreationSettings {
            shape: ShapeKind::Sphere,
            ..CreationSettings::default()
        });
        let ids: Vec<ObjectId> = store.objects().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(store.get(b).unwrap().shape, ShapeKind::Sphere);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn update_applies_patch_and_logs_before() {
        let mut store = SceneStore::new();
        let id = store.add(&CreationSettings::default());
        store
            .update(id, &ObjectPatch::position(Vec3::new(0.5, 1.0, 0.0)))
            .unwrap();
        assert_eq!(
            store.get(id).unwrap().transform.position,
            Vec3::new(0.5, 1.0, 0.0)
        );
        match store.events().last() {
            Some(SceneEvent::Updated { id: logged, before }) => {
                assert_eq!(*logged, id);
                assert_eq!(before.transform.position, Vec3::ZERO);
            }
            other => panic!("expected update event, got {other:?}"),
        }
    }

    #[test]
    fn missing_ids_are_errors() {
        let mut store = SceneStore::new();
        let ghost = ObjectId::new();
        assert_eq!(
            store.update(ghost, &ObjectPatch::color(Color::WHITE)),
            Err(StoreError::ObjectNotFound(ghost))
        );
        assert_eq!(store.delete(ghost), Err(StoreError::ObjectNotFound(ghost)));
        assert!(store.events().is_empty());
    }

    #[test]
    fn deleting_selection_clears_it() {
        let mut store = SceneStore::new();
        let a = store.add(&CreationSettings::default());
        let b = store.add(&CreationSettings::default());
        store.set_selected(Some(a));
        store.delete(b).unwrap();
        assert_eq!(store.selected(), Some(a));
        store.delete(a).unwrap();
        assert_eq!(store.selected(), None);
        assert!(store.selected_object().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn consecutive_updates_share_one_record() {
        let mut store = SceneStore::new();
        let a = store.add(&CreationSettings::default());
        let b = store.add(&CreationSettings::default());
        store.drain_events();

        for i in 0..1000 {
            let x = i as f32 * 0.01;
            store
                .update(a, &ObjectPatch::position(Vec3::new(x, 0.0, 0.0)))
                .unwrap();
        }
        assert_eq!(store.events().len(), 1);
        match &store.events()[0] {
            SceneEvent::Updated { id, before } => {
                assert_eq!(*id, a);
                assert_eq!(before.transform.position, Vec3::ZERO);
            }
            other => panic!("expected update event, got {other:?}"),
        }
        assert!((store.get(a).unwrap().transform.position.x - 9.99).abs() < 1e-4);

        // A different object starts a new run, and so does returning to `a`.
        store.update(b, &ObjectPatch::color(Color::PALETTE[1])).unwrap();
        store.update(a, &ObjectPatch::color(Color::PALETTE[2])).unwrap();
        assert_eq!(store.drain_events().len(), 3);
    }

    #[test]
    fn every_mutation_is_logged() {
        let mut store = SceneStore::new();
        let id = store.add(&CreationSettings::default());
        store.set_selected(Some(id));
        store.set_selected(Some(id));
        store.update(id, &ObjectPatch::color(Color::PALETTE[2])).unwrap();
        store.delete(id).unwrap();
        let events = store.drain_events();
        assert_eq!(events.len(), 5);
        assert!(matches!(events[0], SceneEvent::Added { .. }));
        assert!(matches!(events[1], SceneEvent::SelectionChanged { selected: Some(_) }));
        assert!(matches!(events[2], SceneEvent::Updated { .. }));
        assert!(matches!(events[3], SceneEvent::Deleted { .. }));
        assert!(matches!(events[4], SceneEvent::SelectionChanged { selected: None }));
        assert!(store.events().is_empty());
    }
}
