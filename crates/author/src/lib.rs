//! Creative authoring: the objects a user places with gestures and the store
//! that owns them.
//!
//! # Invariants
//! - Objects are created only from `CreationSettings`, changed only through
//!   `ObjectPatch`, and removed only by explicit delete.
//! - Every store mutation produces an event record.
//! - The selection never refers to a deleted object.

pub mod object;
pub mod store;

pub use object::{
    Color, ColorParseError, CreationSettings, MaterialKind, ObjectPatch, SceneObject, ShapeKind,
};
pub use store::{ObjectStore, SceneEvent, SceneStore, StoreError};
