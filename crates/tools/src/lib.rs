//! Developer tooling: read-only views of a running session for HUDs and logs.
//!
//! # Invariants
//! - Tools never mutate the session they inspect.

pub mod inspector;

pub use inspector::{ObjectInfo, SessionInspector, SessionSummary};
