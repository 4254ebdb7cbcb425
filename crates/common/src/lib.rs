//! Shared types for the gesturespace engine: identifiers, transforms and the
//! injectable randomness source used by the simulation and the dispatcher.

mod random;
mod types;

pub use random::{RandomSource, SeededRandom, SequenceRandom};
pub use types::{ObjectId, Transform};
