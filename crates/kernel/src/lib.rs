//! Runner Kernel: the running-game simulation, stepped once per render tick.
//!
//! # Invariants
//! - Phase starts at `Waiting`; only `start` leaves it, only `retry` leaves `Crashed`.
//! - Score is zero on every entry into `Playing` and never decreases while playing.
//! - Live obstacle depths only increase, toward and past the player.
//! - All randomness comes from the injected source; same seed, same run.

pub mod player;
pub mod runner;

pub use player::{PlayerKinematic, RunnerInput};
pub use runner::{Obstacle, PhaseError, Runner, RunnerConfig, RunnerEvent, RunnerPhase};
