//! Control: the render-tick side of the engine.
//!
//! Gesture edges and the smoothed cursor are routed into exactly one of two
//! consumers, selected by [`ControlMode`]: object manipulation in creative
//! mode, or the runner simulation in runner mode.
//!
//! # Invariants
//! - Exactly one consumer is active per tick.
//! - Nothing in the tick loop returns an error; store misses surface as
//!   [`Notice`]s and a failed landmark source as a degraded tracker status.

pub mod action;
pub mod audio;
pub mod config;
pub mod creative;
pub mod dispatch;
pub mod runner;
pub mod session;

pub use action::{Action, Notice, Outbox};
pub use audio::{AudioCues, Cue, CueLog, SilentAudio, TracingAudio};
pub use config::{ConfigError, EngineConfig};
pub use creative::{CreativeConfig, CreativeConsumer};
pub use dispatch::{Consumer, ControlMode, Dispatcher};
pub use runner::RunnerConsumer;
pub use session::Session;
