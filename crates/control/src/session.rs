//! Render-tick side of the engine.
//!
//! A [`Session`] reads the latest hand state, drains pending edges and hands
//! both to the dispatcher, once per rendered frame.

use std::sync::Arc;

use gesturespace_author::{ObjectStore, SceneEvent, SceneStore};
use gesturespace_common::SeededRandom;
use gesturespace_input::{HandPipeline, HandReader, HandState, TrackerStatus, hand_channel};
use gesturespace_kernel::Runner;
use tracing::trace;

use crate::action::Outbox;
use crate::audio::AudioCues;
use crate::config::EngineConfig;
use crate::creative::CreativeConsumer;
use crate::dispatch::{ControlMode, Dispatcher};
use crate::runner::RunnerConsumer;

/// Mixed into the seed so creative recolors and obstacle placement draw
/// from different streams.
const CREATIVE_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

pub struct Session<S: ObjectStore = SceneStore> {
    reader: HandReader,
    dispatcher: Dispatcher<S>,
    tracker: TrackerStatus,
    ticks: u64,
}

impl Session<SceneStore> {
    /// Wire up a complete engine. The returned pipeline is the hand-state
    /// writer and belongs to the landmark source.
    pub fn from_config(
        config: &EngineConfig,
        seed: u64,
        audio: Box<dyn AudioCues>,
    ) -> (HandPipeline, Self) {
        let (pipeline, reader) = hand_channel(&config.input);
        let creative = CreativeConsumer::new(
            config.creative.clone(),
            config.input.tracker.debounce(),
            SceneStore::new(),
            Box::new(SeededRandom::new(seed ^ CREATIVE_STREAM)),
        );
        let runner = RunnerConsumer::new(
            Runner::new(config.runner.clone(), Box::new(SeededRandom::new(seed))),
            audio,
        );
        let session = Self::new(reader, Dispatcher::new(creative, runner));
        (pipeline, session)
    }
}

impl<S: ObjectStore> Session<S> {
    pub fn new(reader: HandReader, dispatcher: Dispatcher<S>) -> Self {
        Self {
            reader,
            dispatcher,
            tracker: TrackerStatus::Stopped,
            ticks: 0,
        }
    }

    /// Advance one rendered frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let hand = self.reader.latest();
        let edges = self.reader.drain_edges();
        trace!(
            tick = self.ticks,
            gesture = %hand.gesture,
            edges = edges.len(),
            "session tick"
        );
        self.dispatcher.dispatch(&edges, &hand, dt);
        self.ticks += 1;
    }

    /// Latest complete hand state.
    pub fn hand(&self) -> Arc<HandState> {
        self.reader.latest()
    }

    pub fn mode(&self) -> ControlMode {
        self.dispatcher.mode()
    }

    pub fn set_mode(&mut self, mode: ControlMode) {
        self.dispatcher.set_mode(mode);
    }

    pub fn dispatcher(&self) -> &Dispatcher<S> {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<S> {
        &mut self.dispatcher
    }

    /// Everything the engine did since the last call.
    pub fn take_outbox(&mut self) -> Outbox {
        self.dispatcher.take_outbox()
    }

    /// Scene mutation records since the last call. Hosts that keep a
    /// session alive should drain these as they go.
    pub fn drain_scene_events(&mut self) -> Vec<SceneEvent> {
        self.dispatcher.creative_mut().store_mut().drain_events()
    }

    pub fn tracker_status(&self) -> &TrackerStatus {
        &self.tracker
    }

    /// Record the landmark source's state, as reported by its lease.
    pub fn set_tracker_status(&mut self, status: TrackerStatus) {
        self.tracker = status;
    }

    /// Frames ticked so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
