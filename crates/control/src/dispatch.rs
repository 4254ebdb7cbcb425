use gesturespace_author::{ObjectStore, SceneStore};
use gesturespace_input::{GestureEdgeEvent, HandState};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::action::Outbox;
use crate::creative::CreativeConsumer;
use crate::runner::RunnerConsumer;

/// Which consumer receives hand input. Owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    #[default]
    Creative,
    Runner,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creative => "creative",
            Self::Runner => "runner",
        }
    }
}

impl std::fmt::Display for ControlMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One way of turning hand input into effects.
pub trait Consumer {
    /// A gesture transition, delivered once.
    fn on_edge(&mut self, edge: &GestureEdgeEvent, hand: &HandState, out: &mut Outbox);

    /// Every render tick, after that tick's edges.
    fn on_tick(&mut self, hand: &HandState, dt: f32, out: &mut Outbox);

    fn on_activate(&mut self, _out: &mut Outbox) {}

    fn on_deactivate(&mut self, _out: &mut Outbox) {}
}

/// Routes each tick's input to the consumer selected by the mode.
pub struct Dispatcher<S: ObjectStore = SceneStore> {
    mode: ControlMode,
    creative: CreativeConsumer<S>,
    runner: RunnerConsumer,
    outbox: Outbox,
}

impl<S: ObjectStore> Dispatcher<S> {
    pub fn new(creative: CreativeConsumer<S>, runner: RunnerConsumer) -> Self {
        Self {
            mode: ControlMode::default(),
            creative,
            runner,
            outbox: Outbox::new(),
        }
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Switch consumers. The outgoing one is deactivated before the incoming
    /// one is activated.
    pub fn set_mode(&mut self, mode: ControlMode) {
        if mode == self.mode {
            return;
        }
        info!(from = %self.mode, to = %mode, "control mode changed");
        let mut out = self.outbox.take();
        self.active().on_deactivate(&mut out);
        self.mode = mode;
        self.active().on_activate(&mut out);
        self.outbox = out;
    }

    fn active(&mut self) -> &mut dyn Consumer {
        match self.mode {
            ControlMode::Creative => &mut self.creative,
            ControlMode::Runner => &mut self.runner,
        }
    }

    /// Deliver this tick's edges, oldest first, then the tick itself.
    pub fn dispatch(&mut self, edges: &[GestureEdgeEvent], hand: &HandState, dt: f32) {
        let _span = tracing::info_span!("dispatch", mode = %self.mode).entered();
        let mut out = self.outbox.take();
        let consumer = self.active();
        for edge in edges {
            consumer.on_edge(edge, hand, &mut out);
        }
        consumer.on_tick(hand, dt, &mut out);
        self.outbox = out;
    }

    pub fn creative(&self) -> &CreativeConsumer<S> {
        &self.creative
    }

    pub fn creative_mut(&mut self) -> &mut CreativeConsumer<S> {
        &mut self.creative
    }

    pub fn runner(&self) -> &RunnerConsumer {
        &self.runner
    }

    pub fn runner_mut(&mut self) -> &mut RunnerConsumer {
        &mut self.runner
    }

    /// Pending actions and notices, not yet taken by the host.
    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    /// Hand everything reported since the last call to the host. Runner
    /// start and retry requests report here too.
    pub fn take_outbox(&mut self) -> Outbox {
        let mut out = self.outbox.take();
        self.runner.flush(&mut out);
        out
    }
}
