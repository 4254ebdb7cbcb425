use gesturespace_input::{Gesture, GestureEdgeEvent, HandState};
use gesturespace_kernel::{PhaseError, Runner, RunnerEvent, RunnerInput, RunnerPhase};
use tracing::trace;

use crate::action::{Action, Outbox};
use crate::audio::AudioCues;
use crate::dispatch::Consumer;

/// Runner mode: the cursor steers, a raised hand or THUMB_UP jumps.
pub struct RunnerConsumer {
    runner: Runner,
    audio: Box<dyn AudioCues>,
    /// Reported by host-driven start/retry, awaiting the next flush.
    pending: Outbox,
}

impl RunnerConsumer {
    pub fn new(runner: Runner, audio: Box<dyn AudioCues>) -> Self {
        Self {
            runner,
            audio,
            pending: Outbox::new(),
        }
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    pub fn start(&mut self) -> Result<(), PhaseError> {
        self.runner.start()?;
        self.react();
        Ok(())
    }

    pub fn retry(&mut self) -> Result<(), PhaseError> {
        self.runner.retry()?;
        self.react();
        Ok(())
    }

    /// Map this tick's hand to runner input.
    pub fn input_for(&self, hand: &HandState) -> RunnerInput {
        let config = self.runner.config();
        RunnerInput {
            lateral_target: hand.position.x * (config.lane_width / 2.0),
            jump: hand.gesture == Gesture::ThumbUp
                || hand.position.y < config.high_hand_threshold,
        }
    }

    /// Turn runner events into cues and actions.
    fn react(&mut self) {
        for event in self.runner.drain_events() {
            match event {
                RunnerEvent::Started => {
                    self.audio.play_score();
                    self.audio.play_bgm();
                    self.pending.act(Action::Start);
                }
                RunnerEvent::Retried => {
                    self.audio.play_score();
                    self.audio.play_bgm();
                    self.pending.act(Action::Retry);
                }
                RunnerEvent::Jumped => {
                    self.audio.play_jump();
                    self.pending.act(Action::Jump);
                }
                RunnerEvent::Crashed { score } => {
                    self.audio.play_game_over();
                    self.audio.stop_bgm();
                    self.pending.act(Action::Crash { score });
                }
                RunnerEvent::Spawned { .. } | RunnerEvent::Despawned { .. } => {}
            }
        }
    }

    /// Move pending reports into `out`.
    pub(crate) fn flush(&mut self, out: &mut Outbox) {
        let pending = self.pending.take();
        out.actions.extend(pending.actions);
        out.notices.extend(pending.notices);
    }
}

impl Consumer for RunnerConsumer {
    fn on_edge(&mut self, edge: &GestureEdgeEvent, _hand: &HandState, _out: &mut Outbox) {
        // Jumping and steering are level-triggered; edges carry nothing here.
        trace!(gesture = %edge.gesture, "edge ignored in runner mode");
    }

    fn on_tick(&mut self, hand: &HandState, dt: f32, out: &mut Outbox) {
        self.flush(out);
        let input = self.input_for(hand);
        self.runner.step(dt, &input);
        self.react();
        self.flush(out);
    }

    fn on_activate(&mut self, out: &mut Outbox) {
        self.flush(out);
        if self.runner.phase() == RunnerPhase::Playing {
            self.audio.play_bgm();
        }
    }

    fn on_deactivate(&mut self, out: &mut Outbox) {
        self.flush(out);
        self.audio.stop_bgm();
    }
}
