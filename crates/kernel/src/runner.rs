use gesturespace_common::{RandomSource, SeededRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::player::{PlayerKinematic, RunnerInput};

/// Tunables of the running game. Distances are world units, times seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub lane_width: f32,
    /// Lateral easing gain, per second.
    pub lateral_gain: f32,
    pub gravity: f32,
    pub jump_force: f32,
    pub ground_height: f32,
    pub spawn_interval: f32,
    /// Depth at which obstacles appear (negative = ahead of the player).
    pub spawn_depth: f32,
    pub ground_speed: f32,
    /// Half-width of the depth band around the player that counts as contact.
    pub collision_depth: f32,
    /// Lateral distance under which contact is a crash.
    pub collision_lateral: f32,
    /// Obstacles at or past this depth are removed.
    pub despawn_depth: f32,
    /// Score gained per second of play.
    pub score_rate: f32,
    /// Cursor y below which the hand counts as raised for a jump.
    pub high_hand_threshold: f32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            lane_width: 8.0,
            lateral_gain: 15.0,
            gravity: 25.0,
            jump_force: 9.0,
            ground_height: 0.6,
            spawn_interval: 1.5,
            spawn_depth: -30.0,
            ground_speed: 12.0,
            collision_depth: 0.5,
            collision_lateral: 1.0,
            despawn_depth: 10.0,
            score_rate: 10.0,
            high_hand_threshold: -0.4,
        }
    }
}

/// Runner phase machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerPhase {
    #[default]
    Waiting,
    Playing,
    Crashed,
}

impl RunnerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Playing => "playing",
            Self::Crashed => "crashed",
        }
    }
}

impl std::fmt::Display for RunnerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u64,
    pub lateral: f32,
    pub depth: f32,
}

/// Record of every observable change, drained by the host for audio and UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunnerEvent {
    /// Waiting → playing.
    Started,
    /// Crashed → playing.
    Retried,
    /// Jump impulse applied.
    Jumped,
    Spawned { id: u64, lateral: f32 },
    Despawned { id: u64 },
    /// Playing → crashed, with the final score.
    Crashed { score: f32 },
}

/// Errors from phase transitions requested by the host.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PhaseError {
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: RunnerPhase,
    },
}

/// The running-game simulation.
pub struct Runner {
    config: RunnerConfig,
    phase: RunnerPhase,
    player: PlayerKinematic,
    obstacles: Vec<Obstacle>,
    score: f32,
    /// Simulated seconds since the last start or retry.
    clock: f32,
    last_spawn: f32,
    next_obstacle: u64,
    rng: Box<dyn RandomSource>,
    events: Vec<RunnerEvent>,
}

impl Runner {
    pub fn new(config: RunnerConfig, rng: Box<dyn RandomSource>) -> Self {
        let player = PlayerKinematic::grounded(config.ground_height);
        Self {
            config,
            phase: RunnerPhase::Waiting,
            player,
            obstacles: Vec::new(),
            score: 0.0,
            clock: 0.0,
            last_spawn: 0.0,
            next_obstacle: 0,
            rng,
            events: Vec::new(),
        }
    }

    /// Default tunables with a seeded source.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(RunnerConfig::default(), Box::new(SeededRandom::new(seed)))
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn phase(&self) -> RunnerPhase {
        self.phase
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn player(&self) -> &PlayerKinematic {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Simulated seconds since the last start or retry.
    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn events(&self) -> &[RunnerEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<RunnerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Waiting → playing.
    pub fn start(&mut self) -> Result<(), PhaseError> {
        if self.phase != RunnerPhase::Waiting {
            return Err(PhaseError::InvalidTransition {
                action: "start",
                phase: self.phase,
            });
        }
        self.enter_playing();
        self.events.push(RunnerEvent::Started);
        info!("runner started");
        Ok(())
    }

    /// Crashed → playing.
    pub fn retry(&mut self) -> Result<(), PhaseError> {
        if self.phase != RunnerPhase::Crashed {
            return Err(PhaseError::InvalidTransition {
                action: "retry",
                phase: self.phase,
            });
        }
        self.enter_playing();
        self.events.push(RunnerEvent::Retried);
        info!("runner retried");
        Ok(())
    }

    fn enter_playing(&mut self) {
        self.phase = RunnerPhase::Playing;
        self.player = PlayerKinematic::grounded(self.config.ground_height);
        self.obstacles.clear();
        self.score = 0.0;
        self.clock = 0.0;
        self.last_spawn = 0.0;
    }

    /// Advance the world by `dt` seconds. A no-op unless playing.
    pub fn step(&mut self, dt: f32, input: &RunnerInput) {
        if self.phase != RunnerPhase::Playing || dt.is_nan() || dt <= 0.0 {
            return;
        }
        let _span = tracing::info_span!("runner_step").entered();

        if self.player.integrate(input, dt, &self.config) {
            debug!(lateral = self.player.lateral, "jump");
            self.events.push(RunnerEvent::Jumped);
        }

        self.clock += dt;
        if self.clock - self.last_spawn > self.config.spawn_interval {
            self.last_spawn = self.clock;
            self.spawn_obstacle();
        }

        let config = &self.config;
        let lateral = self.player.lateral;
        let mut hit = false;
        let mut removed = Vec::new();
        self.obstacles.retain_mut(|obs| {
            obs.depth += config.ground_speed * dt;
            if obs.depth.abs() < config.collision_depth
                && (obs.lateral - lateral).abs() < config.collision_lateral
            {
                hit = true;
            }
            if obs.depth >= config.despawn_depth {
                removed.push(obs.id);
                false
            } else {
                true
            }
        });
        for id in removed {
            trace!(id, "obstacle passed");
            self.events.push(RunnerEvent::Despawned { id });
        }

        if hit {
            self.phase = RunnerPhase::Crashed;
            self.events.push(RunnerEvent::Crashed { score: self.score });
            info!(score = self.score as u64, "runner crashed");
            return;
        }

        self.score += dt * self.config.score_rate;
        trace!(
            clock = self.clock,
            score = self.score,
            obstacles = self.obstacles.len(),
            "runner step complete"
        );
    }

    fn spawn_obstacle(&mut self) {
        let half = (self.config.lane_width - 2.0) / 2.0;
        let lateral = self.rng.range(-half, half);
        let id = self.next_obstacle;
        self.next_obstacle += 1;
        self.obstacles.push(Obstacle {
            id,
            lateral,
            depth: self.config.spawn_depth,
        });
        debug!(id, lateral, "obstacle spawned");
        self.events.push(RunnerEvent::Spawned { id, lateral });
    }
}
