use serde::{Deserialize, Serialize};

use crate::runner::RunnerConfig;

/// Per-tick control input for the runner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunnerInput {
    /// Lateral position the player eases toward.
    pub lateral_target: f32,
    /// Level-triggered jump intent.
    pub jump: bool,
}

/// The player's kinematic state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerKinematic {
    pub lateral: f32,
    pub vertical: f32,
    pub vertical_velocity: f32,
    pub airborne: bool,
}

impl PlayerKinematic {
    /// Centred and standing on the ground.
    pub fn grounded(ground_height: f32) -> Self {
        Self {
            lateral: 0.0,
            vertical: ground_height,
            vertical_velocity: 0.0,
            airborne: false,
        }
    }

    /// Advance by `dt` seconds. Returns true if a jump impulse was applied.
    ///
    /// The impulse only applies on the ground, so a held jump intent does
    /// not re-trigger mid-air.
    pub fn integrate(&mut self, input: &RunnerInput, dt: f32, config: &RunnerConfig) -> bool {
        self.lateral += (input.lateral_target - self.lateral) * config.lateral_gain * dt;

        let jumped = input.jump && !self.airborne;
        if jumped {
            self.vertical_velocity = config.jump_force;
            self.airborne = true;
        }

        self.vertical_velocity -= config.gravity * dt;
        self.vertical += self.vertical_velocity * dt;

        if self.vertical <= config.ground_height {
            self.vertical = config.ground_height;
            self.vertical_velocity = 0.0;
            self.airborne = false;
        }
        jumped
    }
}
