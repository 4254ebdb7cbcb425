//! Fire-and-forget audio cues. Nothing here returns an error to the engine.

use std::sync::{Arc, Mutex};

use tracing::debug;

/// Sink for the runner's sound effects and background music.
pub trait AudioCues: Send {
    fn play_jump(&mut self);
    fn play_score(&mut self);
    fn play_game_over(&mut self);
    fn play_bgm(&mut self);
    fn stop_bgm(&mut self);
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioCues for SilentAudio {
    fn play_jump(&mut self) {}
    fn play_score(&mut self) {}
    fn play_game_over(&mut self) {}
    fn play_bgm(&mut self) {}
    fn stop_bgm(&mut self) {}
}

/// Logs each cue at debug level. Used by headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAudio;

impl AudioCues for TracingAudio {
    fn play_jump(&mut self) {
        debug!(cue = "jump", "audio");
    }
    fn play_score(&mut self) {
        debug!(cue = "score", "audio");
    }
    fn play_game_over(&mut self) {
        debug!(cue = "game_over", "audio");
    }
    fn play_bgm(&mut self) {
        debug!(cue = "bgm_start", "audio");
    }
    fn stop_bgm(&mut self) {
        debug!(cue = "bgm_stop", "audio");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Jump,
    Score,
    GameOver,
    BgmStart,
    BgmStop,
}

/// Records cues into a shared list. Clones share the same list, so a host
/// can keep one handle and give the other to the engine.
#[derive(Debug, Clone, Default)]
pub struct CueLog {
    cues: Arc<Mutex<Vec<Cue>>>,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    pub fn cues(&self) -> Vec<Cue> {
        self.cues.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut cues) = self.cues.lock() {
            cues.clear();
        }
    }

    fn record(&self, cue: Cue) {
        if let Ok(mut cues) = self.cues.lock() {
            cues.push(cue);
        }
    }
}

impl AudioCues for CueLog {
    fn play_jump(&mut self) {
        self.record(Cue::Jump);
    }
    fn play_score(&mut self) {
        self.record(Cue::Score);
    }
    fn play_game_over(&mut self) {
        self.record(Cue::GameOver);
    }
    fn play_bgm(&mut self) {
        self.record(Cue::BgmStart);
    }
    fn stop_bgm(&mut self) {
        self.record(Cue::BgmStop);
    }
}
