mod script;

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use gesturespace_control::{Action, ControlMode, EngineConfig, Outbox, Session, TracingAudio};
use gesturespace_input::pose::HandPose;
use gesturespace_input::{Classifier, FingerMask, LandmarkSnapshot, ScriptedSource, TrackerLease};
use gesturespace_kernel::RunnerPhase;
use gesturespace_tools::{SessionInspector, SessionSummary};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gesturespace-cli", about = "Headless host for the gesture engine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Engine configuration (JSON); missing fields keep their defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// RNG seed for obstacle placement and recolor picks
    #[arg(short, long, global = true, default_value = "42")]
    seed: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the effective configuration
    Info,
    /// Classify one landmark snapshot
    Classify {
        /// JSON array of 21 [x, y, z] points
        #[arg(short, long, conflicts_with = "mask")]
        file: Option<PathBuf>,
        /// Synthesize a hand from a 5-bit extended-finger mask (bit 0 = thumb)
        #[arg(short, long)]
        mask: Option<u8>,
    },
    /// Run a scripted session twice at a fixed frame step and compare
    Replay {
        #[arg(short, long, value_enum, default_value = "creative")]
        mode: Mode,
        /// Simulated frame rate
        #[arg(long, default_value = "60")]
        fps: u32,
    },
    /// Feed the scripted session through a threaded landmark source in real time
    Live {
        #[arg(short, long, value_enum, default_value = "runner")]
        mode: Mode,
        /// Wall-clock run time in milliseconds
        #[arg(long, default_value = "3000")]
        millis: u64,
        /// Landmark source cadence in milliseconds
        #[arg(long, default_value = "33")]
        cadence: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Creative,
    Runner,
}

impl From<Mode> for ControlMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Creative => ControlMode::Creative,
            Mode::Runner => ControlMode::Runner,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("gesturespace-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("seed: {}", cli.seed);
            println!("{}", config.to_json()?);
        }
        Commands::Classify { file, mask } => {
            let snapshot = match (file, mask) {
                (Some(path), _) => {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    let snapshot: LandmarkSnapshot = serde_json::from_str(&text)
                        .with_context(|| format!("parsing {}", path.display()))?;
                    if !snapshot.is_complete() {
                        warn!(joints = snapshot.len(), "partial snapshot");
                    }
                    snapshot
                }
                (None, Some(bits)) => HandPose::new(FingerMask::from_bits(bits)).snapshot(),
                (None, None) => bail!("pass --file or --mask"),
            };
            let classifier = Classifier::new(config.input.classifier.clone());
            let gesture = classifier.classify(Some(&snapshot));
            if snapshot.is_complete() {
                println!("fingers: {}", classifier.extended_fingers(&snapshot));
            }
            println!("gesture: {gesture}");
        }
        Commands::Replay { mode, fps } => {
            if fps == 0 {
                bail!("--fps must be positive");
            }
            let mode = ControlMode::from(mode);
            let dt = 1.0 / fps as f32;
            println!("Deterministic replay: mode={mode}, seed={}, fps={fps}", cli.seed);

            let (first, first_log) = replay(&config, cli.seed, mode, dt)?;
            let (second, second_log) = replay(&config, cli.seed, mode, dt)?;

            println!("Run 1: {first}");
            println!("Run 2: {second}");
            println!("Actions: {}", first_log.len());
            let same = first_log == second_log
                && first.score == second.score
                && first.object_count == second.object_count;
            println!("Match: {}", if same { "OK" } else { "MISMATCH" });
            if !same {
                bail!("replay diverged");
            }
        }
        Commands::Live {
            mode,
            millis,
            cadence,
        } => live(&config, cli.seed, mode.into(), millis, cadence)?,
    }

    Ok(())
}

/// One scripted run at a fixed step. Returns the final summary and an
/// id-free description of every action, for comparing runs.
fn replay(
    config: &EngineConfig,
    seed: u64,
    mode: ControlMode,
    dt: f32,
) -> anyhow::Result<(SessionSummary, Vec<String>)> {
    let (mut pipeline, mut session) = Session::from_config(config, seed, Box::new(TracingAudio));
    session.set_mode(mode);
    if mode == ControlMode::Runner {
        session.dispatcher_mut().runner_mut().start()?;
    }

    let mut log = Vec::new();
    let mut scene_events = 0usize;
    for (i, frame) in script::frames_for(mode).into_iter().enumerate() {
        pipeline.ingest_at(frame, Duration::from_secs_f32(i as f32 * dt));
        session.tick(dt);
        retry_if_crashed(&mut session)?;
        log.extend(report(session.take_outbox()));
        scene_events += session.drain_scene_events().len();
    }
    debug!(scene_events, "replay finished");
    Ok((SessionInspector::summary(&session), log))
}

fn live(
    config: &EngineConfig,
    seed: u64,
    mode: ControlMode,
    millis: u64,
    cadence: u64,
) -> anyhow::Result<()> {
    let (pipeline, mut session) = Session::from_config(config, seed, Box::new(TracingAudio));
    session.set_mode(mode);
    if mode == ControlMode::Runner {
        session.dispatcher_mut().runner_mut().start()?;
    }

    let source =
        ScriptedSource::new(script::frames_for(mode), Duration::from_millis(cadence)).looping();
    let mut lease = TrackerLease::acquire(source, pipeline);
    session.set_tracker_status(lease.status().clone());
    info!(mode = %mode, millis, "live session started");

    let frame = Duration::from_secs_f64(1.0 / 60.0);
    let deadline = Instant::now() + Duration::from_millis(millis);
    let mut last = Instant::now();
    let mut actions = 0usize;
    let mut scene_events = 0usize;
    while Instant::now() < deadline {
        thread::sleep(frame);
        let now = Instant::now();
        session.tick((now - last).as_secs_f32());
        last = now;
        retry_if_crashed(&mut session)?;
        actions += report(session.take_outbox()).len();
        scene_events += session.drain_scene_events().len();
    }

    lease.release();
    session.set_tracker_status(lease.status().clone());
    println!("Frames delivered: {}", lease.source().delivered());
    println!("Actions: {actions}");
    println!("Scene events: {scene_events}");
    println!("{}", SessionInspector::summary(&session));
    Ok(())
}

fn retry_if_crashed(session: &mut Session) -> anyhow::Result<()> {
    let runner = session.dispatcher_mut().runner_mut();
    if runner.runner().phase() == RunnerPhase::Crashed {
        info!(score = runner.runner().score() as u64, "crashed; retrying");
        runner.retry()?;
    }
    Ok(())
}

/// Log an outbox and describe its actions without object ids.
fn report(outbox: Outbox) -> Vec<String> {
    for notice in &outbox.notices {
        warn!(%notice, "engine notice");
    }
    outbox
        .actions
        .iter()
        .map(|action| {
            let line = describe(action);
            debug!(action = %line, "engine action");
            line
        })
        .collect()
}

fn describe(action: &Action) -> String {
    match action {
        Action::Create { shape, .. } => format!("create {shape}"),
        Action::Recolor { color, .. } => format!("recolor {color}"),
        Action::Move { position, .. } => {
            format!("move ({:.3}, {:.3}, {:.3})", position.x, position.y, position.z)
        }
        Action::Rotate { rotation, .. } => format!(
            "rotate ({:.3}, {:.3}, {:.3}, {:.3})",
            rotation.x, rotation.y, rotation.z, rotation.w
        ),
        Action::Scale { scale, .. } => {
            format!("scale ({:.3}, {:.3}, {:.3})", scale.x, scale.y, scale.z)
        }
        Action::Start => "start".to_string(),
        Action::Retry => "retry".to_string(),
        Action::Jump => "jump".to_string(),
        Action::Crash { score } => format!("crash {score:.1}"),
    }
}
