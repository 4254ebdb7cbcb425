//! Landmark producers and their lifetime.
//!
//! A [`LandmarkSource`] invokes a registered callback at its own cadence with
//! zero or one hand per result. [`TrackerLease`] binds a source to a
//! [`HandPipeline`] for the controller's lifetime and stops it on drop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{info, warn};

use crate::landmark::LandmarkSnapshot;
use crate::pipeline::HandPipeline;

/// Callback receiving one inference result.
pub type LandmarkCallback = Box<dyn FnMut(Option<LandmarkSnapshot>) + Send + 'static>;

/// Errors from starting a landmark producer.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("landmark source started before initialize")]
    NotInitialized,
    #[error("capture unavailable: {0}")]
    Unavailable(String),
    #[error("capture permission denied: {0}")]
    PermissionDenied(String),
}

/// An external producer of landmark snapshots.
///
/// `start` and `stop` are idempotent and may be called in either order.
/// Once `stop` returns, the callback must not fire again.
pub trait LandmarkSource: Send {
    fn initialize(&mut self, on_results: LandmarkCallback) -> Result<(), SourceError>;
    fn start(&mut self) -> Result<(), SourceError>;
    fn stop(&mut self);
}

/// Observable state of the landmark producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerStatus {
    Running,
    Stopped,
    /// Start failed; the engine runs on with a centred cursor and no gesture.
    Degraded(String),
}

impl std::fmt::Display for TrackerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => f.write_str("running"),
            Self::Stopped => f.write_str("stopped"),
            Self::Degraded(reason) => write!(f, "degraded ({reason})"),
        }
    }
}

/// Owns a started source for the controller's lifetime.
pub struct TrackerLease<S: LandmarkSource> {
    source: S,
    status: TrackerStatus,
}

impl<S: LandmarkSource> TrackerLease<S> {
    /// Register `pipeline` as the source's callback and start it. Failure
    /// is recorded, never propagated.
    pub fn acquire(mut source: S, mut pipeline: HandPipeline) -> Self {
        let callback: LandmarkCallback = Box::new(move |snapshot| {
            pipeline.ingest(snapshot);
        });
        let status = match source.initialize(callback).and_then(|()| source.start()) {
            Ok(()) => {
                info!("landmark source started");
                TrackerStatus::Running
            }
            Err(err) => {
                warn!(%err, "landmark source unavailable; continuing without hand input");
                TrackerStatus::Degraded(err.to_string())
            }
        };
        Self { source, status }
    }

    pub fn status(&self) -> &TrackerStatus {
        &self.status
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Stop the source now. Safe to call repeatedly.
    pub fn release(&mut self) {
        self.source.stop();
        if self.status == TrackerStatus::Running {
            info!("landmark source stopped");
            self.status = TrackerStatus::Stopped;
        }
    }
}

impl<S: LandmarkSource> Drop for TrackerLease<S> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Replays recorded results on a worker thread at a fixed cadence.
pub struct ScriptedSource {
    frames: Arc<Vec<Option<LandmarkSnapshot>>>,
    cadence: Duration,
    looping: bool,
    callback: Option<LandmarkCallback>,
    running: Arc<AtomicBool>,
    delivered: Arc<AtomicUsize>,
    worker: Option<JoinHandle<LandmarkCallback>>,
}

impl ScriptedSource {
    pub fn new(frames: Vec<Option<LandmarkSnapshot>>, cadence: Duration) -> Self {
        Self {
            frames: Arc::new(frames),
            cadence,
            looping: false,
            callback: None,
            running: Arc::new(AtomicBool::new(false)),
            delivered: Arc::new(AtomicUsize::new(0)),
            worker: None,
        }
    }

    /// Restart from the first frame after the last one instead of finishing.
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Results handed to the callback so far.
    pub fn delivered(&self) -> usize {
        self.delivered.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }
}

impl LandmarkSource for ScriptedSource {
    fn initialize(&mut self, on_results: LandmarkCallback) -> Result<(), SourceError> {
        self.stop();
        self.callback = Some(on_results);
        Ok(())
    }

    fn start(&mut self) -> Result<(), SourceError> {
        match &self.worker {
            Some(worker) if !worker.is_finished() => return Ok(()),
            // Played out on its own; reclaim the callback before restarting.
            Some(_) => self.join_worker(),
            None => {}
        }
        if self.frames.is_empty() {
            return Err(SourceError::Unavailable("no recorded frames".into()));
        }
        let mut callback = self.callback.take().ok_or(SourceError::NotInitialized)?;

        self.running.store(true, Ordering::Release);
        let running = Arc::clone(&self.running);
        let delivered = Arc::clone(&self.delivered);
        let frames = Arc::clone(&self.frames);
        let cadence = self.cadence;
        let looping = self.looping;

        let worker = thread::Builder::new()
            .name("landmark-source".into())
            .spawn(move || {
                let mut i = 0;
                while running.load(Ordering::Acquire) {
                    if i == frames.len() {
                        if !looping {
                            break;
                        }
                        i = 0;
                    }
                    callback(frames[i].clone());
                    delivered.fetch_add(1, Ordering::AcqRel);
                    i += 1;
                    thread::park_timeout(cadence);
                }
                callback
            })
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        self.worker = Some(worker);
        Ok(())
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        self.join_worker();
    }
}

impl ScriptedSource {
    /// Wait for the worker to exit and take back the callback it owned.
    fn join_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.thread().unpark();
            match worker.join() {
                Ok(callback) => self.callback = Some(callback),
                Err(_) => warn!("landmark source worker panicked"),
            }
        }
    }
}

impl Drop for ScriptedSource {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{FingerMask, Gesture};
    use crate::pipeline::{InputConfig, hand_channel};
    use crate::pose::HandPose;
    use std::sync::Mutex;

    fn frames(n: usize) -> Vec<Option<LandmarkSnapshot>> {
        (0..n)
            .map(|_| Some(HandPose::new(FingerMask::ALL).snapshot()))
            .collect()
    }

    #[test]
    fn start_before_initialize_fails() {
        let mut src = ScriptedSource::new(frames(1), Duration::from_millis(1));
        assert_eq!(src.start(), Err(SourceError::NotInitialized));
    }

    #[test]
    fn stop_before_start_is_harmless() {
        let mut src = ScriptedSource::new(frames(1), Duration::from_millis(1));
        src.stop();
        src.stop();
        assert!(!src.is_running());
    }

    #[test]
    fn delivers_every_frame_then_finishes() {
        let seen = Arc::new(Mutex::new(0usize));
        let mut src = ScriptedSource::new(frames(5), Duration::from_millis(1));
        let counter = Arc::clone(&seen);
        src.initialize(Box::new(move |_| *counter.lock().unwrap() += 1))
            .unwrap();
        src.start().unwrap();
        while src.is_running() {
            thread::sleep(Duration::from_millis(1));
        }
        src.stop();
        assert_eq!(*seen.lock().unwrap(), 5);
        assert_eq!(src.delivered(), 5);
    }

    #[test]
    fn no_callbacks_after_stop_returns() {
        let seen = Arc::new(AtomicUsize::new(0));
        let mut src = ScriptedSource::new(frames(3), Duration::from_millis(1)).looping();
        let counter = Arc::clone(&seen);
        src.initialize(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();
        src.start().unwrap();
        src.start().unwrap();
        thread::sleep(Duration::from_millis(20));
        src.stop();
        let at_stop = seen.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(seen.load(Ordering::SeqCst), at_stop);
        assert!(at_stop > 0);
    }

    #[test]
    fn restart_after_stop_reuses_callback() {
        let mut src = ScriptedSource::new(frames(2), Duration::from_millis(1));
        src.initialize(Box::new(|_| {})).unwrap();
        src.start().unwrap();
        src.stop();
        assert!(src.start().is_ok());
        src.stop();
    }

    #[test]
    fn restart_after_playing_out() {
        let seen = Arc::new(AtomicUsize::new(0));
        let mut src = ScriptedSource::new(frames(2), Duration::from_millis(1));
        let counter = Arc::clone(&seen);
        src.initialize(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();
        src.start().unwrap();
        while src.is_running() {
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(src.delivered(), 2);

        // No stop in between: start alone replays the frames.
        src.start().unwrap();
        while src.is_running() {
            thread::sleep(Duration::from_millis(1));
        }
        src.stop();
        assert_eq!(src.delivered(), 4);
        assert_eq!(seen.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn lease_feeds_pipeline() {
        let (pipe, reader) = hand_channel(&InputConfig::default());
        let src = ScriptedSource::new(frames(4), Duration::from_millis(1));
        let mut lease = TrackerLease::acquire(src, pipe);
        assert_eq!(lease.status(), &TrackerStatus::Running);
        while lease.source().is_running() {
            thread::sleep(Duration::from_millis(1));
        }
        lease.release();
        assert_eq!(lease.status(), &TrackerStatus::Stopped);
        assert_eq!(reader.latest().gesture, Gesture::OpenPalm);
        assert_eq!(reader.drain_edges().len(), 1);
    }

    #[test]
    fn lease_degrades_on_start_failure() {
        let (pipe, reader) = hand_channel(&InputConfig::default());
        let src = ScriptedSource::new(Vec::new(), Duration::from_millis(1));
        let lease = TrackerLease::acquire(src, pipe);
        assert!(matches!(lease.status(), TrackerStatus::Degraded(_)));
        let s = reader.latest();
        assert_eq!(s.gesture, Gesture::None);
        assert_eq!(s.position, glam::Vec2::ZERO);
    }
}
