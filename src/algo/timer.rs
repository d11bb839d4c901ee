use anyhow::{Context, Result};
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::info;

/// Background job that can be started through an [`AlgorithmRunner`]
pub trait Algorithm: Send + Sync + 'static {
    fn name(&self) -> &str;

    /// Do the work. Should return once `ctx.is_running()` turns false.
    fn run(&self, ctx: RunContext) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Default)]
struct RunState {
    running: AtomicBool,
    // bumped on every start so a stopped run cannot observe a newer one
    generation: AtomicU64,
    started_at: Mutex<Option<Instant>>,
}

impl RunState {
    fn started_at(&self) -> Option<Instant> {
        *self.started_at.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_started_at(&self, at: Instant) {
        *self.started_at.lock().unwrap_or_else(|e| e.into_inner()) = Some(at);
    }
}

/// Handle given to a running algorithm
#[derive(Debug, Clone)]
pub struct RunContext {
    state: Arc<RunState>,
    generation: u64,
}

impl RunContext {
    pub fn is_running(&self) -> bool {
        self.state.running.load(Ordering::Acquire)
            && self.state.generation.load(Ordering::Acquire) == self.generation
    }

    pub fn elapsed(&self) -> Duration {
        self.state
            .started_at()
            .map(|at| at.elapsed())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

impl StartOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            StartOutcome::Started => "Algorithm started.",
            StartOutcome::AlreadyRunning => "Algorithm is already running.",
        }
    }
}

/// Owns an algorithm and its running flag. Jobs are fire and forget.
pub struct AlgorithmRunner<A: Algorithm> {
    algorithm: Arc<A>,
    state: Arc<RunState>,
}

impl<A: Algorithm> AlgorithmRunner<A> {
    pub fn new(algorithm: A) -> Self {
        Self {
            algorithm: Arc::new(algorithm),
            state: Arc::new(RunState::default()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.running.load(Ordering::Acquire)
    }

    /// Spawn the algorithm unless it is already running.
    /// Fails only when called outside a tokio runtime.
    pub fn start(&self) -> Result<StartOutcome> {
        let handle = tokio::runtime::Handle::try_current()
            .context("No async runtime available to start the algorithm")?;

        if self
            .state
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(StartOutcome::AlreadyRunning);
        }

        self.state.set_started_at(Instant::now());
        let generation = self.state.generation.fetch_add(1, Ordering::AcqRel) + 1;

        let algorithm = Arc::clone(&self.algorithm);
        let ctx = RunContext {
            state: Arc::clone(&self.state),
            generation,
        };
        handle.spawn(async move {
            algorithm.run(ctx.clone()).await;
            if ctx.state.generation.load(Ordering::Acquire) == generation {
                ctx.state.running.store(false, Ordering::Release);
            }
        });

        info!(algorithm = self.algorithm.name(), "Algorithm started");
        Ok(StartOutcome::Started)
    }

    /// Ask a running algorithm to finish early
    pub fn stop(&self) {
        self.state.running.store(false, Ordering::Release);
    }
}

/// Logs a heartbeat every `tick` until `run_duration` has elapsed
#[derive(Debug, Clone)]
pub struct TimerAlgorithm {
    run_duration: Duration,
    tick: Duration,
}

impl TimerAlgorithm {
    pub fn new(run_duration: Duration, tick: Duration) -> Self {
        Self { run_duration, tick }
    }

    pub fn run_duration(&self) -> Duration {
        self.run_duration
    }
}

impl Algorithm for TimerAlgorithm {
    fn name(&self) -> &str {
        "TimerAlgorithm"
    }

    async fn run(&self, ctx: RunContext) {
        info!("TimerAlgorithm started.");
        while ctx.is_running() && ctx.elapsed() < self.run_duration {
            info!(elapsed_secs = ctx.elapsed().as_secs(), "TimerAlgorithm is running...");
            tokio::time::sleep(self.tick).await;
        }
        info!("TimerAlgorithm stopped.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_timer() -> AlgorithmRunner<TimerAlgorithm> {
        AlgorithmRunner::new(TimerAlgorithm::new(
            Duration::from_millis(60),
            Duration::from_millis(10),
        ))
    }

    #[tokio::test]
    async fn test_start_is_idempotent_while_running() {
        let runner = short_timer();
        assert_eq!(runner.start().unwrap(), StartOutcome::Started);
        assert!(runner.is_running());
        assert_eq!(runner.start().unwrap(), StartOutcome::AlreadyRunning);
    }

    #[tokio::test]
    async fn test_timer_finishes_and_can_restart() {
        let runner = short_timer();
        runner.start().unwrap();

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(!runner.is_running());
        assert_eq!(runner.start().unwrap(), StartOutcome::Started);
    }

    #[tokio::test]
    async fn test_stop_ends_run_early() {
        let runner = AlgorithmRunner::new(TimerAlgorithm::new(
            Duration::from_secs(600),
            Duration::from_millis(10),
        ));
        runner.start().unwrap();
        runner.stop();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!runner.is_running());
        assert_eq!(runner.start().unwrap(), StartOutcome::Started);
    }

    #[tokio::test]
    async fn test_restart_after_stop_supersedes_old_run() {
        let runner = AlgorithmRunner::new(TimerAlgorithm::new(
            Duration::from_secs(600),
            Duration::from_millis(20),
        ));
        runner.start().unwrap();
        runner.stop();
        assert_eq!(runner.start().unwrap(), StartOutcome::Started);

        // the first run winds down without clearing the second run's flag
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(runner.is_running());
        runner.stop();
    }

    #[test]
    fn test_start_outside_runtime_fails() {
        let runner = short_timer();
        assert!(runner.start().is_err());
        assert!(!runner.is_running());
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(StartOutcome::Started.message(), "Algorithm started.");
        assert_eq!(
            StartOutcome::AlreadyRunning.message(),
            "Algorithm is already running."
        );
    }
}
