// ============================================
// TIMING UTILITY
// ============================================
// Usage:
//   1. let result = timed("filter", || { /* code */ });
//   2. let result = timed_async("fetch", || async { /* code */ }).await;
//   3. let timer = Timer::start("name"); ... timer.stop();
// ============================================

use colored::Colorize;
use std::time::{Duration, Instant};
use tracing::info;

/// Logs the time between `start` and `stop` (or drop)
pub struct Timer {
    name: String,
    start: Instant,
    stopped: bool,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            stopped: false,
        }
    }

    /// Stop the timer and log the result
    pub fn stop(mut self) -> Duration {
        let duration = self.start.elapsed();
        self.log_duration(duration);
        self.stopped = true;
        duration
    }

    fn log_duration(&self, duration: Duration) {
        let ms = duration.as_millis();
        let label = Self::speed_label(ms);

        if ms < 1000 {
            info!(operation = %self.name, elapsed_ms = ms as u64, "{} {}ms", label, ms);
        } else {
            info!(operation = %self.name, elapsed_ms = ms as u64, "{} {:.2}s", label, duration.as_secs_f64());
        }
    }

    fn speed_label(ms: u128) -> &'static str {
        match ms {
            0..=100 => "fast",
            101..=1000 => "ok",
            1001..=5000 => "slow",
            _ => "very slow",
        }
    }

    /// Time a synchronous closure
    pub fn measure<F, R>(name: impl Into<String>, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let timer = Self::start(name);
        let result = f();
        timer.stop();
        result
    }

    /// Time an async function
    pub async fn measure_async<F, Fut, R>(name: impl Into<String>, f: F) -> R
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = R>,
    {
        let timer = Self::start(name);
        let result = f().await;
        timer.stop();
        result
    }

    /// Print a section banner for grouping console output
    pub fn section(name: impl Into<String>) {
        let name = name.into();
        println!("{}", "=".repeat(60).blue());
        println!("{}", name.green().bold());
        println!("{}", "=".repeat(60).blue());
        println!();
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.stopped {
            self.log_duration(self.start.elapsed());
        }
    }
}

/// Time a synchronous closure (shorthand)
pub fn timed<F, R>(name: impl Into<String>, f: F) -> R
where
    F: FnOnce() -> R,
{
    Timer::measure(name, f)
}

/// Time an async function (shorthand)
pub async fn timed_async<F, Fut, R>(name: impl Into<String>, f: F) -> R
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = R>,
{
    Timer::measure_async(name, f).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_returns_closure_value() {
        let value = timed("sum", || (1..=10).sum::<u32>());
        assert_eq!(value, 55);
    }

    #[test]
    fn test_speed_labels() {
        assert_eq!(Timer::speed_label(5), "fast");
        assert_eq!(Timer::speed_label(500), "ok");
        assert_eq!(Timer::speed_label(2500), "slow");
        assert_eq!(Timer::speed_label(60_000), "very slow");
    }

    #[tokio::test]
    async fn test_timed_async_measures_sleep() {
        let started = Instant::now();
        let value = timed_async("sleep", || async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            7
        })
        .await;
        assert_eq!(value, 7);
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
