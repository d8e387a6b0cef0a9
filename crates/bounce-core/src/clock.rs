use std::time::{Duration, Instant};

/// A source of "now", measured from an arbitrary fixed origin.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// Wall-clock source backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Start/stop/reset-able elapsed-time source.
///
/// Pausing keeps the elapsed time; a later `start()` rebases the start
/// epoch so counting resumes from where it stopped.
#[derive(Debug, Clone)]
pub struct Clock<T: TimeSource = MonotonicTime> {
    source: T,
    running: bool,
    start_epoch: Duration,
    stop_epoch: Duration,
}

impl Clock<MonotonicTime> {
    pub fn new() -> Self {
        Self::with_source(MonotonicTime::new())
    }
}

impl Default for Clock<MonotonicTime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> Clock<T> {
    /// A stopped clock with zero elapsed time.
    pub fn with_source(source: T) -> Self {
        let now = source.now();
        Self {
            source,
            running: false,
            start_epoch: now,
            stop_epoch: now,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed time in seconds.
    pub fn elapsed(&self) -> f64 {
        let end = if self.running {
            self.source.now()
        } else {
            self.stop_epoch
        };
        end.saturating_sub(self.start_epoch).as_secs_f64()
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        let held = self.stop_epoch.saturating_sub(self.start_epoch);
        self.start_epoch = self.source.now().saturating_sub(held);
        self.running = true;
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.stop_epoch = self.source.now();
        self.running = false;
    }

    /// Zero the elapsed time and stop.
    pub fn reset(&mut self) {
        let now = self.source.now();
        self.running = false;
        self.start_epoch = now;
        self.stop_epoch = now;
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub use manual::ManualTime;

#[cfg(any(test, feature = "test-helpers"))]
mod manual {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;

    use super::TimeSource;

    /// Hand-driven time source. Clones share the same counter, so a test
    /// can keep one handle and advance the time seen by a clock it gave away.
    #[derive(Debug, Clone, Default)]
    pub struct ManualTime {
        nanos: Arc<AtomicU64>,
    }

    impl ManualTime {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn advance(&self, by: Duration) {
            self.nanos.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
        }

        pub fn advance_secs(&self, secs: f64) {
            self.advance(Duration::from_secs_f64(secs));
        }
    }

    impl TimeSource for ManualTime {
        fn now(&self) -> Duration {
            Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
        }
    }
}
