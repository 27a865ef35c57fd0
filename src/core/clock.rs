use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic wall-clock instants for playback
pub trait TimeSource {
    fn now(&self) -> Instant;
}

/// Real monotonic clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock - clones share the same timeline
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create clock frozen at the current instant
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    /// Move time forward by milliseconds
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Total time advanced since creation
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        thread::sleep(Duration::from_millis(5));
        let b = clock.now();

        assert!(b > a);
        assert!(b.duration_since(a) >= Duration::from_millis(5));
    }

    #[test]
    fn manual_clock_only_moves_when_advanced() {
        let clock = ManualClock::new();
        let start = clock.now();

        thread::sleep(Duration::from_millis(5));
        assert_eq!(clock.now(), start);

        clock.advance_ms(250);
        assert_eq!(clock.now().duration_since(start), Duration::from_millis(250));
    }

    #[test]
    fn manual_clock_clones_share_timeline() {
        let clock = ManualClock::new();
        let handle = clock.clone();

        handle.advance_ms(100);
        assert_eq!(clock.elapsed(), Duration::from_millis(100));
        assert_eq!(clock.now(), handle.now());
    }
}
