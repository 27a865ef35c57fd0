use std::time::{Duration, Instant};

/// Default refresh cadence while playing
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(100);

/// Recurring refresh timer - fires at a fixed cadence while it exists
///
/// The timer is an owned resource: holding one means playback is being
/// refreshed, dropping it cancels every future fire. There is no separate
/// cancel handle that could outlive its owner.
#[derive(Debug)]
pub struct RefreshTimer {
    interval: Duration,
    next_due: Instant,
    fired: u64,
}

impl RefreshTimer {
    /// Acquire a timer whose first fire is one interval after `now`
    pub fn start(interval: Duration, now: Instant) -> Self {
        log::debug!("refresh timer acquired ({} ms)", interval.as_millis());
        Self {
            interval,
            next_due: now + interval,
            fired: 0,
        }
    }

    /// Returns true at most once per call when the timer is due
    ///
    /// The next fire is scheduled one interval after `now`, so a stalled
    /// event loop does not produce a burst of catch-up fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval;
        self.fired += 1;
        true
    }

    /// Time left until the next fire (zero when overdue)
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of times the timer has fired
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        log::debug!("refresh timer released after {} fires", self.fired);
    }
}
