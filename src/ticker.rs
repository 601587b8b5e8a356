use std::time::{Duration, Instant};

/// Fixed-period tick trigger. Time is always passed in, never read here.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
    cancelled: bool,
}

impl Ticker {
    pub fn start(interval: Duration, now: Instant) -> Self {
        Ticker { interval, next: now + interval, cancelled: false }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn due(&self, now: Instant) -> bool {
        !self.cancelled && now >= self.next
    }

    /// How long to wait for input before the next tick. `None` once cancelled.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        if self.cancelled {
            None
        } else {
            Some(self.next.saturating_duration_since(now))
        }
    }

    /// Consumes a due tick. A late tick schedules the next one a full
    /// interval from `now` instead of firing a burst to catch up.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.due(now) {
            return false;
        }

        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }

    pub fn restart(&mut self, now: Instant) {
        if !self.cancelled {
            self.next = now + self.interval;
        }
    }

    /// Returns true only for the call that actually stopped the ticker.
    pub fn cancel(&mut self) -> bool {
        !std::mem::replace(&mut self.cancelled, true)
    }
}
