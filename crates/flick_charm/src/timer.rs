//! Timer service
//!
//! The engine asks for a recurring tick while any surface is moving and
//! stops it as soon as none is. Hosts that own a real timer implement
//! [`TimerService`] over it; hosts that run their own frame loop can use
//! [`IntervalTimer`] and poll it once per frame. Like a platform timer, a
//! late poll fires once; intervals missed in between are merged.

use std::time::{Duration, Instant};

/// A recurring timer the engine can start and stop
pub trait TimerService {
    /// Start firing every `interval`. Starting a running timer is a no-op.
    fn start(&mut self, interval: Duration);

    /// Stop firing
    fn stop(&mut self);

    fn is_active(&self) -> bool;
}

/// Poll-driven interval timer
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: Duration,
    last_fire: Option<Instant>,
    /// Latest instant passed to [`poll`](Self::poll); `start` begins here
    clock: Option<Instant>,
    starts: u32,
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self {
            interval: Duration::ZERO,
            last_fire: None,
            clock: None,
            starts: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// How many times the timer went from stopped to running
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// Start at an explicit instant (for hosts with their own clock)
    pub fn start_at(&mut self, interval: Duration, now: Instant) {
        if self.last_fire.is_some() {
            return;
        }
        self.interval = interval;
        self.last_fire = Some(now);
        self.starts += 1;
    }

    /// Whether a tick is due at `now`
    ///
    /// Returns false while stopped. Several elapsed intervals still fire
    /// once, and the phase carries over so the cadence does not drift.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.clock = Some(self.clock.map_or(now, |clock| clock.max(now)));

        let Some(last) = self.last_fire else {
            return false;
        };
        if self.interval.is_zero() {
            return false;
        }

        let elapsed = now.saturating_duration_since(last);
        let missed = elapsed.as_nanos() / self.interval.as_nanos();
        if missed == 0 {
            return false;
        }
        let missed = u32::try_from(missed).unwrap_or(u32::MAX);
        let next = self
            .interval
            .checked_mul(missed)
            .and_then(|skipped| last.checked_add(skipped));
        self.last_fire = Some(next.unwrap_or(now));
        true
    }

    /// Time left until the next fire, if running
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        let last = self.last_fire?;
        let next = last + self.interval;
        Some(next.saturating_duration_since(now))
    }
}

impl TimerService for IntervalTimer {
    fn start(&mut self, interval: Duration) {
        let now = self.clock.unwrap_or_else(Instant::now);
        self.start_at(interval, now);
    }

    fn stop(&mut self) {
        self.last_fire = None;
    }

    fn is_active(&self) -> bool {
        self.last_fire.is_some()
    }
}
