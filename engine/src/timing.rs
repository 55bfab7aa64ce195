//! Deadlines, periodic timer handles and transient messages.
//!
//! Nothing in the engine reads the clock itself. Every time-dependent call
//! takes `now: Instant`, so the frame loop drives real time and tests drive
//! simulated time by passing `t0 + Duration`.

use std::time::{Duration, Instant};

use matter_config::TimingConfig;

pub const SIPHON_TICK_PERIOD: Duration = Duration::from_millis(30);
pub const WARNING_TTL: Duration = Duration::from_secs(3);
pub const COMPLETION_DELAY: Duration = Duration::from_secs(2);
pub const POUR_STREAM_DELAY: Duration = Duration::from_millis(600);
pub const POUR_DURATION: Duration = Duration::from_millis(1800);
pub const TOWER_DROP_ANIMATION: Duration = Duration::from_millis(500);
pub const GAS_SPREAD_DELAY: Duration = Duration::from_millis(100);
pub const GAS_OBSERVATION_DELAY: Duration = Duration::from_secs(2);

/// Upper bound on periods a single poll will replay. A frame stalled for
/// longer than this drops the backlog instead of freezing the UI.
pub const MAX_CATCH_UP_TICKS: u32 = 64;

/// Resolved timing values for one app instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub siphon_tick: Duration,
    pub warning_ttl: Duration,
    pub completion_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            siphon_tick: SIPHON_TICK_PERIOD,
            warning_ttl: WARNING_TTL,
            completion_delay: COMPLETION_DELAY,
        }
    }
}

impl Timings {
    #[must_use]
    pub fn from_config(config: &TimingConfig) -> Self {
        let defaults = Self::default();
        let ms = |field, value, fallback| {
            TimingConfig::positive(field, value).map_or(fallback, Duration::from_millis)
        };
        Self {
            siphon_tick: ms("siphon_tick_ms", config.siphon_tick_ms, defaults.siphon_tick),
            warning_ttl: ms("warning_ms", config.warning_ms, defaults.warning_ttl),
            completion_delay: ms(
                "completion_delay_ms",
                config.completion_delay_ms,
                defaults.completion_delay,
            ),
        }
    }
}

/// A one-shot point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Instant);

impl Deadline {
    #[must_use]
    pub fn after(now: Instant, delay: Duration) -> Self {
        Self(now + delay)
    }

    #[must_use]
    pub fn is_due(self, now: Instant) -> bool {
        now >= self.0
    }

    #[must_use]
    pub fn at(self) -> Instant {
        self.0
    }
}

/// Handle for a periodic timer.
///
/// Owning a `FlowTimer` is what "the timer is armed" means: dropping it (or
/// replacing the `Option` holding it with `None`) cancels it. There is no
/// detached callback that could outlive the state it mutates.
#[derive(Debug)]
pub struct FlowTimer {
    period: Duration,
    next_due: Instant,
}

impl FlowTimer {
    #[must_use]
    pub fn arm(now: Instant, period: Duration) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Number of whole periods that elapsed up to `now`, consuming them.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;
        while now >= self.next_due && ticks < MAX_CATCH_UP_TICKS {
            ticks += 1;
            self.next_due += self.period;
        }
        if ticks == MAX_CATCH_UP_TICKS && now >= self.next_due {
            tracing::debug!(period = ?self.period, "Timer backlog dropped");
            self.next_due = now + self.period;
        }
        ticks
    }
}

/// A value that is only visible until its expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transient<T> {
    value: T,
    expires: Deadline,
}

impl<T> Transient<T> {
    #[must_use]
    pub fn new(value: T, now: Instant, ttl: Duration) -> Self {
        Self {
            value,
            expires: Deadline::after(now, ttl),
        }
    }

    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires.is_due(now)
    }

    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }
}
