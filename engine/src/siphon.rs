//! Siphon transfer between two coupled reservoirs.
//!
//! [`SiphonState`] is the pure model: two fill levels and a flow flag.
//! [`SiphonSimulator`] owns one state together with its flow timer and the
//! transient warning, which is everything that has to be discarded when the
//! liquid changes.
//!
//! # Invariants
//!
//! - Both levels stay within `0.0..=100.0`.
//! - While active the source never rises and the sink never falls.
//! - Flow stops on the same tick that either bound is reached. The two rates
//!   differ (the sink is a wider vessel), so the bounds are generally not
//!   reached together and either one alone stops the flow.

use std::time::Instant;

use thiserror::Error;

use matter_types::Liquid;

use crate::timing::{FlowTimer, Timings, Transient};

pub const FULL: f64 = 100.0;
pub const EMPTY: f64 = 0.0;
/// Volume drained from the source per tick.
pub const DRAIN_STEP: f64 = 0.5;
/// Sink units gained per source unit drained.
pub const TRANSFER_RATIO: f64 = 0.75;
pub const FILL_STEP: f64 = DRAIN_STEP * TRANSFER_RATIO;

/// `start_flow` refuses at or below this source level.
const START_MIN_SOURCE: f64 = 1.0;
/// `start_flow` refuses at or above this sink level.
const START_MAX_SINK: f64 = 99.0;
/// `refill` refuses above this source level.
const REFILL_MAX_SOURCE: f64 = 95.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SiphonError {
    #[error("The cylinder is empty!")]
    EmptySource,
    #[error("The bowl is already full!")]
    SinkFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RefillError {
    #[error("cannot refill while the liquid is flowing")]
    Flowing,
    #[error("the cylinder is already full")]
    AlreadyFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    SourceEmpty,
    SinkFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not flowing; nothing changed.
    Idle,
    Flowing,
    Stopped(StopReason),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiphonState {
    source_level: f64,
    sink_level: f64,
    active: bool,
}

impl Default for SiphonState {
    fn default() -> Self {
        Self {
            source_level: FULL,
            sink_level: EMPTY,
            active: false,
        }
    }
}

impl SiphonState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An idle state with the given levels, clamped into range.
    #[must_use]
    pub fn with_levels(source_level: f64, sink_level: f64) -> Self {
        Self {
            source_level: source_level.clamp(EMPTY, FULL),
            sink_level: sink_level.clamp(EMPTY, FULL),
            active: false,
        }
    }

    #[must_use]
    pub fn source_level(&self) -> f64 {
        self.source_level
    }

    #[must_use]
    pub fn sink_level(&self) -> f64 {
        self.sink_level
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Begin flowing. Guards are checked in order: empty source, then full sink.
    /// A failed start leaves the state untouched.
    pub fn start_flow(&mut self) -> Result<(), SiphonError> {
        if self.source_level <= START_MIN_SOURCE {
            return Err(SiphonError::EmptySource);
        }
        if self.sink_level >= START_MAX_SINK {
            return Err(SiphonError::SinkFull);
        }
        self.active = true;
        Ok(())
    }

    /// Advance one timer period.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.active {
            return TickOutcome::Idle;
        }

        self.source_level = (self.source_level - DRAIN_STEP).max(EMPTY);
        self.sink_level = (self.sink_level + FILL_STEP).min(FULL);

        let reason = if self.source_level <= EMPTY {
            StopReason::SourceEmpty
        } else if self.sink_level >= FULL {
            StopReason::SinkFull
        } else {
            return TickOutcome::Flowing;
        };

        self.source_level = self.source_level.clamp(EMPTY, FULL);
        self.sink_level = self.sink_level.clamp(EMPTY, FULL);
        self.active = false;
        TickOutcome::Stopped(reason)
    }

    /// Side-effect free refill guard, suitable for a disabled-button check.
    #[must_use]
    pub fn can_refill(&self) -> bool {
        self.refill_guard().is_ok()
    }

    fn refill_guard(&self) -> Result<(), RefillError> {
        if self.active {
            return Err(RefillError::Flowing);
        }
        if self.source_level > REFILL_MAX_SOURCE {
            return Err(RefillError::AlreadyFull);
        }
        Ok(())
    }

    pub fn refill(&mut self) -> Result<(), RefillError> {
        self.refill_guard()?;
        *self = Self::default();
        Ok(())
    }

    /// Derived status; `warning` is the active transient warning, if any.
    #[must_use]
    pub fn status(&self, warning: Option<SiphonError>) -> SiphonStatus {
        if let Some(warning) = warning {
            SiphonStatus::Warning(warning)
        } else if self.active {
            SiphonStatus::Flowing
        } else if self.sink_level >= FULL {
            SiphonStatus::SinkFull
        } else if self.source_level <= EMPTY {
            SiphonStatus::SourceEmpty
        } else {
            SiphonStatus::Ready
        }
    }
}

/// Exactly one status at a time, in strict priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiphonStatus {
    Warning(SiphonError),
    Flowing,
    SinkFull,
    SourceEmpty,
    Ready,
}

impl SiphonStatus {
    #[must_use]
    pub fn message(self, liquid: Liquid) -> String {
        match self {
            SiphonStatus::Warning(err) => err.to_string(),
            SiphonStatus::Flowing => format!("{} is flowing!", liquid.name()),
            SiphonStatus::SinkFull => "The bowl is full! Good job!".to_string(),
            SiphonStatus::SourceEmpty => {
                format!("Great job! The {} changed shape!", liquid.name())
            }
            SiphonStatus::Ready => "Ready to flow!".to_string(),
        }
    }

    #[must_use]
    pub fn is_warning(self) -> bool {
        matches!(self, SiphonStatus::Warning(_))
    }
}

/// One liquid's siphon, its flow timer and its warning.
///
/// The flow timer exists exactly while the state is active. Dropping the
/// simulator (leaving the station, switching liquid) releases both the timer
/// and any pending warning expiry.
#[derive(Debug)]
pub struct SiphonSimulator {
    liquid: Liquid,
    state: SiphonState,
    flow_timer: Option<FlowTimer>,
    warning: Option<Transient<SiphonError>>,
    timings: Timings,
}

impl SiphonSimulator {
    #[must_use]
    pub fn new(liquid: Liquid, timings: Timings) -> Self {
        Self::with_state(liquid, SiphonState::default(), timings)
    }

    #[must_use]
    pub fn with_state(liquid: Liquid, state: SiphonState, timings: Timings) -> Self {
        Self {
            liquid,
            state,
            flow_timer: None,
            warning: None,
            timings,
        }
    }

    #[must_use]
    pub fn liquid(&self) -> Liquid {
        self.liquid
    }

    #[must_use]
    pub fn state(&self) -> &SiphonState {
        &self.state
    }

    #[must_use]
    pub fn timer_armed(&self) -> bool {
        self.flow_timer.is_some()
    }

    /// Start flowing and arm the flow timer. On failure the warning is shown
    /// for the warning TTL and the flow flag is left alone.
    pub fn start_flow(&mut self, now: Instant) -> Result<(), SiphonError> {
        match self.state.start_flow() {
            Ok(()) => {
                if self.flow_timer.is_none() {
                    self.flow_timer = Some(FlowTimer::arm(now, self.timings.siphon_tick));
                    tracing::debug!(liquid = ?self.liquid, "Siphon flow started");
                }
                Ok(())
            }
            Err(err) => {
                tracing::debug!(liquid = ?self.liquid, %err, "Siphon start rejected");
                self.warning = Some(Transient::new(err, now, self.timings.warning_ttl));
                Err(err)
            }
        }
    }

    /// Run every tick that is due and expire the warning.
    pub fn poll(&mut self, now: Instant) -> Option<StopReason> {
        if self.warning.is_some_and(|w| w.is_expired(now)) {
            self.warning = None;
        }

        let timer = self.flow_timer.as_mut()?;
        let due = timer.due_ticks(now);
        for _ in 0..due {
            match self.state.tick() {
                TickOutcome::Flowing => {}
                TickOutcome::Stopped(reason) => {
                    self.flow_timer = None;
                    tracing::debug!(liquid = ?self.liquid, ?reason, "Siphon flow stopped");
                    return Some(reason);
                }
                TickOutcome::Idle => {
                    self.flow_timer = None;
                    return None;
                }
            }
        }
        None
    }

    #[must_use]
    pub fn can_refill(&self) -> bool {
        self.state.can_refill()
    }

    pub fn refill(&mut self) -> Result<(), RefillError> {
        self.state.refill()?;
        self.flow_timer = None;
        self.warning = None;
        tracing::debug!(liquid = ?self.liquid, "Siphon refilled");
        Ok(())
    }

    /// Switch liquid: fresh state, timer and warning discarded.
    pub fn select_liquid(&mut self, liquid: Liquid) {
        *self = Self::new(liquid, self.timings);
    }

    #[must_use]
    pub fn warning(&self, now: Instant) -> Option<SiphonError> {
        self.warning
            .filter(|w| !w.is_expired(now))
            .map(|w| *w.value())
    }

    #[must_use]
    pub fn status(&self, now: Instant) -> SiphonStatus {
        self.state.status(self.warning(now))
    }

    #[must_use]
    pub fn status_message(&self, now: Instant) -> String {
        self.status(now).message(self.liquid)
    }
}
