//! Liquid station: pouring into differently shaped containers, and the siphon.

use std::time::Instant;

use matter_types::Liquid;

use crate::siphon::{RefillError, SiphonError, SiphonSimulator, StopReason};
use crate::timing::{Deadline, POUR_DURATION, POUR_STREAM_DELAY, Timings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiquidTab {
    #[default]
    Shape,
    Siphon,
}

/// Containers for the shape-change demonstration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    TallGlass,
    WideBowl,
}

impl Container {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Container::TallGlass => "Tall Glass",
            Container::WideBowl => "Wide Bowl",
        }
    }

    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Container::TallGlass => {
                "I'm a tall glass! The liquid will become tall and thin to fit inside me."
            }
            Container::WideBowl => {
                "I'm a wide bowl! The liquid will spread out to become wide like me."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PourPhase {
    Idle,
    /// Flask tilted; the stream has not reached the container yet.
    Tilting {
        target: Container,
        lands: Deadline,
        ends: Deadline,
    },
    /// Liquid is filling `target`.
    Streaming { target: Container, ends: Deadline },
}

/// Pour sequence: tilt, stream lands, stream ends.
#[derive(Debug, Clone)]
pub struct PourState {
    poured: Option<Container>,
    phase: PourPhase,
}

impl Default for PourState {
    fn default() -> Self {
        Self {
            poured: None,
            phase: PourPhase::Idle,
        }
    }
}

impl PourState {
    /// Start pouring into `target`. Ignored while a pour is running or when
    /// the liquid already sits in `target`.
    pub fn pour(&mut self, target: Container, now: Instant) -> bool {
        if self.is_pouring() || self.poured == Some(target) {
            return false;
        }
        // The flask refills: whatever was poured before is emptied.
        self.poured = None;
        self.phase = PourPhase::Tilting {
            target,
            lands: Deadline::after(now, POUR_STREAM_DELAY),
            ends: Deadline::after(now, POUR_DURATION),
        };
        true
    }

    pub fn poll(&mut self, now: Instant) {
        if let PourPhase::Tilting {
            target,
            lands,
            ends,
        } = self.phase
            && lands.is_due(now)
        {
            self.poured = Some(target);
            self.phase = PourPhase::Streaming { target, ends };
        }
        if let PourPhase::Streaming { ends, .. } = self.phase
            && ends.is_due(now)
        {
            self.phase = PourPhase::Idle;
        }
    }

    #[must_use]
    pub fn is_pouring(&self) -> bool {
        !matches!(self.phase, PourPhase::Idle)
    }

    /// Container currently holding the liquid.
    #[must_use]
    pub fn poured(&self) -> Option<Container> {
        self.poured
    }

    /// Container the running pour is aimed at.
    #[must_use]
    pub fn target(&self) -> Option<Container> {
        match self.phase {
            PourPhase::Idle => None,
            PourPhase::Tilting { target, .. } | PourPhase::Streaming { target, .. } => {
                Some(target)
            }
        }
    }

    #[must_use]
    pub fn is_streaming(&self) -> bool {
        matches!(self.phase, PourPhase::Streaming { .. })
    }
}

#[derive(Debug)]
pub struct LiquidStation {
    tab: LiquidTab,
    pour: PourState,
    siphon: SiphonSimulator,
    microscope: bool,
}

impl LiquidStation {
    #[must_use]
    pub fn new(timings: Timings) -> Self {
        Self {
            tab: LiquidTab::default(),
            pour: PourState::default(),
            siphon: SiphonSimulator::new(Liquid::default(), timings),
            microscope: false,
        }
    }

    #[must_use]
    pub fn tab(&self) -> LiquidTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: LiquidTab) {
        self.tab = tab;
    }

    pub fn toggle_tab(&mut self) {
        self.tab = match self.tab {
            LiquidTab::Shape => LiquidTab::Siphon,
            LiquidTab::Siphon => LiquidTab::Shape,
        };
    }

    #[must_use]
    pub fn liquid(&self) -> Liquid {
        self.siphon.liquid()
    }

    /// Switch liquid. Resets the siphon (cancelling its timer and warning)
    /// and empties the containers.
    pub fn select_liquid(&mut self, liquid: Liquid) {
        tracing::debug!(?liquid, "Liquid selected");
        self.siphon.select_liquid(liquid);
        self.pour = PourState::default();
    }

    pub fn pour(&mut self, target: Container, now: Instant) -> bool {
        self.pour.pour(target, now)
    }

    #[must_use]
    pub fn pour_state(&self) -> &PourState {
        &self.pour
    }

    pub fn start_flow(&mut self, now: Instant) -> Result<(), SiphonError> {
        self.siphon.start_flow(now)
    }

    pub fn refill(&mut self) -> Result<(), RefillError> {
        self.siphon.refill()
    }

    #[must_use]
    pub fn siphon(&self) -> &SiphonSimulator {
        &self.siphon
    }

    pub fn toggle_microscope(&mut self) -> bool {
        self.microscope = !self.microscope;
        self.microscope
    }

    #[must_use]
    pub fn microscope(&self) -> bool {
        self.microscope
    }

    /// Advance pour and siphon timers. The siphon keeps flowing while the
    /// shape tab is shown.
    pub fn poll(&mut self, now: Instant) -> Option<StopReason> {
        self.pour.poll(now);
        self.siphon.poll(now)
    }

    #[must_use]
    pub fn status_message(&self, now: Instant) -> String {
        match self.tab {
            LiquidTab::Siphon => self.siphon.status_message(now),
            LiquidTab::Shape => {
                let name = self.liquid().name();
                match (self.pour.target(), self.pour.poured()) {
                    (Some(target), _) => format!("Pouring {name} into the {}...", target.name()),
                    (None, Some(container)) => {
                        format!("The {name} took the shape of the {}!", container.name())
                    }
                    (None, None) => format!("Pour the {name} into a container!"),
                }
            }
        }
    }
}
