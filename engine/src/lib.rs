//! Core engine for Matter Lab: station state machines and timers.
//!
//! This crate contains the `App` without TUI dependencies. Every
//! time-dependent operation takes the current `Instant` from the caller.

mod app;
pub mod classification;
pub mod gas;
pub mod liquid;
pub mod siphon;
pub mod solid;
pub mod timing;

pub use app::{ActiveStation, App, Sampler};
pub use classification::{ClassificationSession, DropOutcome, Feedback, SessionComplete};
pub use gas::{DensityLabel, GasError, GasStation, Particle, TemperatureLabel};
pub use liquid::{Container, LiquidStation, LiquidTab, PourState};
pub use siphon::{
    RefillError, SiphonError, SiphonSimulator, SiphonState, SiphonStatus, StopReason, TickOutcome,
};
pub use solid::{Location, MAX_TOWER_HEIGHT, ShapeTest, SolidStation, SolidTab, Tower, TowerFull};
pub use timing::{Deadline, FlowTimer, Timings, Transient};

pub use matter_config::LabConfig;
pub use matter_types::{
    Category, Gas, INTRO_ITEMS, Item, ItemId, Liquid, Solid, Station,
    ui::{AnimPhase, OverlayEffect, OverlayEffectKind, UiOptions},
};
