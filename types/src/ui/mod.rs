//! UI state types for the TUI layer.
//!
//! Pure data types with no IO, no async, no ratatui dependency.
//! Used by both the engine (state ownership) and tui (rendering/input).

mod effect;
mod options;

pub use effect::{AnimPhase, OverlayEffect, OverlayEffectKind};
pub use options::UiOptions;
