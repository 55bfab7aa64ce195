//! Core domain types for Matter Lab.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application: the catalog of
//! sortable items, the materials shown at each station, and UI options.

// Pedantic lint configuration
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod item;
mod material;
mod station;
pub mod ui;

pub use item::{Category, INTRO_ITEMS, Item, ItemId};
pub use material::{Gas, GasInfo, Liquid, LiquidInfo, Solid, SolidInfo};
pub use station::{Station, UnknownStation};

// ============================================================================
// NonEmpty static strings
// ============================================================================

/// A compile-time checked non-empty static string.
///
/// Used for the fixed feedback and status texts so an empty label can never
/// reach the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonEmptyStaticStr(&'static str);

impl NonEmptyStaticStr {
    #[must_use]
    pub const fn new(value: &'static str) -> Self {
        assert!(!value.is_empty(), "NonEmptyStaticStr must not be empty");
        Self(value)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for NonEmptyStaticStr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for NonEmptyStaticStr {
    fn as_ref(&self) -> &str {
        self.0
    }
}
