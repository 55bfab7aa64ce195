//! Solid station: solids keep their shape in any container, and they stack.

use std::time::Instant;

use thiserror::Error;

use matter_types::Solid;

use crate::timing::{Deadline, TOWER_DROP_ANIMATION};

pub const MAX_TOWER_HEIGHT: usize = 6;
const SOLID_COUNT: usize = Solid::ALL.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolidTab {
    #[default]
    Shape,
    Stack,
}

/// Where a solid sits during the shape test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Shelf,
    RoundCup,
    SquareBox,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Shelf, Location::RoundCup, Location::SquareBox];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Location::Shelf => "Shelf",
            Location::RoundCup => "Round Cup",
            Location::SquareBox => "Square Box",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the tower is already {MAX_TOWER_HEIGHT} blocks tall")]
pub struct TowerFull;

/// Move solids between the shelf and two containers.
#[derive(Debug, Clone)]
pub struct ShapeTest {
    locations: [Location; SOLID_COUNT],
    held: Option<Solid>,
}

impl Default for ShapeTest {
    fn default() -> Self {
        Self {
            locations: [Location::Shelf; SOLID_COUNT],
            held: None,
        }
    }
}

impl ShapeTest {
    /// Pick up `solid`, or put it back down if it is already held.
    pub fn pick_up(&mut self, solid: Solid) {
        self.held = if self.held == Some(solid) {
            None
        } else {
            Some(solid)
        };
    }

    /// Place the held solid at `location`. No-op when nothing is held.
    pub fn place(&mut self, location: Location) -> Option<Solid> {
        let solid = self.held.take()?;
        self.move_solid(solid, location);
        Some(solid)
    }

    pub fn move_solid(&mut self, solid: Solid, location: Location) {
        tracing::debug!(?solid, ?location, "Solid moved");
        self.locations[solid.index()] = location;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn held(&self) -> Option<Solid> {
        self.held
    }

    #[must_use]
    pub fn location(&self, solid: Solid) -> Location {
        self.locations[solid.index()]
    }

    pub fn solids_at(&self, location: Location) -> impl Iterator<Item = Solid> + '_ {
        Solid::ALL
            .into_iter()
            .filter(move |solid| self.location(*solid) == location)
    }

    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.locations
            .iter()
            .filter(|loc| **loc != Location::Shelf)
            .count()
    }

    #[must_use]
    pub fn all_placed(&self) -> bool {
        self.placed_count() == SOLID_COUNT
    }
}

/// Stack blocks into a tower.
#[derive(Debug, Clone)]
pub struct Tower {
    blocks: Vec<Solid>,
    selected: Solid,
    landing: Option<(usize, Deadline)>,
}

impl Default for Tower {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            selected: Solid::Wood,
            landing: None,
        }
    }
}

impl Tower {
    pub fn select(&mut self, solid: Solid) {
        self.selected = solid;
    }

    #[must_use]
    pub fn selected(&self) -> Solid {
        self.selected
    }

    /// Push the selected block; returns its index in the tower.
    pub fn add(&mut self, now: Instant) -> Result<usize, TowerFull> {
        if self.blocks.len() >= MAX_TOWER_HEIGHT {
            return Err(TowerFull);
        }
        let index = self.blocks.len();
        self.blocks.push(self.selected);
        self.landing = Some((index, Deadline::after(now, TOWER_DROP_ANIMATION)));
        Ok(index)
    }

    pub fn reset(&mut self) {
        self.blocks.clear();
        self.landing = None;
    }

    pub fn poll(&mut self, now: Instant) {
        if self.landing.is_some_and(|(_, done)| done.is_due(now)) {
            self.landing = None;
        }
    }

    #[must_use]
    pub fn blocks(&self) -> &[Solid] {
        &self.blocks
    }

    /// Index of the block still dropping into place.
    #[must_use]
    pub fn landing_index(&self) -> Option<usize> {
        self.landing.map(|(index, _)| index)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.blocks.len() >= MAX_TOWER_HEIGHT
    }
}

#[derive(Debug, Default)]
pub struct SolidStation {
    tab: SolidTab,
    shape: ShapeTest,
    tower: Tower,
    microscope: bool,
}

impl SolidStation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tab(&self) -> SolidTab {
        self.tab
    }

    pub fn toggle_tab(&mut self) {
        self.tab = match self.tab {
            SolidTab::Shape => SolidTab::Stack,
            SolidTab::Stack => SolidTab::Shape,
        };
    }

    #[must_use]
    pub fn shape(&self) -> &ShapeTest {
        &self.shape
    }

    pub fn shape_mut(&mut self) -> &mut ShapeTest {
        &mut self.shape
    }

    #[must_use]
    pub fn tower(&self) -> &Tower {
        &self.tower
    }

    pub fn tower_mut(&mut self) -> &mut Tower {
        &mut self.tower
    }

    pub fn toggle_microscope(&mut self) -> bool {
        self.microscope = !self.microscope;
        self.microscope
    }

    #[must_use]
    pub fn microscope(&self) -> bool {
        self.microscope
    }

    pub fn poll(&mut self, now: Instant) {
        self.tower.poll(now);
    }

    #[must_use]
    pub fn status_message(&self) -> String {
        match self.tab {
            SolidTab::Shape => {
                if let Some(held) = self.shape.held() {
                    let info = held.info();
                    format!("Holding the {}. {}", info.name, info.description)
                } else if self.shape.all_placed() {
                    "Amazing! The solids kept their own shape in every container!".to_string()
                } else {
                    "Pick up a solid and put it in a container.".to_string()
                }
            }
            SolidTab::Stack => {
                if self.tower.is_full() {
                    "What a tall tower! Solids are strong enough to stack.".to_string()
                } else if let Some(top) = self.tower.blocks().last() {
                    format!("{} Add another block!", top.info().sound)
                } else {
                    format!("Build a tower! Selected: {}", self.tower.selected().name())
                }
            }
        }
    }
}
