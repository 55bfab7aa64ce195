//! Materials shown at the solid, liquid and gas stations.
//!
//! Display metadata is static lookup data: names, glyphs and a base color
//! token (RGB) that the TUI maps to its palette.

// ============================================================================
// Solids
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solid {
    Wood,
    Ice,
    Brick,
    Sponge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidInfo {
    pub name: &'static str,
    pub description: &'static str,
    /// Sound word shown when the block lands.
    pub sound: &'static str,
    pub color: (u8, u8, u8),
    /// Rendered footprint in cells (width, height).
    pub footprint: (u16, u16),
}

impl Solid {
    pub const ALL: [Solid; 4] = [Solid::Wood, Solid::Ice, Solid::Brick, Solid::Sponge];

    #[must_use]
    pub const fn info(self) -> SolidInfo {
        match self {
            Solid::Wood => SolidInfo {
                name: "Wood Block",
                description: "Hard and strong. Great for building!",
                sound: "Thud!",
                color: (139, 90, 43),
                footprint: (6, 3),
            },
            Solid::Ice => SolidInfo {
                name: "Ice Cube",
                description: "Cold and slippery. Melts if hot!",
                sound: "Clink!",
                color: (165, 243, 252),
                footprint: (5, 3),
            },
            Solid::Brick => SolidInfo {
                name: "Red Brick",
                description: "Heavy and rough. Very sturdy.",
                sound: "Thud!",
                color: (178, 34, 34),
                footprint: (8, 2),
            },
            Solid::Sponge => SolidInfo {
                name: "Sponge",
                description: "Soft and squishy, but still a solid!",
                sound: "Squish!",
                color: (250, 204, 21),
                footprint: (6, 2),
            },
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.info().name
    }

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

// ============================================================================
// Liquids
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Liquid {
    #[default]
    Water,
    Oil,
    Milk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidInfo {
    pub name: &'static str,
    pub glyph: &'static str,
    pub color: (u8, u8, u8),
}

impl Liquid {
    pub const ALL: [Liquid; 3] = [Liquid::Water, Liquid::Oil, Liquid::Milk];

    #[must_use]
    pub const fn info(self) -> LiquidInfo {
        match self {
            Liquid::Water => LiquidInfo {
                name: "Water",
                glyph: "💧",
                color: (34, 211, 238),
            },
            Liquid::Oil => LiquidInfo {
                name: "Cooking Oil",
                glyph: "🌻",
                color: (234, 179, 8),
            },
            Liquid::Milk => LiquidInfo {
                name: "Milk",
                glyph: "🥛",
                color: (248, 250, 252),
            },
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.info().name
    }
}

// ============================================================================
// Gases
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gas {
    #[default]
    Air,
    Helium,
    Steam,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasInfo {
    pub name: &'static str,
    pub glyph: &'static str,
    pub description: &'static str,
    pub weight_fact: &'static str,
    /// Label of the button that releases the gas into the room.
    pub action_label: &'static str,
    pub fill_label: &'static str,
    /// Seconds for one particle drift cycle at normal temperature.
    pub base_speed: f64,
    /// Vertical band (percent from the ceiling) the particles settle into.
    pub settle_band: (f64, f64),
    pub color: (u8, u8, u8),
}

impl Gas {
    pub const ALL: [Gas; 3] = [Gas::Air, Gas::Helium, Gas::Steam];

    #[must_use]
    pub const fn info(self) -> GasInfo {
        match self {
            Gas::Air => GasInfo {
                name: "Air",
                glyph: "💨",
                description: "Air is a mix of gases. It has weight, so it doesn't float away on its own.",
                weight_fact: "Air is heavier than Helium. That is why an air balloon does not float up!",
                action_label: "Light Incense",
                fill_label: "Pump Air",
                base_speed: 6.0,
                settle_band: (10.0, 90.0),
                color: (148, 163, 184),
            },
            Gas::Helium => GasInfo {
                name: "Helium",
                glyph: "🎈",
                description: "Helium is a very light gas. It loves to go up!",
                weight_fact: "Helium is lighter than Air! It floats to the top because air pushes it up.",
                action_label: "Open Valve",
                fill_label: "Fill Helium",
                base_speed: 3.0,
                settle_band: (0.0, 30.0),
                color: (249, 168, 212),
            },
            Gas::Steam => GasInfo {
                name: "Steam",
                glyph: "♨️",
                description: "Steam is hot water gas. Hot gas is lighter than cold air.",
                weight_fact: "Heat makes gas expand and get lighter. That is why steam rises!",
                action_label: "Boil Water",
                fill_label: "Pump Steam",
                base_speed: 10.0,
                settle_band: (0.0, 60.0),
                color: (255, 255, 255),
            },
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.info().name
    }
}
