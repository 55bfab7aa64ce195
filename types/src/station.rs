use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The four screens of the lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Station {
    #[default]
    Intro,
    Solid,
    Liquid,
    Gas,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown station '{0}' (expected intro, solid, liquid or gas)")]
pub struct UnknownStation(pub String);

impl Station {
    pub const ALL: [Station; 4] = [
        Station::Intro,
        Station::Solid,
        Station::Liquid,
        Station::Gas,
    ];

    /// Label in the bottom navigation bar.
    #[must_use]
    pub const fn nav_label(self) -> &'static str {
        match self {
            Station::Intro => "Home",
            Station::Solid => "Solid",
            Station::Liquid => "Liquid",
            Station::Gas => "Gas",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Station::Intro => "Welcome Scientist!",
            Station::Solid => "Solid Station",
            Station::Liquid => "Liquid Station",
            Station::Gas => "Gas Station",
        }
    }

    /// Next station in navigation order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Station::Intro => Station::Solid,
            Station::Solid => Station::Liquid,
            Station::Liquid => Station::Gas,
            Station::Gas => Station::Intro,
        }
    }

    /// Station for a 1-based navigation hotkey.
    #[must_use]
    pub fn from_hotkey(key: char) -> Option<Self> {
        let digit = key.to_digit(10)? as usize;
        digit.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nav_label())
    }
}

impl FromStr for Station {
    type Err = UnknownStation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intro" | "home" => Ok(Station::Intro),
            "solid" => Ok(Station::Solid),
            "liquid" => Ok(Station::Liquid),
            "gas" => Ok(Station::Gas),
            _ => Err(UnknownStation(s.to_string())),
        }
    }
}
