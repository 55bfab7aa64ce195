//! Sortable items for the intro classification game.

use std::fmt;

/// Which basket an item belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Natural,
    ManMade,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Natural, Category::ManMade];

    /// Label used in feedback sentences ("Yay! That is Man-made!").
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Category::Natural => "Natural",
            Category::ManMade => "Man-made",
        }
    }

    /// Basket title.
    #[must_use]
    pub const fn basket_label(self) -> &'static str {
        match self {
            Category::Natural => "Natural",
            Category::ManMade => "Man-Made",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(&'static str);

impl ItemId {
    #[must_use]
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A sortable thing. Items are fixed configuration data, never user-created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item {
    pub id: ItemId,
    pub name: &'static str,
    pub category: Category,
    pub glyph: &'static str,
    /// Fallback glyph for terminals without emoji support.
    pub ascii_glyph: &'static str,
}

pub const INTRO_ITEMS: [Item; 4] = [
    Item {
        id: ItemId::new("plant"),
        name: "Plant",
        category: Category::Natural,
        glyph: "🌿",
        ascii_glyph: "*",
    },
    Item {
        id: ItemId::new("cat"),
        name: "Cat",
        category: Category::Natural,
        glyph: "🐱",
        ascii_glyph: "@",
    },
    Item {
        id: ItemId::new("chair"),
        name: "Chair",
        category: Category::ManMade,
        glyph: "🪑",
        ascii_glyph: "h",
    },
    Item {
        id: ItemId::new("book"),
        name: "Book",
        category: Category::ManMade,
        glyph: "📘",
        ascii_glyph: "#",
    },
];
