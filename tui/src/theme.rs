//! Color theme and glyphs for the Matter Lab TUI.
//!
//! A bright classroom palette by default with an optional high-contrast override.

use ratatui::style::{Color, Modifier, Style};

use matter_engine::UiOptions;

mod colors {
    use super::Color;

    pub const BG_DARK: Color = Color::Rgb(18, 24, 38);
    pub const BG_PANEL: Color = Color::Rgb(28, 36, 56);
    pub const BG_HIGHLIGHT: Color = Color::Rgb(44, 56, 86);
    pub const BG_BORDER: Color = Color::Rgb(92, 108, 148);

    pub const TEXT_PRIMARY: Color = Color::Rgb(240, 240, 232);
    pub const TEXT_MUTED: Color = Color::Rgb(140, 148, 168);

    pub const PRIMARY: Color = Color::Rgb(168, 132, 247); // violet
    pub const BLUE: Color = Color::Rgb(96, 165, 250);
    pub const GREEN: Color = Color::Rgb(74, 222, 128);
    pub const YELLOW: Color = Color::Rgb(250, 204, 21);
    pub const ORANGE: Color = Color::Rgb(251, 146, 60);
    pub const RED: Color = Color::Rgb(248, 113, 113);

    pub const NATURAL: Color = GREEN;
    pub const MAN_MADE: Color = BLUE;
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub peach: Color,
    pub natural: Color,
    pub man_made: Color,
    /// Material colors are replaced with this in high contrast mode.
    pub material_override: Option<Color>,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_highlight: colors::BG_HIGHLIGHT,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_muted: colors::TEXT_MUTED,
            primary: colors::PRIMARY,
            success: colors::GREEN,
            warning: colors::YELLOW,
            error: colors::RED,
            peach: colors::ORANGE,
            natural: colors::NATURAL,
            man_made: colors::MAN_MADE,
            material_override: None,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_highlight: Color::DarkGray,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_muted: Color::Gray,
            primary: Color::White,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            peach: Color::Yellow,
            natural: Color::Green,
            man_made: Color::Cyan,
            material_override: Some(Color::White),
        }
    }

    /// Color for a material swatch.
    #[must_use]
    pub fn material(&self, (r, g, b): (u8, u8, u8)) -> Color {
        self.material_override.unwrap_or(Color::Rgb(r, g, b))
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for containers, particles and gauges.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub cursor: &'static str,
    pub held: &'static str,
    pub particle: &'static str,
    pub block: &'static str,
    pub stream: &'static str,
    pub basket: &'static str,
    pub balloon: &'static str,
    pub check: &'static str,
    pub microscope: &'static str,
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            cursor: ">",
            held: "*",
            particle: "o",
            block: "#",
            stream: "|",
            basket: "U",
            balloon: "O",
            check: "ok",
            microscope: "[o]",
        }
    } else {
        Glyphs {
            cursor: "▸",
            held: "✋",
            particle: "•",
            block: "█",
            stream: "┃",
            basket: "🧺",
            balloon: "🎈",
            check: "✓",
            microscope: "🔬",
        }
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn nav_active(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.bg_dark)
            .bg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn nav_inactive(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn selected(palette: &Palette) -> Style {
        Style::default()
            .bg(palette.bg_highlight)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.peach)
            .add_modifier(Modifier::BOLD)
    }
}
