//! Inline TUI mode: a compact viewport under the shell prompt.

use std::time::Instant;

use ratatui::prelude::{Backend, Terminal};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use matter_engine::{ActiveStation, App, Category, LiquidTab, MAX_TOWER_HEIGHT, SolidTab};

use crate::APP_TITLE;
use crate::theme::{palette, styles};

pub const INLINE_VIEWPORT_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let now = Instant::now();
    let palette = palette(app.ui_options());
    let area = frame.area();
    frame.render_widget(Clear, area);

    let top_padding = area.height.saturating_sub(INLINE_VIEWPORT_HEIGHT);
    let content_area = Rect {
        y: area.y.saturating_add(top_padding),
        height: area.height.saturating_sub(top_padding),
        ..area
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(content_area);

    let header = Line::from(vec![
        Span::styled(APP_TITLE, styles::title(&palette)),
        Span::styled(
            format!(" · {} · ", app.station().title()),
            Style::default().fg(palette.text_muted),
        ),
        Span::styled(summary(app), Style::default().fg(palette.text_primary)),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let status = Line::from(Span::styled(
        app.status_line(now),
        Style::default()
            .fg(palette.success)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(status), chunks[1]);

    let hints = Line::from(Span::styled(
        "1-4 stations · m microscope · t tab · r reset · q quit",
        styles::key_hint(&palette),
    ));
    frame.render_widget(Paragraph::new(hints), chunks[2]);
}

/// Blank the inline viewport so the shell prompt resumes on a clean line.
pub fn clear_inline_viewport<B>(terminal: &mut Terminal<B>) -> Result<(), B::Error>
where
    B: Backend,
{
    terminal.draw(|frame| frame.render_widget(Clear, frame.area()))?;
    Ok(())
}

/// One-line summary of the active station's state.
pub(crate) fn summary(app: &App) -> String {
    match app.active() {
        ActiveStation::Intro(session) => format!(
            "Items left {} · Natural {} · Man-Made {}",
            session.pool().len(),
            session.bin(Category::Natural).len(),
            session.bin(Category::ManMade).len()
        ),
        ActiveStation::Solid(station) => match station.tab() {
            SolidTab::Shape => format!("Placed {}/4", station.shape().placed_count()),
            SolidTab::Stack => format!(
                "Tower {}/{MAX_TOWER_HEIGHT}",
                station.tower().blocks().len()
            ),
        },
        ActiveStation::Liquid(station) => match station.tab() {
            LiquidTab::Shape => match station.pour_state().poured() {
                Some(container) => {
                    format!("{} in the {}", station.liquid().name(), container.name())
                }
                None => format!("{} in the flask", station.liquid().name()),
            },
            LiquidTab::Siphon => {
                let state = station.siphon().state();
                format!(
                    "Cylinder {:.1}% · Bowl {:.1}%",
                    state.source_level(),
                    state.sink_level()
                )
            }
        },
        ActiveStation::Gas(station) => format!(
            "{} · balloon {:.1} · {} particles",
            station.gas().name(),
            station.balloon_size(),
            station.particle_count()
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use matter_engine::Station;

    use super::*;

    #[test]
    fn summary_tracks_siphon_levels() {
        let t0 = Instant::now();
        let mut app = App::new(None);
        app.navigate(Station::Liquid);
        app.start_flow(t0).unwrap();
        app.tick(t0 + Duration::from_millis(60));
        assert_eq!(summary(&app), "Cylinder 99.0% · Bowl 0.8%");
    }

    #[test]
    fn summary_counts_intro_bins() {
        let mut app = App::new(None);
        app.drop_into(Category::Natural, Instant::now());
        assert_eq!(summary(&app), "Items left 3 · Natural 1 · Man-Made 0");
    }
}
