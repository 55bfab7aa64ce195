//! TUI rendering for Matter Lab using ratatui.

mod effects;
mod input;
mod theme;
mod ui_inline;

pub use effects::apply_overlay_effect;
pub use input::{InputPump, apply_key, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};
pub use ui_inline::{INLINE_VIEWPORT_HEIGHT, clear_inline_viewport, draw as draw_inline};

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use matter_engine::{
    ActiveStation, AnimPhase, App, Category, ClassificationSession, Container, Gas, GasStation,
    Item, ItemId, Liquid, LiquidStation, LiquidTab, Location, MAX_TOWER_HEIGHT, OverlayEffectKind,
    Solid, SolidStation, SolidTab, Station, UiOptions,
};

const APP_TITLE: &str = "Matter Master Lab";
const MICROSCOPE_WIDTH: u16 = 56;
const MICROSCOPE_HEIGHT: u16 = 9;
const CELEBRATION_WIDTH: u16 = 48;
const CELEBRATION_HEIGHT: u16 = 5;

/// Rendering context shared by the station drawers.
struct Ctx {
    palette: Palette,
    glyphs: Glyphs,
    options: UiOptions,
}

impl Ctx {
    fn item_glyph(&self, item: &Item) -> &'static str {
        if self.options.ascii_only {
            item.ascii_glyph
        } else {
            item.glyph
        }
    }

    fn marker(&self, selected: bool) -> &'static str {
        if selected { self.glyphs.cursor } else { " " }
    }

    fn panel<'a>(&self, title: impl Into<Line<'a>>) -> Block<'a> {
        let title: Line<'a> = title.into();
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.palette.bg_border))
            .style(Style::default().bg(self.palette.bg_panel))
            .title(title)
    }
}

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let now = Instant::now();
    let options = app.ui_options();
    let ctx = Ctx {
        palette: palette(options),
        glyphs: glyphs(options),
        options,
    };
    let bg_block = Block::default().style(Style::default().bg(ctx.palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(8),    // Station
            Constraint::Length(1), // Status
            Constraint::Length(1), // Navigation
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0], &ctx);
    draw_station(frame, app, chunks[1], &ctx);
    draw_status_line(frame, app, chunks[2], &ctx, now);
    draw_nav_bar(frame, app, chunks[3], &ctx);

    if app.microscope() {
        draw_microscope(frame, app, chunks[1], &ctx);
    }
    let celebrating =
        matches!(app.active(), ActiveStation::Intro(session) if session.is_complete());
    if celebrating {
        draw_celebration(frame, app, chunks[1], &ctx);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect, ctx: &Ctx) {
    let mut spans = vec![
        Span::styled(APP_TITLE, styles::title(&ctx.palette)),
        Span::styled(" · ", Style::default().fg(ctx.palette.text_muted)),
        Span::styled(
            app.station().title(),
            Style::default().fg(ctx.palette.text_primary),
        ),
    ];
    if app.microscope() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            ctx.glyphs.microscope,
            Style::default().fg(ctx.palette.peach),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_station(frame: &mut Frame, app: &App, area: Rect, ctx: &Ctx) {
    let cursor = app.cursor();
    match app.active() {
        ActiveStation::Intro(session) => {
            draw_intro(frame, session, cursor, app.held_item(), area, ctx);
        }
        ActiveStation::Solid(station) => draw_solid(frame, station, cursor, area, ctx),
        ActiveStation::Liquid(station) => draw_liquid(frame, station, cursor, area, ctx),
        ActiveStation::Gas(station) => draw_gas(frame, station, cursor, area, ctx),
    }
}

fn draw_status_line(frame: &mut Frame, app: &App, area: Rect, ctx: &Ctx, now: Instant) {
    let warning = app.notice(now).is_some()
        || matches!(app.active(), ActiveStation::Liquid(station)
            if station.tab() == LiquidTab::Siphon && station.siphon().status(now).is_warning());
    let color = if warning {
        ctx.palette.warning
    } else {
        ctx.palette.success
    };
    let line = Line::from(Span::styled(
        app.status_line(now),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_nav_bar(frame: &mut Frame, app: &App, area: Rect, ctx: &Ctx) {
    let mut spans = Vec::new();
    for (index, station) in Station::ALL.into_iter().enumerate() {
        let style = if station == app.station() {
            styles::nav_active(&ctx.palette)
        } else {
            styles::nav_inactive(&ctx.palette)
        };
        spans.push(Span::styled(
            format!(" {} {} ", index + 1, station.nav_label()),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    for (key, action) in [("m", "microscope"), ("r", "reset"), ("q", "quit")] {
        spans.push(Span::styled(key, styles::key_highlight(&ctx.palette)));
        spans.push(Span::styled(
            format!(" {action}  "),
            styles::key_hint(&ctx.palette),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn tab_line<'a>(labels: [&'a str; 2], active: usize, ctx: &Ctx) -> Line<'a> {
    let mut spans = Vec::new();
    for (index, label) in labels.into_iter().enumerate() {
        let style = if index == active {
            styles::nav_active(&ctx.palette)
        } else {
            styles::nav_inactive(&ctx.palette)
        };
        spans.push(Span::styled(format!(" {label} "), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("t", styles::key_highlight(&ctx.palette)));
    spans.push(Span::styled(" switch tab", styles::key_hint(&ctx.palette)));
    Line::from(spans)
}

fn split_tab(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);
    (chunks[0], chunks[1])
}

// ---- intro ----

fn draw_intro(
    frame: &mut Frame,
    session: &ClassificationSession,
    cursor: usize,
    held: Option<ItemId>,
    area: Rect,
    ctx: &Ctx,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    let mut spans = Vec::new();
    for (index, item) in session.pool().iter().enumerate() {
        let is_held = held == Some(item.id);
        let style = if is_held {
            styles::selected(&ctx.palette).fg(ctx.palette.peach)
        } else {
            Style::default().fg(ctx.palette.text_primary)
        };
        spans.push(Span::raw(ctx.marker(index == cursor)));
        if is_held {
            spans.push(Span::raw(ctx.glyphs.held));
        }
        spans.push(Span::styled(
            format!("{} {}", ctx.item_glyph(item), item.name),
            style,
        ));
        spans.push(Span::raw("   "));
    }
    if spans.is_empty() {
        spans.push(Span::styled(
            format!("{} All sorted!", ctx.glyphs.check),
            Style::default().fg(ctx.palette.success),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(ctx.panel(" Items ")),
        chunks[0],
    );

    let baskets = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    for (category, key, rect) in [
        (Category::Natural, "n", baskets[0]),
        (Category::ManMade, "h", baskets[1]),
    ] {
        let color = match category {
            Category::Natural => ctx.palette.natural,
            Category::ManMade => ctx.palette.man_made,
        };
        let lines: Vec<Line> = session
            .bin(category)
            .iter()
            .map(|item| Line::from(format!(" {} {}", ctx.item_glyph(item), item.name)))
            .collect();
        let title = format!(
            " {} {} [{key}] ",
            ctx.glyphs.basket,
            category.basket_label()
        );
        let block = ctx
            .panel(title)
            .border_style(Style::default().fg(color));
        frame.render_widget(Paragraph::new(lines).block(block), rect);
    }
}

fn draw_celebration(frame: &mut Frame, app: &mut App, viewport: Rect, ctx: &Ctx) {
    let base = centered(viewport, CELEBRATION_WIDTH, CELEBRATION_HEIGHT);
    let area = animate(app, base, viewport, OverlayEffectKind::SlideUp);
    frame.render_widget(Clear, area);
    let text = vec![
        Line::from(Span::styled(
            "You did it!",
            styles::title(&ctx.palette),
        )),
        Line::from("Let's explore States of Matter!"),
    ];
    let block = ctx
        .panel(" Well done ")
        .border_style(Style::default().fg(ctx.palette.success));
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

// ---- solid ----

fn draw_solid(frame: &mut Frame, station: &SolidStation, cursor: usize, area: Rect, ctx: &Ctx) {
    let (tabs, body) = split_tab(area);
    let active = usize::from(station.tab() == SolidTab::Stack);
    frame.render_widget(Paragraph::new(tab_line(["Shape", "Stack"], active, ctx)), tabs);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(10)])
        .split(body);

    let lines: Vec<Line> = Solid::ALL
        .into_iter()
        .enumerate()
        .map(|(index, solid)| {
            let info = solid.info();
            let chosen = match station.tab() {
                SolidTab::Shape => station.shape().held() == Some(solid),
                SolidTab::Stack => station.tower().selected() == solid,
            };
            let mut spans = vec![
                Span::raw(ctx.marker(index == cursor)),
                Span::styled(
                    ctx.glyphs.block,
                    Style::default().fg(ctx.palette.material(info.color)),
                ),
                Span::raw(" "),
                Span::styled(
                    info.name,
                    if chosen {
                        styles::selected(&ctx.palette)
                    } else {
                        Style::default().fg(ctx.palette.text_primary)
                    },
                ),
            ];
            if chosen {
                spans.push(Span::raw(format!(" {}", ctx.glyphs.held)));
            }
            Line::from(spans)
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(ctx.panel(" Solids ")),
        columns[0],
    );

    match station.tab() {
        SolidTab::Shape => draw_shape_test(frame, station, columns[1], ctx),
        SolidTab::Stack => draw_tower(frame, station, columns[1], ctx),
    }
}

fn solid_block_lines(solid: Solid, ctx: &Ctx) -> Vec<Line<'static>> {
    let info = solid.info();
    let (width, height) = info.footprint;
    let style = Style::default().fg(ctx.palette.material(info.color));
    let row = ctx.glyphs.block.repeat(usize::from(width));
    let mut lines: Vec<Line> = (0..height)
        .map(|_| Line::from(Span::styled(row.clone(), style)))
        .collect();
    lines.push(Line::from(info.name));
    lines
}

fn draw_shape_test(frame: &mut Frame, station: &SolidStation, area: Rect, ctx: &Ctx) {
    let places = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);
    for (location, key, rect) in [
        (Location::Shelf, "s", places[0]),
        (Location::RoundCup, "c", places[1]),
        (Location::SquareBox, "b", places[2]),
    ] {
        let lines: Vec<Line> = station
            .shape()
            .solids_at(location)
            .flat_map(|solid| solid_block_lines(solid, ctx))
            .collect();
        let title = format!(" {} [{key}] ", location.name());
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(ctx.panel(title)),
            rect,
        );
    }
}

fn draw_tower(frame: &mut Frame, station: &SolidStation, area: Rect, ctx: &Ctx) {
    let tower = station.tower();
    let inner_width = usize::from(area.width.saturating_sub(2));
    let mut lines: Vec<Line> = Vec::new();
    for (index, solid) in tower.blocks().iter().enumerate().rev() {
        let info = solid.info();
        let row = ctx.glyphs.block.repeat(usize::from(info.footprint.0));
        let pad = inner_width.saturating_sub(row.width()) / 2;
        let mut spans = vec![
            Span::raw(" ".repeat(pad)),
            Span::styled(row, Style::default().fg(ctx.palette.material(info.color))),
        ];
        if tower.landing_index() == Some(index) {
            spans.push(Span::styled(
                format!(" {}", info.sound),
                Style::default().fg(ctx.palette.peach),
            ));
        }
        lines.push(Line::from(spans));
    }
    let title = format!(
        " Tower {}/{MAX_TOWER_HEIGHT} [a] add ",
        tower.blocks().len()
    );
    let inner_height = usize::from(area.height.saturating_sub(2));
    let mut padded = vec![Line::default(); inner_height.saturating_sub(lines.len())];
    padded.extend(lines);
    frame.render_widget(Paragraph::new(padded).block(ctx.panel(title)), area);
}

// ---- liquid ----

fn liquid_selector(current: Liquid, cursor: usize, ctx: &Ctx) -> Line<'static> {
    let mut spans = Vec::new();
    for ((index, liquid), key) in Liquid::ALL.into_iter().enumerate().zip(["w", "o", "k"]) {
        let info = liquid.info();
        let style = if liquid == current {
            styles::selected(&ctx.palette).fg(ctx.palette.material(info.color))
        } else {
            Style::default().fg(ctx.palette.text_muted)
        };
        spans.push(Span::raw(ctx.marker(index == cursor)));
        spans.push(Span::styled(format!("{} [{key}]", info.name), style));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

fn draw_liquid(frame: &mut Frame, station: &LiquidStation, cursor: usize, area: Rect, ctx: &Ctx) {
    let (tabs, body) = split_tab(area);
    let active = usize::from(station.tab() == LiquidTab::Siphon);
    frame.render_widget(Paragraph::new(tab_line(["Shape", "Siphon"], active, ctx)), tabs);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(body);
    frame.render_widget(
        Paragraph::new(liquid_selector(station.liquid(), cursor, ctx))
            .block(ctx.panel(" Liquid ")),
        chunks[0],
    );

    match station.tab() {
        LiquidTab::Shape => draw_pour(frame, station, chunks[1], ctx),
        LiquidTab::Siphon => draw_siphon(frame, station, chunks[1], ctx),
    }
}

fn draw_pour(frame: &mut Frame, station: &LiquidStation, area: Rect, ctx: &Ctx) {
    let pour = station.pour_state();
    let color = ctx.palette.material(station.liquid().info().color);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    for (container, key, rect) in [
        (Container::TallGlass, "g", columns[0]),
        (Container::WideBowl, "p", columns[1]),
    ] {
        let mut lines = Vec::new();
        if pour.target() == Some(container) {
            lines.push(Line::from(Span::styled(
                ctx.glyphs.stream,
                Style::default().fg(color),
            )));
        }
        if pour.poured() == Some(container) {
            // Same volume, different shape.
            let (width, rows) = match container {
                Container::TallGlass => (4, 6),
                Container::WideBowl => (12, 2),
            };
            let row = ctx.glyphs.block.repeat(width);
            for _ in 0..rows {
                lines.push(Line::from(Span::styled(row.clone(), Style::default().fg(color))));
            }
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            container.hint(),
            Style::default().fg(ctx.palette.text_muted),
        )));
        let title = format!(" {} [{key}] ", container.name());
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(ctx.panel(title)),
            rect,
        );
    }
}

fn draw_siphon(frame: &mut Frame, station: &LiquidStation, area: Rect, ctx: &Ctx) {
    let state = station.siphon().state();
    let color = ctx.palette.material(station.liquid().info().color);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    for (title, level, rect) in [
        (" Cylinder ", state.source_level(), chunks[0]),
        (" Bowl ", state.sink_level(), chunks[1]),
    ] {
        let gauge = Gauge::default()
            .block(ctx.panel(title))
            .gauge_style(Style::default().fg(color).bg(ctx.palette.bg_highlight))
            .ratio((level / 100.0).clamp(0.0, 1.0))
            .label(format!("{level:.1}%"));
        frame.render_widget(gauge, rect);
    }

    let refill_style = if station.siphon().can_refill() {
        styles::key_highlight(&ctx.palette)
    } else {
        Style::default().fg(ctx.palette.text_muted)
    };
    let hints = Line::from(vec![
        Span::styled("f", styles::key_highlight(&ctx.palette)),
        Span::styled(" start flow  ", styles::key_hint(&ctx.palette)),
        Span::styled("r", refill_style),
        Span::styled(" refill", styles::key_hint(&ctx.palette)),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[2]);
}

// ---- gas ----

fn draw_gas(frame: &mut Frame, station: &GasStation, cursor: usize, area: Rect, ctx: &Ctx) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(4),
        ])
        .split(area);

    let mut spans = Vec::new();
    for ((index, gas), key) in Gas::ALL.into_iter().enumerate().zip(["a", "e", "x"]) {
        let style = if gas == station.gas() {
            styles::selected(&ctx.palette).fg(ctx.palette.material(gas.info().color))
        } else {
            Style::default().fg(ctx.palette.text_muted)
        };
        spans.push(Span::raw(ctx.marker(index == cursor)));
        spans.push(Span::styled(format!("{} [{key}]", gas.name()), style));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(ctx.panel(" Gas ")),
        chunks[0],
    );

    let size = station.balloon_size();
    let balloon = Gauge::default()
        .block(ctx.panel(format!(" {} Balloon [u] pump ", ctx.glyphs.balloon)))
        .gauge_style(
            Style::default()
                .fg(ctx.palette.material(station.gas().info().color))
                .bg(ctx.palette.bg_highlight),
        )
        .ratio((size / matter_engine::gas::BALLOON_MAX).clamp(0.0, 1.0))
        .label(format!("size {size:.1}"));
    frame.render_widget(balloon, chunks[1]);

    let sliders = Line::from(vec![
        Span::styled("-/+", styles::key_highlight(&ctx.palette)),
        Span::styled(
            format!(
                " Temperature {:.1} ({})   ",
                station.temperature(),
                station.temperature_label().name()
            ),
            Style::default().fg(ctx.palette.text_primary),
        ),
        Span::styled("[/]", styles::key_highlight(&ctx.palette)),
        Span::styled(
            format!(
                " Particles {} ({})   ",
                station.particle_count(),
                station.density_label().name()
            ),
            Style::default().fg(ctx.palette.text_primary),
        ),
        Span::styled("l", styles::key_highlight(&ctx.palette)),
        Span::styled(
            format!(" {}", station.gas().info().action_label),
            styles::key_hint(&ctx.palette),
        ),
    ]);
    frame.render_widget(Paragraph::new(sliders), chunks[2]);

    draw_room(frame, station, chunks[3], ctx);
}

fn draw_room(frame: &mut Frame, station: &GasStation, area: Rect, ctx: &Ctx) {
    let block = ctx.panel(" Room ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let color = ctx.palette.material(station.gas().info().color);
    let buffer = frame.buffer_mut();
    for particle in station.particles() {
        let x = inner.x + scale_percent(particle.left, inner.width);
        let y = inner.y + scale_percent(particle.top, inner.height);
        if let Some(cell) = buffer.cell_mut((x, y)) {
            cell.set_symbol(ctx.glyphs.particle).set_fg(color);
        }
    }
}

/// Map a percentage onto `0..extent`.
fn scale_percent(percent: f64, extent: u16) -> u16 {
    let max = f64::from(extent.saturating_sub(1));
    (percent.clamp(0.0, 100.0) / 100.0 * max).round() as u16
}

// ---- overlays ----

fn centered(viewport: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(viewport.width);
    let height = height.min(viewport.height);
    Rect {
        x: viewport.x + (viewport.width - width) / 2,
        y: viewport.y + (viewport.height - height) / 2,
        width,
        height,
    }
}

/// Advance the running overlay effect of `kind` and return the animated rect.
fn animate(app: &mut App, base: Rect, viewport: Rect, kind: OverlayEffectKind) -> Rect {
    let elapsed = app.frame_elapsed();
    let Some(effect) = app.overlay_effect_mut() else {
        return base;
    };
    if effect.kind() != kind {
        return base;
    }
    effect.advance(elapsed);
    let area = apply_overlay_effect(effect, base, viewport);
    if matches!(effect.phase(), AnimPhase::Completed) {
        app.clear_overlay_effect();
    }
    area
}

fn microscope_text(station: Station) -> [&'static str; 2] {
    match station {
        Station::Solid => [
            "Particles are packed tightly in neat rows.",
            "They can only wiggle in place, so solids keep their shape.",
        ],
        Station::Liquid => [
            "Particles are close together but can slide past each other.",
            "That is why liquids flow and take the shape of their container.",
        ],
        Station::Gas => [
            "Particles are far apart and zoom around in every direction.",
            "Gases spread out to fill the whole space they are in.",
        ],
        Station::Intro => ["", ""],
    }
}

fn draw_microscope(frame: &mut Frame, app: &mut App, viewport: Rect, ctx: &Ctx) {
    let base = centered(viewport, MICROSCOPE_WIDTH, MICROSCOPE_HEIGHT);
    let area = animate(app, base, viewport, OverlayEffectKind::PopScale);
    frame.render_widget(Clear, area);

    let [first, second] = microscope_text(app.station());
    let lines = vec![
        Line::from(Span::styled(
            first,
            Style::default().fg(ctx.palette.text_primary),
        )),
        Line::default(),
        Line::from(Span::styled(
            second,
            Style::default().fg(ctx.palette.text_muted),
        )),
    ];
    let block = ctx
        .panel(format!(" {} Microscope [m] ", ctx.glyphs.microscope))
        .border_style(Style::default().fg(ctx.palette.primary));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
