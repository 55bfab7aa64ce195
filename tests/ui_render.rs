//! Render tests: draw real frames into a vt100 screen and read them back.


use std::time::Instant;

use ratatui::Terminal;

use matter_engine::{App, Category, Gas, LabConfig, Station};
use matter_tui::{apply_key, draw, draw_inline};
use vt100_backend::VT100Backend;

const WIDTH: u16 = 100;
const HEIGHT: u16 = 30;

fn ascii_app(station: Station) -> App {
    let config: LabConfig =
        toml::from_str("[app]\nascii_only = true\nreduced_motion = true\n").unwrap();
    let mut app = App::new(Some(&config)).with_sampler(|| 0.5);
    app.navigate(station);
    app
}

fn render(app: &mut App) -> Terminal<VT100Backend> {
    let mut terminal = Terminal::new(VT100Backend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|frame| draw(frame, app)).unwrap();
    terminal
}

#[test]
fn intro_shows_items_and_baskets() {
    let mut app = ascii_app(Station::Intro);
    let terminal = render(&mut app);
    let screen = terminal.backend();

    assert!(screen.row(1).contains("Matter Master Lab · Welcome Scientist!"));
    let items = screen.find_row("Plant").expect("item row");
    let row = screen.row(items);
    assert!(row.contains(">* Plant"));
    assert!(row.contains("h Chair"));
    assert!(screen.contents().contains("U Natural [n]"));
    assert!(screen.contents().contains("U Man-Made [h]"));
    assert!(screen.contents().contains("Drag items to the correct basket!"));
    assert!(screen.contents().contains(" 1 Home "));
}

#[test]
fn sorted_item_moves_into_basket() {
    let mut app = ascii_app(Station::Intro);
    apply_key(&mut app, crossterm::event::KeyCode::Char('n').into(), Instant::now());
    let terminal = render(&mut app);
    let screen = terminal.backend();

    assert!(screen.contents().contains("Yay! That is Natural!"));
    let items = screen.find_row("Cat").expect("item row");
    assert!(!screen.row(items).contains("Plant"));
    assert!(screen.find_row(" * Plant").is_some());
}

#[test]
fn finishing_the_sort_celebrates() {
    let mut app = ascii_app(Station::Intro);
    let now = Instant::now();
    for basket in [
        Category::Natural,
        Category::Natural,
        Category::ManMade,
        Category::ManMade,
    ] {
        app.drop_into(basket, now);
    }
    let terminal = render(&mut app);
    let contents = terminal.backend().contents();

    assert!(contents.contains("You did it!"));
    assert!(contents.contains("Let's explore States of Matter!"));
    assert!(contents.contains("ok All sorted!"));
}

#[test]
fn solid_shape_and_tower_tabs() {
    let mut app = ascii_app(Station::Solid);
    let now = Instant::now();
    let terminal = render(&mut app);
    let contents = terminal.backend().contents();
    assert!(contents.contains("Solid Station"));
    assert!(contents.contains("Wood Block"));
    assert!(contents.contains("Shelf [s]"));
    assert!(contents.contains("Round Cup [c]"));
    assert!(contents.contains("Square Box [b]"));

    app.toggle_tab();
    app.add_block(now).unwrap();
    app.add_block(now).unwrap();
    let terminal = render(&mut app);
    assert!(terminal.backend().contents().contains("Tower 2/6 [a] add"));
}

#[test]
fn siphon_gauges_show_levels() {
    let mut app = ascii_app(Station::Liquid);
    app.start_flow(Instant::now()).unwrap();
    let terminal = render(&mut app);
    let screen = terminal.backend();

    assert!(screen.contents().contains("Cylinder"));
    assert!(screen.contents().contains("100.0%"));
    assert!(screen.contents().contains("0.0%"));
    assert!(screen.contents().contains("Water is flowing!"));
    assert!(screen.contents().contains("f start flow"));
}

#[test]
fn gas_room_shows_particles_and_sliders() {
    let mut app = ascii_app(Station::Gas);
    app.select_gas(Gas::Helium);
    app.release_gas(Instant::now()).unwrap();
    let terminal = render(&mut app);
    let screen = terminal.backend();

    assert!(screen.contents().contains("Helium [e]"));
    assert!(screen.contents().contains("Temperature 1.0"));
    assert!(screen.contents().contains("Particles 60"));
    assert!(screen.contents().contains("Open Valve"));
    // Every particle starts at the same source cell.
    let room = screen.find_row(" Room ").expect("room panel");
    let bottom = (room + 1..HEIGHT)
        .find(|&y| screen.row(y).contains('╰'))
        .expect("room border");
    let particle_rows = (room + 1..bottom)
        .filter(|&y| screen.row(y).contains('o'))
        .count();
    assert_eq!(particle_rows, 1);
    assert!(
        screen
            .contents()
            .contains("The Helium spreads out to fill the whole room!")
    );
}

#[test]
fn microscope_overlay_explains_particles() {
    let mut app = ascii_app(Station::Liquid);
    app.toggle_microscope();
    let terminal = render(&mut app);
    let contents = terminal.backend().contents();

    assert!(contents.contains("[o] Microscope [m]"));
    assert!(contents.contains("Particles are close together"));
}

#[test]
fn inline_view_summarizes_station() {
    let mut app = ascii_app(Station::Gas);
    let mut terminal = Terminal::new(VT100Backend::new(WIDTH, 3)).unwrap();
    terminal.draw(|frame| draw_inline(frame, &mut app)).unwrap();
    let screen = terminal.backend();

    assert!(screen.row(0).starts_with("Matter Master Lab · Gas Station · Air"));
    assert!(screen.row(1).contains("It has weight"));
    assert!(screen.row(2).contains("q quit"));
}
