//! Station switching tears down the old station entirely.

use matter_engine::{ActiveStation, App, Category, Liquid, SiphonStatus, Station};

use crate::common::{Clock, app_at};

#[test]
fn tab_cycles_through_every_station() {
    let mut app = App::new(None);
    let mut seen = vec![app.station()];
    for _ in 0..4 {
        app.next_station();
        seen.push(app.station());
    }
    assert_eq!(
        seen,
        vec![
            Station::Intro,
            Station::Solid,
            Station::Liquid,
            Station::Gas,
            Station::Intro
        ]
    );
}

#[test]
fn leaving_liquid_drops_flow_and_warning() {
    let clock = Clock::new();
    let mut app = app_at(Station::Liquid);
    app.select_liquid(Liquid::Oil);
    app.start_flow(clock.at(0)).unwrap();
    for n in 1..=10 {
        app.tick(clock.at(n * 30));
    }

    app.navigate(Station::Gas);
    app.navigate(Station::Liquid);
    let ActiveStation::Liquid(station) = app.active() else {
        panic!("expected liquid");
    };
    assert_eq!(station.liquid(), Liquid::Water);
    assert!(!station.siphon().timer_armed());
    assert_eq!(station.siphon().state().source_level(), 100.0);
    assert_eq!(station.siphon().status(clock.at(400)), SiphonStatus::Ready);
}

#[test]
fn returning_to_intro_starts_a_fresh_sort() {
    let clock = Clock::new();
    let mut app = app_at(Station::Intro);
    app.drop_into(Category::Natural, clock.at(0));
    app.navigate(Station::Solid);
    app.navigate(Station::Intro);

    let ActiveStation::Intro(session) = app.active() else {
        panic!("expected intro");
    };
    assert_eq!(session.pool().len(), 4);
    assert!(session.bin(Category::Natural).is_empty());
}

#[test]
fn microscope_is_per_visit() {
    let mut app = app_at(Station::Solid);
    app.toggle_microscope();
    assert!(app.microscope());
    assert!(app.overlay_effect_mut().is_some());

    app.navigate(Station::Liquid);
    assert!(!app.microscope());
    assert!(app.overlay_effect_mut().is_none());
}

#[test]
fn notices_do_not_follow_navigation() {
    let clock = Clock::new();
    let mut app = app_at(Station::Gas);
    app.warmer(clock.at(0)).unwrap_err();
    assert!(app.notice(clock.at(0)).is_some());

    app.navigate(Station::Solid);
    assert_eq!(app.notice(clock.at(0)), None);
}

#[test]
fn cursor_resets_on_navigation() {
    let mut app = app_at(Station::Solid);
    app.cursor_next();
    app.cursor_next();
    assert_eq!(app.cursor(), 2);
    app.navigate(Station::Gas);
    assert_eq!(app.cursor(), 0);
}
