//! Sorting game driven through the `App`, the way key presses reach it.

use matter_engine::{ActiveStation, App, Category, DropOutcome, Station};

use crate::common::{Clock, app_at, config};

fn session_pool(app: &App) -> Vec<&'static str> {
    match app.active() {
        ActiveStation::Intro(session) => session.pool().iter().map(|i| i.id.as_str()).collect(),
        _ => Vec::new(),
    }
}

/// Sort every remaining item by always dropping the first one correctly.
fn sort_all(app: &mut App, clock: Clock, at_ms: u64) {
    for category in [
        Category::Natural,
        Category::Natural,
        Category::ManMade,
        Category::ManMade,
    ] {
        app.drop_into(category, clock.at(at_ms));
    }
}

#[test]
fn wrong_basket_keeps_item_and_says_oops() {
    let clock = Clock::new();
    let mut app = app_at(Station::Intro);
    app.pick_up();

    let outcome = app.drop_into(Category::ManMade, clock.at(0));

    assert_eq!(outcome, Some(DropOutcome::Incorrect));
    assert_eq!(session_pool(&app), vec!["plant", "cat", "chair", "book"]);
    assert_eq!(app.status_line(clock.at(0)), "Oops! Try the other basket.");
}

#[test]
fn four_correct_drops_complete_then_move_to_solid() {
    let clock = Clock::new();
    let mut app = app_at(Station::Intro);
    sort_all(&mut app, clock, 100);

    assert!(session_pool(&app).is_empty());
    assert_eq!(
        app.status_line(clock.at(100)),
        "You did it! Let's explore States of Matter!"
    );

    app.tick(clock.at(2099));
    assert_eq!(app.station(), Station::Intro);
    app.tick(clock.at(2100));
    assert_eq!(app.station(), Station::Solid);

    // The fresh solid station has nothing left to fire.
    app.tick(clock.at(10_000));
    assert_eq!(app.station(), Station::Solid);
}

#[test]
fn stale_drops_after_completion_do_nothing() {
    let clock = Clock::new();
    let mut app = app_at(Station::Intro);
    sort_all(&mut app, clock, 0);

    assert_eq!(app.drop_into(Category::Natural, clock.at(500)), None);
    assert_eq!(app.drop_into(Category::ManMade, clock.at(600)), None);

    app.tick(clock.at(2000));
    assert_eq!(app.station(), Station::Solid);
}

#[test]
fn leaving_intro_cancels_pending_completion() {
    let clock = Clock::new();
    let mut app = app_at(Station::Intro);
    sort_all(&mut app, clock, 0);

    app.navigate(Station::Gas);
    app.tick(clock.at(5000));
    assert_eq!(app.station(), Station::Gas);
}

#[test]
fn reset_brings_items_back() {
    let clock = Clock::new();
    let mut app = app_at(Station::Intro);
    app.drop_into(Category::Natural, clock.at(0));
    app.reset(clock.at(0));
    assert_eq!(session_pool(&app).len(), 4);
    assert_eq!(app.status_line(clock.at(0)), "Drag items to the correct basket!");
}

#[test]
fn completion_delay_follows_config() {
    let clock = Clock::new();
    let config = config("[timing]\ncompletion_delay_ms = 500\n");
    let mut app = App::new(Some(&config));
    sort_all(&mut app, clock, 0);

    app.tick(clock.at(499));
    assert_eq!(app.station(), Station::Intro);
    app.tick(clock.at(500));
    assert_eq!(app.station(), Station::Solid);
}
