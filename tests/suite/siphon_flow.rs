//! Siphon behavior on the liquid station under simulated time.

use matter_engine::{
    ActiveStation, App, Liquid, LiquidStation, RefillError, SiphonError, SiphonStatus, Station,
};

use crate::common::{Clock, app_at, config};

const TICK_MS: u64 = 30;

fn liquid(app: &App) -> &LiquidStation {
    match app.active() {
        ActiveStation::Liquid(station) => station,
        _ => panic!("expected the liquid station"),
    }
}

fn levels(app: &App) -> (f64, f64) {
    let state = liquid(app).siphon().state();
    (state.source_level(), state.sink_level())
}

/// Tick once per period, like the frame loop would.
fn run_ticks(app: &mut App, clock: Clock, start_ms: u64, ticks: u64) {
    for n in 1..=ticks {
        app.tick(clock.at(start_ms + n * TICK_MS));
    }
}

#[test]
fn full_drain_takes_200_ticks() {
    let clock = Clock::new();
    let mut app = app_at(Station::Liquid);
    app.start_flow(clock.at(0)).unwrap();

    run_ticks(&mut app, clock, 0, 199);
    assert!(liquid(&app).siphon().state().is_active());
    assert_eq!(levels(&app), (0.5, 74.625));

    run_ticks(&mut app, clock, 199 * TICK_MS, 1);
    assert_eq!(levels(&app), (0.0, 75.0));
    assert!(!liquid(&app).siphon().state().is_active());
    assert!(!liquid(&app).siphon().timer_armed());
    assert_eq!(
        app.status_line(clock.at(6000)),
        "Great job! The Water changed shape!"
    );

    // No further change once stopped.
    run_ticks(&mut app, clock, 6000, 50);
    assert_eq!(levels(&app), (0.0, 75.0));
}

#[test]
fn empty_source_warning_expires_after_three_seconds() {
    let clock = Clock::new();
    let mut app = app_at(Station::Liquid);
    app.start_flow(clock.at(0)).unwrap();
    run_ticks(&mut app, clock, 0, 200);

    assert_eq!(app.start_flow(clock.at(7000)), Err(SiphonError::EmptySource));
    assert_eq!(
        liquid(&app).siphon().status(clock.at(7000)),
        SiphonStatus::Warning(SiphonError::EmptySource)
    );
    assert_eq!(app.status_line(clock.at(9999)), "The cylinder is empty!");

    app.tick(clock.at(10_000));
    assert_eq!(
        app.status_line(clock.at(10_000)),
        "Great job! The Water changed shape!"
    );
}

#[test]
fn refill_guarded_while_flowing_and_when_nearly_full() {
    let clock = Clock::new();
    let mut app = app_at(Station::Liquid);
    assert_eq!(app.refill(), Err(RefillError::AlreadyFull));

    app.start_flow(clock.at(0)).unwrap();
    run_ticks(&mut app, clock, 0, 20);
    assert_eq!(app.refill(), Err(RefillError::Flowing));
    assert_eq!(app.status_line(clock.at(600)), "Water is flowing!");

    app.select_liquid(Liquid::Milk);
    assert_eq!(app.status_line(clock.at(600)), "Ready to flow!");
}

#[test]
fn refill_after_drain_restores_levels() {
    let clock = Clock::new();
    let mut app = app_at(Station::Liquid);
    app.start_flow(clock.at(0)).unwrap();
    run_ticks(&mut app, clock, 0, 200);
    app.start_flow(clock.at(6100)).unwrap_err();

    app.reset(clock.at(6200));
    assert_eq!(levels(&app), (100.0, 0.0));
    assert_eq!(app.status_line(clock.at(6200)), "Ready to flow!");
}

#[test]
fn switching_liquid_mid_flow_cancels_timer() {
    let clock = Clock::new();
    let mut app = app_at(Station::Liquid);
    app.start_flow(clock.at(0)).unwrap();
    run_ticks(&mut app, clock, 0, 10);
    assert_eq!(levels(&app), (95.0, 3.75));

    app.select_liquid(Liquid::Oil);
    run_ticks(&mut app, clock, 300, 10);
    assert_eq!(levels(&app), (100.0, 0.0));
    assert_eq!(liquid(&app).liquid(), Liquid::Oil);
}

#[test]
fn stalled_frame_replays_bounded_backlog() {
    let clock = Clock::new();
    let mut app = app_at(Station::Liquid);
    app.start_flow(clock.at(0)).unwrap();

    app.tick(clock.at(10_000));
    assert_eq!(levels(&app), (68.0, 24.0));
    app.tick(clock.at(10_030));
    assert_eq!(levels(&app), (67.5, 24.375));
}

#[test]
fn tick_period_follows_config() {
    let clock = Clock::new();
    let config = config("[app]\nstart_station = \"liquid\"\n[timing]\nsiphon_tick_ms = 10\n");
    let mut app = App::new(Some(&config));
    app.start_flow(clock.at(0)).unwrap();
    for n in 1..=10 {
        app.tick(clock.at(n * 10));
    }
    assert_eq!(levels(&app), (95.0, 3.75));
}

#[test]
fn refill_notice_follows_configured_warning_time() {
    let clock = Clock::new();
    let config = config("[app]\nstart_station = \"liquid\"\n[timing]\nwarning_ms = 1000\n");
    let mut app = App::new(Some(&config));

    // Still full, so the refill is rejected with a notice.
    app.reset(clock.at(0));
    assert_eq!(app.notice(clock.at(999)), Some("The cylinder is already full!"));

    app.tick(clock.at(1500));
    assert_eq!(app.notice(clock.at(1500)), None);
    assert_eq!(app.status_line(clock.at(1500)), "Ready to flow!");
}
