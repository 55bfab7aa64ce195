//! Gas release, spread and observation through the `App`.

use matter_engine::{
    ActiveStation, App, DensityLabel, Gas, GasError, GasStation, Station, TemperatureLabel,
};

use crate::common::{Clock, app_at, cycling_sampler};

fn gas(app: &App) -> &GasStation {
    match app.active() {
        ActiveStation::Gas(station) => station,
        _ => panic!("expected the gas station"),
    }
}

#[test]
fn release_spreads_then_shows_weight_fact() {
    let clock = Clock::new();
    let mut app = app_at(Station::Gas);
    app.select_gas(Gas::Steam);
    app.release_gas(clock.at(0)).unwrap();

    assert_eq!(
        app.status_line(clock.at(0)),
        "The Steam spreads out to fill the whole room!"
    );
    assert!(gas(&app).particles().iter().all(|p| p.top == 90.0));

    app.tick(clock.at(100));
    // Sampler 0.5: middle of the room, middle of the steam band.
    assert!(gas(&app).particles().iter().all(|p| p.left == 50.0 && p.top == 30.0));
    assert!(!gas(&app).show_observation());

    app.tick(clock.at(2100));
    assert!(gas(&app).show_observation());
    assert_eq!(app.status_line(clock.at(2100)), Gas::Steam.info().weight_fact);
}

#[test]
fn cycling_sampler_scatters_particles() {
    let clock = Clock::new();
    let mut app = App::new(None).with_sampler(cycling_sampler(vec![0.0, 1.0]));
    app.navigate(Station::Gas);
    app.fewer_particles(clock.at(0)).unwrap();
    app.fewer_particles(clock.at(0)).unwrap();
    app.fewer_particles(clock.at(0)).unwrap();
    app.fewer_particles(clock.at(0)).unwrap();
    assert_eq!(gas(&app).particle_count(), 20);
    assert_eq!(gas(&app).density_label(), DensityLabel::Low);

    app.release_gas(clock.at(0)).unwrap();
    let durations: Vec<f64> = gas(&app).particles().iter().map(|p| p.duration).collect();
    assert_eq!(&durations[..2], &[5.0, 7.0]);

    app.tick(clock.at(100));
    // Air settles between 10% and 90%.
    let first = gas(&app).particles()[0];
    assert_eq!((first.left, first.top), (5.0, 90.0));
}

#[test]
fn temperature_needs_gas_in_the_room() {
    let clock = Clock::new();
    let mut app = app_at(Station::Gas);
    assert_eq!(app.warmer(clock.at(0)), Err(GasError::NotFlowing));
    assert_eq!(app.status_line(clock.at(0)), "Release the gas first!");

    app.release_gas(clock.at(10)).unwrap();
    app.warmer(clock.at(20)).unwrap();
    app.warmer(clock.at(20)).unwrap();
    assert_eq!(gas(&app).temperature(), 2.0);
    assert_eq!(gas(&app).temperature_label(), TemperatureLabel::Hot);
    let particle = gas(&app).particles()[0];
    assert_eq!(gas(&app).drift_seconds(&particle), 3.0);

    assert_eq!(app.more_particles(clock.at(30)), Err(GasError::Flowing));
    assert_eq!(app.status_line(clock.at(30)), "Clear the room first!");
    // Notices fade after three seconds.
    app.tick(clock.at(3030));
    assert_eq!(
        app.status_line(clock.at(3030)),
        "Air is heavier than Helium. That is why an air balloon does not float up!"
    );
}

#[test]
fn clear_room_restores_sliders() {
    let clock = Clock::new();
    let mut app = app_at(Station::Gas);
    app.release_gas(clock.at(0)).unwrap();
    app.cooler(clock.at(0)).unwrap();
    assert_eq!(gas(&app).temperature_label(), TemperatureLabel::Cold);

    app.reset(clock.at(50));
    assert!(gas(&app).particles().is_empty());
    assert_eq!(gas(&app).temperature(), 1.0);
    assert!(!gas(&app).is_flowing());

    // A pending spread from before the clear never fires.
    app.tick(clock.at(5000));
    assert!(gas(&app).particles().is_empty());
    assert_eq!(app.status_line(clock.at(5000)), Gas::Air.info().description);
}

#[test]
fn balloon_pumps_to_five() {
    let mut app = app_at(Station::Gas);
    let sizes: Vec<f64> = (0..10).filter_map(|_| app.pump()).collect();
    assert_eq!(sizes.first(), Some(&1.5));
    assert_eq!(sizes.last(), Some(&5.0));
    assert_eq!(gas(&app).balloon_size(), 5.0);
}
