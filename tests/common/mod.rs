//! Shared test utilities and fixtures
//!
//! Apps are driven on a simulated clock: every call takes `clock.at(ms)`
//! instead of reading the wall clock.

#![allow(dead_code)]

use std::time::{Duration, Instant};

use matter_engine::{App, LabConfig, Station};

/// Simulated time anchored at construction.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    t0: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self { t0: Instant::now() }
    }

    pub fn at(self, ms: u64) -> Instant {
        self.t0 + Duration::from_millis(ms)
    }
}

pub fn config(toml_src: &str) -> LabConfig {
    toml::from_str(toml_src).expect("test config parses")
}

/// App with a fixed sampler so particle positions are predictable.
pub fn app_at(station: Station) -> App {
    let mut app = App::new(None).with_sampler(|| 0.5);
    app.navigate(station);
    app
}

/// Sampler cycling through `values`.
pub fn cycling_sampler(values: Vec<f64>) -> impl FnMut() -> f64 {
    let mut index = 0;
    move || {
        let value = values[index % values.len()];
        index += 1;
        value
    }
}
