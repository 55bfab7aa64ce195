//! The `App`: owns the active station and routes user actions to it.
//!
//! Exactly one station's state exists at a time. Navigating drops the old
//! station, and with it any flow timer, warning or pending completion it held.

use std::time::{Duration, Instant};

use matter_config::LabConfig;
use matter_types::ui::{OverlayEffect, UiOptions};
use matter_types::{Category, Gas, Item, ItemId, Liquid, Solid, Station};

use crate::classification::{ClassificationSession, DropOutcome};
use crate::gas::{GasError, GasStation};
use crate::liquid::{Container, LiquidStation, LiquidTab};
use crate::siphon::{RefillError, SiphonError};
use crate::solid::{Location, SolidStation, SolidTab, TowerFull};
use crate::timing::{Timings, Transient};

const MICROSCOPE_POP: Duration = Duration::from_millis(300);
const CELEBRATION_SLIDE: Duration = Duration::from_millis(600);

/// State of the station on screen.
#[derive(Debug)]
pub enum ActiveStation {
    Intro(ClassificationSession),
    Solid(SolidStation),
    Liquid(LiquidStation),
    Gas(GasStation),
}

impl ActiveStation {
    fn build(station: Station, timings: Timings) -> Self {
        match station {
            Station::Intro => ActiveStation::Intro(ClassificationSession::new(
                matter_types::INTRO_ITEMS,
                timings.completion_delay,
            )),
            Station::Solid => ActiveStation::Solid(SolidStation::new()),
            Station::Liquid => ActiveStation::Liquid(LiquidStation::new(timings)),
            Station::Gas => ActiveStation::Gas(GasStation::default()),
        }
    }

    #[must_use]
    pub fn station(&self) -> Station {
        match self {
            ActiveStation::Intro(_) => Station::Intro,
            ActiveStation::Solid(_) => Station::Solid,
            ActiveStation::Liquid(_) => Station::Liquid,
            ActiveStation::Gas(_) => Station::Gas,
        }
    }
}

pub type Sampler = Box<dyn FnMut() -> f64>;

pub struct App {
    active: ActiveStation,
    timings: Timings,
    ui_options: UiOptions,
    /// Index of the highlighted pick-up target.
    cursor: usize,
    /// Intro item picked up and waiting for a basket.
    held_item: Option<ItemId>,
    notice: Option<Transient<String>>,
    overlay: Option<OverlayEffect>,
    last_frame: Instant,
    should_quit: bool,
    sampler: Sampler,
}

impl App {
    #[must_use]
    pub fn new(config: Option<&LabConfig>) -> Self {
        let timings = config.map_or_else(Timings::default, |cfg| {
            Timings::from_config(&cfg.timing())
        });
        let ui_options = config.map(LabConfig::ui_options).unwrap_or_default();
        let start = config
            .and_then(LabConfig::start_station)
            .unwrap_or_default();

        Self {
            active: ActiveStation::build(start, timings),
            timings,
            ui_options,
            cursor: 0,
            held_item: None,
            notice: None,
            overlay: None,
            last_frame: Instant::now(),
            should_quit: false,
            sampler: Box::new(rand::random::<f64>),
        }
    }

    /// Replace the random source used for gas particles.
    #[must_use]
    pub fn with_sampler(mut self, sampler: impl FnMut() -> f64 + 'static) -> Self {
        self.sampler = Box::new(sampler);
        self
    }

    #[must_use]
    pub fn station(&self) -> Station {
        self.active.station()
    }

    #[must_use]
    pub fn active(&self) -> &ActiveStation {
        &self.active
    }

    #[must_use]
    pub fn timings(&self) -> Timings {
        self.timings
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Leave the current station and build a fresh one.
    pub fn navigate(&mut self, station: Station) {
        tracing::debug!(from = %self.station(), to = %station, "Navigate");
        self.active = ActiveStation::build(station, self.timings);
        self.cursor = 0;
        self.held_item = None;
        self.notice = None;
        self.overlay = None;
    }

    pub fn next_station(&mut self) {
        self.navigate(self.station().next());
    }

    /// Advance every timer owned by the active station.
    pub fn tick(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
        match &mut self.active {
            ActiveStation::Intro(session) => {
                if session.poll(now).is_some() {
                    tracing::info!("Sorting complete; moving on to solids");
                    self.navigate(Station::Solid);
                }
            }
            ActiveStation::Solid(solid) => solid.poll(now),
            ActiveStation::Liquid(liquid) => {
                if let Some(reason) = liquid.poll(now) {
                    tracing::debug!(?reason, "Siphon stopped");
                }
            }
            ActiveStation::Gas(gas) => gas.poll(now, &mut self.sampler),
        }
    }

    pub fn frame_elapsed(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        elapsed
    }

    pub fn overlay_effect_mut(&mut self) -> Option<&mut OverlayEffect> {
        self.overlay.as_mut()
    }

    pub fn clear_overlay_effect(&mut self) {
        self.overlay = None;
    }

    fn start_overlay(&mut self, effect: OverlayEffect) {
        if self.ui_options.reduced_motion {
            self.overlay = None;
        } else {
            self.overlay = Some(effect);
            self.last_frame = Instant::now();
        }
    }

    fn set_notice(&mut self, text: impl Into<String>, now: Instant) {
        self.notice = Some(Transient::new(text.into(), now, self.timings.warning_ttl));
    }

    /// Live notice text, if one has not expired yet.
    #[must_use]
    pub fn notice(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| !n.is_expired(now))
            .map(|n| n.value().as_str())
    }

    // ---- cursor and pick-up ----

    fn target_count(&self) -> usize {
        match &self.active {
            ActiveStation::Intro(session) => session.pool().len(),
            ActiveStation::Solid(_) => Solid::ALL.len(),
            ActiveStation::Liquid(_) => Liquid::ALL.len(),
            ActiveStation::Gas(_) => Gas::ALL.len(),
        }
    }

    /// Highlighted pick-up target, clamped to what is still on screen.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor.min(self.target_count().saturating_sub(1))
    }

    pub fn cursor_next(&mut self) {
        let count = self.target_count();
        if count > 0 {
            self.cursor = (self.cursor() + 1) % count;
        }
    }

    pub fn cursor_prev(&mut self) {
        let count = self.target_count();
        if count > 0 {
            self.cursor = (self.cursor() + count - 1) % count;
        }
    }

    #[must_use]
    pub fn held_item(&self) -> Option<ItemId> {
        self.held_item
    }

    fn cursor_item(&self) -> Option<Item> {
        match &self.active {
            ActiveStation::Intro(session) => session.pool().get(self.cursor()).copied(),
            _ => None,
        }
    }

    /// Pick up whatever the cursor highlights.
    pub fn pick_up(&mut self) {
        let cursor = self.cursor();
        let item = self.cursor_item().map(|item| item.id);
        match &mut self.active {
            ActiveStation::Intro(_) => {
                self.held_item = if item == self.held_item { None } else { item };
            }
            ActiveStation::Solid(station) => {
                let solid = Solid::ALL[cursor];
                match station.tab() {
                    SolidTab::Shape => station.shape_mut().pick_up(solid),
                    SolidTab::Stack => station.tower_mut().select(solid),
                }
            }
            ActiveStation::Liquid(station) => station.select_liquid(Liquid::ALL[cursor]),
            ActiveStation::Gas(station) => station.select_gas(Gas::ALL[cursor]),
        }
    }

    // ---- intro ----

    /// Drop the held item (or the highlighted one) into a basket.
    pub fn drop_into(&mut self, basket: Category, now: Instant) -> Option<DropOutcome> {
        let item = self.held_item.or_else(|| self.cursor_item().map(|i| i.id))?;
        let ActiveStation::Intro(session) = &mut self.active else {
            return None;
        };
        let outcome = session.submit_drop(item.as_str(), basket, now);
        match outcome {
            Some(DropOutcome::Incorrect) => {}
            Some(DropOutcome::Correct { finished, .. }) => {
                self.held_item = None;
                if finished {
                    self.start_overlay(OverlayEffect::slide_up(CELEBRATION_SLIDE));
                }
            }
            None => self.held_item = None,
        }
        outcome
    }

    // ---- shared ----

    pub fn toggle_microscope(&mut self) {
        let on = match &mut self.active {
            ActiveStation::Intro(_) => return,
            ActiveStation::Solid(station) => station.toggle_microscope(),
            ActiveStation::Liquid(station) => station.toggle_microscope(),
            ActiveStation::Gas(station) => station.toggle_microscope(),
        };
        if on {
            self.start_overlay(OverlayEffect::pop_scale(MICROSCOPE_POP));
        } else {
            self.overlay = None;
        }
    }

    #[must_use]
    pub fn microscope(&self) -> bool {
        match &self.active {
            ActiveStation::Intro(_) => false,
            ActiveStation::Solid(station) => station.microscope(),
            ActiveStation::Liquid(station) => station.microscope(),
            ActiveStation::Gas(station) => station.microscope(),
        }
    }

    pub fn toggle_tab(&mut self) {
        match &mut self.active {
            ActiveStation::Solid(station) => station.toggle_tab(),
            ActiveStation::Liquid(station) => station.toggle_tab(),
            ActiveStation::Intro(_) | ActiveStation::Gas(_) => {}
        }
    }

    /// Reset the part of the station on screen.
    pub fn reset(&mut self, now: Instant) {
        match &mut self.active {
            ActiveStation::Intro(session) => {
                session.reset();
                self.held_item = None;
                self.overlay = None;
            }
            ActiveStation::Solid(station) => match station.tab() {
                SolidTab::Shape => station.shape_mut().reset(),
                SolidTab::Stack => station.tower_mut().reset(),
            },
            ActiveStation::Liquid(_) => {
                if let Err(err) = self.refill() {
                    tracing::debug!(%err, "Refill rejected");
                    self.set_notice(refill_notice(err), now);
                }
            }
            ActiveStation::Gas(station) => station.clear_room(),
        }
    }

    // ---- solid ----

    pub fn place_solid(&mut self, location: Location) -> Option<Solid> {
        let ActiveStation::Solid(station) = &mut self.active else {
            return None;
        };
        if station.tab() != SolidTab::Shape {
            return None;
        }
        station.shape_mut().place(location)
    }

    pub fn add_block(&mut self, now: Instant) -> Result<usize, TowerFull> {
        let ActiveStation::Solid(station) = &mut self.active else {
            return Err(TowerFull);
        };
        let added = station.tower_mut().add(now);
        if let Err(err) = added {
            self.set_notice(format!("Whoa! {err}."), now);
        }
        added
    }

    // ---- liquid ----

    pub fn select_liquid(&mut self, liquid: Liquid) {
        if let ActiveStation::Liquid(station) = &mut self.active {
            station.select_liquid(liquid);
        }
    }

    pub fn pour(&mut self, target: Container, now: Instant) -> bool {
        match &mut self.active {
            ActiveStation::Liquid(station) if station.tab() == LiquidTab::Shape => {
                station.pour(target, now)
            }
            _ => false,
        }
    }

    /// Start the siphon; a rejection shows up as the siphon's own warning.
    pub fn start_flow(&mut self, now: Instant) -> Result<(), SiphonError> {
        match &mut self.active {
            ActiveStation::Liquid(station) => {
                station.set_tab(LiquidTab::Siphon);
                station.start_flow(now)
            }
            _ => Ok(()),
        }
    }

    pub fn refill(&mut self) -> Result<(), RefillError> {
        match &mut self.active {
            ActiveStation::Liquid(station) => station.refill(),
            _ => Ok(()),
        }
    }

    // ---- gas ----

    fn gas_action(
        &mut self,
        now: Instant,
        action: impl FnOnce(&mut GasStation, &mut Sampler) -> Result<(), GasError>,
    ) -> Result<(), GasError> {
        let ActiveStation::Gas(station) = &mut self.active else {
            return Ok(());
        };
        let result = action(station, &mut self.sampler);
        if let Err(err) = result {
            tracing::debug!(%err, "Gas action rejected");
            self.set_notice(gas_notice(err), now);
        }
        result
    }

    pub fn select_gas(&mut self, gas: Gas) {
        if let ActiveStation::Gas(station) = &mut self.active {
            station.select_gas(gas);
        }
    }

    pub fn pump(&mut self) -> Option<f64> {
        match &mut self.active {
            ActiveStation::Gas(station) => Some(station.pump()),
            _ => None,
        }
    }

    pub fn release_gas(&mut self, now: Instant) -> Result<(), GasError> {
        self.gas_action(now, |station, sampler| station.release(now, sampler))
    }

    pub fn warmer(&mut self, now: Instant) -> Result<(), GasError> {
        self.gas_action(now, |station, _| station.warmer())
    }

    pub fn cooler(&mut self, now: Instant) -> Result<(), GasError> {
        self.gas_action(now, |station, _| station.cooler())
    }

    pub fn more_particles(&mut self, now: Instant) -> Result<(), GasError> {
        self.gas_action(now, |station, _| station.more_particles())
    }

    pub fn fewer_particles(&mut self, now: Instant) -> Result<(), GasError> {
        self.gas_action(now, |station, _| station.fewer_particles())
    }

    /// Line shown under the station body.
    #[must_use]
    pub fn status_line(&self, now: Instant) -> String {
        if let Some(notice) = self.notice(now) {
            return notice.to_string();
        }
        match &self.active {
            ActiveStation::Intro(session) => session.feedback().message(),
            ActiveStation::Solid(station) => station.status_message(),
            ActiveStation::Liquid(station) => station.status_message(now),
            ActiveStation::Gas(station) => station.status_message(),
        }
    }
}

fn refill_notice(err: RefillError) -> &'static str {
    match err {
        RefillError::Flowing => "Wait for the liquid to stop flowing!",
        RefillError::AlreadyFull => "The cylinder is already full!",
    }
}

fn gas_notice(err: GasError) -> &'static str {
    match err {
        GasError::Flowing => "Clear the room first!",
        GasError::NotFlowing => "Release the gas first!",
        GasError::OutOfRange => "That's as far as it goes!",
    }
}
