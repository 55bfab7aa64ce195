//! Gas station: fill a balloon, and release gas into a room to watch it spread.

use std::time::Instant;

use thiserror::Error;

use matter_types::Gas;

use crate::timing::{Deadline, GAS_OBSERVATION_DELAY, GAS_SPREAD_DELAY};

pub const BALLOON_MIN: f64 = 1.0;
pub const BALLOON_MAX: f64 = 5.0;
const BALLOON_STEP: f64 = 0.5;

pub const PARTICLES_MIN: u32 = 20;
pub const PARTICLES_MAX: u32 = 100;
pub const PARTICLES_STEP: u32 = 10;
pub const PARTICLES_DEFAULT: u32 = 60;

pub const TEMPERATURE_MIN: f64 = 0.5;
pub const TEMPERATURE_MAX: f64 = 3.0;
pub const TEMPERATURE_STEP: f64 = 0.5;
pub const TEMPERATURE_DEFAULT: f64 = 1.0;

/// Particles start at the source, bottom center of the room.
const SOURCE_LEFT: f64 = 50.0;
const SOURCE_TOP: f64 = 90.0;
const SPREAD_LEFT: (f64, f64) = (5.0, 95.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GasError {
    #[error("gas is already flowing")]
    Flowing,
    #[error("release the gas first")]
    NotFlowing,
    #[error("value out of range")]
    OutOfRange,
}

/// One gas particle; positions are percentages of the room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub id: usize,
    pub left: f64,
    pub top: f64,
    /// Seconds per drift cycle at normal temperature.
    pub duration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Release {
    Idle,
    /// Particles sit at the source until the spread deadline.
    Emerging(Deadline),
    Spreading(Deadline),
    Observed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureLabel {
    Cold,
    Normal,
    Hot,
}

impl TemperatureLabel {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TemperatureLabel::Cold => "Cold",
            TemperatureLabel::Normal => "Normal",
            TemperatureLabel::Hot => "Hot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityLabel {
    Low,
    Medium,
    High,
}

impl DensityLabel {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DensityLabel::Low => "Low",
            DensityLabel::Medium => "Medium",
            DensityLabel::High => "High",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GasStation {
    gas: Gas,
    balloon_size: f64,
    particles: Vec<Particle>,
    release: Release,
    temperature: f64,
    particle_count: u32,
    microscope: bool,
}

impl Default for GasStation {
    fn default() -> Self {
        Self::new(Gas::default())
    }
}

/// Uniform sample in `[low, high)` from a unit sampler.
fn uniform(sample: &mut impl FnMut() -> f64, (low, high): (f64, f64)) -> f64 {
    low + sample().clamp(0.0, 1.0) * (high - low)
}

impl GasStation {
    #[must_use]
    pub fn new(gas: Gas) -> Self {
        Self {
            gas,
            balloon_size: BALLOON_MIN,
            particles: Vec::new(),
            release: Release::Idle,
            temperature: TEMPERATURE_DEFAULT,
            particle_count: PARTICLES_DEFAULT,
            microscope: false,
        }
    }

    #[must_use]
    pub fn gas(&self) -> Gas {
        self.gas
    }

    /// Switch gas; everything but the microscope resets.
    pub fn select_gas(&mut self, gas: Gas) {
        tracing::debug!(?gas, "Gas selected");
        let microscope = self.microscope;
        *self = Self::new(gas);
        self.microscope = microscope;
    }

    /// Pump once; returns the new balloon size.
    pub fn pump(&mut self) -> f64 {
        self.balloon_size = (self.balloon_size + BALLOON_STEP).min(BALLOON_MAX);
        self.balloon_size
    }

    #[must_use]
    pub fn balloon_size(&self) -> f64 {
        self.balloon_size
    }

    #[must_use]
    pub fn is_flowing(&self) -> bool {
        !matches!(self.release, Release::Idle)
    }

    #[must_use]
    pub fn show_observation(&self) -> bool {
        matches!(self.release, Release::Observed)
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn particle_count(&self) -> u32 {
        self.particle_count
    }

    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Density can only be changed before the gas is released.
    pub fn set_particle_count(&mut self, count: u32) -> Result<(), GasError> {
        if self.is_flowing() {
            return Err(GasError::Flowing);
        }
        if !(PARTICLES_MIN..=PARTICLES_MAX).contains(&count)
            || !count.is_multiple_of(PARTICLES_STEP)
        {
            return Err(GasError::OutOfRange);
        }
        self.particle_count = count;
        Ok(())
    }

    pub fn more_particles(&mut self) -> Result<(), GasError> {
        self.set_particle_count(self.particle_count + PARTICLES_STEP)
    }

    pub fn fewer_particles(&mut self) -> Result<(), GasError> {
        let count = self
            .particle_count
            .checked_sub(PARTICLES_STEP)
            .ok_or(GasError::OutOfRange)?;
        self.set_particle_count(count)
    }

    /// Temperature can only be changed while the gas is in the room.
    pub fn set_temperature(&mut self, temperature: f64) -> Result<(), GasError> {
        if !self.is_flowing() {
            return Err(GasError::NotFlowing);
        }
        let steps = temperature / TEMPERATURE_STEP;
        if !(TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&temperature) || steps.fract() != 0.0 {
            return Err(GasError::OutOfRange);
        }
        self.temperature = temperature;
        Ok(())
    }

    pub fn warmer(&mut self) -> Result<(), GasError> {
        self.set_temperature(self.temperature + TEMPERATURE_STEP)
    }

    pub fn cooler(&mut self) -> Result<(), GasError> {
        self.set_temperature(self.temperature - TEMPERATURE_STEP)
    }

    #[must_use]
    pub fn temperature_label(&self) -> TemperatureLabel {
        if self.temperature < 1.0 {
            TemperatureLabel::Cold
        } else if self.temperature > 1.5 {
            TemperatureLabel::Hot
        } else {
            TemperatureLabel::Normal
        }
    }

    #[must_use]
    pub fn density_label(&self) -> DensityLabel {
        if self.particle_count < 40 {
            DensityLabel::Low
        } else if self.particle_count > 80 {
            DensityLabel::High
        } else {
            DensityLabel::Medium
        }
    }

    /// Seconds per drift cycle for `particle` at the current temperature.
    #[must_use]
    pub fn drift_seconds(&self, particle: &Particle) -> f64 {
        particle.duration / self.temperature
    }

    /// Release the gas: particles appear at the source and spread shortly after.
    pub fn release(
        &mut self,
        now: Instant,
        sample: &mut impl FnMut() -> f64,
    ) -> Result<(), GasError> {
        if self.is_flowing() {
            return Err(GasError::Flowing);
        }
        let base = self.gas.info().base_speed;
        self.particles = (0..self.particle_count as usize)
            .map(|id| Particle {
                id,
                left: SOURCE_LEFT,
                top: SOURCE_TOP,
                duration: base + uniform(sample, (-1.0, 1.0)),
            })
            .collect();
        self.release = Release::Emerging(Deadline::after(now, GAS_SPREAD_DELAY));
        tracing::debug!(gas = ?self.gas, count = self.particle_count, "Gas released");
        Ok(())
    }

    pub fn poll(&mut self, now: Instant, sample: &mut impl FnMut() -> f64) {
        if let Release::Emerging(spread_at) = self.release
            && spread_at.is_due(now)
        {
            let band = self.gas.info().settle_band;
            for particle in &mut self.particles {
                particle.left = uniform(sample, SPREAD_LEFT);
                particle.top = uniform(sample, band);
            }
            self.release = Release::Spreading(Deadline::after(
                spread_at.at(),
                GAS_OBSERVATION_DELAY,
            ));
        }
        if let Release::Spreading(observe_at) = self.release
            && observe_at.is_due(now)
        {
            self.release = Release::Observed;
        }
    }

    /// Clear the room and restore the sliders.
    pub fn clear_room(&mut self) {
        self.particles.clear();
        self.release = Release::Idle;
        self.temperature = TEMPERATURE_DEFAULT;
        self.particle_count = PARTICLES_DEFAULT;
    }

    pub fn toggle_microscope(&mut self) -> bool {
        self.microscope = !self.microscope;
        self.microscope
    }

    #[must_use]
    pub fn microscope(&self) -> bool {
        self.microscope
    }

    #[must_use]
    pub fn status_message(&self) -> String {
        let info = self.gas.info();
        match self.release {
            Release::Observed => info.weight_fact.to_string(),
            Release::Emerging(_) | Release::Spreading(_) => {
                format!("The {} spreads out to fill the whole room!", info.name)
            }
            Release::Idle => info.description.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn constant(value: f64) -> impl FnMut() -> f64 {
        move || value
    }

    #[test]
    fn pump_caps_at_five() {
        let mut station = GasStation::default();
        let sizes: Vec<f64> = (0..10).map(|_| station.pump()).collect();
        assert_eq!(sizes[0], 1.5);
        assert_eq!(sizes[7], 5.0);
        assert_eq!(station.balloon_size(), BALLOON_MAX);
    }

    #[test]
    fn release_places_particles_at_source_then_spreads() {
        let t0 = Instant::now();
        let mut station = GasStation::new(Gas::Helium);
        let mut sample = constant(0.5);
        station.release(t0, &mut sample).unwrap();
        assert_eq!(station.particles().len(), 60);
        assert!(station.particles().iter().all(|p| p.left == 50.0 && p.top == 90.0));
        assert!(station.particles().iter().all(|p| p.duration == 3.0));

        station.poll(t0 + 99 * MS, &mut sample);
        assert_eq!(station.particles()[0].top, 90.0);
        station.poll(t0 + 100 * MS, &mut sample);
        // Helium settles in the top 30%.
        assert!(station.particles().iter().all(|p| p.top == 15.0 && p.left == 50.0));
        assert!(!station.show_observation());

        station.poll(t0 + 2099 * MS, &mut sample);
        assert!(!station.show_observation());
        station.poll(t0 + 2100 * MS, &mut sample);
        assert!(station.show_observation());
        assert_eq!(station.status_message(), Gas::Helium.info().weight_fact);
    }

    #[test]
    fn spread_bands_per_gas() {
        let t0 = Instant::now();
        for (gas, expected_max_top) in [(Gas::Air, 90.0), (Gas::Helium, 30.0), (Gas::Steam, 60.0)] {
            let mut station = GasStation::new(gas);
            let mut sample = constant(1.0);
            station.release(t0, &mut sample).unwrap();
            station.poll(t0 + 100 * MS, &mut sample);
            assert!(station.particles().iter().all(|p| p.top == expected_max_top), "{gas:?}");
        }
    }

    #[test]
    fn release_rejected_while_flowing() {
        let t0 = Instant::now();
        let mut station = GasStation::default();
        let mut sample = constant(0.0);
        station.release(t0, &mut sample).unwrap();
        assert_eq!(station.release(t0, &mut sample), Err(GasError::Flowing));
    }

    #[test]
    fn particle_count_only_before_release() {
        let t0 = Instant::now();
        let mut station = GasStation::default();
        station.set_particle_count(20).unwrap();
        assert_eq!(station.density_label(), DensityLabel::Low);
        assert_eq!(station.fewer_particles(), Err(GasError::OutOfRange));
        assert_eq!(station.set_particle_count(25), Err(GasError::OutOfRange));
        assert_eq!(station.set_particle_count(110), Err(GasError::OutOfRange));
        station.set_particle_count(90).unwrap();
        assert_eq!(station.density_label(), DensityLabel::High);

        station.release(t0, &mut constant(0.5)).unwrap();
        assert_eq!(station.particles().len(), 90);
        assert_eq!(station.more_particles(), Err(GasError::Flowing));
    }

    #[test]
    fn temperature_only_while_flowing() {
        let t0 = Instant::now();
        let mut station = GasStation::default();
        assert_eq!(station.warmer(), Err(GasError::NotFlowing));

        station.release(t0, &mut constant(0.5)).unwrap();
        station.warmer().unwrap();
        station.warmer().unwrap();
        assert_eq!(station.temperature(), 2.0);
        assert_eq!(station.temperature_label(), TemperatureLabel::Hot);
        let particle = station.particles()[0];
        assert_eq!(station.drift_seconds(&particle), 3.0);

        station.set_temperature(0.5).unwrap();
        assert_eq!(station.temperature_label(), TemperatureLabel::Cold);
        assert_eq!(station.cooler(), Err(GasError::OutOfRange));
        assert_eq!(station.set_temperature(3.5), Err(GasError::OutOfRange));
        assert_eq!(station.set_temperature(1.25), Err(GasError::OutOfRange));
    }

    #[test]
    fn clear_room_resets_sliders() {
        let t0 = Instant::now();
        let mut station = GasStation::default();
        station.set_particle_count(30).unwrap();
        station.release(t0, &mut constant(0.5)).unwrap();
        station.warmer().unwrap();
        station.clear_room();
        assert!(!station.is_flowing());
        assert!(station.particles().is_empty());
        assert_eq!(station.particle_count(), PARTICLES_DEFAULT);
        assert_eq!(station.temperature(), TEMPERATURE_DEFAULT);
    }

    #[test]
    fn select_gas_resets_balloon() {
        let mut station = GasStation::default();
        station.pump();
        station.toggle_microscope();
        station.select_gas(Gas::Steam);
        assert_eq!(station.gas(), Gas::Steam);
        assert_eq!(station.balloon_size(), BALLOON_MIN);
        assert!(station.microscope());
    }
}
