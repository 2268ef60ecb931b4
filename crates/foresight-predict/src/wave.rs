//! Sinusoidally weaving hazard.
//!
//! In its local frame the hazard follows `(p * wavelength, sin(p) * amplitude)`
//! where `p = (time + elapsed) / period * 2π`. The local frame is rotated by
//! the travel angle and placed at the origin.

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::ceil_count;
use crate::predictor::Trajectory;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavePredictor {
    /// Where the wave started (phase zero).
    pub origin: DVec2,
    /// Heading of the local x axis (radians, counter-clockwise from +x).
    pub travel_angle: f64,
    /// Seconds per oscillation.
    pub period: f64,
    /// Lateral amplitude (meters).
    pub amplitude: f64,
    /// Forward meters per radian of phase.
    pub wavelength: f64,
    /// Seconds the hazard has already been in flight.
    pub elapsed: f64,
    /// Collision radius (meters).
    pub radius: f64,
}

impl WavePredictor {
    pub fn new(
        origin: DVec2,
        travel_angle: f64,
        period: f64,
        amplitude: f64,
        wavelength: f64,
        radius: f64,
    ) -> Self {
        Self {
            origin,
            travel_angle,
            period,
            amplitude,
            wavelength,
            elapsed: 0.0,
            radius,
        }
    }

    /// Wave starting at `origin` whose mean path heads for `target`.
    pub fn toward(
        origin: DVec2,
        target: DVec2,
        period: f64,
        amplitude: f64,
        wavelength: f64,
        radius: f64,
    ) -> Self {
        let heading = target - origin;
        Self::new(
            origin,
            heading.y.atan2(heading.x),
            period,
            amplitude,
            wavelength,
            radius,
        )
    }

    /// Same wave, but `elapsed` seconds already into its flight.
    pub fn with_elapsed(mut self, elapsed: f64) -> Self {
        self.elapsed = elapsed;
        self
    }

    fn has_period(&self) -> bool {
        self.period.is_finite() && self.period > 0.0
    }
}

impl Trajectory for WavePredictor {
    fn position(&self, time: f64) -> DVec2 {
        if !self.has_period() {
            return self.origin;
        }
        let progress = (time + self.elapsed) / self.period * TAU;
        let local = DVec2::new(progress * self.wavelength, progress.sin() * self.amplitude);
        self.origin + DVec2::from_angle(self.travel_angle).rotate(local)
    }

    /// Arc length is approximated by `2π · amplitude · wavelength` per period.
    fn sample_count(&self, horizon: f64, resolution: f64) -> usize {
        if !self.has_period() {
            return 0;
        }
        let per_period = TAU * self.amplitude * self.wavelength / resolution;
        ceil_count(horizon / self.period * per_period)
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}
