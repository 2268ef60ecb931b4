//! Constant-velocity hazard.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::ceil_count;
use crate::predictor::Trajectory;

/// Hazard travelling in a straight line at constant speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearPredictor {
    pub origin: DVec2,
    /// Unit travel direction (zero for a hazard with no heading).
    pub direction: DVec2,
    /// Meters per second.
    pub speed: f64,
    /// Collision radius (meters).
    pub radius: f64,
}

impl LinearPredictor {
    /// `direction` is normalized; a zero vector yields a stationary hazard.
    pub fn new(origin: DVec2, direction: DVec2, speed: f64, radius: f64) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            speed,
            radius,
        }
    }

    /// Hazard at `origin` heading straight for `target`.
    pub fn toward(origin: DVec2, target: DVec2, speed: f64, radius: f64) -> Self {
        Self::new(origin, target - origin, speed, radius)
    }

    /// Velocity vector (m/s).
    pub fn velocity(&self) -> DVec2 {
        self.direction * self.speed
    }
}

impl Trajectory for LinearPredictor {
    fn position(&self, time: f64) -> DVec2 {
        self.origin + self.velocity() * time
    }

    fn sample_count(&self, horizon: f64, resolution: f64) -> usize {
        let travelled = self.position(horizon).distance(self.origin);
        ceil_count(travelled / resolution)
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}
