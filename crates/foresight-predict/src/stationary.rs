//! Hazard that never moves.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::predictor::Trajectory;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticPredictor {
    pub origin: DVec2,
    pub radius: f64,
}

impl StaticPredictor {
    pub fn new(origin: DVec2, radius: f64) -> Self {
        Self { origin, radius }
    }
}

impl Trajectory for StaticPredictor {
    fn position(&self, _time: f64) -> DVec2 {
        self.origin
    }

    /// Nothing moves, so no extra samples are needed.
    fn sample_count(&self, _horizon: f64, _resolution: f64) -> usize {
        0
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}
