//! The predictor capability set and the closed set of motion models.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::collision::circle_overlaps_box;
use crate::linear::LinearPredictor;
use crate::stationary::StaticPredictor;
use crate::wave::WavePredictor;

/// What the occupancy grid needs from a hazard's motion model.
pub trait Trajectory {
    /// Predicted position `time` seconds from now.
    fn position(&self, time: f64) -> DVec2;

    /// Samples needed over `horizon` so consecutive positions stay within
    /// `resolution` meters of each other.
    fn sample_count(&self, horizon: f64, resolution: f64) -> usize;

    /// Collision radius (meters).
    fn radius(&self) -> f64;

    /// True if the hazard, standing at `own`, touches the cell centred at
    /// `cell_center` with half-size `half_extents`.
    fn overlaps_cell(&self, own: DVec2, cell_center: DVec2, half_extents: DVec2) -> bool {
        circle_overlaps_box(own, self.radius(), cell_center, half_extents)
    }
}

/// One of the supported motion models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Predictor {
    Linear(LinearPredictor),
    Wave(WavePredictor),
    Static(StaticPredictor),
}

impl Predictor {
    /// Same motion with a different collision radius.
    pub fn with_radius(self, radius: f64) -> Self {
        match self {
            Predictor::Linear(p) => Predictor::Linear(LinearPredictor { radius, ..p }),
            Predictor::Wave(p) => Predictor::Wave(WavePredictor { radius, ..p }),
            Predictor::Static(p) => Predictor::Static(StaticPredictor { radius, ..p }),
        }
    }

    fn as_trajectory(&self) -> &dyn Trajectory {
        match self {
            Predictor::Linear(p) => p,
            Predictor::Wave(p) => p,
            Predictor::Static(p) => p,
        }
    }
}

impl Trajectory for Predictor {
    fn position(&self, time: f64) -> DVec2 {
        self.as_trajectory().position(time)
    }

    fn sample_count(&self, horizon: f64, resolution: f64) -> usize {
        self.as_trajectory().sample_count(horizon, resolution)
    }

    fn radius(&self) -> f64 {
        self.as_trajectory().radius()
    }
}

impl From<LinearPredictor> for Predictor {
    fn from(p: LinearPredictor) -> Self {
        Predictor::Linear(p)
    }
}

impl From<WavePredictor> for Predictor {
    fn from(p: WavePredictor) -> Self {
        Predictor::Wave(p)
    }
}

impl From<StaticPredictor> for Predictor {
    fn from(p: StaticPredictor) -> Self {
        Predictor::Static(p)
    }
}

/// A predictor plus the footprint used to size the rasterization window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub predictor: Predictor,
    /// Width of the hazard's bounding box (meters).
    pub bounding_box_width: f64,
}

impl Hazard {
    /// The predictor's radius is set to half of `bounding_box_width`.
    pub fn new(predictor: impl Into<Predictor>, bounding_box_width: f64) -> Self {
        Self {
            predictor: predictor.into().with_radius(bounding_box_width / 2.0),
            bounding_box_width,
        }
    }

    /// Grow the footprint by `margin` on every side, e.g. by the actor's
    /// radius so that a free cell is free for the actor's whole body.
    pub fn inflated(&self, margin: f64) -> Self {
        Self::new(self.predictor, self.bounding_box_width + 2.0 * margin.max(0.0))
    }
}
