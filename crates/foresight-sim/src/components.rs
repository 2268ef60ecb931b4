//! ECS components of the host world.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use foresight_core::config::HazardKind;
use foresight_predict::{Hazard, LinearPredictor, Predictor, StaticPredictor, WavePredictor};

/// Ground-plane position (meters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPosition(pub DVec2);

/// How a hazard moves once spawned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HazardMotion {
    /// Constant velocity along `direction` (unit vector).
    Linear { direction: DVec2, speed: f64 },
    /// Closed-form weave, phase zero at spawn.
    Wave(WavePredictor),
    Static,
}

/// A hazard's motion model and footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardBody {
    pub motion: HazardMotion,
    /// Bounding-box width (meters).
    pub bounding_box_width: f64,
    /// Simulation time at spawn (seconds).
    pub spawned_at: f64,
}

impl HazardBody {
    pub fn kind(&self) -> HazardKind {
        match self.motion {
            HazardMotion::Linear { .. } => HazardKind::Linear,
            HazardMotion::Wave(_) => HazardKind::Wave,
            HazardMotion::Static => HazardKind::Static,
        }
    }

    /// Prediction of this hazard's future path from its current state.
    pub fn predict(&self, position: DVec2, now: f64) -> Hazard {
        let predictor: Predictor = match self.motion {
            HazardMotion::Linear { direction, speed } => {
                LinearPredictor::new(position, direction, speed, 0.0).into()
            }
            HazardMotion::Wave(wave) => wave.with_elapsed(now - self.spawned_at).into(),
            HazardMotion::Static => StaticPredictor::new(position, 0.0).into(),
        };
        Hazard::new(predictor, self.bounding_box_width)
    }
}

/// Seconds until despawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lifetime {
    pub remaining_secs: f64,
}

/// The agent that follows the planned path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Movement speed (m/s).
    pub speed: f64,
    /// Collision radius (meters).
    pub radius: f64,
    /// World position the actor is currently heading for.
    pub waypoint: Option<DVec2>,
}
