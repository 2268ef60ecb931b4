//! Hazard trajectory predictors for FORESIGHT.
//!
//! Closed-form motion models that report where a hazard will be at a time
//! offset, how densely to sample them, and whether they touch a grid cell.
//! Pure functions on plain data; no grid or ECS dependency.

pub mod collision;
pub mod linear;
pub mod predictor;
pub mod stationary;
pub mod wave;

pub use foresight_core as core;

pub use linear::LinearPredictor;
pub use predictor::{Hazard, Predictor, Trajectory};
pub use stationary::StaticPredictor;
pub use wave::WavePredictor;

/// `ceil(value)` as a sample count. Non-finite and non-positive values give 0.
pub(crate) fn ceil_count(value: f64) -> usize {
    if value.is_finite() && value > 0.0 {
        value.ceil() as usize
    } else {
        0
    }
}
