//! Cost metrics and frontier priority policies.

use foresight_core::config::{CostMetric, PriorityConvention};
use foresight_core::types::GridCoords;

/// Turns a node's cost and heuristic into its frontier key.
///
/// Lower keys are expanded first. Implement this to experiment with
/// orderings without touching the search loop.
pub trait PriorityPolicy {
    fn priority(&self, g: f64, h: f64, position: GridCoords) -> f64;
}

impl PriorityPolicy for PriorityConvention {
    fn priority(&self, g: f64, h: f64, position: GridCoords) -> f64 {
        match self {
            PriorityConvention::Additive => g + h,
            PriorityConvention::TimeScaled => (g + h) * (position.t as f64 + 1.0),
        }
    }
}

/// Distance between two cells under `metric`, used for both `g` and `h`.
pub fn metric_distance(metric: CostMetric, a: &GridCoords, b: &GridCoords) -> f64 {
    match metric {
        CostMetric::Spacetime => a.distance(b),
        CostMetric::Spatial => a.spatial_distance(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_additive_ignores_time() {
        let p = PriorityConvention::Additive;
        assert_relative_eq!(p.priority(1.5, 2.0, GridCoords::new(0, 7, 0)), 3.5);
    }

    #[test]
    fn test_time_scaled_grows_with_slice() {
        let p = PriorityConvention::TimeScaled;
        assert_relative_eq!(p.priority(1.0, 2.0, GridCoords::new(0, 0, 0)), 3.0);
        assert_relative_eq!(p.priority(1.0, 2.0, GridCoords::new(0, 2, 0)), 9.0);
    }

    #[test]
    fn test_metrics() {
        let a = GridCoords::new(0, 0, 0);
        let b = GridCoords::new(3, 5, 4);
        assert_relative_eq!(metric_distance(CostMetric::Spatial, &a, &b), 5.0);
        assert_relative_eq!(metric_distance(CostMetric::Spacetime, &a, &b), 50f64.sqrt());
    }
}
