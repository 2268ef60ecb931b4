//! Circle-vs-cell overlap test.
//!
//! Hazards are circles and grid cells are axis-aligned squares in the
//! ground plane. Time is not a physical extent, so it never enters the test.

use glam::DVec2;

/// True if a circle of `radius` at `center` touches the box centred at
/// `box_center` with half-size `half_extents`.
pub fn circle_overlaps_box(center: DVec2, radius: f64, box_center: DVec2, half_extents: DVec2) -> bool {
    let closest = center.clamp(box_center - half_extents, box_center + half_extents);
    closest.distance_squared(center) <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF: DVec2 = DVec2::splat(0.5);

    #[test]
    fn test_center_inside_box() {
        assert!(circle_overlaps_box(DVec2::new(0.2, -0.1), 0.0, DVec2::ZERO, HALF));
    }

    #[test]
    fn test_touching_edge() {
        // Box spans [-0.5, 0.5]; circle at x=1.0 with r=0.5 touches x=0.5.
        assert!(circle_overlaps_box(DVec2::new(1.0, 0.0), 0.5, DVec2::ZERO, HALF));
        assert!(!circle_overlaps_box(DVec2::new(1.01, 0.0), 0.5, DVec2::ZERO, HALF));
    }

    #[test]
    fn test_corner_uses_euclidean_distance() {
        // Nearest box point is the corner (0.5, 0.5); distance = sqrt(0.5) ≈ 0.707.
        let center = DVec2::new(1.0, 1.0);
        assert!(!circle_overlaps_box(center, 0.7, DVec2::ZERO, HALF));
        assert!(circle_overlaps_box(center, 0.71, DVec2::ZERO, HALF));
    }

    #[test]
    fn test_offset_box() {
        let box_center = DVec2::new(10.0, -3.0);
        assert!(circle_overlaps_box(DVec2::new(11.2, -3.0), 0.75, box_center, HALF));
        assert!(!circle_overlaps_box(DVec2::new(0.0, 0.0), 0.75, box_center, HALF));
    }
}
