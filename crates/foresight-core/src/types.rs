//! Fundamental coordinate types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Integer index of one space-time cell.
///
/// `x` and `y` are spatial cell indices, `t` is the time-step index.
/// Values only mean something relative to the grid that produced them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoords {
    pub x: i32,
    pub t: i32,
    pub y: i32,
}

impl GridCoords {
    pub const fn new(x: i32, t: i32, y: i32) -> Self {
        Self { x, t, y }
    }

    /// Coordinates shifted by `(dx, dt, dy)`.
    pub const fn offset(self, dx: i32, dt: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            t: self.t + dt,
            y: self.y + dy,
        }
    }

    /// Euclidean distance over the two spatial axes, in cells.
    ///
    /// Differences are taken in `f64`, so coordinates anywhere in the `i32`
    /// range are fine.
    pub fn spatial_distance(&self, other: &GridCoords) -> f64 {
        let dx = axis_delta(self.x, other.x);
        let dy = axis_delta(self.y, other.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Euclidean distance over all three axes, in cells and time steps.
    pub fn distance(&self, other: &GridCoords) -> f64 {
        let dx = axis_delta(self.x, other.x);
        let dt = axis_delta(self.t, other.t);
        let dy = axis_delta(self.y, other.y);
        (dx * dx + dt * dt + dy * dy).sqrt()
    }

    /// True if both coordinates lie on the same time slice.
    pub fn same_slice(&self, other: &GridCoords) -> bool {
        self.t == other.t
    }
}

fn axis_delta(from: i32, to: i32) -> f64 {
    f64::from(to) - f64::from(from)
}

impl std::fmt::Display for GridCoords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, t{}, {})", self.x, self.t, self.y)
    }
}

/// A world position paired with a time offset into the prediction horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpacetimePoint {
    /// World-space position (meters).
    pub position: DVec2,
    /// Seconds from the start of the horizon.
    pub time: f64,
}

impl SpacetimePoint {
    pub fn new(position: DVec2, time: f64) -> Self {
        Self { position, time }
    }
}

/// Fixed-step simulation clock of the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Ticks completed so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
