//! Planner configuration.
//!
//! Every section has a `Default` built from [`crate::constants`] and is
//! `#[serde(default)]`, so a JSON file only needs the fields it changes.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Shape of the space-time occupancy grid and how densely hazards are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    /// Edge length of a spatial cell (meters).
    pub cell_size: f64,
    /// Cells from the anchor to the edge; side length is `2 * radius + 1`.
    pub radius: u32,
    /// Prediction horizon (seconds).
    pub horizon_secs: f64,
    /// Duration of one time slice (seconds).
    pub time_step_secs: f64,
    /// Maximum world distance between consecutive predictor samples (meters).
    pub sample_resolution: f64,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            radius: DEFAULT_GRID_RADIUS,
            horizon_secs: DEFAULT_HORIZON_SECS,
            time_step_secs: DEFAULT_TIME_STEP_SECS,
            sample_resolution: DEFAULT_SAMPLE_RESOLUTION,
        }
    }
}

impl GridParams {
    /// Time slices the horizon is split into.
    pub fn time_step_count(&self) -> f64 {
        (self.horizon_secs / self.time_step_secs).round()
    }

    /// Cells the grid would allocate, or None if the product overflows `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        let side = (self.radius as usize).checked_mul(2)?.checked_add(1)?;
        let steps = self.time_step_count();
        if !steps.is_finite() || steps < 0.0 || steps >= usize::MAX as f64 {
            return None;
        }
        side.checked_mul(steps as usize)?.checked_mul(side)
    }
}

/// Which cells are considered adjacent during the search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighborModel {
    /// Four spatial neighbours plus one step forward in time.
    #[default]
    Cardinal,
    /// Eight spatial neighbours plus one step forward in time.
    Octile,
}

/// Distance metric shared by the accumulated cost and the heuristic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostMetric {
    /// Full (x, t, y) distance: advancing one time slice costs 1.
    #[default]
    Spacetime,
    /// (x, y) distance only: advancing in time is free.
    Spatial,
}

/// How a node's frontier priority is derived from its cost and heuristic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityConvention {
    /// `g + h`.
    #[default]
    Additive,
    /// `(g + h) * (t + 1)`, biasing toward earlier time slices. Not admissible.
    TimeScaled,
}

/// Spacetime search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Actor speed budget (m/s).
    pub movement_speed: f64,
    /// Maximum node expansions per search.
    pub max_iterations: usize,
    pub neighbors: NeighborModel,
    pub metric: CostMetric,
    pub priority: PriorityConvention,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            neighbors: NeighborModel::default(),
            metric: CostMetric::default(),
            priority: PriorityConvention::default(),
        }
    }
}

/// Motion model of an emitted hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// Straight line toward the actor.
    Linear,
    /// Sinusoidal weave toward the actor.
    Wave,
    /// Stays where it spawned.
    Static,
}

/// Hazard emitter used by the host simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Seconds between bursts.
    pub spawn_interval_secs: f64,
    /// Ring radius around the actor where hazards appear (meters).
    pub spawn_radius: f64,
    /// Hazards per burst. Zero disables the emitter.
    pub spawn_amount: u32,
    /// Spawn `ceil(rand * spawn_amount)` instead of exactly `spawn_amount`.
    pub random_spawn_amount: bool,
    /// Kinds to pick from, uniformly, once per burst.
    pub kinds: Vec<HazardKind>,
    /// Travel speed of linear and wave hazards (m/s).
    pub hazard_speed: f64,
    /// Seconds before a hazard despawns.
    pub hazard_lifetime_secs: f64,
    /// Bounding-box width of a hazard (meters).
    pub hazard_width: f64,
    /// Seconds per oscillation for wave hazards.
    pub wave_period_secs: f64,
    /// Lateral amplitude for wave hazards (meters).
    pub wave_amplitude: f64,
    /// Forward meters per radian of phase for wave hazards.
    pub wave_length: f64,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            spawn_interval_secs: DEFAULT_SPAWN_INTERVAL_SECS,
            spawn_radius: DEFAULT_SPAWN_RADIUS,
            spawn_amount: DEFAULT_SPAWN_AMOUNT,
            random_spawn_amount: false,
            kinds: vec![HazardKind::Linear, HazardKind::Wave, HazardKind::Static],
            hazard_speed: DEFAULT_HAZARD_SPEED,
            hazard_lifetime_secs: DEFAULT_HAZARD_LIFETIME_SECS,
            hazard_width: DEFAULT_HAZARD_WIDTH,
            wave_period_secs: DEFAULT_WAVE_PERIOD_SECS,
            wave_amplitude: DEFAULT_WAVE_AMPLITUDE,
            wave_length: DEFAULT_WAVE_LENGTH,
        }
    }
}

/// The actor that follows the planned path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    /// Spawn position (meters).
    pub start: DVec2,
    /// World position the planner steers toward (meters).
    pub goal: DVec2,
    /// Collision radius; hazards are inflated by it before rasterization (meters).
    pub radius: f64,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            start: DVec2::ZERO,
            goal: DVec2::ZERO,
            radius: DEFAULT_ACTOR_RADIUS,
        }
    }
}

/// Complete configuration for one planner instance and its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub grid: GridParams,
    pub search: SearchConfig,
    pub emitter: EmitterConfig,
    pub actor: ActorConfig,
    /// Seconds between grid rebuilds.
    pub grid_refresh_secs: f64,
    /// Seconds between path searches.
    pub path_refresh_secs: f64,
    /// Keep every sampled hazard position on the grid for diagnostics.
    pub record_samples: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            grid: GridParams::default(),
            search: SearchConfig::default(),
            emitter: EmitterConfig::default(),
            actor: ActorConfig::default(),
            grid_refresh_secs: DEFAULT_GRID_REFRESH_SECS,
            path_refresh_secs: DEFAULT_PATH_REFRESH_SECS,
            record_samples: false,
        }
    }
}

impl PlannerConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: PlannerConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// The planner tolerates degenerate values at runtime (it produces an
    /// empty grid), but a configuration file containing them is almost
    /// certainly a mistake, so the runner rejects it up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("grid.cell_size", self.grid.cell_size)?;
        positive("grid.horizon_secs", self.grid.horizon_secs)?;
        positive("grid.time_step_secs", self.grid.time_step_secs)?;
        positive("grid.sample_resolution", self.grid.sample_resolution)?;
        match self.grid.cell_count() {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => {
                return Err(ConfigError::GridTooLarge {
                    radius: self.grid.radius,
                    time_steps: self.grid.time_step_count(),
                    limit: MAX_GRID_CELLS,
                });
            }
        }
        positive("search.movement_speed", self.search.movement_speed)?;
        if self.search.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        non_negative("actor.radius", self.actor.radius)?;
        positive("grid_refresh_secs", self.grid_refresh_secs)?;
        positive("path_refresh_secs", self.path_refresh_secs)?;

        let emitter = &self.emitter;
        if emitter.spawn_amount > 0 {
            if emitter.kinds.is_empty() {
                return Err(ConfigError::NoHazardKinds);
            }
            positive("emitter.spawn_interval_secs", emitter.spawn_interval_secs)?;
            non_negative("emitter.spawn_radius", emitter.spawn_radius)?;
            non_negative("emitter.hazard_speed", emitter.hazard_speed)?;
            positive("emitter.hazard_lifetime_secs", emitter.hazard_lifetime_secs)?;
            non_negative("emitter.hazard_width", emitter.hazard_width)?;
            if emitter.kinds.contains(&HazardKind::Wave) {
                positive("emitter.wave_period_secs", emitter.wave_period_secs)?;
            }
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
