//! Planner constants and tuning parameters.

/// Host simulation tick rate (Hz).
pub const TICK_RATE: u32 = 50;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Occupancy grid ---

/// Edge length of one spatial cell (meters).
pub const DEFAULT_CELL_SIZE: f64 = 1.0;

/// Cells from the anchor to the grid edge. Side length is `2 * radius + 1`.
pub const DEFAULT_GRID_RADIUS: u32 = 5;

/// Prediction horizon covered by the grid (seconds).
pub const DEFAULT_HORIZON_SECS: f64 = 8.0;

/// Duration of one time slice (seconds).
pub const DEFAULT_TIME_STEP_SECS: f64 = 1.0;

/// Maximum world distance between two consecutive predictor samples (meters).
pub const DEFAULT_SAMPLE_RESOLUTION: f64 = 0.5;

/// Largest grid (`side * steps * side` cells) a configuration may request.
pub const MAX_GRID_CELLS: usize = 1 << 24;

// --- Search ---

/// Actor movement speed budget (m/s).
pub const DEFAULT_MOVEMENT_SPEED: f64 = 3.0;

/// Node expansions before the search gives up and returns its fallback.
pub const DEFAULT_MAX_ITERATIONS: usize = 5000;

/// Actor collision radius (meters).
pub const DEFAULT_ACTOR_RADIUS: f64 = 0.5;

// --- Hazards ---

/// Bounding-box width of a spawned hazard (meters).
pub const DEFAULT_HAZARD_WIDTH: f64 = 1.0;

/// Travel speed of linear and wave hazards (m/s).
pub const DEFAULT_HAZARD_SPEED: f64 = 12.0;

/// Seconds before a hazard despawns.
pub const DEFAULT_HAZARD_LIFETIME_SECS: f64 = 10.0;

/// Seconds for a wave hazard to complete one oscillation.
pub const DEFAULT_WAVE_PERIOD_SECS: f64 = 1.0;

/// Lateral amplitude of a wave hazard (meters).
pub const DEFAULT_WAVE_AMPLITUDE: f64 = 1.0;

/// Forward distance a wave hazard covers per radian of phase (meters).
pub const DEFAULT_WAVE_LENGTH: f64 = 1.0;

// --- Emitter ---

/// Seconds between emitter bursts.
pub const DEFAULT_SPAWN_INTERVAL_SECS: f64 = 2.0;

/// Distance from the actor at which hazards appear (meters).
pub const DEFAULT_SPAWN_RADIUS: f64 = 15.0;

/// Hazards per burst.
pub const DEFAULT_SPAWN_AMOUNT: u32 = 1;

// --- Refresh scheduling ---

/// Seconds between occupancy grid rebuilds.
pub const DEFAULT_GRID_REFRESH_SECS: f64 = 1.0;

/// Seconds between path searches.
pub const DEFAULT_PATH_REFRESH_SECS: f64 = 1.0;
