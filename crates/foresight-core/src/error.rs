//! Configuration errors.
//!
//! Planning itself never fails; only loading and validating a
//! configuration can.

/// Errors raised while loading or validating a [`PlannerConfig`](crate::PlannerConfig).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A parameter that must be strictly positive was not.
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A parameter that must not be negative was.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The grid shape would need more cells than the planner allows.
    #[error("grid of radius {radius} over {time_steps} time steps exceeds {limit} cells")]
    GridTooLarge {
        /// Requested grid radius in cells.
        radius: u32,
        /// Requested slice count, `round(horizon / time_step)`.
        time_steps: f64,
        /// Cell budget the request exceeded.
        limit: usize,
    },

    /// The emitter is enabled but has no hazard kinds to choose from.
    #[error("emitter.kinds must name at least one hazard kind when spawn_amount > 0")]
    NoHazardKinds,

    /// The search budget is zero, so no path could ever be produced.
    #[error("search.max_iterations must be at least 1")]
    ZeroIterations,

    /// The configuration text is not valid JSON for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
