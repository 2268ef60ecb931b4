//! Runner for the FORESIGHT host simulation.
//!
//! Loads a planner config, runs the simulation for a number of ticks and
//! streams snapshots as JSON lines.

pub mod error;
pub mod options;

use std::io::Write;
use std::path::Path;

use foresight_core::PlannerConfig;
use foresight_sim::SimulationEngine;

pub use error::AppError;
pub use options::Options;

/// Read and validate a config file.
pub fn load_config(path: &Path) -> Result<PlannerConfig, AppError> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(PlannerConfig::from_json_str(&text)?)
}

/// Run the simulation and write snapshots to `out`. Returns the number of
/// snapshots written.
pub fn run(options: &Options, out: &mut impl Write) -> Result<usize, AppError> {
    let config = match &options.config {
        Some(path) => load_config(path)?,
        None => PlannerConfig::default(),
    };

    log::info!(
        "simulating {} ticks with seed {}, goal ({:.1}, {:.1})",
        options.ticks,
        options.seed,
        config.actor.goal.x,
        config.actor.goal.y
    );

    let mut engine = SimulationEngine::new(config, options.seed);
    let mut written = 0;
    for _ in 0..options.ticks {
        let snapshot = engine.tick();
        if options.every_tick || snapshot.grid_rebuilt || snapshot.path_searched {
            serde_json::to_writer(&mut *out, &snapshot)?;
            out.write_all(b"\n")?;
            written += 1;
        }
    }
    out.flush()?;

    if let Some(pos) = engine.actor_position() {
        log::info!(
            "finished at t={:.2}s, actor at ({:.2}, {:.2})",
            engine.time().elapsed_secs,
            pos.x,
            pos.y
        );
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_writes_refresh_ticks() {
        let options = Options {
            ticks: 120,
            ..Options::default()
        };
        let mut out: Vec<u8> = Vec::new();
        let written = run(&options, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), written);
        // One refresh on the first tick, then one per second.
        assert!((3..=4).contains(&written), "{written} snapshots");
        for line in text.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("occupied_cells").is_some());
        }
    }

    #[test]
    fn test_run_every_tick() {
        let options = Options {
            ticks: 10,
            every_tick: true,
            ..Options::default()
        };
        let mut out: Vec<u8> = Vec::new();
        assert_eq!(run(&options, &mut out).unwrap(), 10);
    }

    #[test]
    fn test_missing_config_file() {
        let options = Options {
            config: Some("/nonexistent/foresight.json".into()),
            ..Options::default()
        };
        let err = run(&options, &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, AppError::ReadConfig { .. }));
    }
}
