//! Simulation engine: the host loop around the planner.
//!
//! `SimulationEngine` owns the hecs world, the seeded RNG and the planner
//! state, runs all systems once per tick and produces `SimSnapshot`s.
//! Headless and deterministic for a given config and seed.

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use foresight_core::config::{HazardKind, PlannerConfig};
use foresight_core::types::SimTime;
use foresight_grid::OccupancyGrid;
use foresight_search::SearchOutcome;

use crate::systems;
use crate::systems::emitter::EmitterState;
use crate::systems::planner::{PlannerState, RefreshReport};
use crate::systems::snapshot::SimSnapshot;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all host state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    config: PlannerConfig,
    rng: ChaCha8Rng,
    emitter: EmitterState,
    planner: PlannerState,
    despawn_buffer: Vec<Entity>,
}

impl SimulationEngine {
    /// Create an engine with the actor at its start position and no hazards.
    /// Same config and seed give the same simulation.
    pub fn new(config: PlannerConfig, seed: u64) -> Self {
        let mut world = World::new();
        world_setup::spawn_actor(&mut world, &config.actor, config.search.movement_speed);
        let planner = PlannerState::new(&config);
        Self {
            world,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            emitter: EmitterState::default(),
            planner,
            despawn_buffer: Vec::new(),
            config,
        }
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        let report = self.run_systems();
        self.time.advance();
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.planner, report)
    }

    /// Spawn a hazard aimed at `target` using the emitter's hazard settings.
    pub fn spawn_hazard(&mut self, kind: HazardKind, position: DVec2, target: DVec2) -> Entity {
        world_setup::spawn_hazard(
            &mut self.world,
            kind,
            position,
            target,
            &self.config.emitter,
            self.time.elapsed_secs,
        )
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The occupancy grid as of the last grid refresh.
    pub fn grid(&self) -> &OccupancyGrid {
        &self.planner.grid
    }

    /// The path as of the last path refresh.
    pub fn path(&self) -> Option<&SearchOutcome> {
        self.planner.path.as_ref()
    }

    pub fn actor_position(&self) -> Option<DVec2> {
        world_setup::actor_position(&self.world)
    }

    /// Run all systems in order.
    fn run_systems(&mut self) -> RefreshReport {
        let now = self.time.elapsed_secs;
        let center = self.actor_position().unwrap_or(self.config.actor.start);

        // 1. Hazard emission
        systems::emitter::run(
            &mut self.world,
            &mut self.rng,
            &self.config.emitter,
            &mut self.emitter,
            center,
            now,
        );
        // 2. Hazard motion
        systems::motion::run(&mut self.world, now);
        // 3. Lifetime countdown and despawn
        systems::lifetime::run(&mut self.world, &mut self.despawn_buffer);
        // 4. Grid and path refresh
        let report = systems::planner::run(&mut self.world, &self.config, &mut self.planner, now);
        // 5. Actor movement
        systems::actor::run(&mut self.world);
        report
    }
}
