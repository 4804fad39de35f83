//! The world: grid, population and the per-tick scheduler.

mod reproduction;
mod update;

pub use update::TickReport;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use vivarium_data::{Footprint, Organism, OrganismId};

use crate::config::SimConfig;
use crate::error::Result;
use crate::grid::{CollisionBundle, Grid};
use crate::lifecycle::{self, DeathCause, DeathRecord, Population};
use crate::metrics::Metrics;
use crate::vm::{self, StepOutcome};

/// Births and deaths accumulated during one tick.
#[derive(Debug, Clone, Default)]
pub struct TickEvents {
    pub births: usize,
    pub deaths: Vec<DeathRecord>,
}

/// A freshly created organism and the collisions its first imprint met.
///
/// Spawn collisions are handed back as-is; nothing resolves them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawned {
    pub id: OrganismId,
    pub collisions: CollisionBundle,
}

/// Mutable view of the world handed to the VM and the resolver while one
/// organism is checked out of the population.
pub struct TickContext<'a> {
    pub config: &'a SimConfig,
    pub grid: &'a mut Grid,
    pub population: &'a mut Population,
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut TickEvents,
}

impl TickContext<'_> {
    /// Collision-checked `Organism` write over `rect`.
    pub fn imprint(&mut self, rect: &Footprint) -> CollisionBundle {
        let population = &*self.population;
        self.grid.write_area(
            rect,
            vivarium_data::Tile::Organism,
            true,
            self.config.search.max_simultaneous_collisions,
            |x, y| population.occupant_at(x, y),
        )
    }

    /// Records the death of an organism that has already left its slot.
    pub fn bury(&mut self, organism: &Organism, cause: DeathCause) {
        if self.config.lifecycle.clear_footprint_on_death {
            self.grid.lift_area(&organism.footprint);
        }
        tracing::debug!(
            organism = %organism.id,
            ?cause,
            age = organism.age,
            food = organism.food,
            "Organism died"
        );
        self.events.deaths.push(DeathRecord::new(organism, cause));
    }

    /// Buries the organism currently checked out for its turn.
    pub fn bury_checked_out(&mut self, organism: Organism, cause: DeathCause) {
        self.population.release(organism.id);
        self.bury(&organism, cause);
    }

    /// Removes a resident organism. Returns false if the slot was empty.
    pub fn remove_and_bury(&mut self, id: OrganismId, cause: DeathCause) -> bool {
        match self.population.remove(id) {
            Some(organism) => {
                self.bury(&organism, cause);
                true
            }
            None => false,
        }
    }

    /// Creates an organism at `footprint` in the lowest free slot.
    pub fn spawn_at(&mut self, footprint: Footprint) -> Option<Spawned> {
        if !self.grid.contains_rect(&footprint) {
            tracing::warn!(?footprint, "Spawn outside the world");
            return None;
        }
        let Some(id) = self.population.next_free() else {
            tracing::warn!(
                capacity = self.population.capacity(),
                "No free organism slot"
            );
            return None;
        };
        let organism =
            lifecycle::create_organism_with_rng(id, footprint, self.config, &mut *self.rng);
        // The newborn stays invisible to occupant lookups during its own imprint.
        let collisions = self.imprint(&footprint);
        self.population.insert(organism);
        self.events.births += 1;
        tracing::debug!(organism = %id, x = footprint.x, y = footprint.y, "Organism born");
        Some(Spawned { id, collisions })
    }
}

pub struct World {
    config: SimConfig,
    tick: u64,
    seed: u64,
    grid: Grid,
    population: Population,
    rng: ChaCha8Rng,
    metrics: Metrics,
    events: TickEvents,
}

impl World {
    /// Generates a scattered world. The seed comes from the config, or is
    /// drawn at random and logged.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.world.seed.unwrap_or_else(rand::random);
        tracing::info!(
            seed,
            width = config.world.width,
            height = config.world.height,
            "Generating world"
        );
        let grid = Grid::generate(&config.world, seed);
        Self::with_grid(config, grid, seed)
    }

    /// A world whose grid starts completely empty.
    pub fn empty(config: SimConfig, seed: u64) -> Result<Self> {
        let grid = Grid::new(config.world.width, config.world.height);
        Self::with_grid(config, grid, seed)
    }

    pub fn with_grid(config: SimConfig, grid: Grid, seed: u64) -> Result<Self> {
        config.validate()?;
        let population = Population::new(config.organism.max_organisms);
        let metrics = Metrics::new(config.log_interval);
        Ok(Self {
            config,
            tick: 0,
            seed,
            grid,
            population,
            // Grid generation and the simulation draw from separate streams.
            rng: ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
            metrics,
            events: TickEvents::default(),
        })
    }

    fn context(&mut self) -> TickContext<'_> {
        TickContext {
            config: &self.config,
            grid: &mut self.grid,
            population: &mut self.population,
            rng: &mut self.rng,
            events: &mut self.events,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn organism(&self, id: OrganismId) -> Option<&Organism> {
        self.population.get(id)
    }

    pub fn organism_mut(&mut self, id: OrganismId) -> Option<&mut Organism> {
        self.population.get_mut(id)
    }

    /// Highest live slot, the organism the viewport follows.
    pub fn focus(&self) -> Option<OrganismId> {
        self.population.iter().last().map(|org| org.id)
    }

    /// Spawns a 1x1 organism at the world centre.
    pub fn spawn(&mut self) -> Option<Spawned> {
        let center = self.grid.center();
        self.spawn_at(center.x, center.y)
    }

    pub fn spawn_at(&mut self, x: u32, y: u32) -> Option<Spawned> {
        let spawned = self.context().spawn_at(Footprint::unit(x, y))?;
        self.metrics.record_birth();
        Some(spawned)
    }

    /// Replaces the memory of `id` with the hand-written ancestor.
    pub fn seed_ancestor(&mut self, id: OrganismId) -> bool {
        match self.population.get_mut(id) {
            Some(org) => {
                lifecycle::seed_ancestor(&mut org.memory);
                true
            }
            None => false,
        }
    }

    /// Removes `id` outside the tick loop.
    pub fn kill(&mut self, id: OrganismId, cause: DeathCause) -> Option<DeathRecord> {
        let organism = self.population.remove(id)?;
        self.context().bury(&organism, cause);
        self.metrics.record_death(cause);
        Some(DeathRecord::new(&organism, cause))
    }

    /// Runs `f` with `id` checked out next to the rest of the world, then
    /// puts it back.
    pub fn with_checked_out<R, F>(&mut self, id: OrganismId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Organism, &mut TickContext<'_>) -> R,
    {
        let mut org = self.population.check_out(id)?;
        let result = f(&mut org, &mut self.context());
        self.population.check_in(org);
        Some(result)
    }

    /// Runs one instruction of one lane without resolving collisions or
    /// advancing the instruction pointer.
    pub fn step_lane(&mut self, id: OrganismId, lane: usize) -> Option<StepOutcome> {
        self.with_checked_out(id, |org, ctx| {
            (lane < org.lanes.len()).then(|| vm::step(org, lane, ctx))
        })
        .flatten()
    }
}
