//! Configuration management for simulation parameters.
//!
//! Every constant the engine depends on lives in [`SimConfig`]. The
//! `Default` impls carry the stock values; a `config.toml` file can
//! override any subset of them.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 2000
//! height = 2000
//! seed = 42
//!
//! [organism]
//! max_organisms = 5000
//!
//! [lifecycle]
//! lifespan = 20000
//! clear_footprint_on_death = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, SimError};

/// World dimensions and initial tile scatter.
///
/// Food and obstacle chances are expressed per 500 cells: each cell draws
/// `r` in `0..500`, becomes Food if `r < food_per_500`, Obstacle if
/// `r < food_per_500 + obstacle_per_500`, and stays Empty otherwise.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    pub food_per_500: u32,
    pub obstacle_per_500: u32,
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 10_000,
            height: 10_000,
            food_per_500: 10,
            obstacle_per_500: 5,
            seed: None,
        }
    }
}

/// Per-organism VM shape and population limits.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OrganismConfig {
    pub max_organisms: usize,
    pub memory_size: usize,
    pub lanes: usize,
    /// Private registers per lane. Register selector values at or past this
    /// count address the organism's shared register.
    pub register_count: usize,
    pub max_loop_depth: usize,
    pub starting_food: i32,
}

impl Default for OrganismConfig {
    fn default() -> Self {
        Self {
            max_organisms: 50_000,
            memory_size: 1000,
            lanes: 1,
            register_count: 9,
            max_loop_depth: 50,
            starting_food: 250,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Tiles scanned along each ray.
    pub search_distance: u32,
    /// Capacity of a collision bundle; extra collisions are dropped.
    pub max_simultaneous_collisions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_distance: 25,
            max_simultaneous_collisions: 25,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EnergyConfig {
    /// Gained on every collision with a Food tile.
    pub food_value: i32,
    /// Area of an absorbed organism is divided by this before being added.
    pub organism_to_food_divisor: u32,
    /// Grow cost per tile of the perpendicular dimension.
    pub grow_cost_per_tile: i32,
    pub action_cost: i32,
    pub obstacle_penalty: i32,
    pub fire_damage: i32,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            food_value: 50,
            organism_to_food_divisor: 4,
            grow_cost_per_tile: 15,
            action_cost: 1,
            obstacle_penalty: 1,
            fire_damage: 1,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Age past which an organism reproduces and dies.
    pub lifespan: u64,
    /// Every `hunger_interval` ticks of age cost one food.
    pub hunger_interval: u64,
    /// Minimum food to reproduce; each child costs twice this.
    pub reproduction_threshold: i32,
    /// Size of the per-byte mutation draw in lossy copies.
    pub mutation_modulus: u32,
    /// Upper bound (exclusive) of the random bump mutation.
    pub mutation_bump: u8,
    /// Lift a dead organism's Organism tiles off the grid.
    pub clear_footprint_on_death: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            lifespan: 1_000_000,
            hunger_interval: 300,
            reproduction_threshold: 250,
            mutation_modulus: 1024,
            mutation_bump: 25,
            clear_footprint_on_death: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub organism: OrganismConfig,
    pub search: SearchConfig,
    pub energy: EnergyConfig,
    pub lifecycle: LifecycleConfig,
    /// Ticks between periodic metrics log lines.
    pub log_interval: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            organism: OrganismConfig::default(),
            search: SearchConfig::default(),
            energy: EnergyConfig::default(),
            lifecycle: LifecycleConfig::default(),
            log_interval: 1000,
        }
    }
}

impl SimConfig {
    /// Loads `path`, writing the defaults there first if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let default = Self::default();
            fs::write(path, default.to_toml()?)?;
            tracing::info!(path = %path.display(), "Wrote default configuration");
            return Ok(default);
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err(SimError::invalid_config(
                "world dimensions must be greater than zero",
            ));
        }
        if self.world.food_per_500 + self.world.obstacle_per_500 > 500 {
            return Err(SimError::invalid_config(
                "food_per_500 + obstacle_per_500 must not exceed 500",
            ));
        }
        if self.organism.max_organisms == 0 {
            return Err(SimError::invalid_config(
                "max_organisms must be greater than zero",
            ));
        }
        if self.organism.memory_size == 0 {
            return Err(SimError::invalid_config(
                "memory_size must be greater than zero",
            ));
        }
        if self.organism.lanes == 0 {
            return Err(SimError::invalid_config("lanes must be >= 1"));
        }
        if self.lifecycle.hunger_interval == 0 {
            return Err(SimError::invalid_config("hunger_interval must be >= 1"));
        }
        if self.lifecycle.reproduction_threshold <= 0 {
            return Err(SimError::invalid_config(
                "reproduction_threshold must be positive",
            ));
        }
        if self.lifecycle.mutation_modulus < 5 {
            return Err(SimError::invalid_config(
                "mutation_modulus must leave room for the five mutation kinds",
            ));
        }
        if self.search.max_simultaneous_collisions == 0 {
            return Err(SimError::invalid_config(
                "max_simultaneous_collisions must be >= 1",
            ));
        }
        if self.energy.organism_to_food_divisor == 0 {
            return Err(SimError::invalid_config(
                "organism_to_food_divisor must be >= 1",
            ));
        }
        Ok(())
    }
}
