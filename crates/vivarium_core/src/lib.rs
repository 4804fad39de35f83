//! # Vivarium Core
//!
//! The simulation engine for Vivarium, an artificial life simulator in
//! which organisms carrying their own bytecode compete for space and food
//! on a shared grid.
//!
//! This crate contains the deterministic simulation logic, including:
//! - The per-organism bytecode VM and its opcode table
//! - The dense tile grid with collision-checked area writes
//! - Directional search along an organism's facing edge
//! - Collision resolution (absorption, obstacles, food)
//! - Lifecycle management (slots, reproduction, lossy inheritance)
//! - The per-tick scheduler, metrics and structured logging
//!
//! ## Example
//!
//! ```
//! use vivarium_core::{SimConfig, World};
//!
//! let mut config = SimConfig::default();
//! config.world.width = 200;
//! config.world.height = 200;
//! config.world.seed = Some(42);
//!
//! let mut world = World::new(config).unwrap();
//! let spawned = world.spawn().unwrap();
//! world.seed_ancestor(spawned.id);
//!
//! let report = world.tick();
//! assert_eq!(report.live, 1);
//! ```

/// Collision resolution for moving organisms
pub mod collision;
/// Configuration management for simulation parameters
pub mod config;
/// Error types for setup and I/O
pub mod error;
/// Dense tile grid and collision bundles
pub mod grid;
/// Population slot table, inheritance and death bookkeeping
pub mod lifecycle;
/// Run statistics and structured logging
pub mod metrics;
/// Directional ray scans
pub mod search;
/// Serialisable views of the world for observers
pub mod snapshot;
/// Bytecode interpreter
pub mod vm;
/// World state and the tick scheduler
pub mod world;

pub use config::SimConfig;
pub use error::{Result, SimError};
pub use grid::{Collision, CollisionBundle, Grid};
pub use lifecycle::{DeathCause, DeathRecord, Population};
pub use metrics::{init_logging, Metrics};
pub use snapshot::{OrganismSnapshot, WorldSnapshot};
pub use vm::Opcode;
pub use world::{Spawned, TickContext, TickReport, World};
