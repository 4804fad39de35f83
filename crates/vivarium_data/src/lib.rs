//! # Vivarium Data
//!
//! Plain data types shared by the simulation engine and its observers:
//! grid tiles, facing directions, footprints and the organism record with
//! its execution lanes. No simulation logic lives here.

pub mod data;

pub use data::organism::{Lane, Organism, OrganismId};
pub use data::tile::{Direction, Footprint, Position, Tile};
