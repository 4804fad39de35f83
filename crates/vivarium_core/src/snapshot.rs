//! Read-only, serialisable views of simulation state for the debugger and
//! the diagnostic dump.

use serde::{Deserialize, Serialize};
use vivarium_data::{Direction, Footprint, Lane, Organism, OrganismId};

use crate::error::Result;
use crate::world::World;

/// Number of leading memory bytes carried by an [`OrganismSnapshot`].
pub const MEMORY_PREVIEW: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneSnapshot {
    pub ip: usize,
    /// Byte under the instruction pointer, if it points into memory.
    pub at_ip: Option<u8>,
    pub dp: usize,
    pub at_dp: Option<u8>,
    pub registers: Vec<u8>,
    pub loop_depth: usize,
}

impl LaneSnapshot {
    fn new(lane: &Lane, memory: &[u8]) -> Self {
        Self {
            ip: lane.ip,
            at_ip: memory.get(lane.ip).copied(),
            dp: lane.dp,
            at_dp: memory.get(lane.dp).copied(),
            registers: lane.registers.clone(),
            loop_depth: lane.loop_stack.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganismSnapshot {
    pub id: OrganismId,
    pub generation: u32,
    pub age: u64,
    pub footprint: Footprint,
    pub food: i32,
    pub facing: Direction,
    pub memory_head: Vec<u8>,
    pub shared_register: u8,
    pub lanes: Vec<LaneSnapshot>,
}

impl From<&Organism> for OrganismSnapshot {
    fn from(org: &Organism) -> Self {
        Self {
            id: org.id,
            generation: org.generation,
            age: org.age,
            footprint: org.footprint,
            food: org.food,
            facing: org.facing,
            memory_head: org.memory.iter().take(MEMORY_PREVIEW).copied().collect(),
            shared_register: org.shared_register,
            lanes: org
                .lanes
                .iter()
                .map(|lane| LaneSnapshot::new(lane, &org.memory))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    pub population: usize,
    pub peak_population: usize,
    pub births: u64,
    pub deaths: u64,
    pub organisms: Vec<OrganismSnapshot>,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl World {
    pub fn snapshot(&self) -> WorldSnapshot {
        let metrics = self.metrics();
        WorldSnapshot {
            tick: self.tick_count(),
            seed: self.seed(),
            width: self.grid().width(),
            height: self.grid().height(),
            population: self.population().len(),
            peak_population: metrics.peak_population(),
            births: metrics.births(),
            deaths: metrics.total_deaths(),
            organisms: self.population().iter().map(OrganismSnapshot::from).collect(),
        }
    }

    pub fn organism_snapshot(&self, id: OrganismId) -> Option<OrganismSnapshot> {
        self.organism(id).map(OrganismSnapshot::from)
    }
}
