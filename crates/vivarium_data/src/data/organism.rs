use serde::{Deserialize, Serialize};
use std::fmt;

use super::tile::{Direction, Footprint};

/// Index of an organism's slot in the population table.
///
/// Slots are reused after the occupant dies, so an id only identifies an
/// organism for as long as it is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrganismId(pub usize);

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One line of execution inside an organism's VM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    /// Instruction pointer.
    pub ip: usize,
    /// Data pointer.
    pub dp: usize,
    pub registers: Vec<u8>,
    /// Addresses of the currently open loops, innermost last.
    pub loop_stack: Vec<usize>,
}

impl Lane {
    pub fn new(start: usize, register_count: usize) -> Self {
        Self {
            ip: start,
            dp: 0,
            registers: vec![0; register_count],
            loop_stack: Vec::new(),
        }
    }

    /// Resets any pointer that escaped `0..memory_size`.
    pub fn normalize(&mut self, memory_size: usize) {
        if self.ip >= memory_size {
            self.ip = 0;
        }
        if self.dp >= memory_size {
            self.dp = 0;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organism {
    pub id: OrganismId,
    /// Ticks since creation.
    pub age: u64,
    pub generation: u32,
    pub footprint: Footprint,
    pub food: i32,
    pub facing: Direction,
    /// Shared instruction and data memory.
    pub memory: Vec<u8>,
    pub lanes: Vec<Lane>,
    /// Register visible to every lane.
    pub shared_register: u8,
}

impl Organism {
    pub fn area(&self) -> u32 {
        self.footprint.area()
    }

    pub fn is_starving(&self) -> bool {
        self.food < 0
    }

    /// Health check run before and after each turn: repairs stray pointers
    /// and reports whether the organism can stay alive.
    pub fn checkup(&mut self) -> bool {
        let memory_size = self.memory.len();
        for lane in &mut self.lanes {
            lane.normalize(memory_size);
        }
        !self.is_starving()
    }
}
