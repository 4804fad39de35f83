//! Organism lifecycle: slot allocation, birth state, inheritance and death
//! bookkeeping.

use rand::Rng;
use serde::{Deserialize, Serialize};
use vivarium_data::{Direction, Footprint, Lane, Organism, OrganismId};

use crate::config::SimConfig;

/// Why an organism left the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// Was strictly larger than an organism that moved into it, and the
    /// mover absorbed it.
    AbsorbedByMover,
    /// Moved into an organism no larger than itself and was absorbed by it.
    AbsorbedOnImpact,
    /// Food hit zero while pushing against an obstacle.
    Obstacle,
    /// Reached the end of its lifespan without enough food to reproduce.
    FailedReproduction,
    /// Reproduced; parents never survive reproduction.
    Reproduced,
    /// Starving at the start of its turn.
    StarvedBeforeTurn,
    /// Starving at the end of its turn.
    StarvedAfterTurn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathRecord {
    pub id: OrganismId,
    pub cause: DeathCause,
    pub age: u64,
    pub generation: u32,
    pub food: i32,
}

impl DeathRecord {
    pub fn new(organism: &Organism, cause: DeathCause) -> Self {
        Self {
            id: organism.id,
            cause,
            age: organism.age,
            generation: organism.generation,
            food: organism.food,
        }
    }
}

/// Fixed-capacity slot table owning every live organism.
///
/// During its turn an organism is checked out of its slot so the VM can hold
/// it mutably next to the rest of the population. The emptied slot stays
/// reserved and is never handed to a newborn.
#[derive(Debug, Clone, Default)]
pub struct Population {
    slots: Vec<Option<Organism>>,
    capacity: usize,
    reserved: Option<usize>,
    live: usize,
}

impl Population {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity,
            reserved: None,
            live: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Live organisms, including one that is checked out.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// One past the highest slot ever handed out.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_live(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    /// Lowest slot that can take a newborn.
    pub fn next_free(&self) -> Option<OrganismId> {
        self.slots
            .iter()
            .enumerate()
            .find(|(i, slot)| slot.is_none() && self.reserved != Some(*i))
            .map(|(i, _)| OrganismId(i))
            .or_else(|| (self.slots.len() < self.capacity).then_some(OrganismId(self.slots.len())))
    }

    /// Stores `organism` in the slot named by its id.
    ///
    /// # Panics
    /// The slot must be free; ids come from [`Population::next_free`].
    pub fn insert(&mut self, organism: Organism) -> OrganismId {
        let id = organism.id;
        assert!(id.0 < self.capacity, "slot {id} past capacity");
        if id.0 >= self.slots.len() {
            self.slots.resize_with(id.0 + 1, || None);
        }
        assert!(
            self.slots[id.0].is_none() && self.reserved != Some(id.0),
            "slot {id} is occupied"
        );
        self.slots[id.0] = Some(organism);
        self.live += 1;
        id
    }

    pub fn get(&self, id: OrganismId) -> Option<&Organism> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: OrganismId) -> Option<&mut Organism> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn remove(&mut self, id: OrganismId) -> Option<Organism> {
        let organism = self.slots.get_mut(id.0)?.take()?;
        self.live -= 1;
        Some(organism)
    }

    pub fn check_out(&mut self, id: OrganismId) -> Option<Organism> {
        let organism = self.slots.get_mut(id.0)?.take()?;
        self.reserved = Some(id.0);
        Some(organism)
    }

    pub fn check_in(&mut self, organism: Organism) {
        debug_assert_eq!(self.reserved, Some(organism.id.0));
        self.reserved = None;
        let id = organism.id.0;
        self.slots[id] = Some(organism);
    }

    /// Frees the reservation of a checked-out organism that died.
    pub fn release(&mut self, id: OrganismId) {
        debug_assert_eq!(self.reserved, Some(id.0));
        self.reserved = None;
        self.live -= 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Organism> {
        self.slots.iter().flatten()
    }

    /// First organism, in slot order, whose footprint covers `(x, y)`.
    pub fn occupant_at(&self, x: u32, y: u32) -> Option<OrganismId> {
        self.iter()
            .find(|org| org.footprint.contains(x, y))
            .map(|org| org.id)
    }
}

/// Start address of lane `index`. With more than two lanes the second and
/// third start at the half and three-quarter marks of memory.
pub fn lane_start(index: usize, lanes: usize, memory_size: usize) -> usize {
    if lanes <= 2 {
        return 0;
    }
    match index {
        1 => memory_size / 2,
        2 => memory_size * 3 / 4,
        _ => 0,
    }
}

/// Fresh organism with random memory and zeroed lanes.
pub fn create_organism_with_rng<R: Rng>(
    id: OrganismId,
    footprint: Footprint,
    config: &SimConfig,
    rng: &mut R,
) -> Organism {
    let shape = &config.organism;
    let mut memory = vec![0u8; shape.memory_size];
    rng.fill(memory.as_mut_slice());
    Organism {
        id,
        age: 0,
        generation: 0,
        footprint,
        food: shape.starting_food,
        facing: Direction::Up,
        memory,
        lanes: (0..shape.lanes)
            .map(|i| Lane::new(lane_start(i, shape.lanes, shape.memory_size), shape.register_count))
            .collect(),
        shared_register: 0,
    }
}

/// Copies `parent` into `child` byte by byte with occasional damage.
///
/// Each byte draws `r` in `0..modulus`: 0 decrements, 1 increments, 2 adds a
/// random bump below `bump`, 3 replaces with a random byte, 4 leaves the
/// child's byte as it was, anything else copies exactly.
pub fn lossy_copy<R: Rng>(parent: &[u8], child: &mut [u8], modulus: u32, bump: u8, rng: &mut R) {
    for (dst, &src) in child.iter_mut().zip(parent) {
        match rng.gen_range(0..modulus) {
            0 => *dst = src.wrapping_sub(1),
            1 => *dst = src.wrapping_add(1),
            2 => *dst = src.wrapping_add(rng.gen_range(0..bump.max(1))),
            3 => *dst = rng.gen(),
            4 => {}
            _ => *dst = src,
        }
    }
}

/// Hand-written ancestor: senses, loops, moves toward food and grows.
const ANCESTOR: &[(usize, &[u8])] = &[
    (
        0,
        &[
            255, 255, 81, 105, 85, 194, 165, 85, 55, 32, 95, 65, 95, 175, 85, 75, 195, 165, 85, 55,
            32, 95, 175, 95, 225, 85, 65, 225, 95, 25, 95, 25, 99,
        ],
    ),
    (300, &[205, 84, 18, 95]),
    (500, &[5, 85, 95]),
    (750, &[5, 85, 95]),
];

/// Overwrites the start of each program region with the ancestor program.
/// Regions past the end of memory are skipped.
pub fn seed_ancestor(memory: &mut [u8]) {
    for &(start, code) in ANCESTOR {
        if start + code.len() <= memory.len() {
            memory[start..start + code.len()].copy_from_slice(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn organism(id: usize, footprint: Footprint) -> Organism {
        let mut rng = ChaCha8Rng::seed_from_u64(id as u64);
        create_organism_with_rng(OrganismId(id), footprint, &SimConfig::default(), &mut rng)
    }

    #[test]
    fn test_next_free_prefers_lowest_slot() {
        let mut pop = Population::new(4);
        for i in 0..3 {
            pop.insert(organism(i, Footprint::unit(i as u32, 0)));
        }
        pop.remove(OrganismId(1));
        assert_eq!(pop.next_free(), Some(OrganismId(1)));
        assert_eq!(pop.len(), 2);
    }

    #[test]
    fn test_exhausted_table_has_no_free_slot() {
        let mut pop = Population::new(2);
        pop.insert(organism(0, Footprint::unit(0, 0)));
        pop.insert(organism(1, Footprint::unit(1, 0)));
        assert_eq!(pop.next_free(), None);
    }

    #[test]
    fn test_checked_out_slot_is_not_reused() {
        let mut pop = Population::new(4);
        pop.insert(organism(0, Footprint::unit(0, 0)));
        let org = pop.check_out(OrganismId(0)).unwrap();
        assert_eq!(pop.next_free(), Some(OrganismId(1)));
        assert_eq!(pop.len(), 1);
        pop.check_in(org);
        assert!(pop.is_live(0));

        pop.check_out(OrganismId(0)).unwrap();
        pop.release(OrganismId(0));
        assert!(pop.is_empty());
        assert_eq!(pop.next_free(), Some(OrganismId(0)));
    }

    #[test]
    fn test_occupant_at_scans_footprints() {
        let mut pop = Population::new(4);
        pop.insert(organism(0, Footprint::new(10, 10, 2, 3)));
        assert_eq!(pop.occupant_at(11, 12), Some(OrganismId(0)));
        assert_eq!(pop.occupant_at(12, 12), None);
    }

    #[test]
    fn test_new_organism_defaults() {
        let org = organism(3, Footprint::unit(5, 5));
        assert_eq!(org.food, 250);
        assert_eq!(org.facing, Direction::Up);
        assert_eq!(org.memory.len(), 1000);
        assert_eq!(org.lanes.len(), 1);
        assert_eq!(org.lanes[0].registers, vec![0; 9]);
    }

    #[test]
    fn test_lane_starts_spread_with_three_lanes() {
        assert_eq!(lane_start(1, 2, 1000), 0);
        assert_eq!(lane_start(1, 3, 1000), 500);
        assert_eq!(lane_start(2, 3, 1000), 750);
    }

    #[test]
    fn test_lossy_copy_is_mostly_exact() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let parent: Vec<u8> = (0..10_000u32).map(|i| (i % 256) as u8).collect();
        let mut child = vec![0u8; parent.len()];
        lossy_copy(&parent, &mut child, 1024, 25, &mut rng);
        let differing = parent.iter().zip(&child).filter(|(a, b)| a != b).count();
        assert!(differing < 200, "too many mutations: {differing}");
    }

    #[test]
    fn test_lossy_copy_with_tiny_modulus_always_mutates_or_skips() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let parent = vec![100u8; 64];
        let mut child = vec![7u8; 64];
        lossy_copy(&parent, &mut child, 5, 25, &mut rng);
        // Draws 0..5 never hit the exact-copy branch; draw 4 keeps the old byte.
        assert!(child.iter().any(|&b| b == 7));
        assert!(child.iter().any(|&b| b != 100));
    }

    #[test]
    fn test_seed_ancestor_writes_program_regions() {
        let mut memory = vec![0u8; 1000];
        seed_ancestor(&mut memory);
        assert_eq!(&memory[0..3], &[255, 255, 81]);
        assert_eq!(memory[300], 205);
        assert_eq!(memory[750], 5);

        let mut short = vec![0u8; 100];
        seed_ancestor(&mut short);
        assert_eq!(short[2], 81);
    }
}
