//! Per-organism bytecode interpreter.
//!
//! [`step`] runs exactly one instruction on one lane. It never advances the
//! instruction pointer past the executed instruction; the scheduler does
//! that afterwards, which is what lets a loop-close jump land on the
//! loop-open address without re-running it.

pub mod motion;
pub mod opcode;

pub use opcode::Opcode;

use rand::Rng;
use vivarium_data::Organism;

use crate::grid::CollisionBundle;
use crate::search;
use crate::world::TickContext;

/// What one instruction left behind for the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub opcode: Opcode,
    /// Set by movement instructions, possibly empty.
    pub collisions: Option<CollisionBundle>,
}

/// Executes the instruction under lane `lane_index`'s instruction pointer.
pub fn step(org: &mut Organism, lane_index: usize, ctx: &mut TickContext<'_>) -> StepOutcome {
    let memory_size = org.memory.len();
    org.lanes[lane_index].normalize(memory_size);
    // Pointers are cached: the instruction below may move them.
    let ip = org.lanes[lane_index].ip;
    let dp = org.lanes[lane_index].dp;
    let opcode = Opcode::decode(org.memory[ip]);

    let config = ctx.config;
    let action_cost = config.energy.action_cost;
    let distance = config.search.search_distance;
    let mut collisions = None;

    match opcode {
        Opcode::IncDp => org.lanes[lane_index].dp = dp.wrapping_add(1),
        Opcode::DecDp => org.lanes[lane_index].dp = dp.wrapping_sub(1),
        Opcode::IncCell => org.memory[dp] = org.memory[dp].wrapping_add(1),
        Opcode::DecCell => org.memory[dp] = org.memory[dp].wrapping_sub(1),
        Opcode::TurnClockwise => {
            org.facing = org.facing.rotate_clockwise();
            org.food -= action_cost;
        }
        Opcode::TurnCounterClockwise => {
            org.facing = org.facing.rotate_counter_clockwise();
            org.food -= action_cost;
        }
        Opcode::MoveForward => {
            collisions = Some(motion::move_organism(org, org.facing, ctx));
            org.food -= action_cost;
        }
        Opcode::MoveBackward => {
            collisions = Some(motion::move_organism(org, org.facing.inverse(), ctx));
            org.food -= action_cost;
        }
        Opcode::LoopOpen => loop_open(org, lane_index, ip, dp, config.organism.max_loop_depth),
        Opcode::LoopClose => loop_close(org, lane_index, dp),
        Opcode::SenseLargest => {
            let area = search::largest_organism_ahead(ctx.grid, ctx.population, org, distance);
            org.memory[dp] = area as u8;
        }
        Opcode::SenseOrganism => {
            let found = search::organism_ahead(ctx.grid, ctx.population, org, distance);
            org.memory[dp] = u8::from(found);
        }
        Opcode::StoreRegister(selector) => {
            let value = org.memory[dp];
            match org.lanes[lane_index].registers.get_mut(selector as usize) {
                Some(register) => *register = value,
                None => org.shared_register = value,
            }
        }
        Opcode::LoadRegister(selector) => {
            let lane = &org.lanes[lane_index];
            org.memory[dp] = lane
                .registers
                .get(selector as usize)
                .copied()
                .unwrap_or(org.shared_register);
        }
        Opcode::Jump => {
            // The data pointer doubles as a signed offset biased by 128.
            let offset = dp as isize - 128;
            org.lanes[lane_index].ip = ip.wrapping_add_signed(offset);
        }
        Opcode::Grow => motion::grow(org, ctx.grid, config.energy.grow_cost_per_tile),
        Opcode::Clamp => {
            if org.memory[dp] > 0 {
                org.memory[dp] = 1;
            }
        }
        Opcode::SenseFood | Opcode::SenseFoodAlt => {
            let found = search::food_ahead(ctx.grid, org, distance);
            org.memory[dp] = u8::from(found);
        }
        Opcode::LoadImmediate => org.memory[dp] = org.memory[(ip + 1) % memory_size],
        Opcode::Randomize => org.memory[dp] = ctx.rng.gen(),
        Opcode::DpFromIp => org.lanes[lane_index].dp = ip,
        Opcode::Fire => {
            fire(org, ctx);
            org.food -= action_cost;
        }
        Opcode::StorePosition => {
            org.memory[dp] = (org.footprint.x % 256) as u8;
            if dp + 1 < memory_size {
                org.memory[dp + 1] = (org.footprint.y % 256) as u8;
            }
        }
        Opcode::Nop => {}
    }

    StepOutcome { opcode, collisions }
}

fn loop_open(org: &mut Organism, lane_index: usize, ip: usize, dp: usize, max_depth: usize) {
    if org.memory[dp] > 0 {
        let id = org.id;
        let lane = &mut org.lanes[lane_index];
        if lane.loop_stack.len() >= max_depth {
            tracing::warn!(organism = %id, depth = lane.loop_stack.len(), "Too many nested loops");
        } else {
            lane.loop_stack.push(ip);
        }
        return;
    }
    // Flat scan: nested loop-opens are not counted.
    let close = org.memory[ip..]
        .iter()
        .position(|&byte| Opcode::is_loop_close(byte))
        .map_or(org.memory.len(), |offset| ip + offset);
    org.lanes[lane_index].ip = close;
}

fn loop_close(org: &mut Organism, lane_index: usize, dp: usize) {
    let condition = org.memory[dp] > 0;
    let lane = &mut org.lanes[lane_index];
    if let Some(&start) = lane.loop_stack.last() {
        if condition {
            lane.ip = start;
        } else {
            lane.loop_stack.pop();
        }
    }
}

fn fire(org: &Organism, ctx: &mut TickContext<'_>) {
    let distance = ctx.config.search.search_distance;
    let target = search::first_organism_on_ray(ctx.grid, ctx.population, org, distance);
    if let Some(victim) = target.and_then(|id| ctx.population.get_mut(id)) {
        victim.food -= ctx.config.energy.fire_damage;
        tracing::trace!(attacker = %org.id, victim = %victim.id, "Fired");
    }
}
