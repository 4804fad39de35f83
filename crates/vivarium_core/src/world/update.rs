use serde::{Deserialize, Serialize};
use vivarium_data::OrganismId;

use super::{reproduction, TickContext, TickEvents, World};
use crate::collision::{self, Resolution};
use crate::lifecycle::{DeathCause, DeathRecord};
use crate::vm;

/// Summary of one scheduler pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    /// Organisms alive when the pass started. Zero means the run is over.
    pub live: usize,
    pub births: usize,
    pub deaths: Vec<DeathRecord>,
    /// Organisms alive when the pass ended.
    pub population: usize,
}

impl TickReport {
    pub fn is_extinct(&self) -> bool {
        self.live == 0
    }
}

impl World {
    /// Gives every live organism one turn, in slot order.
    ///
    /// The slot bound is re-read after each turn, so children born this tick
    /// into higher slots still get their turn.
    pub fn tick(&mut self) -> TickReport {
        self.events = TickEvents::default();
        let live = self.population.len();

        let mut index = 0;
        while index < self.population.slot_count() {
            if self.population.is_live(index) {
                advance(OrganismId(index), &mut self.context());
            }
            index += 1;
        }

        self.tick += 1;
        let events = std::mem::take(&mut self.events);
        let report = TickReport {
            tick: self.tick,
            live,
            births: events.births,
            deaths: events.deaths,
            population: self.population.len(),
        };
        self.metrics.record_tick(&report);
        report
    }
}

/// One organism's turn: checkup, one instruction per lane, ageing and the
/// end-of-life decision.
pub(crate) fn advance(id: OrganismId, ctx: &mut TickContext<'_>) {
    let Some(mut org) = ctx.population.check_out(id) else {
        return;
    };
    if !org.checkup() {
        ctx.bury_checked_out(org, DeathCause::StarvedBeforeTurn);
        return;
    }

    for lane in 0..org.lanes.len() {
        let outcome = vm::step(&mut org, lane, ctx);
        if let Some(bundle) = outcome.collisions {
            if let Resolution::ActorRemoved(cause) = collision::resolve(&mut org, &bundle, ctx) {
                ctx.bury_checked_out(org, cause);
                return;
            }
        }
        let lane = &mut org.lanes[lane];
        lane.ip = lane.ip.wrapping_add(1);
    }

    let config = ctx.config;
    let lifecycle = &config.lifecycle;
    org.age += 1;
    if org.age % lifecycle.hunger_interval == 0 {
        org.food -= 1;
    }
    if org.age > lifecycle.lifespan {
        reproduction::reproduce(org, ctx);
        return;
    }
    if !org.checkup() {
        ctx.bury_checked_out(org, DeathCause::StarvedAfterTurn);
        return;
    }
    ctx.population.check_in(org);
}
