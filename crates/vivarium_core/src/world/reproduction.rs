use vivarium_data::{Footprint, Organism};

use super::TickContext;
use crate::lifecycle::{self, DeathCause};

/// Ends the life of a checked-out organism that outlived its lifespan.
///
/// Below the reproduction threshold it simply dies. Otherwise it splits its
/// food into children placed to its right at doubling offsets, each child
/// taking twice the threshold, until the parent is down to half the
/// threshold or no slot is free. The parent never survives.
pub(crate) fn reproduce(mut parent: Organism, ctx: &mut TickContext<'_>) {
    let config = ctx.config;
    let threshold = config.lifecycle.reproduction_threshold;
    if parent.food < threshold {
        ctx.bury_checked_out(parent, DeathCause::FailedReproduction);
        return;
    }

    let last_column = u64::from(ctx.grid.width() - 1);
    let mut offset = u64::from(parent.footprint.width) + 15;
    while parent.food > threshold / 2 {
        let x = (u64::from(parent.footprint.x) + offset).min(last_column) as u32;
        let Some(child) = ctx.spawn_at(Footprint::unit(x, parent.footprint.y)) else {
            break;
        };
        offset = offset.saturating_mul(2);
        parent.food -= 2 * threshold;

        if let Some(org) = ctx.population.get_mut(child.id) {
            org.food += 2 * threshold;
            org.generation = parent.generation + 1;
            lifecycle::lossy_copy(
                &parent.memory,
                &mut org.memory,
                config.lifecycle.mutation_modulus,
                config.lifecycle.mutation_bump,
                &mut *ctx.rng,
            );
        }
    }
    tracing::debug!(
        organism = %parent.id,
        generation = parent.generation,
        "Reproduced"
    );
    ctx.bury_checked_out(parent, DeathCause::Reproduced);
}
