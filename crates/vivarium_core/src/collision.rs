//! Applies the consequences of a collision bundle to the moving organism.
//!
//! Entries are handled in bundle order until the actor dies:
//! - organism against organism: when the other is strictly larger the
//!   actor absorbs it, otherwise the other absorbs the actor. The absorber
//!   gains the victim's food plus a quarter (by default) of its area.
//! - obstacle: the actor pays a penalty and dies once its food reaches zero.
//! - food: the actor gains `food_value`; the tile is left in place.
//!
//! Organism tiles without a live owner (ghost tiles left by the dead) and
//! tiles owned by the actor itself are ignored.

use vivarium_data::{Organism, Tile};

use crate::grid::CollisionBundle;
use crate::lifecycle::DeathCause;
use crate::world::TickContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Survived,
    ActorRemoved(DeathCause),
}

/// Resolves `bundle` for `actor`, which is checked out of the population.
///
/// On [`Resolution::ActorRemoved`] the caller still owns the actor and must
/// bury it.
pub fn resolve(
    actor: &mut Organism,
    bundle: &CollisionBundle,
    ctx: &mut TickContext<'_>,
) -> Resolution {
    let config = ctx.config;
    let energy = &config.energy;
    let divisor = energy.organism_to_food_divisor.max(1);

    for collision in bundle.entries() {
        match collision.tile {
            Tile::Organism => {
                let Some(other_id) = collision.organism.filter(|&id| id != actor.id) else {
                    continue;
                };
                let Some(other) = ctx.population.get(other_id) else {
                    continue;
                };
                let other_area = other.area();
                let actor_area = actor.area();
                if other_area > actor_area {
                    actor.food = actor
                        .food
                        .saturating_add(other.food)
                        .saturating_add((other_area / divisor) as i32);
                    ctx.remove_and_bury(other_id, DeathCause::AbsorbedByMover);
                } else {
                    let gain = actor.food.saturating_add((actor_area / divisor) as i32);
                    if let Some(other) = ctx.population.get_mut(other_id) {
                        other.food = other.food.saturating_add(gain);
                    }
                    return Resolution::ActorRemoved(DeathCause::AbsorbedOnImpact);
                }
            }
            Tile::Obstacle => {
                actor.food -= energy.obstacle_penalty;
                if actor.food <= 0 {
                    return Resolution::ActorRemoved(DeathCause::Obstacle);
                }
            }
            Tile::Food => actor.food = actor.food.saturating_add(energy.food_value),
            Tile::Empty => {}
        }
    }
    Resolution::Survived
}
