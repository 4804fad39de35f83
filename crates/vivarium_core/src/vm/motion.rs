use vivarium_data::{Direction, Footprint, Organism};

use crate::grid::{CollisionBundle, Grid};
use crate::world::TickContext;

/// Shifts `org` one tile in `direction` and imprints the new footprint.
///
/// A move that would leave the grid is refused and reports no collisions.
/// Otherwise the old footprint is lifted first, so the organism never
/// collides with itself.
pub fn move_organism(
    org: &mut Organism,
    direction: Direction,
    ctx: &mut TickContext<'_>,
) -> CollisionBundle {
    let (dx, dy) = direction.delta();
    let target = org
        .footprint
        .translated(dx, dy)
        .filter(|fp| ctx.grid.contains_rect(fp));
    let Some(target) = target else {
        return CollisionBundle::with_capacity(ctx.config.search.max_simultaneous_collisions);
    };
    ctx.grid.lift_area(&org.footprint);
    org.footprint = target;
    ctx.imprint(&target)
}

/// Footprint after growing one tile toward `facing`, if it still fits.
pub fn grown_footprint(fp: &Footprint, facing: Direction, grid: &Grid) -> Option<Footprint> {
    let grown = match facing {
        Direction::Up => Footprint::new(fp.x, fp.y.checked_sub(1)?, fp.width, fp.height + 1),
        Direction::Down => Footprint::new(fp.x, fp.y, fp.width, fp.height + 1),
        Direction::Left => Footprint::new(fp.x.checked_sub(1)?, fp.y, fp.width + 1, fp.height),
        Direction::Right => Footprint::new(fp.x, fp.y, fp.width + 1, fp.height),
    };
    grid.contains_rect(&grown).then_some(grown)
}

/// Grows toward the facing direction and charges for the new strip.
///
/// The grid is not touched; the enlarged footprint is imprinted by the next
/// move. Growth past the world edge is refused but still paid for.
pub fn grow(org: &mut Organism, grid: &Grid, cost_per_tile: i32) {
    if let Some(grown) = grown_footprint(&org.footprint, org.facing, grid) {
        org.footprint = grown;
    }
    let perpendicular = if org.facing.is_horizontal() {
        org.footprint.height
    } else {
        org.footprint.width
    };
    org.food -= cost_per_tile * perpendicular as i32;
}
