//! Directional scans in front of an organism.
//!
//! The facing edge of a footprint is the row or column of tiles just
//! outside it in the facing direction. A scan casts one ray from every tile
//! of that edge and walks each ray up to `distance` tiles, stopping early
//! at the grid boundary.

use vivarium_data::{Direction, Footprint, Organism, OrganismId, Tile};

use crate::grid::Grid;
use crate::lifecycle::Population;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Stop at the first ray that finds anything.
    Exists,
    /// Visit every ray and keep the largest find.
    Max,
}

/// First tile of the facing edge: the top or left end.
pub fn ray_origin(footprint: &Footprint, facing: Direction) -> (i64, i64) {
    let (x, y) = (footprint.x as i64, footprint.y as i64);
    match facing {
        Direction::Up => (x, y - 1),
        Direction::Down => (x, footprint.bottom() as i64),
        Direction::Left => (x - 1, y),
        Direction::Right => (footprint.right() as i64, y),
    }
}

/// Last tile of the facing edge: the bottom or right end.
pub fn ray_origin_end(footprint: &Footprint, facing: Direction) -> (i64, i64) {
    let (x, y) = ray_origin(footprint, facing);
    if facing.is_horizontal() {
        (x, y + footprint.height as i64 - 1)
    } else {
        (x + footprint.width as i64 - 1, y)
    }
}

fn edge_origins(footprint: &Footprint, facing: Direction) -> impl Iterator<Item = (i64, i64)> {
    let (sx, sy) = ray_origin(footprint, facing);
    let (ex, ey) = ray_origin_end(footprint, facing);
    (sy..=ey).flat_map(move |y| (sx..=ex).map(move |x| (x, y)))
}

/// Walks up to `distance` tiles from `origin` and returns the first non-zero
/// predicate value, or 0.
pub fn walk_ray<F>(
    grid: &Grid,
    origin: (i64, i64),
    facing: Direction,
    distance: u32,
    pred: &mut F,
) -> i32
where
    F: FnMut(u32, u32) -> i32,
{
    let (dx, dy) = facing.delta();
    let (mut x, mut y) = origin;
    for _ in 0..distance {
        if !grid.contains(x, y) {
            break;
        }
        let value = pred(x as u32, y as u32);
        if value != 0 {
            return value;
        }
        x += dx;
        y += dy;
    }
    0
}

/// Scans every ray across the facing edge. Returns 0 when nothing matched.
pub fn scan<F>(
    grid: &Grid,
    footprint: &Footprint,
    facing: Direction,
    distance: u32,
    mode: ScanMode,
    mut pred: F,
) -> i32
where
    F: FnMut(u32, u32) -> i32,
{
    match mode {
        ScanMode::Exists => edge_origins(footprint, facing)
            .map(|origin| walk_ray(grid, origin, facing, distance, &mut pred))
            .find(|&value| value != 0)
            .unwrap_or(0),
        ScanMode::Max => {
            let mut best = -1;
            for origin in edge_origins(footprint, facing) {
                best = best.max(walk_ray(grid, origin, facing, distance, &mut pred));
            }
            best.max(0)
        }
    }
}

/// Area of the largest organism ahead, or 0.
pub fn largest_organism_ahead(
    grid: &Grid,
    population: &Population,
    org: &Organism,
    distance: u32,
) -> i32 {
    scan(grid, &org.footprint, org.facing, distance, ScanMode::Max, |x, y| {
        if grid.get(x, y) != Tile::Organism {
            return 0;
        }
        population
            .occupant_at(x, y)
            .and_then(|id| population.get(id))
            .map_or(0, |other| other.area() as i32)
    })
}

pub fn organism_ahead(grid: &Grid, population: &Population, org: &Organism, distance: u32) -> bool {
    largest_organism_ahead(grid, population, org, distance) != 0
}

pub fn food_ahead(grid: &Grid, org: &Organism, distance: u32) -> bool {
    scan(grid, &org.footprint, org.facing, distance, ScanMode::Exists, |x, y| {
        i32::from(grid.get(x, y) == Tile::Food)
    }) != 0
}

/// First organism met on the single ray from [`ray_origin`]. Only the
/// footprints are consulted, not the tile tags.
pub fn first_organism_on_ray(
    grid: &Grid,
    population: &Population,
    org: &Organism,
    distance: u32,
) -> Option<OrganismId> {
    let mut hit = None;
    walk_ray(grid, ray_origin(&org.footprint, org.facing), org.facing, distance, &mut |x, y| {
        match population.occupant_at(x, y) {
            Some(id) => {
                hit = Some(id);
                1
            }
            None => 0,
        }
    });
    hit
}
