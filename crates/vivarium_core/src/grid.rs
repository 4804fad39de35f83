//! Dense tile store covering the whole world.
//!
//! The grid knows tile tags only. Which organism owns an `Organism` tile is
//! answered by the caller through a point query, never by the grid.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use vivarium_data::{Footprint, OrganismId, Position, Tile};

use crate::config::WorldConfig;

/// One non-empty tile met by a collision-checked write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    pub tile: Tile,
    pub position: Position,
    /// Occupant found by point query; only set for `Tile::Organism`.
    pub organism: Option<OrganismId>,
}

/// Simultaneous collisions produced by one area write, in row-major order.
///
/// Holds at most `capacity` entries. Further collisions are dropped and
/// `overflowed` is set; the tiles they refer to are still left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionBundle {
    entries: Vec<Collision>,
    capacity: usize,
    overflowed: bool,
}

impl CollisionBundle {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.min(64)),
            capacity,
            overflowed: false,
        }
    }

    fn push(&mut self, collision: Collision) {
        if self.entries.len() < self.capacity {
            self.entries.push(collision);
        } else {
            self.overflowed = true;
        }
    }

    pub fn entries(&self) -> &[Collision] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Empty; width as usize * height as usize],
        }
    }

    /// Builds a grid with independently scattered Food and Obstacle tiles.
    pub fn generate(config: &WorldConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = Self::new(config.width, config.height);
        let food = config.food_per_500;
        let obstacle = food + config.obstacle_per_500;
        for tile in &mut grid.tiles {
            let r = rng.gen_range(0..500u32);
            if r < food {
                *tile = Tile::Food;
            } else if r < obstacle {
                *tile = Tile::Obstacle;
            }
        }
        grid
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn center(&self) -> Position {
        Position {
            x: self.width / 2,
            y: self.height / 2,
        }
    }

    #[inline(always)]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    pub fn contains_rect(&self, rect: &Footprint) -> bool {
        rect.width > 0
            && rect.height > 0
            && rect.right() <= self.width as u64
            && rect.bottom() <= self.height as u64
    }

    /// Tag at `(x, y)`.
    ///
    /// # Panics
    /// Out-of-bounds coordinates are a caller bug.
    pub fn get(&self, x: u32, y: u32) -> Tile {
        assert!(
            x < self.width && y < self.height,
            "grid read out of bounds: ({x}, {y}) on {}x{}",
            self.width,
            self.height
        );
        self.tiles[self.index(x, y)]
    }

    pub fn try_get(&self, x: i64, y: i64) -> Option<Tile> {
        if self.contains(x, y) {
            Some(self.tiles[self.index(x as u32, y as u32)])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u32, y: u32, tile: Tile) {
        assert!(
            x < self.width && y < self.height,
            "grid write out of bounds: ({x}, {y}) on {}x{}",
            self.width,
            self.height
        );
        let idx = self.index(x, y);
        self.tiles[idx] = tile;
    }

    /// Writes `tile` over every cell of `rect`.
    ///
    /// With `check` set, non-empty cells are reported instead of written and
    /// keep their current tag. `occupant` resolves the owner of an
    /// `Organism` cell.
    pub fn write_area<F>(
        &mut self,
        rect: &Footprint,
        tile: Tile,
        check: bool,
        capacity: usize,
        occupant: F,
    ) -> CollisionBundle
    where
        F: Fn(u32, u32) -> Option<OrganismId>,
    {
        debug_assert!(self.contains_rect(rect), "area write outside grid: {rect:?}");
        let mut bundle = CollisionBundle::with_capacity(capacity);
        for (x, y) in rect.cells() {
            let idx = self.index(x, y);
            let current = self.tiles[idx];
            if check && !current.is_empty() {
                bundle.push(Collision {
                    tile: current,
                    position: Position { x, y },
                    organism: if current == Tile::Organism {
                        occupant(x, y)
                    } else {
                        None
                    },
                });
            } else {
                self.tiles[idx] = tile;
            }
        }
        if bundle.overflowed() {
            tracing::debug!(?rect, kept = bundle.len(), "Collision bundle truncated");
        }
        bundle
    }

    /// Clears `Organism` tags inside `rect`. Food and obstacles stay.
    pub fn lift_area(&mut self, rect: &Footprint) {
        for (x, y) in rect.cells() {
            if !self.contains(x as i64, y as i64) {
                continue;
            }
            let idx = self.index(x, y);
            if self.tiles[idx] == Tile::Organism {
                self.tiles[idx] = Tile::Empty;
            }
        }
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }
}
