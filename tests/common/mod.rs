pub mod macros;

use vivarium_core::{SimConfig, World};
use vivarium_data::{Direction, Footprint, OrganismId, Tile};

type GridMod = Box<dyn FnOnce(&mut World)>;

/// Builds small, empty, deterministic worlds for scenario tests.
#[allow(dead_code)]
pub struct WorldBuilder {
    config: SimConfig,
    seed: u64,
    grid_mods: Vec<GridMod>,
    organisms: Vec<OrganismBuilder>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = SimConfig::default();
        config.world.width = 64;
        config.world.height = 64;
        config.organism.memory_size = 64;
        config.organism.max_organisms = 64;
        config.log_interval = 0;
        Self {
            config,
            seed: 0,
            grid_mods: Vec::new(),
            organisms: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.world.width = width;
        self.config.world.height = height;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut SimConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_tile(mut self, x: u32, y: u32, tile: Tile) -> Self {
        self.grid_mods
            .push(Box::new(move |world| world.grid_mut().set(x, y, tile)));
        self
    }

    /// Fills the row segment `x..x + len` at `y` with `tile`.
    pub fn with_row(mut self, x: u32, y: u32, len: u32, tile: Tile) -> Self {
        self.grid_mods.push(Box::new(move |world| {
            for cx in x..x + len {
                world.grid_mut().set(cx, y, tile);
            }
        }));
        self
    }

    pub fn with_organism(mut self, organism: OrganismBuilder) -> Self {
        self.organisms.push(organism);
        self
    }

    /// Returns the world and the ids of the added organisms, in order.
    pub fn build(self) -> (World, Vec<OrganismId>) {
        let mut world =
            World::empty(self.config, self.seed).expect("Failed to create world in test builder");
        for modifier in self.grid_mods {
            modifier(&mut world);
        }
        let ids = self
            .organisms
            .into_iter()
            .map(|builder| builder.spawn(&mut world))
            .collect();
        (world, ids)
    }
}

/// Organism placed by [`WorldBuilder`]. Memory is all NOPs unless a
/// program is given.
#[allow(dead_code)]
pub struct OrganismBuilder {
    x: u32,
    y: u32,
    fill: u8,
    program: Vec<u8>,
    food: Option<i32>,
    age: Option<u64>,
    facing: Option<Direction>,
    size: Option<(u32, u32)>,
    dp: Option<usize>,
}

#[allow(dead_code)]
impl OrganismBuilder {
    pub fn at(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            fill: 255,
            program: Vec::new(),
            food: None,
            age: None,
            facing: None,
            size: None,
            dp: None,
        }
    }

    pub fn program(mut self, code: &[u8]) -> Self {
        self.program = code.to_vec();
        self
    }

    pub fn fill(mut self, byte: u8) -> Self {
        self.fill = byte;
        self
    }

    pub fn food(mut self, food: i32) -> Self {
        self.food = Some(food);
        self
    }

    pub fn age(mut self, age: u64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn facing(mut self, facing: Direction) -> Self {
        self.facing = Some(facing);
        self
    }

    /// Footprint size; the whole footprint is tagged on the grid.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn dp(mut self, dp: usize) -> Self {
        self.dp = Some(dp);
        self
    }

    fn spawn(self, world: &mut World) -> OrganismId {
        let id = world
            .spawn_at(self.x, self.y)
            .expect("Failed to spawn organism in test builder")
            .id;
        let footprint = self
            .size
            .map(|(w, h)| Footprint::new(self.x, self.y, w, h));
        if let Some(fp) = footprint {
            for (x, y) in fp.cells() {
                world.grid_mut().set(x, y, Tile::Organism);
            }
        }
        let org = world.organism_mut(id).expect("spawned organism");
        org.memory.fill(self.fill);
        org.memory[..self.program.len()].copy_from_slice(&self.program);
        if let Some(fp) = footprint {
            org.footprint = fp;
        }
        if let Some(food) = self.food {
            org.food = food;
        }
        if let Some(age) = self.age {
            org.age = age;
        }
        if let Some(facing) = self.facing {
            org.facing = facing;
        }
        if let Some(dp) = self.dp {
            org.lanes[0].dp = dp;
        }
        id
    }
}

/// Runs `ticks` scheduler passes.
#[allow(dead_code)]
pub fn run(world: &mut World, ticks: u64) {
    for _ in 0..ticks {
        world.tick();
    }
}
