use serde::{Deserialize, Serialize};

use crate::{
    biome::Biome,
    spatial::{Grid, TilePos},
    tile::Rgb,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CreatureId(u64);

impl CreatureId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub pos: TilePos,
    pub color: Rgb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSummary {
    pub tick: u64,
    pub biome: Biome,
    pub width: u32,
    pub height: u32,
    pub creatures: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    next_creature: u64,
    tick: u64,
    biome: Biome,
    creature_color: Rgb,
    pub(crate) grid: Grid,
    pub(crate) creatures: Vec<Creature>,
}

impl World {
    pub fn new(grid: Grid, biome: Biome, creature_color: Rgb) -> Self {
        Self {
            next_creature: 0,
            tick: 0,
            biome,
            creature_color,
            grid,
            creatures: Vec::new(),
        }
    }

    /// Adds a creature at `pos`, clamped to the nearest cell inside the grid.
    pub fn spawn_creature(&mut self, pos: TilePos) -> CreatureId {
        let pos = TilePos::new(
            pos.x.min(self.grid.width() - 1),
            pos.y.min(self.grid.height() - 1),
        );
        let id = CreatureId(self.next_creature);
        self.next_creature += 1;
        self.creatures.push(Creature {
            id,
            pos,
            color: self.creature_color,
        });
        id
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn advance_time(&mut self) {
        self.tick += 1;
    }

    pub fn biome(&self) -> Biome {
        self.biome
    }

    pub(crate) fn set_biome(&mut self, biome: Biome) {
        self.biome = biome;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    pub fn summary(&self) -> WorldSummary {
        WorldSummary {
            tick: self.tick,
            biome: self.biome,
            width: self.grid.width(),
            height: self.grid.height(),
            creatures: self.creatures.len(),
        }
    }
}
