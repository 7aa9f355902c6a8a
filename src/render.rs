//! Draws the world onto a surface: every tile first, then every creature.

use std::fmt;

use serde::Serialize;

use crate::{
    assets::{TileSet, Visual},
    biome::Biome,
    spatial::TilePos,
    tile::Tile,
    world::{Creature, World},
};

pub trait Surface {
    /// Called once before any drawing with the grid dimensions in tiles.
    fn begin(&mut self, width: u32, height: u32);
    fn draw_tile(&mut self, pos: TilePos, tile: Tile, visual: &Visual);
    fn draw_creature(&mut self, creature: &Creature);
}

/// Read-only pass over `world`; the only side effects land on `surface`.
pub fn render<S: Surface + ?Sized>(world: &World, tiles: &TileSet, surface: &mut S) {
    let grid = world.grid();
    surface.begin(grid.width(), grid.height());
    for (pos, tile) in grid.iter() {
        surface.draw_tile(pos, tile, tiles.visual(tile));
    }
    for creature in world.creatures() {
        surface.draw_creature(creature);
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Marker {
    pub x: u32,
    pub y: u32,
    pub color: String,
}

/// A rendered frame as shipped to the browser canvas. `tiles` holds one
/// tile code per cell in row-major order; the page resolves codes through
/// the palette.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Frame {
    pub tick: u64,
    pub biome: Biome,
    pub width: u32,
    pub height: u32,
    pub tile_size: u32,
    pub tiles: Vec<u8>,
    pub creatures: Vec<Marker>,
}

impl Frame {
    pub fn capture(world: &World, tiles: &TileSet, tile_size: u32) -> Frame {
        let mut frame = Frame {
            tick: world.tick(),
            biome: world.biome(),
            width: 0,
            height: 0,
            tile_size,
            tiles: Vec::new(),
            creatures: Vec::new(),
        };
        render(world, tiles, &mut frame);
        frame
    }
}

impl Surface for Frame {
    fn begin(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.tiles.clear();
        self.tiles.reserve(width as usize * height as usize);
        self.creatures.clear();
    }

    fn draw_tile(&mut self, _pos: TilePos, tile: Tile, _visual: &Visual) {
        self.tiles.push(tile.code());
    }

    fn draw_creature(&mut self, creature: &Creature) {
        self.creatures.push(Marker {
            x: creature.pos.x,
            y: creature.pos.y,
            color: creature.color.to_hex(),
        });
    }
}

/// One glyph per cell, creatures drawn as `@`.
#[derive(Debug, Default, Clone)]
pub struct TextSurface {
    rows: Vec<Vec<char>>,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn glyph_at(&self, pos: TilePos) -> Option<char> {
        self.rows.get(pos.y as usize)?.get(pos.x as usize).copied()
    }
}

impl Surface for TextSurface {
    fn begin(&mut self, width: u32, height: u32) {
        self.rows = vec![vec![' '; width as usize]; height as usize];
    }

    fn draw_tile(&mut self, pos: TilePos, tile: Tile, _visual: &Visual) {
        if let Some(cell) = self
            .rows
            .get_mut(pos.y as usize)
            .and_then(|row| row.get_mut(pos.x as usize))
        {
            *cell = tile.glyph();
        }
    }

    fn draw_creature(&mut self, creature: &Creature) {
        if let Some(cell) = self
            .rows
            .get_mut(creature.pos.y as usize)
            .and_then(|row| row.get_mut(creature.pos.x as usize))
        {
            *cell = '@';
        }
    }
}

impl fmt::Display for TextSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: String = row.iter().collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
