//! Biome presets and the per-cell fill rules used to (re)generate the grid.

use std::fmt;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::{spatial::Grid, tile::Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    /// Mixed grass shades with the odd tree, house or chicken.
    #[default]
    Meadow,
    Desert,
    Ocean,
}

impl Biome {
    pub const ALL: [Biome; 3] = [Biome::Meadow, Biome::Desert, Biome::Ocean];

    pub fn name(self) -> &'static str {
        match self {
            Biome::Meadow => "meadow",
            Biome::Desert => "desert",
            Biome::Ocean => "ocean",
        }
    }

    pub fn fill_rule(self) -> FillRule {
        match self {
            Biome::Meadow => FillRule::Weighted {
                rare: MEADOW_DECORATIONS,
                fallback: &Tile::GRASS_SHADES,
            },
            Biome::Desert => FillRule::Constant(Tile::Sand),
            Biome::Ocean => FillRule::Constant(Tile::Water),
        }
    }

    /// Overwrites every cell of `grid` by sampling this biome's fill rule
    /// independently per cell.
    pub fn generate(self, grid: &mut Grid, rng: &mut impl RngCore) {
        let rule = self.fill_rule();
        grid.fill_with(|_| rule.sample(rng));
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-cell probabilities of the rare meadow decorations.
const MEADOW_DECORATIONS: &[(Tile, f64)] = &[
    (Tile::Tree, 0.005),
    (Tile::House, 0.003),
    (Tile::Chicken, 0.002),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillRule {
    Constant(Tile),
    Uniform(&'static [Tile]),
    /// One roll against the cumulative `rare` weights; when none hits, a
    /// uniform pick from `fallback`.
    Weighted {
        rare: &'static [(Tile, f64)],
        fallback: &'static [Tile],
    },
}

impl FillRule {
    pub fn sample(&self, rng: &mut impl RngCore) -> Tile {
        match *self {
            FillRule::Constant(tile) => tile,
            FillRule::Uniform(tiles) => pick(tiles, rng),
            FillRule::Weighted { rare, fallback } => {
                let roll: f64 = rng.gen();
                let mut threshold = 0.0;
                for &(tile, weight) in rare {
                    threshold += weight;
                    if roll < threshold {
                        return tile;
                    }
                }
                pick(fallback, rng)
            }
        }
    }
}

fn pick(tiles: &[Tile], rng: &mut impl RngCore) -> Tile {
    // Rule tables are static and never empty.
    tiles[rng.gen_range(0..tiles.len())]
}
