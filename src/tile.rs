//! Tile categories and their display colours.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex notation, e.g. `#228b22`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Tile {
    GrassLight = 0,
    Grass = 1,
    GrassDark = 2,
    Sand = 3,
    Water = 4,
    Tree = 5,
    House = 6,
    Chicken = 7,
}

impl Tile {
    pub const ALL: [Tile; 8] = [
        Tile::GrassLight,
        Tile::Grass,
        Tile::GrassDark,
        Tile::Sand,
        Tile::Water,
        Tile::Tree,
        Tile::House,
        Tile::Chicken,
    ];

    pub const GRASS_SHADES: [Tile; 3] = [Tile::GrassLight, Tile::Grass, Tile::GrassDark];

    /// Stable wire code used by rendered frames.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Tile> {
        Tile::ALL.get(code as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Tile::GrassLight => "grass_light",
            Tile::Grass => "grass",
            Tile::GrassDark => "grass_dark",
            Tile::Sand => "sand",
            Tile::Water => "water",
            Tile::Tree => "tree",
            Tile::House => "house",
            Tile::Chicken => "chicken",
        }
    }

    /// Base colour. Sprite-backed tiles use it under the sprite and on
    /// surfaces that cannot draw bitmaps.
    pub fn color(self) -> Rgb {
        match self {
            Tile::GrassLight => Rgb::new(76, 175, 80),
            Tile::Grass => Rgb::new(34, 139, 34),
            Tile::GrassDark => Rgb::new(0, 100, 0),
            Tile::Sand => Rgb::new(194, 178, 128),
            Tile::Water => Rgb::new(28, 107, 160),
            Tile::Tree => Rgb::new(20, 80, 20),
            Tile::House => Rgb::new(150, 75, 0),
            Tile::Chicken => Rgb::new(240, 230, 200),
        }
    }

    /// File stem of the sprite drawn for this tile, if it has one.
    pub fn sprite_name(self) -> Option<&'static str> {
        match self {
            Tile::Tree => Some("tree"),
            Tile::House => Some("house"),
            Tile::Chicken => Some("chicken"),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Tile::GrassLight => ',',
            Tile::Grass => '.',
            Tile::GrassDark => ';',
            Tile::Sand => ':',
            Tile::Water => '~',
            Tile::Tree => 'T',
            Tile::House => 'H',
            Tile::Chicken => 'c',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_for_every_tile() {
        for tile in Tile::ALL {
            assert_eq!(Tile::from_code(tile.code()), Some(tile));
        }
        assert_eq!(Tile::from_code(Tile::ALL.len() as u8), None);
    }

    #[test]
    fn only_decorations_have_sprites() {
        let with_sprites: Vec<_> = Tile::ALL
            .iter()
            .filter(|tile| tile.sprite_name().is_some())
            .collect();
        assert_eq!(with_sprites, vec![&Tile::Tree, &Tile::House, &Tile::Chicken]);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(Tile::Grass.color().to_hex(), "#228b22");
        assert_eq!(Rgb::WHITE.to_string(), "#ffffff");
    }
}
