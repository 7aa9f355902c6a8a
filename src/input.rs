//! Keyboard input and the commands it maps to.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::biome::Biome;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Digit(u8),
    Other(String),
}

impl Key {
    /// Accepts browser `KeyboardEvent.code` names (`Space`, `Digit1`),
    /// the raw characters (`" "`, `"1"`) and the word `space`.
    pub fn parse(raw: &str) -> Key {
        match raw {
            " " => return Key::Space,
            _ if raw.eq_ignore_ascii_case("space") => return Key::Space,
            _ => {}
        }
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix("Digit")
            .or_else(|| trimmed.strip_prefix("Numpad"))
            .unwrap_or(trimmed);
        match digits.as_bytes() {
            [d @ b'0'..=b'9'] => Key::Digit(d - b'0'),
            _ => Key::Other(raw.to_string()),
        }
    }
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Key::parse(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "biome", rename_all = "snake_case")]
pub enum Command {
    Spawn,
    SelectBiome(Biome),
}

/// Fixed demo bindings: space spawns, 1/2/3 pick a biome.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keymap;

impl Keymap {
    pub fn command_for(&self, key: &Key) -> Option<Command> {
        match key {
            Key::Space => Some(Command::Spawn),
            Key::Digit(1) => Some(Command::SelectBiome(Biome::Meadow)),
            Key::Digit(2) => Some(Command::SelectBiome(Biome::Desert)),
            Key::Digit(3) => Some(Command::SelectBiome(Biome::Ocean)),
            _ => None,
        }
    }

    pub fn bindings(&self) -> Vec<(&'static str, Command)> {
        vec![
            ("Space", Command::Spawn),
            ("1", Command::SelectBiome(Biome::Meadow)),
            ("2", Command::SelectBiome(Biome::Desert)),
            ("3", Command::SelectBiome(Biome::Ocean)),
        ]
    }
}

/// Parses a comma separated key script such as `space,space,2`.
pub fn parse_script(script: &str) -> Vec<Key> {
    script
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| Key::parse(part.trim()))
        .collect()
}
