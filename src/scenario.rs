use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    biome::Biome,
    rng::RngManager,
    spatial::Grid,
    tile::{Rgb, Tile},
    world::World,
};

const MAX_TILES: u64 = 1 << 20;

fn default_name() -> String {
    "alien_world".to_string()
}

fn default_seed() -> u64 {
    7
}

fn default_width() -> u32 {
    60
}

fn default_height() -> u32 {
    50
}

fn default_tile_size() -> u32 {
    16
}

fn default_tick_rate_hz() -> u32 {
    10
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets/sprites")
}

fn default_initial_creatures() -> u32 {
    1
}

fn default_creature_color() -> Rgb {
    Rgb::WHITE
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("scenario parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("scenario validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub world: WorldSettings,
    #[serde(default = "default_tick_rate_hz")]
    pub tick_rate_hz: u32,
    /// Tick count for headless runs.
    #[serde(default)]
    pub ticks: Option<u64>,
    #[serde(default)]
    pub initial_biome: Biome,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
    #[serde(default)]
    pub creatures: CreatureSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSettings {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Pixels per tile on the browser canvas.
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            tile_size: default_tile_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureSettings {
    /// Creatures dropped at the grid centre when the world is built.
    #[serde(default = "default_initial_creatures")]
    pub initial: u32,
    #[serde(default = "default_creature_color")]
    pub color: Rgb,
}

impl Default for CreatureSettings {
    fn default() -> Self {
        Self {
            initial: default_initial_creatures(),
            color: default_creature_color(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: None,
            seed: default_seed(),
            world: WorldSettings::default(),
            tick_rate_hz: default_tick_rate_hz(),
            ticks: None,
            initial_biome: Biome::default(),
            assets_dir: default_assets_dir(),
            creatures: CreatureSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Scenario {
    pub fn from_yaml_str(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_yaml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.name.trim().is_empty() {
            return Err(ScenarioError::Validation(
                "scenario must define a name".into(),
            ));
        }
        if self.world.width == 0 || self.world.height == 0 {
            return Err(ScenarioError::Validation(format!(
                "world must be at least 1x1 tiles, got {}x{}",
                self.world.width, self.world.height
            )));
        }
        if self.world.width as u64 * self.world.height as u64 > MAX_TILES {
            return Err(ScenarioError::Validation(format!(
                "world of {}x{} tiles exceeds the {MAX_TILES} tile limit",
                self.world.width, self.world.height
            )));
        }
        if self.world.tile_size == 0 {
            return Err(ScenarioError::Validation(
                "tile_size must be greater than zero".into(),
            ));
        }
        if !(1..=1000).contains(&self.tick_rate_hz) {
            return Err(ScenarioError::Validation(format!(
                "tick_rate_hz must be between 1 and 1000, got {}",
                self.tick_rate_hz
            )));
        }
        Ok(())
    }

    /// Generates the starting grid for `initial_biome` and drops the initial
    /// creatures at its centre. The scenario is validated first, so a
    /// hand-built `Scenario` with an empty world is rejected here.
    pub fn build_world(&self) -> Result<World, ScenarioError> {
        self.validate()?;
        let mut rng = RngManager::new(self.seed);
        let mut grid = Grid::filled(self.world.width, self.world.height, Tile::Grass);
        self.initial_biome
            .generate(&mut grid, &mut rng.stream("genesis"));
        let center = grid.center();
        let mut world = World::new(grid, self.initial_biome, self.creatures.color);
        for _ in 0..self.creatures.initial {
            world.spawn_creature(center);
        }
        Ok(world)
    }

    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.or(self.ticks).unwrap_or(100)
    }

    pub fn tick_interval_ms(&self) -> u64 {
        (1000 / self.tick_rate_hz.max(1)) as u64
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Reads and validates a scenario file. A relative `assets_dir` is
    /// resolved against the loader's base directory.
    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .map_err(ScenarioError::from)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let mut scenario = Scenario::from_yaml_str(&data)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        if scenario.assets_dir.is_relative() {
            scenario.assets_dir = self.base_dir.join(&scenario.assets_dir);
        }
        Ok(scenario)
    }
}
