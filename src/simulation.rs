use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::{
    assets::TileSet,
    engine::{Engine, EngineBuilder, EngineSettings, Outcome, TickSummary},
    input::{Command, Key},
    render::{self, Frame, TextSurface},
    scenario::Scenario,
    systems::WanderSystem,
    world::World,
};

/// Engine, world and tile visuals for one running scenario.
pub struct Simulation {
    engine: Engine,
    world: World,
    tiles: Arc<TileSet>,
    tile_size: u32,
}

impl Simulation {
    /// Builds the world and loads sprites from the scenario's assets dir.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self> {
        let tiles = Arc::new(TileSet::load(&scenario.assets_dir));
        Self::with_tiles(scenario, tiles)
    }

    pub fn with_tiles(scenario: &Scenario, tiles: Arc<TileSet>) -> Result<Self> {
        let settings = EngineSettings {
            scenario_name: scenario.name.clone(),
            seed: scenario.seed,
        };
        let engine = EngineBuilder::new(settings)
            .with_system(WanderSystem::new())
            .build();
        let world = scenario.build_world()?;
        info!(
            scenario = %scenario.name,
            width = world.grid().width(),
            height = world.grid().height(),
            biome = %world.biome(),
            "world ready"
        );
        Ok(Self {
            engine,
            world,
            tiles,
            tile_size: scenario.world.tile_size,
        })
    }

    pub fn step(&mut self) -> Result<TickSummary> {
        self.engine.tick(&mut self.world)
    }

    pub fn run(&mut self, ticks: u64) -> Result<()> {
        self.engine.run(&mut self.world, ticks)
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        self.engine.apply(&mut self.world, command)
    }

    pub fn press(&mut self, key: &Key) -> Option<Outcome> {
        self.engine.press(&mut self.world, key)
    }

    pub fn frame(&self) -> Frame {
        Frame::capture(&self.world, &self.tiles, self.tile_size)
    }

    pub fn render_text(&self) -> TextSurface {
        let mut surface = TextSurface::new();
        render::render(&self.world, &self.tiles, &mut surface);
        surface
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tiles(&self) -> &Arc<TileSet> {
        &self.tiles
    }

    pub fn scenario_name(&self) -> &str {
        self.engine.scenario_name()
    }
}
