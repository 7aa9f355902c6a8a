use std::time::Instant;

use anyhow::Result;
use rand::Rng;
use tracing::{debug, info, trace};

use crate::{
    biome::Biome,
    input::{Command, Key, Keymap},
    rng::{RngManager, SystemRng},
    spatial::TilePos,
    world::{CreatureId, World},
};

pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System + Send>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl System + Send + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            rng: RngManager::new(self.settings.seed),
            systems: self.systems,
            keymap: Keymap,
            settings: self.settings,
        }
    }
}

pub struct Engine {
    rng: RngManager,
    systems: Vec<Box<dyn System + Send>>,
    keymap: Keymap,
    settings: EngineSettings,
}

#[derive(Clone, Debug)]
pub struct SystemRunReport {
    pub name: String,
    pub duration_ms: f64,
}

#[derive(Clone, Debug)]
pub struct TickSummary {
    pub tick: u64,
    pub system_reports: Vec<SystemRunReport>,
    pub creatures: usize,
}

/// What a command did to the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Spawned { id: CreatureId, pos: TilePos },
    Regenerated { biome: Biome },
}

impl Engine {
    pub fn scenario_name(&self) -> &str {
        &self.settings.scenario_name
    }

    pub fn run(&mut self, world: &mut World, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.tick(world)?;
        }
        Ok(())
    }

    /// Runs every system once in registration order, then advances the clock.
    pub fn tick(&mut self, world: &mut World) -> Result<TickSummary> {
        let current_tick = world.tick();
        let mut system_reports = Vec::with_capacity(self.systems.len());
        for system in &mut self.systems {
            let start = Instant::now();
            let mut rng_stream = self.rng.stream(system.name());
            let ctx = SystemContext {
                tick: current_tick,
                scenario_name: &self.settings.scenario_name,
            };
            system.run(&ctx, world, &mut rng_stream)?;
            system_reports.push(SystemRunReport {
                name: system.name().to_string(),
                duration_ms: start.elapsed().as_secs_f64() * 1_000.0,
            });
        }
        world.advance_time();
        trace!(tick = world.tick(), creatures = world.creature_count(), "tick complete");
        Ok(TickSummary {
            tick: world.tick(),
            system_reports,
            creatures: world.creature_count(),
        })
    }

    pub fn apply(&mut self, world: &mut World, command: Command) -> Outcome {
        match command {
            Command::Spawn => {
                let grid = world.grid();
                let (width, height) = (grid.width(), grid.height());
                let mut rng = self.rng.stream("spawn");
                let pos = TilePos::new(rng.gen_range(0..width), rng.gen_range(0..height));
                let id = world.spawn_creature(pos);
                info!(creature = id.raw(), x = pos.x, y = pos.y, "spawned creature");
                Outcome::Spawned { id, pos }
            }
            Command::SelectBiome(biome) => {
                biome.generate(&mut world.grid, &mut self.rng.stream("worldgen"));
                world.set_biome(biome);
                info!(%biome, "regenerated world");
                Outcome::Regenerated { biome }
            }
        }
    }

    /// Maps a key press to its command and applies it. Unbound keys are
    /// ignored.
    pub fn press(&mut self, world: &mut World, key: &Key) -> Option<Outcome> {
        match self.keymap.command_for(key) {
            Some(command) => Some(self.apply(world, command)),
            None => {
                debug!(?key, "ignoring unbound key");
                None
            }
        }
    }
}

pub struct SystemContext<'a> {
    pub tick: u64,
    pub scenario_name: &'a str,
}

pub trait System {
    fn name(&self) -> &str;
    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        spatial::Grid,
        tile::{Rgb, Tile},
    };

    struct CountingSystem {
        label: &'static str,
        calls: u32,
    }

    impl System for CountingSystem {
        fn name(&self) -> &str {
            self.label
        }

        fn run(
            &mut self,
            _ctx: &SystemContext,
            _world: &mut World,
            _rng: &mut SystemRng<'_>,
        ) -> Result<()> {
            self.calls += 1;
            Ok(())
        }
    }

    struct ContextRecorder {
        seen: Arc<Mutex<Vec<(u64, String)>>>,
    }

    impl System for ContextRecorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn run(
            &mut self,
            ctx: &SystemContext,
            _world: &mut World,
            _rng: &mut SystemRng<'_>,
        ) -> Result<()> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push((ctx.tick, ctx.scenario_name.to_string()));
            }
            Ok(())
        }
    }

    fn engine() -> Engine {
        EngineBuilder::new(EngineSettings {
            scenario_name: "test".into(),
            seed: 42,
        })
        .with_system(CountingSystem {
            label: "first",
            calls: 0,
        })
        .with_system(CountingSystem {
            label: "second",
            calls: 0,
        })
        .build()
    }

    fn world() -> World {
        World::new(Grid::filled(8, 6, Tile::Grass), Biome::Meadow, Rgb::WHITE)
    }

    #[test]
    fn tick_runs_systems_in_order_and_advances_clock() {
        let mut engine = engine();
        let mut world = world();

        let summary = engine.tick(&mut world).unwrap();
        assert_eq!(summary.tick, 1);
        let names: Vec<_> = summary.system_reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);

        engine.run(&mut world, 4).unwrap();
        assert_eq!(world.tick(), 5);
    }

    #[test]
    fn systems_see_the_tick_being_run_and_scenario_name() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut engine = EngineBuilder::new(EngineSettings {
            scenario_name: "ctx".into(),
            seed: 1,
        })
        .with_system(ContextRecorder { seen: seen.clone() })
        .build();
        let mut world = world();

        engine.run(&mut world, 3).unwrap();

        let seen = seen.lock().unwrap();
        let ticks: Vec<u64> = seen.iter().map(|(tick, _)| *tick).collect();
        assert_eq!(ticks, vec![0, 1, 2]);
        assert!(seen.iter().all(|(_, name)| name == "ctx"));
    }

    #[test]
    fn spawn_command_lands_inside_grid() {
        let mut engine = engine();
        let mut world = world();

        for _ in 0..100 {
            match engine.apply(&mut world, Command::Spawn) {
                Outcome::Spawned { pos, .. } => assert!(world.grid().contains(pos)),
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        assert_eq!(world.creature_count(), 100);
    }

    #[test]
    fn select_biome_regenerates_grid() {
        let mut engine = engine();
        let mut world = world();

        engine.apply(&mut world, Command::SelectBiome(Biome::Ocean));
        assert_eq!(world.biome(), Biome::Ocean);
        assert!(world.grid().iter().all(|(_, tile)| tile == Tile::Water));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut engine = engine();
        let mut world = world();
        let before = world.clone();

        assert_eq!(engine.press(&mut world, &Key::parse("Escape")), None);
        assert_eq!(world, before);
    }
}
