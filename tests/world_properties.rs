use std::{path::PathBuf, sync::Arc};

use alien_world::{
    assets::TileSet,
    biome::Biome,
    input::{Command, Key},
    scenario::{Scenario, ScenarioLoader},
    tile::Tile,
    Outcome, Simulation,
};

fn scenario_loader() -> ScenarioLoader {
    ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
}

fn scenario_path() -> PathBuf {
    PathBuf::from("scenarios/alien_world.yaml")
}

fn color_only(scenario: &Scenario) -> Simulation {
    Simulation::with_tiles(scenario, Arc::new(TileSet::placeholders())).unwrap()
}

fn small_scenario(seed: u64) -> Scenario {
    let mut scenario = Scenario {
        seed,
        ..Scenario::default()
    };
    scenario.world.width = 7;
    scenario.world.height = 5;
    scenario
}

#[test]
fn creatures_stay_in_bounds_after_many_ticks() {
    for seed in 0..8 {
        let scenario = small_scenario(seed);
        let mut sim = color_only(&scenario);
        for _ in 0..10 {
            sim.apply(Command::Spawn);
        }
        for _ in 0..500 {
            sim.step().unwrap();
            let grid = sim.world().grid();
            for creature in sim.world().creatures() {
                assert!(
                    creature.pos.x < grid.width() && creature.pos.y < grid.height(),
                    "seed {seed}: creature {:?} left the grid",
                    creature
                );
            }
        }
    }
}

#[test]
fn regeneration_assigns_every_cell() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    let mut sim = Simulation::from_scenario(&scenario).unwrap();
    let cells = (scenario.world.width * scenario.world.height) as usize;

    for biome in [Biome::Desert, Biome::Meadow, Biome::Ocean, Biome::Meadow] {
        let outcome = sim.apply(Command::SelectBiome(biome));
        assert_eq!(outcome, Outcome::Regenerated { biome });
        let grid = sim.world().grid();
        assert_eq!(grid.tile_count(), cells);
        assert_eq!(grid.iter().count(), cells);
        for (_, tile) in grid.iter() {
            let allowed = match biome {
                Biome::Desert => tile == Tile::Sand,
                Biome::Ocean => tile == Tile::Water,
                Biome::Meadow => !matches!(tile, Tile::Sand | Tile::Water),
            };
            assert!(allowed, "{tile:?} is not part of {biome}");
        }
        assert_eq!(sim.world().biome(), biome);
    }
}

#[test]
fn each_spawn_key_adds_exactly_one_creature() {
    let scenario = small_scenario(3);
    let mut sim = color_only(&scenario);
    assert_eq!(sim.world().creature_count(), 1);

    for expected in 2..=20 {
        let outcome = sim.press(&Key::parse("Space"));
        assert!(matches!(outcome, Some(Outcome::Spawned { .. })));
        assert_eq!(sim.world().creature_count(), expected);
    }

    assert_eq!(sim.press(&Key::parse("KeyX")), None);
    sim.press(&Key::parse("Digit2"));
    assert_eq!(sim.world().creature_count(), 20, "biome keys never spawn");
}

#[test]
fn same_seed_and_inputs_give_identical_worlds() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    let script = [
        Key::Space,
        Key::Digit(2),
        Key::Space,
        Key::Digit(1),
        Key::Space,
    ];

    let run = || {
        let mut sim = Simulation::from_scenario(&scenario).unwrap();
        for key in &script {
            sim.press(key);
            sim.run(15).unwrap();
        }
        sim
    };

    let a = run();
    let b = run();
    assert_eq!(a.world(), b.world());
    assert_eq!(a.frame(), b.frame());
}

#[test]
fn different_seeds_diverge() {
    let mut a = color_only(&small_scenario(1));
    let mut b = color_only(&small_scenario(2));
    for _ in 0..5 {
        a.apply(Command::Spawn);
        b.apply(Command::Spawn);
    }
    let positions = |sim: &Simulation| {
        sim.world()
            .creatures()
            .iter()
            .map(|c| c.pos)
            .collect::<Vec<_>>()
    };
    assert_ne!(positions(&a), positions(&b));
}
