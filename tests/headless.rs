use alien_world::{
    assets::TileSet,
    input::parse_script,
    scenario::ScenarioLoader,
    spatial::TilePos,
    tile::Tile,
    Simulation,
};

fn load_simulation() -> Simulation {
    let scenario = ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
        .load("scenarios/alien_world.yaml")
        .unwrap();
    Simulation::from_scenario(&scenario).unwrap()
}

#[test]
fn bundled_sprites_load_for_the_fixture() {
    let sim = load_simulation();
    for name in ["tree", "house", "chicken"] {
        let sprite = sim.tiles().sprite(name).expect("sprite registered");
        assert!(!sprite.placeholder, "{name} fell back to the placeholder");
    }
}

#[test]
fn text_render_matches_world_after_script() {
    let mut sim = load_simulation();
    for key in parse_script("space,space,3") {
        sim.press(&key);
    }
    sim.run(25).unwrap();

    let text = sim.render_text();
    let rendered = text.to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 50);
    assert!(lines.iter().all(|line| line.chars().count() == 60));

    let creatures = sim.world().creatures();
    assert_eq!(creatures.len(), 3);
    for creature in creatures {
        assert_eq!(text.glyph_at(creature.pos), Some('@'));
    }
    let water = rendered
        .chars()
        .filter(|c| *c == Tile::Water.glyph())
        .count();
    let occupied: std::collections::HashSet<TilePos> =
        creatures.iter().map(|c| c.pos).collect();
    assert_eq!(water, 60 * 50 - occupied.len());
}

#[test]
fn frame_reflects_latest_tick() {
    let mut sim = load_simulation();
    sim.run(3).unwrap();
    let frame = sim.frame();

    assert_eq!(frame.tick, 3);
    assert_eq!(frame.tiles.len(), 60 * 50);
    assert_eq!(frame.tile_size, 16);
    assert_eq!(frame.creatures.len(), 1);
    assert!(frame
        .tiles
        .iter()
        .all(|code| Tile::from_code(*code).is_some()));
}

#[test]
fn placeholder_tiles_still_render() {
    let scenario = ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
        .load("scenarios/alien_world.yaml")
        .unwrap();
    let sim = Simulation::with_tiles(&scenario, std::sync::Arc::new(TileSet::placeholders())).unwrap();
    let frame = sim.frame();
    assert_eq!(frame.tiles.len(), 60 * 50);
}
