use anyhow::Result;
use rand::seq::SliceRandom;
use tracing::trace;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    spatial::Direction,
    world::World,
};

/// Moves every creature one cell in a uniformly random cardinal direction.
/// A step that would leave the grid is dropped and the creature stays put.
pub struct WanderSystem;

impl WanderSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WanderSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for WanderSystem {
    fn name(&self) -> &str {
        "wander"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let grid = &world.grid;
        let mut blocked = 0usize;
        for creature in &mut world.creatures {
            let Some(&dir) = Direction::ALL.choose(rng) else {
                continue;
            };
            match grid.step(creature.pos, dir) {
                Some(next) => creature.pos = next,
                None => blocked += 1,
            }
        }
        trace!(
            scenario = ctx.scenario_name,
            tick = ctx.tick,
            creatures = world.creatures.len(),
            blocked,
            "creatures wandered"
        );
        Ok(())
    }
}
