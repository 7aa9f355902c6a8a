pub mod assets;
pub mod biome;
pub mod engine;
pub mod input;
pub mod render;
pub mod rng;
pub mod scenario;
pub mod simulation;
pub mod spatial;
pub mod systems;
pub mod telemetry;
pub mod tile;
pub mod web;
pub mod world;

pub use engine::{Engine, EngineBuilder, EngineSettings, Outcome, TickSummary};
pub use scenario::Scenario;
pub use simulation::Simulation;
pub use world::World;
