use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use alien_world::{
    input::parse_script,
    scenario::{Scenario, ScenarioLoader},
    telemetry,
    web::{self, WebServerConfig},
    Simulation,
};

const DEFAULT_SCENARIO: &str = "scenarios/alien_world.yaml";

#[derive(Debug, Parser)]
#[command(author, version, about = "Alien World: wandering creatures on a biome grid")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = DEFAULT_SCENARIO)]
    scenario: PathBuf,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override simulation steps per second
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Ticks to run in headless mode (uses scenario default when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Run without the web UI and print the final grid as text
    #[arg(long)]
    headless: bool,

    /// Comma separated key presses applied before a headless run, e.g. "space,space,2"
    #[arg(long, default_value = "")]
    keys: String,

    /// Host to bind the web UI to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for the web UI
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Log filter used when RUST_LOG is unset (defaults to the scenario's level)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let using_builtin = cli.scenario == Path::new(DEFAULT_SCENARIO) && !cli.scenario.exists();
    let mut scenario = if using_builtin {
        Scenario::default()
    } else {
        ScenarioLoader::new(".").load(&cli.scenario)?
    };
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }
    if let Some(rate) = cli.tick_rate {
        scenario.tick_rate_hz = rate;
    }
    scenario.validate()?;

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| scenario.logging.level.clone());
    telemetry::init_tracing(&level)?;
    if using_builtin {
        warn!(path = DEFAULT_SCENARIO, "scenario file not found, using built-in defaults");
    }

    if cli.headless {
        let ticks = scenario.ticks(cli.ticks);
        let mut simulation = Simulation::from_scenario(&scenario)?;
        for key in parse_script(&cli.keys) {
            simulation.press(&key);
        }
        simulation.run(ticks)?;
        print!("{}", simulation.render_text());
        let summary = simulation.world().summary();
        println!(
            "Scenario '{}' ran {} ticks: biome {}, {} creatures",
            simulation.scenario_name(),
            summary.tick,
            summary.biome,
            summary.creatures
        );
        return Ok(());
    }

    info!(scenario = %scenario.name, seed = scenario.seed, "starting web UI");
    web::run(WebServerConfig {
        scenario,
        host: cli.host,
        port: cli.port,
    })
    .await
}
