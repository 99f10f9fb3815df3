use env_logger::Env;
use football_core::{
    AutopilotInput, FIXED_TIMESTEP, FixedTimestep, FootballEngine, IdleInput, IntentSource,
    MatchConfig, MatchPhase,
};
use log::info;
use std::env;
use std::time::Instant;

fn load_config() -> color_eyre::Result<MatchConfig> {
    let mut config = match env::var("MATCH_CONFIG") {
        Ok(path) => {
            info!("loading match config from {}", path);
            MatchConfig::from_file(&path)?
        }
        Err(_) => MatchConfig::default(),
    };

    if let Ok(seed) = env::var("MATCH_SEED") {
        config = config.with_seed(seed.parse()?);
    }

    Ok(config)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config()?;

    let mut source: Box<dyn IntentSource> = if env::var("AUTOPLAY") == Ok(String::from("1")) {
        info!("autopilot drives the red team");
        Box::new(AutopilotInput::new(&config))
    } else {
        Box::new(IdleInput)
    };

    let mut timestep = FixedTimestep::new(config.dt());
    let mut engine = FootballEngine::new_match(config)?;
    let mut snapshot = engine.snapshot();

    let started = Instant::now();

    while snapshot.phase != MatchPhase::FullTime && !snapshot.quit_requested {
        for _ in 0..timestep.advance(FIXED_TIMESTEP) {
            let input = source.next_input(&snapshot);
            snapshot = engine.tick(&input);
        }
    }

    info!(
        "full time {} after {} ticks ({} ms)",
        snapshot.score,
        snapshot.tick,
        started.elapsed().as_millis()
    );

    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
