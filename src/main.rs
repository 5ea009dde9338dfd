use path_visualizer::board::Board;
use path_visualizer::config::{Cli, Config};
use path_visualizer::report::RunReport;
use path_visualizer::visualizer::Visualizer;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("cannot read config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        info!("No config file specified, using default config");
        Config::default()
    }
    .override_from_command_line(&cli)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let board = match config.map_path.as_deref() {
        Some(map_path) => Board::from_file(map_path, config.start, config.goal, &mut rng)
            .with_context(|| format!("error loading map: {map_path}"))?,
        None => Board::random(config.width, config.height, config.wall_probability, &mut rng)?,
    };
    let (start, goal) = (board.start(), board.goal());

    let mut visualizer = Visualizer::new(board, config.strategy, config.fps, config.animate);
    let outcome = visualizer.run(&mut std::io::stdout().lock())?;
    outcome.stats.print();

    if let Some(output_path) = config.output_path.as_deref() {
        RunReport::new(config.strategy, start, goal, &outcome)
            .write_json(output_path)
            .with_context(|| format!("error writing report: {output_path}"))?;
    }

    Ok(())
}
