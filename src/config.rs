use anyhow::{anyhow, Context};
use clap::Parser;
use serde::Deserialize;

use crate::common::Coordinate;
use crate::search::Strategy;

#[derive(Parser, Debug, Default)]
#[command(
    name = "Path Visualizer",
    about = "Watch breadth-first, depth-first, greedy and A* search explore a grid.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Board width in tiles (random boards)")]
    pub width: Option<usize>,

    #[arg(long, help = "Board height in tiles (random boards)")]
    pub height: Option<usize>,

    #[arg(long, help = "Chance of an interior tile being a wall (random boards)")]
    pub wall_probability: Option<f64>,

    #[arg(long, help = "Frames per second, 0 for no delay")]
    pub fps: Option<u32>,

    #[arg(long, value_enum, help = "Search strategy")]
    pub strategy: Option<Strategy>,

    #[arg(long, help = "Seed for the random number generator")]
    pub seed: Option<u64>,

    #[arg(long, help = "Load the board from a map file instead of generating one")]
    pub map_path: Option<String>,

    #[arg(long, value_parser = parse_coordinate, help = "Start cell as x,y (map files only)")]
    pub start: Option<Coordinate>,

    #[arg(long, value_parser = parse_coordinate, help = "Goal cell as x,y (map files only)")]
    pub goal: Option<Coordinate>,

    #[arg(long, help = "Only draw the final board", default_value_t = false)]
    pub no_animate: bool,

    #[arg(long, help = "Write a JSON run report to this path")]
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub wall_probability: f64,
    pub fps: u32,
    pub strategy: Strategy,
    pub seed: Option<u64>,
    pub map_path: Option<String>,
    pub start: Option<Coordinate>,
    pub goal: Option<Coordinate>,
    pub animate: bool,
    pub output_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 32,
            height: 24,
            wall_probability: 1.0 / 3.0,
            fps: 30,
            strategy: Strategy::AStar,
            seed: None,
            map_path: None,
            start: None,
            goal: None,
            animate: true,
            output_path: None,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("invalid YAML config")
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(width) = cli.width {
            self.width = width;
        }
        if let Some(height) = cli.height {
            self.height = height;
        }
        if let Some(wall_probability) = cli.wall_probability {
            self.wall_probability = wall_probability;
        }
        if let Some(fps) = cli.fps {
            self.fps = fps;
        }
        if let Some(strategy) = cli.strategy {
            self.strategy = strategy;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if cli.map_path.is_some() {
            self.map_path = cli.map_path.clone();
        }
        if cli.start.is_some() {
            self.start = cli.start;
        }
        if cli.goal.is_some() {
            self.goal = cli.goal;
        }
        if cli.no_animate {
            self.animate = false;
        }
        if cli.output_path.is_some() {
            self.output_path = cli.output_path.clone();
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.map_path.is_none() {
            if self.width < 3 || self.height < 3 {
                return Err(anyhow!(
                    "Board must be at least 3x3, got {}x{}",
                    self.width,
                    self.height
                ));
            }
            if self.start.is_some() || self.goal.is_some() {
                return Err(anyhow!(
                    "Start and goal can only be set together with a map file"
                ));
            }
        }

        if !(0.0..1.0).contains(&self.wall_probability) {
            return Err(anyhow!(
                "Wall probability must be in [0, 1), got {}",
                self.wall_probability
            ));
        }
        Ok(())
    }
}

fn parse_coordinate(value: &str) -> Result<Coordinate, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {value:?}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|err| format!("bad coordinate {part:?}: {err}"))
    };
    Ok((parse(x)?, parse(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.strategy, Strategy::AStar);
        assert_eq!((config.width, config.height), (32, 24));
    }

    #[test]
    fn test_from_yaml_str() {
        let config = Config::from_yaml_str(
            "strategy: depth-first\nfps: 0\nmap_path: map_file/test/test.map\nstart: [0, 0]\ngoal: [4, 3]\n",
        )
        .unwrap();
        assert_eq!(config.strategy, Strategy::DepthFirst);
        assert_eq!(config.fps, 0);
        assert_eq!(config.start, Some((0, 0)));
        assert_eq!(config.goal, Some((4, 3)));
        // Unset fields fall back to defaults.
        assert_eq!(config.width, 32);
        assert!(config.validate().is_ok());

        assert!(Config::from_yaml_str("strategy: dijkstra\n").is_err());
        assert!(Config::from_yaml_str("colour: red\n").is_err());
    }

    #[test]
    fn test_override_from_command_line() {
        let cli = Cli::try_parse_from([
            "path_visualizer",
            "--strategy",
            "breadth-first",
            "--width",
            "10",
            "--seed",
            "3",
            "--no-animate",
        ])
        .unwrap();
        let config = Config::default().override_from_command_line(&cli).unwrap();
        assert_eq!(config.strategy, Strategy::BreadthFirst);
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 24);
        assert_eq!(config.seed, Some(3));
        assert!(!config.animate);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cli = Cli {
            height: Some(2),
            ..Cli::default()
        };
        assert!(Config::default().override_from_command_line(&cli).is_err());

        let cli = Cli {
            wall_probability: Some(1.0),
            ..Cli::default()
        };
        assert!(Config::default().override_from_command_line(&cli).is_err());

        let cli = Cli::try_parse_from(["path_visualizer", "--start", "1,1"]).unwrap();
        assert!(Config::default().override_from_command_line(&cli).is_err());
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("3,4"), Ok((3, 4)));
        assert_eq!(parse_coordinate(" 3 , 4 "), Ok((3, 4)));
        assert!(parse_coordinate("3").is_err());
        assert!(parse_coordinate("-1,4").is_err());
    }
}
