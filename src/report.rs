use std::fs::File;
use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::common::Coordinate;
use crate::search::{SearchStatus, Strategy};
use crate::stat::Stats;
use crate::visualizer::Outcome;

/// Summary of one visualizer run, written as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub strategy: Strategy,
    pub start: Coordinate,
    pub goal: Coordinate,
    pub status: SearchStatus,
    pub path: Vec<Coordinate>,
    pub stats: Stats,
}

impl RunReport {
    pub fn new(strategy: Strategy, start: Coordinate, goal: Coordinate, outcome: &Outcome) -> Self {
        RunReport {
            strategy,
            start,
            goal,
            status: outcome.status,
            path: outcome.path.clone(),
            stats: outcome.stats.clone(),
        }
    }

    pub fn write_json(&self, path: &str) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        info!("Wrote run report to {path}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json() {
        let outcome = Outcome {
            status: SearchStatus::SolutionFound,
            path: vec![(1, 0)],
            stats: Stats {
                steps: 3,
                expanded_nodes: 2,
                opened_nodes: 5,
                max_frontier: 4,
                solution_cost: Some(2),
                time_us: 0,
            },
        };
        let report = RunReport::new(Strategy::AStar, (0, 0), (2, 0), &outcome);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["strategy"], "a-star");
        assert_eq!(value["status"], "solution_found");
        assert_eq!(value["path"], serde_json::json!([[1, 0]]));
        assert_eq!(value["stats"]["solution_cost"], 2);
    }

    #[test]
    fn test_write_json() {
        let outcome = Outcome {
            status: SearchStatus::Exhausted,
            path: Vec::new(),
            stats: Stats::default(),
        };
        let report = RunReport::new(Strategy::DepthFirst, (1, 1), (3, 3), &outcome);
        let path = std::env::temp_dir().join(format!(
            "path_visualizer_report_{}.json",
            std::process::id()
        ));
        let path = path.to_str().unwrap();
        report.write_json(path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["status"], "exhausted");
        assert_eq!(written["stats"]["solution_cost"], serde_json::Value::Null);
        std::fs::remove_file(path).unwrap();
    }
}
