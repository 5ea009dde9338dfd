use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use crate::board::Board;
use crate::common::Coordinate;
use crate::error::Result;
use crate::search::{SearchStatus, Strategy, TreeSearch};
use crate::stat::Stats;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: SearchStatus,
    /// Empty unless the goal was reached.
    pub path: Vec<Coordinate>,
    pub stats: Stats,
}

/// Drives a search over a [`Board`] and draws it after every step.
pub struct Visualizer {
    search: TreeSearch<Board>,
    frame_delay: Option<Duration>,
    animate: bool,
}

impl Visualizer {
    /// `fps == 0` draws frames back to back.
    pub fn new(board: Board, strategy: Strategy, fps: u32, animate: bool) -> Self {
        let (start, goal) = (board.start(), board.goal());
        Visualizer {
            search: TreeSearch::new(start, goal, strategy, board),
            frame_delay: (fps > 0).then(|| Duration::from_secs_f64(1.0 / fps as f64)),
            animate,
        }
    }

    pub fn board(&self) -> &Board {
        self.search.hooks()
    }

    pub fn into_board(self) -> Board {
        self.search.into_hooks()
    }

    #[instrument(skip_all, name = "visualizer", fields(strategy = %self.search.strategy(), start = format!("{:?}", self.search.start()), goal = format!("{:?}", self.search.goal())))]
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<Outcome> {
        let mut search_time = Duration::ZERO;

        let (status, path) = loop {
            let step_start = Instant::now();
            let status = self.search.advance();
            search_time += step_start.elapsed();

            let path = if status == SearchStatus::SolutionFound {
                let path = self.search.reconstructed_path()?;
                self.search.hooks_mut().mark_path(&path);
                path
            } else {
                Vec::new()
            };

            if self.animate {
                self.draw(out, status)?;
                if let Some(delay) = self.frame_delay {
                    thread::sleep(delay);
                }
            }

            if status.is_terminal() {
                break (status, path);
            }
        };

        if !self.animate {
            self.draw(out, status)?;
        }

        let mut stats = self.search.stats().clone();
        stats.time_us = search_time.as_micros() as usize;

        match status {
            SearchStatus::SolutionFound => info!(
                "path found with {} intermediate cells after {} steps",
                path.len(),
                stats.steps
            ),
            _ => info!("no path exists, frontier exhausted after {} steps", stats.steps),
        }

        Ok(Outcome {
            status,
            path,
            stats,
        })
    }

    fn draw<W: Write>(&self, out: &mut W, status: SearchStatus) -> Result<()> {
        if self.animate {
            write!(out, "{CLEAR_SCREEN}")?;
        }
        write!(out, "{}", self.board())?;
        writeln!(
            out,
            "{} | step {} | frontier {} | {:?}",
            self.search.strategy(),
            self.search.stats().steps,
            self.search.frontier_len(),
            status
        )?;
        out.flush()?;
        debug!("frame drawn");
        Ok(())
    }
}
