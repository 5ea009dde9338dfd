use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::common::Coordinate;
use crate::error::{Error, Result};
use crate::search::SearchHooks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileType {
    Empty,
    Wall,
    Start,
    End,
    Open,
    Closed,
    Path,
}

impl TileType {
    fn symbol(self) -> char {
        match self {
            TileType::Empty => '.',
            TileType::Wall => '#',
            TileType::Start => 'S',
            TileType::End => 'E',
            TileType::Open => 'o',
            TileType::Closed => 'x',
            TileType::Path => '*',
        }
    }
}

/// Tile grid the search runs on. Indexed as `(x, y)`, column first.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<Vec<TileType>>, // tiles[y][x]
    start: Coordinate,
    goal: Coordinate,
}

impl Board {
    /// Walled border, interior walls with probability `wall_probability`, and a
    /// random interior start and end. The end may land on the start.
    pub fn random<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        wall_probability: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if width < 3 || height < 3 {
            return Err(Error::BoardTooSmall { width, height });
        }

        let tiles: Vec<Vec<TileType>> = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                        if border || rng.gen::<f64>() < wall_probability {
                            TileType::Wall
                        } else {
                            TileType::Empty
                        }
                    })
                    .collect()
            })
            .collect();

        let start = (rng.gen_range(1..=width - 2), rng.gen_range(1..=height - 2));
        let goal = (rng.gen_range(1..=width - 2), rng.gen_range(1..=height - 2));

        let mut board = Board {
            width,
            height,
            tiles,
            start,
            goal,
        };
        board.place_endpoints();
        info!("Generated {width}x{height} board, start {start:?} goal {goal:?}");
        Ok(board)
    }

    /// Load a map in the `type / height / width / map` text format. `.` is
    /// passable, every other symbol is a wall. A missing start or goal is picked
    /// among the passable cells.
    pub fn from_file<R: Rng + ?Sized>(
        path: &str,
        start: Option<Coordinate>,
        goal: Option<Coordinate>,
        rng: &mut R,
    ) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let _type = next_line(&mut lines, "type")?;
        let height = parse_dimension(&next_line(&mut lines, "height")?, "height")?;
        let width = parse_dimension(&next_line(&mut lines, "width")?, "width")?;
        let _map = next_line(&mut lines, "map")?;

        let mut tiles = Vec::with_capacity(height);
        for (y, line) in lines.take(height).enumerate() {
            let row: Vec<TileType> = line?
                .chars()
                .take(width)
                .map(|ch| {
                    if ch == '.' {
                        TileType::Empty
                    } else {
                        TileType::Wall
                    }
                })
                .collect();
            if row.len() != width {
                return Err(Error::MapFormat(format!(
                    "row {y} has {} tiles, expected {width}",
                    row.len()
                )));
            }
            tiles.push(row);
        }
        if tiles.len() != height {
            return Err(Error::MapFormat(format!(
                "found {} rows, expected {height}",
                tiles.len()
            )));
        }

        let mut board = Board {
            width,
            height,
            tiles,
            start: (0, 0),
            goal: (0, 0),
        };
        board.start = board.pick_endpoint("start", start, rng)?;
        board.goal = board.pick_endpoint("goal", goal, rng)?;
        board.place_endpoints();
        debug!(
            "Loaded {path}: {width}x{height}, start {:?} goal {:?}",
            board.start, board.goal
        );
        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn goal(&self) -> Coordinate {
        self.goal
    }

    pub fn tile(&self, x: usize, y: usize) -> TileType {
        self.tiles[y][x]
    }

    pub fn count(&self, tile: TileType) -> usize {
        self.tiles.iter().flatten().filter(|&&t| t == tile).count()
    }

    pub fn mark_path(&mut self, path: &[Coordinate]) {
        for &(x, y) in path {
            self.set_unless_endpoint((x, y), TileType::Path);
        }
    }

    fn pick_endpoint<R: Rng + ?Sized>(
        &self,
        what: &'static str,
        requested: Option<Coordinate>,
        rng: &mut R,
    ) -> Result<Coordinate> {
        if let Some(position) = requested {
            let (x, y) = position;
            if x >= self.width || y >= self.height {
                return Err(Error::OutOfBounds {
                    what,
                    position,
                    width: self.width,
                    height: self.height,
                });
            }
            if self.tile(x, y) == TileType::Wall {
                return Err(Error::Blocked { what, position });
            }
            return Ok(position);
        }

        let passable: Vec<Coordinate> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.tile(x, y) != TileType::Wall)
            .collect();
        passable
            .choose(rng)
            .copied()
            .ok_or_else(|| Error::MapFormat(format!("no passable cell for the {what}")))
    }

    fn place_endpoints(&mut self) {
        let (x, y) = self.start;
        self.tiles[y][x] = TileType::Start;
        let (x, y) = self.goal;
        self.tiles[y][x] = TileType::End;
    }

    fn set_unless_endpoint(&mut self, position: Coordinate, tile: TileType) {
        if position != self.start && position != self.goal {
            self.tiles[position.1][position.0] = tile;
        }
    }
}

impl SearchHooks for Board {
    fn neighbors(&mut self, x: usize, y: usize) -> Vec<Coordinate> {
        let directions = [(-1, 0), (1, 0), (0, 1), (0, -1)];
        let mut neighbors = Vec::new();

        for &(dx, dy) in &directions {
            let new_x = x as i64 + dx;
            let new_y = y as i64 + dy;
            if new_x >= 0
                && new_y >= 0
                && new_x < self.width as i64
                && new_y < self.height as i64
                && matches!(
                    self.tile(new_x as usize, new_y as usize),
                    TileType::Empty | TileType::End
                )
            {
                neighbors.push((new_x as usize, new_y as usize));
            }
        }

        neighbors
    }

    fn on_open(&mut self, x: usize, y: usize) {
        self.set_unless_endpoint((x, y), TileType::Open);
    }

    fn on_closed(&mut self, x: usize, y: usize) {
        self.set_unless_endpoint((x, y), TileType::Closed);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.tiles {
            let line: String = row.iter().map(|tile| tile.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn next_line<B: BufRead>(lines: &mut std::io::Lines<B>, field: &str) -> Result<String> {
    lines
        .next()
        .ok_or_else(|| Error::MapFormat(format!("missing `{field}` header line")))?
        .map_err(Error::from)
}

fn parse_dimension(line: &str, field: &str) -> Result<usize> {
    line.split_whitespace()
        .last()
        .and_then(|value| value.parse::<usize>().ok())
        .ok_or_else(|| Error::MapFormat(format!("bad `{field}` line: {line:?}")))
}
