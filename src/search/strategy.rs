use std::cmp::Ordering;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::node::{Node, NodeId};

/// Frontier ordering rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
    Greedy,
    AStar,
}

impl Strategy {
    /// Rank two nodes. `Ordering::Less` means `a` is expanded before `b`.
    pub fn compare(self, a: &Node, b: &Node) -> Ordering {
        match self {
            Strategy::BreadthFirst => breadth_first(a, b),
            Strategy::DepthFirst => depth_first(a, b),
            Strategy::Greedy => greedy(a, b),
            Strategy::AStar => a_star(a, b),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::BreadthFirst => "breadth-first",
            Strategy::DepthFirst => "depth-first",
            Strategy::Greedy => "greedy",
            Strategy::AStar => "a-star",
        };
        f.write_str(name)
    }
}

fn breadth_first(a: &Node, b: &Node) -> Ordering {
    a.previous_cost().cmp(&b.previous_cost())
}

fn depth_first(a: &Node, b: &Node) -> Ordering {
    b.previous_cost().cmp(&a.previous_cost())
}

fn greedy(a: &Node, b: &Node) -> Ordering {
    a.estimated_cost()
        .cmp(&b.estimated_cost())
        .then_with(|| a.total_cost().cmp(&b.total_cost()))
}

fn a_star(a: &Node, b: &Node) -> Ordering {
    a.total_cost()
        .cmp(&b.total_cost())
        .then_with(|| a.estimated_cost().cmp(&b.estimated_cost()))
}

/// Frontier slot for a `BinaryHeap`, which pops the greatest entry.
///
/// The best ranked node compares greatest. Among equally ranked nodes the one
/// enqueued last wins.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrontierEntry {
    pub(crate) strategy: Strategy,
    pub(crate) sequence: u64,
    pub(crate) id: NodeId,
    pub(crate) node: Node,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.strategy
            .compare(&other.node, &self.node)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}
