use std::collections::BinaryHeap;

use tracing::{debug, instrument, trace};

use super::node::{Node, NodeArena, NodeId};
use super::strategy::{FrontierEntry, Strategy};
use super::SearchStatus;
use crate::common::{manhattan_distance, Coordinate};
use crate::error::{Error, Result};
use crate::stat::Stats;

const STEP_COST: usize = 1;

/// The grid as the engine sees it.
///
/// `neighbors` decides traversability. The engine does not filter or
/// deduplicate what it returns, so an implementation that never settles cells
/// will keep re-opening them.
pub trait SearchHooks {
    /// Cells adjacent to `(x, y)` that may still be entered.
    fn neighbors(&mut self, x: usize, y: usize) -> Vec<Coordinate>;

    /// Called for every cell returned by `neighbors`, before it is queued.
    fn on_open(&mut self, x: usize, y: usize);

    /// Called when the node at `(x, y)` is popped for expansion.
    fn on_closed(&mut self, x: usize, y: usize);
}

/// [`SearchHooks`] built from three closures.
pub struct Callbacks<N, O, C> {
    neighbors: N,
    on_open: O,
    on_closed: C,
}

impl<N, O, C> Callbacks<N, O, C>
where
    N: FnMut(usize, usize) -> Vec<Coordinate>,
    O: FnMut(usize, usize),
    C: FnMut(usize, usize),
{
    pub fn new(neighbors: N, on_open: O, on_closed: C) -> Self {
        Callbacks {
            neighbors,
            on_open,
            on_closed,
        }
    }
}

impl<N, O, C> SearchHooks for Callbacks<N, O, C>
where
    N: FnMut(usize, usize) -> Vec<Coordinate>,
    O: FnMut(usize, usize),
    C: FnMut(usize, usize),
{
    fn neighbors(&mut self, x: usize, y: usize) -> Vec<Coordinate> {
        (self.neighbors)(x, y)
    }

    fn on_open(&mut self, x: usize, y: usize) {
        (self.on_open)(x, y)
    }

    fn on_closed(&mut self, x: usize, y: usize) {
        (self.on_closed)(x, y)
    }
}

/// Best-first search that expands one node per [`advance`](TreeSearch::advance) call.
pub struct TreeSearch<H> {
    strategy: Strategy,
    start: Coordinate,
    goal: Coordinate,
    hooks: H,
    arena: NodeArena,
    open: BinaryHeap<FrontierEntry>,
    next_sequence: u64,
    // Starts as a cost-free placeholder on the goal cell.
    end_node: NodeId,
    last_expanded: Option<NodeId>,
    status: SearchStatus,
    stats: Stats,
}

impl<N, O, C> TreeSearch<Callbacks<N, O, C>>
where
    N: FnMut(usize, usize) -> Vec<Coordinate>,
    O: FnMut(usize, usize),
    C: FnMut(usize, usize),
{
    pub fn with_callbacks(
        start: Coordinate,
        goal: Coordinate,
        strategy: Strategy,
        neighbors: N,
        on_open: O,
        on_closed: C,
    ) -> Self {
        TreeSearch::new(
            start,
            goal,
            strategy,
            Callbacks::new(neighbors, on_open, on_closed),
        )
    }
}

impl<H: SearchHooks> TreeSearch<H> {
    #[instrument(skip_all, name = "tree_search", fields(strategy = %strategy, start = format!("{:?}", start), goal = format!("{:?}", goal)), level = "debug")]
    pub fn new(start: Coordinate, goal: Coordinate, strategy: Strategy, hooks: H) -> Self {
        let mut arena = NodeArena::new();
        let end_node = arena.insert(Node::new(goal, None, 0, 0));

        let mut search = TreeSearch {
            strategy,
            start,
            goal,
            hooks,
            arena,
            open: BinaryHeap::new(),
            next_sequence: 0,
            end_node,
            last_expanded: None,
            status: SearchStatus::StepTaken,
            stats: Stats::default(),
        };

        let root = search
            .arena
            .insert(Node::new(start, None, 0, manhattan_distance(start, goal)));
        search.enqueue(root);
        debug!("seeded frontier with start node");
        search
    }

    /// Expand the best frontier node.
    ///
    /// Once `SolutionFound` or `Exhausted` is returned, later calls return the
    /// same status without touching the frontier or the hooks.
    pub fn advance(&mut self) -> SearchStatus {
        if self.status.is_terminal() {
            return self.status;
        }

        let Some(FrontierEntry {
            id, node: current, ..
        }) = self.open.pop()
        else {
            debug!("frontier exhausted, goal {:?} unreachable", self.goal);
            self.status = SearchStatus::Exhausted;
            return self.status;
        };

        self.stats.steps += 1;
        self.last_expanded = Some(id);
        trace!("expand node: {current:?}");

        if current.position() == self.goal {
            self.end_node = id;
            self.stats.solution_cost = Some(current.previous_cost());
            debug!(
                "reached goal {:?} with cost {}",
                self.goal,
                current.previous_cost()
            );
            self.status = SearchStatus::SolutionFound;
            return self.status;
        }

        let (x, y) = current.position();
        self.hooks.on_closed(x, y);
        self.stats.expanded_nodes += 1;

        for (next_x, next_y) in self.hooks.neighbors(x, y) {
            self.hooks.on_open(next_x, next_y);

            let position = (next_x, next_y);
            let child = self.arena.insert(Node::new(
                position,
                Some(id),
                current.previous_cost() + STEP_COST,
                manhattan_distance(position, self.goal),
            ));

            // Not terminal yet; the goal has to be popped first.
            if position == self.goal {
                self.end_node = child;
            }

            self.enqueue(child);
            self.stats.opened_nodes += 1;
        }
        trace!("frontier size {}", self.open.len());

        self.status = SearchStatus::StepTaken;
        self.status
    }

    /// Cells between start and goal, goal side first. Neither endpoint is included.
    pub fn reconstructed_path(&self) -> Result<Vec<Coordinate>> {
        if self.status != SearchStatus::SolutionFound {
            return Err(Error::NotSolved(self.status));
        }

        let mut path: Vec<Coordinate> = self
            .arena
            .predecessors(self.end_node)
            .map(Node::position)
            .collect();
        // Last link is the start node.
        path.pop();
        Ok(path)
    }

    fn enqueue(&mut self, id: NodeId) {
        self.open.push(FrontierEntry {
            strategy: self.strategy,
            sequence: self.next_sequence,
            id,
            node: *self.arena.get(id),
        });
        self.next_sequence += 1;
        self.stats.max_frontier = self.stats.max_frontier.max(self.open.len());
    }
}

impl<H> TreeSearch<H> {
    /// Status returned by the latest `advance`; `StepTaken` before the first call.
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn goal(&self) -> Coordinate {
        self.goal
    }

    /// Best known node on the goal cell, or the placeholder if none was generated yet.
    pub fn end_node(&self) -> &Node {
        self.arena.get(self.end_node)
    }

    pub fn last_expanded(&self) -> Option<&Node> {
        self.last_expanded.map(|id| self.arena.get(id))
    }

    /// Queued nodes in no particular order.
    pub fn frontier(&self) -> impl Iterator<Item = &Node> + '_ {
        self.open.iter().map(|entry| &entry.node)
    }

    pub fn frontier_len(&self) -> usize {
        self.open.len()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn into_hooks(self) -> H {
        self.hooks
    }
}
