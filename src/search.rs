mod engine;
mod node;
mod strategy;

pub use engine::{Callbacks, SearchHooks, TreeSearch};
pub use node::{Node, NodeArena, NodeId};
pub use strategy::Strategy;

use serde::Serialize;

/// Result of a single [`TreeSearch::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// One frontier node was expanded; call `advance` again.
    StepTaken,
    /// A node at the goal was popped. Terminal.
    SolutionFound,
    /// The frontier drained without reaching the goal. Terminal, not an error.
    Exhausted,
}

impl SearchStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SearchStatus::StepTaken)
    }
}
