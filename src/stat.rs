use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub steps: usize,
    pub expanded_nodes: usize,
    pub opened_nodes: usize,
    pub max_frontier: usize,
    pub solution_cost: Option<usize>,
    pub time_us: usize,
}

impl Stats {
    pub fn print(&self) {
        info!(
            "Steps {:?} Expanded nodes {:?} Opened nodes {:?} Max frontier {:?} Solution cost {:?} Time(microseconds) {:?}",
            self.steps,
            self.expanded_nodes,
            self.opened_nodes,
            self.max_frontier,
            self.solution_cost,
            self.time_us
        );
    }
}
