use std::collections::BTreeMap;

use serde::Serialize;

use crate::problem::travel_matrices::Distance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A full scan found no acceptable move.
    Converged,
    MaxIterations,
    MaxAcceptedMoves,
    TimeLimit,
}

/// Summary of one local search run. Holds no wall clock values so that
/// reports of identical runs are identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchStatistics {
    pub initial_distance: Distance,
    pub final_distance: Distance,
    pub iterations: usize,
    pub accepted_moves: usize,
    pub accepted_by_operator: BTreeMap<&'static str, usize>,
    pub stop_reason: StopReason,
}

impl SearchStatistics {
    pub fn improvement(&self) -> i64 {
        self.initial_distance as i64 - self.final_distance as i64
    }
}
