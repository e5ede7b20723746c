use serde::Serialize;

use crate::problem::stop::StopIdx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnassignedReason {
    /// The demand is larger than the capacity of every vehicle.
    ExceedsCapacity,
    /// Not even a dedicated round trip from the depot reaches the stop in its window.
    TimeWindowUnreachable,
    /// The stop could be served alone, but no route had room for it.
    NoFeasibleRoute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnassignedStop {
    pub stop: StopIdx,
    pub reason: UnassignedReason,
}
