use crate::problem::{
    stop::StopIdx,
    time_window::{Minutes, TimeWindow},
};

use super::infeasibility::Infeasibility;

/// Cumulative time dimension of a route.
///
/// The time at a node is the arrival there. Between two consecutive nodes
/// `time(next) = time(prev) + travel(prev, next) + slack(prev)` with
/// `slack ∈ [0, max_waiting]`. Every time lies inside the horizon, and the time
/// at a customer lies inside its service window. The departure from the depot
/// is free within the horizon.
///
/// Both propagation directions work on intervals, which are exact here since
/// the set of reachable times at each node stays an interval.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindowConstraint {
    max_waiting: Minutes,
}

impl TimeWindowConstraint {
    pub fn new(max_waiting: Minutes) -> Self {
        TimeWindowConstraint { max_waiting }
    }

    /// Times reachable at `stop` given the times reachable at the previous node.
    /// Saturates at `Minutes::MAX`, which no service window can extend past.
    #[inline]
    pub fn forward(
        &self,
        previous: &TimeWindow,
        travel_time: Minutes,
        service_window: Option<TimeWindow>,
        stop: StopIdx,
    ) -> Result<TimeWindow, Infeasibility> {
        let reachable = TimeWindow::new(
            previous.start.saturating_add(travel_time),
            previous
                .end
                .saturating_add(travel_time)
                .saturating_add(self.max_waiting),
        );

        service_window
            .and_then(|window| reachable.intersect(&window))
            .ok_or(Infeasibility::TimeWindow { stop })
    }

    /// Times at `stop` from which the rest of the route can still be completed,
    /// given the same set for the next node.
    #[inline]
    pub fn backward(
        &self,
        next: &TimeWindow,
        travel_time: Minutes,
        service_window: Option<TimeWindow>,
        stop: StopIdx,
    ) -> Result<TimeWindow, Infeasibility> {
        let Some(latest) = next.end.checked_sub(travel_time) else {
            return Err(Infeasibility::TimeWindow { stop });
        };

        let earliest = next
            .start
            .saturating_sub(travel_time)
            .saturating_sub(self.max_waiting);

        service_window
            .and_then(|window| TimeWindow::new(earliest, latest).intersect(&window))
            .ok_or(Infeasibility::TimeWindow { stop })
    }
}
