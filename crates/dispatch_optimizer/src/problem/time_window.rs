use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Minutes elapsed since the shared origin of the planning day.
pub type Minutes = u64;

pub const DEFAULT_HORIZON: TimeWindow = TimeWindow { start: 0, end: 600 };
pub const DEFAULT_MAX_WAITING: Minutes = 30;

/// A closed interval of minutes `[start, end]`.
///
/// Used both for the service windows of stops and for the arrival bounds
/// computed along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct TimeWindow {
    pub start: Minutes,
    pub end: Minutes,
}

impl TimeWindow {
    pub const fn new(start: Minutes, end: Minutes) -> Self {
        TimeWindow { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    pub fn is_within(&self, other: &TimeWindow) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// Returns `None` when the two windows do not overlap.
    pub fn intersect(&self, other: &TimeWindow) -> Option<TimeWindow> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);

        if start <= end {
            Some(TimeWindow { start, end })
        } else {
            None
        }
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        DEFAULT_HORIZON
    }
}
