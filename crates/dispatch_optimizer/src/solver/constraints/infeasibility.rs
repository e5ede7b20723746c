use serde::Serialize;
use thiserror::Error;

use crate::problem::stop::{Demand, StopIdx};

/// Why a candidate route, insertion or move was rejected.
///
/// Rejections are ordinary values: they are never turned into solve failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Infeasibility {
    #[error("load {load} exceeds vehicle capacity {capacity}")]
    Capacity { load: Demand, capacity: Demand },

    #[error("stop {stop} cannot be reached within its time window")]
    TimeWindow { stop: StopIdx },
}
