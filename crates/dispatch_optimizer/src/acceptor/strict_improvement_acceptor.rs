use super::accept_move::AcceptMove;

/// Hill climbing: only moves that decrease the total distance.
#[derive(Debug, Default)]
pub struct StrictImprovementAcceptor;

impl AcceptMove for StrictImprovementAcceptor {
    fn delta_limit(&mut self) -> i64 {
        0
    }

    fn is_strictly_improving(&self) -> bool {
        true
    }
}
