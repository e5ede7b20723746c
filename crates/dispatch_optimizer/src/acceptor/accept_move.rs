/// Decides which local search moves may be applied.
///
/// Before every neighborhood scan the acceptor hands out a delta limit: the
/// scan applies the first feasible move whose distance delta is strictly below
/// it. A limit of `0` only lets strict improvements through.
pub trait AcceptMove {
    fn delta_limit(&mut self) -> i64;

    fn on_accepted(&mut self, _delta: i64) {}

    /// Whether every accepted move strictly improves the solution, in which case
    /// the current solution is always the best one seen.
    fn is_strictly_improving(&self) -> bool {
        false
    }
}
