use crate::problem::stop::Demand;

use super::infeasibility::Infeasibility;

/// Cumulative load bounded by `[0, capacity]` at every prefix of a route.
///
/// Demands are non-negative so the running load is monotonic and checking the
/// final load covers every prefix.
pub struct CapacityConstraint;

impl CapacityConstraint {
    #[inline]
    pub fn check(load: Demand, capacity: Demand) -> Result<(), Infeasibility> {
        if load > capacity {
            Err(Infeasibility::Capacity { load, capacity })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_at_capacity_is_feasible() {
        assert_eq!(CapacityConstraint::check(3, 3), Ok(()));
        assert_eq!(
            CapacityConstraint::check(4, 3),
            Err(Infeasibility::Capacity {
                load: 4,
                capacity: 3
            })
        );
    }
}
