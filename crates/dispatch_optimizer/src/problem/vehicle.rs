use crate::define_index_newtype;

use super::stop::Demand;

define_index_newtype!(VehicleIdx, Vehicle);

/// A vehicle starts and ends its route at the depot.
#[derive(Debug, Clone)]
pub struct Vehicle {
    capacity: Demand,
}

impl Vehicle {
    pub fn new(capacity: Demand) -> Self {
        Vehicle { capacity }
    }

    pub fn capacity(&self) -> Demand {
        self.capacity
    }
}
