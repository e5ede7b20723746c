use super::{
    kmh::Kmh,
    stop::Demand,
    vehicle::{Vehicle, VehicleIdx},
};

pub const DEFAULT_NUM_VEHICLES: usize = 3;
pub const DEFAULT_VEHICLE_CAPACITY: Demand = 3;
pub const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Vehicles sharing one cruising speed.
#[derive(Debug, Clone)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
    speed: Kmh,
}

impl Fleet {
    pub fn new(vehicles: Vec<Vehicle>, speed: Kmh) -> Self {
        Fleet { vehicles, speed }
    }

    pub fn homogeneous(num_vehicles: usize, capacity: Demand, speed: Kmh) -> Self {
        Fleet {
            vehicles: (0..num_vehicles).map(|_| Vehicle::new(capacity)).collect(),
            speed,
        }
    }

    #[inline]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    #[inline]
    pub fn vehicle(&self, vehicle_id: VehicleIdx) -> &Vehicle {
        &self.vehicles[vehicle_id]
    }

    pub fn speed(&self) -> Kmh {
        self.speed
    }

    pub fn max_capacity(&self) -> Demand {
        self.vehicles
            .iter()
            .map(|vehicle| vehicle.capacity())
            .max()
            .unwrap_or(0)
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Fleet::homogeneous(
            DEFAULT_NUM_VEHICLES,
            DEFAULT_VEHICLE_CAPACITY,
            Kmh::new(DEFAULT_SPEED_KMH),
        )
    }
}
