use crate::define_index_newtype;

use super::{
    location::Location,
    time_window::{DEFAULT_HORIZON, TimeWindow},
};

define_index_newtype!(StopIdx, Stop);

/// Index of the depot in the stop list.
pub const DEPOT: StopIdx = StopIdx::new(0);

pub type Demand = u64;

pub const DEFAULT_DEMAND: Demand = 1;

#[derive(Debug, Clone)]
pub struct Stop {
    external_id: String,
    location: Location,
    demand: Demand,
    time_window: TimeWindow,
}

impl Stop {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn demand(&self) -> Demand {
        self.demand
    }

    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }
}

#[derive(Default)]
pub struct StopBuilder {
    external_id: Option<String>,
    location: Option<Location>,
    demand: Option<Demand>,
    time_window: Option<TimeWindow>,
}

impl StopBuilder {
    pub fn set_external_id(&mut self, external_id: String) -> &mut StopBuilder {
        self.external_id = Some(external_id);
        self
    }

    pub fn set_location(&mut self, location: Location) -> &mut StopBuilder {
        self.location = Some(location);
        self
    }

    pub fn set_demand(&mut self, demand: Demand) -> &mut StopBuilder {
        self.demand = Some(demand);
        self
    }

    pub fn set_time_window(&mut self, time_window: TimeWindow) -> &mut StopBuilder {
        self.time_window = Some(time_window);
        self
    }

    /// Missing fields fall back to an empty id, `(0, 0)`, a demand of
    /// [`DEFAULT_DEMAND`] and the default planning horizon.
    pub fn build(self) -> Stop {
        Stop {
            external_id: self.external_id.unwrap_or_default(),
            location: self
                .location
                .unwrap_or_else(|| Location::from_lat_lon(0.0, 0.0)),
            demand: self.demand.unwrap_or(DEFAULT_DEMAND),
            time_window: self.time_window.unwrap_or(DEFAULT_HORIZON),
        }
    }
}
