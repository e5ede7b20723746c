use rayon::prelude::*;
use tracing::instrument;

use crate::error::InvalidInput;

use super::{
    kmh::Kmh,
    location::Location,
    stop::StopIdx,
    time_window::Minutes,
};

/// Meters.
pub type Distance = u64;

/// Square matrix stored as a flat vector: `index = from * size + to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    size: usize,
    data: Vec<u64>,
}

impl Matrix {
    #[inline(always)]
    pub fn get(&self, from: StopIdx, to: StopIdx) -> u64 {
        self.data[from.get() * self.size + to.get()]
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn row(&self, from: StopIdx) -> &[u64] {
        let start = from.get() * self.size;
        &self.data[start..start + self.size]
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| {
            (i + 1..self.size).all(|j| self.data[i * self.size + j] == self.data[j * self.size + i])
        })
    }
}

pub type DistanceMatrix = Matrix;
pub type TimeMatrix = Matrix;

/// Great-circle distance in whole meters. The fractional part is dropped.
pub fn haversine_meters(from: &Location, to: &Location) -> Distance {
    from.haversine_distance(to) as Distance
}

/// Minutes needed to drive `distance` meters at `speed`, truncated.
pub fn travel_minutes(distance: Distance, speed: Kmh) -> Minutes {
    ((distance as f64 / 1000.0) / speed.value() * 60.0) as Minutes
}

/// The distance and time matrices of one problem. Both are immutable once built.
#[derive(Debug, Clone)]
pub struct TravelMatrices {
    distances: DistanceMatrix,
    times: TimeMatrix,
}

impl TravelMatrices {
    /// Builds the distance matrix from the haversine formula and derives travel
    /// times from it. Rows are computed in parallel, every cell is written once.
    ///
    /// The distance for `(i, j)` and `(j, i)` is computed from the same ordered
    /// pair so the matrix is exactly symmetric.
    #[instrument(skip_all, level = "debug", fields(locations = locations.len()))]
    pub fn from_haversine(locations: &[Location], speed: Kmh) -> Self {
        let size = locations.len();
        let mut distances = vec![0; size * size];

        if size > 0 {
            distances
                .par_chunks_mut(size)
                .enumerate()
                .for_each(|(i, row)| {
                    for (j, cell) in row.iter_mut().enumerate() {
                        if i != j {
                            let (a, b) = if i < j { (i, j) } else { (j, i) };
                            *cell = haversine_meters(&locations[a], &locations[b]);
                        }
                    }
                });
        }

        let times = distances
            .par_iter()
            .map(|&distance| travel_minutes(distance, speed))
            .collect();

        TravelMatrices {
            distances: Matrix {
                size,
                data: distances,
            },
            times: Matrix { size, data: times },
        }
    }

    /// Replaces the travel times with an externally provided matrix in seconds.
    /// Seconds are converted to whole minutes by truncation. Distances stay
    /// untouched since they drive the objective.
    pub fn with_travel_times_seconds(
        mut self,
        seconds: &[Vec<f64>],
    ) -> Result<Self, InvalidInput> {
        let size = self.distances.size;

        if seconds.len() != size || seconds.iter().any(|row| row.len() != size) {
            return Err(InvalidInput::TravelTimeShape {
                expected: size,
                rows: seconds.len(),
            });
        }

        let mut times = Vec::with_capacity(size * size);
        for (i, row) in seconds.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(InvalidInput::InvalidTravelTime {
                        from: StopIdx::new(i),
                        to: StopIdx::new(j),
                    });
                }

                times.push(if i == j { 0 } else { (value / 60.0) as Minutes });
            }
        }

        self.times = Matrix { size, data: times };
        Ok(self)
    }

    #[inline(always)]
    pub fn distance(&self, from: StopIdx, to: StopIdx) -> Distance {
        self.distances.get(from, to)
    }

    #[inline(always)]
    pub fn time(&self, from: StopIdx, to: StopIdx) -> Minutes {
        self.times.get(from, to)
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    pub fn times(&self) -> &TimeMatrix {
        &self.times
    }

    pub fn num_locations(&self) -> usize {
        self.distances.size
    }
}
