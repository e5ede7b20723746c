use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::accept_move::AcceptMove;

/// Threshold flavour of simulated annealing.
///
/// Each scan draws `u` uniformly in `(0, 1]` and accepts the first move with
/// `delta < ceil(-T * ln(u))`, so a worsening move of `delta` passes with
/// probability about `exp(-delta / T)`. The temperature is multiplied by
/// `cooling_rate` after every scan and the search becomes strict once it drops
/// below `min_temperature`. Seeded, so runs are reproducible.
#[derive(Debug)]
pub struct SimulatedAnnealingAcceptor {
    temperature: f64,
    cooling_rate: f64,
    min_temperature: f64,
    rng: SmallRng,
}

impl SimulatedAnnealingAcceptor {
    pub fn new(initial_temperature: f64, cooling_rate: f64, min_temperature: f64, seed: u64) -> Self {
        SimulatedAnnealingAcceptor {
            temperature: initial_temperature,
            cooling_rate,
            min_temperature,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl AcceptMove for SimulatedAnnealingAcceptor {
    fn delta_limit(&mut self) -> i64 {
        let temperature = self.temperature;
        self.temperature *= self.cooling_rate;

        if temperature.is_nan() || temperature < self.min_temperature || temperature <= 0.0 {
            return 0;
        }

        let u = 1.0 - self.rng.random::<f64>();
        (-temperature * u.ln()).ceil() as i64
    }
}
