use jiff::SignedDuration;

/// Limits of one local search run, checked between moves.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchBudget {
    /// Maximum number of neighborhood scans, including the final one that finds nothing.
    pub max_iterations: usize,
    pub max_accepted_moves: usize,
    pub time_limit: Option<SignedDuration>,
}

impl Default for SearchBudget {
    fn default() -> Self {
        SearchBudget {
            max_iterations: 10_000,
            max_accepted_moves: 10_000,
            time_limit: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum AcceptanceStrategy {
    /// Only moves that strictly decrease the total distance.
    #[default]
    StrictImprovement,
    /// Also equal cost moves, at most `max_plateau_moves` in a row.
    AcceptEqual { max_plateau_moves: usize },
    /// Worsening moves pass with a probability that decreases with the
    /// temperature. The best solution seen is returned.
    SimulatedAnnealing {
        initial_temperature: f64,
        cooling_rate: f64,
        min_temperature: f64,
        seed: u64,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => (*num).max(1),
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolverParams {
    pub budget: SearchBudget,
    pub acceptance: AcceptanceStrategy,
    /// Threads used to scan insertions and moves.
    /// Results do not depend on this value.
    pub threads: Threads,
    pub run_local_search: bool,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            budget: SearchBudget::default(),
            acceptance: AcceptanceStrategy::default(),
            threads: Threads::Single,
            run_local_search: true,
        }
    }
}
