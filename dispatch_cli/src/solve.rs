use std::path::PathBuf;

use clap::{Args, ValueEnum};
use dispatch_matrix_providers::{
    travel_time_client::TravelTimeClient, travel_time_provider::TravelTimeProvider,
};
use dispatch_optimizer::{
    AcceptanceStrategy, SearchBudget, Solver, SolverParams, Threads,
    json::types::JsonDispatchProblem, problem::location::Location,
};
use tracing::info;

use crate::{geojson_export, input, parsers, print};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Acceptance {
    Strict,
    AcceptEqual,
    Annealing,
}

#[derive(Args)]
pub struct SolveArgs {
    /// Problem file, JSON or CSV. The first stop is the depot.
    #[arg(short = 'i', long)]
    input: PathBuf,

    #[arg(long)]
    vehicles: Option<usize>,

    #[arg(long)]
    capacity: Option<u64>,

    /// Average speed in km/h
    #[arg(long)]
    speed: Option<f64>,

    /// Longest wait in minutes before a stop opens
    #[arg(long)]
    max_waiting: Option<u64>,

    /// Worker threads, 0 uses every available core
    #[arg(long, default_value_t = 1)]
    threads: usize,

    #[arg(long, default_value_t = 10_000)]
    max_iterations: usize,

    #[arg(long, default_value_t = 10_000)]
    max_accepted_moves: usize,

    /// Time limit for the local search (e.g., "30s", "5m", "PT1H30M")
    #[arg(long, value_parser = parsers::parse_duration)]
    time_limit: Option<jiff::SignedDuration>,

    #[arg(long, value_enum, default_value_t = Acceptance::Strict)]
    acceptance: Acceptance,

    /// Consecutive equal cost moves allowed with `accept-equal`
    #[arg(long, default_value_t = 10)]
    max_plateau_moves: usize,

    #[arg(long, default_value_t = 100.0)]
    initial_temperature: f64,

    #[arg(long, default_value_t = 0.95)]
    cooling_rate: f64,

    #[arg(long, default_value_t = 0.5)]
    min_temperature: f64,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Only build the initial solution
    #[arg(long)]
    no_local_search: bool,

    /// Fetch traffic aware travel times from the Google Routes API
    #[arg(long)]
    traffic: bool,

    #[arg(long, value_parser = parsers::parse_duration, default_value = "10s")]
    traffic_timeout: jiff::SignedDuration,

    /// Writes the JSON report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Writes the routes as GeoJSON to this file
    #[arg(long)]
    geojson: Option<PathBuf>,
}

impl SolveArgs {
    fn apply_overrides(&self, problem: &mut JsonDispatchProblem) {
        if let Some(vehicles) = self.vehicles {
            problem.fleet.num_vehicles = vehicles;
        }
        if let Some(capacity) = self.capacity {
            problem.fleet.capacity_per_vehicle = capacity;
        }
        if let Some(speed) = self.speed {
            problem.fleet.speed_km_per_hour = speed;
        }
        if let Some(max_waiting) = self.max_waiting {
            problem.max_waiting_minutes = Some(max_waiting);
        }
    }

    fn solver_params(&self) -> SolverParams {
        let acceptance = match self.acceptance {
            Acceptance::Strict => AcceptanceStrategy::StrictImprovement,
            Acceptance::AcceptEqual => AcceptanceStrategy::AcceptEqual {
                max_plateau_moves: self.max_plateau_moves,
            },
            Acceptance::Annealing => AcceptanceStrategy::SimulatedAnnealing {
                initial_temperature: self.initial_temperature,
                cooling_rate: self.cooling_rate,
                min_temperature: self.min_temperature,
                seed: self.seed,
            },
        };

        SolverParams {
            budget: SearchBudget {
                max_iterations: self.max_iterations,
                max_accepted_moves: self.max_accepted_moves,
                time_limit: self.time_limit,
            },
            acceptance,
            threads: match self.threads {
                0 => Threads::Auto,
                1 => Threads::Single,
                threads => Threads::Multi(threads),
            },
            run_local_search: !self.no_local_search,
        }
    }
}

pub async fn run(args: SolveArgs) -> anyhow::Result<()> {
    let mut problem = input::read_problem(&args.input)?;
    args.apply_overrides(&mut problem);

    if args.traffic && problem.travel_times_seconds.is_none() {
        let locations = problem
            .stops
            .iter()
            .map(|stop| Location::from_lat_lon(stop.lat, stop.lon))
            .collect::<Vec<_>>();
        let client = TravelTimeClient::from_env(args.traffic_timeout.try_into()?);
        problem.travel_times_seconds = client
            .fetch_or_fallback(&locations, TravelTimeProvider::GoogleRoutesApi)
            .await;
    }

    let solver = Solver::new(problem.build_problem()?, args.solver_params());
    let report = tokio::task::spawn_blocking(move || solver.solve()).await??;

    print::print_report(&report);

    if let Some(path) = &args.output {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!(path = %path.display(), "Wrote report");
    }

    if let Some(path) = &args.geojson {
        let geojson = geojson_export::report_to_geojson(&report);
        std::fs::write(path, geojson.to_string())?;
        info!(path = %path.display(), "Wrote GeoJSON");
    }

    Ok(())
}
