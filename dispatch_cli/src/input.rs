use std::{fs::File, io::BufReader, path::Path};

use dispatch_optimizer::json::types::{JsonDispatchProblem, JsonFleet};

use crate::stops_csv;

/// Reads a problem from a `.csv` stop list or a JSON problem file.
pub fn read_problem(path: &Path) -> anyhow::Result<JsonDispatchProblem> {
    let reader = BufReader::new(File::open(path)?);

    let is_csv = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"));

    if is_csv {
        Ok(JsonDispatchProblem {
            stops: stops_csv::read_stops(reader)?,
            fleet: JsonFleet::default(),
            max_waiting_minutes: None,
            travel_times_seconds: None,
        })
    } else {
        Ok(serde_json::from_reader(reader)?)
    }
}
