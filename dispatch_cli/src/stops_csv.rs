use std::io::Read;

use dispatch_optimizer::json::types::JsonStop;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
struct CsvStop {
    #[serde(default)]
    id: Option<String>,
    lat: f64,
    lon: f64,
    #[serde(default)]
    demand: Option<u64>,
    #[serde(default)]
    window_start: Option<u64>,
    #[serde(default)]
    window_end: Option<u64>,
}

impl From<CsvStop> for JsonStop {
    fn from(value: CsvStop) -> Self {
        JsonStop {
            id: value.id.filter(|id| !id.is_empty()),
            lat: value.lat,
            lon: value.lon,
            demand: value.demand,
            window_start: value.window_start,
            window_end: value.window_end,
        }
    }
}

/// Reads stops from CSV with a header row. `lat` and `lon` are required,
/// `id`, `demand`, `window_start` and `window_end` may be missing or empty.
/// The first row is the depot.
pub fn read_stops<R: Read>(reader: R) -> Result<Vec<JsonStop>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    reader
        .deserialize::<CsvStop>()
        .map(|stop| stop.map(JsonStop::from))
        .collect()
}
