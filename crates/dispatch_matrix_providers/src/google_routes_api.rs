use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const GOOGLE_ROUTES_MATRIX_API_URL: &str =
    "https://routes.googleapis.com/distanceMatrix/v2:computeRouteMatrix";

const FIELD_MASK: &str = "originIndex,destinationIndex,duration,condition";

/// Element limit of a traffic aware matrix request.
pub const MAX_ELEMENTS: usize = 100;

#[derive(Debug, Error)]
pub enum GoogleRoutesError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("{elements} elements requested, the limit is {limit}")]
    TooManyElements { elements: usize, limit: usize },

    #[error("No element for origin {origin} and destination {destination}")]
    MissingElement { origin: usize, destination: usize },

    #[error("No route from origin {origin} to destination {destination}")]
    RouteNotFound { origin: usize, destination: usize },

    #[error("Invalid duration {0:?}")]
    InvalidDuration(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    lat_lng: LatLng,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Waypoint {
    location: Location,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteMatrixWaypoint {
    waypoint: Waypoint,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMatrixRequestBody {
    origins: Vec<RouteMatrixWaypoint>,
    destinations: Vec<RouteMatrixWaypoint>,
    travel_mode: &'static str,
    routing_preference: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteMatrixElementCondition {
    RouteExists,
    RouteNotFound,
    #[serde(other)]
    Unspecified,
}

/// One cell of the response. Zero indices are omitted on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMatrixElement {
    #[serde(default)]
    pub origin_index: usize,
    #[serde(default)]
    pub destination_index: usize,
    /// Seconds with an `s` suffix, e.g. `"123s"`.
    pub duration: Option<String>,
    pub condition: Option<RouteMatrixElementCondition>,
}

fn waypoints<P>(points: &[P]) -> Vec<RouteMatrixWaypoint>
where
    for<'a> &'a P: Into<geo_types::Point>,
{
    points
        .iter()
        .map(|point| {
            let point: geo_types::Point = point.into();
            RouteMatrixWaypoint {
                waypoint: Waypoint {
                    location: Location {
                        lat_lng: LatLng {
                            latitude: point.y(),
                            longitude: point.x(),
                        },
                    },
                },
            }
        })
        .collect()
}

pub fn parse_duration_seconds(duration: &str) -> Result<f64, GoogleRoutesError> {
    duration
        .strip_suffix('s')
        .and_then(|seconds| seconds.parse::<f64>().ok())
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
        .ok_or_else(|| GoogleRoutesError::InvalidDuration(duration.to_owned()))
}

/// Arranges the response elements into an `origins x destinations` matrix of
/// seconds. Every pair must be present and routable.
pub fn travel_times_from_elements(
    elements: &[RouteMatrixElement],
    num_origins: usize,
    num_destinations: usize,
) -> Result<Vec<Vec<f64>>, GoogleRoutesError> {
    let mut seconds = vec![vec![None; num_destinations]; num_origins];

    for element in elements {
        let (origin, destination) = (element.origin_index, element.destination_index);
        if origin >= num_origins || destination >= num_destinations {
            continue;
        }

        if element.condition == Some(RouteMatrixElementCondition::RouteNotFound) {
            return Err(GoogleRoutesError::RouteNotFound {
                origin,
                destination,
            });
        }

        if let Some(duration) = &element.duration {
            seconds[origin][destination] = Some(parse_duration_seconds(duration)?);
        }
    }

    seconds
        .into_iter()
        .enumerate()
        .map(|(origin, row)| {
            row.into_iter()
                .enumerate()
                .map(|(destination, value)| {
                    value.ok_or(GoogleRoutesError::MissingElement {
                        origin,
                        destination,
                    })
                })
                .collect()
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct GoogleRoutesMatrixClientParams {
    pub api_key: String,
    pub url: String,
}

impl GoogleRoutesMatrixClientParams {
    pub fn new(api_key: String) -> Self {
        GoogleRoutesMatrixClientParams {
            api_key,
            url: GOOGLE_ROUTES_MATRIX_API_URL.to_owned(),
        }
    }
}

pub struct GoogleRoutesMatrixClient {
    params: GoogleRoutesMatrixClientParams,
    client: reqwest::Client,
}

impl GoogleRoutesMatrixClient {
    pub fn new(params: GoogleRoutesMatrixClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    /// Traffic aware travel times in seconds, `result[origin][destination]`.
    pub async fn fetch_travel_times<P>(
        &self,
        origins: &[P],
        destinations: &[P],
    ) -> Result<Vec<Vec<f64>>, GoogleRoutesError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let elements = origins.len() * destinations.len();
        if elements > MAX_ELEMENTS {
            return Err(GoogleRoutesError::TooManyElements {
                elements,
                limit: MAX_ELEMENTS,
            });
        }

        let body = RouteMatrixRequestBody {
            origins: waypoints(origins),
            destinations: waypoints(destinations),
            travel_mode: "DRIVE",
            routing_preference: "TRAFFIC_AWARE_OPTIMAL",
        };

        let response = self
            .client
            .post(&self.params.url)
            .header("X-Goog-Api-Key", &self.params.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GoogleRoutesError::Api { status, message });
        }

        let text = response.text().await?;
        let elements: Vec<RouteMatrixElement> = serde_json::from_str(&text)?;
        debug!(elements = elements.len(), "GoogleRoutesApi: received route matrix");

        travel_times_from_elements(&elements, origins.len(), destinations.len())
    }
}
