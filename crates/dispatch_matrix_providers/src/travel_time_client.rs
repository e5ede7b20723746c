use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    google_routes_api::{GoogleRoutesError, GoogleRoutesMatrixClient, GoogleRoutesMatrixClientParams},
    travel_time_provider::TravelTimeProvider,
};

pub const GOOGLE_ROUTES_API_KEY_ENV_VAR: &str = "GOOGLE_ROUTES_API_KEY";

#[derive(Debug, Error)]
pub enum TravelTimeError {
    #[error("GOOGLE_ROUTES_API_KEY is not set")]
    MissingApiKey,

    #[error(transparent)]
    GoogleRoutes(#[from] GoogleRoutesError),

    #[error("No travel times after {0:?}")]
    Timeout(Duration),
}

pub struct TravelTimeClient {
    google_routes_client: Option<GoogleRoutesMatrixClient>,
    timeout: Duration,
}

impl TravelTimeClient {
    pub fn new(google_routes_params: Option<GoogleRoutesMatrixClientParams>, timeout: Duration) -> Self {
        Self {
            google_routes_client: google_routes_params.map(GoogleRoutesMatrixClient::new),
            timeout,
        }
    }

    /// Reads the Google Routes API key from the environment when it is set.
    pub fn from_env(timeout: Duration) -> Self {
        let params = std::env::var(GOOGLE_ROUTES_API_KEY_ENV_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .map(GoogleRoutesMatrixClientParams::new);

        Self::new(params, timeout)
    }

    /// All-pairs travel times in seconds, or `None` when `provider` derives
    /// them from distances.
    pub async fn fetch_travel_times<P>(
        &self,
        points: &[P],
        provider: TravelTimeProvider,
    ) -> Result<Option<Vec<Vec<f64>>>, TravelTimeError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        match provider {
            TravelTimeProvider::Haversine => Ok(None),
            TravelTimeProvider::GoogleRoutesApi => {
                let client = self
                    .google_routes_client
                    .as_ref()
                    .ok_or(TravelTimeError::MissingApiKey)?;

                let seconds = tokio::time::timeout(
                    self.timeout,
                    client.fetch_travel_times(points, points),
                )
                .await
                .map_err(|_| TravelTimeError::Timeout(self.timeout))??;

                Ok(Some(seconds))
            }
        }
    }

    /// Like [`Self::fetch_travel_times`], but any failure is logged and
    /// yields `None` so the caller keeps the distance based travel times.
    pub async fn fetch_or_fallback<P>(
        &self,
        points: &[P],
        provider: TravelTimeProvider,
    ) -> Option<Vec<Vec<f64>>>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        match self.fetch_travel_times(points, provider).await {
            Ok(Some(seconds)) => {
                info!(%provider, points = points.len(), "Fetched travel times");
                Some(seconds)
            }
            Ok(None) => None,
            Err(error) => {
                warn!(%provider, %error, "Travel time provider failed, running in degraded mode");
                None
            }
        }
    }
}
