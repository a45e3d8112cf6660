//! Two-hop forecast lookup against api.weather.gov.
//!
//! `/points/{lat},{lon}` tells us which forecast document covers the point,
//! and that document carries the ordered list of forecast periods.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use std::sync::Arc;

use crate::{
    client::UpstreamClient,
    error::ForecastError,
    model::{Coordinate, ForecastPeriod},
};

pub const NWS_API_BASE: &str = "https://api.weather.gov";

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    forecast: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    #[serde(deserialize_with = "null_as_empty")]
    periods: Vec<ForecastPeriod>,
}

// `periods: null` means "nothing to report"; a missing key is still an error.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ForecastPeriod>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ForecastPeriod>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone)]
pub struct ForecastResolver {
    client: Arc<dyn UpstreamClient>,
}

impl ForecastResolver {
    pub fn new(client: Arc<dyn UpstreamClient>) -> Self {
        Self { client }
    }

    /// Returns the first forecast period covering `coordinate`.
    ///
    /// Fails fast: the forecast document is only requested once the points
    /// lookup has produced a usable URL.
    pub async fn resolve(&self, coordinate: &Coordinate) -> Result<ForecastPeriod, ForecastError> {
        let points_url = coordinate.points_url(NWS_API_BASE);
        tracing::debug!(url = %points_url, "requesting forecast office for point");
        let points: PointsResponse = self.get_json(&points_url).await?;

        let forecast_url = points.properties.forecast;
        tracing::debug!(url = %forecast_url, "requesting forecast periods");
        let forecast: ForecastResponse = self.get_json(&forecast_url).await?;

        forecast
            .properties
            .periods
            .into_iter()
            .next()
            .ok_or(ForecastError::NoForecastAvailable)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ForecastError> {
        let body = self.client.fetch(url).await?;

        serde_json::from_slice(&body).map_err(|source| ForecastError::MalformedUpstreamResponse {
            url: url.to_string(),
            source,
        })
    }
}
