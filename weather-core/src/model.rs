use serde::{Deserialize, Deserializer, Serialize};

/// Coordinate exactly as it appeared in the inbound request path.
///
/// Neither part is parsed as a number; the upstream API is the one that
/// decides whether a point makes sense.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Coordinate {
    pub latitude: String,
    pub longitude: String,
}

impl Coordinate {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// `{base}/points/{lat},{lon}`
    pub fn points_url(&self, base_url: &str) -> String {
        format!("{}/points/{},{}", base_url, self.latitude, self.longitude)
    }
}

/// A field whose JSON shape the upstream API does not pin down.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpstreamValue {
    #[default]
    Absent,
    Text(String),
    Number(serde_json::Number),
    Structured(serde_json::Value),
}

impl UpstreamValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// One entry of `properties.periods` in a forecast document.
///
/// Fields missing upstream, or sent as `null`, fall back to their zero value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForecastPeriod {
    #[serde(deserialize_with = "null_as_default")]
    pub number: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_daytime: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub temperature: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub temperature_unit: String,
    pub temperature_trend: UpstreamValue,
    #[serde(deserialize_with = "null_as_default")]
    pub wind_speed: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wind_direction: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(deserialize_with = "null_as_default")]
    pub short_forecast: String,
    #[serde(deserialize_with = "null_as_default")]
    pub detailed_forecast: String,
    pub probability_of_precipitation: UpstreamValue,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureLabel {
    Hot,
    Moderate,
    Cold,
}

impl TemperatureLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureLabel::Hot => "hot",
            TemperatureLabel::Moderate => "moderate",
            TemperatureLabel::Cold => "cold",
        }
    }
}

impl std::fmt::Display for TemperatureLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buckets a Fahrenheit temperature. `80` and above is hot, `60` and below
/// is cold, anything in between is moderate.
pub fn classify(temperature_f: i64) -> TemperatureLabel {
    if temperature_f >= 80 {
        TemperatureLabel::Hot
    } else if temperature_f <= 60 {
        TemperatureLabel::Cold
    } else {
        TemperatureLabel::Moderate
    }
}

/// Response body of `GET /weather/{latitude}/{longitude}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub short_forecast: String,
    pub temperature: TemperatureLabel,
}

impl From<&ForecastPeriod> for ForecastSummary {
    fn from(period: &ForecastPeriod) -> Self {
        Self {
            short_forecast: period.short_forecast.clone(),
            temperature: classify(period.temperature),
        }
    }
}
