use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use weather_core::{Coordinate, ForecastError, ForecastResolver, ForecastSummary};

#[derive(Debug, Clone)]
pub struct AppState {
    pub resolver: Arc<ForecastResolver>,
}

/// Any handler failure. The detail goes to the log, the caller only sees a 500.
#[derive(Debug)]
pub enum ApiError {
    Forecast(ForecastError),
    UnexpectedPath(String),
}

impl From<ForecastError> for ApiError {
    fn from(err: ForecastError) -> Self {
        Self::Forecast(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Forecast(err) => {
                tracing::error!(error = %err, "weather request failed");
            }
            ApiError::UnexpectedPath(path) => {
                tracing::error!(%path, "weather request path is not /{{latitude}}/{{longitude}}");
            }
        }
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .nest("/weather", weather_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn weather_routes() -> Router<AppState> {
    Router::new().route("/{latitude}/{longitude}", get(get_weather_forecast))
}

async fn hello() -> &'static str {
    "Hello world!"
}

// Reads the still percent-encoded segments so they reach the upstream URL
// untouched. Inside the `/weather` nest the path is `/{latitude}/{longitude}`.
fn raw_coordinate(uri: &Uri) -> Result<Coordinate, ApiError> {
    let path = uri.path();
    path.strip_prefix('/')
        .and_then(|rest| rest.split_once('/'))
        .filter(|(_, longitude)| !longitude.contains('/'))
        .map(|(latitude, longitude)| Coordinate::new(latitude, longitude))
        .ok_or_else(|| ApiError::UnexpectedPath(path.to_string()))
}

async fn get_weather_forecast(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, ApiError> {
    let coordinate = raw_coordinate(&uri)?;
    let period = state.resolver.resolve(&coordinate).await?;
    let summary = ForecastSummary::from(&period);

    let body = serde_json::to_vec(&summary).map_err(ForecastError::ResponseEncodingFailure)?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
