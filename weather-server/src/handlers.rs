//! `/weather` handlers

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use weather_core::{Units, WeatherRecord, new_record_id};

use crate::{
    error::ApiError,
    state::{AppState, Backend},
};

#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
    pub units: Option<String>,
}

impl WeatherQuery {
    fn city(&self) -> Option<&str> {
        self.city.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    fn units(&self, default: Units) -> Result<Units, ApiError> {
        match self.units.as_deref() {
            Some(units) => units.parse().map_err(|e| ApiError::BadRequest(format!("{e}"))),
            None => Ok(default),
        }
    }
}

/// GET /weather
///
/// Proxy mode returns one record fetched upstream for `city`. Store mode
/// returns every record, or only those matching `city`, and ignores `units`.
#[instrument(skip(state), fields(mode = %state.mode()))]
pub async fn get_weather(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    match &state.backend {
        Backend::Proxy(source) => {
            let units = query.units(state.default_units)?;
            let city = query.city().ok_or(ApiError::CityNotFound)?;

            let record = source.fetch_weather(city, units).await.map_err(|err| {
                warn!(city, kind = ?err.kind(), error = %err, "upstream lookup failed");
                ApiError::CityNotFound
            })?;

            Ok(Json(record).into_response())
        }
        Backend::Store(store) => {
            let records = match query.city() {
                None => store.get_all(),
                Some(city) => {
                    let matches = store.get_by_city(city);
                    if matches.is_empty() {
                        return Err(ApiError::CityNotFound);
                    }
                    matches
                }
            };

            Ok(Json(records).into_response())
        }
    }
}

/// POST /weather
///
/// Decodes the body regardless of content type, so `curl -d` works as-is.
/// Proxy mode has nothing to store and answers 405.
#[instrument(skip(state, body), fields(bytes = body.len()))]
pub async fn post_weather(State(state): State<AppState>, body: Bytes) -> Result<StatusCode, ApiError> {
    let Backend::Store(store) = &state.backend else {
        return Err(ApiError::MethodNotAllowed);
    };

    let mut record: WeatherRecord = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "rejecting undecodable weather record");
        ApiError::InvalidRecord
    })?;

    if record.id.trim().is_empty() {
        record.id = new_record_id();
    }

    info!(id = %record.id, city = %record.city, "storing weather record");
    store.put(record);

    Ok(StatusCode::OK)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub mode: String,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        mode: state.mode().to_string(),
    })
}
