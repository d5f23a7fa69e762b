//! Float Routes
//!
//! Read-only views over the built-in float catalog.
//!
//! - GET /api/floats - List all floats
//! - GET /api/floats/nearest - Floats ranked by distance
//! - GET /api/floats/:id/series - Monthly temperature series (json or csv)
//! - GET /api/tsunami-risk - Tsunami-risk map markers

use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    FloatListResponse, NearestParams, NearestResponse, SeriesParams, TsunamiRiskResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::floats::{Coordinate, TemperatureSeries};

/// GET /api/floats
pub async fn list_floats(State(state): State<Arc<AppState>>) -> Json<FloatListResponse> {
    let floats = state.catalog.floats().to_vec();

    Json(FloatListResponse {
        total: floats.len(),
        floats,
    })
}

/// GET /api/floats/nearest?lat=&lon=&limit=
///
/// `lat` and `lon` must be given together; without them the configured
/// reference point is used.
pub async fn nearest_floats(
    State(state): State<Arc<AppState>>,
    params: Result<Query<NearestParams>, QueryRejection>,
) -> ApiResult<Json<NearestResponse>> {
    let Query(params) = params?;

    let reference = match (params.lat, params.lon) {
        (Some(lat), Some(lon)) => Coordinate::new(lat, lon)?,
        (None, None) => state.assistant.reference(),
        _ => {
            return Err(ApiError::Validation(
                "lat and lon must be given together".to_string(),
            ))
        }
    };

    let limit = params.limit.unwrap_or(state.nearest_limit);
    if limit == 0 {
        return Err(ApiError::Validation("limit must be at least 1".to_string()));
    }

    let floats = state.catalog.nearest(reference, limit)?;

    Ok(Json(NearestResponse { reference, floats }))
}

/// GET /api/floats/:id/series?format=json|csv
pub async fn float_series(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    params: Result<Query<SeriesParams>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(params) = params?;
    let float = state.catalog.get(&id)?;
    let series = TemperatureSeries::for_float(float);

    match params.format.to_lowercase().as_str() {
        "json" => Ok(Json(series).into_response()),
        "csv" => {
            let body = series
                .to_csv()
                .map_err(|e| ApiError::Internal(format!("CSV encoding failed: {}", e)))?;
            let filename = format!("float_{}_temperature.csv", float.id);

            Ok((
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", filename),
                    ),
                ],
                Body::from(body),
            )
                .into_response())
        }
        other => Err(ApiError::Validation(format!(
            "Unsupported format: {} (expected json or csv)",
            other
        ))),
    }
}

/// GET /api/tsunami-risk
pub async fn tsunami_risk(State(state): State<Arc<AppState>>) -> Json<TsunamiRiskResponse> {
    let locations = state.catalog.risk_locations().to_vec();

    Json(TsunamiRiskResponse {
        total: locations.len(),
        locations,
    })
}
