use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use flight_delay_model::{ModelError, PredictionResult};
use serde::Deserialize;
use std::ops::RangeInclusive;

/// 1 = Monday .. 7 = Sunday
pub const DAY_OF_WEEK_RANGE: RangeInclusive<i64> = 1..=7;

#[derive(Debug, Deserialize)]
pub struct PredictQuery {
    pub day_of_week: i64,
    pub airport_id: i64,
}

#[tracing::instrument(name = "GET /predict", skip(state))]
pub async fn predict(
    State(state): State<AppState>,
    query: Result<Query<PredictQuery>, QueryRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let Query(query) = query.map_err(|e| crate::bad_request!("{}", e.body_text()))?;

    // Range check comes first so bad input never reaches the model.
    if !DAY_OF_WEEK_RANGE.contains(&query.day_of_week) {
        record_outcome("invalid_input");
        return Err(ApiError::bad_request("day_of_week must be between 1 and 7"));
    }

    match state.model.score(query.day_of_week, query.airport_id) {
        Ok(result) => {
            record_outcome("success");
            tracing::debug!(
                delay_probability = result.delay_probability,
                confidence = result.confidence,
                "Prediction served"
            );
            Ok(Json(result))
        }
        Err(e) => {
            record_outcome(match e {
                ModelError::Unavailable => "unavailable",
                _ => "error",
            });
            Err(e.into())
        }
    }
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!("predictions_total", "outcome" => outcome).increment(1);
}
