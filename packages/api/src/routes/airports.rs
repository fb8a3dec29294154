use crate::airports::Airport;
use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;

#[tracing::instrument(name = "GET /airports", skip(state))]
pub async fn list_airports(State(state): State<AppState>) -> Result<Json<Vec<Airport>>, ApiError> {
    let airports = state.airports.list_all().await?;
    if airports.is_empty() {
        tracing::warn!(path = %state.airports.path().display(), "Airports file has no rows");
        return Err(ApiError::internal("Unable to load airports data"));
    }

    Ok(Json(airports))
}
