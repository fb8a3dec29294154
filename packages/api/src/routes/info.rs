use axum::Json;
use serde_json::{Value, json};

#[tracing::instrument(name = "GET /")]
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Flight Delay Prediction API",
        "endpoints": {
            "/predict": "Predict flight delay probability (requires day_of_week and airport_id parameters)",
            "/airports": "Get list of all airports sorted alphabetically"
        }
    }))
}
