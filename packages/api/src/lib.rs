//! Flight delay HTTP API
//!
//! Serves delay predictions from the model gateway and the airport reference
//! list. Handlers are stateless; the only shared state is the read-only
//! [`State`](state::State).
//!
//! ```rust,ignore
//! use flight_delay_api::{construct_router, state::State};
//!
//! let state = Arc::new(State::from_paths("flight_delay_model.json", "airports.csv"));
//! let app = construct_router(state);
//! ```

use axum::{Router, middleware::from_fn, routing::get};
use middleware::error_reporting::error_reporting_middleware;
use state::AppState;
use tower_http::{compression::CompressionLayer, cors::CorsLayer};

mod middleware;
mod routes;

pub mod airports;
pub mod error;
pub mod state;

pub use axum;
pub use flight_delay_model as model;

pub fn construct_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::info::root))
        .route("/predict", get(routes::predict::predict))
        .route("/airports", get(routes::airports::list_airports))
        .route("/health", get(routes::health::health))
        .with_state(state)
        .layer(from_fn(error_reporting_middleware))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
}
