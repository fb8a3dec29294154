#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use axum::{
    Router,
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use dotenv::dotenv;
use flight_delay_api::{
    construct_router,
    state::{AppState, State},
};
use std::sync::Arc;
use std::time::Instant;

mod config;
mod metrics;

async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;

    metrics::record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}

/// Service routes plus `/metrics`, every matched route instrumented.
fn build_app(state: AppState) -> Router {
    construct_router(state)
        .route("/metrics", get(metrics::handler))
        .route_layer(middleware::from_fn(metrics_middleware))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    metrics::init_telemetry("flight-delay-api");

    tracing::info!("Starting Flight Delay Prediction API");

    let config = config::Config::from_env()?;
    tracing::info!(
        "Loaded configuration: port={}, model={}, airports={}",
        config.port,
        config.model_path.display(),
        config.airports_path.display()
    );

    let state = Arc::new(State::from_paths(
        config.model_path.clone(),
        config.airports_path.clone(),
    ));
    if let Some(reason) = state.model.load_error() {
        tracing::warn!(
            "Serving without a model ({}); /predict will fail until restart",
            reason
        );
    }

    let app = build_app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
