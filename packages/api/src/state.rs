use flight_delay_model::ModelGateway;
use std::path::PathBuf;
use std::sync::Arc;

use crate::airports::AirportRepository;

pub type AppState = Arc<State>;

/// Everything a request handler can reach. Read-only after startup.
#[derive(Debug, Clone)]
pub struct State {
    pub model: ModelGateway,
    pub airports: AirportRepository,
}

impl State {
    pub fn new(model: ModelGateway, airports: AirportRepository) -> Self {
        Self { model, airports }
    }

    /// Load the model artifact and point the airport repository at its file.
    pub fn from_paths(model_path: impl Into<PathBuf>, airports_path: impl Into<PathBuf>) -> Self {
        let model_path = model_path.into();
        Self::new(
            ModelGateway::initialize(&model_path),
            AirportRepository::new(airports_path),
        )
    }
}
