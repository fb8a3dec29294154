use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// The model was never loaded; the gateway is in degraded mode
    #[error("Model not available")]
    Unavailable,
    /// Reading the artifact from disk failed
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    /// The artifact is not valid JSON for the expected layout
    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    /// The artifact parsed but its parameters are unusable
    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),
    /// The classifier produced no usable distribution
    #[error("{0}")]
    Scoring(String),
}
