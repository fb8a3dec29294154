//! Flight delay model gateway
//!
//! Owns the pre-trained delay classifier for the lifetime of the process.
//! The classifier is loaded once from a JSON artifact; a failed load puts the
//! gateway into a permanent degraded mode where every scoring call reports
//! [`ModelError::Unavailable`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use flight_delay_model::ModelGateway;
//!
//! let gateway = ModelGateway::initialize("flight_delay_model.json");
//! let prediction = gateway.score(3, 10397)?;
//! println!("{}", prediction.delay_probability);
//! ```

pub mod classifier;
pub mod error;
pub mod gateway;
pub mod logistic;

pub use classifier::{ClassProbabilities, DelayClassifier, Features};
pub use error::ModelError;
pub use gateway::{ModelGateway, PredictionResult};
pub use logistic::{LogisticArtifact, LogisticRegressionModel};
