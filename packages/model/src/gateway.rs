use crate::classifier::{DelayClassifier, Features};
use crate::error::ModelError;
use crate::logistic::LogisticRegressionModel;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Delay estimate returned to clients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Probability that the arrival is delayed more than 15 minutes
    pub delay_probability: f64,
    /// Probability of the more likely outcome, always >= 0.5
    pub confidence: f64,
}

/// Process-wide handle on the loaded classifier.
///
/// Built once at startup. When loading fails the gateway stays in degraded
/// mode for the lifetime of the process; it never retries.
#[derive(Clone)]
pub struct ModelGateway {
    classifier: Option<Arc<dyn DelayClassifier>>,
    load_error: Option<String>,
}

impl ModelGateway {
    /// Load the logistic regression artifact at `path`.
    pub fn initialize(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match LogisticRegressionModel::load(path) {
            Ok(model) => {
                tracing::info!(path = %path.display(), "Model loaded successfully");
                Self::from_classifier(Arc::new(model))
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Error loading model");
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn from_classifier(classifier: Arc<dyn DelayClassifier>) -> Self {
        Self {
            classifier: Some(classifier),
            load_error: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            classifier: None,
            load_error: Some(reason.into()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.classifier.is_some()
    }

    /// Why the model is unavailable, if it is.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Score one (day of week, airport) pair.
    ///
    /// `day_of_week` is expected to already be in 1..=7; `airport_id` is passed
    /// through unchanged, unseen airports included.
    pub fn score(&self, day_of_week: i64, airport_id: i64) -> Result<PredictionResult, ModelError> {
        let classifier = self.classifier.as_ref().ok_or(ModelError::Unavailable)?;
        let probs = classifier.predict_proba(&Features::new(day_of_week, airport_id))?;

        Ok(PredictionResult {
            delay_probability: probs.delay,
            confidence: probs.confidence(),
        })
    }
}

impl std::fmt::Debug for ModelGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelGateway")
            .field("available", &self.is_available())
            .field("load_error", &self.load_error)
            .finish()
    }
}
