//! Binary logistic regression adapter
//!
//! The artifact is the JSON export of a fitted two-class logistic regression
//! (coefficients, intercept and class labels). Inference is a single dot
//! product followed by the logistic function.

use crate::classifier::{ClassProbabilities, DelayClassifier, FEATURE_COUNT, Features};
use crate::error::ModelError;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk representation of a fitted logistic regression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticArtifact {
    /// One weight per input feature, in training column order
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Class labels; the second one is the positive ("delayed") class
    #[serde(default = "default_classes")]
    pub classes: Vec<i64>,
}

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

#[derive(Debug, Clone)]
pub struct LogisticRegressionModel {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LogisticRegressionModel {
    /// Read and validate an artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path.as_ref())?;
        let artifact: LogisticArtifact = serde_json::from_slice(&bytes)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: LogisticArtifact) -> Result<Self, ModelError> {
        if artifact.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::InvalidArtifact(format!(
                "expected {} coefficients, found {}",
                FEATURE_COUNT,
                artifact.coefficients.len()
            )));
        }
        if artifact.coefficients.iter().any(|w| !w.is_finite()) || !artifact.intercept.is_finite()
        {
            return Err(ModelError::InvalidArtifact(
                "parameters must be finite".to_string(),
            ));
        }
        if artifact.classes.len() != 2 || artifact.classes[0] == artifact.classes[1] {
            return Err(ModelError::InvalidArtifact(format!(
                "expected two distinct class labels, found {:?}",
                artifact.classes
            )));
        }

        Ok(Self {
            coefficients: Array1::from(artifact.coefficients),
            intercept: artifact.intercept,
        })
    }

    pub fn coefficients(&self) -> &Array1<f64> {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    fn decision_function(&self, features: &Features) -> Result<f64, ModelError> {
        let x = Array2::from_shape_vec((1, FEATURE_COUNT), features.to_row())
            .map_err(|e| ModelError::Scoring(e.to_string()))?;
        let scores = x.dot(&self.coefficients) + self.intercept;
        scores
            .first()
            .copied()
            .ok_or_else(|| ModelError::Scoring("got an empty prediction".to_string()))
    }
}

impl DelayClassifier for LogisticRegressionModel {
    fn predict_proba(&self, features: &Features) -> Result<ClassProbabilities, ModelError> {
        let z = self.decision_function(features)?;
        ClassProbabilities::from_delay(sigmoid(z)).validate()
    }
}

// Split on sign so exp never overflows.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
