use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Number of input features the delay classifier is trained on
pub const FEATURE_COUNT: usize = 2;

/// Model input: one row of the training matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// 1 = Monday .. 7 = Sunday
    pub day_of_week: i64,
    pub airport_id: i64,
}

impl Features {
    pub fn new(day_of_week: i64, airport_id: i64) -> Self {
        Self {
            day_of_week,
            airport_id,
        }
    }

    /// Column order matches the training data: `[day_of_week, airport_id]`
    pub fn to_row(&self) -> Vec<f64> {
        vec![self.day_of_week as f64, self.airport_id as f64]
    }
}

/// Two-class distribution returned by a classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    /// Class 0: arrival delay of 15 minutes or less
    pub no_delay: f64,
    /// Class 1: arrival delayed more than 15 minutes
    pub delay: f64,
}

impl ClassProbabilities {
    /// Build a distribution from the positive-class probability.
    pub fn from_delay(delay: f64) -> Self {
        Self {
            no_delay: 1.0 - delay,
            delay,
        }
    }

    /// Probability of the more likely class.
    pub fn confidence(&self) -> f64 {
        self.no_delay.max(self.delay)
    }

    pub(crate) fn validate(self) -> Result<Self, ModelError> {
        for (label, p) in [("no_delay", self.no_delay), ("delay", self.delay)] {
            if !p.is_finite() {
                return Err(ModelError::Scoring(format!(
                    "classifier returned a non-finite {} probability",
                    label
                )));
            }
            if !(0.0..=1.0).contains(&p) {
                return Err(ModelError::Scoring(format!(
                    "classifier returned {} probability {} outside [0, 1]",
                    label, p
                )));
            }
        }
        Ok(self)
    }
}

/// The only capability the service needs from a trained model.
///
/// Implementations must be immutable after construction; a single instance
/// is shared by every request.
pub trait DelayClassifier: Send + Sync {
    fn predict_proba(&self, features: &Features) -> Result<ClassProbabilities, ModelError>;
}
