use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::ModelError;
use crate::models::{FeatureVector, FEATURE_COUNT};

/// Pretrained match classifier
///
/// Returns one match probability per input row, in input order.
pub trait ScoringModel: Send + Sync {
    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<f64>, ModelError>;
}

/// Logistic regression over the five donor features
///
/// Artifact format:
/// ```json
/// { "coefficients": [2.1, -0.05, 0.8, 0.15, 0.1], "intercept": -1.2 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: [f64; FEATURE_COUNT],
    pub intercept: f64,
}

impl LogisticModel {
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Load a persisted model artifact
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: LogisticModel = serde_json::from_str(&raw)?;

        tracing::info!(
            "Loaded scoring model from {} (coefficients: {:?}, intercept: {})",
            path.display(),
            model.coefficients,
            model.intercept
        );

        Ok(model)
    }

    #[inline]
    fn probability(&self, features: &FeatureVector) -> f64 {
        let z = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features.as_slice())
                .map(|(w, x)| w * x)
                .sum::<f64>();
        1.0 / (1.0 + (-z).exp())
    }
}

impl ScoringModel for LogisticModel {
    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<f64>, ModelError> {
        Ok(batch.iter().map(|features| self.probability(features)).collect())
    }
}
