//! Standard-scaler + logistic-regression pipeline, evaluated with ndarray.
//! p = sigmoid(intercept + sum_i coef_i * (x_i - mean_i) / scale_i)

use super::{ProbabilityModel, ScoringError};
use crate::error::ArtifactError;
use ndarray::{Array1, ArrayView1};

/// Logistic function without overflow for large |z|.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[derive(Debug, Clone)]
pub struct LogisticModel {
    intercept: f64,
    coefficients: Array1<f64>,
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl LogisticModel {
    /// `scaler` is `(mean, scale)`; `None` means inputs are used as-is.
    pub fn new(
        intercept: f64,
        coefficients: Vec<f64>,
        scaler: Option<(Vec<f64>, Vec<f64>)>,
    ) -> Result<Self, ArtifactError> {
        let dim = coefficients.len();
        if dim == 0 {
            return Err(ArtifactError::schema("model has no coefficients"));
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ArtifactError::schema("model parameters must be finite"));
        }
        let (mean, scale) = match scaler {
            Some((mean, scale)) => {
                if mean.len() != dim || scale.len() != dim {
                    return Err(ArtifactError::schema(format!(
                        "scaler has {} means and {} scales for {dim} coefficients",
                        mean.len(),
                        scale.len()
                    )));
                }
                if mean.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
                    return Err(ArtifactError::schema("scaler parameters must be finite"));
                }
                // A constant training column has scale 0; it is left unscaled.
                let scale: Vec<f64> = scale.into_iter().map(|s| if s == 0.0 { 1.0 } else { s }).collect();
                (mean, scale)
            }
            None => (vec![0.0; dim], vec![1.0; dim]),
        };
        Ok(Self {
            intercept,
            coefficients: Array1::from(coefficients),
            mean: Array1::from(mean),
            scale: Array1::from(scale),
        })
    }

    /// Linear predictor before the logistic link.
    pub fn decision_function(&self, features: &[f64]) -> Result<f64, ScoringError> {
        let dim = self.coefficients.len();
        if features.len() != dim {
            return Err(ScoringError::DimensionMismatch {
                expected: dim,
                got: features.len(),
            });
        }
        if let Some(index) = features.iter().position(|v| !v.is_finite()) {
            return Err(ScoringError::NonFiniteInput { index });
        }
        let x = ArrayView1::from(features);
        let standardized = (&x - &self.mean) / &self.scale;
        Ok(self.intercept + standardized.dot(&self.coefficients))
    }
}

impl ProbabilityModel for LogisticModel {
    fn predict_probability(&self, features: &[f64]) -> Result<f64, ScoringError> {
        let z = self.decision_function(features)?;
        let p = sigmoid(z);
        if !p.is_finite() {
            return Err(ScoringError::NonFiniteOutput);
        }
        Ok(p)
    }

    fn input_dim(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }

    fn backend_type(&self) -> &str {
        "logistic_regression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_stable_and_symmetric() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn applies_scaler_before_coefficients() {
        let m = LogisticModel::new(0.5, vec![2.0, -1.0], Some((vec![1.0, 3.0], vec![2.0, 0.0])))
            .unwrap();
        // (3-1)/2 * 2 + (4-3)/1 * -1 + 0.5 = 1.5
        let z = m.decision_function(&[3.0, 4.0]).unwrap();
        assert!((z - 1.5).abs() < 1e-12);
        let p = m.predict_probability(&[3.0, 4.0]).unwrap();
        assert!((p - sigmoid(1.5)).abs() < 1e-15);
    }

    #[test]
    fn rejects_wrong_dimension_and_nan() {
        let m = LogisticModel::new(0.0, vec![1.0, 1.0], None).unwrap();
        assert_eq!(
            m.predict_probability(&[1.0]),
            Err(ScoringError::DimensionMismatch { expected: 2, got: 1 })
        );
        assert_eq!(
            m.predict_probability(&[1.0, f64::NAN]),
            Err(ScoringError::NonFiniteInput { index: 1 })
        );
    }

    #[test]
    fn rejects_mismatched_scaler() {
        assert!(LogisticModel::new(0.0, vec![1.0, 1.0], Some((vec![0.0], vec![1.0, 1.0]))).is_err());
        assert!(LogisticModel::new(0.0, vec![], None).is_err());
        assert!(LogisticModel::new(f64::INFINITY, vec![1.0], None).is_err());
    }
}
