use serde::{Deserialize, Serialize};

use super::{AnalysisError, ResistanceSample};

/// Ordinary least-squares line `y = slope * x + intercept`
///
/// Fitted on resistance samples (x = current in μA, y = voltage drop in mV) the
/// slope is the internal resistance in kOhm and the intercept is the residual
/// contact offset in mV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Slope of the fitted line
    pub slope: f64,
    /// y-intercept of the fitted line
    pub intercept: f64,
    /// Number of points fitted
    pub n: usize,
}

impl LinearFit {
    /// Fit `y` against `x`
    ///
    /// Fails on empty or mismatched input, and when every `x` is identical.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self, AnalysisError> {
        if x.len() != y.len() {
            return Err(AnalysisError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        let Some(&first) = x.first() else {
            return Err(AnalysisError::InsufficientSamples);
        };
        if x.iter().all(|&v| v == first) {
            return Err(degenerate(x, y));
        }

        let n = x.len() as f64;
        let sum_x: f64 = x.iter().sum();
        let sum_y: f64 = y.iter().sum();
        let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
        let sum_xx: f64 = x.iter().map(|a| a * a).sum();

        let denominator = sum_xx - sum_x * sum_x / n;
        if denominator == 0.0 || !denominator.is_finite() {
            return Err(degenerate(x, y));
        }

        let slope = (sum_xy - sum_y * sum_x / n) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;

        Ok(Self {
            slope,
            intercept,
            n: x.len(),
        })
    }

    /// Fit voltage drop against current
    pub fn from_samples(samples: &[ResistanceSample]) -> Result<Self, AnalysisError> {
        let (currents, drops): (Vec<f64>, Vec<f64>) = samples
            .iter()
            .map(|s| (s.current, s.voltage_drop))
            .unzip();
        Self::fit(&currents, &drops)
    }

    /// Value of the line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

fn degenerate(x: &[f64], y: &[f64]) -> AnalysisError {
    AnalysisError::DegenerateFit {
        currents: x.to_vec(),
        voltage_drops: y.to_vec(),
    }
}
