//! Statistics Calculator Module
//! Descriptive statistics, least-squares fitting, and quadrant labeling.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::AnalysisError;

/// Minimum number of points for a meaningful line fit.
pub const MIN_FIT_POINTS: usize = 3;

/// Summary statistics for one numeric column.
#[derive(Debug, Clone)]
pub struct SeriesSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl SeriesSummary {
    /// Compute summary statistics for an array of values.
    pub fn compute(values: &[f64]) -> Result<Self, AnalysisError> {
        if values.is_empty() {
            return Err(AnalysisError::InsufficientData { needed: 1, got: 0 });
        }

        let count = values.len();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / count as f64;

        let variance = if count > 1 {
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64
        } else {
            0.0
        };

        Ok(Self {
            count,
            min,
            max,
            mean,
            median: median(values)?,
            std_dev: variance.sqrt(),
        })
    }
}

/// Median of a non-empty slice; mean of the middle two for even lengths.
pub fn median(values: &[f64]) -> Result<f64, AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::InsufficientData { needed: 1, got: 0 });
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    Ok(if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    })
}

/// Ordinary least squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub pearson_r: f64,
    /// Two-sided p-value for a non-zero slope (Student's t, n - 2 df).
    pub p_value: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a least-squares line through `(x, y)` pairs.
///
/// Requires `x.len() == y.len() >= 3` and at least two distinct x values.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Result<LinearFit, AnalysisError> {
    if x.len() != y.len() || x.len() < MIN_FIT_POINTS {
        return Err(AnalysisError::InsufficientData {
            needed: MIN_FIT_POINTS,
            got: x.len().min(y.len()),
        });
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    let mut ss_xy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        ss_xx += (xi - mean_x).powi(2);
        ss_yy += (yi - mean_y).powi(2);
        ss_xy += (xi - mean_x) * (yi - mean_y);
    }

    if ss_xx == 0.0 {
        // Constant x: a single distinct point, no slope to estimate.
        return Err(AnalysisError::InsufficientData {
            needed: MIN_FIT_POINTS,
            got: 1,
        });
    }

    let slope = ss_xy / ss_xx;
    let intercept = mean_y - slope * mean_x;

    // Constant y: the correlation is undefined and reported as zero.
    let pearson_r = if ss_yy == 0.0 {
        0.0
    } else {
        ss_xy / (ss_xx * ss_yy).sqrt()
    };

    Ok(LinearFit {
        slope,
        intercept,
        r_squared: pearson_r * pearson_r,
        pearson_r,
        p_value: slope_p_value(pearson_r, x.len()),
    })
}

/// Two-tailed p-value for the fitted slope, via `t = r * sqrt(df / (1 - r²))`.
fn slope_p_value(r: f64, n: usize) -> f64 {
    let df = (n - 2) as f64;
    let denom = 1.0 - r * r;
    if denom <= f64::EPSILON {
        return 0.0;
    }

    let t = r * (df / denom).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => 2.0 * (1.0 - dist.cdf(t.abs())),
        Err(_) => f64::NAN,
    }
}

/// Quadrant membership relative to a pair of thresholds.
///
/// Values equal to a threshold count as Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    LowXLowY,
    LowXHighY,
    HighXLowY,
    HighXHighY,
}

/// Label each `(x, y)` pair by its quadrant relative to the thresholds.
pub fn quadrant_classify(
    x: &[f64],
    y: &[f64],
    x_threshold: f64,
    y_threshold: f64,
) -> Vec<Quadrant> {
    x.iter()
        .zip(y)
        .map(|(&xv, &yv)| match (xv > x_threshold, yv > y_threshold) {
            (false, false) => Quadrant::LowXLowY,
            (false, true) => Quadrant::LowXHighY,
            (true, false) => Quadrant::HighXLowY,
            (true, true) => Quadrant::HighXHighY,
        })
        .collect()
}
