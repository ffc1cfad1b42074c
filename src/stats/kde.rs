//! Gaussian Kernel Density Estimation
//! Samples a smooth density curve over a padded, evenly spaced grid.

use crate::error::AnalysisError;

/// Fraction the sampling grid extends past the data extremes.
const GRID_PADDING: f64 = 0.05;

/// Sample a Gaussian KDE of `values` at `num_points` evenly spaced points.
///
/// The grid spans `[0.95 * min, 1.05 * max]` and the bandwidth follows
/// Scott's rule (`sigma * n^(-1/5)`, sample standard deviation). Needs at
/// least two points with non-zero spread.
pub fn kernel_density(
    values: &[f64],
    num_points: usize,
) -> Result<Vec<(f64, f64)>, AnalysisError> {
    if values.len() < 2 || num_points < 2 {
        return Err(AnalysisError::InsufficientData {
            needed: 2,
            got: values.len().min(num_points),
        });
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    if variance == 0.0 {
        // All samples identical: the density degenerates to a point mass.
        return Err(AnalysisError::InsufficientData { needed: 2, got: 1 });
    }
    let bandwidth = variance.sqrt() * n.powf(-0.2);

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lo = min * (1.0 - GRID_PADDING);
    let hi = max * (1.0 + GRID_PADDING);
    let step = (hi - lo) / (num_points - 1) as f64;

    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let mut curve = Vec::with_capacity(num_points);
    for i in 0..num_points {
        let x = lo + step * i as f64;
        let density: f64 = values
            .iter()
            .map(|&v| {
                let z = (x - v) / bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>()
            * norm;
        curve.push((x, density));
    }
    Ok(curve)
}
