use std::f64::consts::PI;

use serde::Deserialize;

/// A density estimate needs strictly more records than this.
pub const MIN_DENSITY_SAMPLES: usize = 5;

/// Evaluation points per density curve.
pub const DEFAULT_GRID_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// Bandwidth selection
// ---------------------------------------------------------------------------

/// Automatic bandwidth rule for a one-dimensional Gaussian kernel.
///
/// The rule yields a factor that scales the sample standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandwidthRule {
    /// `n^(-1/5)`
    #[default]
    Scott,
    /// `(3n/4)^(-1/5)`
    Silverman,
}

impl BandwidthRule {
    pub const ALL: [BandwidthRule; 2] = [BandwidthRule::Scott, BandwidthRule::Silverman];

    pub fn factor(self, n: usize) -> f64 {
        let n = n as f64;
        match self {
            BandwidthRule::Scott => n.powf(-0.2),
            BandwidthRule::Silverman => (n * 3.0 / 4.0).powf(-0.2),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BandwidthRule::Scott => "Scott",
            BandwidthRule::Silverman => "Silverman",
        }
    }
}

// ---------------------------------------------------------------------------
// Gaussian KDE
// ---------------------------------------------------------------------------

/// Gaussian kernel density estimate over a fixed sample.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit a KDE; `None` when the sample has no spread or a non-finite value,
    /// since no bandwidth can be derived then.
    pub fn new(values: &[f64], rule: BandwidthRule) -> Option<Self> {
        if values.len() < 2 || values.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let std = super::stats::sample_std(values);
        let bandwidth = rule.factor(values.len()) * std;
        if !(bandwidth.is_finite() && bandwidth > 0.0) {
            return None;
        }
        Some(GaussianKde {
            samples: values.to_vec(),
            bandwidth,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let norm = 1.0 / (self.samples.len() as f64 * h * (2.0 * PI).sqrt());
        let sum: f64 = self
            .samples
            .iter()
            .map(|&xi| {
                let z = (x - xi) / h;
                (-0.5 * z * z).exp()
            })
            .sum();
        norm * sum
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}

// ---------------------------------------------------------------------------
// Density curves
// ---------------------------------------------------------------------------

/// A KDE evaluated over the observed range of its sample.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    /// `[x, density]` pairs, x ascending from min to max of the sample.
    pub points: Vec<[f64; 2]>,
    pub bandwidth: f64,
    pub sample_count: usize,
}

/// Estimate the density of `values` on `grid_size` points spanning
/// `min(values)..=max(values)`.
///
/// Returns `None` for [`MIN_DENSITY_SAMPLES`] values or fewer, and for
/// samples without spread.
pub fn estimate_density(
    values: &[f64],
    grid_size: usize,
    rule: BandwidthRule,
) -> Option<DensityCurve> {
    if values.len() <= MIN_DENSITY_SAMPLES {
        return None;
    }
    let kde = GaussianKde::new(values, rule)?;

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let points = linspace(min, max, grid_size)
        .into_iter()
        .map(|x| [x, kde.evaluate(x)])
        .collect();

    Some(DensityCurve {
        points,
        bandwidth: kde.bandwidth(),
        sample_count: values.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trapezoid(points: &[[f64; 2]]) -> f64 {
        points
            .windows(2)
            .map(|w| (w[1][0] - w[0][0]) * (w[0][1] + w[1][1]) / 2.0)
            .sum()
    }

    #[test]
    fn five_values_are_skipped_six_are_estimated() {
        let five = [1.0, 2.0, 3.0, 4.0, 5.0];
        let six = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert!(estimate_density(&five, DEFAULT_GRID_SIZE, BandwidthRule::Scott).is_none());

        let curve = estimate_density(&six, DEFAULT_GRID_SIZE, BandwidthRule::Scott).unwrap();
        assert_eq!(curve.sample_count, 6);
        assert_eq!(curve.points.len(), DEFAULT_GRID_SIZE);
    }

    #[test]
    fn grid_spans_observed_range() {
        let values = [3.5, -1.0, 2.0, 0.25, 7.0, 4.0, 1.0];
        let curve = estimate_density(&values, 50, BandwidthRule::Scott).unwrap();
        assert_eq!(curve.points.first().unwrap()[0], -1.0);
        assert_eq!(curve.points.last().unwrap()[0], 7.0);
        assert!(curve.points.windows(2).all(|w| w[0][0] < w[1][0]));
    }

    #[test]
    fn densities_are_non_negative() {
        let values: Vec<f64> = (0..200)
            .map(|i| ((i * 7919) % 113) as f64 * 0.37 - 20.0)
            .collect();
        for rule in BandwidthRule::ALL {
            let curve = estimate_density(&values, 256, rule).unwrap();
            assert!(curve.points.iter().all(|p| p[1] >= 0.0 && p[1].is_finite()));
        }
    }

    #[test]
    fn scott_bandwidth_matches_rule() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let kde = GaussianKde::new(&values, BandwidthRule::Scott).unwrap();
        let expected = 6.0_f64.powf(-0.2) * 3.5_f64.sqrt();
        assert!((kde.bandwidth() - expected).abs() < 1e-12);

        let silverman = GaussianKde::new(&values, BandwidthRule::Silverman).unwrap();
        assert!(silverman.bandwidth() > kde.bandwidth());
    }

    #[test]
    fn symmetric_sample_peaks_at_center_and_integrates_to_one() {
        let values = [-2.0, -1.0, -1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 2.0];
        let kde = GaussianKde::new(&values, BandwidthRule::Scott).unwrap();

        assert!(kde.evaluate(0.0) > kde.evaluate(0.5));
        assert!((kde.evaluate(-1.3) - kde.evaluate(1.3)).abs() < 1e-12);

        let wide: Vec<[f64; 2]> = linspace(-15.0, 15.0, 3001)
            .into_iter()
            .map(|x| [x, kde.evaluate(x)])
            .collect();
        assert!((trapezoid(&wide) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn constant_sample_has_no_estimate() {
        let values = [2.5; 10];
        assert!(GaussianKde::new(&values, BandwidthRule::Scott).is_none());
        assert!(estimate_density(&values, DEFAULT_GRID_SIZE, BandwidthRule::Scott).is_none());
    }

    #[test]
    fn linspace_matches_endpoints() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn estimates_are_deterministic() {
        let values: Vec<f64> = (0..64).map(|i| (i as f64 * 0.7).sin() * 3.0).collect();
        let a = estimate_density(&values, DEFAULT_GRID_SIZE, BandwidthRule::Scott);
        let b = estimate_density(&values, DEFAULT_GRID_SIZE, BandwidthRule::Scott);
        assert_eq!(a, b);
    }
}
