use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::error::{FigureError, FigureResult};

/// Seed used when a figure is built without an explicit one.
pub const DEFAULT_NOISE_SEED: u64 = 42;

/// Deterministic random source for the illustrative noise in figures.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: StdRng,
}

impl NoiseSource {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Derives an independent stream for one figure panel.
    #[must_use]
    pub fn fork(&mut self, salt: u64) -> Self {
        let base = self.rng.gen_range(0..u64::MAX);
        Self::seeded(base ^ salt.rotate_left(17))
    }

    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> FigureResult<f64> {
        let normal = normal(mean, std_dev)?;
        Ok(normal.sample(&mut self.rng))
    }

    pub fn gaussian_vec(&mut self, mean: f64, std_dev: f64, n: usize) -> FigureResult<Vec<f64>> {
        let normal = normal(mean, std_dev)?;
        Ok((0..n).map(|_| normal.sample(&mut self.rng)).collect())
    }

    /// Uniform sample in `[low, high)`; returns `low` for an empty interval.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high > low {
            self.rng.gen_range(low..high)
        } else {
            low
        }
    }

    pub fn uniform_vec(&mut self, low: f64, high: f64, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.uniform(low, high)).collect()
    }
}

fn normal(mean: f64, std_dev: f64) -> FigureResult<Normal<f64>> {
    // `Normal::new` accepts a negative deviation and mirrors the samples.
    if !std_dev.is_finite() || std_dev < 0.0 {
        return Err(FigureError::InvalidData(format!(
            "standard deviation must be finite and >= 0, got {std_dev}"
        )));
    }
    Normal::new(mean, std_dev)
        .map_err(|err| FigureError::InvalidData(format!("invalid normal distribution: {err}")))
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::seeded(DEFAULT_NOISE_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::NoiseSource;
    use crate::error::FigureError;

    #[test]
    fn same_seed_same_stream() {
        let mut a = NoiseSource::seeded(7);
        let mut b = NoiseSource::seeded(7);
        assert_eq!(
            a.gaussian_vec(0.0, 1.0, 16).expect("a"),
            b.gaussian_vec(0.0, 1.0, 16).expect("b")
        );
    }

    #[test]
    fn uniform_samples_stay_in_range() {
        let mut noise = NoiseSource::seeded(1);
        assert!(
            noise
                .uniform_vec(-0.02, 0.02, 200)
                .iter()
                .all(|v| (-0.02..0.02).contains(v))
        );
        assert_eq!(noise.uniform(1.0, 1.0), 1.0);
    }

    #[test]
    fn negative_std_dev_is_rejected() {
        let mut noise = NoiseSource::default();
        assert!(matches!(
            noise.gaussian(0.0, -1.0),
            Err(FigureError::InvalidData(_))
        ));
        assert!(matches!(
            noise.gaussian_vec(0.0, -0.05, 4),
            Err(FigureError::InvalidData(_))
        ));
        assert!(noise.gaussian(0.0, f64::NAN).is_err());
        assert_eq!(noise.gaussian(3.0, 0.0).expect("zero deviation"), 3.0);
    }
}
