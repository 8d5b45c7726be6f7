use std::f64::consts::PI;

use super::noise::NoiseSource;
use super::sampling::min_max;
use crate::error::{FigureError, FigureResult};

/// Scalar values sampled on a rectilinear lattice.
///
/// Storage is row-major with row 0 at the smallest `y`, matching an image
/// drawn with its origin at the lower-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    xs: Vec<f64>,
    ys: Vec<f64>,
    values: Vec<f64>,
}

impl ScalarField {
    pub fn sample(xs: Vec<f64>, ys: Vec<f64>, f: impl Fn(f64, f64) -> f64) -> FigureResult<Self> {
        let mut values = Vec::with_capacity(xs.len() * ys.len());
        for &y in &ys {
            for &x in &xs {
                values.push(f(x, y));
            }
        }
        Self::from_values(xs, ys, values)
    }

    pub fn from_values(xs: Vec<f64>, ys: Vec<f64>, values: Vec<f64>) -> FigureResult<Self> {
        if xs.is_empty() || ys.is_empty() {
            return Err(FigureError::InvalidData(
                "scalar field lattice must not be empty".to_owned(),
            ));
        }
        if values.len() != xs.len() * ys.len() {
            return Err(FigureError::InvalidData(format!(
                "scalar field expects {} values, got {}",
                xs.len() * ys.len(),
                values.len()
            )));
        }
        Ok(Self { xs, ys, values })
    }

    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.xs.len()
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.ys.len()
    }

    #[must_use]
    pub fn at(&self, column: usize, row: usize) -> Option<f64> {
        if column >= self.columns() || row >= self.rows() {
            return None;
        }
        self.values.get(row * self.columns() + column).copied()
    }

    #[must_use]
    pub fn min_max(&self) -> Option<(f64, f64)> {
        min_max(&self.values)
    }

    /// `(x_min, x_max, y_min, y_max)` of the lattice.
    #[must_use]
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        let (x0, x1) = min_max(&self.xs).unwrap_or((0.0, 0.0));
        let (y0, y1) = min_max(&self.ys).unwrap_or((0.0, 0.0));
        (x0, x1, y0, y1)
    }

    #[must_use]
    pub fn map(mut self, f: impl Fn(f64) -> f64) -> Self {
        for value in &mut self.values {
            *value = f(*value);
        }
        self
    }

    #[must_use]
    pub fn clamp(self, low: f64, high: f64) -> Self {
        self.map(|value| value.clamp(low, high))
    }

    /// Adds independent Gaussian noise to every sample.
    pub fn with_noise(mut self, noise: &mut NoiseSource, std_dev: f64) -> FigureResult<Self> {
        let samples = noise.gaussian_vec(0.0, std_dev, self.values.len())?;
        for (value, sample) in self.values.iter_mut().zip(samples) {
            *value += sample;
        }
        Ok(self)
    }
}

/// Elliptical Gaussian bump on top of a constant background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianBump {
    pub base: f64,
    pub amplitude: f64,
    pub center: (f64, f64),
    pub sigma: (f64, f64),
}

impl GaussianBump {
    #[must_use]
    pub fn value(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.center.0;
        let dy = y - self.center.1;
        let spread_x = dx * dx / (2.0 * self.sigma.0 * self.sigma.0);
        let spread_y = dy * dy / (2.0 * self.sigma.1 * self.sigma.1);
        self.base + self.amplitude * (-(spread_x + spread_y)).exp()
    }

    pub fn field(&self, xs: Vec<f64>, ys: Vec<f64>) -> FigureResult<ScalarField> {
        ScalarField::sample(xs, ys, |x, y| self.value(x, y))
    }
}

/// Heated-region refractive index, `1.0003 + 0.0002 * exp(-r^2 / 2)` around (5, 4).
pub const HEATED_AIR_INDEX: GaussianBump = GaussianBump {
    base: 1.0003,
    amplitude: 0.0002,
    center: (5.0, 4.0),
    sigma: (1.0, 1.0),
};

/// Excess refractive index of an elongated disturbance centred at (4, 4).
pub const ELONGATED_INDEX_EXCESS: GaussianBump = GaussianBump {
    base: 0.00033,
    amplitude: 0.00015,
    center: (4.0, 4.0),
    sigma: (1.5, 1.0),
};

/// Rising plume: warm lobe below, cool lobe above.
#[must_use]
pub fn plume_dipole(x: f64, y: f64) -> f64 {
    (-(x * x + (y + 2.0).powi(2)) / 4.0).exp() - (-(x * x + (y - 2.0).powi(2)) / 4.0).exp()
}

/// Intensity after a knife edge for a given density gradient.
#[must_use]
pub fn knife_edge_response(density_gradient: f64) -> f64 {
    0.5 + 0.3 * (2.0 * density_gradient).tanh()
}

pub fn flame_field(
    xs: Vec<f64>,
    ys: Vec<f64>,
    noise: &mut NoiseSource,
) -> FigureResult<ScalarField> {
    ScalarField::sample(xs, ys, |x, y| {
        (-x * x / 2.0).exp() * (-(y - 4.0).powi(2) / 8.0).exp() * (1.0 + 0.3 * (5.0 * y).sin())
    })?
    .with_noise(noise, 0.05)
}

/// Two crossing oblique shocks; the descending one wins where they overlap.
#[must_use]
pub fn oblique_shocks(x: f64, y: f64) -> f64 {
    if (y + 0.5 * x).abs() < 0.2 {
        -1.0
    } else if (y - 0.5 * x).abs() < 0.2 {
        1.0
    } else {
        0.0
    }
}

#[must_use]
pub fn thermal_boundary_layer(x: f64, y: f64) -> f64 {
    (-y / 2.0).exp() * (1.0 - (-x / 5.0).exp())
}

#[must_use]
pub fn turbulent_mixing(x: f64, y: f64) -> f64 {
    (2.0 * x + 0.5 * y).sin() * (x - 0.3 * y).cos()
        + 0.5 * (4.0 * x + y).sin() * (2.0 * x - y).cos()
}

/// Meandering current / thermal street used as a navigation backdrop.
#[must_use]
pub fn navigation_features(x: f64, y: f64) -> f64 {
    (x * 0.8).sin() * (y * 0.5).cos() + 0.3 * (y * 1.5).sin() * (x * 0.3).cos()
}

/// Circular disturbance seen through a knife edge, with sensor noise, in `[0, 1]`.
pub fn ripple_image(
    xs: Vec<f64>,
    ys: Vec<f64>,
    noise: &mut NoiseSource,
) -> FigureResult<ScalarField> {
    Ok(ScalarField::sample(xs, ys, |x, y| {
        let r = (x * x + y * y).sqrt();
        0.5 + 0.3 * (-r * r / 4.0).exp() * (2.0 * PI * r / 3.0).cos()
    })?
    .with_noise(noise, 0.05)?
    .clamp(0.0, 1.0))
}

/// Marches a horizontal ray through `field`'s lattice.
///
/// Inside `window` the ray is pulled towards `center_y` by `gain` times its
/// lattice offset per step, using the lattice row the ray currently sits in.
#[must_use]
pub fn trace_ray_through_lattice(
    field: &ScalarField,
    ray_xs: &[f64],
    y_start: f64,
    center_y: f64,
    gain: f64,
    window: (f64, f64),
) -> Vec<f64> {
    let ys = field.ys();
    let (y_min, y_max) = min_max(ys).unwrap_or((0.0, 1.0));
    let rows_per_unit = if y_max > y_min {
        ys.len() as f64 / (y_max - y_min)
    } else {
        1.0
    };

    let mut ray_ys = Vec::with_capacity(ray_xs.len());
    let mut y = y_start;
    for (index, &x) in ray_xs.iter().enumerate() {
        if index > 0 && x > window.0 && x < window.1 {
            let row = ((y - y_min) * rows_per_unit).floor().max(0.0) as usize;
            let lattice_y = ys[row.min(ys.len() - 1)];
            y -= (lattice_y - center_y) * gain;
        }
        ray_ys.push(y);
    }
    ray_ys
}

/// Vertical offset of a ray crossing an elongated Gaussian disturbance.
#[must_use]
pub fn gaussian_ray_offset(bump: &GaussianBump, x: f64, ray_y: f64, peak_offset: f64) -> f64 {
    let dx = x - bump.center.0;
    let dy = ray_y - bump.center.1;
    peak_offset
        * (-(dx * dx) / (2.0 * bump.sigma.0 * bump.sigma.0)).exp()
        * (-(dy * dy) / (2.0 * bump.sigma.1 * bump.sigma.1)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sampling::linspace;
    use approx::assert_relative_eq;

    #[test]
    fn field_rows_start_at_lowest_y() {
        let field =
            ScalarField::sample(vec![0.0, 1.0], vec![10.0, 20.0, 30.0], |x, y| x + y)
                .expect("field");
        assert_eq!(field.at(1, 0), Some(11.0));
        assert_eq!(field.at(0, 2), Some(30.0));
        assert_eq!(field.at(2, 0), None);
    }

    #[test]
    fn field_rejects_mismatched_values() {
        assert!(ScalarField::from_values(vec![0.0, 1.0], vec![0.0], vec![1.0]).is_err());
    }

    #[test]
    fn heated_air_peaks_at_center() {
        assert_relative_eq!(HEATED_AIR_INDEX.value(5.0, 4.0), 1.0005, epsilon = 1e-12);
        assert!(HEATED_AIR_INDEX.value(0.0, 0.0) < 1.00031);
    }

    #[test]
    fn ripple_image_is_clipped() {
        let mut noise = NoiseSource::seeded(3);
        let field = ripple_image(linspace(-5.0, 5.0, 40), linspace(-5.0, 5.0, 40), &mut noise)
            .expect("ripple");
        let (lo, hi) = field.min_max().expect("extent");
        assert!(lo >= 0.0 && hi <= 1.0);
    }

    #[test]
    fn traced_ray_bends_towards_center() {
        let field = HEATED_AIR_INDEX
            .field(linspace(0.0, 10.0, 100), linspace(0.0, 8.0, 80))
            .expect("field");
        let ray_xs = linspace(0.0, 10.0, 50);
        let ray = trace_ray_through_lattice(&field, &ray_xs, 6.0, 4.0, 0.01, (3.0, 7.0));
        assert_eq!(ray.len(), 50);
        assert_eq!(ray[0], 6.0);
        assert!(ray[49] < 6.0);
        let flat = trace_ray_through_lattice(&field, &ray_xs, 4.0, 4.0, 0.01, (3.0, 7.0));
        assert!(flat.iter().all(|y| (y - 4.0).abs() < 0.05));
    }
}
