use serde::{Deserialize, Serialize};

use super::profiles::{logistic_ascending, logistic_descending};
use super::sampling::{gradient, linspace};
use crate::error::{FigureError, FigureResult};

const RHO_COEFFS: [f64; 6] = [
    9.9983952e+02,
    6.793952e-02,
    -9.095290e-03,
    1.001685e-04,
    -1.120083e-06,
    6.536332e-09,
];
const A_COEFFS: [f64; 5] = [8.24493e-1, -4.0899e-3, 7.6438e-5, -8.2467e-7, 5.3875e-9];
const B_COEFFS: [f64; 3] = [-5.72466e-3, 1.0227e-4, -1.6546e-6];
const C_COEFF: f64 = 4.8314e-4;

/// Horner evaluation with coefficients in ascending power order.
fn polyval_ascending(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Simplified IES-80 seawater density at surface pressure, kg/m^3.
#[must_use]
pub fn seawater_density(salinity_psu: f64, temp_c: f64) -> f64 {
    let pure_water = polyval_ascending(&RHO_COEFFS, temp_c);
    let a = polyval_ascending(&A_COEFFS, temp_c);
    let b = polyval_ascending(&B_COEFFS, temp_c);
    pure_water
        + a * salinity_psu
        + b * salinity_psu.powf(1.5)
        + C_COEFF * salinity_psu * salinity_psu
}

/// Refractive index of seawater at 532 nm.
#[must_use]
pub fn seawater_refractive_index(salinity_psu: f64, temp_c: f64) -> f64 {
    1.33374 + 1.831e-4 * salinity_psu - 2.105e-6 * temp_c - 3.89e-8 * temp_c * temp_c
}

/// Density that grows linearly as water cools below `reference_temp_c`.
#[must_use]
pub fn linear_thermal_density(
    temp_c: f64,
    reference_density: f64,
    expansion: f64,
    reference_temp_c: f64,
) -> f64 {
    reference_density + expansion * (reference_temp_c - temp_c)
}

/// Parameters of a stratified water column with a sharp pycnocline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PycnoclineScenario {
    pub max_depth_m: f64,
    pub samples: usize,
    pub surface_temp_c: f64,
    pub deep_temp_c: f64,
    pub thermocline_center_m: f64,
    pub thermocline_thickness_m: f64,
    pub surface_salinity_psu: f64,
    pub deep_salinity_psu: f64,
    pub halocline_center_m: f64,
    pub halocline_thickness_m: f64,
}

impl Default for PycnoclineScenario {
    fn default() -> Self {
        Self {
            max_depth_m: 350.0,
            samples: 350,
            surface_temp_c: 28.0,
            deep_temp_c: 4.0,
            thermocline_center_m: 60.0,
            thermocline_thickness_m: 10.0,
            surface_salinity_psu: 34.0,
            deep_salinity_psu: 35.5,
            halocline_center_m: 80.0,
            halocline_thickness_m: 15.0,
        }
    }
}

/// Sampled water column and its vertical gradients.
#[derive(Debug, Clone, PartialEq)]
pub struct OceanProfile {
    pub depth_m: Vec<f64>,
    pub temperature_c: Vec<f64>,
    pub salinity_psu: Vec<f64>,
    pub density: Vec<f64>,
    pub refractive_index: Vec<f64>,
    pub density_gradient: Vec<f64>,
    pub index_gradient: Vec<f64>,
}

impl OceanProfile {
    pub fn simulate(scenario: &PycnoclineScenario) -> FigureResult<Self> {
        if scenario.samples < 2 {
            return Err(FigureError::InvalidData(
                "ocean profile needs at least two depth samples".to_owned(),
            ));
        }
        if !(scenario.thermocline_thickness_m > 0.0 && scenario.halocline_thickness_m > 0.0) {
            return Err(FigureError::InvalidData(
                "pycnocline layer thickness must be > 0".to_owned(),
            ));
        }

        let depth_m = linspace(0.0, scenario.max_depth_m, scenario.samples);
        let temperature_c: Vec<f64> = depth_m
            .iter()
            .map(|&d| {
                logistic_descending(
                    d,
                    scenario.surface_temp_c,
                    scenario.deep_temp_c,
                    scenario.thermocline_center_m,
                    scenario.thermocline_thickness_m / 4.0,
                )
            })
            .collect();
        let salinity_psu: Vec<f64> = depth_m
            .iter()
            .map(|&d| {
                logistic_ascending(
                    d,
                    scenario.surface_salinity_psu,
                    scenario.deep_salinity_psu,
                    scenario.halocline_center_m,
                    scenario.halocline_thickness_m / 4.0,
                )
            })
            .collect();

        let density: Vec<f64> = salinity_psu
            .iter()
            .zip(&temperature_c)
            .map(|(&s, &t)| seawater_density(s, t))
            .collect();
        let refractive_index: Vec<f64> = salinity_psu
            .iter()
            .zip(&temperature_c)
            .map(|(&s, &t)| seawater_refractive_index(s, t))
            .collect();

        let dz = (depth_m[1] - depth_m[0]).abs();
        let density_gradient = gradient(&density, dz)?.into_iter().map(f64::abs).collect();
        let index_gradient = gradient(&refractive_index, dz)?
            .into_iter()
            .map(f64::abs)
            .collect();

        Ok(Self {
            depth_m,
            temperature_c,
            salinity_psu,
            density,
            refractive_index,
            density_gradient,
            index_gradient,
        })
    }

    /// Depths as plotted: negative downwards.
    #[must_use]
    pub fn elevation_m(&self) -> Vec<f64> {
        self.depth_m.iter().map(|d| -d).collect()
    }

    #[must_use]
    pub fn max_index_gradient(&self) -> f64 {
        self.index_gradient.iter().copied().fold(0.0_f64, f64::max)
    }

    /// Samples whose `|dn/dz|` reaches each observer's threshold.
    #[must_use]
    pub fn detection_counts(&self, observers: &[ObserverThreshold]) -> Vec<DetectionCount> {
        observers
            .iter()
            .map(|observer| DetectionCount {
                observer: observer.name,
                threshold: observer.threshold_per_m,
                detected_samples: self
                    .index_gradient
                    .iter()
                    .filter(|&&g| g >= observer.threshold_per_m)
                    .count(),
            })
            .collect()
    }
}

/// Hypothetical `|dn/dz|` detection threshold of one biomimetic model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObserverThreshold {
    pub name: &'static str,
    pub threshold_per_m: f64,
}

pub const AMPHIBIAN_THRESHOLD: ObserverThreshold = ObserverThreshold {
    name: "Amphibian",
    threshold_per_m: 1.0e-5,
};
pub const BIRD_THRESHOLD: ObserverThreshold = ObserverThreshold {
    name: "Bird",
    threshold_per_m: 3.0e-5,
};
pub const INSECT_THRESHOLD: ObserverThreshold = ObserverThreshold {
    name: "Insect",
    threshold_per_m: 8.0e-5,
};

pub const OBSERVER_THRESHOLDS: [ObserverThreshold; 3] =
    [AMPHIBIAN_THRESHOLD, BIRD_THRESHOLD, INSECT_THRESHOLD];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectionCount {
    pub observer: &'static str,
    pub threshold: f64,
    pub detected_samples: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pure_water_density_at_four_degrees() {
        assert_relative_eq!(seawater_density(0.0, 4.0), 999.975, epsilon = 1e-2);
    }

    #[test]
    fn standard_seawater_density() {
        // S = 35, T = 15 -> about 1025.97 kg/m^3 at the surface.
        assert_relative_eq!(seawater_density(35.0, 15.0), 1025.97, epsilon = 0.05);
    }

    #[test]
    fn refractive_index_baseline() {
        assert_relative_eq!(seawater_refractive_index(0.0, 0.0), 1.33374);
        assert!(seawater_refractive_index(35.0, 4.0) > seawater_refractive_index(34.0, 28.0));
    }

    #[test]
    fn linear_thermal_density_grows_as_water_cools() {
        assert_relative_eq!(linear_thermal_density(25.0, 1020.0, 0.2, 25.0), 1020.0);
        assert_relative_eq!(
            linear_thermal_density(4.0, 1020.0, 0.2, 25.0),
            1024.2,
            epsilon = 1e-9
        );
    }
}
