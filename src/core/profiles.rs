//! Closed-form curves drawn by the catalog figures.
//!
//! Every function is scalar; figures map them over sampled axes with
//! `sampling::map_samples`.

/// Hill-type saturating response `x^n / (k^n + x^n)`.
#[must_use]
pub fn hill_response(x: f64, k_half: f64, n_hill: f64) -> f64 {
    let xn = x.powf(n_hill);
    xn / (k_half.powf(n_hill) + xn)
}

/// Logistic step falling from `upper` to `lower` around `center`.
///
/// `scale` is the e-folding width of the transition (the manuscript uses a
/// quarter of the layer thickness).
#[must_use]
pub fn logistic_descending(x: f64, upper: f64, lower: f64, center: f64, scale: f64) -> f64 {
    lower + (upper - lower) / (1.0 + ((x - center) / scale).exp())
}

/// Logistic step rising from `lower` to `upper` around `center`.
#[must_use]
pub fn logistic_ascending(x: f64, lower: f64, upper: f64, center: f64, scale: f64) -> f64 {
    lower + (upper - lower) / (1.0 + (-(x - center) / scale).exp())
}

/// Piecewise ocean temperature: mixed layer, power-law thermocline, deep water.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thermocline {
    pub surface_temp_c: f64,
    pub deep_temp_c: f64,
    pub start_depth_m: f64,
    pub end_depth_m: f64,
    pub exponent: f64,
}

impl Default for Thermocline {
    fn default() -> Self {
        Self {
            surface_temp_c: 25.0,
            deep_temp_c: 4.0,
            start_depth_m: 50.0,
            end_depth_m: 250.0,
            exponent: 0.8,
        }
    }
}

impl Thermocline {
    #[must_use]
    pub fn temperature_at(&self, depth_m: f64) -> f64 {
        if depth_m < self.start_depth_m {
            self.surface_temp_c
        } else if depth_m <= self.end_depth_m {
            let fraction =
                (depth_m - self.start_depth_m) / (self.end_depth_m - self.start_depth_m);
            self.surface_temp_c
                - (self.surface_temp_c - self.deep_temp_c) * fraction.powf(self.exponent)
        } else {
            self.deep_temp_c
        }
    }
}

/// Convective boundary layer: standard lapse rate up to the mixing height,
/// a gentler stable gradient above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryLayer {
    pub surface_temp_c: f64,
    pub lapse_rate_c_per_m: f64,
    pub mixing_height_m: f64,
    pub stable_rate_c_per_m: f64,
}

impl Default for BoundaryLayer {
    fn default() -> Self {
        Self {
            surface_temp_c: 20.0,
            lapse_rate_c_per_m: 6.5 / 1000.0,
            mixing_height_m: 1000.0,
            stable_rate_c_per_m: 0.002,
        }
    }
}

impl BoundaryLayer {
    #[must_use]
    pub fn temperature_at(&self, height_m: f64) -> f64 {
        if height_m <= self.mixing_height_m {
            self.surface_temp_c - self.lapse_rate_c_per_m * height_m
        } else {
            self.surface_temp_c
                - self.lapse_rate_c_per_m * self.mixing_height_m
                - self.stable_rate_c_per_m * (height_m - self.mixing_height_m)
        }
    }
}

pub const SEA_LEVEL_AIR_DENSITY: f64 = 1.225;
pub const SEA_LEVEL_AIR_TEMP_K: f64 = 273.15 + 15.0;
pub const AIR_SCALE_HEIGHT_M: f64 = 8000.0;

/// Air density from temperature (ideal gas at fixed pressure) with an
/// exponential pressure fall-off.
#[must_use]
pub fn air_density(temp_c: f64, height_m: f64) -> f64 {
    SEA_LEVEL_AIR_DENSITY * (SEA_LEVEL_AIR_TEMP_K / (temp_c + 273.15))
        * (-height_m / AIR_SCALE_HEIGHT_M).exp()
}

pub const AMPLIFICATION_PER_MM_PER_LAYER: f64 = 0.5;

/// Conceptual amplification of a layered optical structure.
#[must_use]
pub fn amplification(path_length_mm: f64, layers: f64) -> f64 {
    path_length_mm * layers * AMPLIFICATION_PER_MM_PER_LAYER
}

/// Gladstone-Dale constant of air in m^3/kg.
pub const GLADSTONE_DALE_AIR: f64 = 2.3e-4;

/// Minimum detectable density change `dtheta / (K * A * L)` in kg/m^3.
#[must_use]
pub fn detection_threshold(
    min_angle_rad: f64,
    gladstone_dale: f64,
    amplification: f64,
    path_length_m: f64,
) -> f64 {
    min_angle_rad / (gladstone_dale * amplification * path_length_m)
}

pub const RESOLUTION_CONSTANT_DEG: f64 = 20.0;

/// Angular resolution of a sensing array with `density` units per mm^2.
///
/// `inefficiency` scales the constant (1.0 insect, 1.2 bird, 1.5 amphibian).
#[must_use]
pub fn angular_resolution(density_per_mm2: f64, inefficiency: f64) -> f64 {
    RESOLUTION_CONSTANT_DEG * inefficiency / density_per_mm2.sqrt()
}

pub const TRADEOFF_BASE_RESOLUTION_DEG: f64 = 0.5;
pub const TRADEOFF_FACTOR: f64 = 10.0;

/// Sensitivity/resolution frontier.
#[must_use]
pub fn tradeoff_resolution(relative_sensitivity: f64) -> f64 {
    TRADEOFF_BASE_RESOLUTION_DEG + TRADEOFF_FACTOR / relative_sensitivity
}

/// Energy cost curve `coefficient * performance^exponent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostCurve {
    pub coefficient: f64,
    pub exponent: f64,
}

impl CostCurve {
    #[must_use]
    pub const fn new(coefficient: f64, exponent: f64) -> Self {
        Self {
            coefficient,
            exponent,
        }
    }

    #[must_use]
    pub fn cost(&self, performance: f64) -> f64 {
        self.coefficient * performance.powf(self.exponent)
    }
}

/// Boundary-layer velocity `u_inf * (1 - exp(-y / delta))`.
#[must_use]
pub fn velocity_profile(height_mm: f64, free_stream: f64, thickness_mm: f64) -> f64 {
    free_stream * (1.0 - (-height_mm / thickness_mm).exp())
}

/// Inverse focal-length sensitivity of a schlieren system, in 1/mm.
#[must_use]
pub fn focal_sensitivity(focal_length_mm: f64) -> f64 {
    1.0 / focal_length_mm
}

/// Knife-edge line profile `0.5 + 0.3 * exp(-x^2) * sin(2x)`.
#[must_use]
pub fn knife_edge_intensity(x: f64) -> f64 {
    0.5 + 0.3 * (-x * x).exp() * (2.0 * x).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hill_response_is_half_at_k() {
        assert_relative_eq!(hill_response(0.1, 0.1, 1.5), 0.5, epsilon = 1e-12);
        assert!(hill_response(10.0, 0.03, 2.0) > 0.99);
    }

    #[test]
    fn logistic_steps_reach_their_plateaus() {
        let warm = logistic_descending(0.0, 28.0, 4.0, 60.0, 2.5);
        let cold = logistic_descending(350.0, 28.0, 4.0, 60.0, 2.5);
        assert_relative_eq!(warm, 28.0, epsilon = 1e-6);
        assert_relative_eq!(cold, 4.0, epsilon = 1e-6);
        assert_relative_eq!(
            logistic_ascending(80.0, 34.0, 35.5, 80.0, 3.75),
            34.75,
            epsilon = 1e-12
        );
    }

    #[test]
    fn thermocline_is_continuous_at_both_edges() {
        let profile = Thermocline::default();
        assert_relative_eq!(profile.temperature_at(50.0), 25.0);
        assert_relative_eq!(profile.temperature_at(250.0), 4.0, epsilon = 1e-12);
        assert_relative_eq!(profile.temperature_at(900.0), 4.0);
    }

    #[test]
    fn boundary_layer_changes_slope_at_mixing_height() {
        let layer = BoundaryLayer::default();
        assert_relative_eq!(layer.temperature_at(1000.0), 13.5, epsilon = 1e-12);
        assert_relative_eq!(layer.temperature_at(2000.0), 11.5, epsilon = 1e-12);
    }

    #[test]
    fn detection_threshold_matches_reference_configuration() {
        // 1 microradian with A = 50 over 2 mm.
        let rho = detection_threshold(1e-6, GLADSTONE_DALE_AIR, 50.0, 2e-3);
        assert_relative_eq!(rho, 1e-6 / (2.3e-4 * 50.0 * 2e-3), max_relative = 1e-12);
    }

    #[test]
    fn air_density_at_sea_level_reference_temperature() {
        assert_relative_eq!(
            air_density(15.0, 0.0),
            SEA_LEVEL_AIR_DENSITY,
            epsilon = 1e-12
        );
    }
}
