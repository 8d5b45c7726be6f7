use approx::assert_relative_eq;
use schlieren_figures::core::fields::{
    ELONGATED_INDEX_EXCESS, HEATED_AIR_INDEX, knife_edge_response, plume_dipole,
};
use schlieren_figures::core::profiles::{
    BoundaryLayer, CostCurve, Thermocline, air_density, amplification, angular_resolution,
    detection_threshold, focal_sensitivity, knife_edge_intensity, tradeoff_resolution,
    velocity_profile,
};
use schlieren_figures::core::sampling::{gradient, linspace};
use schlieren_figures::core::{OceanProfile, PycnoclineScenario, ScalarField};

#[test]
fn thermocline_is_piecewise_with_flat_ends() {
    let profile = Thermocline::default();
    assert_relative_eq!(profile.temperature_at(0.0), 25.0);
    assert_relative_eq!(profile.temperature_at(49.9), 25.0);
    assert_relative_eq!(profile.temperature_at(250.0), 4.0, epsilon = 1e-12);
    assert_relative_eq!(profile.temperature_at(400.0), 4.0);

    let middle = profile.temperature_at(150.0);
    assert_relative_eq!(middle, 25.0 - 21.0 * 0.5_f64.powf(0.8), epsilon = 1e-12);
}

#[test]
fn boundary_layer_switches_to_stable_gradient_above_mixing_height() {
    let layer = BoundaryLayer::default();
    assert_relative_eq!(layer.temperature_at(1000.0), 13.5, epsilon = 1e-12);
    assert_relative_eq!(layer.temperature_at(2000.0), 11.5, epsilon = 1e-12);
}

#[test]
fn air_density_matches_standard_atmosphere_at_sea_level() {
    assert_relative_eq!(air_density(15.0, 0.0), 1.225, epsilon = 1e-12);
    assert!(air_density(30.0, 0.0) < air_density(0.0, 0.0));
    assert!(air_density(15.0, 2000.0) < air_density(15.0, 0.0));
}

#[test]
fn validation_model_formulas() {
    assert_relative_eq!(amplification(10.0, 20.0), 100.0);
    let threshold = detection_threshold(1e-4, 2.3e-4, 100.0, 0.01);
    let expected = 1e-4 / (2.3e-4 * 100.0 * 0.01);
    assert_relative_eq!(threshold, expected, max_relative = 1e-12);
    assert_relative_eq!(angular_resolution(100.0, 1.0), 2.0, epsilon = 1e-12);
    assert_relative_eq!(angular_resolution(100.0, 1.5), 3.0, epsilon = 1e-12);
    assert_relative_eq!(tradeoff_resolution(10.0), 1.5, epsilon = 1e-12);
    assert_relative_eq!(CostCurve::new(2.0, 1.5).cost(4.0), 16.0, epsilon = 1e-12);
}

#[test]
fn schlieren_curves() {
    assert_relative_eq!(velocity_profile(0.0, 10.0, 2.0), 0.0);
    assert_relative_eq!(
        velocity_profile(2.0, 10.0, 2.0),
        10.0 * (1.0 - (-1.0_f64).exp()),
        epsilon = 1e-12
    );
    assert_relative_eq!(focal_sensitivity(500.0), 0.002, epsilon = 1e-15);
    assert_relative_eq!(knife_edge_intensity(0.0), 0.5);
    assert!(knife_edge_intensity(0.5) > 0.5);
    assert!(knife_edge_intensity(-0.5) < 0.5);
}

#[test]
fn gaussian_bumps_peak_at_their_centre() {
    let (cx, cy) = HEATED_AIR_INDEX.center;
    assert_relative_eq!(HEATED_AIR_INDEX.value(cx, cy), 1.0005, epsilon = 1e-12);
    assert!(HEATED_AIR_INDEX.value(cx + 1.0, cy) < 1.0005);

    let field = ELONGATED_INDEX_EXCESS
        .field(linspace(0.0, 10.0, 100), linspace(0.0, 8.0, 80))
        .expect("field");
    assert_eq!(field.columns(), 100);
    assert_eq!(field.rows(), 80);
    let (min, max) = field.min_max().expect("extent");
    assert!(min >= 0.0);
    assert!(max > min);
}

#[test]
fn plume_dipole_flips_sign_across_the_midline() {
    assert_relative_eq!(
        plume_dipole(0.4, -1.5),
        -plume_dipole(0.4, 1.5),
        epsilon = 1e-12
    );
    assert!(plume_dipole(0.0, -2.0) > 0.0);

    let warm = knife_edge_response(plume_dipole(0.0, -2.0));
    let cool = knife_edge_response(plume_dipole(0.0, 2.0));
    assert!(warm > 0.5 && cool < 0.5);
    assert_relative_eq!(warm + cool, 1.0, epsilon = 1e-12);
}

#[test]
fn scalar_field_rejects_mismatched_values() {
    let err = ScalarField::from_values(vec![0.0, 1.0], vec![0.0, 1.0], vec![1.0; 3]);
    assert!(err.is_err());
}

#[test]
fn ocean_profile_gradients_peak_inside_the_pycnocline() {
    let scenario = PycnoclineScenario::default();
    let profile = OceanProfile::simulate(&scenario).expect("profile");
    assert_eq!(profile.depth_m.len(), scenario.samples);
    assert!(profile.density.first() < profile.density.last());

    let (peak_index, _) = profile
        .density_gradient
        .iter()
        .enumerate()
        .fold((0, f64::MIN), |best, (index, &value)| {
            if value > best.1 { (index, value) } else { best }
        });
    let peak_depth = profile.depth_m[peak_index];
    assert!(
        (40.0..=100.0).contains(&peak_depth),
        "peak at {peak_depth} m"
    );

    let recomputed = gradient(&profile.refractive_index, profile.depth_m[1]).expect("gradient");
    for (stored, raw) in profile.index_gradient.iter().zip(&recomputed) {
        assert_relative_eq!(*stored, raw.abs(), epsilon = 1e-15);
    }
}

#[test]
fn ocean_profile_rejects_degenerate_scenarios() {
    let scenario = PycnoclineScenario {
        samples: 1,
        ..PycnoclineScenario::default()
    };
    assert!(OceanProfile::simulate(&scenario).is_err());

    let scenario = PycnoclineScenario {
        halocline_thickness_m: 0.0,
        ..PycnoclineScenario::default()
    };
    assert!(OceanProfile::simulate(&scenario).is_err());
}
