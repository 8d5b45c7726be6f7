use proptest::prelude::*;
use schlieren_figures::api::{log_decade_ticks, nice_linear_ticks};
use schlieren_figures::core::sampling::linspace;
use schlieren_figures::core::{AxisScale, LinearScale, LogScale, PixelSpan, ScaleKind};

proptest! {
    #[test]
    fn linear_scale_round_trip_property(
        domain_start in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let domain_end = domain_start + domain_span;
        let value = domain_start + value_factor * domain_span;

        let span = PixelSpan::new(40.0, 2000.0);
        let scale = LinearScale::new(domain_start, domain_end).expect("valid scale");

        let px = scale.domain_to_pixel(value, span).expect("to pixel");
        let recovered = scale.pixel_to_domain(px, span).expect("from pixel");

        prop_assert!((recovered - value).abs() <= 1e-7);
        prop_assert!((40.0 - 1e-6..=2000.0 + 1e-6).contains(&px));
    }

    #[test]
    fn log_scale_round_trip_property(
        start_exp in -6.0f64..3.0,
        decades in 0.5f64..8.0,
        value_factor in 0.0f64..1.0
    ) {
        let domain_start = 10_f64.powf(start_exp);
        let domain_end = 10_f64.powf(start_exp + decades);
        let value = 10_f64.powf(start_exp + value_factor * decades);

        // Inverted span, the way a y axis maps.
        let span = PixelSpan::new(900.0, 60.0);
        let scale = LogScale::new(domain_start, domain_end).expect("valid scale");

        let px = scale.domain_to_pixel(value, span).expect("to pixel");
        let recovered = scale.pixel_to_domain(px, span).expect("from pixel");

        prop_assert!(((recovered - value) / value).abs() <= 1e-9);
    }

    #[test]
    fn nice_linear_ticks_stay_inside_the_range(
        min in -10_000.0f64..10_000.0,
        span in 0.01f64..10_000.0,
        max_bins in 4usize..12
    ) {
        let max = min + span;
        let ticks = nice_linear_ticks(min, max, max_bins);

        prop_assert!(ticks.len() >= 2);
        prop_assert!(ticks.len() <= max_bins + 2);
        let tolerance = span * 1e-6;
        for pair in ticks.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for tick in &ticks {
            prop_assert!(*tick >= min - tolerance && *tick <= max + tolerance);
        }
    }

    #[test]
    fn log_ticks_are_positive_and_ascending(
        start_exp in -8.0f64..2.0,
        decades in 0.2f64..10.0
    ) {
        let min = 10_f64.powf(start_exp);
        let max = 10_f64.powf(start_exp + decades);
        let ticks = log_decade_ticks(min, max, 6);

        for pair in ticks.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for tick in &ticks {
            prop_assert!(*tick > 0.0);
            prop_assert!(*tick >= min * (1.0 - 1e-9) && *tick <= max * (1.0 + 1e-9));
        }
    }

    #[test]
    fn linspace_is_monotonic_with_exact_ends(
        start in -1_000.0f64..1_000.0,
        span in 0.001f64..1_000.0,
        n in 2usize..500
    ) {
        let xs = linspace(start, start + span, n);
        prop_assert_eq!(xs.len(), n);
        prop_assert_eq!(xs[0], start);
        prop_assert_eq!(xs[n - 1], start + span);
        for pair in xs.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }
}

#[test]
fn axis_scale_dispatches_on_kind() {
    let span = PixelSpan::new(0.0, 100.0);
    let log = AxisScale::new(ScaleKind::Log10, 1.0, 100.0).expect("log");
    let px = log.domain_to_pixel(10.0, span).expect("to pixel");
    assert!((px - 50.0).abs() <= 1e-9);
    assert!(!log.accepts(0.0));

    let linear = AxisScale::new(ScaleKind::Linear, -1.0, 1.0).expect("linear");
    assert!(linear.accepts(-5.0));
    assert_eq!(linear.kind(), ScaleKind::Linear);
}

#[test]
fn log_scale_rejects_non_positive_domain() {
    assert!(LogScale::new(0.0, 10.0).is_err());
    assert!(LinearScale::new(3.0, 3.0).is_err());
}
