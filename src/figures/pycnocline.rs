use tracing::info;

use crate::api::{
    Axes, Figure, GridLines, GridSlot, GridSpec, LegendLocation, LegendSpec, LineSpec, PatchStyle,
    TextBoxSpec, TextSpec, TickFormat, format_scientific,
};
use crate::core::ScaleKind;
use crate::core::seawater::{OBSERVER_THRESHOLDS, ObserverThreshold};
use crate::core::{OceanProfile, PycnoclineScenario};
use crate::error::FigureResult;
use crate::render::colors::{
    BLACK, BLUE, CRIMSON, DARKORANGE, DARKVIOLET, DEEPSKYBLUE, FORESTGREEN, GREEN, RED, STEELBLUE,
    WHITE,
};
use crate::render::{Color, LineStrokeStyle, TextHAlign, TextVAlign};

use super::FigureContext;
use super::styles;

const SHOWN_DEPTH_M: f64 = 200.0;

pub(super) fn pycnocline_detectability(_context: &FigureContext) -> FigureResult<Figure> {
    let profile = OceanProfile::simulate(&PycnoclineScenario::default())?;
    info!(
        max_index_gradient = profile.max_index_gradient(),
        "simulated water column"
    );
    for count in profile.detection_counts(&OBSERVER_THRESHOLDS) {
        info!(
            observer = count.observer,
            threshold = count.threshold,
            detected_samples = count.detected_samples,
            "pycnocline detection"
        );
    }

    let mut figure = Figure::new(14.0, 10.0)
        .with_style(styles::dotted_grid_viridis())
        .with_grid(GridSpec::new(2, 2).with_spacing(0.4, 0.3))
        .with_title(
            "Figure 7: Detectability of Oceanic Pycnoclines by Biomimetic Schlieren Vision",
            Some(16.0),
        );
    let elevation = profile.elevation_m();

    let ax = figure.add_subplot(GridSlot::cell(0, 0));
    paired_profiles(
        ax,
        &elevation,
        (
            &profile.temperature_c,
            "Temperature (°C)",
            "Temperature (°C)",
            CRIMSON,
        ),
        (
            &profile.salinity_psu,
            "Salinity (PSU)",
            "Salinity (PSU)",
            STEELBLUE,
        ),
    );
    ax.set_title("A) Simulated Oceanic Profiles")
        .legend(profile_legend(LegendLocation::CenterRight));
    source_note(
        ax,
        "Profiles simulated to generate strong pycnoclines\n(Illustrative, not from specific Argo float).",
    );

    let ax = figure.add_subplot(GridSlot::cell(0, 1));
    paired_profiles(
        ax,
        &elevation,
        (
            &profile.density,
            "Density (kg/m³)",
            "Density (kg/m³)",
            FORESTGREEN,
        ),
        (
            &profile.refractive_index,
            "Refractive Index",
            "Refractive Index (n)",
            DARKVIOLET,
        ),
    );
    rotate_twin_ticks(ax, TickFormat::Fixed(6));
    ax.set_title("B) Calculated Density & Refractive Index")
        .legend(profile_legend(LegendLocation::CenterRight));
    source_note(
        ax,
        "Density: Simplified IES 80. Refractive Index: Simplified from Shang et al. (2015) for λ=532nm.",
    );

    let ax = figure.add_subplot(GridSlot::cell(1, 0));
    paired_profiles(
        ax,
        &elevation,
        (
            &profile.density_gradient,
            "|∂ρ/∂z| (kg/m⁴)",
            "|∂ρ/∂z| (kg/m⁴)",
            DARKORANGE,
        ),
        (
            &profile.index_gradient,
            "|∂n/∂z| (m⁻¹)",
            "|∂n/∂z| (m⁻¹)",
            DEEPSKYBLUE,
        ),
    );
    rotate_twin_ticks(ax, TickFormat::Scientific(1));
    ax.set_title("C) Vertical Gradients (Pycnoclines)")
        .legend(profile_legend(LegendLocation::UpperRight));

    let ax = figure.add_subplot(GridSlot::cell(1, 1));
    detectability(ax, &profile, &elevation);
    Ok(figure)
}

fn profile_legend(location: LegendLocation) -> LegendSpec {
    LegendSpec::at(location).font_size(8.0).with_twin()
}

/// Two profiles against depth: the first on the bottom axis, the second on a
/// dashed twin axis on top. Each is `(values, legend label, axis label, color)`.
fn paired_profiles(
    ax: &mut Axes,
    elevation: &[f64],
    primary: (&[f64], &str, &str, Color),
    secondary: (&[f64], &str, &str, Color),
) {
    let (values, label, axis_label, color) = primary;
    ax.plot(values, elevation, LineSpec::solid(color).label(label))
        .set_xlabel_colored(axis_label, color)
        .set_ylabel("Depth (m)")
        .set_ylim(-SHOWN_DEPTH_M, 0.0)
        .grid_with(GridLines::on().style(LineStrokeStyle::Dotted).alpha(0.7));
    ax.x_axis_mut().tick_label_color = color;

    let (values, label, axis_label, color) = secondary;
    let twin = ax.twin_x();
    twin.plot(values, elevation, LineSpec::dashed(color).label(label))
        .set_xlabel_colored(axis_label, color);
    twin.x_axis_mut().tick_label_color = color;
}

fn rotate_twin_ticks(ax: &mut Axes, format: TickFormat) {
    let twin = ax.twin_x();
    twin.set_x_tick_format(format);
    twin.x_axis_mut().tick_label_rotation_deg = 30.0;
}

fn source_note(ax: &mut Axes, text: &str) {
    ax.text(
        0.02,
        0.02,
        text,
        TextSpec::new()
            .size(7.0)
            .align(TextHAlign::Left)
            .v_align(TextVAlign::Bottom)
            .boxed(TextBoxSpec::round(WHITE).alpha(0.6))
            .in_axes(),
    );
}

fn observer_color(observer: &ObserverThreshold) -> Color {
    match observer.name {
        "Amphibian" => BLUE,
        "Bird" => GREEN,
        _ => RED,
    }
}

fn detectability(ax: &mut Axes, profile: &OceanProfile, elevation: &[f64]) {
    let gradient = &profile.index_gradient;
    ax.plot(
        gradient,
        elevation,
        LineSpec::solid(BLACK).width(1.5).label("Actual |∂n/∂z|"),
    );
    for observer in &OBSERVER_THRESHOLDS {
        let threshold = format_scientific(observer.threshold_per_m, 1);
        let label = format!("{} Thresh. ({threshold})", observer.name);
        let color = observer_color(observer);
        let line = LineSpec::dotted(color).width(1.5).label(label);
        ax.axvline(observer.threshold_per_m, line);
    }
    for observer in &OBSERVER_THRESHOLDS {
        let mask = gradient
            .iter()
            .map(|&g| g >= observer.threshold_per_m)
            .collect();
        ax.fill_betweenx(
            elevation,
            &[observer.threshold_per_m],
            gradient,
            Some(mask),
            PatchStyle::colored(observer_color(observer))
                .alpha(0.25)
                .label(format!("{} Detects", observer.name)),
        );
    }

    let min_positive = gradient
        .iter()
        .copied()
        .filter(|g| *g > 0.0)
        .fold(f64::INFINITY, f64::min);
    let weakest = OBSERVER_THRESHOLDS
        .iter()
        .map(|observer| observer.threshold_per_m)
        .fold(f64::INFINITY, f64::min);
    let strongest = OBSERVER_THRESHOLDS
        .iter()
        .map(|observer| observer.threshold_per_m)
        .fold(0.0, f64::max);
    let left = min_positive.min(weakest / 10.0).max(1.0e-6);
    let right = (profile.max_index_gradient() * 2.0).max(strongest * 5.0);

    ax.set_xscale(ScaleKind::Log10)
        .set_xlabel("|∂n/∂z| (m⁻¹)")
        .set_ylabel("Depth (m)")
        .set_ylim(-SHOWN_DEPTH_M, 0.0)
        .set_xlim(left, right)
        .set_title("D) Detectability by Schlieren Models")
        .legend(LegendSpec::new().font_size(7.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Artist;

    #[test]
    fn profile_panels_carry_twin_axes() {
        let figure = pycnocline_detectability(&FigureContext::default()).unwrap();
        assert_eq!(figure.axes().len(), 4);
        for ax in &figure.axes()[..3] {
            let twin = ax.twin().unwrap();
            assert_eq!(twin.artists().len(), 1);
            assert!(ax.legend_spec().unwrap().include_twin);
        }
        assert!(figure.axes()[3].twin().is_none());
    }

    #[test]
    fn detectability_panel_lists_curve_thresholds_then_fills() {
        let figure = pycnocline_detectability(&FigureContext::default()).unwrap();
        let labels: Vec<_> = figure.axes()[3]
            .artists()
            .iter()
            .filter_map(Artist::label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "Actual |∂n/∂z|",
                "Amphibian Thresh. (1.0e-05)",
                "Bird Thresh. (3.0e-05)",
                "Insect Thresh. (8.0e-05)",
                "Amphibian Detects",
                "Bird Detects",
                "Insect Detects",
            ]
        );
    }
}
