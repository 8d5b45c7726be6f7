use crate::api::{
    Axes, Figure, GridLines, GridSlot, GridSpec, LegendSpec, LineSpec, ScatterSpec, TextSpec,
};
use crate::core::ScaleKind;
use crate::core::profiles::{
    CostCurve, GLADSTONE_DALE_AIR, amplification, angular_resolution, detection_threshold,
    tradeoff_resolution,
};
use crate::core::sampling::{linspace, logspace, map_samples};
use crate::error::FigureResult;
use crate::render::colors::{BLACK, BLUE, RED};
use crate::render::{Color, LineStrokeStyle, MarkerShape, Palette, TextVAlign};

use super::FigureContext;
use super::styles;

const LAYER_COUNTS: [u32; 4] = [5, 10, 20, 50];

/// Model name and how much its packing inflates the resolvable angle.
const RESOLUTION_MODELS: [(&str, f64); 3] = [
    ("Insect (High Efficiency)", 1.0),
    ("Bird (Intermediate)", 1.2),
    ("Amphibian (Lower Efficiency)", 1.5),
];

/// Model name, relative sensitivity, energy cost curve and optimal performance.
const OPERATING_POINTS: [(&str, f64, CostCurve, f64); 3] = [
    ("Insect", 4.0, CostCurve::new(0.1, 1.5), 60.0),
    ("Amphibian", 8.0, CostCurve::new(0.05, 1.2), 80.0),
    ("Bird", 6.0, CostCurve::new(0.08, 1.3), 70.0),
];

pub(super) fn model_validation(_context: &FigureContext) -> FigureResult<Figure> {
    let mut figure = Figure::new(15.0, 11.0)
        .with_style(styles::whitegrid_husl())
        .with_grid(GridSpec::new(3, 2).with_spacing(0.45, 0.3))
        .with_title(
            "Figure 3: Mathematical Model Validation and Sensitivity Analysis",
            Some(14.0),
        );
    let model_colors = Palette::Set2.colors(OPERATING_POINTS.len());

    amplification_panel(figure.add_subplot(GridSlot::cell(0, 0)));
    threshold_panel(figure.add_subplot(GridSlot::cell(0, 1)));
    resolution_panel(figure.add_subplot(GridSlot::cell(1, 0)));
    tradeoff_panel(figure.add_subplot(GridSlot::cell(1, 1)), &model_colors);
    let bottom_row = GridSlot::span(2, 0, 1, 2);
    cost_panel(figure.add_subplot(bottom_row), &model_colors);
    Ok(figure)
}

fn amplification_panel(ax: &mut Axes) {
    let path_lengths = linspace(0.1, 5.0, 50);
    let colors = Palette::Viridis.colors(LAYER_COUNTS.len());
    for (layers, color) in LAYER_COUNTS.iter().zip(colors) {
        let gain = map_samples(&path_lengths, |l| amplification(l, f64::from(*layers)));
        ax.plot(
            &path_lengths,
            &gain,
            LineSpec::solid(color)
                .width(2.0)
                .label(format!("{layers} layers")),
        );
    }
    ax.set_xlabel("Path Length (L, mm)")
        .set_ylabel("Amplification Factor (A)")
        .set_title("A) Amplification vs. Path Length & Layers")
        .legend(LegendSpec::new().title("# Layers"))
        .set_xlim(0.0, 5.0)
        .set_y_bounds(Some(0.0), None);
}

fn threshold_panel(ax: &mut Axes) {
    let (fixed_gain, fixed_path_m) = (50.0, 2.0 / 1000.0);
    let angles = logspace(-7.0, -4.0, 50);
    let micro_rad: Vec<f64> = angles.iter().map(|a| a * 1.0e6).collect();
    let grams_per_m3 = map_samples(&angles, |a| {
        detection_threshold(a, GLADSTONE_DALE_AIR, fixed_gain, fixed_path_m) * 1000.0
    });
    ax.plot(&micro_rad, &grams_per_m3, LineSpec::solid(BLUE).width(2.0))
        .set_xscale(ScaleKind::Log10)
        .set_yscale(ScaleKind::Log10)
        .set_xlabel("Min. Detectable Angle (Δθ_min, μrad)")
        .set_ylabel("Min. Detectable Density Change (Δρ_min, g/m³)")
        .set_title("B) Detection Threshold vs. Sensor Sensitivity")
        .grid_with(
            GridLines::on()
                .style(LineStrokeStyle::Dotted)
                .alpha(0.7)
                .with_minor(),
        );
}

fn resolution_panel(ax: &mut Axes) {
    let densities = linspace(10.0, 1000.0, 100);
    let mut coarsest = 0.0_f64;
    for (label, inefficiency) in RESOLUTION_MODELS {
        let resolution = map_samples(&densities, |d| angular_resolution(d, inefficiency));
        coarsest = resolution.iter().copied().fold(coarsest, f64::max);
        let line = LineSpec::new().width(2.0).label(label);
        ax.plot(&densities, &resolution, line);
    }
    ax.set_xlabel("Sensing Unit Density (units/mm²)")
        .set_ylabel("Angular Resolution (degrees)")
        .set_title("C) Spatial Resolution vs. Unit Density")
        .legend(LegendSpec::new())
        .set_xlim(10.0, 1000.0)
        .set_ylim(0.0, coarsest * 1.1);
}

fn tradeoff_panel(ax: &mut Axes, model_colors: &[Color]) {
    let sensitivity = linspace(1.0, 10.0, 100);
    let frontier = map_samples(&sensitivity, tradeoff_resolution);
    let worst = frontier.iter().copied().fold(0.0, f64::max);
    ax.plot(
        &sensitivity,
        &frontier,
        LineSpec::solid(RED)
            .width(2.5)
            .label("Sensitivity-Resolution Frontier"),
    );
    for ((name, relative, _, _), color) in OPERATING_POINTS.iter().zip(model_colors) {
        let resolution = tradeoff_resolution(*relative);
        ax.scatter(
            &[*relative],
            &[resolution],
            ScatterSpec::new()
                .color(*color)
                .size(150.0)
                .edge(BLACK)
                .label(*name),
        )
        .text(
            *relative,
            resolution + 0.2,
            *name,
            TextSpec::centered().v_align(TextVAlign::Bottom).size(9.0),
        );
    }
    ax.set_xlabel("Relative Sensitivity (Arbitrary Units)")
        .set_ylabel("Angular Resolution (degrees)")
        .set_title("D) Sensitivity-Resolution Trade-off")
        .legend(LegendSpec::new())
        .set_ylim(0.0, worst * 1.1)
        .set_xlim(0.0, 11.0);
}

fn cost_panel(ax: &mut Axes, model_colors: &[Color]) {
    let performance = linspace(0.0, 100.0, 100);
    for ((name, _, curve, _), color) in OPERATING_POINTS.iter().zip(model_colors) {
        let cost = map_samples(&performance, |p| curve.cost(p));
        ax.plot(
            &performance,
            &cost,
            LineSpec::solid(*color)
                .width(2.0)
                .label(format!("{name} Model")),
        );
    }
    for ((name, _, curve, optimum), color) in OPERATING_POINTS.iter().zip(model_colors) {
        ax.scatter(
            &[*optimum],
            &[curve.cost(*optimum)],
            ScatterSpec::new()
                .color(*color)
                .size(100.0)
                .marker(MarkerShape::Star)
                .edge(BLACK)
                .label(format!("Optimal {name}")),
        );
    }
    ax.set_xlabel("System Performance (Arbitrary Units %)")
        .set_ylabel("Relative Energy Cost (Arbitrary Units)")
        .set_title("E) Cost vs. Performance Analysis")
        .legend(LegendSpec::new().columns(2))
        .set_xlim(0.0, 100.0)
        .set_y_bounds(Some(0.0), None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Artist;

    #[test]
    fn cost_panel_spans_the_bottom_row() {
        let figure = model_validation(&FigureContext::default()).unwrap();
        assert_eq!(figure.axes().len(), 5);
        let bottom = figure.axes()[4].slot();
        assert_eq!((bottom.row, bottom.col_span), (2, 2));
        assert_eq!(figure.axes()[4].legend_spec().unwrap().columns, 2);
    }

    #[test]
    fn amplification_legend_counts_layers() {
        let figure = model_validation(&FigureContext::default()).unwrap();
        let labels: Vec<_> = figure.axes()[0]
            .artists()
            .iter()
            .filter_map(Artist::label)
            .collect();
        assert_eq!(
            labels,
            vec!["5 layers", "10 layers", "20 layers", "50 layers"]
        );
    }
}
