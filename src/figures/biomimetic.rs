use crate::api::{
    ArrowSpec, Aspect, Axes, Figure, GridAxis, GridLines, GridSlot, GridSpec, LegendLocation,
    LegendSpec, LineSpec, PatchShape, PatchStyle, ScatterSpec, TextSpec,
};
use crate::core::ScaleKind;
use crate::core::profiles::hill_response;
use crate::core::sampling::{linspace, logspace, map_samples};
use crate::error::FigureResult;
use crate::render::colors::{
    BLACK, BLUE, DARKGREEN, DARKRED, GREEN, LIGHTBLUE, LIGHTGRAY, LIGHTGREEN, ORANGE, RED,
    SALMON, SKYBLUE, YELLOW,
};
use crate::render::{Colormap, ColormapKind, LineStrokeStyle, MarkerShape, TextHAlign, TextVAlign};

use super::FigureContext;
use super::styles;

const SCHEMATIC_TEXT_PT: f64 = 8.0;

/// Observer name, half-saturation gradient and Hill coefficient.
const RESPONSE_MODELS: [(&str, f64, f64); 3] = [
    ("Insect Model", 0.1, 1.5),
    ("Amphibian Model", 0.03, 2.0),
    ("Bird Model", 0.06, 1.8),
];

const EVOLUTION_STAGES: [(&str, f64); 5] = [
    ("Basic\nMechanoreception", 0.1),
    ("Fluid Structure\nSensitivity", 0.3),
    ("Optical Amplification\nMechanisms", 0.4),
    ("Spatial\nResolution", 0.7),
    ("Integrated Schlieren\nVision", 0.9),
];

pub(super) fn biomimetic_strategies(_context: &FigureContext) -> FigureResult<Figure> {
    let mut figure = Figure::new(14.0, 8.0)
        .with_style(styles::whitegrid_viridis())
        .with_grid(GridSpec::new(2, 3).with_spacing(0.4, 0.3))
        .with_title(
            "Figure 5: Biomimetic Implementation Strategies and Evolution",
            Some(14.0),
        );

    layered_ommatidium(figure.add_subplot(GridSlot::cell(0, 0)));
    fluid_chamber(figure.add_subplot(GridSlot::cell(0, 1)));
    pecten_folds(figure.add_subplot(GridSlot::cell(0, 2)));
    sensitivity_models(figure.add_subplot(GridSlot::span(1, 0, 1, 2)));
    evolution_stages(figure.add_subplot(GridSlot::cell(1, 2)));
    Ok(figure)
}

fn schematic_text() -> TextSpec {
    TextSpec::middle().size(SCHEMATIC_TEXT_PT)
}

fn layered_ommatidium(ax: &mut Axes) {
    ax.add_patch(
        PatchShape::rect((-0.25, -2.0), 0.5, 2.0),
        PatchStyle::filled(LIGHTGRAY).edge(BLACK).line_width(1.5),
    );
    ax.add_patch(
        PatchShape::ellipse((0.0, 0.1), 0.6, 0.4),
        PatchStyle::filled(LIGHTBLUE).edge(BLACK).alpha(0.7),
    );
    ax.text(0.0, 0.1, "Cornea", schematic_text());

    for layer in 0..5 {
        let y = -0.2 - f64::from(layer) * 0.3;
        ax.axhline_between(y, 0.375, 0.625, LineSpec::solid(BLUE).width(1.5).alpha(0.7));
    }
    ax.text(0.4, -1.0, "Layered\nChitin", schematic_text().color(BLUE));

    let light = ArrowSpec::head(0.05, 0.1).including_head().colored(RED);
    for (x, dx) in [(0.0, 0.0), (-0.1, 0.05), (0.1, -0.05)] {
        let style = light.style.clone().alpha(0.6);
        ax.arrow(x, 0.4, dx, -0.5, light.clone().with_style(style));
    }
    ax.text(
        0.0,
        0.5,
        "Light",
        TextSpec::centered()
            .v_align(TextVAlign::Top)
            .size(SCHEMATIC_TEXT_PT)
            .color(RED),
    );

    ax.add_patch(
        PatchShape::rect((-0.2, -2.2), 0.4, 0.2),
        PatchStyle::filled(LIGHTGREEN)
            .edge(GREEN)
            .line_width(1.0)
            .alpha(0.7),
    );
    ax.text(
        0.0,
        -2.1,
        "Mechanoreceptors",
        schematic_text().color(DARKGREEN),
    );

    ax.set_xlim(-0.7, 0.7)
        .set_ylim(-2.5, 0.7)
        .set_title("A) Layered Ommatidium Design")
        .set_xlabel("Schematic View")
        .hide_xticks()
        .hide_yticks()
        .set_aspect(Aspect::EqualDatalim);
}

fn fluid_chamber(ax: &mut Axes) {
    let xs = linspace(-1.0, 1.0, 100);
    let top = map_samples(&xs, |x| 0.1 * (std::f64::consts::PI * x).sin() + 0.2);
    let bottom = map_samples(&xs, |x| -0.1 * (std::f64::consts::PI * x).sin() - 0.2);
    ax.plot(&xs, &top, LineSpec::solid(BLACK).width(1.5))
        .plot(&xs, &bottom, LineSpec::solid(BLACK).width(1.5))
        .fill_between(
            &xs,
            &bottom,
            &top,
            PatchStyle::filled(SKYBLUE)
                .alpha(0.4)
                .label("Fluid Chamber"),
        );

    let sensors = linspace(-0.7, 0.7, 5);
    ax.scatter(
        &sensors,
        &vec![-0.25; sensors.len()],
        ScatterSpec::new()
            .color(RED)
            .size(40.0)
            .marker(MarkerShape::Square)
            .label("Pressure Sensors"),
    );

    let head = ArrowSpec::head(0.05, 0.1).including_head();
    ax.arrow(
        0.0,
        0.6,
        0.0,
        -0.3,
        head.clone()
            .with_style(PatchStyle::filled(YELLOW).edge(BLACK).line_width(1.0)),
    );
    ax.arrow(
        0.0,
        0.3,
        0.15,
        -0.2,
        head.with_style(
            PatchStyle::filled(ORANGE)
                .edge(BLACK)
                .line_width(1.0)
                .dashed()
                .label("Bent Light"),
        ),
    );
    ax.text(
        0.0,
        0.7,
        "Incident Light",
        TextSpec::centered()
            .v_align(TextVAlign::Bottom)
            .size(SCHEMATIC_TEXT_PT),
    );

    ax.set_xlim(-1.2, 1.2)
        .set_ylim(-0.7, 0.8)
        .set_title("B) Fluid Chamber Interface")
        .set_xlabel("Schematic View")
        .legend(LegendSpec::at(LegendLocation::LowerCenter).font_size(8.0))
        .hide_xticks()
        .hide_yticks()
        .set_aspect(Aspect::EqualDatalim);
}

fn pecten_folds(ax: &mut Axes) {
    let (fold_base, fold_top, fold_width) = (-0.8, 0.4, 0.3);
    for fold in 0..4 {
        let i = f64::from(fold);
        let start = -0.6 + i * fold_width + 0.05;
        let end = -0.6 + (i + 1.0) * fold_width - 0.05;
        let mid = 0.5 * (start + end);
        ax.add_patch(
            PatchShape::polygon(vec![(start, fold_base), (mid, fold_top), (end, fold_base)]),
            PatchStyle::filled(SALMON).edge(BLACK).alpha(0.6),
        );
        for channel_y in [-0.5, -0.2, 0.1] {
            if channel_y < fold_top {
                ax.plot(
                    &[mid - 0.03, mid + 0.03],
                    &[channel_y, channel_y],
                    LineSpec::dashed(BLUE).width(1.0).alpha(0.8),
                );
            }
        }
        ax.scatter(
            &[mid, mid],
            &[-0.4, -0.1],
            ScatterSpec::new().color(DARKRED).size(15.0),
        );
    }
    ax.text(
        0.0,
        0.6,
        "Pecten Folds\n(Channels Inside)",
        TextSpec::centered()
            .v_align(TextVAlign::Bottom)
            .size(SCHEMATIC_TEXT_PT),
    );
    ax.text(
        0.0,
        -0.9,
        "Mechanoreceptors",
        TextSpec::centered()
            .v_align(TextVAlign::Top)
            .size(SCHEMATIC_TEXT_PT)
            .color(DARKRED),
    );

    ax.set_xlim(-0.8, 0.8)
        .set_ylim(-1.0, 0.8)
        .set_title("C) Pecten-like Folded Structure")
        .set_xlabel("Schematic View")
        .hide_xticks()
        .hide_yticks()
        .set_aspect(Aspect::EqualDatalim);
}

fn sensitivity_models(ax: &mut Axes) {
    let gradients = logspace(-3.0, 1.0, 100);
    for (label, k_half, n_hill) in RESPONSE_MODELS {
        let response = map_samples(&gradients, |g| hill_response(g, k_half, n_hill));
        let line = LineSpec::new().width(2.5).label(label);
        ax.plot(&gradients, &response, line);
    }
    ax.set_xscale(ScaleKind::Log10)
        .set_xlabel("Density Gradient Magnitude (Arbitrary Units)")
        .set_ylabel("Normalized Sensory Response")
        .set_title("D) Modeled Sensitivity Profiles")
        .legend(LegendSpec::new())
        .set_ylim(0.0, 1.05)
        .grid_with(
            GridLines::on()
                .style(LineStrokeStyle::Solid)
                .alpha(0.2)
                .with_minor(),
        );
}

fn evolution_stages(ax: &mut Axes) {
    let colormap = Colormap::new(ColormapKind::Coolwarm).reversed();
    let positions: Vec<f64> = (0..EVOLUTION_STAGES.len()).map(|i| i as f64).collect();
    let values: Vec<f64> = EVOLUTION_STAGES.iter().map(|(_, value)| *value).collect();
    let labels: Vec<&str> = EVOLUTION_STAGES.iter().map(|(label, _)| *label).collect();
    let colors = values
        .iter()
        .map(|value| colormap.sample(value / 0.9))
        .collect();

    let edged = PatchStyle::new().edge(BLACK);
    ax.barh(&positions, &values, 0.8, colors, edged);
    for (position, value) in positions.iter().zip(&values) {
        ax.text(
            value + 0.01,
            *position,
            format!("{value:.2}"),
            TextSpec::new()
                .align(TextHAlign::Left)
                .v_align(TextVAlign::Center)
                .size(SCHEMATIC_TEXT_PT),
        );
    }
    ax.set_yticklabels(&positions, &labels)
        .set_xlabel("Evolutionary Novelty/Complexity (Arbitrary Scale)")
        .set_title("E) Conceptual Evolutionary Trajectory")
        .set_xlim(0.0, 1.0)
        .invert_yaxis()
        .grid_with(
            GridLines::on()
                .axis(GridAxis::X)
                .style(LineStrokeStyle::Dashed)
                .alpha(0.3),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Artist;

    #[test]
    fn builds_five_panels_with_a_log_response_axis() {
        let figure = biomimetic_strategies(&FigureContext::default()).unwrap();
        assert_eq!(figure.axes().len(), 5);
        assert_eq!(figure.axes()[3].x_axis().scale, ScaleKind::Log10);
        let labelled: Vec<_> = figure.axes()[3]
            .artists()
            .iter()
            .filter_map(Artist::label)
            .collect();
        assert_eq!(
            labelled,
            vec!["Insect Model", "Amphibian Model", "Bird Model"]
        );
    }

    #[test]
    fn fluid_chamber_legend_keeps_insertion_order() {
        let figure = biomimetic_strategies(&FigureContext::default()).unwrap();
        let labels: Vec<_> = figure.axes()[1]
            .artists()
            .iter()
            .filter_map(Artist::label)
            .collect();
        assert_eq!(
            labels,
            vec!["Fluid Chamber", "Pressure Sensors", "Bent Light"]
        );
    }
}
