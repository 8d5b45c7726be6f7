use std::f64::consts::PI;

use crate::api::{
    ArrowSpec, Axes, Figure, GridSlot, GridSpec, LineSpec, PatchShape, PatchStyle, ScatterSpec,
    TextSpec,
};
use crate::core::sampling::{linspace, map_samples};
use crate::error::FigureResult;
use crate::render::Color;
use crate::render::colors::{
    BLACK, BLUE, GRAY, GREEN, LIGHTBLUE, LIGHTCYAN, LIGHTGRAY, LIGHTGREEN, LIGHTYELLOW, NAVY, RED,
    WHITE, YELLOW,
};
use crate::render::{TextHAlign, TextVAlign};

use super::FigureContext;
use super::styles;

const PATTERN_DOT_SALT: u64 = 7;

const BENCH_COMPONENTS: [Component; 6] = [
    Component::Source,
    Component::Collimator,
    Component::TestSection,
    Component::Focusing,
    Component::Cutoff,
    Component::Image,
];

/// Method, key feature, typical applications and box color.
const SUMMARY: [(&str, &str, &str, Color); 3] = [
    (
        "Classical\n(Toepler)",
        "High sensitivity",
        "Shock waves\nBallistics",
        LIGHTBLUE,
    ),
    (
        "Rainbow\nSchlieren",
        "Color-coded direction",
        "Flow direction\nvisualization",
        LIGHTGREEN,
    ),
    (
        "BOS",
        "Quantitative analysis",
        "Large scale flows\nAerodynamics",
        LIGHTYELLOW,
    ),
];

/// Filter band offsets of the rainbow bench, one ray per band.
const RAINBOW_RAYS: [([f64; 2], Color); 3] = [
    ([0.5, 0.5], GREEN),
    ([0.52, 0.58], BLUE),
    ([0.48, 0.42], RED),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    Source,
    Collimator,
    TestSection,
    Focusing,
    Cutoff,
    Image,
}

impl Component {
    fn label(self) -> &'static str {
        match self {
            Self::Source => "S",
            Self::Collimator => "L1",
            Self::TestSection => "Test",
            Self::Focusing => "L2",
            Self::Cutoff => "K",
            Self::Image => "I",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bench {
    Classical,
    Rainbow,
}

pub(super) fn schlieren_overview(context: &FigureContext) -> FigureResult<Figure> {
    let mut figure = Figure::new(20.0, 24.0)
        .with_style(styles::publication())
        .with_grid(
            GridSpec::new(4, 2)
                .with_spacing(0.3, 0.2)
                .with_height_ratios(vec![1.0, 1.0, 1.0, 1.2]),
        )
        .with_title(
            "Schlieren Visualization Principles: Complete Overview",
            Some(18.0),
        )
        .with_title_y(0.98);

    deflection_summary(figure.add_subplot(GridSlot::span(0, 0, 1, 2)));
    bench(
        figure.add_subplot(GridSlot::cell(1, 0)),
        Bench::Classical,
        "B. Classical (Toepler) Schlieren",
    );
    bench(
        figure.add_subplot(GridSlot::cell(1, 1)),
        Bench::Rainbow,
        "C. Rainbow Schlieren",
    );
    background_oriented(figure.add_subplot(GridSlot::span(2, 0, 1, 2)), context);
    applications(figure.add_subplot(GridSlot::span(3, 0, 1, 2)));
    Ok(figure)
}

fn panel_heading(ax: &mut Axes, y: f64, text: &str, size: f64) {
    ax.text(
        0.5,
        y,
        text,
        TextSpec::centered()
            .v_align(TextVAlign::Top)
            .size(size)
            .bold()
            .in_axes(),
    );
}

fn caption(ax: &mut Axes, x: f64, text: &str, size: f64) {
    ax.text(
        x,
        0.3,
        text,
        TextSpec::centered()
            .v_align(TextVAlign::Top)
            .size(size)
            .in_axes(),
    );
}

fn unit_frame(ax: &mut Axes) {
    ax.set_xlim(0.0, 1.0).set_ylim(0.0, 1.0).axis_off();
}

fn fraction_arrow(head: f64, color: Color) -> ArrowSpec {
    ArrowSpec::head(head, head).with_style(PatchStyle::colored(color).in_axes())
}

fn fraction_line(ax: &mut Axes, xs: [f64; 2], ys: [f64; 2], spec: LineSpec) {
    ax.plot(&xs, &ys, spec.in_axes());
}

fn flame(ax: &mut Axes, xs: [f64; 4], ys: [f64; 4]) {
    ax.fill(&xs, &ys, PatchStyle::colored(RED).alpha(0.3).in_axes());
}

fn deflection_summary(ax: &mut Axes) {
    panel_heading(
        ax,
        0.9,
        "A. Fundamental Principle: Light Deflection in Refractive Index Gradients",
        14.0,
    );
    let cases = ["Uniform n₀", "Hot air (n < n₀)", "Dense region (n > n₀)"];
    for (case, scenario) in cases.into_iter().enumerate() {
        let y = 0.7 - case as f64 * 0.25;
        ax.arrow(0.1, y, 0.15, 0.0, fraction_arrow(0.01, BLUE)).text(
            0.08,
            y,
            scenario,
            TextSpec::new()
                .align(TextHAlign::Right)
                .v_align(TextVAlign::Center)
                .size(10.0)
                .in_axes(),
        );
        match case {
            0 => {
                ax.add_patch(
                    PatchShape::rect((0.3, y - 0.03), 0.2, 0.06),
                    PatchStyle::filled(LIGHTGRAY).alpha(0.5).in_axes(),
                )
                .arrow(0.5, y, 0.15, 0.0, fraction_arrow(0.01, BLUE));
            }
            1 => {
                let theta = linspace(0.0, PI, 20);
                let xs = map_samples(&theta, |t| 0.4 + 0.1 * t.cos());
                let ys = map_samples(&theta, |t| y + 0.05 * t.sin());
                ax.fill_between(&xs, &[y - 0.02], &ys, PatchStyle::colored(RED).alpha(0.3))
                    .arrow(0.5, y, 0.12, 0.05, fraction_arrow(0.01, BLUE));
            }
            _ => {
                ax.add_patch(
                    PatchShape::rect((0.3, y - 0.04), 0.2, 0.08),
                    PatchStyle::filled(LIGHTBLUE).alpha(0.7).in_axes(),
                )
                .arrow(0.5, y, 0.12, -0.05, fraction_arrow(0.01, BLUE));
            }
        }
    }
    unit_frame(ax);
}

/// Lens bench laid out along the panel's middle line.
fn bench(ax: &mut Axes, kind: Bench, heading: &str) {
    panel_heading(ax, 0.95, heading, 12.0);
    let stations = linspace(0.1, 0.9, BENCH_COMPONENTS.len());
    for (x, component) in stations.into_iter().zip(BENCH_COMPONENTS) {
        let mut label = (component.label(), 10.0);
        match (component, kind) {
            (Component::Source, Bench::Classical) => {
                ax.add_patch(
                    PatchShape::circle((x, 0.5), 0.02),
                    PatchStyle::filled(YELLOW).in_axes(),
                );
            }
            (Component::Source, Bench::Rainbow) => {
                ax.add_patch(
                    PatchShape::rect((x - 0.015, 0.47), 0.03, 0.06),
                    PatchStyle::filled(WHITE).edge(BLACK).in_axes(),
                );
                label = ("White\nLight", 8.0);
            }
            (Component::Collimator | Component::Focusing, _) => {
                ax.add_patch(
                    PatchShape::ellipse((x, 0.5), 0.03, 0.2),
                    PatchStyle::filled(LIGHTBLUE).in_axes(),
                );
            }
            (Component::TestSection, _) => {
                flame(ax, [x - 0.02, x, x, x + 0.02], [0.45, 0.6, 0.55, 0.45]);
            }
            (Component::Cutoff, Bench::Classical) => {
                ax.add_patch(
                    PatchShape::rect((x - 0.01, 0.45), 0.02, 0.1),
                    PatchStyle::filled(BLACK).in_axes(),
                );
            }
            (Component::Cutoff, Bench::Rainbow) => {
                for (band, color) in [RED, GREEN, BLUE].into_iter().enumerate() {
                    ax.add_patch(
                        PatchShape::rect((x - 0.01, 0.45 + band as f64 * 0.03), 0.02, 0.03),
                        PatchStyle::filled(color).alpha(0.7).in_axes(),
                    );
                }
                label = ("Filter", 10.0);
            }
            (Component::Image, _) => {
                ax.add_patch(
                    PatchShape::rect((x - 0.01, 0.4), 0.02, 0.2),
                    PatchStyle::filled(WHITE).edge(BLACK).in_axes(),
                );
            }
        }
        caption(ax, x, label.0, label.1);
    }

    match kind {
        Bench::Classical => {
            fraction_line(ax, [0.1, 0.9], [0.5, 0.5], LineSpec::solid(BLUE).alpha(0.7));
            let deflected = LineSpec::dashed(BLUE).alpha(0.5);
            fraction_line(ax, [0.4, 0.9], [0.52, 0.6], deflected);
        }
        Bench::Rainbow => {
            for (end_ys, color) in RAINBOW_RAYS {
                fraction_line(ax, [0.4, 0.9], end_ys, LineSpec::solid(color).width(2.0));
            }
        }
    }
    unit_frame(ax);
}

fn background_oriented(ax: &mut Axes, context: &FigureContext) {
    panel_heading(ax, 0.95, "D. Background Oriented Schlieren (BOS)", 12.0);
    ax.add_patch(
        PatchShape::rect((0.1, 0.45), 0.05, 0.1),
        PatchStyle::filled(BLACK).in_axes(),
    );
    caption(ax, 0.125, "Camera", 10.0);
    flame(ax, [0.35, 0.5, 0.5, 0.65], [0.4, 0.7, 0.6, 0.4]);
    caption(ax, 0.5, "Flow", 10.0);

    ax.add_patch(
        PatchShape::rect((0.85, 0.2), 0.05, 0.6),
        PatchStyle::filled(WHITE).edge(BLACK).in_axes(),
    );
    let mut noise = context.noise(PATTERN_DOT_SALT);
    let dot_xs: Vec<f64> = noise
        .uniform_vec(0.0, 1.0, 20)
        .into_iter()
        .map(|u| 0.875 + 0.02 * (u - 0.5))
        .collect();
    let dot_ys: Vec<f64> = noise
        .uniform_vec(0.0, 1.0, 20)
        .into_iter()
        .map(|u| 0.5 + 0.25 * (u - 0.5))
        .collect();
    ax.scatter(
        &dot_xs,
        &dot_ys,
        ScatterSpec::new().color(BLACK).size(2.0).in_axes(),
    );
    ax.text(
        0.875,
        0.15,
        "Background\nPattern",
        TextSpec::centered()
            .v_align(TextVAlign::Top)
            .size(10.0)
            .in_axes(),
    );

    for ray in 0..5 {
        let start = 0.3 + f64::from(ray) * 0.1;
        let middle = if (1..=3).contains(&ray) {
            start + 0.02 * (f64::from(ray) * PI / 2.0).sin()
        } else {
            start
        };
        let incoming = LineSpec::solid(GRAY).alpha(0.5);
        let imaged = LineSpec::solid(BLUE).alpha(0.7);
        fraction_line(ax, [0.85, 0.5], [start, middle], incoming);
        fraction_line(ax, [0.5, 0.15], [middle, 0.5], imaged);
    }
    unit_frame(ax);
}

fn applications(ax: &mut Axes) {
    panel_heading(ax, 0.95, "E. Applications and Comparison", 12.0);
    for (index, (method, feature, uses, color)) in SUMMARY.into_iter().enumerate() {
        let x = 0.15 + index as f64 * 0.3;
        ax.add_patch(
            PatchShape::round_box((x - 0.08, 0.7), 0.16, 0.15, 0.02),
            PatchStyle::filled(color).edge(BLACK).in_axes(),
        )
        .text(
            x,
            0.775,
            method,
            TextSpec::middle().size(10.0).bold().in_axes(),
        )
        .text(
            x,
            0.6,
            feature,
            TextSpec::middle().size(9.0).italic().in_axes(),
        )
        .text(x, 0.4, uses, TextSpec::middle().size(9.0).in_axes())
        .arrow(
            x,
            0.65,
            0.0,
            -0.15,
            ArrowSpec::head(0.02, 0.02).with_style(PatchStyle::colored(GRAY).alpha(0.7).in_axes()),
        );
    }

    ax.add_patch(
        PatchShape::round_box((0.1, 0.05), 0.8, 0.15, 0.02),
        PatchStyle::filled(LIGHTCYAN)
            .edge(NAVY)
            .line_width(2.0)
            .in_axes(),
    )
    .text(
        0.5,
        0.125,
        "Key Principle: All Schlieren methods visualize refractive index gradients (∇n)\n\
         caused by density, temperature, or pressure variations in transparent media",
        TextSpec::middle().size(11.0).bold().color(NAVY).in_axes(),
    );
    unit_frame(ax);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Artist, Coords};

    #[test]
    fn overview_spans_full_width_rows() {
        let figure = schlieren_overview(&FigureContext::default()).unwrap();
        let spans: Vec<usize> = figure.axes().iter().map(|ax| ax.slot().col_span).collect();
        assert_eq!(spans, vec![2, 1, 1, 2, 2]);
        assert_eq!(figure.grid().rows, 4);
    }

    #[test]
    fn bench_artists_use_axes_fractions() {
        let figure = schlieren_overview(&FigureContext::default()).unwrap();
        for ax in &figure.axes()[1..3] {
            let in_axes = |artist: &Artist| artist.coords() == Coords::Axes;
            assert!(ax.artists().iter().all(in_axes));
        }
        let rainbow_labels: Vec<&str> = figure.axes()[2]
            .artists()
            .iter()
            .filter_map(|artist| match artist {
                Artist::Text(text) => Some(text.text.as_str()),
                _ => None,
            })
            .collect();
        assert!(rainbow_labels.contains(&"White\nLight"));
        assert!(rainbow_labels.contains(&"Filter"));
    }
}
