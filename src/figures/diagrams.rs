//! Single-panel method diagrams: deflection cases, the classical and
//! rainbow schlieren benches, background-oriented schlieren and the method
//! comparison table.

use std::f64::consts::PI;

use crate::api::{
    ArrowSpec, Aspect, Axes, Figure, GridSlot, LineSpec, PatchShape, PatchStyle, ScatterSpec,
    TextBoxSpec, TextSpec,
};
use crate::core::sampling::{linspace, map_samples};
use crate::error::FigureResult;
use crate::render::Color;
use crate::render::colors::{
    BLACK, BLUE, GRAY, GREEN, LIGHTBLUE, LIGHTGRAY, LIGHTGREEN, LIGHTYELLOW, ORANGE, PURPLE,
    RED, WHITE, YELLOW,
};
use crate::render::{TextHAlign, TextVAlign};

use super::FigureContext;
use super::styles;

const BOS_DOT_SALT: u64 = 6;

/// Component stations along the optical axis of the lens benches.
const AXIS_Y: f64 = 4.0;
const SOURCE_X: f64 = 1.0;
const COLLIMATOR_X: f64 = 3.0;
const TEST_X: f64 = 6.0;
const FOCUSING_X: f64 = 9.0;
const CUTOFF_X: f64 = 11.0;
const SCREEN_X: f64 = 13.0;

const DEFLECTION_CASES: [&str; 3] = [
    "Uniform Medium (n₀)",
    "Lower Density Region (n < n₀)",
    "Higher Density Region (n > n₀)",
];

const BOS_STEPS: [&str; 5] = [
    "1. Reference image (no flow)",
    "2. Test image (with flow)",
    "3. Cross-correlation analysis",
    "4. Displacement field calculation",
    "5. Density gradient reconstruction",
];

const METHODS: [&str; 3] = [
    "Classical (Toepler)",
    "Rainbow Schlieren",
    "Background Oriented (BOS)",
];
const METHOD_COLORS: [Color; 3] = [LIGHTBLUE, LIGHTGREEN, LIGHTYELLOW];

/// Feature name followed by its entry for each of [`METHODS`].
const COMPARISON_ROWS: [(&str, [&str; 3]); 10] = [
    (
        "Principle",
        [
            "Intensity modulation\nby knife-edge",
            "Color modulation\nby multi-color filter",
            "Background pattern\ndisplacement",
        ],
    ),
    (
        "Cutoff Element",
        [
            "Knife-edge, slit,\nwire, graded filter",
            "Color filter\n(strip or continuous)",
            "No physical cutoff;\ncomputational analysis",
        ],
    ),
    (
        "Optical Complexity",
        [
            "Two high-quality\nlenses/mirrors required",
            "Two high-quality\nlenses/mirrors required",
            "Simple: camera +\nbackground only",
        ],
    ),
    (
        "Light Source",
        [
            "Small, bright\n(point or slit)",
            "White light,\noften slit source",
            "Ambient or controlled\nillumination",
        ],
    ),
    (
        "Sensitivity",
        [
            "High; adjustable by\nknife-edge position",
            "Moderate to High;\ndepends on filter",
            "Moderate; depends on\npattern & algorithms",
        ],
    ),
    (
        "Output",
        [
            "Grayscale image\nshowing gradients",
            "Color image; color\nindicates deflection",
            "Displacement field,\nthen gradient field",
        ],
    ),
    (
        "Quantitative Analysis",
        [
            "Primarily qualitative;\ncan be quantitative",
            "Semi-quantitative\n(color ↔ deflection)",
            "Highly quantitative\nwith proper processing",
        ],
    ),
    (
        "Alignment Difficulty",
        [
            "Critical and\nchallenging",
            "Critical and\nchallenging",
            "Relatively easy\nalignment",
        ],
    ),
    (
        "Cost",
        [
            "High due to\nquality optics",
            "High due to\nquality optics",
            "Lower optical cost,\nhigher computational",
        ],
    ),
    (
        "Best Applications",
        [
            "Shock waves, ballistics,\nheat transfer, mixing",
            "Similar to classical,\ngood for direction info",
            "Large flows, aerodynamics,\nlimited optical access",
        ],
    ),
];

const CELL_WIDTH: f64 = 4.5;
const CELL_HEIGHT: f64 = 0.8;

fn diagram(width_in: f64, height_in: f64) -> Figure {
    Figure::new(width_in, height_in).with_style(styles::publication())
}

fn finish(ax: &mut Axes, x_max: f64, y_range: (f64, f64)) {
    ax.set_xlim(0.0, x_max)
        .set_ylim(y_range.0, y_range.1)
        .set_aspect(Aspect::EqualBox)
        .axis_off();
}

fn heading(ax: &mut Axes, x: f64, y: f64, text: &str) {
    ax.text(x, y, text, TextSpec::middle().size(14.0).bold());
}

/// Bold caption hanging below a component.
fn component_label(ax: &mut Axes, x: f64, y: f64, text: &str) {
    ax.text(
        x,
        y,
        text,
        TextSpec::centered()
            .v_align(TextVAlign::Top)
            .size(9.0)
            .bold(),
    );
}

fn side_note(color: Color) -> TextSpec {
    TextSpec::new()
        .align(TextHAlign::Left)
        .v_align(TextVAlign::Center)
        .size(8.0)
        .color(color)
}

fn ray_arrow(color: Color) -> ArrowSpec {
    ArrowSpec::head(0.1, 0.1).with_style(PatchStyle::colored(color).line_width(2.0))
}

fn segment(ax: &mut Axes, xs: [f64; 2], ys: [f64; 2], spec: LineSpec) {
    ax.plot(&xs, &ys, spec);
}

pub(super) fn light_deflection_principle(_context: &FigureContext) -> FigureResult<Figure> {
    let mut figure = diagram(12.0, 8.0);
    let ax = figure.add_subplot(GridSlot::cell(0, 0));
    let note = TextSpec::middle().size(9.0).color(BLUE);

    for (case, (y, scenario)) in [6.0, 3.5, 1.0].into_iter().zip(DEFLECTION_CASES).enumerate() {
        ax.arrow(1.0, y, 3.0, 0.0, ray_arrow(BLUE)).text(
            0.5,
            y,
            "Incident Ray",
            note.align(TextHAlign::Right),
        );

        match case {
            0 => {
                ax.add_patch(
                    PatchShape::rect((4.0, y - 0.3), 4.0, 0.6),
                    PatchStyle::filled(LIGHTGRAY)
                        .edge(BLACK)
                        .line_width(2.0)
                        .alpha(0.3),
                )
                .arrow(8.0, y, 3.0, 0.0, ray_arrow(BLUE))
                .text(
                    8.5,
                    y + 0.3,
                    "Undeflected",
                    note.v_align(TextVAlign::Bottom),
                );
            }
            1 => {
                let plume_xs = [4.0, 5.0, 6.0, 7.0, 8.0];
                let top: Vec<f64> = [0.5, 0.7, 0.8, 0.7, 0.5].iter().map(|d| y + d).collect();
                let bottom = vec![y - 0.2; plume_xs.len()];
                ax.fill_between(
                    &plume_xs,
                    &bottom,
                    &top,
                    PatchStyle::colored(RED)
                        .alpha(0.2)
                        .label("Hot air (n < n₀)"),
                )
                .plot(&plume_xs, &top, LineSpec::dashed(RED).width(1.5))
                .plot(&plume_xs, &bottom, LineSpec::solid(BLACK).width(1.0))
                .arrow(8.0, y, 2.5, 0.8, ray_arrow(BLUE))
                .text(9.0, y + 0.6, "Deflected\n(away from low n)", note);
            }
            _ => {
                ax.add_patch(
                    PatchShape::rect((4.0, y - 0.4), 4.0, 0.8),
                    PatchStyle::filled(LIGHTBLUE)
                        .edge(BLACK)
                        .line_width(2.0)
                        .alpha(0.5),
                )
                .text(6.0, y, "n > n₀", TextSpec::middle().size(10.0).bold())
                .arrow(8.0, y, 2.5, -0.8, ray_arrow(BLUE))
                .text(9.0, y - 0.6, "Deflected\n(toward high n)", note);
            }
        }

        ax.text(
            0.2,
            y,
            format!("{}.", case + 1),
            TextSpec::new()
                .v_align(TextVAlign::Center)
                .size(12.0)
                .bold(),
        )
        .text(
            12.0,
            y,
            scenario,
            TextSpec::new()
                .v_align(TextVAlign::Center)
                .size(10.0)
                .bold(),
        );
    }

    heading(
        ax,
        6.0,
        7.5,
        "Light Deflection in Refractive Index Gradients",
    );
    ax.text(
        6.0,
        0.2,
        "Light rays bend toward regions of higher refractive index (∇n)",
        TextSpec::middle().size(11.0).italic(),
    );
    finish(ax, 14.0, (0.0, 8.0));
    Ok(figure)
}

fn lens(ax: &mut Axes, x: f64, caption: &str) {
    ax.add_patch(
        PatchShape::ellipse((x, AXIS_Y), 0.2, 1.5),
        PatchStyle::filled(LIGHTBLUE).edge(BLUE).line_width(2.0),
    );
    component_label(ax, x, AXIS_Y - 1.0, caption);
}

/// Flickering flame between the lenses.
fn test_section(ax: &mut Axes, caption: &str) {
    let xs = linspace(TEST_X - 0.5, TEST_X + 0.5, 20);
    let ys = map_samples(&xs, |x| {
        AXIS_Y + 0.3 * (10.0 * x).sin() * (-(x - TEST_X).powi(2) / 0.1).exp()
    });
    ax.fill_between(
        &xs,
        &[AXIS_Y - 0.3],
        &ys,
        PatchStyle::colored(RED).alpha(0.3),
    )
    .plot(&xs, &ys, LineSpec::solid(RED).width(2.0));
    component_label(ax, TEST_X, AXIS_Y - 1.0, caption);
}

fn screen(ax: &mut Axes, face: Color) {
    ax.add_patch(
        PatchShape::rect((SCREEN_X - 0.1, AXIS_Y - 1.0), 0.2, 2.0),
        PatchStyle::filled(face).edge(BLACK).line_width(2.0),
    );
    component_label(ax, SCREEN_X, AXIS_Y - 1.3, "Screen/Camera\n(I)");
}

fn optical_axis(ax: &mut Axes) {
    segment(
        ax,
        [0.5, 13.5],
        [AXIS_Y, AXIS_Y],
        LineSpec::dashed(BLACK).width(1.0).alpha(0.5),
    );
}

/// Undeflected path from the source exit to `end_x`, broken at the lenses
/// and the test section.
fn axial_ray(ax: &mut Axes, source_exit: f64, end_x: f64, spec: &LineSpec) {
    for (from, to) in [
        (source_exit, COLLIMATOR_X - 0.1),
        (COLLIMATOR_X + 0.1, TEST_X - 0.5),
        (TEST_X + 0.5, FOCUSING_X - 0.1),
        (FOCUSING_X + 0.1, end_x),
    ] {
        segment(ax, [from, to], [AXIS_Y, AXIS_Y], spec.clone());
    }
}

pub(super) fn classical_schlieren(_context: &FigureContext) -> FigureResult<Figure> {
    let mut figure = diagram(14.0, 8.0);
    let ax = figure.add_subplot(GridSlot::cell(0, 0));

    ax.add_patch(
        PatchShape::circle((SOURCE_X, AXIS_Y), 0.15),
        PatchStyle::filled(YELLOW).edge(ORANGE).line_width(2.0),
    );
    component_label(ax, SOURCE_X, AXIS_Y - 0.5, "Light Source\n(S)");
    lens(ax, COLLIMATOR_X, "Collimating\nLens (L1)");
    test_section(ax, "Test Section\n(Schlieren Object)");
    lens(ax, FOCUSING_X, "Focusing\nLens (L2)");
    ax.add_patch(
        PatchShape::rect((CUTOFF_X - 0.05, AXIS_Y - 0.8), 0.1, 0.8),
        PatchStyle::filled(BLACK).edge(BLACK),
    );
    component_label(ax, CUTOFF_X, AXIS_Y - 1.0, "Knife Edge\n(K)");
    screen(ax, WHITE);

    let ray = LineSpec::solid(BLUE).width(1.5).alpha(0.7);
    axial_ray(ax, SOURCE_X + 0.15, CUTOFF_X - 0.05, &ray);

    let deflected = ray.clone().alpha(0.5);
    segment(
        ax,
        [TEST_X + 0.5, FOCUSING_X - 0.1],
        [AXIS_Y + 0.2, AXIS_Y + 0.2],
        deflected.clone(),
    );
    segment(
        ax,
        [FOCUSING_X + 0.1, SCREEN_X - 0.1],
        [AXIS_Y + 0.2, AXIS_Y + 0.5],
        deflected.clone(),
    );
    ax.text(
        SCREEN_X + 0.3,
        AXIS_Y + 0.5,
        "Brighter\nRegion",
        side_note(BLUE),
    );
    segment(
        ax,
        [TEST_X + 0.5, FOCUSING_X - 0.1],
        [AXIS_Y - 0.2, AXIS_Y - 0.2],
        deflected,
    );
    segment(
        ax,
        [FOCUSING_X + 0.1, CUTOFF_X - 0.05],
        [AXIS_Y - 0.2, AXIS_Y - 0.2],
        LineSpec::dashed(BLUE).width(1.5).alpha(0.3),
    );
    ax.text(
        CUTOFF_X + 0.3,
        AXIS_Y - 0.5,
        "Blocked\n(Darker Region)",
        side_note(RED),
    );

    optical_axis(ax);
    ax.text(
        7.0,
        3.5,
        "Optical Axis",
        TextSpec::middle().size(9.0).italic(),
    );
    heading(ax, 7.0, 6.0, "Classical (Toepler) Schlieren System");
    ax.arrow(
        CUTOFF_X,
        AXIS_Y + 1.5,
        0.0,
        -0.5,
        ArrowSpec::head(0.1, 0.1).colored(RED),
    )
    .text(
        CUTOFF_X,
        AXIS_Y + 1.8,
        "Sensitivity\nDirection",
        TextSpec::centered()
            .v_align(TextVAlign::Bottom)
            .size(8.0)
            .color(RED),
    );
    finish(ax, 14.0, (1.0, 7.0));
    Ok(figure)
}

pub(super) fn rainbow_schlieren(_context: &FigureContext) -> FigureResult<Figure> {
    let mut figure = diagram(14.0, 8.0);
    let ax = figure.add_subplot(GridSlot::cell(0, 0));

    ax.add_patch(
        PatchShape::rect((SOURCE_X - 0.1, AXIS_Y - 0.3), 0.2, 0.6),
        PatchStyle::filled(WHITE).edge(BLACK).line_width(2.0),
    );
    component_label(ax, SOURCE_X, AXIS_Y - 0.7, "White Light\nSource + Slit");
    lens(ax, COLLIMATOR_X, "Collimating\nLens (L1)");
    test_section(ax, "Test Section\n(Flow)");
    lens(ax, FOCUSING_X, "Focusing\nLens (L2)");

    let (filter_height, bands) = (1.2, [RED, GREEN, BLUE]);
    let band_height = filter_height / bands.len() as f64;
    for (index, color) in bands.into_iter().enumerate() {
        ax.add_patch(
            PatchShape::rect(
                (
                    CUTOFF_X - 0.05,
                    AXIS_Y - filter_height / 2.0 + index as f64 * band_height,
                ),
                0.1,
                band_height,
            ),
            PatchStyle::filled(color).edge(BLACK).alpha(0.7),
        );
    }
    component_label(ax, CUTOFF_X, AXIS_Y - 1.0, "Color Filter\n(R-G-B)");
    screen(ax, LIGHTGRAY);

    let white_light = LineSpec::solid(GRAY).width(1.5).alpha(0.7);
    axial_ray(ax, SOURCE_X + 0.1, CUTOFF_X - 0.05, &white_light);
    let filtered = |color: Color| LineSpec::solid(color).width(2.0);
    segment(
        ax,
        [CUTOFF_X + 0.05, SCREEN_X - 0.1],
        [AXIS_Y, AXIS_Y],
        filtered(GREEN),
    );

    let scattered = white_light.alpha(0.5);
    for (sign, color) in [(1.0, BLUE), (-1.0, RED)] {
        segment(
            ax,
            [TEST_X + 0.5, FOCUSING_X - 0.1],
            [AXIS_Y + sign * 0.2, AXIS_Y + sign * 0.3],
            scattered.clone(),
        );
        segment(
            ax,
            [FOCUSING_X + 0.1, CUTOFF_X - 0.05],
            [AXIS_Y + sign * 0.3, AXIS_Y + sign * 0.4],
            scattered.clone(),
        );
        segment(
            ax,
            [CUTOFF_X + 0.05, SCREEN_X - 0.1],
            [AXIS_Y + sign * 0.4, AXIS_Y + sign * 0.6],
            filtered(color),
        );
    }

    for (offset, text, color) in [
        (0.6, "Blue\n(upward deflection)", BLUE),
        (0.0, "Green\n(no deflection)", GREEN),
        (-0.6, "Red\n(downward deflection)", RED),
    ] {
        ax.text(SCREEN_X + 0.3, AXIS_Y + offset, text, side_note(color));
    }

    optical_axis(ax);
    heading(ax, 7.0, 6.0, "Rainbow Schlieren System");
    finish(ax, 14.0, (1.0, 7.0));
    Ok(figure)
}

pub(super) fn bos_system(context: &FigureContext) -> FigureResult<Figure> {
    let (camera_x, camera_y) = (2.0, 4.0);
    let (test_x, test_y) = (6.0, 4.0);
    let (background_x, background_y) = (10.0, 4.0);
    let lens_x = camera_x + 0.4;

    let mut figure = diagram(14.0, 8.0);
    let ax = figure.add_subplot(GridSlot::cell(0, 0));

    ax.add_patch(
        PatchShape::rect((camera_x - 0.3, camera_y - 0.2), 0.6, 0.4),
        PatchStyle::filled(BLACK).edge(BLACK),
    )
    .add_patch(
        PatchShape::circle((lens_x, camera_y), 0.15),
        PatchStyle::filled(LIGHTBLUE).edge(BLUE).line_width(2.0),
    );
    component_label(ax, camera_x, camera_y - 0.7, "High-Resolution\nCamera");

    let flame_xs = linspace(test_x - 0.8, test_x + 0.8, 30);
    let flame_ys = map_samples(&flame_xs, |x| {
        test_y + 0.5 * (8.0 * x).sin() * (-2.0 * (x - test_x).powi(2) / 0.5).exp()
    });
    ax.fill_between(
        &flame_xs,
        &[test_y - 0.3],
        &flame_ys,
        PatchStyle::colored(RED).alpha(0.3),
    )
    .plot(&flame_xs, &flame_ys, LineSpec::solid(RED).width(2.0));
    for line in 0..5 {
        let offset = test_y + (f64::from(line) - 2.0) * 0.1;
        let xs = linspace(test_x - 0.5, test_x + 0.5, 20);
        let ys = map_samples(&xs, |x| {
            offset
                + 0.05 * (15.0 * x + f64::from(line)).sin() * (-(x - test_x).powi(2) / 0.3).exp()
        });
        ax.plot(&xs, &ys, LineSpec::solid(RED).alpha(0.3).width(1.0));
    }
    component_label(
        ax,
        test_x,
        test_y - 1.0,
        "Test Section\n(Flow with Density Gradients)",
    );

    ax.add_patch(
        PatchShape::rect((background_x - 0.1, background_y - 1.5), 0.2, 3.0),
        PatchStyle::filled(WHITE).edge(BLACK).line_width(2.0),
    );
    let mut noise = context.noise(BOS_DOT_SALT);
    let dot_xs = noise.uniform_vec(background_x - 0.08, background_x + 0.08, 50);
    let dot_ys = noise.uniform_vec(background_y - 1.4, background_y + 1.4, 50);
    ax.scatter(
        &dot_xs,
        &dot_ys,
        ScatterSpec::new().color(BLACK).size(3.0).alpha(0.8),
    );
    component_label(
        ax,
        background_x,
        background_y - 2.0,
        "Background Pattern\n(Random Dots/Grid)",
    );

    let mid_x = (background_x + camera_x) / 2.0;
    for ray in 0..5 {
        let start_y = background_y + (f64::from(ray) - 2.0) * 0.4;
        segment(
            ax,
            [background_x - 0.1, lens_x],
            [start_y, camera_y],
            LineSpec::dashed(GRAY).width(1.0).alpha(0.3),
        );
    }
    let bent = LineSpec::solid(BLUE).width(1.5).alpha(0.7);
    for ray in 0..5 {
        let start_y = background_y + (f64::from(ray) - 2.0) * 0.4;
        let deflection = if (ray - 2_i32).abs() <= 1 {
            0.1 * (f64::from(ray) * PI / 2.0).sin()
        } else {
            0.0
        };
        segment(
            ax,
            [background_x - 0.1, mid_x],
            [start_y, camera_y + deflection],
            bent.clone(),
        );
        segment(
            ax,
            [mid_x, lens_x],
            [camera_y + deflection, camera_y],
            bent.clone(),
        );
    }

    ax.arrow(camera_x + 0.6, camera_y, 2.0, 0.0, ray_arrow(GREEN))
        .text(
            camera_x + 1.5,
            camera_y + 0.3,
            "Viewing Direction",
            TextSpec::centered()
                .v_align(TextVAlign::Bottom)
                .size(9.0)
                .color(GREEN),
        )
        .text(
            7.0,
            5.5,
            "Pattern Displacement Analysis",
            TextSpec::middle().size(12.0).bold().color(PURPLE),
        );
    for vector in 0..3 {
        let step = f64::from(vector);
        ax.arrow(
            test_x + (step - 1.0) * 0.3,
            test_y + 0.2,
            0.1 * (step - 1.0),
            0.05 * (step * PI).sin(),
            ArrowSpec::head(0.05, 0.03).with_style(PatchStyle::colored(PURPLE).alpha(0.7)),
        );
    }
    ax.text(
        test_x,
        test_y + 0.8,
        "Displacement\nVectors",
        TextSpec::middle().size(8.0).color(PURPLE),
    );
    heading(ax, 6.0, 6.5, "Background Oriented Schlieren (BOS) System");

    for (index, step) in BOS_STEPS.iter().enumerate() {
        ax.text(
            1.0,
            1.8 - index as f64 * 0.3,
            *step,
            TextSpec::new()
                .v_align(TextVAlign::Center)
                .size(8.0)
                .boxed(TextBoxSpec::round(LIGHTYELLOW).alpha(0.7)),
        );
    }
    finish(ax, 12.0, (0.0, 7.0));
    Ok(figure)
}

pub(super) fn methods_comparison(_context: &FigureContext) -> FigureResult<Figure> {
    let mut figure = diagram(16.0, 10.0);
    let ax = figure.add_subplot(GridSlot::cell(0, 0));
    let rows = COMPARISON_ROWS.len() as f64;
    let columns = METHODS.len() as f64;

    let rule = LineSpec::solid(BLACK).width(1.5);
    for row in 0..=COMPARISON_ROWS.len() {
        ax.axhline((rows - row as f64) * CELL_HEIGHT, rule.clone());
    }
    for column in 0..METHODS.len() + 2 {
        ax.axvline(column as f64 * CELL_WIDTH, rule.clone());
    }

    let header_y = (rows + 0.5) * CELL_HEIGHT;
    let header = TextSpec::middle().size(12.0).bold();
    ax.text(
        CELL_WIDTH / 2.0,
        header_y,
        "Feature",
        header.boxed(TextBoxSpec::round(LIGHTGRAY)),
    );
    for (column, (method, color)) in METHODS.iter().zip(METHOD_COLORS).enumerate() {
        ax.text(
            (column as f64 + 1.5) * CELL_WIDTH,
            header_y,
            *method,
            header.boxed(TextBoxSpec::round(color)),
        );
    }

    for (row, (feature, entries)) in COMPARISON_ROWS.iter().enumerate() {
        let y = (rows - row as f64 - 0.5) * CELL_HEIGHT;
        ax.text(
            CELL_WIDTH / 2.0,
            y,
            *feature,
            TextSpec::middle().size(10.0).bold(),
        );
        for (column, (entry, color)) in entries.iter().zip(METHOD_COLORS).enumerate() {
            ax.text(
                (column as f64 + 1.5) * CELL_WIDTH,
                y,
                *entry,
                TextSpec::middle()
                    .size(9.0)
                    .boxed(TextBoxSpec::round(color).pad(0.2).alpha(0.3)),
            );
        }
    }

    let width = (columns + 1.0) * CELL_WIDTH;
    let height = (rows + 1.0) * CELL_HEIGHT;
    finish(ax, width, (0.0, height));
    ax.text(
        width / 2.0,
        (rows + 1.3) * CELL_HEIGHT,
        "Comparison of Schlieren Visualization Methods",
        TextSpec::middle().size(16.0).bold(),
    );
    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Artist, PatchArtist};

    fn texts(ax: &Axes) -> Vec<&str> {
        ax.artists()
            .iter()
            .filter_map(|artist| match artist {
                Artist::Text(text) => Some(text.text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn deflection_diagram_numbers_each_case() {
        let figure = light_deflection_principle(&FigureContext::default()).unwrap();
        let labels = texts(&figure.axes()[0]);
        for marker in ["1.", "2.", "3."] {
            assert!(labels.contains(&marker));
        }
        for scenario in DEFLECTION_CASES {
            assert!(labels.contains(&scenario));
        }
    }

    #[test]
    fn comparison_table_has_a_cell_per_method_and_feature() {
        let figure = methods_comparison(&FigureContext::default()).unwrap();
        let ax = &figure.axes()[0];
        let boxed = ax
            .artists()
            .iter()
            .filter(|artist| matches!(artist, Artist::Text(text) if text.spec.bbox.is_some()))
            .count();
        let cells = COMPARISON_ROWS.len() * METHODS.len();
        assert_eq!(boxed, 1 + METHODS.len() + cells);
        let rules = ax
            .artists()
            .iter()
            .filter(|artist| matches!(artist, Artist::RefLine(_)))
            .count();
        assert_eq!(rules, COMPARISON_ROWS.len() + 1 + METHODS.len() + 2);
    }

    #[test]
    fn bos_dots_stay_on_the_background_plate() {
        let figure = bos_system(&FigureContext::new(3)).unwrap();
        let dots = figure.axes()[0]
            .artists()
            .iter()
            .find_map(|artist| match artist {
                Artist::Scatter(scatter) => Some(scatter),
                _ => None,
            })
            .unwrap();
        assert_eq!(dots.xs.len(), 50);
        assert!(dots.xs.iter().all(|x| (9.92..10.08).contains(x)));
        assert!(dots.ys.iter().all(|y| (2.6..5.4).contains(y)));
    }

    #[test]
    fn rainbow_filter_has_three_bands() {
        let figure = rainbow_schlieren(&FigureContext::default()).unwrap();
        let bands = figure.axes()[0]
            .artists()
            .iter()
            .filter(|artist| match artist {
                Artist::Patch(PatchArtist {
                    shape: PatchShape::Rect { x, width, .. },
                    ..
                }) => (x - 10.95).abs() < 1e-9 && (width - 0.1).abs() < 1e-9,
                _ => false,
            })
            .count();
        assert_eq!(bands, 3);
    }
}
