use crate::api::{
    ArrowSpec, Axes, ColorbarSpec, ErrorBars, Figure, GridLines, GridSlot, GridSpec, ImageSpec,
    LegendLocation, LegendSpec, LineSpec, PatchShape, PatchStyle, TextSpec,
};
use crate::core::ScalarField;
use crate::core::fields::{
    HEATED_AIR_INDEX, flame_field, knife_edge_response, oblique_shocks, plume_dipole,
    thermal_boundary_layer, trace_ray_through_lattice, turbulent_mixing,
};
use crate::core::profiles::{focal_sensitivity, knife_edge_intensity, velocity_profile};
use crate::core::sampling::{gradient_at, linspace, map_samples};
use crate::error::FigureResult;
use crate::render::colors::{
    BLACK, BLUE, GRAY, GREEN, ORANGE, ORANGERED, PURPLE, RED, SHORT_G, YELLOW,
};
use crate::render::{ColormapKind, MarkerShape};

use super::FigureContext;
use super::styles;

const FLAME_NOISE_SALT: u64 = 1;
const VELOCITY_NOISE_SALT: u64 = 2;

const RAY_STARTS: [f64; 5] = [2.0, 3.0, 4.0, 5.0, 6.0];
const RAY_GAIN: f64 = 0.01;
const GRADIENT_WINDOW: (f64, f64) = (3.0, 7.0);

pub(super) fn schlieren_principles(_context: &FigureContext) -> FigureResult<Figure> {
    let mut figure = Figure::new(14.0, 10.0)
        .with_style(styles::plain_muted())
        .with_grid(GridSpec::new(2, 2).with_spacing(0.3, 0.3))
        .with_title(
            "Figure 1: Physical Principles of Schlieren Imaging",
            Some(14.0),
        )
        .with_title_y(0.95);

    deflection_field(figure.add_subplot(GridSlot::cell(0, 0)))?;
    z_type_setup(figure.add_subplot(GridSlot::cell(0, 1)));
    knife_edge_cutoff(figure.add_subplot(GridSlot::cell(1, 0)));
    image_formation(figure.add_subplot(GridSlot::cell(1, 1)))?;
    Ok(figure)
}

pub(super) fn schlieren_analysis(_context: &FigureContext) -> FigureResult<Figure> {
    let mut figure = Figure::new(12.0, 8.0)
        .with_style(styles::plain_muted())
        .with_grid(GridSpec::new(2, 2).with_spacing(0.3, 0.3))
        .with_title(
            "Figure 2: Schlieren System Configuration and Analysis",
            Some(14.0),
        )
        .with_title_y(0.95);

    focal_length_sensitivity(figure.add_subplot(GridSlot::cell(0, 0)));
    knife_edge_orientations(figure.add_subplot(GridSlot::cell(0, 1)));
    color_schlieren(figure.add_subplot(GridSlot::cell(1, 0)));
    quantitative_analysis(figure.add_subplot(GridSlot::cell(1, 1)))?;
    Ok(figure)
}

pub(super) fn schlieren_applications(context: &FigureContext) -> FigureResult<Figure> {
    let mut figure = Figure::new(12.0, 10.0)
        .with_style(styles::plain_muted())
        .with_grid(GridSpec::new(2, 3).with_spacing(0.3, 0.3))
        .with_title("Figure 3: Applications of Schlieren Imaging", Some(14.0))
        .with_title_y(0.95);

    let mut flame_noise = context.noise(FLAME_NOISE_SALT);
    let (flame_xs, flame_ys) = (linspace(-3.0, 3.0, 60), linspace(0.0, 8.0, 80));
    let flame = flame_field(flame_xs, flame_ys, &mut flame_noise)?;
    application_image(
        figure.add_subplot(GridSlot::cell(0, 0)),
        "A) Combustion",
        flame,
        ColormapKind::Hot,
    );

    let (shock_xs, shock_ys) = (linspace(-5.0, 5.0, 100), linspace(-3.0, 3.0, 60));
    let shocks = ScalarField::sample(shock_xs, shock_ys, oblique_shocks)?;
    application_image(
        figure.add_subplot(GridSlot::cell(0, 1)),
        "B) Supersonic Flow",
        shocks,
        ColormapKind::RdBu,
    );

    let boundary = ScalarField::sample(
        linspace(0.0, 10.0, 100),
        linspace(0.0, 5.0, 50),
        thermal_boundary_layer,
    )?;
    application_image(
        figure.add_subplot(GridSlot::cell(0, 2)),
        "C) Heat Transfer",
        boundary,
        ColormapKind::YlOrRd,
    );

    let mixing = ScalarField::sample(
        linspace(-5.0, 5.0, 100),
        linspace(-5.0, 5.0, 100),
        turbulent_mixing,
    )?;
    application_image(
        figure.add_subplot(GridSlot::cell(1, 0)),
        "D) Mixing & Turbulence",
        mixing,
        ColormapKind::Seismic,
    );

    velocity_extraction(figure.add_subplot(GridSlot::span(1, 1, 1, 2)), context)?;
    Ok(figure)
}

fn label_mm(ax: &mut Axes) {
    ax.set_xlabel("x (mm)").set_ylabel("y (mm)");
}

fn deflection_field(ax: &mut Axes) -> FigureResult<()> {
    let field = HEATED_AIR_INDEX.field(linspace(0.0, 10.0, 100), linspace(0.0, 8.0, 80))?;
    let ray_xs = linspace(0.0, 10.0, 50);
    let rays: Vec<Vec<f64>> = RAY_STARTS
        .iter()
        .map(|&y| {
            trace_ray_through_lattice(
                &field,
                &ray_xs,
                y,
                HEATED_AIR_INDEX.center.1,
                RAY_GAIN,
                GRADIENT_WINDOW,
            )
        })
        .collect();

    ax.contourf(field, 20, ImageSpec::of(ColormapKind::YlOrRd).alpha(0.7))
        .colorbar(
            ColorbarSpec::new()
                .label("Refractive Index")
                .label_size(9.0)
                .shrink(0.8),
        );

    let last = ray_xs.len() - 1;
    for ray_ys in &rays {
        ax.plot(&ray_xs, ray_ys, LineSpec::solid(BLUE).width(2.0).alpha(0.8));
        ax.arrow(
            ray_xs[last - 1],
            ray_ys[last - 1],
            ray_xs[last] - ray_xs[last - 1],
            ray_ys[last] - ray_ys[last - 1],
            ArrowSpec::head(0.1, 0.2).colored(BLUE),
        );
    }

    ax.text(
        0.5,
        7.0,
        "Incident\nParallel Rays",
        TextSpec::centered().size(9.0),
    )
    .text(8.5, 6.5, "Deflected\nRays", TextSpec::centered().size(9.0))
        .set_title("A) Refractive Index Field & Light Deflection")
        .set_xlim(0.0, 10.0)
        .set_ylim(0.0, 8.0);
    label_mm(ax);
    Ok(())
}

/// Parabola sampled across a mirror's aperture.
fn mirror(ax: &mut Axes, from: f64, to: f64, profile: impl Fn(f64) -> f64) {
    let xs = linspace(from, to, 20);
    let ys = map_samples(&xs, profile);
    ax.plot(&xs, &ys, LineSpec::solid(BLACK).width(4.0));
}

fn z_type_setup(ax: &mut Axes) {
    let note = TextSpec::centered().size(8.0);
    ax.add_patch(
        PatchShape::circle((0.5, 4.0), 0.2),
        PatchStyle::filled(YELLOW).edge(BLACK),
    )
    .text(0.5, 3.5, "Light\nSource", note);

    mirror(ax, 1.8, 2.2, |x| 6.0 - 2.0 * (x - 2.0).powi(2));
    ax.text(2.0, 7.0, "Parabolic\nMirror 1", note)
        .add_patch(
            PatchShape::rect((4.0, 3.0), 2.0, 2.0),
            PatchStyle::outline(BLUE).line_width(2.0).dashed(),
        )
        .text(5.0, 2.5, "Test Section", note)
        .fill(
            &[4.8, 5.0, 5.2, 5.0],
            &[3.2, 4.5, 3.2, 3.2],
            PatchStyle::colored(ORANGERED).alpha(0.7),
        );

    mirror(ax, 7.8, 8.2, |x| 2.0 + 2.0 * (x - 8.0).powi(2));
    ax.text(8.0, 1.0, "Parabolic\nMirror 2", note)
        .plot(&[9.0, 9.0], &[3.8, 4.2], LineSpec::solid(BLACK).width(6.0))
        .text(9.0, 3.5, "Knife\nEdge", note)
        .plot(&[10.0, 10.0], &[1.0, 7.0], LineSpec::solid(GRAY).width(8.0))
        .text(10.0, 0.5, "Screen", note);

    ax.plot(
        &[0.7, 1.9, 4.0, 6.0, 8.1, 9.0, 10.0],
        &[4.0, 5.8, 4.0, 4.0, 2.2, 4.0, 4.0],
        LineSpec::solid(SHORT_G)
            .width(2.0)
            .alpha(0.7)
            .label("Undeflected"),
    )
    .plot(
        &[0.7, 1.9, 4.0, 5.0, 6.0, 8.1, 9.0],
        &[4.0, 5.8, 4.0, 4.3, 3.7, 2.2, 3.9],
        LineSpec::dashed(RED)
            .width(2.0)
            .alpha(0.7)
            .label("Deflected"),
    )
    .set_xlim(0.0, 11.0)
    .set_ylim(0.0, 8.0)
    .set_title("B) Z-type Schlieren Configuration")
    .legend(LegendSpec::at(LegendLocation::UpperRight).font_size(8.0))
    .axis_off();
}

/// Plots `y(x)` as two pieces split at the focus.
fn split_at_focus(ax: &mut Axes, xs: &[f64], y: impl Fn(f64) -> f64, spec: &LineSpec) {
    let (before, after): (Vec<f64>, Vec<f64>) = xs.iter().partition(|x| **x <= 0.0);
    for piece in [before, after] {
        let ys = map_samples(&piece, &y);
        ax.plot(&piece, &ys, spec.clone());
    }
}

fn knife_edge_cutoff(ax: &mut Axes) {
    ax.axhline(0.0, LineSpec::solid(BLACK).width(1.0).alpha(0.5));

    let xs = linspace(-2.0, 2.0, 100);
    let angles = linspace(-0.3, 0.3, 7);
    let passing = LineSpec::solid(SHORT_G).width(1.0).alpha(0.6);
    for &angle in &angles {
        split_at_focus(ax, &xs, |x| angle * x, &passing);
    }
    let shifted = LineSpec::dashed(RED).width(1.0).alpha(0.6);
    for &angle in &angles {
        split_at_focus(ax, &xs, |x| angle * x + 0.2, &shifted);
    }

    ax.fill_between(
        &[0.5, 2.0],
        &[-2.0, -2.0],
        &[0.1, 0.1],
        PatchStyle::colored(BLACK).alpha(0.8),
    )
    .text(1.2, -0.3, "Knife Edge", TextSpec::centered().size(9.0))
    .set_xlim(-2.0, 2.0)
    .set_ylim(-0.8, 0.8)
    .set_xlabel("Distance from focus (mm)")
    .set_ylabel("Ray height (mm)")
    .set_title("C) Knife Edge Cutoff Mechanism")
    .grid_with(GridLines::on().alpha(0.3));
}

fn image_formation(ax: &mut Axes) -> FigureResult<()> {
    let grid = linspace(-5.0, 5.0, 100);
    let image = ScalarField::sample(grid.clone(), grid, |x, y| {
        knife_edge_response(plume_dipole(x, y))
    })?;
    let gray = ImageSpec::of(ColormapKind::Gray);
    ax.imshow(image, [-5.0, 5.0, -5.0, 5.0], gray)
        .set_title("D) Schlieren Image Formation")
        .colorbar(
            ColorbarSpec::new()
                .label("Image Intensity")
                .label_size(9.0)
                .shrink(0.8),
        );
    label_mm(ax);
    Ok(())
}

fn focal_length_sensitivity(ax: &mut Axes) {
    let focal = linspace(100.0, 1000.0, 50);
    let sensitivity = map_samples(&focal, |f| focal_sensitivity(f) * 1000.0);
    ax.plot(&focal, &sensitivity, LineSpec::solid(BLUE).width(2.0))
        .set_xlabel("Focal Length (mm)")
        .set_ylabel("Sensitivity (×10⁻³ rad⁻¹)")
        .set_title("A) Sensitivity vs. Focal Length")
        .grid_with(GridLines::on().alpha(0.3));
}

fn knife_edge_orientations(ax: &mut Axes) {
    let blade = PatchStyle::colored(BLACK).alpha(0.8);
    let caption = TextSpec::centered().size(9.0);
    let head = ArrowSpec::head(0.1, 0.1);

    ax.fill_between(&[-1.0, 1.0], &[0.0, 0.0], &[1.0, 1.0], blade.clone())
        .text(0.0, 0.5, "Horizontal\n(Vertical gradients)", caption)
        .arrow(-0.5, -0.5, 0.0, 0.3, head.clone().colored(RED))
        .text(-0.5, -0.7, "∂n/∂y", caption.color(RED))
        .fill_between(&[0.0, 1.0], &[-1.0, -1.0], &[1.0, 1.0], blade)
        .text(0.5, 0.0, "Vertical\n(Horizontal gradients)", caption)
        .arrow(-0.8, 0.0, 0.3, 0.0, head.colored(BLUE))
        .text(-0.8, -0.2, "∂n/∂x", caption.color(BLUE))
        .set_xlim(-1.0, 1.0)
        .set_ylim(-1.0, 1.0)
        .set_title("B) Knife Edge Orientations")
        .axis_off();
}

fn color_schlieren(ax: &mut Axes) {
    let filter = [RED, ORANGE, YELLOW, GREEN, BLUE, PURPLE];
    for (band, color) in filter.into_iter().enumerate() {
        ax.add_patch(
            PatchShape::rect((8.0 + band as f64 * 0.1, 3.0), 0.1, 2.0),
            PatchStyle::filled(color).alpha(0.8),
        );
    }
    ax.text(8.3, 2.5, "Color Filter", TextSpec::centered().size(9.0))
        .add_patch(
            PatchShape::circle((1.0, 4.0), 0.2),
            PatchStyle::filled(YELLOW).edge(BLACK),
        )
        .plot(&[2.0, 2.4], &[5.5, 4.0], LineSpec::solid(BLACK).width(4.0))
        .add_patch(
            PatchShape::rect((4.0, 3.0), 2.0, 2.0),
            PatchStyle::outline(BLUE).line_width(2.0).dashed(),
        )
        .plot(&[7.6, 8.0], &[2.5, 4.0], LineSpec::solid(BLACK).width(4.0))
        .plot(&[9.5, 9.5], &[1.0, 7.0], LineSpec::solid(GRAY).width(8.0))
        .set_xlim(0.0, 10.0)
        .set_ylim(0.0, 8.0)
        .set_title("C) Color Schlieren Configuration")
        .axis_off();
}

fn quantitative_analysis(ax: &mut Axes) -> FigureResult<()> {
    let xs = linspace(-5.0, 5.0, 100);
    let intensity = map_samples(&xs, knife_edge_intensity);
    let slope = gradient_at(&intensity, &xs)?;
    let intensity_line = LineSpec::solid(BLACK).width(2.0).label("Intensity");
    let slope_line = LineSpec::dashed(RED).width(2.0).label("∇I ∝ ∇ρ");
    ax.plot(&xs, &intensity, intensity_line)
        .plot(&xs, &slope, slope_line)
        .set_xlabel("Position (mm)")
        .set_ylabel("Normalized Value")
        .set_title("D) Quantitative Analysis")
        .legend(LegendSpec::new())
        .grid_with(GridLines::on().alpha(0.3));
    Ok(())
}

fn application_image(ax: &mut Axes, title: &str, field: ScalarField, colormap: ColormapKind) {
    let (x0, x1, y0, y1) = field.extent();
    ax.imshow(field, [x0, x1, y0, y1], ImageSpec::of(colormap))
        .set_title(title);
    label_mm(ax);
}

fn velocity_extraction(ax: &mut Axes, context: &FigureContext) -> FigureResult<()> {
    let (free_stream, thickness) = (5.0, 2.0);
    let heights = linspace(0.0, 10.0, 20);
    let scatter = context
        .noise(VELOCITY_NOISE_SALT)
        .gaussian_vec(0.0, 0.2, heights.len())?;
    let measured: Vec<f64> = heights
        .iter()
        .zip(&scatter)
        .map(|(&h, e)| velocity_profile(h, free_stream, thickness) + e)
        .collect();
    ax.errorbar(
        &measured,
        &heights,
        ErrorBars::x(0.2).capsize(3.0),
        LineSpec::solid(BLUE)
            .marker(MarkerShape::Circle)
            .label("Experimental Data"),
    );

    let fine = linspace(0.0, 10.0, 100);
    let theory = map_samples(&fine, |h| velocity_profile(h, free_stream, thickness));
    ax.plot(
        &theory,
        &fine,
        LineSpec::solid(RED).width(2.0).label("Theoretical Profile"),
    )
    .set_xlabel("Velocity (m/s)")
    .set_ylabel("Height (mm)")
    .set_title("E) Quantitative Data Extraction")
    .legend(LegendSpec::new())
    .grid_with(GridLines::on().alpha(0.3));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Artist, Aspect};

    #[test]
    fn traced_rays_end_in_arrows() {
        let figure = schlieren_principles(&FigureContext::default()).unwrap();
        let arrows = figure.axes()[0]
            .artists()
            .iter()
            .filter(|artist| matches!(artist, Artist::Arrow(_)))
            .count();
        assert_eq!(arrows, RAY_STARTS.len());
        assert_eq!(figure.axes()[3].aspect(), Aspect::EqualBox);
    }

    #[test]
    fn applications_noise_follows_the_seed() {
        let first = schlieren_applications(&FigureContext::new(7)).unwrap();
        let again = schlieren_applications(&FigureContext::new(7)).unwrap();
        let other = schlieren_applications(&FigureContext::new(8)).unwrap();
        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_eq!(first.axes()[4].slot().col_span, 2);
    }
}
