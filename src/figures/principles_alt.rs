use crate::api::{
    Aspect, Axes, ColorbarSpec, Figure, GridLines, GridSlot, GridSpec, ImageSpec, LegendLocation,
    LegendSpec, LineSpec, PatchShape, PatchStyle, TextSpec,
};
use crate::core::fields::{ELONGATED_INDEX_EXCESS, gaussian_ray_offset, ripple_image};
use crate::core::sampling::{linspace, map_samples};
use crate::error::FigureResult;
use crate::render::colors::{
    BLACK, BLUE, GRAY, LIGHTBLUE, ORANGE, RED, SHORT_G, SHORT_Y, WHITE,
};
use crate::render::{ColormapKind, MarkerShape, TextHAlign};

use super::FigureContext;
use super::styles;

const RIPPLE_NOISE_SALT: u64 = 3;
const PEAK_DEFLECTION: f64 = 0.3;
const KNIFE_EDGE_HEIGHT: f64 = 0.15;

pub(super) fn schlieren_principles_alt(context: &FigureContext) -> FigureResult<Figure> {
    let mut figure = Figure::new(16.0, 12.0)
        .with_style(styles::library_defaults())
        .with_grid(GridSpec::new(2, 2).with_spacing(0.3, 0.3))
        .with_title(
            "Figure 1: Physical Principles of Schlieren Imaging",
            Some(16.0),
        )
        .with_title_y(0.95);

    index_field(figure.add_subplot(GridSlot::cell(0, 0)))?;
    z_type_setup(figure.add_subplot(GridSlot::cell(0, 1)));
    cutoff_rays(figure.add_subplot(GridSlot::cell(1, 0)));
    ripple(figure.add_subplot(GridSlot::cell(1, 1)), context)?;
    Ok(figure)
}

fn bold_title(ax: &mut Axes, title: &str) {
    ax.set_title_styled(title, None, true);
}

fn rotated_colorbar(label: &str) -> ColorbarSpec {
    ColorbarSpec::new()
        .label(label)
        .label_rotation(270.0)
        .shrink(0.8)
}

fn index_field(ax: &mut Axes) -> FigureResult<()> {
    let bump = ELONGATED_INDEX_EXCESS;
    let field = bump.field(linspace(0.0, 10.0, 100), linspace(0.0, 8.0, 80))?;
    ax.imshow(
        field,
        [0.0, 10.0, 0.0, 8.0],
        ImageSpec::of(ColormapKind::Hot).alpha(0.8),
    )
    .set_aspect(Aspect::Auto);

    for (index, ray_y) in linspace(1.0, 7.0, 5).into_iter().enumerate() {
        if index == 2 {
            let xs = linspace(0.0, 10.0, 100);
            let ys = map_samples(&xs, |x| {
                ray_y + gaussian_ray_offset(&bump, x, ray_y, PEAK_DEFLECTION)
            });
            let deflected = LineSpec::solid(BLUE).width(2.0).label("Deflected Ray");
            ax.plot(&xs, &ys, deflected);
        } else {
            ax.axhline(ray_y, LineSpec::solid(BLUE).width(1.5).alpha(0.7));
        }
    }

    ax.text(
        0.5,
        7.5,
        "Incident\nParallel Rays",
        TextSpec::new().size(10.0).align(TextHAlign::Left),
    )
    .text(8.5, 6.5, "Deflected\nRays", TextSpec::centered().size(10.0))
    .colorbar(rotated_colorbar("Refractive Index"))
    .set_xlabel("x (mm)")
    .set_ylabel("y (mm)")
    .grid_with(GridLines::on().alpha(0.3));
    bold_title(ax, "A) Refractive Index Field & Light Deflection");
    Ok(())
}

fn z_type_setup(ax: &mut Axes) {
    let label = TextSpec::centered().size(9.0);
    ax.plot(
        &[1.0],
        &[3.0],
        LineSpec::markers(SHORT_Y, MarkerShape::Circle)
            .marker_size(10.0)
            .marker_edge(ORANGE, 2.0),
    )
    .text(1.0, 2.5, "Light\nSource", label);

    let first = linspace(2.0, 2.5, 50);
    let first_curve = map_samples(&first, |x| 2.0 + 2.0 * (x - 2.25).powi(2) / 0.0625);
    ax.plot(&first, &first_curve, LineSpec::solid(BLACK).width(3.0))
        .add_patch(
            PatchShape::rect((4.0, 2.0), 2.0, 2.0),
            PatchStyle::filled(LIGHTBLUE)
                .edge(BLUE)
                .line_width(2.0)
                .alpha(0.3)
                .dashed(),
        )
        .text(5.0, 1.5, "Test Section", label);

    let second = linspace(7.5, 8.0, 50);
    let second_curve = map_samples(&second, |x| 4.0 - 2.0 * (x - 7.75).powi(2) / 0.0625);
    ax.plot(&second, &second_curve, LineSpec::solid(BLACK).width(3.0))
        .text(7.75, 2.5, "Parabolic\nMirror 2", label.size(8.0))
        .plot(&[9.0, 9.0], &[2.8, 4.2], LineSpec::solid(BLACK).width(4.0))
        .text(
            9.2,
            3.5,
            "Knife\nEdge",
            TextSpec::new().size(9.0).align(TextHAlign::Left),
        )
        .plot(&[11.0, 11.0], &[2.0, 4.5], LineSpec::solid(GRAY).width(6.0))
        .text(11.0, 1.5, "Screen", label);

    let undeflected = [[1.2, 2.2], [2.5, 4.0], [6.0, 7.5], [8.0, 9.0]];
    for (index, xs) in undeflected.iter().enumerate() {
        let mut spec = LineSpec::solid(SHORT_G).width(2.0);
        if index == undeflected.len() - 1 {
            spec = spec.label("Undeflected");
        }
        ax.plot(xs, &[3.1, 3.1], spec);
    }
    let deflected = [
        ([1.2, 2.2], [2.9, 3.3]),
        ([2.5, 4.0], [3.3, 3.5]),
        ([6.0, 7.5], [3.5, 3.3]),
        ([8.0, 9.0], [3.3, 3.8]),
    ];
    for (index, (xs, ys)) in deflected.iter().enumerate() {
        let mut spec = LineSpec::dashed(RED).width(2.0);
        if index == deflected.len() - 1 {
            spec = spec.label("Deflected");
        }
        ax.plot(xs, ys, spec);
    }

    ax.set_xlim(0.0, 12.0)
        .set_ylim(1.0, 5.0)
        .legend(LegendSpec::at(LegendLocation::UpperRight))
        .set_aspect(Aspect::EqualBox)
        .grid_with(GridLines::on().alpha(0.3));
    bold_title(ax, "B) Z-type Schlieren Configuration");
}

fn cutoff_rays(ax: &mut Axes) {
    let distances = linspace(-2.0, 2.0, 100);
    for height in linspace(-0.8, 0.8, 17) {
        let spec = if height > KNIFE_EDGE_HEIGHT {
            LineSpec::dashed(RED).alpha(0.6).width(1.0)
        } else {
            LineSpec::solid(SHORT_G).alpha(0.8).width(1.0)
        };
        ax.plot(&distances, &vec![height; distances.len()], spec);
    }

    ax.fill_between(
        &[0.8, 2.0],
        &[KNIFE_EDGE_HEIGHT, KNIFE_EDGE_HEIGHT],
        &[0.8, 0.8],
        PatchStyle::colored(BLACK).alpha(0.8),
    )
    .text(
        1.4,
        0.5,
        "Knife Edge",
        TextSpec::centered().size(10.0).color(WHITE).bold(),
    )
    .plot(
        &[0.0],
        &[0.0],
        LineSpec::markers(BLACK, MarkerShape::Circle).marker_size(8.0),
    )
    .plot(
        &[0.0],
        &[0.2],
        LineSpec::markers(RED, MarkerShape::Circle).marker_size(6.0),
    )
    .grid_with(GridLines::on().alpha(0.3))
    .set_xlabel("Distance from focus (mm)")
    .set_ylabel("Ray Height (mm)")
    .set_xlim(-2.0, 2.0)
    .set_ylim(-0.8, 0.8);
    bold_title(ax, "C) Knife Edge Cutoff Mechanism");
}

fn ripple(ax: &mut Axes, context: &FigureContext) -> FigureResult<()> {
    let mut noise = context.noise(RIPPLE_NOISE_SALT);
    let grid = linspace(-5.0, 5.0, 100);
    let image = ripple_image(grid.clone(), grid, &mut noise)?;
    let gray = ImageSpec::of(ColormapKind::Gray);
    ax.imshow(image, [-5.0, 5.0, -5.0, 5.0], gray)
        .set_xlabel("x (mm)")
        .set_ylabel("y (mm)")
        .colorbar(rotated_colorbar("Image Intensity"));
    bold_title(ax, "D) Schlieren Image Formation");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Artist;

    #[test]
    fn index_panel_stretches_to_the_box() {
        let figure = schlieren_principles_alt(&FigureContext::default()).unwrap();
        assert_eq!(figure.axes()[0].aspect(), Aspect::Auto);
        assert_eq!(figure.axes()[3].aspect(), Aspect::EqualBox);
    }

    #[test]
    fn cutoff_panel_blocks_rays_above_the_edge() {
        let figure = schlieren_principles_alt(&FigureContext::default()).unwrap();
        let blocked = figure.axes()[2]
            .artists()
            .iter()
            .filter(|artist| match artist {
                Artist::Line(line) => line.spec.color == Some(RED) && line.xs.len() > 1,
                _ => false,
            })
            .count();
        let heights = linspace(-0.8, 0.8, 17);
        let expected = heights.iter().filter(|h| **h > KNIFE_EDGE_HEIGHT).count();
        assert_eq!(blocked, expected);
    }
}
