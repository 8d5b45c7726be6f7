use std::f64::consts::PI;

use crate::api::{
    Axes, Figure, GridSlot, GridSpec, LegendLocation, LegendSpec, LineSpec, PatchShape,
    PatchStyle, TextSpec,
};
use crate::core::NoiseSource;
use crate::core::sampling::{linspace, map_samples};
use crate::error::FigureResult;
use crate::render::colors::{
    AZURE, DARKGOLDENROD, DARKGREEN, FIREBRICK, LEMONCHIFFON, LIGHTCYAN, LIGHTGREEN, NAVY,
    PALETURQUOISE, ROYALBLUE, SALMON, SHORT_Y, SIENNA, WHITE,
};
use crate::render::{LineStrokeStyle, TextVAlign};

use super::FigureContext;
use super::styles;

const PLUME_NOISE_SALT: u64 = 4;
const WAKE_NOISE_SALT: u64 = 5;

const PLUME_COUNT: usize = 7;
const PLUME_BASE_Y: f64 = 0.45;
const SWIRL_COUNT: usize = 5;
const SUN_RAYS: [f64; 3] = [0.2, 0.5, 0.8];

pub(super) fn natural_schlieren_effects(context: &FigureContext) -> FigureResult<Figure> {
    let mut figure = Figure::new(10.0, 6.0)
        .with_style(styles::plain_pastel())
        .with_grid(GridSpec::new(1, 2).with_spacing(0.0, 0.25))
        .with_title(
            "Figure SP2: Conceptual Schlieren Effects in Nature",
            Some(14.0),
        );

    thermal_plumes(
        figure.add_subplot(GridSlot::cell(0, 0)),
        &mut context.noise(PLUME_NOISE_SALT),
    );
    water_wake(
        figure.add_subplot(GridSlot::cell(0, 1)),
        &mut context.noise(WAKE_NOISE_SALT),
    );
    Ok(figure)
}

fn thermal_plumes(ax: &mut Axes, noise: &mut NoiseSource) {
    ax.set_title("A) Thermal Plumes in Air")
        .set_facecolor(AZURE);

    ax.add_patch(
        PatchShape::rect((-0.1, -0.1), 1.2, 0.3),
        PatchStyle::colored(LIGHTGREEN).edge(DARKGREEN),
    );
    let fur = PatchStyle::colored(SIENNA).alpha(0.8);
    for shape in [
        PatchShape::ellipse((0.5, 0.35), 0.3, 0.18),
        PatchShape::rotated_ellipse((0.32, 0.42), 0.12, 0.1, 30.0),
        PatchShape::rotated_ellipse((0.28, 0.52), 0.04, 0.1, 50.0),
        PatchShape::rotated_ellipse((0.33, 0.53), 0.04, 0.1, 70.0),
    ] {
        ax.add_patch(shape, fur.clone());
    }
    ax.text(
        0.5,
        0.2,
        "Warm Animal",
        TextSpec::centered().v_align(TextVAlign::Top).size(9.0),
    );

    for plume in 0..PLUME_COUNT {
        let start_x =
            0.35 + plume as f64 * 0.3 / PLUME_COUNT as f64 + noise.uniform(-0.02, 0.02);
        let height = 0.4 + noise.uniform(-0.05, 0.05);
        let ys = linspace(PLUME_BASE_Y, PLUME_BASE_Y + height, 30);
        let phase = noise.uniform(0.0, 1.0) * PI;
        let xs = map_samples(&ys, |y| {
            let amplitude = 0.02 + (y - PLUME_BASE_Y) * 0.15;
            start_x + amplitude * (y * 15.0 / height * PI + phase).sin()
        });
        ax.plot(&xs, &ys, LineSpec::solid(SALMON).width(1.0).alpha(0.5));
    }
    ax.text(
        0.5,
        0.9,
        "Thermal Plumes\n(Refractive Index Gradients)",
        TextSpec::middle().size(8.0).color(FIREBRICK),
    );

    let path_xs = linspace(0.05, 0.95, 50);
    let path_ys = map_samples(&path_xs, |x| {
        0.65 + 0.015 * (x * 10.0 * PI).sin() * (-(x - 0.5).powi(2) / 0.1).exp()
    });
    ax.plot(
        &[0.05, 0.95],
        &[0.8, 0.8],
        LineSpec::dashed(SHORT_Y)
            .alpha(0.6)
            .label("Undisturbed Light Path"),
    )
    .plot(
        &path_xs,
        &path_ys,
        LineSpec::solid(SHORT_Y)
            .alpha(0.8)
            .label("Light Path through Plume"),
    )
    .legend(LegendSpec::at(LegendLocation::LowerLeft).font_size(7.0))
    .set_xlim(0.0, 1.0)
    .set_ylim(0.1, 1.0)
    .hide_xticks()
    .hide_yticks();
}

fn water_wake(ax: &mut Axes, noise: &mut NoiseSource) {
    ax.set_title("B) Disturbances in Water")
        .set_facecolor(PALETURQUOISE);

    let scales = PatchStyle::colored(ROYALBLUE).alpha(0.9);
    ax.add_patch(PatchShape::ellipse((0.3, 0.5), 0.3, 0.12), scales.clone())
        .add_patch(
            PatchShape::polygon(vec![(0.15, 0.5), (0.0, 0.55), (0.0, 0.45)]),
            scales,
        )
        .add_patch(
            PatchShape::circle((0.42, 0.51), 0.01),
            PatchStyle::colored(WHITE),
        )
        .text(
            0.3,
            0.6,
            "Moving Fish",
            TextSpec::centered().v_align(TextVAlign::Bottom).size(9.0),
        );

    for swirl in 0..SWIRL_COUNT {
        let center_x = 0.1 - swirl as f64 * 0.05 + noise.uniform(-0.05, 0.05);
        let center_y = 0.5 + noise.uniform(-0.1, 0.1);
        let radius = 0.05 + noise.uniform(0.0, 1.0) * 0.08;
        let width = 1.0 + noise.uniform(0.0, 1.0) * 0.5;
        let alpha = 0.6 + noise.uniform(0.0, 1.0) * 0.3;
        ax.add_patch(
            PatchShape::circle((center_x, center_y), radius),
            PatchStyle::outline(LIGHTCYAN)
                .line_width(width)
                .dashed()
                .alpha(alpha),
        );
        if swirl < 3 {
            let eddy = (
                center_x + noise.uniform(-0.02, 0.02),
                center_y + noise.uniform(-0.02, 0.02),
            );
            ax.add_patch(
                PatchShape::circle(eddy, radius * 0.4),
                PatchStyle::outline(LIGHTCYAN)
                    .line_style(LineStrokeStyle::Dotted)
                    .alpha(0.5),
            );
        }
    }
    ax.text(
        0.6,
        0.2,
        "Wake / Mixing\n(Refractive Index Gradients)",
        TextSpec::middle().size(8.0).color(NAVY),
    );

    let sunlight = LineSpec::solid(LEMONCHIFFON).width(1.5).alpha(0.7);
    for x in SUN_RAYS {
        if x < 0.3 {
            let ys = linspace(0.95, 0.05, 50);
            let xs = map_samples(&ys, |y| {
                x + 0.03 * (y * 8.0 * PI + 0.5).sin() * (-(y - 0.4).powi(2) / 0.1).exp()
            });
            ax.plot(&xs, &ys, sunlight.clone());
        } else {
            ax.plot(&[x, x - 0.05], &[0.95, 0.05], sunlight.clone());
        }
    }
    ax.text(
        0.8,
        0.9,
        "Sunlight",
        TextSpec::centered()
            .v_align(TextVAlign::Bottom)
            .size(8.0)
            .color(DARKGOLDENROD),
    )
    .set_xlim(-0.1, 1.1)
    .set_ylim(0.0, 1.0)
    .hide_xticks()
    .hide_yticks();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Artist;

    fn count_lines(ax: &Axes) -> usize {
        ax.artists()
            .iter()
            .filter(|artist| matches!(artist, Artist::Line(_)))
            .count()
    }

    #[test]
    fn plumes_and_sun_rays_are_drawn() {
        let figure = natural_schlieren_effects(&FigureContext::default()).unwrap();
        assert_eq!(count_lines(&figure.axes()[0]), PLUME_COUNT + 2);
        assert_eq!(count_lines(&figure.axes()[1]), SUN_RAYS.len());
    }

    #[test]
    fn wake_swirls_stay_behind_the_tail() {
        let figure = natural_schlieren_effects(&FigureContext::new(11)).unwrap();
        let swirl_centres: Vec<f64> = figure.axes()[1]
            .artists()
            .iter()
            .filter_map(|artist| match artist {
                Artist::Patch(patch) => match &patch.shape {
                    PatchShape::Circle { cx, radius, .. } if *radius > 0.011 => Some(*cx),
                    _ => None,
                },
                _ => None,
            })
            .collect();
        assert_eq!(swirl_centres.len(), SWIRL_COUNT + 3);
        assert!(swirl_centres.iter().all(|x| *x < 0.2));
    }
}
