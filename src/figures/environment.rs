use crate::api::{
    Aspect, Axes, ColorbarSpec, Figure, GridLines, GridSlot, GridSpec, ImageSpec, LegendLocation,
    LegendSpec, LineSpec, PatchStyle, ScatterSpec, TextSpec,
};
use crate::core::ScalarField;
use crate::core::fields::navigation_features;
use crate::core::profiles::{BoundaryLayer, Thermocline, air_density};
use crate::core::sampling::{linspace, map_samples};
use crate::core::seawater::linear_thermal_density;
use crate::error::FigureResult;
use crate::render::colors::{
    BLACK, BLUE, LIGHTBLUE, LIGHTCORAL, LIMEGREEN, MAGENTA, RED, SHORT_G, SHORT_M, SKYBLUE,
    YELLOW,
};
use crate::render::{Color, ColormapKind, LineStrokeStyle, MarkerShape, TextHAlign, TextVAlign};

use super::FigureContext;
use super::styles;

const OCEAN_REFERENCE_DENSITY: f64 = 1020.0;
const OCEAN_THERMAL_EXPANSION: f64 = 0.2;

const SCENARIOS: [(&str, f64, f64); 5] = [
    ("Camouflaged\nPrey (Water)", 20.0, 85.0),
    ("Turbulent\nWater Flow", 15.0, 75.0),
    ("Thermal\nPlumes (Air)", 10.0, 90.0),
    ("Boundary\nLayers (Air)", 25.0, 80.0),
    ("Subtle Prey\nMoment (Water)", 10.0, 88.0),
];

const GUIDED_PATH: [(f64, f64); 6] = [
    (1.0, 1.0),
    (2.5, 2.0),
    (4.5, 1.5),
    (6.0, 3.0),
    (7.5, 5.5),
    (9.0, 8.0),
];
const DIRECT_PATH: [(f64, f64); 5] = [(1.0, 1.0), (3.0, 2.5), (5.0, 4.0), (7.0, 5.5), (9.0, 7.0)];

pub(super) fn environmental_applications(_context: &FigureContext) -> FigureResult<Figure> {
    let mut figure = Figure::new(14.0, 10.0)
        .with_style(styles::dotted_grid_muted())
        .with_grid(GridSpec::new(2, 2).with_spacing(0.4, 0.3))
        .with_title(
            "Figure 4: Environmental Applications and Selective Advantages",
            Some(14.0),
        );

    ocean_profile(figure.add_subplot(GridSlot::cell(0, 0)));
    air_profile(figure.add_subplot(GridSlot::cell(0, 1)));
    predator_prey(figure.add_subplot(GridSlot::cell(1, 0)));
    navigation(figure.add_subplot(GridSlot::cell(1, 1)))?;
    Ok(figure)
}

fn caption_below(ax: &mut Axes, text: &str) {
    ax.text(
        0.01,
        -0.25,
        text,
        TextSpec::new()
            .size(7.0)
            .align(TextHAlign::Left)
            .v_align(TextVAlign::Top)
            .in_axes(),
    );
}

fn dotted_grid() -> GridLines {
    GridLines::on().style(LineStrokeStyle::Dotted).alpha(0.7)
}

fn twin_temperature(
    ax: &mut Axes,
    temperature: &[f64],
    vertical: &[f64],
    line: Color,
    label: Color,
) {
    let twin = ax.twin_x();
    twin.plot(
        temperature,
        vertical,
        LineSpec::dotted(line).width(2.0).label("Temperature (°C)"),
    )
    .set_xlabel_colored("Temperature (°C)", label);
    twin.x_axis_mut().tick_label_color = label;
}

fn ocean_profile(ax: &mut Axes) {
    let thermocline = Thermocline::default();
    let depth = linspace(0.0, 1000.0, 200);
    let elevation: Vec<f64> = depth.iter().map(|d| -d).collect();
    let temperature = map_samples(&depth, |d| thermocline.temperature_at(d));
    let density = map_samples(&temperature, |t| {
        linear_thermal_density(
            t,
            OCEAN_REFERENCE_DENSITY,
            OCEAN_THERMAL_EXPANSION,
            thermocline.surface_temp_c,
        )
    });

    ax.plot(
        &density,
        &elevation,
        LineSpec::solid(BLUE)
            .width(2.5)
            .label("Water Density (kg/m³)"),
    )
    .set_xlabel("Density (kg/m³)")
    .set_ylabel("Depth (m)")
    .set_ylim(-1000.0, 0.0)
    .axhspan(
        -thermocline.end_depth_m,
        -thermocline.start_depth_m,
        PatchStyle::colored(YELLOW)
            .alpha(0.2)
            .label("Thermocline Zone"),
    );
    twin_temperature(ax, &temperature, &elevation, RED, RED);
    ax.twin_x().set_xlim(0.0, 30.0);

    ax.set_title("A) Aquatic Density & Temp. Gradients")
        .legend(LegendSpec::at(LegendLocation::LowerRight).with_twin())
        .grid_with(dotted_grid());
    caption_below(
        ax,
        "Source: Profiles simulated based on typical oceanic data (e.g., NOAA thermocline patterns).",
    );
}

fn air_profile(ax: &mut Axes) {
    let layer = BoundaryLayer::default();
    let height = linspace(0.0, 2000.0, 200);
    let temperature = map_samples(&height, |h| layer.temperature_at(h));
    let density: Vec<f64> = temperature
        .iter()
        .zip(&height)
        .map(|(&t, &h)| air_density(t, h))
        .collect();

    ax.plot(
        &density,
        &height,
        LineSpec::solid(SHORT_G)
            .width(2.5)
            .label("Air Density (kg/m³)"),
    )
    .set_xlabel("Air Density (kg/m³)")
    .set_ylabel("Height (m)")
    .set_ylim(0.0, 2000.0)
    .axhspan(
        0.0,
        layer.mixing_height_m,
        PatchStyle::colored(LIGHTBLUE)
            .alpha(0.2)
            .label("Mixing Layer"),
    );
    twin_temperature(ax, &temperature, &height, SHORT_M, MAGENTA);

    ax.set_title("B) Aerial Density & Temp. Variations")
        .legend(LegendSpec::at(LegendLocation::UpperRight).with_twin())
        .grid_with(dotted_grid());
    caption_below(
        ax,
        "Source: Profiles simulated based on typical atmospheric conditions (e.g., ISA, boundary layers).",
    );
}

fn predator_prey(ax: &mut Axes) {
    let bar_width = 0.35;
    let positions: Vec<f64> = (0..SCENARIOS.len()).map(|i| i as f64).collect();
    let labels: Vec<&str> = SCENARIOS.iter().map(|(label, _, _)| *label).collect();
    let groups = [
        ("Traditional Vision", LIGHTCORAL, -0.5),
        ("Schlieren Vision", SKYBLUE, 0.5),
    ];

    for (group, (label, color, side)) in groups.into_iter().enumerate() {
        let centres: Vec<f64> = positions.iter().map(|x| x + side * bar_width).collect();
        let rates: Vec<f64> = SCENARIOS
            .iter()
            .map(|(_, traditional, schlieren)| if group == 0 { *traditional } else { *schlieren })
            .collect();
        ax.bar(
            &centres,
            &rates,
            bar_width,
            PatchStyle::filled(color).alpha(0.85).label(label),
        );
        for (x, rate) in centres.iter().zip(&rates) {
            ax.text(
                *x,
                rate + 1.5,
                format!("{rate}%"),
                TextSpec::centered().v_align(TextVAlign::Bottom).size(8.0),
            );
        }
    }

    ax.set_xlabel("Scenario")
        .set_ylabel("Detection Success Rate (%)")
        .set_title("C) Predator-Prey Advantage (Illustrative)")
        .set_xticklabels(&positions, &labels, 15.0, Some(TextHAlign::Right))
        .legend(LegendSpec::at(LegendLocation::UpperLeft))
        .set_ylim(0.0, 105.0);
}

fn navigation(ax: &mut Axes) -> FigureResult<()> {
    let field = ScalarField::sample(
        linspace(0.0, 10.0, 50),
        linspace(0.0, 10.0, 50),
        navigation_features,
    )?;
    ax.contourf(field, 15, ImageSpec::of(ColormapKind::Coolwarm).alpha(0.7));

    let (guided_x, guided_y): (Vec<f64>, Vec<f64>) = GUIDED_PATH.iter().copied().unzip();
    let (direct_x, direct_y): (Vec<f64>, Vec<f64>) = DIRECT_PATH.iter().copied().unzip();
    let target_y = guided_y[guided_y.len() - 1].max(direct_y[direct_y.len() - 1]);
    ax.plot(
        &guided_x,
        &guided_y,
        LineSpec::solid(SHORT_G)
            .width(3.0)
            .marker(MarkerShape::Circle)
            .marker_size(5.0)
            .label("Schlieren-guided Path"),
    )
    .plot(
        &direct_x,
        &direct_y,
        LineSpec::dashed(BLACK).width(2.5).label("Traditional Path"),
    )
    .scatter(
        &[1.0, 9.0],
        &[1.0, target_y],
        ScatterSpec::new()
            .colors(vec![LIMEGREEN, RED])
            .size(100.0)
            .marker(MarkerShape::Star)
            .edge(BLACK)
            .edge_width(1.0),
    )
    .text(
        1.0,
        0.5,
        "Start",
        TextSpec::centered().v_align(TextVAlign::Top).bold(),
    )
    .text(
        9.0,
        target_y + 0.5,
        "Target",
        TextSpec::centered().v_align(TextVAlign::Bottom).bold(),
    );

    ax.set_xlabel("X Coordinate (Arbitrary Units)")
        .set_ylabel("Y Coordinate (Arbitrary Units)")
        .set_title("D) Navigation with Density Cues (Illustrative)")
        .legend(LegendSpec::at(LegendLocation::UpperLeft))
        .set_aspect(Aspect::EqualBox)
        .colorbar(
            ColorbarSpec::new()
                .label("Relative Density Feature Strength")
                .shrink(0.8)
                .aspect(10.0),
        );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Artist;

    #[test]
    fn navigation_panel_has_contours_and_a_colorbar() {
        let figure = environmental_applications(&FigureContext::default()).unwrap();
        let map = &figure.axes()[3];
        assert!(matches!(map.artists()[0], Artist::Image(_)));
        assert!(map.colorbar_spec().is_some());
    }

    #[test]
    fn profile_legends_merge_the_twin_temperature() {
        let figure = environmental_applications(&FigureContext::default()).unwrap();
        let ocean = &figure.axes()[0];
        let mut labels: Vec<_> = ocean.artists().iter().filter_map(Artist::label).collect();
        let twin = ocean.twin().unwrap();
        labels.extend(twin.artists().iter().filter_map(Artist::label));
        assert_eq!(
            labels,
            vec![
                "Water Density (kg/m³)",
                "Thermocline Zone",
                "Temperature (°C)",
            ]
        );
    }
}
