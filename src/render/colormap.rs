use serde::{Deserialize, Serialize};

use super::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColormapKind {
    Viridis,
    Coolwarm,
    Gray,
    Hot,
    YlOrRd,
    RdBu,
    Seismic,
}

const VIRIDIS: [u32; 10] = [
    0x440154, 0x482878, 0x3E4989, 0x31688E, 0x26828E, 0x1F9E89, 0x35B779, 0x6ECE58, 0xB5DE2B,
    0xFDE725,
];
const COOLWARM: [u32; 9] = [
    0x3B4CC0, 0x6282EA, 0x8DB0FE, 0xB8D0F9, 0xDDDDDD, 0xF5C4AD, 0xF49A7B, 0xDE604D, 0xB40426,
];
const YL_OR_RD: [u32; 9] = [
    0xFFFFCC, 0xFFEDA0, 0xFED976, 0xFEB24C, 0xFD8D3C, 0xFC4E2A, 0xE31A1C, 0xBD0026, 0x800026,
];
const RD_BU: [u32; 11] = [
    0x67001F, 0xB2182B, 0xD6604D, 0xF4A582, 0xFDDBC7, 0xF7F7F7, 0xD1E5F0, 0x92C5DE, 0x4393C3,
    0x2166AC, 0x053061,
];

impl ColormapKind {
    /// `(position, color)` anchors in increasing position order.
    fn stops(self) -> Vec<(f64, Color)> {
        match self {
            Self::Viridis => even_stops(&VIRIDIS),
            Self::Coolwarm => even_stops(&COOLWARM),
            Self::YlOrRd => even_stops(&YL_OR_RD),
            Self::RdBu => even_stops(&RD_BU),
            Self::Gray => vec![(0.0, Color::BLACK), (1.0, Color::WHITE)],
            Self::Hot => vec![
                (0.0, Color::rgb(0.0416, 0.0, 0.0)),
                (0.365, Color::rgb(1.0, 0.0, 0.0)),
                (0.746, Color::rgb(1.0, 1.0, 0.0)),
                (1.0, Color::WHITE),
            ],
            Self::Seismic => vec![
                (0.0, Color::rgb(0.0, 0.0, 0.3)),
                (0.25, Color::rgb(0.0, 0.0, 1.0)),
                (0.5, Color::WHITE),
                (0.75, Color::rgb(1.0, 0.0, 0.0)),
                (1.0, Color::rgb(0.5, 0.0, 0.0)),
            ],
        }
    }
}

fn even_stops(hex: &[u32]) -> Vec<(f64, Color)> {
    let last = hex.len().saturating_sub(1).max(1) as f64;
    hex.iter()
        .enumerate()
        .map(|(index, &rgb)| (index as f64 / last, Color::from_hex(rgb)))
        .collect()
}

/// Continuous colormap sampled by linear interpolation between anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colormap {
    pub kind: ColormapKind,
    pub reversed: bool,
}

impl Colormap {
    #[must_use]
    pub const fn new(kind: ColormapKind) -> Self {
        Self {
            kind,
            reversed: false,
        }
    }

    #[must_use]
    pub const fn reversed(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    /// Color at `t`; `t` is clamped to `[0, 1]` and NaN takes the color of the
    /// first anchor, whichever direction the map runs.
    #[must_use]
    pub fn sample(self, t: f64) -> Color {
        let t = if t.is_nan() {
            0.0
        } else if self.reversed {
            1.0 - t.clamp(0.0, 1.0)
        } else {
            t.clamp(0.0, 1.0)
        };
        let stops = self.kind.stops();
        let upper = stops
            .iter()
            .position(|(position, _)| *position >= t)
            .unwrap_or(stops.len() - 1);
        if upper == 0 {
            return stops[0].1;
        }
        let (p0, c0) = stops[upper - 1];
        let (p1, c1) = stops[upper];
        let span = p1 - p0;
        if span <= 0.0 {
            return c1;
        }
        c0.lerp(c1, (t - p0) / span)
    }

    /// Color for `value` normalized over `[vmin, vmax]`.
    #[must_use]
    pub fn sample_range(self, value: f64, vmin: f64, vmax: f64) -> Color {
        let span = vmax - vmin;
        if !span.is_finite() || span == 0.0 {
            return self.sample(0.5);
        }
        self.sample((value - vmin) / span)
    }
}

/// Categorical color cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Palette {
    #[default]
    Tab10,
    Viridis,
    Husl,
    Muted,
    Pastel,
    Set2,
}

const TAB10: [u32; 10] = [
    0x1F77B4, 0xFF7F0E, 0x2CA02C, 0xD62728, 0x9467BD, 0x8C564B, 0xE377C2, 0x7F7F7F, 0xBCBD22,
    0x17BECF,
];
const HUSL: [u32; 6] = [0xF77189, 0xBB9832, 0x50B131, 0x33B09C, 0x36ADA4, 0xE775F4];
const MUTED: [u32; 10] = [
    0x4878D0, 0xEE854A, 0x6ACC64, 0xD65F5F, 0x956CB4, 0x8C613C, 0xDC7EC0, 0x797979, 0xD5BB67,
    0x82C6E2,
];
const PASTEL: [u32; 10] = [
    0xA1C9F4, 0xFFB482, 0x8DE5A1, 0xFF9F9B, 0xD0BBFF, 0xDEBB9B, 0xFAB0E4, 0xCFCFCF, 0xFFFEA3,
    0xB9F2F0,
];
const SET2: [u32; 8] = [
    0x66C2A5, 0xFC8D62, 0x8DA0CB, 0xE78AC3, 0xA6D854, 0xFFD92F, 0xE5C494, 0xB3B3B3,
];

/// Colors a palette yields when no count is requested.
pub const DEFAULT_PALETTE_SIZE: usize = 6;

impl Palette {
    /// `n` colors; fixed palettes cycle, continuous ones are resampled so the
    /// extremes of the underlying colormap are skipped.
    #[must_use]
    pub fn colors(self, n: usize) -> Vec<Color> {
        let cycle = |hex: &[u32]| -> Vec<Color> {
            (0..n).map(|i| Color::from_hex(hex[i % hex.len()])).collect()
        };
        match self {
            Self::Tab10 => cycle(&TAB10),
            Self::Husl => cycle(&HUSL),
            Self::Muted => cycle(&MUTED),
            Self::Pastel => cycle(&PASTEL),
            Self::Set2 => cycle(&SET2),
            Self::Viridis => {
                let map = Colormap::new(ColormapKind::Viridis);
                (1..=n)
                    .map(|i| map.sample(i as f64 / (n + 1) as f64))
                    .collect()
            }
        }
    }

    /// The property cycle a figure gets after selecting this palette.
    #[must_use]
    pub fn cycle(self) -> Vec<Color> {
        match self {
            Self::Tab10 => self.colors(TAB10.len()),
            _ => self.colors(DEFAULT_PALETTE_SIZE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Colormap, ColormapKind, Palette};
    use crate::render::Color;

    #[test]
    fn colormap_hits_its_end_stops() {
        let gray = Colormap::new(ColormapKind::Gray);
        assert_eq!(gray.sample(0.0), Color::BLACK);
        assert_eq!(gray.sample(1.0), Color::WHITE);
        assert_eq!(gray.sample(7.0), Color::WHITE);
        assert_eq!(gray.sample(f64::NAN), Color::BLACK);
        assert_eq!(gray.reversed().sample(0.0), Color::WHITE);
    }

    #[test]
    fn nan_takes_the_first_anchor_in_both_directions() {
        let gray = Colormap::new(ColormapKind::Gray);
        assert_eq!(gray.reversed().sample(f64::NAN), Color::BLACK);
        assert_eq!(gray.sample(f64::INFINITY), Color::WHITE);
        assert_eq!(gray.reversed().sample(f64::NEG_INFINITY), Color::WHITE);
    }

    #[test]
    fn seismic_is_white_in_the_middle() {
        let seismic = Colormap::new(ColormapKind::Seismic);
        assert_eq!(seismic.sample(0.5), Color::WHITE);
        assert_eq!(seismic.sample_range(3.0, 3.0, 3.0), Color::WHITE);
    }

    #[test]
    fn palettes_cycle_and_resample() {
        let set2 = Palette::Set2.colors(10);
        assert_eq!(set2[0], set2[8]);
        let viridis = Palette::Viridis.colors(4);
        assert_eq!(viridis.len(), 4);
        assert_ne!(viridis[0], Colormap::new(ColormapKind::Viridis).sample(0.0));
        assert_eq!(Palette::Muted.cycle().len(), 6);
    }
}
