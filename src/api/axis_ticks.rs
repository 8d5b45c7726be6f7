use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::ScaleKind;

/// Tick values of one axis; most axes carry fewer than a dozen.
pub type TickValues = SmallVec<[f64; 12]>;

/// Steps tried, in order, for each decade of tick spacing.
const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

pub(super) const MAX_TICK_BINS: usize = 9;

/// Tick budget for an axis of `axis_span_px` pixels whose labels need
/// about `label_extent_px` each.
pub(super) fn axis_tick_target_count(axis_span_px: f64, label_extent_px: f64) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return 1;
    }
    if !label_extent_px.is_finite() || label_extent_px <= 0.0 {
        return MAX_TICK_BINS;
    }

    let raw = (axis_span_px / label_extent_px).floor() as usize;
    raw.clamp(1, MAX_TICK_BINS)
}

/// Label format of an axis' major ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TickFormat {
    /// Plain decimals with as many places as the tick step needs; large or
    /// tiny magnitudes move into a shared `1e±k` offset label.
    #[default]
    Auto,
    /// `%.pf`
    Fixed(usize),
    /// `%.pe`
    Scientific(usize),
}

/// Rendered labels for a set of tick values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickLabels {
    pub labels: Vec<String>,
    /// Multiplier shown once at the end of the axis (`1e-5`).
    pub offset_text: Option<String>,
}

/// "Nice" linear ticks covering `[min, max]` with at most `max_bins` intervals.
#[must_use]
pub fn nice_linear_ticks(min: f64, max: f64, max_bins: usize) -> TickValues {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    let span = high - low;
    if !low.is_finite() || !high.is_finite() {
        return TickValues::new();
    }
    if span <= 0.0 {
        return std::iter::once(low).collect();
    }

    let bins = max_bins.max(1) as f64;
    let raw_step = span / bins;
    let magnitude = 10_f64.powi(raw_step.log10().floor() as i32);

    let mut ticks = TickValues::new();
    for multiplier in NICE_STEPS {
        let step = multiplier * magnitude;
        if step * (1.0 + 1e-9) < raw_step {
            continue;
        }
        ticks.clear();
        let first = (low / step - 1e-9).ceil() as i64;
        let last = (high / step + 1e-9).floor() as i64;
        for index in first..=last {
            let value = index as f64 * step;
            ticks.push(if approx_equal(value, 0.0) { 0.0 } else { value });
        }
        if ticks.len() >= 2 {
            break;
        }
    }
    ticks
}

/// Decade ticks `10^k` inside `[min, max]`. Narrow ranges fall back to a
/// 1-2-5 ladder; wide ones keep every n-th decade.
#[must_use]
pub fn log_decade_ticks(min: f64, max: f64, max_bins: usize) -> TickValues {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    if !(low > 0.0) || !high.is_finite() {
        return TickValues::new();
    }

    let first = (low.log10() - 1e-9).ceil() as i32;
    let last = (high.log10() + 1e-9).floor() as i32;
    let decades: TickValues = (first..=last).map(|exp| 10_f64.powi(exp)).collect();
    if decades.len() >= 2 {
        let stride = decades.len().div_ceil(max_bins.max(1)).max(1);
        return decades.into_iter().step_by(stride).collect();
    }

    let mut ladder = TickValues::new();
    for exp in (low.log10().floor() as i32)..=(high.log10().ceil() as i32) {
        let decade = 10_f64.powi(exp);
        for multiplier in [1.0, 2.0, 5.0] {
            let candidate = decade * multiplier;
            if candidate >= low * (1.0 - 1e-9) && candidate <= high * (1.0 + 1e-9) {
                ladder.push(candidate);
            }
        }
    }
    ladder
}

#[must_use]
pub fn ticks_for_scale(kind: ScaleKind, min: f64, max: f64, max_bins: usize) -> TickValues {
    match kind {
        ScaleKind::Linear => nice_linear_ticks(min, max, max_bins),
        ScaleKind::Log10 => log_decade_ticks(min, max, max_bins),
    }
}

#[must_use]
pub fn format_ticks(values: &[f64], format: TickFormat, scale: ScaleKind) -> TickLabels {
    match (format, scale) {
        (TickFormat::Fixed(precision), _) => TickLabels {
            labels: values
                .iter()
                .map(|value| format!("{:.*}", precision, clean_zero(*value)))
                .collect(),
            offset_text: None,
        },
        (TickFormat::Scientific(precision), _) => TickLabels {
            labels: values
                .iter()
                .map(|value| format_scientific(*value, precision))
                .collect(),
            offset_text: None,
        },
        (TickFormat::Auto, ScaleKind::Log10) => TickLabels {
            labels: values.iter().copied().map(format_power_of_ten).collect(),
            offset_text: None,
        },
        (TickFormat::Auto, ScaleKind::Linear) => format_linear_auto(values),
    }
}

fn format_linear_auto(values: &[f64]) -> TickLabels {
    let largest = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if largest == 0.0 {
        return TickLabels {
            labels: values.iter().map(|_| "0".to_owned()).collect(),
            offset_text: None,
        };
    }

    let order = largest.log10().floor() as i32;
    let exponent = if order >= 6 || order <= -5 { order } else { 0 };
    let divisor = 10_f64.powi(exponent);
    let scaled: Vec<f64> = values.iter().map(|value| value / divisor).collect();
    let decimals = decimals_for(&scaled);

    TickLabels {
        labels: scaled
            .iter()
            .map(|value| format!("{:.*}", decimals, clean_zero(*value)))
            .collect(),
        offset_text: (exponent != 0).then(|| format!("1e{exponent}")),
    }
}

/// Fewest decimals that represent every value exactly.
fn decimals_for(values: &[f64]) -> usize {
    (0..=6)
        .find(|&decimals| {
            let factor = 10_f64.powi(decimals as i32);
            values
                .iter()
                .all(|value| ((value * factor).round() - value * factor).abs() < 1e-6)
        })
        .unwrap_or(6)
}

fn clean_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// C-style `%.pe`: two-digit signed exponent.
#[must_use]
pub fn format_scientific(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*e}", precision, clean_zero(value));
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exp: i32 = exponent.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => formatted,
    }
}

fn format_power_of_ten(value: f64) -> String {
    let exp = value.log10();
    if approx_equal(exp, exp.round()) {
        format!("10{}", superscript(exp.round() as i32))
    } else {
        let order = exp.floor() as i32;
        let mantissa = value / 10_f64.powi(order);
        format!("{mantissa:.0}×10{}", superscript(order))
    }
}

fn superscript(exp: i32) -> String {
    exp.to_string()
        .chars()
        .map(|c| match c {
            '-' => '⁻',
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            other => other,
        })
        .collect()
}

fn approx_equal(lhs: f64, rhs: f64) -> bool {
    let scale = lhs.abs().max(rhs.abs()).max(1.0);
    (lhs - rhs).abs() <= scale * 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_ticks_use_nice_steps() {
        let unit = nice_linear_ticks(0.0, 1.0, 5);
        assert_eq!(unit.len(), 6);
        for (tick, expected) in unit.iter().zip([0.0, 0.2, 0.4, 0.6, 0.8, 1.0]) {
            assert!((tick - expected).abs() < 1e-12);
        }
        assert_eq!(
            nice_linear_ticks(-200.0, 0.0, 4).as_slice(),
            &[-200.0, -150.0, -100.0, -50.0, 0.0]
        );
    }

    #[test]
    fn log_ticks_are_decades() {
        assert_eq!(
            log_decade_ticks(1e-3, 10.0, 9).as_slice(),
            &[1e-3, 1e-2, 1e-1, 1.0, 10.0]
        );
        assert_eq!(log_decade_ticks(2.0, 9.0, 9).as_slice(), &[2.0, 5.0]);
    }

    #[test]
    fn auto_labels_pick_decimals_from_step() {
        let labels = format_ticks(&[0.0, 0.25, 0.5], TickFormat::Auto, ScaleKind::Linear);
        assert_eq!(labels.labels, vec!["0.00", "0.25", "0.50"]);
        assert_eq!(labels.offset_text, None);

        let tiny = format_ticks(&[0.0, 2e-5, 4e-5], TickFormat::Auto, ScaleKind::Linear);
        assert_eq!(tiny.labels, vec!["0", "2", "4"]);
        assert_eq!(tiny.offset_text.as_deref(), Some("1e-5"));
    }

    #[test]
    fn printf_style_formats() {
        assert_eq!(format_scientific(1.0e-5, 1), "1.0e-05");
        assert_eq!(format_scientific(3.2e4, 2), "3.20e+04");
        let fixed = format_ticks(&[1.3337], TickFormat::Fixed(6), ScaleKind::Linear);
        assert_eq!(fixed.labels, vec!["1.333700"]);
        let log = format_ticks(&[1e-3, 10.0], TickFormat::Auto, ScaleKind::Log10);
        assert_eq!(log.labels, vec!["10⁻³", "10¹"]);
    }
}
