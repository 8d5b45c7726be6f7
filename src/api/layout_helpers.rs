use crate::core::PixelRect;

/// Line advance as a multiple of the font size.
pub(super) const LINE_SPACING: f64 = 1.2;

pub(super) fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    // Keep this estimate deterministic and backend-independent.
    text.lines()
        .map(|line| {
            line.chars().fold(0.0, |acc, ch| {
                acc + match ch {
                    '0'..='9' => 0.64,
                    '.' | ',' | ':' | ';' | '\'' | '|' | 'i' | 'l' | 'j' => 0.3,
                    '-' | '+' | '%' | '(' | ')' | '[' | ']' => 0.42,
                    ' ' => 0.32,
                    'm' | 'w' | 'M' | 'W' => 0.86,
                    'A'..='Z' => 0.68,
                    _ => 0.56,
                }
            })
        })
        .fold(0.0, f64::max)
        * font_size_px
}

pub(super) fn estimate_text_height_px(text: &str, font_size_px: f64) -> f64 {
    let lines = text.lines().count().max(1) as f64;
    lines * font_size_px * LINE_SPACING
}

/// Width and height of the axis-aligned box around a rotated text block.
pub(super) fn rotated_text_extent_px(
    text: &str,
    font_size_px: f64,
    rotation_deg: f64,
) -> (f64, f64) {
    let width = estimate_text_width_px(text, font_size_px);
    let height = estimate_text_height_px(text, font_size_px);
    let angle = rotation_deg.to_radians();
    let (sin, cos) = (angle.sin().abs(), angle.cos().abs());
    (width * cos + height * sin, width * sin + height * cos)
}

/// Largest centred sub-rectangle of `rect` with `height / width == ratio`.
pub(super) fn fit_aspect(rect: PixelRect, ratio: f64) -> PixelRect {
    if !ratio.is_finite() || ratio <= 0.0 || !rect.is_valid() {
        return rect;
    }
    let (cx, cy) = rect.center();
    if rect.height / rect.width > ratio {
        let height = rect.width * ratio;
        PixelRect::new(rect.x, cy - height * 0.5, rect.width, height)
    } else {
        let width = rect.height / ratio;
        PixelRect::new(cx - width * 0.5, rect.y, width, rect.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wider_text_measures_wider() {
        let short = estimate_text_width_px("10", 10.0);
        let long = estimate_text_width_px("1000", 10.0);
        assert!(long > short);
        assert_eq!(
            estimate_text_width_px("ab\nabcd", 10.0),
            estimate_text_width_px("abcd", 10.0)
        );
        assert!((estimate_text_height_px("a\nb", 10.0) - 24.0).abs() < 1e-9);
    }

    #[test]
    fn rotation_swaps_extent() {
        let (w, h) = rotated_text_extent_px("label", 10.0, 90.0);
        let (w0, h0) = rotated_text_extent_px("label", 10.0, 0.0);
        assert!((w - h0).abs() < 1e-9);
        assert!((h - w0).abs() < 1e-9);
    }

    #[test]
    fn aspect_fit_is_centred() {
        let fitted = fit_aspect(PixelRect::new(0.0, 0.0, 200.0, 100.0), 1.0);
        assert_eq!(fitted, PixelRect::new(50.0, 0.0, 100.0, 100.0));
        let tall = fit_aspect(PixelRect::new(0.0, 0.0, 100.0, 300.0), 0.5);
        assert_eq!(tall, PixelRect::new(0.0, 125.0, 100.0, 50.0));
    }
}
