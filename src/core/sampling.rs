use ordered_float::OrderedFloat;

use crate::error::{FigureError, FigureResult};

/// `n` evenly spaced samples over `[start, end]`, both ends included.
#[must_use]
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|index| {
                    if index == n - 1 {
                        end
                    } else {
                        start + step * index as f64
                    }
                })
                .collect()
        }
    }
}

/// `n` samples spaced evenly in log10 between `10^start_exp` and `10^end_exp`.
#[must_use]
pub fn logspace(start_exp: f64, end_exp: f64, n: usize) -> Vec<f64> {
    linspace(start_exp, end_exp, n)
        .into_iter()
        .map(|exp| 10_f64.powf(exp))
        .collect()
}

/// Derivative estimate on a uniform grid.
///
/// Interior points use central differences, the two ends use one-sided
/// differences.
pub fn gradient(values: &[f64], spacing: f64) -> FigureResult<Vec<f64>> {
    if values.len() < 2 {
        return Err(FigureError::InvalidData(
            "gradient needs at least two samples".to_owned(),
        ));
    }
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(FigureError::InvalidData(
            "gradient spacing must be finite and > 0".to_owned(),
        ));
    }

    let last = values.len() - 1;
    let mut out = Vec::with_capacity(values.len());
    out.push((values[1] - values[0]) / spacing);
    for index in 1..last {
        out.push((values[index + 1] - values[index - 1]) / (2.0 * spacing));
    }
    out.push((values[last] - values[last - 1]) / spacing);
    Ok(out)
}

/// Derivative estimate on a non-uniform, strictly monotonic grid.
pub fn gradient_at(values: &[f64], xs: &[f64]) -> FigureResult<Vec<f64>> {
    if values.len() != xs.len() {
        return Err(FigureError::InvalidData(format!(
            "gradient grid length mismatch: {} values, {} coordinates",
            values.len(),
            xs.len()
        )));
    }
    if values.len() < 2 {
        return Err(FigureError::InvalidData(
            "gradient needs at least two samples".to_owned(),
        ));
    }

    let last = values.len() - 1;
    let step = |a: usize, b: usize| -> FigureResult<f64> {
        let h = xs[b] - xs[a];
        if !h.is_finite() || h == 0.0 {
            return Err(FigureError::InvalidData(
                "gradient grid must be strictly monotonic".to_owned(),
            ));
        }
        Ok(h)
    };

    let mut out = Vec::with_capacity(values.len());
    out.push((values[1] - values[0]) / step(0, 1)?);
    for index in 1..last {
        let hd = step(index - 1, index)?;
        let hs = step(index, index + 1)?;
        // Second-order accurate weights for unequal neighbours.
        let value = (hd * hd * values[index + 1] - hs * hs * values[index - 1]
            + (hs * hs - hd * hd) * values[index])
            / (hs * hd * (hd + hs));
        out.push(value);
    }
    out.push((values[last] - values[last - 1]) / step(last - 1, last)?);
    Ok(out)
}

/// Finite extent of `values`, ignoring non-finite samples.
#[must_use]
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let finite = values.iter().copied().filter(|value| value.is_finite());
    let min = finite.clone().map(OrderedFloat).min()?;
    let max = finite.map(OrderedFloat).max()?;
    Some((min.0, max.0))
}

/// Applies `f` to every sample of `xs`.
#[must_use]
pub fn map_samples(xs: &[f64], f: impl Fn(f64) -> f64) -> Vec<f64> {
    xs.iter().map(|&x| f(x)).collect()
}

#[cfg(test)]
mod tests {
    use super::{gradient, gradient_at, linspace, logspace, min_max};
    use approx::assert_relative_eq;

    #[test]
    fn linspace_hits_both_ends() {
        let xs = linspace(0.0, 350.0, 350);
        assert_eq!(xs.len(), 350);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[349], 350.0);
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn logspace_spans_decades() {
        let xs = logspace(-3.0, 1.0, 5);
        assert_relative_eq!(xs[0], 1e-3, max_relative = 1e-12);
        assert_relative_eq!(xs[2], 1e-1, max_relative = 1e-12);
        assert_relative_eq!(xs[4], 10.0, max_relative = 1e-12);
    }

    #[test]
    fn gradient_of_quadratic_is_exact_in_interior() {
        let xs = linspace(0.0, 4.0, 5);
        let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
        let dy = gradient(&ys, 1.0).expect("gradient");
        assert_eq!(dy, vec![1.0, 2.0, 4.0, 6.0, 7.0]);
    }

    #[test]
    fn non_uniform_gradient_matches_uniform_on_uniform_grid() {
        let xs = linspace(-5.0, 5.0, 11);
        let ys: Vec<f64> = xs.iter().map(|x| x.sin()).collect();
        let uniform = gradient(&ys, 1.0).expect("uniform");
        let general = gradient_at(&ys, &xs).expect("general");
        for (a, b) in uniform.iter().zip(&general) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn gradient_rejects_degenerate_input() {
        assert!(gradient(&[1.0], 1.0).is_err());
        assert!(gradient(&[1.0, 2.0], 0.0).is_err());
        assert!(gradient_at(&[1.0, 2.0], &[1.0, 1.0]).is_err());
    }

    #[test]
    fn min_max_skips_non_finite() {
        let samples = [f64::NAN, 3.0, -1.0, f64::INFINITY];
        assert_eq!(min_max(&samples), Some((-1.0, 3.0)));
        assert_eq!(min_max(&[f64::NAN]), None);
    }
}
