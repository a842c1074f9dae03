//! # Curve Mesher
//!
//! Places distribution parameters on a segment. Segments are first mapped
//! to a local frame where the chord runs from `(0, 0)` to `(1, 0)`:
//!
//! - line-like segments interpolate `y(x)` piecewise-linearly at `x = d`
//! - curves follow a not-a-knot cubic spline parametrized by normalized
//!   arc length, evaluated at `t = d`

use crate::error::{InterfaceError, Result};
use crate::profile::Segment;
use glam::DVec2;

/// Interpolating cubic spline through `(t_i, y_i)` stored as knot values
/// and second derivatives.
///
/// Three knots give the interpolating parabola, two knots a line.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    knots: Vec<f64>,
    values: Vec<f64>,
    second: Vec<f64>,
}

impl CubicSpline {
    /// Builds a not-a-knot spline. Knots must be strictly increasing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use interface_mesh::curve::CubicSpline;
    ///
    /// // Cubic data is reproduced exactly
    /// let t = [0.0, 0.3, 0.5, 0.8, 1.0];
    /// let y: Vec<f64> = t.iter().map(|x| x * x * x).collect();
    /// let spline = CubicSpline::not_a_knot(&t, &y).unwrap();
    /// assert!((spline.evaluate(0.65) - 0.65_f64.powi(3)).abs() < 1e-12);
    /// ```
    pub fn not_a_knot(knots: &[f64], values: &[f64]) -> Result<Self> {
        let n = knots.len();
        if n < 2 || values.len() != n {
            return Err(InterfaceError::degenerate(format!(
                "spline needs at least 2 knots with one value each, got {n} knots and {} values",
                values.len()
            )));
        }
        if knots.windows(2).any(|w| w[1] <= w[0]) {
            return Err(InterfaceError::degenerate("spline knots must be strictly increasing"));
        }

        let h: Vec<f64> = knots.windows(2).map(|w| w[1] - w[0]).collect();
        let slope: Vec<f64> = (0..n - 1).map(|i| (values[i + 1] - values[i]) / h[i]).collect();

        let second = match n {
            2 => vec![0.0; 2],
            3 => {
                let curvature = 2.0 * (slope[1] - slope[0]) / (h[0] + h[1]);
                vec![curvature; 3]
            }
            _ => not_a_knot_second_derivatives(&h, &slope)?,
        };

        Ok(Self {
            knots: knots.to_vec(),
            values: values.to_vec(),
            second,
        })
    }

    /// Evaluates the spline; values outside the knot range extrapolate the
    /// end pieces.
    pub fn evaluate(&self, t: f64) -> f64 {
        let last = self.knots.len() - 2;
        let i = self.knots[1..=last].partition_point(|&k| k <= t);

        let (t0, t1) = (self.knots[i], self.knots[i + 1]);
        let (y0, y1) = (self.values[i], self.values[i + 1]);
        let (m0, m1) = (self.second[i], self.second[i + 1]);
        let h = t1 - t0;
        let a = t1 - t;
        let b = t - t0;

        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }
}

/// Second derivatives of a not-a-knot spline with at least four knots.
///
/// The end conditions `M0 = M1(1 + h0/h1) - M2 h0/h1` and its mirror are
/// folded into the first and last interior rows, leaving a tridiagonal
/// system over `M1..M(n-2)`.
fn not_a_knot_second_derivatives(h: &[f64], slope: &[f64]) -> Result<Vec<f64>> {
    let n = h.len() + 1;
    let m = n - 2;

    let mut lower = vec![0.0; m];
    let mut diag = vec![0.0; m];
    let mut upper = vec![0.0; m];
    let mut rhs = vec![0.0; m];

    for row in 0..m {
        let i = row + 1;
        lower[row] = h[i - 1];
        diag[row] = 2.0 * (h[i - 1] + h[i]);
        upper[row] = h[i];
        rhs[row] = 6.0 * (slope[i] - slope[i - 1]);
    }

    let (h0, h1) = (h[0], h[1]);
    diag[0] += h0 * (1.0 + h0 / h1);
    upper[0] -= h0 * h0 / h1;

    let (a, b) = (h[n - 3], h[n - 2]);
    diag[m - 1] += b * (1.0 + b / a);
    lower[m - 1] -= b * b / a;

    let interior = solve_tridiagonal(&lower, &diag, &upper, &rhs)?;

    let mut second = Vec::with_capacity(n);
    second.push(interior[0] * (1.0 + h0 / h1) - interior[1] * h0 / h1);
    second.extend_from_slice(&interior);
    second.push(interior[m - 1] * (1.0 + b / a) - interior[m - 2] * b / a);
    Ok(second)
}

/// Thomas algorithm. `lower[0]` and `upper[m - 1]` are ignored.
fn solve_tridiagonal(lower: &[f64], diag: &[f64], upper: &[f64], rhs: &[f64]) -> Result<Vec<f64>> {
    let m = diag.len();
    let mut c = vec![0.0; m];
    let mut d = vec![0.0; m];

    let mut pivot = diag[0];
    for i in 0..m {
        if i > 0 {
            pivot = diag[i] - lower[i] * c[i - 1];
        }
        if pivot.abs() < f64::EPSILON {
            return Err(InterfaceError::degenerate("singular spline system"));
        }
        c[i] = upper[i] / pivot;
        d[i] = if i == 0 {
            rhs[0] / pivot
        } else {
            (rhs[i] - lower[i] * d[i - 1]) / pivot
        };
    }

    let mut x = vec![0.0; m];
    x[m - 1] = d[m - 1];
    for i in (0..m - 1).rev() {
        x[i] = d[i] - c[i] * x[i + 1];
    }
    Ok(x)
}

/// Piecewise-linear `y(x)` through `(xs, ys)`, clamped at both ends.
fn interpolate_linear(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    if x <= xs[0] {
        return ys[0];
    }
    let last = xs.len() - 1;
    if x >= xs[last] {
        return ys[last];
    }
    let i = xs.partition_point(|&v| v <= x).saturating_sub(1).min(last - 1);
    let span = xs[i + 1] - xs[i];
    if span <= 0.0 {
        return ys[i];
    }
    ys[i] + (ys[i + 1] - ys[i]) * (x - xs[i]) / span
}

/// Places every distribution value on `segment`.
///
/// The first and last returned points are the segment's exact end points.
pub fn mesh_segment(segment: &Segment, distribution: &[f64]) -> Result<Vec<DVec2>> {
    let points = segment.points();
    let origin = segment.first();
    let chord = segment.last() - origin;
    let length = chord.length();
    if !(length.is_finite() && length > 0.0) {
        return Err(InterfaceError::malformed(
            format!("segment starting at ({}, {}) has a zero chord", origin.x, origin.y),
            None,
        ));
    }

    // Unit chord along +x
    let to_local = DVec2::from_angle(-chord.y.atan2(chord.x));
    let to_world = DVec2::from_angle(chord.y.atan2(chord.x));
    let local: Vec<DVec2> = points
        .iter()
        .map(|p| to_local.rotate(*p - origin) / length)
        .collect();

    let placed: Vec<DVec2> = if segment.kind().is_linear() {
        let xs: Vec<f64> = local.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = local.iter().map(|p| p.y).collect();
        distribution
            .iter()
            .map(|&d| DVec2::new(d, interpolate_linear(&xs, &ys, d)))
            .collect()
    } else {
        let mut arc = Vec::with_capacity(local.len());
        arc.push(0.0);
        for pair in local.windows(2) {
            let next = arc[arc.len() - 1] + pair[0].distance(pair[1]);
            arc.push(next);
        }
        let total = arc[arc.len() - 1];
        for t in &mut arc {
            *t /= total;
        }

        let xs: Vec<f64> = local.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = local.iter().map(|p| p.y).collect();
        let spline_x = CubicSpline::not_a_knot(&arc, &xs)?;
        let spline_y = CubicSpline::not_a_knot(&arc, &ys)?;
        distribution
            .iter()
            .map(|&d| DVec2::new(spline_x.evaluate(d), spline_y.evaluate(d)))
            .collect()
    };

    let mut meshed: Vec<DVec2> = placed
        .into_iter()
        .map(|p| origin + to_world.rotate(p * length))
        .collect();

    if let Some(first) = meshed.first_mut() {
        *first = segment.first();
    }
    if let Some(last) = meshed.last_mut() {
        *last = segment.last();
    }

    Ok(meshed)
}
