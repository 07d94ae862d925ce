//! Needle outline and the rotation that points it at a value.
//!
//! The live needle is drawn once at the middle of the scale and afterwards
//! only rotated, so its shape never changes. Frozen traces on the timer are
//! drawn at their own value and not rotated at all.

use std::fmt::Write;

use crate::geometry::{Point, Polar, Sweep};

/// Fraction of the range the needle may travel past either end of a gauge.
const OVERFLOW: f64 = 0.02;

// d3 "basis" B-spline weights.
const BASIS_1: [f64; 4] = [0.0, 2.0 / 3.0, 1.0 / 3.0, 0.0];
const BASIS_2: [f64; 4] = [0.0, 1.0 / 3.0, 2.0 / 3.0, 0.0];
const BASIS_3: [f64; 4] = [0.0, 1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0];

/// Needle outline pointing at `value`, relative to the dial center.
///
/// Gauges get a 7 point kite with a short tail, timers an 11 point outline
/// whose tail flares into a fin.
pub fn build_needle_path(polar: &Polar, width_ratio: f64, value: f64) -> Vec<Point> {
    let center = polar.center();
    let at = |v: f64, factor: f64| polar.to_point(v, factor) - center;

    let delta = polar.range * width_ratio / 10.0;
    let tail_value = polar.tail_value(value);

    match polar.sweep {
        Sweep::Gauge => {
            let head = at(value, 0.85);
            let head1 = at(value - delta, 0.12);
            let head2 = at(value + delta, 0.12);
            let tail = at(tail_value, 0.28);
            let tail1 = at(tail_value - delta, 0.12);
            let tail2 = at(tail_value + delta, 0.12);
            vec![head, head1, tail2, tail, tail1, head2, head]
        }
        Sweep::Clock => {
            let head = at(value, 0.85);
            let head1 = at(value - delta, 0.06);
            let head2 = at(value + delta, 0.06);
            let tail = at(tail_value, 0.24);
            let tail1 = at(tail_value - delta, 0.08);
            let tail2 = at(tail_value + delta, 0.08);
            let fin1 = at(tail_value - delta * 1.2, 0.40);
            let fin2 = at(tail_value + delta * 1.2, 0.40);
            vec![
                head, head1, tail2, tail, fin2, tail, fin1, tail, tail1, head2, head,
            ]
        }
    }
}

/// Smooths a polyline into an SVG path with a uniform cubic B-spline.
///
/// The curve starts and ends on the first and last points and is pulled
/// toward, not through, the points in between.
pub fn basis_path(points: &[Point]) -> String {
    let mut d = String::new();
    let (first, last) = match points {
        [] => return d,
        [only] => {
            let _ = write!(d, "M{},{}", only.x, only.y);
            return d;
        }
        [first, .., last] => (*first, *last),
    };
    if points.len() < 3 {
        let _ = write!(d, "M{},{}L{},{}", first.x, first.y, last.x, last.y);
        return d;
    }

    let dot = |w: &[f64; 4], v: &[f64; 4]| w[0] * v[0] + w[1] * v[1] + w[2] * v[2] + w[3] * v[3];
    let mut px = [first.x, first.x, first.x, points[1].x];
    let mut py = [first.y, first.y, first.y, points[1].y];
    let _ = write!(
        d,
        "M{},{}L{},{}",
        first.x,
        first.y,
        dot(&BASIS_3, &px),
        dot(&BASIS_3, &py)
    );

    // The last point is repeated once so the curve lands on it.
    let n = points.len();
    for i in 2..=n {
        let p = points[i.min(n - 1)];
        px.rotate_left(1);
        py.rotate_left(1);
        px[3] = p.x;
        py[3] = p.y;
        let _ = write!(
            d,
            "C{},{},{},{},{},{}",
            dot(&BASIS_1, &px),
            dot(&BASIS_1, &py),
            dot(&BASIS_2, &px),
            dot(&BASIS_2, &py),
            dot(&BASIS_3, &px),
            dot(&BASIS_3, &py)
        );
    }
    let _ = write!(d, "L{},{}", last.x, last.y);
    d
}

/// Value the gauge needle actually points at: out-of-range values push a
/// little past the end of the scale instead of wrapping.
pub fn overflow_clamp(polar: &Polar, value: f64) -> f64 {
    if value > polar.max {
        polar.max + OVERFLOW * polar.range
    } else if value < polar.min {
        polar.min - OVERFLOW * polar.range
    } else {
        value
    }
}

/// Rotation in degrees that turns the mid-scale outline toward `value`.
pub fn target_rotation(polar: &Polar, value: f64) -> f64 {
    polar.to_degrees(value) + polar.sweep.needle_offset()
}

/// Middle of the scale, where the live outline is drawn before rotation.
pub fn rest_value(polar: &Polar) -> f64 {
    (polar.min + polar.max) / 2.0
}

/// Readout text: the value rounded half toward positive infinity.
pub fn readout_text(value: f64) -> String {
    let rounded = (value + 0.5).floor();
    if rounded == 0.0 {
        // avoid "-0"
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}
