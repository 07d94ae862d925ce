//! Polar geometry shared by every dial element.
//!
//! A value maps to an angle, and an angle plus a radius factor maps to a
//! point in the widget's pixel space. Ticks, zone bands and the needle all
//! go through [`Polar::to_point`], so they always line up with each other.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Write;

use crate::config::DialConfig;

/// Widget-local position, origin at the top-left of the `size x size` square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rotates about the origin by `degrees`, clockwise on screen (SVG `rotate`).
    pub fn rotate(self, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Angular layout of the dial face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    /// 270 degrees, `min` at lower left, `max` at lower right.
    Gauge,
    /// Full turn with zero at the top, like a clock.
    Clock,
}

impl Sweep {
    pub const fn degrees(self) -> f64 {
        match self {
            Sweep::Gauge => 270.0,
            Sweep::Clock => 360.0,
        }
    }

    /// Converts a point angle into the needle polygon's rotation.
    pub const fn needle_offset(self) -> f64 {
        match self {
            Sweep::Gauge => -90.0,
            Sweep::Clock => 90.0,
        }
    }
}

/// One major graduation and the minor ones up to the next major.
#[derive(Debug, Clone, PartialEq)]
pub struct MajorTick {
    pub value: f64,
    /// First or last graduation of the scale.
    pub boundary: bool,
    pub minors: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub sweep: Sweep,
}

impl Polar {
    pub fn new(config: &DialConfig, sweep: Sweep) -> Self {
        Self {
            cx: config.cx,
            cy: config.cy,
            radius: config.radius,
            min: config.min,
            max: config.max,
            range: config.range,
            sweep,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }

    pub fn to_degrees(&self, value: f64) -> f64 {
        match self.sweep {
            Sweep::Gauge => value / self.range * 270.0 - (self.min / self.range * 270.0 + 45.0),
            Sweep::Clock => value / self.range * 360.0 + 90.0,
        }
    }

    pub fn to_radians(&self, value: f64) -> f64 {
        self.to_degrees(value) * PI / 180.0
    }

    /// Point along the ray at `value`, `factor` of the radius out from center.
    pub fn to_point(&self, value: f64, factor: f64) -> Point {
        let len = self.radius * factor;
        let angle = self.to_radians(value);
        Point::new(self.cx - len * angle.cos(), self.cy - len * angle.sin())
    }

    /// Value diametrically opposite `value` on the face.
    pub fn tail_value(&self, value: f64) -> f64 {
        value - self.range * 180.0 / self.sweep.degrees()
    }

    /// Point on a zone arc in the band's own frame: angle zero points up,
    /// angles grow clockwise, origin at the dial center.
    pub fn arc_point(&self, value: f64, factor: f64) -> Point {
        let angle = self.to_radians(value) - FRAC_PI_2;
        let len = self.radius * factor;
        Point::new(len * angle.cos(), len * angle.sin())
    }

    /// Annulus sector between `from` and `to`, radii given as factors.
    ///
    /// The path lives in the band frame of [`Polar::arc_point`] and must be
    /// drawn under `translate(cx, cy) rotate(270)`.
    pub fn arc_path(&self, from: f64, to: f64, inner: f64, outer: f64) -> String {
        let (mut a0, mut a1) = (self.to_radians(from), self.to_radians(to));
        if a1 < a0 {
            std::mem::swap(&mut a0, &mut a1);
        }
        let (r0, r1) = (self.radius * inner, self.radius * outer);
        let mut d = String::new();

        if a1 - a0 >= TAU - 1e-6 {
            let _ = write!(
                d,
                "M0,{r1}A{r1},{r1} 0 1,1 0,{n1}A{r1},{r1} 0 1,1 0,{r1}\
                 M0,{r0}A{r0},{r0} 0 1,0 0,{n0}A{r0},{r0} 0 1,0 0,{r0}Z",
                n1 = -r1,
                n0 = -r0,
            );
            return d;
        }

        let large = if a1 - a0 < PI { 0 } else { 1 };
        let (s0, c0) = (a0 - FRAC_PI_2).sin_cos();
        let (s1, c1) = (a1 - FRAC_PI_2).sin_cos();
        let _ = write!(
            d,
            "M{},{}A{r1},{r1} 0 {large},1 {},{}L{},{}A{r0},{r0} 0 {large},0 {},{}Z",
            r1 * c0,
            r1 * s0,
            r1 * c1,
            r1 * s1,
            r0 * c1,
            r0 * s1,
            r0 * c0,
            r0 * s0,
        );
        d
    }

    /// Graduations of the scale.
    ///
    /// A gauge spaces majors by `range / (count - 1)` and includes both ends.
    /// A clock spaces them by `range / count`; its last interval wraps back to
    /// the first major, which is not repeated. Minors subdivide each interval
    /// and never coincide with a major.
    pub fn ticks(&self, major_count: usize, minor_count: usize) -> Vec<MajorTick> {
        let intervals = match self.sweep {
            Sweep::Gauge => major_count.saturating_sub(1),
            Sweep::Clock => major_count,
        };
        if intervals == 0 {
            return Vec::new();
        }
        let major_delta = self.range / intervals as f64;
        let minor_delta = major_delta / minor_count.max(1) as f64;
        let last = major_count - 1;

        (0..major_count)
            .map(|i| {
                let value = match self.sweep {
                    Sweep::Gauge if i == last => self.max,
                    _ => self.min + i as f64 * major_delta,
                };
                let has_interval = self.sweep == Sweep::Clock || i < last;
                let minors = if has_interval {
                    (1..minor_count)
                        .map(|j| value + j as f64 * minor_delta)
                        .collect()
                } else {
                    Vec::new()
                };
                MajorTick {
                    value,
                    boundary: i == 0 || (self.sweep == Sweep::Gauge && i == last),
                    minors,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GaugeOptions, TimerOptions};

    const EPS: f64 = 1e-9;

    fn gauge(min: f64, max: f64) -> Polar {
        let config = GaugeOptions::builder().min(min).max(max).build().resolve().unwrap();
        Polar::new(&config, Sweep::Gauge)
    }

    fn clock(range: f64) -> Polar {
        let config = TimerOptions::builder().range(range).build().resolve().unwrap();
        Polar::new(&config, Sweep::Clock)
    }

    #[test]
    fn full_factor_points_lie_on_the_rim() {
        for polar in [gauge(-40.0, 120.0), clock(60.0)] {
            for i in 0..=50 {
                let value = polar.min + polar.range * i as f64 / 50.0;
                let p = polar.to_point(value, 1.0);
                assert!((p.distance(polar.center()) - polar.radius).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn sweep_covers_the_configured_span() {
        let g = gauge(10.0, 35.0);
        assert!((g.to_degrees(g.max) - g.to_degrees(g.min) - 270.0).abs() < EPS);
        let c = clock(1000.0);
        assert!((c.to_degrees(c.max) - c.to_degrees(c.min) - 360.0).abs() < EPS);
    }

    #[test]
    fn gauge_starts_lower_left() {
        let g = gauge(0.0, 100.0);
        assert!((g.to_degrees(0.0) + 45.0).abs() < EPS);
        let start = g.to_point(0.0, 1.0);
        assert!(start.x < g.cx && start.y > g.cy);
        let end = g.to_point(100.0, 1.0);
        assert!(end.x > g.cx && end.y > g.cy);
        let mid = g.to_point(50.0, 1.0);
        assert!((mid.x - g.cx).abs() < 1e-9 && mid.y < g.cy);
    }

    #[test]
    fn clock_zero_is_at_the_top() {
        let c = clock(60.0);
        let top = c.to_point(0.0, 1.0);
        assert!((top.x - c.cx).abs() < 1e-9);
        assert!((top.y - (c.cy - c.radius)).abs() < 1e-9);
        let quarter = c.to_point(15.0, 1.0);
        assert!((quarter.x - (c.cx + c.radius)).abs() < 1e-9);
    }

    #[test]
    fn tail_is_opposite_the_head() {
        for polar in [gauge(0.0, 100.0), clock(60.0)] {
            let v = polar.min + polar.range * 0.3;
            let head = polar.to_point(v, 1.0) - polar.center();
            let tail = polar.to_point(polar.tail_value(v), 1.0) - polar.center();
            assert!((head.x + tail.x).abs() < 1e-9);
            assert!((head.y + tail.y).abs() < 1e-9);
        }
    }

    #[test]
    fn arc_frame_rotated_matches_polar_points() {
        for polar in [gauge(0.0, 100.0), clock(60.0)] {
            for value in [polar.min, polar.min + polar.range * 0.42, polar.max] {
                let on_arc = polar.arc_point(value, 0.85).rotate(270.0);
                let expected = polar.to_point(value, 0.85) - polar.center();
                assert!(on_arc.distance(expected) < 1e-9);
            }
        }
    }

    #[test]
    fn arc_path_shape() {
        let g = gauge(0.0, 100.0);
        let d = g.arc_path(73.0, 90.0, 0.65, 0.85);
        assert!(d.starts_with('M'));
        assert!(d.ends_with('Z'));
        assert_eq!(d.matches('A').count(), 2);
        assert!(d.contains(" 0 0,1 "));

        let wide = g.arc_path(0.0, 100.0, 0.65, 0.85);
        assert!(wide.contains(" 0 1,1 "), "270 degree band uses the large arc flag");

        let c = clock(60.0);
        assert_eq!(c.arc_path(0.0, 60.0, 0.5, 0.6).matches('A').count(), 4);
    }

    #[test]
    fn inverted_arc_bounds_are_swapped() {
        let g = gauge(0.0, 100.0);
        assert_eq!(g.arc_path(90.0, 10.0, 0.65, 0.85), g.arc_path(10.0, 90.0, 0.65, 0.85));
    }

    #[test]
    fn gauge_ticks_include_both_ends() {
        let g = gauge(0.0, 100.0);
        let ticks = g.ticks(5, 5);
        let majors: Vec<f64> = ticks.iter().map(|t| t.value).collect();
        assert_eq!(majors, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        let boundaries: Vec<f64> = ticks.iter().filter(|t| t.boundary).map(|t| t.value).collect();
        assert_eq!(boundaries, vec![0.0, 100.0]);
        assert_eq!(ticks[0].minors, vec![5.0, 10.0, 15.0, 20.0]);
        assert!(ticks[4].minors.is_empty());
    }

    #[test]
    fn gauge_ticks_hit_max_exactly_with_awkward_steps() {
        let g = gauge(0.0, 1.0);
        let ticks = g.ticks(11, 2);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[10].value, 1.0);
        assert!(ticks[10].boundary);
        assert_eq!(ticks.iter().map(|t| t.minors.len()).sum::<usize>(), 10);
    }

    #[test]
    fn clock_ticks_wrap_without_repeating_zero() {
        let c = clock(60.0);
        let ticks = c.ticks(12, 5);
        assert_eq!(ticks.len(), 12);
        assert_eq!(ticks[0].value, 0.0);
        assert_eq!(ticks[11].value, 55.0);
        assert_eq!(ticks[11].minors, vec![56.0, 57.0, 58.0, 59.0]);
        assert_eq!(ticks.iter().filter(|t| t.boundary).count(), 1);
    }
}
