//! The gauge face: a 270 degree dial over `[min, max]`.

use std::time::Duration;

use log::{debug, trace, warn};

use crate::animation::{Animated, Retarget};
use crate::config::{DialConfig, GaugeOptions, ResolvedZone, RingStyle, ZoneFill};
use crate::error::ConfigError;
use crate::geometry::{Point, Polar, Sweep};
use crate::needle::{
    basis_path, build_needle_path, overflow_clamp, readout_text, rest_value, target_rotation,
};
use crate::scene::{Node, NodeId, Scene, TextAnchor, Transform};
use crate::Dial;

/// Inner and outer radius factors of a zone band.
pub(crate) const ZONE_BAND: (f64, f64) = (0.65, 0.85);

#[derive(Debug, Clone)]
pub struct Gauge {
    config: DialConfig,
    polar: Polar,
    scene: Scene,
    needle: NodeId,
    readout: NodeId,
    rotation: Animated,
}

impl Gauge {
    /// Builds the face and points the needle at `min`.
    pub fn new(options: GaugeOptions) -> Result<Self, ConfigError> {
        let config = options.resolve()?;
        let polar = Polar::new(&config, Sweep::Gauge);
        let mut scene = Scene::new(config.size, 1.0, config.root_class("gauge"));

        add_rings(&mut scene, &config, &options);
        add_label(&mut scene, &config, &options);
        add_zones(&mut scene, &polar, &config.zones);
        add_ticks(&mut scene, &polar, &config, &options);
        let (needle, readout) = add_needle(&mut scene, &polar, &config, &options);
        debug!(
            "gauge built: {} zones, {} major ticks",
            config.zones.len(),
            config.major_ticks
        );

        let mut gauge = Self {
            config,
            polar,
            scene,
            needle,
            readout,
            rotation: Animated::new(),
        };
        gauge.redraw(gauge.config.min, Some(Duration::ZERO));
        Ok(gauge)
    }

    /// Points the needle at `value`.
    ///
    /// `None` uses the configured transition duration, zero jumps straight
    /// there. The readout always shows the rounded raw value even when the
    /// needle stops just past the end of the scale.
    pub fn redraw(&mut self, value: f64, duration: Option<Duration>) {
        if value.is_nan() {
            warn!("gauge redraw ignored: value is NaN");
            return;
        }
        let needle_value = overflow_clamp(&self.polar, value);
        let target = target_rotation(&self.polar, needle_value);
        self.scene.set_text(self.readout, readout_text(value));

        let duration = duration.unwrap_or(self.config.transition_duration);
        match self.rotation.retarget(target, duration) {
            Retarget::Immediate(rotation) => self.apply_rotation(rotation),
            Retarget::Started => debug!("gauge needle -> {target:.2} deg over {duration:?}"),
        }
    }

    /// Steps the needle animation. Returns whether it is still running.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if let Some(frame) = self.rotation.advance(dt) {
            trace!("gauge needle at {:.2} deg", frame.value);
            self.apply_rotation(frame.value);
        }
        self.rotation.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        self.rotation.is_animating()
    }

    /// Rotation the needle is heading for, in degrees.
    pub fn current_rotation(&self) -> Option<f64> {
        self.rotation.committed()
    }

    pub fn readout(&self) -> &str {
        self.scene
            .get(self.readout)
            .and_then(Node::text_content)
            .unwrap_or_default()
    }

    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    pub fn polar(&self) -> &Polar {
        &self.polar
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn needle(&self) -> NodeId {
        self.needle
    }

    pub fn to_svg(&self) -> String {
        self.scene.to_svg()
    }

    fn apply_rotation(&mut self, degrees: f64) {
        self.scene.set_transform(
            self.needle,
            Transform::TranslateRotate {
                x: self.config.cx,
                y: self.config.cy,
                degrees,
            },
        );
    }
}

impl Dial for Gauge {
    fn redraw_to(&mut self, value: f64, duration: Option<Duration>) {
        self.redraw(value, duration);
    }

    fn advance(&mut self, dt: Duration) -> bool {
        Gauge::advance(self, dt)
    }

    fn is_animating(&self) -> bool {
        Gauge::is_animating(self)
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }
}

// ============================================================================
// FACE BUILDERS
// ============================================================================

fn add_rings(scene: &mut Scene, config: &DialConfig, options: &GaugeOptions) {
    let center = Point::new(config.cx, config.cy);
    for (class, r, style) in [
        ("outer-circle", config.radius, RingStyle::from(options.outer)),
        ("inner-circle", 0.9 * config.radius, RingStyle::from(options.inner)),
    ] {
        scene.append(
            scene.root(),
            Node::circle(center, r)
                .with_class(class)
                .with_style("fill", style.fill)
                .with_style("stroke", style.stroke)
                .with_style("stroke-width", style.width),
        );
    }
}

fn add_label(scene: &mut Scene, config: &DialConfig, options: &GaugeOptions) {
    let Some(text) = &config.label else { return };
    let font_size = options
        .label_style
        .font_size
        .unwrap_or_else(|| (config.size / 9.0).round());
    let half = font_size / 2.0;
    scene.append(
        scene.root(),
        Node::text(config.cx, config.cy / 2.0 + half, half, TextAnchor::Middle, text)
            .with_class("label")
            .with_style("font-size", format!("{font_size}px"))
            .with_style("fill", options.label_style.fill),
    );
}

/// Zone bands, shared with the timer face.
pub(crate) fn add_zones(scene: &mut Scene, polar: &Polar, zones: &[ResolvedZone]) {
    let (inner, outer) = ZONE_BAND;
    for zone in zones {
        let node = Node::path(polar.arc_path(zone.from, zone.to, inner, outer)).with_transform(
            Transform::TranslateRotate {
                x: polar.cx,
                y: polar.cy,
                degrees: 270.0,
            },
        );
        let node = match &zone.fill {
            ZoneFill::Color(color) => node.with_class("zone").with_style("fill", color),
            ZoneFill::Class(class) => node.with_class(format!("zone {class}")),
        };
        scene.append(scene.root(), node);
    }
}

fn add_ticks(scene: &mut Scene, polar: &Polar, config: &DialConfig, options: &GaugeOptions) {
    let major_style = options.major_ticks;
    let minor_style = options.minor_ticks;
    let font_size = options
        .tick_font_size
        .unwrap_or_else(|| (config.size / 16.0).round());
    let ticks = polar.ticks(config.major_ticks, config.minor_ticks);
    let first = ticks.first().map(|t| t.value);

    for tick in &ticks {
        for &minor in &tick.minors {
            scene.append(
                scene.root(),
                Node::line(polar.to_point(minor, 0.75), polar.to_point(minor, 0.85))
                    .with_class("minor-tick")
                    .with_style("stroke", minor_style.stroke)
                    .with_style("stroke-width", minor_style.width),
            );
        }

        scene.append(
            scene.root(),
            Node::line(polar.to_point(tick.value, 0.7), polar.to_point(tick.value, 0.85))
                .with_class("major-tick")
                .with_style("stroke", major_style.stroke)
                .with_style("stroke-width", major_style.width),
        );

        if tick.boundary {
            let point = polar.to_point(tick.value, 0.63);
            let anchor = if Some(tick.value) == first {
                TextAnchor::Start
            } else {
                TextAnchor::End
            };
            scene.append(
                scene.root(),
                Node::text(point.x, point.y, font_size / 3.0, anchor, tick.value.to_string())
                    .with_class("major-tick-label")
                    .with_style("font-size", format!("{font_size}px"))
                    .with_style("fill", major_style.text_color)
                    .with_style("stroke-width", "0px"),
            );
        }
    }
}

fn add_needle(
    scene: &mut Scene,
    polar: &Polar,
    config: &DialConfig,
    options: &GaugeOptions,
) -> (NodeId, NodeId) {
    let container = scene.append(scene.root(), Node::group().with_class("needle-container"));

    let outline = build_needle_path(polar, config.needle_width_ratio, rest_value(polar));
    let needle = scene.append(
        container,
        Node::path(basis_path(&outline))
            .with_class("needle")
            .with_style("fill", options.needle.fill)
            .with_style("stroke", options.needle.stroke)
            .with_style("fill-opacity", options.needle.opacity),
    );

    let pivot = options.needle_container;
    scene.append(
        container,
        Node::circle(polar.center(), config.radius * config.needle_container_radius_ratio / 10.0)
            .with_style("fill", pivot.fill)
            .with_style("stroke", pivot.stroke)
            .with_style("fill-opacity", pivot.opacity),
    );

    let font_size = (config.size / 10.0).round();
    let readout = scene.append(
        container,
        Node::text(
            config.cx,
            config.size - config.cy / 4.0 - font_size,
            font_size / 2.0,
            TextAnchor::Middle,
            "",
        )
        .with_class("readout")
        .with_style("font-size", format!("{font_size}px"))
        .with_style("fill", "#000")
        .with_style("stroke-width", "0px"),
    );

    (needle, readout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Shape;

    fn gauge() -> Gauge {
        Gauge::new(GaugeOptions::builder().min(0.0).max(100.0).build()).unwrap()
    }

    fn needle_rotation(gauge: &Gauge) -> f64 {
        match gauge.scene().get(gauge.needle()).and_then(|n| n.transform) {
            Some(Transform::TranslateRotate { degrees, .. }) => degrees,
            other => panic!("unexpected needle transform {other:?}"),
        }
    }

    #[test]
    fn starts_at_min_without_animating() {
        let g = gauge();
        assert!(!g.is_animating());
        assert_eq!(g.readout(), "0");
        assert!((needle_rotation(&g) - (-45.0 - 90.0)).abs() < 1e-9);
    }

    #[test]
    fn redraw_is_idempotent() {
        let mut g = gauge();
        g.redraw(37.0, Some(Duration::ZERO));
        let first = g.current_rotation();
        g.redraw(37.0, Some(Duration::ZERO));
        assert_eq!(g.current_rotation(), first);
        assert!(!g.is_animating());
    }

    #[test]
    fn overflow_rotates_to_just_past_max() {
        let mut g = gauge();
        g.redraw(150.0, Some(Duration::ZERO));
        let expected = g.polar().to_degrees(102.0) - 90.0;
        assert!((g.current_rotation().unwrap() - expected).abs() < 1e-9);
        assert_eq!(g.readout(), "150");

        g.redraw(200.0, Some(Duration::ZERO));
        assert!((g.current_rotation().unwrap() - expected).abs() < 1e-9);
        assert_eq!(g.readout(), "200");
    }

    #[test]
    fn underflow_rotates_to_just_before_min() {
        let mut g = gauge();
        g.redraw(-30.0, Some(Duration::ZERO));
        let expected = g.polar().to_degrees(-2.0) - 90.0;
        assert!((g.current_rotation().unwrap() - expected).abs() < 1e-9);
        assert_eq!(g.readout(), "-30");
    }

    #[test]
    fn animated_redraw_interpolates() {
        let mut g = gauge();
        let start = needle_rotation(&g);
        g.redraw(100.0, None);
        assert!(g.is_animating());
        assert_eq!(g.readout(), "100");
        assert_eq!(needle_rotation(&g), start);

        assert!(g.advance(Duration::from_millis(250)));
        let end = g.polar().to_degrees(100.0) - 90.0;
        assert!((needle_rotation(&g) - (start + end) / 2.0).abs() < 1e-9);

        assert!(!g.advance(Duration::from_millis(250)));
        assert!((needle_rotation(&g) - end).abs() < 1e-9);
    }

    #[test]
    fn nan_is_ignored() {
        let mut g = gauge();
        g.redraw(20.0, Some(Duration::ZERO));
        let before = g.current_rotation();
        g.redraw(f64::NAN, None);
        assert_eq!(g.current_rotation(), before);
        assert_eq!(g.readout(), "20");
    }

    #[test]
    fn face_elements_are_present() {
        let g = Gauge::new(
            GaugeOptions::builder()
                .min(0.0)
                .max(100.0)
                .label("RPM")
                .class_suffix("dark")
                .build(),
        )
        .unwrap();
        let scene = g.scene();
        let root = scene.root();
        for class in [
            "outer-circle",
            "inner-circle",
            "label",
            "needle-container",
            "needle",
            "readout",
        ] {
            assert_eq!(scene.find_by_class(root, class).len(), 1, "{class}");
        }
        assert_eq!(scene.find_by_class(root, "zone").len(), 2);
        assert_eq!(scene.find_by_class(root, "major-tick").len(), 12);
        assert_eq!(scene.find_by_class(root, "minor-tick").len(), 11 * 4);
        assert_eq!(scene.find_by_class(root, "dark"), vec![root]);
    }

    #[test]
    fn no_label_without_text() {
        let g = gauge();
        assert!(g.scene().find_by_class(g.scene().root(), "label").is_empty());
    }

    #[test]
    fn inner_circle_is_ninety_percent() {
        let g = gauge();
        let scene = g.scene();
        let radius = |class| match scene
            .find_by_class(scene.root(), class)
            .first()
            .and_then(|id| scene.get(*id))
            .map(|n| &n.shape)
        {
            Some(Shape::Circle { r, .. }) => *r,
            _ => panic!("{class} missing"),
        };
        assert!((radius("outer-circle") - g.config().radius).abs() < 1e-9);
        assert!((radius("inner-circle") - 0.9 * g.config().radius).abs() < 1e-9);
    }

    #[test]
    fn zone_classes_and_colors() {
        let g = Gauge::new(
            GaugeOptions::builder()
                .min(0.0)
                .max(10.0)
                .zones(vec![
                    crate::config::Zone::new(0.0, 0.5, ZoneFill::Class("green-zone".into())),
                    crate::config::Zone::new(
                        0.5,
                        1.0,
                        ZoneFill::Color(crate::config::Color::new(0xff, 0, 0)),
                    ),
                ])
                .build(),
        )
        .unwrap();
        let scene = g.scene();
        let zones = scene.find_by_class(scene.root(), "zone");
        assert_eq!(zones.len(), 2);
        assert!(scene.get(zones[0]).unwrap().has_class("green-zone"));
        let styled = scene.get(zones[1]).unwrap();
        assert_eq!(styled.style, vec![("fill", "#ff0000".to_string())]);
        assert_eq!(
            styled.transform,
            Some(Transform::TranslateRotate {
                x: g.config().cx,
                y: g.config().cy,
                degrees: 270.0
            })
        );
    }
}
