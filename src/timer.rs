//! The timer face: a stopwatch dial that wraps a full turn over `[0, range]`.
//!
//! On top of plain value writes the timer keeps its own clock, advanced by
//! `tick`, and can leave frozen needle traces behind to mark past readings.

use std::fmt::Write;
use std::time::Duration;

use log::{debug, trace, warn};

use crate::animation::{Animated, Retarget};
use crate::config::{DialConfig, TimerOptions};
use crate::error::ConfigError;
use crate::gauge::add_zones;
use crate::geometry::{Point, Polar, Sweep};
use crate::needle::{basis_path, build_needle_path, readout_text, rest_value, target_rotation};
use crate::scene::{Node, NodeId, Scene, TextAnchor, Transform};
use crate::{Dial, WidgetCommand};

/// Shown while the needle is moving and after `clear`.
pub const PLACEHOLDER: &str = "---";

const RESET_DURATION: Duration = Duration::from_millis(100);
const SCALE_UP_DURATION: Duration = Duration::from_millis(250);
const SCALE_BACK_DURATION: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct Timer {
    config: DialConfig,
    polar: Polar,
    scene: Scene,
    needle_container: NodeId,
    needle: NodeId,
    readout: NodeId,
    label: NodeId,
    freezes: Vec<NodeId>,

    rotation: Animated,
    pending_readout: Option<String>,

    time: f64,
    tick_step: f64,
    rescale: f64,
    scale: Animated,
    toggled: bool,
}

impl Timer {
    /// Builds the face and shows the configured start time.
    pub fn new(options: TimerOptions) -> Result<Self, ConfigError> {
        let config = options.resolve()?;
        let polar = Polar::new(&config, Sweep::Clock);
        let mut scene = Scene::new(config.size, options.rescale, config.root_class("timer"));

        add_rings(&mut scene, &config, options.tick_length);
        let label = add_label(&mut scene, &config);
        add_zones(&mut scene, &polar, &config.zones);
        add_ticks(&mut scene, &polar, &config, options.tick_length);
        let (needle_container, needle, readout) = add_needle(&mut scene, &polar, &config);

        let tick_step = config.range / (config.major_ticks * config.minor_ticks) as f64;
        debug!(
            "timer built: range {}, tick step {tick_step}",
            config.range
        );

        let mut timer = Self {
            config,
            polar,
            scene,
            needle_container,
            needle,
            readout,
            label,
            freezes: Vec::new(),
            rotation: Animated::new(),
            pending_readout: None,
            time: options.time,
            tick_step,
            rescale: options.rescale,
            scale: Animated::starting_at(options.rescale),
            toggled: false,
        };
        timer.write(timer.time, Some(Duration::ZERO));
        Ok(timer)
    }

    /// Points the needle at `value`.
    ///
    /// The readout shows the placeholder while the needle moves and the
    /// rounded value once it arrives. Values past `range` simply keep
    /// turning around the face.
    pub fn write(&mut self, value: f64, duration: Option<Duration>) {
        if !value.is_finite() {
            warn!("timer write ignored: value {value} is not finite");
            return;
        }
        let target = target_rotation(&self.polar, value);
        let text = readout_text(value);
        let duration = duration.unwrap_or(self.config.transition_duration);

        match self.rotation.retarget(target, duration) {
            Retarget::Immediate(rotation) => {
                self.apply_rotation(rotation);
                self.pending_readout = None;
                self.scene.set_text(self.readout, text);
            }
            Retarget::Started => {
                debug!("timer needle -> {target:.2} deg over {duration:?}");
                self.scene.set_text(self.readout, PLACEHOLDER);
                self.pending_readout = Some(text);
            }
        }
    }

    /// Advances the clock by one minor graduation and writes it.
    pub fn tick(&mut self) {
        self.time += self.tick_step;
        self.write(self.time, None);
    }

    /// Leaves a still copy of the needle at `at`, or at the current time,
    /// just behind the live needle.
    pub fn freeze(&mut self, at: Option<f64>) {
        let at = at.unwrap_or(self.time);
        if !at.is_finite() {
            warn!("freeze ignored: time {at} is not finite");
            return;
        }
        let outline = build_needle_path(&self.polar, self.config.needle_width_ratio, at);
        let trace = Node::path(basis_path(&outline))
            .with_class("freeze")
            .with_transform(Transform::Translate {
                x: self.config.cx,
                y: self.config.cy,
            });
        let id = self
            .scene
            .insert_before(self.needle_container, trace, self.needle);
        self.freezes.push(id);
        debug!("froze needle at {at} ({} traces)", self.freezes.len());
    }

    /// Sets the clock to `at`, or zero, and moves the needle there quickly.
    pub fn reset(&mut self, at: Option<f64>) {
        let at = at.unwrap_or(0.0);
        if !at.is_finite() {
            warn!("reset ignored: time {at} is not finite");
            return;
        }
        self.time = at;
        self.write(at, Some(RESET_DURATION));
    }

    /// Zeroes the clock, drops every frozen trace and blanks the texts.
    pub fn clear(&mut self) {
        self.time = 0.0;
        self.write(0.0, Some(Duration::ZERO));
        self.scene.set_text(self.readout, PLACEHOLDER);
        for id in self.freezes.drain(..) {
            self.scene.remove(id);
        }
        self.scene.set_text(self.label, PLACEHOLDER);
    }

    pub fn set_label(&mut self, text: impl Into<String>) {
        self.scene.set_text(self.label, text);
    }

    /// Switches between the configured scale and `factor`, animated.
    pub fn toggle_scale(&mut self, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            warn!("toggle_scale ignored: factor {factor} is not a positive number");
            return;
        }
        let (target, duration) = if self.toggled {
            (self.rescale, SCALE_BACK_DURATION)
        } else {
            (factor, SCALE_UP_DURATION)
        };
        self.toggled = !self.toggled;
        if let Retarget::Immediate(scale) = self.scale.retarget(target, duration) {
            self.scene.set_scale(scale);
        }
    }

    /// Steps running animations. Returns whether any is still running.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if let Some(frame) = self.rotation.advance(dt) {
            trace!("timer needle at {:.2} deg", frame.value);
            self.apply_rotation(frame.value);
            if frame.finished {
                if let Some(text) = self.pending_readout.take() {
                    self.scene.set_text(self.readout, text);
                }
            }
        }
        if let Some(frame) = self.scale.advance(dt) {
            self.scene.set_scale(frame.value);
        }
        self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        self.rotation.is_animating() || self.scale.is_animating()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn tick_step(&self) -> f64 {
        self.tick_step
    }

    pub fn is_toggled(&self) -> bool {
        self.toggled
    }

    /// Scale currently applied to the widget.
    pub fn scale(&self) -> f64 {
        self.scene.display_size() / self.config.size
    }

    pub fn freeze_count(&self) -> usize {
        self.freezes.len()
    }

    pub fn current_rotation(&self) -> Option<f64> {
        self.rotation.committed()
    }

    pub fn readout(&self) -> &str {
        self.text_of(self.readout)
    }

    pub fn label(&self) -> &str {
        self.text_of(self.label)
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

    fn text_of(&self, id: NodeId) -> &str {
        self.scene
            .get(id)
            .and_then(Node::text_content)
            .unwrap_or_default()
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

impl Dial for Timer {
    fn redraw_to(&mut self, value: f64, duration: Option<Duration>) {
        self.write(value, duration);
    }

    fn advance(&mut self, dt: Duration) -> bool {
        Timer::advance(self, dt)
    }

    fn is_animating(&self) -> bool {
        Timer::is_animating(self)
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn apply(&mut self, command: WidgetCommand) {
        match command {
            WidgetCommand::Redraw(value, duration) => self.write(value, duration),
            WidgetCommand::Tick => self.tick(),
            WidgetCommand::Freeze(at) => self.freeze(at),
            WidgetCommand::Reset(at) => self.reset(at),
            WidgetCommand::Clear => self.clear(),
            WidgetCommand::SetLabel(text) => self.set_label(text),
            WidgetCommand::ToggleScale(factor) => self.toggle_scale(factor),
        }
    }
}

// ============================================================================
// FACE BUILDERS
// ============================================================================

fn add_rings(scene: &mut Scene, config: &DialConfig, tick_length: f64) {
    let center = Point::new(config.cx, config.cy);
    for (class, factor) in [
        ("outer-circle", 1.0),
        ("middle-circle", 0.95),
        ("inner-circle", 0.95 - tick_length),
    ] {
        scene.append(
            scene.root(),
            Node::circle(center, factor * config.radius).with_class(class),
        );
    }
}

/// The label node always exists so it can be set later.
fn add_label(scene: &mut Scene, config: &DialConfig) -> NodeId {
    let offset = config.size / 18.0;
    scene.append(
        scene.root(),
        Node::text(
            config.cx,
            config.cy / 1.8 + offset,
            offset,
            TextAnchor::Middle,
            config.label.clone().unwrap_or_default(),
        )
        .with_class("label"),
    )
}

fn add_ticks(scene: &mut Scene, polar: &Polar, config: &DialConfig, tick_length: f64) {
    let mut minor_path = String::new();
    let mut major_path = String::new();
    let segment = |d: &mut String, value: f64, inner: f64| {
        let start = polar.to_point(value, inner);
        let end = polar.to_point(value, 0.95);
        let _ = write!(d, "M {} {}L {} {}", start.x, start.y, end.x, end.y);
    };
    let label_nudge = config.size / 75.0;

    for tick in polar.ticks(config.major_ticks, config.minor_ticks) {
        for &minor in &tick.minors {
            segment(&mut minor_path, minor, 0.95 - 0.6 * tick_length);
        }
        segment(&mut major_path, tick.value, 0.95 - tick_length);

        let point = polar.to_point(tick.value, 0.97 - 2.0 * tick_length);
        scene.append(
            scene.root(),
            Node::text(
                point.x,
                point.y + label_nudge,
                0.0,
                TextAnchor::Middle,
                tick.value.to_string(),
            )
            .with_class("major-tick-label"),
        );
    }

    scene.append(scene.root(), Node::path(minor_path).with_class("minor-tick"));
    scene.append(scene.root(), Node::path(major_path).with_class("major-tick"));
}

fn add_needle(scene: &mut Scene, polar: &Polar, config: &DialConfig) -> (NodeId, NodeId, NodeId) {
    let container = scene.append(scene.root(), Node::group().with_class("needle-container"));

    let outline = build_needle_path(polar, config.needle_width_ratio, rest_value(polar));
    let needle = scene.append(container, Node::path(basis_path(&outline)).with_class("needle"));

    let hub = config.radius * config.needle_container_radius_ratio;
    scene.append(container, Node::circle(polar.center(), hub / 14.0));
    scene.append(
        container,
        Node::circle(polar.center(), hub / 22.0).with_class("needle"),
    );
    scene.append(container, Node::circle(polar.center(), hub / 40.0));

    let font_size = (config.size / 10.0).round();
    let readout = scene.append(
        container,
        Node::text(
            config.cx,
            config.size - config.cy / 2.0 - font_size,
            font_size / 2.0,
            TextAnchor::Middle,
            "",
        )
        .with_class("readout"),
    );
    trace!("timer needle outline: {} points", outline.len());

    (container, needle, readout)
}
