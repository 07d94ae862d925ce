// ============================================================================
// OPTIONS, DEFAULTS & RESOLUTION
// ============================================================================
//
// Every optional field names its default through a function in `defaults`,
// shared by the bon builder and by serde. Nested styling records carry
// `#[serde(default)]` so a partially written record keeps the defaults of
// the keys it leaves out.

use std::fmt;
use std::time::Duration;

use bon::Builder;
use log::debug;
use serde::Deserialize;

use crate::error::ConfigError;

// ============================================================================
// COLOR
// ============================================================================

/// Color representation for dial elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rgb` or `#rrggbb`.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(text.to_string());
        let hex = text.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(hex[i..=i].repeat(2).as_str());
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

// ============================================================================
// ZONES
// ============================================================================

/// How a zone band is painted: an inline fill or a class for external CSS.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneFill {
    Color(Color),
    Class(String),
}

/// A colored band given in fractions of the dial's value range.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Zone {
    pub from: f64,
    pub to: f64,
    pub fill: ZoneFill,
}

impl Zone {
    pub fn new(from: f64, to: f64, fill: ZoneFill) -> Self {
        Self { from, to, fill }
    }
}

/// A zone with its bounds mapped into value space.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedZone {
    pub from: f64,
    pub to: f64,
    pub fill: ZoneFill,
}

/// Maps fractional zone bounds onto `[min, max]` by linear interpolation.
pub fn resolve_zones(zones: &[Zone], min: f64, max: f64) -> Vec<ResolvedZone> {
    let range = max - min;
    zones
        .iter()
        .map(|zone| ResolvedZone {
            from: min + range * zone.from,
            to: min + range * zone.to,
            fill: zone.fill.clone(),
        })
        .collect()
}

// ============================================================================
// DEFAULTS
// ============================================================================

pub mod defaults {
    use super::{Color, Zone, ZoneFill};

    pub fn size() -> f64 {
        450.0
    }

    pub fn major_tick_count() -> usize {
        12
    }

    pub fn minor_tick_count() -> usize {
        5
    }

    pub fn needle_width_ratio() -> f64 {
        0.4
    }

    pub fn needle_container_radius_ratio() -> f64 {
        0.7
    }

    pub fn transition_duration_ms() -> u64 {
        500
    }

    pub fn range() -> f64 {
        60.0
    }

    pub fn rescale() -> f64 {
        1.0
    }

    pub fn tick_length() -> f64 {
        0.12
    }

    pub fn gauge_zones() -> Vec<Zone> {
        vec![
            Zone::new(0.73, 0.9, ZoneFill::Color(Color::new(0xff, 0x99, 0x00))),
            Zone::new(0.9, 1.0, ZoneFill::Color(Color::new(0xdc, 0x39, 0x12))),
        ]
    }
}

// ============================================================================
// GAUGE STYLING RECORDS
// ============================================================================

/// Paint for one of the face circles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingStyle {
    pub fill: Color,
    pub stroke: Color,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct OuterRing {
    pub fill: Color,
    pub stroke: Color,
    pub width: f64,
}

impl Default for OuterRing {
    fn default() -> Self {
        Self {
            fill: Color::new(0xcc, 0xcc, 0xcc),
            stroke: Color::new(0x00, 0x00, 0x00),
            width: 0.5,
        }
    }
}

impl From<OuterRing> for RingStyle {
    fn from(ring: OuterRing) -> Self {
        Self {
            fill: ring.fill,
            stroke: ring.stroke,
            width: ring.width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct InnerRing {
    pub fill: Color,
    pub stroke: Color,
    pub width: f64,
}

impl Default for InnerRing {
    fn default() -> Self {
        Self {
            fill: Color::new(0xff, 0xff, 0xff),
            stroke: Color::new(0xe0, 0xe0, 0xe0),
            width: 2.0,
        }
    }
}

impl From<InnerRing> for RingStyle {
    fn from(ring: InnerRing) -> Self {
        Self {
            fill: ring.fill,
            stroke: ring.stroke,
            width: ring.width,
        }
    }
}

/// Major graduations: how many, and how they are painted.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MajorTicks {
    pub count: usize,
    pub stroke: Color,
    pub width: f64,
    pub text_color: Color,
}

impl Default for MajorTicks {
    fn default() -> Self {
        Self {
            count: defaults::major_tick_count(),
            stroke: Color::new(0x33, 0x33, 0x33),
            width: 2.0,
            text_color: Color::new(0x33, 0x33, 0x33),
        }
    }
}

/// Minor graduations per major interval.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MinorTicks {
    pub count: usize,
    pub stroke: Color,
    pub width: f64,
}

impl Default for MinorTicks {
    fn default() -> Self {
        Self {
            count: defaults::minor_tick_count(),
            stroke: Color::new(0x66, 0x66, 0x66),
            width: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    /// Falls back to `round(size / 9)`.
    pub font_size: Option<f64>,
    pub fill: Color,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: None,
            fill: Color::new(0x33, 0x33, 0x33),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct NeedleStyle {
    pub width_ratio: f64,
    pub fill: Color,
    pub stroke: Color,
    pub opacity: f64,
}

impl Default for NeedleStyle {
    fn default() -> Self {
        Self {
            width_ratio: defaults::needle_width_ratio(),
            fill: Color::new(0xdc, 0x39, 0x12),
            stroke: Color::new(0xc6, 0x33, 0x10),
            opacity: 0.7,
        }
    }
}

/// The pivot disc drawn over the needle's root.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PivotStyle {
    pub radius_ratio: f64,
    pub fill: Color,
    pub stroke: Color,
    pub opacity: f64,
}

impl Default for PivotStyle {
    fn default() -> Self {
        Self {
            radius_ratio: defaults::needle_container_radius_ratio(),
            fill: Color::new(0x46, 0x84, 0xee),
            stroke: Color::new(0x66, 0x66, 0x66),
            opacity: 1.0,
        }
    }
}

// ============================================================================
// WIDGET OPTIONS
// ============================================================================

#[derive(Debug, Clone, Builder, Deserialize)]
pub struct GaugeOptions {
    #[builder(default = defaults::size())]
    #[serde(default = "defaults::size")]
    pub size: f64,
    pub min: f64,
    pub max: f64,

    #[builder(default)]
    #[serde(default)]
    pub major_ticks: MajorTicks,
    #[builder(default)]
    #[serde(default)]
    pub minor_ticks: MinorTicks,
    /// Falls back to `round(size / 16)`.
    #[serde(default)]
    pub tick_font_size: Option<f64>,

    #[builder(default)]
    #[serde(default)]
    pub outer: OuterRing,
    #[builder(default)]
    #[serde(default)]
    pub inner: InnerRing,

    #[builder(into)]
    #[serde(default)]
    pub label: Option<String>,
    #[builder(default)]
    #[serde(default)]
    pub label_style: LabelStyle,
    #[builder(into)]
    #[serde(default)]
    pub class_suffix: Option<String>,

    #[builder(default)]
    #[serde(default)]
    pub needle: NeedleStyle,
    #[builder(default)]
    #[serde(default)]
    pub needle_container: PivotStyle,

    #[builder(default = defaults::transition_duration_ms())]
    #[serde(default = "defaults::transition_duration_ms")]
    pub transition_duration_ms: u64,

    #[builder(default = defaults::gauge_zones())]
    #[serde(default = "defaults::gauge_zones")]
    pub zones: Vec<Zone>,
}

#[derive(Debug, Clone, Builder, Deserialize)]
pub struct TimerOptions {
    #[builder(default = defaults::size())]
    #[serde(default = "defaults::size")]
    pub size: f64,
    #[builder(default = defaults::rescale())]
    #[serde(default = "defaults::rescale")]
    pub rescale: f64,
    #[builder(default = defaults::range())]
    #[serde(default = "defaults::range")]
    pub range: f64,
    /// Clock value shown on construction.
    #[builder(default)]
    #[serde(default)]
    pub time: f64,

    #[builder(default = defaults::major_tick_count())]
    #[serde(default = "defaults::major_tick_count")]
    pub major_ticks: usize,
    #[builder(default = defaults::minor_tick_count())]
    #[serde(default = "defaults::minor_tick_count")]
    pub minor_ticks: usize,
    /// Major tick length as a fraction of the radius.
    #[builder(default = defaults::tick_length())]
    #[serde(default = "defaults::tick_length")]
    pub tick_length: f64,

    #[builder(default = defaults::needle_width_ratio())]
    #[serde(default = "defaults::needle_width_ratio")]
    pub needle_width_ratio: f64,
    #[builder(default = defaults::needle_container_radius_ratio())]
    #[serde(default = "defaults::needle_container_radius_ratio")]
    pub needle_container_radius_ratio: f64,

    #[builder(default = defaults::transition_duration_ms())]
    #[serde(default = "defaults::transition_duration_ms")]
    pub transition_duration_ms: u64,

    #[builder(into)]
    #[serde(default)]
    pub label: Option<String>,
    #[builder(into)]
    #[serde(default)]
    pub class_suffix: Option<String>,

    #[builder(default)]
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl GaugeOptions {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validates the options and derives the working parameters.
    pub fn resolve(&self) -> Result<DialConfig, ConfigError> {
        finite("size", self.size)?;
        finite("min", self.min)?;
        finite("max", self.max)?;
        finite("needle.width_ratio", self.needle.width_ratio)?;
        finite("needle_container.radius_ratio", self.needle_container.radius_ratio)?;
        positive("size", self.size)?;
        in_range("outer.width", self.outer.width, 0.0, f64::MAX)?;
        in_range("inner.width", self.inner.width, 0.0, f64::MAX)?;
        in_range("major_ticks.width", self.major_ticks.width, 0.0, f64::MAX)?;
        in_range("minor_ticks.width", self.minor_ticks.width, 0.0, f64::MAX)?;
        in_range("needle.opacity", self.needle.opacity, 0.0, 1.0)?;
        in_range("needle_container.opacity", self.needle_container.opacity, 0.0, 1.0)?;
        if let Some(font_size) = self.tick_font_size {
            finite("tick_font_size", font_size)?;
            positive("tick_font_size", font_size)?;
        }
        if let Some(font_size) = self.label_style.font_size {
            finite("label_style.font_size", font_size)?;
            positive("label_style.font_size", font_size)?;
        }
        if self.max <= self.min {
            return Err(ConfigError::EmptyRange {
                min: self.min,
                max: self.max,
            });
        }
        // Major delta is range / (count - 1).
        at_least("major_ticks.count", 2, self.major_ticks.count)?;
        at_least("minor_ticks.count", 1, self.minor_ticks.count)?;
        validate_zones(&self.zones)?;

        let config = DialConfig::new(
            self.size,
            self.min,
            self.max,
            self.major_ticks.count,
            self.minor_ticks.count,
            self.needle.width_ratio,
            self.needle_container.radius_ratio,
            self.transition_duration_ms,
            self.label.clone(),
            self.class_suffix.clone(),
            &self.zones,
        );
        debug!("resolved gauge options: {config:?}");
        Ok(config)
    }
}

impl TimerOptions {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validates the options and derives the working parameters.
    pub fn resolve(&self) -> Result<DialConfig, ConfigError> {
        finite("size", self.size)?;
        finite("rescale", self.rescale)?;
        finite("range", self.range)?;
        finite("time", self.time)?;
        finite("tick_length", self.tick_length)?;
        finite("needle_width_ratio", self.needle_width_ratio)?;
        finite("needle_container_radius_ratio", self.needle_container_radius_ratio)?;
        positive("size", self.size)?;
        positive("rescale", self.rescale)?;
        positive("range", self.range)?;
        positive("tick_length", self.tick_length)?;
        // The inner circle sits at 0.95 - tick_length.
        in_range("tick_length", self.tick_length, 0.0, 0.95)?;
        at_least("major_ticks", 1, self.major_ticks)?;
        at_least("minor_ticks", 1, self.minor_ticks)?;
        validate_zones(&self.zones)?;

        let config = DialConfig::new(
            self.size,
            0.0,
            self.range,
            self.major_ticks,
            self.minor_ticks,
            self.needle_width_ratio,
            self.needle_container_radius_ratio,
            self.transition_duration_ms,
            self.label.clone(),
            self.class_suffix.clone(),
            &self.zones,
        );
        debug!("resolved timer options: {config:?}");
        Ok(config)
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// Rejects NaN as well as values outside `[low, high]`.
fn in_range(field: &'static str, value: f64, low: f64, high: f64) -> Result<(), ConfigError> {
    if (low..=high).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            low,
            high,
        })
    }
}

fn at_least(field: &'static str, minimum: usize, value: usize) -> Result<(), ConfigError> {
    if value >= minimum {
        Ok(())
    } else {
        Err(ConfigError::TooFewTicks {
            field,
            minimum,
            value,
        })
    }
}

fn validate_zones(zones: &[Zone]) -> Result<(), ConfigError> {
    for (index, zone) in zones.iter().enumerate() {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(zone.from) || !in_unit(zone.to) || zone.from > zone.to {
            return Err(ConfigError::InvalidZone {
                index,
                from: zone.from,
                to: zone.to,
            });
        }
    }
    Ok(())
}

// ============================================================================
// RESOLVED CONFIGURATION
// ============================================================================

/// Working parameters shared by both dial faces. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct DialConfig {
    pub size: f64,
    pub radius: f64,
    pub cx: f64,
    pub cy: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub major_ticks: usize,
    pub minor_ticks: usize,
    pub needle_width_ratio: f64,
    pub needle_container_radius_ratio: f64,
    pub transition_duration: Duration,
    pub label: Option<String>,
    pub class_suffix: Option<String>,
    pub zones: Vec<ResolvedZone>,
}

impl DialConfig {
    #[allow(clippy::too_many_arguments)]
    fn new(
        size: f64,
        min: f64,
        max: f64,
        major_ticks: usize,
        minor_ticks: usize,
        needle_width_ratio: f64,
        needle_container_radius_ratio: f64,
        transition_duration_ms: u64,
        label: Option<String>,
        class_suffix: Option<String>,
        zones: &[Zone],
    ) -> Self {
        let center = size / 2.0;
        Self {
            size,
            radius: size * 0.9 / 2.0,
            cx: center,
            cy: center,
            min,
            max,
            range: max - min,
            major_ticks,
            minor_ticks,
            needle_width_ratio,
            needle_container_radius_ratio,
            transition_duration: Duration::from_millis(transition_duration_ms),
            label,
            class_suffix,
            zones: resolve_zones(zones, min, max),
        }
    }

    /// Root element class: `base` plus the optional suffix.
    pub fn root_class(&self, base: &str) -> String {
        match &self.class_suffix {
            Some(suffix) if !suffix.is_empty() => format!("{base} {suffix}"),
            _ => base.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_builder_fills_defaults() {
        let options = GaugeOptions::builder().min(0.0).max(100.0).build();
        assert_eq!(options.size, 450.0);
        assert_eq!(options.major_ticks.count, 12);
        assert_eq!(options.minor_ticks.count, 5);
        assert_eq!(options.needle.width_ratio, 0.4);
        assert_eq!(options.needle_container.radius_ratio, 0.7);
        assert_eq!(options.transition_duration_ms, 500);
        assert_eq!(options.zones.len(), 2);
        assert!(options.label.is_none());
    }

    #[test]
    fn resolve_derives_geometry() {
        let config = GaugeOptions::builder()
            .size(200.0)
            .min(10.0)
            .max(60.0)
            .build()
            .resolve()
            .unwrap();
        assert_eq!(config.radius, 90.0);
        assert_eq!((config.cx, config.cy), (100.0, 100.0));
        assert_eq!(config.range, 50.0);
        assert_eq!(config.transition_duration, Duration::from_millis(500));
    }

    #[test]
    fn zone_resolution_is_affine() {
        let zones = [Zone::new(0.0, 1.0, ZoneFill::Class("all".into()))];
        let resolved = resolve_zones(&zones, -20.0, 80.0);
        assert_eq!(resolved[0].from, -20.0);
        assert_eq!(resolved[0].to, 80.0);

        let zones = [Zone::new(0.25, 0.5, ZoneFill::Class("q".into()))];
        let resolved = resolve_zones(&zones, 0.0, 200.0);
        assert_eq!((resolved[0].from, resolved[0].to), (50.0, 100.0));
    }

    #[test]
    fn rejects_empty_range() {
        let err = GaugeOptions::builder()
            .min(5.0)
            .max(5.0)
            .build()
            .resolve()
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptyRange { min: 5.0, max: 5.0 });
    }

    #[test]
    fn rejects_non_finite_bounds() {
        let err = GaugeOptions::builder()
            .min(f64::NAN)
            .max(5.0)
            .build()
            .resolve()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFinite { field: "min", .. }));
    }

    #[test]
    fn rejects_degenerate_tick_counts() {
        let options = GaugeOptions::builder()
            .min(0.0)
            .max(1.0)
            .major_ticks(MajorTicks {
                count: 1,
                ..MajorTicks::default()
            })
            .build();
        assert!(matches!(
            options.resolve(),
            Err(ConfigError::TooFewTicks { minimum: 2, .. })
        ));

        let options = TimerOptions::builder().minor_ticks(0).build();
        assert!(matches!(
            options.resolve(),
            Err(ConfigError::TooFewTicks { field: "minor_ticks", .. })
        ));
    }

    #[test]
    fn rejects_bad_styling_numbers() {
        let base = || GaugeOptions::builder().min(0.0).max(10.0);

        let err = base()
            .outer(OuterRing {
                width: f64::NAN,
                ..OuterRing::default()
            })
            .build()
            .resolve()
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "outer.width", .. }));

        let err = base()
            .inner(InnerRing {
                width: f64::INFINITY,
                ..InnerRing::default()
            })
            .build()
            .resolve()
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "inner.width", .. }));

        let err = base()
            .needle(NeedleStyle {
                opacity: 1.5,
                ..NeedleStyle::default()
            })
            .build()
            .resolve()
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "needle.opacity", .. }));

        let err = base().tick_font_size(f64::NAN).build().resolve().unwrap_err();
        assert!(matches!(err, ConfigError::NotFinite { field: "tick_font_size", .. }));

        let err = base()
            .label_style(LabelStyle {
                font_size: Some(0.0),
                ..LabelStyle::default()
            })
            .build()
            .resolve()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { field: "label_style.font_size", .. }));

        assert!(base().tick_font_size(14.0).build().resolve().is_ok());
    }

    #[test]
    fn timer_tick_length_stays_inside_the_face() {
        let err = TimerOptions::builder().tick_length(1.2).build().resolve().unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "tick_length", .. }));
        let err = TimerOptions::builder().tick_length(0.0).build().resolve().unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { field: "tick_length", .. }));
        assert!(TimerOptions::builder().tick_length(0.95).build().resolve().is_ok());
    }

    #[test]
    fn rejects_inverted_or_out_of_range_zones() {
        let inverted = GaugeOptions::builder()
            .min(0.0)
            .max(1.0)
            .zones(vec![Zone::new(0.6, 0.4, ZoneFill::Class("x".into()))])
            .build();
        assert!(matches!(
            inverted.resolve(),
            Err(ConfigError::InvalidZone { index: 0, .. })
        ));

        let outside = TimerOptions::builder()
            .zones(vec![
                Zone::new(0.0, 0.5, ZoneFill::Class("ok".into())),
                Zone::new(0.5, 1.2, ZoneFill::Class("bad".into())),
            ])
            .build();
        assert!(matches!(
            outside.resolve(),
            Err(ConfigError::InvalidZone { index: 1, .. })
        ));
    }

    #[test]
    fn json_merges_nested_records_key_by_key() {
        let options = GaugeOptions::from_json(
            r##"{
                "min": 0,
                "max": 120,
                "major_ticks": { "count": 7 },
                "outer": { "fill": "#123456" },
                "zones": [ { "from": 0.5, "to": 1.0, "fill": { "class": "hot" } } ]
            }"##,
        )
        .unwrap();
        assert_eq!(options.major_ticks.count, 7);
        assert_eq!(options.major_ticks.width, MajorTicks::default().width);
        assert_eq!(options.outer.fill, Color::new(0x12, 0x34, 0x56));
        assert_eq!(options.outer.stroke, OuterRing::default().stroke);
        assert_eq!(options.inner, InnerRing::default());
        assert_eq!(options.zones[0].fill, ZoneFill::Class("hot".into()));
        assert_eq!(options.size, 450.0);
    }

    #[test]
    fn json_requires_gauge_bounds() {
        let err = GaugeOptions::from_json(r#"{ "max": 10 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(ref msg) if msg.contains("min")));
    }

    #[test]
    fn json_reports_bad_colors() {
        let err = GaugeOptions::from_json(
            r#"{ "min": 0, "max": 1, "outer": { "fill": "teal" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Json(ref msg) if msg.contains("invalid color")));
    }

    #[test]
    fn timer_defaults() {
        let config = TimerOptions::builder().build().resolve().unwrap();
        assert_eq!(config.min, 0.0);
        assert_eq!(config.max, 60.0);
        assert_eq!(config.range, 60.0);
        assert_eq!(config.major_ticks, 12);
        assert_eq!(config.minor_ticks, 5);
        assert!(config.zones.is_empty());
    }

    #[test]
    fn color_parsing() {
        assert_eq!(Color::parse("#fff").unwrap(), Color::new(255, 255, 255));
        assert_eq!(Color::parse("#4684EE").unwrap(), Color::new(0x46, 0x84, 0xee));
        assert_eq!(Color::new(0xdc, 0x39, 0x12).to_string(), "#dc3912");
        assert!(Color::parse("4684ee").is_err());
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#zzzzzz").is_err());
    }

    #[test]
    fn root_class_appends_suffix() {
        let config = TimerOptions::builder()
            .class_suffix("redhighlight")
            .build()
            .resolve()
            .unwrap();
        assert_eq!(config.root_class("timer"), "timer redhighlight");
    }
}
