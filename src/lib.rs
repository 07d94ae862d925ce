// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

//! Animated SVG dials.
//!
//! A [`Gauge`] sweeps 270 degrees over `[min, max]` with colored zones and a
//! numeric readout. A [`Timer`] wraps a full turn over `[0, range]` and keeps
//! a running clock that can leave frozen needle traces behind.
//!
//! Both build a [`Scene`] that serializes to SVG and move their needle by
//! host-driven tweens: call [`Dial::advance`] once per frame with the elapsed
//! time. [`Viewer`] does that in a desktop window.

pub mod animation;
pub mod config;
pub mod error;
pub mod gauge;
pub mod geometry;
pub mod needle;
pub mod raster;
pub mod scene;
pub mod timer;
pub mod window;

use std::time::Duration;

use log::warn;

pub use config::{Color, GaugeOptions, TimerOptions, Zone, ZoneFill};
pub use error::{ConfigError, RasterError};
pub use gauge::Gauge;
pub use geometry::{Point, Polar, Sweep};
pub use raster::Rasterizer;
pub use scene::{NodeId, Scene};
pub use timer::Timer;
pub use window::Viewer;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Command enum for updates sent to a dial from another thread.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetCommand {
    /// Move the needle; `None` uses the configured transition duration.
    Redraw(f64, Option<Duration>),
    Tick,
    Freeze(Option<f64>),
    Reset(Option<f64>),
    Clear,
    SetLabel(String),
    ToggleScale(f64),
}

/// Shared surface of the gauge and the timer.
pub trait Dial {
    fn redraw_to(&mut self, value: f64, duration: Option<Duration>);

    /// Steps running animations by `dt`. Returns true while any is still
    /// running afterwards.
    fn advance(&mut self, dt: Duration) -> bool;

    fn is_animating(&self) -> bool;

    fn scene(&self) -> &Scene;

    /// Rendered edge length in pixels.
    fn size(&self) -> f64 {
        self.scene().display_size()
    }

    fn apply(&mut self, command: WidgetCommand) {
        match command {
            WidgetCommand::Redraw(value, duration) => self.redraw_to(value, duration),
            other => warn!("{other:?} is not supported by this dial"),
        }
    }
}
