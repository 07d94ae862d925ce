//! Host-driven interpolation.
//!
//! Widgets never own a clock. The host calls `advance` with the time elapsed
//! since the previous frame and the widget applies whatever the running
//! tweens produce. A new target replaces the running tween outright.

use std::time::Duration;

use log::trace;

/// Linear interpolation of a scalar over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Normalized progress in `[0, 1]`.
    pub fn step(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn value(&self) -> f64 {
        self.value_at(self.step())
    }

    pub fn value_at(&self, step: f64) -> f64 {
        self.from + (self.to - self.from) * step
    }

    pub fn advance(&mut self, dt: Duration) -> f64 {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.step()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn target(&self) -> f64 {
        self.to
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle,
    Animating(Tween),
}

/// What a retarget did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Retarget {
    /// Applied at once; nothing left to animate.
    Immediate(f64),
    /// A tween now runs toward the target.
    Started,
}

/// One frame's worth of an animated value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub value: f64,
    pub finished: bool,
}

/// A scalar that moves between committed targets.
///
/// The committed value is the last requested target, recorded when the
/// request is made rather than when the animation ends, so a superseding
/// request starts from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Animated {
    committed: Option<f64>,
    phase: Phase,
}

impl Default for Animated {
    fn default() -> Self {
        Self::new()
    }
}

impl Animated {
    pub const fn new() -> Self {
        Self {
            committed: None,
            phase: Phase::Idle,
        }
    }

    pub const fn starting_at(value: f64) -> Self {
        Self {
            committed: Some(value),
            phase: Phase::Idle,
        }
    }

    pub fn retarget(&mut self, target: f64, duration: Duration) -> Retarget {
        let from = self.committed.unwrap_or(target);
        self.committed = Some(target);
        if duration.is_zero() || from == target {
            self.phase = Phase::Idle;
            return Retarget::Immediate(target);
        }
        if let Phase::Animating(running) = self.phase {
            trace!("superseding tween toward {}", running.target());
        }
        self.phase = Phase::Animating(Tween::new(from, target, duration));
        Retarget::Started
    }

    /// Steps a running tween; `None` when idle.
    pub fn advance(&mut self, dt: Duration) -> Option<Frame> {
        let Phase::Animating(mut tween) = self.phase else {
            return None;
        };
        tween.advance(dt);
        let frame = Frame {
            value: tween.value(),
            finished: tween.is_finished(),
        };
        self.phase = if frame.finished {
            Phase::Idle
        } else {
            Phase::Animating(tween)
        };
        Some(frame)
    }

    pub fn committed(&self) -> Option<f64> {
        self.committed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn tween_is_linear_in_elapsed_time() {
        let mut tween = Tween::new(10.0, 30.0, 100 * MS);
        assert_eq!(tween.value(), 10.0);
        tween.advance(25 * MS);
        assert!((tween.value() - 15.0).abs() < 1e-9);
        tween.advance(50 * MS);
        assert!((tween.value() - 25.0).abs() < 1e-9);
        tween.advance(500 * MS);
        assert_eq!(tween.step(), 1.0);
        assert_eq!(tween.value(), 30.0);
        assert!(tween.is_finished());
    }

    #[test]
    fn first_target_is_applied_without_motion() {
        let mut angle = Animated::new();
        assert_eq!(angle.retarget(42.0, 500 * MS), Retarget::Immediate(42.0));
        assert!(!angle.is_animating());
        assert_eq!(angle.committed(), Some(42.0));
        assert_eq!(angle.advance(16 * MS), None);
    }

    #[test]
    fn zero_duration_is_immediate() {
        let mut angle = Animated::starting_at(0.0);
        assert_eq!(angle.retarget(90.0, Duration::ZERO), Retarget::Immediate(90.0));
        assert_eq!(angle.phase(), Phase::Idle);
    }

    #[test]
    fn animates_from_committed_to_target() {
        let mut angle = Animated::starting_at(0.0);
        assert_eq!(angle.retarget(100.0, 200 * MS), Retarget::Started);
        let frame = angle.advance(50 * MS).unwrap();
        assert!((frame.value - 25.0).abs() < 1e-9);
        assert!(!frame.finished);
        let frame = angle.advance(150 * MS).unwrap();
        assert_eq!(frame.value, 100.0);
        assert!(frame.finished);
        assert!(!angle.is_animating());
    }

    #[test]
    fn superseding_request_starts_from_the_committed_target() {
        let mut angle = Animated::starting_at(0.0);
        angle.retarget(100.0, 200 * MS);
        angle.advance(100 * MS);
        angle.retarget(50.0, 100 * MS);
        let frame = angle.advance(Duration::ZERO).unwrap();
        assert_eq!(frame.value, 100.0);
        let frame = angle.advance(100 * MS).unwrap();
        assert_eq!(frame.value, 50.0);
        assert!(frame.finished);
    }
}
