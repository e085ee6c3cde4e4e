//! Time-driven value animation.
//!
//! A [`ValueAnimator`] interpolates a single `f32` from a start value to an end
//! value over a fixed duration. It never reads a clock: the owner feeds it the
//! time that passed since the previous frame with [`ValueAnimator::advance`],
//! so a run is fully determined by the deltas it receives.
//!
//! ```
//! use std::time::Duration;
//! use loading_button::animation::{Easing, ValueAnimator};
//!
//! let values: Vec<f32> = ValueAnimator::new(0.0, 100.0, Duration::from_millis(100))
//!     .with_easing(Easing::Linear)
//!     .frames(Duration::from_millis(25))
//!     .collect();
//! assert_eq!(values, vec![25.0, 50.0, 75.0, 100.0]);
//! ```
use std::{f64::consts::PI, time::Duration};

/// Length of the primary run started by the button.
pub const PRIMARY_RUN_DURATION: Duration = Duration::from_millis(10_000);

/// Length of the corrective run started when the button is asked to finish early.
pub const FINISHING_RUN_DURATION: Duration = Duration::from_millis(700);

/// Smallest step accepted by [`ValueAnimator::frames`].
const MIN_FRAME_STEP: Duration = Duration::from_millis(1);

/// Interpolation curve applied to the linear time fraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start and slow end, following half a cosine period.
    #[default]
    AccelerateDecelerate,
}

impl Easing {
    /// Maps a linear fraction in `[0, 1]` to an eased fraction in `[0, 1]`.
    ///
    /// Both curves are strictly increasing on the open interval.
    pub fn apply(self, fraction: f64) -> f64 {
        let t = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

/// Lifecycle of a single run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// Created, no frame delivered yet.
    Pending,
    /// At least one frame delivered, end not reached.
    Running,
    /// The end value was delivered.
    Finished,
    /// Stopped before reaching the end. No further frames are produced.
    Cancelled,
}

/// One value produced by [`ValueAnimator::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationFrame {
    /// The interpolated value.
    pub value: f32,
    /// Whether this is the first frame of the run.
    pub is_first: bool,
    /// Whether this frame carries the end value and finishes the run.
    pub is_last: bool,
}

/// Interpolates a value over a fixed duration.
///
/// A run is not restartable; start a new one with a fresh instance.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueAnimator {
    from: f32,
    to: f32,
    duration: Duration,
    easing: Easing,
    elapsed: Duration,
    status: RunStatus,
}

impl ValueAnimator {
    /// Creates a pending run from `from` to `to` over `duration`.
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            easing: Easing::default(),
            elapsed: Duration::ZERO,
            status: RunStatus::Pending,
        }
    }

    /// Replaces the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Whether the run can still produce frames.
    pub fn is_active(&self) -> bool {
        matches!(self.status, RunStatus::Pending | RunStatus::Running)
    }

    /// The value this run shows after `elapsed` time. Pure; does not touch the run.
    pub fn value_at(&self, elapsed: Duration) -> f32 {
        if elapsed >= self.duration {
            return self.to;
        }
        let fraction = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = self.easing.apply(fraction);
        (self.from as f64 + (self.to as f64 - self.from as f64) * eased) as f32
    }

    /// Moves the run forward by `delta` and returns the new frame.
    ///
    /// Returns `None` once the run is finished or cancelled. The first call
    /// always yields a frame, even with a zero delta.
    pub fn advance(&mut self, delta: Duration) -> Option<AnimationFrame> {
        if !self.is_active() {
            return None;
        }
        let is_first = self.status == RunStatus::Pending;
        self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
        let is_last = self.elapsed >= self.duration;
        self.status = if is_last {
            RunStatus::Finished
        } else {
            RunStatus::Running
        };
        Some(AnimationFrame {
            value: self.value_at(self.elapsed),
            is_first,
            is_last,
        })
    }

    /// Stops the run. A finished run stays finished.
    pub fn cancel(&mut self) {
        if self.is_active() {
            self.status = RunStatus::Cancelled;
        }
    }

    /// Turns the run into a lazy sequence of values sampled every `step`.
    ///
    /// Steps shorter than one millisecond are raised to one millisecond so the
    /// sequence always ends.
    pub fn frames(self, step: Duration) -> Frames {
        Frames {
            animator: self,
            step: step.max(MIN_FRAME_STEP),
        }
    }
}

/// Iterator returned by [`ValueAnimator::frames`].
#[derive(Clone, Debug)]
pub struct Frames {
    animator: ValueAnimator,
    step: Duration,
}

impl Iterator for Frames {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        self.animator.advance(self.step).map(|frame| frame.value)
    }
}
