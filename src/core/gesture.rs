use std::time::Instant;

use crate::models::{GestureSample, Point, SwipeTuning};

/// Floor for the inter-sample interval when estimating velocity.
///
/// Host timestamps have millisecond resolution, so two samples inside the
/// same tick would otherwise divide by zero.
const MIN_SAMPLE_INTERVAL_MS: f32 = 1.0;

/// Transient tracking state of one pointer/touch drag
///
/// Created on pointer-down, consumed on release. Velocity is deliberately
/// the raw quotient of the two most recent samples, with no smoothing
/// window: a final flick should register at full strength.
#[derive(Debug, Clone)]
pub struct GestureSession {
    origin: Point,
    last: Point,
    last_at: Instant,
    delta: Point,
    velocity: Point,
    moves: u32,
}

impl GestureSession {
    /// Start tracking at the pointer-down position
    pub fn begin(origin: Point, at: Instant) -> Self {
        Self {
            origin,
            last: origin,
            last_at: at,
            delta: Point::default(),
            velocity: Point::default(),
            moves: 0,
        }
    }

    /// Fold in one sampled pointer position, returning the updated delta
    ///
    /// The vertical component of the delta is damped so vertical motion
    /// never visually dominates the horizontal swipe.
    pub fn record(&mut self, point: Point, at: Instant, tuning: &SwipeTuning) -> Point {
        let dt_ms = at.duration_since(self.last_at).as_secs_f32() * 1000.0;
        let dt_ms = dt_ms.max(MIN_SAMPLE_INTERVAL_MS);

        self.velocity = Point::new(
            (point.x - self.last.x) / dt_ms,
            (point.y - self.last.y) / dt_ms,
        );
        self.last = point;
        self.last_at = at;

        self.delta = Point::new(
            point.x - self.origin.x,
            (point.y - self.origin.y) * tuning.vertical_damping,
        );
        self.moves += 1;
        self.delta
    }

    /// Number of samples recorded since pointer-down
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Finish the session, yielding the release-time delta and velocity
    ///
    /// A session released with zero recorded moves yields all-zero values,
    /// which the classifier always resolves to cancel.
    pub fn release(self) -> GestureSample {
        GestureSample {
            delta: self.delta,
            velocity: self.velocity,
        }
    }
}
