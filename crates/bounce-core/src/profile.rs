use serde::{Deserialize, Serialize};

use crate::GRAVITY;

/// Kinematic law carried by an [`AxisProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProfileKind {
    /// Free fall under gravity, clamped at the floor.
    Vertical,
    /// Horizontal motion decelerated by rolling friction with coefficient `u`.
    /// `u = 0` during free flight.
    HorizontalFriction(f64),
}

/// A single time-bounded closed-form law for one axis.
///
/// Valid on the closed interval `[time_start, time_end]`. Evaluated with
/// absolute simulation time; the law itself uses `t - time_start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisProfile {
    time_start: f64,
    time_end: f64,
    initial_position: f64,
    initial_velocity: f64,
    has_motion: bool,
    kind: ProfileKind,
}

impl AxisProfile {
    /// Span endpoints may be given in either order.
    pub fn new(
        kind: ProfileKind,
        span: (f64, f64),
        initial_position: f64,
        initial_velocity: f64,
    ) -> Self {
        let (a, b) = span;
        Self {
            time_start: a.min(b),
            time_end: a.max(b),
            initial_position,
            initial_velocity,
            has_motion: true,
            kind,
        }
    }

    pub fn vertical(span: (f64, f64), initial_position: f64, initial_velocity: f64) -> Self {
        Self::new(
            ProfileKind::Vertical,
            span,
            initial_position,
            initial_velocity,
        )
    }

    pub fn horizontal(
        friction: f64,
        span: (f64, f64),
        initial_position: f64,
        initial_velocity: f64,
    ) -> Self {
        Self::new(
            ProfileKind::HorizontalFriction(friction),
            span,
            initial_position,
            initial_velocity,
        )
    }

    /// A frozen segment: the body sits at `position` for the whole span.
    pub fn rest(kind: ProfileKind, span: (f64, f64), position: f64) -> Self {
        Self {
            has_motion: false,
            ..Self::new(kind, span, position, 0.0)
        }
    }

    pub fn time_start(&self) -> f64 {
        self.time_start
    }

    pub fn time_end(&self) -> f64 {
        self.time_end
    }

    pub fn initial_position(&self) -> f64 {
        self.initial_position
    }

    pub fn initial_velocity(&self) -> f64 {
        self.initial_velocity
    }

    pub fn has_motion(&self) -> bool {
        self.has_motion
    }

    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    pub fn in_range(&self, t: f64) -> bool {
        self.time_start <= t && t <= self.time_end
    }

    pub fn velocity(&self, t: f64) -> f64 {
        if !self.has_motion {
            return 0.0;
        }
        let tau = t - self.time_start;
        match self.kind {
            ProfileKind::Vertical => self.initial_velocity - GRAVITY * tau,
            // Friction only decelerates; it never reverses the motion.
            ProfileKind::HorizontalFriction(u) => {
                (self.initial_velocity - GRAVITY * u * tau).max(0.0)
            },
        }
    }

    pub fn position(&self, t: f64) -> f64 {
        if !self.has_motion {
            return match self.kind {
                ProfileKind::Vertical => self.initial_position.max(0.0),
                ProfileKind::HorizontalFriction(_) => self.initial_position,
            };
        }
        let tau = t - self.time_start;
        match self.kind {
            // Clamp absorbs overshoot past the floor at impact.
            ProfileKind::Vertical => (self.initial_position + self.initial_velocity * tau
                - 0.5 * GRAVITY * tau * tau)
                .max(0.0),
            // Unclamped: the builder ends the segment when velocity reaches zero.
            ProfileKind::HorizontalFriction(u) => {
                self.initial_position + self.initial_velocity * tau - 0.5 * GRAVITY * u * tau * tau
            },
        }
    }
}
