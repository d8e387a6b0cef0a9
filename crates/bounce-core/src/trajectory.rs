//! Piecewise trajectory construction and lookup.
//!
//! A rebuild turns the ball parameters into one ordered, gap-free sequence of
//! [`AxisProfile`] segments per axis, covering `[0, T_MAX]`. The vertical
//! axis is a bounce train cut off once the remaining bounces add up to less
//! than [`SETTLE_THRESHOLD`]; the horizontal axis flies freely until the
//! vertical axis settles, then rolls to a stop under friction.

use serde::{Deserialize, Serialize};

use crate::axis::Vec2;
use crate::params::BallParameters;
use crate::profile::{AxisProfile, ProfileKind};
use crate::{GRAVITY, MAX_BOUNCES, SETTLE_THRESHOLD, T_MAX};

/// Ordered, contiguous segments for one axis.
///
/// Never empty; consecutive segments share their boundary time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    segments: Vec<AxisProfile>,
}

impl Trajectory {
    fn from_segments(segments: Vec<AxisProfile>) -> Self {
        debug_assert!(!segments.is_empty());
        Self { segments }
    }

    pub fn segments(&self) -> &[AxisProfile] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment governing time `t`.
    ///
    /// First segment whose end is at or after `t`, so a shared boundary
    /// resolves to the earlier segment. Times outside `[0, T_MAX]` (and NaN)
    /// resolve to the nearest end of the sequence.
    pub fn segment_at(&self, t: f64) -> &AxisProfile {
        let idx = self.segments.partition_point(|s| s.time_end() < t);
        &self.segments[idx.min(self.segments.len() - 1)]
    }

    pub fn position(&self, t: f64) -> f64 {
        self.segment_at(t).position(t)
    }

    pub fn velocity(&self, t: f64) -> f64 {
        self.segment_at(t).velocity(t)
    }

    /// Start of the terminal rest segment, if the axis comes to rest.
    pub fn rest_time(&self) -> Option<f64> {
        self.segments
            .last()
            .filter(|s| !s.has_motion())
            .map(AxisProfile::time_start)
    }
}

/// Snapshot of the ball at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Reported time. Freezes at the moment horizontal motion stops.
    pub time: f64,
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Both axis sequences from one rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallTrajectory {
    pub x: Trajectory,
    pub y: Trajectory,
    settle_time: f64,
}

impl BallTrajectory {
    pub fn build(params: &BallParameters) -> Self {
        let (y, settle_time) = build_vertical(
            params.start_position.y,
            params.start_velocity.y,
            params.coefficient.y,
        );
        let x = build_horizontal(params.start_velocity.x, params.coefficient.x, settle_time);
        let trajectory = Self { x, y, settle_time };
        tracing::debug!(
            vertical_segments = trajectory.y.len(),
            horizontal_segments = trajectory.x.len(),
            settle_time,
            stop_time = ?trajectory.stop_time(),
            "rebuilt trajectory"
        );
        trajectory
    }

    /// Moment the vertical bounce train is cut off and the ball lies on the floor.
    pub fn settle_time(&self) -> f64 {
        self.settle_time
    }

    /// Moment both axes are at rest, or `None` if the ball is still rolling
    /// at the horizon.
    pub fn stop_time(&self) -> Option<f64> {
        let x = self.x.rest_time()?;
        let y = self.y.rest_time()?;
        Some(x.max(y))
    }

    pub fn sample(&self, t: f64) -> Sample {
        let sx = self.x.segment_at(t);
        let sy = self.y.segment_at(t);
        Sample {
            time: if sx.has_motion() { t } else { sx.time_start() },
            position: Vec2::new(sx.position(t), sy.position(t)),
            velocity: Vec2::new(sx.velocity(t), sy.velocity(t)),
        }
    }
}

/// Bounce train for height `h`, upward velocity `v0` and restitution `e`.
///
/// Returns the segments and the settle time `t_end`.
pub fn build_vertical(h: f64, v0: f64, e: f64) -> (Trajectory, f64) {
    let mut segments = Vec::new();

    // Positive root of h + v0 t - g t^2 / 2 = 0.
    let t1 = (v0 + (v0 * v0 + 2.0 * GRAVITY * h).sqrt()) / GRAVITY;
    segments.push(AxisProfile::vertical((0.0, t1), h, v0));

    let mut v = (v0 - GRAVITY * t1).abs();
    // Sum of the geometric series of bounce durations.
    let mut t_end = t1 + (2.0 * v / GRAVITY) * e / (1.0 - e);

    let mut t = t1;
    let mut bounces = 0usize;
    loop {
        v *= e;
        let dt = 2.0 * v / GRAVITY;
        segments.push(AxisProfile::vertical((t, t + dt), 0.0, v));
        t += dt;
        bounces += 1;
        if t_end - t <= SETTLE_THRESHOLD {
            break;
        }
        if bounces >= MAX_BOUNCES {
            tracing::warn!(bounces, t, t_end, "bounce cap reached, settling early");
            t_end = t;
            break;
        }
    }

    // Close the remaining gap with one more (clamped) hop ending at t_end.
    v *= e;
    segments.push(AxisProfile::vertical((t, t_end), 0.0, v));
    segments.push(AxisProfile::rest(ProfileKind::Vertical, (t_end, T_MAX), 0.0));

    (Trajectory::from_segments(segments), t_end)
}

/// Horizontal motion for launch speed `v0` and friction `u`, given the
/// vertical settle time `t_end`.
pub fn build_horizontal(v0: f64, u: f64, t_end: f64) -> Trajectory {
    if u <= 0.0 {
        let rolling = AxisProfile::horizontal(0.0, (0.0, T_MAX), 0.0, v0);
        return Trajectory::from_segments(vec![rolling]);
    }

    let mut segments = vec![AxisProfile::horizontal(0.0, (0.0, t_end), 0.0, v0)];

    let tx = v0 / (GRAVITY * u);
    let t_stop = t_end + tx;
    if t_stop >= T_MAX {
        segments.push(AxisProfile::horizontal(u, (t_end, T_MAX), v0 * t_end, v0));
        return Trajectory::from_segments(segments);
    }

    let rolling = AxisProfile::horizontal(u, (t_end, t_stop), v0 * t_end, v0);
    let resting_x = rolling.position(t_stop);
    segments.push(rolling);
    segments.push(AxisProfile::rest(
        ProfileKind::HorizontalFriction(0.0),
        (t_stop, T_MAX),
        resting_x,
    ));
    Trajectory::from_segments(segments)
}
