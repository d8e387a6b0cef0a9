//! Closed-form trajectory engine for a ball that is thrown, bounces on the
//! floor and then rolls to a stop.
//!
//! Instead of integrating step by step, each axis is precomputed as a short
//! list of time-bounded kinematic segments ([`AxisProfile`]); a query at any
//! time `t` finds the segment containing `t` and evaluates its formula.

pub mod axis;
pub mod body;
pub mod clock;
pub mod params;
pub mod profile;
pub mod trajectory;

pub use axis::{Axis, AxisParseError, Vec2};
pub use body::SimulatedBody;
pub use clock::{Clock, MonotonicTime, TimeSource};
pub use params::{BallParameters, Parameter, ParameterError, ValidRange};
pub use profile::{AxisProfile, ProfileKind};
pub use trajectory::{BallTrajectory, Sample, Trajectory};

/// Gravitational acceleration (m/s^2).
pub const GRAVITY: f64 = 9.8;

/// Rest horizon: one year in seconds. Terminal rest segments end here
/// instead of at infinity so every lookup stays finite.
pub const T_MAX: f64 = 3600.0 * 8760.0;

/// The bounce train is cut off once the bounces still to come would take
/// less than this many seconds in total.
pub const SETTLE_THRESHOLD: f64 = 0.005;

/// Upper bound on generated bounces, reached only for restitution very
/// close to 1. The ball is treated as settled at that point.
pub const MAX_BOUNCES: usize = 4096;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::axis::Vec2;
    use crate::body::SimulatedBody;
    use crate::params::BallParameters;

    pub use crate::clock::ManualTime;

    /// Parameters with a short, easy to reason about trajectory: dropped
    /// from 4.9 m (1 s fall), no vertical launch speed, 2 m/s sideways.
    pub fn short_drop() -> BallParameters {
        BallParameters {
            start_position: Vec2::new(0.0, 4.9),
            start_velocity: Vec2::new(2.0, 0.0),
            coefficient: Vec2::new(0.5, 0.2),
        }
    }

    /// A body driven by a [`ManualTime`] the caller keeps a handle to.
    pub fn manual_body(params: BallParameters) -> (ManualTime, SimulatedBody<ManualTime>) {
        let time = ManualTime::new();
        let body = SimulatedBody::with_source(params, time.clone())
            .expect("test parameters must be valid");
        (time, body)
    }
}
