use std::sync::Arc;

use crate::axis::{Axis, Vec2};
use crate::clock::{Clock, MonotonicTime, TimeSource};
use crate::params::{BallParameters, Parameter, ParameterError};
use crate::trajectory::{BallTrajectory, Sample};

/// A ball with its parameters, playback clock and precomputed trajectory.
///
/// Every accepted parameter edit resets the clock and rebuilds the
/// trajectory before returning, so the trajectory always matches the
/// parameters. Rebuilds swap in a new [`BallTrajectory`]; snapshots handed
/// out earlier by [`SimulatedBody::trajectory`] stay valid and unchanged.
#[derive(Debug, Clone)]
pub struct SimulatedBody<T: TimeSource = MonotonicTime> {
    params: BallParameters,
    clock: Clock<T>,
    trajectory: Arc<BallTrajectory>,
}

impl SimulatedBody<MonotonicTime> {
    /// Ball with the default parameters and a wall clock.
    pub fn new() -> Self {
        let params = BallParameters::default();
        Self::assemble(params, Clock::new())
    }

    pub fn with_parameters(params: BallParameters) -> Result<Self, ParameterError> {
        Self::with_source(params, MonotonicTime::new())
    }
}

impl Default for SimulatedBody<MonotonicTime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> SimulatedBody<T> {
    pub fn with_source(params: BallParameters, source: T) -> Result<Self, ParameterError> {
        params.validate()?;
        Ok(Self::assemble(params, Clock::with_source(source)))
    }

    fn assemble(params: BallParameters, clock: Clock<T>) -> Self {
        let trajectory = Arc::new(BallTrajectory::build(&params));
        Self {
            params,
            clock,
            trajectory,
        }
    }

    pub fn parameters(&self) -> &BallParameters {
        &self.params
    }

    pub fn start_position(&self) -> Vec2 {
        self.params.start_position
    }

    pub fn start_velocity(&self) -> Vec2 {
        self.params.start_velocity
    }

    pub fn coefficient(&self) -> Vec2 {
        self.params.coefficient
    }

    /// Snapshot of the current trajectory.
    pub fn trajectory(&self) -> Arc<BallTrajectory> {
        Arc::clone(&self.trajectory)
    }

    pub fn set_start_position(&mut self, axis: Axis, value: f64) -> Result<bool, ParameterError> {
        self.set(Parameter::Position, axis, value)
    }

    pub fn set_start_velocity(&mut self, axis: Axis, value: f64) -> Result<bool, ParameterError> {
        self.set(Parameter::Velocity, axis, value)
    }

    pub fn set_coefficient(&mut self, axis: Axis, value: f64) -> Result<bool, ParameterError> {
        self.set(Parameter::Coefficient, axis, value)
    }

    /// Validate and apply one parameter edit.
    ///
    /// `Ok(true)`: value changed, clock reset, trajectory rebuilt.
    /// `Ok(false)`: value already current, nothing touched.
    /// `Err(_)`: rejected, nothing touched.
    pub fn set(
        &mut self,
        parameter: Parameter,
        axis: Axis,
        value: f64,
    ) -> Result<bool, ParameterError> {
        if !self.params.set(parameter, axis, value)? {
            return Ok(false);
        }
        tracing::debug!(%parameter, %axis, value, "parameter changed");
        self.clock.reset();
        self.trajectory = Arc::new(BallTrajectory::build(&self.params));
        Ok(true)
    }

    pub fn start(&mut self) {
        self.clock.start();
        tracing::trace!(elapsed = self.clock.elapsed(), "playback started");
    }

    /// Toggle between running and paused.
    pub fn pause(&mut self) {
        if self.clock.is_running() {
            self.clock.stop();
            tracing::trace!(elapsed = self.clock.elapsed(), "playback paused");
        } else {
            self.start();
        }
    }

    pub fn reset(&mut self) {
        self.clock.reset();
        tracing::trace!("playback reset");
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// True once any elapsed time has accrued since the last reset.
    pub fn is_active(&self) -> bool {
        self.clock.elapsed() > 0.0
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    /// True once both axes have come to rest at the current clock time.
    pub fn is_at_rest(&self) -> bool {
        self.trajectory
            .stop_time()
            .is_some_and(|stop| self.clock.elapsed() > stop)
    }

    /// Sample at the clock's current elapsed time.
    pub fn sample(&self) -> Sample {
        self.trajectory.sample(self.clock.elapsed())
    }

    pub fn sample_at(&self, t: f64) -> Sample {
        self.trajectory.sample(t)
    }
}
