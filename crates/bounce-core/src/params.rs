use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::axis::{Axis, Vec2};

/// The three editable per-axis parameters of a ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    /// Start position (m). Only `y` (launch height) affects the trajectory.
    Position,
    /// Start velocity (m/s).
    Velocity,
    /// Friction on `x`, restitution on `y`.
    Coefficient,
}

impl Parameter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Velocity => "velocity",
            Self::Coefficient => "coefficient",
        }
    }

    /// Accepted values for this parameter on `axis`.
    pub fn valid_range(self, axis: Axis) -> ValidRange {
        match (self, axis) {
            (Self::Position, _) => ValidRange::half_open(0.0, 90.0),
            (Self::Velocity, _) => ValidRange::closed(0.0, 200.0),
            (Self::Coefficient, Axis::X) => ValidRange::at_least(0.01),
            (Self::Coefficient, Axis::Y) => ValidRange::half_open(0.01, 1.0),
        }
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Parameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "position" | "pos" => Ok(Self::Position),
            "velocity" | "vel" => Ok(Self::Velocity),
            "coefficient" | "coeff" => Ok(Self::Coefficient),
            other => Err(format!("unknown parameter: {other:?}")),
        }
    }
}

/// Lower-inclusive interval with an optional upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidRange {
    pub min: f64,
    pub max: Option<f64>,
    pub max_inclusive: bool,
}

impl ValidRange {
    pub const fn closed(min: f64, max: f64) -> Self {
        Self {
            min,
            max: Some(max),
            max_inclusive: true,
        }
    }

    pub const fn half_open(min: f64, max: f64) -> Self {
        Self {
            min,
            max: Some(max),
            max_inclusive: false,
        }
    }

    pub const fn at_least(min: f64) -> Self {
        Self {
            min,
            max: None,
            max_inclusive: false,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        if value < self.min {
            return false;
        }
        match self.max {
            Some(max) if self.max_inclusive => value <= max,
            Some(max) => value < max,
            None => true,
        }
    }
}

impl std::fmt::Display for ValidRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.max {
            Some(max) if self.max_inclusive => write!(f, "[{}, {}]", self.min, max),
            Some(max) => write!(f, "[{}, {})", self.min, max),
            None => write!(f, "[{}, inf)", self.min),
        }
    }
}

/// Rejected parameter edit. The body keeps its previous value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    NotFinite {
        parameter: Parameter,
        axis: Axis,
    },
    OutOfRange {
        parameter: Parameter,
        axis: Axis,
        value: f64,
        range: ValidRange,
    },
}

impl std::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFinite { parameter, axis } => {
                write!(f, "{parameter}.{axis} must be a finite number")
            },
            Self::OutOfRange {
                parameter,
                axis,
                value,
                range,
            } => write!(f, "{parameter}.{axis} = {value} is outside {range}"),
        }
    }
}

impl std::error::Error for ParameterError {}

/// Check a candidate value against the accepted range for `parameter`/`axis`.
pub fn validate(parameter: Parameter, axis: Axis, value: f64) -> Result<(), ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NotFinite { parameter, axis });
    }
    let range = parameter.valid_range(axis);
    if !range.contains(value) {
        return Err(ParameterError::OutOfRange {
            parameter,
            axis,
            value,
            range,
        });
    }
    Ok(())
}

/// Initial conditions and material coefficients of the ball.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallParameters {
    /// Launch point (m). `y` is the height above the floor.
    pub start_position: Vec2,
    /// Launch velocity (m/s).
    pub start_velocity: Vec2,
    /// `x`: rolling friction coefficient, `y`: restitution coefficient.
    pub coefficient: Vec2,
}

impl Default for BallParameters {
    fn default() -> Self {
        Self {
            start_position: Vec2::new(0.0, 50.0),
            start_velocity: Vec2::new(10.0, 20.0),
            coefficient: Vec2::new(0.05, 0.3),
        }
    }
}

impl BallParameters {
    pub fn get(&self, parameter: Parameter, axis: Axis) -> f64 {
        self.field(parameter)[axis]
    }

    /// Validate and store. Returns whether the stored value changed.
    pub fn set(
        &mut self,
        parameter: Parameter,
        axis: Axis,
        value: f64,
    ) -> Result<bool, ParameterError> {
        validate(parameter, axis, value)?;
        let slot = &mut self.field_mut(parameter)[axis];
        if *slot == value {
            return Ok(false);
        }
        *slot = value;
        Ok(true)
    }

    /// Check every field; reports the first offending one.
    pub fn validate(&self) -> Result<(), ParameterError> {
        for parameter in [
            Parameter::Position,
            Parameter::Velocity,
            Parameter::Coefficient,
        ] {
            for axis in Axis::ALL {
                validate(parameter, axis, self.get(parameter, axis))?;
            }
        }
        Ok(())
    }

    fn field(&self, parameter: Parameter) -> &Vec2 {
        match parameter {
            Parameter::Position => &self.start_position,
            Parameter::Velocity => &self.start_velocity,
            Parameter::Coefficient => &self.coefficient,
        }
    }

    fn field_mut(&mut self, parameter: Parameter) -> &mut Vec2 {
        match parameter {
            Parameter::Position => &mut self.start_position,
            Parameter::Velocity => &mut self.start_velocity,
            Parameter::Coefficient => &mut self.coefficient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_are_valid() {
        let params = BallParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.start_position, Vec2::new(0.0, 50.0));
        assert_eq!(params.start_velocity, Vec2::new(10.0, 20.0));
        assert_eq!(params.coefficient, Vec2::new(0.05, 0.3));
    }

    #[test]
    fn position_range_is_half_open() {
        assert!(validate(Parameter::Position, Axis::Y, 0.0).is_ok());
        assert!(validate(Parameter::Position, Axis::Y, 89.999).is_ok());
        assert!(validate(Parameter::Position, Axis::Y, 90.0).is_err());
        assert!(validate(Parameter::Position, Axis::X, -0.1).is_err());
    }

    #[test]
    fn velocity_range_is_closed() {
        assert!(validate(Parameter::Velocity, Axis::X, 0.0).is_ok());
        assert!(validate(Parameter::Velocity, Axis::X, 200.0).is_ok());
        assert!(validate(Parameter::Velocity, Axis::Y, 200.1).is_err());
        assert!(validate(Parameter::Velocity, Axis::Y, -1.0).is_err());
    }

    #[test]
    fn coefficient_ranges_differ_by_axis() {
        assert!(validate(Parameter::Coefficient, Axis::X, 0.01).is_ok());
        assert!(validate(Parameter::Coefficient, Axis::X, 5.0).is_ok());
        assert!(validate(Parameter::Coefficient, Axis::X, 0.009).is_err());
        assert!(validate(Parameter::Coefficient, Axis::Y, 0.01).is_ok());
        assert!(validate(Parameter::Coefficient, Axis::Y, 0.999).is_ok());
        assert!(validate(Parameter::Coefficient, Axis::Y, 1.0).is_err());
        assert!(validate(Parameter::Coefficient, Axis::Y, 0.0).is_err());
    }

    #[test]
    fn non_finite_values_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = validate(Parameter::Coefficient, Axis::X, value).unwrap_err();
            assert!(matches!(err, ParameterError::NotFinite { .. }));
        }
    }

    #[test]
    fn set_reports_change_and_preserves_on_error() {
        let mut params = BallParameters::default();
        assert_eq!(params.set(Parameter::Velocity, Axis::X, 12.0), Ok(true));
        assert_eq!(params.set(Parameter::Velocity, Axis::X, 12.0), Ok(false));
        assert!(params.set(Parameter::Velocity, Axis::X, 500.0).is_err());
        assert_eq!(params.get(Parameter::Velocity, Axis::X), 12.0);
    }

    #[test]
    fn error_message_names_field_and_range() {
        let err = validate(Parameter::Coefficient, Axis::Y, 1.5).unwrap_err();
        assert_eq!(err.to_string(), "coefficient.y = 1.5 is outside [0.01, 1)");
        let err = validate(Parameter::Coefficient, Axis::X, 0.0).unwrap_err();
        assert_eq!(err.to_string(), "coefficient.x = 0 is outside [0.01, inf)");
    }

    #[test]
    fn parse_partial_toml_uses_defaults() {
        let params: BallParameters = toml::from_str(
            r#"
[start_velocity]
x = 30.0
y = 0.0
"#,
        )
        .unwrap();
        assert_eq!(params.start_velocity, Vec2::new(30.0, 0.0));
        assert_eq!(params.start_position, Vec2::new(0.0, 50.0));
        assert_eq!(params.coefficient, Vec2::new(0.05, 0.3));
    }

    #[test]
    fn parameter_names_parse() {
        assert_eq!("velocity".parse::<Parameter>(), Ok(Parameter::Velocity));
        assert_eq!("Coeff".parse::<Parameter>(), Ok(Parameter::Coefficient));
        assert_eq!("pos".parse::<Parameter>(), Ok(Parameter::Position));
        assert!("mass".parse::<Parameter>().is_err());
    }
}
