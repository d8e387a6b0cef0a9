use std::str::FromStr;

use bounce_core::{Axis, Parameter};

/// Commands sent from the input reader to the session loop.
#[derive(Debug, Clone, PartialEq)]
pub enum SimCommand {
    Start,
    /// Toggle running/paused.
    Pause,
    Reset,
    Set {
        parameter: Parameter,
        axis: Axis,
        value: f64,
    },
    /// Print the current parameters.
    Params,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    Empty,
    UnknownCommand(String),
    Usage(&'static str),
    InvalidArgument(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::UnknownCommand(c) => write!(f, "unknown command: {c:?}"),
            Self::Usage(u) => write!(f, "usage: {u}"),
            Self::InvalidArgument(m) => write!(f, "{m}"),
        }
    }
}

impl std::error::Error for CommandError {}

const SET_USAGE: &str = "set <position|velocity|coefficient> <x|y> <value>";

impl FromStr for SimCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };
        let command = match head.to_ascii_lowercase().as_str() {
            "start" => Self::Start,
            "pause" => Self::Pause,
            "reset" => Self::Reset,
            "params" => Self::Params,
            "quit" | "exit" => Self::Quit,
            "set" => {
                let (Some(parameter), Some(axis), Some(value)) =
                    (words.next(), words.next(), words.next())
                else {
                    return Err(CommandError::Usage(SET_USAGE));
                };
                let parameter = parameter
                    .parse::<Parameter>()
                    .map_err(CommandError::InvalidArgument)?;
                let axis = axis
                    .parse::<Axis>()
                    .map_err(|e| CommandError::InvalidArgument(e.to_string()))?;
                let value = value
                    .parse::<f64>()
                    .map_err(|e| CommandError::InvalidArgument(format!("{value:?}: {e}")))?;
                Self::Set {
                    parameter,
                    axis,
                    value,
                }
            },
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };
        if words.next().is_some() {
            return Err(CommandError::InvalidArgument(format!(
                "trailing arguments after {head:?}"
            )));
        }
        Ok(command)
    }
}
