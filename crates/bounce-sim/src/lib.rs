//! Driver around `bounce-core`: polls a [`bounce_core::SimulatedBody`] on a
//! fixed cadence, applies edits and playback commands read from a line
//! stream, and writes one readout line per tick.

pub mod command;
pub mod config;
pub mod readout;
pub mod session;

pub use command::{CommandError, SimCommand};
pub use config::{ConfigError, SimConfig};
pub use readout::{OutputFormat, Viewport};
pub use session::{EndReason, SessionSummary, forward_commands, run_session};
