use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

use bounce_core::{Sample, SimulatedBody, TimeSource};

use crate::command::SimCommand;
use crate::config::SimConfig;
use crate::readout::{OutputFormat, render};

/// Why a session loop exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Quit,
    AtRest,
    MaxDuration,
    /// Input closed while the clock was stopped; nothing can change anymore.
    Idle,
}

#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub ticks: u64,
    pub commands_handled: u64,
    pub final_sample: Sample,
    pub reason: EndReason,
}

/// Read command lines from `reader` and forward them until EOF or until the
/// session drops its receiver. Unparseable lines are logged and skipped.
pub async fn forward_commands<R>(reader: R, tx: mpsc::UnboundedSender<SimCommand>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<SimCommand>() {
                    Ok(cmd) => {
                        if tx.send(cmd).is_err() {
                            break;
                        }
                    },
                    Err(e) => tracing::warn!(line = %line.trim(), "Ignoring command: {e}"),
                }
            },
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Command input failed: {e}");
                break;
            },
        }
    }
    tracing::debug!("command input closed");
}

/// The sampling loop: one readout line per tick, commands applied as they
/// arrive. The loop is the only writer of `body`.
pub async fn run_session<T, W>(
    body: &mut SimulatedBody<T>,
    config: &SimConfig,
    mut cmd_rx: mpsc::UnboundedReceiver<SimCommand>,
    out: &mut W,
) -> io::Result<SessionSummary>
where
    T: TimeSource,
    W: Write,
{
    let mut ticker = tokio::time::interval(config.sample_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let max_duration = config.max_duration();
    let started = Instant::now();

    if config.autostart {
        body.start();
    }
    tracing::info!(
        interval_ms = config.sample_interval_ms,
        stop_time = ?body.trajectory().stop_time(),
        "Session started"
    );

    let mut ticks = 0u64;
    let mut commands_handled = 0u64;
    let mut commands_open = true;

    let reason = loop {
        tokio::select! {
            _ = ticker.tick() => {
                write_sample(out, body, config)?;
                ticks += 1;

                if max_duration.is_some_and(|max| started.elapsed() >= max) {
                    break EndReason::MaxDuration;
                }
                if config.exit_on_rest && body.is_at_rest() {
                    break EndReason::AtRest;
                }
                if !commands_open && !body.is_running() {
                    break EndReason::Idle;
                }
            }
            cmd = cmd_rx.recv(), if commands_open => match cmd {
                Some(SimCommand::Quit) => break EndReason::Quit,
                Some(cmd) => {
                    apply_command(body, cmd, config, out)?;
                    commands_handled += 1;
                },
                None => commands_open = false,
            },
        }
    };

    out.flush()?;
    let final_sample = body.sample();
    tracing::info!(ticks, commands_handled, ?reason, "Session ended");
    Ok(SessionSummary {
        ticks,
        commands_handled,
        final_sample,
        reason,
    })
}

fn write_sample<T: TimeSource, W: Write>(
    out: &mut W,
    body: &SimulatedBody<T>,
    config: &SimConfig,
) -> io::Result<()> {
    let line = render(
        &body.sample(),
        body.is_running(),
        config.output,
        &config.viewport,
    )
    .map_err(io::Error::other)?;
    writeln!(out, "{line}")
}

/// Apply one non-quit command to the body.
pub fn apply_command<T: TimeSource, W: Write>(
    body: &mut SimulatedBody<T>,
    cmd: SimCommand,
    config: &SimConfig,
    out: &mut W,
) -> io::Result<()> {
    match cmd {
        SimCommand::Start => {
            body.start();
            tracing::info!("Playback started");
        },
        SimCommand::Pause => {
            body.pause();
            tracing::info!(running = body.is_running(), "Playback toggled");
        },
        SimCommand::Reset => {
            body.reset();
            tracing::info!("Playback reset");
        },
        SimCommand::Set {
            parameter,
            axis,
            value,
        } => match body.set(parameter, axis, value) {
            Ok(true) => tracing::info!(%parameter, %axis, value, "Parameter updated"),
            Ok(false) => tracing::debug!(%parameter, %axis, value, "Parameter unchanged"),
            Err(e) => tracing::warn!("Rejected edit: {e}"),
        },
        SimCommand::Params => {
            let params = body.parameters();
            match config.output {
                OutputFormat::Text => writeln!(
                    out,
                    "params: position=({}, {}) velocity=({}, {}) coefficient=({}, {})",
                    params.start_position.x,
                    params.start_position.y,
                    params.start_velocity.x,
                    params.start_velocity.y,
                    params.coefficient.x,
                    params.coefficient.y,
                )?,
                OutputFormat::Json => {
                    let line = serde_json::to_string(&serde_json::json!({ "params": params }))
                        .map_err(io::Error::other)?;
                    writeln!(out, "{line}")?;
                },
            }
        },
        SimCommand::Quit => {},
    }
    Ok(())
}
