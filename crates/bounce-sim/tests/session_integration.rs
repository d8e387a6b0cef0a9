mod common;

use tokio::sync::mpsc;

use bounce_core::{Axis, Parameter};
use bounce_sim::{EndReason, OutputFormat, SimCommand, run_session};

use common::{output_lines, test_body, test_config};

#[tokio::test]
async fn quit_after_commands() {
    let (_time, mut body) = test_body();
    let config = test_config(OutputFormat::Text);
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(SimCommand::Start).unwrap();
    tx.send(SimCommand::Set {
        parameter: Parameter::Velocity,
        axis: Axis::X,
        value: 4.0,
    })
    .unwrap();
    tx.send(SimCommand::Quit).unwrap();

    let mut out = Vec::new();
    let summary = run_session(&mut body, &config, rx, &mut out).await.unwrap();

    assert_eq!(summary.reason, EndReason::Quit);
    assert_eq!(summary.commands_handled, 2);
    assert_eq!(body.start_velocity().x, 4.0);
    // The edit reset the clock after `start`.
    assert!(!body.is_running());
    for line in output_lines(&out) {
        assert!(line.starts_with("Elapsed : "), "unexpected line: {line}");
    }
}

#[tokio::test]
async fn ends_once_ball_is_at_rest() {
    let (time, mut body) = test_body();
    let config = test_config(OutputFormat::Json);
    body.start();
    let stop = body.trajectory().stop_time().unwrap();
    time.advance_secs(stop + 1.0);

    let (_tx, rx) = mpsc::unbounded_channel();
    let mut out = Vec::new();
    let summary = run_session(&mut body, &config, rx, &mut out).await.unwrap();

    assert_eq!(summary.reason, EndReason::AtRest);
    assert_eq!(summary.ticks, 1);
    assert_eq!(summary.final_sample.time, stop);
    assert_eq!(summary.final_sample.velocity.x, 0.0);

    let lines = output_lines(&out);
    assert_eq!(lines.len(), 1);
    let frame: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(frame["time"], stop);
    assert_eq!(frame["position"]["y"], 0.0);
    assert_eq!(frame["pixel"]["y"], 595.0);
    assert_eq!(frame["running"], true);
}

#[tokio::test]
async fn closed_input_while_paused_goes_idle() {
    let (_time, mut body) = test_body();
    let config = test_config(OutputFormat::Text);
    let (tx, rx) = mpsc::unbounded_channel::<SimCommand>();
    drop(tx);

    let mut out = Vec::new();
    let summary = run_session(&mut body, &config, rx, &mut out).await.unwrap();

    assert_eq!(summary.reason, EndReason::Idle);
    assert!(summary.ticks >= 1);
    assert_eq!(summary.final_sample.position.y, 4.9);
}

#[tokio::test]
async fn max_duration_stops_running_session() {
    let (_time, mut body) = test_body();
    let config = bounce_sim::SimConfig {
        max_duration_secs: 0.02,
        exit_on_rest: false,
        autostart: true,
        ..test_config(OutputFormat::Text)
    };
    let (_tx, rx) = mpsc::unbounded_channel();

    let mut out = Vec::new();
    let summary = run_session(&mut body, &config, rx, &mut out).await.unwrap();

    assert_eq!(summary.reason, EndReason::MaxDuration);
    assert!(summary.ticks >= 2);
    assert!(body.is_running());
}

#[tokio::test]
async fn rejected_edit_does_not_interrupt_playback() {
    let (time, mut body) = test_body();
    let config = test_config(OutputFormat::Text);
    body.start();
    time.advance_secs(0.25);

    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(SimCommand::Set {
        parameter: Parameter::Position,
        axis: Axis::Y,
        value: 120.0,
    })
    .unwrap();
    tx.send(SimCommand::Params).unwrap();
    tx.send(SimCommand::Quit).unwrap();

    let mut out = Vec::new();
    let summary = run_session(&mut body, &config, rx, &mut out).await.unwrap();

    assert_eq!(summary.reason, EndReason::Quit);
    assert!(body.is_running());
    assert!((body.elapsed() - 0.25).abs() < 1e-9);
    assert!(
        output_lines(&out)
            .iter()
            .any(|l| l.starts_with("params: position=(0, 4.9)"))
    );
}
