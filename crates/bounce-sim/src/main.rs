use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use bounce_core::SimulatedBody;
use bounce_sim::{SimConfig, forward_commands, run_session};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("bounce-sim starting");

    let config = SimConfig::load();
    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    let mut body = match SimulatedBody::with_parameters(config.ball) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("Invalid ball parameters: {e}");
            std::process::exit(1);
        },
    };

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let reader = tokio::spawn(forward_commands(BufReader::new(tokio::io::stdin()), cmd_tx));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run_session(&mut body, &config, cmd_rx, &mut out).await {
        Ok(summary) => {
            tracing::info!(
                ticks = summary.ticks,
                reason = ?summary.reason,
                final_x = summary.final_sample.position.x,
                "bounce-sim finished"
            );
        },
        Err(e) => {
            tracing::error!("Output failed: {e}");
            std::process::exit(1);
        },
    }

    // A pending stdin read would hold up runtime shutdown until the next line.
    reader.abort();
    std::process::exit(0);
}
