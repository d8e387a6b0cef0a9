use bounce_core::SimulatedBody;
use bounce_core::test_helpers::{ManualTime, manual_body, short_drop};
use bounce_sim::{OutputFormat, SimConfig};

/// Fast-ticking config that never starts the clock on its own.
pub fn test_config(output: OutputFormat) -> SimConfig {
    SimConfig {
        ball: short_drop(),
        sample_interval_ms: 1,
        autostart: false,
        output,
        ..SimConfig::default()
    }
}

pub fn test_body() -> (ManualTime, SimulatedBody<ManualTime>) {
    manual_body(short_drop())
}

pub fn output_lines(out: &[u8]) -> Vec<String> {
    String::from_utf8(out.to_vec())
        .expect("readout must be utf-8")
        .lines()
        .map(str::to_string)
        .collect()
}
