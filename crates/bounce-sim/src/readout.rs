use std::str::FromStr;

use serde::{Deserialize, Serialize};

use bounce_core::{Sample, Vec2};

/// How each tick is written to the output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable readout line.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other:?}")),
        }
    }
}

/// Fixed linear mapping from simulation metres to canvas pixels.
///
/// The canvas y axis grows downward, so heights are subtracted from the
/// floor line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub pixels_per_meter: f64,
    /// Pixel column of x = 0.
    pub origin_x: f64,
    /// Pixel row of y = 0.
    pub floor_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pixels_per_meter: 6.0,
            origin_x: 100.0,
            floor_y: 595.0,
        }
    }
}

impl Viewport {
    pub fn to_pixels(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            self.origin_x + self.pixels_per_meter * position.x,
            self.floor_y - self.pixels_per_meter * position.y,
        )
    }
}

/// Fixed-width value with a sign column and three decimals: `" 12.000"`,
/// `"-1.500"`.
pub fn format_signed(value: f64) -> String {
    let millis = (value.abs() * 1000.0).round() as u64;
    let sign = if value < 0.0 && millis > 0 { '-' } else { ' ' };
    format!("{sign}{}.{:03}", millis / 1000, millis % 1000)
}

/// `Elapsed : <t> sec | Horizontal : <x> m <vx> m/sec | Vertical : <y> m <vy> m/sec`
pub fn text_line(sample: &Sample) -> String {
    format!(
        "Elapsed : {} sec | Horizontal : {} m {} m/sec | Vertical : {} m {} m/sec",
        format_signed(sample.time),
        format_signed(sample.position.x),
        format_signed(sample.velocity.x),
        format_signed(sample.position.y),
        format_signed(sample.velocity.y),
    )
}

/// JSON readout record: the sample plus its pixel position.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Frame {
    #[serde(flatten)]
    pub sample: Sample,
    pub pixel: Vec2,
    pub running: bool,
}

/// Render one readout line (without trailing newline).
pub fn render(
    sample: &Sample,
    running: bool,
    format: OutputFormat,
    viewport: &Viewport,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(text_line(sample)),
        OutputFormat::Json => serde_json::to_string(&Frame {
            sample: *sample,
            pixel: viewport.to_pixels(sample.position),
            running,
        }),
    }
}
