//! Configuration for the linked views.
//!
//! YAML with every field optional; missing fields take the defaults of the original layout
//! (scatter margins 50 all round, heatmap margins 40/50/70/100, 500 ms axis and 1000 ms point
//! transitions).

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::record::{Dimension, Field};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Space reserved around an engine's inner plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Top margin.
    pub top: f32,
    /// Right margin.
    pub right: f32,
    /// Bottom margin.
    pub bottom: f32,
    /// Left margin.
    pub left: f32,
}

impl Margins {
    /// Same margin on every side.
    #[must_use]
    pub const fn uniform(m: f32) -> Self {
        Self {
            top: m,
            right: m,
            bottom: m,
            left: m,
        }
    }

    /// Margins given clockwise from the top.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Scatterplot settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterConfig {
    /// Surface width in pixels.
    #[serde(default = "default_scatter_width")]
    pub width: u32,

    /// Surface height in pixels.
    #[serde(default = "default_scatter_height")]
    pub height: u32,

    /// Margins around the plot area.
    #[serde(default = "default_scatter_margins")]
    pub margins: Margins,

    /// Point radius in pixels.
    #[serde(default = "default_point_radius")]
    pub point_radius: f32,

    /// Point opacity in `[0, 1]`.
    #[serde(default = "default_point_opacity")]
    pub point_opacity: f32,

    /// Color of plain points.
    #[serde(default = "default_point_color", with = "hex_color")]
    pub point_color: Rgba,

    /// Color of brushed or cross-highlighted points.
    #[serde(default = "default_highlight_color", with = "hex_color")]
    pub highlight_color: Rgba,

    /// Initial x field.
    #[serde(default = "default_x_field")]
    pub x_field: Field,

    /// Initial y field.
    #[serde(default = "default_y_field")]
    pub y_field: Field,
}

fn default_scatter_width() -> u32 {
    800
}
fn default_scatter_height() -> u32 {
    600
}
fn default_scatter_margins() -> Margins {
    Margins::uniform(50.0)
}
fn default_point_radius() -> f32 {
    3.0
}
fn default_point_opacity() -> f32 {
    0.3
}
fn default_point_color() -> Rgba {
    Rgba::BLACK
}
fn default_highlight_color() -> Rgba {
    Rgba::RED
}
fn default_x_field() -> Field {
    Field::Temperature
}
fn default_y_field() -> Field {
    Field::RentedBikeCount
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            width: default_scatter_width(),
            height: default_scatter_height(),
            margins: default_scatter_margins(),
            point_radius: default_point_radius(),
            point_opacity: default_point_opacity(),
            point_color: default_point_color(),
            highlight_color: default_highlight_color(),
            x_field: default_x_field(),
            y_field: default_y_field(),
        }
    }
}

/// Heatmap settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Surface width in pixels.
    #[serde(default = "default_heatmap_width")]
    pub width: u32,

    /// Surface height in pixels.
    #[serde(default = "default_heatmap_height")]
    pub height: u32,

    /// Margins around the plot area.
    #[serde(default = "default_heatmap_margins")]
    pub margins: Margins,

    /// Legend gradient width.
    #[serde(default = "default_legend_width")]
    pub legend_width: f32,

    /// Legend gradient height.
    #[serde(default = "default_legend_height")]
    pub legend_height: f32,

    /// Requested legend tick count.
    #[serde(default = "default_legend_ticks")]
    pub legend_ticks: usize,

    /// `brighter(k)` factor applied to brushed cells.
    #[serde(default = "default_brighten")]
    pub brighten: f32,

    /// Cell stroke color.
    #[serde(default = "default_cell_stroke", with = "hex_color")]
    pub cell_stroke: Rgba,

    /// Stroke width of cells with a non-zero total.
    #[serde(default = "default_filled_stroke_width")]
    pub filled_stroke_width: f32,

    /// Stroke width of empty cells.
    #[serde(default = "default_empty_stroke_width")]
    pub empty_stroke_width: f32,

    /// Initial x dimension.
    #[serde(default = "default_x_dimension")]
    pub x_dimension: Dimension,

    /// Initial y dimension.
    #[serde(default = "default_y_dimension")]
    pub y_dimension: Dimension,

    /// Aggregate only the scatter selection instead of all records.
    #[serde(default = "default_follow_scatter_selection")]
    pub follow_scatter_selection: bool,
}

fn default_heatmap_width() -> u32 {
    800
}
fn default_heatmap_height() -> u32 {
    500
}
fn default_heatmap_margins() -> Margins {
    Margins::new(40.0, 50.0, 70.0, 100.0)
}
fn default_legend_width() -> f32 {
    250.0
}
fn default_legend_height() -> f32 {
    20.0
}
fn default_legend_ticks() -> usize {
    5
}
fn default_brighten() -> f32 {
    0.5
}
fn default_cell_stroke() -> Rgba {
    Rgba::LIGHT_GREY
}
fn default_filled_stroke_width() -> f32 {
    3.0
}
fn default_empty_stroke_width() -> f32 {
    0.5
}
fn default_x_dimension() -> Dimension {
    Dimension::Hours
}
fn default_y_dimension() -> Dimension {
    Dimension::Days
}
fn default_follow_scatter_selection() -> bool {
    true
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            width: default_heatmap_width(),
            height: default_heatmap_height(),
            margins: default_heatmap_margins(),
            legend_width: default_legend_width(),
            legend_height: default_legend_height(),
            legend_ticks: default_legend_ticks(),
            brighten: default_brighten(),
            cell_stroke: default_cell_stroke(),
            filled_stroke_width: default_filled_stroke_width(),
            empty_stroke_width: default_empty_stroke_width(),
            x_dimension: default_x_dimension(),
            y_dimension: default_y_dimension(),
            follow_scatter_selection: default_follow_scatter_selection(),
        }
    }
}

/// Transition durations attached to marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Axis and domain changes, in milliseconds.
    #[serde(default = "default_axis_ms")]
    pub axis_ms: u64,

    /// Point repositioning and recoloring, in milliseconds.
    #[serde(default = "default_point_ms")]
    pub point_ms: u64,
}

fn default_axis_ms() -> u64 {
    500
}
fn default_point_ms() -> u64 {
    1000
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            axis_ms: default_axis_ms(),
            point_ms: default_point_ms(),
        }
    }
}

impl TransitionConfig {
    /// Axis transition as a Duration.
    #[must_use]
    pub fn axis(&self) -> Duration {
        Duration::from_millis(self.axis_ms)
    }

    /// Point transition as a Duration.
    #[must_use]
    pub fn point(&self) -> Duration {
        Duration::from_millis(self.point_ms)
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Scatterplot settings.
    #[serde(default)]
    pub scatter: ScatterConfig,

    /// Heatmap settings.
    #[serde(default)]
    pub heatmap: HeatmapConfig,

    /// Transition durations.
    #[serde(default)]
    pub transitions: TransitionConfig,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(%err, "using default configuration");
                Self::default()
            }
        }
    }
}

/// `#rrggbb` / `#rgb` (de)serialization for [`Rgba`].
mod hex_color {
    use crate::color::Rgba;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(color: &Rgba, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Rgba, D::Error> {
        let text = String::deserialize(deserializer)?;
        Rgba::parse_hex(&text)
            .ok_or_else(|| de::Error::custom(format!("invalid color `{text}`")))
    }
}
