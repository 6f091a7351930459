//! The two linked view engines and what they share: plot-area layout, axes and transitions.
//!
//! Each engine owns its rendering context (scales, marks, axes, brush). `render` is the only
//! entry point that rebuilds scales; brush and highlight calls restyle the existing marks.

pub mod heatmap;
pub mod scatter;

pub use heatmap::{HeatmapCell, HeatmapEngine, Legend};
pub use scatter::{Emphasis, ScatterPoint, ScatterplotEngine};

use std::time::Duration;

use crate::color::Rgba;
use crate::config::Margins;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::output::{SvgEncoder, TextAnchor};
use crate::render::draw_line;
use crate::scale::Tick;

/// Length of a tick mark in pixels.
const TICK_SIZE: f32 = 6.0;

/// Axis and tick label font size.
const FONT_SIZE: f32 = 10.0;

/// Animation metadata for one visual attribute: where it was, where it goes, how long it takes.
///
/// A transition replaced by a newer render starts from the previous target (latest wins).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<T> {
    /// Value at the start of the transition.
    pub from: T,
    /// Final value.
    pub to: T,
    /// Duration; zero means the change is applied immediately.
    pub duration: Duration,
}

impl<T: Copy + PartialEq> Transition<T> {
    /// A transition that is already at rest at `value`.
    #[must_use]
    pub fn settled(value: T) -> Self {
        Self {
            from: value,
            to: value,
            duration: Duration::ZERO,
        }
    }

    /// Move from the current target to `to` over `duration`.
    #[must_use]
    pub fn retarget(&self, to: T, duration: Duration) -> Self {
        Self {
            from: self.to,
            to,
            duration,
        }
    }

    /// Whether anything visibly changes.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        !self.duration.is_zero() && self.from != self.to
    }
}

impl Transition<Point> {
    /// Interpolated position at `progress` in `[0, 1]`.
    #[must_use]
    pub fn at(&self, progress: f32) -> Point {
        self.from.lerp(self.to, progress.clamp(0.0, 1.0))
    }
}

impl Transition<Rgba> {
    /// Interpolated color at `progress` in `[0, 1]`.
    #[must_use]
    pub fn at(&self, progress: f32) -> Rgba {
        self.from.lerp(self.to, progress)
    }
}

/// Which side of the plot area an axis sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    /// Horizontal axis below the plot area.
    Bottom,
    /// Vertical axis left of the plot area.
    Left,
}

/// A rendered axis: title, labelled ticks and its transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Placement.
    pub orient: AxisOrient,
    /// Axis title (field or dimension name).
    pub title: String,
    /// Ticks, positions relative to the plot area.
    pub ticks: Vec<Tick>,
    /// Duration of the tick/domain transition.
    pub transition: Duration,
}

/// Inner plot area for a surface, at the origin. Never negative.
pub(crate) fn plot_area(width: u32, height: u32, margins: &Margins) -> Rect {
    let w = (width as f32 - margins.left - margins.right).max(0.0);
    let h = (height as f32 - margins.top - margins.bottom).max(0.0);
    Rect::new(0.0, 0.0, w, h)
}

/// Rasterize an axis line and its ticks. Labels are left to vector output.
pub(crate) fn draw_axis(fb: &mut Framebuffer, axis: &Axis, area: &Rect, margins: &Margins) {
    let (ox, oy) = (margins.left, margins.top);
    let px = |v: f32| v.round() as i32;
    match axis.orient {
        AxisOrient::Bottom => {
            let y = oy + area.height;
            draw_line(fb, px(ox), px(y), px(ox + area.width), px(y), Rgba::BLACK);
            for tick in &axis.ticks {
                let x = ox + tick.position;
                draw_line(fb, px(x), px(y), px(x), px(y + TICK_SIZE), Rgba::BLACK);
            }
        }
        AxisOrient::Left => {
            let bottom = oy + area.height;
            draw_line(fb, px(ox), px(oy), px(ox), px(bottom), Rgba::BLACK);
            for tick in &axis.ticks {
                let y = oy + tick.position;
                draw_line(fb, px(ox - TICK_SIZE), px(y), px(ox), px(y), Rgba::BLACK);
            }
        }
    }
}

/// Append an axis with tick labels and a title to `svg`.
///
/// `title_offset` is the distance of the title from the axis line.
pub(crate) fn svg_axis(
    svg: SvgEncoder,
    axis: &Axis,
    area: &Rect,
    margins: &Margins,
    title_offset: f32,
) -> SvgEncoder {
    let (ox, oy) = (margins.left, margins.top);
    match axis.orient {
        AxisOrient::Bottom => {
            let y = oy + area.height;
            let mut svg = svg.line(ox, y, ox + area.width, y, Rgba::BLACK, 1.0);
            for tick in &axis.ticks {
                let x = ox + tick.position;
                svg = svg.line(x, y, x, y + TICK_SIZE, Rgba::BLACK, 1.0);
                svg = svg.text_anchored(
                    x,
                    y + TICK_SIZE + FONT_SIZE + 2.0,
                    &tick.label,
                    FONT_SIZE,
                    Rgba::BLACK,
                    TextAnchor::Middle,
                );
            }
            svg.text_anchored(
                ox + area.width / 2.0,
                y + title_offset,
                &axis.title,
                FONT_SIZE + 2.0,
                Rgba::BLACK,
                TextAnchor::Middle,
            )
        }
        AxisOrient::Left => {
            let mut svg = svg.line(ox, oy, ox, oy + area.height, Rgba::BLACK, 1.0);
            for tick in &axis.ticks {
                let y = oy + tick.position;
                svg = svg.line(ox - TICK_SIZE, y, ox, y, Rgba::BLACK, 1.0);
                svg = svg.text_anchored(
                    ox - TICK_SIZE - 3.0,
                    y + FONT_SIZE / 3.0,
                    &tick.label,
                    FONT_SIZE,
                    Rgba::BLACK,
                    TextAnchor::End,
                );
            }
            svg.text_rotated(
                ox - title_offset,
                oy + area.height / 2.0,
                &axis.title,
                FONT_SIZE + 2.0,
                Rgba::BLACK,
                -90.0,
            )
        }
    }
}

/// Brush rectangle overlay: translucent grey fill with a white outline.
pub(crate) const BRUSH_FILL: Rgba = Rgba::new(119, 119, 119, 77);
