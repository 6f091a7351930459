//! # linkviz
//!
//! Linked-view exploration engine for hourly bike-rental data.
//!
//! Two coordinated views share one selection state:
//!
//! - a **scatterplot** of any two record fields, brushable with a rectangle
//! - a **heatmap** of summed rental counts over two calendar/categorical dimensions
//!
//! Brushing the scatterplot narrows the records the heatmap aggregates. Brushing heatmap cells
//! highlights the scatter points whose calendar attributes partially match the brushed cells.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use linkviz::prelude::*;
//!
//! let records = linkviz::loader::load_csv("data/SeoulBikeData.csv")?;
//! let mut views = LinkedViews::new(Config::load_or_default("linkviz.yaml"));
//! views.load(records);
//!
//! views.scatter_brush(BrushEvent::Start);
//! views.scatter_brush(BrushEvent::End(Some(Rect::from_extent(100.0, 50.0, 300.0, 250.0))));
//!
//! PngEncoder::write_to_file(&views.heatmap().to_framebuffer()?, "heatmap.png")?;
//! ```
//!
//! ## Outputs
//!
//! Engines expose their marks (points, cells, axes, legend) as plain data with transition
//! metadata, and rasterize to a [`framebuffer::Framebuffer`] (PNG) or emit SVG.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Data Modules
// ============================================================================

/// Records, scatter fields and heatmap dimensions.
pub mod record;

/// CSV dataset loading.
pub mod loader;

/// Two-dimensional aggregation of rental counts.
pub mod aggregate;

/// Heatmap selections and cross-highlight matching.
pub mod highlight;

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and the sequential palette.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Scale functions for data-to-visual mappings.
pub mod scale;

// ============================================================================
// View Modules
// ============================================================================

/// Brush gestures and selection subscriptions.
pub mod brush;

/// Scatterplot and heatmap engines.
pub mod engine;

/// Shared selection snapshot and interaction state machine.
pub mod selection;

/// Linked-view coordinator.
pub mod coordinator;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization primitives.
pub mod render;

/// Output encoders (PNG, SVG).
pub mod output;

// ============================================================================
// Configuration & Errors
// ============================================================================

/// YAML configuration.
pub mod config;

/// Error types for linkviz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use linkviz::prelude::*;
/// ```
pub mod prelude {
    pub use batuta_common::display::WithDimensions;
    pub use crate::brush::BrushEvent;
    pub use crate::color::Rgba;
    pub use crate::config::Config;
    pub use crate::coordinator::LinkedViews;
    pub use crate::engine::{Emphasis, HeatmapEngine, ScatterplotEngine};
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Point, Rect};
    pub use crate::highlight::{CrossHighlightMatcher, SelectionPair};
    pub use crate::output::{PngEncoder, SvgEncoder};
    pub use crate::record::{Dimension, DimensionValue, Field, Record};
    pub use crate::scale::{AxisScale, BandScale, ColorScale, LinearScale, Scale, TimeScale};
    pub use crate::selection::{Interaction, SelectionState};
}
