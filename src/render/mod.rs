//! Rasterization of plot marks into a [`crate::framebuffer::Framebuffer`].
//!
//! # Algorithms
//!
//! - **Bresenham's Line**: axis lines and tick marks
//! - **Scanline circle fill**: scatter points, blended once per pixel
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;

pub use primitives::{draw_circle, draw_line, draw_rect, draw_rect_outline, Drawable};
