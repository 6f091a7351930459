//! Geometric primitives in plot-area pixel space.
//!
//! Coordinates are relative to the top-left corner of an engine's inner plot area (the surface
//! minus its margins); y grows downwards.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation between two points.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Shift by an offset.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle with non-negative extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle spanned by two arbitrary corners.
    ///
    /// The corners may be given in any order, as a drag gesture produces them.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let (x0, x1) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
        let (y0, y1) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Create a rectangle from `[[x0, y0], [x1, y1]]` extents.
    #[must_use]
    pub fn from_extent(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::from_corners(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Right edge.
    #[must_use]
    pub fn x1(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn y1(&self) -> f32 {
        self.y + self.height
    }

    /// Closed containment: points on the edges are inside.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.x1() && point.y >= self.y && point.y <= self.y1()
    }

    /// Clamp the rectangle into `bounds`.
    #[must_use]
    pub fn clamp_to(&self, bounds: &Rect) -> Self {
        let x0 = self.x.clamp(bounds.x, bounds.x1());
        let y0 = self.y.clamp(bounds.y, bounds.y1());
        let x1 = self.x1().clamp(bounds.x, bounds.x1());
        let y1 = self.y1().clamp(bounds.y, bounds.y1());
        Self::from_extent(x0, y0, x1, y1)
    }

    /// Shift by an offset, keeping the size.
    #[must_use]
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Whether the rectangle covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Open interval overlap between `[start, start + len)` and `[lo, hi]`.
///
/// Any non-zero overlap counts; merely touching at an edge does not.
#[must_use]
pub fn span_overlaps(start: f32, len: f32, lo: f32, hi: f32) -> bool {
    start + len > lo && start < hi
}
