//! Heatmap engine: dense aggregated grid over two dimensions, gradient legend, band brush.

use batuta_common::display::WithDimensions;

use crate::aggregate::Grid;
use crate::brush::{Brush, BrushEvent, Subscription};
use crate::color::{interpolate_stops, Rgba};
use crate::config::{Config, HeatmapConfig, TransitionConfig};
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::highlight::SelectionPair;
use crate::output::{LinearGradient, SvgEncoder, TextAnchor};
use crate::record::{Dimension, DimensionValue, Record};
use crate::render::{draw_line, draw_rect, draw_rect_outline, Drawable};
use crate::scale::{BandScale, ColorScale, LinearScale, Scale, Tick};

use super::{draw_axis, plot_area, svg_axis, Axis, AxisOrient, BRUSH_FILL};

/// Gradient id shared by the legend rectangle and its `<linearGradient>`.
const LEGEND_GRADIENT_ID: &str = "legend-gradient";

/// Horizontal distance of the legend's left edge from the surface's right edge.
const LEGEND_RIGHT_INSET: f32 = 300.0;

/// Vertical distance of the legend below the plot area.
const LEGEND_DROP: f32 = 30.0;

/// One drawn grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapCell {
    /// Value along the x dimension.
    pub x: DimensionValue,
    /// Value along the y dimension.
    pub y: DimensionValue,
    /// Aggregated rental count.
    pub total: f64,
    /// Cell rectangle in plot-area pixels.
    pub rect: Rect,
    /// Color from the sequential scale.
    pub color: Rgba,
    /// Displayed fill: `color`, brightened while brushed.
    pub fill: Rgba,
    /// Stroke color.
    pub stroke: Rgba,
    /// Stroke width, wider for non-empty cells.
    pub stroke_width: f32,
    /// Whether the cell lies under the brush.
    pub brushed: bool,
}

/// Color legend below the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    /// Top-left corner, in plot-area pixels.
    pub origin: Point,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Gradient stops, low to high.
    pub stops: Vec<Rgba>,
    /// Ticks along the legend, positions relative to `origin.x`.
    pub ticks: Vec<Tick>,
    /// Value domain, shared with the cell color scale.
    pub domain: (f32, f32),
}

/// Heatmap view of summed rental counts over two dimensions.
#[derive(Debug)]
pub struct HeatmapEngine {
    config: HeatmapConfig,
    transitions: TransitionConfig,
    width: u32,
    height: u32,
    records: Vec<Record>,
    selection: Option<Vec<Record>>,
    dim_x: Dimension,
    dim_y: Dimension,
    grid: Grid,
    x_scale: BandScale,
    y_scale: BandScale,
    color_scale: ColorScale,
    x_axis: Option<Axis>,
    y_axis: Option<Axis>,
    cells: Vec<HeatmapCell>,
    legend: Option<Legend>,
    brush: Brush,
    on_select: Subscription<SelectionPair>,
}

impl HeatmapEngine {
    /// Create an engine with the heatmap and transition settings of `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            width: config.heatmap.width,
            height: config.heatmap.height,
            dim_x: config.heatmap.x_dimension,
            dim_y: config.heatmap.y_dimension,
            config: config.heatmap.clone(),
            transitions: config.transitions,
            records: Vec::new(),
            selection: None,
            grid: Grid::default(),
            x_scale: BandScale::new(Vec::new(), (0.0, 0.0)),
            y_scale: BandScale::new(Vec::new(), (0.0, 0.0)),
            color_scale: ColorScale::yl_gn_bu(0.0),
            x_axis: None,
            y_axis: None,
            cells: Vec::new(),
            legend: None,
            brush: Brush::default(),
            on_select: Subscription::new(),
        }
    }

    /// Register the listener for brushed cell selections, replacing any earlier one.
    pub fn on_select(&mut self, listener: impl FnMut(&[SelectionPair]) + 'static) {
        self.on_select.subscribe(listener);
    }

    /// Rebuild the grid for `records` on the two dimensions.
    ///
    /// Domains come from `records`; totals from `selection`, or from `records` when `None`.
    /// Any brush is removed.
    pub fn render(
        &mut self,
        records: &[Record],
        selection: Option<&[Record]>,
        dim_x: Dimension,
        dim_y: Dimension,
    ) {
        self.records = records.to_vec();
        self.selection = selection.map(<[Record]>::to_vec);
        self.dim_x = dim_x;
        self.dim_y = dim_y;
        self.brush.clear();
        self.layout();
    }

    fn layout(&mut self) {
        let area = self.plot_area();
        let aggregated = self.selection.as_deref().unwrap_or(&self.records);
        self.grid = Grid::build(&self.records, aggregated, self.dim_x, self.dim_y);

        let (x_domain, y_domain) = (self.grid.x_domain(), self.grid.y_domain());
        self.x_scale = BandScale::new(x_domain.to_vec(), (0.0, area.width));
        self.y_scale = BandScale::new(y_domain.to_vec(), (area.height, 0.0));
        self.color_scale = ColorScale::yl_gn_bu(self.grid.max_total());

        let axis_ms = self.transitions.axis();
        let (dim_x, dim_y) = (self.dim_x, self.dim_y);
        self.x_axis = Some(Axis {
            orient: AxisOrient::Bottom,
            title: dim_x.to_string(),
            ticks: self.x_scale.ticks(|v| dim_x.tick_label(v)),
            transition: axis_ms,
        });
        self.y_axis = Some(Axis {
            orient: AxisOrient::Left,
            title: dim_y.to_string(),
            ticks: self.y_scale.ticks(|v| dim_y.tick_label(v)),
            transition: axis_ms,
        });

        let (bw, bh) = (self.x_scale.bandwidth(), self.y_scale.bandwidth());
        self.cells = self
            .grid
            .cells()
            .iter()
            .filter_map(|cell| {
                let px = self.x_scale.position(&cell.x)?;
                let py = self.y_scale.position(&cell.y)?;
                let color = self.color_scale.scale(cell.total as f32);
                Some(HeatmapCell {
                    x: cell.x.clone(),
                    y: cell.y.clone(),
                    total: cell.total,
                    rect: Rect::new(px, py, bw, bh),
                    color,
                    fill: color,
                    stroke: self.config.cell_stroke,
                    stroke_width: if cell.total > 0.0 {
                        self.config.filled_stroke_width
                    } else {
                        self.config.empty_stroke_width
                    },
                    brushed: false,
                })
            })
            .collect();

        let domain = self.color_scale.domain();
        let legend_domain = (f64::from(domain.0), f64::from(domain.1));
        let legend_scale = LinearScale::new(legend_domain, (0.0, self.config.legend_width));
        let legend_x = area.width + self.config.margins.right - LEGEND_RIGHT_INSET;
        self.legend = Some(Legend {
            origin: Point::new(legend_x, area.height + LEGEND_DROP),
            width: self.config.legend_width,
            height: self.config.legend_height,
            stops: self.color_scale.stops().to_vec(),
            ticks: legend_scale.ticks(self.config.legend_ticks),
            domain,
        });

        tracing::debug!(
            x = %self.dim_x,
            y = %self.dim_y,
            cells = self.cells.len(),
            max_total = self.grid.max_total(),
            filtered = self.selection.is_some(),
            "heatmap render"
        );
    }

    /// Handle one brush event. Returns the emitted selection, if the event emits one.
    pub fn brush(&mut self, event: BrushEvent) -> Option<Vec<SelectionPair>> {
        match event {
            BrushEvent::Start => {
                self.brush_start();
                None
            }
            BrushEvent::Move(rect) => Some(self.brush_move(rect)),
            BrushEvent::End(rect) => Some(self.brush_end(rect)),
        }
    }

    /// Begin a brush gesture.
    pub fn brush_start(&mut self) {
        self.brush.start();
    }

    /// Update the brush to `rect`, brighten the covered cells and publish their value pairs.
    pub fn brush_move(&mut self, rect: Rect) -> Vec<SelectionPair> {
        let area = self.plot_area();
        let rect = self.brush.update(rect, &area);
        let selection = self.select(&rect);
        tracing::trace!(pairs = selection.len(), ?rect, "heatmap brush");
        self.on_select.emit(&selection);
        selection
    }

    /// Finish the gesture. Without a rectangle the brush is cleared and an empty selection is
    /// published.
    pub fn brush_end(&mut self, rect: Option<Rect>) -> Vec<SelectionPair> {
        let area = self.plot_area();
        let selection = match self.brush.finish(rect, &area) {
            Some(rect) => self.select(&rect),
            None => {
                self.restyle(|_| false);
                Vec::new()
            }
        };
        tracing::debug!(pairs = selection.len(), "heatmap brush end");
        self.on_select.emit(&selection);
        selection
    }

    /// Remove the brush rectangle and cell brightening without publishing anything.
    pub fn clear_brush(&mut self) {
        self.brush.clear();
        self.restyle(|_| false);
    }

    /// Cartesian product of the x and y values whose bands intersect `rect`.
    fn select(&mut self, rect: &Rect) -> Vec<SelectionPair> {
        let xs = self.x_scale.values_in(rect.x, rect.x1());
        let ys = self.y_scale.values_in(rect.y, rect.y1());
        self.restyle(|cell| xs.contains(&cell.x) && ys.contains(&cell.y));

        let (dim_x, dim_y) = (self.dim_x, self.dim_y);
        let pair = |x: &DimensionValue, y: &DimensionValue| {
            SelectionPair::new(dim_x, x.clone(), dim_y, y.clone())
        };
        xs.iter()
            .flat_map(|x| ys.iter().map(move |y| pair(x, y)))
            .collect()
    }

    fn restyle(&mut self, brushed: impl Fn(&HeatmapCell) -> bool) {
        let k = self.config.brighten;
        for cell in &mut self.cells {
            cell.brushed = brushed(cell);
            cell.fill = if cell.brushed {
                cell.color.brighter(k)
            } else {
                cell.color
            };
        }
    }

    /// Inner plot area (surface minus margins), at the origin.
    #[must_use]
    pub fn plot_area(&self) -> Rect {
        plot_area(self.width, self.height, &self.config.margins)
    }

    /// Surface size.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Dimensions of the last render.
    #[must_use]
    pub fn axes_dimensions(&self) -> (Dimension, Dimension) {
        (self.dim_x, self.dim_y)
    }

    /// Drawn cells, x-major.
    #[must_use]
    pub fn cells(&self) -> &[HeatmapCell] {
        &self.cells
    }

    /// The cell at `(x, y)`.
    #[must_use]
    pub fn cell(&self, x: &DimensionValue, y: &DimensionValue) -> Option<&HeatmapCell> {
        self.cells.iter().find(|c| &c.x == x && &c.y == y)
    }

    /// Aggregated grid behind the cells.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Legend, once rendered.
    #[must_use]
    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    /// Cell color scale.
    #[must_use]
    pub fn color_scale(&self) -> &ColorScale {
        &self.color_scale
    }

    /// Band scale along x.
    #[must_use]
    pub fn x_scale(&self) -> &BandScale {
        &self.x_scale
    }

    /// Band scale along y (first value at the bottom).
    #[must_use]
    pub fn y_scale(&self) -> &BandScale {
        &self.y_scale
    }

    /// Bottom axis.
    #[must_use]
    pub fn x_axis(&self) -> Option<&Axis> {
        self.x_axis.as_ref()
    }

    /// Left axis.
    #[must_use]
    pub fn y_axis(&self) -> Option<&Axis> {
        self.y_axis.as_ref()
    }

    /// Current brush rectangle, in plot-area pixels.
    #[must_use]
    pub fn brush_extent(&self) -> Option<Rect> {
        self.brush.extent()
    }

    fn to_surface(&self, rect: &Rect) -> Rect {
        rect.offset(self.config.margins.left, self.config.margins.top)
    }

    /// Rasterize the grid, axes, legend and brush.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface has a zero dimension.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(Rgba::WHITE);
        let margins = self.config.margins;
        let area = self.plot_area();

        for cell in &self.cells {
            let rect = self.to_surface(&cell.rect);
            rect.draw(&mut fb, cell.fill);
            draw_rect_outline(&mut fb, &rect, cell.stroke, cell.stroke_width);
        }
        for axis in self.x_axis.iter().chain(self.y_axis.iter()) {
            draw_axis(&mut fb, axis, &area, &margins);
        }

        if let Some(legend) = &self.legend {
            let x0 = (legend.origin.x + margins.left).round() as i32;
            let y0 = (legend.origin.y + margins.top).round() as i32;
            let (w, h) = (legend.width.round() as i32, legend.height.round() as i32);
            for dx in 0..w.max(0) {
                let t = dx as f32 / (w - 1).max(1) as f32;
                let color = interpolate_stops(&legend.stops, t);
                draw_line(&mut fb, x0 + dx, y0, x0 + dx, y0 + h - 1, color);
            }
            for tick in &legend.ticks {
                let x = x0 + tick.position.round() as i32;
                draw_line(&mut fb, x, y0 + h, x, y0 + h + 4, Rgba::BLACK);
            }
        }

        if let Some(rect) = self.brush.extent() {
            let rect = self.to_surface(&rect);
            draw_rect(&mut fb, &rect, BRUSH_FILL);
            draw_rect_outline(&mut fb, &rect, Rgba::WHITE, 1.0);
        }
        Ok(fb)
    }

    /// Vector rendering with axis labels and a gradient legend.
    #[must_use]
    pub fn to_svg(&self) -> SvgEncoder {
        let margins = self.config.margins;
        let area = self.plot_area();
        let mut svg = SvgEncoder::new(self.width, self.height);

        for cell in &self.cells {
            let r = self.to_surface(&cell.rect);
            svg = svg.rect_outlined(
                r.x,
                r.y,
                r.width,
                r.height,
                cell.fill,
                cell.stroke,
                cell.stroke_width,
            );
        }
        if let Some(axis) = &self.x_axis {
            svg = svg_axis(svg, axis, &area, &margins, margins.bottom - 30.0);
        }
        if let Some(axis) = &self.y_axis {
            svg = svg_axis(svg, axis, &area, &margins, margins.left - 20.0);
        }

        if let Some(legend) = &self.legend {
            let x = legend.origin.x + margins.left;
            let y = legend.origin.y + margins.top;
            let gradient = LinearGradient {
                id: LEGEND_GRADIENT_ID.to_string(),
                stops: legend.stops.clone(),
            };
            svg = svg.gradient_rect(x, y, legend.width, legend.height, gradient);
            for tick in &legend.ticks {
                let tx = x + tick.position;
                let bottom = y + legend.height;
                svg = svg.line(tx, bottom, tx, bottom + 4.0, Rgba::BLACK, 1.0);
                svg = svg.text_anchored(
                    tx,
                    y + legend.height + 16.0,
                    &tick.label,
                    10.0,
                    Rgba::BLACK,
                    TextAnchor::Middle,
                );
            }
        }

        if let Some(rect) = self.brush.extent() {
            let r = self.to_surface(&rect);
            svg = svg.rect_outlined(r.x, r.y, r.width, r.height, BRUSH_FILL, Rgba::WHITE, 1.0);
        }
        svg
    }
}

impl WithDimensions for HeatmapEngine {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.brush.clear();
        self.layout();
    }
}
