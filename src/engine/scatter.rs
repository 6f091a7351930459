//! Scatterplot engine: one point per record, rectangular brush, external highlight.
//!
//! Points are keyed by [`Record::index`]. A point present in consecutive renders keeps its
//! identity and animates from its previous position; new points appear in place.

use std::collections::{BTreeMap, BTreeSet};

use batuta_common::display::WithDimensions;

use crate::brush::{Brush, BrushEvent, Subscription};
use crate::color::Rgba;
use crate::config::{Config, ScatterConfig, TransitionConfig};
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::highlight::{CrossHighlightMatcher, SelectionPair};
use crate::output::SvgEncoder;
use crate::record::{Field, Record};
use crate::render::{draw_circle, draw_rect, draw_rect_outline};
use crate::scale::{AxisScale, Scale, DEFAULT_TICKS};

use super::{draw_axis, plot_area, svg_axis, Axis, AxisOrient, Transition, BRUSH_FILL};

/// Which points are drawn in the highlight color, and why.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Emphasis {
    /// Every point in the default color.
    #[default]
    None,
    /// Points inside this view's own brush.
    Brushed(BTreeSet<usize>),
    /// Points matched by a heatmap selection.
    CrossHighlighted(BTreeSet<usize>),
}

impl Emphasis {
    /// Whether the record with `index` is emphasized.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        match self {
            Self::None => false,
            Self::Brushed(set) | Self::CrossHighlighted(set) => set.contains(&index),
        }
    }

    /// Number of emphasized records.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Brushed(set) | Self::CrossHighlighted(set) => set.len(),
        }
    }

    /// Whether nothing is emphasized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One drawn point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    /// Identity of the record behind the point.
    pub index: usize,
    /// Position in plot-area pixels.
    pub position: Transition<Point>,
    /// Opaque fill color; opacity is applied when drawing.
    pub fill: Transition<Rgba>,
}

/// Scatterplot view over two record fields.
#[derive(Debug)]
pub struct ScatterplotEngine {
    config: ScatterConfig,
    transitions: TransitionConfig,
    width: u32,
    height: u32,
    records: Vec<Record>,
    x_field: Field,
    y_field: Field,
    x_scale: Option<AxisScale>,
    y_scale: Option<AxisScale>,
    x_axis: Option<Axis>,
    y_axis: Option<Axis>,
    points: BTreeMap<usize, ScatterPoint>,
    emphasis: Emphasis,
    brush: Brush,
    on_brush: Subscription<Record>,
}

impl ScatterplotEngine {
    /// Create an engine with the scatter and transition settings of `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            width: config.scatter.width,
            height: config.scatter.height,
            x_field: config.scatter.x_field,
            y_field: config.scatter.y_field,
            config: config.scatter.clone(),
            transitions: config.transitions,
            records: Vec::new(),
            x_scale: None,
            y_scale: None,
            x_axis: None,
            y_axis: None,
            points: BTreeMap::new(),
            emphasis: Emphasis::None,
            brush: Brush::default(),
            on_brush: Subscription::new(),
        }
    }

    /// Register the listener for brush selections, replacing any earlier one.
    pub fn on_brush(&mut self, listener: impl FnMut(&[Record]) + 'static) {
        self.on_brush.subscribe(listener);
    }

    /// Rebuild scales, axes and points for `records` on the two fields.
    ///
    /// Records without a value for either field are not drawn. Empty input leaves no points
    /// and no scales. Any brush rectangle is removed; brushed points keep their color as long
    /// as the records are the same.
    pub fn render(&mut self, records: &[Record], x_field: Field, y_field: Field) {
        if self.records != records {
            self.records = records.to_vec();
            if matches!(self.emphasis, Emphasis::Brushed(_)) {
                self.emphasis = Emphasis::None;
            }
        }
        self.x_field = x_field;
        self.y_field = y_field;
        self.brush.clear();
        self.layout();
    }

    fn layout(&mut self) {
        let area = self.plot_area();
        self.x_scale = AxisScale::for_field(&self.records, self.x_field, (0.0, area.width));
        self.y_scale = AxisScale::for_field(&self.records, self.y_field, (area.height, 0.0));

        let axis_ms = self.transitions.axis();
        self.x_axis = self.x_scale.map(|s| Axis {
            orient: AxisOrient::Bottom,
            title: self.x_field.to_string(),
            ticks: s.ticks(DEFAULT_TICKS),
            transition: axis_ms,
        });
        self.y_axis = self.y_scale.map(|s| Axis {
            orient: AxisOrient::Left,
            title: self.y_field.to_string(),
            ticks: s.ticks(DEFAULT_TICKS),
            transition: axis_ms,
        });

        let (Some(xs), Some(ys)) = (self.x_scale, self.y_scale) else {
            self.points.clear();
            let records = self.records.len();
            tracing::debug!(records, "scatter render: nothing to draw");
            return;
        };

        let point_ms = self.transitions.point();
        let mut points = BTreeMap::new();
        for record in &self.records {
            let vx = self.x_field.value_of(record);
            let vy = self.y_field.value_of(record);
            let (Some(vx), Some(vy)) = (vx, vy) else {
                continue;
            };
            let target = Point::new(xs.scale(vx), ys.scale(vy));
            let color = self.color_for(record.index);
            let point = match self.points.get(&record.index) {
                Some(prev) => ScatterPoint {
                    index: record.index,
                    position: prev.position.retarget(target, point_ms),
                    fill: prev.fill.retarget(color, point_ms),
                },
                None => ScatterPoint {
                    index: record.index,
                    position: Transition::settled(target),
                    fill: Transition::settled(color),
                },
            };
            points.insert(record.index, point);
        }
        self.points = points;

        tracing::debug!(
            records = self.records.len(),
            drawn = self.points.len(),
            x = %self.x_field,
            y = %self.y_field,
            x_domain = ?xs.domain(),
            y_domain = ?ys.domain(),
            "scatter render"
        );
    }

    /// Handle one brush event. Returns the emitted selection, if the event emits one.
    pub fn brush(&mut self, event: BrushEvent) -> Option<Vec<Record>> {
        match event {
            BrushEvent::Start => {
                self.brush_start();
                None
            }
            BrushEvent::Move(rect) => Some(self.brush_move(rect)),
            BrushEvent::End(rect) => Some(self.brush_end(rect)),
        }
    }

    /// Begin a brush gesture, dropping any cross-highlight coming from the heatmap.
    pub fn brush_start(&mut self) {
        self.brush.start();
        if matches!(self.emphasis, Emphasis::CrossHighlighted(_)) {
            self.set_emphasis(Emphasis::None, true);
        }
    }

    /// Update the brush to `rect` and publish the records inside it (edges inclusive).
    pub fn brush_move(&mut self, rect: Rect) -> Vec<Record> {
        let area = self.plot_area();
        let rect = self.brush.update(rect, &area);
        let selected = self.records_in(&rect);
        tracing::trace!(selected = selected.len(), ?rect, "scatter brush");
        self.publish(selected)
    }

    /// Finish the gesture. Without a rectangle the brush is cleared and an empty selection is
    /// published.
    pub fn brush_end(&mut self, rect: Option<Rect>) -> Vec<Record> {
        let area = self.plot_area();
        match self.brush.finish(rect, &area) {
            Some(rect) => {
                let selected = self.records_in(&rect);
                self.publish(selected)
            }
            None => {
                self.set_emphasis(Emphasis::None, false);
                self.on_brush.emit(&[]);
                Vec::new()
            }
        }
    }

    /// Remove the brush rectangle and its emphasis without publishing anything.
    pub fn clear_brush(&mut self) {
        self.brush.clear();
        if matches!(self.emphasis, Emphasis::Brushed(_)) {
            self.set_emphasis(Emphasis::None, false);
        }
    }

    /// Recolor points matched by a heatmap selection; an empty selection restores the default
    /// color everywhere. Layout is untouched.
    pub fn highlight(&mut self, selection: &[SelectionPair]) {
        let emphasis = if selection.is_empty() {
            Emphasis::None
        } else {
            let matcher = CrossHighlightMatcher::new(selection);
            Emphasis::CrossHighlighted(matcher.highlighted(&self.records))
        };
        tracing::debug!(
            pairs = selection.len(),
            highlighted = emphasis.len(),
            "scatter highlight"
        );
        self.set_emphasis(emphasis, true);
    }

    fn publish(&mut self, selected: Vec<Record>) -> Vec<Record> {
        let indices = selected.iter().map(|r| r.index).collect();
        self.set_emphasis(Emphasis::Brushed(indices), false);
        self.on_brush.emit(&selected);
        selected
    }

    fn records_in(&self, rect: &Rect) -> Vec<Record> {
        let inside = |index: usize| {
            self.points
                .get(&index)
                .is_some_and(|p| rect.contains(p.position.to))
        };
        self.records
            .iter()
            .filter(|r| inside(r.index))
            .cloned()
            .collect()
    }

    fn color_for(&self, index: usize) -> Rgba {
        if self.emphasis.contains(index) {
            self.config.highlight_color
        } else {
            self.config.point_color
        }
    }

    fn set_emphasis(&mut self, emphasis: Emphasis, animate: bool) {
        self.emphasis = emphasis;
        let duration = if animate {
            self.transitions.point()
        } else {
            std::time::Duration::ZERO
        };
        let (highlight, plain) = (self.config.highlight_color, self.config.point_color);
        for point in self.points.values_mut() {
            let color = if self.emphasis.contains(point.index) {
                highlight
            } else {
                plain
            };
            point.fill = point.fill.retarget(color, duration);
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

    /// Fields of the last render.
    #[must_use]
    pub fn fields(&self) -> (Field, Field) {
        (self.x_field, self.y_field)
    }

    /// Records of the last render.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Drawn points in index order.
    pub fn points(&self) -> impl Iterator<Item = &ScatterPoint> {
        self.points.values()
    }

    /// The point for the record with `index`, if drawn.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&ScatterPoint> {
        self.points.get(&index)
    }

    /// Number of drawn points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Current x scale; `None` when nothing could be scaled.
    #[must_use]
    pub fn x_scale(&self) -> Option<&AxisScale> {
        self.x_scale.as_ref()
    }

    /// Current y scale; `None` when nothing could be scaled.
    #[must_use]
    pub fn y_scale(&self) -> Option<&AxisScale> {
        self.y_scale.as_ref()
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

    /// Current emphasis.
    #[must_use]
    pub fn emphasis(&self) -> &Emphasis {
        &self.emphasis
    }

    /// Current brush rectangle, in plot-area pixels.
    #[must_use]
    pub fn brush_extent(&self) -> Option<Rect> {
        self.brush.extent()
    }

    /// Rasterize the settled scene.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface has a zero dimension.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(Rgba::WHITE);
        let margins = self.config.margins;
        let area = self.plot_area();

        for point in self.points.values() {
            let Point { x, y } = point.position.to.offset(margins.left, margins.top);
            let color = point.fill.to.with_opacity(self.config.point_opacity);
            draw_circle(&mut fb, x, y, self.config.point_radius, color);
        }
        for axis in self.x_axis.iter().chain(self.y_axis.iter()) {
            draw_axis(&mut fb, axis, &area, &margins);
        }
        if let Some(rect) = self.brush.extent() {
            let shifted = rect.offset(margins.left, margins.top);
            draw_rect(&mut fb, &shifted, BRUSH_FILL);
            draw_rect_outline(&mut fb, &shifted, Rgba::WHITE, 1.0);
        }
        Ok(fb)
    }

    /// Vector rendering of the settled scene, with axis titles and tick labels.
    #[must_use]
    pub fn to_svg(&self) -> SvgEncoder {
        let margins = self.config.margins;
        let area = self.plot_area();
        let mut svg = SvgEncoder::new(self.width, self.height);

        for point in self.points.values() {
            let color = point.fill.to.with_opacity(self.config.point_opacity);
            let Point { x, y } = point.position.to.offset(margins.left, margins.top);
            svg = svg.circle(x, y, self.config.point_radius, color);
        }
        if let Some(axis) = &self.x_axis {
            svg = svg_axis(svg, axis, &area, &margins, margins.bottom - 10.0);
        }
        if let Some(axis) = &self.y_axis {
            svg = svg_axis(svg, axis, &area, &margins, margins.left - 10.0);
        }
        if let Some(rect) = self.brush.extent() {
            let r = rect.offset(margins.left, margins.top);
            svg = svg.rect_outlined(
                r.x,
                r.y,
                r.width,
                r.height,
                BRUSH_FILL,
                Rgba::WHITE,
                1.0,
            );
        }
        svg
    }
}

impl WithDimensions for ScatterplotEngine {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.brush.clear();
        self.layout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Margins;
    use crate::record::Dimension;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    /// 100×100 plot area with no margins, so data units equal pixels on x and y is flipped.
    fn unit_engine() -> ScatterplotEngine {
        let mut config = Config::default();
        config.scatter.width = 100;
        config.scatter.height = 100;
        config.scatter.margins = Margins::uniform(0.0);
        ScatterplotEngine::new(&config)
    }

    fn xy(index: usize, x: f64, y: f64) -> Record {
        Record::new(index, "04/06/2018", 0, y).with_measure(Field::Temperature, x)
    }

    /// Anchors at (0,0) and (100,100) pin both domains to [0, 100].
    fn anchored(points: &[(f64, f64)]) -> Vec<Record> {
        let mut records = vec![xy(0, 0.0, 0.0), xy(1, 100.0, 100.0)];
        for (i, (x, y)) in points.iter().enumerate() {
            records.push(xy(i + 2, *x, *y));
        }
        records
    }

    fn render_anchored(engine: &mut ScatterplotEngine, points: &[(f64, f64)]) {
        let records = anchored(points);
        engine.render(&records, Field::Temperature, Field::RentedBikeCount);
    }

    fn position(engine: &ScatterplotEngine, index: usize) -> Option<Point> {
        engine.point(index).map(|p| p.position.to)
    }

    fn fill(engine: &ScatterplotEngine, index: usize) -> Option<Rgba> {
        engine.point(index).map(|p| p.fill.to)
    }

    #[test]
    fn test_brush_selects_points_inside_closed_rect() {
        let mut engine = unit_engine();
        // Screen y = 100 - value, so value 90 sits at screen y 10
        let records = anchored(&[(20.0, 90.0), (60.0, 90.0)]);
        engine.render(&records, Field::Temperature, Field::RentedBikeCount);
        assert_eq!(position(&engine, 2), Some(Point::new(20.0, 10.0)));
        assert_eq!(position(&engine, 3), Some(Point::new(60.0, 10.0)));

        engine.brush_start();
        let selected = engine.brush_move(Rect::from_extent(10.0, 0.0, 50.0, 100.0));
        let indices: Vec<usize> = selected.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![2]);
    }

    #[test]
    fn test_brush_edges_inclusive() {
        let mut engine = unit_engine();
        render_anchored(&mut engine, &[(50.0, 50.0)]);
        let selected = engine.brush_move(Rect::from_extent(50.0, 50.0, 60.0, 60.0));
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_brush_emits_every_move_and_colors_selection() {
        let mut engine = unit_engine();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.on_brush(move |s| sink.borrow_mut().push(s.len()));
        render_anchored(&mut engine, &[(20.0, 20.0), (40.0, 40.0)]);

        engine.brush(BrushEvent::Start);
        engine.brush(BrushEvent::Move(Rect::from_extent(10.0, 70.0, 30.0, 90.0)));
        engine.brush(BrushEvent::Move(Rect::from_extent(10.0, 50.0, 50.0, 90.0)));
        assert_eq!(*seen.borrow(), vec![1, 2]);

        let emphasis = engine.emphasis();
        assert!(matches!(emphasis, Emphasis::Brushed(s) if s.len() == 2));
        assert_eq!(fill(&engine, 2), Some(Rgba::RED));
        assert_eq!(fill(&engine, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_brush_end_without_rect_clears() {
        let mut engine = unit_engine();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.on_brush(move |s| sink.borrow_mut().push(s.len()));
        render_anchored(&mut engine, &[(20.0, 20.0)]);

        engine.brush_start();
        engine.brush_move(Rect::from_extent(0.0, 0.0, 100.0, 100.0));
        assert!(engine.brush_end(None).is_empty());
        assert_eq!(*seen.borrow(), vec![3, 0]);
        assert_eq!(engine.brush_extent(), None);
        assert_eq!(engine.emphasis(), &Emphasis::None);
    }

    #[test]
    fn test_render_empty_records() {
        let mut engine = unit_engine();
        engine.render(&[], Field::Date, Field::Hour);
        assert_eq!(engine.point_count(), 0);
        assert!(engine.x_scale().is_none());
        assert!(engine.x_axis().is_none());
        let selected = engine.brush_move(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(selected.is_empty());
        assert!(engine.to_framebuffer().is_ok());
    }

    #[test]
    fn test_records_missing_a_field_are_not_drawn() {
        let mut engine = unit_engine();
        let mut records = anchored(&[(10.0, 10.0)]);
        records[2].temperature = None;
        engine.render(&records, Field::Temperature, Field::RentedBikeCount);
        assert_eq!(engine.point_count(), 2);
        assert!(engine.point(2).is_none());
    }

    #[test]
    fn test_date_axis() {
        let mut engine = unit_engine();
        let records = vec![
            Record::new(0, "01/12/2017", 0, 10.0),
            Record::new(1, "31/01/2018", 0, 20.0),
            Record::new(2, "not a date", 0, 30.0),
        ];
        engine.render(&records, Field::Date, Field::RentedBikeCount);
        assert!(matches!(engine.x_scale(), Some(AxisScale::Time(_))));
        assert_eq!(engine.point_count(), 2);
        let ticks = &engine.x_axis().unwrap().ticks;
        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Dec 2017", "Jan 2018"]);
    }

    #[test]
    fn test_single_record_degenerate_domain() {
        let mut engine = unit_engine();
        let records = [xy(0, 5.0, 5.0)];
        engine.render(&records, Field::Temperature, Field::RentedBikeCount);
        let p = engine.point(0).unwrap().position.to;
        assert_relative_eq!(p.x, 50.0);
        assert_relative_eq!(p.y, 50.0);
    }

    #[test]
    fn test_rerender_keeps_identity_and_animates() {
        let mut engine = unit_engine();
        let records = anchored(&[(20.0, 20.0)]);
        engine.render(&records, Field::Temperature, Field::RentedBikeCount);
        assert!(!engine.point(2).unwrap().position.is_animated());

        engine.render(&records, Field::RentedBikeCount, Field::Temperature);
        let point = engine.point(2).unwrap();
        assert_eq!(point.position.from, Point::new(20.0, 80.0));
        assert_eq!(point.position.to, Point::new(20.0, 80.0));
        assert_eq!(point.position.duration, Duration::from_millis(1000));
        let axis = engine.x_axis().unwrap();
        assert_eq!(axis.transition, Duration::from_millis(500));

        let moved = anchored(&[(30.0, 20.0)]);
        engine.render(&moved, Field::Temperature, Field::RentedBikeCount);
        let point = engine.point(2).unwrap();
        assert_eq!(point.position.from, Point::new(20.0, 80.0));
        assert_eq!(point.position.to, Point::new(30.0, 80.0));
        assert!(point.position.is_animated());
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut engine = unit_engine();
        let records = anchored(&[(20.0, 20.0), (70.0, 30.0)]);
        engine.render(&records, Field::Temperature, Field::RentedBikeCount);
        let first = (engine.x_scale().copied(), engine.y_scale().copied());
        engine.render(&records, Field::Temperature, Field::RentedBikeCount);
        let second = (engine.x_scale().copied(), engine.y_scale().copied());
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_clears_brush_rect() {
        let mut engine = unit_engine();
        let records = anchored(&[]);
        engine.render(&records, Field::Temperature, Field::RentedBikeCount);
        engine.brush_move(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(engine.brush_extent().is_some());
        engine.render(&records, Field::Temperature, Field::RentedBikeCount);
        assert!(engine.brush_extent().is_none());
    }

    #[test]
    fn test_axis_change_keeps_brushed_points() {
        let mut engine = unit_engine();
        let records = anchored(&[(20.0, 20.0)]);
        engine.render(&records, Field::Temperature, Field::RentedBikeCount);
        engine.brush_start();
        engine.brush_end(Some(Rect::from_extent(10.0, 70.0, 30.0, 90.0)));
        let emphasis = engine.emphasis();
        assert!(matches!(emphasis, Emphasis::Brushed(s) if s.len() == 1));

        engine.render(&records, Field::RentedBikeCount, Field::Temperature);
        assert!(engine.brush_extent().is_none());
        let emphasis = engine.emphasis();
        assert!(matches!(emphasis, Emphasis::Brushed(s) if s.len() == 1));
        assert_eq!(fill(&engine, 2), Some(Rgba::RED));

        engine.set_dimensions(200, 200);
        assert!(engine.brush_extent().is_none());
        assert_eq!(fill(&engine, 2), Some(Rgba::RED));

        engine.clear_brush();
        assert_eq!(engine.emphasis(), &Emphasis::None);
        assert_eq!(fill(&engine, 2), Some(Rgba::BLACK));
    }

    #[test]
    fn test_new_records_drop_brushed_points() {
        let mut engine = unit_engine();
        render_anchored(&mut engine, &[(20.0, 20.0)]);
        engine.brush_end(Some(Rect::from_extent(10.0, 70.0, 30.0, 90.0)));
        assert_eq!(engine.emphasis().len(), 1);

        render_anchored(&mut engine, &[(25.0, 20.0)]);
        assert_eq!(engine.emphasis(), &Emphasis::None);
        assert_eq!(fill(&engine, 2), Some(Rgba::BLACK));
    }

    #[test]
    fn test_highlight_then_clear() {
        let mut engine = unit_engine();
        let records = vec![
            Record::new(0, "06/06/2018", 14, 100.0).with_measure(Field::Temperature, 25.0),
            Record::new(1, "06/06/2018", 9, 50.0).with_measure(Field::Temperature, 20.0),
        ];
        engine.render(&records, Field::Temperature, Field::RentedBikeCount);

        let pair = SelectionPair::new(Dimension::Days, 2.into(), Dimension::Hours, 14.into());
        engine.highlight(&[pair]);
        assert_eq!(fill(&engine, 0), Some(Rgba::RED));
        assert_eq!(fill(&engine, 1), Some(Rgba::BLACK));
        let duration = engine.point(0).map(|p| p.fill.duration);
        assert_eq!(duration, Some(Duration::from_millis(1000)));

        engine.highlight(&[]);
        assert!(engine.points().all(|p| p.fill.to == Rgba::BLACK));
        assert_eq!(engine.emphasis(), &Emphasis::None);
    }

    #[test]
    fn test_brush_start_drops_cross_highlight() {
        let mut engine = unit_engine();
        let record = Record::new(0, "06/06/2018", 14, 100.0).with_measure(Field::Temperature, 25.0);
        engine.render(&[record], Field::Temperature, Field::RentedBikeCount);
        let pair = SelectionPair::new(Dimension::Days, 2.into(), Dimension::Hours, 14.into());
        engine.highlight(&[pair]);
        assert!(!engine.emphasis().is_empty());

        engine.brush_start();
        assert_eq!(engine.emphasis(), &Emphasis::None);
    }

    #[test]
    fn test_highlight_does_not_move_points() {
        let mut engine = unit_engine();
        let records = anchored(&[(20.0, 20.0)]);
        engine.render(&records, Field::Temperature, Field::RentedBikeCount);
        let before: Vec<Point> = engine.points().map(|p| p.position.to).collect();
        let pair = SelectionPair::new(Dimension::Hours, 0.into(), Dimension::Days, 0.into());
        engine.highlight(&[pair]);
        let after: Vec<Point> = engine.points().map(|p| p.position.to).collect();
        assert_eq!(before, after);
        assert_eq!(engine.emphasis().len(), 3);
    }

    #[test]
    fn test_set_dimensions_relayouts() {
        let mut engine = unit_engine();
        render_anchored(&mut engine, &[(50.0, 50.0)]);
        engine.set_dimensions(200, 200);
        assert_eq!(engine.plot_area(), Rect::new(0.0, 0.0, 200.0, 200.0));
        assert_eq!(position(&engine, 2), Some(Point::new(100.0, 100.0)));
    }

    #[test]
    fn test_outputs() {
        let mut engine = unit_engine();
        render_anchored(&mut engine, &[(50.0, 50.0)]);
        engine.brush_move(Rect::new(40.0, 40.0, 20.0, 20.0));

        let fb = engine.to_framebuffer().unwrap();
        assert_eq!((fb.width(), fb.height()), (100, 100));
        assert_ne!(fb.get_pixel(50, 50), Some(Rgba::WHITE));

        let svg = engine.to_svg().render();
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains(">Temperature</text>"));
        assert!(svg.contains(">RentedBikeCount</text>"));
    }
}
