//! [`LinkedViews`]: the scatterplot and heatmap wired to one [`SelectionState`].
//!
//! Brushing the scatterplot narrows the records the heatmap aggregates; brushing the heatmap
//! cross-highlights scatter points. Each update replaces the snapshot and re-renders only the
//! view that depends on it.

use batuta_common::display::WithDimensions;

use crate::brush::BrushEvent;
use crate::config::Config;
use crate::engine::{HeatmapEngine, ScatterplotEngine};
use crate::highlight::SelectionPair;
use crate::record::{Dimension, Field, Record};
use crate::selection::{Interaction, InteractionEvent, SelectionState};

/// Both views, their shared selection state and the brushing state machine.
#[derive(Debug)]
pub struct LinkedViews {
    config: Config,
    state: SelectionState,
    interaction: Interaction,
    scatter: ScatterplotEngine,
    heatmap: HeatmapEngine,
}

impl LinkedViews {
    /// Create empty views.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            state: SelectionState::new(&config),
            interaction: Interaction::Idle,
            scatter: ScatterplotEngine::new(&config),
            heatmap: HeatmapEngine::new(&config),
            config,
        }
    }

    /// Replace the data set. Selections and highlights are dropped and both views re-render.
    pub fn load(&mut self, records: Vec<Record>) {
        tracing::info!(records = records.len(), "linked views loaded");
        self.state = self.state.with_records(records);
        self.interaction = Interaction::Idle;
        self.scatter.highlight(&[]);
        self.render_scatter();
        self.render_heatmap();
    }

    /// Change the scatterplot axes.
    pub fn set_scatter_fields(&mut self, x: Field, y: Field) {
        self.state = self.state.with_fields(x, y);
        self.render_scatter();
    }

    /// Back to the configured default scatter fields.
    pub fn reset_scatter_fields(&mut self) {
        self.set_scatter_fields(self.config.scatter.x_field, self.config.scatter.y_field);
    }

    /// Change the heatmap axes. A heatmap selection over the previous dimensions no longer
    /// applies, so any cross-highlight is removed.
    pub fn set_heatmap_dimensions(&mut self, x: Dimension, y: Dimension) {
        let had_selection = !self.state.heatmap_selection().is_empty();
        self.state = self.state.with_dimensions(x, y);
        if had_selection && self.state.heatmap_selection().is_empty() {
            self.scatter.highlight(&[]);
            self.transition(InteractionEvent::HighlightCleared);
        }
        self.render_heatmap();
    }

    /// Aggregate every record in the heatmap again, discarding the scatter brush.
    pub fn select_all(&mut self) {
        self.state = self.state.with_scatter_selection(None);
        self.scatter.clear_brush();
        self.render_heatmap();
    }

    /// Forward a brush event from the scatterplot. Ignored while a heatmap gesture is in
    /// progress.
    pub fn scatter_brush(&mut self, event: BrushEvent) {
        match event {
            BrushEvent::Start => {
                if !self.transition(InteractionEvent::ScatterStart) {
                    return;
                }
                self.heatmap.clear_brush();
                self.state = self.state.with_heatmap_selection(Vec::new());
                self.scatter.brush_start();
            }
            BrushEvent::Move(rect) => {
                if self.interaction != Interaction::ScatterBrushing {
                    return;
                }
                let selected = self.scatter.brush_move(rect);
                self.apply_scatter_selection(selected);
            }
            BrushEvent::End(rect) => {
                if self.interaction != Interaction::ScatterBrushing {
                    return;
                }
                let selected = self.scatter.brush_end(rect);
                let non_empty = !selected.is_empty();
                self.apply_scatter_selection(selected);
                self.transition(InteractionEvent::ScatterEnd {
                    selected: non_empty,
                });
            }
        }
    }

    /// Forward a brush event from the heatmap. Moves and ends outside a heatmap gesture are
    /// ignored.
    pub fn heatmap_brush(&mut self, event: BrushEvent) {
        match event {
            BrushEvent::Start => {
                if !self.transition(InteractionEvent::HeatmapStart) {
                    return;
                }
                self.scatter.clear_brush();
                self.heatmap.brush_start();
            }
            BrushEvent::Move(rect) => {
                if self.interaction != Interaction::HeatmapBrushing {
                    return;
                }
                let pairs = self.heatmap.brush_move(rect);
                self.apply_heatmap_selection(pairs);
            }
            BrushEvent::End(rect) => {
                if self.interaction != Interaction::HeatmapBrushing {
                    return;
                }
                let pairs = self.heatmap.brush_end(rect);
                let non_empty = !pairs.is_empty();
                self.apply_heatmap_selection(pairs);
                self.transition(InteractionEvent::HeatmapEnd {
                    selected: non_empty,
                });
            }
        }
    }

    /// Resize the scatterplot surface.
    pub fn resize_scatter(&mut self, width: u32, height: u32) {
        self.scatter.set_dimensions(width, height);
    }

    /// Resize the heatmap surface. The heatmap brush and any highlight it drives are dropped.
    pub fn resize_heatmap(&mut self, width: u32, height: u32) {
        self.heatmap.set_dimensions(width, height);
        if !self.state.heatmap_selection().is_empty() {
            self.apply_heatmap_selection(Vec::new());
            self.transition(InteractionEvent::HighlightCleared);
        }
    }

    /// Current shared state.
    #[must_use]
    pub fn snapshot(&self) -> SelectionState {
        self.state.clone()
    }

    /// Current interaction state.
    #[must_use]
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The scatterplot view.
    #[must_use]
    pub fn scatter(&self) -> &ScatterplotEngine {
        &self.scatter
    }

    /// The heatmap view.
    #[must_use]
    pub fn heatmap(&self) -> &HeatmapEngine {
        &self.heatmap
    }

    /// Register an external listener for scatter brush selections.
    pub fn on_scatter_brush(&mut self, listener: impl FnMut(&[Record]) + 'static) {
        self.scatter.on_brush(listener);
    }

    /// Register an external listener for heatmap brush selections.
    pub fn on_heatmap_select(&mut self, listener: impl FnMut(&[SelectionPair]) + 'static) {
        self.heatmap.on_select(listener);
    }

    fn apply_scatter_selection(&mut self, selected: Vec<Record>) {
        self.state = self.state.with_scatter_selection(Some(selected));
        self.render_heatmap();
    }

    fn apply_heatmap_selection(&mut self, pairs: Vec<SelectionPair>) {
        self.scatter.highlight(&pairs);
        self.state = self.state.with_heatmap_selection(pairs);
    }

    fn render_scatter(&mut self) {
        let (x, y) = self.state.fields();
        self.scatter.render(self.state.records(), x, y);
    }

    fn render_heatmap(&mut self) {
        let (x, y) = self.state.dimensions();
        let input = self.state.heatmap_input(self.config.heatmap.follow_scatter_selection);
        self.heatmap.render(self.state.records(), input, x, y);
    }

    /// Apply `event` to the state machine. Returns whether it was accepted.
    fn transition(&mut self, event: InteractionEvent) -> bool {
        let Some(next) = self.interaction.try_next(event) else {
            tracing::trace!(state = %self.interaction, ?event, "interaction event ignored");
            return false;
        };
        tracing::trace!(from = %self.interaction, to = %next, ?event, "interaction");
        self.interaction = next;
        true
    }
}

impl Default for LinkedViews {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
