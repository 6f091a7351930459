//! Shared view state: an immutable [`SelectionState`] snapshot and the [`Interaction`] state
//! machine that sequences brushing between the two views.
//!
//! Every update produces a new snapshot; engines render from a snapshot and never see a
//! half-applied change.

use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::highlight::SelectionPair;
use crate::record::{Dimension, Field, Record};

// ============================================================================
// Selection snapshot
// ============================================================================

/// Records, selections and axis choices shared by the linked views.
///
/// Record sets are reference counted, so cloning a snapshot is cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    records: Arc<[Record]>,
    scatter_selection: Option<Arc<[Record]>>,
    heatmap_selection: Arc<[SelectionPair]>,
    x_field: Field,
    y_field: Field,
    x_dimension: Dimension,
    y_dimension: Dimension,
}

impl SelectionState {
    /// Empty state with the default fields and dimensions of `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            records: Arc::from(Vec::new()),
            scatter_selection: None,
            heatmap_selection: Arc::from(Vec::new()),
            x_field: config.scatter.x_field,
            y_field: config.scatter.y_field,
            x_dimension: config.heatmap.x_dimension,
            y_dimension: config.heatmap.y_dimension,
        }
    }

    /// Replace the record set. Both selections are dropped.
    #[must_use]
    pub fn with_records(&self, records: Vec<Record>) -> Self {
        Self {
            records: Arc::from(records),
            scatter_selection: None,
            heatmap_selection: Arc::from(Vec::new()),
            ..self.clone()
        }
    }

    /// Set the scatter-origin selection; `None` means every record.
    #[must_use]
    pub fn with_scatter_selection(&self, selection: Option<Vec<Record>>) -> Self {
        Self {
            scatter_selection: selection.map(Arc::from),
            ..self.clone()
        }
    }

    /// Set the heatmap-origin selection.
    #[must_use]
    pub fn with_heatmap_selection(&self, selection: Vec<SelectionPair>) -> Self {
        Self {
            heatmap_selection: Arc::from(selection),
            ..self.clone()
        }
    }

    /// Change the scatter fields.
    #[must_use]
    pub fn with_fields(&self, x: Field, y: Field) -> Self {
        Self {
            x_field: x,
            y_field: y,
            ..self.clone()
        }
    }

    /// Change the heatmap dimensions. A heatmap selection over the old dimensions is dropped.
    #[must_use]
    pub fn with_dimensions(&self, x: Dimension, y: Dimension) -> Self {
        let heatmap_selection = if (x, y) == (self.x_dimension, self.y_dimension) {
            Arc::clone(&self.heatmap_selection)
        } else {
            Arc::from(Vec::new())
        };
        Self {
            x_dimension: x,
            y_dimension: y,
            heatmap_selection,
            ..self.clone()
        }
    }

    /// Full record set.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records chosen in the scatterplot, or every record when nothing was brushed.
    #[must_use]
    pub fn scatter_selection(&self) -> &[Record] {
        self.scatter_selection.as_deref().unwrap_or(&self.records)
    }

    /// Whether the scatter selection is an explicit subset.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.scatter_selection.is_some()
    }

    /// Records the heatmap aggregates: the scatter selection when `follow` is set, else all.
    #[must_use]
    pub fn heatmap_input(&self, follow: bool) -> Option<&[Record]> {
        if follow {
            self.scatter_selection.as_deref()
        } else {
            None
        }
    }

    /// Value pairs brushed in the heatmap.
    #[must_use]
    pub fn heatmap_selection(&self) -> &[SelectionPair] {
        &self.heatmap_selection
    }

    /// Scatter x and y fields.
    #[must_use]
    pub fn fields(&self) -> (Field, Field) {
        (self.x_field, self.y_field)
    }

    /// Heatmap x and y dimensions.
    #[must_use]
    pub fn dimensions(&self) -> (Dimension, Dimension) {
        (self.x_dimension, self.y_dimension)
    }
}

// ============================================================================
// Interaction state machine
// ============================================================================

/// Where the user is in a linked brushing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    /// Nothing in progress and no cross-highlight shown.
    #[default]
    Idle,
    /// Dragging a brush over the scatterplot.
    ScatterBrushing,
    /// Dragging a brush over the heatmap.
    HeatmapBrushing,
    /// A heatmap selection is highlighting scatter points.
    HighlightApplied,
}

/// Inputs that drive [`Interaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    /// Drag started on the scatterplot.
    ScatterStart,
    /// Drag ended on the scatterplot; `selected` is whether any record was chosen.
    ScatterEnd {
        /// Non-empty selection.
        selected: bool,
    },
    /// Drag started on the heatmap.
    HeatmapStart,
    /// Drag ended on the heatmap; `selected` is whether any cell was chosen.
    HeatmapEnd {
        /// Non-empty selection.
        selected: bool,
    },
    /// The heatmap selection was dropped outside a gesture (new data or dimensions).
    HighlightCleared,
}

impl Interaction {
    /// Next state after `event`, or `None` when the event does not apply in this state.
    #[must_use]
    pub fn try_next(self, event: InteractionEvent) -> Option<Self> {
        use InteractionEvent as E;
        match (self, event) {
            (Self::Idle | Self::HighlightApplied, E::ScatterStart) => Some(Self::ScatterBrushing),
            (Self::Idle | Self::HighlightApplied | Self::ScatterBrushing, E::HeatmapStart) => {
                Some(Self::HeatmapBrushing)
            }
            (Self::HeatmapBrushing, E::HeatmapEnd { selected: true }) => {
                Some(Self::HighlightApplied)
            }
            (Self::HeatmapBrushing, E::HeatmapEnd { selected: false })
            | (Self::ScatterBrushing, E::ScatterEnd { .. })
            | (Self::HighlightApplied, E::HighlightCleared) => Some(Self::Idle),
            _ => None,
        }
    }

    /// Next state after `event`. Events that do not apply leave the state unchanged.
    #[must_use]
    pub fn next(self, event: InteractionEvent) -> Self {
        self.try_next(event).unwrap_or(self)
    }

    /// Whether a brush gesture is in progress.
    #[must_use]
    pub fn is_brushing(self) -> bool {
        matches!(self, Self::ScatterBrushing | Self::HeatmapBrushing)
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::ScatterBrushing => "scatter-brushing",
            Self::HeatmapBrushing => "heatmap-brushing",
            Self::HighlightApplied => "highlight-applied",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DimensionValue;

    fn records() -> Vec<Record> {
        vec![
            Record::new(0, "04/06/2018", 8, 10.0),
            Record::new(1, "05/06/2018", 9, 20.0),
        ]
    }

    fn pair() -> SelectionPair {
        SelectionPair::new(
            Dimension::Hours,
            DimensionValue::Number(8),
            Dimension::Days,
            DimensionValue::Number(0),
        )
    }

    #[test]
    fn test_defaults_from_config() {
        let state = SelectionState::new(&Config::default());
        assert_eq!(state.fields(), (Field::Temperature, Field::RentedBikeCount));
        assert_eq!(state.dimensions(), (Dimension::Hours, Dimension::Days));
        assert!(state.records().is_empty());
        assert!(!state.is_filtered());
    }

    #[test]
    fn test_updates_do_not_touch_previous_snapshot() {
        let base = SelectionState::new(&Config::default()).with_records(records());
        let narrowed = base.with_scatter_selection(Some(records()[..1].to_vec()));

        assert_eq!(base.scatter_selection().len(), 2);
        assert_eq!(narrowed.scatter_selection().len(), 1);
        assert_eq!(narrowed.records().len(), 2);
        assert_eq!(narrowed.heatmap_input(true).map(<[Record]>::len), Some(1));
        assert_eq!(narrowed.heatmap_input(false), None);
        assert_eq!(base.heatmap_input(true), None);
    }

    #[test]
    fn test_empty_scatter_selection_is_not_all() {
        let state = SelectionState::new(&Config::default())
            .with_records(records())
            .with_scatter_selection(Some(Vec::new()));
        assert!(state.is_filtered());
        assert!(state.scatter_selection().is_empty());
    }

    #[test]
    fn test_new_records_drop_selections() {
        let state = SelectionState::new(&Config::default())
            .with_records(records())
            .with_scatter_selection(Some(Vec::new()))
            .with_heatmap_selection(vec![pair()]);
        let reloaded = state.with_records(records());
        assert!(!reloaded.is_filtered());
        assert!(reloaded.heatmap_selection().is_empty());
    }

    #[test]
    fn test_dimension_change_drops_heatmap_selection() {
        let state = SelectionState::new(&Config::default()).with_heatmap_selection(vec![pair()]);
        let same = state.with_dimensions(Dimension::Hours, Dimension::Days);
        assert_eq!(same.heatmap_selection().len(), 1);
        let changed = state.with_dimensions(Dimension::Months, Dimension::Days);
        assert!(changed.heatmap_selection().is_empty());
    }

    #[test]
    fn test_scatter_gesture() {
        use InteractionEvent as E;

        let s = Interaction::Idle.next(E::ScatterStart);
        assert_eq!(s, Interaction::ScatterBrushing);
        assert!(s.is_brushing());
        assert_eq!(s.next(E::ScatterEnd { selected: true }), Interaction::Idle);
        assert_eq!(s.next(E::ScatterEnd { selected: false }), Interaction::Idle);
    }

    #[test]
    fn test_heatmap_gesture() {
        use InteractionEvent as E;

        let s = Interaction::ScatterBrushing.next(E::HeatmapStart);
        assert_eq!(s, Interaction::HeatmapBrushing);
        let applied = s.next(E::HeatmapEnd { selected: true });
        assert_eq!(applied, Interaction::HighlightApplied);
        assert_eq!(s.next(E::HeatmapEnd { selected: false }), Interaction::Idle);

        assert_eq!(applied.next(E::ScatterStart), Interaction::ScatterBrushing);
        assert_eq!(applied.next(E::HeatmapStart), Interaction::HeatmapBrushing);
        assert_eq!(applied.next(E::HighlightCleared), Interaction::Idle);
    }

    #[test]
    fn test_inapplicable_events_keep_state() {
        assert_eq!(
            Interaction::HeatmapBrushing.next(InteractionEvent::ScatterStart),
            Interaction::HeatmapBrushing
        );
        let idle = Interaction::Idle.next(InteractionEvent::HighlightCleared);
        assert_eq!(idle, Interaction::Idle);
        let name = Interaction::HighlightApplied.to_string();
        assert_eq!(name, "highlight-applied");
    }

    #[test]
    fn test_gesture_ends_only_close_their_own_gesture() {
        use Interaction as I;
        use InteractionEvent as E;

        for state in [I::Idle, I::ScatterBrushing, I::HighlightApplied] {
            assert_eq!(state.try_next(E::HeatmapEnd { selected: true }), None);
            assert_eq!(state.try_next(E::HeatmapEnd { selected: false }), None);
        }
        for state in [I::Idle, I::HeatmapBrushing, I::HighlightApplied] {
            assert_eq!(state.try_next(E::ScatterEnd { selected: true }), None);
        }
        assert_eq!(I::HeatmapBrushing.try_next(E::HeatmapStart), None);
        assert_eq!(I::ScatterBrushing.try_next(E::ScatterStart), None);
        let handoff = I::ScatterBrushing.try_next(E::HeatmapStart);
        assert_eq!(handoff, Some(I::HeatmapBrushing));
    }
}
