//! Brush gestures and selection subscriptions.
//!
//! A gesture is `Start`, any number of `Move`s, then one `End`. Every event supersedes the
//! previous one: engines recompute and publish the selection synchronously, nothing is queued.

use std::fmt;

use crate::geometry::Rect;

/// One step of a rectangular brush gesture, in plot-area pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrushEvent {
    /// Pointer pressed; no rectangle yet.
    Start,
    /// Rectangle updated during the drag.
    Move(Rect),
    /// Pointer released; `None` means the brush was cleared (e.g. a click without drag).
    End(Option<Rect>),
}

/// Gesture phase of a brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrushPhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Between `Start` and `End`.
    Dragging,
}

/// Rectangle and phase of one engine's brush.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Brush {
    extent: Option<Rect>,
    phase: BrushPhase,
}

impl Brush {
    /// Begin a gesture; the previous rectangle is discarded.
    pub fn start(&mut self) {
        self.extent = None;
        self.phase = BrushPhase::Dragging;
    }

    /// Update the rectangle, clamped to `bounds`. Returns the stored rectangle.
    pub fn update(&mut self, rect: Rect, bounds: &Rect) -> Rect {
        let clamped = rect.clamp_to(bounds);
        self.extent = Some(clamped);
        clamped
    }

    /// Finish the gesture. An empty or missing rectangle clears the brush.
    pub fn finish(&mut self, rect: Option<Rect>, bounds: &Rect) -> Option<Rect> {
        self.phase = BrushPhase::Idle;
        match rect.map(|r| r.clamp_to(bounds)) {
            Some(r) if !r.is_empty() => {
                self.extent = Some(r);
                Some(r)
            }
            _ => {
                self.extent = None;
                None
            }
        }
    }

    /// Remove the rectangle without emitting anything.
    pub fn clear(&mut self) {
        self.extent = None;
        self.phase = BrushPhase::Idle;
    }

    /// Current rectangle.
    #[must_use]
    pub fn extent(&self) -> Option<Rect> {
        self.extent
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> BrushPhase {
        self.phase
    }
}

/// A single-listener selection channel; subscribing replaces the previous listener.
pub struct Subscription<T> {
    listener: Option<Box<dyn FnMut(&[T])>>,
    emitted: u64,
}

impl<T> Subscription<T> {
    /// Create an empty subscription.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listener: None,
            emitted: 0,
        }
    }

    /// Register `listener`, superseding any earlier one.
    pub fn subscribe(&mut self, listener: impl FnMut(&[T]) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Drop the listener.
    pub fn unsubscribe(&mut self) {
        self.listener = None;
    }

    /// Whether a listener is registered.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.listener.is_some()
    }

    /// Publish a selection to the listener, if any.
    pub fn emit(&mut self, selection: &[T]) {
        self.emitted += 1;
        if let Some(listener) = self.listener.as_mut() {
            listener(selection);
        }
    }

    /// Number of selections published so far.
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl<T> Default for Subscription<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("subscribed", &self.is_subscribed())
            .field("emitted", &self.emitted)
            .finish()
    }
}
