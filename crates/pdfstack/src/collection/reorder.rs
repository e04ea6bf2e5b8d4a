//! Drag-to-reorder tracking.
//!
//! A drag gesture produces a stream of "hovering over position N" events.
//! Each event becomes one [`OrderedCollection::move_to`] from the dragged
//! document's last known position, after which that position is updated so
//! the next event composes with the previous one. Events must be applied in
//! the order they arrive.

use super::OrderedCollection;
use crate::error::Result;

/// Tracks the position of the document being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    current: usize,
}

impl DragSession {
    /// Start dragging the document at `index`.
    pub fn start(index: usize) -> Self {
        Self { current: index }
    }

    /// Current position of the dragged document.
    pub fn index(&self) -> usize {
        self.current
    }

    /// The dragged document entered the position `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if either position is out of bounds; the tracked
    /// position is left unchanged.
    pub fn enter(&mut self, collection: &mut OrderedCollection, target: usize) -> Result<()> {
        collection.move_to(self.current, target)?;
        self.current = target;
        Ok(())
    }
}
