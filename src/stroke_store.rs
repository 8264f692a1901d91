use crate::error::DrawError;
use crate::stroke::Stroke;

/// Ordered log of committed strokes, oldest first.
///
/// Insertion order is also z-order: replaying `all()` front to back onto a
/// cleared surface reproduces what is currently visible.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StrokeStore {
    strokes: Vec<Stroke>,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
        }
    }

    pub fn append(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Remove and return the most recently appended stroke
    pub fn remove_last(&mut self) -> Result<Stroke, DrawError> {
        self.strokes.pop().ok_or(DrawError::EmptyHistory)
    }

    pub fn all(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
