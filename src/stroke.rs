use egui::{Color32, Pos2};

use crate::error::DrawError;

/// A position in surface-local coordinates
pub type Point = Pos2;

// Immutable stroke, owned by the store once committed
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    color: Color32,
    width: f32,
}

// Mutable stroke for the in-progress pointer session
#[derive(Clone, Debug, PartialEq)]
pub struct MutableStroke {
    points: Vec<Point>,
    color: Color32,
    width: f32,
}

impl Stroke {
    /// Create a stroke from an already recorded path.
    ///
    /// Returns `None` when `points` is empty; a committed stroke always has
    /// at least one point.
    pub fn new(color: Color32, width: f32, points: Vec<Point>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            points,
            color,
            width,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

impl MutableStroke {
    // Start a session buffer at the pointer-down position
    pub fn begin(start: Point, color: Color32, width: f32) -> Self {
        Self {
            points: vec![start],
            color,
            width,
        }
    }

    /// Append a point to the path.
    ///
    /// Returns the previous last point when the new one was recorded, or
    /// `None` if it repeats the last point and was skipped.
    pub fn add_point(&mut self, point: Point) -> Option<Point> {
        let last = self.last_point();
        if last == point {
            return None;
        }
        self.points.push(point);
        Some(last)
    }

    pub fn last_point(&self) -> Point {
        // The buffer is created with one point and only ever grows.
        self.points[self.points.len() - 1]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Freeze the session into a committed stroke.
    ///
    /// A session holding a single point (a click without drag) is degenerate
    /// and is handed back as an error instead.
    pub fn finish(self) -> Result<Stroke, DrawError> {
        if self.points.len() < 2 {
            return Err(DrawError::DegenerateStroke {
                points: self.points.len(),
            });
        }
        Ok(Stroke {
            points: self.points,
            color: self.color,
            width: self.width,
        })
    }
}
