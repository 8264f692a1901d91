use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ExportResult;
use crate::raster::RasterSurface;
use crate::stroke::{MutableStroke, Point, Stroke};
use crate::stroke_store::StrokeStore;
use crate::surface::Surface;

/// Line color and width applied to new strokes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    pub color: Color32,
    pub width: f32,
}

impl Brush {
    pub fn new(color: Color32, width: f32) -> Self {
        Self { color, width }
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: 5.0,
        }
    }
}

/// Pointer-session state of the engine
#[derive(Debug, Default, Clone, PartialEq)]
pub enum EngineState {
    #[default]
    Idle,
    Drawing {
        session: MutableStroke,
    },
}

impl EngineState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Drawing { .. } => "Drawing",
        }
    }
}

/// Records strokes and keeps a stateless surface in sync with them.
///
/// The store is the source of truth. During a live stroke only the newest
/// segment is drawn; after the history changes the surface is cleared and
/// every retained stroke is drawn again in commit order.
#[derive(Debug)]
pub struct DrawingEngine<S: Surface> {
    surface: S,
    store: StrokeStore,
    state: EngineState,
    brush: Brush,
}

impl<S: Surface> DrawingEngine<S> {
    pub fn new(surface: S) -> Self {
        Self::with_brush(surface, Brush::default())
    }

    pub fn with_brush(mut surface: S, brush: Brush) -> Self {
        surface.set_style(brush.color, brush.width);
        Self {
            surface,
            store: StrokeStore::new(),
            state: EngineState::Idle,
            brush,
        }
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    /// Change the ambient brush. An active session keeps its own style.
    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
        if !self.is_drawing() {
            self.surface.set_style(brush.color, brush.width);
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, EngineState::Drawing { .. })
    }

    /// The in-progress stroke, if a pointer session is open
    pub fn session(&self) -> Option<&MutableStroke> {
        match &self.state {
            EngineState::Drawing { session } => Some(session),
            EngineState::Idle => None,
        }
    }

    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_parts(self) -> (StrokeStore, S) {
        (self.store, self.surface)
    }

    /// Open a pointer session at `point`.
    ///
    /// A session that is still open (a missed pointer-up) is finalized first.
    pub fn pointer_down(&mut self, point: Point, color: Color32, width: f32) {
        if self.is_drawing() {
            log::debug!("pointer_down while drawing, finishing previous stroke");
            self.finish_session();
        }

        self.brush = Brush::new(color, width);
        self.surface.set_style(color, width);
        self.surface.begin_path(point);
        self.state = EngineState::Drawing {
            session: MutableStroke::begin(point, color, width),
        };
    }

    /// Extend the live stroke by one segment. Ignored while idle.
    pub fn pointer_move(&mut self, point: Point) {
        let EngineState::Drawing { session } = &mut self.state else {
            return;
        };
        if session.add_point(point).is_some() {
            self.surface.line_to(point);
        }
    }

    pub fn pointer_up(&mut self) {
        self.finish_session();
    }

    /// Leaving the surface ends the gesture exactly like releasing the pointer
    pub fn pointer_leave(&mut self) {
        self.finish_session();
    }

    /// Drop the newest committed stroke and redraw from history.
    ///
    /// Returns whether a stroke was removed. With nothing to undo this is a
    /// no-op that emits no primitives.
    pub fn undo(&mut self) -> bool {
        match self.store.remove_last() {
            Ok(stroke) => {
                log::info!(
                    "Undo stroke with {} points, {} remaining",
                    stroke.points().len(),
                    self.store.len()
                );
                self.redraw();
                true
            }
            Err(err) => {
                log::debug!("Undo ignored: {}", err);
                false
            }
        }
    }

    /// Clear the surface and replay every retained stroke in commit order.
    ///
    /// An open session is traced again on top so the live stroke survives,
    /// and the incremental path is re-anchored at its last point.
    pub fn redraw(&mut self) {
        self.surface.clear();
        for stroke in self.store.all() {
            trace_path(&mut self.surface, stroke.points(), stroke.color(), stroke.width());
        }

        match &self.state {
            EngineState::Drawing { session } => {
                trace_path(&mut self.surface, session.points(), session.color(), session.width());
                self.surface.begin_path(session.last_point());
            }
            EngineState::Idle => {
                self.surface.set_style(self.brush.color, self.brush.width);
            }
        }
    }

    fn finish_session(&mut self) {
        let EngineState::Drawing { session } = std::mem::take(&mut self.state) else {
            return;
        };

        match session.finish() {
            Ok(stroke) => self.commit(stroke),
            Err(err) => log::debug!("Discarding stroke: {}", err),
        }
    }

    fn commit(&mut self, stroke: Stroke) {
        log::info!(
            "Committed stroke #{} with {} points",
            self.store.len() + 1,
            stroke.points().len()
        );
        self.store.append(stroke);
    }
}

impl DrawingEngine<RasterSurface> {
    /// Encode what is currently on the canvas as PNG bytes
    pub fn export_png(&self) -> ExportResult<Vec<u8>> {
        self.surface.encode_png()
    }

    /// Resize the canvas and rebuild it from history
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.surface.resize(width, height) {
            self.redraw();
        }
    }
}

// Move to the first point, then straight segments through the rest, using
// the stroke's own style.
fn trace_path(surface: &mut impl Surface, points: &[Point], color: Color32, width: f32) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    surface.set_style(color, width);
    surface.begin_path(*first);
    for point in rest {
        surface.line_to(*point);
    }
}
