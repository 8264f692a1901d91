use egui::Color32;

use crate::stroke::Point;

/// The rendering vocabulary the drawing engine needs from its host.
///
/// Any 2D raster target that can clear itself, take a line style, start a
/// path and extend it with straight segments can sit behind this trait.
pub trait Surface {
    /// Erase everything drawn so far
    fn clear(&mut self);

    /// Set the color and width used by subsequent segments
    fn set_style(&mut self, color: Color32, width: f32);

    /// Start a new path at `point` without drawing anything
    fn begin_path(&mut self, point: Point);

    /// Draw a straight segment from the current path end to `point`
    fn line_to(&mut self, point: Point);
}

/// One rendering primitive, as emitted to a [`Surface`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderCommand {
    Clear,
    SetStyle { color: Color32, width: f32 },
    BeginPath(Point),
    LineTo(Point),
}

impl RenderCommand {
    /// Whether this primitive changes pixels
    pub fn is_mutating(&self) -> bool {
        matches!(self, Self::Clear | Self::LineTo(_))
    }

    /// Re-issue this primitive on another surface
    pub fn apply(&self, surface: &mut impl Surface) {
        match *self {
            Self::Clear => surface.clear(),
            Self::SetStyle { color, width } => surface.set_style(color, width),
            Self::BeginPath(point) => surface.begin_path(point),
            Self::LineTo(point) => surface.line_to(point),
        }
    }
}

/// Surface that records primitives instead of drawing them
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    commands: Vec<RenderCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, in emission order
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Drain the recording, e.g. to isolate what a single event emitted
    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// The primitives issued since the last `Clear`, i.e. what is visible now.
    pub fn visible(&self) -> &[RenderCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == RenderCommand::Clear)
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.push(RenderCommand::Clear);
    }

    fn set_style(&mut self, color: Color32, width: f32) {
        self.commands.push(RenderCommand::SetStyle { color, width });
    }

    fn begin_path(&mut self, point: Point) {
        self.commands.push(RenderCommand::BeginPath(point));
    }

    fn line_to(&mut self, point: Point) {
        self.commands.push(RenderCommand::LineTo(point));
    }
}
