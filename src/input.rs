use egui::{Context, Key, Modifiers, Pos2, Rect};

use crate::engine::{Brush, DrawingEngine};
use crate::stroke::Point;
use crate::surface::Surface;

/// Canvas input translated into engine terms.
///
/// Positions are canvas-local: the top-left corner of the canvas is (0, 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown(Point),
    /// Pointer moved over the canvas (with or without a button held)
    PointerMove(Point),
    /// Primary button released
    PointerUp,
    /// Pointer left the canvas or the window
    PointerLeave,
    /// Undo shortcut (Ctrl/Cmd+Z)
    Undo,
}

impl InputEvent {
    /// Feed this event to the engine, starting strokes with `brush`
    pub fn apply<S: Surface>(self, engine: &mut DrawingEngine<S>, brush: Brush) {
        match self {
            Self::PointerDown(point) => engine.pointer_down(point, brush.color, brush.width),
            Self::PointerMove(point) => engine.pointer_move(point),
            Self::PointerUp => engine.pointer_up(),
            Self::PointerLeave => engine.pointer_leave(),
            Self::Undo => {
                engine.undo();
            }
        }
    }
}

/// Snapshot of the pointer for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// Pointer position in screen coordinates, `None` if outside the window
    pub pos: Option<Pos2>,
    pub pressed: bool,
    pub released: bool,
}

/// Handles converting raw egui input into canvas InputEvents
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    fn to_local(&self, pos: Pos2) -> Point {
        (pos - self.canvas_rect.min).to_pos2()
    }

    fn in_canvas(&self, pos: Option<Pos2>) -> bool {
        pos.is_some_and(|pos| self.canvas_rect.contains(pos))
    }

    /// Process raw egui input and generate canvas events
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let (sample, undo) = ctx.input(|input| {
            let sample = PointerSample {
                pos: input.pointer.hover_pos(),
                pressed: input.pointer.primary_pressed(),
                released: input.pointer.primary_released(),
            };
            let undo = input.events.iter().any(|event| {
                matches!(
                    event,
                    egui::Event::Key { key: Key::Z, pressed: true, modifiers, .. }
                        if is_undo_modifiers(*modifiers)
                )
            });
            (sample, undo)
        });

        let mut events = self.handle_sample(sample);
        if undo {
            events.push(InputEvent::Undo);
        }
        events
    }

    /// Turn one pointer snapshot into events, in the order the engine expects
    pub fn handle_sample(&mut self, sample: PointerSample) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let was_inside = self.in_canvas(self.last_pointer_pos);
        let is_inside = self.in_canvas(sample.pos);

        if let Some(pos) = sample.pos.filter(|_| is_inside) {
            if sample.pressed {
                events.push(InputEvent::PointerDown(self.to_local(pos)));
            } else if Some(pos) != self.last_pointer_pos {
                events.push(InputEvent::PointerMove(self.to_local(pos)));
            }
        }

        if sample.released {
            events.push(InputEvent::PointerUp);
        } else if was_inside && !is_inside {
            events.push(InputEvent::PointerLeave);
        }

        self.last_pointer_pos = sample.pos;
        events
    }
}

fn is_undo_modifiers(modifiers: Modifiers) -> bool {
    modifiers.command && !modifiers.shift && !modifiers.alt
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_max(pos2(100.0, 50.0), pos2(300.0, 250.0)))
    }

    fn at(x: f32, y: f32) -> PointerSample {
        PointerSample {
            pos: Some(pos2(x, y)),
            ..Default::default()
        }
    }

    #[test]
    fn test_press_inside_canvas_is_local_pointer_down() {
        let mut input = handler();
        let events = input.handle_sample(PointerSample {
            pressed: true,
            ..at(110.0, 60.0)
        });
        assert_eq!(events, vec![InputEvent::PointerDown(pos2(10.0, 10.0))]);
    }

    #[test]
    fn test_moves_only_when_position_changes() {
        let mut input = handler();
        assert_eq!(
            input.handle_sample(at(120.0, 60.0)),
            vec![InputEvent::PointerMove(pos2(20.0, 10.0))]
        );
        assert!(input.handle_sample(at(120.0, 60.0)).is_empty());
    }

    #[test]
    fn test_leaving_canvas_emits_leave() {
        let mut input = handler();
        input.handle_sample(at(120.0, 60.0));
        assert_eq!(input.handle_sample(at(20.0, 20.0)), vec![InputEvent::PointerLeave]);
        assert_eq!(
            input.handle_sample(PointerSample::default()),
            Vec::<InputEvent>::new()
        );
    }

    #[test]
    fn test_pointer_gone_from_window_emits_leave() {
        let mut input = handler();
        input.handle_sample(at(120.0, 60.0));
        assert_eq!(
            input.handle_sample(PointerSample::default()),
            vec![InputEvent::PointerLeave]
        );
    }

    #[test]
    fn test_release_emits_pointer_up() {
        let mut input = handler();
        input.handle_sample(at(120.0, 60.0));
        let events = input.handle_sample(PointerSample {
            released: true,
            ..at(130.0, 60.0)
        });
        assert_eq!(
            events,
            vec![InputEvent::PointerMove(pos2(30.0, 10.0)), InputEvent::PointerUp]
        );
    }

    #[test]
    fn test_undo_modifiers() {
        assert!(is_undo_modifiers(Modifiers::COMMAND));
        assert!(!is_undo_modifiers(Modifiers::NONE));
        assert!(!is_undo_modifiers(Modifiers::COMMAND | Modifiers::SHIFT));
    }
}
