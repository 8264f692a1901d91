#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod engine;
pub mod error;
pub mod input;
pub mod palette;
pub mod panels;
pub mod raster;
pub mod settings;
pub mod stroke;
pub mod stroke_store;
pub mod surface;
pub mod util;

pub use app::FreehandApp;
pub use engine::{Brush, DrawingEngine, EngineState};
pub use error::{DrawError, ExportError};
pub use input::{InputEvent, InputHandler};
pub use raster::RasterSurface;
pub use settings::Settings;
pub use stroke::{MutableStroke, Point, Stroke};
pub use stroke_store::StrokeStore;
pub use surface::{RecordingSurface, RenderCommand, Surface};
