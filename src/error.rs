use thiserror::Error;

/// Conditions the drawing core absorbs as silent no-ops.
///
/// Neither variant is ever shown to the user: the engine logs them at debug
/// level and leaves the store and surface untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DrawError {
    /// Undo was requested with nothing recorded
    #[error("no strokes to undo")]
    EmptyHistory,

    /// The pointer session never moved past its first point
    #[error("stroke has {points} distinct point(s), need at least 2")]
    DegenerateStroke { points: usize },
}

/// Errors that can occur while encoding the surface as an image
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("surface has zero size")]
    EmptySurface,

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
