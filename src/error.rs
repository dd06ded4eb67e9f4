//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the anaglyph crate.
#[derive(Debug)]
pub enum StereoError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// An option value outside its accepted range, or a setting that the
    /// active camera does not support.
    InvalidOption(String),
    /// A render call was made before the camera was attached to a view.
    Detached,
    /// A render call was made after the camera was deleted.
    Deleted,
    /// Eye render targets were pushed or popped out of order.
    RenderOrder(&'static str),
    /// A view index outside the camera's view count.
    InvalidView(usize),
    /// The host reported a zero-sized output.
    DegenerateSize {
        /// Reported output width in pixels.
        width: u32,
        /// Reported output height in pixels.
        height: u32,
    },
}

impl fmt::Display for StereoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOption(msg) => write!(f, "invalid option: {msg}"),
            Self::Detached => {
                write!(f, "camera is not attached to a view")
            }
            Self::Deleted => write!(f, "camera has been deleted"),
            Self::RenderOrder(msg) => {
                write!(f, "render target order violated: {msg}")
            }
            Self::InvalidView(index) => {
                write!(f, "view index {index} out of range")
            }
            Self::DegenerateSize { width, height } => {
                write!(f, "degenerate output size {width}x{height}")
            }
        }
    }
}

impl std::error::Error for StereoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for StereoError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for StereoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
