/// Error type for raster capture implementations.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The region has no cells to draw.
    #[error("Capture region is empty")]
    EmptyRegion,

    /// Scale must be at least 1.
    #[error("Invalid capture scale: {0}")]
    InvalidScale(u32),

    /// The drawn image would exceed the pixel budget.
    #[error("Capture of {width}x{height} pixels is too large")]
    TooLarge { width: u64, height: u64 },

    /// Encoder or rendering failure inside the capture backend.
    #[error("Capture failed: {0}")]
    Backend(#[from] anyhow::Error),
}

impl CaptureError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }
}

/// Error returned when parsing a `#rrggbb` color fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid color '{0}', expected #rrggbb")]
pub struct ParseColorError(pub String);
