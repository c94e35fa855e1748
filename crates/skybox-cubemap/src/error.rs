//! Cubemap error types.

/// Configuration errors raised before any pixel is rendered.
///
/// None of these are transient; the caller must fix the request.
#[derive(Debug, thiserror::Error)]
pub enum CubemapError {
    /// Face token is not one of `pz nz px nx py ny`.
    #[error("unknown cube face `{0}` (expected one of pz, nz, px, nx, py, ny)")]
    UnknownFace(String),

    /// Interpolation token is not one of `nearest linear cubic lanczos`.
    #[error("unknown interpolation `{0}` (expected one of nearest, linear, cubic, lanczos)")]
    UnknownInterpolation(String),

    /// Lanczos support radius other than 3 or 5.
    #[error("unsupported lanczos radius {0} (expected 3 or 5)")]
    UnsupportedLanczosRadius(u32),

    /// Source image has zero width or height.
    #[error("source image is empty ({width}x{height})")]
    EmptySource {
        /// Source width in pixels.
        width: u32,
        /// Source height in pixels.
        height: u32,
    },

    /// The computed face side length is zero.
    #[error("face size is zero (source width {source_width}, max width {max_width:?})")]
    EmptyFace {
        /// Source width in pixels.
        source_width: u32,
        /// Requested maximum face width, if any.
        max_width: Option<u32>,
    },

    /// The render was cancelled before every face finished.
    #[error("cubemap render cancelled")]
    Cancelled,

    /// A face worker could not be spawned or terminated without a result.
    #[error("face worker failed: {0}")]
    Worker(String),
}
