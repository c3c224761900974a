//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while ingesting a 1D LUT.
///
/// These never cross the pipeline boundary: [`crate::lut::load`] logs them and
/// reports "no LUT" instead.
#[derive(Debug, Error)]
pub enum LutError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image strip could not be decoded.
    #[error("failed to decode image strip: {0}")]
    Image(#[from] image::ImageError),

    /// Fewer than two usable samples.
    #[error("LUT needs at least 2 samples, found {0}")]
    TooFewSamples(usize),

    /// Channel sample lists disagree in length.
    #[error("channel lengths differ: r={r}, g={g}, b={b}")]
    ChannelMismatch {
        /// Red sample count
        r: usize,
        /// Green sample count
        g: usize,
        /// Blue sample count
        b: usize,
    },
}
