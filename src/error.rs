//! Error taxonomy for the template pipeline.

/// Everything that can stop a template from being generated.
///
/// Degenerate but well-formed inputs (single color, single pixel, a palette
/// that collapses below `palette_size`, isolated regions) are not errors.
#[derive(Debug, thiserror::Error)]
pub enum PbnError {
    /// The input image is unusable: zero area or a mis-sized pixel buffer.
    #[error("invalid input image: {0}")]
    InvalidInput(String),

    /// The configuration cannot produce a template.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Decoding or encoding through the `image` crate failed.
    #[cfg(feature = "native")]
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, PbnError>;
