use thiserror::Error;

/// Errors originating from the rendering pipeline's output stage.
///
/// The engine itself never fails; only writing the image can.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode PNG: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error(transparent)]
    Core(#[from] greyship_core::CoreError),
}
