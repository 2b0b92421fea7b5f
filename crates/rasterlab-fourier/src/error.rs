use rasterlab_image::ImageError;

/// An error type for the frequency-domain operators.
#[derive(thiserror::Error, Debug)]
pub enum FourierError {
    /// Error when the input image is not square.
    #[error("Image of {0}x{1} is not square")]
    NotSquare(usize, usize),

    /// Error when the square side is not a positive power of two.
    #[error("Side ({0}) is not a positive power of two")]
    NotPowerOfTwo(usize),

    /// Error coming from the image operations.
    #[error(transparent)]
    Image(#[from] ImageError),
}
