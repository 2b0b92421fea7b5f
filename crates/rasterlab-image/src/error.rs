/// An error type for image operations.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    /// Error when the length of the pixel data does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the sizes of two images do not match.
    #[error("Images have different sizes ({0}x{1} != {2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a value cannot be represented in the pixel type.
    #[error("Failed to cast the pixel value")]
    CastError,

    /// Error when a kernel or structuring element side is not a positive odd number.
    #[error("Invalid kernel size ({0}); the side must be odd and non-zero")]
    InvalidKernelSize(usize),

    /// Error when the kernel data length does not match its side.
    #[error("Kernel data length ({0}) does not match its side squared ({1})")]
    InvalidKernelLength(usize, usize),

    /// Error when an operator parameter is outside its domain.
    #[error("Parameter `{0}` is out of its domain (got {1})")]
    InvalidParameter(&'static str, f64),
}
