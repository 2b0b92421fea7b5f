#![deny(missing_docs)]
//! Image types for the classical image-processing operators

/// image representation for computer vision purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

/// synthetic default images used as inputs for the operators.
pub mod generator;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
