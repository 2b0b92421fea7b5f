#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the frequency-domain operators.
pub mod error;

/// Forward and inverse radix-2 transforms over a complex frequency grid.
pub mod fft;

/// Log-magnitude spectrum rendering.
pub mod spectrum;

pub use crate::error::FourierError;
pub use crate::fft::FrequencyGrid;
