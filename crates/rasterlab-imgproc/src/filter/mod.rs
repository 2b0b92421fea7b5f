//! Convolution engine and kernel catalog.
//!
//! This module provides the square kernels used across the crate and the
//! clamping, edge-replicating convolution that applies them.

/// Filter kernel catalog
pub mod kernels;

mod kernel;
pub use kernel::Kernel;

mod convolution;
pub use convolution::*;
