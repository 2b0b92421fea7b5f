#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color space conversions module.
pub mod color;

/// image enhancement module.
pub mod enhance;

/// edge and corner detection module.
pub mod features;

/// image filtering module.
pub mod filter;

/// histogram analysis and intensity transforms module.
pub mod histogram;

/// logical operations on binary images module.
pub mod logical;

/// binary morphology module.
pub mod morphology;

/// salt and pepper noise module.
pub mod noise;

/// module containing parallelization utilities.
pub mod parallel;

/// operations to threshold images.
pub mod threshold;

/// image geometric transformations module.
pub mod warp;
