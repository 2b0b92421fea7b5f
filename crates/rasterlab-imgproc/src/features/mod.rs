//! Edge and corner detection.
//!
//! This module hosts the classical detectors of the workbench:
//!
//! - **Canny**: thin edges linked by hysteresis
//! - **Kirsch**: strongest response of the eight compass masks
//! - **Frei-Chen**: projection onto the edge subspace
//! - **Harris**: corner response of the smoothed structure tensor
//!
//! All detectors consume RGBA images, reduce them to the mean-gray plane
//! and run their gradients through the clamping convolution engine, so
//! their outputs match the step-by-step results of the workbench rather
//! than textbook floating-point renditions.

mod canny;
pub use canny::*;

mod frei_chen;
pub use frei_chen::*;

mod harris;
pub use harris::*;

mod kirsch;
pub use kirsch::*;
