//! Frei-Chen edge detection.
//!
//! Each 3x3 window is convolved with the nine Frei-Chen masks. The first
//! four span the edge subspace, and the detector reports how much of the
//! window's energy falls into it:
//!
//! rho = sqrt((g1^2 + .. + g4^2) / (g1^2 + .. + g9^2))
//!
//! Responses pass through the clamping convolution engine, so the
//! projection is taken on the rectified responses rather than the raw
//! inner products.

use crate::color;
use crate::filter::{convolve, kernels};
use rasterlab_image::{Image, ImageError};

/// Number of masks spanning the edge subspace.
const EDGE_MASKS: usize = 4;

/// Detect edges by projecting onto the Frei-Chen edge subspace.
///
/// The output is a gray RGBA image of the projection ratio `rho` in
/// `[0, 1]`, with alpha 1. Windows with no energy at all map to 0.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output RGBA image.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn frei_chen_edges(src: &Image<f64, 4>, dst: &mut Image<f64, 4>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let mut gray = Image::from_size_val(src.size(), 0.0)?;
    color::gray_from_rgba(src, &mut gray)?;

    let len = src.cols() * src.rows();
    let mut edge_energy = vec![0.0; len];
    let mut total_energy = vec![0.0; len];
    let mut response = Image::from_size_val(src.size(), 0.0)?;
    for (i, mask) in kernels::frei_chen().iter().enumerate() {
        convolve(&gray, &mut response, mask)?;
        for (j, g) in response.as_slice().iter().enumerate() {
            let energy = g * g;
            total_energy[j] += energy;
            if i < EDGE_MASKS {
                edge_energy[j] += energy;
            }
        }
    }

    let rho = Image::new(
        src.size(),
        edge_energy
            .iter()
            .zip(total_energy.iter())
            .map(|(&edge, &total)| if total > 0.0 { (edge / total).sqrt() } else { 0.0 })
            .collect(),
    )?;
    color::rgba_from_gray(&rho, dst)
}
