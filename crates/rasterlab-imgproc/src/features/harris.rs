//! Harris corner detection.
//!
//! The structure tensor is built from clamped Sobel gradients remapped to
//! signed values, its entries smoothed with a 5x5 Gaussian (sigma 1.5),
//! and the corner response
//!
//! R = det(M) - k * trace(M)^2
//!
//! is thresholded relative to its maximum. Pixels that pass and strictly
//! dominate their 3x3 neighborhood are painted red on a copy of the input.

use crate::color;
use crate::filter::{convolve, convolve_unclamped, kernels};
use rasterlab_image::{Image, ImageError};

/// Side of the Gaussian smoothing window for the structure tensor.
const WINDOW_SIDE: usize = 5;
const WINDOW_SIGMA: f64 = 1.5;

/// Detect corners with the Harris response and paint them red.
///
/// The output is a copy of the input with corner pixels set to
/// `(1, 0, 0, 1)`. A pixel is a corner when its response relative to the
/// maximum exceeds `threshold` and it is a strict maximum of its 3x3
/// neighborhood. When no response is positive the copy is returned
/// untouched.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output RGBA image.
/// * `k` - The Harris sensitivity, commonly 0.04 to 0.06. Must be positive.
/// * `threshold` - The relative response threshold in `(0, 1]`. Must be
///   positive.
///
/// # Errors
///
/// Returns an error if `k` or `threshold` is not positive, or if the
/// sizes of `src` and `dst` do not match.
pub fn harris(
    src: &Image<f64, 4>,
    dst: &mut Image<f64, 4>,
    k: f64,
    threshold: f64,
) -> Result<(), ImageError> {
    if k <= 0.0 {
        return Err(ImageError::InvalidParameter("k", k));
    }
    if threshold <= 0.0 {
        return Err(ImageError::InvalidParameter("threshold", threshold));
    }
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

    let mut ix = Image::from_size_val(src.size(), 0.0)?;
    convolve(&gray, &mut ix, &kernels::sobel_x())?;
    let mut iy = Image::from_size_val(src.size(), 0.0)?;
    convolve(&gray, &mut iy, &kernels::sobel_y())?;
    for v in ix.as_slice_mut() {
        *v = 2.0 * (*v - 0.5);
    }
    for v in iy.as_slice_mut() {
        *v = 2.0 * (*v - 0.5);
    }

    let ixx = Image::new(
        src.size(),
        ix.as_slice().iter().map(|v| v * v).collect(),
    )?;
    let iyy = Image::new(
        src.size(),
        iy.as_slice().iter().map(|v| v * v).collect(),
    )?;
    let ixy = Image::new(
        src.size(),
        ix.as_slice()
            .iter()
            .zip(iy.as_slice())
            .map(|(a, b)| a * b)
            .collect(),
    )?;

    let window = kernels::gaussian(WINDOW_SIDE, WINDOW_SIGMA)?;
    let mut sxx = Image::from_size_val(src.size(), 0.0)?;
    convolve_unclamped(&ixx, &mut sxx, &window)?;
    let mut syy = Image::from_size_val(src.size(), 0.0)?;
    convolve_unclamped(&iyy, &mut syy, &window)?;
    let mut sxy = Image::from_size_val(src.size(), 0.0)?;
    convolve_unclamped(&ixy, &mut sxy, &window)?;

    let mut response = Vec::with_capacity(src.cols() * src.rows());
    let mut max_response = f64::NEG_INFINITY;
    for ((a, b), c) in sxx
        .as_slice()
        .iter()
        .zip(sxy.as_slice())
        .zip(syy.as_slice())
    {
        let det = a * c - b * b;
        let trace = a + c;
        let r = det - k * trace * trace;
        max_response = max_response.max(r);
        response.push(r);
    }

    dst.as_slice_mut().copy_from_slice(src.as_slice());
    log::debug!("harris: max response {max_response}");
    if max_response <= 0.0 {
        return Ok(());
    }

    let cols = src.cols();
    let rows = src.rows();
    for y in 1..rows.saturating_sub(1) {
        for x in 1..cols.saturating_sub(1) {
            let r = response[y * cols + x];
            if r / max_response <= threshold {
                continue;
            }
            let is_corner = (-1i64..=1).all(|ky| {
                (-1i64..=1).all(|kx| {
                    if ky == 0 && kx == 0 {
                        return true;
                    }
                    let j = ((y as i64 + ky) * cols as i64 + x as i64 + kx) as usize;
                    response[j] < r
                })
            });
            if is_corner {
                let offset = (y * cols + x) * 4;
                let pixel = &mut dst.as_slice_mut()[offset..offset + 4];
                pixel[0] = 1.0;
                pixel[1] = 0.0;
                pixel[2] = 0.0;
                pixel[3] = 1.0;
            }
        }
    }

    Ok(())
}
