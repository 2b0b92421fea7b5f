//! Canny edge detection.
//!
//! The pipeline follows the classic five stages:
//!
//! 1. Gaussian blur (5x5, sigma 1.4) through the clamping convolution.
//! 2. Sobel gradients through the same engine; the stored `[0, 1]`
//!    intensities are remapped to signed values with `2 * (v - 0.5)`.
//! 3. Gradient magnitude, normalized by its maximum, and orientation.
//! 4. Non-maximum suppression along the quantized gradient direction.
//! 5. Double threshold into a three-state buffer followed by hysteresis:
//!    weak pixels survive only next to a strong one.

use rayon::prelude::*;

use crate::color;
use crate::filter::{convolve, kernels};
use rasterlab_image::{Image, ImageError};

/// Pixel states after the double threshold.
const STATE_NONE: u8 = 0;
const STATE_WEAK: u8 = 1;
const STATE_STRONG: u8 = 2;

/// Detect edges with the Canny detector.
///
/// The thresholds are expressed on the 8-bit scale `[0, 255]` and applied
/// as fractions of 255 to the normalized gradient magnitudes. The output
/// is a binary RGBA image, white on detected edges.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output binary RGBA image.
/// * `low` - The weak-edge threshold in `[0, 255]`.
/// * `high` - The strong-edge threshold in `[0, 255]`, above `low`.
///
/// # Errors
///
/// Returns an error if `low >= high` or if the sizes of `src` and `dst`
/// do not match.
pub fn canny(
    src: &Image<f64, 4>,
    dst: &mut Image<f64, 4>,
    low: f64,
    high: f64,
) -> Result<(), ImageError> {
    if low >= high {
        return Err(ImageError::InvalidParameter("low", low));
    }
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let cols = src.cols();
    let rows = src.rows();
    if cols == 0 || rows == 0 {
        return Ok(());
    }

    let mut gray = Image::from_size_val(src.size(), 0.0)?;
    color::gray_from_rgba(src, &mut gray)?;
    let mut blurred = Image::from_size_val(gray.size(), 0.0)?;
    convolve(&gray, &mut blurred, &kernels::gaussian(5, 1.4)?)?;

    let mut gx = Image::from_size_val(gray.size(), 0.0)?;
    convolve(&blurred, &mut gx, &kernels::sobel_x())?;
    let mut gy = Image::from_size_val(gray.size(), 0.0)?;
    convolve(&blurred, &mut gy, &kernels::sobel_y())?;

    // remap the clamped Sobel intensities to signed gradients
    let mut magnitude = vec![0.0; cols * rows];
    let mut direction = vec![0.0; cols * rows];
    let mut max_magnitude = 0.0f64;
    for (i, (gx_v, gy_v)) in gx
        .as_slice()
        .iter()
        .zip(gy.as_slice().iter())
        .enumerate()
    {
        let gx_s = (gx_v - 0.5) * 2.0;
        let gy_s = (gy_v - 0.5) * 2.0;
        magnitude[i] = (gx_s * gx_s + gy_s * gy_s).sqrt();
        direction[i] = gy_s.atan2(gx_s);
        max_magnitude = max_magnitude.max(magnitude[i]);
    }
    log::debug!("canny: max gradient magnitude {max_magnitude}");
    if max_magnitude > 0.0 {
        for m in &mut magnitude {
            *m /= max_magnitude;
        }
    }

    let suppressed = non_maximum_suppression(&magnitude, &direction, cols, rows);
    let states = double_threshold(&suppressed, low / 255.0, high / 255.0);
    let edges = hysteresis(&states, cols, rows);

    dst.as_slice_mut()
        .par_chunks_exact_mut(4 * cols)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for (x, dst_pixel) in dst_row.chunks_exact_mut(4).enumerate() {
                let v = if edges[y * cols + x] { 1.0 } else { 0.0 };
                dst_pixel[0] = v;
                dst_pixel[1] = v;
                dst_pixel[2] = v;
                dst_pixel[3] = 1.0;
            }
        });

    Ok(())
}

/// Keep only pixels that dominate their two neighbors along the gradient.
///
/// The direction is quantized into four bins; border pixels are zeroed.
fn non_maximum_suppression(
    magnitude: &[f64],
    direction: &[f64],
    cols: usize,
    rows: usize,
) -> Vec<f64> {
    let mut result = vec![0.0; cols * rows];
    if rows < 3 || cols < 3 {
        return result;
    }

    for y in 1..rows - 1 {
        for x in 1..cols - 1 {
            let i = y * cols + x;
            let mut angle = direction[i].to_degrees();
            if angle < 0.0 {
                angle += 180.0;
            }

            let (q, r) = if !(22.5..157.5).contains(&angle) {
                // east/west
                (magnitude[i + 1], magnitude[i - 1])
            } else if angle < 67.5 {
                // north-east/south-west
                (magnitude[i + cols - 1], magnitude[i - cols + 1])
            } else if angle < 112.5 {
                // north/south
                (magnitude[i + cols], magnitude[i - cols])
            } else {
                // north-west/south-east
                (magnitude[i - cols - 1], magnitude[i + cols + 1])
            };

            if magnitude[i] >= q && magnitude[i] >= r {
                result[i] = magnitude[i];
            }
        }
    }
    result
}

/// Classify suppressed magnitudes into none, weak and strong states.
fn double_threshold(suppressed: &[f64], low: f64, high: f64) -> Vec<u8> {
    suppressed
        .iter()
        .map(|&v| {
            if v >= high {
                STATE_STRONG
            } else if v >= low {
                STATE_WEAK
            } else {
                STATE_NONE
            }
        })
        .collect()
}

/// Resolve weak pixels: keep them only when an 8-neighbor is strong.
///
/// Weak pixels on the border collapse to black.
fn hysteresis(states: &[u8], cols: usize, rows: usize) -> Vec<bool> {
    let mut edges: Vec<bool> = states.iter().map(|&s| s == STATE_STRONG).collect();
    if rows < 3 || cols < 3 {
        return edges;
    }

    for y in 1..rows - 1 {
        for x in 1..cols - 1 {
            let i = y * cols + x;
            if states[i] != STATE_WEAK {
                continue;
            }
            let promoted = (-1i64..=1).any(|ky| {
                (-1i64..=1).any(|kx| {
                    let j = ((y as i64 + ky) * cols as i64 + x as i64 + kx) as usize;
                    states[j] == STATE_STRONG
                })
            });
            if promoted {
                edges[i] = true;
            }
        }
    }
    edges
}
