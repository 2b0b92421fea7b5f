//! Radix-2 Cooley-Tukey transforms over square power-of-two images.
//!
//! The forward pass loads the mean-gray plane rescaled to `[0, 255]` as the
//! real parts of a [`FrequencyGrid`] and runs a decimation-in-time transform
//! along rows and then columns with twiddle `exp(-2*pi*i*k/n)`. The inverse
//! reuses the forward kernel by conjugating around it and dividing by the
//! side once per pass.

use num_complex::Complex64;
use rasterlab_image::{Image, ImageError, ImageSize};
use rasterlab_imgproc::color;
use std::f64::consts::PI;

use crate::error::FourierError;

/// Square grid of complex frequency samples produced by [`forward`].
#[derive(Clone, Debug)]
pub struct FrequencyGrid {
    side: usize,
    data: Vec<Complex64>,
}

impl FrequencyGrid {
    /// Side of the square grid.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Frequency samples in row-major order, `side * side` in total.
    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }
}

/// Compute the forward 2-D FFT of an RGBA image.
///
/// The image is reduced to its mean-gray plane and the intensities are
/// rescaled to `[0, 255]` before loading them as real parts.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
///
/// Precondition: the image must be square with a side that is a positive
/// power of two.
///
/// # Examples
///
/// ```
/// let image = rasterlab_image::generator::sinusoid().unwrap();
/// let grid = rasterlab_fourier::fft::forward(&image).unwrap();
///
/// assert_eq!(grid.side(), 256);
/// ```
pub fn forward(src: &Image<f64, 4>) -> Result<FrequencyGrid, FourierError> {
    let side = grid_side(src.size())?;

    let mut gray = Image::from_size_val(src.size(), 0.0)?;
    color::gray_from_rgba(src, &mut gray)?;

    let mut data = gray
        .into_vec()
        .into_iter()
        .map(|v| Complex64::new(v * 255.0, 0.0))
        .collect::<Vec<_>>();

    for row in data.chunks_exact_mut(side) {
        fft_in_place(row);
    }
    transform_columns(&mut data, side, fft_in_place);

    Ok(FrequencyGrid { side, data })
}

/// Reconstruct the grayscale image of a frequency grid.
///
/// Each pass conjugates, runs the forward transform and conjugates again,
/// dividing by the side once per pass so the grid is scaled down by
/// `side * side` in total. Real parts are rounded, clamped to `[0, 255]`
/// and rendered as a gray RGBA image.
///
/// # Arguments
///
/// * `grid` - The input frequency grid.
/// * `dst` - The output RGBA image, sized `side x side`.
///
/// Precondition: the output sides must both equal the grid side.
pub fn inverse(grid: &FrequencyGrid, dst: &mut Image<f64, 4>) -> Result<(), FourierError> {
    if grid.side != dst.cols() || grid.side != dst.rows() {
        return Err(
            ImageError::InvalidImageSize(grid.side, grid.side, dst.cols(), dst.rows()).into(),
        );
    }

    let mut data = grid.data.clone();
    for row in data.chunks_exact_mut(grid.side) {
        inverse_pass(row);
    }
    transform_columns(&mut data, grid.side, inverse_pass);

    let levels = data
        .iter()
        .map(|z| z.re.round().clamp(0.0, 255.0) / 255.0)
        .collect::<Vec<_>>();
    let gray = Image::new(dst.size(), levels)?;
    color::rgba_from_gray(&gray, dst)?;

    Ok(())
}

fn grid_side(size: ImageSize) -> Result<usize, FourierError> {
    if size.width != size.height {
        return Err(FourierError::NotSquare(size.width, size.height));
    }
    if !size.width.is_power_of_two() {
        return Err(FourierError::NotPowerOfTwo(size.width));
    }
    Ok(size.width)
}

/// In-place radix-2 decimation in time; the length must be a power of two.
fn fft_in_place(buf: &mut [Complex64]) {
    let n = buf.len();
    if n < 2 {
        return;
    }

    // Bit-reversal permutation.
    let mut target = 0usize;
    for index in 1..n {
        let mut bit = n >> 1;
        while target & bit != 0 {
            target ^= bit;
            bit >>= 1;
        }
        target |= bit;
        if index < target {
            buf.swap(index, target);
        }
    }

    let mut len = 2;
    while len <= n {
        let twiddle_step = Complex64::from_polar(1.0, -2.0 * PI / len as f64);
        for chunk in buf.chunks_exact_mut(len) {
            let mut twiddle = Complex64::new(1.0, 0.0);
            let (lower, upper) = chunk.split_at_mut(len / 2);
            for (even, odd) in lower.iter_mut().zip(upper.iter_mut()) {
                let product = *odd * twiddle;
                *odd = *even - product;
                *even += product;
                twiddle *= twiddle_step;
            }
        }
        len <<= 1;
    }
}

/// One inverse pass: conjugate, forward transform, conjugate, divide by the
/// length.
fn inverse_pass(buf: &mut [Complex64]) {
    let scale = buf.len() as f64;
    for value in buf.iter_mut() {
        *value = value.conj();
    }
    fft_in_place(buf);
    for value in buf.iter_mut() {
        *value = value.conj() / scale;
    }
}

fn transform_columns(data: &mut [Complex64], side: usize, pass: fn(&mut [Complex64])) {
    let mut column = vec![Complex64::new(0.0, 0.0); side];
    for x in 0..side {
        for (y, value) in column.iter_mut().enumerate() {
            *value = data[y * side + x];
        }
        pass(&mut column);
        for (y, value) in column.iter().enumerate() {
            data[y * side + x] = *value;
        }
    }
}
