use rayon::prelude::*;

use super::Kernel;
use crate::color;
use crate::parallel;
use rasterlab_image::{Image, ImageError};

/// Accumulate the kernel response at a pixel with edge replication.
fn response(
    data: &[f64],
    cols: usize,
    rows: usize,
    x: usize,
    y: usize,
    kernel: &Kernel,
) -> f64 {
    let side = kernel.side();
    let half = kernel.half() as i64;
    let mut sum = 0.0;
    for ky in 0..side {
        let py = (y as i64 + ky as i64 - half).clamp(0, rows as i64 - 1) as usize;
        for kx in 0..side {
            let px = (x as i64 + kx as i64 - half).clamp(0, cols as i64 - 1) as usize;
            sum += data[py * cols + px] * kernel.get(ky, kx);
        }
    }
    sum
}

/// Convolve a grayscale image, clamping each response to `[0, 1]`.
///
/// Out-of-bounds samples replicate the nearest edge pixel, so the output
/// has the same size as the input. Rows are processed in parallel; each
/// response is a fixed-order serial sum, so results match the sequential
/// loop bit for bit.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output grayscale image.
/// * `kernel` - The square convolution kernel.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Example
///
/// ```
/// use rasterlab_image::{Image, ImageSize};
/// use rasterlab_imgproc::filter::{convolve, Kernel};
///
/// let image = Image::<f64, 1>::new(
///     ImageSize {
///         width: 3,
///         height: 1,
///     },
///     vec![0.0, 0.6, 0.0],
/// )
/// .unwrap();
///
/// let identity = Kernel::from_3x3([0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
/// let mut out = Image::<f64, 1>::from_size_val(image.size(), 0.0).unwrap();
/// convolve(&image, &mut out, &identity).unwrap();
///
/// assert_eq!(out.as_slice(), image.as_slice());
/// ```
pub fn convolve(
    src: &Image<f64, 1>,
    dst: &mut Image<f64, 1>,
    kernel: &Kernel,
) -> Result<(), ImageError> {
    convolve_with(src, dst, kernel, |sum| sum.clamp(0.0, 1.0))
}

/// Convolve a grayscale image without clamping the responses.
///
/// Same edge replication and traversal as [`convolve`], but raw sums are
/// written out. Used where signed or unbounded responses feed later
/// arithmetic, such as windowed gradient products.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn convolve_unclamped(
    src: &Image<f64, 1>,
    dst: &mut Image<f64, 1>,
    kernel: &Kernel,
) -> Result<(), ImageError> {
    convolve_with(src, dst, kernel, |sum| sum)
}

fn convolve_with(
    src: &Image<f64, 1>,
    dst: &mut Image<f64, 1>,
    kernel: &Kernel,
    finish: impl Fn(f64) -> f64 + Send + Sync,
) -> Result<(), ImageError> {
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
    let data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for (x, out) in dst_row.iter_mut().enumerate() {
                *out = finish(response(data, cols, rows, x, y, kernel));
            }
        });

    Ok(())
}

/// Convolve an RGBA image through its grayscale plane.
///
/// The input is reduced to the mean of its color channels, convolved with
/// [`convolve`] and rendered back as a gray RGBA image with alpha 1.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output RGBA image.
/// * `kernel` - The square convolution kernel.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn filter_rgba(
    src: &Image<f64, 4>,
    dst: &mut Image<f64, 4>,
    kernel: &Kernel,
) -> Result<(), ImageError> {
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
    let mut filtered = Image::from_size_val(gray.size(), 0.0)?;
    convolve(&gray, &mut filtered, kernel)?;

    parallel::par_iter_rows(&filtered, dst, |src_pixel, dst_pixel| {
        let v = src_pixel[0];
        dst_pixel[0] = v;
        dst_pixel[1] = v;
        dst_pixel[2] = v;
        dst_pixel[3] = 1.0;
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::kernels;
    use rasterlab_image::{Image, ImageError, ImageSize};

    fn identity3() -> Kernel {
        Kernel::from_3x3([0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0])
    }

    fn ramp4x4() -> Result<Image<f64, 1>, ImageError> {
        Image::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            (0..16).map(|i| i as f64 / 15.0).collect(),
        )
    }

    #[test]
    fn identity_kernel_returns_input() -> Result<(), ImageError> {
        let image = ramp4x4()?;
        let mut out = Image::from_size_val(image.size(), 0.0)?;

        convolve(&image, &mut out, &identity3())?;

        assert_eq!(out.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn responses_clamp_to_unit_range() -> Result<(), ImageError> {
        let image = Image::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![0.9, 0.9, 0.1],
        )?;

        // a gain kernel overshoots, a negating kernel undershoots
        let gain = Kernel::from_3x3([0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0]);
        let negate = Kernel::from_3x3([0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0]);

        let mut out = Image::from_size_val(image.size(), 0.0)?;
        convolve(&image, &mut out, &gain)?;
        assert_eq!(out.as_slice(), &[1.0, 1.0, 0.2]);

        convolve(&image, &mut out, &negate)?;
        assert_eq!(out.as_slice(), &[0.0, 0.0, 0.0]);

        let mut raw = Image::from_size_val(image.size(), 0.0)?;
        convolve_unclamped(&image, &mut raw, &negate)?;
        assert_eq!(raw.as_slice(), &[-0.9, -0.9, -0.1]);

        Ok(())
    }

    #[test]
    fn edges_replicate_the_border() -> Result<(), ImageError> {
        let image = Image::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![1.0, 0.0],
        )?;

        // horizontal mean over three samples
        let kernel = Kernel::from_3x3([
            0.0,
            0.0,
            0.0,
            1.0 / 3.0,
            1.0 / 3.0,
            1.0 / 3.0,
            0.0,
            0.0,
            0.0,
        ]);

        let mut out = Image::from_size_val(image.size(), 0.0)?;
        convolve(&image, &mut out, &kernel)?;

        // x = 0 samples (1, 1, 0), x = 1 samples (1, 0, 0)
        approx::assert_relative_eq!(out.as_slice()[0], 2.0 / 3.0, epsilon = 1e-12);
        approx::assert_relative_eq!(out.as_slice()[1], 1.0 / 3.0, epsilon = 1e-12);

        Ok(())
    }

    #[test]
    fn mean_kernel_cannot_increase_variance() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 8,
            height: 8,
        };
        let image = Image::new(
            size,
            (0..64).map(|i| ((i * 37) % 64) as f64 / 63.0).collect(),
        )?;

        let variance = |img: &Image<f64, 1>| {
            let n = img.as_slice().len() as f64;
            let mean = img.as_slice().iter().sum::<f64>() / n;
            img.as_slice().iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
        };

        let v0 = variance(&image);
        let mut prev = v0;
        for side in [3, 5, 7] {
            let mut out = Image::from_size_val(size, 0.0)?;
            convolve(&image, &mut out, &kernels::mean(side)?)?;
            let v = variance(&out);
            assert!(v <= prev + 1e-12, "variance grew for side {side}");
            prev = v;
        }

        Ok(())
    }

    #[test]
    fn rgba_wrapper_grays_and_filters() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![
                0.3, 0.6, 0.9, 0.5,
                0.0, 0.0, 0.0, 1.0,
            ],
        )?;

        let mut out = Image::from_size_val(image.size(), 0.0)?;
        filter_rgba(&image, &mut out, &identity3())?;

        let px = out.as_slice();
        approx::assert_relative_eq!(px[0], 0.6, epsilon = 1e-12);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[0], px[2]);
        assert_eq!(px[3], 1.0);
        assert_eq!(&px[4..8], &[0.0, 0.0, 0.0, 1.0]);

        Ok(())
    }
}
