//! Kirsch compass edge detection.
//!
//! The grayscale plane is convolved with the eight Kirsch compass masks
//! and every pixel keeps the strongest response. The clamping engine
//! already floors each response at zero, so the maximum doubles as a
//! rectifier.

use crate::color;
use crate::filter::{convolve, kernels};
use rasterlab_image::{Image, ImageError};

/// Detect edges with the eight Kirsch compass masks.
///
/// The output is a gray RGBA image of the per-pixel maximum response,
/// with alpha 1.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output RGBA image.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Example
///
/// ```
/// use rasterlab_image::{Image, ImageSize};
/// use rasterlab_imgproc::features::kirsch_edges;
///
/// let image = Image::<f64, 4>::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 4,
///     },
///     0.0,
/// )
/// .unwrap();
/// let mut edges = Image::from_size_val(image.size(), 0.0).unwrap();
///
/// kirsch_edges(&image, &mut edges).unwrap();
/// ```
pub fn kirsch_edges(src: &Image<f64, 4>, dst: &mut Image<f64, 4>) -> Result<(), ImageError> {
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

    let mut best: Image<f64, 1> = Image::from_size_val(src.size(), 0.0)?;
    let mut response = Image::from_size_val(src.size(), 0.0)?;
    for direction in kernels::KirschDirection::ALL {
        convolve(&gray, &mut response, &kernels::kirsch(direction))?;
        for (b, r) in best.as_slice_mut().iter_mut().zip(response.as_slice()) {
            *b = b.max(*r);
        }
    }

    color::rgba_from_gray(&best, dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterlab_image::{Image, ImageError, ImageSize};

    #[test]
    fn vertical_step_lights_both_sides() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 6,
            height: 6,
        };
        let mut data = Vec::with_capacity(6 * 6 * 4);
        for _y in 0..6 {
            for x in 0..6 {
                let v = if x >= 3 { 1.0 } else { 0.0 };
                data.extend_from_slice(&[v, v, v, 1.0]);
            }
        }
        let image = Image::new(size, data)?;
        let mut edges = Image::from_size_val(size, 0.0)?;

        kirsch_edges(&image, &mut edges)?;

        // the east and west masks saturate on the two columns whose window
        // straddles the step; everywhere else every mask response cancels
        for y in 0..6 {
            for x in 0..6 {
                let expected = if x == 2 || x == 3 { 1.0 } else { 0.0 };
                assert_eq!(edges.get([y, x, 0]), Some(&expected), "({x}, {y})");
                assert_eq!(edges.get([y, x, 3]), Some(&1.0));
            }
        }

        Ok(())
    }

    #[test]
    fn flat_input_yields_black() -> Result<(), ImageError> {
        let image = Image::from_size_val(
            ImageSize {
                width: 5,
                height: 4,
            },
            0.5,
        )?;
        let mut edges = Image::from_size_val(image.size(), 0.0)?;

        kirsch_edges(&image, &mut edges)?;

        for px in edges.as_slice().chunks_exact(4) {
            assert_eq!(px, &[0.0, 0.0, 0.0, 1.0]);
        }

        Ok(())
    }

    #[test]
    fn horizontal_step_matches_vertical_by_symmetry() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 6,
            height: 6,
        };
        let mut data = Vec::with_capacity(6 * 6 * 4);
        for y in 0..6 {
            for _x in 0..6 {
                let v = if y >= 3 { 1.0 } else { 0.0 };
                data.extend_from_slice(&[v, v, v, 1.0]);
            }
        }
        let image = Image::new(size, data)?;
        let mut edges = Image::from_size_val(size, 0.0)?;

        kirsch_edges(&image, &mut edges)?;

        for y in 0..6 {
            for x in 0..6 {
                let expected = if y == 2 || y == 3 { 1.0 } else { 0.0 };
                assert_eq!(edges.get([y, x, 0]), Some(&expected), "({x}, {y})");
            }
        }

        Ok(())
    }
}
