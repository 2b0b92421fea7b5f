use rayon::prelude::*;

use rasterlab_image::{Image, ImageError};

/// Resample `dst` from `src` through an inverse coordinate map.
///
/// The map takes destination coordinates and returns the source position
/// to sample. Samples are taken with round-to-nearest; positions whose
/// rounded coordinate falls outside the source become fully transparent.
fn warp_inverse(
    src: &Image<f64, 4>,
    dst: &mut Image<f64, 4>,
    map: impl Fn(f64, f64) -> (f64, f64) + Send + Sync,
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
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(4 * cols)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for (x, dst_pixel) in dst_row.chunks_exact_mut(4).enumerate() {
                let (u, v) = map(x as f64, y as f64);
                let xi = u.round() as i64;
                let yi = v.round() as i64;
                if xi >= 0 && (xi as usize) < cols && yi >= 0 && (yi as usize) < rows {
                    let offset = (yi as usize * cols + xi as usize) * 4;
                    dst_pixel.copy_from_slice(&src_data[offset..offset + 4]);
                } else {
                    dst_pixel.fill(0.0);
                }
            }
        });

    Ok(())
}

/// Translate an image by `(tx, ty)` pixels.
///
/// Destination pixel `(x, y)` samples source `(x - tx, y - ty)` with
/// round-to-nearest; pixels that map outside the source are fully
/// transparent. The output size equals the input size.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output RGBA image.
/// * `tx` - Horizontal shift in pixels.
/// * `ty` - Vertical shift in pixels.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Example
///
/// ```
/// use rasterlab_image::{Image, ImageSize};
/// use rasterlab_imgproc::warp::translate;
///
/// let image = Image::<f64, 4>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![0.3, 0.3, 0.3, 1.0, 0.6, 0.6, 0.6, 1.0],
/// )
/// .unwrap();
///
/// let mut shifted = Image::<f64, 4>::from_size_val(image.size(), 0.0).unwrap();
/// translate(&image, &mut shifted, 1.0, 0.0).unwrap();
///
/// // the uncovered left column is transparent, the right one is the old left
/// assert_eq!(&shifted.as_slice()[0..4], &[0.0, 0.0, 0.0, 0.0]);
/// assert_eq!(&shifted.as_slice()[4..8], &[0.3, 0.3, 0.3, 1.0]);
/// ```
pub fn translate(
    src: &Image<f64, 4>,
    dst: &mut Image<f64, 4>,
    tx: f64,
    ty: f64,
) -> Result<(), ImageError> {
    warp_inverse(src, dst, |x, y| (x - tx, y - ty))
}

/// Rotate an image by `angle` degrees around its center `(w/2, h/2)`.
///
/// The forward rotation matrix is used as the sampling map, so the visible
/// motion corresponds to `-angle` under the usual mathematical convention;
/// rotating by `angle` and then by `-angle` restores the interior of the
/// image. Samples use round-to-nearest and out-of-source positions become
/// fully transparent.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output RGBA image.
/// * `angle` - The rotation angle in degrees.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn rotate(src: &Image<f64, 4>, dst: &mut Image<f64, 4>, angle: f64) -> Result<(), ImageError> {
    let (sin, cos) = angle.to_radians().sin_cos();
    let cx = src.cols() as f64 / 2.0;
    let cy = src.rows() as f64 / 2.0;

    warp_inverse(src, dst, |x, y| {
        let x0 = x - cx;
        let y0 = y - cy;
        (x0 * cos - y0 * sin + cx, x0 * sin + y0 * cos + cy)
    })
}

/// Scale an image by `(sx, sy)` about its center.
///
/// Destination pixel `(x, y)` samples source
/// `((x - cx)/sx + cx, (y - cy)/sy + cy)` with round-to-nearest, so factors
/// above 1 zoom in and factors below 1 zoom out with a transparent border.
/// The output size equals the input size.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output RGBA image.
/// * `sx` - Horizontal scale factor, non-zero.
/// * `sy` - Vertical scale factor, non-zero.
///
/// # Errors
///
/// Returns an error if either factor is zero or if the sizes of `src` and
/// `dst` do not match.
pub fn scale(
    src: &Image<f64, 4>,
    dst: &mut Image<f64, 4>,
    sx: f64,
    sy: f64,
) -> Result<(), ImageError> {
    if sx == 0.0 {
        return Err(ImageError::InvalidParameter("sx", sx));
    }
    if sy == 0.0 {
        return Err(ImageError::InvalidParameter("sy", sy));
    }

    let cx = src.cols() as f64 / 2.0;
    let cy = src.rows() as f64 / 2.0;

    warp_inverse(src, dst, |x, y| ((x - cx) / sx + cx, (y - cy) / sy + cy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterlab_image::{Image, ImageError, ImageSize};

    fn ramp3x3() -> Result<Image<f64, 4>, ImageError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let mut data = Vec::with_capacity(3 * 3 * 4);
        for i in 0..9 {
            let v = i as f64 / 10.0;
            data.extend_from_slice(&[v, v, v, 1.0]);
        }
        Image::new(size, data)
    }

    #[test]
    fn translate_shifts_and_clears() -> Result<(), ImageError> {
        let image = ramp3x3()?;
        let mut shifted = Image::from_size_val(image.size(), 0.5)?;

        translate(&image, &mut shifted, 1.0, 1.0)?;

        // the first row and column fall outside the source
        for x in 0..3 {
            assert_eq!(shifted.get([0, x, 3]), Some(&0.0));
        }
        assert_eq!(shifted.get([1, 0, 3]), Some(&0.0));
        // interior pixels move by one in each axis
        assert_eq!(shifted.get([1, 1, 0]), Some(&0.0));
        assert_eq!(shifted.get([2, 2, 0]), Some(&0.4));

        Ok(())
    }

    #[test]
    fn translate_zero_is_identity() -> Result<(), ImageError> {
        let image = ramp3x3()?;
        let mut out = Image::from_size_val(image.size(), 0.0)?;

        translate(&image, &mut out, 0.0, 0.0)?;

        assert_eq!(out.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn rotate_full_turn_is_identity() -> Result<(), ImageError> {
        let image = ramp3x3()?;
        let mut out = Image::from_size_val(image.size(), 0.0)?;

        rotate(&image, &mut out, 360.0)?;

        assert_eq!(out.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn rotate_quarter_turn_layout() -> Result<(), ImageError> {
        let image = ramp3x3()?;
        let mut out = Image::from_size_val(image.size(), 0.0)?;

        rotate(&image, &mut out, 90.0)?;

        // the sampling map pushes the top row out of the source
        for x in 0..3 {
            assert_eq!(out.get([0, x, 3]), Some(&0.0));
        }
        // remaining rows sample the right columns of the source
        assert_eq!(out.get([1, 0, 0]), Some(&0.2));
        assert_eq!(out.get([1, 1, 0]), Some(&0.5));
        assert_eq!(out.get([1, 2, 0]), Some(&0.8));
        assert_eq!(out.get([2, 0, 0]), Some(&0.1));
        assert_eq!(out.get([2, 1, 0]), Some(&0.4));
        assert_eq!(out.get([2, 2, 0]), Some(&0.7));

        Ok(())
    }

    #[test]
    fn rotate_there_and_back_restores_interior() -> Result<(), ImageError> {
        let image = ramp3x3()?;
        let mut rotated = Image::from_size_val(image.size(), 0.0)?;
        rotate(&image, &mut rotated, 30.0)?;
        let mut restored = Image::from_size_val(image.size(), 0.0)?;
        rotate(&rotated, &mut restored, -30.0)?;

        // the center pixel never leaves the source domain
        assert_eq!(restored.get([1, 1, 0]), image.get([1, 1, 0]));

        Ok(())
    }

    #[test]
    fn scale_keeps_center_fixed() -> Result<(), ImageError> {
        let image = ramp3x3()?;
        let mut out = Image::from_size_val(image.size(), 0.0)?;

        scale(&image, &mut out, 2.0, 2.0)?;

        // (x - 1.5) / 2 + 1.5 keeps the central pixel close to itself
        assert_eq!(out.get([1, 1, 0]), Some(&0.4));

        Ok(())
    }

    #[test]
    fn scale_rejects_zero_factor() -> Result<(), ImageError> {
        let image = ramp3x3()?;
        let mut out = Image::from_size_val(image.size(), 0.0)?;

        assert!(matches!(
            scale(&image, &mut out, 0.0, 1.0),
            Err(ImageError::InvalidParameter("sx", _))
        ));
        assert!(matches!(
            scale(&image, &mut out, 1.0, 0.0),
            Err(ImageError::InvalidParameter("sy", _))
        ));

        Ok(())
    }
}
