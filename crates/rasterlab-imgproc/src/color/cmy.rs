use crate::parallel;
use rasterlab_image::{Image, ImageError};

/// Convert an RGBA image to the CMY color space:
///
/// C = 1 - R, M = 1 - G, Y = 1 - B
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output 3-channel CMY tensor.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use rasterlab_image::{Image, ImageSize};
/// use rasterlab_imgproc::color::cmy_from_rgb;
///
/// let image = Image::<f64, 4>::new(
///     ImageSize {
///         width: 1,
///         height: 1,
///     },
///     vec![1.0, 0.0, 0.5, 1.0],
/// )
/// .unwrap();
///
/// let mut cmy = Image::<f64, 3>::from_size_val(image.size(), 0.0).unwrap();
/// cmy_from_rgb(&image, &mut cmy).unwrap();
///
/// assert_eq!(cmy.as_slice(), &[0.0, 1.0, 0.5]);
/// ```
pub fn cmy_from_rgb(src: &Image<f64, 4>, dst: &mut Image<f64, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = 1.0 - src_pixel[0];
        dst_pixel[1] = 1.0 - src_pixel[1];
        dst_pixel[2] = 1.0 - src_pixel[2];
    });

    Ok(())
}

/// Convert an RGBA image to the CMYK color space.
///
/// K = 1 - max(R, G, B); when K < 1 the chromatic inks are
/// C = (1 - R - K) / (1 - K) (same for M and Y), otherwise they are 0.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output 4-channel CMYK tensor.
///
/// Precondition: the input and output images must have the same size.
pub fn cmyk_from_rgb(src: &Image<f64, 4>, dst: &mut Image<f64, 4>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0];
        let g = src_pixel[1];
        let b = src_pixel[2];

        let k = 1.0 - r.max(g).max(b);
        if k < 1.0 {
            dst_pixel[0] = (1.0 - r - k) / (1.0 - k);
            dst_pixel[1] = (1.0 - g - k) / (1.0 - k);
            dst_pixel[2] = (1.0 - b - k) / (1.0 - k);
        } else {
            // pure black carries no chromatic ink
            dst_pixel[0] = 0.0;
            dst_pixel[1] = 0.0;
            dst_pixel[2] = 0.0;
        }
        dst_pixel[3] = k;
    });

    Ok(())
}

/// Reconstruct an RGBA display image from a CMY tensor (R = 1 - C, clamped).
///
/// # Arguments
///
/// * `src` - The input 3-channel CMY tensor.
/// * `dst` - The output RGBA image with alpha 1.
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_cmy(src: &Image<f64, 3>, dst: &mut Image<f64, 4>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = (1.0 - src_pixel[0]).clamp(0.0, 1.0);
        dst_pixel[1] = (1.0 - src_pixel[1]).clamp(0.0, 1.0);
        dst_pixel[2] = (1.0 - src_pixel[2]).clamp(0.0, 1.0);
        dst_pixel[3] = 1.0;
    });

    Ok(())
}

/// Reconstruct an RGBA display image from a CMYK tensor
/// (R = (1 - C) * (1 - K), clamped).
///
/// # Arguments
///
/// * `src` - The input 4-channel CMYK tensor.
/// * `dst` - The output RGBA image with alpha 1.
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_cmyk(src: &Image<f64, 4>, dst: &mut Image<f64, 4>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let k = src_pixel[3];
        dst_pixel[0] = ((1.0 - src_pixel[0]) * (1.0 - k)).clamp(0.0, 1.0);
        dst_pixel[1] = ((1.0 - src_pixel[1]) * (1.0 - k)).clamp(0.0, 1.0);
        dst_pixel[2] = ((1.0 - src_pixel[2]) * (1.0 - k)).clamp(0.0, 1.0);
        dst_pixel[3] = 1.0;
    });

    Ok(())
}
