use num_traits::Float;

use crate::parallel;
use rasterlab_image::{Image, ImageError};

/// Adjust the brightness of an RGBA image:
///
/// dst(x,y,c) = clamp(src(x,y,c) + beta, 0, 1)
///
/// for the color channels; alpha is preserved. The workbench host drives
/// `beta` from a slider over `[-1, 1]`.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output RGBA image.
/// * `beta` - The brightness offset added to each color channel.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Example
///
/// ```
/// use rasterlab_image::{Image, ImageSize};
/// use rasterlab_imgproc::enhance::adjust_brightness;
///
/// let image = Image::<f64, 4>::new(
///     ImageSize {
///         width: 1,
///         height: 1,
///     },
///     vec![0.7, 0.2, 0.9, 1.0],
/// )
/// .unwrap();
///
/// let mut bright = Image::<f64, 4>::from_size_val(image.size(), 0.0).unwrap();
/// adjust_brightness(&image, &mut bright, 0.5).unwrap();
///
/// assert_eq!(bright.as_slice(), &[1.0, 0.7, 1.0, 1.0]);
/// ```
pub fn adjust_brightness<T>(
    src: &Image<T, 4>,
    dst: &mut Image<T, 4>,
    beta: T,
) -> Result<(), ImageError>
where
    T: Float + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = (src_pixel[0] + beta).clamp(T::zero(), T::one());
        dst_pixel[1] = (src_pixel[1] + beta).clamp(T::zero(), T::one());
        dst_pixel[2] = (src_pixel[2] + beta).clamp(T::zero(), T::one());
        dst_pixel[3] = src_pixel[3];
    });

    Ok(())
}

/// Adjust the contrast of an RGBA image around the mid intensity:
///
/// dst(x,y,c) = clamp((src(x,y,c) - 0.5) * gamma + 0.5, 0, 1)
///
/// for the color channels; alpha is preserved. The workbench host drives
/// `gamma` from a slider over `[0.1, 3.0]`.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output RGBA image.
/// * `gamma` - The contrast gain around 0.5.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn adjust_contrast<T>(
    src: &Image<T, 4>,
    dst: &mut Image<T, 4>,
    gamma: T,
) -> Result<(), ImageError>
where
    T: Float + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let half = T::from(0.5).ok_or(ImageError::CastError)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = ((src_pixel[0] - half) * gamma + half).clamp(T::zero(), T::one());
        dst_pixel[1] = ((src_pixel[1] - half) * gamma + half).clamp(T::zero(), T::one());
        dst_pixel[2] = ((src_pixel[2] - half) * gamma + half).clamp(T::zero(), T::one());
        dst_pixel[3] = src_pixel[3];
    });

    Ok(())
}
