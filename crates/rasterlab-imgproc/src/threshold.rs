use num_traits::Float;

use crate::parallel;
use rasterlab_image::{Image, ImageError};

/// Binarize an RGBA image against a threshold on its mean-gray intensity.
///
/// A pixel becomes pure white `(1, 1, 1, 1)` when `(R + G + B) / 3 >= tau`
/// and pure black `(0, 0, 0, 1)` otherwise. The output is exactly binary,
/// which the logical and morphological operators rely on.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output RGBA binary image.
/// * `tau` - The threshold in `[0, 1]`.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Example
///
/// ```
/// use rasterlab_image::{Image, ImageSize};
/// use rasterlab_imgproc::threshold::binarize;
///
/// let image = Image::<f64, 4>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![0.9, 0.9, 0.9, 0.3, 0.1, 0.1, 0.1, 1.0],
/// )
/// .unwrap();
///
/// let mut binary = Image::<f64, 4>::from_size_val(image.size(), 0.0).unwrap();
/// binarize(&image, &mut binary, 0.5).unwrap();
///
/// assert_eq!(binary.as_slice(), &[1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
/// ```
pub fn binarize<T>(src: &Image<T, 4>, dst: &mut Image<T, 4>, tau: T) -> Result<(), ImageError>
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

    let three = T::from(3.0).ok_or(ImageError::CastError)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let gray = (src_pixel[0] + src_pixel[1] + src_pixel[2]) / three;
        let v = if gray >= tau { T::one() } else { T::zero() };
        dst_pixel[0] = v;
        dst_pixel[1] = v;
        dst_pixel[2] = v;
        dst_pixel[3] = T::one();
    });

    Ok(())
}

/// True when every pixel of the image is exactly pure black or pure white
/// with alpha 1.
pub fn is_binary<T>(src: &Image<T, 4>) -> bool
where
    T: Float,
{
    src.as_slice().chunks_exact(4).all(|px| {
        px[3] == T::one()
            && ((px[0] == T::zero() && px[1] == T::zero() && px[2] == T::zero())
                || (px[0] == T::one() && px[1] == T::one() && px[2] == T::one()))
    })
}
