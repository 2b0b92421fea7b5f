use crate::parallel;
use rasterlab_image::{Image, ImageError};

/// RGB weights of the BT.601 luminance.
const RW: f64 = 0.299;
const GW: f64 = 0.587;
const BW: f64 = 0.114;

/// Convert an RGBA image to its grayscale render using the channel mean:
///
/// gray = (R + G + B) / 3
///
/// All three color channels of the output carry the mean; alpha is preserved.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output RGBA image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use rasterlab_image::{Image, ImageSize};
/// use rasterlab_imgproc::color::grayscale;
///
/// let image = Image::<f64, 4>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0.0; 4 * 5 * 4],
/// )
/// .unwrap();
///
/// let mut gray = Image::<f64, 4>::from_size_val(image.size(), 0.0).unwrap();
///
/// grayscale(&image, &mut gray).unwrap();
/// assert_eq!(gray.num_channels(), 4);
/// assert_eq!(gray.size().width, 4);
/// assert_eq!(gray.size().height, 5);
/// ```
pub fn grayscale<T>(src: &Image<T, 4>, dst: &mut Image<T, 4>) -> Result<(), ImageError>
where
    T: Send + Sync + num_traits::Float,
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
        dst_pixel[0] = gray;
        dst_pixel[1] = gray;
        dst_pixel[2] = gray;
        dst_pixel[3] = src_pixel[3];
    });

    Ok(())
}

/// Extract the mean-gray intensity plane of an RGBA image.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output single-channel intensity plane.
///
/// Precondition: the input and output images must have the same size.
pub fn gray_from_rgba<T>(src: &Image<T, 4>, dst: &mut Image<T, 1>) -> Result<(), ImageError>
where
    T: Send + Sync + num_traits::Float,
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
        dst_pixel[0] = (src_pixel[0] + src_pixel[1] + src_pixel[2]) / three;
    });

    Ok(())
}

/// Extract the BT.601 luminance plane of an RGBA image, quantized to 8 bits:
///
/// Y = floor(255 * (0.299 * R + 0.587 * G + 0.114 * B)) / 255
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output single-channel luminance plane.
///
/// Precondition: the input and output images must have the same size.
pub fn luma601_from_rgba(src: &Image<f64, 4>, dst: &mut Image<f64, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let y = RW * src_pixel[0] + GW * src_pixel[1] + BW * src_pixel[2];
        dst_pixel[0] = (255.0 * y).floor().clamp(0.0, 255.0) / 255.0;
    });

    Ok(())
}

/// Render a single-channel plane as an RGBA image by replicating the value
/// across the color channels with alpha 1.
///
/// # Arguments
///
/// * `src` - The input single-channel plane.
/// * `dst` - The output RGBA image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use rasterlab_image::{Image, ImageSize};
/// use rasterlab_imgproc::color::rgba_from_gray;
///
/// let plane = Image::<f64, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![0.25, 0.75],
/// )
/// .unwrap();
///
/// let mut rgba = Image::<f64, 4>::from_size_val(plane.size(), 0.0).unwrap();
/// rgba_from_gray(&plane, &mut rgba).unwrap();
///
/// assert_eq!(rgba.as_slice(), &[0.25, 0.25, 0.25, 1.0, 0.75, 0.75, 0.75, 1.0]);
/// ```
pub fn rgba_from_gray<T>(src: &Image<T, 1>, dst: &mut Image<T, 4>) -> Result<(), ImageError>
where
    T: Send + Sync + num_traits::Float,
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
        dst_pixel[0] = src_pixel[0];
        dst_pixel[1] = src_pixel[0];
        dst_pixel[2] = src_pixel[0];
        dst_pixel[3] = T::one();
    });

    Ok(())
}
