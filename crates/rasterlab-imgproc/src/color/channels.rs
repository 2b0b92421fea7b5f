use crate::parallel;
use rasterlab_image::{Image, ImageError};

use super::gray::{luma601_from_rgba, rgba_from_gray};

/// Extract one color channel of an RGBA image, shown in its own color.
///
/// The selected channel keeps its values, the other two color channels are
/// zeroed and alpha is preserved.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output RGBA image.
/// * `channel` - The channel to keep: 0 red, 1 green, 2 blue.
///
/// # Errors
///
/// Fails when the sizes differ or `channel` is not a color channel.
///
/// # Example
///
/// ```
/// use rasterlab_image::{Image, ImageSize};
/// use rasterlab_imgproc::color::extract_channel;
///
/// let image = Image::<f64, 4>::new(
///     ImageSize {
///         width: 1,
///         height: 1,
///     },
///     vec![0.3, 0.6, 0.9, 0.5],
/// )
/// .unwrap();
///
/// let mut red = Image::<f64, 4>::from_size_val(image.size(), 0.0).unwrap();
/// extract_channel(&image, &mut red, 0).unwrap();
///
/// assert_eq!(red.as_slice(), &[0.3, 0.0, 0.0, 0.5]);
/// ```
pub fn extract_channel(
    src: &Image<f64, 4>,
    dst: &mut Image<f64, 4>,
    channel: usize,
) -> Result<(), ImageError> {
    if channel >= 3 {
        return Err(ImageError::ChannelIndexOutOfBounds(channel, 3));
    }
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = 0.0;
        dst_pixel[1] = 0.0;
        dst_pixel[2] = 0.0;
        dst_pixel[channel] = src_pixel[channel];
        dst_pixel[3] = src_pixel[3];
    });

    Ok(())
}

/// Render one channel of a color-space tensor as a grayscale RGBA image.
///
/// Each output pixel is `(v, v, v, 1)` with `v` the clamped channel value.
///
/// # Arguments
///
/// * `src` - The input tensor with `C` channels.
/// * `dst` - The output RGBA image.
/// * `channel` - The tensor channel to render.
///
/// # Errors
///
/// Fails when the sizes differ or `channel >= C`.
pub fn channel_view<const C: usize>(
    src: &Image<f64, C>,
    dst: &mut Image<f64, 4>,
    channel: usize,
) -> Result<(), ImageError> {
    if channel >= C {
        return Err(ImageError::ChannelIndexOutOfBounds(channel, C));
    }
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let v = src_pixel[channel].clamp(0.0, 1.0);
        dst_pixel[0] = v;
        dst_pixel[1] = v;
        dst_pixel[2] = v;
        dst_pixel[3] = 1.0;
    });

    Ok(())
}

/// The four views produced by the RGB channel split.
pub struct RgbChannelViews {
    /// The red channel rendered as gray.
    pub red: Image<f64, 4>,
    /// The green channel rendered as gray.
    pub green: Image<f64, 4>,
    /// The blue channel rendered as gray.
    pub blue: Image<f64, 4>,
    /// The quantized BT.601 luminance rendered as gray.
    pub luma: Image<f64, 4>,
}

/// Split an RGBA image into its channel views.
///
/// Every view renders one quantity as gray with alpha 1: the red, green and
/// blue channels, and the 8-bit quantized BT.601 luminance.
pub fn rgb_split(src: &Image<f64, 4>) -> Result<RgbChannelViews, ImageError> {
    let mut red = Image::from_size_val(src.size(), 0.0)?;
    let mut green = Image::from_size_val(src.size(), 0.0)?;
    let mut blue = Image::from_size_val(src.size(), 0.0)?;

    channel_view(src, &mut red, 0)?;
    channel_view(src, &mut green, 1)?;
    channel_view(src, &mut blue, 2)?;

    let mut luma_plane = Image::from_size_val(src.size(), 0.0)?;
    luma601_from_rgba(src, &mut luma_plane)?;
    let mut luma = Image::from_size_val(src.size(), 0.0)?;
    rgba_from_gray(&luma_plane, &mut luma)?;

    Ok(RgbChannelViews {
        red,
        green,
        blue,
        luma,
    })
}

#[cfg(test)]
mod tests {
    use rasterlab_image::{Image, ImageError, ImageSize};

    #[test]
    fn extract_keeps_alpha() -> Result<(), Box<dyn std::error::Error>> {
        let image = Image::new(
            ImageSize {
                width: 1,
                height: 1,
            },
            vec![0.2, 0.4, 0.8, 0.6],
        )?;

        let mut out = Image::<f64, 4>::from_size_val(image.size(), 0.0)?;

        super::extract_channel(&image, &mut out, 1)?;
        assert_eq!(out.as_slice(), &[0.0, 0.4, 0.0, 0.6]);

        super::extract_channel(&image, &mut out, 2)?;
        assert_eq!(out.as_slice(), &[0.0, 0.0, 0.8, 0.6]);

        Ok(())
    }

    #[test]
    fn extract_rejects_alpha_channel() -> Result<(), Box<dyn std::error::Error>> {
        let image = Image::<f64, 4>::from_size_val(
            ImageSize {
                width: 1,
                height: 1,
            },
            0.0,
        )?;
        let mut out = Image::<f64, 4>::from_size_val(image.size(), 0.0)?;

        let res = super::extract_channel(&image, &mut out, 3);
        assert!(matches!(res, Err(ImageError::ChannelIndexOutOfBounds(3, 3))));

        Ok(())
    }

    #[test]
    fn channel_view_clamps() -> Result<(), Box<dyn std::error::Error>> {
        let tensor = Image::<f64, 3>::new(
            ImageSize {
                width: 1,
                height: 1,
            },
            vec![1.5, 0.0, 0.0],
        )?;

        let mut view = Image::<f64, 4>::from_size_val(tensor.size(), 0.0)?;
        super::channel_view(&tensor, &mut view, 0)?;

        assert_eq!(view.as_slice(), &[1.0, 1.0, 1.0, 1.0]);

        Ok(())
    }

    #[test]
    fn rgb_split_views() -> Result<(), Box<dyn std::error::Error>> {
        let image = Image::new(
            ImageSize {
                width: 1,
                height: 1,
            },
            vec![1.0, 0.5, 0.0, 0.25],
        )?;

        let views = super::rgb_split(&image)?;

        assert_eq!(views.red.as_slice(), &[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(views.green.as_slice(), &[0.5, 0.5, 0.5, 1.0]);
        assert_eq!(views.blue.as_slice(), &[0.0, 0.0, 0.0, 1.0]);

        // luma of (1, 0.5, 0): floor(255 * (0.299 + 0.2935)) / 255
        let y = (255.0f64 * (0.299 + 0.587 * 0.5)).floor() / 255.0;
        assert_eq!(views.luma.as_slice(), &[y, y, y, 1.0]);

        Ok(())
    }
}
