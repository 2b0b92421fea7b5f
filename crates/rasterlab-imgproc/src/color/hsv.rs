use crate::parallel;
use rasterlab_image::{Image, ImageError};

/// Convert an RGBA image to the HSV color space.
///
/// V = max(R, G, B); S = (V - min) / V (0 when V = 0); the hue sector is
/// picked by the maximal channel, scaled to degrees, wrapped into
/// `[0, 360)` and stored normalized as H / 360.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output 3-channel tensor ordered `[H, S, V]`.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use rasterlab_image::{Image, ImageSize};
/// use rasterlab_imgproc::color::hsv_from_rgb;
///
/// let image = Image::<f64, 4>::new(
///     ImageSize {
///         width: 1,
///         height: 1,
///     },
///     vec![0.0, 1.0, 0.0, 1.0],
/// )
/// .unwrap();
///
/// let mut hsv = Image::<f64, 3>::from_size_val(image.size(), 0.0).unwrap();
/// hsv_from_rgb(&image, &mut hsv).unwrap();
///
/// // pure green sits at 120 degrees
/// assert_eq!(hsv.as_slice(), &[120.0 / 360.0, 1.0, 1.0]);
/// ```
pub fn hsv_from_rgb(src: &Image<f64, 4>, dst: &mut Image<f64, 3>) -> Result<(), ImageError> {
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

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let mut hue = 0.0;
        if delta != 0.0 {
            hue = if max == r {
                ((g - b) / delta) % 6.0
            } else if max == g {
                (b - r) / delta + 2.0
            } else {
                (r - g) / delta + 4.0
            };
            hue *= 60.0;
            if hue < 0.0 {
                hue += 360.0;
            }
        }

        dst_pixel[0] = hue / 360.0;
        dst_pixel[1] = if max == 0.0 { 0.0 } else { delta / max };
        dst_pixel[2] = max;
    });

    Ok(())
}

/// Reconstruct an RGBA image from an HSV tensor; the inverse of
/// [`hsv_from_rgb`] away from the V = 0 and achromatic singularities.
///
/// # Arguments
///
/// * `src` - The input 3-channel tensor ordered `[H, S, V]`.
/// * `dst` - The output RGBA image with alpha 1.
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_hsv(src: &Image<f64, 3>, dst: &mut Image<f64, 4>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let h = src_pixel[0] * 6.0;
        let s = src_pixel[1];
        let v = src_pixel[2];

        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match h.floor() as i64 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        dst_pixel[0] = (r + m).clamp(0.0, 1.0);
        dst_pixel[1] = (g + m).clamp(0.0, 1.0);
        dst_pixel[2] = (b + m).clamp(0.0, 1.0);
        dst_pixel[3] = 1.0;
    });

    Ok(())
}
