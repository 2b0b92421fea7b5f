use crate::parallel;
use rasterlab_image::{Image, ImageError};

const TWO_PI: f64 = 2.0 * std::f64::consts::PI;

/// Convert an RGBA image to the HSI color space.
///
/// I = (R + G + B) / 3; S = 1 - min/I (0 when I = 0);
/// H = arccos(0.5((R-G) + (R-B)) / sqrt((R-G)^2 + (R-B)(G-B))), replaced by
/// 2pi - H when B > G, stored normalized as H / 2pi. The hue stays 0 when the
/// pixel is achromatic or the denominator vanishes.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output 3-channel tensor ordered `[H, S, I]`.
///
/// Precondition: the input and output images must have the same size.
pub fn hsi_from_rgb(src: &Image<f64, 4>, dst: &mut Image<f64, 3>) -> Result<(), ImageError> {
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

        let intensity = (r + g + b) / 3.0;
        let min = r.min(g).min(b);
        let saturation = if intensity == 0.0 {
            0.0
        } else {
            1.0 - min / intensity
        };

        let mut hue = 0.0;
        if saturation != 0.0 {
            let numerator = 0.5 * ((r - g) + (r - b));
            let denominator = ((r - g) * (r - g) + (r - b) * (g - b)).sqrt();
            if denominator != 0.0 {
                // keep acos in its domain under floating-point noise
                hue = (numerator / denominator).clamp(-1.0, 1.0).acos();
                if b > g {
                    hue = TWO_PI - hue;
                }
            }
        }

        dst_pixel[0] = hue / TWO_PI;
        dst_pixel[1] = saturation;
        dst_pixel[2] = intensity;
    });

    Ok(())
}

/// Reconstruct an RGBA image from an HSI tensor using the standard
/// three-sector formulas; the inverse of [`hsi_from_rgb`] away from the
/// achromatic singularities.
///
/// # Arguments
///
/// * `src` - The input 3-channel tensor ordered `[H, S, I]`.
/// * `dst` - The output RGBA image with alpha 1.
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_hsi(src: &Image<f64, 3>, dst: &mut Image<f64, 4>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let third = TWO_PI / 3.0;
    let sixth = std::f64::consts::PI / 3.0;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let mut h = src_pixel[0] * TWO_PI;
        let s = src_pixel[1];
        let i = src_pixel[2];

        let (r, g, b) = if s == 0.0 {
            (i, i, i)
        } else if h < third {
            let b = i * (1.0 - s);
            let r = i * (1.0 + s * h.cos() / (sixth - h).cos());
            (r, 3.0 * i - (r + b), b)
        } else if h < 2.0 * third {
            h -= third;
            let r = i * (1.0 - s);
            let g = i * (1.0 + s * h.cos() / (sixth - h).cos());
            (r, g, 3.0 * i - (r + g))
        } else {
            h -= 2.0 * third;
            let g = i * (1.0 - s);
            let b = i * (1.0 + s * h.cos() / (sixth - h).cos());
            (3.0 * i - (g + b), g, b)
        };

        dst_pixel[0] = r.clamp(0.0, 1.0);
        dst_pixel[1] = g.clamp(0.0, 1.0);
        dst_pixel[2] = b.clamp(0.0, 1.0);
        dst_pixel[3] = 1.0;
    });

    Ok(())
}
