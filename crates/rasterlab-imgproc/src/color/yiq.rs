use crate::parallel;
use rasterlab_image::{Image, ImageError};

/// Convert an RGBA image to the NTSC YIQ color space.
///
/// Y = 0.299R + 0.587G + 0.114B;
/// I = 0.596R - 0.274G - 0.322B; Q = 0.211R - 0.523G + 0.312B.
/// The chroma channels are biased by +0.5 and clamped to `[0, 1]` so the
/// tensor can be displayed directly; luma is stored as computed.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output 3-channel YIQ tensor.
///
/// Precondition: the input and output images must have the same size.
pub fn yiq_from_rgb(src: &Image<f64, 4>, dst: &mut Image<f64, 3>) -> Result<(), ImageError> {
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

        dst_pixel[0] = 0.299 * r + 0.587 * g + 0.114 * b;
        dst_pixel[1] = (0.596 * r - 0.274 * g - 0.322 * b + 0.5).clamp(0.0, 1.0);
        dst_pixel[2] = (0.211 * r - 0.523 * g + 0.312 * b + 0.5).clamp(0.0, 1.0);
    });

    Ok(())
}
