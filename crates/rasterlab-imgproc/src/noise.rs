use rand::Rng;

use rasterlab_image::{Image, ImageError};

/// Impulse noise polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseKind {
    /// Replace hit pixels with pure white.
    Salt,
    /// Replace hit pixels with pure black.
    Pepper,
}

/// Sprinkle salt or pepper noise over an image with a caller-supplied RNG.
///
/// Each pixel draws `u ~ U[0, 1)`; when `u < probability` the pixel is
/// replaced with the noise color (alpha 1), otherwise it is copied
/// unchanged. Pixels are visited in row-major order, so a seeded RNG
/// reproduces the same pattern.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output RGBA image.
/// * `probability` - The per-pixel hit probability in `[0, 1]`.
/// * `kind` - The noise polarity.
/// * `rng` - The random source for the per-pixel draws.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn add_noise_with<R: Rng + ?Sized>(
    src: &Image<f64, 4>,
    dst: &mut Image<f64, 4>,
    probability: f64,
    kind: NoiseKind,
    rng: &mut R,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let value = match kind {
        NoiseKind::Salt => 1.0,
        NoiseKind::Pepper => 0.0,
    };

    for (src_pixel, dst_pixel) in src
        .as_slice()
        .chunks_exact(4)
        .zip(dst.as_slice_mut().chunks_exact_mut(4))
    {
        if rng.random::<f64>() < probability {
            dst_pixel[0] = value;
            dst_pixel[1] = value;
            dst_pixel[2] = value;
            dst_pixel[3] = 1.0;
        } else {
            dst_pixel.copy_from_slice(src_pixel);
        }
    }

    Ok(())
}

/// Sprinkle salt or pepper noise using the thread-local RNG.
///
/// See [`add_noise_with`] for the sampling rule.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Example
///
/// ```
/// use rasterlab_image::{Image, ImageSize};
/// use rasterlab_imgproc::noise::{add_noise, NoiseKind};
///
/// let image = Image::<f64, 4>::from_size_val(
///     ImageSize {
///         width: 16,
///         height: 16,
///     },
///     0.5,
/// )
/// .unwrap();
///
/// let mut noisy = Image::<f64, 4>::from_size_val(image.size(), 0.0).unwrap();
/// add_noise(&image, &mut noisy, 0.1, NoiseKind::Salt).unwrap();
/// ```
pub fn add_noise(
    src: &Image<f64, 4>,
    dst: &mut Image<f64, 4>,
    probability: f64,
    kind: NoiseKind,
) -> Result<(), ImageError> {
    add_noise_with(src, dst, probability, kind, &mut rand::rng())
}
