use rayon::prelude::*;

use crate::parallel;
use rasterlab_image::{Image, ImageError};

/// Lower bound of the LUT target range.
const F_MIN: f64 = 0.0;

/// Upper bound of the LUT target range.
const F_MAX: f64 = 255.0;

/// Quantize a `[0, 1]` intensity to its 8-bit histogram bucket.
fn bucket(gray: f64) -> usize {
    ((gray * 255.0) as usize).min(255)
}

/// Compute the 256-bucket intensity histogram of a grayscale image.
///
/// Each pixel contributes to bucket `min(255, floor(g * 255))`.
///
/// # Arguments
///
/// * `src` - The input grayscale image with values in `[0, 1]`.
///
/// # Example
///
/// ```
/// use rasterlab_image::{Image, ImageSize};
/// use rasterlab_imgproc::histogram::compute_histogram;
///
/// let image = Image::<f64, 1>::new(
///     ImageSize {
///         width: 3,
///         height: 1,
///     },
///     vec![0.0, 0.5, 1.0],
/// )
/// .unwrap();
///
/// let histogram = compute_histogram(&image);
/// assert_eq!(histogram[0], 1);
/// assert_eq!(histogram[127], 1);
/// assert_eq!(histogram[255], 1);
/// ```
pub fn compute_histogram(src: &Image<f64, 1>) -> [usize; 256] {
    src.as_slice()
        .par_chunks(4096)
        .fold(
            || [0usize; 256],
            |mut local, chunk| {
                for &px in chunk {
                    local[bucket(px)] += 1;
                }
                local
            },
        )
        .reduce(
            || [0usize; 256],
            |mut a, b| {
                for (acc, count) in a.iter_mut().zip(b.iter()) {
                    *acc += count;
                }
                a
            },
        )
}

/// Normalize a histogram into a probability mass function.
///
/// Returns all zeros when the histogram is empty.
pub fn histogram_probability(hist: &[usize; 256]) -> [f64; 256] {
    let total: usize = hist.iter().sum();
    let mut probability = [0.0; 256];
    if total == 0 {
        return probability;
    }
    for (p, &h) in probability.iter_mut().zip(hist.iter()) {
        *p = h as f64 / total as f64;
    }
    probability
}

/// Prefix-sum a probability mass function into its cumulative distribution.
pub fn cumulative_distribution(probability: &[f64; 256]) -> [f64; 256] {
    let mut cdf = [0.0; 256];
    let mut acc = 0.0;
    for (c, &p) in cdf.iter_mut().zip(probability.iter()) {
        acc += p;
        *c = acc;
    }
    cdf
}

/// First-order statistics of an intensity distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramStats {
    /// Mean intensity level.
    pub mean: f64,
    /// Variance around the mean.
    pub variance: f64,
    /// Standard deviation.
    pub std_dev: f64,
    /// Third central moment, not normalized.
    pub skewness: f64,
    /// Sum of squared probabilities.
    pub energy: f64,
    /// Shannon entropy in bits.
    pub entropy: f64,
}

/// Compute distribution statistics from a probability mass function.
///
/// The skewness is the raw third central moment. Zero-probability levels
/// do not contribute to the entropy.
pub fn histogram_stats(probability: &[f64; 256]) -> HistogramStats {
    let mut mean = 0.0;
    for (i, &p) in probability.iter().enumerate() {
        mean += i as f64 * p;
    }

    let mut variance = 0.0;
    let mut skewness = 0.0;
    let mut energy = 0.0;
    let mut entropy = 0.0;
    for (i, &p) in probability.iter().enumerate() {
        let delta = i as f64 - mean;
        variance += delta * delta * p;
        skewness += delta * delta * delta * p;
        energy += p * p;
        if p > 0.0 {
            entropy -= p * p.log2();
        }
    }

    HistogramStats {
        mean,
        variance,
        std_dev: variance.sqrt(),
        skewness,
        energy,
        entropy,
    }
}

/// Histogram-shaping transforms used to build intensity lookup tables.
///
/// Each variant maps the cumulative distribution value `u = CDF[i]` of an
/// intensity level onto the target range `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntensityTransform {
    /// Linear stretch `f_min + (f_max - f_min) * u`, i.e. classic
    /// histogram equalization.
    Uniform,
    /// Exponential shaping `f_min - ln(1 - u) / alpha`.
    ///
    /// Non-positive `alpha` falls back to 1.
    Exponential {
        /// Decay rate of the target distribution.
        alpha: f64,
    },
    /// Rayleigh shaping `f_min + sqrt(2 * alpha^2 * ln(1 / (1 - u)))`.
    ///
    /// Non-positive `alpha` falls back to 1.
    Rayleigh {
        /// Mode of the target distribution.
        alpha: f64,
    },
    /// Hyperbolic-roots shaping
    /// `((f_max^(1/p) - f_min^(1/p)) * u + f_min^(1/p))^p`.
    ///
    /// Non-positive `power` falls back to 2.
    HyperbolicRoots {
        /// Root exponent `p`.
        power: f64,
    },
    /// Hyperbolic-log shaping via the monotonic surrogate
    /// `f_min + (exp(u) - 1) / (e - 1) * (f_max - f_min)`, which stays
    /// defined when `f_min` is zero.
    HyperbolicLog,
}

/// Build a 256-entry intensity lookup table from a cumulative distribution.
///
/// Entries are clamped to `[0, 255]` and rounded to the nearest integer.
/// The distribution value is clamped below 1 where the transform would
/// otherwise take the logarithm of zero.
///
/// # Arguments
///
/// * `cdf` - The cumulative distribution of the source image.
/// * `transform` - The shaping transform for the target distribution.
pub fn intensity_lut(cdf: &[f64; 256], transform: IntensityTransform) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (entry, &u) in lut.iter_mut().zip(cdf.iter()) {
        let value = match transform {
            IntensityTransform::Uniform => F_MIN + (F_MAX - F_MIN) * u,
            IntensityTransform::Exponential { alpha } => {
                let alpha = if alpha <= 0.0 { 1.0 } else { alpha };
                let u = u.min(1.0 - 1e-12);
                F_MIN - (1.0 - u).ln() / alpha
            }
            IntensityTransform::Rayleigh { alpha } => {
                let alpha = if alpha <= 0.0 { 1.0 } else { alpha };
                let u = u.min(1.0 - 1e-6);
                F_MIN + (2.0 * alpha * alpha * (1.0 / (1.0 - u)).ln()).sqrt()
            }
            IntensityTransform::HyperbolicRoots { power } => {
                let power = if power <= 0.0 { 2.0 } else { power };
                let min_root = F_MIN.powf(1.0 / power);
                let max_root = F_MAX.powf(1.0 / power);
                ((max_root - min_root) * u + min_root).powf(power)
            }
            IntensityTransform::HyperbolicLog => {
                F_MIN + (u.exp() - 1.0) / (std::f64::consts::E - 1.0) * (F_MAX - F_MIN)
            }
        };
        *entry = value.clamp(0.0, 255.0).round() as u8;
    }
    lut
}

/// Remap a grayscale image through an intensity lookup table.
///
/// Each pixel is quantized to its 8-bit bucket, replaced by the table
/// entry and rendered as a gray RGBA pixel with alpha 1.
///
/// # Arguments
///
/// * `src` - The input grayscale image with values in `[0, 1]`.
/// * `dst` - The output RGBA image.
/// * `lut` - The 256-entry lookup table.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn apply_lut(
    src: &Image<f64, 1>,
    dst: &mut Image<f64, 4>,
    lut: &[u8; 256],
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let v = lut[bucket(src_pixel[0])] as f64 / 255.0;
        dst_pixel[0] = v;
        dst_pixel[1] = v;
        dst_pixel[2] = v;
        dst_pixel[3] = 1.0;
    });

    Ok(())
}

/// Reshape the intensity distribution of a grayscale image.
///
/// Composes [`compute_histogram`], [`cumulative_distribution`],
/// [`intensity_lut`] and [`apply_lut`] into a single call.
///
/// # Arguments
///
/// * `src` - The input grayscale image with values in `[0, 1]`.
/// * `dst` - The output RGBA image.
/// * `transform` - The shaping transform for the target distribution.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Example
///
/// ```
/// use rasterlab_image::{Image, ImageSize};
/// use rasterlab_imgproc::histogram::{transform_intensity, IntensityTransform};
///
/// let image = Image::<f64, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![0.0, 1.0],
/// )
/// .unwrap();
///
/// let mut equalized = Image::<f64, 4>::from_size_val(image.size(), 0.0).unwrap();
/// transform_intensity(&image, &mut equalized, IntensityTransform::Uniform).unwrap();
///
/// // half the mass sits at level 0, so it maps to round(0.5 * 255) = 128
/// assert_eq!(equalized.as_slice()[0], 128.0 / 255.0);
/// assert_eq!(equalized.as_slice()[4], 1.0);
/// ```
pub fn transform_intensity(
    src: &Image<f64, 1>,
    dst: &mut Image<f64, 4>,
    transform: IntensityTransform,
) -> Result<(), ImageError> {
    let histogram = compute_histogram(src);
    let probability = histogram_probability(&histogram);
    let cdf = cumulative_distribution(&probability);
    let lut = intensity_lut(&cdf, transform);
    apply_lut(src, dst, &lut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterlab_image::{Image, ImageError, ImageSize};

    fn two_level_image() -> Result<Image<f64, 1>, ImageError> {
        Image::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0.0, 0.0, 1.0, 1.0],
        )
    }

    #[test]
    fn histogram_counts_buckets() -> Result<(), ImageError> {
        let image = Image::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0.0, 0.0, 0.5, 0.5, 1.0, 1.0],
        )?;

        let histogram = compute_histogram(&image);

        assert_eq!(histogram[0], 2);
        assert_eq!(histogram[127], 2);
        assert_eq!(histogram[255], 2);
        assert_eq!(histogram.iter().sum::<usize>(), 6);

        Ok(())
    }

    #[test]
    fn probability_and_cdf_partition() -> Result<(), ImageError> {
        let image = two_level_image()?;
        let histogram = compute_histogram(&image);
        let probability = histogram_probability(&histogram);
        let cdf = cumulative_distribution(&probability);

        assert_eq!(probability[0], 0.5);
        assert_eq!(probability[255], 0.5);
        assert_eq!(cdf[0], 0.5);
        assert_eq!(cdf[254], 0.5);
        approx::assert_relative_eq!(cdf[255], 1.0, epsilon = 1e-12);

        Ok(())
    }

    #[test]
    fn stats_of_symmetric_two_level_distribution() -> Result<(), ImageError> {
        let image = two_level_image()?;
        let histogram = compute_histogram(&image);
        let probability = histogram_probability(&histogram);
        let stats = histogram_stats(&probability);

        approx::assert_relative_eq!(stats.mean, 127.5, epsilon = 1e-12);
        approx::assert_relative_eq!(stats.variance, 127.5 * 127.5, epsilon = 1e-9);
        approx::assert_relative_eq!(stats.std_dev, 127.5, epsilon = 1e-12);
        approx::assert_relative_eq!(stats.skewness, 0.0, epsilon = 1e-6);
        approx::assert_relative_eq!(stats.energy, 0.5, epsilon = 1e-12);
        approx::assert_relative_eq!(stats.entropy, 1.0, epsilon = 1e-12);

        Ok(())
    }

    #[test]
    fn uniform_lut_spreads_two_levels() -> Result<(), ImageError> {
        let image = two_level_image()?;
        let mut out = Image::from_size_val(image.size(), 0.0)?;
        transform_intensity(&image, &mut out, IntensityTransform::Uniform)?;

        let px = out.as_slice();
        approx::assert_relative_eq!(px[0], 128.0 / 255.0, epsilon = 1e-12);
        assert_eq!(px[3], 1.0);
        approx::assert_relative_eq!(px[8], 1.0, epsilon = 1e-12);

        Ok(())
    }

    #[test]
    fn exponential_guard_defaults_alpha() {
        let mut cdf = [1.0; 256];
        cdf[0] = 0.25;

        let bad = intensity_lut(&cdf, IntensityTransform::Exponential { alpha: -3.0 });
        let good = intensity_lut(&cdf, IntensityTransform::Exponential { alpha: 1.0 });

        assert_eq!(bad, good);
        // saturated distribution values stay finite through the log guard
        assert_eq!(bad[255], 28);
    }

    #[test]
    fn hyperbolic_roots_guard_defaults_power() {
        let mut cdf = [0.0; 256];
        for (i, c) in cdf.iter_mut().enumerate() {
            *c = (i as f64 + 1.0) / 256.0;
        }

        let bad = intensity_lut(&cdf, IntensityTransform::HyperbolicRoots { power: 0.0 });
        let good = intensity_lut(&cdf, IntensityTransform::HyperbolicRoots { power: 2.0 });

        assert_eq!(bad, good);
    }

    #[test]
    fn lut_application_is_gray_rgba() -> Result<(), ImageError> {
        let image = Image::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![0.0, 1.0],
        )?;

        let mut lut = [0u8; 256];
        lut[0] = 10;
        lut[255] = 200;

        let mut out = Image::from_size_val(image.size(), 0.0)?;
        apply_lut(&image, &mut out, &lut)?;

        let px = out.as_slice();
        assert_eq!(&px[0..4], &[10.0 / 255.0, 10.0 / 255.0, 10.0 / 255.0, 1.0]);
        assert_eq!(&px[4..8], &[200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0, 1.0]);

        Ok(())
    }
}
