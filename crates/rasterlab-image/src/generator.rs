use crate::error::ImageError;
use crate::image::{Image, ImageSize};

/// Width of the default synthetic images.
pub const DEFAULT_WIDTH: usize = 300;

/// Height of the default synthetic images.
pub const DEFAULT_HEIGHT: usize = 200;

/// Side of the square sinusoid image, a power of two.
pub const SINUSOID_SIDE: usize = 256;

/// Create the default color-gradient image (300x200).
///
/// Red grows along x, green along y and blue follows a diagonal sine wave:
/// `r = x/w`, `g = y/h`, `b = 0.5 + 0.5 * sin((x + y) / 50)`. Alpha is 1.
///
/// # Examples
///
/// ```
/// let image = rasterlab_image::generator::gradient().unwrap();
/// assert_eq!(image.size().width, 300);
/// assert_eq!(image.size().height, 200);
/// ```
pub fn gradient() -> Result<Image<f64, 4>, ImageError> {
    let size = ImageSize {
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
    };

    let mut data = Vec::with_capacity(size.width * size.height * 4);
    for y in 0..size.height {
        for x in 0..size.width {
            let r = x as f64 / size.width as f64;
            let g = y as f64 / size.height as f64;
            let b = ((x + y) as f64 / 50.0).sin() * 0.5 + 0.5;
            data.extend_from_slice(&[r, g, b, 1.0]);
        }
    }

    Image::new(size, data)
}

/// Create the RGB-bands image (300x200).
///
/// Three equal horizontal bands, each a linear x-gradient in red, green and
/// blue respectively. Rows left over by the integer division fall into the
/// last band. Alpha is 1.
pub fn rgb_bands() -> Result<Image<f64, 4>, ImageError> {
    let size = ImageSize {
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
    };
    let band_height = size.height / 3;

    let mut data = Vec::with_capacity(size.width * size.height * 4);
    for y in 0..size.height {
        for x in 0..size.width {
            let intensity = x as f64 / size.width as f64;
            let pixel = if y < band_height {
                [intensity, 0.0, 0.0, 1.0]
            } else if y < band_height * 2 {
                [0.0, intensity, 0.0, 1.0]
            } else {
                [0.0, 0.0, intensity, 1.0]
            };
            data.extend_from_slice(&pixel);
        }
    }

    Image::new(size, data)
}

/// Create a grayscale sinusoid plaid on a square power-of-two grid (256x256),
/// suitable as input for the frequency-domain operators.
///
/// `v = 0.5 + 0.25 * sin(2*pi*8*x/n) + 0.25 * sin(2*pi*8*y/n)`, eight full
/// periods along each axis. Alpha is 1.
pub fn sinusoid() -> Result<Image<f64, 4>, ImageError> {
    let n = SINUSOID_SIDE;
    let size = ImageSize {
        width: n,
        height: n,
    };

    let mut data = Vec::with_capacity(n * n * 4);
    for y in 0..n {
        for x in 0..n {
            let fx = (2.0 * std::f64::consts::PI * 8.0 * x as f64 / n as f64).sin();
            let fy = (2.0 * std::f64::consts::PI * 8.0 * y as f64 / n as f64).sin();
            let v = (0.5 + 0.25 * fx + 0.25 * fy).clamp(0.0, 1.0);
            data.extend_from_slice(&[v, v, v, 1.0]);
        }
    }

    Image::new(size, data)
}
