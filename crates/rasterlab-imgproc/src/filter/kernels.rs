use std::f64::consts::{PI, SQRT_2};

use super::Kernel;
use rasterlab_image::ImageError;

/// Create a mean (box) kernel with all coefficients `1/n^2`.
///
/// # Arguments
///
/// * `side` - The kernel side, odd and non-zero.
///
/// # Errors
///
/// Returns an error if the side is even or zero.
///
/// # Example
///
/// ```
/// use rasterlab_imgproc::filter::kernels::mean;
///
/// let kernel = mean(7).unwrap();
/// assert_eq!(kernel.get(3, 3), 1.0 / 49.0);
/// ```
pub fn mean(side: usize) -> Result<Kernel, ImageError> {
    let value = 1.0 / (side * side) as f64;
    Kernel::from_fn(side, |_, _| value)
}

/// Create a Gaussian kernel normalized to sum 1.
///
/// Coefficients follow `(1/(2*pi*sigma^2)) * exp(-(x^2 + y^2)/(2*sigma^2))`
/// before normalization. `sigma` must be positive; degenerate values are the
/// caller's responsibility.
///
/// # Arguments
///
/// * `side` - The kernel side, odd and non-zero.
/// * `sigma` - The standard deviation of the Gaussian.
///
/// # Errors
///
/// Returns an error if the side is even or zero.
pub fn gaussian(side: usize, sigma: f64) -> Result<Kernel, ImageError> {
    let sigma_sq = sigma * sigma;
    let kernel = Kernel::from_fn(side, |dx, dy| {
        let dist = (dx * dx + dy * dy) as f64;
        (1.0 / (2.0 * PI * sigma_sq)) * (-dist / (2.0 * sigma_sq)).exp()
    })?;
    Ok(kernel.normalized())
}

/// The horizontal Sobel derivative kernel.
pub fn sobel_x() -> Kernel {
    #[rustfmt::skip]
    let data = [
        -1.0, 0.0, 1.0,
        -2.0, 0.0, 2.0,
        -1.0, 0.0, 1.0,
    ];
    Kernel::from_3x3(data)
}

/// The vertical Sobel derivative kernel.
pub fn sobel_y() -> Kernel {
    #[rustfmt::skip]
    let data = [
        -1.0, -2.0, -1.0,
        0.0, 0.0, 0.0,
        1.0, 2.0, 1.0,
    ];
    Kernel::from_3x3(data)
}

/// Strength of the 3x3 sharpening kernels.
///
/// All three variants sum to 1, so flat regions keep their intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharpenStrength {
    /// Center 17, ring -2.
    Soft,
    /// Center 9, ring -1.
    Medium,
    /// Center 5, cross -1, corners 0.
    Strong,
}

/// Create a 3x3 sharpening kernel.
pub fn sharpen(strength: SharpenStrength) -> Kernel {
    #[rustfmt::skip]
    let data = match strength {
        SharpenStrength::Soft => [
            -2.0, -2.0, -2.0,
            -2.0, 17.0, -2.0,
            -2.0, -2.0, -2.0,
        ],
        SharpenStrength::Medium => [
            -1.0, -1.0, -1.0,
            -1.0, 9.0, -1.0,
            -1.0, -1.0, -1.0,
        ],
        SharpenStrength::Strong => [
            0.0, -1.0, 0.0,
            -1.0, 5.0, -1.0,
            0.0, -1.0, 0.0,
        ],
    };
    Kernel::from_3x3(data)
}

/// Compass direction of a Kirsch kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KirschDirection {
    /// Bright edge above.
    North,
    /// Bright edge in the upper left.
    NorthWest,
    /// Bright edge on the left.
    West,
    /// Bright edge in the lower left.
    SouthWest,
    /// Bright edge below.
    South,
    /// Bright edge in the lower right.
    SouthEast,
    /// Bright edge on the right.
    East,
    /// Bright edge in the upper right.
    NorthEast,
}

impl KirschDirection {
    /// All eight directions in rotation order.
    pub const ALL: [KirschDirection; 8] = [
        KirschDirection::North,
        KirschDirection::NorthWest,
        KirschDirection::West,
        KirschDirection::SouthWest,
        KirschDirection::South,
        KirschDirection::SouthEast,
        KirschDirection::East,
        KirschDirection::NorthEast,
    ];
}

/// Create the Kirsch compass kernel for a direction.
///
/// The eight kernels are the rotations of
/// `[[5, 5, 5], [-3, 0, -3], [-3, -3, -3]]`.
pub fn kirsch(direction: KirschDirection) -> Kernel {
    #[rustfmt::skip]
    let data = match direction {
        KirschDirection::North => [
            5.0, 5.0, 5.0,
            -3.0, 0.0, -3.0,
            -3.0, -3.0, -3.0,
        ],
        KirschDirection::NorthWest => [
            5.0, 5.0, -3.0,
            5.0, 0.0, -3.0,
            -3.0, -3.0, -3.0,
        ],
        KirschDirection::West => [
            5.0, -3.0, -3.0,
            5.0, 0.0, -3.0,
            5.0, -3.0, -3.0,
        ],
        KirschDirection::SouthWest => [
            -3.0, -3.0, -3.0,
            5.0, 0.0, -3.0,
            5.0, 5.0, -3.0,
        ],
        KirschDirection::South => [
            -3.0, -3.0, -3.0,
            -3.0, 0.0, -3.0,
            5.0, 5.0, 5.0,
        ],
        KirschDirection::SouthEast => [
            -3.0, -3.0, -3.0,
            -3.0, 0.0, 5.0,
            -3.0, 5.0, 5.0,
        ],
        KirschDirection::East => [
            -3.0, -3.0, 5.0,
            -3.0, 0.0, 5.0,
            -3.0, -3.0, 5.0,
        ],
        KirschDirection::NorthEast => [
            -3.0, 5.0, 5.0,
            -3.0, 0.0, 5.0,
            -3.0, -3.0, -3.0,
        ],
    };
    Kernel::from_3x3(data)
}

/// Create the nine Frei-Chen masks F1..F9.
///
/// F1..F4 span the edge subspace, F5..F8 the line subspace and F9 is the
/// average mask. The coefficients are the raw basis values.
pub fn frei_chen() -> [Kernel; 9] {
    #[rustfmt::skip]
    let masks = [
        [
            1.0, SQRT_2, 1.0,
            0.0, 0.0, 0.0,
            -1.0, -SQRT_2, -1.0,
        ],
        [
            1.0, 0.0, -1.0,
            SQRT_2, 0.0, -SQRT_2,
            1.0, 0.0, -1.0,
        ],
        [
            0.0, -1.0, SQRT_2,
            1.0, 0.0, -1.0,
            -SQRT_2, 1.0, 0.0,
        ],
        [
            SQRT_2, -1.0, 0.0,
            -1.0, 0.0, 1.0,
            0.0, 1.0, -SQRT_2,
        ],
        [
            0.0, 1.0, 0.0,
            -1.0, 0.0, -1.0,
            0.0, 1.0, 0.0,
        ],
        [
            -1.0, 0.0, 1.0,
            0.0, 0.0, 0.0,
            1.0, 0.0, -1.0,
        ],
        [
            1.0, -2.0, 1.0,
            -2.0, 4.0, -2.0,
            1.0, -2.0, 1.0,
        ],
        [
            -2.0, 1.0, -2.0,
            1.0, 4.0, 1.0,
            -2.0, 1.0, -2.0,
        ],
        [
            1.0, 1.0, 1.0,
            1.0, 1.0, 1.0,
            1.0, 1.0, 1.0,
        ],
    ];
    masks.map(Kernel::from_3x3)
}
