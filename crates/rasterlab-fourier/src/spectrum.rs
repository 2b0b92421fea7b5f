use rasterlab_image::{Image, ImageError};
use rasterlab_imgproc::color;

use crate::error::FourierError;
use crate::fft::FrequencyGrid;

/// Render the log-magnitude spectrum of a frequency grid as a gray image.
///
/// Quadrants are swapped so the zero frequency lands at the center, each
/// cell becomes `log(1 + |z|)` and the plane is normalized by its maximum
/// before quantizing to the 256 gray levels. A grid with no energy renders
/// black.
///
/// # Arguments
///
/// * `grid` - The input frequency grid.
/// * `dst` - The output RGBA image, sized `side x side`.
///
/// Precondition: the output sides must both equal the grid side.
pub fn spectrum(grid: &FrequencyGrid, dst: &mut Image<f64, 4>) -> Result<(), FourierError> {
    let side = grid.side();
    if side != dst.cols() || side != dst.rows() {
        return Err(ImageError::InvalidImageSize(side, side, dst.cols(), dst.rows()).into());
    }

    let half = side / 2;
    let samples = grid.as_slice();
    let mut magnitudes = vec![0.0f64; side * side];
    let mut max_magnitude = 0.0f64;
    for y in 0..side {
        for x in 0..side {
            let shifted = ((y + half) % side) * side + (x + half) % side;
            let value = samples[shifted].norm().ln_1p();
            max_magnitude = max_magnitude.max(value);
            magnitudes[y * side + x] = value;
        }
    }

    let scale = if max_magnitude > 0.0 { max_magnitude } else { 1.0 };
    for value in magnitudes.iter_mut() {
        *value = (255.0 * (*value / scale)).floor() / 255.0;
    }

    let gray = Image::new(dst.size(), magnitudes)?;
    color::rgba_from_gray(&gray, dst)?;

    Ok(())
}
