use rayon::prelude::*;

use rasterlab_image::{Image, ImageError};

/// Threshold used to binarize inputs before any morphological operation.
const BINARIZE_THRESHOLD: f64 = 0.5;

/// Binarize the image into per-pixel truth values, white is `true`.
fn truth_plane(src: &Image<f64, 4>) -> Vec<bool> {
    src.as_slice()
        .chunks_exact(4)
        .map(|px| (px[0] + px[1] + px[2]) / 3.0 >= BINARIZE_THRESHOLD)
        .collect()
}

fn morphology(
    src: &Image<f64, 4>,
    dst: &mut Image<f64, 4>,
    kernel_size: usize,
    erosion: bool,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(ImageError::InvalidKernelSize(kernel_size));
    }

    let width = src.width();
    let height = src.height();
    if width == 0 || height == 0 {
        return Ok(());
    }

    let truth = truth_plane(src);
    let half = (kernel_size / 2) as i64;

    dst.as_slice_mut()
        .par_chunks_exact_mut(4 * width)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for (x, dst_pixel) in dst_row.chunks_exact_mut(4).enumerate() {
                // erosion assumes white until a black neighbor shows up,
                // dilation assumes black until a white one does
                let mut value = erosion;
                'window: for ky in -half..=half {
                    let ny = y as i64 + ky;
                    if ny < 0 || ny >= height as i64 {
                        continue;
                    }
                    for kx in -half..=half {
                        let nx = x as i64 + kx;
                        if nx < 0 || nx >= width as i64 {
                            continue;
                        }
                        let white = truth[ny as usize * width + nx as usize];
                        if erosion && !white {
                            value = false;
                            break 'window;
                        }
                        if !erosion && white {
                            value = true;
                            break 'window;
                        }
                    }
                }
                let v = if value { 1.0 } else { 0.0 };
                dst_pixel[0] = v;
                dst_pixel[1] = v;
                dst_pixel[2] = v;
                dst_pixel[3] = 1.0;
            }
        });

    Ok(())
}

/// Erode a binary image with a square structuring element.
///
/// The input is binarized at 0.5 first. A pixel stays white only when every
/// in-bounds neighbor under the `kernel_size x kernel_size` window is white;
/// neighbors outside the image do not participate.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output binary RGBA image.
/// * `kernel_size` - The structuring element side, odd and non-zero.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match or the
/// structuring element side is even or zero.
///
/// # Example
///
/// ```
/// use rasterlab_image::{Image, ImageSize};
/// use rasterlab_imgproc::morphology::erode;
///
/// let mut data = vec![0.0; 5 * 5 * 4];
/// for px in data.chunks_exact_mut(4) {
///     px[3] = 1.0;
/// }
/// // lone white pixel in the center
/// data[(2 * 5 + 2) * 4..(2 * 5 + 2) * 4 + 3].fill(1.0);
/// let image = Image::<f64, 4>::new(
///     ImageSize {
///         width: 5,
///         height: 5,
///     },
///     data,
/// )
/// .unwrap();
///
/// let mut eroded = Image::<f64, 4>::from_size_val(image.size(), 0.0).unwrap();
/// erode(&image, &mut eroded, 3).unwrap();
///
/// // the lone pixel has no fully white neighborhood, so it disappears
/// assert!(eroded.as_slice().chunks_exact(4).all(|px| px[0] == 0.0));
/// ```
pub fn erode(
    src: &Image<f64, 4>,
    dst: &mut Image<f64, 4>,
    kernel_size: usize,
) -> Result<(), ImageError> {
    morphology(src, dst, kernel_size, true)
}

/// Dilate a binary image with a square structuring element.
///
/// The input is binarized at 0.5 first. A pixel becomes white when at least
/// one in-bounds neighbor under the window is white.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output binary RGBA image.
/// * `kernel_size` - The structuring element side, odd and non-zero.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match or the
/// structuring element side is even or zero.
pub fn dilate(
    src: &Image<f64, 4>,
    dst: &mut Image<f64, 4>,
    kernel_size: usize,
) -> Result<(), ImageError> {
    morphology(src, dst, kernel_size, false)
}

/// Morphological opening, an erosion followed by a dilation.
///
/// Removes white structures smaller than the structuring element while
/// keeping the rest approximately in place.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match or the
/// structuring element side is even or zero.
pub fn open(
    src: &Image<f64, 4>,
    dst: &mut Image<f64, 4>,
    kernel_size: usize,
) -> Result<(), ImageError> {
    let mut eroded = Image::from_size_val(src.size(), 0.0)?;
    erode(src, &mut eroded, kernel_size)?;
    dilate(&eroded, dst, kernel_size)
}

/// Morphological closing, a dilation followed by an erosion.
///
/// Fills black gaps smaller than the structuring element.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match or the
/// structuring element side is even or zero.
pub fn close(
    src: &Image<f64, 4>,
    dst: &mut Image<f64, 4>,
    kernel_size: usize,
) -> Result<(), ImageError> {
    let mut dilated = Image::from_size_val(src.size(), 0.0)?;
    dilate(src, &mut dilated, kernel_size)?;
    erode(&dilated, dst, kernel_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterlab_image::{Image, ImageError, ImageSize};

    fn lone_pixel5x5() -> Result<Image<f64, 4>, ImageError> {
        let mut data = vec![0.0; 5 * 5 * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 1.0;
        }
        data[(2 * 5 + 2) * 4..(2 * 5 + 2) * 4 + 3].fill(1.0);
        Image::new(
            ImageSize {
                width: 5,
                height: 5,
            },
            data,
        )
    }

    fn white_pixels(image: &Image<f64, 4>) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for y in 0..image.height() {
            for x in 0..image.width() {
                if image.get([y, x, 0]) == Some(&1.0) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn erosion_removes_lone_pixel() -> Result<(), ImageError> {
        let image = lone_pixel5x5()?;
        let mut eroded = Image::from_size_val(image.size(), 0.0)?;

        erode(&image, &mut eroded, 3)?;

        assert!(white_pixels(&eroded).is_empty());

        Ok(())
    }

    #[test]
    fn dilation_grows_lone_pixel_to_block() -> Result<(), ImageError> {
        let image = lone_pixel5x5()?;
        let mut dilated = Image::from_size_val(image.size(), 0.0)?;

        dilate(&image, &mut dilated, 3)?;

        let mut expected = Vec::new();
        for y in 1..=3 {
            for x in 1..=3 {
                expected.push((x, y));
            }
        }
        assert_eq!(white_pixels(&dilated), expected);

        Ok(())
    }

    #[test]
    fn open_and_close_bracket_the_input() -> Result<(), ImageError> {
        // an L-shaped blob with a one-pixel notch
        let size = ImageSize {
            width: 6,
            height: 6,
        };
        let mut data = vec![0.0; 6 * 6 * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 1.0;
        }
        let shape = [
            (1, 1),
            (2, 1),
            (3, 1),
            (1, 2),
            (2, 2),
            (3, 2),
            (1, 3),
            (2, 3),
            (3, 4),
        ];
        for (x, y) in shape {
            data[(y * 6 + x) * 4..(y * 6 + x) * 4 + 3].fill(1.0);
        }
        let image = Image::new(size, data)?;

        let mut opened = Image::from_size_val(size, 0.0)?;
        open(&image, &mut opened, 3)?;
        let mut closed = Image::from_size_val(size, 0.0)?;
        close(&image, &mut closed, 3)?;

        let input: std::collections::HashSet<_> = white_pixels(&image).into_iter().collect();
        let opened: std::collections::HashSet<_> = white_pixels(&opened).into_iter().collect();
        let closed: std::collections::HashSet<_> = white_pixels(&closed).into_iter().collect();

        assert!(opened.is_subset(&input));
        assert!(input.is_subset(&closed));

        Ok(())
    }

    #[test]
    fn gray_input_is_binarized_first() -> Result<(), ImageError> {
        let image = Image::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![
                0.7, 0.7, 0.7, 1.0, //
                0.7, 0.7, 0.7, 1.0, //
                0.7, 0.7, 0.7, 1.0,
            ],
        )?;

        let mut eroded = Image::from_size_val(image.size(), 0.0)?;
        erode(&image, &mut eroded, 3)?;

        // 0.7 binarizes to white and the whole row survives erosion
        assert!(eroded.as_slice().chunks_exact(4).all(|px| px[0] == 1.0));

        Ok(())
    }

    #[test]
    fn even_structuring_element_is_rejected() -> Result<(), ImageError> {
        let image = lone_pixel5x5()?;
        let mut out = Image::from_size_val(image.size(), 0.0)?;

        assert!(matches!(
            erode(&image, &mut out, 4),
            Err(ImageError::InvalidKernelSize(4))
        ));
        assert!(matches!(
            dilate(&image, &mut out, 0),
            Err(ImageError::InvalidKernelSize(0))
        ));

        Ok(())
    }
}
