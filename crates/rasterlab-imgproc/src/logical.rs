use rayon::prelude::*;

use crate::parallel;
use rasterlab_image::{Image, ImageError, ImageSize};

/// Binarization threshold applied to both operands before any logic.
const DEFAULT_THRESHOLD: f64 = 0.5;

/// Pixel-wise boolean operations between two binarized images.
///
/// The relational variants reuse the boolean algebra over white-is-true
/// pixels: `Greater` is `a && !b`, `GreaterEqual` is `a || !b`, `Less` is
/// `!a && b` and `LessEqual` is `!a || b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// White where both operands are white.
    And,
    /// White where at least one operand is white.
    Or,
    /// White where exactly one operand is white.
    Xor,
    /// White where the operands agree.
    Equal,
    /// White where the operands differ.
    NotEqual,
    /// White where `a` is white and `b` is black.
    Greater,
    /// White where `a` is white or `b` is black.
    GreaterEqual,
    /// White where `a` is black and `b` is white.
    Less,
    /// White where `a` is black or `b` is white.
    LessEqual,
}

impl LogicalOp {
    /// Evaluate the operation on a pair of truth values.
    pub fn evaluate(self, a: bool, b: bool) -> bool {
        match self {
            LogicalOp::And => a && b,
            LogicalOp::Or => a || b,
            LogicalOp::Xor => a ^ b,
            LogicalOp::Equal => a == b,
            LogicalOp::NotEqual => a != b,
            LogicalOp::Greater => a && !b,
            LogicalOp::GreaterEqual => a || !b,
            LogicalOp::Less => !a && b,
            LogicalOp::LessEqual => !a || b,
        }
    }
}

/// Truth value of an RGBA pixel under the binarization threshold.
fn truth(data: &[f64], cols: usize, x: usize, y: usize) -> bool {
    let offset = (y * cols + x) * 4;
    (data[offset] + data[offset + 1] + data[offset + 2]) / 3.0 >= DEFAULT_THRESHOLD
}

/// Combine two images with a pixel-wise boolean operation.
///
/// Both inputs are binarized at 0.5 first, so arbitrary RGBA images are
/// accepted. The output covers the overlapping region of the two inputs,
/// `min(widths) x min(heights)`, and is pure binary with alpha 1.
///
/// # Arguments
///
/// * `a` - The left operand.
/// * `b` - The right operand.
/// * `op` - The boolean operation to apply.
///
/// # Errors
///
/// Returns an error if the output image cannot be allocated.
///
/// # Example
///
/// ```
/// use rasterlab_image::{Image, ImageSize};
/// use rasterlab_imgproc::logical::{logical, LogicalOp};
///
/// let a = Image::<f64, 4>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0],
/// )
/// .unwrap();
/// let b = Image::<f64, 4>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
/// )
/// .unwrap();
///
/// let anded = logical(&a, &b, LogicalOp::And).unwrap();
/// assert_eq!(anded.as_slice()[0], 1.0);
/// assert_eq!(anded.as_slice()[4], 0.0);
/// ```
pub fn logical(
    a: &Image<f64, 4>,
    b: &Image<f64, 4>,
    op: LogicalOp,
) -> Result<Image<f64, 4>, ImageError> {
    let size = ImageSize {
        width: a.cols().min(b.cols()),
        height: a.rows().min(b.rows()),
    };
    let mut dst = Image::from_size_val(size, 0.0)?;

    let a_data = a.as_slice();
    let b_data = b.as_slice();
    let a_cols = a.cols();
    let b_cols = b.cols();

    dst.as_slice_mut()
        .par_chunks_exact_mut(4 * size.width)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for (x, dst_pixel) in dst_row.chunks_exact_mut(4).enumerate() {
                let pa = truth(a_data, a_cols, x, y);
                let pb = truth(b_data, b_cols, x, y);
                let v = if op.evaluate(pa, pb) { 1.0 } else { 0.0 };
                dst_pixel[0] = v;
                dst_pixel[1] = v;
                dst_pixel[2] = v;
                dst_pixel[3] = 1.0;
            }
        });

    Ok(dst)
}

/// Invert a binarized image.
///
/// The input is binarized at 0.5, then every white pixel becomes black and
/// vice versa. Applying the operator twice over an already binary image is
/// the identity.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output binary RGBA image.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn not(src: &Image<f64, 4>, dst: &mut Image<f64, 4>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let white = (src_pixel[0] + src_pixel[1] + src_pixel[2]) / 3.0 >= DEFAULT_THRESHOLD;
        let v = if white { 0.0 } else { 1.0 };
        dst_pixel[0] = v;
        dst_pixel[1] = v;
        dst_pixel[2] = v;
        dst_pixel[3] = 1.0;
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterlab_image::{Image, ImageError, ImageSize};

    fn chessboard(white_first: bool) -> Result<Image<f64, 4>, ImageError> {
        let (a, b) = if white_first { (1.0, 0.0) } else { (0.0, 1.0) };
        #[rustfmt::skip]
        let data = vec![
            a, a, a, 1.0, b, b, b, 1.0,
            b, b, b, 1.0, a, a, a, 1.0,
        ];
        Image::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            data,
        )
    }

    #[test]
    fn and_of_opposite_chessboards_is_black() -> Result<(), ImageError> {
        let a = chessboard(true)?;
        let b = chessboard(false)?;

        let out = logical(&a, &b, LogicalOp::And)?;

        for px in out.as_slice().chunks_exact(4) {
            assert_eq!(px, &[0.0, 0.0, 0.0, 1.0]);
        }

        Ok(())
    }

    #[test]
    fn truth_tables() -> Result<(), ImageError> {
        // one pixel per combination: (T,T), (T,F), (F,T), (F,F)
        let a = Image::new(
            ImageSize {
                width: 4,
                height: 1,
            },
            vec![
                1.0, 1.0, 1.0, 1.0, //
                1.0, 1.0, 1.0, 1.0, //
                0.0, 0.0, 0.0, 1.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        )?;
        let b = Image::new(
            ImageSize {
                width: 4,
                height: 1,
            },
            vec![
                1.0, 1.0, 1.0, 1.0, //
                0.0, 0.0, 0.0, 1.0, //
                1.0, 1.0, 1.0, 1.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        )?;

        let cases = [
            (LogicalOp::And, [1.0, 0.0, 0.0, 0.0]),
            (LogicalOp::Or, [1.0, 1.0, 1.0, 0.0]),
            (LogicalOp::Xor, [0.0, 1.0, 1.0, 0.0]),
            (LogicalOp::Equal, [1.0, 0.0, 0.0, 1.0]),
            (LogicalOp::NotEqual, [0.0, 1.0, 1.0, 0.0]),
            (LogicalOp::Greater, [0.0, 1.0, 0.0, 0.0]),
            (LogicalOp::GreaterEqual, [1.0, 1.0, 0.0, 1.0]),
            (LogicalOp::Less, [0.0, 0.0, 1.0, 0.0]),
            (LogicalOp::LessEqual, [1.0, 0.0, 1.0, 1.0]),
        ];

        for (op, expected) in cases {
            let out = logical(&a, &b, op)?;
            for (px, want) in out.as_slice().chunks_exact(4).zip(expected) {
                assert_eq!(px[0], want, "{op:?}");
                assert_eq!(px[3], 1.0);
            }
        }

        Ok(())
    }

    #[test]
    fn output_takes_minimum_size() -> Result<(), ImageError> {
        let a = Image::from_size_val(
            ImageSize {
                width: 5,
                height: 2,
            },
            1.0,
        )?;
        let b = Image::from_size_val(
            ImageSize {
                width: 3,
                height: 4,
            },
            1.0,
        )?;

        let out = logical(&a, &b, LogicalOp::Or)?;

        assert_eq!(out.cols(), 3);
        assert_eq!(out.rows(), 2);

        Ok(())
    }

    #[test]
    fn double_not_is_identity_on_binary() -> Result<(), ImageError> {
        let image = chessboard(true)?;

        let mut inverted = Image::from_size_val(image.size(), 0.0)?;
        not(&image, &mut inverted)?;
        let mut restored = Image::from_size_val(image.size(), 0.0)?;
        not(&inverted, &mut restored)?;

        assert_eq!(restored.as_slice(), image.as_slice());

        Ok(())
    }
}
