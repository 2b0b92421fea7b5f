use rayon::prelude::*;

use rasterlab_image::Image;

/// Apply a function to each pixel pair of two images, row-parallel.
///
/// Rows are processed in parallel but every pixel is written exactly once,
/// so the result is identical to the sequential loop.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
{
    src.as_slice()
        .par_chunks_exact(C1 * src.cols())
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * src.cols()))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterlab_image::{ImageError, ImageSize};

    #[test]
    fn rows_pixelwise() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let src = Image::<f64, 2>::new(size, vec![1., 2., 3., 4., 5., 6., 7., 8.])?;
        let mut dst = Image::<f64, 1>::from_size_val(size, 0.0)?;

        par_iter_rows(&src, &mut dst, |src_pixel, dst_pixel| {
            dst_pixel[0] = src_pixel[0] + src_pixel[1];
        });

        assert_eq!(dst.as_slice(), &[3., 7., 11., 15.]);

        Ok(())
    }
}
