use rasterlab_image::ImageError;

/// A square convolution kernel with an odd side, stored row-major.
///
/// The anchor sits at the central coefficient `(side / 2, side / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    side: usize,
    data: Vec<f64>,
}

impl Kernel {
    /// Create a kernel from row-major coefficients.
    ///
    /// # Arguments
    ///
    /// * `side` - The kernel side, odd and non-zero.
    /// * `data` - The coefficients, `side * side` values in row-major order.
    ///
    /// # Errors
    ///
    /// Returns an error if the side is even or zero, or if the data length
    /// does not match `side * side`.
    ///
    /// # Example
    ///
    /// ```
    /// use rasterlab_imgproc::filter::Kernel;
    ///
    /// let laplacian = Kernel::new(3, vec![0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0]).unwrap();
    /// assert_eq!(laplacian.side(), 3);
    /// assert_eq!(laplacian.get(1, 1), -4.0);
    /// ```
    pub fn new(side: usize, data: Vec<f64>) -> Result<Self, ImageError> {
        if side == 0 || side % 2 == 0 {
            return Err(ImageError::InvalidKernelSize(side));
        }
        if data.len() != side * side {
            return Err(ImageError::InvalidKernelLength(data.len(), side * side));
        }
        Ok(Self { side, data })
    }

    /// Build a kernel by evaluating a function of the signed offsets from
    /// the center, `f(dx, dy)` with `dx, dy` in `[-side/2, side/2]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the side is even or zero.
    pub fn from_fn(side: usize, f: impl Fn(i64, i64) -> f64) -> Result<Self, ImageError> {
        if side == 0 || side % 2 == 0 {
            return Err(ImageError::InvalidKernelSize(side));
        }
        let half = (side / 2) as i64;
        let mut data = Vec::with_capacity(side * side);
        for dy in -half..=half {
            for dx in -half..=half {
                data.push(f(dx, dy));
            }
        }
        Ok(Self { side, data })
    }

    /// Build a 3x3 kernel from a fixed coefficient array.
    pub fn from_3x3(data: [f64; 9]) -> Self {
        Self {
            side: 3,
            data: data.to_vec(),
        }
    }

    /// The kernel side length.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Half the side, the offset of the anchor from the border.
    pub fn half(&self) -> usize {
        self.side / 2
    }

    /// The coefficient at row `ky`, column `kx`.
    pub fn get(&self, ky: usize, kx: usize) -> f64 {
        self.data[ky * self.side + kx]
    }

    /// The coefficients in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Sum of all coefficients.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Divide every coefficient so the kernel sums to 1.
    ///
    /// Kernels with a zero sum are returned unchanged.
    pub fn normalized(mut self) -> Self {
        let sum = self.sum();
        if sum != 0.0 {
            self.data.iter_mut().for_each(|k| *k /= sum);
        }
        self
    }
}
