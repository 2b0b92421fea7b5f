#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use rasterlab_image as image;

#[doc(inline)]
pub use rasterlab_imgproc as imgproc;

#[doc(inline)]
pub use rasterlab_fourier as fourier;
