mod channels;
mod cmy;
mod gray;
mod hsi;
mod hsv;
mod yiq;

pub use channels::{channel_view, extract_channel, rgb_split, RgbChannelViews};
pub use cmy::{cmy_from_rgb, cmyk_from_rgb, rgb_from_cmy, rgb_from_cmyk};
pub use gray::{gray_from_rgba, grayscale, luma601_from_rgba, rgba_from_gray};
pub use hsi::{hsi_from_rgb, rgb_from_hsi};
pub use hsv::{hsv_from_rgb, rgb_from_hsv};
pub use yiq::yiq_from_rgb;
