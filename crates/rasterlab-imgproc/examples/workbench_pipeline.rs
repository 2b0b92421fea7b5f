use rasterlab_image::{Image, ImageSize};
use rasterlab_imgproc::color;
use rasterlab_imgproc::features::canny;
use rasterlab_imgproc::histogram::{self, IntensityTransform};
use rasterlab_imgproc::morphology;
use rasterlab_imgproc::threshold;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // synthetic scene: a dark-to-bright diagonal ramp with a bright square
    let size = ImageSize {
        width: 64,
        height: 64,
    };
    let mut data = Vec::with_capacity(64 * 64 * 4);
    for y in 0..64 {
        for x in 0..64 {
            let ramp = (x + y) as f64 / 254.0;
            let v = if (20..44).contains(&x) && (20..44).contains(&y) {
                0.85
            } else {
                ramp
            };
            data.extend_from_slice(&[v, v, v, 1.0]);
        }
    }
    let image = Image::new(size, data)?;

    // histogram statistics of the gray plane
    let mut gray = Image::from_size_val(size, 0.0)?;
    color::gray_from_rgba(&image, &mut gray)?;
    let hist = histogram::compute_histogram(&gray);
    let probability = histogram::histogram_probability(&hist);
    let stats = histogram::histogram_stats(&probability);
    println!("mean: {:.2}", stats.mean);
    println!("std dev: {:.2}", stats.std_dev);
    println!("entropy: {:.2} bits", stats.entropy);

    // histogram equalization
    let mut equalized = Image::from_size_val(size, 0.0)?;
    histogram::transform_intensity(&gray, &mut equalized, IntensityTransform::Uniform)?;

    // edges of the equalized scene
    let mut edges = Image::from_size_val(size, 0.0)?;
    canny(&equalized, &mut edges, 30.0, 75.0)?;
    let edge_pixels = edges
        .as_slice()
        .chunks_exact(4)
        .filter(|px| px[0] == 1.0)
        .count();
    println!("edge pixels: {edge_pixels}");

    // clean the edge map with a morphological opening
    let mut binary = Image::from_size_val(size, 0.0)?;
    threshold::binarize(&edges, &mut binary, 0.5)?;
    let mut opened = Image::from_size_val(size, 0.0)?;
    morphology::open(&binary, &mut opened, 3)?;
    let surviving = opened
        .as_slice()
        .chunks_exact(4)
        .filter(|px| px[0] == 1.0)
        .count();
    println!("edge pixels after opening: {surviving}");

    Ok(())
}
