use rasterlab_image::Image;
use rasterlab_imgproc::features::canny;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Synthetic 24x24 scene with a bright rectangle
    let size = [24, 24].into();
    let mut data = Vec::with_capacity(24 * 24 * 4);
    for y in 0..24 {
        for x in 0..24 {
            let v = if (6..18).contains(&x) && (8..16).contains(&y) {
                0.9
            } else {
                0.1
            };
            data.extend_from_slice(&[v, v, v, 1.0]);
        }
    }
    let image = Image::new(size, data)?;

    let mut edges = Image::from_size_val(size, 0.0)?;
    canny(&image, &mut edges, 30.0, 75.0)?;

    for y in 0..edges.rows() {
        let mut line = String::with_capacity(edges.cols());
        for x in 0..edges.cols() {
            let offset = (y * edges.cols() + x) * 4;
            line.push(if edges.as_slice()[offset] > 0.5 { '#' } else { '.' });
        }
        println!("{line}");
    }

    Ok(())
}
