//! Image output: plain-text PPM, or any format the `image` crate encodes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::renderer::color_to_rgb;
use crate::{ImageBuffer, RenderResult};

/// Write `image` as ASCII PPM (P3): a header with width, height and max
/// value 255, then one line of integer triples per row, top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, gamma_correction: bool, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        let row: Vec<String> = (0..image.width)
            .map(|x| {
                let [r, g, b] = color_to_rgb(image.get(x, y), gamma_correction);
                format!("{r} {g} {b}")
            })
            .collect();
        writeln!(writer, "{}", row.join(" "))?;
    }

    Ok(())
}

/// Save `buffer` to `path`. `.ppm` is written as P3 text; other extensions
/// are encoded by the `image` crate.
pub fn save<P: AsRef<Path>>(buffer: &ImageBuffer, gamma_correction: bool, path: P) -> RenderResult<()> {
    let path = path.as_ref();
    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let mut writer = BufWriter::new(File::create(path)?);
        write_ppm(buffer, gamma_correction, &mut writer)?;
        writer.flush()?;
    } else {
        let encoded = image::RgbImage::from_fn(buffer.width, buffer.height, |x, y| {
            image::Rgb(color_to_rgb(buffer.get(x, y), gamma_correction))
        });
        encoded.save(path)?;
    }

    log::info!("Saved {}", path.display());
    Ok(())
}
