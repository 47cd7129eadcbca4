//! Greyscale PNG export with embedded metadata (tEXt chunks).

use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use greyship_core::{ComplexWindow, FractalParams, Variant};

use crate::intensity::GreyBuffer;

/// Render parameters embedded in an exported PNG as tEXt chunks.
#[derive(Debug, Clone)]
pub struct ExportMetadata {
    pub variant: Variant,
    pub window: ComplexWindow,
    pub max_iterations: u8,
}

impl ExportMetadata {
    pub fn new(variant: Variant, window: ComplexWindow, params: FractalParams) -> Self {
        Self {
            variant,
            window,
            max_iterations: params.max_iterations,
        }
    }
}

/// Write a greyscale buffer as an 8-bit PNG with embedded render metadata.
///
/// Uses the `png` crate directly to inject custom tEXt chunks. Failures are
/// returned as-is; the buffer is untouched, so the caller may retry.
pub fn export_png(
    buffer: &GreyBuffer,
    path: &Path,
    metadata: &ExportMetadata,
) -> crate::Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "greyship".to_string())?;
    encoder.add_text_chunk("Description".to_string(), build_description(metadata))?;
    for (key, value) in build_metadata_pairs(metadata) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.pixels)?;
    png_writer.finish()?;

    debug!(
        "Exported greyscale PNG {}x{} to {}",
        buffer.width,
        buffer.height,
        path.display()
    );
    Ok(())
}

fn build_description(meta: &ExportMetadata) -> String {
    let mut desc = format!(
        "{} - Center: {}, Extent: {}, Iterations: {}",
        meta.variant.name(),
        meta.window.center,
        meta.window.real_extent,
        meta.max_iterations,
    );
    if let Some(c) = meta.variant.julia_c() {
        desc.push_str(&format!(", Julia C: {c}"));
    }
    desc
}

fn build_metadata_pairs(meta: &ExportMetadata) -> Vec<(String, String)> {
    let w = &meta.window;
    let mut pairs = vec![
        ("Greyship.FractalType".into(), meta.variant.name().to_string()),
        ("Greyship.CenterRe".into(), w.center.re.to_string()),
        ("Greyship.CenterIm".into(), w.center.im.to_string()),
        ("Greyship.RealExtent".into(), w.real_extent.to_string()),
        ("Greyship.MaxIterations".into(), meta.max_iterations.to_string()),
        ("Greyship.Resolution".into(), format!("{}x{}", w.width, w.height)),
    ];
    if let Some(c) = meta.variant.julia_c() {
        pairs.push(("Greyship.JuliaC_Re".into(), c.re.to_string()));
        pairs.push(("Greyship.JuliaC_Im".into(), c.im.to_string()));
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use greyship_core::Complex;
    use std::io::Read;

    fn metadata(variant: Variant, width: u32, height: u32) -> ExportMetadata {
        let window = ComplexWindow::new(Complex::ZERO, 4.0, width, height).unwrap();
        ExportMetadata::new(variant, window, FractalParams::new(200).unwrap())
    }

    fn buffer(width: u32, height: u32) -> GreyBuffer {
        GreyBuffer {
            width,
            height,
            pixels: (0..width * height).map(|i| (i * 17 % 256) as u8).collect(),
        }
    }

    #[test]
    fn export_creates_valid_png() {
        let dir = std::env::temp_dir().join("greyship_test_export");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("test_export.png");
        export_png(&buffer(4, 4), &path, &metadata(Variant::BurningShip, 4, 4))
            .expect("export should succeed");

        let mut file = std::fs::File::open(&path).expect("file should exist");
        let mut header = [0u8; 8];
        file.read_exact(&mut header).expect("should read header");
        assert_eq!(&header, b"\x89PNG\r\n\x1a\n", "valid PNG signature");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_round_trips_pixels_and_text_chunks() {
        let dir = std::env::temp_dir().join("greyship_test_export_meta");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("test_meta.png");
        let buf = buffer(5, 3);
        let variant = Variant::Julia {
            c: Complex::new(-0.8, 0.156),
        };
        export_png(&buf, &path, &metadata(variant, 5, 3)).expect("export should succeed");

        let decoder = png::Decoder::new(std::fs::File::open(&path).expect("file should exist"));
        let mut reader = decoder.read_info().expect("should read info");
        {
            let info = reader.info();
            assert_eq!(info.color_type, png::ColorType::Grayscale);
            assert_eq!(info.bit_depth, png::BitDepth::Eight);
            let texts = &info.uncompressed_latin1_text;
            assert!(
                texts.iter().any(|t| t.keyword == "Software" && t.text == "greyship"),
                "Should contain Software text chunk"
            );
            assert!(
                texts
                    .iter()
                    .any(|t| t.keyword == "Greyship.FractalType" && t.text == "Julia"),
                "Should contain fractal type chunk"
            );
            assert!(
                texts
                    .iter()
                    .any(|t| t.keyword == "Greyship.JuliaC_Re" && t.text == "-0.8"),
                "Should contain Julia C Re chunk"
            );
        }

        let mut data = vec![0u8; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut data).expect("should decode frame");
        assert_eq!(&data[..frame.buffer_size()], &buf.pixels[..]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn burning_ship_has_no_julia_chunks() {
        let pairs = build_metadata_pairs(&metadata(Variant::BurningShip, 2, 2));
        assert!(pairs.iter().all(|(k, _)| !k.starts_with("Greyship.JuliaC")));
        assert!(pairs
            .iter()
            .any(|(k, v)| k == "Greyship.Resolution" && v == "2x2"));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let path = std::env::temp_dir()
            .join("greyship_test_export_missing")
            .join("nested")
            .join("out.png");
        let err = export_png(&buffer(2, 2), &path, &metadata(Variant::BurningShip, 2, 2))
            .unwrap_err();
        assert!(matches!(err, crate::RenderError::Io(_)), "got {err:?}");
    }
}
