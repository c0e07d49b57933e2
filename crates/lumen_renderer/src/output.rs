//! Tonemapping and image persistence.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use lumen_core::Color;
use lumen_math::Interval;
use thiserror::Error;

use crate::ImageBuffer;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Framebuffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Convert a linear color to 8-bit RGB.
///
/// Colors brighter than 1 in any channel are scaled down by that channel
/// so hue is kept; then each channel is clamped and quantized.
pub fn tonemap(color: Color) -> [u8; 3] {
    let max = color.max_element();
    let c = if max > 1.0 { color * (1.0 / max) } else { color };
    [
        (255.0 * Interval::UNIT.clamp(c.x)) as u8,
        (255.0 * Interval::UNIT.clamp(c.y)) as u8,
        (255.0 * Interval::UNIT.clamp(c.z)) as u8,
    ]
}

impl ImageBuffer {
    /// Convert to tightly packed RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&tonemap(*color));
        }
        bytes
    }
}

/// Save as binary PPM (P6).
pub fn save_ppm(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write!(writer, "P6\n{} {}\n255\n", image.width, image.height).map_err(io_err)?;
    writer.write_all(&image.to_rgb8()).map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}

/// Save an image, choosing the format from the file extension.
///
/// `.ppm` is written directly; every other extension goes through the
/// `image` crate encoders.
pub fn save_image(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    let is_ppm = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("ppm"))
        .unwrap_or(false);
    if is_ppm {
        return save_ppm(image, path);
    }

    let bytes = image.to_rgb8();
    let actual = bytes.len();
    let rgb = image::RgbImage::from_raw(image.width, image.height, bytes).ok_or(OutputError::BufferSize {
        expected: image.width as usize * image.height as usize * 3,
        actual,
    })?;
    rgb.save(path)?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Vec3;

    #[test]
    fn test_tonemap_in_range() {
        assert_eq!(tonemap(Vec3::ZERO), [0, 0, 0]);
        assert_eq!(tonemap(Vec3::ONE), [255, 255, 255]);
        assert_eq!(tonemap(Vec3::new(0.5, 0.25, 1.0)), [127, 63, 255]);
    }

    #[test]
    fn test_tonemap_rescales_overbright() {
        // Scaled by 1/2, keeping the channel ratios
        assert_eq!(tonemap(Vec3::new(2.0, 1.0, 0.5)), [255, 127, 63]);
    }

    #[test]
    fn test_tonemap_clamps_negative_and_nan() {
        assert_eq!(tonemap(Vec3::new(-1.0, 0.5, 0.0)), [0, 127, 0]);
        assert_eq!(tonemap(Vec3::new(f32::NAN, 0.0, 0.0)), [0, 0, 0]);
    }

    #[test]
    fn test_save_ppm_header() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(1, 0, Vec3::new(1.0, 0.0, 0.0));
        let path = std::env::temp_dir().join("lumen_output_test.ppm");
        save_image(&image, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let header = b"P6\n2 1\n255\n";
        assert_eq!(&bytes[..header.len()], header);
        assert_eq!(&bytes[header.len()..], &[0, 0, 0, 255, 0, 0]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_png_roundtrip() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Vec3::new(0.0, 1.0, 0.0));
        let path = std::env::temp_dir().join("lumen_output_test.png");
        save_image(&image, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1).0, [0, 255, 0]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_to_missing_directory() {
        let image = ImageBuffer::new(1, 1);
        let err = save_ppm(&image, "/definitely/not/here/out.ppm").unwrap_err();
        assert!(matches!(err, OutputError::Io { .. }));
    }
}
