//! Background lookup for rays that leave the scene.
//!
//! An environment is either a solid color or an equirectangular map
//! addressed by ray direction. Both are immutable once built and are
//! passed by reference into the renderer.

use std::f32::consts::PI;
use std::path::Path;

use lumen_math::{Interval, Vec3};

use crate::error::{EnvMapError, EnvMapResult};
use crate::material::Color;

/// Equirectangular environment map.
///
/// Stores colors in row-major order, top row first.
#[derive(Clone, Debug)]
pub struct EnvMap {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl EnvMap {
    /// Create an environment map from pixel data.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> EnvMapResult<Self> {
        if width == 0 || height == 0 {
            return Err(EnvMapError::InvalidResolution { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(EnvMapError::PixelCount {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Load an environment map from an image file.
    ///
    /// Channels are mapped to 0-1 by dividing by 255; no transfer curve is
    /// applied, so an unlit background reproduces the source image.
    pub fn load(path: impl AsRef<Path>) -> EnvMapResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| EnvMapError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb
            .pixels()
            .map(|p| Vec3::new(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0)
            .collect();

        let map = Self::from_pixels(width, height, pixels)?;
        log::debug!("Loaded environment map: {} ({}x{})", path.display(), width, height);
        Ok(map)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel coordinates for a direction.
    ///
    /// `phi = atan2(z, x)` spans the columns and `theta = acos(y)` spans
    /// the rows, so +y maps to the top row.
    pub fn texel_coords(&self, dir: Vec3) -> (u32, u32) {
        let d = dir.normalize_or_zero();
        let phi = d.z.atan2(d.x);
        let theta = d.y.clamp(-1.0, 1.0).acos();

        let x = (phi + PI) / (2.0 * PI) * self.width as f32;
        let y = theta / PI * self.height as f32;

        let x = Interval::new(0.0, (self.width - 1) as f32).clamp(x) as u32;
        let y = Interval::new(0.0, (self.height - 1) as f32).clamp(y) as u32;
        (x, y)
    }

    /// Color seen along a direction.
    pub fn sample(&self, dir: Vec3) -> Color {
        let (x, y) = self.texel_coords(dir);
        self.pixels[(y * self.width + x) as usize]
    }
}

/// What a ray sees when it escapes the scene.
#[derive(Clone, Debug)]
pub enum Environment {
    /// The same color in every direction
    Solid(Color),
    /// Direction-indexed image
    Map(EnvMap),
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Solid(Vec3::new(0.2, 0.7, 0.8))
    }
}

impl Environment {
    /// Color seen along a direction.
    pub fn sample(&self, dir: Vec3) -> Color {
        match self {
            Environment::Solid(color) => *color,
            Environment::Map(map) => map.sample(dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each texel's red channel encodes its column, green its row.
    fn gradient_map(width: u32, height: u32) -> EnvMap {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                pixels.push(Vec3::new(x as f32, y as f32, 0.0));
            }
        }
        EnvMap::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn test_invalid_resolution() {
        assert!(matches!(
            EnvMap::from_pixels(0, 4, Vec::new()),
            Err(EnvMapError::InvalidResolution { .. })
        ));
        assert!(matches!(
            EnvMap::from_pixels(2, 2, vec![Vec3::ZERO; 3]),
            Err(EnvMapError::PixelCount { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_poles_map_to_edge_rows() {
        let map = gradient_map(8, 4);
        assert_eq!(map.texel_coords(Vec3::Y).1, 0);
        assert_eq!(map.texel_coords(-Vec3::Y).1, 3);
    }

    #[test]
    fn test_horizon_columns() {
        let map = gradient_map(8, 4);
        // phi = 0 lands at the middle column
        assert_eq!(map.texel_coords(Vec3::X), (4, 2));
        // phi grows from -z through +x to +z
        let (neg_z, _) = map.texel_coords(-Vec3::Z);
        let (pos_z, _) = map.texel_coords(Vec3::Z);
        assert!(neg_z < 4 && 4 < pos_z);
    }

    #[test]
    fn test_seam_is_continuous() {
        let map = gradient_map(64, 32);
        let eps = 1e-4;
        // Just below +pi and just above -pi
        let below = Vec3::new(-1.0, 0.0, eps);
        let above = Vec3::new(-1.0, 0.0, -eps);
        let (xb, _) = map.texel_coords(below);
        let (xa, _) = map.texel_coords(above);
        assert_eq!(xb, 63);
        assert_eq!(xa, 0);
        // Adjacent once the columns wrap around
        assert_eq!((xb + 1) % map.width(), xa);
    }

    #[test]
    fn test_sample_reads_texel() {
        let map = gradient_map(8, 4);
        let c = map.sample(Vec3::X);
        assert_eq!(c, Vec3::new(4.0, 2.0, 0.0));
    }

    #[test]
    fn test_solid_environment() {
        let env = Environment::Solid(Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(env.sample(Vec3::X), Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(env.sample(-Vec3::Y), Vec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("lumen_envmap_test.png");
        let mut img = image::RgbImage::new(4, 2);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        img.save(&path).unwrap();

        let map = EnvMap::load(&path).unwrap();
        assert_eq!((map.width(), map.height()), (4, 2));
        // +y reads the top row; pixel (0, 0) sits at phi = -pi
        let c = map.sample(Vec3::new(-1.0, 1.0, -1e-3));
        assert_eq!(c, Vec3::new(1.0, 0.0, 0.0));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = EnvMap::load("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, EnvMapError::Load { .. }));
    }
}
