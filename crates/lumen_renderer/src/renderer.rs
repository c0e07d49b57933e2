//! Frame rendering: one primary ray per pixel into a linear framebuffer.

use std::time::Instant;

use lumen_core::{Color, Environment, Scene};
use rayon::prelude::*;

use crate::integrator::cast_ray;
use crate::{Camera, RenderConfig};

/// Row-major buffer of unclamped linear RGB colors.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render a single pixel.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    env: &Environment,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    let ray = camera.get_ray(x, y);
    cast_ray(&ray, scene, env, 0, config)
}

/// Fill one scanline of the framebuffer.
fn render_row(row: &mut [Color], y: u32, camera: &Camera, scene: &Scene, env: &Environment, config: &RenderConfig) {
    for (x, pixel) in row.iter_mut().enumerate() {
        *pixel = render_pixel(camera, scene, env, x as u32, y, config);
    }
}

/// Render the entire scene on the calling thread, row by row.
pub fn render(camera: &Camera, scene: &Scene, env: &Environment, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    let row_len = (image.width as usize).max(1);

    for (y, row) in image.pixels.chunks_mut(row_len).enumerate() {
        render_row(row, y as u32, camera, scene, env, config);
    }

    log::info!(
        "Rendered {}x{} in {:.2?}",
        camera.image_width,
        camera.image_height,
        start.elapsed()
    );
    image
}

/// Render the entire scene across the rayon thread pool.
///
/// Each worker owns whole scanlines of the framebuffer, so the result
/// matches [`render`] exactly.
pub fn render_parallel(camera: &Camera, scene: &Scene, env: &Environment, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    let row_len = (image.width as usize).max(1);
    log::debug!(
        "Rendering {} scanlines on {} threads",
        image.height,
        rayon::current_num_threads()
    );

    image
        .pixels
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| render_row(row, y as u32, camera, scene, env, config));

    log::info!(
        "Rendered {}x{} in {:.2?}",
        camera.image_width,
        camera.image_height,
        start.elapsed()
    );
    image
}
