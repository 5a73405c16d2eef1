//! Drawing surfaces.
//!
//! [`Canvas`] is the only thing [`ParticleField::render`](crate::ParticleField::render)
//! talks to. [`RasterCanvas`] is the CPU implementation used for headless
//! export and tests; the window uses [`GpuCanvas`](crate::gpu::GpuCanvas).

use crate::error::{ExportError, SurfaceError};
use crate::palette::Color;
use glam::Vec2;
use image::{ImageFormat, RgbaImage};
use std::path::Path;

/// A 2D surface that can be wiped and painted with circles.
pub trait Canvas {
    /// Current `(width, height)` in pixels.
    fn size(&self) -> (u32, u32);

    /// Change the surface dimensions. Contents after a resize are blank.
    fn resize(&mut self, width: u32, height: u32);

    /// Wipe the whole surface to fully transparent.
    fn clear(&mut self);

    /// Paint a filled circle blended over the current contents.
    ///
    /// `alpha <= 0` paints nothing.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);
}

/// An RGBA8 surface in memory.
#[derive(Clone, Debug)]
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    /// Create a blank surface. Zero dimensions are a setup error.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::ZeroSized { width, height });
        }
        Ok(Self {
            image: RgbaImage::new(width, height),
        })
    }

    /// The backing image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// One pixel, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Whether every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p.0[3] == 0)
    }

    /// Write the surface as a PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

/// Straight-alpha source-over blend of `src` onto `dst`.
#[inline]
fn blend(dst: [u8; 4], src: [f32; 3], src_a: f32) -> [u8; 4] {
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for i in 0..3 {
        let d = dst[i] as f32 / 255.0;
        let c = (src[i] * src_a + d * dst_a * (1.0 - src_a)) / out_a;
        out[i] = (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    out[3] = (out_a.clamp(0.0, 1.0) * 255.0).round() as u8;
    out
}

impl Canvas for RasterCanvas {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
    }

    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            pixel.0 = [0, 0, 0, 0];
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        if !(alpha > 0.0) || !(radius > 0.0) {
            return;
        }
        let alpha = alpha.min(1.0);
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 {
            return;
        }

        let min_x = (center.x - radius).floor().max(0.0);
        let min_y = (center.y - radius).floor().max(0.0);
        let max_x = (center.x + radius).ceil().min(w as f32 - 1.0);
        let max_y = (center.y + radius).ceil().min(h as f32 - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }

        let r2 = radius * radius;
        let src = color.to_array();
        for y in min_y as u32..=max_y as u32 {
            for x in min_x as u32..=max_x as u32 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                if d.length_squared() <= r2 {
                    let pixel = self.image.get_pixel_mut(x, y);
                    pixel.0 = blend(pixel.0, src, alpha);
                }
            }
        }
    }
}
