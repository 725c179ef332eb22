//! CPU surface for stroke rendering - RGBA f32 storage

use tracing::debug;

/// Capability interface the stroke pipeline paints through.
///
/// Keeping the pipeline behind this trait means the smoothing and stamping
/// logic can be exercised against a mock target, independent of the CPU
/// surface or any GPU upload path.
pub trait PaintTarget {
    /// Reallocate the target to the new dimensions, losing prior content
    fn resize(&mut self, width: u32, height: u32);

    /// Fill the entire target with a solid color
    fn fill(&mut self, color: [f32; 4]);

    /// Stamp an anti-aliased solid disc centered at (cx, cy)
    fn stamp(&mut self, cx: f32, cy: f32, radius: f32, color: [f32; 4]);
}

/// An RGBA CPU surface backing the drawing
/// Stores pixels as [f32; 4] (Rgba16Float compatible)
pub struct RasterSurface {
    /// Surface dimensions
    pub width: u32,
    pub height: u32,
    /// Background color used by `resize` and `clear`
    background: [f32; 4],
    /// Pixel data in row-major order, each pixel is [r, g, b, a] as f32
    pixels: Vec<[f32; 4]>,
}

impl RasterSurface {
    /// Create a new surface with the given dimensions, filled with the background color
    pub fn new(width: u32, height: u32, background: [f32; 4]) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            background,
            pixels: vec![background; pixel_count],
        }
    }

    /// Repaint the entire surface with the background color, erasing all strokes
    pub fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    /// The background color
    pub fn background(&self) -> [f32; 4] {
        self.background
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        Some(self.pixels[index])
    }

    /// Set a pixel at the given coordinates
    /// Does nothing if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [f32; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        self.pixels[index] = color;
    }

    /// Blend a color onto an existing pixel using alpha compositing
    /// Formula: out = src * alpha + dst * (1 - alpha)
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [f32; 4], opacity: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        let dst = self.pixels[index];

        let src_alpha = color[3] * opacity;
        let inv_src_alpha = 1.0 - src_alpha;

        self.pixels[index] = [
            color[0] * src_alpha + dst[0] * inv_src_alpha,
            color[1] * src_alpha + dst[1] * inv_src_alpha,
            color[2] * src_alpha + dst[2] * inv_src_alpha,
            src_alpha + dst[3] * inv_src_alpha,
        ];
    }

    /// Get raw pixel data as bytes (for texture upload or image interchange)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Quantize the surface to 8-bit RGBA, row-major
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            for channel in pixel {
                out.push((channel.clamp(0.0, 1.0) * 255.0 + 0.5) as u8);
            }
        }
        out
    }

    /// Get the total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Get direct access to pixel data (for advanced operations)
    #[inline]
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }
}

impl PaintTarget for RasterSurface {
    fn resize(&mut self, width: u32, height: u32) {
        debug!(
            "RasterSurface::resize: {}x{} -> {}x{}",
            self.width, self.height, width, height
        );
        self.width = width;
        self.height = height;
        let pixel_count = (width as usize) * (height as usize);
        self.pixels = vec![self.background; pixel_count];
    }

    fn fill(&mut self, color: [f32; 4]) {
        self.pixels.fill(color);
    }

    fn stamp(&mut self, cx: f32, cy: f32, radius: f32, color: [f32; 4]) {
        if radius <= 0.0 {
            return;
        }

        // Bounding box, padded by the anti-alias rim and clamped to the surface
        let x_min = ((cx - radius - 1.0).floor().max(0.0) as u32).min(self.width);
        let y_min = ((cy - radius - 1.0).floor().max(0.0) as u32).min(self.height);
        let x_max = ((cx + radius + 1.0).ceil().max(0.0) as u32).min(self.width);
        let y_max = ((cy + radius + 1.0).ceil().max(0.0) as u32).min(self.height);

        if x_min >= x_max || y_min >= y_max {
            return;
        }

        for py in y_min..y_max {
            for px in x_min..x_max {
                // Distance from the disc center, sampled at the pixel center
                let dx = (px as f32 + 0.5) - cx;
                let dy = (py as f32 + 0.5) - cy;
                let dist = (dx * dx + dy * dy).sqrt();

                // Coverage ramps from 1 inside the disc to 0 over a one-pixel rim
                let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(px, py, color, coverage);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BACKGROUND_COLOR;

    #[test]
    fn test_new_surface() {
        let surface = RasterSurface::new(100, 100, BACKGROUND_COLOR);
        assert_eq!(surface.width, 100);
        assert_eq!(surface.height, 100);
        assert_eq!(surface.pixel_count(), 10000);
        assert_eq!(surface.get_pixel(50, 50), Some(BACKGROUND_COLOR));
    }

    #[test]
    fn test_get_set_pixel() {
        let mut surface = RasterSurface::new(10, 10, BACKGROUND_COLOR);
        let color = [1.0, 0.5, 0.25, 1.0];

        surface.set_pixel(5, 5, color);
        assert_eq!(surface.get_pixel(5, 5), Some(color));

        // Out of bounds should return None
        assert_eq!(surface.get_pixel(100, 100), None);
    }

    #[test]
    fn test_clear_restores_background() {
        let mut surface = RasterSurface::new(10, 10, BACKGROUND_COLOR);
        surface.set_pixel(3, 3, [0.0, 0.0, 0.0, 1.0]);

        surface.clear();

        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(surface.get_pixel(x, y), Some(BACKGROUND_COLOR));
            }
        }
    }

    #[test]
    fn test_resize_reallocates_and_fills() {
        let mut surface = RasterSurface::new(10, 10, BACKGROUND_COLOR);
        surface.set_pixel(5, 5, [0.0, 0.0, 0.0, 1.0]);

        surface.resize(4, 6);

        assert_eq!(surface.width, 4);
        assert_eq!(surface.height, 6);
        assert_eq!(surface.pixel_count(), 24);
        for y in 0..6 {
            for x in 0..4 {
                assert_eq!(surface.get_pixel(x, y), Some(BACKGROUND_COLOR));
            }
        }
    }

    #[test]
    fn test_resize_same_size_is_safe() {
        let mut surface = RasterSurface::new(8, 8, BACKGROUND_COLOR);
        surface.set_pixel(1, 1, [0.0, 0.0, 0.0, 1.0]);

        surface.resize(8, 8);

        // Content is lost but dimensions are unchanged
        assert_eq!(surface.get_pixel(1, 1), Some(BACKGROUND_COLOR));
        assert_eq!(surface.pixel_count(), 64);
    }

    #[test]
    fn test_blend_pixel() {
        let mut surface = RasterSurface::new(10, 10, [1.0, 1.0, 1.0, 1.0]);

        // Blend 50% opaque red onto white
        surface.blend_pixel(5, 5, [1.0, 0.0, 0.0, 1.0], 0.5);

        let result = surface.get_pixel(5, 5).unwrap();
        assert!((result[0] - 1.0).abs() < 0.01);
        assert!((result[1] - 0.5).abs() < 0.01);
        assert!((result[2] - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_stamp_paints_interior_and_skips_exterior() {
        let mut surface = RasterSurface::new(32, 32, BACKGROUND_COLOR);
        surface.stamp(16.0, 16.0, 5.0, [0.0, 0.0, 0.0, 1.0]);

        // Disc center is solid ink
        let center = surface.get_pixel(16, 16).unwrap();
        assert!(center[0] < 0.01);

        // Far corner untouched
        assert_eq!(surface.get_pixel(0, 0), Some(BACKGROUND_COLOR));
    }

    #[test]
    fn test_stamp_outside_bounds_is_noop() {
        let mut surface = RasterSurface::new(16, 16, BACKGROUND_COLOR);
        let before = surface.as_bytes().to_vec();

        surface.stamp(-100.0, -100.0, 5.0, [0.0, 0.0, 0.0, 1.0]);

        assert_eq!(surface.as_bytes(), &before[..]);
    }

    #[test]
    fn test_as_bytes() {
        let surface = RasterSurface::new(2, 2, BACKGROUND_COLOR);
        let bytes = surface.as_bytes();
        // 4 pixels * 4 components * 4 bytes per f32 = 64 bytes
        assert_eq!(bytes.len(), 64);
    }

    #[test]
    fn test_to_rgba8() {
        let mut surface = RasterSurface::new(2, 1, BACKGROUND_COLOR);
        surface.set_pixel(1, 0, [0.0, 0.0, 0.0, 1.0]);

        let bytes = surface.to_rgba8();
        assert_eq!(bytes, vec![255, 255, 255, 255, 0, 0, 0, 255]);
    }
}
