//! Low-level rendering primitives.
//!
//! [`Renderer`] owns the ARGB color buffer and implements the line-drawing
//! collaborator the pipeline hands its clipped segments to: black strokes
//! with small red endpoint markers, Bresenham rasterization. The buffer
//! can be presented through an SDL2 texture ([`Renderer::as_bytes`]) or
//! written to a PNG ([`Renderer::save_png`]).

use std::path::Path;

use thiserror::Error;

use crate::colors;
use crate::math::vec2::Vec2;
use crate::pipeline::LineSink;

/// Half-extent of the square marker drawn at segment endpoints.
const MARKER_RADIUS: i32 = 2;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Image(#[from] image::ImageError),
}

pub struct Renderer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            color_buffer: vec![colors::BACKGROUND; (width * height) as usize],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.color_buffer = vec![colors::BACKGROUND; (width * height) as usize];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = (y as u32 * self.width + x as u32) as usize;
            self.color_buffer[index] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.color_buffer[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    /// Draws a line between two points using Bresenham's algorithm.
    ///
    /// Integer arithmetic only: an error term tracks the distance to the
    /// ideal line, and each step along the major axis decides whether to
    /// also step along the minor axis.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let x_step = if x0 < x1 { 1 } else { -1 };
        let y_step = if y0 < y1 { 1 } else { -1 };

        let mut err = dx - dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_step;
            }
            if e2 < dx {
                err += dx;
                y += y_step;
            }
        }
    }

    /// Draws a filled square marker centered on (x, y).
    pub fn draw_marker(&mut self, x: i32, y: i32, color: u32) {
        for dy in -MARKER_RADIUS..=MARKER_RADIUS {
            for dx in -MARKER_RADIUS..=MARKER_RADIUS {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// The color buffer as raw ARGB8888 bytes for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Writes the current frame to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let frame = image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let (r, g, b, a) =
                colors::unpack_color(self.color_buffer[(y * self.width + x) as usize]);
            image::Rgba([r, g, b, a])
        });
        frame.save(path.as_ref())?;
        Ok(())
    }
}

/// The pipeline's rasterizer collaborator: black strokes, red endpoint
/// markers, matching the classic canvas look.
impl LineSink for Renderer {
    fn draw_line(&mut self, from: Vec2, to: Vec2) {
        let (x0, y0) = (from.x.round() as i32, from.y.round() as i32);
        let (x1, y1) = (to.x.round() as i32, to.y.round() as i32);
        Renderer::draw_line(self, x0, y0, x1, y1, colors::STROKE);
        self.draw_marker(x0, y0, colors::MARKER);
        self.draw_marker(x1, y1, colors::MARKER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_background() {
        let renderer = Renderer::new(4, 4);
        assert_eq!(renderer.get_pixel(0, 0), Some(colors::BACKGROUND));
        assert_eq!(renderer.get_pixel(3, 3), Some(colors::BACKGROUND));
        assert_eq!(renderer.get_pixel(4, 0), None);
    }

    #[test]
    fn horizontal_line_covers_every_column() {
        let mut renderer = Renderer::new(8, 8);
        renderer.draw_line(1, 3, 6, 3, colors::STROKE);
        for x in 1..=6 {
            assert_eq!(renderer.get_pixel(x, 3), Some(colors::STROKE));
        }
        assert_eq!(renderer.get_pixel(0, 3), Some(colors::BACKGROUND));
    }

    #[test]
    fn diagonal_line_hits_both_endpoints() {
        let mut renderer = Renderer::new(8, 8);
        renderer.draw_line(0, 0, 7, 5, colors::STROKE);
        assert_eq!(renderer.get_pixel(0, 0), Some(colors::STROKE));
        assert_eq!(renderer.get_pixel(7, 5), Some(colors::STROKE));
    }

    #[test]
    fn out_of_bounds_drawing_is_clipped_silently() {
        let mut renderer = Renderer::new(4, 4);
        renderer.draw_line(-2, 1, 6, 1, colors::STROKE);
        assert_eq!(renderer.get_pixel(0, 1), Some(colors::STROKE));
        assert_eq!(renderer.get_pixel(3, 1), Some(colors::STROKE));
    }

    #[test]
    fn sink_marks_segment_endpoints() {
        let mut renderer = Renderer::new(32, 32);
        LineSink::draw_line(
            &mut renderer,
            Vec2::new(8.0, 8.0),
            Vec2::new(20.0, 8.0),
        );
        assert_eq!(renderer.get_pixel(8, 8), Some(colors::MARKER));
        assert_eq!(renderer.get_pixel(20, 8), Some(colors::MARKER));
        // Between the markers the stroke shows.
        assert_eq!(renderer.get_pixel(14, 8), Some(colors::STROKE));
    }
}
