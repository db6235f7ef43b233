use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use png::{BitDepth, ColorType};

use crate::error::FinanceError;
use crate::FinanceResult;

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GRID: Rgb = Rgb(225, 225, 225);
    pub const AXIS: Rgb = Rgb(60, 60, 60);
    pub const RED: Rgb = Rgb(214, 39, 40);
    pub const BLUE: Rgb = Rgb(31, 119, 180);
    pub const ORANGE: Rgb = Rgb(255, 127, 14);
    pub const GREEN: Rgb = Rgb(44, 160, 44);
    pub const LIGHT_GREEN: Rgb = Rgb(144, 238, 144);
}

/// Row-major RGB raster.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..(width as usize * height as usize) {
            pixels.extend_from_slice(&[background.0, background.1, background.2]);
        }
        Canvas {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 3)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.offset(x, y)
            .map(|i| Rgb(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = color.0;
            self.pixels[i + 1] = color.1;
            self.pixels[i + 2] = color.2;
        }
    }

    /// Alpha-blend `color` over the existing pixel; `alpha` in 0.0..=1.0.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb, alpha: f64) {
        if let Some(i) = self.offset(x, y) {
            let a = alpha.clamp(0.0, 1.0);
            let mix = |dst: u8, src: u8| -> u8 {
                (f64::from(src) * a + f64::from(dst) * (1.0 - a)).round() as u8
            };
            self.pixels[i] = mix(self.pixels[i], color.0);
            self.pixels[i + 1] = mix(self.pixels[i + 1], color.1);
            self.pixels[i + 2] = mix(self.pixels[i + 2], color.2);
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb) {
        for yy in y..y + h {
            for xx in x..x + w {
                self.set_pixel(xx, yy, color);
            }
        }
    }

    /// Blend a vertical run of pixels between two rows, inclusive.
    pub fn blend_column(&mut self, x: i32, y_a: i32, y_b: i32, color: Rgb, alpha: f64) {
        let (top, bottom) = if y_a <= y_b { (y_a, y_b) } else { (y_b, y_a) };
        for y in top..=bottom {
            self.blend_pixel(x, y, color, alpha);
        }
    }

    /// Bresenham line with a square brush of `thickness` pixels. A non-zero
    /// `dash` draws `dash` pixels on, `dash` pixels off.
    pub fn draw_line(
        &mut self,
        (x0, y0): (i32, i32),
        (x1, y1): (i32, i32),
        color: Rgb,
        thickness: i32,
        dash: u32,
    ) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        let half = thickness.max(1) / 2;
        let mut step: u32 = 0;

        loop {
            let visible = dash == 0 || (step / dash) % 2 == 0;
            if visible {
                self.fill_rect(x - half, y - half, thickness.max(1), thickness.max(1), color);
            }
            step += 1;
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Encode as an 8-bit RGB PNG.
    pub fn write_png<W: Write>(&self, out: W) -> FinanceResult<()> {
        let mut encoder = png::Encoder::new(out, self.width, self.height);
        encoder.set_color(ColorType::Rgb);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| FinanceError::ChartEncoding(format!("png header failed: {e}")))?;
        writer
            .write_image_data(&self.pixels)
            .map_err(|e| FinanceError::ChartEncoding(format!("png data failed: {e}")))?;
        writer
            .finish()
            .map_err(|e| FinanceError::ChartEncoding(format!("png trailer failed: {e}")))
    }

    /// Write the canvas to `path` as a PNG file.
    pub fn save(&self, path: &Path) -> FinanceResult<()> {
        let io_err = |source: std::io::Error| FinanceError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        let mut out = BufWriter::new(file);
        self.write_png(&mut out)?;
        out.flush().map_err(io_err)?;
        info!("chart written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_filled() {
        let c = Canvas::new(4, 3, Rgb::WHITE);
        assert_eq!(c.pixel(3, 2), Some(Rgb::WHITE));
        assert_eq!(c.pixel(4, 0), None);
    }

    #[test]
    fn test_blend_half() {
        let mut c = Canvas::new(1, 1, Rgb::WHITE);
        c.blend_pixel(0, 0, Rgb::BLACK, 0.5);
        assert_eq!(c.pixel(0, 0), Some(Rgb(128, 128, 128)));
    }

    #[test]
    fn test_line_endpoints_drawn() {
        let mut c = Canvas::new(10, 10, Rgb::WHITE);
        c.draw_line((1, 1), (8, 6), Rgb::RED, 1, 0);
        assert_eq!(c.pixel(1, 1), Some(Rgb::RED));
        assert_eq!(c.pixel(8, 6), Some(Rgb::RED));
    }

    #[test]
    fn test_png_signature() {
        let c = Canvas::new(2, 2, Rgb::BLUE);
        let mut bytes = Vec::new();
        c.write_png(&mut bytes).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
