#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use crate::domain::Rgb;

pub const DEFAULT_SCALE: f32 = 8.0;
pub const MIN_SCALE: f32 = 1.0;
pub const MAX_SCALE: f32 = 32.0;

/// Straight-alpha color used by every paint operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    #[must_use]
    pub const fn white(alpha: f32) -> Self {
        Self {
            r: 255,
            g: 255,
            b: 255,
            a: alpha,
        }
    }
}

/// 2D drawing context over logical pixel coordinates.
pub trait DrawContext {
    /// Logical `(width, height)`.
    fn size(&self) -> (f32, f32);
    fn clear(&mut self);
    fn fill_vertical_gradient(&mut self, top: Rgb, bottom: Rgb);
    fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: Rgba);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        self.fill_ellipse(cx, cy, radius, radius, color);
    }
    fn stroke_vertical_line(&mut self, x: f32, y0: f32, y1: f32, width: f32, color: Rgba);
}

/// Anything that may hand out a drawing context. `None` means the surface
/// cannot be painted right now.
pub trait Surface {
    type Context: DrawContext;

    fn context(&mut self) -> Option<&mut Self::Context>;
}

/// RGB raster backing the terminal backdrop. Each terminal cell holds two
/// vertically stacked pixels; each pixel spans `scale` logical pixels.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    columns: u16,
    rows: u16,
    scale: f32,
    pixels: Vec<Rgb>,
}

impl PixelCanvas {
    #[must_use]
    pub fn new(columns: u16, rows: u16, scale: f32) -> Self {
        let mut canvas = Self {
            columns: 0,
            rows: 0,
            scale: clamp_scale(scale),
            pixels: Vec::new(),
        };
        canvas.resize(columns, rows);
        canvas
    }

    /// Resizes to a terminal area of `columns x rows` cells. Contents are
    /// cleared.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
        self.pixels = vec![(0, 0, 0); usize::from(columns) * usize::from(rows) * 2];
    }

    #[must_use]
    pub fn cells(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Raster `(width, height)` in pixels.
    #[must_use]
    pub fn raster_size(&self) -> (usize, usize) {
        (usize::from(self.columns), usize::from(self.rows) * 2)
    }

    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        let (w, h) = self.raster_size();
        if x >= w || y >= h {
            return None;
        }
        self.pixels.get(y * w + x).copied()
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgba) {
        let (w, h) = self.raster_size();
        if x >= w || y >= h {
            return;
        }
        let alpha = color.a.clamp(0.0, 1.0);
        let dst = &mut self.pixels[y * w + x];
        *dst = (
            mix_channel(dst.0, color.r, alpha),
            mix_channel(dst.1, color.g, alpha),
            mix_channel(dst.2, color.b, alpha),
        );
    }

    fn to_raster(&self, logical: f32) -> f32 {
        logical / self.scale
    }

    /// Raster pixel containing a logical point, if it is on the canvas.
    fn containing_pixel(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let (w, h) = self.raster_size();
        let px = self.to_raster(x).floor();
        let py = self.to_raster(y).floor();
        if px < 0.0 || py < 0.0 || px >= w as f32 || py >= h as f32 {
            return None;
        }
        Some((px as usize, py as usize))
    }
}

impl DrawContext for PixelCanvas {
    fn size(&self) -> (f32, f32) {
        let (w, h) = self.raster_size();
        (w as f32 * self.scale, h as f32 * self.scale)
    }

    fn clear(&mut self) {
        self.pixels.fill((0, 0, 0));
    }

    fn fill_vertical_gradient(&mut self, top: Rgb, bottom: Rgb) {
        let (w, h) = self.raster_size();
        if w == 0 || h == 0 {
            return;
        }
        for y in 0..h {
            let t = (y as f32 + 0.5) / h as f32;
            let color = lerp_rgb(top, bottom, t);
            self.pixels[y * w..(y + 1) * w].fill(color);
        }
    }

    fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: Rgba) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let (w, h) = self.raster_size();
        let x_start = self.to_raster(cx - rx).floor().max(0.0) as usize;
        let x_end = (self.to_raster(cx + rx).ceil().max(0.0) as usize).min(w);
        let y_start = self.to_raster(cy - ry).floor().max(0.0) as usize;
        let y_end = (self.to_raster(cy + ry).ceil().max(0.0) as usize).min(h);

        let mut painted = false;
        for py in y_start..y_end {
            let ly = (py as f32 + 0.5) * self.scale;
            let dy = (ly - cy) / ry;
            for px in x_start..x_end {
                let lx = (px as f32 + 0.5) * self.scale;
                let dx = (lx - cx) / rx;
                if dx * dx + dy * dy <= 1.0 {
                    self.blend(px, py, color);
                    painted = true;
                }
            }
        }

        // Shapes smaller than a pixel still mark the pixel under their center.
        if !painted && let Some((px, py)) = self.containing_pixel(cx, cy) {
            self.blend(px, py, color);
        }
    }

    fn stroke_vertical_line(&mut self, x: f32, y0: f32, y1: f32, width: f32, color: Rgba) {
        let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        let half = width / 2.0;
        if width <= 0.0 || bottom < 0.0 || x + half < 0.0 {
            return;
        }
        let (w, h) = self.raster_size();
        let x_start = self.to_raster(x - half).floor().max(0.0) as usize;
        let x_end = (self.to_raster(x + half).ceil().max(0.0) as usize)
            .max(x_start + 1)
            .min(w);
        let y_start = self.to_raster(top).floor().max(0.0) as usize;
        let y_end = (self.to_raster(bottom).ceil().max(0.0) as usize)
            .max(y_start + 1)
            .min(h);
        for py in y_start..y_end {
            for px in x_start..x_end {
                self.blend(px, py, color);
            }
        }
    }
}

impl Surface for PixelCanvas {
    type Context = PixelCanvas;

    fn context(&mut self) -> Option<&mut PixelCanvas> {
        if self.columns == 0 || self.rows == 0 {
            None
        } else {
            Some(self)
        }
    }
}

#[must_use]
pub fn clamp_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        DEFAULT_SCALE
    }
}

pub fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let channel = |from: u8, to: u8| -> u8 {
        (f32::from(from) + (f32::from(to) - f32::from(from)) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    (channel(a.0, b.0), channel(a.1, b.1), channel(a.2, b.2))
}

fn mix_channel(dst: u8, src: u8, alpha: f32) -> u8 {
    (f32::from(src) * alpha + f32::from(dst) * (1.0 - alpha))
        .round()
        .clamp(0.0, 255.0) as u8
}
