//! CPU raster target shared by the visual algorithms and overlay
//! compositors. RGBA8, always opaque; blending writes alpha 255.

pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        let mut pixels = vec![0u8; (width as usize) * (height as usize) * 4];
        for px in pixels.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self {
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

    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// Raw RGBA bytes, row-major, ready for the encoder.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Blend the whole frame toward `color`. Algorithms use this with a low
    /// alpha instead of a hard clear so previous frames persist as trails.
    pub fn fade(&mut self, color: [u8; 3], alpha: f32) {
        let a = alpha.clamp(0.0, 1.0);
        let inv = 1.0 - a;
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = (color[0] as f32 * a + px[0] as f32 * inv) as u8;
            px[1] = (color[1] as f32 * a + px[1] as f32 * inv) as u8;
            px[2] = (color[2] as f32 * a + px[2] as f32 * inv) as u8;
            px[3] = 255;
        }
    }

    pub fn blend_pixel(&mut self, x: i32, y: i32, color: [u8; 3], alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        let a = alpha.clamp(0.0, 1.0);
        let inv = 1.0 - a;
        self.pixels[idx] = (color[0] as f32 * a + self.pixels[idx] as f32 * inv) as u8;
        self.pixels[idx + 1] = (color[1] as f32 * a + self.pixels[idx + 1] as f32 * inv) as u8;
        self.pixels[idx + 2] = (color[2] as f32 * a + self.pixels[idx + 2] as f32 * inv) as u8;
        self.pixels[idx + 3] = 255;
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: [u8; 3], alpha: f32) {
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                self.blend_pixel(x + dx, y + dy, color, alpha);
            }
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: [u8; 3], alpha: f32) {
        let r = radius.max(0.5);
        let r2 = r * r;
        let min_x = (cx - r).floor() as i32;
        let max_x = (cx + r).ceil() as i32;
        let min_y = (cy - r).floor() as i32;
        let max_y = (cy + r).ceil() as i32;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }

    /// Step-interpolated line segment.
    pub fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: [u8; 3], alpha: f32) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as i32;
        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            let x = (x0 + (x1 - x0) * t).round() as i32;
            let y = (y0 + (y1 - y0) * t).round() as i32;
            self.blend_pixel(x, y, color, alpha);
        }
    }
}
