/// Something particles can be drawn on.
pub trait Surface {
    fn clear(&mut self);

    /// Filled circle centred on `(x, y)`, blended with opacity `alpha`.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, rgb: [u8; 3], alpha: f64);
}

/// Straight-alpha RGBA8 buffer, row major.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Reallocates the buffer; the contents are cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            *self = Self::new(width, height);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]]
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn blend(&mut self, x: u32, y: u32, rgb: [u8; 3], alpha: f64) {
        let i = self.offset(x, y);
        let dst_a = self.pixels[i + 3] as f64 / 255.0;
        let out_a = alpha + dst_a * (1.0 - alpha);
        if out_a <= 0.0 {
            return;
        }
        for c in 0..3 {
            let src = rgb[c] as f64;
            let dst = self.pixels[i + c] as f64;
            let value = (src * alpha + dst * dst_a * (1.0 - alpha)) / out_a;
            self.pixels[i + c] = value.round().clamp(0.0, 255.0) as u8;
        }
        self.pixels[i + 3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

impl Surface for PixelSurface {
    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, rgb: [u8; 3], alpha: f64) {
        if self.width == 0 || self.height == 0 || radius <= 0.0 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let max_x = self.width as f64 - 1.0;
        let max_y = self.height as f64 - 1.0;

        let x0 = (x - radius).floor().clamp(0.0, max_x) as u32;
        let x1 = (x + radius).ceil().clamp(0.0, max_x) as u32;
        let y0 = (y - radius).floor().clamp(0.0, max_y) as u32;
        let y1 = (y + radius).ceil().clamp(0.0, max_y) as u32;

        let r2 = radius * radius;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = px as f64 + 0.5 - x;
                let dy = py as f64 + 0.5 - y;
                if dx * dx + dy * dy <= r2 {
                    self.blend(px, py, rgb, alpha);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_covers_centre_not_corner() {
        let mut surface = PixelSurface::new(10, 10);
        surface.fill_circle(5.0, 5.0, 2.0, [255, 255, 255], 1.0);

        assert_eq!(surface.pixel(5, 5), [255, 255, 255, 255]);
        assert_eq!(surface.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(surface.pixel(9, 9), [0, 0, 0, 0]);
    }

    #[test]
    fn opacity_sets_alpha_and_overlaps_accumulate() {
        let mut surface = PixelSurface::new(4, 4);
        surface.fill_circle(2.0, 2.0, 1.0, [255, 255, 255], 0.5);
        assert_eq!(surface.pixel(1, 1)[3], 128);

        surface.fill_circle(2.0, 2.0, 1.0, [255, 255, 255], 0.5);
        let [r, g, b, a] = surface.pixel(1, 1);
        assert_eq!([r, g, b], [255, 255, 255]);
        assert!((191..=192).contains(&a), "alpha = {a}");
    }

    #[test]
    fn offscreen_circles_are_clipped() {
        let mut surface = PixelSurface::new(4, 4);
        surface.fill_circle(-20.0, 50.0, 3.0, [255, 255, 255], 1.0);
        assert!(surface.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn clear_and_resize_reset_pixels() {
        let mut surface = PixelSurface::new(4, 4);
        surface.fill_circle(2.0, 2.0, 2.0, [255, 255, 255], 1.0);
        surface.clear();
        assert!(surface.as_bytes().iter().all(|&b| b == 0));

        surface.resize(8, 2);
        assert_eq!((surface.width(), surface.height()), (8, 2));
        assert_eq!(surface.as_bytes().len(), 8 * 2 * 4);
    }
}
