use shadelab::Color;

// ============================================================================
// Utility Functions
// ============================================================================

/// Alpha blend a single color channel
/// Uses fast approximation: (x + 1 + (x >> 8)) >> 8 instead of x / 255
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

/// Write ABGR pixel to slice (RGBA8888 little-endian byte order)
#[inline]
fn write_pixel(dest: &mut [u8], r: u8, g: u8, b: u8) {
    dest[0] = 255; // A
    dest[1] = b; // B
    dest[2] = g; // G
    dest[3] = r; // R
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// RGBA8888 pixel buffer every demo renders into before upload
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width * height * 4) as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }

    pub fn clear(&mut self, r: u8, g: u8, b: u8) {
        for px in self.pixels.chunks_exact_mut(4) {
            write_pixel(px, r, g, b);
        }
    }

    /// Set a single pixel (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel(&mut self.pixels[idx..idx + 4], r, g, b);
        }
    }

    /// Set a pixel from a [0, 1] float color
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, color: Color) {
        let (r, g, b) = color.to_rgb8();
        self.set_pixel(x, y, r, g, b);
    }

    /// Read a pixel back as (r, g, b)
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<(u8, u8, u8)> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some((self.pixels[idx + 3], self.pixels[idx + 2], self.pixels[idx + 1]))
        } else {
            None
        }
    }

    /// Clipped span bounds for row `y`, None if nothing is visible
    #[inline]
    fn span(&self, x1: i32, x2: i32, y: i32) -> Option<(i32, i32)> {
        if y < 0 || y >= self.height as i32 {
            return None;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = x1.max(0);
        let end = x2.min(self.width as i32 - 1);
        (start <= end).then_some((start, end))
    }

    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, r: u8, g: u8, b: u8) {
        let Some((start, end)) = self.span(x1, x2, y) else {
            return;
        };
        let from = self.pixel_index(start as u32, y as u32);
        let to = self.pixel_index(end as u32, y as u32) + 4;
        for px in self.pixels[from..to].chunks_exact_mut(4) {
            write_pixel(px, r, g, b);
        }
    }

    pub fn hline_blend(&mut self, x1: i32, x2: i32, y: i32, r: u8, g: u8, b: u8, a: u8) {
        let Some((start, end)) = self.span(x1, x2, y) else {
            return;
        };
        let alpha = a as u16;
        let from = self.pixel_index(start as u32, y as u32);
        let to = self.pixel_index(end as u32, y as u32) + 4;
        for px in self.pixels[from..to].chunks_exact_mut(4) {
            px[0] = 255;
            px[1] = blend_channel(b, px[1], alpha);
            px[2] = blend_channel(g, px[2], alpha);
            px[3] = blend_channel(r, px[3], alpha);
        }
    }

    /// Line between float endpoints; non-finite endpoints draw nothing
    pub fn line_f(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, r: u8, g: u8, b: u8) {
        self.clipped_line([x0.into(), y0.into(), x1.into(), y1.into()], r, g, b);
    }

    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, r: u8, g: u8, b: u8) {
        self.clipped_line([x0.into(), y0.into(), x1.into(), y1.into()], r, g, b);
    }

    /// Clip to the buffer before rasterizing, so far-off or saturated
    /// projections neither overflow nor walk millions of offscreen pixels
    fn clipped_line(&mut self, ends: [f64; 4], r: u8, g: u8, b: u8) {
        let Some([x0, y0, x1, y1]) = self.clip_segment(ends) else {
            return;
        };
        self.bresenham(
            x0.round() as i32,
            y0.round() as i32,
            x1.round() as i32,
            y1.round() as i32,
            r,
            g,
            b,
        );
    }

    /// Liang-Barsky clip against the pixel rectangle
    fn clip_segment(&self, [x0, y0, x1, y1]: [f64; 4]) -> Option<[f64; 4]> {
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) || self.width == 0 || self.height == 0 {
            return None;
        }
        let xmax = f64::from(self.width - 1);
        let ymax = f64::from(self.height - 1);
        let dx = x1 - x0;
        let dy = y1 - y0;
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

        for (p, q) in [(-dx, x0), (dx, xmax - x0), (-dy, y0), (dy, ymax - y0)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                if t > t1 {
                    return None;
                }
                t0 = t0.max(t);
            } else {
                if t < t0 {
                    return None;
                }
                t1 = t1.min(t);
            }
        }
        Some([x0 + t0 * dx, y0 + t0 * dy, x0 + t1 * dx, y0 + t1 * dy])
    }

    /// Bresenham between endpoints already inside the buffer
    fn bresenham(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, r: u8, g: u8, b: u8) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel(x, y, r, g, b);
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

    /// Draw a filled circle using horizontal spans
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, r: u8, g: u8, b: u8) {
        let (w, h) = (self.width as i32, self.height as i32);
        if cx.saturating_add(radius) < 0
            || cy.saturating_add(radius) < 0
            || cx.saturating_sub(radius) >= w
            || cy.saturating_sub(radius) >= h
        {
            return;
        }
        if radius <= 0 {
            if radius == 0 {
                self.set_pixel(cx, cy, r, g, b);
            }
            return;
        }

        // Midpoint circle algorithm with span filling
        let mut x = radius;
        let mut y = 0;
        let mut err = 1 - radius;

        while x >= y {
            self.hline(cx - x, cx + x, cy + y, r, g, b);
            if y != 0 {
                self.hline(cx - x, cx + x, cy - y, r, g, b);
            }
            if x != y {
                self.hline(cx - y, cx + y, cy + x, r, g, b);
                if y != 0 {
                    self.hline(cx - y, cx + y, cy - x, r, g, b);
                }
            }

            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Fill a polygon with alpha blending (scanline, even-odd)
    pub fn fill_polygon_blend(&mut self, vertices: &[(f32, f32)], r: u8, g: u8, b: u8, a: u8) {
        if vertices.len() < 3 {
            return;
        }

        let (min_y, max_y) = vertices
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
        let min_y = (min_y as i32).max(0);
        let max_y = (max_y as i32).min(self.height as i32 - 1);

        let mut intersections = Vec::with_capacity(vertices.len());
        let n = vertices.len();

        for y in min_y..=max_y {
            intersections.clear();
            let yf = y as f32 + 0.5;

            for i in 0..n {
                let (x1, y1) = vertices[i];
                let (x2, y2) = vertices[(i + 1) % n];
                if (y1 <= yf && y2 > yf) || (y2 <= yf && y1 > yf) {
                    let x = x1 + (yf - y1) / (y2 - y1) * (x2 - x1);
                    intersections.push(x as i32);
                }
            }

            intersections.sort_unstable();
            for pair in intersections.chunks_exact(2) {
                self.hline_blend(pair[0], pair[1], y, r, g, b, a);
            }
        }
    }

    /// Raw bytes for SDL texture upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}
