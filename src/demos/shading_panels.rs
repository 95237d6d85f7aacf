//! Flat / noperspective / perspective-correct, side by side
//!
//! One triangle drawn three times across the window. Left click logs the
//! barycentric weights and shaded color under the cursor.

use shadelab::interpolation::{demo_triangle, interpolate, panel_at, shade_panels, Triangle};
use shadelab::Vec2;
use tracing::info;

use super::Demo;
use crate::display::{InputEvent, PixelBuffer, PointerButton};

const DIVIDER: (u8, u8, u8) = (60, 60, 60);

pub struct ShadingPanels {
    triangle: Triangle,
    size: (u32, u32),
}

impl ShadingPanels {
    pub fn new() -> Self {
        Self {
            triangle: demo_triangle(),
            size: (1, 1),
        }
    }

    fn inspect(&self, x: i32, y: i32) {
        let p = to_ndc(x, y, self.size.0, self.size.1);
        let (mode, offset) = panel_at(p.x);
        let shaded = interpolate(p, &self.triangle.translated(Vec2::new(offset, 0.0)), mode);
        let (a, b, c) = shaded.barycentric.weights;
        info!(
            mode = mode.label(),
            inside = shaded.barycentric.inside,
            a,
            b,
            c,
            color = ?shaded.color.to_rgb8(),
            "sample"
        );
    }
}

impl Default for ShadingPanels {
    fn default() -> Self {
        Self::new()
    }
}

/// Pixel center in normalized device coordinates (+Y up)
fn to_ndc(x: i32, y: i32, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (x as f32 + 0.5) / width as f32 * 2.0 - 1.0,
        1.0 - (y as f32 + 0.5) / height as f32 * 2.0,
    )
}

impl Demo for ShadingPanels {
    fn handle_event(&mut self, event: &InputEvent) {
        if let InputEvent::PointerDown {
            at,
            button: PointerButton::Primary,
        } = *event
        {
            self.inspect(at.x as i32, at.y as i32);
        }
    }

    fn update(&mut self, _dt: f32, width: u32, height: u32) {
        self.size = (width.max(1), height.max(1));
    }

    fn render(&self, buffer: &mut PixelBuffer) {
        let width = buffer.width();
        let height = buffer.height();
        for py in 0..height as i32 {
            for px in 0..width as i32 {
                let color = shade_panels(to_ndc(px, py, width, height), &self.triangle);
                buffer.put(px, py, color);
            }
        }

        let (r, g, b) = DIVIDER;
        let third = width as i32 / 3;
        for x in [third, width as i32 - third] {
            buffer.line(x, 0, x, height as i32 - 1, r, g, b);
        }
    }

    fn name(&self) -> &str {
        "Shading Panels"
    }

    fn controls(&self) -> &str {
        "left: flat, middle: noperspective, right: smooth; click to inspect"
    }
}
