mod hsv_spotlight;
mod shading_panels;
mod spotlight2d;
mod spotlight_sphere;

pub use hsv_spotlight::HsvSpotlight;
pub use shading_panels::ShadingPanels;
pub use spotlight2d::Spotlight2d;
pub use spotlight_sphere::SpotlightSphere;

use std::collections::HashSet;

use sdl2::keyboard::Keycode;

use crate::display::{InputEvent, PixelBuffer};

/// A self-contained lighting demo driven by the host loop
pub trait Demo {
    /// Input routed to the active demo only
    fn handle_event(&mut self, _event: &InputEvent) {}

    /// Advance state (called each frame before `render`)
    /// - dt: delta time in seconds
    /// - width/height: buffer dimensions
    fn update(&mut self, dt: f32, width: u32, height: u32);

    /// Render to the pixel buffer
    fn render(&self, buffer: &mut PixelBuffer);

    fn name(&self) -> &str;

    /// One-line key help, logged when the demo is selected
    fn controls(&self) -> &str {
        ""
    }
}

/// Keys currently held down, for per-frame movement
#[derive(Debug, Default)]
pub struct HeldKeys {
    down: HashSet<Keycode>,
}

impl HeldKeys {
    /// Track press/release; returns true if the event was a key event
    pub fn track(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::KeyDown(k) => {
                self.down.insert(*k);
                true
            },
            InputEvent::KeyUp(k) => {
                self.down.remove(k);
                true
            },
            _ => false,
        }
    }

    #[inline]
    pub fn is_down(&self, key: Keycode) -> bool {
        self.down.contains(&key)
    }

    /// -1, 0 or +1 from a pair of opposing keys
    pub fn axis(&self, negative: Keycode, positive: Keycode) -> f32 {
        let mut v = 0.0;
        if self.is_down(negative) {
            v -= 1.0;
        }
        if self.is_down(positive) {
            v += 1.0;
        }
        v
    }
}

/// Frame-rate independent scale for per-frame speeds tuned at 60 fps
#[inline]
pub fn frames_at_60(dt: f32) -> f32 {
    (dt * 60.0).min(4.0)
}
