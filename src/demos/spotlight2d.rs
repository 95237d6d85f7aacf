//! Spotlight cone in the plane
//!
//! A light on the left aims right; the cursor is the test point. The field
//! behind is shaded by the active cutoff mode so hard, linear, quadratic
//! and inner/outer edges can be compared in place.

use sdl2::keyboard::Keycode;
use shadelab::config::SpotlightSettings;
use shadelab::spotlight::{cone_edges_2d, CutoffMode, Falloff, SpotlightConfig};
use shadelab::{Color, Vec2, Vec3};
use tracing::{info, warn};

use super::Demo;
use crate::display::{InputEvent, PixelBuffer};

const BACKGROUND: Color = Color::gray(20.0 / 255.0);
const FIELD_TINT: Color = Color::new(0.3, 0.3, 0.0);
const AXIS_LENGTH: f32 = 180.0;
const EDGE_LENGTH: f32 = 200.0;

pub struct Spotlight2d {
    light: SpotlightConfig,
    modes: [CutoffMode; 4],
    mode_index: usize,
    cursor: Vec2,
    test_point: Vec2,
    inside: Option<bool>,
    size: (u32, u32),
}

impl Spotlight2d {
    pub fn new(settings: &SpotlightSettings) -> Result<Self, String> {
        let outer = settings.outer_deg;
        // The smooth slot keeps a configured inner angle, else splits the cone
        let inner_deg = match settings.cutoff {
            CutoffMode::SmoothInnerOuter { inner_deg } => inner_deg,
            _ => outer * 0.5,
        };
        let modes = [
            CutoffMode::Hard,
            CutoffMode::Linear {
                falloff: Falloff::Linear,
            },
            CutoffMode::Linear {
                falloff: Falloff::Quadratic,
            },
            CutoffMode::SmoothInnerOuter { inner_deg },
        ];
        let mode_index = modes
            .iter()
            .position(|m| *m == settings.cutoff)
            .unwrap_or(0);
        let light = SpotlightConfig::new(
            Vec3::zero(),
            Vec3::new(1.0, 0.0, 0.0),
            modes[mode_index],
            outer,
        )
        .map_err(|e| e.to_string())?;

        Ok(Self {
            light,
            modes,
            mode_index,
            cursor: Vec2::zero(),
            test_point: Vec2::zero(),
            inside: None,
            size: (0, 0),
        })
    }

    fn light_pos(&self) -> Vec2 {
        let p = self.light.position();
        Vec2::new(p.x, p.y)
    }

    fn cycle_mode(&mut self) {
        let next = (self.mode_index + 1) % self.modes.len();
        match self.light.set_cone(self.modes[next], self.light.outer_deg()) {
            Ok(()) => {
                self.mode_index = next;
                info!(mode = self.light.mode().label(), "cone mode");
            },
            Err(e) => warn!(error = %e, "cannot switch cone mode"),
        }
    }
}

impl Demo for Spotlight2d {
    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerMove(at) => self.cursor = *at,
            InputEvent::KeyDown(Keycode::M) => self.cycle_mode(),
            _ => {},
        }
    }

    fn update(&mut self, _dt: f32, width: u32, height: u32) {
        if self.size != (width, height) {
            self.size = (width, height);
            let pos = Vec3::new(width as f32 * 0.25, height as f32 * 0.5, 0.0);
            if let Err(e) = self.light.set_position(pos) {
                warn!(error = %e, "light position rejected");
            }
        }

        self.test_point = Vec2::new(
            self.cursor.x.clamp(0.0, width as f32),
            self.cursor.y.clamp(0.0, height as f32),
        );

        let dir = self.light.direction_to(self.test_point.extend(0.0));
        let inside = self.light.in_cone(dir);
        if self.inside != Some(inside) {
            self.inside = Some(inside);
            info!(
                cutoff_deg = self.light.outer_deg(),
                spot = self.light.spot_effect(dir),
                cos_cutoff = self.light.cos_outer(),
                inside,
                "spot = dot(-L, light_dir)"
            );
        }
    }

    fn render(&self, buffer: &mut PixelBuffer) {
        let width = buffer.width() as i32;
        let height = buffer.height() as i32;

        for y in 0..height {
            for x in 0..width {
                let sample = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);
                let intensity = self.light.intensity_at(sample);
                buffer.put(x, y, BACKGROUND + FIELD_TINT * intensity);
            }
        }

        let origin = self.light_pos();
        let (ox, oy) = (origin.x as i32, origin.y as i32);
        let axis = self.light.axis();
        let axis_angle = axis.y.atan2(axis.x);

        buffer.line(
            ox,
            oy,
            (origin.x + axis.x * AXIS_LENGTH) as i32,
            (origin.y + axis.y * AXIS_LENGTH) as i32,
            255,
            255,
            0,
        );

        let (a0, a1) = cone_edges_2d(axis_angle, self.light.outer_deg().to_radians());
        let edge0 = origin + Vec2::new(a0.cos(), a0.sin()) * EDGE_LENGTH;
        let edge1 = origin + Vec2::new(a1.cos(), a1.sin()) * EDGE_LENGTH;
        buffer.fill_polygon_blend(
            &[(origin.x, origin.y), (edge0.x, edge0.y), (edge1.x, edge1.y)],
            255,
            255,
            0,
            25,
        );
        for edge in [edge0, edge1] {
            buffer.line(ox, oy, edge.x as i32, edge.y as i32, 160, 160, 0);
        }

        buffer.fill_circle(ox, oy, 5, 255, 255, 0);

        let (tx, ty) = (self.test_point.x as i32, self.test_point.y as i32);
        buffer.line(ox, oy, tx, ty, 100, 100, 100);
        buffer.fill_circle(tx, ty, 7, 0, 0, 0);
        if self.inside == Some(true) {
            buffer.fill_circle(tx, ty, 6, 0, 200, 0);
        } else {
            buffer.fill_circle(tx, ty, 6, 120, 120, 120);
        }
    }

    fn name(&self) -> &str {
        "Spotlight 2D"
    }

    fn controls(&self) -> &str {
        "mouse: test point, M: cycle cutoff mode"
    }
}
