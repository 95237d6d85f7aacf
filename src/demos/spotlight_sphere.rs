//! Spotlight on a sphere
//!
//! A purple sphere under a movable spotlight. In outer mode the cutoff key
//! sets the hard cone edge; in inner mode it sets the inner angle of a soft
//! penumbra whose outer edge stays at the adjustment limit.

use sdl2::keyboard::Keycode;
use shadelab::config::SpotlightSettings;
use shadelab::math3d::clamp01;
use shadelab::spotlight::{to_light_level, CutoffMode, SpotlightConfig};
use shadelab::{Color, Vec3};
use tracing::{info, warn};

use super::{frames_at_60, Demo, HeldKeys};
use crate::display::{InputEvent, PixelBuffer};

const SPHERE_RADIUS: f32 = 150.0;
const MATERIAL: Color = Color::new(100.0 / 255.0, 50.0 / 255.0, 200.0 / 255.0);
const AMBIENT: f32 = 30.0 / 255.0;
/// Light levels at or below this (on the 0-255 scale) add nothing
const MIN_LIGHT_LEVEL: f32 = 0.01;
/// Canvas height the scene was laid out for
const REFERENCE_HEIGHT: f32 = 400.0;

pub struct SpotlightSphere {
    light: SpotlightConfig,
    /// Mode used when not in inner mode
    outer_mode: CutoffMode,
    cutoff_deg: f32,
    inner_mode: bool,
    move_speed: f32,
    angle_step: f32,
    min_angle: f32,
    max_angle: f32,
    keys: HeldKeys,
    dirty: bool,
}

impl SpotlightSphere {
    pub fn new(settings: &SpotlightSettings) -> Result<Self, String> {
        let light = settings.build().map_err(|e| e.to_string())?;
        let (outer_mode, inner_mode, cutoff_deg) = match settings.cutoff {
            CutoffMode::SmoothInnerOuter { inner_deg } => {
                if settings.outer_deg != settings.max_angle_deg {
                    warn!(
                        outer_deg = settings.outer_deg,
                        max_angle_deg = settings.max_angle_deg,
                        "inner mode holds the outer angle at the adjustment limit"
                    );
                }
                (CutoffMode::Hard, true, inner_deg)
            },
            mode => (mode, false, settings.outer_deg),
        };
        let mut demo = Self {
            light,
            outer_mode,
            cutoff_deg: cutoff_deg.clamp(settings.min_angle_deg, settings.max_angle_deg),
            inner_mode,
            move_speed: settings.move_speed,
            angle_step: settings.angle_step,
            min_angle: settings.min_angle_deg,
            max_angle: settings.max_angle_deg,
            keys: HeldKeys::default(),
            dirty: true,
        };
        demo.apply_cone();
        Ok(demo)
    }

    fn apply_cone(&mut self) {
        let result = if self.inner_mode {
            self.light.set_cone(
                CutoffMode::SmoothInnerOuter {
                    inner_deg: self.cutoff_deg,
                },
                self.max_angle,
            )
        } else {
            self.light.set_cone(self.outer_mode, self.cutoff_deg)
        };
        if let Err(e) = result {
            warn!(error = %e, cutoff_deg = self.cutoff_deg, "cone rejected");
        }
        self.dirty = true;
    }

    fn step_cutoff(&mut self, sign: f32) {
        self.cutoff_deg =
            (self.cutoff_deg + sign * self.angle_step).clamp(self.min_angle, self.max_angle);
        self.apply_cone();
    }

    fn log_status(&self) {
        let p = self.light.position();
        info!(
            mode = if self.inner_mode {
                "INNER cutoff (inner cone + soft outer)"
            } else {
                "OUTER cutoff (hard edge)"
            },
            cutoff_deg = self.cutoff_deg,
            spot_x = p.x,
            spot_y = p.y,
            spot_z = p.z,
            "spotlight"
        );
    }

    /// Lit color of the sphere surface point `p` with outward normal `n`
    fn shade(&self, p: Vec3, n: Vec3) -> Color {
        let intensity = self.light.intensity_at(p);
        let mut light = AMBIENT;
        if to_light_level(intensity) > MIN_LIGHT_LEVEL {
            let to_light = (self.light.position() - p).normalize();
            light += n.dot(&to_light).max(0.0) * intensity;
        }
        (MATERIAL * clamp01(light)).clamped()
    }
}

impl Demo for SpotlightSphere {
    fn handle_event(&mut self, event: &InputEvent) {
        self.keys.track(event);
        if let InputEvent::KeyDown(key) = event {
            match *key {
                Keycode::Plus | Keycode::Equals | Keycode::KpPlus => self.step_cutoff(1.0),
                Keycode::Minus | Keycode::Underscore | Keycode::KpMinus => self.step_cutoff(-1.0),
                Keycode::I => {
                    self.inner_mode = !self.inner_mode;
                    self.apply_cone();
                },
                _ => {},
            }
        }
    }

    fn update(&mut self, dt: f32, _width: u32, _height: u32) {
        let dx = self.keys.axis(Keycode::A, Keycode::D);
        let dz = self.keys.axis(Keycode::W, Keycode::S);
        if dx != 0.0 || dz != 0.0 {
            let step = self.move_speed * frames_at_60(dt);
            let pos = self.light.position() + Vec3::new(dx * step, 0.0, dz * step);
            if let Err(e) = self.light.set_position(pos) {
                warn!(error = %e, "light position rejected");
            }
            self.dirty = true;
        }

        if self.dirty {
            self.dirty = false;
            self.log_status();
        }
    }

    fn render(&self, buffer: &mut PixelBuffer) {
        buffer.clear(30, 30, 30);

        let width = buffer.width() as i32;
        let height = buffer.height() as i32;
        let cx = width as f32 / 2.0;
        let cy = height as f32 / 2.0;
        let scale = height as f32 / REFERENCE_HEIGHT;
        let r2 = SPHERE_RADIUS * SPHERE_RADIUS;

        for py in 0..height {
            let y = (py as f32 + 0.5 - cy) / scale;
            for px in 0..width {
                let x = (px as f32 + 0.5 - cx) / scale;
                let d2 = x * x + y * y;
                if d2 >= r2 {
                    continue;
                }
                let p = Vec3::new(x, y, (r2 - d2).sqrt());
                let n = p * (1.0 / SPHERE_RADIUS);
                buffer.put(px, py, self.shade(p, n));
            }
        }

        // Light marker, drawn only when in front of the sphere's silhouette plane
        let lp = self.light.position();
        if lp.z > 0.0 {
            buffer.fill_circle(
                (cx + lp.x * scale) as i32,
                (cy + lp.y * scale) as i32,
                4,
                255,
                255,
                200,
            );
        }
    }

    fn name(&self) -> &str {
        "Spotlight Sphere"
    }

    fn controls(&self) -> &str {
        "W/S: -/+Z, A/D: -/+X, -/+: cutoff angle, I: inner/outer mode"
    }
}
