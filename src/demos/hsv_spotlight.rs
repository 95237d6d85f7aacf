//! Hue wheel on the floor under a spotlight
//!
//! The disc lies on the world floor, viewed by an orbit camera (right-drag
//! to rotate). Lit mode traces a ray per pixel to the floor and scales the
//! value channel by the spotlight; static mode draws the full-value wheel
//! as projected wedges.

use sdl2::keyboard::Keycode;
use shadelab::camera::{CameraView, DragTracker, OrbitCamera, Ray};
use shadelab::color::hsv_to_rgb;
use shadelab::config::LabConfig;
use shadelab::hue_field::{self, floor_to_plane, hue_wheel_wedges, plane_to_floor, spotlit_hue};
use shadelab::spotlight::SpotlightConfig;
use shadelab::{Color, Vec2};
use tracing::{debug, info};

use super::Demo;
use crate::display::{InputEvent, PixelBuffer, PointerButton};

const LIGHT_MARKER: (u8, u8, u8) = (255, 255, 200);

pub struct HsvSpotlight {
    camera: OrbitCamera,
    drag: DragTracker,
    /// Drag accumulated since the last update
    pending_drag: Option<Vec2>,
    light: SpotlightConfig,
    radius: f32,
    steps: u32,
    spotlit: bool,
    fov: f32,
}

impl HsvSpotlight {
    pub fn new(config: &LabConfig) -> Result<Self, String> {
        let light = config.hue_spotlight.build().map_err(|e| e.to_string())?;
        Ok(Self {
            camera: config.orbit.camera(),
            drag: DragTracker::new(),
            pending_drag: None,
            light,
            radius: config.hue_field.radius,
            steps: config.hue_field.steps,
            spotlit: config.hue_field.spotlit,
            fov: config.orbit.fov,
        })
    }

    fn accumulate_drag(&mut self, delta: Vec2) {
        self.pending_drag = Some(self.pending_drag.unwrap_or_else(Vec2::zero) + delta);
    }

    /// Floor color seen through screen position (sx, sy)
    fn floor_color(&self, view: &CameraView, sx: f32, sy: f32, cx: f32, cy: f32) -> Color {
        view.ray_through(sx, sy, self.fov, cx, cy)
            .intersect_horizontal_plane(0.0)
            .map_or(hue_field::BACKGROUND, |hit| {
                spotlit_hue(floor_to_plane(hit), self.radius, &self.light)
            })
    }

    fn render_spotlit(&self, buffer: &mut PixelBuffer, view: &CameraView, cx: f32, cy: f32) {
        let width = buffer.width() as i32;
        let height = buffer.height() as i32;
        for py in 0..height {
            for px in 0..width {
                let color = self.floor_color(view, px as f32 + 0.5, py as f32 + 0.5, cx, cy);
                buffer.put(px, py, color);
            }
        }
    }

    fn render_wheel(&self, buffer: &mut PixelBuffer, view: &CameraView, cx: f32, cy: f32) {
        let (r, g, b) = hue_field::BACKGROUND.to_rgb8();
        buffer.clear(r, g, b);

        let Some(center) = view.project(plane_to_floor(Vec2::zero()), self.fov, cx, cy) else {
            return;
        };
        for wedge in hue_wheel_wedges(self.radius, self.steps) {
            let rim = [wedge.rim_start, wedge.rim_end]
                .map(|p| view.project(plane_to_floor(p), self.fov, cx, cy));
            let [Some(p0), Some(p1)] = rim else {
                continue;
            };
            let (r, g, b) = hsv_to_rgb(wedge.hue, 1.0, 1.0).to_rgb8();
            buffer.fill_polygon_blend(&[center, p0, p1], r, g, b, 255);
        }
    }

    fn draw_light(&self, buffer: &mut PixelBuffer, view: &CameraView, cx: f32, cy: f32) {
        let (r, g, b) = LIGHT_MARKER;
        let Some((lx, ly)) = view.project(self.light.position(), self.fov, cx, cy) else {
            return;
        };
        let beam = Ray {
            origin: self.light.position(),
            direction: self.light.axis(),
        };
        if let Some((fx, fy)) = beam
            .intersect_horizontal_plane(0.0)
            .and_then(|hit| view.project(hit, self.fov, cx, cy))
        {
            buffer.line_f(lx, ly, fx, fy, r, g, b);
        }
        buffer.fill_circle(lx as i32, ly as i32, 5, r, g, b);
    }
}

impl Demo for HsvSpotlight {
    fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown {
                at,
                button: PointerButton::Secondary,
            } => self.drag.press(at),
            InputEvent::PointerUp {
                button: PointerButton::Secondary,
                ..
            } => self.drag.release(),
            InputEvent::PointerMove(at) => {
                if let Some(delta) = self.drag.motion(at) {
                    self.accumulate_drag(delta);
                }
            },
            InputEvent::KeyDown(Keycode::H) => {
                self.spotlit = !self.spotlit;
                info!(spotlit = self.spotlit, "hue field lighting");
            },
            _ => {},
        }
    }

    fn update(&mut self, _dt: f32, _width: u32, _height: u32) {
        if let Some(delta) = self.pending_drag.take() {
            let eye = self.camera.update(Some(delta));
            debug!(
                yaw = self.camera.yaw(),
                pitch = self.camera.pitch(),
                eye_x = eye.x,
                eye_y = eye.y,
                eye_z = eye.z,
                "orbit"
            );
        }
    }

    fn render(&self, buffer: &mut PixelBuffer) {
        let view = self.camera.view();
        let cx = buffer.width() as f32 / 2.0;
        let cy = buffer.height() as f32 / 2.0;

        if self.spotlit {
            self.render_spotlit(buffer, &view, cx, cy);
        } else {
            self.render_wheel(buffer, &view, cx, cy);
        }
        self.draw_light(buffer, &view, cx, cy);
    }

    fn name(&self) -> &str {
        "HSV Spotlight"
    }

    fn controls(&self) -> &str {
        "right-drag: orbit, H: toggle spotlight"
    }
}
