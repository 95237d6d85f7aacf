//! Orbit camera
//!
//! Yaw/pitch around a fixed target at a fixed distance. The accumulated
//! angles are owned by whoever drives the input; drag deltas only arrive
//! while the rotate button is held (see [`DragTracker`]).

use crate::math3d::{project, Vec2, Vec3};

/// Pitch is clamped to ±this many radians so the eye never crosses a pole
pub const PITCH_LIMIT: f32 = 0.9;
/// Radians per pixel of drag
pub const DEFAULT_SENSITIVITY: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    yaw: f32,
    pitch: f32,
    distance: f32,
    vertical_offset: f32,
    sensitivity: f32,
    target: Vec3,
}

impl OrbitCamera {
    /// Initial pitch is clamped like every later update
    pub fn new(yaw: f32, pitch: f32, distance: f32) -> Self {
        debug_assert!(distance > 0.0, "orbit distance must be positive");
        Self {
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            distance,
            vertical_offset: 0.0,
            sensitivity: DEFAULT_SENSITIVITY,
            target: Vec3::zero(),
        }
    }

    /// Lift the eye above the orbit plane by a constant amount
    pub fn with_vertical_offset(mut self, offset: f32) -> Self {
        self.vertical_offset = offset;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Accumulate a drag delta in pixels
    pub fn apply_drag(&mut self, delta: Vec2) {
        self.yaw += delta.x * self.sensitivity;
        self.pitch = (self.pitch + delta.y * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Eye position for the current angles
    pub fn eye(&self) -> Vec3 {
        let (sin_p, cos_p) = self.pitch.sin_cos();
        let (sin_y, cos_y) = self.yaw.sin_cos();
        Vec3::new(
            cos_y * cos_p * self.distance,
            sin_p * self.distance + self.vertical_offset,
            sin_y * cos_p * self.distance,
        )
    }

    /// Apply the frame's drag (if any) and return the new eye position
    pub fn update(&mut self, drag: Option<Vec2>) -> Vec3 {
        if let Some(delta) = drag {
            self.apply_drag(delta);
        }
        self.eye()
    }

    /// Look-at basis toward the target with world up (0, 1, 0)
    pub fn view(&self) -> CameraView {
        CameraView::look_at(self.eye(), self.target, Vec3::UP)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(0.4, 0.35, 600.0).with_vertical_offset(180.0)
    }
}

// ============================================================================
// View
// ============================================================================

/// Orthonormal camera frame. Screen space is +X right, +Y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub eye: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl CameraView {
    pub fn look_at(eye: Vec3, target: Vec3, world_up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let right = forward.cross(&world_up).normalize();
        let up = right.cross(&forward);
        Self {
            eye,
            forward,
            right,
            up,
        }
    }

    /// World point in camera space (+Z forward, +Y down)
    #[inline]
    pub fn to_camera(&self, p: Vec3) -> Vec3 {
        let d = p - self.eye;
        Vec3::new(d.dot(&self.right), -d.dot(&self.up), d.dot(&self.forward))
    }

    /// Screen position of a world point, None if behind the eye
    #[inline]
    pub fn project(&self, p: Vec3, fov: f32, cx: f32, cy: f32) -> Option<(f32, f32)> {
        project(self.to_camera(p), fov, cx, cy)
    }

    /// World-space ray through a screen position
    pub fn ray_through(&self, sx: f32, sy: f32, fov: f32, cx: f32, cy: f32) -> Ray {
        let direction =
            (self.forward * fov + self.right * (sx - cx) - self.up * (sy - cy)).normalize();
        Ray {
            origin: self.eye,
            direction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Hit point on the plane y = `height`, only in front of the origin
    pub fn intersect_horizontal_plane(&self, height: f32) -> Option<Vec3> {
        if self.direction.y.abs() < 1e-6 {
            return None;
        }
        let t = (height - self.origin.y) / self.direction.y;
        (t > 0.0).then(|| self.at(t))
    }
}

// ============================================================================
// Drag input
// ============================================================================

/// Turns press / move / release of the rotate button into per-move deltas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragTracker {
    active: bool,
    last: Vec2,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn press(&mut self, at: Vec2) {
        self.active = true;
        self.last = at;
    }

    pub fn release(&mut self) {
        self.active = false;
    }

    /// Delta since the last press/move; None while the button is up
    pub fn motion(&mut self, at: Vec2) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        Some(delta)
    }
}
