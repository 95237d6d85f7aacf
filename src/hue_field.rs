//! Hue-field color mapping
//!
//! Colors a disc by polar angle: hue = angle around the disc center,
//! saturation = 1, value = a caller-supplied intensity (1 for the static
//! hue wheel, spotlight attenuation for the lit floor).

use std::f32::consts::TAU;

use crate::color::{hsv_to_rgb, Color};
use crate::math3d::{clamp01, wrap_degrees, Vec2, Vec3};
use crate::spotlight::SpotlightConfig;

/// Returned for samples outside the disc
pub const BACKGROUND: Color = Color::gray(5.0 / 255.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueFieldSample {
    /// Position relative to the disc center
    pub position: Vec2,
    pub disc_radius: f32,
    /// Value channel, expected in [0, 1]
    pub intensity: f32,
}

impl HueFieldSample {
    pub const fn new(position: Vec2, disc_radius: f32, intensity: f32) -> Self {
        Self {
            position,
            disc_radius,
            intensity,
        }
    }
}

/// Polar angle of `position` in degrees, in [0, 360)
#[inline]
pub fn hue_degrees(position: Vec2) -> f32 {
    wrap_degrees(position.angle().to_degrees())
}

pub fn map_hue_field(sample: HueFieldSample) -> Color {
    if sample.position.length() > sample.disc_radius {
        return BACKGROUND;
    }
    hsv_to_rgb(hue_degrees(sample.position), 1.0, clamp01(sample.intensity))
}

// ============================================================================
// Floor placement
// ============================================================================

// The disc lies on the Y-up world floor. Disc-plane +Y maps to world -Z,
// matching a -90° rotation about X.

#[inline]
pub fn plane_to_floor(p: Vec2) -> Vec3 {
    Vec3::new(p.x, 0.0, -p.y)
}

#[inline]
pub fn floor_to_plane(p: Vec3) -> Vec2 {
    Vec2::new(p.x, -p.z)
}

/// Color of a disc-plane point lit by `light`
pub fn spotlit_hue(position: Vec2, disc_radius: f32, light: &SpotlightConfig) -> Color {
    let intensity = light.intensity_at(plane_to_floor(position));
    map_hue_field(HueFieldSample::new(position, disc_radius, intensity))
}

// ============================================================================
// Hue wheel tessellation
// ============================================================================

/// One triangle slice of the hue wheel: center, then two rim points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueWedge {
    pub start_angle: f32,
    pub end_angle: f32,
    pub hue: f32,
    pub rim_start: Vec2,
    pub rim_end: Vec2,
}

impl HueWedge {
    /// Triangle centroid (disc center plus both rim points)
    pub fn centroid(&self) -> Vec2 {
        (self.rim_start + self.rim_end) * (1.0 / 3.0)
    }
}

/// Split a disc of `radius` into `steps` wedges; each wedge takes the hue of
/// its starting angle
pub fn hue_wheel_wedges(radius: f32, steps: u32) -> impl Iterator<Item = HueWedge> {
    let steps = steps.max(1);
    (0..steps).map(move |i| {
        let a0 = i as f32 / steps as f32 * TAU;
        let a1 = (i + 1) as f32 / steps as f32 * TAU;
        HueWedge {
            start_angle: a0,
            end_angle: a1,
            hue: wrap_degrees(a0.to_degrees()),
            rim_start: Vec2::new(a0.cos(), a0.sin()) * radius,
            rim_end: Vec2::new(a1.cos(), a1.sin()) * radius,
        }
    })
}
