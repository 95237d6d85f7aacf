//! Vector and angle utilities for the lighting core
//!
//! Small `Copy` vectors consumed by value, plus the scalar helpers every
//! other module leans on. Angles are degrees at the UI boundary and radians
//! internally; conversion goes through `f32::to_radians` / `to_degrees`.

use std::ops::{Add, Mul, Neg, Sub};

/// Below this length a vector is treated as zero and left unnormalized
pub const LENGTH_EPSILON: f32 = 1e-6;

/// 3D Vector (Y-up)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn from_array(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction; near-zero vectors come back unchanged
    #[inline]
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > LENGTH_EPSILON {
            *self * (1.0 / len)
        } else {
            *self
        }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub fn is_unit(&self, epsilon: f32) -> bool {
        (self.length() - 1.0).abs() < epsilon
    }

    /// Approximate equality check for floating point comparison
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;
    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}

/// 2D Vector (disc plane, screen space, drag deltas)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > LENGTH_EPSILON {
            *self * (1.0 / len)
        } else {
            *self
        }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Polar angle in radians, (-PI, PI]
    #[inline]
    pub fn angle(&self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Lift into the XY plane
    #[inline]
    pub const fn extend(self, z: f32) -> Vec3 {
        Vec3::new(self.x, self.y, z)
    }

    /// Approximate equality check for floating point comparison
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;
    #[inline]
    fn mul(self, v: Vec2) -> Vec2 {
        v * self
    }
}

// ============================================================================
// Scalar helpers
// ============================================================================

#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Wrap an angle in degrees into [0, 360)
#[inline]
pub fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Project a camera-space point to 2D screen coordinates
///
/// - `point`: camera-space point, +Z into the screen, +Y down
/// - `fov`: Field of view (distance from eye to projection plane)
/// - `cx`, `cy`: Screen center coordinates
///
/// Returns (screen_x, screen_y) or None if point is behind camera
#[inline]
pub fn project(point: Vec3, fov: f32, cx: f32, cy: f32) -> Option<(f32, f32)> {
    if point.z <= 0.0 {
        return None;
    }
    let scale = fov / point.z;
    Some((cx + point.x * scale, cy + point.y * scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_unit_length() {
        let v = Vec3::new(3.0, -4.0, 12.0).normalize();
        assert!(v.is_unit(1e-6));
        assert!(v.approx_eq(&Vec3::new(3.0 / 13.0, -4.0 / 13.0, 12.0 / 13.0), 1e-6));
    }

    #[test]
    fn test_normalize_zero_is_noop() {
        assert_eq!(Vec3::zero().normalize(), Vec3::zero());
        assert_eq!(Vec2::zero().normalize(), Vec2::zero());
    }

    #[test]
    fn test_cross_is_right_handed() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert!(x.cross(&y).approx_eq(&Vec3::new(0.0, 0.0, 1.0), 1e-6));
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert!((wrap_degrees(370.0) - 10.0).abs() < 1e-4);
        assert!((wrap_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert!(wrap_degrees(-1e-7) < 360.0);
    }

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(7.0), 1.0);
    }

    #[test]
    fn test_project_behind_camera() {
        assert!(project(Vec3::new(1.0, 1.0, -1.0), 400.0, 320.0, 240.0).is_none());
        let (sx, sy) = project(Vec3::new(10.0, -10.0, 400.0), 400.0, 320.0, 240.0).unwrap();
        assert!((sx - 330.0).abs() < 1e-4);
        assert!((sy - 230.0).abs() < 1e-4);
    }
}
