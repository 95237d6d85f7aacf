//! Color utilities
//!
//! Colors are linear RGB floats in [0, 1] inside the core. Conversion to
//! 8-bit channels happens only at the drawing boundary via [`Color::to_rgb8`].

use std::ops::{Add, Mul};

use crate::math3d::{clamp01, wrap_degrees};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Same value for R, G, B
    #[inline]
    pub const fn gray(v: f32) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Scale to [0, 255] for the drawing backend (clamped, rounded)
    #[inline]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let to_u8 = |c: f32| (clamp01(c) * 255.0).round() as u8;
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(clamp01(self.r), clamp01(self.g), clamp01(self.b))
    }

    /// Per-channel product (material * light)
    #[inline]
    pub fn modulate(self, other: Self) -> Self {
        Self::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }

    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
    }
}

impl Add for Color {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }
}

impl Mul<f32> for Color {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.r * scalar, self.g * scalar, self.b * scalar)
    }
}

/// Weighted sum of three colors; weights are used as given
#[inline]
pub fn blend3(a: Color, b: Color, c: Color, wa: f32, wb: f32, wc: f32) -> Color {
    a * wa + b * wb + c * wc
}

/// HSV to RGB color conversion
/// h: degrees (any value, wrapped into [0, 360)), s: 0-1, v: 0-1
///
/// Six 60° sectors with boundaries at 60, 120, 180, 240 and 300.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Color {
    let h = wrap_degrees(h);
    let c = v * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - c;

    let (r1, g1, b1) = match h_prime as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Color::new(r1 + m, g1 + m, b1 + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_hsv_primaries() {
        assert!(hsv_to_rgb(0.0, 1.0, 1.0).approx_eq(&Color::new(1.0, 0.0, 0.0), EPS));
        assert!(hsv_to_rgb(120.0, 1.0, 1.0).approx_eq(&Color::new(0.0, 1.0, 0.0), EPS));
        assert!(hsv_to_rgb(240.0, 1.0, 1.0).approx_eq(&Color::new(0.0, 0.0, 1.0), EPS));
    }

    #[test]
    fn test_hsv_sector_boundaries() {
        // 60° multiples land on the secondaries/primaries exactly
        let table = [
            (60.0, Color::new(1.0, 1.0, 0.0)),
            (180.0, Color::new(0.0, 1.0, 1.0)),
            (300.0, Color::new(1.0, 0.0, 1.0)),
            (360.0, Color::new(1.0, 0.0, 0.0)),
        ];
        for (h, expected) in table {
            let c = hsv_to_rgb(h, 1.0, 1.0);
            assert!(c.approx_eq(&expected, EPS), "h={} gave {:?}", h, c);
        }
    }

    #[test]
    fn test_hsv_mid_sector() {
        // 30°: halfway from red to yellow
        let c = hsv_to_rgb(30.0, 1.0, 1.0);
        assert!(c.approx_eq(&Color::new(1.0, 0.5, 0.0), EPS));
        // 210°: halfway from cyan to blue
        let c = hsv_to_rgb(210.0, 1.0, 1.0);
        assert!(c.approx_eq(&Color::new(0.0, 0.5, 1.0), EPS));
    }

    #[test]
    fn test_hsv_wraparound() {
        for h in [0.0_f32, 45.0, 133.0, 270.0, 359.0] {
            let a = hsv_to_rgb(h, 1.0, 0.8);
            let b = hsv_to_rgb(h + 360.0, 1.0, 0.8);
            let c = hsv_to_rgb(h - 360.0, 1.0, 0.8);
            assert!(a.approx_eq(&b, 1e-4), "h={}", h);
            assert!(a.approx_eq(&c, 1e-4), "h={}", h);
        }
    }

    #[test]
    fn test_hsv_value_and_saturation() {
        assert!(hsv_to_rgb(200.0, 1.0, 0.0).approx_eq(&Color::BLACK, EPS));
        assert!(hsv_to_rgb(200.0, 0.0, 0.6).approx_eq(&Color::gray(0.6), EPS));
    }

    #[test]
    fn test_rgb8_boundary() {
        assert_eq!(Color::WHITE.to_rgb8(), (255, 255, 255));
        assert_eq!(Color::new(-1.0, 0.5, 2.0).to_rgb8(), (0, 128, 255));
        let c = Color::from_rgb8(100, 50, 200);
        assert_eq!(c.to_rgb8(), (100, 50, 200));
    }

    #[test]
    fn test_blend3() {
        let c = blend3(
            Color::new(1.0, 0.0, 0.0),
            Color::new(0.0, 1.0, 0.0),
            Color::new(0.0, 0.0, 1.0),
            0.5,
            0.25,
            0.25,
        );
        assert!(c.approx_eq(&Color::new(0.5, 0.25, 0.25), EPS));
    }
}
