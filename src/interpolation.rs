//! Barycentric interpolation simulator
//!
//! Shades a sample point inside a triangle three ways so the difference
//! between flat, screen-space linear and perspective-correct attribute
//! interpolation can be seen side by side.

use crate::color::{blend3, Color};
use crate::math3d::Vec2;

/// Below this the 2x2 barycentric system is singular
pub const DEGENERATE_EPSILON: f32 = 1e-6;
/// Below this the summed inverse-depth weights are unusable
pub const WEIGHT_SUM_EPSILON: f32 = 1e-6;

/// Returned for samples outside the triangle
pub const BACKGROUND: Color = Color::gray(0.05);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingVertex {
    pub position: Vec2,
    pub color: Color,
    /// View depth, expected positive
    pub depth: f32,
}

impl ShadingVertex {
    pub const fn new(position: Vec2, color: Color, depth: f32) -> Self {
        Self {
            position,
            color,
            depth,
        }
    }
}

/// Triangle with per-vertex attributes; `a` is the provoking vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: ShadingVertex,
    pub b: ShadingVertex,
    pub c: ShadingVertex,
}

impl Triangle {
    pub const fn new(a: ShadingVertex, b: ShadingVertex, c: ShadingVertex) -> Self {
        Self { a, b, c }
    }

    /// Same triangle moved in screen space; attributes unchanged
    pub fn translated(&self, offset: Vec2) -> Self {
        let shift = |v: ShadingVertex| ShadingVertex {
            position: v.position + offset,
            ..v
        };
        Self::new(shift(self.a), shift(self.b), shift(self.c))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BarycentricResult {
    pub inside: bool,
    /// Weights of a, b, c. Sum to 1 for any non-degenerate triangle; all
    /// zero when the triangle is degenerate.
    pub weights: (f32, f32, f32),
}

impl BarycentricResult {
    const DEGENERATE: Self = Self {
        inside: false,
        weights: (0.0, 0.0, 0.0),
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingMode {
    /// Provoking vertex color everywhere
    Flat,
    /// Raw screen-space weights, no depth correction
    ScreenLinear,
    /// Weights divided by vertex depth, then renormalized
    PerspectiveCorrect,
}

impl ShadingMode {
    pub fn label(self) -> &'static str {
        match self {
            ShadingMode::Flat => "flat",
            ShadingMode::ScreenLinear => "noperspective",
            ShadingMode::PerspectiveCorrect => "smooth (perspective)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shaded {
    pub barycentric: BarycentricResult,
    pub color: Color,
}

/// Barycentric weights of `p` via the 2x2 normal-equation solve
pub fn barycentric(p: Vec2, tri: &Triangle) -> BarycentricResult {
    let a = tri.a.position;
    let v0 = tri.b.position - a;
    let v1 = tri.c.position - a;
    let v2 = p - a;

    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let d20 = v2.dot(&v0);
    let d21 = v2.dot(&v1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < DEGENERATE_EPSILON {
        return BarycentricResult::DEGENERATE;
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;

    BarycentricResult {
        inside: u >= 0.0 && v >= 0.0 && w >= 0.0,
        weights: (u, v, w),
    }
}

/// Shade `p` with the given interpolation mode
pub fn interpolate(p: Vec2, tri: &Triangle, mode: ShadingMode) -> Shaded {
    let barycentric = barycentric(p, tri);
    if !barycentric.inside {
        return Shaded {
            barycentric,
            color: BACKGROUND,
        };
    }

    let (u, v, w) = barycentric.weights;
    let color = match mode {
        ShadingMode::Flat => tri.a.color,
        ShadingMode::ScreenLinear => blend3(tri.a.color, tri.b.color, tri.c.color, u, v, w),
        ShadingMode::PerspectiveCorrect => {
            let wa = u / tri.a.depth;
            let wb = v / tri.b.depth;
            let wc = w / tri.c.depth;
            let sum = wa + wb + wc;
            if !sum.is_finite() || sum.abs() < WEIGHT_SUM_EPSILON {
                Color::BLACK
            } else {
                blend3(
                    tri.a.color,
                    tri.b.color,
                    tri.c.color,
                    wa / sum,
                    wb / sum,
                    wc / sum,
                )
            }
        },
    };

    Shaded { barycentric, color }
}

// ============================================================================
// Three-panel comparison layout
// ============================================================================

/// Panels split normalized device x at ±1/3
pub const PANEL_EDGE: f32 = 1.0 / 3.0;
/// Horizontal shift of the triangle into the outer panels
pub const PANEL_OFFSET: f32 = 0.7;

/// The comparison triangle in clip space: red, green and blue corners at
/// three different depths
pub fn demo_triangle() -> Triangle {
    Triangle::new(
        ShadingVertex::new(Vec2::new(-0.7, -0.5), Color::new(1.0, 0.2, 0.2), 0.2),
        ShadingVertex::new(Vec2::new(0.0, 0.8), Color::new(0.2, 1.0, 0.2), 0.8),
        ShadingVertex::new(Vec2::new(0.7, -0.3), Color::new(0.2, 0.2, 1.0), 0.5),
    )
}

/// Which mode a normalized-device x falls under, and how far the triangle
/// is shifted to sit in that panel
pub fn panel_at(x: f32) -> (ShadingMode, f32) {
    if x <= -PANEL_EDGE {
        (ShadingMode::Flat, -PANEL_OFFSET)
    } else if x >= PANEL_EDGE {
        (ShadingMode::PerspectiveCorrect, PANEL_OFFSET)
    } else {
        (ShadingMode::ScreenLinear, 0.0)
    }
}

/// Color of a normalized-device point in the three-panel comparison
pub fn shade_panels(p: Vec2, tri: &Triangle) -> Color {
    let (mode, offset) = panel_at(p.x);
    interpolate(p, &tri.translated(Vec2::new(offset, 0.0)), mode).color
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn uniform_depth(tri: Triangle, z: f32) -> Triangle {
        let flat = |v: ShadingVertex| ShadingVertex { depth: z, ..v };
        Triangle::new(flat(tri.a), flat(tri.b), flat(tri.c))
    }

    fn sum(r: &BarycentricResult) -> f32 {
        r.weights.0 + r.weights.1 + r.weights.2
    }

    #[test]
    fn test_weights_sum_to_one_inside_and_outside() {
        let tri = demo_triangle();
        for ix in -10..=10 {
            for iy in -10..=10 {
                let p = Vec2::new(ix as f32 * 0.2, iy as f32 * 0.2);
                let r = barycentric(p, &tri);
                assert!((sum(&r) - 1.0).abs() < EPS, "p={:?} sum={}", p, sum(&r));
            }
        }
    }

    #[test]
    fn test_inside_membership() {
        let tri = demo_triangle();
        assert!(barycentric(Vec2::new(0.0, 0.0), &tri).inside);
        assert!(!barycentric(Vec2::new(0.0, -0.9), &tri).inside);
        assert!(!barycentric(Vec2::new(0.9, 0.9), &tri).inside);
        // Centroid weights are equal
        let r = barycentric(Vec2::new(0.0, 0.0), &tri);
        for w in [r.weights.0, r.weights.1, r.weights.2] {
            assert!((w - 1.0 / 3.0).abs() < EPS);
        }
    }

    #[test]
    fn test_degenerate_triangle_is_never_inside() {
        let c = Color::WHITE;
        let tri = Triangle::new(
            ShadingVertex::new(Vec2::new(0.0, 0.0), c, 1.0),
            ShadingVertex::new(Vec2::new(1.0, 1.0), c, 1.0),
            ShadingVertex::new(Vec2::new(2.0, 2.0), c, 1.0),
        );
        let r = barycentric(Vec2::new(1.0, 1.0), &tri);
        assert!(!r.inside);
        assert_eq!(r.weights, (0.0, 0.0, 0.0));
        for mode in [
            ShadingMode::Flat,
            ShadingMode::ScreenLinear,
            ShadingMode::PerspectiveCorrect,
        ] {
            assert_eq!(interpolate(Vec2::new(1.0, 1.0), &tri, mode).color, BACKGROUND);
        }
    }

    #[test]
    fn test_vertices_reproduce_their_color_in_every_mode() {
        let tri = demo_triangle();
        for mode in [
            ShadingMode::ScreenLinear,
            ShadingMode::PerspectiveCorrect,
        ] {
            for v in [tri.a, tri.b, tri.c] {
                let s = interpolate(v.position, &tri, mode);
                assert!(s.barycentric.inside, "{:?} at {:?}", mode, v.position);
                assert!(s.color.approx_eq(&v.color, EPS), "{:?}: {:?}", mode, s.color);
            }
        }
        // Flat reproduces the provoking vertex, which is where it is defined
        let s = interpolate(tri.a.position, &tri, ShadingMode::Flat);
        assert!(s.color.approx_eq(&tri.a.color, EPS));
    }

    #[test]
    fn test_flat_uses_provoking_color_at_other_vertices() {
        let tri = demo_triangle();
        for v in [tri.b, tri.c] {
            let s = interpolate(v.position, &tri, ShadingMode::Flat);
            assert!(s.barycentric.inside);
            assert_eq!(s.color, tri.a.color);
            assert_ne!(s.color, v.color);
        }
    }

    #[test]
    fn test_flat_ignores_weights() {
        let tri = demo_triangle();
        for p in [Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.6), Vec2::new(0.5, -0.3)] {
            let s = interpolate(p, &tri, ShadingMode::Flat);
            assert!(s.barycentric.inside);
            assert_eq!(s.color, tri.a.color);
        }
    }

    #[test]
    fn test_perspective_diverges_from_linear_with_varying_depth() {
        let tri = demo_triangle();
        let p = Vec2::new(0.0, 0.0);
        let linear = interpolate(p, &tri, ShadingMode::ScreenLinear).color;
        let perspective = interpolate(p, &tri, ShadingMode::PerspectiveCorrect).color;
        assert!(
            !linear.approx_eq(&perspective, 0.01),
            "linear {:?} perspective {:?}",
            linear,
            perspective
        );
        // Nearest vertex (a, depth 0.2) gains weight under correction
        assert!(perspective.r > linear.r);
    }

    #[test]
    fn test_perspective_matches_linear_with_uniform_depth() {
        let tri = uniform_depth(demo_triangle(), 0.5);
        let p = Vec2::new(0.1, 0.1);
        let linear = interpolate(p, &tri, ShadingMode::ScreenLinear).color;
        let perspective = interpolate(p, &tri, ShadingMode::PerspectiveCorrect).color;
        assert!(linear.approx_eq(&perspective, EPS));
    }

    #[test]
    fn test_perspective_zero_weight_sum_is_black() {
        // Depths so large the inverse weights vanish
        let tri = uniform_depth(demo_triangle(), 1e9);
        let s = interpolate(Vec2::new(0.0, 0.0), &tri, ShadingMode::PerspectiveCorrect);
        assert!(s.barycentric.inside);
        assert_eq!(s.color, Color::BLACK);
    }

    #[test]
    fn test_outside_is_background() {
        let tri = demo_triangle();
        let s = interpolate(Vec2::new(0.95, 0.95), &tri, ShadingMode::ScreenLinear);
        assert!(!s.barycentric.inside);
        assert_eq!(s.color, BACKGROUND);
    }

    #[test]
    fn test_panel_layout() {
        assert_eq!(panel_at(-0.9), (ShadingMode::Flat, -PANEL_OFFSET));
        assert_eq!(panel_at(-PANEL_EDGE), (ShadingMode::Flat, -PANEL_OFFSET));
        assert_eq!(panel_at(0.0), (ShadingMode::ScreenLinear, 0.0));
        assert_eq!(panel_at(PANEL_EDGE), (ShadingMode::PerspectiveCorrect, PANEL_OFFSET));

        let tri = demo_triangle();
        // Provoking vertex shifted into the flat panel
        let c = shade_panels(Vec2::new(-0.7 - PANEL_OFFSET + 0.05, -0.45), &tri);
        assert_eq!(c, tri.a.color);
        // Far corner of the middle panel is empty
        assert_eq!(shade_panels(Vec2::new(0.3, 0.95), &tri), BACKGROUND);
    }
}
