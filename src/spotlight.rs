//! Spotlight attenuation
//!
//! One parameterized model for every cone variant the demos use. The cutoff
//! policy is a tagged [`CutoffMode`]; angles are validated once when a
//! [`SpotlightConfig`] is built, and their cosines are cached so the per-sample
//! path is a dot product and a couple of comparisons.
//!
//! Direction convention: callers pass the normalized light→sample vector `D`.
//! `spot_effect = dot(D, axis)`, which is the shading-language `dot(-L, axis)`
//! with `L` pointing from the surface toward the light.

use serde::{Deserialize, Serialize};

use crate::error::LightingError;
use crate::math3d::{clamp01, Vec3, LENGTH_EPSILON};

/// Angular spans (in cosine units) below this are treated as zero width
pub const SPAN_EPSILON: f32 = 1e-6;

/// Shape of the linear ramp between the cone edge and the axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Falloff {
    /// intensity = t
    #[default]
    Linear,
    /// intensity = t²
    Quadratic,
}

impl Falloff {
    #[inline]
    pub fn exponent(self) -> i32 {
        match self {
            Falloff::Linear => 1,
            Falloff::Quadratic => 2,
        }
    }

    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        t.powi(self.exponent())
    }
}

/// How intensity falls off toward the cone edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CutoffMode {
    /// Binary membership: 1 inside the outer cone, 0 outside
    Hard,
    /// Ramp from 0 at the outer edge to 1 on the axis
    Linear {
        #[serde(default)]
        falloff: Falloff,
    },
    /// Fully lit inside `inner_deg`, quadratic penumbra out to the outer angle
    SmoothInnerOuter { inner_deg: f32 },
}

impl CutoffMode {
    pub fn label(&self) -> &'static str {
        match self {
            CutoffMode::Hard => "hard cutoff",
            CutoffMode::Linear {
                falloff: Falloff::Linear,
            } => "linear falloff",
            CutoffMode::Linear {
                falloff: Falloff::Quadratic,
            } => "quadratic falloff",
            CutoffMode::SmoothInnerOuter { .. } => "smooth inner/outer",
        }
    }
}

/// Validated spotlight state. Fields are private so the cached cosines and
/// the unit axis can never drift from the angles they were derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotlightConfig {
    position: Vec3,
    axis: Vec3,
    mode: CutoffMode,
    outer_deg: f32,
    cos_outer: f32,
    cos_inner: f32,
}

impl SpotlightConfig {
    /// Build a spotlight; `axis` is normalized here.
    ///
    /// Outer angle must be in (0°, 90°]. For `SmoothInnerOuter` the inner
    /// angle must be in (0°, outer]; equal angles are accepted and behave
    /// like `Hard`.
    pub fn new(
        position: Vec3,
        axis: Vec3,
        mode: CutoffMode,
        outer_deg: f32,
    ) -> Result<Self, LightingError> {
        if !position.is_finite() {
            return Err(LightingError::NonFinitePosition);
        }
        let axis = validate_axis(axis)?;
        let (cos_outer, cos_inner) = cone_cosines(mode, outer_deg)?;
        Ok(Self {
            position,
            axis,
            mode,
            outer_deg,
            cos_outer,
            cos_inner,
        })
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    #[inline]
    pub fn mode(&self) -> CutoffMode {
        self.mode
    }

    #[inline]
    pub fn outer_deg(&self) -> f32 {
        self.outer_deg
    }

    /// Inner angle for `SmoothInnerOuter`, `None` otherwise
    pub fn inner_deg(&self) -> Option<f32> {
        match self.mode {
            CutoffMode::SmoothInnerOuter { inner_deg } => Some(inner_deg),
            _ => None,
        }
    }

    #[inline]
    pub fn cos_outer(&self) -> f32 {
        self.cos_outer
    }

    /// Moving the light never invalidates the cone
    pub fn set_position(&mut self, position: Vec3) -> Result<(), LightingError> {
        if !position.is_finite() {
            return Err(LightingError::NonFinitePosition);
        }
        self.position = position;
        Ok(())
    }

    /// Re-aims the cone; the new axis is renormalized
    pub fn set_axis(&mut self, axis: Vec3) -> Result<(), LightingError> {
        self.axis = validate_axis(axis)?;
        Ok(())
    }

    /// Changes the cutoff policy and outer angle together, revalidating both
    pub fn set_cone(&mut self, mode: CutoffMode, outer_deg: f32) -> Result<(), LightingError> {
        let (cos_outer, cos_inner) = cone_cosines(mode, outer_deg)?;
        self.mode = mode;
        self.outer_deg = outer_deg;
        self.cos_outer = cos_outer;
        self.cos_inner = cos_inner;
        Ok(())
    }

    /// Normalized light→sample direction
    #[inline]
    pub fn direction_to(&self, sample: Vec3) -> Vec3 {
        (sample - self.position).normalize()
    }

    /// Cosine of the angle between `light_to_sample` and the cone axis
    #[inline]
    pub fn spot_effect(&self, light_to_sample: Vec3) -> f32 {
        light_to_sample.dot(&self.axis)
    }

    /// Boolean cone membership, independent of the configured mode
    #[inline]
    pub fn in_cone(&self, light_to_sample: Vec3) -> bool {
        let spot = self.spot_effect(light_to_sample);
        spot > 0.0 && spot > self.cos_outer
    }

    /// Attenuation for a world-space sample point
    #[inline]
    pub fn intensity_at(&self, sample: Vec3) -> f32 {
        attenuate(self, self.direction_to(sample))
    }
}

fn validate_axis(axis: Vec3) -> Result<Vec3, LightingError> {
    if !axis.is_finite() || axis.length() <= LENGTH_EPSILON {
        return Err(LightingError::DegenerateAxis);
    }
    Ok(axis.normalize())
}

/// Returns (cos(outer), cos(inner)); for modes without an inner angle the
/// inner cosine is 1 (the axis itself)
fn cone_cosines(mode: CutoffMode, outer_deg: f32) -> Result<(f32, f32), LightingError> {
    if !(outer_deg > 0.0 && outer_deg <= 90.0) {
        return Err(LightingError::OuterAngleOutOfRange(outer_deg));
    }
    let cos_outer = outer_deg.to_radians().cos();
    let cos_inner = match mode {
        CutoffMode::SmoothInnerOuter { inner_deg } => {
            if !(inner_deg > 0.0 && inner_deg <= outer_deg) {
                return Err(LightingError::InnerAngleOutOfRange {
                    inner: inner_deg,
                    outer: outer_deg,
                });
            }
            inner_deg.to_radians().cos()
        },
        CutoffMode::Hard | CutoffMode::Linear { .. } => 1.0,
    };
    Ok((cos_outer, cos_inner))
}

/// Spotlight intensity in [0, 1] for a normalized light→sample direction.
///
/// 0 outside the outer cone and for anything at or behind the light plane.
pub fn attenuate(config: &SpotlightConfig, light_to_sample: Vec3) -> f32 {
    debug_assert!(
        light_to_sample.is_unit(1e-3) || light_to_sample.length() <= LENGTH_EPSILON,
        "attenuate expects a normalized direction, got {:?}",
        light_to_sample
    );

    let spot = config.spot_effect(light_to_sample);
    if spot <= 0.0 || spot <= config.cos_outer {
        return 0.0;
    }

    match config.mode {
        CutoffMode::Hard => 1.0,
        CutoffMode::Linear { falloff } => {
            let span = 1.0 - config.cos_outer;
            if span < SPAN_EPSILON {
                return 1.0;
            }
            falloff.apply(clamp01((spot - config.cos_outer) / span))
        },
        CutoffMode::SmoothInnerOuter { .. } => {
            if spot >= config.cos_inner {
                return 1.0;
            }
            let span = config.cos_inner - config.cos_outer;
            if span < SPAN_EPSILON {
                // Inner and outer coincide: past the outer check means lit
                return 1.0;
            }
            let t = clamp01((spot - config.cos_outer) / span);
            t * t
        },
    }
}

/// The two boundary ray angles (radians) of a cone drawn in the plane
#[inline]
pub fn cone_edges_2d(axis_angle: f32, cutoff_rad: f32) -> (f32, f32) {
    (axis_angle - cutoff_rad, axis_angle + cutoff_rad)
}

/// Scale an intensity to the [0, 255] light level the drawing layer uses
#[inline]
pub fn to_light_level(intensity: f32) -> f32 {
    255.0 * clamp01(intensity)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn all_modes() -> [CutoffMode; 4] {
        [
            CutoffMode::Hard,
            CutoffMode::Linear {
                falloff: Falloff::Linear,
            },
            CutoffMode::Linear {
                falloff: Falloff::Quadratic,
            },
            CutoffMode::SmoothInnerOuter { inner_deg: 20.0 },
        ]
    }

    fn light(mode: CutoffMode, outer_deg: f32) -> SpotlightConfig {
        SpotlightConfig::new(
            Vec3::new(0.0, 0.0, 300.0),
            Vec3::new(0.0, 0.0, -1.0),
            mode,
            outer_deg,
        )
        .unwrap()
    }

    /// Unit direction at `deg` off the -Z axis, tilted toward +X
    fn dir_at(deg: f32) -> Vec3 {
        let r = deg.to_radians();
        Vec3::new(r.sin(), 0.0, -r.cos())
    }

    #[test]
    fn test_on_axis_sample_is_fully_lit() {
        for mode in all_modes() {
            let cfg = light(mode, 30.0);
            let sample = Vec3::new(0.0, 0.0, 200.0);
            assert!((cfg.spot_effect(cfg.direction_to(sample)) - 1.0).abs() < EPS);
            assert!(
                (cfg.intensity_at(sample) - 1.0).abs() < EPS,
                "mode {:?}",
                mode
            );
        }
    }

    #[test]
    fn test_45_degrees_off_axis_is_dark() {
        for mode in [
            CutoffMode::Hard,
            CutoffMode::Linear {
                falloff: Falloff::Linear,
            },
        ] {
            let cfg = light(mode, 30.0);
            let sample = cfg.position() + dir_at(45.0) * 100.0;
            let dir = cfg.direction_to(sample);
            assert!((cfg.spot_effect(dir) - 45.0_f32.to_radians().cos()).abs() < 1e-4);
            assert_eq!(attenuate(&cfg, dir), 0.0);
        }
    }

    #[test]
    fn test_outside_outer_cone_is_zero_in_every_mode() {
        for mode in all_modes() {
            let cfg = light(mode, 30.0);
            for deg in [30.0_f32, 31.0, 50.0, 89.0, 90.0, 120.0, 180.0] {
                assert_eq!(attenuate(&cfg, dir_at(deg)), 0.0, "{:?} at {}°", mode, deg);
            }
        }
    }

    #[test]
    fn test_behind_light_is_zero_even_with_wide_cone() {
        let cfg = light(CutoffMode::Hard, 90.0);
        assert_eq!(attenuate(&cfg, Vec3::new(1.0, 0.0, 0.0)), 0.0);
        assert_eq!(attenuate(&cfg, Vec3::new(0.0, 0.0, 1.0)), 0.0);
        assert_eq!(attenuate(&cfg, dir_at(89.0)), 1.0);
    }

    #[test]
    fn test_hard_is_binary() {
        let cfg = light(CutoffMode::Hard, 30.0);
        assert_eq!(attenuate(&cfg, dir_at(29.0)), 1.0);
        assert_eq!(attenuate(&cfg, dir_at(1.0)), 1.0);
        assert_eq!(attenuate(&cfg, dir_at(30.5)), 0.0);
    }

    #[test]
    fn test_linear_and_quadratic_falloff() {
        let lin = light(
            CutoffMode::Linear {
                falloff: Falloff::Linear,
            },
            60.0,
        );
        let quad = light(
            CutoffMode::Linear {
                falloff: Falloff::Quadratic,
            },
            60.0,
        );
        // cos(60°) = 0.5, so spot = 0.75 is halfway along the ramp
        let spot = 0.75_f32;
        let dir = Vec3::new((1.0 - spot * spot).sqrt(), 0.0, -spot);
        assert!((attenuate(&lin, dir) - 0.5).abs() < 1e-4);
        assert!((attenuate(&quad, dir) - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_smooth_full_inside_inner() {
        let cfg = light(CutoffMode::SmoothInnerOuter { inner_deg: 20.0 }, 40.0);
        assert_eq!(attenuate(&cfg, dir_at(0.0)), 1.0);
        assert_eq!(attenuate(&cfg, dir_at(19.0)), 1.0);
        let mid = attenuate(&cfg, dir_at(30.0));
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn test_smooth_monotonic_and_continuous() {
        let cfg = light(CutoffMode::SmoothInnerOuter { inner_deg: 15.0 }, 45.0);
        let cos_outer = 45.0_f32.to_radians().cos();
        let cos_inner = 15.0_f32.to_radians().cos();

        let mut prev = 0.0;
        let steps = 200;
        for i in 0..=steps {
            let spot = cos_outer + (cos_inner - cos_outer) * (i as f32 / steps as f32);
            let dir = Vec3::new((1.0 - spot * spot).max(0.0).sqrt(), 0.0, -spot);
            let v = attenuate(&cfg, dir);
            assert!(v + 1e-5 >= prev, "decreased at step {}: {} < {}", i, v, prev);
            assert!(v - prev < 0.05, "jump at step {}: {} -> {}", i, prev, v);
            prev = v;
        }

        // Approaching each boundary from inside the penumbra
        let just_in = cos_outer + 1e-4;
        let dir = Vec3::new((1.0 - just_in * just_in).sqrt(), 0.0, -just_in);
        assert!(attenuate(&cfg, dir) < 1e-3);
        let just_below_inner = cos_inner - 1e-5;
        let dir = Vec3::new(
            (1.0 - just_below_inner * just_below_inner).sqrt(),
            0.0,
            -just_below_inner,
        );
        assert!(attenuate(&cfg, dir) > 0.99);
    }

    #[test]
    fn test_equal_inner_outer_degrades_to_hard() {
        let smooth = light(CutoffMode::SmoothInnerOuter { inner_deg: 80.0 }, 80.0);
        let hard = light(CutoffMode::Hard, 80.0);
        for deg in [0.0_f32, 10.0, 40.0, 79.0, 79.9, 80.5, 85.0, 100.0] {
            let dir = dir_at(deg);
            let a = attenuate(&smooth, dir);
            assert!(a.is_finite());
            assert_eq!(a, attenuate(&hard, dir), "at {}°", deg);
        }
    }

    #[test]
    fn test_construction_rejects_bad_angles() {
        let pos = Vec3::zero();
        let axis = Vec3::new(0.0, -1.0, 0.0);
        assert_eq!(
            SpotlightConfig::new(pos, axis, CutoffMode::Hard, 0.0),
            Err(LightingError::OuterAngleOutOfRange(0.0))
        );
        assert!(SpotlightConfig::new(pos, axis, CutoffMode::Hard, 95.0).is_err());
        assert!(SpotlightConfig::new(pos, axis, CutoffMode::Hard, f32::NAN).is_err());
        assert!(SpotlightConfig::new(pos, axis, CutoffMode::Hard, 90.0).is_ok());
        assert_eq!(
            SpotlightConfig::new(
                pos,
                axis,
                CutoffMode::SmoothInnerOuter { inner_deg: 40.0 },
                30.0
            ),
            Err(LightingError::InnerAngleOutOfRange {
                inner: 40.0,
                outer: 30.0
            })
        );
        assert!(SpotlightConfig::new(
            pos,
            axis,
            CutoffMode::SmoothInnerOuter { inner_deg: 0.0 },
            30.0
        )
        .is_err());
    }

    #[test]
    fn test_construction_rejects_degenerate_axis_and_position() {
        assert_eq!(
            SpotlightConfig::new(Vec3::zero(), Vec3::zero(), CutoffMode::Hard, 30.0),
            Err(LightingError::DegenerateAxis)
        );
        assert_eq!(
            SpotlightConfig::new(
                Vec3::new(f32::NAN, 0.0, 0.0),
                Vec3::UP,
                CutoffMode::Hard,
                30.0
            ),
            Err(LightingError::NonFinitePosition)
        );
    }

    #[test]
    fn test_axis_is_renormalized() {
        let mut cfg = SpotlightConfig::new(
            Vec3::zero(),
            Vec3::new(0.0, -5.0, 0.0),
            CutoffMode::Hard,
            30.0,
        )
        .unwrap();
        assert!(cfg.axis().is_unit(1e-6));
        cfg.set_axis(Vec3::new(0.0, -1.0, -0.4)).unwrap();
        assert!(cfg.axis().is_unit(1e-6));
        assert!(cfg.set_axis(Vec3::zero()).is_err());
    }

    #[test]
    fn test_set_cone_revalidates() {
        let mut cfg = light(CutoffMode::Hard, 30.0);
        assert!(cfg
            .set_cone(CutoffMode::SmoothInnerOuter { inner_deg: 50.0 }, 30.0)
            .is_err());
        // Rejected update leaves the old cone intact
        assert_eq!(cfg.mode(), CutoffMode::Hard);
        assert_eq!(cfg.outer_deg(), 30.0);

        cfg.set_cone(CutoffMode::SmoothInnerOuter { inner_deg: 10.0 }, 80.0)
            .unwrap();
        assert_eq!(cfg.inner_deg(), Some(10.0));
        assert!((cfg.cos_outer() - 80.0_f32.to_radians().cos()).abs() < EPS);
    }

    #[test]
    fn test_in_cone_matches_hard_mode() {
        let cfg = light(
            CutoffMode::Linear {
                falloff: Falloff::Quadratic,
            },
            30.0,
        );
        let hard = light(CutoffMode::Hard, 30.0);
        for deg in [0.0_f32, 15.0, 29.0, 31.0, 60.0, 170.0] {
            let dir = dir_at(deg);
            assert_eq!(cfg.in_cone(dir), attenuate(&hard, dir) == 1.0);
        }
    }

    #[test]
    fn test_cone_edges_and_light_level() {
        let (a0, a1) = cone_edges_2d(0.0, 30.0_f32.to_radians());
        assert!((a0 + 30.0_f32.to_radians()).abs() < EPS);
        assert!((a1 - 30.0_f32.to_radians()).abs() < EPS);
        assert_eq!(to_light_level(1.0), 255.0);
        assert_eq!(to_light_level(2.0), 255.0);
        assert_eq!(to_light_level(0.0), 0.0);
    }

    #[test]
    fn test_mode_serde_tags() {
        let mode: CutoffMode =
            serde_json::from_str(r#"{"mode": "linear", "falloff": "quadratic"}"#).unwrap();
        assert_eq!(
            mode,
            CutoffMode::Linear {
                falloff: Falloff::Quadratic
            }
        );
        let mode: CutoffMode = serde_json::from_str(r#"{"mode": "linear"}"#).unwrap();
        assert_eq!(
            mode,
            CutoffMode::Linear {
                falloff: Falloff::Linear
            }
        );
        let mode: CutoffMode =
            serde_json::from_str(r#"{"mode": "smooth_inner_outer", "inner_deg": 12.5}"#).unwrap();
        assert_eq!(mode, CutoffMode::SmoothInnerOuter { inner_deg: 12.5 });
    }

    #[test]
    fn test_falloff_exponent_shapes_ramp() {
        assert_eq!(Falloff::Linear.exponent(), 1);
        assert_eq!(Falloff::Quadratic.exponent(), 2);
        assert!((Falloff::Linear.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Falloff::Quadratic.apply(0.5) - 0.25).abs() < 1e-6);
        for f in [Falloff::Linear, Falloff::Quadratic] {
            assert_eq!(f.apply(0.0), 0.0);
            assert_eq!(f.apply(1.0), 1.0);
        }
    }
}
