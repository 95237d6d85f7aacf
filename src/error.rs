//! Error types
//!
//! Only construction and configuration can fail. Per-frame math is total
//! over its valid domain and never returns these.

use std::io;

use thiserror::Error;

/// Invariant violations caught while building lighting state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LightingError {
    #[error("outer cutoff angle {0}° must be in (0°, 90°]")]
    OuterAngleOutOfRange(f32),
    #[error("inner cutoff angle {inner}° must be in (0°, {outer}°]")]
    InnerAngleOutOfRange { inner: f32, outer: f32 },
    #[error("spotlight axis must be a finite, non-zero vector")]
    DegenerateAxis,
    #[error("spotlight position must be finite")]
    NonFinitePosition,
    #[error("cutoff adjustment limits [{min}°, {max}°] must satisfy 0° < min <= max <= 90°")]
    AngleLimits { min: f32, max: f32 },
}

/// Errors loading a `LabConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid lighting settings: {0}")]
    Lighting(#[from] LightingError),
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },
}
