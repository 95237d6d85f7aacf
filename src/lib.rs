//! shadelab: lighting and shading math for interactive teaching demos
//!
//! Pure, per-frame functions of explicit state:
//!
//! - [`spotlight`]: hard, linear and smooth inner/outer cone attenuation
//! - [`hue_field`]: polar-angle hue disc, valued by an intensity
//! - [`interpolation`]: flat vs screen-linear vs perspective-correct shading
//! - [`camera`]: yaw/pitch orbit camera fed by drag deltas
//!
//! The `shadelab` binary hosts the demos in an SDL2 window; nothing in this
//! library touches a window, a file (other than [`config`]) or global state.

pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod hue_field;
pub mod interpolation;
pub mod math3d;
pub mod spotlight;

pub use color::Color;
pub use error::{ConfigError, LightingError};
pub use math3d::{Vec2, Vec3};
