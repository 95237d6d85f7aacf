//! Demo configuration
//!
//! Everything a demo starts from lives in one JSON file. Every section and
//! field has a default, so a partial file (or none at all) is fine.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::camera::{OrbitCamera, DEFAULT_SENSITIVITY};
use crate::error::{ConfigError, LightingError};
use crate::math3d::Vec3;
use crate::spotlight::{CutoffMode, SpotlightConfig};

pub const DEFAULT_CONFIG_PATH: &str = "shadelab.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub display: DisplaySettings,
    /// Light of the sphere and 2-D cone demos
    pub spotlight: SpotlightSettings,
    /// Light over the HSV floor
    pub hue_spotlight: SpotlightSettings,
    pub orbit: OrbitSettings,
    pub hue_field: HueFieldSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotlightSettings {
    pub position: [f32; 3],
    pub axis: [f32; 3],
    pub cutoff: CutoffMode,
    pub outer_deg: f32,
    /// Units per frame while a move key is held
    pub move_speed: f32,
    /// Degrees per +/- key press
    pub angle_step: f32,
    pub min_angle_deg: f32,
    pub max_angle_deg: f32,
}

impl Default for SpotlightSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 300.0],
            axis: [0.0, 0.0, -1.0],
            cutoff: CutoffMode::Hard,
            outer_deg: 30.0,
            move_speed: 5.0,
            angle_step: 2.0,
            min_angle_deg: 5.0,
            max_angle_deg: 80.0,
        }
    }
}

impl SpotlightSettings {
    /// The floor light of the HSV demo: up and in front, aimed down and back
    pub fn floor_light() -> Self {
        Self {
            position: [0.0, 200.0, 200.0],
            axis: [0.0, -1.0, -0.4],
            cutoff: CutoffMode::SmoothInnerOuter { inner_deg: 25.0 },
            outer_deg: 35.0,
            ..Self::default()
        }
    }

    pub fn build(&self) -> Result<SpotlightConfig, LightingError> {
        SpotlightConfig::new(
            Vec3::from_array(self.position),
            Vec3::from_array(self.axis),
            self.cutoff,
            self.outer_deg,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub vertical_offset: f32,
    pub sensitivity: f32,
    pub target: [f32; 3],
    /// Projection plane distance in pixels
    pub fov: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            yaw: 0.4,
            pitch: 0.35,
            distance: 600.0,
            vertical_offset: 180.0,
            sensitivity: DEFAULT_SENSITIVITY,
            target: [0.0, 0.0, 0.0],
            fov: 400.0,
        }
    }
}

impl OrbitSettings {
    pub fn camera(&self) -> OrbitCamera {
        OrbitCamera::new(self.yaw, self.pitch, self.distance)
            .with_vertical_offset(self.vertical_offset)
            .with_sensitivity(self.sensitivity)
            .with_target(Vec3::from_array(self.target))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HueFieldSettings {
    pub radius: f32,
    pub steps: u32,
    /// Light the disc with `hue_spotlight` instead of full value
    pub spotlit: bool,
}

impl Default for HueFieldSettings {
    fn default() -> Self {
        Self {
            radius: 220.0,
            steps: 120,
            spotlit: true,
        }
    }
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            display: DisplaySettings::default(),
            spotlight: SpotlightSettings::default(),
            hue_spotlight: SpotlightSettings::floor_light(),
            orbit: OrbitSettings::default(),
            hue_field: HueFieldSettings::default(),
        }
    }
}

impl LabConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Like [`LabConfig::load`], but a missing file yields the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match Self::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "config not found, using defaults");
                Ok(Self::new())
            },
            other => other,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Both lights must build, their adjustment limits must stay in
    /// (0°, 90°], and every length the demos divide by must be positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        for light in [&self.spotlight, &self.hue_spotlight] {
            light.build()?;
            let (min, max) = (light.min_angle_deg, light.max_angle_deg);
            if !(min > 0.0 && min <= max && max <= 90.0) {
                return Err(LightingError::AngleLimits { min, max }.into());
            }
        }
        let lengths = [
            ("orbit.distance", self.orbit.distance),
            ("orbit.fov", self.orbit.fov),
            ("hue_field.radius", self.hue_field.radius),
        ];
        for (field, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        Ok(())
    }
}
