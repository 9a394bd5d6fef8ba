//! Scene configuration
//!
//! The portfolio scene is described by a config file loaded at startup.
//! RON is the native format; JSON is accepted as well. Everything the
//! scene needs is here: asset paths, floor and lighting parameters, the
//! player's movement tuning, the keep-out zone, and the debug toggles.

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::walk::NoGoZone;

fn default_model_scale() -> f32 {
    1.0
}

fn default_floor_size() -> f32 {
    60.0
}

fn default_floor_height() -> f32 {
    -3.51
}

fn default_ground_size() -> f32 {
    100.0
}

fn default_ground_color() -> Vec3 {
    // lightgrey
    Vec3::splat(0.827)
}

fn default_ambient_intensity() -> f32 {
    0.1
}

fn default_light_color() -> Vec3 {
    Vec3::ONE
}

fn default_light_position() -> Vec3 {
    Vec3::new(1.0, 10.0, 15.0)
}

fn default_spawn() -> Vec3 {
    Vec3::new(0.0, 1.7, 8.0)
}

fn default_eye_height() -> f32 {
    1.7
}

fn default_walk_speed() -> f32 {
    4.0
}

fn default_run_speed() -> f32 {
    8.0
}

fn default_bob_frequency() -> f32 {
    2.0
}

fn default_bob_amplitude() -> f32 {
    0.06
}

fn default_collider_radius() -> f32 {
    0.5
}

fn default_true() -> bool {
    true
}

fn default_look_sensitivity() -> f32 {
    0.002
}

fn default_axis_size() -> f32 {
    1.0
}

/// The centerpiece glTF model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to a `.glb` or `.gltf` file
    pub path: String,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default = "default_model_scale")]
    pub scale: f32,
}

/// The textured floor under the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorConfig {
    /// Path to the floor texture image
    pub texture: String,
    #[serde(default = "default_floor_size")]
    pub size: f32,
    #[serde(default = "default_floor_height")]
    pub height: f32,
}

/// The plain ground plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundConfig {
    #[serde(default = "default_ground_size")]
    pub size: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default = "default_ground_color")]
    pub color: Vec3,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            size: default_ground_size(),
            height: 0.0,
            color: default_ground_color(),
        }
    }
}

/// Ambient plus one directional light
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightingConfig {
    #[serde(default = "default_ambient_intensity")]
    pub ambient_intensity: f32,
    #[serde(default = "default_light_color")]
    pub directional_color: Vec3,
    /// The light shines from here toward the origin
    #[serde(default = "default_light_position")]
    pub directional_position: Vec3,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_intensity: default_ambient_intensity(),
            directional_color: default_light_color(),
            directional_position: default_light_position(),
        }
    }
}

/// Equirectangular sky background
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkyConfig {
    /// Path to an HDR image
    pub hdr: String,
}

/// First-person movement tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_spawn")]
    pub spawn: Vec3,
    #[serde(default = "default_eye_height")]
    pub eye_height: f32,
    #[serde(default = "default_walk_speed")]
    pub walk_speed: f32,
    #[serde(default = "default_run_speed")]
    pub run_speed: f32,
    #[serde(default = "default_bob_frequency")]
    pub bob_frequency: f32,
    #[serde(default = "default_bob_amplitude")]
    pub bob_amplitude: f32,
    #[serde(default = "default_collider_radius")]
    pub collider_radius: f32,
    /// Drive a rapier body instead of integrating the camera directly
    #[serde(default = "default_true")]
    pub use_physics_body: bool,
    #[serde(default = "default_look_sensitivity")]
    pub look_sensitivity: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: default_spawn(),
            eye_height: default_eye_height(),
            walk_speed: default_walk_speed(),
            run_speed: default_run_speed(),
            bob_frequency: default_bob_frequency(),
            bob_amplitude: default_bob_amplitude(),
            collider_radius: default_collider_radius(),
            use_physics_body: true,
            look_sensitivity: default_look_sensitivity(),
        }
    }
}

/// Optional audio clips
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Footstep clip; the app runs silent without one
    #[serde(default)]
    pub footsteps: Option<String>,
}

/// Overlay assets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Font used for all overlay text
    pub font: String,
    /// Controls legend image; omitted when not available
    #[serde(default)]
    pub legend_image: Option<String>,
}

/// Debug helpers: axis triad, camera position readout, physics test cube
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    #[serde(default)]
    pub axis_triad: bool,
    #[serde(default = "default_axis_size")]
    pub axis_size: f32,
    #[serde(default)]
    pub camera_readout: bool,
    #[serde(default)]
    pub falling_cube: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            axis_triad: false,
            axis_size: default_axis_size(),
            camera_readout: false,
            falling_cube: false,
        }
    }
}

/// Complete scene description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub name: String,
    pub model: ModelConfig,
    pub floor: FloorConfig,
    #[serde(default)]
    pub ground: GroundConfig,
    #[serde(default)]
    pub lighting: LightingConfig,
    #[serde(default)]
    pub sky: Option<SkyConfig>,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub no_go_zone: Option<NoGoZone>,
    #[serde(default)]
    pub audio: AudioConfig,
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl SceneConfig {
    /// Load a scene config, picking the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("ron") => Self::load_ron(path)?,
            Some("json") => Self::load_json(path)?,
            other => {
                return Err(ConfigError::ParseError(format!(
                    "unsupported config extension {:?} for {}",
                    other,
                    path.display()
                )));
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a scene config from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialized
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        ron::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load a scene config from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialized
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Check the config invariants.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player.run_speed <= self.player.walk_speed {
            return Err(ConfigError::Invalid(format!(
                "run_speed ({}) must exceed walk_speed ({})",
                self.player.run_speed, self.player.walk_speed
            )));
        }
        if self.player.walk_speed <= 0.0 {
            return Err(ConfigError::Invalid("walk_speed must be positive".into()));
        }
        if self.player.eye_height <= 0.0 {
            return Err(ConfigError::Invalid("eye_height must be positive".into()));
        }
        if self.player.collider_radius <= 0.0 {
            return Err(ConfigError::Invalid(
                "collider_radius must be positive".into(),
            ));
        }
        if self.player.bob_frequency < 0.0 || self.player.bob_amplitude < 0.0 {
            return Err(ConfigError::Invalid(
                "head bob parameters must not be negative".into(),
            ));
        }
        if self.player.look_sensitivity <= 0.0 {
            return Err(ConfigError::Invalid(
                "look_sensitivity must be positive".into(),
            ));
        }
        if self.floor.size <= 0.0 || self.ground.size <= 0.0 {
            return Err(ConfigError::Invalid("floor sizes must be positive".into()));
        }
        if self.model.scale <= 0.0 {
            return Err(ConfigError::Invalid("model scale must be positive".into()));
        }
        if self.debug.axis_size <= 0.0 {
            return Err(ConfigError::Invalid("axis_size must be positive".into()));
        }
        if let Some(zone) = &self.no_go_zone
            && !zone.is_valid()
        {
            return Err(ConfigError::Invalid(format!(
                "no_go_zone bounds are inverted: {zone:?}"
            )));
        }
        Ok(())
    }
}

/// Errors that can occur loading the scene config
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error
    IoError(String),
    /// Parse error
    ParseError(String),
    /// A config value violates an invariant
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::ParseError(e) => write!(f, "Parse error: {e}"),
            Self::Invalid(e) => write!(f, "Invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_RON: &str = r#"(
        name: "Portfolio",
        model: (path: "assets/models/maker_desk.glb"),
        floor: (texture: "assets/textures/floor.jpg"),
        overlay: (font: "assets/fonts/overlay.ttf"),
    )"#;

    #[test]
    fn test_minimal_ron_fills_defaults() {
        let config: SceneConfig = ron::from_str(MINIMAL_RON).unwrap();

        assert_eq!(config.name, "Portfolio");
        assert_eq!(config.floor.size, 60.0);
        assert_eq!(config.floor.height, -3.51);
        assert_eq!(config.ground.size, 100.0);
        assert_eq!(config.lighting.ambient_intensity, 0.1);
        assert_eq!(
            config.lighting.directional_position,
            Vec3::new(1.0, 10.0, 15.0)
        );
        assert_eq!(config.player.walk_speed, 4.0);
        assert_eq!(config.player.run_speed, 8.0);
        assert!(config.player.use_physics_body);
        assert!(config.sky.is_none());
        assert!(config.audio.footsteps.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_run_speed_must_exceed_walk_speed() {
        let mut config: SceneConfig = ron::from_str(MINIMAL_RON).unwrap();
        config.player.run_speed = config.player.walk_speed;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("run_speed"));
    }

    #[test]
    fn test_inverted_zone_is_rejected() {
        let mut config: SceneConfig = ron::from_str(MINIMAL_RON).unwrap();
        config.no_go_zone = Some(NoGoZone::new(2.0, -2.0, -1.0, 1.0));

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config: SceneConfig = ron::from_str(MINIMAL_RON).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let loaded: SceneConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.name, config.name);
        assert_eq!(loaded.player.run_speed, config.player.run_speed);
        assert_eq!(loaded.floor.height, config.floor.height);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("showroom_scene_test.toml");
        fs::write(&path, "name = \"x\"").unwrap();

        let err = SceneConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_ron_file() {
        let path = std::env::temp_dir().join("showroom_scene_test.ron");
        fs::write(&path, MINIMAL_RON).unwrap();

        let config = SceneConfig::load(&path).unwrap();
        assert_eq!(config.name, "Portfolio");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SceneConfig::load_ron("does/not/exist.ron").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
