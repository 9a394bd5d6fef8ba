mod config;

pub use config::{
    AudioConfig, ConfigError, DebugConfig, FloorConfig, GroundConfig, LightingConfig, ModelConfig,
    OverlayConfig, PlayerConfig, SceneConfig, SkyConfig,
};
