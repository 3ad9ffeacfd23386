//! Pointer engine configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Where the interaction ray originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RayOrigin {
    /// Screen-space pointer position projected through the camera.
    Mouse,
    /// The owning entity's world transform.
    #[default]
    Entity,
}

/// Whether the canvas/camera come from the scene or from a user override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    /// Resolve from the scene host.
    #[default]
    Auto,
    /// Resolve from an injected override (secondary viewport, overlay).
    User,
}

/// What kind of input hardware the host considers primary. Drives the fuse
/// default: dwell-click is on by default only where touch is primary and a
/// discrete press/release cannot be assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceProfile {
    /// True on touch-first devices (phones, standalone headset browsers).
    pub touch_primary: bool,
}

/// Error loading configuration strictly.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed.
    #[error("failed to read cursor config: {0}")]
    Io(#[from] std::io::Error),
    /// The TOML did not parse into a config.
    #[error("failed to parse cursor config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for one pointer engine instance.
///
/// Immutable within an evaluation cycle; swap it wholesale through
/// `CursorEngine::reconfigure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Ray origin mode.
    pub ray_origin: RayOrigin,
    /// Whether dwell (fuse) clicks are enabled.
    pub fuse: bool,
    /// Dwell duration in milliseconds before a fuse click fires. A value of
    /// zero disables fusing even when `fuse` is true.
    pub fuse_timeout_ms: u64,
    /// Whether hovering in mouse mode applies a hover cursor style.
    pub mouse_cursor_styles_enabled: bool,
    /// Custom down-event names. When either custom list is non-empty, the
    /// default canvas press/release events are not subscribed.
    pub down_events: Vec<String>,
    /// Custom up-event names.
    pub up_events: Vec<String>,
    /// Canvas source.
    pub canvas: SourceMode,
    /// Camera source.
    pub camera: SourceMode,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            ray_origin: RayOrigin::Entity,
            fuse: false,
            fuse_timeout_ms: 1500,
            mouse_cursor_styles_enabled: true,
            down_events: Vec::new(),
            up_events: Vec::new(),
            canvas: SourceMode::Auto,
            camera: SourceMode::Auto,
        }
    }
}

impl CursorConfig {
    /// Defaults adjusted for the host device: fuse is enabled on
    /// touch-primary hardware.
    pub fn for_device(profile: DeviceProfile) -> Self {
        Self {
            fuse: profile.touch_primary,
            ..Self::default()
        }
    }

    /// True when custom down/up event names replace the device defaults.
    pub fn has_custom_gestures(&self) -> bool {
        !self.down_events.is_empty() || !self.up_events.is_empty()
    }

    /// Parse a config from TOML, reporting errors to the caller.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from a file, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => config,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                warn!("Failed to read {}: {err}. Using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_surface() {
        let config = CursorConfig::default();
        assert_eq!(config.ray_origin, RayOrigin::Entity);
        assert!(!config.fuse);
        assert_eq!(config.fuse_timeout_ms, 1500);
        assert!(config.mouse_cursor_styles_enabled);
        assert!(!config.has_custom_gestures());
        assert_eq!(config.canvas, SourceMode::Auto);
    }

    #[test]
    fn touch_primary_devices_default_to_fuse() {
        let config = CursorConfig::for_device(DeviceProfile {
            touch_primary: true,
        });
        assert!(config.fuse);

        let config = CursorConfig::for_device(DeviceProfile::default());
        assert!(!config.fuse);
    }

    #[test]
    fn toml_round_trip_preserves_fields() {
        let mut config = CursorConfig::default();
        config.ray_origin = RayOrigin::Mouse;
        config.fuse_timeout_ms = 500;
        config.down_events = vec!["triggerdown".into()];

        let toml = toml::to_string(&config).expect("serializes");
        let back = CursorConfig::from_toml_str(&toml).expect("parses");
        assert_eq!(back, config);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = CursorConfig::from_toml_str("ray_origin = \"mouse\"\n").expect("parses");
        assert_eq!(config.ray_origin, RayOrigin::Mouse);
        assert_eq!(config.fuse_timeout_ms, 1500);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = CursorConfig::from_toml_str("fuse_timeout_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = CursorConfig::load_from_path(Path::new("/nonexistent/cursor.toml"));
        assert_eq!(config, CursorConfig::default());
    }
}
