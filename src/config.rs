//! Bridge and engine configuration.
//!
//! [`CreationParams`] are handed to the render engine when the device is
//! created. The bridge always overrides the target window size and native
//! handle, everything else is left as configured.
//!
//! [`BridgeConfig`] controls how the bridge itself draws: the clear colour
//! used for every frame and the look of the frame-rate overlay. It provides
//! defaults via [`Default`], a fluent [`BridgeConfig::builder()`] with
//! validation, and can be loaded from JSON.
//!
//! # Examples
//!
//! ## Use defaults
//! ```rust
//! use surface_bridge::config::{BridgeConfig, Color, DriverType, CreationParams};
//! let cfg = BridgeConfig::default();
//! assert_eq!(cfg.clear_color, Color::argb(255, 0, 255, 0));
//! assert_eq!(CreationParams::default().driver_type, DriverType::OpenGL);
//! ```
//!
//! ## Customize with the builder
//! ```rust
//! use surface_bridge::config::{BridgeConfig, Color};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = BridgeConfig::builder()
//!     .clear_color(Color::argb(255, 20, 20, 20))
//!     .fps_label("fps ")
//!     .build()?;
//! assert_eq!(cfg.fps_overlay.label, "fps ");
//! # Ok(()) }
//! ```
//!
//! # Errors
//!
//! Builder validation and [`BridgeConfig::from_json`] return [`ConfigError`]
//! when the overlay rectangle is inverted or empty, or when the creation
//! parameters request an unsupported colour depth.

use raw_window_handle::RawWindowHandle;
use serde::{Deserialize, Serialize};
use crate::viewport::SurfaceSize;

/// Rendering backend the engine should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DriverType {
    /// Backend that draws nothing. Useful for headless hosts.
    Null,
    /// Engine's own software rasterizer.
    Software,
    /// Higher quality software rasterizer.
    BurningsVideo,
    Direct3D9,
    /// Hardware accelerated OpenGL.
    #[default]
    OpenGL,
}

/// Parameters used to create the engine device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreationParams {
    pub driver_type: DriverType,
    /// Initial surface size. Overridden with the host client size on initialization.
    pub window_size: SurfaceSize,
    /// Native window to attach to. Overridden with the resolved handle on initialization.
    #[serde(skip)]
    pub window_id: Option<RawWindowHandle>,
    /// Colour depth in bits per pixel (16 or 32).
    pub bits: u8,
    pub fullscreen: bool,
    pub stencil_buffer: bool,
    pub vsync: bool,
    /// Multisampling level, 0 disables anti-aliasing.
    pub anti_alias: u8,
}

impl CreationParams {
    /// Checks the parameters an engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.bits, 16 | 32) {
            return Err(ConfigError::InvalidColorDepth(self.bits));
        }
        Ok(())
    }
}

impl Default for CreationParams {
    fn default() -> Self {
        Self {
            driver_type: DriverType::default(),
            window_size: SurfaceSize::new(800, 600),
            window_id: None,
            bits: 32,
            fullscreen: false,
            stencil_buffer: false,
            vsync: false,
            anti_alias: 0,
        }
    }
}

/// 32-bit ARGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::argb(255, 255, 255, 255);

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }
}

/// Rectangle in surface coordinates, given as its top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl OverlayRect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Placement and look of the frame-rate overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FpsOverlayConfig {
    pub rect: OverlayRect,
    pub color: Color,
    /// Text placed in front of the measured rate.
    pub label: String,
}

impl Default for FpsOverlayConfig {
    fn default() -> Self {
        Self {
            rect: OverlayRect::new(1, 1, 50, 10),
            color: Color::WHITE,
            label: "FPS: ".to_string(),
        }
    }
}

impl FpsOverlayConfig {
    pub fn format(&self, fps: u32) -> String {
        format!("{}{}", self.label, fps)
    }
}

/// Settings for how the bridge draws frames.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Default engine creation parameters, used when none are given on initialization.
    pub creation: CreationParams,
    /// Colour the surface is cleared to at the start of each drawn frame.
    pub clear_color: Color,
    pub fps_overlay: FpsOverlayConfig,
}

impl Default for Color {
    fn default() -> Self {
        Color::argb(255, 0, 255, 0)
    }
}

impl BridgeConfig {
    pub fn builder() -> BridgeConfigBuilder {
        BridgeConfigBuilder::default()
    }

    /// Parses and validates a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<BridgeConfig, ConfigError> {
        let cfg: BridgeConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(self)
    }
}

/// Builder for [`BridgeConfig`].
#[derive(Debug, Clone, Default)]
pub struct BridgeConfigBuilder {
    inner: BridgeConfig,
}

impl BridgeConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut BridgeConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn driver_type(self, driver: DriverType) -> Self { self.map(|c| c.creation.driver_type = driver) }
    pub fn bits(self, bits: u8) -> Self { self.map(|c| c.creation.bits = bits) }
    pub fn vsync(self, on: bool) -> Self { self.map(|c| c.creation.vsync = on) }
    pub fn stencil_buffer(self, on: bool) -> Self { self.map(|c| c.creation.stencil_buffer = on) }
    pub fn anti_alias(self, level: u8) -> Self { self.map(|c| c.creation.anti_alias = level) }
    pub fn clear_color(self, color: Color) -> Self { self.map(|c| c.clear_color = color) }
    pub fn fps_rect(self, rect: OverlayRect) -> Self { self.map(|c| c.fps_overlay.rect = rect) }
    pub fn fps_color(self, color: Color) -> Self { self.map(|c| c.fps_overlay.color = color) }
    pub fn fps_label<S: Into<String>>(self, label: S) -> Self { self.map(|c| c.fps_overlay.label = label.into()) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut BridgeConfig)) -> Self { self.map(f) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<BridgeConfig, ConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("overlay rectangle {0:?} is empty or inverted")]
    InvalidOverlayRect(OverlayRect),

    #[error("colour depth of {0} bits is not supported (expected 16 or 32)")]
    InvalidColorDepth(u8),

    #[error("cannot parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

fn validate(c: &BridgeConfig) -> Result<(), ConfigError> {
    let r = c.fps_overlay.rect;
    if r.x2 <= r.x1 || r.y2 <= r.y1 {
        return Err(ConfigError::InvalidOverlayRect(r));
    }
    c.creation.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_widget() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.creation.driver_type, DriverType::OpenGL);
        assert_eq!(cfg.creation.bits, 32);
        assert!(cfg.creation.window_id.is_none());
        assert_eq!(cfg.clear_color, Color::argb(255, 0, 255, 0));
        assert_eq!(cfg.fps_overlay.rect, OverlayRect::new(1, 1, 50, 10));
        assert_eq!(cfg.fps_overlay.color, Color::WHITE);
        assert_eq!(cfg.fps_overlay.format(0), "FPS: 0");
    }

    #[test]
    fn builder_rejects_inverted_overlay() {
        let err = BridgeConfig::builder()
            .fps_rect(OverlayRect::new(50, 1, 1, 10))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverlayRect(_)));
    }

    #[test]
    fn builder_rejects_odd_color_depth() {
        let err = BridgeConfig::builder().bits(24).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColorDepth(24)));
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let cfg = BridgeConfig::from_json(
            r#"{ "creation": { "driver_type": "Software", "vsync": true }, "fps_overlay": { "label": "fps=" } }"#,
        )
        .unwrap();

        assert_eq!(cfg.creation.driver_type, DriverType::Software);
        assert!(cfg.creation.vsync);
        assert_eq!(cfg.creation.bits, 32);
        assert_eq!(cfg.fps_overlay.format(60), "fps=60");
        assert_eq!(cfg.clear_color, Color::default());
    }

    #[test]
    fn json_errors_are_reported() {
        assert!(matches!(BridgeConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            BridgeConfig::from_json(r#"{ "creation": { "bits": 8 } }"#),
            Err(ConfigError::InvalidColorDepth(8))
        ));
    }
}
