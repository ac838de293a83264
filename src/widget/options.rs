//! Render widget options.
//!
//! `WidgetOptions` describes how a [`RenderWidget`](crate::widget::RenderWidget) is placed in
//! its parent and how it draws. Defaults are provided via [`Default`], and
//! [`WidgetOptions::builder()`] validates the embedded [`BridgeConfig`] on build.
//!
//! # Examples
//!
//! ```rust
//! use surface_bridge::widget::{WidgetOptions, WidgetStyle};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let opts = WidgetOptions::builder()
//!     .show_fps(true)
//!     .position(10, 20)
//!     .size(640, 480)
//!     .style(WidgetStyle::BORDER_NONE | WidgetStyle::WANTS_CHARS)
//!     .name("viewport")
//!     .build()?;
//! assert!(opts.show_fps);
//! assert_eq!(opts.size.width, 640);
//! # Ok(()) }
//! ```

use bitflags::bitflags;
use crate::config::{BridgeConfig, ConfigError};
use crate::host::WidgetId;
use crate::viewport::SurfaceSize;

bitflags! {
    /// Window style flags passed to the host when the widget is created.
    pub struct WidgetStyle: u32 {
        const BORDER_NONE            = 0b0000_0001;
        const WANTS_CHARS            = 0b0000_0010;
        const FULL_REPAINT_ON_RESIZE = 0b0000_0100;
        const TAB_TRAVERSAL          = 0b0000_1000;
        const CLIP_CHILDREN          = 0b0001_0000;
    }
}

impl Default for WidgetStyle {
    fn default() -> Self {
        WidgetStyle::TAB_TRAVERSAL | WidgetStyle::WANTS_CHARS
    }
}

#[derive(Debug, Clone)]
pub struct WidgetOptions {
    pub id: WidgetId,
    /// Show the frame-rate overlay once the scene is created.
    pub show_fps: bool,
    /// Position inside the parent's client area.
    pub position: (i32, i32),
    pub size: SurfaceSize,
    /// Read by the host toolkit when it creates the native widget; the bridge never interprets it.
    pub style: WidgetStyle,
    /// Toolkit-level widget name, also used in log output.
    pub name: String,
    pub config: BridgeConfig,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            id: WidgetId::new(),
            show_fps: false,
            position: (0, 0),
            size: SurfaceSize::new(800, 600),
            style: WidgetStyle::default(),
            name: "surface".to_string(),
            config: BridgeConfig::default(),
        }
    }
}

impl WidgetOptions {
    pub fn builder() -> WidgetOptionsBuilder {
        WidgetOptionsBuilder::default()
    }
}

/// Builder for [`WidgetOptions`].
#[derive(Debug, Clone, Default)]
pub struct WidgetOptionsBuilder {
    inner: WidgetOptions,
}

impl WidgetOptionsBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut WidgetOptions)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn id(self, id: WidgetId) -> Self { self.map(|o| o.id = id) }
    pub fn show_fps(self, on: bool) -> Self { self.map(|o| o.show_fps = on) }
    pub fn position(self, x: i32, y: i32) -> Self { self.map(|o| o.position = (x, y)) }
    pub fn size(self, width: u32, height: u32) -> Self { self.map(|o| o.size = SurfaceSize::new(width, height)) }
    pub fn style(self, style: WidgetStyle) -> Self { self.map(|o| o.style = style) }
    pub fn name<S: Into<String>>(self, name: S) -> Self { self.map(|o| o.name = name.into()) }
    pub fn config(self, config: BridgeConfig) -> Self { self.map(|o| o.config = config) }

    pub fn build(self) -> Result<WidgetOptions, ConfigError> {
        // config may have been assembled by hand
        self.inner.config.validate()?;
        Ok(self.inner)
    }
}
