//! Host toolkit seam.
//!
//! The bridge never talks to a GUI toolkit directly. The widget it is embedded as, the parent
//! window that contains it and the timer that drives periodic rendering are reached through the
//! traits in this module. Host objects are shared with the toolkit, so the traits take `&self` and
//! implementations use interior mutability, the way toolkit handles usually work.
//!
//! [`headless`] contains an in-memory host for offscreen use.

use std::fmt::Display;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::viewport::{ScreenRect, SurfaceSize};

pub mod event;
pub mod headless;

pub use event::{
    ButtonChange, ButtonState, EventFlow, HostEvent, KeyEvent, KeyTransition, MouseButton, MouseEvent,
    SizeEvent,
};

/// Identity of an embedded render widget.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(Uuid);

impl WidgetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for WidgetId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle of a resize subscription registered on a parent window.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// How the widget background is painted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum BackgroundStyle {
    /// The toolkit erases the background before every paint.
    #[default]
    Erase,
    /// The toolkit paints the background with the system colour.
    System,
    /// The widget paints its whole area itself; no default erase happens.
    Custom,
}

/// The host widget the render surface is embedded as.
pub trait HostWidget {
    /// Size of the drawable client area.
    fn client_size(&self) -> SurfaceSize;

    fn set_client_size(&self, size: SurfaceSize);

    /// Widget rectangle in global screen coordinates.
    fn screen_rect(&self) -> ScreenRect;

    /// Current pointer position in global screen coordinates.
    fn pointer_position(&self) -> (i32, i32);

    /// Asks the toolkit to repaint the widget.
    fn refresh(&self);

    fn set_background_style(&self, style: BackgroundStyle);

    /// Shows a blocking message to the user.
    fn notify_user(&self, message: &str);
}

/// The window containing the render widget.
pub trait HostWindow {
    fn client_size(&self) -> SurfaceSize;

    fn refresh(&self);

    /// Routes this window's size events to `listener` until unsubscribed.
    fn subscribe_resize(&self, listener: WidgetId) -> SubscriptionId;

    /// Removes a subscription. Returns false if it was not registered.
    fn unsubscribe(&self, subscription: SubscriptionId) -> bool;
}

/// Periodic timer of the host event loop. Every tick is delivered as [`HostEvent::Timer`].
pub trait HostTimer {
    fn start(&mut self, interval: Duration) -> bool;
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_ids_are_unique() {
        assert_ne!(WidgetId::new(), WidgetId::new());
    }

    #[test]
    fn widget_id_serializes_as_plain_uuid() {
        let uuid = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let json = serde_json::to_string(&WidgetId::from(uuid)).unwrap();
        assert_eq!(json, "\"67e55044-10b1-426f-9247-bb680e5fe0c8\"");
    }

    #[test]
    fn widget_id_displays_as_uuid() {
        let uuid = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(WidgetId::from(uuid).to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }
}
