pub mod config;
pub mod engine;
pub mod errors;
pub mod frame;
pub mod host;
pub mod input;
pub mod platform;
pub mod resize;
pub mod scheduler;
pub mod viewport;
pub mod widget;

pub use config::{BridgeConfig, CreationParams, DriverType};
pub use errors::{BridgeError, ResolveError};
pub use frame::{FrameOutcome, SkipReason};
pub use widget::{RenderWidget, WidgetOptions};
