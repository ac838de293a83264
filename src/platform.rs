//! Native window handle resolution.
//!
//! The engine attaches its render surface to a native window, so before it can be created the
//! bridge needs the platform handle behind the host widget. How to get that handle differs per
//! windowing system, so it is hidden behind [`PlatformHandleResolver`]:
//!
//! - [`DirectResolver`] reads the handle straight from the widget (Win32, AppKit, or any host that
//!   implements [`raw_window_handle::HasWindowHandle`]).
//! - [`RealizeResolver`] makes sure the widget has been realized into a native window first, then
//!   reads the X11 window id from its drawable.
//!
//! [`NativeResolver`] picks the strategy for the target platform at build time.

use raw_window_handle::RawWindowHandle;
use crate::errors::ResolveError;

mod direct;
mod realize;

#[cfg(feature = "x11")]
pub mod gtk;

pub use direct::DirectResolver;
pub use realize::{NativeDrawable, RealizableWidget, RealizeResolver};

/// Produces the native window handle the render engine attaches to.
///
/// Called once, when the engine is initialized.
pub trait PlatformHandleResolver {
    fn resolve(&mut self) -> Result<RawWindowHandle, ResolveError>;
}

/// Resolver used for host widgets on this platform.
#[cfg(any(windows, target_os = "macos"))]
pub type NativeResolver<W> = DirectResolver<W>;

/// Resolver used for host widgets on this platform.
#[cfg(not(any(windows, target_os = "macos")))]
pub type NativeResolver<W> = RealizeResolver<W>;
