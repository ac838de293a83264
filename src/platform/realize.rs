use std::ffi::c_ulong;
use raw_window_handle::{RawWindowHandle, XlibWindowHandle};
use crate::errors::ResolveError;
use crate::platform::PlatformHandleResolver;

/// Native drawable backing a realized widget.
pub trait NativeDrawable {
    /// Numeric id of the native window, 0 if there is none.
    fn window_id(&self) -> u64;
}

/// Toolkit widget that only gets a native window once it has been realized.
pub trait RealizableWidget {
    type Drawable: NativeDrawable;

    fn is_realized(&self) -> bool;

    /// Materializes the widget into a native window.
    fn realize(&self);

    /// The native drawable of a realized widget.
    fn drawable(&self) -> Option<Self::Drawable>;
}

/// Realizes the host widget if needed and extracts the X11 window id of its drawable.
pub struct RealizeResolver<W> {
    widget: W,
}

impl<W: RealizableWidget> RealizeResolver<W> {
    pub fn new(widget: W) -> Self {
        Self { widget }
    }
}

impl<W: RealizableWidget> PlatformHandleResolver for RealizeResolver<W> {
    fn resolve(&mut self) -> Result<RawWindowHandle, ResolveError> {
        if !self.widget.is_realized() {
            log::debug!("host widget not realized yet, realizing");
            self.widget.realize();
            if !self.widget.is_realized() {
                return Err(ResolveError::NotRealized);
            }
        }

        let drawable = self.widget.drawable().ok_or(ResolveError::NoDrawable)?;
        let xid = drawable.window_id();
        if xid == 0 {
            return Err(ResolveError::NoDrawable);
        }

        let xid = c_ulong::try_from(xid)
            .map_err(|_| ResolveError::Unsupported(format!("window id {xid} does not fit the platform")))?;

        Ok(RawWindowHandle::Xlib(XlibWindowHandle::new(xid)))
    }
}
