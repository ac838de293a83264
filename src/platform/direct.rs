use raw_window_handle::{HandleError, HasWindowHandle, RawWindowHandle};
use crate::errors::ResolveError;
use crate::platform::PlatformHandleResolver;

/// Reads the native handle directly from the host widget.
pub struct DirectResolver<W> {
    widget: W,
}

impl<W: HasWindowHandle> DirectResolver<W> {
    pub fn new(widget: W) -> Self {
        Self { widget }
    }
}

impl<W: HasWindowHandle> PlatformHandleResolver for DirectResolver<W> {
    fn resolve(&mut self) -> Result<RawWindowHandle, ResolveError> {
        match self.widget.window_handle() {
            Ok(handle) => Ok(handle.as_raw()),
            Err(HandleError::Unavailable) => Err(ResolveError::NoHandle),
            Err(HandleError::NotSupported) => {
                Err(ResolveError::Unsupported("host widget exposes no window handle".to_string()))
            }
            Err(e) => Err(ResolveError::Unsupported(e.to_string())),
        }
    }
}
