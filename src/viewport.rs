//! Geometry shared between the host toolkit and the render engine.
//!
//! A [`SurfaceSize`] is the pixel size of a client area or render surface. A
//! [`ScreenRect`] is a widget rectangle in global screen coordinates and is used
//! to decide whether the pointer hovers the embedded surface. A
//! [`SurfaceBinding`] ties the native window handle the engine draws into to the
//! current surface size.
//!
//! # Examples
//!
//! Computing an aspect ratio:
//! ```
//! use surface_bridge::viewport::SurfaceSize;
//!
//! let size = SurfaceSize::new(1920, 1080);
//! assert_eq!(size.aspect_ratio(), Some(1920.0 / 1080.0));
//! assert_eq!(SurfaceSize::new(640, 0).aspect_ratio(), None);
//! ```
//!
//! Hit testing a screen rectangle:
//! ```
//! use surface_bridge::viewport::ScreenRect;
//!
//! let rect = ScreenRect::new(10, 20, 100, 50);
//! assert!(rect.contains(10, 20));
//! assert!(!rect.contains(110, 20));
//! ```

use raw_window_handle::RawWindowHandle;
use serde::{Deserialize, Serialize};

/// Size of a surface or client area in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `width / height`, or `None` when the height is zero.
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.height == 0 {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Rectangle in global screen coordinates.
#[derive(Clone, Copy, Eq, PartialEq, Default)]
pub struct ScreenRect {
    /// Horizontal offset of the top-left corner.
    pub x: i32,

    /// Vertical offset of the top-left corner.
    pub y: i32,

    /// Width in pixels.
    pub width: u32,

    /// Height in pixels.
    pub height: u32,
}

impl std::fmt::Debug for ScreenRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ScreenRect {{ x: {}, y: {}, width: {}, height: {} }}",
            self.x, self.y, self.width, self.height
        )
    }
}

impl ScreenRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns true if the point lies inside the rectangle. The right and bottom edges are exclusive.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let (px, py) = (i64::from(px), i64::from(py));
        let (x, y) = (i64::from(self.x), i64::from(self.y));

        px >= x && py >= y && px < x + i64::from(self.width) && py < y + i64::from(self.height)
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }
}

/// Native window handle the engine renders into, together with the current surface size.
///
/// Created once when the engine is initialized. Only the resize path changes the size afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceBinding {
    handle: RawWindowHandle,
    size: SurfaceSize,
}

impl SurfaceBinding {
    pub fn new(handle: RawWindowHandle, size: SurfaceSize) -> Self {
        Self { handle, size }
    }

    #[inline]
    pub fn handle(&self) -> RawWindowHandle {
        self.handle
    }

    #[inline]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub(crate) fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_is_float_division() {
        let size = SurfaceSize::new(800, 600);
        assert_eq!(size.aspect_ratio(), Some(800.0 / 600.0));

        // integer division would give 1 here
        let size = SurfaceSize::new(3, 2);
        assert_eq!(size.aspect_ratio(), Some(1.5));
    }

    #[test]
    fn zero_height_has_no_aspect_ratio() {
        assert_eq!(SurfaceSize::new(800, 0).aspect_ratio(), None);
        assert!(SurfaceSize::new(800, 0).is_empty());
    }

    #[test]
    fn rect_contains_uses_exclusive_far_edges() {
        let rect = ScreenRect::new(-5, -5, 10, 10);
        assert!(rect.contains(-5, -5));
        assert!(rect.contains(4, 4));
        assert!(!rect.contains(5, 0));
        assert!(!rect.contains(0, 5));
        assert!(!rect.contains(-6, 0));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let rect = ScreenRect::new(0, 0, 0, 0);
        assert!(!rect.contains(0, 0));
    }
}
