//! GTK 4 on X11.
//!
//! A `gtk4::Widget` only gets a GDK surface once it is realized. The X window id is read from the
//! `X11Surface` of the widget's native ancestor.

use gdk4_x11::X11Surface;
use gtk4::glib::object::Cast;
use gtk4::prelude::*;
use crate::platform::{NativeDrawable, RealizableWidget};

impl RealizableWidget for gtk4::Widget {
    type Drawable = X11Surface;

    fn is_realized(&self) -> bool {
        WidgetExt::is_realized(self)
    }

    fn realize(&self) {
        WidgetExt::realize(self)
    }

    fn drawable(&self) -> Option<X11Surface> {
        let native = self.native()?;
        let surface: Option<gdk4::Surface> = native.surface().into();
        surface?.downcast::<X11Surface>().ok()
    }
}

impl NativeDrawable for X11Surface {
    fn window_id(&self) -> u64 {
        self.xid() as u64
    }
}
