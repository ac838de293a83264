//! In-memory host.
//!
//! [`HeadlessWidget`], [`HeadlessWindow`] and [`ManualTimer`] implement the host traits without a
//! GUI toolkit. Each is a cheap handle over shared state, so a clone kept by the caller observes
//! everything the bridge does to the original. Useful for offscreen rendering and for driving a
//! bridge from tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use crate::host::{BackgroundStyle, HostTimer, HostWidget, HostWindow, SubscriptionId, WidgetId};
use crate::viewport::{ScreenRect, SurfaceSize};
use crate::widget::WidgetOptions;

#[derive(Debug, Default)]
struct WidgetState {
    rect: ScreenRect,
    pointer: (i32, i32),
    refreshes: usize,
    background: BackgroundStyle,
    notifications: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessWidget {
    state: Rc<RefCell<WidgetState>>,
}

impl HeadlessWidget {
    /// Widget at screen origin with the given client size. The pointer starts outside of it.
    pub fn new(size: SurfaceSize) -> Self {
        let widget = Self::default();
        {
            let mut s = widget.state.borrow_mut();
            s.rect = ScreenRect::new(0, 0, size.width, size.height);
            s.pointer = (-1, -1);
        }
        widget
    }

    /// Widget placed and sized as the options ask for.
    pub fn from_options(options: &WidgetOptions) -> Self {
        let widget = Self::new(options.size);
        widget.state.borrow_mut().rect.x = options.position.0;
        widget.state.borrow_mut().rect.y = options.position.1;
        widget
    }

    /// Moves the pointer to a global screen position.
    pub fn set_pointer(&self, x: i32, y: i32) {
        self.state.borrow_mut().pointer = (x, y);
    }

    /// Moves the pointer to the centre of the widget.
    pub fn hover(&self) {
        let rect = self.state.borrow().rect;
        self.set_pointer(rect.x + (rect.width / 2) as i32, rect.y + (rect.height / 2) as i32);
    }

    pub fn refreshes(&self) -> usize {
        self.state.borrow().refreshes
    }

    pub fn background(&self) -> BackgroundStyle {
        self.state.borrow().background
    }

    pub fn notifications(&self) -> Vec<String> {
        self.state.borrow().notifications.clone()
    }
}

impl HostWidget for HeadlessWidget {
    fn client_size(&self) -> SurfaceSize {
        self.state.borrow().rect.size()
    }

    fn set_client_size(&self, size: SurfaceSize) {
        let mut s = self.state.borrow_mut();
        s.rect.width = size.width;
        s.rect.height = size.height;
    }

    fn screen_rect(&self) -> ScreenRect {
        self.state.borrow().rect
    }

    fn pointer_position(&self) -> (i32, i32) {
        self.state.borrow().pointer
    }

    fn refresh(&self) {
        self.state.borrow_mut().refreshes += 1;
    }

    fn set_background_style(&self, style: BackgroundStyle) {
        self.state.borrow_mut().background = style;
    }

    fn notify_user(&self, message: &str) {
        log::warn!("headless host notification: {message}");
        self.state.borrow_mut().notifications.push(message.to_string());
    }
}

#[derive(Debug, Default)]
struct WindowState {
    size: SurfaceSize,
    refreshes: usize,
    next_subscription: u64,
    subscriptions: Vec<(SubscriptionId, WidgetId)>,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessWindow {
    state: Rc<RefCell<WindowState>>,
}

impl HeadlessWindow {
    pub fn new(size: SurfaceSize) -> Self {
        let window = Self::default();
        window.state.borrow_mut().size = size;
        window
    }

    pub fn set_client_size(&self, size: SurfaceSize) {
        self.state.borrow_mut().size = size;
    }

    pub fn refreshes(&self) -> usize {
        self.state.borrow().refreshes
    }

    /// Widgets currently listening to this window's size events.
    pub fn resize_listeners(&self) -> Vec<WidgetId> {
        self.state.borrow().subscriptions.iter().map(|(_, w)| *w).collect()
    }
}

impl HostWindow for HeadlessWindow {
    fn client_size(&self) -> SurfaceSize {
        self.state.borrow().size
    }

    fn refresh(&self) {
        self.state.borrow_mut().refreshes += 1;
    }

    fn subscribe_resize(&self, listener: WidgetId) -> SubscriptionId {
        let mut s = self.state.borrow_mut();
        s.next_subscription += 1;
        let id = SubscriptionId(s.next_subscription);
        s.subscriptions.push((id, listener));
        id
    }

    fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        let mut s = self.state.borrow_mut();
        let before = s.subscriptions.len();
        s.subscriptions.retain(|(id, _)| *id != subscription);
        s.subscriptions.len() != before
    }
}

#[derive(Debug, Default)]
struct TimerState {
    interval: Option<Duration>,
    starts: usize,
}

/// Timer that never fires by itself; the owner delivers [`HostEvent::Timer`](crate::host::HostEvent::Timer)
/// whenever it wants a tick.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    state: Rc<RefCell<TimerState>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interval(&self) -> Option<Duration> {
        self.state.borrow().interval
    }

    pub fn starts(&self) -> usize {
        self.state.borrow().starts
    }
}

impl HostTimer for ManualTimer {
    fn start(&mut self, interval: Duration) -> bool {
        let mut s = self.state.borrow_mut();
        s.interval = Some(interval);
        s.starts += 1;
        true
    }

    fn stop(&mut self) {
        self.state.borrow_mut().interval = None;
    }

    fn is_running(&self) -> bool {
        self.state.borrow().interval.is_some()
    }
}
