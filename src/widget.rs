//! The embeddable render widget.
//!
//! [`RenderWidget`] ties the pieces together: it resolves the native handle and creates the engine
//! through [`EngineLifecycle`], funnels every frame through the [`RenderScheduler`], translates
//! input, and keeps the surface sized to its parent through the [`ResizeCoordinator`].
//!
//! The host owns the widget and delivers its events through [`RenderWidget::handle_event`]:
//!
//! | event             | handled by                 | flow        |
//! |-------------------|----------------------------|-------------|
//! | `Paint`, `Timer`  | one frame                  | consumed    |
//! | `EraseBackground` | nothing (no flicker)       | consumed    |
//! | `Size`            | own resize                 | consumed    |
//! | `ParentSize`      | fit to parent client area  | propagates  |
//! | `Mouse`, `Key`    | forwarded to the engine    | propagates  |
//!
//! The parent window is only referenced weakly. Dropping the widget (or calling
//! [`RenderWidget::shutdown`]) removes its resize subscription from the parent, if the parent is
//! still around, and only then releases the engine.

use std::rc::{Rc, Weak};
use std::time::Duration;
use crate::config::CreationParams;
use crate::engine::device::{DeviceFactory, RenderDevice};
use crate::engine::event::EngineEvent;
use crate::engine::lifecycle::EngineLifecycle;
use crate::errors::BridgeError;
use crate::frame::{FrameOutcome, SkipReason};
use crate::host::event::{EventFlow, HostEvent, KeyEvent, MouseEvent, SizeEvent};
use crate::host::{BackgroundStyle, HostTimer, HostWidget, HostWindow, SubscriptionId, WidgetId};
use crate::input::{translate_key, translate_mouse};
use crate::platform::PlatformHandleResolver;
use crate::resize::{ResizeCoordinator, ResizeOutcome};
use crate::scheduler::{FrameListener, RenderScheduler};
use crate::viewport::SurfaceBinding;

mod options;

pub use options::{WidgetOptions, WidgetOptionsBuilder, WidgetStyle};

pub struct RenderWidget {
    options: WidgetOptions,
    widget: Box<dyn HostWidget>,
    parent: Weak<dyn HostWindow>,
    lifecycle: EngineLifecycle,
    scheduler: RenderScheduler,
    resize: ResizeCoordinator,
    subscription: Option<SubscriptionId>,
}

impl RenderWidget {
    /// Wraps a host widget living inside `parent`. The engine is not created until
    /// [`init_engine`](Self::init_engine) is called.
    pub fn new<P, W, T>(parent: &Rc<P>, widget: W, timer: T, options: WidgetOptions) -> Self
    where
        P: HostWindow + 'static,
        W: HostWidget + 'static,
        T: HostTimer + 'static,
    {
        let parent: Rc<dyn HostWindow> = parent.clone();
        widget.set_background_style(BackgroundStyle::Custom);

        let scheduler = RenderScheduler::new(Box::new(timer), &options.config, options.show_fps);
        log::debug!("widget {} ({}) created", options.id, options.name);

        Self {
            parent: Rc::downgrade(&parent),
            widget: Box::new(widget),
            lifecycle: EngineLifecycle::new(),
            scheduler,
            resize: ResizeCoordinator::new(),
            subscription: None,
            options,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.options.id
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle.is_initialized()
    }

    /// Surface the engine renders to, once initialized.
    pub fn binding(&self) -> Option<&SurfaceBinding> {
        self.resize.binding()
    }

    /// Direct access to the engine, e.g. to populate the scene.
    pub fn device_mut(&mut self) -> Option<&mut (dyn RenderDevice + 'static)> {
        self.lifecycle.device_mut()
    }

    pub fn set_frame_listener(&mut self, listener: Box<dyn FrameListener>) {
        self.scheduler.set_listener(listener);
    }

    /// Creates the engine and binds it to this widget's native window.
    ///
    /// When `params` is `None` the creation parameters from the widget options are used. The
    /// window size and handle are always taken from the host. A handle that cannot be resolved is
    /// reported to the user before the error is returned.
    pub fn init_engine(
        &mut self,
        resolver: &mut dyn PlatformHandleResolver,
        factory: &dyn DeviceFactory,
        params: Option<CreationParams>,
    ) -> Result<(), BridgeError> {
        let params = params.unwrap_or_else(|| self.options.config.creation.clone());
        let client_size = self.widget.client_size();

        let binding = match self.lifecycle.initialize(resolver, factory, client_size, Some(params)) {
            Ok(binding) => binding,
            Err(BridgeError::Resolve(e)) => {
                log::error!("widget {}: {}", self.options.id, e);
                self.widget.notify_user(e.user_message());
                return Err(BridgeError::Resolve(e));
            }
            Err(e) => {
                log::error!("widget {}: {}", self.options.id, e);
                return Err(e);
            }
        };
        self.resize.bind(binding);

        match self.parent.upgrade() {
            Some(parent) => self.subscription = Some(parent.subscribe_resize(self.options.id)),
            None => log::warn!("widget {}: parent window is gone, resize events will not arrive", self.options.id),
        }

        self.scheduler.activity_mut().force_active();
        self.widget.refresh();

        log::debug!("widget {}: engine initialized at {}x{}", self.options.id, client_size.width, client_size.height);
        Ok(())
    }

    /// Renders periodically from the host timer. Returns false if the timer did not start.
    pub fn start_rendering(&mut self, interval: Duration) -> bool {
        self.scheduler.start_periodic(interval)
    }

    pub fn stop_rendering(&mut self) {
        self.scheduler.stop_periodic();
    }

    pub fn is_rendering_periodically(&self) -> bool {
        self.scheduler.is_periodic()
    }

    pub fn create_scene(&mut self) -> bool {
        self.create_scene_with(|_| {})
    }

    /// One-time scene setup: creates the frame-rate overlay when enabled, then runs `setup`.
    /// Later calls do nothing and return false.
    pub fn create_scene_with(&mut self, setup: impl FnOnce(&mut dyn RenderDevice)) -> bool {
        let Some(device) = self.lifecycle.device_mut() else {
            log::warn!("widget {}: scene requested before the engine exists", self.options.id);
            return false;
        };
        if !self.scheduler.create_scene(device) {
            return false;
        }
        setup(device);
        true
    }

    pub fn render_once(&mut self) -> FrameOutcome {
        let Some(device) = self.lifecycle.device_mut() else {
            log::trace!("frame skipped, no engine");
            return FrameOutcome::Skipped(SkipReason::NotInitialized);
        };

        let widget = &self.widget;
        self.scheduler.render_once(device, || {
            let (x, y) = widget.pointer_position();
            widget.screen_rect().contains(x, y)
        })
    }

    pub fn handle_event(&mut self, event: &HostEvent) -> EventFlow {
        match event {
            HostEvent::Paint => {
                self.on_paint();
                EventFlow::Consumed
            }
            HostEvent::Timer => {
                self.on_timer();
                EventFlow::Consumed
            }
            HostEvent::EraseBackground => {
                self.on_erase_background();
                EventFlow::Consumed
            }
            HostEvent::Size(e) => {
                self.on_size(e);
                EventFlow::Consumed
            }
            HostEvent::ParentSize(e) => {
                self.on_parent_size(e);
                EventFlow::Propagate
            }
            HostEvent::Mouse(e) => {
                self.on_mouse(e);
                EventFlow::Propagate
            }
            HostEvent::Key(e) => {
                self.on_key(e);
                EventFlow::Propagate
            }
        }
    }

    pub fn on_paint(&mut self) -> FrameOutcome {
        self.render_once()
    }

    pub fn on_timer(&mut self) -> FrameOutcome {
        self.render_once()
    }

    /// The surface covers the whole widget, so the toolkit never has to erase it.
    pub fn on_erase_background(&mut self) {}

    pub fn on_size(&mut self, event: &SizeEvent) -> bool {
        self.resize.on_own_resize(event)
    }

    pub fn on_parent_size(&mut self, event: &SizeEvent) -> Option<ResizeOutcome> {
        let parent = self.parent.upgrade()?;
        let device = self.lifecycle.device_mut()?;
        self.resize.on_parent_resize(event, &*parent, &*self.widget, device, self.scheduler.activity_mut())
    }

    /// Forwards a mouse event to the engine. Returns false if nothing was forwarded.
    pub fn on_mouse(&mut self, event: &MouseEvent) -> bool {
        match translate_mouse(event) {
            Some(input) => self.forward(EngineEvent::Mouse(input)),
            None => false,
        }
    }

    pub fn on_key(&mut self, event: &KeyEvent) -> bool {
        self.forward(EngineEvent::Key(translate_key(event)))
    }

    // Without the timer nothing else would show the engine's reaction, so render right away.
    fn forward(&mut self, event: EngineEvent) -> bool {
        let Some(device) = self.lifecycle.device_mut() else {
            return false;
        };
        if !device.post_event(event) {
            log::trace!("widget {}: engine ignored {:?}", self.options.id, event);
        }

        if !self.scheduler.is_periodic() {
            self.render_once();
        }
        true
    }

    /// Detaches from the parent, stops the timer and releases the engine. Safe to call more than
    /// once. The widget cannot be initialized again afterwards.
    pub fn shutdown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            match self.parent.upgrade() {
                Some(parent) => {
                    parent.unsubscribe(subscription);
                }
                None => log::debug!("widget {}: parent already gone, nothing to unsubscribe", self.options.id),
            }
        }

        self.scheduler.stop_periodic();
        self.scheduler.release_scene();
        self.resize.unbind();
        if self.lifecycle.teardown() {
            log::debug!("widget {}: shut down", self.options.id);
        }
    }
}

impl Drop for RenderWidget {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use approx::assert_relative_eq;
    use raw_window_handle::{RawWindowHandle, XlibWindowHandle};
    use crate::config::{BridgeConfig, DriverType};
    use crate::engine::event::MouseInputKind;
    use crate::engine::null::{NullFactory, NullProbe};
    use crate::errors::ResolveError;
    use crate::host::event::{ButtonState, KeyTransition, MouseButton};
    use crate::host::headless::{HeadlessWidget, HeadlessWindow, ManualTimer};
    use crate::viewport::SurfaceSize;

    struct StubResolver {
        result: Option<u32>,
        calls: usize,
    }

    impl StubResolver {
        fn ok(xid: u32) -> Self {
            Self { result: Some(xid), calls: 0 }
        }

        fn failing() -> Self {
            Self { result: None, calls: 0 }
        }
    }

    impl PlatformHandleResolver for StubResolver {
        fn resolve(&mut self) -> Result<RawWindowHandle, ResolveError> {
            self.calls += 1;
            match self.result {
                Some(xid) => Ok(RawWindowHandle::Xlib(XlibWindowHandle::new(xid.into()))),
                None => Err(ResolveError::NoHandle),
            }
        }
    }

    struct Harness {
        parent: Rc<HeadlessWindow>,
        host: HeadlessWidget,
        timer: ManualTimer,
        factory: NullFactory,
        probe: NullProbe,
        bridge: RenderWidget,
    }

    fn harness(show_fps: bool) -> Harness {
        let _ = env_logger::builder().is_test(true).try_init();

        let parent = Rc::new(HeadlessWindow::new(SurfaceSize::new(1024, 768)));
        let options = WidgetOptions::builder()
            .show_fps(show_fps)
            .size(400, 300)
            .config(BridgeConfig::builder().driver_type(DriverType::Null).build().unwrap())
            .build()
            .unwrap();
        let host = HeadlessWidget::from_options(&options);
        let timer = ManualTimer::new();
        let factory = NullFactory::new();
        let probe = factory.probe();
        let bridge = RenderWidget::new(&parent, host.clone(), timer.clone(), options);

        Harness { parent, host, timer, factory, probe, bridge }
    }

    fn initialized(show_fps: bool) -> Harness {
        let mut h = harness(show_fps);
        h.bridge.init_engine(&mut StubResolver::ok(9), &h.factory, None).unwrap();
        h
    }

    #[test]
    fn new_widget_paints_its_own_background() {
        let h = harness(false);
        assert_eq!(h.host.background(), BackgroundStyle::Custom);
        assert!(!h.bridge.is_initialized());
    }

    #[test]
    fn init_binds_engine_to_host_window() {
        let h = initialized(false);

        assert!(h.bridge.is_initialized());
        let binding = h.bridge.binding().unwrap();
        assert_eq!(binding.handle(), RawWindowHandle::Xlib(XlibWindowHandle::new(9)));
        assert_eq!(binding.size(), SurfaceSize::new(400, 300));

        let requests = h.factory.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].window_size, SurfaceSize::new(400, 300));
        assert_eq!(requests[0].driver_type, DriverType::Null);

        assert_eq!(h.probe.stats().resizes, vec![SurfaceSize::new(400, 300)]);
        assert_eq!(h.parent.resize_listeners(), vec![h.bridge.id()]);
        assert_eq!(h.host.refreshes(), 1);
    }

    #[test]
    fn explicit_params_win_over_options() {
        let mut h = harness(false);
        let factory = NullFactory::accept_any_driver();
        let params = CreationParams { driver_type: DriverType::Software, ..CreationParams::default() };

        h.bridge.init_engine(&mut StubResolver::ok(1), &factory, Some(params)).unwrap();
        assert_eq!(factory.requests()[0].driver_type, DriverType::Software);
    }

    #[test]
    fn first_frame_after_init_draws_without_hover() {
        let mut h = initialized(false);

        assert_eq!(h.bridge.render_once(), FrameOutcome::Drawn);
        assert_eq!(h.bridge.render_once(), FrameOutcome::Idle);

        h.host.hover();
        assert_eq!(h.bridge.render_once(), FrameOutcome::Drawn);
        assert_eq!(h.probe.frames_drawn(), 2);
    }

    #[test]
    fn resolve_failure_leaves_no_engine_and_no_subscription() {
        let mut h = harness(false);
        let mut resolver = StubResolver::failing();

        let err = h.bridge.init_engine(&mut resolver, &h.factory, None).unwrap_err();

        assert!(matches!(err, BridgeError::Resolve(ResolveError::NoHandle)));
        assert_eq!(resolver.calls, 1);
        assert!(!h.bridge.is_initialized());
        assert!(h.bridge.binding().is_none());
        assert!(h.factory.requests().is_empty());
        assert!(h.parent.resize_listeners().is_empty());
        assert_eq!(h.host.notifications(), vec!["Could not get window handle".to_string()]);
        assert_eq!(h.bridge.render_once(), FrameOutcome::Skipped(SkipReason::NotInitialized));
    }

    #[test]
    fn engine_creation_failure_is_not_shown_to_user() {
        let mut h = harness(false);
        let err = h.bridge.init_engine(&mut StubResolver::ok(3), &NullFactory::refusing(), None).unwrap_err();

        assert!(matches!(err, BridgeError::EngineCreation(_)));
        assert!(!h.bridge.is_initialized());
        assert!(h.parent.resize_listeners().is_empty());
        assert!(h.host.notifications().is_empty());
    }

    #[test]
    fn second_init_is_rejected() {
        let mut h = initialized(false);
        let err = h.bridge.init_engine(&mut StubResolver::ok(9), &h.factory, None).unwrap_err();

        assert!(matches!(err, BridgeError::AlreadyInitialized));
        assert_eq!(h.parent.resize_listeners().len(), 1);
    }

    #[test]
    fn paint_and_timer_render_erase_does_not() {
        let mut h = initialized(false);
        h.host.hover();

        assert_eq!(h.bridge.handle_event(&HostEvent::Paint), EventFlow::Consumed);
        assert_eq!(h.bridge.handle_event(&HostEvent::Timer), EventFlow::Consumed);
        assert_eq!(h.bridge.handle_event(&HostEvent::EraseBackground), EventFlow::Consumed);

        assert_eq!(h.probe.frames_drawn(), 2);
    }

    #[test]
    fn input_without_timer_renders_one_frame() {
        let mut h = initialized(false);
        h.host.hover();
        let down = MouseEvent::button(MouseButton::Left, ButtonState::Down, 12, 34);

        let flow = h.bridge.handle_event(&HostEvent::Mouse(down));

        assert_eq!(flow, EventFlow::Propagate);
        assert_eq!(h.probe.frames_drawn(), 1);
        let stats = h.probe.stats();
        assert_eq!(stats.events.len(), 1);
        match stats.events[0] {
            EngineEvent::Mouse(m) => {
                assert_eq!(m.kind, MouseInputKind::LeftPressed);
                assert_eq!((m.x, m.y), (12, 34));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn input_with_timer_leaves_rendering_to_timer() {
        let mut h = initialized(false);
        h.host.hover();
        assert!(h.bridge.start_rendering(Duration::from_millis(16)));
        assert!(h.timer.is_running());

        let key = KeyEvent::new(KeyTransition::Down, 38, 87).with_unicode('w');
        assert_eq!(h.bridge.handle_event(&HostEvent::Key(key)), EventFlow::Propagate);

        assert_eq!(h.probe.stats().events.len(), 1);
        assert_eq!(h.probe.frames_drawn(), 0);
    }

    #[test]
    fn unclassified_mouse_event_is_not_forwarded() {
        let mut h = initialized(false);
        assert!(!h.bridge.on_mouse(&MouseEvent::default()));
        assert!(h.probe.stats().events.is_empty());
        assert_eq!(h.probe.stats().run_calls, 0);
    }

    #[test]
    fn input_before_init_is_dropped() {
        let mut h = harness(false);
        assert!(!h.bridge.on_key(&KeyEvent::new(KeyTransition::Down, 1, 1)));
        assert!(h.probe.stats().events.is_empty());
    }

    #[test]
    fn parent_resize_fits_surface_and_propagates() {
        let mut h = initialized(false);
        h.probe.attach_camera(1.0);
        h.parent.set_client_size(SurfaceSize::new(900, 450));

        let flow = h.bridge.handle_event(&HostEvent::ParentSize(SizeEvent::new(900, 450)));

        assert_eq!(flow, EventFlow::Propagate);
        assert_eq!(h.host.client_size(), SurfaceSize::new(900, 450));
        assert_eq!(h.bridge.binding().unwrap().size(), SurfaceSize::new(900, 450));
        assert_relative_eq!(h.probe.stats().camera.unwrap(), 2.0);
        assert_eq!(h.parent.refreshes(), 1);

        // forced active: draws with the pointer outside
        assert!(h.bridge.render_once().drew());
    }

    #[test]
    fn parent_resize_before_init_is_ignored() {
        let mut h = harness(false);
        assert!(h.bridge.on_parent_size(&SizeEvent::new(10, 10)).is_none());
        assert_eq!(h.host.client_size(), SurfaceSize::new(400, 300));
        assert_eq!(h.bridge.handle_event(&HostEvent::Size(SizeEvent::new(5, 5))), EventFlow::Consumed);
    }

    #[test]
    fn create_scene_runs_setup_once() {
        let mut h = initialized(true);
        let runs = Cell::new(0);

        assert!(h.bridge.create_scene_with(|_| runs.set(runs.get() + 1)));
        assert!(!h.bridge.create_scene_with(|_| runs.set(runs.get() + 1)));
        assert_eq!(runs.get(), 1);

        let stats = h.probe.stats();
        assert_eq!(stats.texts.len(), 1);
        assert_eq!(stats.texts[0].text, "FPS: 0");
    }

    #[test]
    fn fps_overlay_follows_driver_rate() {
        let mut h = initialized(true);
        h.bridge.create_scene();
        h.probe.set_fps(60);

        for _ in 0..3 {
            h.bridge.handle_event(&HostEvent::Timer);
        }

        let stats = h.probe.stats();
        assert_eq!(stats.texts[0].text, "FPS: 60");
        assert_eq!(stats.text_updates, 1);
    }

    #[test]
    fn scene_before_init_is_refused() {
        let mut h = harness(true);
        assert!(!h.bridge.create_scene());
    }

    #[test]
    fn shutdown_unsubscribes_then_releases_once() {
        let mut h = initialized(false);
        h.bridge.start_rendering(Duration::from_millis(10));

        h.bridge.shutdown();
        h.bridge.shutdown();

        assert!(h.parent.resize_listeners().is_empty());
        assert!(!h.timer.is_running());
        assert_eq!(h.probe.stats().released, 1);
        assert_eq!(h.bridge.render_once(), FrameOutcome::Skipped(SkipReason::NotInitialized));

        drop(h.bridge);
        assert_eq!(h.probe.stats().released, 1);
    }

    #[test]
    fn shut_down_widget_stays_dead() {
        let mut h = initialized(true);
        h.bridge.create_scene();
        h.bridge.shutdown();

        let err = h.bridge.init_engine(&mut StubResolver::ok(9), &h.factory, None).unwrap_err();

        assert!(matches!(err, BridgeError::ShutDown));
        assert_eq!(h.factory.requests().len(), 1);
        assert!(!h.bridge.is_initialized());
        assert!(h.parent.resize_listeners().is_empty());
        assert_eq!(h.bridge.render_once(), FrameOutcome::Skipped(SkipReason::NotInitialized));
        assert!(!h.bridge.create_scene());
        assert!(h.bridge.scheduler.fps_readout().is_none());
    }

    #[test]
    fn invalid_creation_params_are_reported() {
        let mut h = harness(false);
        let params = CreationParams { driver_type: DriverType::Null, bits: 8, ..CreationParams::default() };

        let err = h.bridge.init_engine(&mut StubResolver::ok(2), &h.factory, Some(params)).unwrap_err();

        assert!(matches!(err, BridgeError::Config(_)));
        assert!(!h.bridge.is_initialized());
        assert!(h.host.notifications().is_empty());
    }

    #[test]
    fn ignored_input_still_triggers_a_frame() {
        let mut h = initialized(false);
        h.probe.set_accept_events(false);

        assert!(h.bridge.on_key(&KeyEvent::new(KeyTransition::Down, 1, 1)));
        assert_eq!(h.probe.frames_drawn(), 1);
    }

    #[test]
    fn drop_releases_engine_and_subscription() {
        let h = initialized(false);
        let Harness { parent, probe, bridge, .. } = h;

        drop(bridge);
        assert!(parent.resize_listeners().is_empty());
        assert_eq!(probe.stats().released, 1);
    }

    #[test]
    fn parent_may_go_away_first() {
        let h = initialized(false);
        let Harness { parent, probe, bridge, .. } = h;
        let observer = (*parent).clone();

        drop(parent);
        drop(bridge);

        assert_eq!(observer.resize_listeners().len(), 1);
        assert_eq!(probe.stats().released, 1);
    }
}
