//! Null engine device.
//!
//! [`NullDevice`] implements the whole [`RenderDevice`] surface without drawing anything. It keeps
//! counters of every call so headless hosts (and tests) can observe what the bridge asked the
//! engine to do through a [`NullProbe`].

use std::cell::{Ref, RefCell};
use std::rc::Rc;
use anyhow::{anyhow, Result};
use crate::config::{Color, CreationParams, DriverType, OverlayRect};
use crate::engine::device::{
    CameraNode, DeviceFactory, GuiElementId, GuiEnvironment, RenderDevice, SceneManager, VideoDriver,
};
use crate::engine::event::EngineEvent;
use crate::viewport::SurfaceSize;

/// Static text element created through the null GUI layer.
#[derive(Debug, Clone, PartialEq)]
pub struct NullText {
    pub id: GuiElementId,
    pub text: String,
    pub rect: OverlayRect,
    pub color: Color,
}

/// Everything the null device has been asked to do.
#[derive(Debug)]
pub struct NullStats {
    /// Value returned from [`RenderDevice::run`].
    pub running: bool,
    /// Value returned from [`VideoDriver::fps`].
    pub fps: u32,
    /// Whether posted events are consumed.
    pub accept_events: bool,
    pub run_calls: usize,
    pub begin_scene_calls: usize,
    pub end_scene_calls: usize,
    pub scene_draws: usize,
    pub gui_draws: usize,
    pub yields: usize,
    pub last_clear: Option<Color>,
    pub events: Vec<EngineEvent>,
    pub resizes: Vec<SurfaceSize>,
    pub camera: Option<f32>,
    pub aspect_updates: usize,
    pub texts: Vec<NullText>,
    pub text_updates: usize,
    pub released: usize,
}

impl Default for NullStats {
    fn default() -> Self {
        Self {
            running: true,
            fps: 0,
            accept_events: true,
            run_calls: 0,
            begin_scene_calls: 0,
            end_scene_calls: 0,
            scene_draws: 0,
            gui_draws: 0,
            yields: 0,
            last_clear: None,
            events: Vec::new(),
            resizes: Vec::new(),
            camera: None,
            aspect_updates: 0,
            texts: Vec::new(),
            text_updates: 0,
            released: 0,
        }
    }
}

/// Shared view on the stats of a [`NullDevice`]. Stays valid after the device is dropped.
#[derive(Debug, Clone, Default)]
pub struct NullProbe(Rc<RefCell<NullStats>>);

impl NullProbe {
    pub fn stats(&self) -> Ref<'_, NullStats> {
        self.0.borrow()
    }

    pub fn set_running(&self, running: bool) {
        self.0.borrow_mut().running = running;
    }

    pub fn set_fps(&self, fps: u32) {
        self.0.borrow_mut().fps = fps;
    }

    pub fn set_accept_events(&self, accept: bool) {
        self.0.borrow_mut().accept_events = accept;
    }

    /// Puts an active camera into the scene, with the given aspect ratio.
    pub fn attach_camera(&self, aspect_ratio: f32) {
        self.0.borrow_mut().camera = Some(aspect_ratio);
    }

    /// Number of frames that went through a complete begin/end scene cycle.
    pub fn frames_drawn(&self) -> usize {
        self.0.borrow().end_scene_calls
    }
}

pub struct NullDriver {
    stats: Rc<RefCell<NullStats>>,
}

impl VideoDriver for NullDriver {
    fn begin_scene(&mut self, _clear_back_buffer: bool, _clear_z_buffer: bool, color: Color) -> bool {
        let mut s = self.stats.borrow_mut();
        s.begin_scene_calls += 1;
        s.last_clear = Some(color);
        true
    }

    fn end_scene(&mut self) -> bool {
        self.stats.borrow_mut().end_scene_calls += 1;
        true
    }

    fn on_resize(&mut self, size: SurfaceSize) {
        self.stats.borrow_mut().resizes.push(size);
    }

    fn fps(&self) -> u32 {
        self.stats.borrow().fps
    }
}

pub struct NullCamera {
    stats: Rc<RefCell<NullStats>>,
}

impl CameraNode for NullCamera {
    fn set_aspect_ratio(&mut self, ratio: f32) {
        let mut s = self.stats.borrow_mut();
        s.camera = Some(ratio);
        s.aspect_updates += 1;
    }

    fn aspect_ratio(&self) -> f32 {
        self.stats.borrow().camera.unwrap_or(0.0)
    }
}

pub struct NullScene {
    stats: Rc<RefCell<NullStats>>,
    camera: NullCamera,
}

impl SceneManager for NullScene {
    fn draw_all(&mut self) {
        self.stats.borrow_mut().scene_draws += 1;
    }

    fn active_camera(&mut self) -> Option<&mut dyn CameraNode> {
        if self.stats.borrow().camera.is_some() {
            Some(&mut self.camera as &mut dyn CameraNode)
        } else {
            None
        }
    }
}

pub struct NullGui {
    stats: Rc<RefCell<NullStats>>,
}

impl GuiEnvironment for NullGui {
    fn draw_all(&mut self) {
        self.stats.borrow_mut().gui_draws += 1;
    }

    fn add_static_text(&mut self, text: &str, rect: OverlayRect, color: Color) -> Option<GuiElementId> {
        let mut s = self.stats.borrow_mut();
        let id = GuiElementId(s.texts.len() as u32 + 1);
        s.texts.push(NullText { id, text: text.to_string(), rect, color });
        Some(id)
    }

    fn set_text(&mut self, element: GuiElementId, text: &str) -> bool {
        let mut s = self.stats.borrow_mut();
        let Some(entry) = s.texts.iter_mut().find(|t| t.id == element) else {
            return false;
        };
        entry.text = text.to_string();
        s.text_updates += 1;
        true
    }
}

/// Engine device that does not perform any rendering.
pub struct NullDevice {
    stats: Rc<RefCell<NullStats>>,
    driver: NullDriver,
    scene: NullScene,
    gui: NullGui,
}

impl NullDevice {
    pub fn new() -> Self {
        Self::with_probe(&NullProbe::default())
    }

    /// Creates a device reporting into an existing probe.
    pub fn with_probe(probe: &NullProbe) -> Self {
        let stats = probe.0.clone();
        Self {
            driver: NullDriver { stats: stats.clone() },
            scene: NullScene { stats: stats.clone(), camera: NullCamera { stats: stats.clone() } },
            gui: NullGui { stats: stats.clone() },
            stats,
        }
    }

    pub fn probe(&self) -> NullProbe {
        NullProbe(self.stats.clone())
    }
}

impl Default for NullDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NullDevice {
    fn drop(&mut self) {
        self.stats.borrow_mut().released += 1;
    }
}

impl RenderDevice for NullDevice {
    fn run(&mut self) -> bool {
        let mut s = self.stats.borrow_mut();
        s.run_calls += 1;
        s.running
    }

    fn yield_now(&mut self) {
        self.stats.borrow_mut().yields += 1;
    }

    fn post_event(&mut self, event: EngineEvent) -> bool {
        let mut s = self.stats.borrow_mut();
        if !s.accept_events {
            return false;
        }
        s.events.push(event);
        true
    }

    fn driver(&mut self) -> &mut dyn VideoDriver {
        &mut self.driver
    }

    fn scene(&mut self) -> &mut dyn SceneManager {
        &mut self.scene
    }

    fn gui(&mut self) -> &mut dyn GuiEnvironment {
        &mut self.gui
    }
}

/// Factory producing [`NullDevice`]s that all report into the same probe.
///
/// Only [`DriverType::Null`] is accepted unless the factory is created with
/// [`NullFactory::accept_any_driver`], so hosts cannot silently end up with a device that never
/// draws.
#[derive(Debug, Clone, Default)]
pub struct NullFactory {
    probe: NullProbe,
    any_driver: bool,
    refuse: bool,
    requests: Rc<RefCell<Vec<CreationParams>>>,
}

impl NullFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept_any_driver() -> Self {
        Self { any_driver: true, ..Self::default() }
    }

    /// Factory that refuses every configuration.
    pub fn refusing() -> Self {
        Self { refuse: true, ..Self::default() }
    }

    pub fn probe(&self) -> NullProbe {
        self.probe.clone()
    }

    /// Parameters of every creation request seen so far.
    pub fn requests(&self) -> Vec<CreationParams> {
        self.requests.borrow().clone()
    }
}

impl DeviceFactory for NullFactory {
    fn create_device(&self, params: &CreationParams) -> Result<Box<dyn RenderDevice>> {
        self.requests.borrow_mut().push(params.clone());

        if self.refuse {
            return Err(anyhow!("null engine refuses to start"));
        }
        if !self.any_driver && params.driver_type != DriverType::Null {
            return Err(anyhow!("null factory cannot create a {:?} device", params.driver_type));
        }
        if params.window_id.is_none() {
            return Err(anyhow!("no target window given"));
        }

        log::debug!("creating null device for {:?}", params.window_size);
        Ok(Box::new(NullDevice::with_probe(&self.probe)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::event::{KeyInput, EngineEvent};
    use raw_window_handle::{RawWindowHandle, XlibWindowHandle};

    fn params(driver_type: DriverType) -> CreationParams {
        CreationParams {
            driver_type,
            window_id: Some(RawWindowHandle::Xlib(XlibWindowHandle::new(42))),
            ..CreationParams::default()
        }
    }

    #[test]
    fn device_records_frame_calls() {
        let mut dev = NullDevice::new();
        let probe = dev.probe();

        assert!(dev.run());
        dev.driver().begin_scene(true, true, Color::WHITE);
        dev.scene().draw_all();
        dev.gui().draw_all();
        dev.driver().end_scene();
        dev.yield_now();

        let s = probe.stats();
        assert_eq!(s.run_calls, 1);
        assert_eq!(s.begin_scene_calls, 1);
        assert_eq!(s.scene_draws, 1);
        assert_eq!(s.gui_draws, 1);
        assert_eq!(s.yields, 1);
        assert_eq!(s.last_clear, Some(Color::WHITE));
        assert_eq!(probe.frames_drawn(), 1);
    }

    #[test]
    fn probe_outlives_device_and_sees_release() {
        let dev = NullDevice::new();
        let probe = dev.probe();
        drop(dev);
        assert_eq!(probe.stats().released, 1);
    }

    #[test]
    fn camera_only_present_when_attached() {
        let mut dev = NullDevice::new();
        assert!(dev.scene().active_camera().is_none());

        dev.probe().attach_camera(1.0);
        let cam = dev.scene().active_camera().unwrap();
        cam.set_aspect_ratio(2.0);
        assert_eq!(cam.aspect_ratio(), 2.0);
        assert_eq!(dev.probe().stats().aspect_updates, 1);
    }

    #[test]
    fn gui_text_can_be_replaced() {
        let mut dev = NullDevice::new();
        let id = dev.gui().add_static_text("FPS: 0", OverlayRect::new(1, 1, 50, 10), Color::WHITE).unwrap();
        assert!(dev.gui().set_text(id, "FPS: 60"));
        assert!(!dev.gui().set_text(GuiElementId(99), "nope"));

        let probe = dev.probe();
        let s = probe.stats();
        assert_eq!(s.texts[0].text, "FPS: 60");
        assert_eq!(s.text_updates, 1);
    }

    #[test]
    fn posted_events_are_queued_in_order() {
        let mut dev = NullDevice::new();
        let key = KeyInput { key: 65, pressed_down: true, shift: false, control: false, character: 'a' };
        dev.post_event(EngineEvent::Key(key));
        dev.post_event(EngineEvent::Key(KeyInput { pressed_down: false, ..key }));

        let probe = dev.probe();
        assert_eq!(probe.stats().events.len(), 2);
    }

    #[test]
    fn factory_checks_driver_and_window() {
        let factory = NullFactory::new();
        assert!(factory.create_device(&params(DriverType::OpenGL)).is_err());
        assert!(factory.create_device(&CreationParams { driver_type: DriverType::Null, ..CreationParams::default() }).is_err());
        assert!(factory.create_device(&params(DriverType::Null)).is_ok());
        assert_eq!(factory.requests().len(), 3);

        assert!(NullFactory::accept_any_driver().create_device(&params(DriverType::OpenGL)).is_ok());
        assert!(NullFactory::refusing().create_device(&params(DriverType::Null)).is_err());
    }
}
