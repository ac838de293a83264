//! Render scheduling.
//!
//! Every frame, whatever triggered it (timer tick, paint event, input), goes through
//! [`RenderScheduler::render_once`]. A frame is skipped while another one is in progress on the
//! same surface or when the engine wants to stop, and it only draws when the [`ActivityState`]
//! says the surface is worth drawing. Otherwise the engine gets idle time.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use crate::config::{BridgeConfig, Color, FpsOverlayConfig};
use crate::engine::device::{GuiElementId, GuiEnvironment, RenderDevice};
use crate::frame::{FrameOutcome, SkipReason};
use crate::host::HostTimer;

/// Decides per frame whether the surface should be drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityState {
    force_active: bool,
    force_inactive: bool,
}

impl ActivityState {
    /// Draw the next frame no matter where the pointer is.
    pub fn force_active(&mut self) {
        self.force_active = true;
    }

    /// Skip drawing the next frame unless it is also forced active.
    pub fn force_inactive(&mut self) {
        self.force_inactive = true;
    }

    /// Combines the signals into the effective "should draw" flag and clears both forcing flags.
    ///
    /// Forced-inactive overrides cursor presence, forced-active is applied last and wins over both.
    pub fn resolve(&mut self, cursor_over: bool) -> bool {
        let mut active = cursor_over;
        if self.force_inactive {
            active = false;
        }
        if self.force_active {
            active = true;
        }

        self.force_active = false;
        self.force_inactive = false;
        active
    }
}

/// Re-entrancy flag of one render surface.
///
/// Clones share the flag, so code running inside a frame can hold one and see that a frame is in
/// progress.
#[derive(Debug, Clone, Default)]
pub struct RenderGuard {
    rendering: Rc<Cell<bool>>,
}

impl RenderGuard {
    pub fn is_rendering(&self) -> bool {
        self.rendering.get()
    }

    /// Marks a frame as in progress. Returns `None` if one already is.
    pub fn try_enter(&self) -> Option<GuardToken> {
        if self.rendering.replace(true) {
            return None;
        }
        Some(GuardToken { rendering: self.rendering.clone() })
    }
}

/// Clears the guard when dropped, including on early return and unwinding.
#[must_use]
#[derive(Debug)]
pub struct GuardToken {
    rendering: Rc<Cell<bool>>,
}

impl Drop for GuardToken {
    fn drop(&mut self) {
        self.rendering.set(false);
    }
}

/// Frame-rate text shown in the engine's GUI layer.
#[derive(Debug)]
pub struct FpsReadout {
    element: GuiElementId,
    last_fps: u32,
    overlay: FpsOverlayConfig,
}

impl FpsReadout {
    /// Creates the text element showing a rate of 0.
    pub fn create(gui: &mut dyn GuiEnvironment, overlay: &FpsOverlayConfig) -> Option<Self> {
        let element = gui.add_static_text(&overlay.format(0), overlay.rect, overlay.color)?;
        Some(Self { element, last_fps: 0, overlay: overlay.clone() })
    }

    /// Updates the text if `fps` differs from what is shown. Returns true when the text changed.
    pub fn update(&mut self, gui: &mut dyn GuiEnvironment, fps: u32) -> bool {
        if fps == self.last_fps {
            return false;
        }
        if !gui.set_text(self.element, &self.overlay.format(fps)) {
            log::warn!("frame-rate overlay element {:?} is gone", self.element);
            return false;
        }
        self.last_fps = fps;
        true
    }
}

/// Hooks run around the render phase of every frame that reaches the engine.
pub trait FrameListener {
    fn pre_render(&mut self, _device: &mut dyn RenderDevice) {}
    fn post_render(&mut self, _device: &mut dyn RenderDevice) {}
}

pub struct RenderScheduler {
    timer: Box<dyn HostTimer>,
    guard: RenderGuard,
    activity: ActivityState,
    clear_color: Color,
    overlay: FpsOverlayConfig,
    show_fps: bool,
    fps: Option<FpsReadout>,
    scene_created: bool,
    listener: Option<Box<dyn FrameListener>>,
}

impl RenderScheduler {
    pub fn new(timer: Box<dyn HostTimer>, config: &BridgeConfig, show_fps: bool) -> Self {
        Self {
            timer,
            guard: RenderGuard::default(),
            activity: ActivityState::default(),
            clear_color: config.clear_color,
            overlay: config.fps_overlay.clone(),
            show_fps,
            fps: None,
            scene_created: false,
            listener: None,
        }
    }

    /// Starts driving frames from the host timer.
    pub fn start_periodic(&mut self, interval: Duration) -> bool {
        if interval.is_zero() {
            log::warn!("refusing to start rendering with a zero interval");
            return false;
        }
        log::debug!("periodic rendering every {:?}", interval);
        self.timer.start(interval)
    }

    pub fn stop_periodic(&mut self) {
        self.timer.stop();
    }

    pub fn is_periodic(&self) -> bool {
        self.timer.is_running()
    }

    pub fn guard(&self) -> &RenderGuard {
        &self.guard
    }

    pub fn activity_mut(&mut self) -> &mut ActivityState {
        &mut self.activity
    }

    pub fn fps_readout(&self) -> Option<&FpsReadout> {
        self.fps.as_ref()
    }

    pub fn set_listener(&mut self, listener: Box<dyn FrameListener>) {
        self.listener = Some(listener);
    }

    /// One-time scene setup. Creates the frame-rate overlay when it is enabled. Returns false
    /// (and does nothing) when the scene has already been created.
    pub fn create_scene(&mut self, device: &mut dyn RenderDevice) -> bool {
        if self.scene_created {
            log::debug!("scene already created, ignoring");
            return false;
        }
        self.scene_created = true;

        if self.show_fps {
            self.fps = FpsReadout::create(device.gui(), &self.overlay);
            if self.fps.is_none() {
                log::warn!("GUI layer refused to create the frame-rate overlay");
            }
        }
        true
    }

    /// Forgets the frame-rate overlay. Called when the engine that owns it is released.
    pub fn release_scene(&mut self) {
        self.fps = None;
    }

    /// Produces at most one frame.
    ///
    /// `cursor_over` is only asked once the frame is known to go ahead.
    pub fn render_once(
        &mut self,
        device: &mut dyn RenderDevice,
        cursor_over: impl FnOnce() -> bool,
    ) -> FrameOutcome {
        if self.guard.is_rendering() {
            log::trace!("frame skipped, another frame is in progress");
            return FrameOutcome::Skipped(SkipReason::Reentrant);
        }
        if !device.run() {
            log::trace!("frame skipped, engine stopped running");
            return FrameOutcome::Skipped(SkipReason::EngineStopped);
        }

        let active = self.activity.resolve(cursor_over());

        let Some(_token) = self.guard.try_enter() else {
            return FrameOutcome::Skipped(SkipReason::Reentrant);
        };

        if let Some(listener) = self.listener.as_mut() {
            listener.pre_render(device);
        }

        let outcome = if active {
            device.driver().begin_scene(true, true, self.clear_color);
            device.scene().draw_all();
            device.gui().draw_all();
            device.driver().end_scene();
            FrameOutcome::Drawn
        } else {
            device.yield_now();
            FrameOutcome::Idle
        };

        if self.show_fps {
            if let Some(readout) = self.fps.as_mut() {
                let fps = device.driver().fps();
                readout.update(device.gui(), fps);
            }
        }

        if let Some(listener) = self.listener.as_mut() {
            listener.post_render(device);
        }

        outcome
    }
}
