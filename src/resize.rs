use crate::engine::device::RenderDevice;
use crate::host::event::SizeEvent;
use crate::host::{HostWidget, HostWindow};
use crate::scheduler::ActivityState;
use crate::viewport::{SurfaceBinding, SurfaceSize};

/// What a parent resize applied to the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOutcome {
    pub size: SurfaceSize,
    /// Aspect ratio given to the active camera. `None` when there was no camera or the new height
    /// is zero.
    pub aspect_ratio: Option<f32>,
}

/// Keeps the surface binding, host client size and camera aspect ratio in step.
///
/// Nothing happens until [`bind`](Self::bind) is called with the binding produced by engine
/// initialization.
#[derive(Debug, Default)]
pub struct ResizeCoordinator {
    binding: Option<SurfaceBinding>,
}

impl ResizeCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, binding: SurfaceBinding) {
        self.binding = Some(binding);
    }

    pub fn unbind(&mut self) {
        self.binding = None;
    }

    pub fn binding(&self) -> Option<&SurfaceBinding> {
        self.binding.as_ref()
    }

    /// The widget's own size events carry nothing the surface needs; the parent resize handler does
    /// the work. Returns whether the event reached a bound surface.
    pub fn on_own_resize(&mut self, event: &SizeEvent) -> bool {
        if self.binding.is_none() {
            return false;
        }
        log::trace!("own resize to {}x{} ignored", event.size.width, event.size.height);
        true
    }

    /// Fits the surface to the parent's client area.
    ///
    /// The size is read from the parent, not taken from the event, as the event may be stale by
    /// the time it is dispatched.
    pub fn on_parent_resize(
        &mut self,
        _event: &SizeEvent,
        parent: &dyn HostWindow,
        widget: &dyn HostWidget,
        device: &mut dyn RenderDevice,
        activity: &mut ActivityState,
    ) -> Option<ResizeOutcome> {
        let binding = self.binding.as_mut()?;

        let size = parent.client_size();
        widget.set_client_size(size);
        binding.resize(size);
        device.driver().on_resize(size);

        let mut aspect_ratio = None;
        match (device.scene().active_camera(), size.aspect_ratio()) {
            (Some(camera), Some(ratio)) => {
                camera.set_aspect_ratio(ratio);
                aspect_ratio = Some(ratio);
            }
            (Some(_), None) => log::debug!("zero height surface, camera aspect ratio left as is"),
            (None, _) => {}
        }

        activity.force_active();
        parent.refresh();
        widget.refresh();

        log::debug!("surface resized to {}x{}", size.width, size.height);
        Some(ResizeOutcome { size, aspect_ratio })
    }
}
