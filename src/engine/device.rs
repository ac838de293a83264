use crate::config::{Color, CreationParams, OverlayRect};
use crate::engine::event::EngineEvent;
use crate::viewport::SurfaceSize;

/// Identifier of an element created in the engine's GUI layer. The element itself is owned by the
/// GUI layer; holding an id does not keep it alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuiElementId(pub u32);

/// Video driver of a running engine.
pub trait VideoDriver {
    /// Starts a frame, clearing the back buffer and depth buffer when asked to.
    fn begin_scene(&mut self, clear_back_buffer: bool, clear_z_buffer: bool, color: Color) -> bool;

    /// Finishes the frame and presents it.
    fn end_scene(&mut self) -> bool;

    /// Tells the driver the render surface changed size.
    fn on_resize(&mut self, size: SurfaceSize);

    /// Frames per second as measured by the driver.
    fn fps(&self) -> u32;
}

/// Camera in the scene graph.
pub trait CameraNode {
    fn set_aspect_ratio(&mut self, ratio: f32);
    fn aspect_ratio(&self) -> f32;
}

/// Scene graph of a running engine.
pub trait SceneManager {
    fn draw_all(&mut self);

    /// The camera currently used to render the scene, if any.
    fn active_camera(&mut self) -> Option<&mut dyn CameraNode>;
}

/// GUI overlay layer of a running engine.
pub trait GuiEnvironment {
    fn draw_all(&mut self);

    /// Creates a static text element. Returns `None` when the GUI layer refuses to create it.
    fn add_static_text(&mut self, text: &str, rect: OverlayRect, color: Color) -> Option<GuiElementId>;

    /// Replaces the text of an element. Returns false if the element no longer exists.
    fn set_text(&mut self, element: GuiElementId, text: &str) -> bool;
}

/// A running engine instance bound to a native window.
///
/// Sub-handles borrow from the device, so they can never outlive it. All calls happen on the host
/// UI thread.
pub trait RenderDevice {
    /// Runs the engine's internal message pump. Returns false once the engine wants to stop.
    fn run(&mut self) -> bool;

    /// Gives the CPU back to the engine's idle handling without drawing.
    fn yield_now(&mut self);

    /// Queues an input event. Returns true if the engine consumed it.
    fn post_event(&mut self, event: EngineEvent) -> bool;

    fn driver(&mut self) -> &mut dyn VideoDriver;
    fn scene(&mut self) -> &mut dyn SceneManager;
    fn gui(&mut self) -> &mut dyn GuiEnvironment;
}

/// Creates engine devices. Engines refuse configurations they cannot honour by returning an error.
pub trait DeviceFactory {
    fn create_device(&self, params: &CreationParams) -> anyhow::Result<Box<dyn RenderDevice>>;
}

impl<F> DeviceFactory for F
where
    F: Fn(&CreationParams) -> anyhow::Result<Box<dyn RenderDevice>>,
{
    fn create_device(&self, params: &CreationParams) -> anyhow::Result<Box<dyn RenderDevice>> {
        self(params)
    }
}
