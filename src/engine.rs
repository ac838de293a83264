//! Render engine seam: the device traits the bridge drives, the input events it posts, the
//! lifecycle owner of the running device, and a null device for headless hosts.

pub mod device;
pub mod event;
pub mod lifecycle;
pub mod null;

pub use device::{
    CameraNode, DeviceFactory, GuiElementId, GuiEnvironment, RenderDevice, SceneManager, VideoDriver,
};
pub use event::{EngineEvent, KeyInput, MouseInput, MouseInputKind};
pub use lifecycle::EngineLifecycle;
