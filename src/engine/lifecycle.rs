use crate::config::CreationParams;
use crate::engine::device::{DeviceFactory, RenderDevice};
use crate::errors::BridgeError;
use crate::platform::PlatformHandleResolver;
use crate::viewport::{SurfaceBinding, SurfaceSize};

/// Owns the engine device for the lifetime of a bridge.
///
/// The device only exists between a successful [`initialize`](Self::initialize) and
/// [`teardown`](Self::teardown). Anything that needs the device goes through
/// [`device_mut`](Self::device_mut), so nothing can reach the driver, scene or GUI before the
/// engine is up or after it has been released.
///
/// Teardown is final: once it has run, the lifecycle refuses to create another device.
#[derive(Default)]
pub struct EngineLifecycle {
    device: Option<Box<dyn RenderDevice>>,
    released: bool,
}

impl EngineLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the engine device for the surface.
    ///
    /// If `params` is `None`, [`CreationParams::default`] is used. The window size is always
    /// replaced with `client_size` and the window handle with whatever `resolver` yields. The
    /// resolver runs before the factory; when it fails, no device is created. Parameters are
    /// validated before the resolver runs.
    pub fn initialize(
        &mut self,
        resolver: &mut dyn PlatformHandleResolver,
        factory: &dyn DeviceFactory,
        client_size: SurfaceSize,
        params: Option<CreationParams>,
    ) -> Result<SurfaceBinding, BridgeError> {
        if self.released {
            return Err(BridgeError::ShutDown);
        }
        if self.device.is_some() {
            return Err(BridgeError::AlreadyInitialized);
        }

        let mut params = params.unwrap_or_default();
        params.validate()?;
        params.window_size = client_size;

        let handle = resolver.resolve()?;
        params.window_id = Some(handle);

        log::debug!(
            "creating {:?} device, size {}x{}, window {:?}",
            params.driver_type,
            client_size.width,
            client_size.height,
            handle
        );

        let mut device = factory.create_device(&params).map_err(BridgeError::EngineCreation)?;
        device.driver().on_resize(client_size);

        self.device = Some(device);
        Ok(SurfaceBinding::new(handle, client_size))
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.device.is_some()
    }

    pub fn device_mut(&mut self) -> Option<&mut (dyn RenderDevice + 'static)> {
        self.device.as_deref_mut()
    }

    /// True once [`teardown`](Self::teardown) has run.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Releases the engine device and closes the lifecycle. Returns false when there was nothing
    /// to release.
    pub fn teardown(&mut self) -> bool {
        self.released = true;
        match self.device.take() {
            Some(device) => {
                drop(device);
                log::debug!("render device released");
                true
            }
            None => false,
        }
    }
}

impl Drop for EngineLifecycle {
    fn drop(&mut self) {
        self.teardown();
    }
}
