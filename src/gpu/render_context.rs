use std::fmt;

/// Errors raised while bringing up the GPU for a window.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window handle could not be turned into a surface.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the window surface.
    AdapterRequest(wgpu::RequestAdapterError),
    /// The adapter refused to open a device.
    DeviceRequest(wgpu::RequestDeviceError),
    /// The adapter reports no usable configuration for the surface.
    UnsupportedSurface,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceCreation(e) => write!(f, "cannot create surface: {e}"),
            Self::AdapterRequest(e) => write!(f, "no usable GPU adapter: {e}"),
            Self::DeviceRequest(e) => write!(f, "cannot open GPU device: {e}"),
            Self::UnsupportedSurface => {
                f.write_str("adapter cannot present to this window")
            }
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SurfaceCreation(e) => Some(e),
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::UnsupportedSurface => None,
        }
    }
}

/// What to do when the next surface texture cannot be acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRecovery {
    /// Reconfigure the surface at its current size and skip the frame.
    Reconfigure,
    /// Skip the frame and try again next redraw.
    Skip,
    /// Unrecoverable; report the error.
    Fail,
}

impl FrameRecovery {
    /// Recovery for a surface acquisition error.
    #[must_use]
    pub fn for_error(error: &wgpu::SurfaceError) -> Self {
        match error {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                Self::Reconfigure
            }
            wgpu::SurfaceError::Timeout => Self::Skip,
            _ => Self::Fail,
        }
    }
}

/// A surface texture acquired for one frame, with its color view.
pub struct Frame {
    /// The swapchain texture; present it once drawing is submitted.
    pub texture: wgpu::SurfaceTexture,
    /// Default view of [`Self::texture`].
    pub view: wgpu::TextureView,
}

/// The window's device, queue and presentation surface.
pub struct RenderContext {
    /// Logical device.
    pub device: wgpu::Device,
    /// Submission queue.
    pub queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Open a device that can present to `window` and configure the surface
    /// at `initial_size` with vsync.
    ///
    /// # Errors
    ///
    /// Returns the [`RenderContextError`] for the step that failed.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::SurfaceCreation)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::AdapterRequest)?;

        // Two uniform groups and one instanced draw; defaults are plenty.
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("astroview device"),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::DeviceRequest)?;

        let (width, height) = (initial_size.0.max(1), initial_size.1.max(1));
        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(RenderContextError::UnsupportedSurface)?;
        config.present_mode = wgpu::PresentMode::AutoVsync;
        surface.configure(&device, &config);

        let info = adapter.get_info();
        log::info!(
            "GPU ready: {} ({:?}), surface {width}x{height} {:?}",
            info.name,
            info.backend,
            config.format,
        );

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// Color format of the surface.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Surface size in physical pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure the surface for a new window size. Zero-sized dimensions
    /// are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquire the next surface texture.
    ///
    /// Returns `Ok(None)` when the frame should be skipped: a lost or
    /// outdated surface is reconfigured at its current size first.
    ///
    /// # Errors
    ///
    /// Returns the [`wgpu::SurfaceError`] when the surface cannot recover.
    pub fn begin_frame(
        &mut self,
    ) -> Result<Option<Frame>, wgpu::SurfaceError> {
        match self.surface.get_current_texture() {
            Ok(texture) => {
                let view = texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                Ok(Some(Frame { texture, view }))
            }
            Err(e) => match FrameRecovery::for_error(&e) {
                FrameRecovery::Reconfigure => {
                    log::debug!("surface {e}, reconfiguring");
                    self.surface.configure(&self.device, &self.config);
                    Ok(None)
                }
                FrameRecovery::Skip => Ok(None),
                FrameRecovery::Fail => Err(e),
            },
        }
    }
}
