//! Device creation on a glutin window.
use crate::api::{GlApi, NativeGl};
use crate::device::{Device, DeviceConfig};
use crate::swapchain::Swapchain;
use config::Config;
use glutin::{GlContext, GlWindow};
use octoon_hal::{DeviceType, Error, Result, SwapchainDesc};
use std::fmt;
use std::os::raw::c_void;
use std::rc::Rc;
use winit::{EventsLoop, WindowBuilder};

/// Default framebuffer of a glutin window.
pub struct GlutinSwapchain {
    window: Rc<GlWindow>,
    swap_interval: u32,
}

impl fmt::Debug for GlutinSwapchain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GlutinSwapchain {{..}}")
    }
}

impl GlutinSwapchain {
    pub fn window(&self) -> &Rc<GlWindow> {
        &self.window
    }
}

impl Swapchain for GlutinSwapchain {
    fn set_active(&self, active: bool) -> bool {
        // glutin cannot release a context, only switch to another one
        if !active {
            return true;
        }
        match unsafe { self.window.make_current() } {
            Ok(()) => true,
            Err(e) => {
                error!("could not make the window context current: {:?}", e);
                false
            }
        }
    }

    fn is_active(&self) -> bool {
        self.window.is_current()
    }

    fn desc(&self) -> SwapchainDesc {
        let dpi = self.window.get_hidpi_factor();
        let (width, height) = self
            .window
            .get_inner_size()
            .map_or((0, 0), |size| size.to_physical(dpi).into());
        SwapchainDesc {
            width,
            height,
            swap_interval: self.swap_interval,
            ..Default::default()
        }
    }

    fn present(&self) {
        if let Err(e) = self.window.swap_buffers() {
            error!("swap_buffers failed: {:?}", e);
        }
    }
}

/// Opens a core-profile window, loads the entry points and creates the device on it.
pub fn create_device_and_window(
    cfg: &Config,
    events_loop: &EventsLoop,
    window_builder: WindowBuilder,
) -> Result<(Device, Rc<GlutinSwapchain>)> {
    let config = DeviceConfig::from_config(cfg)?;
    let version = match config.device.device_type {
        DeviceType::OpenGL33 => glutin::GlRequest::Specific(glutin::Api::OpenGl, (3, 3)),
        DeviceType::OpenGL45 => glutin::GlRequest::Latest,
    };
    let context_builder = glutin::ContextBuilder::new()
        .with_gl_profile(glutin::GlProfile::Core)
        .with_gl_debug_flag(config.device.debug_control)
        .with_vsync(config.swap_interval > 0)
        .with_srgb(true)
        .with_gl(version);

    let window = GlWindow::new(window_builder, context_builder, events_loop).map_err(|e| {
        error!("unable to create the window: {:?}", e);
        Error::NativeAllocation("window")
    })?;
    let window = Rc::new(window);
    let swapchain = Rc::new(GlutinSwapchain {
        window: window.clone(),
        swap_interval: config.swap_interval,
    });
    if !swapchain.set_active(true) {
        return Err(Error::InvalidState("swapchain could not be made current"));
    }

    let gl: Rc<dyn GlApi> = Rc::new(NativeGl::load_with(|symbol| {
        window.get_proc_address(symbol) as *const c_void
    }));
    let device = Device::new(gl, config.device)?;
    Ok((device, swapchain))
}
