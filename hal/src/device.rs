use crate::format::Format;
use derivative::Derivative;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DeviceType {
    /// Classic bind-to-edit path.
    OpenGL33,
    /// Direct state access path, falls back to `OpenGL33` when unavailable.
    OpenGL45,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Derivative)]
#[derivative(Default)]
pub struct DeviceDesc {
    #[derivative(Default(value = "DeviceType::OpenGL33"))]
    pub device_type: DeviceType,
    /// Forward driver debug messages to the log.
    pub debug_control: bool,
}

/// Surface the default framebuffer presents to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Derivative)]
#[derivative(Default)]
pub struct SwapchainDesc {
    pub width: u32,
    pub height: u32,
    #[derivative(Default(value = "Format::B8G8R8A8UNorm"))]
    pub color_format: Format,
    #[derivative(Default(value = "Format::D24UNormS8UInt"))]
    pub depth_stencil_format: Format,
    pub swap_interval: u32,
}
