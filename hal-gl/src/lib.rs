//! OpenGL realization of the `octoon-hal` device layer.
//!
//! A [Device] probes the current context once, then creates every resource kind. Buffers,
//! textures, framebuffers, pipelines and descriptor sets come in a classic bind-to-edit flavor
//! (OpenGL 3.3) and a direct state access flavor (OpenGL 4.5); the device picks one when it is
//! created. Draws are recorded on a [GlDeviceContext], which skips every driver call that would
//! not change the native state.
#[macro_use]
extern crate log;

pub mod api;
mod buffer;
mod context;
mod descriptor;
mod device;
mod framebuffer;
mod pipeline;
mod property;
mod sampler;
mod swapchain;
mod texture;
pub mod types;
#[cfg(feature = "glutin-window")]
mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use self::api::{GlApi, NativeGl};
pub use self::buffer::{Gl33Data, Gl45Data, GraphicsData, MappedRange};
pub use self::context::{invalidation_points, ContextDesc, ContextState, GlDeviceContext};
pub use self::descriptor::{
    DescriptorSetDesc, GlDescriptorPool, GlDescriptorSet, GlDescriptorSetLayout, UniformSlot,
    UniformValue,
};
pub use self::device::{Device, DeviceConfig};
pub use self::framebuffer::{FramebufferAttachment, FramebufferDesc, GlFramebuffer, GlFramebufferLayout};
pub use self::pipeline::{
    GlInputLayout, GlPipeline, GlProgram, GlShader, GlState, PipelineDesc, ProgramDesc,
    VertexAttrib, VertexBufferSlot, VertexPath,
};
pub use self::property::{DeviceLimits, DeviceProperty};
pub use self::sampler::GlSampler;
pub use self::swapchain::Swapchain;
pub use self::texture::{Gl33Texture, Gl45Texture, GraphicsTexture};
#[cfg(feature = "glutin-window")]
pub use self::window::{create_device_and_window, GlutinSwapchain};
