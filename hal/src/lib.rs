//! Backend-neutral graphics device vocabulary.
//!
//! This crate holds the descriptors used to create GPU resources (buffers, textures,
//! samplers, shaders, fixed-function state, vertex layouts, framebuffer layouts, descriptor
//! layouts) and the reflection records produced by linked programs. It never talks to a
//! driver: see `octoon-hal-gl` for the OpenGL realization.

pub mod buffer;
pub mod descriptor;
pub mod device;
pub mod error;
pub mod format;
pub mod framebuffer;
pub mod image;
pub mod pipeline;
pub mod vertex;

pub use self::buffer::{DataDesc, DataType, IndexType, UsageFlags};
pub use self::descriptor::{
    DescriptorPoolComponent, DescriptorPoolDesc, DescriptorSetLayoutDesc, GraphicsParam,
    GraphicsUniform, GraphicsUniformBlock, UniformType,
};
pub use self::device::{DeviceDesc, DeviceType, SwapchainDesc};
pub use self::error::{Error, Result};
pub use self::format::{ComponentLayout, Format, FormatInfo, NumericFormat};
pub use self::framebuffer::{
    AttachmentLayout, ClearFlags, FramebufferLayoutDesc, ImageLayout, Scissor, Viewport,
};
pub use self::image::{
    SamplerAnis, SamplerDesc, SamplerFilter, SamplerWrap, TextureDesc, TextureDim,
};
pub use self::pipeline::{
    BlendFactor, BlendOp, ColorBlend, ColorMaskFlags, CompareFunction, CullMode, FrontFace,
    GraphicsAttribute, PolygonMode, RenderStateDesc, ShaderDesc, ShaderLang, ShaderStageFlags,
    StencilFaceFlags, StencilFaceState, StencilOp, VertexType,
};
pub use self::vertex::{InputLayoutDesc, VertexBinding, VertexDivisor, VertexLayout};
