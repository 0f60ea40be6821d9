//! Program parameters and descriptor layouts.
use crate::pipeline::ShaderStageFlags;
use std::rc::Rc;

/// Declared type of a program parameter or descriptor slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum UniformType {
    Null,
    Boolean,
    Int,
    Int2,
    Int3,
    Int4,
    UInt,
    UInt2,
    UInt3,
    UInt4,
    Float,
    Float2,
    Float3,
    Float4,
    Float2x2,
    Float3x3,
    Float4x4,
    IntArray,
    Int2Array,
    Int3Array,
    Int4Array,
    UIntArray,
    UInt2Array,
    UInt3Array,
    UInt4Array,
    FloatArray,
    Float2Array,
    Float3Array,
    Float4Array,
    Float2x2Array,
    Float3x3Array,
    Float4x4Array,
    Sampler,
    SamplerImage,
    CombinedImageSampler,
    StorageImage,
    StorageTexelBuffer,
    UniformTexelBuffer,
    UniformBuffer,
    UniformBufferDynamic,
    StorageBuffer,
    StorageBufferDynamic,
    InputAttachment,
}

impl UniformType {
    /// Array form of a scalar, vector or matrix type.
    pub fn to_array(self) -> UniformType {
        match self {
            UniformType::Int => UniformType::IntArray,
            UniformType::Int2 => UniformType::Int2Array,
            UniformType::Int3 => UniformType::Int3Array,
            UniformType::Int4 => UniformType::Int4Array,
            UniformType::UInt => UniformType::UIntArray,
            UniformType::UInt2 => UniformType::UInt2Array,
            UniformType::UInt3 => UniformType::UInt3Array,
            UniformType::UInt4 => UniformType::UInt4Array,
            UniformType::Float => UniformType::FloatArray,
            UniformType::Float2 => UniformType::Float2Array,
            UniformType::Float3 => UniformType::Float3Array,
            UniformType::Float4 => UniformType::Float4Array,
            UniformType::Float2x2 => UniformType::Float2x2Array,
            UniformType::Float3x3 => UniformType::Float3x3Array,
            UniformType::Float4x4 => UniformType::Float4x4Array,
            other => other,
        }
    }

    /// Whether this type is bound as a texture unit.
    pub fn is_texture(self) -> bool {
        match self {
            UniformType::Sampler
            | UniformType::SamplerImage
            | UniformType::CombinedImageSampler
            | UniformType::StorageImage => true,
            _ => false,
        }
    }

    /// Whether this type is bound as an indexed buffer binding point.
    pub fn is_buffer(self) -> bool {
        match self {
            UniformType::UniformBuffer
            | UniformType::UniformBufferDynamic
            | UniformType::StorageBuffer
            | UniformType::StorageBufferDynamic => true,
            _ => false,
        }
    }
}

/// A plain uniform of a linked program.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GraphicsUniform {
    pub name: String,
    /// Companion sampler name for combined image/sampler uniforms.
    pub sampler_name: Option<String>,
    pub ty: UniformType,
    /// Byte offset inside the owning uniform block, 0 for free uniforms.
    pub offset: u32,
    /// Element count, 1 for non-array uniforms.
    pub array_size: u32,
    /// Native location, or texture unit for texture uniforms.
    pub binding_point: u32,
    pub stage_flags: ShaderStageFlags,
}

/// A uniform block of a linked program.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GraphicsUniformBlock {
    pub name: String,
    pub block_size: u32,
    /// Indexed buffer binding point the block is bound to.
    pub binding_point: u32,
    pub stage_flags: ShaderStageFlags,
    /// Members in declaration order.
    pub uniforms: Vec<GraphicsUniform>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum GraphicsParam {
    Uniform(GraphicsUniform),
    UniformBlock(GraphicsUniformBlock),
}

impl GraphicsParam {
    pub fn name(&self) -> &str {
        match self {
            GraphicsParam::Uniform(u) => &u.name,
            GraphicsParam::UniformBlock(b) => &b.name,
        }
    }

    pub fn ty(&self) -> UniformType {
        match self {
            GraphicsParam::Uniform(u) => u.ty,
            GraphicsParam::UniformBlock(_) => UniformType::UniformBuffer,
        }
    }

    pub fn binding_point(&self) -> u32 {
        match self {
            GraphicsParam::Uniform(u) => u.binding_point,
            GraphicsParam::UniformBlock(b) => b.binding_point,
        }
    }

    pub fn stage_flags(&self) -> ShaderStageFlags {
        match self {
            GraphicsParam::Uniform(u) => u.stage_flags,
            GraphicsParam::UniformBlock(b) => b.stage_flags,
        }
    }
}

/// Ordered parameters a descriptor set must provide values for.
///
/// Parameters are shared with the program that produced them; descriptor sets match slots by
/// parameter identity.
#[derive(Clone, Debug, Default)]
pub struct DescriptorSetLayoutDesc {
    pub components: Vec<Rc<GraphicsParam>>,
}

impl DescriptorSetLayoutDesc {
    pub fn new(components: Vec<Rc<GraphicsParam>>) -> DescriptorSetLayoutDesc {
        DescriptorSetLayoutDesc { components }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DescriptorPoolComponent {
    pub ty: UniformType,
    pub count: u32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DescriptorPoolDesc {
    pub max_sets: u32,
    pub components: Vec<DescriptorPoolComponent>,
}
