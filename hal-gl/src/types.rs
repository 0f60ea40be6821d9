//! Translation tables between the neutral vocabulary and GL tokens.
//!
//! Every function returns [INVALID](crate::api::INVALID) for inputs with no native counterpart.
//! Callers check for it and fail the operation.
use crate::api as gl;
use crate::api::types::*;
use crate::api::{GlApi, INVALID};
use octoon_hal::{
    BlendFactor, BlendOp, CompareFunction, ComponentLayout, CullMode, DataType, Error, Format,
    FrontFace, IndexType, NumericFormat, PolygonMode, Result, SamplerFilter, SamplerWrap,
    ShaderStageFlags, StencilOp, TextureDim, UsageFlags, VertexType,
};

//--------------------------------------------------------------------------------------------------
// Classification predicates
pub fn is_compressed_texture(format: Format) -> bool {
    format.is_compressed()
}

pub fn is_depth_format(format: Format) -> bool {
    format.is_depth()
}

pub fn is_stencil_format(format: Format) -> bool {
    format.is_stencil()
}

pub fn is_depth_stencil_format(format: Format) -> bool {
    format.is_depth_stencil()
}

pub fn is_norm_format(format: Format) -> bool {
    format.is_norm()
}

/// Whether pixel transfers of this format use the `*_INTEGER` pixel formats.
fn is_integer_texture(numeric: NumericFormat) -> bool {
    match numeric {
        NumericFormat::UInt | NumericFormat::SInt | NumericFormat::UScaled | NumericFormat::SScaled => true,
        _ => false,
    }
}

fn is_signed(numeric: NumericFormat) -> bool {
    match numeric {
        NumericFormat::SNorm | NumericFormat::SScaled | NumericFormat::SInt | NumericFormat::SFloat => true,
        _ => false,
    }
}

//--------------------------------------------------------------------------------------------------
// Vertex input
pub fn as_vertex_type(ty: VertexType) -> GLenum {
    match ty {
        VertexType::PointList => gl::POINTS,
        VertexType::LineList => gl::LINES,
        VertexType::LineStrip => gl::LINE_STRIP,
        VertexType::TriangleList => gl::TRIANGLES,
        VertexType::TriangleStrip => gl::TRIANGLE_STRIP,
        VertexType::TriangleFan => gl::TRIANGLE_FAN,
    }
}

/// Element type of a vertex attribute.
pub fn as_vertex_format(format: Format) -> GLenum {
    let info = format.info();
    match info.layout {
        ComponentLayout::A2R10G10B10 | ComponentLayout::A2B10G10R10 => {
            if is_signed(info.numeric) {
                gl::INT_2_10_10_10_REV
            } else {
                gl::UNSIGNED_INT_2_10_10_10_REV
            }
        }
        ComponentLayout::B10G11R11 => gl::UNSIGNED_INT_10F_11F_11F_REV,
        l if l.components().is_some() => component_type(info.bits, info.numeric),
        _ => INVALID,
    }
}

/// Component count of a vertex attribute, 0 when the format cannot be used as one.
pub fn vertex_components(format: Format) -> i32 {
    match format.info().layout {
        ComponentLayout::A2R10G10B10 | ComponentLayout::A2B10G10R10 => 4,
        ComponentLayout::B10G11R11 => 3,
        l => l.components().map_or(0, |c| c as i32),
    }
}

fn component_type(bits: u8, numeric: NumericFormat) -> GLenum {
    use octoon_hal::NumericFormat::*;
    match (bits, numeric) {
        (8, SNorm) | (8, SScaled) | (8, SInt) => gl::BYTE,
        (8, UNorm) | (8, UScaled) | (8, UInt) | (8, SRGB) => gl::UNSIGNED_BYTE,
        (16, SFloat) => gl::HALF_FLOAT,
        (16, SNorm) | (16, SScaled) | (16, SInt) => gl::SHORT,
        (16, UNorm) | (16, UScaled) | (16, UInt) => gl::UNSIGNED_SHORT,
        (32, SInt) => gl::INT,
        (32, UInt) => gl::UNSIGNED_INT,
        (32, SFloat) => gl::FLOAT,
        (64, SInt) => gl::INT64_ARB,
        (64, UInt) => gl::UNSIGNED_INT64_ARB,
        (64, SFloat) => gl::DOUBLE,
        _ => INVALID,
    }
}

pub fn as_index_type(ty: IndexType) -> GLenum {
    match ty {
        IndexType::UInt16 => gl::UNSIGNED_SHORT,
        IndexType::UInt32 => gl::UNSIGNED_INT,
    }
}

//--------------------------------------------------------------------------------------------------
// Shaders, buffers and textures
/// Stage enum of a single-bit stage mask.
pub fn as_shader_stage(stage: ShaderStageFlags) -> GLenum {
    if stage == ShaderStageFlags::VERTEX {
        gl::VERTEX_SHADER
    } else if stage == ShaderStageFlags::FRAGMENT {
        gl::FRAGMENT_SHADER
    } else if stage == ShaderStageFlags::GEOMETRY {
        gl::GEOMETRY_SHADER
    } else if stage == ShaderStageFlags::COMPUTE {
        gl::COMPUTE_SHADER
    } else if stage == ShaderStageFlags::TESS_CONTROL {
        gl::TESS_CONTROL_SHADER
    } else if stage == ShaderStageFlags::TESS_EVAL {
        gl::TESS_EVALUATION_SHADER
    } else {
        INVALID
    }
}

pub fn as_buffer_target(ty: DataType) -> GLenum {
    match ty {
        DataType::TransferSrc => gl::COPY_READ_BUFFER,
        DataType::TransferDst => gl::COPY_WRITE_BUFFER,
        DataType::UniformTexelBuffer | DataType::StorageTexelBuffer => gl::TEXTURE_BUFFER,
        DataType::UniformBuffer => gl::UNIFORM_BUFFER,
        DataType::StorageBuffer => gl::SHADER_STORAGE_BUFFER,
        DataType::IndexBuffer => gl::ELEMENT_ARRAY_BUFFER,
        DataType::VertexBuffer => gl::ARRAY_BUFFER,
        DataType::IndirectBuffer => gl::DRAW_INDIRECT_BUFFER,
        DataType::TransformFeedback => gl::TRANSFORM_FEEDBACK_BUFFER,
    }
}

/// `BufferData` usage hint.
pub fn as_buffer_usage(usage: UsageFlags) -> GLenum {
    if usage.contains(UsageFlags::WRITE) {
        gl::DYNAMIC_DRAW
    } else if usage.contains(UsageFlags::READ) {
        gl::STATIC_READ
    } else {
        gl::STATIC_DRAW
    }
}

/// `BufferStorage` flags.
pub fn as_buffer_storage_flags(usage: UsageFlags) -> GLbitfield {
    let mut flags = 0;
    if usage.contains(UsageFlags::READ) {
        flags |= gl::MAP_READ_BIT;
    }
    if usage.contains(UsageFlags::WRITE) {
        flags |= gl::MAP_WRITE_BIT;
    }
    if usage.contains(UsageFlags::PERSISTENT) {
        flags |= gl::MAP_PERSISTENT_BIT;
    }
    if usage.contains(UsageFlags::COHERENT) {
        flags |= gl::MAP_COHERENT_BIT;
    }
    if usage.contains(UsageFlags::DYNAMIC_STORAGE) {
        flags |= gl::DYNAMIC_STORAGE_BIT;
    }
    if usage.contains(UsageFlags::CLIENT_STORAGE) {
        flags |= gl::CLIENT_STORAGE_BIT;
    }
    flags
}

/// `MapBufferRange` access bits. Persistence and coherency only exist on immutable storage.
pub fn as_buffer_access(usage: UsageFlags, immutable_storage: bool) -> GLbitfield {
    let mut access = 0;
    if usage.contains(UsageFlags::READ) {
        access |= gl::MAP_READ_BIT;
    }
    if usage.contains(UsageFlags::WRITE) {
        access |= gl::MAP_WRITE_BIT;
        if usage.contains(UsageFlags::FLUSH_EXPLICIT) {
            access |= gl::MAP_FLUSH_EXPLICIT_BIT;
        }
    }
    if immutable_storage {
        if usage.contains(UsageFlags::PERSISTENT) {
            access |= gl::MAP_PERSISTENT_BIT;
        }
        if usage.contains(UsageFlags::COHERENT) {
            access |= gl::MAP_COHERENT_BIT;
        }
    }
    access
}

pub fn as_texture_target(dim: TextureDim) -> GLenum {
    match dim {
        TextureDim::Texture2D => gl::TEXTURE_2D,
        TextureDim::Texture2DMultisample => gl::TEXTURE_2D_MULTISAMPLE,
        TextureDim::Texture2DArray => gl::TEXTURE_2D_ARRAY,
        TextureDim::Texture2DArrayMultisample => gl::TEXTURE_2D_MULTISAMPLE_ARRAY,
        TextureDim::Texture3D => gl::TEXTURE_3D,
        TextureDim::Cube => gl::TEXTURE_CUBE_MAP,
        TextureDim::CubeArray => gl::TEXTURE_CUBE_MAP_ARRAY,
    }
}

/// Pixel layout of client data.
pub fn as_texture_format(format: Format) -> GLenum {
    let info = format.info();
    let integer = is_integer_texture(info.numeric);
    let pick = |plain, int| if integer { int } else { plain };
    match info.layout {
        ComponentLayout::R => pick(gl::RED, gl::RED_INTEGER),
        ComponentLayout::RG => pick(gl::RG, gl::RG_INTEGER),
        ComponentLayout::RGB => pick(gl::RGB, gl::RGB_INTEGER),
        ComponentLayout::BGR => pick(gl::BGR, gl::BGR_INTEGER),
        ComponentLayout::RGBA => pick(gl::RGBA, gl::RGBA_INTEGER),
        ComponentLayout::BGRA => pick(gl::BGRA, gl::BGRA_INTEGER),
        ComponentLayout::ABGR => pick(gl::ABGR_EXT, INVALID),
        ComponentLayout::R5G6B5 | ComponentLayout::B10G11R11 | ComponentLayout::E5B9G9R9 => gl::RGB,
        ComponentLayout::B5G6R5 => gl::BGR,
        ComponentLayout::R4G4B4A4 | ComponentLayout::R5G5B5A1 | ComponentLayout::A1R5G5B5 => gl::RGBA,
        ComponentLayout::B4G4R4A4 | ComponentLayout::B5G5R5A1 => gl::BGRA,
        ComponentLayout::A2R10G10B10 => pick(gl::RGBA, gl::RGBA_INTEGER),
        ComponentLayout::A2B10G10R10 => pick(gl::BGRA, gl::BGRA_INTEGER),
        ComponentLayout::D16 | ComponentLayout::X8D24 | ComponentLayout::D32 => gl::DEPTH_COMPONENT,
        ComponentLayout::S8 => gl::STENCIL_INDEX,
        ComponentLayout::D16S8 | ComponentLayout::D24S8 | ComponentLayout::D32S8 => gl::DEPTH_STENCIL,
        _ => INVALID,
    }
}

/// Component storage type of client data.
pub fn as_texture_type(format: Format) -> GLenum {
    let info = format.info();
    match info.layout {
        ComponentLayout::R4G4B4A4 | ComponentLayout::B4G4R4A4 => gl::UNSIGNED_SHORT_4_4_4_4,
        ComponentLayout::R5G6B5 | ComponentLayout::B5G6R5 => gl::UNSIGNED_SHORT_5_6_5,
        ComponentLayout::R5G5B5A1 | ComponentLayout::B5G5R5A1 => gl::UNSIGNED_SHORT_5_5_5_1,
        ComponentLayout::A1R5G5B5 => gl::UNSIGNED_SHORT_1_5_5_5_REV,
        ComponentLayout::A2R10G10B10 | ComponentLayout::A2B10G10R10 => {
            if is_signed(info.numeric) {
                gl::INT_2_10_10_10_REV
            } else {
                gl::UNSIGNED_INT_2_10_10_10_REV
            }
        }
        ComponentLayout::B10G11R11 => gl::UNSIGNED_INT_10F_11F_11F_REV,
        ComponentLayout::E5B9G9R9 => gl::UNSIGNED_INT_5_9_9_9_REV,
        ComponentLayout::D16 => gl::UNSIGNED_SHORT,
        ComponentLayout::X8D24 | ComponentLayout::D16S8 => gl::UNSIGNED_INT,
        ComponentLayout::D32 => gl::FLOAT,
        ComponentLayout::S8 => gl::UNSIGNED_BYTE,
        ComponentLayout::D24S8 => gl::UNSIGNED_INT_24_8,
        ComponentLayout::D32S8 => gl::FLOAT_32_UNSIGNED_INT_24_8_REV,
        l if l.components().is_some() => component_type(info.bits, info.numeric),
        _ => INVALID,
    }
}

fn plain_internal_format(components: u32, bits: u8, numeric: NumericFormat) -> GLenum {
    use octoon_hal::NumericFormat::*;
    let row: [GLenum; 4] = match (bits, numeric) {
        (8, UNorm) => [gl::R8, gl::RG8, gl::RGB8, gl::RGBA8],
        (8, SNorm) => [gl::R8_SNORM, gl::RG8_SNORM, gl::RGB8_SNORM, gl::RGBA8_SNORM],
        (8, UScaled) | (8, UInt) => [gl::R8UI, gl::RG8UI, gl::RGB8UI, gl::RGBA8UI],
        (8, SScaled) | (8, SInt) => [gl::R8I, gl::RG8I, gl::RGB8I, gl::RGBA8I],
        (8, SRGB) => [gl::R8, gl::RG8, gl::SRGB8, gl::SRGB8_ALPHA8],
        (16, UNorm) => [gl::R16, gl::RG16, gl::RGB16, gl::RGBA16],
        (16, SNorm) => [gl::R16_SNORM, gl::RG16_SNORM, gl::RGB16_SNORM, gl::RGBA16_SNORM],
        (16, UScaled) | (16, UInt) => [gl::R16UI, gl::RG16UI, gl::RGB16UI, gl::RGBA16UI],
        (16, SScaled) | (16, SInt) => [gl::R16I, gl::RG16I, gl::RGB16I, gl::RGBA16I],
        (16, SFloat) => [gl::R16F, gl::RG16F, gl::RGB16F, gl::RGBA16F],
        (32, UInt) => [gl::R32UI, gl::RG32UI, gl::RGB32UI, gl::RGBA32UI],
        (32, SInt) => [gl::R32I, gl::RG32I, gl::RGB32I, gl::RGBA32I],
        (32, SFloat) => [gl::R32F, gl::RG32F, gl::RGB32F, gl::RGBA32F],
        _ => return INVALID,
    };
    row[(components as usize).saturating_sub(1).min(3)]
}

fn astc_internal_format(w: u8, h: u8, srgb: bool) -> GLenum {
    let (unorm, srgb_format) = match (w, h) {
        (4, 4) => (gl::COMPRESSED_RGBA_ASTC_4x4_KHR, gl::COMPRESSED_SRGB8_ALPHA8_ASTC_4x4_KHR),
        (5, 4) => (gl::COMPRESSED_RGBA_ASTC_5x4_KHR, gl::COMPRESSED_SRGB8_ALPHA8_ASTC_5x4_KHR),
        (5, 5) => (gl::COMPRESSED_RGBA_ASTC_5x5_KHR, gl::COMPRESSED_SRGB8_ALPHA8_ASTC_5x5_KHR),
        (6, 5) => (gl::COMPRESSED_RGBA_ASTC_6x5_KHR, gl::COMPRESSED_SRGB8_ALPHA8_ASTC_6x5_KHR),
        (6, 6) => (gl::COMPRESSED_RGBA_ASTC_6x6_KHR, gl::COMPRESSED_SRGB8_ALPHA8_ASTC_6x6_KHR),
        (8, 5) => (gl::COMPRESSED_RGBA_ASTC_8x5_KHR, gl::COMPRESSED_SRGB8_ALPHA8_ASTC_8x5_KHR),
        (8, 6) => (gl::COMPRESSED_RGBA_ASTC_8x6_KHR, gl::COMPRESSED_SRGB8_ALPHA8_ASTC_8x6_KHR),
        (8, 8) => (gl::COMPRESSED_RGBA_ASTC_8x8_KHR, gl::COMPRESSED_SRGB8_ALPHA8_ASTC_8x8_KHR),
        (10, 5) => (gl::COMPRESSED_RGBA_ASTC_10x5_KHR, gl::COMPRESSED_SRGB8_ALPHA8_ASTC_10x5_KHR),
        (10, 6) => (gl::COMPRESSED_RGBA_ASTC_10x6_KHR, gl::COMPRESSED_SRGB8_ALPHA8_ASTC_10x6_KHR),
        (10, 8) => (gl::COMPRESSED_RGBA_ASTC_10x8_KHR, gl::COMPRESSED_SRGB8_ALPHA8_ASTC_10x8_KHR),
        (10, 10) => (gl::COMPRESSED_RGBA_ASTC_10x10_KHR, gl::COMPRESSED_SRGB8_ALPHA8_ASTC_10x10_KHR),
        (12, 10) => (gl::COMPRESSED_RGBA_ASTC_12x10_KHR, gl::COMPRESSED_SRGB8_ALPHA8_ASTC_12x10_KHR),
        (12, 12) => (gl::COMPRESSED_RGBA_ASTC_12x12_KHR, gl::COMPRESSED_SRGB8_ALPHA8_ASTC_12x12_KHR),
        _ => return INVALID,
    };
    if srgb {
        srgb_format
    } else {
        unorm
    }
}

/// Sized internal format used for storage allocation.
pub fn as_texture_internal_format(format: Format) -> GLenum {
    use octoon_hal::ComponentLayout::*;
    let info = format.info();
    let srgb = info.numeric == NumericFormat::SRGB;
    let signed = info.numeric == NumericFormat::SNorm;
    let pick = |a, b| if srgb || signed { b } else { a };
    match info.layout {
        R4G4B4A4 | B4G4R4A4 => gl::RGBA4,
        R5G6B5 | B5G6R5 => gl::RGB565,
        R5G5B5A1 | B5G5R5A1 | A1R5G5B5 => gl::RGB5_A1,
        A2R10G10B10 | A2B10G10R10 => match info.numeric {
            NumericFormat::UNorm => gl::RGB10_A2,
            NumericFormat::UScaled | NumericFormat::UInt => gl::RGB10_A2UI,
            _ => INVALID,
        },
        B10G11R11 => gl::R11F_G11F_B10F,
        E5B9G9R9 => gl::RGB9_E5,
        D16 => gl::DEPTH_COMPONENT16,
        X8D24 => gl::DEPTH_COMPONENT24,
        D32 => gl::DEPTH_COMPONENT32F,
        S8 => gl::STENCIL_INDEX8,
        D24S8 => gl::DEPTH24_STENCIL8,
        D32S8 => gl::DEPTH32F_STENCIL8,
        Bc1Rgb => pick(gl::COMPRESSED_RGB_S3TC_DXT1_EXT, gl::COMPRESSED_SRGB_S3TC_DXT1_EXT),
        Bc1Rgba => pick(gl::COMPRESSED_RGBA_S3TC_DXT1_EXT, gl::COMPRESSED_SRGB_ALPHA_S3TC_DXT1_EXT),
        Bc2 => pick(gl::COMPRESSED_RGBA_S3TC_DXT3_EXT, gl::COMPRESSED_SRGB_ALPHA_S3TC_DXT3_EXT),
        Bc3 => pick(gl::COMPRESSED_RGBA_S3TC_DXT5_EXT, gl::COMPRESSED_SRGB_ALPHA_S3TC_DXT5_EXT),
        Bc4 => pick(gl::COMPRESSED_RED_RGTC1, gl::COMPRESSED_SIGNED_RED_RGTC1),
        Bc5 => pick(gl::COMPRESSED_RG_RGTC2, gl::COMPRESSED_SIGNED_RG_RGTC2),
        Bc6h => {
            if info.numeric == NumericFormat::SFloat {
                gl::COMPRESSED_RGB_BPTC_SIGNED_FLOAT
            } else {
                gl::COMPRESSED_RGB_BPTC_UNSIGNED_FLOAT
            }
        }
        Bc7 => pick(gl::COMPRESSED_RGBA_BPTC_UNORM, gl::COMPRESSED_SRGB_ALPHA_BPTC_UNORM),
        Etc2Rgb => pick(gl::COMPRESSED_RGB8_ETC2, gl::COMPRESSED_SRGB8_ETC2),
        Etc2RgbA1 => pick(
            gl::COMPRESSED_RGB8_PUNCHTHROUGH_ALPHA1_ETC2,
            gl::COMPRESSED_SRGB8_PUNCHTHROUGH_ALPHA1_ETC2,
        ),
        Etc2Rgba => pick(gl::COMPRESSED_RGBA8_ETC2_EAC, gl::COMPRESSED_SRGB8_ALPHA8_ETC2_EAC),
        EacR11 => pick(gl::COMPRESSED_R11_EAC, gl::COMPRESSED_SIGNED_R11_EAC),
        EacR11G11 => pick(gl::COMPRESSED_RG11_EAC, gl::COMPRESSED_SIGNED_RG11_EAC),
        Astc(w, h) => astc_internal_format(w, h, srgb),
        l => match l.components() {
            Some(c) => plain_internal_format(c, info.bits, info.numeric),
            None => INVALID,
        },
    }
}

//--------------------------------------------------------------------------------------------------
// Fixed-function state
pub fn as_compare_function(func: CompareFunction) -> GLenum {
    match func {
        CompareFunction::None => INVALID,
        CompareFunction::Lequal => gl::LEQUAL,
        CompareFunction::Equal => gl::EQUAL,
        CompareFunction::Greater => gl::GREATER,
        CompareFunction::Less => gl::LESS,
        CompareFunction::Gequal => gl::GEQUAL,
        CompareFunction::NotEqual => gl::NOTEQUAL,
        CompareFunction::Always => gl::ALWAYS,
        CompareFunction::Never => gl::NEVER,
    }
}

pub fn as_blend_factor(f: BlendFactor) -> GLenum {
    match f {
        BlendFactor::Zero => gl::ZERO,
        BlendFactor::One => gl::ONE,
        BlendFactor::DstColor => gl::DST_COLOR,
        BlendFactor::SrcColor => gl::SRC_COLOR,
        BlendFactor::SrcAlpha => gl::SRC_ALPHA,
        BlendFactor::DstAlpha => gl::DST_ALPHA,
        BlendFactor::OneMinusSrcColor => gl::ONE_MINUS_SRC_COLOR,
        BlendFactor::OneMinusDstColor => gl::ONE_MINUS_DST_COLOR,
        BlendFactor::OneMinusSrcAlpha => gl::ONE_MINUS_SRC_ALPHA,
        BlendFactor::OneMinusDstAlpha => gl::ONE_MINUS_DST_ALPHA,
        BlendFactor::ConstantColor => gl::CONSTANT_COLOR,
        BlendFactor::ConstantAlpha => gl::CONSTANT_ALPHA,
        BlendFactor::OneMinusConstantColor => gl::ONE_MINUS_CONSTANT_COLOR,
        BlendFactor::OneMinusConstantAlpha => gl::ONE_MINUS_CONSTANT_ALPHA,
        BlendFactor::SrcAlphaSaturate => gl::SRC_ALPHA_SATURATE,
    }
}

pub fn as_blend_op(op: BlendOp) -> GLenum {
    match op {
        BlendOp::Add => gl::FUNC_ADD,
        BlendOp::Subtract => gl::FUNC_SUBTRACT,
        BlendOp::RevSubtract => gl::FUNC_REVERSE_SUBTRACT,
        BlendOp::Min => gl::MIN,
        BlendOp::Max => gl::MAX,
    }
}

/// `NONE` means culling is disabled.
pub fn as_cull_mode(mode: CullMode) -> GLenum {
    match mode {
        CullMode::None => gl::NONE,
        CullMode::Front => gl::FRONT,
        CullMode::Back => gl::BACK,
        CullMode::FrontBack => gl::FRONT_AND_BACK,
    }
}

pub fn as_front_face(face: FrontFace) -> GLenum {
    match face {
        FrontFace::Cw => gl::CW,
        FrontFace::Ccw => gl::CCW,
    }
}

pub fn as_polygon_mode(mode: PolygonMode) -> GLenum {
    match mode {
        PolygonMode::Point => gl::POINT,
        PolygonMode::Wireframe => gl::LINE,
        PolygonMode::Solid => gl::FILL,
    }
}

pub fn as_stencil_op(op: StencilOp) -> GLenum {
    match op {
        StencilOp::Keep => gl::KEEP,
        StencilOp::Replace => gl::REPLACE,
        StencilOp::Incr => gl::INCR,
        StencilOp::Decr => gl::DECR,
        StencilOp::Zero => gl::ZERO,
        StencilOp::IncrWrap => gl::INCR_WRAP,
        StencilOp::DecrWrap => gl::DECR_WRAP,
        StencilOp::Invert => gl::INVERT,
    }
}

//--------------------------------------------------------------------------------------------------
// Samplers
pub fn as_sampler_wrap(wrap: SamplerWrap) -> GLenum {
    match wrap {
        SamplerWrap::Repeat => gl::REPEAT,
        SamplerWrap::Mirror => gl::MIRRORED_REPEAT,
        SamplerWrap::ClampToEdge => gl::CLAMP_TO_EDGE,
    }
}

pub fn as_sampler_min_filter(filter: SamplerFilter) -> GLenum {
    match filter {
        SamplerFilter::Nearest => gl::NEAREST,
        SamplerFilter::Linear => gl::LINEAR,
        SamplerFilter::NearestMipmapLinear => gl::NEAREST_MIPMAP_LINEAR,
        SamplerFilter::NearestMipmapNearest => gl::NEAREST_MIPMAP_NEAREST,
        SamplerFilter::LinearMipmapNearest => gl::LINEAR_MIPMAP_NEAREST,
        SamplerFilter::LinearMipmapLinear => gl::LINEAR_MIPMAP_LINEAR,
    }
}

/// Magnification ignores the mipmap part of the filter.
pub fn as_sampler_mag_filter(filter: SamplerFilter) -> GLenum {
    match filter {
        SamplerFilter::Nearest | SamplerFilter::NearestMipmapLinear | SamplerFilter::NearestMipmapNearest => {
            gl::NEAREST
        }
        SamplerFilter::Linear | SamplerFilter::LinearMipmapNearest | SamplerFilter::LinearMipmapLinear => {
            gl::LINEAR
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Sizes
/// Bytes per pixel for a pixel format / type pair, 0 if either is not recognized.
pub fn get_format_num(format: GLenum, ty: GLenum) -> usize {
    match ty {
        gl::UNSIGNED_SHORT_4_4_4_4
        | gl::UNSIGNED_SHORT_5_6_5
        | gl::UNSIGNED_SHORT_5_5_5_1
        | gl::UNSIGNED_SHORT_1_5_5_5_REV => return 2,
        gl::UNSIGNED_INT_2_10_10_10_REV
        | gl::INT_2_10_10_10_REV
        | gl::UNSIGNED_INT_10F_11F_11F_REV
        | gl::UNSIGNED_INT_5_9_9_9_REV
        | gl::UNSIGNED_INT_24_8 => return 4,
        gl::FLOAT_32_UNSIGNED_INT_24_8_REV => return 8,
        _ => {}
    }

    let type_size = match ty {
        gl::BYTE | gl::UNSIGNED_BYTE => 1,
        gl::SHORT | gl::UNSIGNED_SHORT | gl::HALF_FLOAT => 2,
        gl::INT | gl::UNSIGNED_INT | gl::FLOAT => 4,
        gl::DOUBLE | gl::INT64_ARB | gl::UNSIGNED_INT64_ARB => 8,
        _ => return 0,
    };

    let channels = match format {
        gl::RED | gl::RED_INTEGER | gl::DEPTH_COMPONENT | gl::STENCIL_INDEX => 1,
        gl::RG | gl::RG_INTEGER => 2,
        gl::RGB | gl::BGR | gl::RGB_INTEGER | gl::BGR_INTEGER | gl::SRGB => 3,
        gl::RGBA | gl::BGRA | gl::RGBA_INTEGER | gl::BGRA_INTEGER | gl::ABGR_EXT | gl::SRGB_ALPHA => 4,
        _ => return 0,
    };

    channels * type_size
}

/// (block width, block height, bytes per block) of a compressed internal format.
fn compressed_block(internal_format: GLenum) -> Option<(u32, u32, u32)> {
    let block = match internal_format {
        gl::COMPRESSED_RGB_FXT1_3DFX | gl::COMPRESSED_RGBA_FXT1_3DFX => (8, 4, 16),
        gl::COMPRESSED_RGB_S3TC_DXT1_EXT
        | gl::COMPRESSED_RGBA_S3TC_DXT1_EXT
        | gl::COMPRESSED_SRGB_S3TC_DXT1_EXT
        | gl::COMPRESSED_SRGB_ALPHA_S3TC_DXT1_EXT
        | gl::COMPRESSED_RED_RGTC1
        | gl::COMPRESSED_SIGNED_RED_RGTC1
        | gl::COMPRESSED_RGB8_ETC2
        | gl::COMPRESSED_SRGB8_ETC2
        | gl::COMPRESSED_RGB8_PUNCHTHROUGH_ALPHA1_ETC2
        | gl::COMPRESSED_SRGB8_PUNCHTHROUGH_ALPHA1_ETC2
        | gl::COMPRESSED_R11_EAC
        | gl::COMPRESSED_SIGNED_R11_EAC => (4, 4, 8),
        gl::COMPRESSED_RGBA_S3TC_DXT3_EXT
        | gl::COMPRESSED_RGBA_S3TC_DXT5_EXT
        | gl::COMPRESSED_SRGB_ALPHA_S3TC_DXT3_EXT
        | gl::COMPRESSED_SRGB_ALPHA_S3TC_DXT5_EXT
        | gl::COMPRESSED_RG_RGTC2
        | gl::COMPRESSED_SIGNED_RG_RGTC2
        | gl::COMPRESSED_RGB_BPTC_UNSIGNED_FLOAT
        | gl::COMPRESSED_RGB_BPTC_SIGNED_FLOAT
        | gl::COMPRESSED_RGBA_BPTC_UNORM
        | gl::COMPRESSED_SRGB_ALPHA_BPTC_UNORM
        | gl::COMPRESSED_RGBA8_ETC2_EAC
        | gl::COMPRESSED_SRGB8_ALPHA8_ETC2_EAC
        | gl::COMPRESSED_RG11_EAC
        | gl::COMPRESSED_SIGNED_RG11_EAC => (4, 4, 16),
        other => {
            return Format::ALL.iter().find_map(|f| match f.info().layout {
                ComponentLayout::Astc(w, h) if as_texture_internal_format(*f) == other => {
                    Some((u32::from(w), u32::from(h), 16))
                }
                _ => None,
            })
        }
    };
    Some(block)
}

/// Byte size of one compressed image, 0 for internal formats that are not block-compressed.
///
/// Sizes are rounded up to whole blocks. The smallest image is one block.
pub fn get_compressed_texture_size(width: u32, height: u32, depth: u32, internal_format: GLenum) -> usize {
    match compressed_block(internal_format) {
        Some((bw, bh, bytes)) => {
            let (bw, bh) = (bw as usize, bh as usize);
            let blocks_x = ((width as usize + bw - 1) / bw).max(1);
            let blocks_y = ((height as usize + bh - 1) / bh).max(1);
            blocks_x * blocks_y * bytes as usize * depth.max(1) as usize
        }
        None => 0,
    }
}

//--------------------------------------------------------------------------------------------------
fn error_name(err: GLenum) -> &'static str {
    match err {
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        _ => "unknown GL error",
    }
}

/// Drains the driver error queue, logging each error. Fails if any error was pending.
pub fn check_error(gl: &dyn GlApi) -> Result<()> {
    let mut failed = false;
    loop {
        let err = gl.get_error();
        if err == gl::NO_ERROR {
            break;
        }
        error!("{} (0x{:X})", error_name(err), err);
        failed = true;
    }
    if failed {
        Err(Error::InvalidState("driver reported an error"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_num_tables() {
        assert_eq!(get_format_num(gl::RGBA, gl::UNSIGNED_BYTE), 4);
        assert_eq!(get_format_num(gl::RGB, gl::FLOAT), 12);
        assert_eq!(get_format_num(gl::RG, gl::HALF_FLOAT), 4);
        assert_eq!(get_format_num(gl::RED_INTEGER, gl::UNSIGNED_INT), 4);
        assert_eq!(get_format_num(gl::RGBA, gl::DOUBLE), 32);
        assert_eq!(get_format_num(gl::RGB, gl::UNSIGNED_SHORT_5_6_5), 2);
        assert_eq!(get_format_num(gl::DEPTH_STENCIL, gl::UNSIGNED_INT_24_8), 4);
        assert_eq!(get_format_num(gl::DEPTH_STENCIL, gl::FLOAT_32_UNSIGNED_INT_24_8_REV), 8);
        assert_eq!(get_format_num(gl::RGBA, INVALID), 0);
        assert_eq!(get_format_num(INVALID, gl::UNSIGNED_BYTE), 0);
    }

    #[test]
    fn compressed_sizes() {
        // DXT1: 8 bytes per 4x4 block, at least one block
        assert_eq!(get_compressed_texture_size(1, 1, 1, gl::COMPRESSED_RGB_S3TC_DXT1_EXT), 8);
        assert_eq!(get_compressed_texture_size(8, 8, 1, gl::COMPRESSED_RGBA_S3TC_DXT1_EXT), 32);
        assert_eq!(get_compressed_texture_size(5, 5, 1, gl::COMPRESSED_RGB_S3TC_DXT1_EXT), 32);
        // DXT3/5: 16 bytes per block
        assert_eq!(get_compressed_texture_size(2, 2, 1, gl::COMPRESSED_RGBA_S3TC_DXT5_EXT), 16);
        assert_eq!(get_compressed_texture_size(16, 16, 1, gl::COMPRESSED_RGBA_S3TC_DXT3_EXT), 256);
        // FXT1: 8x4 blocks of 16 bytes
        assert_eq!(get_compressed_texture_size(1, 1, 1, gl::COMPRESSED_RGB_FXT1_3DFX), 16);
        assert_eq!(get_compressed_texture_size(16, 8, 1, gl::COMPRESSED_RGBA_FXT1_3DFX), 64);
        // ASTC 8x8
        assert_eq!(get_compressed_texture_size(16, 16, 1, gl::COMPRESSED_RGBA_ASTC_8x8_KHR), 64);
        // layers multiply
        assert_eq!(get_compressed_texture_size(4, 4, 6, gl::COMPRESSED_RGBA_BPTC_UNORM), 96);
        assert_eq!(get_compressed_texture_size(4, 4, 1, gl::RGBA8), 0);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn large_compressed_arrays() {
        let size = get_compressed_texture_size(65536, 65536, 2048, gl::COMPRESSED_RGB_S3TC_DXT1_EXT);
        assert_eq!(size, 1usize << 42);
        assert_eq!(
            get_compressed_texture_size(u32::max_value(), 4, 1, gl::COMPRESSED_RGB_S3TC_DXT1_EXT),
            (1usize << 30) * 8
        );
    }

    #[test]
    fn rgba8_decomposes_into_three_tokens() {
        assert_eq!(as_texture_format(Format::R8G8B8A8UNorm), gl::RGBA);
        assert_eq!(as_texture_type(Format::R8G8B8A8UNorm), gl::UNSIGNED_BYTE);
        assert_eq!(as_texture_internal_format(Format::R8G8B8A8UNorm), gl::RGBA8);
        assert_eq!(as_texture_internal_format(Format::R8G8B8A8SRGB), gl::SRGB8_ALPHA8);
        assert_eq!(as_texture_format(Format::R32G32UInt), gl::RG_INTEGER);
        assert_eq!(as_texture_internal_format(Format::B8G8R8UInt), gl::RGB8UI);
        assert_eq!(as_texture_internal_format(Format::B8G8R8SInt), gl::RGB8I);
    }

    #[test]
    fn depth_stencil_tokens() {
        assert_eq!(as_texture_format(Format::D24UNormS8UInt), gl::DEPTH_STENCIL);
        assert_eq!(as_texture_type(Format::D24UNormS8UInt), gl::UNSIGNED_INT_24_8);
        assert_eq!(as_texture_internal_format(Format::D24UNormS8UInt), gl::DEPTH24_STENCIL8);
        assert_eq!(as_texture_internal_format(Format::D16UNormS8UInt), INVALID);
        assert_eq!(as_texture_format(Format::S8UInt), gl::STENCIL_INDEX);
    }

    #[test]
    fn astc_block_sizes_are_distinct() {
        assert_eq!(as_texture_internal_format(Format::ASTC5x4UNormBlock), gl::COMPRESSED_RGBA_ASTC_5x4_KHR);
        assert_eq!(
            as_texture_internal_format(Format::ASTC10x8SRGBBlock),
            gl::COMPRESSED_SRGB8_ALPHA8_ASTC_10x8_KHR
        );
    }

    #[test]
    fn unmapped_values_are_invalid() {
        assert_eq!(as_vertex_format(Format::BC1RGBUNormBlock), INVALID);
        assert_eq!(as_vertex_format(Format::D32SFloat), INVALID);
        assert_eq!(as_texture_internal_format(Format::R64SFloat), INVALID);
        assert_eq!(as_texture_internal_format(Format::A2R10G10B10SNormPack32), INVALID);
        assert_eq!(as_compare_function(CompareFunction::None), INVALID);
        assert_eq!(as_shader_stage(ShaderStageFlags::ALL_GRAPHICS), INVALID);
    }

    #[test]
    fn vertex_formats() {
        assert_eq!(as_vertex_format(Format::R32G32B32SFloat), gl::FLOAT);
        assert_eq!(vertex_components(Format::R32G32B32SFloat), 3);
        assert_eq!(as_vertex_format(Format::R16G16SFloat), gl::HALF_FLOAT);
        assert_eq!(as_vertex_format(Format::R8G8B8A8SNorm), gl::BYTE);
        assert_eq!(as_vertex_format(Format::R64G64SFloat), gl::DOUBLE);
        assert_eq!(as_vertex_format(Format::A2B10G10R10UNormPack32), gl::UNSIGNED_INT_2_10_10_10_REV);
        assert_eq!(vertex_components(Format::A2B10G10R10UNormPack32), 4);
        assert_eq!(as_index_type(IndexType::UInt16), gl::UNSIGNED_SHORT);
    }

    #[test]
    fn state_tokens() {
        assert_eq!(as_blend_factor(BlendFactor::OneMinusConstantColor), gl::ONE_MINUS_CONSTANT_COLOR);
        assert_eq!(as_blend_op(BlendOp::Max), gl::MAX);
        assert_eq!(as_cull_mode(CullMode::None), gl::NONE);
        assert_eq!(as_stencil_op(StencilOp::Invert), gl::INVERT);
        assert_eq!(as_sampler_mag_filter(SamplerFilter::LinearMipmapNearest), gl::LINEAR);
    }

    #[test]
    fn buffer_flags() {
        let usage = UsageFlags::WRITE | UsageFlags::PERSISTENT | UsageFlags::COHERENT;
        assert_eq!(
            as_buffer_storage_flags(usage),
            gl::MAP_WRITE_BIT | gl::MAP_PERSISTENT_BIT | gl::MAP_COHERENT_BIT
        );
        assert_eq!(as_buffer_access(usage, false), gl::MAP_WRITE_BIT);
        assert_eq!(as_buffer_usage(UsageFlags::READ), gl::STATIC_READ);
        assert_eq!(as_buffer_target(DataType::IndexBuffer), gl::ELEMENT_ARRAY_BUFFER);
    }
}
