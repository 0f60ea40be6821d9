//! Fixed-function state and shader descriptions.
use bitflags::bitflags;
use derivative::Derivative;
use ordered_float::NotNan;

pub mod shader;

pub use self::shader::*;

bitflags! {
    #[derive(Default)]
    pub struct ColorMaskFlags: u32 {
        const RED = (1 << 0);
        const GREEN = (1 << 1);
        const BLUE = (1 << 2);
        const ALPHA = (1 << 3);
        const ALL = Self::RED.bits | Self::GREEN.bits | Self::BLUE.bits | Self::ALPHA.bits;
    }
}

bitflags! {
    /// Faces addressed by the per-face stencil setters of a context.
    pub struct StencilFaceFlags: u32 {
        const FRONT = (1 << 0);
        const BACK = (1 << 1);
        const FRONT_AND_BACK = Self::FRONT.bits | Self::BACK.bits;
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CullMode {
    None,
    Front,
    Back,
    FrontBack,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FrontFace {
    Cw,
    Ccw,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PolygonMode {
    Point,
    Wireframe,
    Solid,
}

/// Primitive topology.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VertexType {
    PointList,
    LineList,
    LineStrip,
    TriangleList,
    TriangleStrip,
    TriangleFan,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CompareFunction {
    /// No comparison. Has no native equivalent as a depth or stencil function.
    None,
    Lequal,
    Equal,
    Greater,
    Less,
    Gequal,
    NotEqual,
    Always,
    Never,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    DstColor,
    SrcColor,
    SrcAlpha,
    DstAlpha,
    OneMinusSrcColor,
    OneMinusDstColor,
    OneMinusSrcAlpha,
    OneMinusDstAlpha,
    ConstantColor,
    ConstantAlpha,
    OneMinusConstantColor,
    OneMinusConstantAlpha,
    SrcAlphaSaturate,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BlendOp {
    Add,
    Subtract,
    RevSubtract,
    Min,
    Max,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StencilOp {
    Keep,
    Replace,
    Incr,
    Decr,
    Zero,
    IncrWrap,
    DecrWrap,
    Invert,
}

/// Blend parameters of one color attachment.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Derivative)]
#[derivative(Default)]
pub struct ColorBlend {
    pub enable: bool,
    #[derivative(Default(value = "BlendOp::Add"))]
    pub color_op: BlendOp,
    #[derivative(Default(value = "BlendFactor::SrcAlpha"))]
    pub color_src: BlendFactor,
    #[derivative(Default(value = "BlendFactor::OneMinusSrcAlpha"))]
    pub color_dst: BlendFactor,
    #[derivative(Default(value = "BlendOp::Add"))]
    pub alpha_op: BlendOp,
    #[derivative(Default(value = "BlendFactor::SrcAlpha"))]
    pub alpha_src: BlendFactor,
    #[derivative(Default(value = "BlendFactor::OneMinusSrcAlpha"))]
    pub alpha_dst: BlendFactor,
    #[derivative(Default(value = "ColorMaskFlags::ALL"))]
    pub color_write_mask: ColorMaskFlags,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Derivative)]
#[derivative(Default)]
pub struct StencilFaceState {
    #[derivative(Default(value = "CompareFunction::Always"))]
    pub func: CompareFunction,
    pub reference: u32,
    #[derivative(Default(value = "0xFFFF_FFFF"))]
    pub read_mask: u32,
    #[derivative(Default(value = "0xFFFF_FFFF"))]
    pub write_mask: u32,
    #[derivative(Default(value = "StencilOp::Keep"))]
    pub fail: StencilOp,
    #[derivative(Default(value = "StencilOp::Keep"))]
    pub depth_fail: StencilOp,
    #[derivative(Default(value = "StencilOp::Keep"))]
    pub pass: StencilOp,
}

/// Complete fixed-function state.
///
/// The default is depth test on with `Lequal`, back-face culling, solid fill and no blending.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Derivative)]
#[derivative(Default)]
pub struct RenderStateDesc {
    /// One entry per color attachment.
    pub blends: Vec<ColorBlend>,
    #[derivative(Default(value = "CullMode::Back"))]
    pub cull_mode: CullMode,
    #[derivative(Default(value = "FrontFace::Ccw"))]
    pub front_face: FrontFace,
    #[derivative(Default(value = "PolygonMode::Solid"))]
    pub polygon_mode: PolygonMode,
    #[derivative(Default(value = "VertexType::TriangleList"))]
    pub primitive_type: VertexType,
    pub scissor_test_enable: bool,
    pub srgb_enable: bool,
    #[derivative(Default(value = "1.0.into()"))]
    pub line_width: NotNan<f32>,

    #[derivative(Default(value = "true"))]
    pub depth_enable: bool,
    #[derivative(Default(value = "true"))]
    pub depth_write_enable: bool,
    #[derivative(Default(value = "CompareFunction::Lequal"))]
    pub depth_func: CompareFunction,
    pub depth_bias_enable: bool,
    #[derivative(Default(value = "0.0.into()"))]
    pub depth_bias: NotNan<f32>,
    #[derivative(Default(value = "0.0.into()"))]
    pub depth_slope_scale_bias: NotNan<f32>,

    pub stencil_enable: bool,
    pub stencil_front: StencilFaceState,
    pub stencil_back: StencilFaceState,
}

impl RenderStateDesc {
    /// Same as default, with `count` attachments using the given blend state.
    pub fn with_blends(blend: ColorBlend, count: usize) -> RenderStateDesc {
        RenderStateDesc {
            blends: vec![blend; count],
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state() {
        let state = RenderStateDesc::default();
        assert!(state.depth_enable);
        assert_eq!(state.depth_func, CompareFunction::Lequal);
        assert_eq!(state.cull_mode, CullMode::Back);
        assert_eq!(state.polygon_mode, PolygonMode::Solid);
        assert_eq!(state.line_width.into_inner(), 1.0);
        assert_eq!(state.stencil_front.read_mask, 0xFFFF_FFFF);
        assert!(state.blends.is_empty());
    }
}
