use crate::format::Format;
use bitflags::bitflags;

bitflags! {
    #[derive(Default)]
    pub struct ShaderStageFlags: u32 {
        const VERTEX = (1 << 0);
        const GEOMETRY = (1 << 1);
        const FRAGMENT = (1 << 2);
        const TESS_CONTROL = (1 << 3);
        const TESS_EVAL = (1 << 4);
        const COMPUTE = (1 << 5);
        const ALL_GRAPHICS = Self::VERTEX.bits | Self::GEOMETRY.bits | Self::FRAGMENT.bits | Self::TESS_CONTROL.bits | Self::TESS_EVAL.bits;
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ShaderLang {
    Glsl,
    /// Requires an external cross-compilation step, not handled by this layer.
    Hlsl,
}

/// One shader stage given as source text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShaderDesc {
    /// Exactly one stage bit.
    pub stage: ShaderStageFlags,
    pub lang: ShaderLang,
    pub source: String,
    pub entry_point: String,
}

impl ShaderDesc {
    pub fn glsl(stage: ShaderStageFlags, source: &str) -> ShaderDesc {
        ShaderDesc {
            stage,
            lang: ShaderLang::Glsl,
            source: source.to_owned(),
            entry_point: "main".to_owned(),
        }
    }
}

/// An active vertex input of a linked program.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GraphicsAttribute {
    pub semantic: String,
    pub semantic_index: u32,
    /// Native attribute location.
    pub binding_point: u32,
    pub format: Format,
}
