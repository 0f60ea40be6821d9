use crate::buffer::UsageFlags;
use crate::format::Format;
use derivative::Derivative;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TextureDim {
    Texture2D,
    Texture2DMultisample,
    Texture2DArray,
    Texture2DArrayMultisample,
    Texture3D,
    Cube,
    CubeArray,
}

impl TextureDim {
    pub fn is_multisample(self) -> bool {
        match self {
            TextureDim::Texture2DMultisample | TextureDim::Texture2DArrayMultisample => true,
            _ => false,
        }
    }

    pub fn is_cube(self) -> bool {
        match self {
            TextureDim::Cube | TextureDim::CubeArray => true,
            _ => false,
        }
    }
}

/// Texture creation parameters.
///
/// Mip levels `[mip_base, mip_base + mip_nums)` and layers `[layer_base, layer_base + layer_nums)`
/// are allocated. `stream` holds the initial pixels of every level, layer and face, tightly
/// packed, base level first.
#[derive(Clone, Debug, Derivative)]
#[derivative(Default)]
pub struct TextureDesc {
    #[derivative(Default(value = "TextureDim::Texture2D"))]
    pub dim: TextureDim,
    #[derivative(Default(value = "Format::R8G8B8A8UNorm"))]
    pub format: Format,
    pub width: u32,
    pub height: u32,
    #[derivative(Default(value = "1"))]
    pub depth: u32,
    pub mip_base: u32,
    #[derivative(Default(value = "1"))]
    pub mip_nums: u32,
    pub layer_base: u32,
    #[derivative(Default(value = "1"))]
    pub layer_nums: u32,
    /// Sample count of multisample textures.
    #[derivative(Default(value = "1"))]
    pub samples: u32,
    #[derivative(Default(value = "UsageFlags::READ"))]
    pub usage: UsageFlags,
    pub stream: Option<Vec<u8>>,
}

impl TextureDesc {
    pub fn new_2d(width: u32, height: u32, format: Format) -> TextureDesc {
        TextureDesc {
            width,
            height,
            format,
            ..Default::default()
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SamplerWrap {
    Repeat,
    Mirror,
    ClampToEdge,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SamplerFilter {
    Nearest,
    Linear,
    NearestMipmapLinear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    LinearMipmapLinear,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SamplerAnis {
    Anis0,
    Anis1,
    Anis2,
    Anis4,
    Anis8,
    Anis16,
}

impl SamplerAnis {
    pub fn level(self) -> u32 {
        match self {
            SamplerAnis::Anis0 => 0,
            SamplerAnis::Anis1 => 1,
            SamplerAnis::Anis2 => 2,
            SamplerAnis::Anis4 => 4,
            SamplerAnis::Anis8 => 8,
            SamplerAnis::Anis16 => 16,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Derivative)]
#[derivative(Default)]
pub struct SamplerDesc {
    #[derivative(Default(value = "SamplerWrap::Repeat"))]
    pub wrap: SamplerWrap,
    #[derivative(Default(value = "SamplerFilter::Linear"))]
    pub min_filter: SamplerFilter,
    #[derivative(Default(value = "SamplerFilter::Linear"))]
    pub mag_filter: SamplerFilter,
    #[derivative(Default(value = "SamplerAnis::Anis0"))]
    pub anis: SamplerAnis,
}
