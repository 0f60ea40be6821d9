//! Pixel and vertex formats.
//!
//! The naming follows the Vulkan convention: components in memory order, then the numeric
//! interpretation, then `PackN` for formats stored in a single N-bit word and `Block` for
//! block-compressed formats.

/// How the components of a format are interpreted.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NumericFormat {
    UNorm,
    SNorm,
    UScaled,
    SScaled,
    UInt,
    SInt,
    UFloat,
    SFloat,
    SRGB,
}

/// Component order and packing of a format.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ComponentLayout {
    R,
    RG,
    RGB,
    BGR,
    RGBA,
    BGRA,
    /// A8B8G8R8 stored in a 32-bit word.
    ABGR,
    R4G4,
    R4G4B4A4,
    B4G4R4A4,
    R5G6B5,
    B5G6R5,
    R5G5B5A1,
    B5G5R5A1,
    A1R5G5B5,
    A2R10G10B10,
    A2B10G10R10,
    B10G11R11,
    E5B9G9R9,
    D16,
    X8D24,
    D32,
    S8,
    D16S8,
    D24S8,
    D32S8,
    Bc1Rgb,
    Bc1Rgba,
    Bc2,
    Bc3,
    Bc4,
    Bc5,
    Bc6h,
    Bc7,
    Etc2Rgb,
    Etc2RgbA1,
    Etc2Rgba,
    EacR11,
    EacR11G11,
    Astc(u8, u8),
}

/// Static description of a format.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FormatInfo {
    pub layout: ComponentLayout,
    /// Bits per component for non-packed layouts, 0 otherwise.
    pub bits: u8,
    pub numeric: NumericFormat,
}

macro_rules! formats {
    ($($name:ident => $layout:expr, $bits:expr, $numeric:ident;)*) => {
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        pub enum Format {
            $($name,)*
        }

        impl Format {
            /// Every format, in declaration order.
            pub const ALL: &'static [Format] = &[$(Format::$name,)*];

            pub fn info(self) -> FormatInfo {
                use self::ComponentLayout::*;
                match self {
                    $(Format::$name => FormatInfo {
                        layout: $layout,
                        bits: $bits,
                        numeric: NumericFormat::$numeric,
                    },)*
                }
            }
        }
    };
}

formats! {
    R4G4UNormPack8 => R4G4, 0, UNorm;
    R4G4B4A4UNormPack16 => R4G4B4A4, 0, UNorm;
    B4G4R4A4UNormPack16 => B4G4R4A4, 0, UNorm;
    R5G6B5UNormPack16 => R5G6B5, 0, UNorm;
    B5G6R5UNormPack16 => B5G6R5, 0, UNorm;
    R5G5B5A1UNormPack16 => R5G5B5A1, 0, UNorm;
    B5G5R5A1UNormPack16 => B5G5R5A1, 0, UNorm;
    A1R5G5B5UNormPack16 => A1R5G5B5, 0, UNorm;

    R8UNorm => R, 8, UNorm;
    R8SNorm => R, 8, SNorm;
    R8UScaled => R, 8, UScaled;
    R8SScaled => R, 8, SScaled;
    R8UInt => R, 8, UInt;
    R8SInt => R, 8, SInt;
    R8SRGB => R, 8, SRGB;
    R8G8UNorm => RG, 8, UNorm;
    R8G8SNorm => RG, 8, SNorm;
    R8G8UScaled => RG, 8, UScaled;
    R8G8SScaled => RG, 8, SScaled;
    R8G8UInt => RG, 8, UInt;
    R8G8SInt => RG, 8, SInt;
    R8G8SRGB => RG, 8, SRGB;
    R8G8B8UNorm => RGB, 8, UNorm;
    R8G8B8SNorm => RGB, 8, SNorm;
    R8G8B8UScaled => RGB, 8, UScaled;
    R8G8B8SScaled => RGB, 8, SScaled;
    R8G8B8UInt => RGB, 8, UInt;
    R8G8B8SInt => RGB, 8, SInt;
    R8G8B8SRGB => RGB, 8, SRGB;
    B8G8R8UNorm => BGR, 8, UNorm;
    B8G8R8SNorm => BGR, 8, SNorm;
    B8G8R8UScaled => BGR, 8, UScaled;
    B8G8R8SScaled => BGR, 8, SScaled;
    B8G8R8UInt => BGR, 8, UInt;
    B8G8R8SInt => BGR, 8, SInt;
    B8G8R8SRGB => BGR, 8, SRGB;
    R8G8B8A8UNorm => RGBA, 8, UNorm;
    R8G8B8A8SNorm => RGBA, 8, SNorm;
    R8G8B8A8UScaled => RGBA, 8, UScaled;
    R8G8B8A8SScaled => RGBA, 8, SScaled;
    R8G8B8A8UInt => RGBA, 8, UInt;
    R8G8B8A8SInt => RGBA, 8, SInt;
    R8G8B8A8SRGB => RGBA, 8, SRGB;
    B8G8R8A8UNorm => BGRA, 8, UNorm;
    B8G8R8A8SNorm => BGRA, 8, SNorm;
    B8G8R8A8UScaled => BGRA, 8, UScaled;
    B8G8R8A8SScaled => BGRA, 8, SScaled;
    B8G8R8A8UInt => BGRA, 8, UInt;
    B8G8R8A8SInt => BGRA, 8, SInt;
    B8G8R8A8SRGB => BGRA, 8, SRGB;
    A8B8G8R8UNormPack32 => ABGR, 8, UNorm;
    A8B8G8R8SNormPack32 => ABGR, 8, SNorm;
    A8B8G8R8UScaledPack32 => ABGR, 8, UScaled;
    A8B8G8R8SScaledPack32 => ABGR, 8, SScaled;
    A8B8G8R8UIntPack32 => ABGR, 8, UInt;
    A8B8G8R8SIntPack32 => ABGR, 8, SInt;
    A8B8G8R8SRGBPack32 => ABGR, 8, SRGB;

    A2R10G10B10UNormPack32 => A2R10G10B10, 0, UNorm;
    A2R10G10B10SNormPack32 => A2R10G10B10, 0, SNorm;
    A2R10G10B10UScaledPack32 => A2R10G10B10, 0, UScaled;
    A2R10G10B10SScaledPack32 => A2R10G10B10, 0, SScaled;
    A2R10G10B10UIntPack32 => A2R10G10B10, 0, UInt;
    A2R10G10B10SIntPack32 => A2R10G10B10, 0, SInt;
    A2B10G10R10UNormPack32 => A2B10G10R10, 0, UNorm;
    A2B10G10R10SNormPack32 => A2B10G10R10, 0, SNorm;
    A2B10G10R10UScaledPack32 => A2B10G10R10, 0, UScaled;
    A2B10G10R10SScaledPack32 => A2B10G10R10, 0, SScaled;
    A2B10G10R10UIntPack32 => A2B10G10R10, 0, UInt;
    A2B10G10R10SIntPack32 => A2B10G10R10, 0, SInt;

    R16UNorm => R, 16, UNorm;
    R16SNorm => R, 16, SNorm;
    R16UScaled => R, 16, UScaled;
    R16SScaled => R, 16, SScaled;
    R16UInt => R, 16, UInt;
    R16SInt => R, 16, SInt;
    R16SFloat => R, 16, SFloat;
    R16G16UNorm => RG, 16, UNorm;
    R16G16SNorm => RG, 16, SNorm;
    R16G16UScaled => RG, 16, UScaled;
    R16G16SScaled => RG, 16, SScaled;
    R16G16UInt => RG, 16, UInt;
    R16G16SInt => RG, 16, SInt;
    R16G16SFloat => RG, 16, SFloat;
    R16G16B16UNorm => RGB, 16, UNorm;
    R16G16B16SNorm => RGB, 16, SNorm;
    R16G16B16UScaled => RGB, 16, UScaled;
    R16G16B16SScaled => RGB, 16, SScaled;
    R16G16B16UInt => RGB, 16, UInt;
    R16G16B16SInt => RGB, 16, SInt;
    R16G16B16SFloat => RGB, 16, SFloat;
    R16G16B16A16UNorm => RGBA, 16, UNorm;
    R16G16B16A16SNorm => RGBA, 16, SNorm;
    R16G16B16A16UScaled => RGBA, 16, UScaled;
    R16G16B16A16SScaled => RGBA, 16, SScaled;
    R16G16B16A16UInt => RGBA, 16, UInt;
    R16G16B16A16SInt => RGBA, 16, SInt;
    R16G16B16A16SFloat => RGBA, 16, SFloat;

    R32UInt => R, 32, UInt;
    R32SInt => R, 32, SInt;
    R32SFloat => R, 32, SFloat;
    R32G32UInt => RG, 32, UInt;
    R32G32SInt => RG, 32, SInt;
    R32G32SFloat => RG, 32, SFloat;
    R32G32B32UInt => RGB, 32, UInt;
    R32G32B32SInt => RGB, 32, SInt;
    R32G32B32SFloat => RGB, 32, SFloat;
    R32G32B32A32UInt => RGBA, 32, UInt;
    R32G32B32A32SInt => RGBA, 32, SInt;
    R32G32B32A32SFloat => RGBA, 32, SFloat;

    R64UInt => R, 64, UInt;
    R64SInt => R, 64, SInt;
    R64SFloat => R, 64, SFloat;
    R64G64UInt => RG, 64, UInt;
    R64G64SInt => RG, 64, SInt;
    R64G64SFloat => RG, 64, SFloat;
    R64G64B64UInt => RGB, 64, UInt;
    R64G64B64SInt => RGB, 64, SInt;
    R64G64B64SFloat => RGB, 64, SFloat;
    R64G64B64A64UInt => RGBA, 64, UInt;
    R64G64B64A64SInt => RGBA, 64, SInt;
    R64G64B64A64SFloat => RGBA, 64, SFloat;

    B10G11R11UFloatPack32 => B10G11R11, 0, UFloat;
    E5B9G9R9UFloatPack32 => E5B9G9R9, 0, UFloat;

    D16UNorm => D16, 0, UNorm;
    X8D24UNormPack32 => X8D24, 0, UNorm;
    D32SFloat => D32, 0, SFloat;
    S8UInt => S8, 0, UInt;
    D16UNormS8UInt => D16S8, 0, UNorm;
    D24UNormS8UInt => D24S8, 0, UNorm;
    D32SFloatS8UInt => D32S8, 0, SFloat;

    BC1RGBUNormBlock => Bc1Rgb, 0, UNorm;
    BC1RGBSRGBBlock => Bc1Rgb, 0, SRGB;
    BC1RGBAUNormBlock => Bc1Rgba, 0, UNorm;
    BC1RGBASRGBBlock => Bc1Rgba, 0, SRGB;
    BC2UNormBlock => Bc2, 0, UNorm;
    BC2SRGBBlock => Bc2, 0, SRGB;
    BC3UNormBlock => Bc3, 0, UNorm;
    BC3SRGBBlock => Bc3, 0, SRGB;
    BC4UNormBlock => Bc4, 0, UNorm;
    BC4SNormBlock => Bc4, 0, SNorm;
    BC5UNormBlock => Bc5, 0, UNorm;
    BC5SNormBlock => Bc5, 0, SNorm;
    BC6HUFloatBlock => Bc6h, 0, UFloat;
    BC6HSFloatBlock => Bc6h, 0, SFloat;
    BC7UNormBlock => Bc7, 0, UNorm;
    BC7SRGBBlock => Bc7, 0, SRGB;

    ETC2R8G8B8UNormBlock => Etc2Rgb, 0, UNorm;
    ETC2R8G8B8SRGBBlock => Etc2Rgb, 0, SRGB;
    ETC2R8G8B8A1UNormBlock => Etc2RgbA1, 0, UNorm;
    ETC2R8G8B8A1SRGBBlock => Etc2RgbA1, 0, SRGB;
    ETC2R8G8B8A8UNormBlock => Etc2Rgba, 0, UNorm;
    ETC2R8G8B8A8SRGBBlock => Etc2Rgba, 0, SRGB;
    EACR11UNormBlock => EacR11, 0, UNorm;
    EACR11SNormBlock => EacR11, 0, SNorm;
    EACR11G11UNormBlock => EacR11G11, 0, UNorm;
    EACR11G11SNormBlock => EacR11G11, 0, SNorm;

    ASTC4x4UNormBlock => Astc(4, 4), 0, UNorm;
    ASTC4x4SRGBBlock => Astc(4, 4), 0, SRGB;
    ASTC5x4UNormBlock => Astc(5, 4), 0, UNorm;
    ASTC5x4SRGBBlock => Astc(5, 4), 0, SRGB;
    ASTC5x5UNormBlock => Astc(5, 5), 0, UNorm;
    ASTC5x5SRGBBlock => Astc(5, 5), 0, SRGB;
    ASTC6x5UNormBlock => Astc(6, 5), 0, UNorm;
    ASTC6x5SRGBBlock => Astc(6, 5), 0, SRGB;
    ASTC6x6UNormBlock => Astc(6, 6), 0, UNorm;
    ASTC6x6SRGBBlock => Astc(6, 6), 0, SRGB;
    ASTC8x5UNormBlock => Astc(8, 5), 0, UNorm;
    ASTC8x5SRGBBlock => Astc(8, 5), 0, SRGB;
    ASTC8x6UNormBlock => Astc(8, 6), 0, UNorm;
    ASTC8x6SRGBBlock => Astc(8, 6), 0, SRGB;
    ASTC8x8UNormBlock => Astc(8, 8), 0, UNorm;
    ASTC8x8SRGBBlock => Astc(8, 8), 0, SRGB;
    ASTC10x5UNormBlock => Astc(10, 5), 0, UNorm;
    ASTC10x5SRGBBlock => Astc(10, 5), 0, SRGB;
    ASTC10x6UNormBlock => Astc(10, 6), 0, UNorm;
    ASTC10x6SRGBBlock => Astc(10, 6), 0, SRGB;
    ASTC10x8UNormBlock => Astc(10, 8), 0, UNorm;
    ASTC10x8SRGBBlock => Astc(10, 8), 0, SRGB;
    ASTC10x10UNormBlock => Astc(10, 10), 0, UNorm;
    ASTC10x10SRGBBlock => Astc(10, 10), 0, SRGB;
    ASTC12x10UNormBlock => Astc(12, 10), 0, UNorm;
    ASTC12x10SRGBBlock => Astc(12, 10), 0, SRGB;
    ASTC12x12UNormBlock => Astc(12, 12), 0, UNorm;
    ASTC12x12SRGBBlock => Astc(12, 12), 0, SRGB;
}

impl ComponentLayout {
    /// Number of components for plain (non-packed, non-block) layouts.
    pub fn components(self) -> Option<u32> {
        match self {
            ComponentLayout::R => Some(1),
            ComponentLayout::RG => Some(2),
            ComponentLayout::RGB | ComponentLayout::BGR => Some(3),
            ComponentLayout::RGBA | ComponentLayout::BGRA | ComponentLayout::ABGR => Some(4),
            _ => None,
        }
    }

    pub fn is_block(self) -> bool {
        match self {
            ComponentLayout::Bc1Rgb
            | ComponentLayout::Bc1Rgba
            | ComponentLayout::Bc2
            | ComponentLayout::Bc3
            | ComponentLayout::Bc4
            | ComponentLayout::Bc5
            | ComponentLayout::Bc6h
            | ComponentLayout::Bc7
            | ComponentLayout::Etc2Rgb
            | ComponentLayout::Etc2RgbA1
            | ComponentLayout::Etc2Rgba
            | ComponentLayout::EacR11
            | ComponentLayout::EacR11G11
            | ComponentLayout::Astc(_, _) => true,
            _ => false,
        }
    }
}

impl Format {
    pub fn is_compressed(self) -> bool {
        self.info().layout.is_block()
    }

    /// Depth-only formats.
    pub fn is_depth(self) -> bool {
        match self {
            Format::D16UNorm | Format::X8D24UNormPack32 | Format::D32SFloat => true,
            _ => false,
        }
    }

    /// Stencil-only formats.
    pub fn is_stencil(self) -> bool {
        self == Format::S8UInt
    }

    pub fn is_depth_stencil(self) -> bool {
        match self {
            Format::D16UNormS8UInt | Format::D24UNormS8UInt | Format::D32SFloatS8UInt => true,
            _ => false,
        }
    }

    /// Normalized 8 and 16-bit color formats (used for the `normalized` flag of vertex attributes).
    pub fn is_norm(self) -> bool {
        let info = self.info();
        match info.numeric {
            NumericFormat::UNorm | NumericFormat::SNorm => match info.layout {
                ComponentLayout::A2R10G10B10 | ComponentLayout::A2B10G10R10 => true,
                l if l.components().is_some() => info.bits == 8 || info.bits == 16,
                _ => false,
            },
            _ => false,
        }
    }

    /// Pure integer formats (read as integers in shaders).
    pub fn is_integer(self) -> bool {
        match self.info().numeric {
            NumericFormat::UInt | NumericFormat::SInt => !self.is_stencil(),
            _ => false,
        }
    }

    /// Number of components of a plain vertex/pixel format.
    pub fn components(self) -> Option<u32> {
        self.info().layout.components()
    }
}
