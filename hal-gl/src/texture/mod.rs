//! Textures.
//!
//! [Gl33Texture] allocates every level with `glTexImage*`, [Gl45Texture] allocates immutable
//! storage then fills it with `glTextureSubImage*`. Both read the initial pixels from the same
//! tightly packed stream, laid out by [plan_uploads]: levels in order, and inside a level every
//! layer (and every cube face) in order.
use crate::api::types::*;
use crate::api::{self as gl, GlApi, INVALID};
use crate::buffer::sealed::Unmap;
use crate::buffer::{mapped_ptr, MappedRange};
use crate::types;
use octoon_hal::{Error, Format, Result, TextureDesc, TextureDim, UsageFlags};
use std::cell::Cell;
use std::cmp::max;
use std::fmt::Debug;

mod gl33;
mod gl45;

pub use self::gl33::Gl33Texture;
pub use self::gl45::Gl45Texture;

pub trait GraphicsTexture: Debug + Unmap {
    fn desc(&self) -> &TextureDesc;

    /// Native texture name.
    fn instance_id(&self) -> GLuint;

    fn target(&self) -> GLenum;

    /// Maps mip level `mip` through a pixel buffer, positioned at texel `(x, y)`.
    ///
    /// Textures created with `UsageFlags::WRITE` are mapped for writing and uploaded when the
    /// range is unmapped, the others are read back before mapping and can only be read.
    fn map(&self, x: u32, y: u32, w: u32, h: u32, mip: u32) -> Result<MappedRange>;
}

/// Size of `size` at mip `level`, never below 1.
pub(crate) fn level_extent(size: u32, level: u32) -> u32 {
    max(size.checked_shr(level).unwrap_or(0), 1)
}

/// Length of the full mip chain of `desc`.
pub(crate) fn max_mip_levels(desc: &TextureDesc) -> u32 {
    let mut largest = max(desc.width, desc.height);
    if desc.dim == TextureDim::Texture3D {
        largest = max(largest, desc.depth);
    }
    32 - largest.leading_zeros()
}

//--------------------------------------------------------------------------------------------------
/// Size and native target of a texture.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Extents {
    pub target: GLenum,
    pub width: u32,
    pub height: u32,
    /// Depth of 3D textures, layer count (times 6 for cube arrays) of array textures.
    pub depth: u32,
}

impl Extents {
    pub(crate) fn from_desc(desc: &TextureDesc) -> Extents {
        let depth = match desc.dim {
            TextureDim::Texture3D => desc.depth,
            TextureDim::Texture2DArray | TextureDim::Texture2DArrayMultisample => desc.layer_nums,
            TextureDim::CubeArray => desc.layer_nums * 6,
            _ => 1,
        };
        Extents {
            target: types::as_texture_target(desc.dim),
            width: desc.width,
            height: desc.height,
            depth,
        }
    }

    fn level_depth(&self, dim: TextureDim, level: u32) -> u32 {
        match dim {
            TextureDim::Texture3D => level_extent(self.depth, level),
            _ => self.depth,
        }
    }
}

/// Native tokens of a texture format.
#[derive(Copy, Clone, Debug)]
pub(crate) struct TextureFormat {
    pub internal: GLenum,
    pub format: GLenum,
    pub ty: GLenum,
    pub compressed: bool,
}

impl TextureFormat {
    pub(crate) fn from_format(format: Format) -> Result<TextureFormat> {
        let internal = types::as_texture_internal_format(format);
        if internal == INVALID {
            error!("invalid texture internal format {:?}", format);
            return Err(Error::UnsupportedFormat(format));
        }
        let compressed = types::is_compressed_texture(format);
        let (fmt, ty) = if compressed {
            (internal, 0)
        } else {
            let fmt = types::as_texture_format(format);
            let ty = types::as_texture_type(format);
            if fmt == INVALID || ty == INVALID {
                error!("invalid texture format {:?}", format);
                return Err(Error::UnsupportedFormat(format));
            }
            (fmt, ty)
        };
        Ok(TextureFormat {
            internal,
            format: fmt,
            ty,
            compressed,
        })
    }

    /// Bytes per texel, 0 for block formats.
    pub(crate) fn pixel_size(&self) -> usize {
        if self.compressed {
            0
        } else {
            types::get_format_num(self.format, self.ty)
        }
    }
}

/// `GL_UNPACK_ALIGNMENT` for rows of texels of `pixel_size` bytes.
pub(crate) fn unpack_alignment(pixel_size: usize) -> i32 {
    if pixel_size == 0 {
        1
    } else if pixel_size % 8 == 0 {
        8
    } else if pixel_size % 4 == 0 {
        4
    } else if pixel_size % 2 == 0 {
        2
    } else {
        1
    }
}

//--------------------------------------------------------------------------------------------------
/// One contiguous chunk of the initial stream.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct UploadRegion {
    pub level: u32,
    /// Cube face index for cube textures.
    pub face: Option<u32>,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub offset: usize,
    pub size: usize,
}

#[derive(Clone, Debug)]
pub(crate) struct UploadPlan {
    pub regions: Vec<UploadRegion>,
    /// Bytes needed for every level.
    pub total: usize,
    /// Bytes needed for the base level alone.
    pub base: usize,
}

/// How the initial stream is consumed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum UploadMode {
    /// No stream, levels are only allocated.
    Allocate,
    /// The stream covers every level.
    Full,
    /// The stream covers the base level only, the others are generated.
    BaseAndGenerate,
}

/// Splits the stream of `desc` into per-level (and per-face) regions.
pub(crate) fn plan_uploads(desc: &TextureDesc, format: &TextureFormat) -> Result<UploadPlan> {
    let extents = Extents::from_desc(desc);
    let faces: &[Option<u32>] = if desc.dim == TextureDim::Cube {
        &[Some(0), Some(1), Some(2), Some(3), Some(4), Some(5)]
    } else {
        &[None]
    };

    let mut regions = Vec::new();
    let mut offset = 0;
    let mut base = 0;
    for level in desc.mip_base..desc.mip_base + desc.mip_nums {
        let width = level_extent(extents.width, level);
        let height = level_extent(extents.height, level);
        let depth = extents.level_depth(desc.dim, level);
        let size = if format.compressed {
            types::get_compressed_texture_size(width, height, depth, format.internal)
        } else {
            width as usize * height as usize * depth as usize * format.pixel_size()
        };
        if size == 0 {
            error!("cannot compute the size of a {:?} level", desc.format);
            return Err(Error::UnsupportedFormat(desc.format));
        }
        for &face in faces {
            regions.push(UploadRegion {
                level,
                face,
                width,
                height,
                depth,
                offset,
                size,
            });
            offset += size;
        }
        if level == desc.mip_base {
            base = offset;
        }
    }

    Ok(UploadPlan {
        regions,
        total: offset,
        base,
    })
}

pub(crate) fn upload_mode(desc: &TextureDesc, plan: &UploadPlan) -> Result<UploadMode> {
    match desc.stream {
        None => Ok(UploadMode::Allocate),
        Some(ref stream) if stream.len() >= plan.total => Ok(UploadMode::Full),
        Some(ref stream) if desc.mip_nums > 1 && stream.len() >= plan.base => {
            Ok(UploadMode::BaseAndGenerate)
        }
        Some(ref stream) => {
            error!(
                "texture data is {} bytes, at least {} expected",
                stream.len(),
                plan.base
            );
            Err(Error::InvalidDescriptor("texture data smaller than the texture"))
        }
    }
}

/// Creation checks shared by both implementations.
pub(crate) fn validate(desc: &TextureDesc) -> Result<(Extents, TextureFormat)> {
    if desc.width == 0 || desc.height == 0 || desc.depth == 0 {
        error!("texture has a zero extent ({}x{}x{})", desc.width, desc.height, desc.depth);
        return Err(Error::InvalidDescriptor("zero-sized texture"));
    }
    if desc.mip_nums == 0 || desc.layer_nums == 0 {
        error!("texture has no mip levels or no layers");
        return Err(Error::InvalidDescriptor("texture without levels or layers"));
    }
    let levels = desc.mip_base.checked_add(desc.mip_nums);
    if levels.map_or(true, |levels| levels > max_mip_levels(desc)) {
        error!(
            "mip levels {}..+{} beyond the {} levels of a {}x{}x{} texture",
            desc.mip_base,
            desc.mip_nums,
            max_mip_levels(desc),
            desc.width,
            desc.height,
            desc.depth
        );
        return Err(Error::InvalidDescriptor("too many mip levels"));
    }
    if desc.dim.is_multisample() && (desc.samples == 0 || desc.mip_nums > 1) {
        error!("multisample textures need a sample count and a single level");
        return Err(Error::InvalidDescriptor("multisample texture"));
    }
    let extents = Extents::from_desc(desc);
    if extents.target == INVALID {
        error!("invalid texture target {:?}", desc.dim);
        return Err(Error::InvalidEnum("texture target"));
    }
    let format = TextureFormat::from_format(desc.format)?;
    Ok((extents, format))
}

/// Whether levels of `dim` are allocated with the 3D entry points (layers as depth).
pub(crate) fn uses_3d_storage(dim: TextureDim) -> bool {
    match dim {
        TextureDim::Texture2DArray
        | TextureDim::Texture2DArrayMultisample
        | TextureDim::Texture3D
        | TextureDim::CubeArray => true,
        _ => false,
    }
}

/// Slice of the initial stream to upload for `region`, if any.
pub(crate) fn region_data<'a>(
    desc: &'a TextureDesc,
    mode: UploadMode,
    region: &UploadRegion,
) -> Option<&'a [u8]> {
    let upload = match mode {
        UploadMode::Allocate => false,
        UploadMode::Full => true,
        UploadMode::BaseAndGenerate => region.level == desc.mip_base,
    };
    if upload {
        desc.stream
            .as_ref()
            .map(|s| &s[region.offset..region.offset + region.size])
    } else {
        None
    }
}

/// Initial sampling parameters.
pub(crate) fn sampling_parameters(desc: &TextureDesc) -> [(GLenum, i32); 4] {
    let min_filter = if desc.mip_nums > 1 {
        gl::LINEAR_MIPMAP_LINEAR
    } else {
        gl::LINEAR
    };
    [
        (gl::TEXTURE_MIN_FILTER, min_filter as i32),
        (gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32),
        (gl::TEXTURE_BASE_LEVEL, desc.mip_base as i32),
        (gl::TEXTURE_MAX_LEVEL, (desc.mip_base + desc.mip_nums - 1) as i32),
    ]
}

//--------------------------------------------------------------------------------------------------
#[derive(Copy, Clone, Debug)]
pub(crate) struct Transfer {
    pub write: bool,
    pub mip: u32,
    pub width: u32,
    pub height: u32,
}

/// Pixel buffer used to map textures. Allocated on first use, grown only when a transfer needs
/// more room than any previous one.
#[derive(Debug, Default)]
pub(crate) struct PixelBuffer {
    buffer: Cell<GLuint>,
    size: Cell<usize>,
    transfer: Cell<Option<Transfer>>,
}

impl PixelBuffer {
    fn pack_target(write: bool) -> GLenum {
        if write {
            gl::PIXEL_UNPACK_BUFFER
        } else {
            gl::PIXEL_PACK_BUFFER
        }
    }

    /// Binds the buffer for the transfer direction, growing it to `size` bytes if needed.
    pub(crate) fn prepare(&self, gl: &dyn GlApi, write: bool, size: usize) -> Result<()> {
        if self.transfer.get().is_some() {
            error!("texture is already mapped");
            return Err(Error::InvalidState("texture already mapped"));
        }
        if self.buffer.get() == 0 {
            let buffer = gl.gen_buffer();
            if buffer == 0 {
                return Err(Error::NativeAllocation("pixel buffer"));
            }
            self.buffer.set(buffer);
        }
        let target = PixelBuffer::pack_target(write);
        gl.bind_buffer(target, self.buffer.get());
        if self.size.get() < size {
            gl.buffer_data(target, size, None, gl::DYNAMIC_DRAW);
            self.size.set(size);
        }
        Ok(())
    }

    /// Maps the bound buffer and records the transfer. Returns the address of byte `offset`.
    /// On failure the buffer is unbound again.
    pub(crate) fn map(&self, gl: &dyn GlApi, transfer: Transfer, size: usize, offset: usize) -> Result<*mut u8> {
        let target = PixelBuffer::pack_target(transfer.write);
        let access = if transfer.write {
            gl::MAP_WRITE_BIT
        } else {
            gl::MAP_READ_BIT
        };
        let base = match mapped_ptr(gl.map_buffer_range(target, 0, size, access), "pixel buffer") {
            Ok(base) => base,
            Err(e) => {
                gl.bind_buffer(target, 0);
                return Err(e);
            }
        };
        self.transfer.set(Some(transfer));
        Ok(unsafe { base.add(offset) })
    }

    /// Unmaps the buffer. For write transfers the buffer is left bound to
    /// `GL_PIXEL_UNPACK_BUFFER` so the caller can upload from it, then must call `release`.
    pub(crate) fn unmap(&self, gl: &dyn GlApi) -> Result<Transfer> {
        let transfer = match self.transfer.take() {
            Some(transfer) => transfer,
            None => {
                error!("unmap called on a texture that is not mapped");
                return Err(Error::InvalidState("texture not mapped"));
            }
        };
        let target = PixelBuffer::pack_target(transfer.write);
        gl.bind_buffer(target, self.buffer.get());
        gl.unmap_buffer(target);
        if !transfer.write {
            gl.bind_buffer(target, 0);
        }
        Ok(transfer)
    }

    pub(crate) fn release(&self, gl: &dyn GlApi) {
        gl.bind_buffer(gl::PIXEL_UNPACK_BUFFER, 0);
    }

    pub(crate) fn destroy(&self, gl: &dyn GlApi) {
        if self.buffer.get() != 0 {
            gl.delete_buffer(self.buffer.get());
            self.buffer.set(0);
        }
    }
}

/// Checks a map request. Returns the transfer, the mapping size (whole level) and the offset of
/// texel `(x, y)` in it. Rows are tightly packed, so transfers run with a pack and unpack
/// alignment of [unpack_alignment].
pub(crate) fn map_request(
    desc: &TextureDesc,
    format: &TextureFormat,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    mip: u32,
) -> Result<(Transfer, usize, usize)> {
    if format.compressed {
        error!("cannot map compressed texture {:?}", desc.format);
        return Err(Error::Unsupported("mapping compressed textures"));
    }
    if desc.dim != TextureDim::Texture2D {
        error!("cannot map {:?} textures", desc.dim);
        return Err(Error::Unsupported("mapping textures other than 2D"));
    }
    let pixel_size = format.pixel_size();
    if pixel_size == 0 {
        return Err(Error::UnsupportedFormat(desc.format));
    }
    if mip < desc.mip_base || mip - desc.mip_base >= desc.mip_nums {
        return Err(Error::InvalidDescriptor("mip level out of range"));
    }
    let width = level_extent(desc.width, mip);
    let height = level_extent(desc.height, mip);
    let inside = |start: u32, len: u32, end: u32| start.checked_add(len).map_or(false, |e| e <= end);
    if w == 0 || h == 0 || !inside(x, w, width) || !inside(y, h, height) {
        error!("map region {}x{}+{}+{} outside of a {}x{} level", w, h, x, y, width, height);
        return Err(Error::InvalidDescriptor("map region out of bounds"));
    }
    let size = width as usize * height as usize * pixel_size;
    let offset = (y as usize * width as usize + x as usize) * pixel_size;
    let transfer = Transfer {
        write: desc.usage.contains(UsageFlags::WRITE),
        mip,
        width,
        height,
    };
    Ok((transfer, size, offset))
}

pub(crate) fn cube_face_target(face: u32) -> GLenum {
    gl::TEXTURE_CUBE_MAP_POSITIVE_X + face
}
