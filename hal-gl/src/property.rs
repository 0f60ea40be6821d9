//! Capability probe.
//!
//! Queried once when the device is created, then shared read-only (`Rc<DeviceProperty>`) with
//! every factory. The format sets are the authority on what can be created: callers check them
//! before creating a resource instead of relying on driver errors.
use crate::api as gl;
use crate::api::{GlApi, INVALID};
use crate::types;
use fxhash::FxHashSet;
use lazy_static::lazy_static;
use octoon_hal::{ComponentLayout, Format, NumericFormat, ShaderStageFlags, TextureDim};
use regex::Regex;

lazy_static! {
    static ref VERSION_RE: Regex = Regex::new(r"^(?:OpenGL(?: ES)? )?(\d+)\.(\d+)").unwrap();
}

/// Parses the leading `major.minor` of a `GL_VERSION` string.
pub fn parse_version(version: &str) -> Option<(u32, u32)> {
    let caps = VERSION_RE.captures(version.trim())?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = caps.get(2)?.as_str().parse().ok()?;
    Some((major, minor))
}

/// Numeric limits of the context.
#[derive(Copy, Clone, Debug, Default)]
pub struct DeviceLimits {
    pub max_texture_size: u32,
    pub max_3d_texture_size: u32,
    pub max_cube_map_size: u32,
    pub max_array_layers: u32,
    pub max_texture_buffer_size: u32,
    pub max_uniform_block_size: u32,
    pub max_storage_block_size: u32,
    pub max_uniform_buffer_bindings: u32,
    pub max_storage_buffer_bindings: u32,
    pub max_combined_texture_units: u32,
    pub max_fragment_uniform_blocks: u32,
    pub max_vertex_attribs: u32,
    pub max_vertex_bindings: u32,
    pub max_vertex_attrib_offset: u32,
    pub max_vertex_stride: u32,
    pub max_draw_buffers: u32,
    pub max_color_attachments: u32,
    pub max_viewports: u32,
    pub max_framebuffer_width: u32,
    pub max_framebuffer_height: u32,
    pub max_framebuffer_layers: u32,
    pub max_samples: u32,
    pub max_clip_distances: u32,
    pub max_patch_vertices: u32,
    pub max_geometry_output_vertices: u32,
    pub max_compute_work_group_invocations: u32,
    pub uniform_buffer_alignment: usize,
    pub storage_buffer_alignment: usize,
    pub max_anisotropy: f32,
    pub max_lod_bias: f32,
}

impl DeviceLimits {
    fn populate(gl: &dyn GlApi, property: &DeviceProperty) -> DeviceLimits {
        let getint = |param| gl.get_integer(param).max(0) as u32;

        let mut limits = DeviceLimits {
            max_texture_size: getint(gl::MAX_TEXTURE_SIZE),
            max_3d_texture_size: getint(gl::MAX_3D_TEXTURE_SIZE),
            max_cube_map_size: getint(gl::MAX_CUBE_MAP_TEXTURE_SIZE),
            max_array_layers: getint(gl::MAX_ARRAY_TEXTURE_LAYERS),
            max_texture_buffer_size: getint(gl::MAX_TEXTURE_BUFFER_SIZE),
            max_uniform_block_size: getint(gl::MAX_UNIFORM_BLOCK_SIZE),
            max_uniform_buffer_bindings: getint(gl::MAX_UNIFORM_BUFFER_BINDINGS),
            max_combined_texture_units: getint(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS),
            max_fragment_uniform_blocks: getint(gl::MAX_FRAGMENT_UNIFORM_BLOCKS),
            max_vertex_attribs: getint(gl::MAX_VERTEX_ATTRIBS),
            max_draw_buffers: getint(gl::MAX_DRAW_BUFFERS),
            max_color_attachments: getint(gl::MAX_COLOR_ATTACHMENTS),
            max_viewports: getint(gl::MAX_VIEWPORTS),
            max_samples: getint(gl::MAX_SAMPLES),
            max_clip_distances: getint(gl::MAX_CLIP_DISTANCES),
            max_geometry_output_vertices: getint(gl::MAX_GEOMETRY_OUTPUT_VERTICES),
            uniform_buffer_alignment: getint(gl::UNIFORM_BUFFER_OFFSET_ALIGNMENT) as usize,
            max_lod_bias: gl.get_float(gl::MAX_TEXTURE_LOD_BIAS),
            ..Default::default()
        };

        if property.version_at_least(4, 3) {
            limits.max_storage_block_size = getint(gl::MAX_SHADER_STORAGE_BLOCK_SIZE);
            limits.max_storage_buffer_bindings = getint(gl::MAX_SHADER_STORAGE_BUFFER_BINDINGS);
            limits.storage_buffer_alignment =
                getint(gl::SHADER_STORAGE_BUFFER_OFFSET_ALIGNMENT) as usize;
            limits.max_vertex_bindings = getint(gl::MAX_VERTEX_ATTRIB_BINDINGS);
            limits.max_vertex_attrib_offset = getint(gl::MAX_VERTEX_ATTRIB_RELATIVE_OFFSET);
            limits.max_framebuffer_width = getint(gl::MAX_FRAMEBUFFER_WIDTH);
            limits.max_framebuffer_height = getint(gl::MAX_FRAMEBUFFER_HEIGHT);
            limits.max_framebuffer_layers = getint(gl::MAX_FRAMEBUFFER_LAYERS);
            limits.max_compute_work_group_invocations =
                getint(gl::MAX_COMPUTE_WORK_GROUP_INVOCATIONS);
        }
        if property.version_at_least(4, 4) {
            limits.max_vertex_stride = getint(gl::MAX_VERTEX_ATTRIB_STRIDE);
        }
        if property.version_at_least(4, 0) {
            limits.max_patch_vertices = getint(gl::MAX_PATCH_VERTICES);
        }
        if property.has_extension("GL_EXT_texture_filter_anisotropic") {
            limits.max_anisotropy = gl.get_float(gl::MAX_TEXTURE_MAX_ANISOTROPY_EXT);
        }

        limits
    }
}

/// Capability snapshot of a live context.
#[derive(Clone, Debug, Default)]
pub struct DeviceProperty {
    pub vendor: String,
    pub renderer: String,
    pub version: String,
    pub shading_language_version: String,
    pub major: u32,
    pub minor: u32,
    pub extensions: FxHashSet<String>,
    pub limits: DeviceLimits,
    pub texture_formats: FxHashSet<Format>,
    pub vertex_formats: FxHashSet<Format>,
    pub texture_dims: FxHashSet<TextureDim>,
    pub shader_stages: ShaderStageFlags,
}

impl DeviceProperty {
    /// Queries the current context.
    pub fn probe(gl: &dyn GlApi) -> DeviceProperty {
        let mut property = DeviceProperty {
            vendor: gl.get_string(gl::VENDOR).unwrap_or_default(),
            renderer: gl.get_string(gl::RENDERER).unwrap_or_default(),
            version: gl.get_string(gl::VERSION).unwrap_or_default(),
            shading_language_version: gl
                .get_string(gl::SHADING_LANGUAGE_VERSION)
                .unwrap_or_default(),
            ..Default::default()
        };

        let (major, minor) = parse_version(&property.version).unwrap_or_else(|| {
            (
                gl.get_integer(gl::MAJOR_VERSION).max(0) as u32,
                gl.get_integer(gl::MINOR_VERSION).max(0) as u32,
            )
        });
        property.major = major;
        property.minor = minor;

        let num_extensions = gl.get_integer(gl::NUM_EXTENSIONS).max(0) as u32;
        property.extensions = (0..num_extensions)
            .filter_map(|i| gl.get_string_i(gl::EXTENSIONS, i))
            .collect();

        property.limits = DeviceLimits::populate(gl, &property);
        property.init_texture_formats();
        property.init_vertex_formats();
        property.init_texture_dims();
        property.init_shader_stages();

        info!(
            "OpenGL {}.{} ({}) on {} / {}, {} extensions",
            property.major,
            property.minor,
            property.version,
            property.vendor,
            property.renderer,
            property.extensions.len()
        );
        debug!(
            "{} texture formats, {} vertex formats, stages {:?}",
            property.texture_formats.len(),
            property.vertex_formats.len(),
            property.shader_stages
        );

        property
    }

    pub fn version_at_least(&self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    /// Named (DSA) entry points are available.
    pub fn supports_dsa(&self) -> bool {
        self.version_at_least(4, 5) || self.has_extension("GL_ARB_direct_state_access")
    }

    /// Immutable buffer storage is available.
    pub fn supports_buffer_storage(&self) -> bool {
        self.version_at_least(4, 4) || self.has_extension("GL_ARB_buffer_storage")
    }

    pub fn supports_base_instance(&self) -> bool {
        self.version_at_least(4, 2) || self.has_extension("GL_ARB_base_instance")
    }

    pub fn supports_anisotropy(&self) -> bool {
        self.has_extension("GL_EXT_texture_filter_anisotropic")
    }

    pub fn is_texture_supported(&self, format: Format) -> bool {
        self.texture_formats.contains(&format)
    }

    pub fn is_vertex_supported(&self, format: Format) -> bool {
        self.vertex_formats.contains(&format)
    }

    pub fn is_texture_dim_supported(&self, dim: TextureDim) -> bool {
        self.texture_dims.contains(&dim)
    }

    /// Whether the version/extension gate for sampling `format` is satisfied.
    fn gate(&self, format: Format) -> bool {
        let info = format.info();
        let srgb = info.numeric == NumericFormat::SRGB;
        let srgb_ok = !srgb || self.has_extension("GL_EXT_texture_sRGB") || self.version_at_least(2, 1);
        match info.layout {
            ComponentLayout::Bc1Rgb | ComponentLayout::Bc1Rgba | ComponentLayout::Bc2 | ComponentLayout::Bc3 => {
                self.has_extension("GL_EXT_texture_compression_s3tc")
                    && (!srgb || self.has_extension("GL_EXT_texture_sRGB"))
            }
            ComponentLayout::Bc4 | ComponentLayout::Bc5 => {
                self.version_at_least(3, 0) || self.has_extension("GL_ARB_texture_compression_rgtc")
            }
            ComponentLayout::Bc6h | ComponentLayout::Bc7 => {
                self.version_at_least(4, 2) || self.has_extension("GL_ARB_texture_compression_bptc")
            }
            ComponentLayout::Etc2Rgb
            | ComponentLayout::Etc2RgbA1
            | ComponentLayout::Etc2Rgba
            | ComponentLayout::EacR11
            | ComponentLayout::EacR11G11 => {
                self.version_at_least(4, 3) || self.has_extension("GL_ARB_ES3_compatibility")
            }
            ComponentLayout::Astc(_, _) => {
                self.has_extension("GL_KHR_texture_compression_astc_ldr")
                    || self.has_extension("GL_KHR_texture_compression_astc_hdr")
            }
            ComponentLayout::ABGR => self.has_extension("GL_EXT_abgr") && srgb_ok,
            ComponentLayout::S8 => {
                self.version_at_least(4, 4) || self.has_extension("GL_ARB_texture_stencil8")
            }
            ComponentLayout::R5G6B5 | ComponentLayout::B5G6R5 => {
                self.version_at_least(4, 1) || self.has_extension("GL_ARB_ES2_compatibility")
            }
            ComponentLayout::A2R10G10B10 | ComponentLayout::A2B10G10R10 if format.is_integer() => {
                self.version_at_least(3, 3) || self.has_extension("GL_ARB_texture_rgb10_a2ui")
            }
            _ => srgb_ok,
        }
    }

    fn init_texture_formats(&mut self) {
        let formats = Format::ALL
            .iter()
            .cloned()
            .filter(|&f| {
                types::as_texture_internal_format(f) != INVALID
                    && (f.is_compressed()
                        || (types::as_texture_format(f) != INVALID
                            && types::as_texture_type(f) != INVALID))
            })
            .filter(|&f| self.gate(f))
            .collect();
        self.texture_formats = formats;
    }

    fn init_vertex_formats(&mut self) {
        let int64 = self.has_extension("GL_ARB_gpu_shader_int64");
        let double = self.version_at_least(4, 1) || self.has_extension("GL_ARB_vertex_attrib_64bit");
        let formats = Format::ALL
            .iter()
            .cloned()
            .filter(|&f| match types::as_vertex_format(f) {
                INVALID => false,
                gl::INT64_ARB | gl::UNSIGNED_INT64_ARB => int64,
                gl::DOUBLE => double,
                _ => true,
            })
            .collect();
        self.vertex_formats = formats;
    }

    fn init_texture_dims(&mut self) {
        let mut dims = FxHashSet::default();
        dims.insert(TextureDim::Texture2D);
        dims.insert(TextureDim::Texture2DArray);
        dims.insert(TextureDim::Texture3D);
        dims.insert(TextureDim::Cube);
        if self.version_at_least(3, 2) || self.has_extension("GL_ARB_texture_multisample") {
            dims.insert(TextureDim::Texture2DMultisample);
            dims.insert(TextureDim::Texture2DArrayMultisample);
        }
        if self.version_at_least(4, 0) || self.has_extension("GL_ARB_texture_cube_map_array") {
            dims.insert(TextureDim::CubeArray);
        }
        self.texture_dims = dims;
    }

    fn init_shader_stages(&mut self) {
        let mut stages = ShaderStageFlags::VERTEX | ShaderStageFlags::FRAGMENT;
        if self.version_at_least(3, 2) {
            stages |= ShaderStageFlags::GEOMETRY;
        }
        if self.version_at_least(4, 0) || self.has_extension("GL_ARB_tessellation_shader") {
            stages |= ShaderStageFlags::TESS_CONTROL | ShaderStageFlags::TESS_EVAL;
        }
        if self.version_at_least(4, 3) || self.has_extension("GL_ARB_compute_shader") {
            stages |= ShaderStageFlags::COMPUTE;
        }
        self.shader_stages = stages;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingGl;

    #[test]
    fn version_strings() {
        assert_eq!(parse_version("4.5.0 NVIDIA 390.77"), Some((4, 5)));
        assert_eq!(parse_version("3.3 (Core Profile) Mesa 18.0.5"), Some((3, 3)));
        assert_eq!(parse_version("OpenGL ES 3.2 build 1.2"), Some((3, 2)));
        assert_eq!(parse_version("garbage"), None);
    }

    #[test]
    fn probe_reads_driver_strings_and_limits() {
        let gl = RecordingGl::new();
        gl.add_extension("GL_ARB_gpu_shader_int64");
        let property = DeviceProperty::probe(&gl);
        assert_eq!((property.major, property.minor), (4, 5));
        assert_eq!(property.vendor, "Recording");
        assert_eq!(property.limits.max_draw_buffers, 8);
        assert_eq!(property.limits.max_viewports, 16);
        assert!(property.has_extension("GL_ARB_gpu_shader_int64"));
        assert!(property.supports_dsa());
        assert!(property.shader_stages.contains(ShaderStageFlags::COMPUTE));
        assert!(property.is_texture_dim_supported(TextureDim::CubeArray));
    }

    #[test]
    fn dsa_gate() {
        let gl = RecordingGl::with_version(3, 3);
        assert!(!DeviceProperty::probe(&gl).supports_dsa());
        gl.add_extension("GL_ARB_direct_state_access");
        assert!(DeviceProperty::probe(&gl).supports_dsa());
    }

    #[test]
    fn compressed_formats_are_gated_on_extensions() {
        let gl = RecordingGl::with_version(3, 3);
        let property = DeviceProperty::probe(&gl);
        assert!(property.is_texture_supported(Format::R8G8B8A8UNorm));
        assert!(property.is_texture_supported(Format::D24UNormS8UInt));
        assert!(!property.is_texture_supported(Format::BC1RGBUNormBlock));
        assert!(!property.is_texture_supported(Format::ASTC4x4UNormBlock));
        assert!(!property.is_texture_supported(Format::BC7UNormBlock));
        assert!(!property.is_texture_dim_supported(TextureDim::CubeArray));
        assert!(!property.shader_stages.contains(ShaderStageFlags::TESS_CONTROL));

        gl.add_extension("GL_EXT_texture_compression_s3tc");
        gl.add_extension("GL_KHR_texture_compression_astc_ldr");
        let property = DeviceProperty::probe(&gl);
        assert!(property.is_texture_supported(Format::BC1RGBUNormBlock));
        assert!(property.is_texture_supported(Format::ASTC4x4UNormBlock));
    }

    #[test]
    fn every_supported_texture_format_translates() {
        let gl = RecordingGl::new();
        for ext in &[
            "GL_EXT_texture_compression_s3tc",
            "GL_EXT_texture_sRGB",
            "GL_KHR_texture_compression_astc_ldr",
            "GL_EXT_abgr",
        ] {
            gl.add_extension(ext);
        }
        let property = DeviceProperty::probe(&gl);
        assert!(!property.texture_formats.is_empty());
        for &format in &property.texture_formats {
            assert_ne!(types::as_texture_internal_format(format), INVALID, "{:?}", format);
            if !format.is_compressed() {
                assert_ne!(types::as_texture_format(format), INVALID, "{:?}", format);
                assert_ne!(types::as_texture_type(format), INVALID, "{:?}", format);
            }
        }
    }

    #[test]
    fn vertex_formats() {
        let gl = RecordingGl::with_version(3, 3);
        let property = DeviceProperty::probe(&gl);
        assert!(property.is_vertex_supported(Format::R32G32B32SFloat));
        assert!(property.is_vertex_supported(Format::R8G8B8A8UNorm));
        assert!(!property.is_vertex_supported(Format::R64SFloat));
        assert!(!property.is_vertex_supported(Format::BC1RGBUNormBlock));
    }
}
