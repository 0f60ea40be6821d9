//! Recording driver used by unit tests.
//!
//! Every call is logged as `Name(arg, arg, ...)` with the arguments' `Debug` formatting. Object
//! names are handed out from a counter. Buffer contents are kept per name so that mapping and
//! reading back round-trips, and program introspection answers from a scripted table.
use crate::api as gl;
use crate::api::types::*;
use crate::api::GlApi;
use crate::pipeline::{GlProgram, GlShader, ProgramDesc};
use crate::swapchain::Swapchain;
use fxhash::FxHashMap;
use octoon_hal::{ShaderDesc, ShaderStageFlags, SwapchainDesc};
use std::cell::{Cell, RefCell};
use std::os::raw::c_void;
use std::ptr;
use std::rc::Rc;

macro_rules! rec {
    ($s:expr, $name:expr $(, $arg:expr)*) => {{
        let args: Vec<String> = vec![$(format!("{:?}", $arg)),*];
        $s.record(format!("{}({})", $name, args.join(", ")));
    }};
}

#[derive(Clone, Debug)]
pub struct ScriptedBlock {
    pub name: String,
    pub size: i32,
    /// Indices into the scripted uniform list.
    pub members: Vec<u32>,
}

#[derive(Debug, Default)]
struct Inner {
    calls: Vec<String>,
    next_name: GLuint,
    integers: FxHashMap<GLenum, i32>,
    strings: FxHashMap<GLenum, String>,
    extensions: Vec<String>,
    attributes: Vec<(String, i32, GLenum)>,
    uniforms: Vec<(String, i32, GLenum)>,
    blocks: Vec<ScriptedBlock>,
    buffers: FxHashMap<GLuint, Vec<u8>>,
    bound_buffers: FxHashMap<GLenum, GLuint>,
    compile_fails: bool,
    link_fails: bool,
    map_fails: bool,
    framebuffer_status: Option<GLenum>,
}

#[derive(Debug, Default)]
pub struct RecordingGl {
    inner: RefCell<Inner>,
}

impl RecordingGl {
    /// A GL 4.5 context with no extensions.
    pub fn new() -> RecordingGl {
        let gl = RecordingGl::default();
        gl.set_version(4, 5);
        {
            let mut inner = gl.inner.borrow_mut();
            inner.next_name = 1;
            inner.integers.insert(gl::MAX_DRAW_BUFFERS, 8);
            inner.integers.insert(gl::MAX_COLOR_ATTACHMENTS, 8);
            inner.integers.insert(gl::MAX_VIEWPORTS, 16);
            inner.integers.insert(gl::MAX_VERTEX_ATTRIBS, 16);
            inner.integers.insert(gl::MAX_VERTEX_ATTRIB_BINDINGS, 16);
            inner.integers.insert(gl::MAX_TEXTURE_SIZE, 16384);
            inner.integers.insert(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS, 32);
            inner.integers.insert(gl::MAX_UNIFORM_BUFFER_BINDINGS, 36);
            inner.strings.insert(gl::VENDOR, "Recording".to_owned());
            inner.strings.insert(gl::RENDERER, "RecordingGl".to_owned());
            inner.strings.insert(gl::SHADING_LANGUAGE_VERSION, "4.50".to_owned());
        }
        gl
    }

    /// Same as `new` with the reported version changed.
    pub fn with_version(major: i32, minor: i32) -> RecordingGl {
        let gl = RecordingGl::new();
        gl.set_version(major, minor);
        gl
    }

    pub fn set_version(&self, major: i32, minor: i32) {
        let mut inner = self.inner.borrow_mut();
        inner.integers.insert(gl::MAJOR_VERSION, major);
        inner.integers.insert(gl::MINOR_VERSION, minor);
        inner
            .strings
            .insert(gl::VERSION, format!("{}.{}.0 Recording", major, minor));
    }

    pub fn set_integer(&self, pname: GLenum, value: i32) {
        self.inner.borrow_mut().integers.insert(pname, value);
    }

    pub fn add_extension(&self, name: &str) {
        self.inner.borrow_mut().extensions.push(name.to_owned());
    }

    /// Active attribute `(name, size, type)`; its location is its index.
    pub fn add_attribute(&self, name: &str, ty: GLenum) {
        self.inner.borrow_mut().attributes.push((name.to_owned(), 1, ty));
    }

    /// Active uniform `(name, size, type)`; its location is its index.
    pub fn add_uniform(&self, name: &str, size: i32, ty: GLenum) {
        self.inner.borrow_mut().uniforms.push((name.to_owned(), size, ty));
    }

    pub fn add_block(&self, name: &str, size: i32, members: &[u32]) {
        self.inner.borrow_mut().blocks.push(ScriptedBlock {
            name: name.to_owned(),
            size,
            members: members.to_vec(),
        });
    }

    pub fn fail_compile(&self) {
        self.inner.borrow_mut().compile_fails = true;
    }

    pub fn fail_link(&self) {
        self.inner.borrow_mut().link_fails = true;
    }

    /// Makes every later buffer mapping return a null pointer.
    pub fn fail_map(&self) {
        self.inner.borrow_mut().map_fails = true;
    }

    pub fn set_framebuffer_status(&self, status: GLenum) {
        self.inner.borrow_mut().framebuffer_status = Some(status);
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.borrow().calls.clone()
    }

    /// Number of recorded calls to the entry point `name`.
    pub fn count(&self, name: &str) -> usize {
        let prefix = format!("{}(", name);
        self.inner
            .borrow()
            .calls
            .iter()
            .filter(|c| c.starts_with(&prefix))
            .count()
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    /// Stored bytes of a buffer object.
    pub fn buffer_contents(&self, buffer: GLuint) -> Vec<u8> {
        self.inner
            .borrow()
            .buffers
            .get(&buffer)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, call: String) {
        self.inner.borrow_mut().calls.push(call);
    }

    fn next_name(&self) -> GLuint {
        let mut inner = self.inner.borrow_mut();
        let name = inner.next_name;
        inner.next_name += 1;
        name
    }

    fn bound(&self, target: GLenum) -> GLuint {
        self.inner
            .borrow()
            .bound_buffers
            .get(&target)
            .cloned()
            .unwrap_or(0)
    }

    fn store(&self, buffer: GLuint, size: usize, data: Option<&[u8]>) {
        let mut bytes = vec![0u8; size];
        if let Some(data) = data {
            let n = data.len().min(size);
            bytes[..n].copy_from_slice(&data[..n]);
        }
        self.inner.borrow_mut().buffers.insert(buffer, bytes);
    }

    fn map(&self, buffer: GLuint, offset: usize, length: usize) -> *mut c_void {
        let mut inner = self.inner.borrow_mut();
        if inner.map_fails {
            return ptr::null_mut();
        }
        match inner.buffers.get_mut(&buffer) {
            Some(bytes) if offset + length <= bytes.len() => {
                unsafe { bytes.as_mut_ptr().add(offset) as *mut c_void }
            }
            _ => ptr::null_mut(),
        }
    }

    fn read(&self, buffer: GLuint, offset: usize, out: &mut [u8]) {
        let inner = self.inner.borrow();
        if let Some(bytes) = inner.buffers.get(&buffer) {
            let end = (offset + out.len()).min(bytes.len());
            if offset < end {
                out[..end - offset].copy_from_slice(&bytes[offset..end]);
            }
        }
    }

    fn uniform_block_of(&self, index: u32) -> i32 {
        self.inner
            .borrow()
            .blocks
            .iter()
            .position(|b| b.members.contains(&index))
            .map_or(-1, |p| p as i32)
    }
}

impl GlApi for RecordingGl {
    fn enable(&self, cap: GLenum) {
        rec!(self, "Enable", cap)
    }
    fn disable(&self, cap: GLenum) {
        rec!(self, "Disable", cap)
    }
    fn enable_i(&self, cap: GLenum, index: u32) {
        rec!(self, "Enablei", cap, index)
    }
    fn disable_i(&self, cap: GLenum, index: u32) {
        rec!(self, "Disablei", cap, index)
    }
    fn blend_func_separate_i(&self, buf: u32, src_rgb: GLenum, dst_rgb: GLenum, src_alpha: GLenum, dst_alpha: GLenum) {
        rec!(self, "BlendFuncSeparatei", buf, src_rgb, dst_rgb, src_alpha, dst_alpha)
    }
    fn blend_equation_separate_i(&self, buf: u32, mode_rgb: GLenum, mode_alpha: GLenum) {
        rec!(self, "BlendEquationSeparatei", buf, mode_rgb, mode_alpha)
    }
    fn color_mask_i(&self, buf: u32, r: bool, g: bool, b: bool, a: bool) {
        rec!(self, "ColorMaski", buf, r, g, b, a)
    }
    fn cull_face(&self, mode: GLenum) {
        rec!(self, "CullFace", mode)
    }
    fn front_face(&self, mode: GLenum) {
        rec!(self, "FrontFace", mode)
    }
    fn polygon_mode(&self, face: GLenum, mode: GLenum) {
        rec!(self, "PolygonMode", face, mode)
    }
    fn depth_func(&self, func: GLenum) {
        rec!(self, "DepthFunc", func)
    }
    fn depth_mask(&self, flag: bool) {
        rec!(self, "DepthMask", flag)
    }
    fn polygon_offset(&self, factor: f32, units: f32) {
        rec!(self, "PolygonOffset", factor, units)
    }
    fn stencil_func_separate(&self, face: GLenum, func: GLenum, reference: i32, mask: u32) {
        rec!(self, "StencilFuncSeparate", face, func, reference, mask)
    }
    fn stencil_op_separate(&self, face: GLenum, sfail: GLenum, dpfail: GLenum, dppass: GLenum) {
        rec!(self, "StencilOpSeparate", face, sfail, dpfail, dppass)
    }
    fn stencil_mask_separate(&self, face: GLenum, mask: u32) {
        rec!(self, "StencilMaskSeparate", face, mask)
    }
    fn line_width(&self, width: f32) {
        rec!(self, "LineWidth", width)
    }
    fn viewport_indexed(&self, index: u32, x: f32, y: f32, w: f32, h: f32) {
        rec!(self, "ViewportIndexedf", index, x, y, w, h)
    }
    fn scissor_indexed(&self, index: u32, x: i32, y: i32, w: i32, h: i32) {
        rec!(self, "ScissorIndexed", index, x, y, w, h)
    }
    fn viewport(&self, x: i32, y: i32, w: i32, h: i32) {
        rec!(self, "Viewport", x, y, w, h)
    }
    fn scissor(&self, x: i32, y: i32, w: i32, h: i32) {
        rec!(self, "Scissor", x, y, w, h)
    }

    fn gen_buffer(&self) -> GLuint {
        let name = self.next_name();
        rec!(self, "GenBuffers", name);
        name
    }
    fn create_buffer(&self) -> GLuint {
        let name = self.next_name();
        rec!(self, "CreateBuffers", name);
        name
    }
    fn delete_buffer(&self, buffer: GLuint) {
        self.inner.borrow_mut().buffers.remove(&buffer);
        rec!(self, "DeleteBuffers", buffer)
    }
    fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        self.inner.borrow_mut().bound_buffers.insert(target, buffer);
        rec!(self, "BindBuffer", target, buffer)
    }
    fn bind_buffer_base(&self, target: GLenum, index: u32, buffer: GLuint) {
        rec!(self, "BindBufferBase", target, index, buffer)
    }
    fn buffer_data(&self, target: GLenum, size: usize, data: Option<&[u8]>, usage: GLenum) {
        let buffer = self.bound(target);
        self.store(buffer, size, data);
        rec!(self, "BufferData", target, size, data.is_some(), usage)
    }
    fn map_buffer_range(&self, target: GLenum, offset: usize, length: usize, access: GLbitfield) -> *mut c_void {
        rec!(self, "MapBufferRange", target, offset, length, access);
        let buffer = self.bound(target);
        self.map(buffer, offset, length)
    }
    fn unmap_buffer(&self, target: GLenum) -> bool {
        rec!(self, "UnmapBuffer", target);
        true
    }
    fn flush_mapped_buffer_range(&self, target: GLenum, offset: usize, length: usize) {
        rec!(self, "FlushMappedBufferRange", target, offset, length)
    }
    fn get_buffer_sub_data(&self, target: GLenum, offset: usize, out: &mut [u8]) {
        rec!(self, "GetBufferSubData", target, offset, out.len());
        let buffer = self.bound(target);
        self.read(buffer, offset, out)
    }
    fn named_buffer_storage(&self, buffer: GLuint, size: usize, data: Option<&[u8]>, flags: GLbitfield) {
        self.store(buffer, size, data);
        rec!(self, "NamedBufferStorage", buffer, size, data.is_some(), flags)
    }
    fn map_named_buffer_range(&self, buffer: GLuint, offset: usize, length: usize, access: GLbitfield) -> *mut c_void {
        rec!(self, "MapNamedBufferRange", buffer, offset, length, access);
        self.map(buffer, offset, length)
    }
    fn unmap_named_buffer(&self, buffer: GLuint) -> bool {
        rec!(self, "UnmapNamedBuffer", buffer);
        true
    }
    fn flush_mapped_named_buffer_range(&self, buffer: GLuint, offset: usize, length: usize) {
        rec!(self, "FlushMappedNamedBufferRange", buffer, offset, length)
    }
    fn get_named_buffer_sub_data(&self, buffer: GLuint, offset: usize, out: &mut [u8]) {
        rec!(self, "GetNamedBufferSubData", buffer, offset, out.len());
        self.read(buffer, offset, out)
    }

    fn gen_texture(&self) -> GLuint {
        let name = self.next_name();
        rec!(self, "GenTextures", name);
        name
    }
    fn create_texture(&self, target: GLenum) -> GLuint {
        let name = self.next_name();
        rec!(self, "CreateTextures", target, name);
        name
    }
    fn delete_texture(&self, texture: GLuint) {
        rec!(self, "DeleteTextures", texture)
    }
    fn bind_texture(&self, target: GLenum, texture: GLuint) {
        rec!(self, "BindTexture", target, texture)
    }
    fn active_texture(&self, unit: u32) {
        rec!(self, "ActiveTexture", unit)
    }
    fn bind_texture_unit(&self, unit: u32, texture: GLuint) {
        rec!(self, "BindTextureUnit", unit, texture)
    }
    fn tex_parameter_i(&self, target: GLenum, pname: GLenum, param: i32) {
        rec!(self, "TexParameteri", target, pname, param)
    }
    fn texture_parameter_i(&self, texture: GLuint, pname: GLenum, param: i32) {
        rec!(self, "TextureParameteri", texture, pname, param)
    }
    fn pixel_store_i(&self, pname: GLenum, param: i32) {
        rec!(self, "PixelStorei", pname, param)
    }
    fn tex_image_2d(&self, target: GLenum, level: i32, internal: GLenum, w: i32, h: i32, format: GLenum, ty: GLenum, data: Option<&[u8]>) {
        rec!(self, "TexImage2D", target, level, internal, w, h, format, ty, data.map(|d| d.len()))
    }
    fn tex_image_3d(&self, target: GLenum, level: i32, internal: GLenum, w: i32, h: i32, d: i32, format: GLenum, ty: GLenum, data: Option<&[u8]>) {
        rec!(self, "TexImage3D", target, level, internal, w, h, d, format, ty, data.map(|d| d.len()))
    }
    fn compressed_tex_image_2d(&self, target: GLenum, level: i32, internal: GLenum, w: i32, h: i32, data: &[u8]) {
        rec!(self, "CompressedTexImage2D", target, level, internal, w, h, data.len())
    }
    fn compressed_tex_image_3d(&self, target: GLenum, level: i32, internal: GLenum, w: i32, h: i32, d: i32, data: &[u8]) {
        rec!(self, "CompressedTexImage3D", target, level, internal, w, h, d, data.len())
    }
    fn tex_image_2d_multisample(&self, target: GLenum, samples: i32, internal: GLenum, w: i32, h: i32) {
        rec!(self, "TexImage2DMultisample", target, samples, internal, w, h)
    }
    fn tex_image_3d_multisample(&self, target: GLenum, samples: i32, internal: GLenum, w: i32, h: i32, d: i32) {
        rec!(self, "TexImage3DMultisample", target, samples, internal, w, h, d)
    }
    fn tex_sub_image_2d(&self, target: GLenum, level: i32, x: i32, y: i32, w: i32, h: i32, format: GLenum, ty: GLenum, data: Option<&[u8]>) {
        rec!(self, "TexSubImage2D", target, level, x, y, w, h, format, ty, data.map(|d| d.len()))
    }
    fn texture_storage_2d(&self, texture: GLuint, levels: i32, internal: GLenum, w: i32, h: i32) {
        rec!(self, "TextureStorage2D", texture, levels, internal, w, h)
    }
    fn texture_storage_3d(&self, texture: GLuint, levels: i32, internal: GLenum, w: i32, h: i32, d: i32) {
        rec!(self, "TextureStorage3D", texture, levels, internal, w, h, d)
    }
    fn texture_storage_2d_multisample(&self, texture: GLuint, samples: i32, internal: GLenum, w: i32, h: i32) {
        rec!(self, "TextureStorage2DMultisample", texture, samples, internal, w, h)
    }
    fn texture_storage_3d_multisample(&self, texture: GLuint, samples: i32, internal: GLenum, w: i32, h: i32, d: i32) {
        rec!(self, "TextureStorage3DMultisample", texture, samples, internal, w, h, d)
    }
    fn texture_sub_image_2d(&self, texture: GLuint, level: i32, x: i32, y: i32, w: i32, h: i32, format: GLenum, ty: GLenum, data: Option<&[u8]>) {
        rec!(self, "TextureSubImage2D", texture, level, x, y, w, h, format, ty, data.map(|d| d.len()))
    }
    fn texture_sub_image_3d(&self, texture: GLuint, level: i32, x: i32, y: i32, z: i32, w: i32, h: i32, d: i32, format: GLenum, ty: GLenum, data: Option<&[u8]>) {
        rec!(self, "TextureSubImage3D", texture, level, x, y, z, w, h, d, format, ty, data.map(|d| d.len()))
    }
    fn compressed_texture_sub_image_2d(&self, texture: GLuint, level: i32, x: i32, y: i32, w: i32, h: i32, format: GLenum, data: &[u8]) {
        rec!(self, "CompressedTextureSubImage2D", texture, level, x, y, w, h, format, data.len())
    }
    fn compressed_texture_sub_image_3d(&self, texture: GLuint, level: i32, x: i32, y: i32, z: i32, w: i32, h: i32, d: i32, format: GLenum, data: &[u8]) {
        rec!(self, "CompressedTextureSubImage3D", texture, level, x, y, z, w, h, d, format, data.len())
    }
    fn generate_mipmap(&self, target: GLenum) {
        rec!(self, "GenerateMipmap", target)
    }
    fn generate_texture_mipmap(&self, texture: GLuint) {
        rec!(self, "GenerateTextureMipmap", texture)
    }
    fn get_tex_image(&self, target: GLenum, level: i32, format: GLenum, ty: GLenum) {
        rec!(self, "GetTexImage", target, level, format, ty)
    }
    fn get_texture_image(&self, texture: GLuint, level: i32, format: GLenum, ty: GLenum, size: usize) {
        rec!(self, "GetTextureImage", texture, level, format, ty, size)
    }
    fn read_pixels(&self, x: i32, y: i32, w: i32, h: i32, format: GLenum, ty: GLenum) {
        rec!(self, "ReadPixels", x, y, w, h, format, ty)
    }

    fn gen_sampler(&self) -> GLuint {
        let name = self.next_name();
        rec!(self, "GenSamplers", name);
        name
    }
    fn delete_sampler(&self, sampler: GLuint) {
        rec!(self, "DeleteSamplers", sampler)
    }
    fn sampler_parameter_i(&self, sampler: GLuint, pname: GLenum, param: i32) {
        rec!(self, "SamplerParameteri", sampler, pname, param)
    }
    fn sampler_parameter_f(&self, sampler: GLuint, pname: GLenum, param: f32) {
        rec!(self, "SamplerParameterf", sampler, pname, param)
    }
    fn bind_sampler(&self, unit: u32, sampler: GLuint) {
        rec!(self, "BindSampler", unit, sampler)
    }

    fn create_shader(&self, stage: GLenum) -> GLuint {
        let name = self.next_name();
        rec!(self, "CreateShader", stage, name);
        name
    }
    fn shader_source(&self, shader: GLuint, source: &str) {
        rec!(self, "ShaderSource", shader, source.len())
    }
    fn compile_shader(&self, shader: GLuint) {
        rec!(self, "CompileShader", shader)
    }
    fn get_shader_iv(&self, _shader: GLuint, pname: GLenum) -> i32 {
        match pname {
            gl::COMPILE_STATUS => (!self.inner.borrow().compile_fails) as i32,
            _ => 0,
        }
    }
    fn get_shader_info_log(&self, _shader: GLuint) -> String {
        if self.inner.borrow().compile_fails {
            "0:1: syntax error".to_owned()
        } else {
            String::new()
        }
    }
    fn delete_shader(&self, shader: GLuint) {
        rec!(self, "DeleteShader", shader)
    }
    fn create_program(&self) -> GLuint {
        let name = self.next_name();
        rec!(self, "CreateProgram", name);
        name
    }
    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        rec!(self, "AttachShader", program, shader)
    }
    fn link_program(&self, program: GLuint) {
        rec!(self, "LinkProgram", program)
    }
    fn get_program_iv(&self, _program: GLuint, pname: GLenum) -> i32 {
        let inner = self.inner.borrow();
        match pname {
            gl::LINK_STATUS => (!inner.link_fails) as i32,
            gl::ACTIVE_ATTRIBUTES => inner.attributes.len() as i32,
            gl::ACTIVE_UNIFORMS => inner.uniforms.len() as i32,
            gl::ACTIVE_UNIFORM_BLOCKS => inner.blocks.len() as i32,
            _ => 0,
        }
    }
    fn get_program_info_log(&self, _program: GLuint) -> String {
        if self.inner.borrow().link_fails {
            "error: unresolved symbol".to_owned()
        } else {
            String::new()
        }
    }
    fn delete_program(&self, program: GLuint) {
        rec!(self, "DeleteProgram", program)
    }
    fn use_program(&self, program: GLuint) {
        rec!(self, "UseProgram", program)
    }
    fn get_active_attrib(&self, _program: GLuint, index: u32) -> (String, i32, GLenum) {
        self.inner.borrow().attributes[index as usize].clone()
    }
    fn get_attrib_location(&self, _program: GLuint, name: &str) -> i32 {
        self.inner
            .borrow()
            .attributes
            .iter()
            .position(|a| a.0 == name)
            .map_or(-1, |p| p as i32)
    }
    fn get_active_uniform(&self, _program: GLuint, index: u32) -> (String, i32, GLenum) {
        self.inner.borrow().uniforms[index as usize].clone()
    }
    fn get_uniform_location(&self, _program: GLuint, name: &str) -> i32 {
        self.inner
            .borrow()
            .uniforms
            .iter()
            .position(|u| u.0 == name || u.0.trim_end_matches("[0]") == name)
            .map_or(-1, |p| p as i32)
    }
    fn get_active_uniform_block_name(&self, _program: GLuint, index: u32) -> String {
        self.inner.borrow().blocks[index as usize].name.clone()
    }
    fn get_active_uniform_block_iv(&self, _program: GLuint, index: u32, pname: GLenum) -> i32 {
        let inner = self.inner.borrow();
        let block = &inner.blocks[index as usize];
        match pname {
            gl::UNIFORM_BLOCK_DATA_SIZE => block.size,
            gl::UNIFORM_BLOCK_ACTIVE_UNIFORMS => block.members.len() as i32,
            _ => 0,
        }
    }
    fn get_active_uniform_block_indices(&self, _program: GLuint, index: u32) -> Vec<u32> {
        self.inner.borrow().blocks[index as usize].members.clone()
    }
    fn get_active_uniforms_iv(&self, _program: GLuint, indices: &[u32], pname: GLenum) -> Vec<i32> {
        rec!(self, "GetActiveUniformsiv", indices.len(), pname);
        indices
            .iter()
            .map(|&i| match pname {
                gl::UNIFORM_BLOCK_INDEX => self.uniform_block_of(i),
                gl::UNIFORM_OFFSET => {
                    let inner = self.inner.borrow();
                    inner
                        .blocks
                        .iter()
                        .find_map(|b| b.members.iter().position(|&m| m == i))
                        .map_or(-1, |p| p as i32 * 16)
                }
                gl::UNIFORM_TYPE => self.inner.borrow().uniforms[i as usize].2 as i32,
                gl::UNIFORM_SIZE => self.inner.borrow().uniforms[i as usize].1,
                _ => 0,
            })
            .collect()
    }
    fn uniform_block_binding(&self, program: GLuint, index: u32, binding: u32) {
        rec!(self, "UniformBlockBinding", program, index, binding)
    }
    fn program_uniform_iv(&self, program: GLuint, location: i32, components: u32, values: &[i32]) {
        rec!(self, format!("ProgramUniform{}iv", components), program, location, values)
    }
    fn program_uniform_uiv(&self, program: GLuint, location: i32, components: u32, values: &[u32]) {
        rec!(self, format!("ProgramUniform{}uiv", components), program, location, values)
    }
    fn program_uniform_fv(&self, program: GLuint, location: i32, components: u32, values: &[f32]) {
        rec!(self, format!("ProgramUniform{}fv", components), program, location, values)
    }
    fn program_uniform_matrix_fv(&self, program: GLuint, location: i32, dim: u32, transpose: bool, values: &[f32]) {
        rec!(self, format!("ProgramUniformMatrix{}fv", dim), program, location, transpose, values.len())
    }

    fn gen_vertex_array(&self) -> GLuint {
        let name = self.next_name();
        rec!(self, "GenVertexArrays", name);
        name
    }
    fn delete_vertex_array(&self, vao: GLuint) {
        rec!(self, "DeleteVertexArrays", vao)
    }
    fn bind_vertex_array(&self, vao: GLuint) {
        rec!(self, "BindVertexArray", vao)
    }
    fn enable_vertex_attrib_array(&self, index: u32) {
        rec!(self, "EnableVertexAttribArray", index)
    }
    fn disable_vertex_attrib_array(&self, index: u32) {
        rec!(self, "DisableVertexAttribArray", index)
    }
    fn vertex_attrib_divisor(&self, index: u32, divisor: u32) {
        rec!(self, "VertexAttribDivisor", index, divisor)
    }
    fn vertex_attrib_pointer(&self, index: u32, size: i32, ty: GLenum, normalized: bool, stride: i32, offset: usize) {
        rec!(self, "VertexAttribPointer", index, size, ty, normalized, stride, offset)
    }
    fn vertex_attrib_i_pointer(&self, index: u32, size: i32, ty: GLenum, stride: i32, offset: usize) {
        rec!(self, "VertexAttribIPointer", index, size, ty, stride, offset)
    }
    fn vertex_attrib_format(&self, index: u32, size: i32, ty: GLenum, normalized: bool, offset: u32) {
        rec!(self, "VertexAttribFormat", index, size, ty, normalized, offset)
    }
    fn vertex_attrib_i_format(&self, index: u32, size: i32, ty: GLenum, offset: u32) {
        rec!(self, "VertexAttribIFormat", index, size, ty, offset)
    }
    fn vertex_attrib_binding(&self, index: u32, binding: u32) {
        rec!(self, "VertexAttribBinding", index, binding)
    }
    fn vertex_binding_divisor(&self, binding: u32, divisor: u32) {
        rec!(self, "VertexBindingDivisor", binding, divisor)
    }
    fn bind_vertex_buffer(&self, binding: u32, buffer: GLuint, offset: usize, stride: i32) {
        rec!(self, "BindVertexBuffer", binding, buffer, offset, stride)
    }

    fn draw_arrays(&self, mode: GLenum, first: i32, count: i32) {
        rec!(self, "DrawArrays", mode, first, count)
    }
    fn draw_arrays_instanced(&self, mode: GLenum, first: i32, count: i32, instances: i32) {
        rec!(self, "DrawArraysInstanced", mode, first, count, instances)
    }
    fn draw_arrays_instanced_base_instance(&self, mode: GLenum, first: i32, count: i32, instances: i32, base_instance: u32) {
        rec!(self, "DrawArraysInstancedBaseInstance", mode, first, count, instances, base_instance)
    }
    fn draw_elements(&self, mode: GLenum, count: i32, ty: GLenum, offset: usize) {
        rec!(self, "DrawElements", mode, count, ty, offset)
    }
    fn draw_elements_instanced_base_vertex(&self, mode: GLenum, count: i32, ty: GLenum, offset: usize, instances: i32, base_vertex: i32) {
        rec!(self, "DrawElementsInstancedBaseVertex", mode, count, ty, offset, instances, base_vertex)
    }
    fn draw_elements_instanced_base_vertex_base_instance(&self, mode: GLenum, count: i32, ty: GLenum, offset: usize, instances: i32, base_vertex: i32, base_instance: u32) {
        rec!(self, "DrawElementsInstancedBaseVertexBaseInstance", mode, count, ty, offset, instances, base_vertex, base_instance)
    }
    fn multi_draw_arrays_indirect(&self, mode: GLenum, offset: usize, count: i32, stride: i32) {
        rec!(self, "MultiDrawArraysIndirect", mode, offset, count, stride)
    }
    fn multi_draw_elements_indirect(&self, mode: GLenum, ty: GLenum, offset: usize, count: i32, stride: i32) {
        rec!(self, "MultiDrawElementsIndirect", mode, ty, offset, count, stride)
    }

    fn gen_framebuffer(&self) -> GLuint {
        let name = self.next_name();
        rec!(self, "GenFramebuffers", name);
        name
    }
    fn create_framebuffer(&self) -> GLuint {
        let name = self.next_name();
        rec!(self, "CreateFramebuffers", name);
        name
    }
    fn delete_framebuffer(&self, fbo: GLuint) {
        rec!(self, "DeleteFramebuffers", fbo)
    }
    fn bind_framebuffer(&self, target: GLenum, fbo: GLuint) {
        rec!(self, "BindFramebuffer", target, fbo)
    }
    fn framebuffer_texture_2d(&self, target: GLenum, attachment: GLenum, textarget: GLenum, texture: GLuint, level: i32) {
        rec!(self, "FramebufferTexture2D", target, attachment, textarget, texture, level)
    }
    fn framebuffer_texture_layer(&self, target: GLenum, attachment: GLenum, texture: GLuint, level: i32, layer: i32) {
        rec!(self, "FramebufferTextureLayer", target, attachment, texture, level, layer)
    }
    fn named_framebuffer_texture(&self, fbo: GLuint, attachment: GLenum, texture: GLuint, level: i32) {
        rec!(self, "NamedFramebufferTexture", fbo, attachment, texture, level)
    }
    fn named_framebuffer_texture_layer(&self, fbo: GLuint, attachment: GLenum, texture: GLuint, level: i32, layer: i32) {
        rec!(self, "NamedFramebufferTextureLayer", fbo, attachment, texture, level, layer)
    }
    fn draw_buffers(&self, bufs: &[GLenum]) {
        rec!(self, "DrawBuffers", bufs)
    }
    fn named_framebuffer_draw_buffers(&self, fbo: GLuint, bufs: &[GLenum]) {
        rec!(self, "NamedFramebufferDrawBuffers", fbo, bufs)
    }
    fn check_framebuffer_status(&self, target: GLenum) -> GLenum {
        rec!(self, "CheckFramebufferStatus", target);
        self.inner
            .borrow()
            .framebuffer_status
            .unwrap_or(gl::FRAMEBUFFER_COMPLETE)
    }
    fn check_named_framebuffer_status(&self, fbo: GLuint, target: GLenum) -> GLenum {
        rec!(self, "CheckNamedFramebufferStatus", fbo, target);
        self.inner
            .borrow()
            .framebuffer_status
            .unwrap_or(gl::FRAMEBUFFER_COMPLETE)
    }
    fn clear_buffer_fv(&self, buffer: GLenum, draw_buffer: i32, value: &[f32]) {
        rec!(self, "ClearBufferfv", buffer, draw_buffer, value)
    }
    fn clear_buffer_iv(&self, buffer: GLenum, draw_buffer: i32, value: &[i32]) {
        rec!(self, "ClearBufferiv", buffer, draw_buffer, value)
    }
    fn clear_buffer_fi(&self, buffer: GLenum, draw_buffer: i32, depth: f32, stencil: i32) {
        rec!(self, "ClearBufferfi", buffer, draw_buffer, depth, stencil)
    }
    fn blit_framebuffer(&self, src: [i32; 4], dst: [i32; 4], mask: GLbitfield, filter: GLenum) {
        rec!(self, "BlitFramebuffer", src, dst, mask, filter)
    }
    fn blit_named_framebuffer(&self, read: GLuint, draw: GLuint, src: [i32; 4], dst: [i32; 4], mask: GLbitfield, filter: GLenum) {
        rec!(self, "BlitNamedFramebuffer", read, draw, src, dst, mask, filter)
    }
    fn invalidate_framebuffer(&self, target: GLenum, attachments: &[GLenum]) {
        rec!(self, "InvalidateFramebuffer", target, attachments)
    }
    fn invalidate_named_framebuffer_data(&self, fbo: GLuint, attachments: &[GLenum]) {
        rec!(self, "InvalidateNamedFramebufferData", fbo, attachments)
    }
    fn read_buffer(&self, mode: GLenum) {
        rec!(self, "ReadBuffer", mode)
    }
    fn named_framebuffer_read_buffer(&self, fbo: GLuint, mode: GLenum) {
        rec!(self, "NamedFramebufferReadBuffer", fbo, mode)
    }
    fn copy_tex_sub_image_2d(&self, target: GLenum, level: i32, xoffset: i32, yoffset: i32, x: i32, y: i32, w: i32, h: i32) {
        rec!(self, "CopyTexSubImage2D", target, level, xoffset, yoffset, x, y, w, h)
    }
    fn copy_texture_sub_image_2d(&self, texture: GLuint, level: i32, xoffset: i32, yoffset: i32, x: i32, y: i32, w: i32, h: i32) {
        rec!(self, "CopyTextureSubImage2D", texture, level, xoffset, yoffset, x, y, w, h)
    }
    fn copy_texture_sub_image_3d(&self, texture: GLuint, level: i32, xoffset: i32, yoffset: i32, zoffset: i32, x: i32, y: i32, w: i32, h: i32) {
        rec!(self, "CopyTextureSubImage3D", texture, level, xoffset, yoffset, zoffset, x, y, w, h)
    }

    fn debug_message_control(&self, enabled: bool) {
        rec!(self, "DebugMessageControl", enabled)
    }
    fn debug_message_callback(&self) {
        rec!(self, "DebugMessageCallback")
    }
    fn get_integer(&self, pname: GLenum) -> i32 {
        if pname == gl::NUM_EXTENSIONS {
            return self.inner.borrow().extensions.len() as i32;
        }
        self.inner.borrow().integers.get(&pname).cloned().unwrap_or(0)
    }
    fn get_integer_i(&self, pname: GLenum, _index: u32) -> i32 {
        self.get_integer(pname)
    }
    fn get_integer64(&self, pname: GLenum) -> i64 {
        i64::from(self.get_integer(pname))
    }
    fn get_float(&self, pname: GLenum) -> f32 {
        self.get_integer(pname) as f32
    }
    fn get_string(&self, name: GLenum) -> Option<String> {
        self.inner.borrow().strings.get(&name).cloned()
    }
    fn get_string_i(&self, name: GLenum, index: u32) -> Option<String> {
        if name == gl::EXTENSIONS {
            self.inner.borrow().extensions.get(index as usize).cloned()
        } else {
            None
        }
    }
    fn get_error(&self) -> GLenum {
        gl::NO_ERROR
    }
}

/// Window surface stand-in that counts presents.
#[derive(Debug)]
pub struct MockSwapchain {
    pub desc: SwapchainDesc,
    pub active: Cell<bool>,
    pub presents: Cell<u32>,
}

impl MockSwapchain {
    pub fn new(width: u32, height: u32) -> MockSwapchain {
        MockSwapchain {
            desc: SwapchainDesc {
                width,
                height,
                ..Default::default()
            },
            active: Cell::new(false),
            presents: Cell::new(0),
        }
    }
}

impl Swapchain for MockSwapchain {
    fn set_active(&self, active: bool) -> bool {
        self.active.set(active);
        true
    }

    fn is_active(&self) -> bool {
        self.active.get()
    }

    fn desc(&self) -> SwapchainDesc {
        self.desc
    }

    fn present(&self) {
        self.presents.set(self.presents.get() + 1);
    }
}

/// Vertex and fragment stage pair linked against the scripted introspection tables.
pub fn program(gl: &Rc<RecordingGl>) -> GlProgram {
    const VS: &str = "#version 330\nin vec3 in_POSITION0;\nvoid main() {}";
    const FS: &str = "#version 330\nout vec4 color;\nvoid main() {}";
    let api: Rc<dyn GlApi> = gl.clone();
    let shaders = [(ShaderStageFlags::VERTEX, VS), (ShaderStageFlags::FRAGMENT, FS)]
        .iter()
        .map(|&(stage, source)| {
            Rc::new(GlShader::new(api.clone(), ShaderDesc::glsl(stage, source)).unwrap())
        })
        .collect();
    GlProgram::new(api, ProgramDesc::new(shaders)).unwrap()
}
